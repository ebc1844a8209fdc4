use slotmap::{SlotMap, new_key_type};

use super::{
    ready::{Precedence, ReadyPool},
    trace::{Slot, Trace},
};

pub type Ticks = u64;
pub type Priority = i64;

new_key_type! {
    // Stable handle into the process arena
    pub struct ProcessKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    // Admitted, not yet handed to the scheduler
    Pending,
    Ready,
    Running,
    Retired,
}

#[derive(Debug)]
pub struct Process {
    pub key: ProcessKey,
    pub state: ProcState,
    pub arrival_time: Ticks,
    pub priority: Priority,
    // Admission order; final tie-break in the ready pool
    pub seq: u64,
    pub required_service: Ticks,
    pub remaining: Ticks,
    pub completion_time: Option<Ticks>,
}

impl Process {
    pub fn precedence(&self) -> Precedence {
        Precedence {
            priority: self.priority,
            arrival_time: self.arrival_time,
            seq: self.seq,
        }
    }
}

#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub processes: SlotMap<ProcessKey, Process>,
    pub ready: ReadyPool,
    pub trace: Trace,
    // Process that held the CPU during the previous unit and is still unfinished
    pub current: Option<ProcessKey>,

    // Increment upon process creation
    next_seq: u64,
}

impl SchedCtx {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(num_processes: usize) -> Self {
        Self {
            now: 0,
            processes: SlotMap::with_capacity_and_key(num_processes),
            ready: ReadyPool::new(),
            trace: Trace::default(),
            current: None,
            next_seq: 0,
        }
    }

    pub fn create_process(
        &mut self,
        arrival_time: Ticks,
        priority: Priority,
        required_service: Ticks,
    ) -> ProcessKey {
        debug_assert!(required_service > 0, "Process must require service");
        let seq = self.next_seq;
        self.next_seq += 1;

        self.processes.insert_with_key(|key| Process {
            key,
            state: ProcState::Pending,
            arrival_time,
            priority,
            seq,
            required_service,
            remaining: required_service,
            completion_time: None,
        })
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn process(&self, key: ProcessKey) -> &Process {
        self.processes.get(key).expect("Unknown process key")
    }

    pub fn process_mut(&mut self, key: ProcessKey) -> &mut Process {
        self.processes.get_mut(key).expect("Unknown process key")
    }

    pub fn ready_push(&mut self, key: ProcessKey, precedence: Precedence) {
        let process = self.process_mut(key);
        debug_assert!(
            matches!(process.state, ProcState::Pending | ProcState::Running),
            "Process {key:?} must be Pending or Running when enqueued, was {:?}",
            process.state
        );
        debug_assert!(
            process.remaining > 0,
            "Process {key:?} has no remaining service and cannot be enqueued"
        );
        process.state = ProcState::Ready;
        self.ready.insert(key, precedence);
    }

    pub fn ready_pop(&mut self) -> Option<ProcessKey> {
        let key = self.ready.pop_best()?;
        debug_assert_eq!(
            self.process(key).state,
            ProcState::Ready,
            "Process {key:?} popped from the ready pool without being Ready"
        );
        Some(key)
    }

    pub fn has_ready(&self) -> bool {
        !self.ready.is_empty()
    }

    pub fn set_running(&mut self, key: ProcessKey) {
        debug_assert!(
            !self.ready.contains(key),
            "Running process {key:?} must not be in the ready pool"
        );
        self.process_mut(key).state = ProcState::Running;
    }

    // Charge one unit of service; returns what is left
    pub fn consume_unit(&mut self, key: ProcessKey) -> Ticks {
        let process = self.process_mut(key);
        debug_assert_eq!(process.state, ProcState::Running);
        process.remaining = process
            .remaining
            .checked_sub(1)
            .expect("Dispatched process had no remaining service");
        process.remaining
    }

    pub fn mark_retired(&mut self, key: ProcessKey, completion_time: Ticks) {
        let process = self.process_mut(key);
        debug_assert_eq!(
            process.remaining, 0,
            "Retiring process {key:?} with remaining service"
        );
        process.state = ProcState::Retired;
        process.completion_time = Some(completion_time);
    }

    pub fn record(&mut self, slot: Slot) {
        debug_assert_eq!(
            self.trace.len() as Ticks,
            self.now,
            "Trace must hold exactly one slot per elapsed unit"
        );
        self.trace.push(slot);
    }
}

impl Default for SchedCtx {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_follows_creation_order() {
        let mut ctx = SchedCtx::new();
        let a = ctx.create_process(0, 1, 2);
        let b = ctx.create_process(0, 1, 2);
        assert_eq!(ctx.process(a).seq, 0);
        assert_eq!(ctx.process(b).seq, 1);
        assert_eq!(ctx.process(a).state, ProcState::Pending);
        assert_eq!(ctx.process(b).remaining, 2);
    }

    #[test]
    fn run_cycle_moves_through_states() {
        let mut ctx = SchedCtx::new();
        let key = ctx.create_process(0, 3, 1);
        let precedence = ctx.process(key).precedence();
        ctx.ready_push(key, precedence);
        assert_eq!(ctx.process(key).state, ProcState::Ready);
        assert!(ctx.has_ready());

        assert_eq!(ctx.ready_pop(), Some(key));
        ctx.set_running(key);
        assert_eq!(ctx.consume_unit(key), 0);
        ctx.mark_retired(key, 1);

        let process = ctx.process(key);
        assert_eq!(process.state, ProcState::Retired);
        assert_eq!(process.completion_time, Some(1));
        assert!(!ctx.has_ready());
        assert_eq!(ctx.ready_pop(), None);
    }
}
