use super::{
    process::{ProcessDescriptor, ProcessInstance},
    report::Report,
};
use crate::{
    core::{
        IDLE, SchedCoreEvent, Slot, Trace,
        driver::SchedCore,
        state::{ProcessKey, Ticks},
    },
    scheduler::{PriorityScheduler, Scheduler},
};
use rustc_hash::FxHashMap;

pub struct Sim<S: Scheduler = PriorityScheduler> {
    pub core: SchedCore<S>,
    // Sorted by arrival time; everything from `arrival_cursor` on is pending
    pub processes: Vec<ProcessInstance>,
    arrival_cursor: usize,
    // ProcessKey --> processes[index]; used to propagate progress to the instance
    keys_to_processes: FxHashMap<ProcessKey, usize>,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(mut descriptors: Vec<ProcessDescriptor>) -> Self {
        // Stable: input order among equal arrivals becomes admission order
        descriptors.sort_by_key(ProcessDescriptor::arrival_time);
        let processes: Vec<_> = descriptors
            .into_iter()
            .map(ProcessInstance::new)
            .collect();

        Self {
            core: SchedCore::<S>::with_capacity(processes.len()),
            keys_to_processes: FxHashMap::with_capacity_and_hasher(
                processes.len(),
                Default::default(),
            ),
            processes,
            arrival_cursor: 0,
        }
    }

    pub fn step(&mut self) -> Vec<SchedCoreEvent> {
        let mut events = self.handle_arrivals();
        let tick_events = self.core.tick();

        for event in &tick_events {
            match *event {
                SchedCoreEvent::Dispatched { process, at, .. } => {
                    let instance = self.instance_mut(process);
                    if instance.first_run.is_none() {
                        instance.first_run = Some(at);
                    }
                }
                SchedCoreEvent::Retired {
                    process,
                    completion_time,
                } => {
                    self.instance_mut(process).completion_time = Some(completion_time);
                }
                _ => {}
            }
        }

        events.extend(tick_events);
        events
    }

    fn handle_arrivals(&mut self) -> Vec<SchedCoreEvent> {
        let now = self.core.now();
        let mut events = Vec::new();

        // Contiguous, since processes are sorted by arrival
        while let Some(instance) = self.processes.get_mut(self.arrival_cursor) {
            let descriptor = &instance.descriptor;
            if descriptor.arrival_time() > now {
                break;
            }

            let key = self.core.ctx.create_process(
                descriptor.arrival_time(),
                descriptor.priority(),
                descriptor.burst_time(),
            );
            log::trace!("t={now} arrival {} as {key:?}", descriptor.id());
            instance.key = Some(key);
            self.keys_to_processes.insert(key, self.arrival_cursor);
            events.push(self.core.admit(key));

            self.arrival_cursor += 1;
        }

        events
    }

    /// Step until nothing is pending or ready.
    pub fn run(&mut self) -> &Trace {
        while !self.is_finished() {
            self.step();
        }
        log::info!(
            "simulated {} processes in {} ticks ({} idle)",
            self.processes.len(),
            self.core.now(),
            self.core.trace().idle_units()
        );
        self.core.trace()
    }

    pub fn is_finished(&self) -> bool {
        self.arrival_cursor == self.processes.len() && !self.core.has_ready()
    }

    pub fn pending(&self) -> usize {
        self.processes.len() - self.arrival_cursor
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }

    pub fn trace(&self) -> &Trace {
        self.core.trace()
    }

    pub fn processes(&self) -> &[ProcessInstance] {
        &self.processes
    }

    pub fn instance(&self, key: ProcessKey) -> &ProcessInstance {
        let index = *self
            .keys_to_processes
            .get(&key)
            .expect("Process key missing associated instance");
        &self.processes[index]
    }

    fn instance_mut(&mut self, key: ProcessKey) -> &mut ProcessInstance {
        let index = *self
            .keys_to_processes
            .get(&key)
            .expect("Process key missing associated instance");
        &mut self.processes[index]
    }

    pub fn label(&self, slot: Slot) -> &str {
        match slot {
            Slot::Run(key) => self.instance(key).descriptor.id(),
            Slot::Idle => IDLE,
        }
    }

    pub fn trace_labels(&self) -> Vec<&str> {
        self.trace()
            .slots()
            .iter()
            .map(|&slot| self.label(slot))
            .collect()
    }

    /// Segments as `label[start,end)`, space separated.
    pub fn gantt(&self) -> String {
        self.trace()
            .segments()
            .iter()
            .map(|segment| {
                format!(
                    "{}[{},{})",
                    self.label(segment.slot),
                    segment.start,
                    segment.end
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn describe(&self, event: &SchedCoreEvent) -> String {
        let id = |key| self.label(Slot::Run(key));
        match *event {
            SchedCoreEvent::Arrived { process } => format!("{} arrived", id(process)),
            SchedCoreEvent::Dispatched {
                process, remaining, ..
            } => format!("{} dispatched, {remaining} left", id(process)),
            SchedCoreEvent::Preempted { process, by } => {
                format!("{} preempted by {}", id(process), id(by))
            }
            SchedCoreEvent::Retired {
                process,
                completion_time,
            } => format!("{} retired at {completion_time}", id(process)),
            SchedCoreEvent::CpuIdle { .. } => "cpu idle".to_string(),
        }
    }

    pub fn report(&self) -> Report {
        Report::new(&self.processes, self.trace())
    }
}
