use super::{
    event::SchedCoreEvent,
    observer::Observer,
    state::{ProcState, ProcessKey, SchedCtx, Ticks},
    trace::{Slot, Trace},
};
use crate::scheduler::{ENQ_REENQ, ENQ_WAKEUP, Scheduler};

pub struct SchedCore<S: Scheduler> {
    pub ctx: SchedCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(num_processes: usize) -> Self {
        let mut ctx = SchedCtx::with_capacity(num_processes);
        let scheduler = S::init(&mut ctx);
        Self {
            ctx,
            scheduler,
            observer: Observer::new(),
        }
    }

    // Hand a freshly created process to the scheduler
    pub fn admit(&mut self, process: ProcessKey) -> SchedCoreEvent {
        debug_assert_eq!(
            self.ctx.process(process).state,
            ProcState::Pending,
            "Only pending processes can be admitted"
        );
        self.scheduler.enqueue(&mut self.ctx, process, ENQ_WAKEUP);
        SchedCoreEvent::Arrived { process }
    }

    /// Run one time unit: dispatch, charge service, re-enqueue or retire.
    pub fn tick(&mut self) -> Vec<SchedCoreEvent> {
        let now = self.ctx.now;
        let mut events = Vec::new();

        match self.scheduler.dispatch(&mut self.ctx) {
            None => {
                self.ctx.record(Slot::Idle);
                self.ctx.current = None;
                events.push(SchedCoreEvent::CpuIdle { at: now });
            }
            Some(process) => {
                if let Some(prev) = self.ctx.current.filter(|&prev| prev != process) {
                    log::debug!("t={now} {prev:?} preempted by {process:?}");
                    events.push(SchedCoreEvent::Preempted {
                        process: prev,
                        by: process,
                    });
                }

                self.ctx.set_running(process);
                self.ctx.record(Slot::Run(process));
                let remaining = self.ctx.consume_unit(process);
                log::debug!("t={now} dispatch {process:?}, {remaining} left");
                events.push(SchedCoreEvent::Dispatched {
                    process,
                    at: now,
                    remaining,
                });

                if remaining == 0 {
                    let completion_time = now + 1;
                    self.ctx.mark_retired(process, completion_time);
                    self.ctx.current = None;
                    log::debug!("t={now} retire {process:?}");
                    events.push(SchedCoreEvent::Retired {
                        process,
                        completion_time,
                    });
                } else {
                    // Unconditional: the pool decides whether it runs again
                    self.scheduler.enqueue(&mut self.ctx, process, ENQ_REENQ);
                    self.ctx.current = Some(process);
                }
            }
        }

        self.ctx.advance_time(1);
        self.observer.observe(&self.ctx);
        events
    }

    pub fn has_ready(&self) -> bool {
        self.ctx.has_ready()
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn trace(&self) -> &Trace {
        &self.ctx.trace
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}

impl<S: Scheduler> Default for SchedCore<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::PriorityScheduler;

    fn admit(
        core: &mut SchedCore<PriorityScheduler>,
        arrival: Ticks,
        priority: i64,
        burst: Ticks,
    ) -> ProcessKey {
        let key = core.ctx.create_process(arrival, priority, burst);
        core.admit(key);
        key
    }

    #[test]
    fn empty_core_idles() {
        let mut core = SchedCore::<PriorityScheduler>::new();
        let events = core.tick();
        assert_eq!(events, vec![SchedCoreEvent::CpuIdle { at: 0 }]);
        assert_eq!(core.trace().slots(), &[Slot::Idle]);
        assert_eq!(core.now(), 1);
        assert_eq!(core.observer().steps(), 1);
    }

    #[test]
    fn unfinished_process_is_reenqueued() {
        let mut core = SchedCore::<PriorityScheduler>::new();
        let a = admit(&mut core, 0, 1, 2);

        let events = core.tick();
        assert_eq!(
            events,
            vec![SchedCoreEvent::Dispatched {
                process: a,
                at: 0,
                remaining: 1
            }]
        );
        assert!(core.has_ready());
        assert_eq!(core.ctx.current, Some(a));
        assert_eq!(core.scheduler.reenqueued(), 1);

        let events = core.tick();
        assert_eq!(
            events.last(),
            Some(&SchedCoreEvent::Retired {
                process: a,
                completion_time: 2
            })
        );
        assert!(!core.has_ready());
        assert_eq!(core.ctx.current, None);
        assert_eq!(core.scheduler.enqueued(), 2);
    }

    #[test]
    fn higher_priority_admission_preempts() {
        let mut core = SchedCore::<PriorityScheduler>::new();
        let low = admit(&mut core, 0, 1, 3);
        core.tick();

        let high = admit(&mut core, 1, 10, 1);
        let events = core.tick();
        assert_eq!(
            events[0],
            SchedCoreEvent::Preempted {
                process: low,
                by: high
            }
        );
        assert_eq!(core.trace().slots(), &[Slot::Run(low), Slot::Run(high)]);
        assert_eq!(core.ctx.process(low).remaining, 2);
    }
}
