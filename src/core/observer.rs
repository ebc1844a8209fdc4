use super::state::{ProcState, SchedCtx, Ticks};

#[derive(Debug)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.step += 1;

        debug_assert_eq!(
            ctx.trace.len() as Ticks,
            ctx.now,
            "Trace length must match elapsed units"
        );

        let mut ready = 0usize;
        for (key, process) in &ctx.processes {
            match process.state {
                ProcState::Ready => {
                    ready += 1;
                    debug_assert!(
                        ctx.ready.contains(key),
                        "Ready process {key:?} missing from the ready pool"
                    );
                    debug_assert!(
                        process.remaining > 0,
                        "Ready process {key:?} has no remaining service"
                    );
                    debug_assert!(
                        process.arrival_time < ctx.now,
                        "Process {key:?} ready before its arrival"
                    );
                }
                ProcState::Retired => {
                    debug_assert_eq!(
                        process.remaining, 0,
                        "Retired process {key:?} has remaining service"
                    );
                    debug_assert!(
                        !ctx.ready.contains(key),
                        "Retired process {key:?} still present in the ready pool"
                    );
                    debug_assert!(
                        process.completion_time.is_some_and(|t| t <= ctx.now),
                        "Retired process {key:?} has no valid completion time"
                    );
                }
                ProcState::Pending | ProcState::Running => {
                    debug_assert!(
                        false,
                        "Process {key:?} left in {:?} at the end of a tick",
                        process.state
                    );
                }
            }
            debug_assert!(
                process.remaining <= process.required_service,
                "Process {key:?} remaining exceeds required service"
            );
        }

        debug_assert_eq!(
            ready,
            ctx.ready.len(),
            "Ready pool holds processes that are not Ready"
        );

        if let Some(current) = ctx.current {
            debug_assert_eq!(
                ctx.process(current).state,
                ProcState::Ready,
                "Current process {current:?} must be waiting in the ready pool"
            );
        }
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}
