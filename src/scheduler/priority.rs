use super::{ENQ_REENQ, EnqueueFlags, ProcessKey, SchedCtx, Scheduler};

/// Preemptive priority policy.
///
/// Every ready process, including the one that just ran, sits in the shared
/// ready pool under its [`Precedence`](crate::core::Precedence), so a newly
/// arrived higher-priority process takes the CPU on the next unit.
#[derive(Debug, Default)]
pub struct PriorityScheduler {
    enqueued: u64,
    reenqueued: u64,
}

impl PriorityScheduler {
    pub fn enqueued(&self) -> u64 {
        self.enqueued
    }

    pub fn reenqueued(&self) -> u64 {
        self.reenqueued
    }
}

impl Scheduler for PriorityScheduler {
    fn init(_ctx: &mut SchedCtx) -> Self {
        Self::default()
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, process: ProcessKey, flags: EnqueueFlags) {
        let precedence = ctx.process(process).precedence();
        log::trace!(
            "t={} enqueue {process:?} {precedence:?} flags={flags:#x}",
            ctx.now
        );

        self.enqueued += 1;
        if flags & ENQ_REENQ != 0 {
            self.reenqueued += 1;
        }
        ctx.ready_push(process, precedence);
    }

    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<ProcessKey> {
        ctx.ready_pop()
    }
}
