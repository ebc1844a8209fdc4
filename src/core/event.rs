use crate::core::{ProcessKey, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedCoreEvent {
    // Moved from pending into the ready pool
    Arrived {
        process: ProcessKey,
    },
    Dispatched {
        process: ProcessKey,
        at: Ticks,
        remaining: Ticks,
    },
    // Previous unit's process is still ready but lost the CPU
    Preempted {
        process: ProcessKey,
        by: ProcessKey,
    },
    Retired {
        process: ProcessKey,
        completion_time: Ticks,
    },
    // Ready pool empty for this unit
    CpuIdle {
        at: Ticks,
    },
}
