pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use crate::core::{IDLE, SchedCoreEvent, Slot, Trace};
pub use error::{InputFault, SchedError};
pub use scheduler::{PriorityScheduler, Scheduler};
pub use sim::{ProcessDescriptor, Report, Sim, WorkloadConfig};
