pub mod driver;
pub mod process;
pub mod report;
pub mod workload;

pub use driver::Sim;
pub use process::{ProcessDescriptor, ProcessInstance};
pub use report::{ProcessMetrics, Report, Summary};
pub use workload::{WorkloadConfig, bernoulli_processes};
