pub mod driver;
pub mod input;
pub mod report;
pub mod workload;

pub use driver::Sim;
pub use input::parse_jobs;
pub use report::{EventTable, write_stats};
pub use workload::bernoulli_jobs;
