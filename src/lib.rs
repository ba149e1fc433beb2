pub mod core;
pub mod error;
pub mod sim;

pub use crate::core::{AdmissionPolicy, JobDescriptor, Mlfq, MlfqConfig, SchedEvent, Stats};
pub use error::{CpuError, InputError, LoadError};
pub use sim::Sim;
