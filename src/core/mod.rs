pub mod config;
pub mod cpu;
pub mod driver;
pub mod event;
pub mod job;
pub mod observer;
pub mod queue;
pub mod state;
pub mod stats;

pub use config::{AdmissionPolicy, MlfqConfig};
pub use cpu::ExecutionUnit;
pub use driver::Mlfq;
pub use event::{EventSink, SchedEvent};
pub use job::{Job, JobDescriptor};
pub use queue::ReadyQueue;
pub use state::{Level, MAX_QUEUE_LEVEL, Pid, SchedState, Ticks, quantum_for};
pub use stats::{Stats, Totals};
