use std::io;
use std::num::ParseIntError;

use thiserror::Error;

use crate::core::state::Pid;

/// Rejected job descriptors. Fatal to the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("job {pid} has negative arrival time {arrival}")]
    NegativeArrival { pid: Pid, arrival: i64 },
    #[error("job {pid} requires {required} ticks; required time must be positive")]
    NonPositiveRequired { pid: Pid, required: i64 },
    #[error("process id {0} appears more than once")]
    DuplicatePid(Pid),
}

/// Execution unit used outside its contract. Always a driver bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpuError {
    #[error("execution unit is running job {running}, cannot accept job {rejected}")]
    Busy { running: Pid, rejected: Pid },
    #[error("execution unit is idle, cannot {op}")]
    Idle { op: &'static str },
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read job list")]
    Io(#[from] io::Error),
    #[error("line {line}: expected `arrival pid required`, found {found:?}")]
    MissingField { line: usize, found: String },
    #[error("line {line}: invalid integer {token:?}")]
    BadInteger {
        line: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },
}
