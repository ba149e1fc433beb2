use super::{
    job::Job,
    state::{Ticks, quantum_for},
};
use crate::error::CpuError;

/// The single processor. Holds at most one job and its remaining slice.
#[derive(Debug, Default)]
pub struct ExecutionUnit {
    current: Option<Job>,
    quantum: Ticks,
}

impl ExecutionUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Job> {
        self.current.as_ref()
    }

    /// Remaining slice, only while a job is held.
    pub fn quantum(&self) -> Option<Ticks> {
        self.current.as_ref().map(|_| self.quantum)
    }

    pub fn submit_job(&mut self, job: Job) -> Result<(), CpuError> {
        if let Some(running) = &self.current {
            return Err(CpuError::Busy {
                running: running.pid(),
                rejected: job.pid(),
            });
        }

        self.quantum = quantum_for(job.level());
        self.current = Some(job);
        Ok(())
    }

    /// Runs the held job for one tick.
    pub fn tick(&mut self) -> Result<(), CpuError> {
        let job = self.current.as_mut().ok_or(CpuError::Idle { op: "tick" })?;
        self.quantum = self.quantum.saturating_sub(1);
        job.dec_remaining();
        Ok(())
    }

    pub fn is_job_finished(&self) -> bool {
        self.current.as_ref().is_some_and(Job::is_finished)
    }

    pub fn is_quantum_expired(&self) -> bool {
        self.current.is_some() && self.quantum == 0
    }

    /// Takes the job off the processor and demotes it one level.
    pub fn preempt(&mut self) -> Result<Job, CpuError> {
        let mut job = self.take("preempt")?;
        job.inc_level();
        Ok(job)
    }

    /// Takes a finished job off the processor, stamping its departure clock.
    pub fn clear(&mut self, now: Ticks) -> Result<Job, CpuError> {
        let mut job = self.take("clear")?;
        debug_assert!(job.is_finished(), "cleared job {} before completion", job.pid());
        job.set_time_in_system(now);
        Ok(job)
    }

    fn take(&mut self, op: &'static str) -> Result<Job, CpuError> {
        let job = self.current.take().ok_or(CpuError::Idle { op })?;
        self.quantum = 0;
        Ok(job)
    }
}
