use serde::{Deserialize, Serialize};

use super::state::{Level, MAX_QUEUE_LEVEL, Pid, Ticks};
use crate::error::LoadError;

/// One line of input, as parsed: nothing is validated yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub arrival_time: i64,
    pub pid: Pid,
    pub required_time: i64,
}

impl JobDescriptor {
    pub fn new(arrival_time: i64, pid: Pid, required_time: i64) -> Self {
        Self {
            arrival_time,
            pid,
            required_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pid: Pid,
    arrival_time: Ticks,
    required_time: Ticks,
    remaining_time: Ticks,
    level: Level,
    waiting_time: Ticks,
    wait_start: Ticks,
    // Clock value at departure
    time_in_system: Option<Ticks>,
}

impl Job {
    pub fn new(pid: Pid, arrival_time: Ticks, required_time: Ticks) -> Self {
        debug_assert!(required_time > 0, "job {pid} requires no service");
        Self {
            pid,
            arrival_time,
            required_time,
            remaining_time: required_time,
            level: 0,
            waiting_time: 0,
            wait_start: 0,
            time_in_system: None,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    pub fn required_time(&self) -> Ticks {
        self.required_time
    }

    pub fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn waiting_time(&self) -> Ticks {
        self.waiting_time
    }

    pub fn time_in_system(&self) -> Option<Ticks> {
        self.time_in_system
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Departure clock minus arrival time, once the job has departed.
    pub fn turnaround(&self) -> Option<Ticks> {
        self.time_in_system
            .map(|departed| departed.saturating_sub(self.arrival_time))
    }

    /// Starts one ready-queue sojourn. Pair with [`Job::clock_out_queue`].
    pub fn clock_in_queue(&mut self, now: Ticks) {
        self.wait_start = now;
    }

    pub fn clock_out_queue(&mut self, now: Ticks) {
        debug_assert!(now >= self.wait_start, "job {} left its queue before entering", self.pid);
        self.waiting_time += now.saturating_sub(self.wait_start);
    }

    pub(crate) fn dec_remaining(&mut self) {
        debug_assert!(self.remaining_time > 0, "job {} ran past completion", self.pid);
        self.remaining_time = self.remaining_time.saturating_sub(1);
    }

    /// Demotes one level; stays put at the lowest-priority level.
    pub fn inc_level(&mut self) {
        if self.level < MAX_QUEUE_LEVEL - 1 {
            self.level += 1;
        }
    }

    pub(crate) fn set_time_in_system(&mut self, now: Ticks) {
        self.time_in_system = Some(now);
    }
}

impl TryFrom<JobDescriptor> for Job {
    type Error = LoadError;

    fn try_from(desc: JobDescriptor) -> Result<Self, Self::Error> {
        let arrival = Ticks::try_from(desc.arrival_time).map_err(|_| LoadError::NegativeArrival {
            pid: desc.pid,
            arrival: desc.arrival_time,
        })?;
        let required = match Ticks::try_from(desc.required_time) {
            Ok(required) if required > 0 => required,
            _ => {
                return Err(LoadError::NonPositiveRequired {
                    pid: desc.pid,
                    required: desc.required_time,
                });
            }
        };
        Ok(Job::new(desc.pid, arrival, required))
    }
}
