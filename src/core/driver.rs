use log::{debug, info, trace, warn};
use rustc_hash::FxHashSet;

use super::{
    config::{AdmissionPolicy, MlfqConfig},
    event::SchedEvent,
    job::{Job, JobDescriptor},
    observer::Observer,
    state::{SchedState, Ticks},
    stats::Stats,
};
use crate::error::{CpuError, LoadError};

/// Multi-level feedback queue scheduler over a single execution unit.
///
/// Each call to [`Mlfq::step`] advances the clock by one tick and applies,
/// in order: admission, CPU service (completion or preemption, each
/// followed by a dispatch attempt; an idle tick dispatches directly) and
/// the starvation count.
pub struct Mlfq {
    pub state: SchedState,
    config: MlfqConfig,
    observer: Observer,
}

impl Mlfq {
    /// Validates and loads the job list. Descriptors are expected in
    /// arrival order; out-of-order input is stably re-sorted.
    pub fn new(descriptors: Vec<JobDescriptor>, config: MlfqConfig) -> Result<Self, LoadError> {
        let mut seen = FxHashSet::default();
        let mut jobs = Vec::with_capacity(descriptors.len());
        for desc in descriptors {
            if !seen.insert(desc.pid) {
                return Err(LoadError::DuplicatePid(desc.pid));
            }
            jobs.push(Job::try_from(desc)?);
        }

        if !jobs.is_sorted_by_key(Job::arrival_time) {
            warn!("job list not sorted by arrival time; re-sorting");
            jobs.sort_by_key(Job::arrival_time);
        }

        info!("loaded {} jobs, {:?}", jobs.len(), config);
        Ok(Self {
            state: SchedState::new(jobs.into_iter().collect()),
            config,
            observer: Observer::new(),
        })
    }

    pub fn step(&mut self) -> Result<Vec<SchedEvent>, CpuError> {
        let mut events = Vec::new();
        self.state.advance_time(1);
        let now = self.state.now;
        trace!("tick {now}");

        self.admit_arrivals(&mut events);

        if self.state.cpu.is_busy() {
            self.state.cpu.tick()?;

            if self.state.cpu.is_job_finished() {
                let job = self.state.cpu.clear(now)?;
                let turnaround = self.state.totals.record_departure(&job);
                debug!("t={now} job {} departs after {turnaround} ticks", job.pid());
                events.push(SchedEvent::Departure {
                    pid: job.pid(),
                    clock: now,
                    turnaround,
                    level: job.level(),
                });
                self.state.departed.push(job);
                self.submit_queued_job(&mut events)?;
            } else if self.should_preempt() {
                let mut job = self.state.cpu.preempt()?;
                job.clock_in_queue(now);
                debug!("t={now} job {} preempted to level {}", job.pid(), job.level());
                events.push(SchedEvent::Preemption {
                    pid: job.pid(),
                    clock: now,
                    level: job.level(),
                });
                self.state.levels[job.level()].insert(job);
                self.submit_queued_job(&mut events)?;
            }
        } else {
            self.state.totals.idle_ticks += 1;
            self.submit_queued_job(&mut events)?;
        }

        if !self.state.levels[0].is_empty() {
            self.state.totals.starvation_ticks += 1;
        }

        self.observer.observe(&self.state);
        Ok(events)
    }

    fn admit_arrivals(&mut self, events: &mut Vec<SchedEvent>) {
        let now = self.state.now;
        while self
            .state
            .arrivals
            .peek()
            .is_some_and(|job| job.arrival_time() <= now)
        {
            let Some(mut job) = self.state.arrivals.remove() else {
                break;
            };
            job.clock_in_queue(now);
            debug!("t={now} job {} arrives", job.pid());
            events.push(SchedEvent::Arrival {
                pid: job.pid(),
                clock: now,
                required: job.required_time(),
            });
            self.state.levels[job.level()].insert(job);

            if self.config.admission == AdmissionPolicy::SingleHead {
                break;
            }
        }
    }

    // Level 0 is the only queue that can gain jobs while the CPU is busy, so
    // it is the only one that needs to force a preemption.
    fn should_preempt(&self) -> bool {
        self.state.cpu.is_quantum_expired() || !self.state.levels[0].is_empty()
    }

    /// Moves the front job of the highest non-empty level onto an idle CPU.
    fn submit_queued_job(&mut self, events: &mut Vec<SchedEvent>) -> Result<(), CpuError> {
        if self.state.cpu.is_busy() {
            return Ok(());
        }
        let Some(level) = self.state.highest_ready_level() else {
            return Ok(());
        };
        let Some(mut job) = self.state.levels[level].remove() else {
            return Ok(());
        };

        let now = self.state.now;
        job.clock_out_queue(now);
        debug!("t={now} dispatch job {} from level {level}", job.pid());
        events.push(SchedEvent::Dispatch {
            pid: job.pid(),
            clock: now,
            level,
        });
        self.state.cpu.submit_job(job)
    }

    pub fn now(&self) -> Ticks {
        self.state.now
    }

    pub fn config(&self) -> &MlfqConfig {
        &self.config
    }

    /// No pending arrivals, nothing queued and the CPU idle.
    pub fn is_quiescent(&self) -> bool {
        self.state.is_quiescent()
    }

    pub fn stats(&self) -> Stats {
        self.state.totals.stats()
    }

    pub fn departed(&self) -> &[Job] {
        &self.state.departed
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{Level, MAX_QUEUE_LEVEL};

    fn run(jobs: &[(i64, u64, i64)], config: MlfqConfig) -> (Mlfq, Vec<SchedEvent>) {
        let descriptors = jobs
            .iter()
            .map(|&(arrival, pid, required)| JobDescriptor::new(arrival, pid, required))
            .collect();
        let mut mlfq = Mlfq::new(descriptors, config).unwrap();
        let mut events = Vec::new();
        while !mlfq.is_quiescent() {
            events.extend(mlfq.step().unwrap());
        }
        (mlfq, events)
    }

    #[test]
    fn job_arriving_at_zero_is_admitted_on_first_tick() {
        let (mlfq, events) = run(&[(0, 1, 3)], MlfqConfig::default());
        assert_eq!(
            events,
            vec![
                SchedEvent::Arrival { pid: 1, clock: 1, required: 3 },
                SchedEvent::Dispatch { pid: 1, clock: 1, level: 0 },
                SchedEvent::Preemption { pid: 1, clock: 3, level: 1 },
                SchedEvent::Dispatch { pid: 1, clock: 3, level: 1 },
                SchedEvent::Departure { pid: 1, clock: 4, turnaround: 4, level: 1 },
            ]
        );

        let stats = mlfq.stats();
        assert_eq!(stats.total_jobs, 1);
        assert_eq!(stats.total_time_in_system, 4);
        assert_eq!(stats.total_waiting_time, 0);
        assert_eq!(stats.idle_ticks, 1);
        assert_eq!(mlfq.now(), 4);
    }

    #[test]
    fn arrival_preempts_lower_priority_job_mid_quantum() {
        let (mlfq, events) = run(&[(1, 1, 10), (2, 2, 1)], MlfqConfig::default());
        assert_eq!(
            events,
            vec![
                SchedEvent::Arrival { pid: 1, clock: 1, required: 10 },
                SchedEvent::Dispatch { pid: 1, clock: 1, level: 0 },
                SchedEvent::Arrival { pid: 2, clock: 2, required: 1 },
                SchedEvent::Preemption { pid: 1, clock: 2, level: 1 },
                SchedEvent::Dispatch { pid: 2, clock: 2, level: 0 },
                SchedEvent::Departure { pid: 2, clock: 3, turnaround: 1, level: 0 },
                SchedEvent::Dispatch { pid: 1, clock: 3, level: 1 },
                SchedEvent::Preemption { pid: 1, clock: 7, level: 2 },
                SchedEvent::Dispatch { pid: 1, clock: 7, level: 2 },
                SchedEvent::Departure { pid: 1, clock: 12, turnaround: 11, level: 2 },
            ]
        );
        assert_eq!(mlfq.stats().total_waiting_time, 1);
        assert_eq!(mlfq.departed()[1].waiting_time(), 1);
    }

    #[test]
    fn demotion_stops_at_lowest_level() {
        let (mlfq, events) = run(&[(1, 9, 100)], MlfqConfig::default());
        let levels: Vec<Level> = events
            .iter()
            .filter_map(|event| match *event {
                SchedEvent::Preemption { level, .. } => Some(level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![1, 2, 3, 3, 3, 3, 3, 3]);
        assert_eq!(
            events.last(),
            Some(&SchedEvent::Departure {
                pid: 9,
                clock: 101,
                turnaround: 100,
                level: MAX_QUEUE_LEVEL - 1
            })
        );
        assert_eq!(mlfq.stats().total_waiting_time, 0);
    }

    #[test]
    fn rejects_duplicate_pid() {
        let descriptors = vec![JobDescriptor::new(0, 4, 1), JobDescriptor::new(3, 4, 2)];
        assert_eq!(
            Mlfq::new(descriptors, MlfqConfig::default()).err(),
            Some(LoadError::DuplicatePid(4))
        );
    }

    #[test]
    fn unsorted_input_is_resorted_stably() {
        let (mlfq, events) = run(&[(5, 1, 1), (1, 2, 1), (1, 3, 1)], MlfqConfig::default());
        let arrivals: Vec<(u64, Ticks)> = events
            .iter()
            .filter(|event| matches!(event, SchedEvent::Arrival { .. }))
            .map(|event| (event.pid(), event.clock()))
            .collect();
        assert_eq!(arrivals, vec![(2, 1), (3, 2), (1, 5)]);
        assert_eq!(mlfq.stats().total_jobs, 3);
    }
}
