use log::info;

use crate::{
    core::{EventSink, Job, JobDescriptor, Mlfq, MlfqConfig, SchedEvent, Stats, Ticks},
    error::{CpuError, LoadError},
};

/// Drives an [`Mlfq`] one tick at a time, fanning events out to subscribers
/// and keeping the full event log.
pub struct Sim {
    pub core: Mlfq,
    events: Vec<SchedEvent>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl Sim {
    pub fn new(jobs: Vec<JobDescriptor>, config: MlfqConfig) -> Result<Self, LoadError> {
        Ok(Self {
            core: Mlfq::new(jobs, config)?,
            events: Vec::new(),
            sinks: Vec::new(),
        })
    }

    pub fn subscribe(&mut self, sink: impl EventSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Advances one tick and returns the events it produced.
    pub fn step(&mut self) -> Result<&[SchedEvent], CpuError> {
        let events = self.core.step()?;
        for event in &events {
            for sink in &mut self.sinks {
                sink.on_event(event);
            }
        }

        let start = self.events.len();
        self.events.extend(events);
        Ok(&self.events[start..])
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.core.is_quiescent()
    }

    /// Steps until quiescent and returns the final statistics.
    pub fn run(&mut self) -> Result<Stats, CpuError> {
        while !self.all_jobs_completed() {
            self.step()?;
        }

        let stats = self.core.stats();
        info!(
            "simulation quiescent at t={} after {} steps: {} jobs completed",
            self.core.now(),
            self.core.observer().steps(),
            stats.total_jobs
        );
        Ok(stats)
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }

    pub fn events(&self) -> &[SchedEvent] {
        &self.events
    }

    pub fn jobs(&self) -> &[Job] {
        self.core.departed()
    }

    pub fn jobs_map<'a, T: 'a>(
        &'a self,
        f: impl Fn(&Job) -> T + 'a,
    ) -> impl Iterator<Item = T> + 'a {
        self.core.departed().iter().map(f)
    }
}
