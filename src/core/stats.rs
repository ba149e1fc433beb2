use average::{Estimate, Mean};
use serde::Serialize;

use super::{job::Job, state::Ticks};

/// Final figures for a run. Averages are `None` when no job completed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub total_jobs: u64,
    /// Sum of turnaround over all departed jobs.
    pub total_time_in_system: Ticks,
    pub total_waiting_time: Ticks,
    /// Ticks with a non-empty level-0 queue, per completed job. This is a
    /// congestion proxy, not a measured time to first dispatch.
    pub avg_response_proxy: Option<f64>,
    pub avg_turnaround: Option<f64>,
    pub avg_waiting: Option<f64>,
    /// Completed jobs per tick of summed turnaround.
    pub throughput: Option<f64>,
    pub idle_ticks: Ticks,
    pub starvation_ticks: Ticks,
}

/// Running aggregates kept by the scheduler.
#[derive(Debug, Clone)]
pub struct Totals {
    pub completed: u64,
    pub turnaround_sum: Ticks,
    pub waiting_sum: Ticks,
    pub idle_ticks: Ticks,
    pub starvation_ticks: Ticks,
    turnaround: Mean,
    waiting: Mean,
}

impl Default for Totals {
    fn default() -> Self {
        Self {
            completed: 0,
            turnaround_sum: 0,
            waiting_sum: 0,
            idle_ticks: 0,
            starvation_ticks: 0,
            turnaround: Mean::new(),
            waiting: Mean::new(),
        }
    }
}

impl Totals {
    /// Folds a departed job in; returns its turnaround.
    pub(crate) fn record_departure(&mut self, job: &Job) -> Ticks {
        let turnaround = job.turnaround().unwrap_or_default();
        self.completed += 1;
        self.turnaround_sum += turnaround;
        self.waiting_sum += job.waiting_time();
        self.turnaround.add(turnaround as f64);
        self.waiting.add(job.waiting_time() as f64);
        turnaround
    }

    pub fn stats(&self) -> Stats {
        let completed = (self.completed > 0).then_some(self.completed as f64);
        Stats {
            total_jobs: self.completed,
            total_time_in_system: self.turnaround_sum,
            total_waiting_time: self.waiting_sum,
            avg_response_proxy: completed.map(|n| self.starvation_ticks as f64 / n),
            avg_turnaround: completed.map(|_| self.turnaround.estimate()),
            avg_waiting: completed.map(|_| self.waiting.estimate()),
            throughput: completed
                .filter(|_| self.turnaround_sum > 0)
                .map(|n| n / self.turnaround_sum as f64),
            idle_ticks: self.idle_ticks,
            starvation_ticks: self.starvation_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn departed(pid: u64, arrival: Ticks, departure: Ticks, waited: Ticks) -> Job {
        let mut job = Job::new(pid, arrival, 1);
        job.clock_in_queue(arrival);
        job.clock_out_queue(arrival + waited);
        job.dec_remaining();
        job.set_time_in_system(departure);
        job
    }

    #[test]
    fn no_departures_means_not_applicable() {
        let totals = Totals {
            idle_ticks: 7,
            ..Totals::default()
        };
        let stats = totals.stats();
        assert_eq!(stats.total_jobs, 0);
        assert_eq!(stats.avg_turnaround, None);
        assert_eq!(stats.avg_waiting, None);
        assert_eq!(stats.avg_response_proxy, None);
        assert_eq!(stats.throughput, None);
        assert_eq!(stats.idle_ticks, 7);
    }

    #[test]
    fn averages_over_departures() {
        let mut totals = Totals::default();
        assert_eq!(totals.record_departure(&departed(1, 0, 4, 0)), 4);
        assert_eq!(totals.record_departure(&departed(2, 2, 10, 2)), 8);
        totals.starvation_ticks = 3;

        let stats = totals.stats();
        assert_eq!(stats.total_jobs, 2);
        assert_eq!(stats.total_time_in_system, 12);
        assert_eq!(stats.total_waiting_time, 2);
        assert!((stats.avg_turnaround.unwrap() - 6.0).abs() < 1e-9);
        assert!((stats.avg_waiting.unwrap() - 1.0).abs() < 1e-9);
        assert!((stats.avg_response_proxy.unwrap() - 1.5).abs() < 1e-9);
        assert!((stats.throughput.unwrap() - 2.0 / 12.0).abs() < 1e-9);
    }
}
