use super::{cpu::ExecutionUnit, job::Job, queue::ReadyQueue, stats::Totals};

pub type Ticks = u64;
pub type Pid = u64;
// Index into the per-level ready queues; 0 is the highest priority
pub type Level = usize;

// Queues go from 0 to 3
pub const MAX_QUEUE_LEVEL: usize = 4;

/// Time slice granted to a job dispatched from `level`: `2^(level + 1)` ticks.
pub const fn quantum_for(level: Level) -> Ticks {
    1 << (level + 1)
}

/// Everything the scheduler owns. Every job lives in exactly one of
/// `arrivals`, `levels`, `cpu` or `departed` at any time.
#[derive(Debug)]
pub struct SchedState {
    pub now: Ticks,
    pub arrivals: ReadyQueue<Job>,
    pub levels: [ReadyQueue<Job>; MAX_QUEUE_LEVEL],
    pub cpu: ExecutionUnit,
    pub totals: Totals,
    pub departed: Vec<Job>,
    total_jobs: usize,
}

impl SchedState {
    pub fn new(arrivals: ReadyQueue<Job>) -> Self {
        let total_jobs = arrivals.len();
        Self {
            now: 0,
            arrivals,
            levels: std::array::from_fn(|_| ReadyQueue::new()),
            cpu: ExecutionUnit::new(),
            totals: Totals::default(),
            departed: Vec::with_capacity(total_jobs),
            total_jobs,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn total_jobs(&self) -> usize {
        self.total_jobs
    }

    pub fn queued_jobs(&self) -> usize {
        self.levels.iter().map(ReadyQueue::len).sum()
    }

    /// Highest-priority level holding a ready job.
    pub fn highest_ready_level(&self) -> Option<Level> {
        self.levels.iter().position(|queue| !queue.is_empty())
    }

    pub fn is_quiescent(&self) -> bool {
        self.arrivals.is_empty() && self.queued_jobs() == 0 && !self.cpu.is_busy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantum_doubles_per_level() {
        let quanta: Vec<Ticks> = (0..MAX_QUEUE_LEVEL).map(quantum_for).collect();
        assert_eq!(quanta, vec![2, 4, 8, 16]);
    }

    #[test]
    fn fresh_state_is_quiescent_only_without_arrivals() {
        assert!(SchedState::new(ReadyQueue::new()).is_quiescent());

        let mut state = SchedState::new([Job::new(1, 0, 1)].into_iter().collect());
        assert!(!state.is_quiescent());
        assert_eq!(state.total_jobs(), 1);

        let job = state.arrivals.remove().unwrap();
        state.levels[2].insert(job);
        assert_eq!(state.highest_ready_level(), Some(2));
        assert!(!state.is_quiescent());
    }
}
