use super::{
    queue::ReadyQueue,
    state::{SchedState, Ticks},
};

/// Cross-checks scheduler state after every step in debug builds.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, state: &SchedState) {
        self.step += 1;

        if let Some(job) = state.cpu.current() {
            let pid = job.pid();
            debug_assert!(
                state.cpu.quantum().is_some_and(|q| q > 0),
                "job {pid} left on the CPU with an exhausted quantum"
            );
            debug_assert!(!job.is_finished(), "finished job {pid} left on the CPU");
            debug_assert!(
                state.levels[..job.level()].iter().all(ReadyQueue::is_empty),
                "job {pid} running at level {} while a higher level waits",
                job.level()
            );
        }

        for (level, queue) in state.levels.iter().enumerate() {
            for job in queue.iter() {
                let pid = job.pid();
                debug_assert_eq!(job.level(), level, "job {pid} queued at the wrong level");
                debug_assert!(!job.is_finished(), "finished job {pid} still queued");
                debug_assert!(
                    job.arrival_time() <= state.now,
                    "job {pid} queued before its arrival"
                );
            }
        }

        for job in state.arrivals.iter() {
            debug_assert_eq!(job.level(), 0, "pending job {} already demoted", job.pid());
        }

        for job in &state.departed {
            debug_assert!(
                job.time_in_system().is_some_and(|t: Ticks| t <= state.now),
                "departed job {} has no valid departure clock",
                job.pid()
            );
        }

        let held = usize::from(state.cpu.is_busy());
        debug_assert_eq!(
            state.arrivals.len() + state.queued_jobs() + held + state.departed.len(),
            state.total_jobs(),
            "job count not conserved at step {}",
            self.step
        );
    }
}
