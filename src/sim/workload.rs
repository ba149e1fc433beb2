use rand::prelude::*;

use crate::core::{JobDescriptor, Ticks};

/// Random workload with at most one arrival per tick.
///
/// Each of the first `ticks` ticks sees an arrival with probability
/// `p_arrival`; an arriving job is short with probability `p_short`.
/// Process ids count up from 1. The same seed always yields the same list.
pub fn bernoulli_jobs(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    seed: u64,
) -> Vec<JobDescriptor> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let run_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            jobs.push(JobDescriptor::new(
                t as i64,
                jobs.len() as u64 + 1,
                run_time as i64,
            ));
        }
    }

    jobs
}
