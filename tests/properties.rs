use std::collections::VecDeque;

use mlfq_sim::{
    AdmissionPolicy, JobDescriptor, MlfqConfig, SchedEvent, Sim,
    core::{MAX_QUEUE_LEVEL, ReadyQueue, quantum_for},
    sim::bernoulli_jobs,
};
use proptest::prelude::*;

// (gap since previous arrival, required time) pairs; gap 0 means a shared arrival time
fn workload() -> impl Strategy<Value = Vec<JobDescriptor>> {
    prop::collection::vec((0i64..6, 1i64..40), 0..24).prop_map(|pairs| {
        let mut arrival = 0;
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (gap, required))| {
                arrival += gap;
                JobDescriptor::new(arrival, i as u64 + 1, required)
            })
            .collect()
    })
}

fn admission() -> impl Strategy<Value = AdmissionPolicy> {
    prop_oneof![Just(AdmissionPolicy::SingleHead), Just(AdmissionPolicy::DrainAll)]
}

proptest! {
    #[test]
    fn ready_queue_is_fifo_across_resizes(ops in prop::collection::vec(prop::option::of(any::<u16>()), 0..300)) {
        let mut queue = ReadyQueue::new();
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Some(value) => {
                    queue.insert(value);
                    model.push_back(value);
                }
                None => {
                    prop_assert_eq!(queue.remove(), model.pop_front());
                }
            }
            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.peek(), model.front());
            prop_assert!(queue.capacity() >= 4);
            prop_assert!(queue.capacity() >= queue.len());
            prop_assert!(queue.capacity().is_power_of_two());
        }

        let rest: Vec<_> = std::iter::from_fn(|| queue.remove()).collect();
        prop_assert_eq!(rest, Vec::from(model));
    }

    #[test]
    fn every_job_departs_and_sums_agree(jobs in workload(), policy in admission()) {
        let config = MlfqConfig::default().with_admission(policy);
        let mut sim = Sim::new(jobs.clone(), config).unwrap();
        let stats = sim.run().unwrap();

        prop_assert_eq!(stats.total_jobs, jobs.len() as u64);

        let arrival_of = |pid: u64| jobs.iter().find(|job| job.pid == pid).map(|job| job.arrival_time as u64);
        let mut turnaround_sum = 0;
        for event in sim.events() {
            if let SchedEvent::Departure { pid, clock, turnaround, .. } = *event {
                let arrival = arrival_of(pid).unwrap();
                prop_assert_eq!(turnaround, clock - arrival);
                turnaround_sum += turnaround;
            }
        }
        prop_assert_eq!(turnaround_sum, stats.total_time_in_system);

        let waiting_sum: u64 = sim.jobs().iter().map(|job| job.waiting_time()).sum();
        prop_assert_eq!(waiting_sum, stats.total_waiting_time);

        if let Some(avg) = stats.avg_turnaround {
            let exact = stats.total_time_in_system as f64 / stats.total_jobs as f64;
            prop_assert!((avg - exact).abs() < 1e-6);
        } else {
            prop_assert!(jobs.is_empty());
        }
    }

    #[test]
    fn levels_and_quanta_stay_in_bounds(jobs in workload(), policy in admission()) {
        let config = MlfqConfig::default().with_admission(policy);
        let mut sim = Sim::new(jobs, config).unwrap();

        while !sim.all_jobs_completed() {
            // Before service: idle, or holding a job with slice left
            let cpu = &sim.core.state.cpu;
            prop_assert_eq!(cpu.is_busy(), cpu.quantum().is_some_and(|q| q > 0));

            let events = sim.step().unwrap().to_vec();
            for event in &events {
                match *event {
                    SchedEvent::Dispatch { level, .. }
                    | SchedEvent::Preemption { level, .. }
                    | SchedEvent::Departure { level, .. } => {
                        prop_assert!(level < MAX_QUEUE_LEVEL);
                    }
                    SchedEvent::Arrival { .. } => {}
                }
            }

            let dispatched = events.iter().find_map(|event| match *event {
                SchedEvent::Dispatch { level, .. } => Some(level),
                _ => None,
            });
            if let Some(level) = dispatched {
                prop_assert_eq!(sim.core.state.cpu.quantum(), Some(quantum_for(level)));
            }
        }
    }

    #[test]
    fn identical_input_replays_identically(seed in any::<u64>(), policy in admission()) {
        let jobs = bernoulli_jobs(120, 0.35, 0.4, 2, 11, seed);
        let config = MlfqConfig::default().with_admission(policy);

        let mut first = Sim::new(jobs.clone(), config).unwrap();
        let mut second = Sim::new(jobs, config).unwrap();
        let first_stats = first.run().unwrap();
        let second_stats = second.run().unwrap();

        prop_assert_eq!(first.events(), second.events());
        prop_assert_eq!(first_stats, second_stats);
        prop_assert_eq!(first.now(), second.now());
    }
}
