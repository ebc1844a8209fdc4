use std::cmp::Reverse;

use prio_model::{IDLE, ProcessDescriptor, Sim, Slot};
use proptest::prelude::*;

// (arrival, priority, burst)
type Spec = (i64, i64, i64);

fn workload() -> impl Strategy<Value = Vec<Spec>> {
    prop::collection::vec((0i64..20, -5i64..5, 1i64..6), 0..12)
}

fn descriptors(specs: &[Spec]) -> Vec<ProcessDescriptor> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(arrival, priority, burst))| {
            ProcessDescriptor::new(format!("P{i}"), arrival, priority, burst).unwrap()
        })
        .collect()
}

fn simulate(specs: &[Spec]) -> Sim {
    let mut sim: Sim = Sim::new(descriptors(specs));
    sim.run();
    sim
}

fn labels(sim: &Sim) -> Vec<String> {
    sim.trace_labels().into_iter().map(str::to_string).collect()
}

fn index_of(label: &str) -> usize {
    label[1..].parse().unwrap()
}

// Straight scan over every process at every unit
fn reference_trace(specs: &[Spec]) -> Vec<String> {
    let n = specs.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| specs[i].0);
    let mut seq = vec![0; n];
    for (pos, &i) in order.iter().enumerate() {
        seq[i] = pos;
    }

    let mut remaining: Vec<i64> = specs.iter().map(|s| s.2).collect();
    let mut trace = Vec::new();
    let mut t = 0;
    while remaining.iter().any(|&r| r > 0) {
        let best = (0..n)
            .filter(|&i| specs[i].0 <= t && remaining[i] > 0)
            .max_by_key(|&i| (specs[i].1, Reverse(specs[i].0), Reverse(seq[i])));
        match best {
            Some(i) => {
                remaining[i] -= 1;
                trace.push(format!("P{i}"));
            }
            None => trace.push(IDLE.to_string()),
        }
        t += 1;
    }
    trace
}

proptest! {
    #[test]
    fn matches_reference_scan(specs in workload()) {
        let sim = simulate(&specs);
        prop_assert_eq!(labels(&sim), reference_trace(&specs));
    }

    #[test]
    fn service_is_conserved(specs in workload()) {
        let sim = simulate(&specs);
        let trace = sim.trace();
        prop_assert_eq!(trace.len() as u64, sim.now());

        let total_burst: i64 = specs.iter().map(|s| s.2).sum();
        let busy = trace.len() - trace.idle_units();
        prop_assert_eq!(busy as i64, total_burst);

        for instance in sim.processes() {
            let key = instance.key.unwrap();
            prop_assert_eq!(trace.dispatch_count(key) as u64, instance.descriptor.burst_time());
            prop_assert_eq!(sim.core.ctx.process(key).remaining, 0);
        }
    }

    #[test]
    fn never_dispatched_before_arrival(specs in workload()) {
        let sim = simulate(&specs);
        for (t, slot) in (0u64..).zip(sim.trace().slots()) {
            if let Slot::Run(key) = *slot {
                prop_assert!(sim.instance(key).descriptor.arrival_time() <= t);
            }
        }
    }

    #[test]
    fn dispatch_respects_priority(specs in workload()) {
        let sim = simulate(&specs);
        let labels = labels(&sim);
        let mut served = vec![0i64; specs.len()];

        for (t, label) in (0i64..).zip(&labels) {
            let ready: Vec<usize> = (0..specs.len())
                .filter(|&i| specs[i].0 <= t && served[i] < specs[i].2)
                .collect();

            if label == IDLE {
                prop_assert!(ready.is_empty(), "idle at {} with ready {:?}", t, ready);
                continue;
            }

            let chosen = index_of(label);
            prop_assert!(ready.contains(&chosen));
            for &other in &ready {
                prop_assert!(specs[chosen].1 >= specs[other].1);
                if specs[chosen].1 == specs[other].1 {
                    prop_assert!(specs[chosen].0 <= specs[other].0);
                }
            }
            served[chosen] += 1;
        }
    }

    #[test]
    fn reruns_are_identical(specs in workload()) {
        prop_assert_eq!(labels(&simulate(&specs)), labels(&simulate(&specs)));
    }

    #[test]
    fn first_run_and_completion_bracket_service(specs in workload()) {
        let sim = simulate(&specs);
        for instance in sim.processes() {
            let d = &instance.descriptor;
            let first = instance.first_run.unwrap();
            let done = instance.completion_time.unwrap();
            prop_assert!(d.arrival_time() <= first);
            prop_assert!(first + d.burst_time() <= done);
            prop_assert!(done <= sim.now());
        }
    }
}
