use rand::prelude::*;

use super::process::ProcessDescriptor;
use crate::{core::Priority, error::SchedError};

/// Bernoulli arrival process: each tick independently spawns at most one
/// process, short with probability `p_short`, long otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadConfig {
    pub ticks: u32,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_ticks: u32,
    pub long_ticks: u32,
    // Priorities are drawn uniformly from 0..=max_priority
    pub max_priority: Priority,
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            ticks: 500,
            p_arrival: 0.3,
            p_short: 0.3,
            short_ticks: 2,
            long_ticks: 6,
            max_priority: 9,
            seed: 0,
        }
    }
}

pub fn bernoulli_processes(
    config: &WorkloadConfig,
) -> Result<Vec<ProcessDescriptor>, SchedError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut processes = Vec::new();

    for t in 0..config.ticks {
        if rng.random::<f64>() < config.p_arrival {
            let run_time = if rng.random::<f64>() < config.p_short {
                config.short_ticks
            } else {
                config.long_ticks
            };
            let priority = rng.random_range(0..=config.max_priority.max(0));

            processes.push(ProcessDescriptor::new(
                format!("P{}", processes.len()),
                i64::from(t),
                priority,
                i64::from(run_time),
            )?);
        }
    }

    Ok(processes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_workload() {
        let config = WorkloadConfig {
            ticks: 200,
            ..WorkloadConfig::default()
        };
        let a = bernoulli_processes(&config).unwrap();
        let b = bernoulli_processes(&config).unwrap();
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn respects_config_bounds() {
        let config = WorkloadConfig {
            ticks: 300,
            p_arrival: 0.5,
            max_priority: 4,
            seed: 7,
            ..WorkloadConfig::default()
        };
        let processes = bernoulli_processes(&config).unwrap();
        for (n, p) in processes.iter().enumerate() {
            assert_eq!(p.id(), format!("P{n}"));
            assert!(p.arrival_time() < 300);
            assert!((0..=4).contains(&p.priority()));
            assert!(p.burst_time() == 2 || p.burst_time() == 6);
        }
        assert!(processes.windows(2).all(|w| w[0].arrival_time() < w[1].arrival_time()));
    }

    #[test]
    fn zero_arrival_probability_is_empty() {
        let config = WorkloadConfig {
            p_arrival: 0.0,
            ..WorkloadConfig::default()
        };
        assert!(bernoulli_processes(&config).unwrap().is_empty());
    }

    #[test]
    fn zero_length_burst_is_rejected() {
        let config = WorkloadConfig {
            p_arrival: 1.0,
            p_short: 1.0,
            short_ticks: 0,
            ..WorkloadConfig::default()
        };
        assert!(matches!(
            bernoulli_processes(&config),
            Err(SchedError::InvalidInput { .. })
        ));
    }
}
