use std::fmt::Write as _;

use average::{Estimate, Mean};

use super::process::ProcessInstance;
use crate::core::{Priority, Ticks, Trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMetrics {
    pub id: String,
    pub arrival_time: Ticks,
    pub priority: Priority,
    pub burst_time: Ticks,
    pub first_run: Ticks,
    pub completion_time: Ticks,
    // completion - arrival
    pub turnaround: Ticks,
    // turnaround - burst
    pub waiting: Ticks,
    // first_run - arrival
    pub response: Ticks,
}

impl ProcessMetrics {
    fn from_instance(instance: &ProcessInstance) -> Option<Self> {
        let descriptor = &instance.descriptor;
        let first_run = instance.first_run?;
        let completion_time = instance.completion_time?;
        let turnaround = completion_time - descriptor.arrival_time();

        Some(Self {
            id: descriptor.id().to_string(),
            arrival_time: descriptor.arrival_time(),
            priority: descriptor.priority(),
            burst_time: descriptor.burst_time(),
            first_run,
            completion_time,
            turnaround,
            waiting: turnaround - descriptor.burst_time(),
            response: first_run - descriptor.arrival_time(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub completed: usize,
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    pub avg_response: f64,
    pub makespan: Ticks,
    pub busy_units: Ticks,
    pub idle_units: Ticks,
    pub longest_idle_run: Ticks,
    // busy / makespan, 0 for an empty trace
    pub utilization: f64,
    pub context_switches: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub processes: Vec<ProcessMetrics>,
    pub summary: Summary,
}

impl Report {
    // Processes that have not completed yet are left out
    pub fn new(instances: &[ProcessInstance], trace: &Trace) -> Self {
        let processes: Vec<ProcessMetrics> = instances
            .iter()
            .filter_map(ProcessMetrics::from_instance)
            .collect();

        let makespan = trace.len() as Ticks;
        let idle_units = trace.idle_units() as Ticks;
        let busy_units = makespan - idle_units;
        let utilization = if makespan == 0 {
            0.0
        } else {
            busy_units as f64 / makespan as f64
        };

        let summary = Summary {
            completed: processes.len(),
            avg_turnaround: avg(processes.iter().map(|p| p.turnaround)),
            avg_waiting: avg(processes.iter().map(|p| p.waiting)),
            avg_response: avg(processes.iter().map(|p| p.response)),
            makespan,
            busy_units,
            idle_units,
            longest_idle_run: trace.longest_idle_run(),
            utilization,
            context_switches: trace.context_switches(),
        };

        Self { processes, summary }
    }

    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<10} {:>7} {:>8} {:>5} {:>6} {:>10} {:>10} {:>7} {:>8}",
            "id", "arrival", "priority", "burst", "start", "completion", "turnaround", "waiting",
            "response"
        );
        for p in &self.processes {
            let _ = writeln!(
                out,
                "{:<10} {:>7} {:>8} {:>5} {:>6} {:>10} {:>10} {:>7} {:>8}",
                p.id,
                p.arrival_time,
                p.priority,
                p.burst_time,
                p.first_run,
                p.completion_time,
                p.turnaround,
                p.waiting,
                p.response
            );
        }
        out
    }

    pub fn render_summary(&self) -> String {
        let s = &self.summary;
        let mut out = String::new();
        let _ = writeln!(out, "Completed processes: {}", s.completed);
        let _ = writeln!(out, "Average turnaround time: {:.2} ticks", s.avg_turnaround);
        let _ = writeln!(out, "Average waiting time: {:.2} ticks", s.avg_waiting);
        let _ = writeln!(out, "Average response time: {:.2} ticks", s.avg_response);
        let _ = writeln!(
            out,
            "Makespan: {} ticks ({} busy, {} idle, {:.1}% utilization)",
            s.makespan,
            s.busy_units,
            s.idle_units,
            s.utilization * 100.0
        );
        let _ = writeln!(out, "Longest idle period: {} ticks", s.longest_idle_run);
        let _ = writeln!(out, "Context switches: {}", s.context_switches);
        out
    }
}

fn avg(iter: impl Iterator<Item = Ticks>) -> f64 {
    iter.map(|t| t as f64).collect::<Mean>().estimate()
}
