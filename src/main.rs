use clap::{ArgAction, Parser};
use prio_model::{
    ProcessDescriptor, SchedError, Sim, WorkloadConfig, core::Priority,
    scheduler::PriorityScheduler, sim::bernoulli_processes,
};

/// Simulate a single-CPU preemptive priority scheduler.
///
/// Without `--process`, a seeded Bernoulli workload is generated.
#[derive(Debug, Parser)]
#[command(name = "prio_model", version)]
struct Args {
    /// Process as id:arrival:priority:burst (repeatable)
    #[arg(short, long = "process", value_name = "ID:ARRIVAL:PRIORITY:BURST")]
    processes: Vec<ProcessDescriptor>,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Ticks during which generated processes may arrive
    #[arg(long, default_value_t = 500)]
    ticks: u32,

    #[arg(long, default_value_t = 0.3)]
    p_arrival: f64,

    #[arg(long, default_value_t = 0.3)]
    p_short: f64,

    #[arg(long, default_value_t = 2)]
    short_ticks: u32,

    #[arg(long, default_value_t = 6)]
    long_ticks: u32,

    #[arg(long, default_value_t = 9)]
    max_priority: Priority,

    /// Print every tick's events
    #[arg(long)]
    events: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn workload(&self) -> WorkloadConfig {
        WorkloadConfig {
            ticks: self.ticks,
            p_arrival: self.p_arrival,
            p_short: self.p_short,
            short_ticks: self.short_ticks,
            long_ticks: self.long_ticks,
            max_priority: self.max_priority,
            seed: self.seed,
        }
    }
}

fn main() -> Result<(), SchedError> {
    let args = Args::parse();
    init_logging(args.verbose);

    let processes = if args.processes.is_empty() {
        bernoulli_processes(&args.workload())?
    } else {
        args.processes.clone()
    };
    log::info!("scheduling {} processes", processes.len());

    let mut sim = Sim::<PriorityScheduler>::new(processes);
    while !sim.is_finished() {
        let now = sim.now();
        let events = sim.step();
        if args.events {
            for event in &events {
                println!("t={now} {}", sim.describe(event));
            }
        }
    }

    println!("Trace: {}", sim.trace_labels().join(" "));
    println!("Gantt: {}", sim.gantt());
    println!();

    let report = sim.report();
    print!("{}", report.render_table());
    println!();
    print!("{}", report.render_summary());

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
