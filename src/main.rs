use clap::{Parser, ValueEnum};
use nqueens_mw::board::known_solution_count;
use nqueens_mw::parallel::{run_cluster, ClusterConfig, ProblemParams, WaitStrategy};
use nqueens_mw::search::{solve, SolutionStore};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "nqueens-mw")]
#[command(about = "nqueens-mw - master/worker N-Queens enumerator")]
#[command(version)]
struct Args {
    /// Board size N
    n: usize,
    /// Split level k: rows the master enumerates before handing out work (default: min(N, 2))
    #[arg(long, short = 'k')]
    split: Option<usize>,
    /// Number of worker threads (default: number of CPUs)
    #[arg(long, short = 'j')]
    workers: Option<usize>,
    /// How idle workers wait for work or termination
    #[arg(long, value_enum, default_value = "blocking")]
    wait: CliWait,
    /// Sleep between polls in microseconds (polling only)
    #[arg(long, default_value = "50")]
    poll_interval_us: u64,
    /// Run the plain sequential enumerator instead of the cluster
    #[arg(long)]
    sequential: bool,
    /// Print every solution, one per line
    #[arg(long)]
    print: bool,
    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

/// CLI wait strategy selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliWait {
    /// Block on work and termination at once
    Blocking,
    /// Busy-wait, checking termination on every pass
    Polling,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_solutions(store: &SolutionStore) {
    for solution in store.iter() {
        let line: Vec<String> = solution.iter().map(|c| c.to_string()).collect();
        println!("{}", line.join(" "));
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();

    let solutions = if args.sequential {
        solve(args.n)?
    } else {
        let params = ProblemParams::new(args.n, args.split.unwrap_or(args.n.min(2)));
        let wait_strategy = match args.wait {
            CliWait::Blocking => WaitStrategy::Blocking,
            CliWait::Polling => WaitStrategy::Polling {
                interval: Duration::from_micros(args.poll_interval_us),
            },
        };
        let mut config = ClusterConfig::default().with_wait_strategy(wait_strategy);
        if let Some(workers) = args.workers {
            config = config.with_workers(workers);
        }

        let result = run_cluster(params, &config)?;
        for worker in &result.workers {
            info!(
                rank = worker.rank,
                work_units = worker.work_units,
                solutions = worker.solutions_found,
                idle_polls = worker.idle_polls,
                hit_rate = worker.statistics.hit_rate(),
                "worker summary"
            );
        }
        result.master.solutions
    };

    if let Some(expected) = known_solution_count(args.n) {
        if expected != solutions.len() as u64 {
            warn!(expected, found = solutions.len(), "solution count differs from the known value");
        }
    }

    if args.print {
        print_solutions(&solutions);
    }
    println!("solutions: {}", solutions.len());
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "done");
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
