use std::{
    fs::File,
    path::PathBuf,
    time::{Duration, Instant},
};

use log::{LevelFilter, info, warn};
use ris::{log::build_rip_logger_for_verbosity, prelude::*, utils::signal_handling};
use structopt::StructOpt;

#[derive(StructOpt, Default)]
pub enum Commands {
    /// Solve the route model with the bundled HiGHS solver
    #[default]
    Highs,

    /// Enumerate all direction assignments; only viable for tiny instances
    Naive,

    /// Solve the route model through the good_lp facade
    #[cfg(feature = "goodlp")]
    GoodLp,
}

#[derive(StructOpt)]
struct Opts {
    /// Instance file; reads stdin if omitted
    #[structopt(short, long)]
    instance: Option<PathBuf>,

    /// Route output file; writes stdout if omitted
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// Time limit for the backend in seconds
    #[structopt(short = "T", long)]
    timeout: Option<u64>,

    /// Emit a machine-readable summary line after the route
    #[structopt(long)]
    json: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,

    #[structopt(subcommand)]
    cmd: Option<Commands>,
}

fn load_graph(path: &Option<PathBuf>) -> anyhow::Result<Multigraph> {
    if let Some(path) = path {
        Ok(Multigraph::try_read_rip_file(path)?)
    } else {
        let stdin = std::io::stdin().lock();
        Ok(Multigraph::try_read_rip(stdin)?)
    }
}

fn write_solution(route: &OpenPath, path: &Option<PathBuf>) -> anyhow::Result<()> {
    if let Some(path) = path {
        let file = File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        route.write(writer)?;
    } else {
        let writer = std::io::stdout();
        route.write(writer)?;
    }

    Ok(())
}

fn run_backend(
    cmd: &Commands,
    graph: &Multigraph,
    timeout: Option<Duration>,
) -> anyhow::Result<OpenPath> {
    Ok(match cmd {
        Commands::Highs => {
            info!("Start HiGHS backend");
            solve_open_path(graph, &HighsBackend, timeout)?
        }
        Commands::Naive => {
            info!("Start naive backend");
            solve_open_path(graph, &NaiveBackend, timeout)?
        }
        #[cfg(feature = "goodlp")]
        Commands::GoodLp => {
            info!("Start good_lp backend");
            solve_open_path(graph, &GoodLpBackend, timeout)?
        }
    })
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_rip_logger_for_verbosity(LevelFilter::Info, opts.verbose);
    signal_handling::initialize();

    let graph = load_graph(&opts.instance)?;
    info!(
        "Loaded instance with #E={}, #V={}",
        graph.number_of_edges(),
        graph.number_of_nodes()
    );

    let timeout = opts.timeout.map(Duration::from_secs);
    let cmd = opts.cmd.unwrap_or_default();

    let start = Instant::now();
    let route = run_backend(&cmd, &graph, timeout)?;
    let elapsed = start.elapsed();

    info!(
        "Open route with {} entries and total weight {} after {}ms",
        route.len(),
        route.total_weight(),
        elapsed.as_millis()
    );

    if !route.is_valid(&graph) {
        warn!("the route misses an edge; the removed entry covered an identical parallel instance");
    }

    write_solution(&route, &opts.output)?;

    if opts.json {
        // the entry is shifted to 1-based endpoints like the route writers
        println!(
            "{}",
            serde_json::json!({
                "nodes": graph.number_of_nodes(),
                "edges": graph.number_of_edges(),
                "entries": route.len(),
                "total_weight": route.total_weight(),
                "removed": route.removed().map(|r| Traversal {
                    from: r.entry.from + 1,
                    to: r.entry.to + 1,
                    ..r.entry
                }),
                "removed_weight": route.removed_weight(),
                "elapsed_ms": elapsed.as_millis() as u64,
            })
        );
    }

    Ok(())
}
