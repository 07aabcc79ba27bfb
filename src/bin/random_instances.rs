use std::time::Instant;

use ::log::LevelFilter;
use itertools::Itertools;
use ris::{prelude::*, utils::signal_handling, *};

use structopt::*;

#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(short, long, default_value = "1000")]
    repeats: u32,

    /// Largest edge weight drawn (exclusive)
    #[structopt(short = "m", long, default_value = "20")]
    max_weight: Weight,

    #[structopt(short = "w", long)]
    write: bool,

    #[structopt(short = "e", long)]
    write_buggy_only: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn main() {
    let opt = Opt::from_args();
    log::build_rip_logger_for_verbosity(LevelFilter::Warn, opt.verbose);
    signal_handling::initialize();

    let nodes = [6, 8, 10];
    let avg_deg = [2, 3, 4];

    let params: Vec<_> = nodes
        .into_iter()
        .cartesian_product(avg_deg)
        .filter_map(|(n, d)| (d + 1 < n).then_some((n, d as f64 / (n - 1) as f64)))
        .collect();

    let total_instances = (params.len() as u64) * (opt.repeats as u64);

    let mut rng = rand::thread_rng();

    let mut completed = 0u64;
    let mut mismatches = 0u64;
    let mut time_in_naive = 0u64;
    let mut time_in_highs = 0u64;

    'repeats: for _ in 0..opt.repeats {
        for &(n, p) in &params {
            if signal_handling::received_ctrl_c() {
                break 'repeats;
            }

            let graph =
                Multigraph::random_weighted_multigraph(&mut rng, n, p, 0.3, 1..opt.max_weight);

            if let Some((ela_naive, ela_highs, mismatched)) =
                process_graph(&opt, graph, completed)
            {
                time_in_naive += ela_naive;
                time_in_highs += ela_highs;
                mismatches += mismatched as u64;
            }

            completed += 1;
            if completed % 100 == 0 {
                println!(
                    "Completed {completed:>7} of {total_instances:>7} | Naive: {time_in_naive:>8}ms Highs: {time_in_highs:>8}ms"
                );
            }
        }
    }

    println!(
        "Completed {completed} instances with {mismatches} mismatched objectives | Naive: {time_in_naive}ms Highs: {time_in_highs}ms"
    );
}

fn process_graph(opt: &Opt, graph: Multigraph, seq: u64) -> Option<(u64, u64, bool)> {
    let m = graph.number_of_edges();

    // the naive backend enumerates 2^m assignments; keep it honest but alive
    if !(4..=20).contains(&m) {
        return None;
    }

    let model = ParityModel::try_new(&graph).expect("non-empty by construction");

    let time = Instant::now();
    let sol_naive = match NaiveBackend.solve_model(&model, None) {
        Ok(sol) => sol,
        // interrupted by Ctrl-C; the outer loop stops after this instance
        Err(_) => return None,
    };
    let ela_naive = time.elapsed().as_millis() as u64;

    let time = Instant::now();
    let sol_highs = HighsBackend.solve_model(&model, None).unwrap();
    let ela_highs = time.elapsed().as_millis() as u64;

    let mismatched = sol_naive.objective() != sol_highs.objective();
    if mismatched {
        println!(
            "Mismatched objectives for n = {}, m = {m}, obj_naive = {}, obj_highs = {}",
            graph.number_of_nodes(),
            sol_naive.objective(),
            sol_highs.objective()
        );
    }

    if opt.write && (mismatched || !opt.write_buggy_only) {
        let filename = format!(
            "instances/small-random/n{:>03}_m{m:>04}_obj{:>05}_{seq:>06}.gr",
            graph.number_of_nodes(),
            sol_naive.objective()
        );

        graph
            .try_write_rip_file(filename.clone())
            .expect("Failed to write file");

        println!("Wrote {filename}");
    }

    Some((ela_naive, ela_highs, mismatched))
}
