use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    time::Instant,
};

use glob::glob;
use itertools::Itertools;
use rand::seq::SliceRandom;
use ris::{graph::*, io::*, route::*, solver::*, utils::signal_handling};

fn load_best_known() -> std::io::Result<HashMap<String, Weight>> {
    let reader = File::open("instances/best_known_solutions.csv")?;
    let buf_reader = BufReader::new(reader);

    let mut dict = HashMap::new();

    for line in buf_reader.lines() {
        let line = line?;
        let parts = line.split(',').filter(|t| !t.is_empty()).collect_vec();

        if parts.is_empty() {
            continue;
        }

        if parts.len() != 2 {
            eprintln!("Invalid best-known line: {line} -> {parts:?}");
            continue;
        }

        let file = parts[0].trim();
        let weight = parts[1].trim().parse().unwrap();

        if let Some(old) = dict.insert(file.to_owned(), weight) {
            assert_eq!(old, weight, "Mismatch for file {file}");
            eprintln!("Warning: duplicate of best-known for {file}");
        }
    }

    Ok(dict)
}

fn main() {
    let mut files = ["tiny", "small-random"]
        .into_iter()
        .flat_map(|p| {
            glob(format!("instances/{p}/*.gr").as_str())
                .expect("Failed to glob")
                .map(|r| r.expect("Failed to access globbed path"))
        })
        .collect_vec();

    files.shuffle(&mut rand::thread_rng());

    let best_known = load_best_known().unwrap_or_default();
    println!("Found {} best known values", best_known.len());

    signal_handling::initialize();

    for file in files {
        if signal_handling::received_ctrl_c() {
            break;
        }

        let filename = String::from(file.as_os_str().to_str().unwrap());
        let graph = Multigraph::try_read_rip_file(&file).expect("Cannot open instance");

        let start = Instant::now();
        let route = solve_open_path(&graph, &HighsBackend, None).expect("Backend failed");
        let duration = start.elapsed();

        let best_known = best_known.get(&filename);

        println!(
            "{filename:<50} | {:>6} | {:>8} | {:>8} ({:>8}) | {:>6} ms",
            graph.number_of_nodes(),
            graph.number_of_edges(),
            route.total_weight(),
            best_known.map_or_else(|| String::from("?"), |b| format!("{b}")),
            duration.as_millis()
        );

        if best_known.is_some_and(|&b| b != route.total_weight()) {
            println!("VIOLATION FOR {filename} <===============================================================");
            continue;
        }

        {
            let mut solution_writer = BufWriter::new(
                File::create(format!("{filename}.solution")).expect("Unable to create file"),
            );
            writeln!(solution_writer, "c time: {}ms", duration.as_millis())
                .expect("Could not header");
            route
                .write(solution_writer)
                .expect("Could not write solution");
        }
    }
}
