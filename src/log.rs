use std::io::Write;

use log::LevelFilter;

const LEVELS: [LevelFilter; 6] = [
    LevelFilter::Off,
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

/// Installs a logger writing to stderr. Every line starts with `c ` and is
/// therefore a legal comment of the solution format, so interleaving with a
/// solution stream cannot corrupt it.
pub fn build_rip_logger_for_level(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "c [{} {:<5}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .init();
}

/// As [`build_rip_logger_for_level`], raising the base level by one step per
/// verbosity unit
pub fn build_rip_logger_for_verbosity(level: LevelFilter, verbosity: usize) {
    let base = LEVELS.iter().position(|&l| l == level).unwrap_or(0);
    build_rip_logger_for_level(LEVELS[(base + verbosity).min(LEVELS.len() - 1)]);
}
