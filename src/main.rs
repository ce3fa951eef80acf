use std::env;
use std::io::{self, BufWriter};
use std::process;

use shcat::{cli, Config};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let config = Config::load();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if let Err(e) = cli::run(env::args().skip(1), &config, &mut out) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Sends log events to stderr, filtered by `SHCAT_LOG` (warnings by default).
fn init_logging() {
    let filter = EnvFilter::try_from_env("SHCAT_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
