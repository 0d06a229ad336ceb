#![deny(warnings)]

use std::{io, process};

use tracing_subscriber::EnvFilter;

mod cli;

fn main() {
    // Keep this function small: everything reachable from tests lives in `cli`.
    init_logging();

    let registry = cli::Registry::standard();
    let matches = registry.clap_app().get_matches();

    process::exit(match registry.dispatch(&matches) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err);
            1
        }
    });
}

// Log level comes from `LITT_LOG` (same syntax as `RUST_LOG`), default `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("LITT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
