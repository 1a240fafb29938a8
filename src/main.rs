//! dsh entry point.
//!
//! Installs logging (filtered by `RUST_LOG`) and the process-count cap, then
//! runs the read-eval-print loop until `exit` or end of input.

use anyhow::Result;
use dsh::env::Environment;
use dsh::{Interpreter, ShellConfig, limits};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let config = ShellConfig::default();

    // Guards against runaway recursive spawning; the kernel does the counting.
    match limits::install_process_limit(config.max_processes) {
        Ok(cap) => tracing::debug!(cap, "installed process limit"),
        Err(err) => tracing::warn!(%err, "could not install process limit"),
    }

    Interpreter::with_config(Environment::new(), config).repl()
}
