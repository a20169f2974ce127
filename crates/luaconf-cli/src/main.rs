mod cli;
mod commands;

use cli::{GenerateParams, build_cli};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();
    let params = GenerateParams::from_matches(&matches);
    commands::generate::run(params.into());
}

/// Diagnostics go to stderr; stdout carries the generated module.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("LUACONF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
