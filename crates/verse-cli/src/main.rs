//! VerseDB CLI Entry Point

use clap::Parser;
use std::io::Read;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use verse_cli::{
    build_oracle, build_resolver, execute, parse_rows, to_json, Cli, CliResult, Invocation,
};
use verse_core::VerseRow;

#[tokio::main]
async fn main() {
    let invocation = Cli::parse().into_invocation();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&invocation.config.log_level)),
        )
        .init();

    info!("VerseDB v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&invocation).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(invocation: &Invocation) -> CliResult<()> {
    let rows = if invocation.highlight_stdin {
        Some(read_rows()?)
    } else {
        None
    };

    let resolver = build_resolver(&invocation.config, build_oracle(&invocation.config));
    let report = execute(&resolver, invocation, rows).await?;
    debug!("Resolved as {:?}", report.query.mode);

    println!("{}", to_json(&report)?);
    Ok(())
}

fn read_rows() -> CliResult<Vec<VerseRow>> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    parse_rows(&input)
}
