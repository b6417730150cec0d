//! Command-line reading session simulator
//!
//! Usage: `folio-sim <fixture.json> [--json]`

use std::path::PathBuf;

use anyhow::{bail, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod fixture;
mod session;
mod surface;

use fixture::Fixture;
use session::OutputFormat;

struct Args {
    fixture: PathBuf,
    format: OutputFormat,
}

fn parse_args() -> Result<Args> {
    let mut fixture = None;
    let mut format = OutputFormat::Text;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => format = OutputFormat::Json,
            "-h" | "--help" => {
                println!("usage: folio-sim <fixture.json> [--json]");
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => bail!("unknown flag `{flag}`"),
            path => fixture = Some(PathBuf::from(path)),
        }
    }

    let Some(fixture) = fixture else {
        bail!("usage: folio-sim <fixture.json> [--json]");
    };
    Ok(Args { fixture, format })
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let fixture = Fixture::load(&args.fixture)?;
    info!(
        chapters = fixture.chapters.len(),
        commands = fixture.commands.len(),
        "starting simulated session"
    );

    for line in session::run(&fixture, args.format)? {
        println!("{line}");
    }
    Ok(())
}
