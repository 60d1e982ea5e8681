use std::io;

use anyhow::Result;
use clap::Parser;
use screen_digest::EnvConfig;
use screen_digest_cli::{init_tracing, run, Args};

fn main() -> Result<()> {
    let config = EnvConfig::from_env();
    init_tracing(&config)?;

    let args = Args::parse();
    let stdout = io::stdout();
    run(&args, &mut io::stdin().lock(), &mut stdout.lock())
}
