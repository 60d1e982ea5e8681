//! Command-line front end for `screen_digest`.
//!
//! Reads one accessibility dump, prints its compact digest (or legacy XML, or the
//! element table as JSON), and can carry identity keys between invocations through a
//! JSON file so consecutive captures are diffed.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use screen_digest::{digest, legacy_filter_within, EnvConfig, IndexEntry, Screen};

#[derive(Debug, Parser)]
#[command(name = "screen-digest", about = "Compress an accessibility dump for an automation agent")]
pub struct Args {
    /// Dump to read, or `-` for stdin.
    pub input: PathBuf,

    /// Screen width in pixels.
    #[arg(long)]
    pub width: u32,

    /// Screen height in pixels.
    #[arg(long)]
    pub height: u32,

    /// JSON array of identity keys from the previous capture. Without it every
    /// important node is marked `* `.
    #[arg(long, value_name = "PATH")]
    pub previous: Option<PathBuf>,

    /// Write this capture's identity keys as a JSON array.
    #[arg(long, value_name = "PATH")]
    pub save_keys: Option<PathBuf>,

    /// Print the pruned tree as XML instead of the compact digest.
    #[arg(long, conflicts_with_all = ["json", "tap"])]
    pub legacy: bool,

    /// Print the digest text and element table as JSON.
    #[arg(long, conflicts_with = "tap")]
    pub json: bool,

    /// Print the tap point of element INDEX as `x y`.
    #[arg(long, value_name = "INDEX")]
    pub tap: Option<usize>,
}

#[derive(Debug, Serialize)]
struct JsonDigest<'a> {
    text: &'a str,
    elements: Vec<IndexEntry>,
}

/// Installs the global subscriber: `RUST_LOG` if set, otherwise `debug` or `warn`
/// depending on `config.debug`. Logs go to `config.log_file` when set, stderr otherwise.
pub fn init_tracing(config: &EnvConfig) -> Result<()> {
    let default_level = if config.debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {path}"))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

pub fn run(args: &Args, stdin: &mut dyn Read, out: &mut dyn Write) -> Result<()> {
    let dump = read_dump(&args.input, stdin)?;
    let screen = Screen::new(args.width, args.height);

    if args.legacy {
        writeln!(out, "{}", legacy_filter_within(&dump, screen))?;
        return Ok(());
    }

    let previous = args.previous.as_deref().map(read_keys).transpose()?;
    let result = digest(&dump, previous.as_ref(), screen);
    tracing::debug!(
        elements = result.index().len(),
        kept = result.stats().kept,
        "digested dump"
    );

    if let Some(path) = &args.save_keys {
        write_keys(path, result.identity_keys())?;
    }

    if let Some(index) = args.tap {
        let Some(point) = result.resolve_center(index) else {
            bail!("element {index} has no tap point in this capture");
        };
        writeln!(out, "{} {}", point.x, point.y)?;
    } else if args.json {
        let payload = JsonDigest {
            text: result.text(),
            elements: result.index().entries(),
        };
        serde_json::to_writer_pretty(&mut *out, &payload)
            .context("failed to serialize digest")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", result.text())?;
    }
    Ok(())
}

fn read_dump(path: &Path, stdin: &mut dyn Read) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut dump = String::new();
        stdin
            .read_to_string(&mut dump)
            .context("failed to read dump from stdin")?;
        return Ok(dump);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read dump {}", path.display()))
}

pub fn read_keys(path: &Path) -> Result<HashSet<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read keys {}", path.display()))?;
    let keys: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("keys file {} is not a JSON string array", path.display()))?;
    Ok(keys.into_iter().collect())
}

pub fn write_keys(path: &Path, keys: &HashSet<String>) -> Result<()> {
    let mut sorted: Vec<&String> = keys.iter().collect();
    sorted.sort();
    let json = serde_json::to_string_pretty(&sorted).context("failed to serialize keys")?;
    fs::write(path, json).with_context(|| format!("failed to write keys {}", path.display()))
}
