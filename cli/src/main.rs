//! `linodeapi` command-line tool.
//!
//! Reads an API key and submits two `test.echo` calls as one batch, printing
//! each element's data payload.

use std::io::{Read, Write};
use std::path::Path;
use std::process;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use linode_core::{BatchResponse, ClientConfig, LinodeClient, Request, DEFAULT_ENDPOINT};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linodeapi")]
#[command(about = "Exercise the Linode API with a batched echo", version)]
struct Cli {
    /// File holding the API key, or "-" to read it from stdin
    api_key: String,

    /// API endpoint to POST to
    #[arg(long, env = "LINODE_API_URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Give up on the exchange after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let api_key = read_api_key(&cli.api_key, std::io::stdin().lock())?;

    let mut config = ClientConfig::new(cli.endpoint.as_str());
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let client = LinodeClient::from_config(&config);

    let responses = client
        .batch(&[
            Request::new("test.echo", &api_key, [("foo", "bar")]),
            Request::new("test.echo", &api_key, [("a", "b")]),
        ])
        .context("batch request failed")?;

    write_results(&responses, std::io::stdout().lock())
}

/// Print each element's data payload as one JSON line. Element errors go to
/// the log, not to `out`.
fn write_results(responses: &[BatchResponse], mut out: impl Write) -> Result<()> {
    for (index, resp) in responses.iter().enumerate() {
        for err in &resp.errors {
            tracing::warn!(index, code = err.code, message = %err.message, "batch element failed");
        }
        writeln!(out, "{}", serde_json::to_string(&resp.data)?)?;
    }
    Ok(())
}

/// Load the API key from `source`: `-` reads `stdin`, anything else is a
/// file path. Surrounding whitespace is dropped.
fn read_api_key(source: &str, mut stdin: impl Read) -> Result<String> {
    let raw = if source == "-" {
        let mut buf = String::new();
        stdin
            .read_to_string(&mut buf)
            .context("failed to read API key from stdin")?;
        buf
    } else {
        let path = Path::new(source);
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read API key from {}", path.display()))?
    };

    let key = raw.trim();
    if key.is_empty() {
        bail!("API key is empty");
    }
    Ok(key.to_string())
}
