//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and `CONFSTORE_*` environment variables.
//! - Validate `-H "Name: Value"` header syntax.
//!
//! Non-responsibilities:
//! - Does not resolve or read the location (see `dispatch` module).
//! - Does not load `.env` files (see `dotenv` module).

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "confstore")]
#[command(about = "Load a configuration document from a file, URL or stdin and print it", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  confstore config/app.yaml\n  confstore --format yaml https://config.example.com/app.yaml\n  confstore -H 'Authorization: Bearer $TOKEN' --max-body-size 65536 https://config.example.com/app.json\n  cat app.json | confstore -\n  confstore --root /etc/myapp --expand-env '${ENVIRONMENT}/app.json'\n"
)]
pub struct Cli {
    /// Where to load from: an http(s) URL, a local path or file:// URL, or `-` for stdin
    pub location: String,

    /// Payload format; `auto` tries JSON, then YAML
    #[arg(short, long, value_enum, default_value_t = Format::Auto, env = "CONFSTORE_FORMAT")]
    pub format: Format,

    /// Expand `$VAR` and `${VAR}` in the payload and in local paths
    #[arg(long, env = "CONFSTORE_EXPAND_ENV")]
    pub expand_env: bool,

    /// Strip a leading UTF-8 byte order mark from local files
    #[arg(long, env = "CONFSTORE_TRIM_BOM")]
    pub trim_bom: bool,

    /// Resolve local paths relative to this directory
    #[arg(long, env = "CONFSTORE_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// HTTP method for remote locations
    #[arg(short = 'X', long, default_value = "GET", env = "CONFSTORE_METHOD")]
    pub method: String,

    /// Request header for remote locations (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Reject remote payloads larger than this many bytes (0 = unlimited)
    #[arg(long, default_value_t = 0, env = "CONFSTORE_MAX_BODY_SIZE", value_name = "BYTES")]
    pub max_body_size: u64,

    /// Abort the whole load after this many seconds
    #[arg(long, env = "CONFSTORE_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Log source selection and request details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The operation deadline, if one was requested.
    pub fn deadline(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Payload formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// JSON, falling back to YAML
    Auto,
    Json,
    Yaml,
    /// Raw UTF-8 text, printed unchanged
    Text,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: Value', got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in '{raw}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
