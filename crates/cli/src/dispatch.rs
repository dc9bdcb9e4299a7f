//! Resolve, load and print one configuration document.
//!
//! Responsibilities:
//! - Build the diagnostic source selector for a location string.
//! - Pick the decoder for `--format` and load the value under the context.
//! - Write the rendered value to stdout.
//!
//! Does NOT handle:
//! - Exit-code mapping (see `error` module).
//! - Signal handling (see `cancellation` module).
//!
//! Invariants:
//! - Rules are tried remote URL, then stdin (`-`), then local path.
//! - Nothing is written to stdout unless the whole load succeeded.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use confstore::{
    BoxSource, Decoder, DecoderGroup, Error, ExpandEnv, FileSource, JsonDecoder, OperationContext,
    ReaderSource, Rule, SourceSelector, TextDecoder, YamlDecoder, is_local_path,
};
use confstore_http::{HttpSource, is_remote_url};
use serde_json::Value;
use tracing::debug;

use crate::args::{Cli, Format};
use crate::formatters::render_json;

const STDIN_LOCATION: &str = "-";

/// Run the load described by `cli` and print the result.
pub async fn run_command(cli: &Cli, ctx: &OperationContext) -> anyhow::Result<()> {
    let selector = build_selector(cli);
    let source = selector.select(&cli.location)?;
    let source: BoxSource = if cli.expand_env {
        Box::new(ExpandEnv::new(source))
    } else {
        source
    };

    let output = match value_decoder(cli.format) {
        Some(decoder) => {
            let value: Value = confstore::load(ctx, &source, decoder.as_ref()).await?;
            render_json(&value, cli.compact)?
        }
        None => {
            let text: String = confstore::load(ctx, &source, &TextDecoder::new()).await?;
            text.into_bytes()
        }
    };
    debug!(bytes = output.len(), "Writing loaded configuration");

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&output)
        .and_then(|()| stdout.flush())
        .context("failed to write to stdout")?;
    Ok(())
}

/// Decoder for structured formats; `None` for raw text.
fn value_decoder(format: Format) -> Option<Box<dyn Decoder<Value>>> {
    match format {
        Format::Auto => Some(Box::new(
            DecoderGroup::new()
                .with(JsonDecoder::new())
                .with(YamlDecoder::new()),
        )),
        Format::Json => Some(Box::new(JsonDecoder::new())),
        Format::Yaml => Some(Box::new(YamlDecoder::new())),
        Format::Text => None,
    }
}

fn build_selector(cli: &Cli) -> SourceSelector<String> {
    let method = cli.method.clone();
    let headers = cli.headers.clone();
    let max_body_size = cli.max_body_size;

    let root = cli.root.clone();
    let expand_env = cli.expand_env;
    let trim_bom = cli.trim_bom;

    SourceSelector::new()
        .rule(Rule::try_when(
            |location: &String| is_remote_url(location),
            move |location| {
                let mut builder = HttpSource::builder(location.as_str())
                    .method(method.as_str())
                    .max_body_size(max_body_size);
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.build()
            },
        ))
        .rule(Rule::when(
            |location: &String| location == STDIN_LOCATION,
            |_| ReaderSource::new(tokio::io::stdin()).with_label("<stdin>"),
        ))
        .rule(Rule::try_when(
            |location: &String| is_local_path(location),
            move |location| {
                let mut source = FileSource::new(local_path(location)?);
                if let Some(root) = &root {
                    source = source.root(root);
                }
                if expand_env {
                    source = source.expand_env();
                }
                if trim_bom {
                    source = source.trim_bom();
                }
                Ok(source)
            },
        ))
        .diagnostic()
}

/// Turn a `file://` URL into a path; anything else is already a path.
fn local_path(location: &str) -> confstore::Result<PathBuf> {
    if !location.starts_with("file:") {
        return Ok(PathBuf::from(location));
    }
    let invalid = |message: &str| Error::InvalidEndpoint {
        url: location.to_string(),
        message: message.to_string(),
    };
    url::Url::parse(location)
        .map_err(|e| invalid(&e.to_string()))?
        .to_file_path()
        .map_err(|()| invalid("not a local file path"))
}
