//! Simple CLI that reads HTML from stdin and outputs JSON to stdout.
//!
//! An optional first argument names a JSON file with `Options`; missing
//! fields keep their defaults. Logging goes to stderr and is controlled by
//! `RUST_LOG`.

use std::io::{self, Read};

use rs_maintext::{extract_with_options, ExtractResult, Options};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Serialize)]
struct Output {
    #[serde(flatten)]
    result: ExtractResult,
    error: Option<String>,
}

fn load_options() -> Options {
    let Some(path) = std::env::args().nth(1) else {
        return Options::default();
    };
    match std::fs::read_to_string(&path).map(|json| serde_json::from_str::<Options>(&json)) {
        Ok(Ok(options)) => options,
        Ok(Err(e)) => {
            tracing::warn!(%path, error = %e, "invalid options file, using defaults");
            Options::default()
        }
        Err(e) => {
            tracing::warn!(%path, error = %e, "cannot read options file, using defaults");
            Options::default()
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let options = load_options();

    // Read HTML from stdin
    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let output = match extract_with_options(&html, &options) {
        Ok(result) => Output { result, error: None },
        Err(e) => Output {
            result: ExtractResult {
                table_format: options.table_format,
                ..ExtractResult::default()
            },
            error: Some(e.to_string()),
        },
    };

    println!("{}", serde_json::to_string(&output).unwrap_or_default());
}
