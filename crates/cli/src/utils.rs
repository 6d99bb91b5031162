use eyre::{Result, WrapErr};
use multichain_config::MultichainConfig;
use serde::Serialize;
use serde_json::Value;
use std::{
    io::{self, Read},
    path::Path,
};

/// Initializes a tracing subscriber reading its filter from `RUST_LOG`.
pub fn subscriber() {
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init()
}

/// Loads the config from `root`, or from the current directory.
pub fn load_config(root: Option<&Path>) -> Result<MultichainConfig> {
    let config = match root {
        Some(root) => MultichainConfig::load_with_root(root),
        None => MultichainConfig::load(),
    }?;
    trace!(target: "multichain::cli", ?config, "loaded config");
    Ok(config)
}

/// Reads a JSON document from `path`, or from stdin if `path` is `-`.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).wrap_err("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?
    };
    parse_json(&content)
}

/// Parses a JSON document.
pub fn parse_json(content: &str) -> Result<Value> {
    serde_json::from_str(content).wrap_err("invalid JSON")
}

/// Prints `value` as pretty JSON to stdout.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
