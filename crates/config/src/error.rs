//! Configuration errors

use figment::{Metadata, error::Kind};
use std::{error::Error, fmt};

/// Settings holding a [`ChainSelection`](crate::ChainSelection).
const CHAIN_SELECTION_SETTINGS: [&str; 2] = ["supported_chain_ids", "supportable_chain_ids"];

/// Represents a failed attempt to extract a `MultichainConfig`.
///
/// Every underlying error is reported on its own line, naming the source that provided the
/// offending value and the setting it was provided for.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    pub(crate) error: figment::Error,
}

impl ExtractConfigError {
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }

    /// Returns the settings that failed to extract, as dotted paths.
    pub fn settings(&self) -> Vec<String> {
        let mut settings: Vec<_> = self
            .error
            .clone()
            .into_iter()
            .map(|err| err.path.join("."))
            .filter(|setting| !setting.is_empty())
            .collect();
        settings.dedup();
        settings
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "failed to extract multichain config:")?;
        for err in self.error.clone() {
            write!(f, "- ")?;
            write_origin(f, err.metadata.as_ref())?;
            let setting = err.path.join(".");
            if !setting.is_empty() {
                write!(f, ", setting `{setting}`")?;
            }
            write!(f, ": {}", err.kind)?;
            if CHAIN_SELECTION_SETTINGS.contains(&setting.as_str()) && is_value_error(&err.kind) {
                write!(f, " (expected \"all\", \"none\", or a list of chain ids and names)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

fn write_origin(f: &mut fmt::Formatter<'_>, metadata: Option<&Metadata>) -> fmt::Result {
    match metadata {
        Some(Metadata { name, source: Some(source), .. }) => write!(f, "{name} `{source}`"),
        Some(Metadata { name, .. }) => f.write_str(name),
        None => f.write_str("defaults"),
    }
}

fn is_value_error(kind: &Kind) -> bool {
    matches!(
        kind,
        Kind::InvalidType(..) | Kind::InvalidValue(..) | Kind::UnknownVariant(..) | Kind::Message(_)
    )
}
