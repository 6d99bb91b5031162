use eyre::EyreHandler;
use itertools::Itertools;
use std::{error::Error, fmt};

/// Reports errors as their deduplicated chain of causes.
#[derive(Debug, Default)]
pub struct Handler;

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Display;
        dedup_chain(error).into_iter().format("; ").fmt(f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }
        write_report(f, &dedup_chain(error))
    }
}

/// Writes the first cause as the headline and numbers the remaining ones below it.
fn write_report(f: &mut impl fmt::Write, causes: &[String]) -> fmt::Result {
    let Some((headline, causes)) = causes.split_first() else { return Ok(()) };
    f.write_str(headline)?;
    if !causes.is_empty() {
        f.write_str("\n\nCaused by:")?;
    }
    for (n, cause) in causes.iter().enumerate() {
        write!(f, "\n  {n}: {cause}")?;
    }
    Ok(())
}

/// Collects the messages of `error` and its sources.
///
/// A message contained in the one before it is dropped, so `outer: inner; inner` becomes
/// `outer: inner`.
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes = Vec::new();
    let mut current = Some(error);
    while let Some(err) = current {
        causes.push(err.to_string().trim().to_string());
        current = err.source();
    }
    causes.dedup_by(|b, a| a.contains(b.as_str()));
    causes
}

/// Installs [`Handler`] as the global [`eyre`] hook.
pub fn install() {
    if let Err(e) = eyre::set_hook(Box::new(|_| Box::new(Handler))) {
        debug!(target: "multichain::cli", "failed to install eyre error hook: {e}");
    }
}
