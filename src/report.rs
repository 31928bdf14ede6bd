//! Version report: one line per queried package, in query order

use std::fmt;
use std::io::Write;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::metadata::error::MetadataError;
use crate::metadata::registry::MetadataRegistry;

/// Lookup result for a single queried package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Installed { name: String, version: String },
    NotInstalled { name: String },
}

impl Outcome {
    /// The package name exactly as it was queried
    pub fn name(&self) -> &str {
        match self {
            Outcome::Installed { name, .. } | Outcome::NotInstalled { name } => name,
        }
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            Outcome::Installed { version, .. } => Some(version),
            Outcome::NotInstalled { .. } => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Installed { name, version } => write!(f, "{}=={}", name, version),
            Outcome::NotInstalled { name } => write!(f, "{} (not installed)", name),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("Failed to write report: {0}")]
    Write(#[from] std::io::Error),
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    name: &'a str,
    version: Option<&'a str>,
}

/// Resolves one package. Only `NotFound` is absorbed; other errors propagate.
pub fn resolve<R>(registry: &R, name: &str) -> Result<Outcome, MetadataError>
where
    R: MetadataRegistry + ?Sized,
{
    match registry.version(name) {
        Ok(version) => Ok(Outcome::Installed {
            name: name.to_string(),
            version,
        }),
        Err(MetadataError::NotFound(_)) => {
            debug!("{} is not installed", name);
            Ok(Outcome::NotInstalled {
                name: name.to_string(),
            })
        }
        Err(e) => Err(e),
    }
}

/// Resolves every package in order, stopping at the first unrecoverable error
pub fn collect<R, S>(registry: &R, names: &[S]) -> Result<Vec<Outcome>, MetadataError>
where
    R: MetadataRegistry + ?Sized,
    S: AsRef<str>,
{
    names
        .iter()
        .map(|name| resolve(registry, name.as_ref()))
        .collect()
}

/// Resolves and writes one line per package as it goes, so lines resolved
/// before an unrecoverable error are already on `out`. Returns the line count.
pub fn run<R, S, W>(registry: &R, names: &[S], out: &mut W) -> Result<usize, ReportError>
where
    R: MetadataRegistry + ?Sized,
    S: AsRef<str>,
    W: Write,
{
    for name in names {
        let outcome = resolve(registry, name.as_ref())?;
        writeln!(out, "{}", outcome)?;
    }
    Ok(names.len())
}

pub fn write_json<W: Write>(out: &mut W, outcomes: &[Outcome]) -> std::io::Result<()> {
    let entries: Vec<JsonEntry<'_>> = outcomes
        .iter()
        .map(|outcome| JsonEntry {
            name: outcome.name(),
            version: outcome.version(),
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)
}
