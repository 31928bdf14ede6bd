//! Registry backed by `site-packages` directories
//!
//! Installers record every distribution as either a `<name>-<version>.dist-info`
//! directory holding `METADATA`, or a legacy `<name>-<version>.egg-info`
//! directory (holding `PKG-INFO`) or file (which is the `PKG-INFO` itself).

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pep508_rs::PackageName;
use pep508_rs::pep440_rs::Version;
use tracing::{debug, warn};

use crate::metadata::core_metadata::CoreMetadata;
use crate::metadata::error::MetadataError;
use crate::metadata::registry::MetadataRegistry;

const DIST_INFO_SUFFIX: &str = ".dist-info";
const EGG_INFO_SUFFIX: &str = ".egg-info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum RecordKind {
    DistInfo,
    EggInfo,
}

/// A distribution record found in a site-packages directory
#[derive(Debug, Clone, PartialEq, Eq)]
struct DistRecord {
    kind: RecordKind,
    file_name: String,
    path: PathBuf,
}

impl DistRecord {
    fn from_entry(path: PathBuf) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let kind = if file_name.ends_with(DIST_INFO_SUFFIX) {
            RecordKind::DistInfo
        } else if file_name.ends_with(EGG_INFO_SUFFIX) {
            RecordKind::EggInfo
        } else {
            return None;
        };

        Some(Self {
            kind,
            file_name,
            path,
        })
    }

    /// Project part of the record name, before the version separator
    fn project(&self) -> &str {
        let stem = match self.kind {
            RecordKind::DistInfo => self.file_name.trim_end_matches(DIST_INFO_SUFFIX),
            RecordKind::EggInfo => self.file_name.trim_end_matches(EGG_INFO_SUFFIX),
        };
        stem.split_once('-').map_or(stem, |(project, _)| project)
    }

    fn matches(&self, name: &PackageName) -> bool {
        PackageName::from_str(self.project()).is_ok_and(|project| &project == name)
    }

    /// Path of the core metadata document for this record
    fn metadata_path(&self) -> PathBuf {
        match self.kind {
            RecordKind::DistInfo => self.path.join("METADATA"),
            RecordKind::EggInfo if self.path.is_dir() => self.path.join("PKG-INFO"),
            RecordKind::EggInfo => self.path.clone(),
        }
    }

    fn order(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.file_name.cmp(&other.file_name))
    }
}

/// Registry that searches site-packages directories in order; the first match wins
#[derive(Debug, Clone, Default)]
pub struct SitePackagesRegistry {
    search_paths: Vec<PathBuf>,
}

impl SitePackagesRegistry {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    fn records_in(dir: &Path) -> Result<Vec<DistRecord>, MetadataError> {
        let entries = fs::read_dir(dir).map_err(|source| MetadataError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| MetadataError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            if let Some(record) = DistRecord::from_entry(entry.path()) {
                records.push(record);
            }
        }

        records.sort_by(DistRecord::order);
        Ok(records)
    }

    fn read_version(record: &DistRecord) -> Result<String, MetadataError> {
        let metadata_path = record.metadata_path();
        let content = fs::read_to_string(&metadata_path).map_err(|e| {
            let reason = match e.kind() {
                io::ErrorKind::NotFound => "metadata file is missing".to_string(),
                _ => e.to_string(),
            };
            MetadataError::Corrupt {
                path: metadata_path.clone(),
                reason,
            }
        })?;

        let metadata = CoreMetadata::parse(&content);
        if let Some(declared) = metadata.name.as_deref() {
            if !PackageName::from_str(declared).is_ok_and(|declared| record.matches(&declared)) {
                debug!(
                    "Name '{}' in {:?} does not match record {}",
                    declared, metadata_path, record.file_name
                );
            }
        }

        let version = metadata
            .version
            .filter(|v| !v.is_empty())
            .ok_or_else(|| MetadataError::Corrupt {
                path: metadata_path.clone(),
                reason: "no Version header".to_string(),
            })?;

        if let Err(e) = Version::from_str(&version) {
            warn!(
                "Version '{}' in {:?} is not PEP 440 compliant: {}",
                version, metadata_path, e
            );
        }

        Ok(version)
    }
}

impl MetadataRegistry for SitePackagesRegistry {
    fn version(&self, package_name: &str) -> Result<String, MetadataError> {
        let Ok(name) = PackageName::from_str(package_name).inspect_err(|e| {
            debug!("'{}' is not a valid package name: {}", package_name, e);
        }) else {
            return Err(MetadataError::NotFound(package_name.to_string()));
        };

        for dir in &self.search_paths {
            if !dir.is_dir() {
                debug!("Skipping missing search path {:?}", dir);
                continue;
            }

            let found = Self::records_in(dir)?
                .into_iter()
                .find(|record| record.matches(&name));

            if let Some(record) = found {
                debug!("Found {} at {:?}", package_name, record.path);
                return Self::read_version(&record);
            }
        }

        Err(MetadataError::NotFound(package_name.to_string()))
    }
}
