//! Registry test utilities

use std::collections::HashMap;

use version_report::metadata::error::MetadataError;
use version_report::metadata::registry::MetadataRegistry;

/// In-memory registry for testing
#[derive(Default)]
pub struct MockRegistry {
    versions: HashMap<String, String>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, package: &str, version: &str) -> Self {
        self.versions
            .insert(package.to_string(), version.to_string());
        self
    }
}

impl MetadataRegistry for MockRegistry {
    fn version(&self, package_name: &str) -> Result<String, MetadataError> {
        match self.versions.get(package_name) {
            Some(version) => Ok(version.clone()),
            None => Err(MetadataError::NotFound(package_name.to_string())),
        }
    }
}
