//! Registry trait for looking up installed package versions

#[cfg(test)]
use mockall::automock;

use crate::metadata::error::MetadataError;

/// Trait for resolving the installed version of a package
#[cfg_attr(test, automock)]
pub trait MetadataRegistry {
    /// Returns the installed version of a package
    ///
    /// # Arguments
    /// * `package_name` - The name as written by the user (e.g., "langchain_core")
    ///
    /// # Returns
    /// * `Ok(String)` - The version recorded in the package metadata
    /// * `Err(MetadataError::NotFound)` - If no installed distribution matches the name
    /// * `Err(_)` - If the metadata store could not be read
    fn version(&self, package_name: &str) -> Result<String, MetadataError>;
}
