//! site-packages directory fixtures

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary site-packages directory populated with dist-info records
pub struct SitePackagesFixture {
    temp_dir: TempDir,
}

impl SitePackagesFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path_buf(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    /// Installs `<name>-<version>.dist-info` the way a wheel installer would
    pub fn install(self, name: &str, version: &str) -> Self {
        let escaped = name.replace(['-', '.'], "_");
        let record = self
            .path()
            .join(format!("{}-{}.dist-info", escaped, version));
        fs::create_dir_all(&record).unwrap();
        fs::write(
            record.join("METADATA"),
            format!("Metadata-Version: 2.1\nName: {name}\nVersion: {version}\n\n"),
        )
        .unwrap();
        self
    }

    /// Adds a dist-info record whose METADATA file is missing
    pub fn install_broken(self, name: &str, version: &str) -> Self {
        fs::create_dir_all(
            self.path()
                .join(format!("{}-{}.dist-info", name, version)),
        )
        .unwrap();
        self
    }
}
