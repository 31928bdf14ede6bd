use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Packages reported when neither the command line nor a config file names any
pub const DEFAULT_PACKAGES: &[&str] = &[
    "langchain",
    "ipykernel",
    "langchain_groq",
    "langchain_google_genai",
    "langchain-community",
    "langchain-core",
    "langgraph",
    "tavily-python",
    "wikipedia",
    "structlog",
];

/// File name of the log written with `--log-file`
pub const LOG_FILE_NAME: &str = "version-report.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration file structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    /// Package query list; `None` keeps the defaults
    pub packages: Option<Vec<String>>,
    /// Explicit site-packages directories; `None` means discover them
    pub search_paths: Option<Vec<PathBuf>>,
}

impl ReportConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from {:?}", path);

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Query list after applying command-line overrides
    pub fn packages_with(&self, cli_packages: Vec<String>) -> Vec<String> {
        if !cli_packages.is_empty() {
            return cli_packages;
        }
        match &self.packages {
            Some(packages) => packages.clone(),
            None => DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Explicit search paths after applying command-line overrides;
    /// `None` when the environment should be probed instead
    pub fn search_paths_with(&self, cli_paths: Vec<PathBuf>) -> Option<Vec<PathBuf>> {
        if !cli_paths.is_empty() {
            return Some(cli_paths);
        }
        self.search_paths.clone()
    }
}

/// Returns the path to the data directory for version-report.
/// Uses $XDG_DATA_HOME/version-report if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/version-report,
/// or ./version-report if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("version-report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn report_config_from_empty_object_uses_defaults() {
        let result = serde_json::from_value::<ReportConfig>(json!({})).unwrap();

        assert_eq!(result, ReportConfig::default());
        assert_eq!(
            result.packages_with(vec![]),
            DEFAULT_PACKAGES
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
        );
        assert_eq!(result.search_paths_with(vec![]), None);
    }

    #[test]
    fn report_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<ReportConfig>(json!({
            "packages": ["requests", "structlog"],
            "searchPaths": ["/opt/venv/lib/python3.12/site-packages"],
            "unknownField": true
        }))
        .unwrap();

        assert_eq!(
            result,
            ReportConfig {
                packages: Some(vec!["requests".to_string(), "structlog".to_string()]),
                search_paths: Some(vec![PathBuf::from(
                    "/opt/venv/lib/python3.12/site-packages"
                )]),
            }
        );
    }

    #[test]
    fn packages_with_prefers_command_line() {
        let config = ReportConfig {
            packages: Some(vec!["requests".to_string()]),
            search_paths: None,
        };

        assert_eq!(
            config.packages_with(vec!["alpha".to_string()]),
            vec!["alpha".to_string()]
        );
        assert_eq!(config.packages_with(vec![]), vec!["requests".to_string()]);
    }

    #[test]
    fn packages_with_keeps_explicitly_empty_list() {
        let config = ReportConfig {
            packages: Some(vec![]),
            search_paths: None,
        };

        assert!(config.packages_with(vec![]).is_empty());
    }

    #[test]
    fn search_paths_with_prefers_command_line() {
        let config = ReportConfig {
            packages: None,
            search_paths: Some(vec![PathBuf::from("/from/config")]),
        };

        assert_eq!(
            config.search_paths_with(vec![PathBuf::from("/from/cli")]),
            Some(vec![PathBuf::from("/from/cli")])
        );
        assert_eq!(
            config.search_paths_with(vec![]),
            Some(vec![PathBuf::from("/from/config")])
        );
    }

    #[test]
    fn load_reads_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"packages": ["langgraph"]}"#).unwrap();

        let config = ReportConfig::load(&path).unwrap();

        assert_eq!(config.packages, Some(vec!["langgraph".to_string()]));
    }

    #[test]
    fn load_reports_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ReportConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        assert!(matches!(
            ReportConfig::load(&temp_dir.path().join("missing.json")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/version-report"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/version-report"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./version-report"));
    }
}
