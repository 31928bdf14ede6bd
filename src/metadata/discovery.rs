//! Search path discovery for site-packages directories
//!
//! The probe checks environment variables first, then falls back to the
//! user site directory and well-known system prefixes. The order mirrors how
//! an interpreter launched from the same shell would resolve imports.
//!
//! An active virtualenv hides everything outside itself (except `PYTHONPATH`)
//! unless its `pyvenv.cfg` sets `include-system-site-packages = true`.

use std::collections::HashSet;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// System prefixes probed on Unix, in priority order
#[cfg(unix)]
const SYSTEM_PREFIXES: &[&str] = &["/usr/local/lib", "/usr/lib"];
#[cfg(not(unix))]
const SYSTEM_PREFIXES: &[&str] = &[];

/// Snapshot of the environment that drives discovery
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeEnv {
    pub python_path: Option<OsString>,
    pub virtual_env: Option<PathBuf>,
    pub conda_prefix: Option<PathBuf>,
    pub home_dir: Option<PathBuf>,
    pub system_prefixes: Vec<PathBuf>,
}

impl ProbeEnv {
    /// Captures the current process environment
    pub fn from_process() -> Self {
        Self {
            python_path: env::var_os("PYTHONPATH"),
            virtual_env: env::var_os("VIRTUAL_ENV").map(PathBuf::from),
            conda_prefix: env::var_os("CONDA_PREFIX").map(PathBuf::from),
            home_dir: dirs::home_dir(),
            system_prefixes: SYSTEM_PREFIXES.iter().map(PathBuf::from).collect(),
        }
    }
}

/// Returns the site-packages directories of the current environment.
pub fn discover() -> Vec<PathBuf> {
    discover_with_env(&ProbeEnv::from_process())
}

/// Returns existing site-packages directories for the given environment, in
/// lookup order and without duplicates.
pub fn discover_with_env(probe: &ProbeEnv) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(python_path) = &probe.python_path {
        candidates.extend(env::split_paths(python_path).filter(|p| !p.as_os_str().is_empty()));
    }

    if let Some(venv) = &probe.virtual_env {
        candidates.extend(prefix_site_packages(venv));
    }

    let isolated = probe
        .virtual_env
        .as_deref()
        .is_some_and(|venv| !includes_system_site_packages(venv));

    if isolated {
        debug!("Virtualenv is isolated; skipping user and system site-packages");
    } else {
        if let Some(conda_prefix) = &probe.conda_prefix {
            candidates.extend(prefix_site_packages(conda_prefix));
        }

        if let Some(home) = &probe.home_dir {
            candidates.extend(versioned_dirs(&home.join(".local/lib"), &["site-packages"]));
        }

        for prefix in &probe.system_prefixes {
            candidates.extend(versioned_dirs(prefix, &["site-packages", "dist-packages"]));
        }
    }

    let mut seen = HashSet::new();
    let paths: Vec<PathBuf> = candidates
        .into_iter()
        .filter(|p| p.is_dir())
        .filter(|p| seen.insert(p.clone()))
        .collect();

    debug!("Discovered search paths: {:?}", paths);
    paths
}

/// Reads `include-system-site-packages` from `<venv>/pyvenv.cfg`; absent means false
fn includes_system_site_packages(venv: &Path) -> bool {
    let Ok(content) = fs::read_to_string(venv.join("pyvenv.cfg")) else {
        return false;
    };

    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .any(|(key, value)| {
            key.trim().eq_ignore_ascii_case("include-system-site-packages")
                && value.trim().eq_ignore_ascii_case("true")
        })
}

/// site-packages directories of an interpreter prefix (virtualenv or conda)
fn prefix_site_packages(prefix: &Path) -> Vec<PathBuf> {
    if cfg!(windows) {
        return vec![prefix.join("Lib").join("site-packages")];
    }
    versioned_dirs(&prefix.join("lib"), &["site-packages"])
}

/// `<lib>/python3.X/<leaf>` directories, newest Python first
fn versioned_dirs(lib: &Path, leaves: &[&str]) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(lib) else {
        return Vec::new();
    };

    let mut python_dirs: Vec<(Vec<u32>, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name();
            let key = python_version_key(name.to_str()?)?;
            Some((key, entry.path()))
        })
        .collect();

    python_dirs.sort_by(|a, b| b.0.cmp(&a.0));

    python_dirs
        .into_iter()
        .flat_map(|(_, dir)| leaves.iter().map(move |leaf| dir.join(leaf)))
        .collect()
}

/// Sort key for `python3`, `python3.12`; `None` for anything else
fn python_version_key(dir_name: &str) -> Option<Vec<u32>> {
    let version = dir_name.strip_prefix("python")?;
    if version.is_empty() {
        return None;
    }
    version
        .split('.')
        .map(|part| part.parse::<u32>().ok())
        .collect()
}
