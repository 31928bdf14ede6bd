use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use version_report::config::{ReportConfig, log_path};
use version_report::metadata::SitePackagesRegistry;
use version_report::metadata::discovery::discover;
use version_report::{logging, report};

#[cfg(windows)]
const PATH_DELIMITER: char = ';';
#[cfg(not(windows))]
const PATH_DELIMITER: char = ':';

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "version-report")]
#[command(version, about = "Print installed versions of Python packages")]
struct Cli {
    /// Packages to report (defaults to the built-in list or the config file)
    #[arg(value_name = "PACKAGE")]
    packages: Vec<String>,

    /// site-packages directory to search; disables environment discovery
    #[arg(
        long = "path",
        value_name = "DIR",
        env = "VERSION_REPORT_PATH",
        value_delimiter = PATH_DELIMITER
    )]
    paths: Vec<PathBuf>,

    /// JSON config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also write logs to the data directory
    #[arg(long)]
    log_file: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.then(log_path);
    let _guard = logging::init(cli.verbose, log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    let packages = config.packages_with(cli.packages);
    let search_paths = match config.search_paths_with(cli.paths) {
        Some(paths) => {
            debug!("Using explicit search paths: {:?}", paths);
            paths
        }
        None => discover(),
    };
    info!(
        "Reporting {} packages across {} search paths",
        packages.len(),
        search_paths.len()
    );

    let registry = SitePackagesRegistry::new(search_paths);
    let mut stdout = io::stdout().lock();
    match cli.format {
        Format::Text => {
            report::run(&registry, &packages, &mut stdout).context("Package lookup failed")?;
        }
        Format::Json => {
            let outcomes =
                report::collect(&registry, &packages).context("Package lookup failed")?;
            report::write_json(&mut stdout, &outcomes)?;
        }
    }
    stdout.flush()?;

    Ok(())
}
