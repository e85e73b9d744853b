use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use digarch_extents::config::{default_config_path, resolve_config, save_config};
use digarch_extents::{ftk, hdd, logging, output, transfers};
use digarch_extents::{ExtentConfig, ExtentError, ExtentReport, ExtentResult, ReviewLog};

/// Extent reports for archival collections
#[derive(Parser)]
#[command(name = "digarch-extents")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report extents from an FTK XML report
    Ftk {
        /// FTK report exported as XML (.xml or .fo)
        #[arg(short, long, value_parser = validate_report_file)]
        file: PathBuf,

        /// Report destination directory
        #[arg(short, long, value_parser = validate_output_dir)]
        output: PathBuf,
    },

    /// Report extents from a FAcomponents directory
    Hdd {
        /// Path to the parent directory, e.g. M###_FAcomponents
        #[arg(short, long, value_parser = validate_dir)]
        dir: PathBuf,

        /// Report destination directory
        #[arg(short, long, value_parser = validate_output_dir)]
        output: PathBuf,
    },

    /// Report on the bagged transfers of an acquisition
    Transfers {
        /// Acquisition id, e.g. ACQ_1234
        #[arg(long)]
        acqid: String,

        /// Directory holding one folder per acquisition
        #[arg(long, value_parser = validate_dir)]
        transfers: PathBuf,

        /// Report destination directory
        #[arg(long, value_parser = validate_output_dir)]
        dest: PathBuf,
    },

    /// Write the default configuration to the per-user config path
    InitConfig {
        /// Write here instead of the per-user config path
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn validate_report_file(f: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(f);
    if !path.exists() {
        return Err(format!("Directory or file does not exist: {}", f));
    }
    let is_report = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml") || ext.eq_ignore_ascii_case("fo"));
    if !is_report {
        return Err("Not a valid file type. Expect .xml or .fo".to_string());
    }
    Ok(path)
}

fn validate_output_dir(f: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(f);
    if !path.exists() {
        return Err(format!("Output directory does not exist: {}", f));
    }
    Ok(path)
}

fn validate_dir(d: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(d);
    if !path.exists() {
        return Err(format!("Specified directory does not exist: {}", d));
    }
    if !path.is_dir() {
        return Err(format!("Specified path is not a directory: {}", d));
    }
    Ok(path)
}

fn summarize(review: &ReviewLog) {
    if review.is_empty() {
        info!("No issues found for review");
    } else {
        info!(notices = review.len(), "Issues found for review with the processing archivist");
    }
}

fn write_tree(report: ExtentReport, dest: &Path) -> ExtentResult<()> {
    info!("Writing report ...");
    let path = output::write_report(&report.tree, dest)?;
    summarize(&report.review);
    println!("{}", path.display());
    Ok(())
}

fn run_command(command: Commands, config: &ExtentConfig) -> ExtentResult<()> {
    match command {
        Commands::Ftk { file, output } => {
            info!("Parsing XML ...");
            let report = ftk::run(&file, config)?;
            write_tree(report, &output)
        }
        Commands::Hdd { dir, output } => {
            info!("Collecting data from file system ...");
            let report = hdd::run(&dir, config)?;
            write_tree(report, &output)
        }
        Commands::Transfers { acqid, transfers: transfers_dir, dest } => {
            let mut review = ReviewLog::new();
            let stats = transfers::collect_acquisition(&transfers_dir, &acqid, &mut review)?;
            let path = transfers::write_stats(&stats, &dest, &acqid)?;
            summarize(&review);
            println!("{}", path.display());
            Ok(())
        }
        Commands::InitConfig { path } => {
            let path = path.or_else(default_config_path).ok_or_else(|| {
                ExtentError::Config("No config directory on this platform, pass --path".to_string())
            })?;
            save_config(&ExtentConfig::default(), &path)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Control log level with -v or the RUST_LOG env var:
    //   RUST_LOG=debug digarch-extents ftk ...
    //   RUST_LOG=archivist_review=warn digarch-extents hdd ...
    logging::init(cli.verbose);

    let config = match resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_command(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
