//! iconify-css CLI
//!
//! Usage:
//!   iconify-css build --config <FILE> [--out <FILE>]
//!   iconify-css fetch <CACHE_DIR> <URI>...
//!
//! `fetch` is the helper `build` runs to download uncached remote icon sets.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use iconify_css::{build_stylesheet, fetch_all, Config};

#[derive(Parser)]
#[command(name = "iconify-css")]
#[command(about = "Generate CSS icon classes from Iconify icon sets")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the stylesheet for a configuration file
    Build {
        /// Configuration file (TOML format)
        #[arg(short, long)]
        config: PathBuf,

        /// Output file (writes to stdout if not provided)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Download icon sets into a cache directory
    Fetch {
        cache_dir: PathBuf,

        #[arg(required = true)]
        uris: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Build { config, out } => build(config, out),
        Command::Fetch { cache_dir, uris } => match fetch_all(&cache_dir, &uris) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
    }
}

fn build(config_path: PathBuf, out: Option<PathBuf>) -> ExitCode {
    let config = match Config::from_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config '{}': {}", config_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let stylesheet = build_stylesheet(&config);
    let css = stylesheet.to_css();

    match &out {
        Some(path) => {
            if let Err(e) = fs::write(path, &css) {
                eprintln!("Error writing '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        }
        None => print!("{css}"),
    }

    if stylesheet.has_errors() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
