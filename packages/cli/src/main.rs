#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the pedestrian crash map generator.
//!
//! Reads a crash CSV export, keeps pedestrian crashes with valid
//! coordinates, and writes an interactive Leaflet map as a single HTML file.

use std::path::PathBuf;

use clap::Parser;
use crash_map_cli::config::{ConfigOverrides, load_config};
use crash_map_cli::pipeline;
use crash_map_cli_utils::IndicatifProgress;

#[derive(Parser)]
#[command(name = "crash_map", about = "Pedestrian crash map generator")]
struct Cli {
    /// Crash CSV export to read (overrides `input` in the config)
    #[arg(long)]
    input: Option<PathBuf>,
    /// HTML file to write (overrides `output` in the config)
    #[arg(long)]
    output: Option<PathBuf>,
    /// TOML file merged over the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// `FIRST_CRASH_TYPE` value to map (e.g., "PEDALCYCLIST")
    #[arg(long)]
    crash_type: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = crash_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?.with_overrides(ConfigOverrides {
        input: cli.input,
        output: cli.output,
        crash_type: cli.crash_type,
    });

    let progress = IndicatifProgress::markers_bar(&multi, "Placing markers");
    let summary = pipeline::run(&config, &progress)?;

    for line in summary.status_lines() {
        println!("{line}");
    }

    Ok(())
}
