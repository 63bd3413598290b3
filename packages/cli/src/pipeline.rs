//! Load → enrich → render pipeline.
//!
//! [`run`] validates the configuration and runs [`load_stage`] then
//! [`render_stage`], returning the counts the binary reports.

use std::sync::Arc;
use std::time::Instant;

use crash_map_crash_models::CrashRecord;
use crash_map_loader::LoaderError;
use crash_map_render::progress::ProgressCallback;
use crash_map_render::{RenderError, RenderSummary};

use crate::config::{ConfigError, CrashMapConfig};

/// Errors from any pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to load crash data: {0}")]
    Load(#[from] LoaderError),

    #[error("Failed to render map: {0}")]
    Render(#[from] RenderError),
}

/// Record counts and output of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Records left after coordinate cleaning.
    pub cleaned: usize,
    /// Render outcome; `render.markers` is the number of matching crashes.
    pub render: RenderSummary,
}

/// Loads and cleans the configured input file.
///
/// # Errors
///
/// Returns [`PipelineError::Load`] if the file cannot be read.
pub fn load_stage(config: &CrashMapConfig) -> Result<Vec<CrashRecord>, PipelineError> {
    let start = Instant::now();
    let records = crash_map_loader::load_and_clean(&config.input, &config.bounds)?;
    log::debug!("Load stage took {:.2?}", start.elapsed());
    Ok(records)
}

/// Filters and enriches `records`, then renders and saves the map.
///
/// # Errors
///
/// Returns [`PipelineError::Render`] if the map cannot be written.
pub fn render_stage(
    config: &CrashMapConfig,
    records: &[CrashRecord],
    progress: &Arc<dyn ProgressCallback>,
) -> Result<RenderSummary, PipelineError> {
    let start = Instant::now();
    let enriched = crash_map_enrich::enrich(records, &config.crash_type);
    let summary =
        crash_map_render::render_crash_map(&enriched, &config.output, &config.map, progress)?;
    log::debug!("Render stage took {:.2?}", start.elapsed());
    Ok(summary)
}

impl PipelineSummary {
    /// The two lines the binary prints once a run succeeds.
    #[must_use]
    pub fn status_lines(&self) -> [String; 2] {
        [
            format!("Loaded {} crash records", self.cleaned),
            format!(
                "Interactive map saved to {}",
                self.render.output.display()
            ),
        ]
    }
}

/// Validates `config` and runs both stages.
///
/// # Errors
///
/// Returns [`PipelineError`] if the config is invalid or loading or
/// rendering fails.
pub fn run(
    config: &CrashMapConfig,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<PipelineSummary, PipelineError> {
    config.validate()?;
    let records = load_stage(config)?;
    let render = render_stage(config, &records, progress)?;
    Ok(PipelineSummary {
        cleaned: records.len(),
        render,
    })
}
