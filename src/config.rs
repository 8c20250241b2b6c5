use std::path::PathBuf;

use crate::data::SeriesOptions;
use crate::figure::BreakingPoint;
use crate::render::OutputMode;

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Results table to read.
    pub input: PathBuf,
    /// Model selection, aggregation and axis scaling.
    pub series: SeriesOptions,
    /// Only drawn when exactly one model is plotted.
    pub breaking_point: Option<BreakingPoint>,
    pub output: OutputMode,
}
