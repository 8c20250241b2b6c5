//! Load ML experiment results, merge repeated trials and plot MCC in 3D
//! against the share of malicious users and the training-set size.
//!
//! The pipeline is strictly linear:
//!
//! ```text
//!  loader ──► aggregate ──► figure ──► render (html │ svg/png │ window)
//! ```

pub mod app;
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod figure;
pub mod render;
pub mod state;
pub mod ui;

use anyhow::{Context, Result};

use crate::config::PlotConfig;
use crate::figure::Figure;

/// Load the input table and assemble the figure.
pub fn prepare(config: &PlotConfig) -> Result<Figure> {
    let table = data::loader::load_file(&config.input)
        .with_context(|| format!("loading {}", config.input.display()))?;

    let series = data::build_series(&table, &config.series)
        .with_context(|| format!("aggregating {}", config.input.display()))?;

    Ok(figure::build_figure(
        series,
        config.series.scale.is_raw(),
        config.breaking_point,
    ))
}

/// Run the whole pipeline: load, aggregate, render through the selected output.
pub fn run(config: &PlotConfig) -> Result<()> {
    let figure = prepare(config)?;
    render::render(figure, &config.output)
}
