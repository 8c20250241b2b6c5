//! Command line interface.
//!
//! # Usage
//!
//! ```bash
//! # Open the interactive viewer with every model, worst trial per point
//! mcc-plot -i output.csv
//!
//! # HTML fragment of two models, median of repeated trials
//! mcc-plot -i output.csv -a median -m LR SVM -f html -o plots/lr_svm.html
//!
//! # Single model with breaking-point walls, as an SVG
//! mcc-plot -i output.csv -a max -m "KNN(3)" -x 0.3 -y 0.5 -f svg -o plots/knn3.svg
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::PlotConfig;
use crate::data::{Aggregation, AxisScale, ModelOrder, SeriesOptions};
use crate::figure::BreakingPoint;
use crate::render::OutputMode;

/// Plot MCC of ML experiment results against malicious users and training size
#[derive(Parser, Debug)]
#[command(name = "mcc-plot")]
#[command(about = "Plot data from the ML dataset")]
#[command(version)]
pub struct Args {
    /// Input results table (.csv, .json or .parquet)
    #[arg(short = 'i', long = "input", default_value = "output.csv")]
    pub input: PathBuf,

    /// Statistic used to merge repeated trials
    #[arg(short = 'a', long = "aggregation", value_enum, default_value_t = Aggregation::Min)]
    pub aggregation: Aggregation,

    /// Output format: html, pdf/svg/png (static image), or an interactive renderer name
    #[arg(short = 'f', long = "format", default_value = "browser")]
    pub format: String,

    /// Output file name
    #[arg(short = 'o', long = "output", default_value = "plots/figure1.pdf")]
    pub output: PathBuf,

    /// Models to consider (default: every model in the table)
    #[arg(short = 'm', long = "models", num_args = 1..)]
    pub models: Option<Vec<String>>,

    /// Malicious-users breaking point (single model only)
    #[arg(short = 'x', allow_negative_numbers = true)]
    pub x: Option<f64>,

    /// Training-dataset breaking point (single model only)
    #[arg(short = 'y', allow_negative_numbers = true)]
    pub y: Option<f64>,

    /// List models alphabetically instead of in order of appearance
    #[arg(long)]
    pub sort_models: bool,

    /// Plot raw counts instead of fractions
    #[arg(long, conflicts_with_all = ["malicious_divisor", "dataset_divisor"])]
    pub raw: bool,

    /// Number of participants that maps to 100% malicious
    #[arg(long, default_value_t = 20.0)]
    pub malicious_divisor: f64,

    /// Training-set size that maps to 100% of the examples
    #[arg(long, default_value_t = 60000.0)]
    pub dataset_divisor: f64,
}

impl Args {
    /// Resolve parsed flags into the library configuration.
    pub fn into_config(self) -> PlotConfig {
        let scale = if self.raw {
            AxisScale::raw()
        } else {
            AxisScale {
                malicious_divisor: self.malicious_divisor,
                dataset_len_divisor: self.dataset_divisor,
                round: true,
            }
        };

        let breaking_point = match (self.x, self.y) {
            (Some(malicious), Some(dataset_len)) => Some(BreakingPoint {
                malicious,
                dataset_len,
            }),
            (None, None) => None,
            _ => {
                log::warn!("Breaking point needs both -x and -y; ignoring it");
                None
            }
        };

        PlotConfig {
            output: OutputMode::from_format(&self.format, &self.output),
            input: self.input,
            series: SeriesOptions {
                aggregation: self.aggregation,
                models: self.models,
                order: if self.sort_models {
                    ModelOrder::Sorted
                } else {
                    ModelOrder::FirstSeen
                },
                scale,
            },
            breaking_point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("mcc-plot").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).into_config();
        assert_eq!(config.input, PathBuf::from("output.csv"));
        assert_eq!(config.series.aggregation, Aggregation::Min);
        assert_eq!(config.series.models, None);
        assert_eq!(config.series.scale, AxisScale::default());
        assert_eq!(config.output, OutputMode::Interactive("browser".into()));
        assert_eq!(config.breaking_point, None);
    }

    #[test]
    fn test_full_flag_set() {
        let config = parse(&[
            "-i", "r.csv", "-a", "median", "-f", "html", "-o", "out/f.html", "-m", "LR", "KNN(3)",
            "-x", "0.3", "-y", "0.5", "--sort-models",
        ])
        .into_config();

        assert_eq!(config.series.aggregation, Aggregation::Median);
        assert_eq!(config.series.models, Some(vec!["LR".to_string(), "KNN(3)".to_string()]));
        assert_eq!(config.series.order, ModelOrder::Sorted);
        assert_eq!(config.output, OutputMode::Html(PathBuf::from("out/f.html")));
        assert_eq!(
            config.breaking_point,
            Some(BreakingPoint { malicious: 0.3, dataset_len: 0.5 })
        );
    }

    #[test]
    fn test_unknown_aggregation_is_rejected() {
        let result = Args::try_parse_from(["mcc-plot", "-a", "mode"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_half_breaking_point_is_ignored() {
        let config = parse(&["-x", "0.3"]).into_config();
        assert_eq!(config.breaking_point, None);
    }

    #[test]
    fn test_raw_scale() {
        let config = parse(&["--raw", "-f", "png", "-o", "a.png"]).into_config();
        assert!(config.series.scale.is_raw());
        assert_eq!(config.output, OutputMode::StaticImage(PathBuf::from("a.png")));
    }

    #[test]
    fn test_unit_divisors_plot_counts() {
        let config =
            parse(&["--malicious-divisor", "1", "--dataset-divisor", "1"]).into_config();
        assert!(config.series.scale.round);
        assert!(config.series.scale.is_raw());
    }

    #[test]
    fn test_raw_conflicts_with_divisors() {
        let result = Args::try_parse_from(["mcc-plot", "--raw", "--malicious-divisor", "10"]);
        assert!(result.is_err());
    }
}
