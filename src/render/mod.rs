/// Output layer: turns an assembled [`Figure`] into exactly one artifact.
///
/// ```text
///   -f html            → html::write_html          (plotly fragment)
///   -f pdf|svg|png     → static_image::write_image (static file, format from extension)
///   -f <anything else> → app::run_viewer           (native window, nothing persisted)
/// ```

pub mod html;
pub mod static_image;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::figure::Figure;

/// Where the figure goes.  Exactly one of these runs per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Interactive HTML fragment written to a file.
    Html(PathBuf),
    /// Static image written to a file; format inferred from the extension.
    StaticImage(PathBuf),
    /// Interactive window; the requested renderer name is only reported.
    Interactive(String),
}

impl OutputMode {
    /// Route a `-f` format token and `-o` path to a render path.
    pub fn from_format(format: &str, output: &Path) -> Self {
        match format.to_ascii_lowercase().as_str() {
            "html" => OutputMode::Html(output.to_path_buf()),
            "pdf" | "svg" | "png" | "image" => OutputMode::StaticImage(output.to_path_buf()),
            _ => OutputMode::Interactive(format.to_string()),
        }
    }
}

/// Render `figure` through the single path selected by `mode`.
pub fn render(figure: Figure, mode: &OutputMode) -> Result<()> {
    match mode {
        OutputMode::Html(path) => html::write_html(&figure, path),
        OutputMode::StaticImage(path) => static_image::write_image(&figure, path),
        OutputMode::Interactive(renderer) => {
            log::info!("Opening interactive viewer (requested renderer: {renderer})");
            crate::app::run_viewer(figure)
        }
    }
}

/// Create the parent directory of an output path if it is missing.
pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_routes_to_exactly_one_path() {
        let out = Path::new("plots/figure1.pdf");
        assert_eq!(OutputMode::from_format("html", out), OutputMode::Html(out.into()));
        assert_eq!(OutputMode::from_format("pdf", out), OutputMode::StaticImage(out.into()));
        assert_eq!(OutputMode::from_format("PNG", out), OutputMode::StaticImage(out.into()));
        assert_eq!(
            OutputMode::from_format("browser", out),
            OutputMode::Interactive("browser".into())
        );
    }
}
