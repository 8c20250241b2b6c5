use std::path::Path;

use anyhow::{bail, Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use svg2pdf::usvg;
use svg2pdf::{ConversionOptions, PageOptions};

use crate::color::Rgb;
use crate::figure::Figure;

/// Static output formats, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
    /// Drawn as SVG, then converted to a single-page PDF.
    Pdf,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Ok(ImageFormat::Svg),
            "png" => Ok(ImageFormat::Png),
            "pdf" => Ok(ImageFormat::Pdf),
            other => bail!("Unsupported image extension: .{other}"),
        }
    }
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn draw_error<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow::anyhow!("drawing failed: {e}")
}

/// Camera yaw/pitch (radians) looking from `eye` towards the origin.
fn view_angles(eye: (f64, f64, f64)) -> (f64, f64) {
    let (x, y, z) = eye;
    (x.atan2(y), z.atan2(x.hypot(y)))
}

/// Draw the figure on any plotters backend.
///
/// Plotters puts the vertical axis second, so scene points
/// `(malicious, dataset_len, mcc)` are drawn at `(malicious, mcc, dataset_len)`.
fn draw_figure<DB: DrawingBackend>(root: DrawingArea<DB, Shift>, figure: &Figure) -> Result<()> {
    let l = &figure.layout;
    root.fill(&WHITE).map_err(draw_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(
            format!("{} by {} and {}", l.z.title, l.x.title, l.y.title),
            ("sans-serif", 16),
        )
        .build_cartesian_3d(
            l.x.range.0..l.x.range.1,
            l.z.range.0..l.z.range.1,
            l.y.range.0..l.y.range.1,
        )
        .map_err(draw_error)?;

    let (yaw, pitch) = view_angles(l.eye);
    chart.with_projection(|mut pb| {
        pb.yaw = yaw;
        pb.pitch = pitch;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(3)
        .draw()
        .map_err(draw_error)?;

    for surface in &figure.surfaces {
        let style = rgb(surface.color).mix(surface.opacity * 0.5).filled();
        chart
            .draw_series(surface.quads().into_iter().map(|quad| {
                let corners: Vec<(f64, f64, f64)> =
                    quad.iter().map(|&(x, y, z)| (x, z, y)).collect();
                Polygon::new(corners, style)
            }))
            .map_err(draw_error)?;
    }

    for series in figure.series.iter().filter(|s| s.visible) {
        let color = rgb(series.color);
        chart
            .draw_series(
                series
                    .points()
                    .map(|(x, y, z)| Circle::new((x, z, y), 3, color.filled())),
            )
            .map_err(draw_error)?
            .label(series.name.as_str())
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_error)?;

    root.present().map_err(draw_error)?;
    Ok(())
}

fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).context("parsing rendered SVG")?;
    svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| anyhow::anyhow!("converting SVG to PDF: {e:?}"))
}

/// Write the figure as a static image; format from the extension of `path`.
pub fn write_image(figure: &Figure, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path)?;
    super::ensure_parent_dir(path)
        .with_context(|| format!("creating directory for {}", path.display()))?;

    let (w, h) = (figure.layout.width, figure.layout.height);
    match format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, (w, h)).into_drawing_area();
            draw_figure(root, figure)?;
        }
        ImageFormat::Png => {
            let mut buf = vec![0u8; w as usize * h as usize * 3];
            {
                let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
                draw_figure(root, figure)?;
            }
            let img = ::image::RgbImage::from_raw(w, h, buf).context("bitmap buffer size")?;
            img.save(path)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        ImageFormat::Pdf => {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (w, h)).into_drawing_area();
                draw_figure(root, figure)?;
            }
            let pdf = svg_to_pdf(&svg)?;
            std::fs::write(path, pdf).with_context(|| format!("writing {}", path.display()))?;
        }
    }

    log::info!("Wrote {:?} figure to {}", format, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Series;
    use crate::figure::build_figure;

    fn two_model_figure() -> Figure {
        let series = |name: &str, color: Rgb, mcc: f64| Series {
            name: name.to_string(),
            malicious: vec![0.0, 0.5, 1.0],
            dataset_len: vec![0.2, 0.6, 1.0],
            mcc: vec![mcc, mcc - 0.2, mcc - 0.4],
            color,
            visible: true,
        };
        build_figure(
            vec![
                series("LR", Rgb(0x1f, 0x77, 0xb4), 0.9),
                series("SVM", Rgb(0xff, 0x7f, 0x0e), 0.8),
            ],
            false,
            None,
        )
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("a/b.svg")).unwrap(), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("fig.PNG")).unwrap(), ImageFormat::Png);
        assert_eq!(
            ImageFormat::from_path(Path::new("plots/figure1.pdf")).unwrap(),
            ImageFormat::Pdf
        );
        assert!(ImageFormat::from_path(Path::new("figure")).is_err());
        assert!(ImageFormat::from_path(Path::new("figure.gif")).is_err());
    }

    #[test]
    fn test_view_angles_from_default_eye() {
        let (yaw, pitch) = view_angles((1.0, 2.0, 0.4));
        assert!((yaw - 0.4636).abs() < 1e-3);
        assert!((pitch - 0.1770).abs() < 1e-3);
    }

    #[test]
    fn test_write_svg_draws_points() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.svg");
        write_image(&two_model_figure(), &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(!svg.is_empty());
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_write_png_has_layout_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        write_image(&two_model_figure(), &path).unwrap();

        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        let img = ::image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (600, 550));
    }

    #[test]
    fn test_write_pdf_to_default_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots").join("figure1.pdf");
        write_image(&two_model_figure(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_unsupported_extension_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("figure.gif");
        assert!(write_image(&two_model_figure(), &path).is_err());
        assert!(!path.exists());
    }
}
