use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::figure::{AxisSpec, Figure};

// ---------------------------------------------------------------------------
// Plotly trace schema
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct Marker {
    color: String,
    size: u32,
}

/// The subset of plotly.js trace attributes the figure uses.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum Trace<'a> {
    #[serde(rename = "scatter3d")]
    Scatter3d {
        name: &'a str,
        x: &'a [f64],
        y: &'a [f64],
        z: &'a [f64],
        mode: &'static str,
        marker: Marker,
        visible: bool,
    },
    #[serde(rename = "surface")]
    Surface {
        x: &'a [f64],
        y: &'a [f64],
        z: &'a [Vec<f64>],
        colorscale: Vec<(f64, String)>,
        showscale: bool,
        opacity: f64,
        hoverinfo: &'static str,
    },
}

fn traces(figure: &Figure) -> Vec<Trace<'_>> {
    let scatter = figure.series.iter().map(|s| Trace::Scatter3d {
        name: &s.name,
        x: &s.malicious,
        y: &s.dataset_len,
        z: &s.mcc,
        mode: "markers",
        marker: Marker {
            color: s.color.hex(),
            size: 5,
        },
        visible: s.visible,
    });
    let surfaces = figure.surfaces.iter().map(|surface| Trace::Surface {
        x: &surface.x,
        y: &surface.y,
        z: &surface.z,
        colorscale: vec![(0.0, surface.color.hex()), (1.0, surface.color.hex())],
        showscale: false,
        opacity: surface.opacity,
        hoverinfo: "skip",
    });
    scatter.chain(surfaces).collect()
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

fn axis(spec: &AxisSpec) -> JsonValue {
    let mut axis = json!({
        "title": { "text": spec.title },
        "range": [spec.range.0, spec.range.1],
    });
    if let Some(dtick) = spec.dtick {
        axis["dtick"] = json!(dtick);
    }
    axis
}

/// One restyle button per model plus a leading "All".
///
/// Every button sets `visible` for every trace; surfaces stay on.
fn buttons(figure: &Figure) -> Vec<JsonValue> {
    let n_surfaces = figure.surfaces.len();
    let visibility = |only: Option<usize>| -> Vec<bool> {
        (0..figure.series.len())
            .map(|i| only.map_or(true, |o| o == i))
            .chain(std::iter::repeat(true).take(n_surfaces))
            .collect()
    };
    let button = |label: &str, only: Option<usize>| {
        json!({
            "label": label,
            "method": "restyle",
            "args": [{ "visible": visibility(only), "showlegend": true }],
        })
    };

    std::iter::once(button("All", None))
        .chain(
            figure
                .series
                .iter()
                .enumerate()
                .map(|(i, s)| button(&s.name, Some(i))),
        )
        .collect()
}

fn layout(figure: &Figure) -> JsonValue {
    let l = &figure.layout;
    json!({
        "scene": {
            "xaxis": axis(&l.x),
            "yaxis": axis(&l.y),
            "zaxis": axis(&l.z),
            "camera": {
                "center": { "x": 0, "y": 0, "z": 0 },
                "eye": { "x": l.eye.0, "y": l.eye.1, "z": l.eye.2 },
            },
            "aspectmode": "cube",
        },
        "width": l.width,
        "height": l.height,
        "margin": { "t": 0, "b": 0, "l": 0, "r": 0 },
        "updatemenus": [{
            "active": 0,
            "buttons": buttons(figure),
            "x": 0.1,
            "xanchor": "left",
            "y": 1.1,
            "yanchor": "top",
        }],
    })
}

// ---------------------------------------------------------------------------
// Fragment
// ---------------------------------------------------------------------------

/// JSON safe to inline in a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Build the `<div>` + `<script>` fragment.  plotly.js itself is not included;
/// the embedding page must load it.
pub fn fragment(figure: &Figure, div_id: &str) -> Result<String> {
    let data = script_json(&traces(figure)).context("serializing traces")?;
    let layout = script_json(&layout(figure)).context("serializing layout")?;
    let (w, h) = (figure.layout.width, figure.layout.height);

    Ok(format!(
        r#"<div>
    <div id="{div_id}" class="plotly-graph-div" style="height:{h}px; width:{w}px;"></div>
    <script type="text/javascript">
        window.PLOTLYENV = window.PLOTLYENV || {{}};
        if (document.getElementById("{div_id}")) {{
            Plotly.newPlot("{div_id}", {data}, {layout}, {{"responsive": true}});
        }}
    </script>
</div>
"#
    ))
}

/// Element id derived from the output file name.
fn div_id(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("figure");
    let cleaned: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    format!("mcc-{cleaned}")
}

/// Write the HTML fragment to `path`.
pub fn write_html(figure: &Figure, path: &Path) -> Result<()> {
    let html = fragment(figure, &div_id(path))?;
    super::ensure_parent_dir(path)
        .with_context(|| format!("creating directory for {}", path.display()))?;
    std::fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote HTML fragment to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::data::Series;
    use crate::figure::{build_figure, BreakingPoint};

    fn series(name: &str) -> Series {
        Series {
            name: name.into(),
            malicious: vec![0.0, 0.25],
            dataset_len: vec![0.5, 0.5],
            mcc: vec![0.9, 0.4],
            color: Rgb::from_hex(0x636efa),
            visible: true,
        }
    }

    fn extract_call_args(html: &str) -> (JsonValue, JsonValue) {
        let start = html.find("Plotly.newPlot(").unwrap() + "Plotly.newPlot(".len();
        let end = html.rfind(", {\"responsive\"").unwrap();
        let args: JsonValue = serde_json::from_str(&format!("[{}]", &html[start..end])).unwrap();
        (args[1].clone(), args[2].clone())
    }

    #[test]
    fn test_fragment_has_one_trace_per_series_and_surface() {
        let fig = build_figure(vec![series("LR"), series("<b>x</b>")], false, None);
        let html = fragment(&fig, "mcc-test").unwrap();

        assert!(html.contains(r#"id="mcc-test""#));
        assert!(!html.contains("<script src"), "plotly.js must not be inlined");
        assert!(!html.contains("</b>"), "closing tags inside JSON must be escaped");

        let (data, layout) = extract_call_args(&html);
        let data = data.as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0]["type"], "scatter3d");
        assert_eq!(data[0]["marker"]["color"], "#636efa");
        assert_eq!(data[1]["name"], "<b>x</b>");
        assert_eq!(data[2]["type"], "surface");
        assert_eq!(data[2]["showscale"], false);

        assert_eq!(layout["scene"]["aspectmode"], "cube");
        assert_eq!(layout["scene"]["camera"]["eye"]["y"], 2.0);
        assert_eq!(layout["scene"]["xaxis"]["dtick"], 0.2);
    }

    #[test]
    fn test_buttons_show_only_one_model() {
        let fig = build_figure(vec![series("A"), series("B")], false, None);
        let b = buttons(&fig);

        assert_eq!(b.len(), 3);
        assert_eq!(b[0]["label"], "All");
        assert_eq!(b[0]["args"][0]["visible"], json!([true, true, true]));
        assert_eq!(b[2]["label"], "B");
        assert_eq!(b[2]["args"][0]["visible"], json!([false, true, true]));
    }

    #[test]
    fn test_single_model_walls_stay_visible() {
        let bp = BreakingPoint { malicious: 0.3, dataset_len: 0.6 };
        let fig = build_figure(vec![series("A")], false, Some(bp));
        let b = buttons(&fig);
        assert_eq!(b[1]["args"][0]["visible"], json!([true, true, true]));
    }

    #[test]
    fn test_write_html_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots").join("figure 1.html");
        let fig = build_figure(vec![series("A")], false, None);

        write_html(&fig, &path).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains(r#"id="mcc-figure-1""#));
    }
}
