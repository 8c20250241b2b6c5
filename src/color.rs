use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Rgb – renderer-neutral colour
// ---------------------------------------------------------------------------

/// An 8-bit sRGB colour shared by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb`.
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// `#rrggbb` form used by plotly.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colours the experiment notebooks have always used for the known models.
const MODEL_COLORS: [(&str, Rgb); 12] = [
    ("LR", Rgb::from_hex(0x636efa)),
    ("SVM", Rgb::from_hex(0xef553b)),
    ("KNN(1)", Rgb::from_hex(0x00cc96)),
    ("KNN(3)", Rgb::from_hex(0xab63fa)),
    ("KNN(5)", Rgb::from_hex(0xffa15a)),
    ("KNN(7)", Rgb::from_hex(0x19d3f3)),
    ("KNN(9)", Rgb::from_hex(0xff6692)),
    ("DT", Rgb::from_hex(0xb6e880)),
    ("ANN", Rgb::from_hex(0xff97ff)),
    ("RF", Rgb::from_hex(0xfecb52)),
    ("VF(hard)", Rgb::from_hex(0x66b100)),
    ("VF(soft)", Rgb::from_hex(0xefb03b)),
];

/// Fill colour of the decorative reference surfaces.
pub const SURFACE_COLOR: Rgb = Rgb::from_hex(0xaa9ce2);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: model name → Rgb
// ---------------------------------------------------------------------------

/// Maps model names to colours: fixed ones for known models, generated hues
/// for the rest.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Rgb>,
    default_color: Rgb,
}

impl ColorMap {
    pub fn new(models: &[String]) -> Self {
        let known = |m: &str| MODEL_COLORS.iter().find(|(name, _)| *name == m).map(|(_, c)| *c);

        let unknown: Vec<&String> = models.iter().filter(|m| known(m.as_str()).is_none()).collect();
        let mut generated = generate_palette(unknown.len()).into_iter();

        let mut mapping = BTreeMap::new();
        for model in models {
            let color = match known(model.as_str()) {
                Some(c) => c,
                None => generated.next().unwrap_or(Rgb(128, 128, 128)),
            };
            mapping.entry(model.clone()).or_insert(color);
        }

        ColorMap {
            mapping,
            default_color: Rgb(128, 128, 128),
        }
    }

    /// Look up the colour for a model.
    pub fn color_for(&self, model: &str) -> Rgb {
        self.mapping.get(model).copied().unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_models_keep_their_colours() {
        let cm = ColorMap::new(&["SVM".to_string(), "LR".to_string()]);
        assert_eq!(cm.color_for("LR").hex(), "#636efa");
        assert_eq!(cm.color_for("SVM").hex(), "#ef553b");
    }

    #[test]
    fn unknown_models_get_distinct_colours() {
        let models = vec!["foo".to_string(), "bar".to_string(), "LR".to_string()];
        let cm = ColorMap::new(&models);
        assert_ne!(cm.color_for("foo"), cm.color_for("bar"));
        assert_eq!(cm.color_for("LR"), Rgb::from_hex(0x636efa));
        assert_eq!(cm.color_for("missing"), Rgb(128, 128, 128));
    }

    #[test]
    fn palette_has_requested_size() {
        assert_eq!(generate_palette(5).len(), 5);
        assert!(generate_palette(0).is_empty());
    }
}
