use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub type Rgb = (u8, u8, u8);

const OUTLINE_GRAY: Rgb = (105, 105, 105);
const MARKER_RED: Rgb = (230, 30, 30);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Gray outline with a red marker.
    #[default]
    Classic,
    Spectrum,
    Fire,
    Ocean,
    Forest,
    Monochrome,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "spectrum" => Ok(Self::Spectrum),
            "fire" => Ok(Self::Fire),
            "ocean" => Ok(Self::Ocean),
            "forest" => Ok(Self::Forest),
            "mono" | "monochrome" => Ok(Self::Monochrome),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

impl ColorScheme {
    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Classic => "classic",
            ColorScheme::Spectrum => "spectrum",
            ColorScheme::Fire => "fire",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Forest => "forest",
            ColorScheme::Monochrome => "monochrome",
        }
    }

    /// Colors of the N, P and K corners (vertex A, B, C).
    pub fn vertex_colors(&self) -> [Rgb; 3] {
        let hsl = |(h, s, l): (f32, f32, f32)| -> Rgb {
            let rgb: Srgb = Hsl::new(h, s, l).into_color();
            (
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        };

        match self {
            ColorScheme::Classic => [OUTLINE_GRAY; 3],
            // Nitrogen green, phosphorus orange, potassium violet
            ColorScheme::Spectrum => [
                hsl((120.0, 0.7, 0.5)),
                hsl((30.0, 0.9, 0.55)),
                hsl((270.0, 0.7, 0.6)),
            ],
            ColorScheme::Fire => [
                hsl((0.0, 0.95, 0.45)),
                hsl((30.0, 0.95, 0.5)),
                hsl((55.0, 0.95, 0.55)),
            ],
            ColorScheme::Ocean => [
                hsl((180.0, 0.8, 0.4)),
                hsl((210.0, 0.8, 0.5)),
                hsl((240.0, 0.7, 0.65)),
            ],
            ColorScheme::Forest => [
                hsl((80.0, 0.75, 0.35)),
                hsl((110.0, 0.6, 0.45)),
                hsl((140.0, 0.6, 0.55)),
            ],
            ColorScheme::Monochrome => [
                hsl((0.0, 0.0, 0.55)),
                hsl((0.0, 0.0, 0.7)),
                hsl((0.0, 0.0, 0.9)),
            ],
        }
    }

    /// Outline color at `t` (0.0 to 1.0) along the edge from vertex `from` to `to`.
    pub fn edge_color(&self, from: usize, to: usize, t: f32) -> Rgb {
        let colors = self.vertex_colors();
        lerp_color(colors[from % 3], colors[to % 3], t)
    }

    /// Marker color for a mix given as fractional A/B/C weights.
    pub fn marker_color(&self, weights: [f32; 3]) -> Rgb {
        match self {
            ColorScheme::Classic => MARKER_RED,
            ColorScheme::Monochrome => (255, 255, 255),
            _ => blend(&self.vertex_colors(), weights),
        }
    }

    pub fn grid_color(&self) -> Rgb {
        let [a, b, c] = self.vertex_colors();
        let mid = blend(&[a, b, c], [1.0 / 3.0; 3]);
        lerp_color(mid, (0, 0, 0), 0.6)
    }

    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Classic,
            ColorScheme::Spectrum,
            ColorScheme::Fire,
            ColorScheme::Ocean,
            ColorScheme::Forest,
            ColorScheme::Monochrome,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|c| c == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}

/// Interpolate between two colors
pub fn lerp_color(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    (
        (a.0 as f32 + (b.0 as f32 - a.0 as f32) * t) as u8,
        (a.1 as f32 + (b.1 as f32 - a.1 as f32) * t) as u8,
        (a.2 as f32 + (b.2 as f32 - a.2 as f32) * t) as u8,
    )
}

/// Weighted mix of three colors. Weights are clamped to be non-negative and
/// rescaled to sum to one; all-zero weights give an even mix.
pub fn blend(colors: &[Rgb; 3], weights: [f32; 3]) -> Rgb {
    let weights = weights.map(|w| if w.is_finite() { w.max(0.0) } else { 0.0 });
    let total: f32 = weights.iter().sum();
    let weights = if total > 0.0 {
        weights.map(|w| w / total)
    } else {
        [1.0 / 3.0; 3]
    };

    let channel = |pick: fn(&Rgb) -> u8| -> u8 {
        let value: f32 = colors
            .iter()
            .zip(weights)
            .map(|(c, w)| pick(c) as f32 * w)
            .sum();
        value.round().clamp(0.0, 255.0) as u8
    };

    (channel(|c| c.0), channel(|c| c.1), channel(|c| c.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_accepts_names_and_aliases() {
        assert_eq!("Spectrum".parse::<ColorScheme>(), Ok(ColorScheme::Spectrum));
        assert_eq!("mono".parse::<ColorScheme>(), Ok(ColorScheme::Monochrome));
        assert!("plaid".parse::<ColorScheme>().is_err());
        for scheme in ColorScheme::all() {
            assert_eq!(scheme.name().parse::<ColorScheme>(), Ok(*scheme));
        }
    }

    #[test]
    fn next_cycles_through_every_scheme() {
        let mut scheme = ColorScheme::Classic;
        for _ in 0..ColorScheme::all().len() {
            scheme = scheme.next();
        }
        assert_eq!(scheme, ColorScheme::Classic);
    }

    #[test]
    fn blend_with_pure_weight_returns_that_color() {
        let colors = [(255, 0, 0), (0, 255, 0), (0, 0, 255)];
        assert_eq!(blend(&colors, [1.0, 0.0, 0.0]), (255, 0, 0));
        assert_eq!(blend(&colors, [0.0, 0.0, 1.0]), (0, 0, 255));
        assert_eq!(blend(&colors, [0.5, 0.5, 0.0]), (128, 128, 0));
    }

    #[test]
    fn blend_tolerates_degenerate_weights() {
        let colors = [(90, 0, 0), (0, 90, 0), (0, 0, 90)];
        assert_eq!(blend(&colors, [0.0, 0.0, 0.0]), (30, 30, 30));
        assert_eq!(blend(&colors, [-1.0, 2.0, 0.0]), (0, 90, 0));
    }

    #[test]
    fn classic_scheme_keeps_red_marker() {
        assert_eq!(ColorScheme::Classic.marker_color([0.4, 0.3, 0.3]), MARKER_RED);
        assert_eq!(ColorScheme::Classic.edge_color(0, 1, 0.5), OUTLINE_GRAY);
    }

    #[test]
    fn edge_color_starts_at_source_vertex() {
        let scheme = ColorScheme::Spectrum;
        let colors = scheme.vertex_colors();
        assert_eq!(scheme.edge_color(1, 2, 0.0), colors[1]);
        assert_eq!(scheme.edge_color(1, 2, 1.0), colors[2]);
    }
}
