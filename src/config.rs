use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::ColorScheme;
use crate::display::DisplayMode;
use crate::ui::ScreenKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub plot: PlotConfig,
    pub calculator: CalculatorConfig,
    pub nutrients: NutrientsConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    /// Screen shown at startup
    pub screen: ScreenKind,
    /// Input poll interval in milliseconds
    pub tick_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    pub color_scheme: ColorScheme,
    /// Space kept free around the terminal triangle, in braille dots
    pub padding: f32,
    pub show_grid: bool,
    /// Marker disc radius in braille dots
    pub marker_radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalculatorConfig {
    pub n: f32,
    pub p: f32,
    pub k: f32,
    pub step: f32,
    pub coarse_step: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NutrientsConfig {
    pub crop: String,
    pub stage: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub width: f32,
    pub height: f32,
    /// Space kept free around the triangle, in virtual pixels
    pub padding: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Terminal,
            screen: ScreenKind::Steiner,
            tick_ms: 250,
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Classic,
            padding: 4.0,
            show_grid: true,
            marker_radius: 2.0,
        }
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            n: 40.0,
            p: 30.0,
            k: 30.0,
            step: 1.0,
            coarse_step: 10.0,
        }
    }
}

impl Default for NutrientsConfig {
    fn default() -> Self {
        Self {
            crop: "Lettuce".to_string(),
            stage: None,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            padding: 16.0,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/steiner/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("steiner").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists.
    /// Returns None if the file doesn't exist, logs a warning on parse errors.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Warning: {:#}\nUsing defaults.", e);
                None
            }
        }
    }

    /// Write the config template to the XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        std::fs::write(&path, Self::generate_config_template())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# Steiner Configuration
# This file is auto-generated. Edit as needed.

[display]
# Display mode: "terminal" (interactive) or "report" (plain text)
mode = "terminal"
# Start screen: "steiner", "nutrients" or "recipe"
screen = "steiner"
# Input poll interval in milliseconds
tick_ms = 250

[plot]
# Color scheme: "classic", "spectrum", "fire", "ocean", "forest", "monochrome"
color_scheme = "classic"
# Space around the triangle in braille dots (two per column, four per row)
padding = 4.0
# Draw grid lines every 20%
show_grid = true
# Marker radius in braille dots
marker_radius = 2.0

[calculator]
# Starting N/P/K percentages
n = 40.0
p = 30.0
k = 30.0
# Slider steps for arrow keys and PageUp/PageDown
step = 1.0
coarse_step = 10.0

[nutrients]
# Crop and growth stage shown on the nutrient and recipe screens
crop = "Lettuce"
# stage = "Vegetative"

[report]
# Virtual drawing surface used by report mode
width = 300.0
height = 300.0
# Space around the triangle in virtual pixels
padding = 16.0
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(mode) = args.mode {
            self.display.mode = mode;
        }
        if let Some(screen) = args.screen {
            self.display.screen = screen;
        }

        if let Some(n) = args.n {
            self.calculator.n = n;
        }
        if let Some(p) = args.p {
            self.calculator.p = p;
        }
        if let Some(k) = args.k {
            self.calculator.k = k;
        }

        if let Some(ref colors) = args.colors {
            match colors.parse() {
                Ok(scheme) => self.plot.color_scheme = scheme,
                Err(e) => eprintln!("Warning: {}; keeping {}", e, self.plot.color_scheme.name()),
            }
        }
        if let Some(padding) = args.padding {
            self.plot.padding = padding;
            self.report.padding = padding;
        }
        if args.no_grid {
            self.plot.show_grid = false;
        }

        if let Some(ref crop) = args.crop {
            self.nutrients.crop = crop.clone();
            // A stage from the file belongs to the old crop
            self.nutrients.stage = None;
        }
        if let Some(ref stage) = args.stage {
            self.nutrients.stage = Some(stage.clone());
        }

        if let Some(width) = args.width {
            self.report.width = width;
        }
        if let Some(height) = args.height {
            self.report.height = height;
        }

        self.clamp_ranges();
    }

    /// Pull values that came from either the file or the CLI back into range.
    fn clamp_ranges(&mut self) {
        for padding in [&mut self.plot.padding, &mut self.report.padding] {
            if !padding.is_finite() || *padding < 0.0 {
                *padding = 0.0;
            }
        }
        self.plot.marker_radius = self.plot.marker_radius.max(0.0);
    }
}
