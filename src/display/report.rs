//! Non-interactive text output for scripts and quick checks.

use anyhow::Result;
use std::fmt::Write;

use crate::config::Config;
use crate::geometry::{self, Point2D, FALLBACK};
use crate::nutrients::{self, Selection};

pub fn run(config: &Config, selection: Selection) -> Result<()> {
    print!("{}", build_report(config, selection)?);
    Ok(())
}

fn fmt_point(p: Point2D) -> String {
    format!("({:.2}, {:.2})", p.x, p.y)
}

/// Render the calculator and recommendation summary as plain text.
pub fn build_report(config: &Config, selection: Selection) -> Result<String> {
    let calc = &config.calculator;
    let raw = geometry::PercentageTriple::new(calc.n, calc.p, calc.k);
    let normalized = geometry::normalize(calc.n, calc.p, calc.k);
    let surface = &config.report;
    let padding = surface.padding;

    let mut out = String::new();
    writeln!(out, "N-P-K mix")?;
    writeln!(
        out,
        "  input:      N {:.3}  P {:.3}  K {:.3}  (sum {:.3})",
        raw.a,
        raw.b,
        raw.c,
        raw.sum()
    )?;
    writeln!(
        out,
        "  normalized: N {:.3}  P {:.3}  K {:.3}",
        normalized.a, normalized.b, normalized.c
    )?;
    if raw.sum() <= 0.0 && normalized == FALLBACK {
        writeln!(out, "  (no usable input, plotted as an even split)")?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Steiner triangle on {}x{} surface, padding {}",
        surface.width, surface.height, padding
    )?;
    match geometry::layout(surface.width, surface.height, padding) {
        Some(vertices) => {
            writeln!(out, "  vertex N: {}", fmt_point(vertices.a))?;
            writeln!(out, "  vertex P: {}", fmt_point(vertices.b))?;
            writeln!(out, "  vertex K: {}", fmt_point(vertices.c))?;
            writeln!(out, "  side:     {:.2}", vertices.side_length())?;
            writeln!(out, "  marker:   {}", fmt_point(vertices.point_for(&normalized)))?;
        }
        None => writeln!(out, "  no layout possible")?,
    }

    writeln!(out)?;
    writeln!(out, "Recommended ranges: {} / {}", selection.crop, selection.stage)?;
    let ranges = nutrients::ranges(selection.crop, selection.stage);
    if ranges.is_empty() {
        writeln!(out, "  none")?;
    }
    for range in ranges {
        let (name, unit) = nutrients::nutrient(range.nutrient_id)
            .map(|n| (n.name, n.unit))
            .unwrap_or((range.nutrient_id, ""));
        writeln!(
            out,
            "  {:<3} {:<20} {:>7.1} - {:<7.1} {}",
            range.nutrient_id, name, range.min, range.max, unit
        )?;
    }

    Ok(out)
}
