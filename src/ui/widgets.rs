use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const FILLED: char = '█';
const EMPTY: char = '░';

/// Text slider: `label  [█████░░░░░]  value`.
pub fn slider_line(
    label: String,
    value: f32,
    max: f32,
    width: usize,
    selected: bool,
    color: Color,
) -> Line<'static> {
    let ratio = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f32).round() as usize;
    let bar: String = std::iter::repeat(FILLED)
        .take(filled)
        .chain(std::iter::repeat(EMPTY).take(width.saturating_sub(filled)))
        .collect();

    let marker = if selected { "> " } else { "  " };
    let label_style = if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(label, label_style),
        Span::raw(" ["),
        Span::styled(bar, Style::default().fg(color)),
        Span::raw("]"),
    ])
}

/// `< value >` selector, highlighted when focused.
pub fn selector_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let value_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    Line::from(vec![
        Span::raw(format!("{:<8}", label)),
        Span::raw("< "),
        Span::styled(value.to_string(), value_style),
        Span::raw(" >"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn slider_fills_in_proportion() {
        let line = slider_line("N".into(), 40.0, 100.0, 10, false, Color::Green);
        assert_eq!(plain(&line), "  N [████░░░░░░]");
    }

    #[test]
    fn slider_clamps_overflow_and_zero_max() {
        let full = slider_line("K".into(), 250.0, 100.0, 4, true, Color::Green);
        assert_eq!(plain(&full), "> K [████]");
        let empty = slider_line("K".into(), 5.0, 0.0, 4, false, Color::Green);
        assert_eq!(plain(&empty), "  K [░░░░]");
    }

    #[test]
    fn selector_shows_value_between_arrows() {
        assert_eq!(plain(&selector_line("Crop", "Lettuce", true)), "Crop    < Lettuce >");
    }
}
