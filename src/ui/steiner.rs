use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::plot::render_plot;
use super::widgets::slider_line;
use super::{AppState, Screen, ScreenKind};
use crate::config::CalculatorConfig;
use crate::geometry::{self, PercentageTriple};

const LABELS: [&str; 3] = ["N", "P", "K"];
const SLIDER_MAX: f32 = 100.0;

/// Slider state for the three fertilizer components.
///
/// The raw slider values are the only mutable input; the normalized mix is
/// recomputed from them whenever one changes.
#[derive(Debug, Clone)]
pub struct Calculator {
    values: [f32; 3],
    defaults: [f32; 3],
    normalized: PercentageTriple,
    pub selected: usize,
    step: f32,
    coarse_step: f32,
}

impl Calculator {
    pub fn new(config: &CalculatorConfig) -> Self {
        let defaults = [config.n, config.p, config.k].map(|v| v.clamp(0.0, SLIDER_MAX));
        Self {
            values: defaults,
            defaults,
            normalized: geometry::normalize(defaults[0], defaults[1], defaults[2]),
            selected: 0,
            step: config.step,
            coarse_step: config.coarse_step,
        }
    }

    pub fn values(&self) -> [f32; 3] {
        self.values
    }

    pub fn raw(&self) -> PercentageTriple {
        PercentageTriple::new(self.values[0], self.values[1], self.values[2])
    }

    pub fn normalized(&self) -> PercentageTriple {
        self.normalized
    }

    pub fn sum(&self) -> f32 {
        self.raw().sum()
    }

    /// True when the plot shows a rescaled mix rather than the raw sliders.
    pub fn needs_normalization(&self) -> bool {
        !self.raw().is_normalized()
    }

    pub fn set(&mut self, index: usize, value: f32) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value.clamp(0.0, SLIDER_MAX);
            let [a, b, c] = self.values;
            self.normalized = geometry::normalize(a, b, c);
        }
    }

    pub fn adjust(&mut self, delta: f32) {
        let index = self.selected;
        self.set(index, self.values[index] + delta);
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.values.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.values.len() - 1) % self.values.len();
    }

    pub fn reset(&mut self) {
        self.values = self.defaults;
        let [a, b, c] = self.values;
        self.normalized = geometry::normalize(a, b, c);
    }
}

pub struct SteinerScreen;

impl Screen for SteinerScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Steiner
    }

    fn title(&self) -> &'static str {
        "Steiner"
    }

    fn help(&self) -> &'static str {
        "[↑↓] select [←→] adjust [PgUp/PgDn] coarse [r]eset"
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &AppState) {
        let chunks = Layout::horizontal([Constraint::Min(20), Constraint::Length(48)]).split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Steiner triangle ");
        let plot_area = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let calculator = &app.calculator;
        let drawn = render_plot(
            frame.buffer_mut(),
            plot_area,
            &calculator.normalized(),
            &app.color_scheme,
            &app.plot,
        );
        if drawn.is_none() {
            frame.render_widget(
                Paragraph::new("Not enough room for the plot").style(Style::default().fg(Color::DarkGray)),
                plot_area,
            );
        }

        let colors = app.color_scheme.vertex_colors();
        let mut lines: Vec<Line> = Vec::new();
        for (i, value) in calculator.values().iter().enumerate() {
            let (r, g, b) = colors[i];
            lines.push(slider_line(
                format!("{}: {:>5.1}%", LABELS[i], value),
                *value,
                SLIDER_MAX,
                20,
                calculator.selected == i,
                Color::Rgb(r, g, b),
            ));
            lines.push(Line::default());
        }

        let n = calculator.normalized();
        lines.push(Line::from(format!(
            "Plotted: N {:.1} / P {:.1} / K {:.1}",
            n.a, n.b, n.c
        )));

        if calculator.needs_normalization() {
            lines.push(Line::default());
            lines.push(Line::styled(
                format!("Sum: {:.1}% (will be normalized on the plot)", calculator.sum()),
                Style::default().fg(Color::Red),
            ));
        }

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" N-P-K mix "),
        );
        frame.render_widget(panel, chunks[1]);
    }

    fn handle_key(&self, app: &mut AppState, key: KeyEvent) {
        let calculator = &mut app.calculator;
        match key.code {
            KeyCode::Up => calculator.select_prev(),
            KeyCode::Down => calculator.select_next(),
            KeyCode::Left => calculator.adjust(-calculator.step),
            KeyCode::Right => calculator.adjust(calculator.step),
            KeyCode::PageDown => calculator.adjust(-calculator.coarse_step),
            KeyCode::PageUp => calculator.adjust(calculator.coarse_step),
            KeyCode::Char('r') => calculator.reset(),
            _ => {}
        }
    }
}
