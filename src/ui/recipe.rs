use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use tracing::debug;

use super::widgets::slider_line;
use super::{AppState, Screen, ScreenKind};
use crate::nutrients::RangeStatus;

/// Fine and coarse steps as a fraction of each slider's range.
const FINE_FRACTION: f32 = 0.01;
const COARSE_FRACTION: f32 = 0.1;

pub struct RecipeScreen;

fn status_color(status: RangeStatus) -> Color {
    match status {
        RangeStatus::Within => Color::Green,
        RangeStatus::Below | RangeStatus::Above => Color::Red,
        RangeStatus::Unranged => Color::Gray,
    }
}

impl Screen for RecipeScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Recipe
    }

    fn title(&self) -> &'static str {
        "Recipe"
    }

    fn help(&self) -> &'static str {
        "[↑↓] nutrient [←→] adjust [PgUp/PgDn] coarse [r]eset"
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &AppState) {
        let recipe = &app.recipe;

        let lines: Vec<Line> = recipe
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let status = row.status();
                let mut line = slider_line(
                    format!(
                        "{:<18} {:>6.1} {}",
                        row.nutrient.name, row.value, row.nutrient.unit
                    ),
                    row.value,
                    row.max(),
                    16,
                    app.recipe_cursor == i,
                    status_color(status),
                );
                if let Some(range) = row.range {
                    line.spans.push(Span::raw(format!(
                        "  recommended {}-{} {}",
                        range.min, range.max, row.nutrient.unit
                    )));
                }
                line.spans.push(Span::styled(
                    format!(" {}", status.label()),
                    Style::default().fg(status_color(status)),
                ));
                line
            })
            .collect();

        let title = format!(" Recipe for {} ({}) ", recipe.crop(), recipe.stage());
        let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(panel, area);
    }

    fn handle_key(&self, app: &mut AppState, key: KeyEvent) {
        let count = app.recipe.rows().len();
        if count == 0 {
            return;
        }
        let cursor = app.recipe_cursor.min(count - 1);
        let max = app.recipe.rows()[cursor].max();

        let delta = match key.code {
            KeyCode::Up => {
                app.recipe_cursor = (cursor + count - 1) % count;
                return;
            }
            KeyCode::Down => {
                app.recipe_cursor = (cursor + 1) % count;
                return;
            }
            KeyCode::Char('r') => {
                app.recipe.reset();
                debug!("Recipe reset: {:?}", app.recipe.recipe());
                return;
            }
            KeyCode::Left => -max * FINE_FRACTION,
            KeyCode::Right => max * FINE_FRACTION,
            KeyCode::PageDown => -max * COARSE_FRACTION,
            KeyCode::PageUp => max * COARSE_FRACTION,
            _ => return,
        };

        if let Some(value) = app.recipe.adjust(cursor, delta) {
            let id = app.recipe.rows()[cursor].nutrient.id;
            debug!("{} = {:.2} ({:?})", id, value, app.recipe.status(id));
        }
    }
}
