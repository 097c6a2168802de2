use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use super::widgets::selector_line;
use super::{AppState, Screen, ScreenKind};
use crate::nutrients::{self, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorField {
    Crop,
    Stage,
}

/// Crop and stage dropdowns. Stage options depend on the crop, so changing
/// the crop falls back to that crop's first stage.
#[derive(Debug, Clone)]
pub struct CropSelection {
    crop: usize,
    stage: usize,
    initial: Selection,
    pub focus: SelectorField,
}

impl CropSelection {
    pub fn new(initial: Selection) -> Self {
        let mut selection = Self {
            crop: 0,
            stage: 0,
            initial,
            focus: SelectorField::Crop,
        };
        selection.select(initial);
        selection
    }

    fn select(&mut self, target: Selection) {
        self.crop = nutrients::crops()
            .iter()
            .position(|c| *c == target.crop)
            .unwrap_or(0);
        self.stage = nutrients::stages(self.crop())
            .iter()
            .position(|s| *s == target.stage)
            .unwrap_or(0);
    }

    pub fn crop(&self) -> &'static str {
        nutrients::crops().get(self.crop).copied().unwrap_or_default()
    }

    pub fn stage(&self) -> &'static str {
        nutrients::stages(self.crop())
            .get(self.stage)
            .copied()
            .unwrap_or_default()
    }

    pub fn selection(&self) -> Selection {
        Selection {
            crop: self.crop(),
            stage: self.stage(),
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            SelectorField::Crop => SelectorField::Stage,
            SelectorField::Stage => SelectorField::Crop,
        };
    }

    /// Move the focused dropdown to its next (or previous) option, wrapping.
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            SelectorField::Crop => {
                let count = nutrients::crops().len();
                self.crop = step(self.crop, count, forward);
                self.stage = 0;
            }
            SelectorField::Stage => {
                let count = nutrients::stages(self.crop()).len();
                self.stage = step(self.stage, count, forward);
            }
        }
    }

    pub fn reset(&mut self) {
        self.select(self.initial);
        self.focus = SelectorField::Crop;
    }
}

fn step(index: usize, count: usize, forward: bool) -> usize {
    if count == 0 {
        return 0;
    }
    if forward {
        (index + 1) % count
    } else {
        (index + count - 1) % count
    }
}

pub struct RecommendationsScreen;

impl Screen for RecommendationsScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Nutrients
    }

    fn title(&self) -> &'static str {
        "Nutrients"
    }

    fn help(&self) -> &'static str {
        "[↑↓] field [←→] choose [r]eset"
    }

    fn render(&self, frame: &mut Frame, area: Rect, app: &AppState) {
        let chunks = Layout::vertical([Constraint::Length(4), Constraint::Min(3)]).split(area);
        let selection = &app.selection;

        let selectors = Paragraph::new(vec![
            selector_line("Crop", selection.crop(), selection.focus == SelectorField::Crop),
            selector_line("Stage", selection.stage(), selection.focus == SelectorField::Stage),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Selection "));
        frame.render_widget(selectors, chunks[0]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Recommended ranges ");

        let ranges = nutrients::ranges(selection.crop(), selection.stage());
        if ranges.is_empty() {
            frame.render_widget(
                Paragraph::new("No recommended ranges for this crop and stage").block(block),
                chunks[1],
            );
            return;
        }

        let rows = ranges.iter().map(|r| {
            let (name, unit) = nutrients::nutrient(r.nutrient_id)
                .map(|n| (n.name, n.unit))
                .unwrap_or((r.nutrient_id, ""));
            Row::new(vec![
                r.nutrient_id.to_string(),
                name.to_string(),
                format!("{:.1}", r.min),
                format!("{:.1}", r.max),
                unit.to_string(),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(20),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec!["", "Nutrient", "Min", "Max", "Unit"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(block);
        frame.render_widget(table, chunks[1]);
    }

    fn handle_key(&self, app: &mut AppState, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Down => app.selection.toggle_focus(),
            KeyCode::Left => app.selection.cycle(false),
            KeyCode::Right => app.selection.cycle(true),
            KeyCode::Char('r') => app.selection.reset(),
            _ => return,
        }
        app.sync_recipe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tests::{draw, new_app};
    use crossterm::event::KeyModifiers;

    fn press(app: &mut AppState, code: KeyCode) {
        RecommendationsScreen.handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn lettuce() -> Selection {
        Selection {
            crop: "Lettuce",
            stage: "Vegetative",
        }
    }

    #[test]
    fn selection_starts_at_initial_values() {
        let selection = CropSelection::new(Selection {
            crop: "Tomato",
            stage: "Flowering",
        });
        assert_eq!(selection.crop(), "Tomato");
        assert_eq!(selection.stage(), "Flowering");
    }

    #[test]
    fn changing_crop_resets_stage() {
        let mut selection = CropSelection::new(lettuce());
        selection.cycle(true);
        assert_eq!(
            selection.selection(),
            Selection {
                crop: "Tomato",
                stage: "Flowering"
            }
        );
        selection.cycle(true);
        assert_eq!(selection.crop(), "Lettuce");
        selection.reset();
        assert_eq!(selection.selection(), lettuce());
    }

    #[test]
    fn stage_cycle_stays_within_crop() {
        let mut selection = CropSelection::new(lettuce());
        selection.toggle_focus();
        selection.cycle(false);
        assert_eq!(selection.selection(), lettuce());
    }

    #[test]
    fn switching_crop_rebuilds_recipe() {
        let mut app = new_app();
        assert_eq!(app.recipe.crop(), "Lettuce");
        press(&mut app, KeyCode::Right);
        assert_eq!(app.recipe.crop(), "Tomato");
        assert_eq!(app.recipe.row("K").map(|r| r.value), Some(150.0));
    }

    #[test]
    fn render_lists_ranges_for_selection() {
        let mut app = new_app();
        app.show(1);
        let screen = draw(&app, 100, 24).join("\n");
        assert!(screen.contains("Lettuce"));
        assert!(screen.contains("Nitrogen"));
        assert!(screen.contains("100.0"));
        assert!(screen.contains("Sulfur"));

        press(&mut app, KeyCode::Right);
        let screen = draw(&app, 100, 24).join("\n");
        assert!(screen.contains("Iron"));
        assert!(screen.contains("250.0"));
        assert!(!screen.contains("Sulfur"));
    }
}
