mod braille;
mod plot;
mod recipe;
mod recommendations;
mod steiner;
mod widgets;

use recipe::RecipeScreen;
use recommendations::{CropSelection, RecommendationsScreen};
use steiner::{Calculator, SteinerScreen};

use clap::ValueEnum;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Tabs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::color::ColorScheme;
use crate::config::{Config, PlotConfig};
use crate::nutrients::{RecipeEditor, Selection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScreenKind {
    /// N-P-K calculator with the Steiner triangle
    #[default]
    Steiner,
    /// Recommended ranges per crop and stage
    Nutrients,
    /// Per-nutrient recipe editor
    Recipe,
}

/// One page of the application.
pub trait Screen: Sync {
    fn kind(&self) -> ScreenKind;

    fn title(&self) -> &'static str;

    /// Screen-specific key hints for the status bar
    fn help(&self) -> &'static str;

    fn render(&self, frame: &mut Frame, area: Rect, app: &AppState);

    fn handle_key(&self, app: &mut AppState, key: KeyEvent);
}

pub static SCREENS: &[&dyn Screen] = &[&SteinerScreen, &RecommendationsScreen, &RecipeScreen];

/// Everything the interface can change. Screens read it to render and
/// mutate it from key handlers; derived values (normalized mix, recipe
/// rows) are refreshed at the point of change.
pub struct AppState {
    pub calculator: Calculator,
    pub selection: CropSelection,
    pub recipe: RecipeEditor,
    pub recipe_cursor: usize,
    pub color_scheme: ColorScheme,
    pub plot: PlotConfig,
    pub current: usize,
    pub running: bool,
}

impl AppState {
    pub fn new(config: &Config, selection: Selection) -> Self {
        let current = SCREENS
            .iter()
            .position(|s| s.kind() == config.display.screen)
            .unwrap_or(0);

        Self {
            calculator: Calculator::new(&config.calculator),
            selection: CropSelection::new(selection),
            recipe: RecipeEditor::new(selection.crop, selection.stage),
            recipe_cursor: 0,
            color_scheme: config.plot.color_scheme,
            plot: config.plot.clone(),
            current,
            running: true,
        }
    }

    pub fn current_screen(&self) -> &'static dyn Screen {
        SCREENS[self.current]
    }

    pub fn show(&mut self, index: usize) {
        if index < SCREENS.len() {
            self.current = index;
        }
    }

    pub fn next_screen(&mut self) {
        self.current = (self.current + 1) % SCREENS.len();
    }

    pub fn prev_screen(&mut self) {
        self.current = (self.current + SCREENS.len() - 1) % SCREENS.len();
    }

    /// Rebuild the recipe editor when the crop or stage changed.
    pub fn sync_recipe(&mut self) {
        let selection = self.selection.selection();
        if self.recipe.crop() != selection.crop || self.recipe.stage() != selection.stage {
            info!("Selected {} / {}", selection.crop, selection.stage);
            self.recipe = RecipeEditor::new(selection.crop, selection.stage);
            self.recipe_cursor = 0;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.running = false;
            }
            (KeyCode::Tab, _) => self.next_screen(),
            (KeyCode::BackTab, _) => self.prev_screen(),
            (KeyCode::Char(c @ '1'..='9'), _) => self.show(c as usize - '1' as usize),
            (KeyCode::Char('c'), _) => {
                self.color_scheme = self.color_scheme.next();
                debug!("Color scheme: {}", self.color_scheme.name());
            }
            (KeyCode::Char('g'), _) => self.plot.show_grid = !self.plot.show_grid,
            _ => self.current_screen().handle_key(self, key),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

        let tabs = Tabs::new(
            SCREENS
                .iter()
                .enumerate()
                .map(|(i, s)| format!("{} {}", i + 1, s.title())),
        )
        .select(self.current)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, chunks[0]);

        self.current_screen().render(frame, chunks[1], self);

        render_status(frame.buffer_mut(), chunks[2], self);
    }
}

fn render_status(buf: &mut Buffer, area: Rect, app: &AppState) {
    let status = format!(
        " [Tab] screen | {} | [c]olor: {} | [g]rid | [q]uit ",
        app.current_screen().help(),
        app.color_scheme.name()
    );

    for (i, ch) in status.chars().enumerate() {
        if i >= area.width as usize {
            break;
        }
        if let Some(cell) = buf.cell_mut((area.x + i as u16, area.y)) {
            cell.set_char(ch);
            cell.set_fg(Color::DarkGray);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrients;
    use ratatui::backend::TestBackend;

    pub(super) fn new_app() -> AppState {
        let selection = nutrients::resolve("Lettuce", None).expect("known crop");
        AppState::new(&Config::default(), selection)
    }

    fn press(app: &mut AppState, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    pub(super) fn draw(app: &AppState, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test backend");
        terminal.draw(|frame| app.render(frame)).expect("draw");
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    #[test]
    fn starts_on_configured_screen() {
        let mut config = Config::default();
        config.display.screen = ScreenKind::Recipe;
        let selection = nutrients::resolve("Lettuce", None).expect("known crop");
        let app = AppState::new(&config, selection);
        assert_eq!(app.current_screen().kind(), ScreenKind::Recipe);
    }

    #[test]
    fn tab_keys_cycle_and_digits_jump() {
        let mut app = new_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_screen().kind(), ScreenKind::Nutrients);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_screen().kind(), ScreenKind::Recipe);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.current_screen().kind(), ScreenKind::Steiner);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.current_screen().kind(), ScreenKind::Steiner);
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        let mut app = new_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);

        let mut app = new_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn global_keys_toggle_colors_and_grid() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.color_scheme, ColorScheme::Spectrum);
        assert!(app.running);
        press(&mut app, KeyCode::Char('g'));
        assert!(!app.plot.show_grid);
    }

    #[test]
    fn render_shows_tabs_and_status_bar() {
        let app = new_app();
        let rows = draw(&app, 140, 30);
        assert!(rows[0].contains("1 Steiner"));
        assert!(rows[0].contains("3 Recipe"));
        assert!(rows[29].contains("[q]uit"));
        assert!(rows[29].contains("classic"));
    }
}
