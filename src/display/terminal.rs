use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::nutrients::Selection;
use crate::ui::AppState;

pub async fn run(config: Config, selection: Selection) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config, selection).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
    selection: Selection,
) -> Result<()> {
    let mut app = AppState::new(&config, selection);
    let tick = Duration::from_millis(config.display.tick_ms.max(10));

    info!(
        "Interactive session: {} / {}, start screen {:?}",
        selection.crop, selection.stage, config.display.screen
    );

    while app.running {
        terminal.draw(|frame| app.render(frame))?;

        // Redraw on resize or timeout; only key presses change state
        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Resize(w, h) => debug!("Resized to {}x{}", w, h),
                _ => {}
            }
        }
    }

    info!("Session ended");
    Ok(())
}
