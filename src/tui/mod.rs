pub mod app;
pub mod event;
pub mod layout;
pub mod sink;
pub mod theme;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{AppContext, Result};
use crate::config::Config;

use self::app::{InputMode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let coordinator = ctx.coordinator(tx);

    let mut app = TuiApp::new(config.theme(), config.language()?);
    let sources = config.sources()?;
    let events = EventHandler::new(Duration::from_millis(100));

    // Kick off the first cycle immediately; results stream in as they land.
    coordinator.start_cycle(sources.clone(), app.language);

    loop {
        terminal.draw(|frame| layout::render(frame, &app))?;

        // Drain everything the workers produced since the last iteration.
        // Generation filtering happens inside apply.
        while let Ok(msg) = rx.try_recv() {
            app.apply(msg);
        }

        match events.next()? {
            AppEvent::Key(key) => {
                if app.input_mode == InputMode::Search {
                    match key.code {
                        KeyCode::Enter => {
                            app.input_mode = InputMode::Normal;
                            coordinator.start_search(&app.search_input, app.language);
                        }
                        KeyCode::Esc => {
                            app.input_mode = InputMode::Normal;
                            app.search_input.clear();
                        }
                        KeyCode::Backspace => {
                            app.search_input.pop();
                        }
                        KeyCode::Char(c) => {
                            app.search_input.push(c);
                        }
                        _ => {}
                    }
                } else {
                    match Action::from(key) {
                        Action::Quit => app.should_quit = true,
                        Action::ScrollUp => app.scroll_up(1),
                        Action::ScrollDown => app.scroll_down(1),
                        Action::PageUp => app.scroll_up(10),
                        Action::PageDown => app.scroll_down(10),
                        Action::Refresh => {
                            coordinator.start_cycle(sources.clone(), app.language);
                        }
                        Action::ToggleTheme => app.toggle_theme(),
                        Action::CycleLanguage => {
                            // Re-drive the display path so translations are
                            // re-requested for the new language.
                            app.cycle_language();
                            coordinator.start_search(&app.search_input, app.language);
                        }
                        Action::EnterSearch => app.input_mode = InputMode::Search,
                        Action::ClearSearch => {
                            if !app.search_input.is_empty() {
                                app.search_input.clear();
                                coordinator.start_search("", app.language);
                            }
                        }
                        Action::None => {}
                    }
                }
            }
            AppEvent::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
