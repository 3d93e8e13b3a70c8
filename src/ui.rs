// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;
pub mod input;

use crate::app::{App, AppEvent};
use crate::constants::UI_TICK_MS;
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Renders the whole screen.
pub fn draw(f: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(1),    // Messages
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    header::draw_header(f, chunks[0]);
    chat::draw_messages(f, chunks[1], app);
    input::draw_input(f, chunks[2], app);
    footer::draw_footer(f, chunks[3], app);
}

/// Sets up the terminal, runs the chat until the user quits, and restores
/// the terminal even when the loop fails.
pub async fn run_ui(
    app: App,
    events: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    spawn_input_reader(events);
    let res = run_app(&mut terminal, app, rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("UI loop failed: {}", err);
    }
    res
}

/// Main loop of the application.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut rx: UnboundedReceiver<AppEvent>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, &app))?;

        match rx.recv().await {
            Some(event) => app.handle_event(event),
            None => break,
        }

        if app.should_quit {
            info!("Quit requested");
            break;
        }
    }
    Ok(())
}

/// Reads terminal input on a blocking thread and emits a tick every
/// `UI_TICK_MS`. Stops once the UI loop has gone away.
fn spawn_input_reader(tx: UnboundedSender<AppEvent>) {
    tokio::task::spawn_blocking(move || {
        let tick_rate = Duration::from_millis(UI_TICK_MS);
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            match event::poll(timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if tx.send(AppEvent::Input(event)).is_err() {
                            return;
                        }
                    }
                    Err(e) => error!("Failed to read terminal event: {}", e),
                },
                Ok(false) => {}
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    return;
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });
}

/// Channel the UI loop and its background tasks talk over.
pub fn event_channel() -> (UnboundedSender<AppEvent>, UnboundedReceiver<AppEvent>) {
    mpsc::unbounded_channel()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChatClient;
    use crate::config::Config;
    use crate::models::Origin;
    use ratatui::backend::TestBackend;
    use reqwest::Client;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        let (tx, _rx) = event_channel();
        let client = ChatClient::new("http://127.0.0.1:1/chat", Client::new());
        App::new(&Config::default(), client, tx)
    }

    #[test]
    fn test_idle_screen_shows_title_placeholder_and_send() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Nexa AI"));
        assert!(text.contains("Ask anything..."));
        assert!(text.contains("Send"));
    }

    #[test]
    fn test_very_long_input_scrolls_instead_of_overflowing() {
        let mut app = app();
        app.controller.set_input("a".repeat(65534));

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains(&"a".repeat(40)));
        assert!(!text.contains("Ask anything..."));
    }

    #[test]
    fn test_huge_conversation_scrolls_near_the_end() {
        let mut app = app();
        let text = (0..70_000)
            .map(|i| format!("row{}", i))
            .collect::<Vec<_>>()
            .join("\n");
        app.controller.set_input(text);
        app.controller.submit().unwrap();

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("row655"));
        assert!(!text.contains("row44"));
    }

    #[test]
    fn test_conversation_is_drawn() {
        let mut app = app();
        app.controller.set_input("ping");
        app.controller.submit().unwrap();
        app.controller.on_reply(Err(crate::errors::NexaError::api_error("down")));
        assert_eq!(app.controller.conversation().last().unwrap().origin, Origin::Assistant);

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("ping"));
        assert!(text.contains("Server Error. Try again later."));
    }
}
