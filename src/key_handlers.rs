use crate::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const PAGE_LINES: u16 = 10;

pub fn handle_chat_input(key: KeyEvent, app: &mut App) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => app.send(),
        KeyCode::Backspace => app.controller.backspace(),
        KeyCode::PageUp => app.scroll_up(PAGE_LINES),
        KeyCode::PageDown => app.scroll_down(PAGE_LINES),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::Char(c) if ctrl => match c {
            'c' => app.should_quit = true,
            'n' => app.snippets.focus_next(),
            'p' => app.snippets.focus_previous(),
            'y' => app.copy_focused(),
            'u' => app.scroll_up(PAGE_LINES),
            'd' => app.scroll_down(PAGE_LINES),
            _ => {}
        },
        KeyCode::Char(c) if alt => {
            if let Some(num) = c.to_digit(10) {
                app.copy_numbered(num as usize);
            }
        }
        KeyCode::Char(c) => app.controller.push_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChatClient;
    use crate::app::AppEvent;
    use crate::config::Config;
    use crossterm::event::KeyEventState;
    use reqwest::Client;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn app() -> (App, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = ChatClient::new("http://127.0.0.1:1/chat", Client::new());
        (App::new(&Config::default(), client, tx), rx)
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        handle_chat_input(KeyEvent::new(code, modifiers), app);
    }

    #[test]
    fn test_typing_and_backspace_edit_the_input() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('h'), KeyModifiers::NONE);
        press(&mut app, KeyCode::Char('I'), KeyModifiers::SHIFT);
        press(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        press(&mut app, KeyCode::Backspace, KeyModifiers::NONE);

        assert_eq!(app.controller.input(), "hI");
    }

    #[test]
    fn test_enter_with_blank_input_does_nothing() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert!(app.controller.conversation().is_empty());
        assert!(!app.controller.is_busy());
    }

    #[test]
    fn test_release_events_are_ignored() {
        let (mut app, _rx) = app();
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_chat_input(release, &mut app);
        assert_eq!(app.controller.input(), "");
    }

    #[test]
    fn test_quit_keys() {
        let (mut ctrl_c, _rx) = app();
        press(&mut ctrl_c, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(ctrl_c.should_quit);
        assert_eq!(ctrl_c.controller.input(), "");

        let (mut esc, _rx2) = app();
        press(&mut esc, KeyCode::Esc, KeyModifiers::NONE);
        assert!(esc.should_quit);
    }

    #[test]
    fn test_scrolling_is_clamped_at_the_bottom() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::PageUp, KeyModifiers::NONE);
        assert_eq!(app.scroll_from_bottom, PAGE_LINES);
        press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        press(&mut app, KeyCode::PageDown, KeyModifiers::NONE);
        assert_eq!(app.scroll_from_bottom, 0);
    }
}
