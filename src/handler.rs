use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use crate::app::{App, InputMode, Screen};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Fetched(fetched) => app.apply(fetched),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.show_help {
        // Any key dismisses the help overlay
        app.show_help = false;
        return;
    }

    if app.selection.is_open() {
        handle_modal(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_modal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Left => {
            app.close_modal();
        }
        // Selecting the open chapter again closes it
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_down();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_up();
        }
        KeyCode::Char('g') => app.modal_scroll = 0,
        KeyCode::Char('G') => app.scroll_to_bottom(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),
        KeyCode::Char('g') => app.nav_first(),
        KeyCode::Char('G') => app.nav_last(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.open_selected(),

        KeyCode::Tab => {
            let next = match app.screen {
                Screen::Chapters => Screen::Search,
                Screen::Search => Screen::Chapters,
            };
            app.switch_screen(next);
        }
        KeyCode::Char('/') | KeyCode::Char('i') => {
            app.switch_screen(Screen::Search);
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('r') if app.screen == Screen::Chapters && !app.chapters_loading => {
            app.load_chapters();
        }
        KeyCode::Esc if app.screen == Screen::Search => {
            app.clear_search();
            app.input_mode = InputMode::Editing;
        }
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            if !app.searching {
                app.submit_search();
            }
        }
        KeyCode::Backspace => {
            if app.search_cursor > 0 {
                app.search_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.search_input, app.search_cursor);
                app.search_input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.search_input.chars().count();
            if app.search_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.search_input, app.search_cursor);
                app.search_input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.search_cursor = app.search_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.search_input.chars().count();
            app.search_cursor = (app.search_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.search_cursor = 0;
        }
        KeyCode::End => {
            app.search_cursor = app.search_input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.search_input, app.search_cursor);
            app.search_input.insert(byte_pos, c);
            app.search_cursor += 1;
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let open = app.selection.is_open();
    match mouse.kind {
        MouseEventKind::ScrollDown if open => {
            for _ in 0..3 {
                app.scroll_down();
            }
        }
        MouseEventKind::ScrollUp if open => {
            for _ in 0..3 {
                app.scroll_up();
            }
        }
        MouseEventKind::ScrollDown => app.nav_down(),
        MouseEventKind::ScrollUp => app.nav_up(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tokio::sync::mpsc;

    fn press(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn test_app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(&Config::new(), tx)
    }

    #[test]
    fn test_char_to_byte_index_multibyte() {
        let s = "سلام";
        assert_eq!(char_to_byte_index(s, 0), 0);
        assert_eq!(char_to_byte_index(s, 1), 2);
        assert_eq!(char_to_byte_index(s, 10), s.len());
    }

    #[test]
    fn test_typing_edits_at_cursor() {
        let mut app = test_app();
        app.input_mode = InputMode::Editing;
        for c in "sd".chars() {
            handle_event(&mut app, press(KeyCode::Char(c)));
        }
        handle_event(&mut app, press(KeyCode::Left));
        handle_event(&mut app, press(KeyCode::Char('a')));
        assert_eq!(app.search_input, "sad");

        handle_event(&mut app, press(KeyCode::End));
        handle_event(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.search_input, "sa");
        assert_eq!(app.search_cursor, 2);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        handle_event(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = test_app();
        app.input_mode = InputMode::Editing;
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        handle_event(&mut app, AppEvent::Key(ctrl_c));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_toggles_and_any_key_dismisses() {
        let mut app = test_app();
        handle_event(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_event(&mut app, press(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_help_opens_over_modal_and_keeps_it_open() {
        let mut app = test_app();
        app.selection.toggle(2);

        handle_event(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);
        assert!(app.selection.is_open());

        handle_event(&mut app, press(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(app.selection.is_open());
    }

    #[test]
    fn test_modal_bottom_key_uses_rendered_rows() {
        let mut app = test_app();
        app.selection.toggle(2);
        app.modal_lines = 40;
        app.modal_height = 13;

        handle_event(&mut app, press(KeyCode::Char('G')));
        assert_eq!(app.modal_scroll, 27);
        handle_event(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.modal_scroll, 27);
        handle_event(&mut app, press(KeyCode::Char('g')));
        assert_eq!(app.modal_scroll, 0);
    }

    #[test]
    fn test_tab_switches_screens() {
        let mut app = test_app();
        handle_event(&mut app, press(KeyCode::Tab));
        assert_eq!(app.screen, Screen::Search);
        assert_eq!(app.input_mode, InputMode::Editing);

        handle_event(&mut app, press(KeyCode::Esc));
        handle_event(&mut app, press(KeyCode::Tab));
        assert_eq!(app.screen, Screen::Chapters);
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
