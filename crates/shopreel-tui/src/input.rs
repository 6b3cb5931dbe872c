use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    NextItem,
    PrevItem,
    NextBanner,
    PrevBanner,
    GoToBanner(usize), // 1-9: zero-based slide index
    Reload,
    ToggleHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // Any key exits help
        return Action::ExitMode;
    }

    let binding = KeyBinding::new(key.code, key.modifiers);
    if let Some(action) = keymap.get(&binding) {
        return *action;
    }

    // Terminals report punctuation like '?' with SHIFT set
    if key.modifiers == KeyModifiers::SHIFT {
        if let KeyCode::Char(c) = key.code {
            if !c.is_ascii_alphabetic() {
                if let Some(action) = keymap.get(&KeyBinding::simple(key.code)) {
                    return *action;
                }
            }
        }
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::GoToBanner(c as usize - '1' as usize)
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shopreel_core::catalog::Catalog;
    use shopreel_core::AppConfig;

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), Catalog::sample()).unwrap()
    }

    #[test]
    fn test_default_bindings() {
        let app = app();
        let keymap = Keymap::default();

        let cases = [
            (KeyCode::Char('q'), Action::Quit),
            (KeyCode::Char(' '), Action::TogglePause),
            (KeyCode::Char('l'), Action::NextItem),
            (KeyCode::Char('h'), Action::PrevItem),
            (KeyCode::Right, Action::NextItem),
            (KeyCode::Down, Action::NextBanner),
            (KeyCode::Char('r'), Action::Reload),
            (KeyCode::Char('x'), Action::None),
        ];
        for (code, expected) in cases {
            assert_eq!(
                handle_key_event(press(code, KeyModifiers::NONE), &app, &keymap),
                expected,
                "{:?}",
                code
            );
        }
    }

    #[test]
    fn test_digits_select_banner() {
        let app = app();
        let keymap = Keymap::default();

        assert_eq!(
            handle_key_event(press(KeyCode::Char('1'), KeyModifiers::NONE), &app, &keymap),
            Action::GoToBanner(0)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('9'), KeyModifiers::NONE), &app, &keymap),
            Action::GoToBanner(8)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('0'), KeyModifiers::NONE), &app, &keymap),
            Action::None
        );
    }

    #[test]
    fn test_shifted_punctuation_matches() {
        let app = app();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(press(KeyCode::Char('?'), KeyModifiers::SHIFT), &app, &keymap),
            Action::ToggleHelp
        );
    }

    #[test]
    fn test_any_key_leaves_help() {
        let mut app = app();
        app.mode = Mode::Help;
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(press(KeyCode::Char('q'), KeyModifiers::NONE), &app, &keymap),
            Action::ExitMode
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let app = app();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL), &app, &keymap),
            Action::Quit
        );
    }
}
