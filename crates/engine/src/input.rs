//! Terminal events the frame loop reacts to.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Quit,
    Resize { width: u16, height: u16 },
}

/// `q`, `Esc`, or `Ctrl-C`.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Map a terminal event to something the loop handles; everything else is ignored.
pub fn classify(event: Event) -> Option<EngineEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press && should_quit(key) => {
            Some(EngineEvent::Quit)
        }
        Event::Resize(width, height) => Some(EngineEvent::Resize { width, height }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Left)));
    }

    #[test]
    fn classify_events() {
        assert_eq!(
            classify(Event::Key(KeyEvent::from(KeyCode::Esc))),
            Some(EngineEvent::Quit)
        );
        assert_eq!(
            classify(Event::Resize(80, 24)),
            Some(EngineEvent::Resize {
                width: 80,
                height: 24
            })
        );
        assert_eq!(classify(Event::Key(KeyEvent::from(KeyCode::Char('x')))), None);
        assert_eq!(classify(Event::FocusGained), None);
    }

    #[test]
    fn key_release_does_not_quit() {
        let mut key = KeyEvent::from(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(classify(Event::Key(key)), None);
    }
}
