use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use weather_dash_core::InputEvent;

/// Map a terminal event onto the dashboard's input vocabulary.
pub fn translate(event: &Event) -> InputEvent {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Resize(width, height) => InputEvent::Resize { width: *width, height: *height },
        _ => InputEvent::Other,
    }
}

fn translate_key(key: &KeyEvent) -> InputEvent {
    // Only handle key press events, not release
    if key.kind != KeyEventKind::Press {
        return InputEvent::Other;
    }

    match key.code {
        KeyCode::Char('q') => InputEvent::Quit,
        // Raw mode delivers Ctrl+C as a key instead of SIGINT
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputEvent::Quit,
        _ => InputEvent::Other,
    }
}
