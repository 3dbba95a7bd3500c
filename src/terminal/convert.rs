//! Translation from crossterm events to runtime [`Event`]s.

use crate::actor::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButtons, MouseEvent};
use crossterm::event::{self as ct, KeyEventKind, MouseEventKind};

/// Convert a crossterm event. Events the runtime has no use for
/// (focus changes, key releases, unknown keys) map to `None`.
pub fn convert_event(event: ct::Event) -> Option<Event> {
    match event {
        ct::Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            let code = convert_key_code(key.code)?;
            Some(Event::Key(KeyEvent::new(code, convert_modifiers(key.modifiers))))
        }
        ct::Event::Mouse(mouse) => Some(Event::Mouse(convert_mouse(mouse))),
        ct::Event::Resize(width, height) => Some(Event::Resize { width, height }),
        ct::Event::Paste(text) => Some(Event::Paste(text)),
        ct::Event::FocusGained | ct::Event::FocusLost => None,
    }
}

fn convert_key_code(code: ct::KeyCode) -> Option<KeyCode> {
    Some(match code {
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::F(n) => KeyCode::F(n),
        ct::KeyCode::Backspace => KeyCode::Backspace,
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Left => KeyCode::Left,
        ct::KeyCode::Right => KeyCode::Right,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        ct::KeyCode::Home => KeyCode::Home,
        ct::KeyCode::End => KeyCode::End,
        ct::KeyCode::PageUp => KeyCode::PageUp,
        ct::KeyCode::PageDown => KeyCode::PageDown,
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::BackTab => KeyCode::BackTab,
        ct::KeyCode::Delete => KeyCode::Delete,
        ct::KeyCode::Insert => KeyCode::Insert,
        ct::KeyCode::Esc => KeyCode::Esc,
        ct::KeyCode::Null => KeyCode::Null,
        _ => return None,
    })
}

fn convert_modifiers(mods: ct::KeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    out.set(KeyModifiers::SHIFT, mods.contains(ct::KeyModifiers::SHIFT));
    out.set(KeyModifiers::CONTROL, mods.contains(ct::KeyModifiers::CONTROL));
    out.set(KeyModifiers::ALT, mods.contains(ct::KeyModifiers::ALT));
    out.set(
        KeyModifiers::META,
        mods.intersects(ct::KeyModifiers::SUPER | ct::KeyModifiers::META),
    );
    out
}

fn convert_mouse(mouse: ct::MouseEvent) -> MouseEvent {
    let buttons = match mouse.kind {
        MouseEventKind::Down(button) | MouseEventKind::Drag(button) => convert_button(button),
        MouseEventKind::Up(_) | MouseEventKind::Moved => MouseButtons::empty(),
        MouseEventKind::ScrollUp => MouseButtons::WHEEL_UP,
        MouseEventKind::ScrollDown => MouseButtons::WHEEL_DOWN,
        MouseEventKind::ScrollLeft => MouseButtons::WHEEL_LEFT,
        MouseEventKind::ScrollRight => MouseButtons::WHEEL_RIGHT,
    };

    MouseEvent {
        x: mouse.column,
        y: mouse.row,
        buttons,
        modifiers: convert_modifiers(mouse.modifiers),
    }
}

const fn convert_button(button: ct::MouseButton) -> MouseButtons {
    match button {
        ct::MouseButton::Left => MouseButtons::LEFT,
        ct::MouseButton::Right => MouseButtons::RIGHT,
        ct::MouseButton::Middle => MouseButtons::MIDDLE,
    }
}
