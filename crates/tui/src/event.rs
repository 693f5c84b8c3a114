//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use snapboard_protocol::{Message, PointerAction};

/// Poll timeout while nothing is animating.
pub const IDLE_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Poll timeout while a drag, settle or announcement needs frames.
pub const FRAME_POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Polls for a terminal event.
///
/// Returns `Some(Event)` if an event is available within `timeout`,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts an event (keyboard, mouse or resize) to an application message.
///
/// Returns `Some(Message)` if the event maps to an action,
/// or `None` if the event is not handled.
#[must_use]
pub fn event_to_message(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) => key_to_message(*key),
        Event::Mouse(mouse) => mouse_to_message(mouse),
        Event::Resize(..) => Some(Message::Resize),
        _ => None,
    }
}

/// Converts a mouse event to an application message.
///
/// Only the left button drives the pointer: press, drag with the button
/// held, and release.
#[must_use]
fn mouse_to_message(mouse: &crossterm::event::MouseEvent) -> Option<Message> {
    let action = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerAction::Press,
        MouseEventKind::Drag(MouseButton::Left) => PointerAction::Drag,
        MouseEventKind::Up(MouseButton::Left) => PointerAction::Release,
        _ => return None,
    };
    Some(Message::Pointer {
        action,
        column: mouse.column,
        row: mouse.row,
    })
}

/// Converts a terminal key event to an application message.
///
/// Returns `Some(Message)` if the key event maps to an action,
/// or `None` if the key is not bound. Key releases are ignored.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit |
/// | `Esc` | Cancel the drag, or clear the selection |
/// | `Left` | Navigate (or move the held card) left |
/// | `Right` | Navigate (or move the held card) right |
/// | `Up` | Navigate (or move the held card) up |
/// | `Down` | Navigate (or move the held card) down |
/// | `Enter` or `Space` | Pick up or drop |
/// | `r` | Reset the board |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // Check for Ctrl+C first
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),

        // Navigation (arrow keys only)
        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),

        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Select),
        KeyCode::Char('r') => Some(Message::Reset),

        _ => None,
    }
}
