use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::time::{Duration, Instant};

use crate::app::{App, ClickRecord};
use crate::config::KeybindingConfig;
use crate::controller::TreeEvent;

/// What a key press asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Tree(TreeEvent),
    Reload,
    Clear,
    Redraw,
    Quit,
}

/// Translate a key press using the configured letter bindings
pub fn key_action(key: &KeyEvent, bindings: &KeybindingConfig) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('l') => Some(KeyAction::Redraw),
            KeyCode::Char('c') => Some(KeyAction::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Up => KeyAction::Tree(TreeEvent::NavigateUp),
        KeyCode::Down => KeyAction::Tree(TreeEvent::NavigateDown),
        KeyCode::Right => KeyAction::Tree(TreeEvent::ExpandRequest),
        KeyCode::Left => KeyAction::Tree(TreeEvent::CollapseRequest),
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Tree(TreeEvent::ConfirmToggle),
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char(c) if c == bindings.up => KeyAction::Tree(TreeEvent::NavigateUp),
        KeyCode::Char(c) if c == bindings.down => KeyAction::Tree(TreeEvent::NavigateDown),
        KeyCode::Char(c) if c == bindings.expand => KeyAction::Tree(TreeEvent::ExpandRequest),
        KeyCode::Char(c) if c == bindings.collapse => KeyAction::Tree(TreeEvent::CollapseRequest),
        KeyCode::Char(c) if c == bindings.reload => KeyAction::Reload,
        KeyCode::Char(c) if c == bindings.clear => KeyAction::Clear,
        KeyCode::Char(c) if c == bindings.quit => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Handle a terminal event, returning true if the UI needs a redraw
pub fn handle_event(event: Event, app: &mut App) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(&key, app),
        Event::Mouse(mouse) => handle_mouse(&mouse, app, Instant::now()),
        Event::Resize(_, _) => true,
        _ => false,
    }
}

fn handle_key(key: &KeyEvent, app: &mut App) -> bool {
    let Some(action) = key_action(key, &app.config.keybindings) else {
        return false;
    };
    log::debug!("Key {:?} -> {:?}", key.code, action);

    match action {
        KeyAction::Tree(event) => app.dispatch(event),
        KeyAction::Reload => {
            app.reload();
            true
        }
        KeyAction::Clear => {
            app.clear();
            true
        }
        KeyAction::Redraw => {
            app.ui.force_redraw = true;
            app.ui.status_message = "Screen refreshed".to_string();
            true
        }
        KeyAction::Quit => {
            app.should_quit = true;
            false
        }
    }
}

/// Left clicks are only meaningful in pairs: a double click activates the row
pub fn handle_mouse(mouse: &MouseEvent, app: &mut App, now: Instant) -> bool {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return false;
    }

    let window = Duration::from_millis(app.config.layout.double_click_ms);
    let is_double = app.last_click.is_some_and(|click| {
        click.column == mouse.column
            && click.row == mouse.row
            && now.saturating_duration_since(click.at) <= window
    });

    if !is_double {
        app.last_click = Some(ClickRecord {
            at: now,
            column: mouse.column,
            row: mouse.row,
        });
        return false;
    }

    app.last_click = None;
    match app.row_at_screen(mouse.column, mouse.row) {
        Some(id) => app.dispatch(TreeEvent::ActivateRow(id)),
        None => false,
    }
}
