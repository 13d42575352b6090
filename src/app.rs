use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::time::Instant;

use crate::config::Config;
use crate::controller::{RowId, TreeController, TreeEvent};
use crate::item::Item;
use crate::render::ListSurface;

/// Terminal-side state that is not part of the tree itself
#[derive(Debug)]
pub struct UiState {
    pub status_message: String,
    pub list_state: ListState,
    /// Inner area of the tree panel from the last draw, for mouse hit testing
    pub tree_area: Rect,
    pub force_redraw: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status_message: "Ready".to_string(),
            list_state: ListState::default(),
            tree_area: Rect::default(),
            force_redraw: false,
        }
    }
}

/// The last left click, used to recognise double clicks
#[derive(Debug, Clone, Copy)]
pub struct ClickRecord {
    pub at: Instant,
    pub column: u16,
    pub row: u16,
}

pub struct App {
    pub tree: TreeController<ListSurface>,
    pub items: Vec<Item>,
    pub config: Config,
    pub ui: UiState,
    pub should_quit: bool,
    pub last_click: Option<ClickRecord>,
}

impl App {
    pub fn new(items: Vec<Item>, config: Config) -> Self {
        Self {
            tree: TreeController::new(ListSurface::new()),
            items,
            config,
            ui: UiState::default(),
            should_quit: false,
            last_click: None,
        }
    }

    /// Show the item source; does nothing while already loaded
    pub fn load(&mut self) {
        if self.tree.is_loaded() {
            self.ui.status_message = "Already loaded".to_string();
            return;
        }
        self.tree.load(&self.items);
        self.ui.list_state.select(self.tree.selected_index());
        self.ui.status_message = format!("Loaded {} items", self.items.len());
    }

    pub fn clear(&mut self) {
        self.tree.clear();
        self.ui.list_state = ListState::default();
        self.ui.status_message = "Cleared".to_string();
    }

    pub fn reload(&mut self) {
        self.tree.clear();
        self.ui.list_state = ListState::default();
        self.load();
    }

    /// Forward an event to the tree and sync the list cursor
    pub fn dispatch(&mut self, event: TreeEvent) -> bool {
        let changed = self.tree.handle_event(event);
        if changed {
            self.ui.list_state.select(self.tree.selected_index());
            if let Some(row) = self.tree.selected_row() {
                self.ui.status_message = row.name().to_string();
            }
        }
        changed
    }

    /// Activate the row at a visible index
    pub fn activate_index(&mut self, index: usize) -> bool {
        match self.tree.row_at(index).map(|row| row.id()) {
            Some(id) => self.dispatch(TreeEvent::ActivateRow(id)),
            None => false,
        }
    }

    /// Map a screen cell to the row drawn there, if any
    pub fn row_at_screen(&self, column: u16, row: u16) -> Option<RowId> {
        let area = self.ui.tree_area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return None;
        }

        let index = self.ui.list_state.offset() + usize::from(row - area.y);
        self.tree.row_at(index).map(|r| r.id())
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.tree.selected_row().map(|row| row.name())
    }

    pub fn visible_names(&self) -> Vec<&str> {
        self.tree.rows().iter().map(|row| row.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_app() -> App {
        let items = vec![
            Item::leaf("A"),
            Item::group("B", vec![Item::leaf("B1"), Item::leaf("B2")]),
        ];
        let mut app = App::new(items, Config::default());
        app.load();
        app
    }

    #[test]
    fn test_load_syncs_list_state() {
        let app = sample_app();
        assert_eq!(app.ui.list_state.selected(), Some(0));
        assert_eq!(app.ui.status_message, "Loaded 2 items");
    }

    #[test]
    fn test_dispatch_updates_status_and_cursor() {
        let mut app = sample_app();
        assert!(app.dispatch(TreeEvent::NavigateDown));
        assert_eq!(app.ui.list_state.selected(), Some(1));
        assert_eq!(app.ui.status_message, "B");
    }

    #[test]
    fn test_activate_index_out_of_range() {
        let mut app = sample_app();
        assert!(!app.activate_index(10));
        assert!(app.activate_index(1));
        assert_eq!(app.visible_names(), vec!["A", "B", "B1", "B2"]);
    }

    #[test]
    fn test_reload_resets_tree() {
        let mut app = sample_app();
        app.activate_index(1);
        app.reload();
        assert_eq!(app.visible_names(), vec!["A", "B"]);
        assert_eq!(app.selected_name(), Some("A"));
    }

    #[test]
    fn test_row_at_screen_uses_tree_area() {
        let mut app = sample_app();
        app.ui.tree_area = Rect::new(1, 1, 20, 5);

        assert_eq!(app.row_at_screen(0, 1), None);
        assert_eq!(app.row_at_screen(3, 2), app.tree.row_at(1).map(|r| r.id()));
        assert_eq!(app.row_at_screen(3, 4), None);
    }
}
