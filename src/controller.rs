//! Selection and expansion state machine for a flattened tree.
//!
//! The controller owns the ordered sequence of visible rows (a pre-order walk
//! of the expanded part of the tree), the identity of the selected row, and a
//! loaded flag. Every operation runs to completion and leaves exactly one row
//! selected whenever the sequence is non-empty. Anything that cannot apply
//! (moving past either end, expanding a leaf, ...) is a no-op rather than an
//! error.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::item::Item;
use crate::render::RenderAdapter;

/// Stable identity of a row for the lifetime of its controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(u64);

/// Which row currently holds the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selected; the container is the anchor
    Container,
    Row(RowId),
}

/// Input events accepted by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeEvent {
    NavigateUp,
    NavigateDown,
    ExpandRequest,
    CollapseRequest,
    ConfirmToggle,
    ActivateRow(RowId),
}

/// A materialized, currently visible item
#[derive(Debug, Clone)]
pub struct Row<H> {
    id: RowId,
    handle: H,
    name: String,
    depth: usize,
    is_expanded: bool,
    children: Option<Rc<[Item]>>,
}

impl<H> Row<H> {
    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// Whether the row is backed by a group item
    pub fn is_group(&self) -> bool {
        self.children.is_some()
    }

    /// The group's child items, kept across collapse
    pub fn children(&self) -> Option<&[Item]> {
        self.children.as_deref()
    }
}

pub struct TreeController<A: RenderAdapter> {
    adapter: A,
    rows: Vec<Row<A::Handle>>,
    selection: Selection,
    loaded: bool,
    next_id: u64,
}

impl<A: RenderAdapter> TreeController<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            rows: Vec::new(),
            selection: Selection::Container,
            loaded: false,
            next_id: 0,
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The visible sequence, in display order
    pub fn rows(&self) -> &[Row<A::Handle>] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&Row<A::Handle>> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn row_at(&self, index: usize) -> Option<&Row<A::Handle>> {
        self.rows.get(index)
    }

    pub fn position_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_index(&self) -> Option<usize> {
        match self.selection {
            Selection::Container => None,
            Selection::Row(id) => self.position_of(id),
        }
    }

    pub fn selected_row(&self) -> Option<&Row<A::Handle>> {
        self.selected_index().map(|index| &self.rows[index])
    }

    /// Materialize `items` as the top level and select the first row.
    ///
    /// Does nothing while already loaded.
    pub fn load(&mut self, items: &[Item]) {
        if self.loaded {
            log::debug!("TreeController::load: already loaded, ignoring");
            return;
        }

        for item in items {
            let row = self.materialize_row(item, 0);
            match self.rows.last() {
                Some(previous) => self.adapter.insert_after(&previous.handle, &row.handle),
                None => self.adapter.append_first(&row.handle),
            }
            self.rows.push(row);
        }

        if let Some(first) = self.rows.first() {
            self.adapter.set_selected_visual(&first.handle, true);
            self.selection = Selection::Row(first.id);
        }
        self.loaded = true;

        log::debug!("TreeController::load: {} top-level rows", self.rows.len());
    }

    /// Drop every row and return to the unloaded state
    pub fn clear(&mut self) {
        for row in self.rows.drain(..) {
            self.adapter.remove(&row.handle);
        }
        self.selection = Selection::Container;
        self.loaded = false;
        log::debug!("TreeController::clear");
    }

    /// Handle an event and return whether the visible state changed
    pub fn handle_event(&mut self, event: TreeEvent) -> bool {
        if !self.loaded {
            log::debug!("TreeController: not loaded, ignoring {:?}", event);
            return false;
        }

        let state_before = self.state_fingerprint();

        match event {
            TreeEvent::NavigateUp => self.on_selected(Self::navigate_up),
            TreeEvent::NavigateDown => self.on_selected(Self::navigate_down),
            TreeEvent::ExpandRequest => self.on_selected(Self::expand),
            TreeEvent::CollapseRequest => self.on_selected(Self::collapse),
            TreeEvent::ConfirmToggle => self.on_selected(Self::toggle),
            TreeEvent::ActivateRow(target) => self.select_row(target),
        }

        state_before != self.state_fingerprint()
    }

    /// Run `action` against the selected row, if there is one
    fn on_selected(&mut self, action: fn(&mut Self, usize)) {
        match self.selected_index() {
            Some(current) => action(self, current),
            None => log::debug!("TreeController: nothing selected, ignoring event"),
        }
    }

    fn state_fingerprint(&self) -> (Selection, Vec<(RowId, bool)>) {
        let rows = self
            .rows
            .iter()
            .map(|row| (row.id, row.is_expanded))
            .collect();
        (self.selection, rows)
    }

    fn materialize_row(&mut self, item: &Item, depth: usize) -> Row<A::Handle> {
        let id = RowId(self.next_id);
        self.next_id += 1;
        Row {
            id,
            handle: self.adapter.materialize(item, depth),
            name: item.name().to_string(),
            depth,
            is_expanded: false,
            children: item.shared_children(),
        }
    }

    /// Move the selection from `from` to `to`
    fn move_selection(&mut self, from: usize, to: usize) {
        self.adapter.set_selected_visual(&self.rows[from].handle, false);
        self.adapter.set_selected_visual(&self.rows[to].handle, true);
        self.selection = Selection::Row(self.rows[to].id);
    }

    fn navigate_down(&mut self, current: usize) {
        if current + 1 < self.rows.len() {
            self.move_selection(current, current + 1);
        }
    }

    fn navigate_up(&mut self, current: usize) {
        if current > 0 {
            self.move_selection(current, current - 1);
        }
    }

    fn expand(&mut self, current: usize) {
        let row = &mut self.rows[current];
        if row.is_expanded {
            return;
        }
        let Some(children) = row.children.clone() else {
            return;
        };

        row.is_expanded = true;
        self.adapter.set_disclosure_visual(&row.handle, true);

        let depth = row.depth + 1;
        let mut anchor = current;
        for child in children.iter() {
            let new_row = self.materialize_row(child, depth);
            self.adapter.insert_after(&self.rows[anchor].handle, &new_row.handle);
            anchor += 1;
            self.rows.insert(anchor, new_row);
        }

        log::debug!(
            "TreeController::expand: '{}' gained {} rows",
            self.rows[current].name,
            children.len()
        );
        self.navigate_down(current);
    }

    fn collapse(&mut self, current: usize) {
        if self.rows[current].is_expanded {
            self.fold(current);
        } else {
            self.select_parent(current);
        }
    }

    /// Remove every descendant row of an expanded group
    fn fold(&mut self, current: usize) {
        let row = &mut self.rows[current];
        row.is_expanded = false;
        self.adapter.set_disclosure_visual(&row.handle, false);

        let depth = row.depth;
        let start = current + 1;
        let end = start
            + self.rows[start..]
                .iter()
                .take_while(|row| row.depth > depth)
                .count();

        for removed in self.rows.drain(start..end) {
            self.adapter.remove(&removed.handle);
        }

        log::debug!(
            "TreeController::fold: '{}' lost {} rows",
            self.rows[current].name,
            end - start
        );
    }

    /// Walk the selection up to the nearest shallower row
    fn select_parent(&mut self, current: usize) {
        let level = self.rows[current].depth;
        let mut index = current;
        while index > 0 && self.rows[index - 1].depth >= level {
            self.navigate_up(index);
            index -= 1;
        }
        self.navigate_up(index);
    }

    fn toggle(&mut self, current: usize) {
        let row = &self.rows[current];
        if !row.is_group() {
            return;
        }
        if row.is_expanded {
            self.fold(current);
        } else {
            self.expand(current);
        }
    }

    /// Select `target` directly, then toggle it
    fn select_row(&mut self, target: RowId) {
        let Some(index) = self.position_of(target) else {
            log::warn!("TreeController: activation of unknown row {:?}", target);
            return;
        };

        match self.selected_index() {
            Some(previous) if previous != index => self.move_selection(previous, index),
            Some(_) => {}
            None => {
                self.adapter.set_selected_visual(&self.rows[index].handle, true);
                self.selection = Selection::Row(target);
            }
        }

        self.toggle(index);
    }
}
