//! The rendering boundary of the tree controller.
//!
//! `TreeController` never draws anything itself. It tells a `RenderAdapter`
//! which rows to create, where to splice them in, and which visual flags to
//! flip. `ListSurface` is the in-memory adapter the terminal UI draws from.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::item::Item;

/// Visual collaborator driven by the controller
pub trait RenderAdapter {
    type Handle: Clone;

    /// Produce an inert row for `item` at indentation `depth`
    fn materialize(&mut self, item: &Item, depth: usize) -> Self::Handle;

    /// Place the very first row into an empty container
    fn append_first(&mut self, row: &Self::Handle);

    /// Splice `row` in immediately after `anchor`
    fn insert_after(&mut self, anchor: &Self::Handle, row: &Self::Handle);

    /// Detach a row from the visible surface
    fn remove(&mut self, row: &Self::Handle);

    fn set_selected_visual(&mut self, row: &Self::Handle, selected: bool);

    fn set_disclosure_visual(&mut self, row: &Self::Handle, expanded: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceRowId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disclosure {
    Collapsed,
    Expanded,
}

/// A row as the terminal shows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceRow {
    pub id: SurfaceRowId,
    pub label: String,
    pub depth: usize,
    pub disclosure: Option<Disclosure>,
    pub selected: bool,
}

/// Ordered list of rows backing the terminal view
#[derive(Debug, Default)]
pub struct ListSurface {
    rows: Vec<SurfaceRow>,
    detached: HashMap<SurfaceRowId, SurfaceRow>,
    next_id: u64,
}

impl ListSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[SurfaceRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the row currently drawn as selected
    pub fn selected_position(&self) -> Option<usize> {
        self.rows.iter().position(|row| row.selected)
    }

    fn position(&self, id: SurfaceRowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    fn find_mut(&mut self, id: SurfaceRowId) -> Option<&mut SurfaceRow> {
        self.rows.iter_mut().find(|row| row.id == id)
    }

    fn attach(&mut self, id: SurfaceRowId, index: usize) {
        match self.detached.remove(&id) {
            Some(row) => self.rows.insert(index, row),
            None => log::warn!("ListSurface: row {:?} was never materialized or is already attached", id),
        }
    }
}

impl RenderAdapter for ListSurface {
    type Handle = SurfaceRowId;

    fn materialize(&mut self, item: &Item, depth: usize) -> SurfaceRowId {
        let id = SurfaceRowId(self.next_id);
        self.next_id += 1;

        let disclosure = item.is_group().then_some(Disclosure::Collapsed);
        self.detached.insert(
            id,
            SurfaceRow {
                id,
                label: item.name().to_string(),
                depth,
                disclosure,
                selected: false,
            },
        );
        id
    }

    fn append_first(&mut self, row: &SurfaceRowId) {
        if !self.rows.is_empty() {
            log::warn!("ListSurface: append_first on a non-empty surface ({} rows)", self.rows.len());
        }
        self.attach(*row, 0);
    }

    fn insert_after(&mut self, anchor: &SurfaceRowId, row: &SurfaceRowId) {
        match self.position(*anchor) {
            Some(index) => self.attach(*row, index + 1),
            None => log::warn!("ListSurface: insert_after unknown anchor {:?}", anchor),
        }
    }

    fn remove(&mut self, row: &SurfaceRowId) {
        match self.position(*row) {
            Some(index) => {
                self.rows.remove(index);
            }
            None => {
                if self.detached.remove(row).is_none() {
                    log::warn!("ListSurface: remove of unknown row {:?}", row);
                }
            }
        }
    }

    fn set_selected_visual(&mut self, row: &SurfaceRowId, selected: bool) {
        match self.find_mut(*row) {
            Some(surface_row) => surface_row.selected = selected,
            None => log::warn!("ListSurface: select of unknown row {:?}", row),
        }
    }

    fn set_disclosure_visual(&mut self, row: &SurfaceRowId, expanded: bool) {
        match self.find_mut(*row) {
            Some(surface_row) => {
                if surface_row.disclosure.is_some() {
                    surface_row.disclosure = Some(if expanded {
                        Disclosure::Expanded
                    } else {
                        Disclosure::Collapsed
                    });
                }
            }
            None => log::warn!("ListSurface: disclosure change on unknown row {:?}", row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(surface: &ListSurface) -> Vec<&str> {
        surface.rows().iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn test_materialized_rows_stay_detached() {
        let mut surface = ListSurface::new();
        surface.materialize(&Item::leaf("a"), 0);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_insert_after_splices_in_place() {
        let mut surface = ListSurface::new();
        let a = surface.materialize(&Item::leaf("a"), 0);
        let c = surface.materialize(&Item::leaf("c"), 0);
        let b = surface.materialize(&Item::leaf("b"), 1);

        surface.append_first(&a);
        surface.insert_after(&a, &c);
        surface.insert_after(&a, &b);

        assert_eq!(labels(&surface), vec!["a", "b", "c"]);
        assert_eq!(surface.rows()[1].depth, 1);
    }

    #[test]
    fn test_group_rows_carry_disclosure() {
        let mut surface = ListSurface::new();
        let group = surface.materialize(&Item::group("g", vec![]), 0);
        let leaf = surface.materialize(&Item::leaf("l"), 0);
        surface.append_first(&group);
        surface.insert_after(&group, &leaf);

        surface.set_disclosure_visual(&group, true);
        surface.set_disclosure_visual(&leaf, true);

        assert_eq!(surface.rows()[0].disclosure, Some(Disclosure::Expanded));
        assert_eq!(surface.rows()[1].disclosure, None);
    }

    #[test]
    fn test_selection_and_removal() {
        let mut surface = ListSurface::new();
        let a = surface.materialize(&Item::leaf("a"), 0);
        let b = surface.materialize(&Item::leaf("b"), 0);
        surface.append_first(&a);
        surface.insert_after(&a, &b);

        surface.set_selected_visual(&b, true);
        assert_eq!(surface.selected_position(), Some(1));

        surface.remove(&a);
        assert_eq!(labels(&surface), vec!["b"]);
        assert_eq!(surface.selected_position(), Some(0));
    }

    #[test]
    fn test_unknown_handles_are_ignored() {
        let mut surface = ListSurface::new();
        let ghost = SurfaceRowId(99);
        surface.remove(&ghost);
        surface.set_selected_visual(&ghost, true);
        surface.insert_after(&ghost, &ghost);
        assert!(surface.is_empty());
    }
}
