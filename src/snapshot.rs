use serde::{Deserialize, Serialize};

use crate::app::App;

/// One visible row in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub name: String,
    pub depth: usize,
    pub group: bool,
    pub expanded: bool,
    pub selected: bool,
}

/// Serializable view of the visible sequence and selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub loaded: bool,
    pub selected: Option<String>,
    pub rows: Vec<SnapshotRow>,
}

impl TreeSnapshot {
    pub fn from_app(app: &App) -> Self {
        let selected_index = app.tree.selected_index();
        let rows = app
            .tree
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| SnapshotRow {
                name: row.name().to_string(),
                depth: row.depth(),
                group: row.is_group(),
                expanded: row.is_expanded(),
                selected: Some(index) == selected_index,
            })
            .collect();

        Self {
            loaded: app.tree.is_loaded(),
            selected: app.selected_name().map(str::to_string),
            rows,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::controller::TreeEvent;
    use crate::item::Item;

    #[test]
    fn test_snapshot_of_expanded_tree() {
        let items = vec![
            Item::leaf("A"),
            Item::group("B", vec![Item::leaf("B1")]),
        ];
        let mut app = App::new(items, Config::default());
        app.load();
        app.dispatch(TreeEvent::NavigateDown);
        app.dispatch(TreeEvent::ExpandRequest);

        let snapshot = TreeSnapshot::from_app(&app);
        assert!(snapshot.loaded);
        assert_eq!(snapshot.selected.as_deref(), Some("B1"));
        assert_eq!(
            snapshot.rows[1],
            SnapshotRow {
                name: "B".to_string(),
                depth: 0,
                group: true,
                expanded: true,
                selected: false,
            }
        );
        assert_eq!(snapshot.rows.iter().filter(|r| r.selected).count(), 1);

        let json = snapshot.to_json().unwrap();
        let parsed: TreeSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_snapshot_before_load() {
        let app = App::new(vec![Item::leaf("A")], Config::default());
        let snapshot = TreeSnapshot::from_app(&app);
        assert!(!snapshot.loaded);
        assert!(snapshot.selected.is_none());
        assert!(snapshot.rows.is_empty());
    }
}
