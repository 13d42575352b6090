use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::error::Result;

/// One node of the input tree.
///
/// The JSON form is tagged by `"type"`, with group children listed under
/// `"items"` (or `"children"`):
///
/// ```json
/// { "type": "group", "name": "B", "items": [ { "type": "leaf", "name": "B1" } ] }
/// ```
///
/// Group children sit behind an `Rc` so rows can hold on to them without
/// copying the subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    Leaf {
        name: String,
    },
    Group {
        name: String,
        #[serde(alias = "children", default = "no_items")]
        items: Rc<[Item]>,
    },
}

impl Item {
    /// Create a leaf item
    pub fn leaf(name: impl Into<String>) -> Self {
        Item::Leaf { name: name.into() }
    }

    /// Create a group item with the given children
    pub fn group(name: impl Into<String>, items: Vec<Item>) -> Self {
        Item::Group {
            name: name.into(),
            items: items.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Item::Leaf { name } | Item::Group { name, .. } => name,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Item::Group { .. })
    }

    /// Children of a group, `None` for a leaf
    pub fn children(&self) -> Option<&[Item]> {
        match self {
            Item::Leaf { .. } => None,
            Item::Group { items, .. } => Some(&items[..]),
        }
    }

    /// Shared handle on a group's children, `None` for a leaf
    pub fn shared_children(&self) -> Option<Rc<[Item]>> {
        match self {
            Item::Leaf { .. } => None,
            Item::Group { items, .. } => Some(Rc::clone(items)),
        }
    }
}

fn no_items() -> Rc<[Item]> {
    Rc::from(Vec::new())
}

/// Read a JSON array of items from disk
pub fn load_items_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Item>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let items: Vec<Item> = serde_json::from_str(&content)?;
    log::info!("Loaded {} top-level items from {:?}", items.len(), path);
    Ok(items)
}

/// Tree shown when no item file is given
pub fn demo_items() -> Vec<Item> {
    vec![
        Item::group(
            "General",
            vec![
                Item::leaf("announcements"),
                Item::leaf("random"),
                Item::group(
                    "Off-topic",
                    vec![Item::leaf("music"), Item::leaf("games")],
                ),
            ],
        ),
        Item::group(
            "Engineering",
            vec![
                Item::leaf("backend"),
                Item::leaf("frontend"),
                Item::group("Infra", vec![Item::leaf("alerts"), Item::leaf("deploys")]),
            ],
        ),
        Item::leaf("Direct messages"),
    ]
}
