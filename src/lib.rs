pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod executor;
pub mod item;
pub mod main_lib;
pub mod render;
pub mod screenshot;
pub mod snapshot;
pub mod test_runner;
pub mod ui;

pub use controller::{Row, RowId, Selection, TreeController, TreeEvent};
pub use error::{Result, TreeError};
pub use item::Item;
pub use render::{ListSurface, RenderAdapter};
