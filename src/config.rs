use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub colors: ColorConfig,
    pub layout: LayoutConfig,
    pub keybindings: KeybindingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub border: Color,
    pub group: Color,
    pub leaf: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Spaces of indentation per tree level
    pub indent_width: usize,
    /// Max gap between two clicks on the same cell to count as a double click
    pub double_click_ms: u64,
    pub title: String,
}

/// Letter keys; arrows, Enter, Space and Esc are always bound
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: char,
    pub up: char,
    pub down: char,
    pub expand: char,
    pub collapse: char,
    pub reload: char,
    pub clear: char,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            border: Color::Yellow,
            group: Color::Blue,
            leaf: Color::Reset,
            selected_fg: Color::Black,
            selected_bg: Color::White,
            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            double_click_ms: 400,
            title: "Outline".to_string(),
        }
    }
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: 'q',
            up: 'k',
            down: 'j',
            expand: 'l',
            collapse: 'h',
            reload: 'r',
            clear: 'c',
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let config = serde_json::from_str(&content)?;
                log::info!("Loaded configuration from {:?}", path);
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}
