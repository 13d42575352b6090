use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::config::Config;
use crate::render::{Disclosure, SurfaceRow};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    draw_tree(frame, app, chunks[0]);
    draw_status_bar(frame, app, chunks[1]);
}

/// Text for one row: indentation, disclosure glyph, name
pub fn row_label(row: &SurfaceRow, indent_width: usize) -> String {
    let glyph = match row.disclosure {
        Some(Disclosure::Collapsed) => "▶",
        Some(Disclosure::Expanded) => "▼",
        None => " ",
    };
    format!("{}{} {}", " ".repeat(row.depth * indent_width), glyph, row.label)
}

fn row_style(row: &SurfaceRow, config: &Config) -> Style {
    if row.selected {
        Style::default()
            .fg(config.colors.selected_fg)
            .bg(config.colors.selected_bg)
            .add_modifier(Modifier::BOLD)
    } else if row.disclosure.is_some() {
        Style::default()
            .fg(config.colors.group)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(config.colors.leaf)
    }
}

fn draw_tree(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", app.config.layout.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.config.colors.border));
    app.ui.tree_area = block.inner(area);

    if !app.tree.is_loaded() {
        let paragraph = Paragraph::new(format!(
            "Nothing loaded (press '{}' to load)",
            app.config.keybindings.reload
        ))
        .block(block)
        .style(Style::default().fg(ratatui::style::Color::Gray));
        frame.render_widget(paragraph, area);
        return;
    }

    let indent_width = app.config.layout.indent_width;
    let items: Vec<ListItem> = app
        .tree
        .adapter()
        .rows()
        .iter()
        .map(|row| {
            let line = Line::from(vec![Span::styled(
                row_label(row, indent_width),
                row_style(row, &app.config),
            )]);
            ListItem::new(line)
        })
        .collect();

    app.ui.list_state.select(app.tree.adapter().selected_position());

    let list = List::new(items).block(block);
    frame.render_stateful_widget(list, area, &mut app.ui.list_state);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let keys = &app.config.keybindings;
    let help = format!(
        " ←/→ fold/unfold  ↵ toggle  {} reload  {} clear  {} quit",
        keys.reload, keys.clear, keys.quit
    );
    let text = format!(" {} |{}", app.ui.status_message, help);

    let paragraph = Paragraph::new(text).style(
        Style::default()
            .bg(app.config.colors.status_bar_bg)
            .fg(app.config.colors.status_bar_fg),
    );
    frame.render_widget(paragraph, area);
}
