use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

use crate::{app::App, error::Result, ui};

/// Draw the app once into an off-screen buffer and return it as text
pub fn render_to_string(app: &mut App, width: u16, height: u16) -> Result<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    terminal.draw(|frame| {
        ui::draw(frame, app);
    })?;

    Ok(buffer_to_string(terminal.backend().buffer()))
}

pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();

    for y in 0..buffer.area().height {
        for x in 0..buffer.area().width {
            let sym = buffer[(x, y)].symbol();

            // Use a space for empty cells to make output more readable
            if sym.is_empty() {
                result.push(' ');
            } else {
                result.push_str(sym);
            }
        }
        result.push('\n');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{
        text::Text,
        widgets::{Block, Borders, Paragraph},
    };

    #[test]
    fn test_buffer_to_string() {
        let backend = TestBackend::new(10, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                let paragraph = Paragraph::new(Text::from("Test"))
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(paragraph, frame.area());
            })
            .unwrap();

        let result = buffer_to_string(terminal.backend().buffer());
        assert!(result.contains("Test"));
        assert_eq!(result.lines().count(), 3);
    }
}
