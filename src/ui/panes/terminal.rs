//! Transcript pane and input line rendering

use super::{border_style, visible_range};
use crate::interpreter::constants::PROMPT;
use crate::transport::MockTerminal;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the monitor transcript
pub fn render_terminal_pane(
    frame: &mut Frame,
    area: Rect,
    terminal: &MockTerminal,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Monitor ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let text = terminal.output();
    let lines: Vec<&str> = text.lines().collect();

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no output yet, type `help`)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let range = visible_range(lines.len(), visible_height, scroll_offset);

    let items: Vec<ListItem> = lines[range]
        .iter()
        .map(|line| {
            let style = if line.starts_with(PROMPT) {
                Style::default().fg(DEFAULT_THEME.primary)
            } else if line.starts_with("Error!") || line.ends_with("???") {
                Style::default().fg(DEFAULT_THEME.error)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            ListItem::new(*line).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Render the line being typed, with the cursor at its end
pub fn render_input_line(frame: &mut Frame, area: Rect, input: &str) {
    let block = Block::default()
        .title(" Input ")
        .borders(Borders::ALL)
        .border_style(border_style(true));

    let line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(DEFAULT_THEME.primary)),
        Span::styled(input, Style::default().fg(DEFAULT_THEME.fg)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);

    let x = area.x + 1 + (PROMPT.len() + input.len()) as u16;
    let max_x = area.x + area.width.saturating_sub(2);
    frame.set_cursor_position(Position::new(x.min(max_x), area.y + 1));
}
