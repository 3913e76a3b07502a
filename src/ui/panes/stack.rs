//! Data stack pane
//!
//! Cells are listed top first; the top of stack is highlighted and marked
//! with an arrow. Each cell shows its decimal value and its 32-bit hex form.

use super::{border_style, visible_range};
use crate::memory::DataStack;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    stack: &DataStack,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Data Stack {}/{} ", stack.depth(), stack.capacity()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if stack.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let lines = stack_lines(stack);
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let range = visible_range(lines.len(), visible_height, scroll_offset);

    let items: Vec<ListItem> = lines[range]
        .iter()
        .map(|line| ListItem::new(line.clone()))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

/// One styled line per cell, top of stack first
fn stack_lines(stack: &DataStack) -> Vec<Line<'static>> {
    let cells = stack.as_slice();
    cells
        .iter()
        .enumerate()
        .rev()
        .map(|(depth, &value)| {
            let is_top = depth + 1 == cells.len();
            let marker = if is_top { "→ " } else { "  " };
            let value_style = if is_top {
                Style::default()
                    .fg(DEFAULT_THEME.top_of_stack)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.number)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.top_of_stack)),
                Span::styled(format!("{:>2}: ", depth), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(format!("{:>11}", value), value_style),
                Span::styled(
                    format!("  {:08x}", value as u32),
                    Style::default().fg(DEFAULT_THEME.address),
                ),
            ])
        })
        .collect()
}
