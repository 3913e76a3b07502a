//! Memory pane rendering
//!
//! Shows the target's memory as `dmem`-style lines starting at the watch
//! address. The line holding the last address a command touched is
//! highlighted. Rendering stops at the first line the target cannot read.

use super::border_style;
use crate::interpreter::builtins::{align_to_line, format_byte_line};
use crate::interpreter::constants::DUMP_LINE_BYTES;
use crate::memory::{Target, Width};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const ADDRESS_COLUMNS: usize = 9;
// Two bytes of hex plus a space per byte, and the "| " divider
const HEX_COLUMNS: usize = DUMP_LINE_BYTES as usize * 3 + 2;

/// Data needed to render the memory pane
pub struct MemoryRenderData<'a> {
    pub memory: &'a dyn Target,
    /// First address shown (aligned down to a dump line)
    pub watch: u32,
    /// Address to highlight, if any
    pub last_address: Option<u32>,
}

/// Read up to `rows` dump lines starting at `start`
///
/// Returns `(line address, formatted line)` pairs; stops early at the end of
/// readable memory.
pub fn memory_rows(memory: &dyn Target, start: u32, rows: usize) -> Vec<(u32, String)> {
    let mut address = align_to_line(start);
    let mut result = Vec::with_capacity(rows);
    for _ in 0..rows {
        let mut bytes = [0u8; DUMP_LINE_BYTES as usize];
        let readable = bytes.iter_mut().enumerate().all(|(x, byte)| {
            match memory.read(address, x as i32, Width::Byte) {
                Ok(value) => {
                    *byte = value as u8;
                    true
                }
                Err(_) => false,
            }
        });
        if !readable {
            break;
        }
        result.push((address, format_byte_line(address, &bytes)));
        match address.checked_add(DUMP_LINE_BYTES) {
            Some(next) => address = next,
            None => break,
        }
    }
    result
}

/// Render the memory pane
pub fn render_memory_pane(frame: &mut Frame, area: Rect, data: MemoryRenderData, is_focused: bool) {
    let block = Block::default()
        .title(format!(" Memory @ {:08x} ({}) ", data.watch, data.memory.name()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let rows = memory_rows(data.memory, data.watch, visible_height);

    if rows.is_empty() {
        let paragraph = Paragraph::new("(address not readable)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.error));
        frame.render_widget(paragraph, area);
        return;
    }

    let highlight_line = data.last_address.map(align_to_line);
    let items: Vec<ListItem> = rows
        .into_iter()
        .map(|(address, text)| {
            // "AAAAAAAA " then the hex columns, then the text column
            let (addr_part, rest) = text.split_at(ADDRESS_COLUMNS);
            let (hex_part, text_part) = rest.split_at(HEX_COLUMNS.min(rest.len()));
            let line = Line::from(vec![
                Span::styled(addr_part.to_string(), Style::default().fg(DEFAULT_THEME.address)),
                Span::styled(hex_part.to_string(), Style::default().fg(DEFAULT_THEME.number)),
                Span::styled(text_part.to_string(), Style::default().fg(DEFAULT_THEME.text)),
            ]);
            let item = ListItem::new(line);
            if highlight_line == Some(address) {
                item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::SimulatedMemory;

    #[test]
    fn test_rows_stop_at_end_of_memory() {
        let mut memory = SimulatedMemory::new(48);
        memory.write(0x20, 0x41, Width::Byte).unwrap();

        let rows = memory_rows(&memory, 0x15, 8);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, 0x10);
        assert_eq!(rows[1].0, 0x20);
        assert!(rows[1].1.starts_with("00000020 41 00"));
        assert!(rows[1].1.ends_with("A....... ........"));
    }

    #[test]
    fn test_unreadable_start_yields_nothing() {
        let memory = SimulatedMemory::new(16);
        assert!(memory_rows(&memory, 0x100, 4).is_empty());
    }
}
