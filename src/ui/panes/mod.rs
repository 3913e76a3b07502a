//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`stack`]: Data stack, top first, in decimal and hex
//! - [`memory`]: Hex/ASCII dump around the watch address
//! - [`terminal`]: Monitor transcript and the input line
//! - [`status`]: Status bar with keybindings and stack depth
//!
//! Each pane module exports a `render_*` function taking the frame, its
//! area and the data it shows. Scroll offsets are owned by the app and
//! clamped here.

pub mod memory;
pub mod stack;
pub mod status;
pub mod terminal;

pub use memory::{memory_rows, render_memory_pane, MemoryRenderData};
pub use stack::render_stack_pane;
pub use status::render_status_bar;
pub use terminal::{render_input_line, render_terminal_pane};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style shared by every pane
pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Clamp `offset` so the last page is full, and return the visible range
pub(crate) fn visible_range(total: usize, height: usize, offset: &mut usize) -> std::ops::Range<usize> {
    if total > height {
        *offset = (*offset).min(total - height);
    } else {
        *offset = 0;
    }
    *offset..(*offset + height).min(total)
}
