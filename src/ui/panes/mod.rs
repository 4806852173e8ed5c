//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`program`]: Disassembled program with the current instruction highlighted
//! - [`stack`]: Operand stack, top first
//! - [`status`]: Status bar with keybindings, step counter and outcome
//!
//! Each pane module exports a primary `render_*` function that draws from
//! borrowed state; scroll offsets live in [`crate::ui::App`].

pub mod program;
pub mod stack;
pub mod status;

pub use program::{render_program_pane, ProgramRenderData};
pub use stack::render_stack_pane;
pub use status::{render_status_bar, StatusRenderData};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style shared by all bordered panes
fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Clamp `offset` so that a list of `total` rows fills `visible` rows
fn clamp_scroll(offset: &mut usize, total: usize, visible: usize) {
    if total > visible {
        *offset = (*offset).min(total - visible);
    } else {
        *offset = 0;
    }
}
