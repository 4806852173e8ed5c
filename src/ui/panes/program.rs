//! Program pane rendering
//!
//! Shows the disassembled program one instruction per row:
//!
//! ```text
//! ▶ 0004  ADD
//!   0005  PUSH 5
//! ```
//!
//! The row of the next instruction to execute is highlighted and marked with
//! an arrow. The row under the user's cursor gets a lighter background. A
//! decode failure is rendered as a final error row at the offending pc.

use super::{border_style, clamp_scroll};
use crate::program::{Instruction, Listing};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Data needed to render the program pane
pub struct ProgramRenderData<'a> {
    pub listing: &'a Listing,
    /// Program counter of the next instruction to execute
    pub current_pc: usize,
    /// Program counter of the faulting instruction, once execution failed there
    pub error_pc: Option<usize>,
    /// Row index of the user's cursor
    pub cursor: usize,
}

fn instruction_spans(instruction: &Instruction) -> Vec<Span<'static>> {
    let mnemonic = Span::styled(
        format!("{:<5}", instruction.opcode().mnemonic()),
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
    );

    match instruction {
        Instruction::Push(value) => vec![
            mnemonic,
            Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.number)),
        ],
        _ => vec![mnemonic],
    }
}

/// Render the program pane
pub fn render_program_pane(
    frame: &mut Frame,
    area: Rect,
    data: ProgramRenderData,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Program ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let mut rows: Vec<ListItem> = Vec::new();
    let mut current_row = None;

    for (row, (pc, instruction)) in data.listing.instructions.iter().enumerate() {
        let is_current = *pc == data.current_pc;
        let is_error = data.error_pc == Some(*pc);
        if is_current {
            current_row = Some(row);
        }

        let marker = if is_error {
            Span::styled("✗ ", Style::default().fg(DEFAULT_THEME.error))
        } else if is_current {
            Span::styled("▶ ", Style::default().fg(DEFAULT_THEME.secondary))
        } else {
            Span::raw("  ")
        };

        let mut spans = vec![
            marker,
            Span::styled(
                format!("{:04}  ", pc),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ];
        spans.extend(instruction_spans(instruction));

        let style = if is_current {
            Style::default().bg(DEFAULT_THEME.current_line_bg)
        } else if row == data.cursor && is_focused {
            Style::default().bg(DEFAULT_THEME.cursor_bg)
        } else {
            Style::default()
        };

        rows.push(ListItem::new(Line::from(spans)).style(style));
    }

    if let Some(error) = &data.listing.error {
        let pc = error.pc().unwrap_or(0);
        if pc == data.current_pc {
            current_row = Some(rows.len());
        }
        rows.push(ListItem::new(Line::from(vec![
            Span::styled("✗ ", Style::default().fg(DEFAULT_THEME.error)),
            Span::styled(
                format!("{:04}  ", pc),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled(error.to_string(), Style::default().fg(DEFAULT_THEME.error)),
        ])));
    }

    if rows.is_empty() {
        rows.push(
            ListItem::new("(empty program)").style(Style::default().fg(DEFAULT_THEME.comment)),
        );
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the current instruction on screen while stepping
    if let Some(row) = current_row {
        if row < *scroll_offset {
            *scroll_offset = row;
        } else if row >= *scroll_offset + visible_height {
            *scroll_offset = row + 1 - visible_height;
        }
    }
    clamp_scroll(scroll_offset, rows.len(), visible_height);

    let visible: Vec<ListItem> = rows
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible).block(block), area);
}
