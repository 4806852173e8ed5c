//! Operand stack pane rendering
//!
//! Values are listed top first with their slot index, so the value the next
//! `ADD`/`SUB` pops as `right` is always the first row.

use super::{border_style, clamp_scroll};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the stack pane; `stack` is ordered bottom to top
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    stack: &[i64],
    capacity: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Operand Stack ({}/{}) ", stack.len(), capacity))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let mut rows: Vec<ListItem> = Vec::new();

    if stack.is_empty() {
        rows.push(ListItem::new("(empty)").style(Style::default().fg(DEFAULT_THEME.comment)));
    } else {
        for (slot, value) in stack.iter().enumerate().rev() {
            let is_top = slot + 1 == stack.len();
            let value_style = if is_top {
                Style::default()
                    .fg(DEFAULT_THEME.return_value)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };

            let mut spans = vec![
                Span::styled(
                    format!("[{:>3}] ", slot),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(value.to_string(), value_style),
            ];
            if is_top {
                spans.push(Span::styled(
                    "  ← top",
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }

            rows.push(ListItem::new(Line::from(spans)));
        }
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, rows.len(), visible_height);

    let visible: Vec<ListItem> = rows
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible).block(block), area);
}
