//! Intern table pane
//!
//! Shows the words known to the scanner at the current trace position: the
//! reserved words first, then identifiers in order of first appearance.
//! The word under the trace cursor is marked.

use crate::trace::ScanTrace;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the intern table pane
pub fn render_words_pane(
    frame: &mut Frame,
    area: Rect,
    trace: &ScanTrace,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let words = trace.words_known();
    let block = Block::default()
        .title(format!(" Intern Table ({}) ", words.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let current_word = trace.current().and_then(|step| step.token.word());

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if words.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(words.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let lines: Vec<Line> = words
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|word| {
            let is_current = current_word.is_some_and(|w| w.same_instance(word));
            let (kind, kind_style) = match word.keyword() {
                Some(_) => ("reserved", Style::default().fg(DEFAULT_THEME.keyword)),
                None => ("id", Style::default().fg(DEFAULT_THEME.comment)),
            };
            let mut name_style = Style::default().fg(DEFAULT_THEME.identifier);
            if is_current {
                name_style = name_style
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD);
            }
            Line::from(vec![
                Span::styled(format!(" {:<9}", kind), kind_style),
                Span::styled(word.lexeme().to_string(), name_style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
