//! Token stream pane
//!
//! Lists every token of the recorded session with its line and kind. The
//! token under the trace cursor is highlighted and kept in view.

use crate::lexer::Token;
use crate::trace::ScanTrace;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn token_style(token: &Token) -> Style {
    match token {
        Token::Number(_) => Style::default().fg(DEFAULT_THEME.number),
        Token::Identifier(_) => Style::default().fg(DEFAULT_THEME.identifier),
        Token::Keyword(_) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        Token::Operator(_) => Style::default().fg(DEFAULT_THEME.operator),
        Token::Punctuation(_) => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// First row to draw so that `position` stays inside a window of `height` rows.
pub(crate) fn scroll_to_keep_visible(offset: usize, position: usize, height: usize) -> usize {
    if position < offset {
        position
    } else if position >= offset + height {
        position + 1 - height
    } else {
        offset
    }
}

/// Render the token pane
pub fn render_tokens_pane(
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

    let block = Block::default()
        .title(format!(" Tokens ({}) ", trace.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if trace.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = scroll_to_keep_visible(*scroll_offset, trace.position(), visible_height);

    let lines: Vec<Line> = trace
        .steps()
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, step)| {
            let is_current = idx == trace.position();
            let marker = if is_current { "▶" } else { " " };
            let mut spans = vec![
                Span::styled(
                    format!("{} {:4} ", marker, step.line),
                    Style::default().fg(if is_current {
                        DEFAULT_THEME.secondary
                    } else {
                        DEFAULT_THEME.comment
                    }),
                ),
                Span::styled(
                    format!("{:<12}", step.token.kind_name()),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(step.token.to_string(), token_style(&step.token)),
            ];
            if step.new_word {
                spans.push(Span::styled(
                    "  +interned",
                    Style::default().fg(DEFAULT_THEME.success),
                ));
            }

            let line = Line::from(spans);
            if is_current {
                line.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_follows_position() {
        assert_eq!(scroll_to_keep_visible(0, 3, 10), 0);
        assert_eq!(scroll_to_keep_visible(0, 12, 10), 3);
        assert_eq!(scroll_to_keep_visible(5, 2, 10), 2);
    }
}
