//! Source pane rendering with syntax highlighting
//!
//! Displays the scanned input with line numbers and highlights the line of
//! the token under the trace cursor. If scanning stopped with an error and
//! the cursor is on the last token, the error line is drawn in red.
//!
//! The highlighter is a per-line character walk that carries open block
//! comments over to the following lines; it does not reuse the scanner so
//! that half-typed or erroneous input still renders.

use crate::env::BasicType;
use crate::lexer::Keyword;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Syntax highlighting for one source line
///
/// `in_block_comment` is true when the line starts inside a `/* ... */`
/// comment and is left true if the line ends inside one.
fn highlight_source_code(line: &str, in_block_comment: &mut bool) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    if *in_block_comment {
        i = push_block_comment(&chars, 0, 0, &mut spans, in_block_comment);
    }

    while i < chars.len() {
        let c = chars[i];

        if c == '/' && chars.get(i + 1) == Some(&'/') {
            flush_word(&mut spans, &mut current_word);
            let rest: String = chars[i..].iter().collect();
            spans.push(Span::styled(rest, Style::default().fg(DEFAULT_THEME.comment)));
            break;
        }

        if c == '/' && chars.get(i + 1) == Some(&'*') {
            flush_word(&mut spans, &mut current_word);
            *in_block_comment = true;
            // The terminator must follow the opener: `/*/` stays open.
            i = push_block_comment(&chars, i, i + 2, &mut spans, in_block_comment);
            continue;
        }

        if !c.is_alphanumeric() {
            flush_word(&mut spans, &mut current_word);

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                '<' | '>' | '=' | '!' => Style::default().fg(DEFAULT_THEME.operator),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word);
    Line::from(spans)
}

/// Push the block comment text starting at `start` up to and including the
/// first `*/` at or after `search_from`, or to the end of the line. Returns
/// the index just past the comment.
fn push_block_comment(
    chars: &[char],
    start: usize,
    search_from: usize,
    spans: &mut Vec<Span<'_>>,
    in_block_comment: &mut bool,
) -> usize {
    let end = (search_from..chars.len().saturating_sub(1))
        .find(|&j| chars[j] == '*' && chars[j + 1] == '/')
        .map(|j| j + 2);
    if end.is_some() {
        *in_block_comment = false;
    }
    let end = end.unwrap_or(chars.len());

    if end > start {
        let text: String = chars[start..end].iter().collect();
        spans.push(Span::styled(text, Style::default().fg(DEFAULT_THEME.comment)));
    }
    end
}

fn flush_word(spans: &mut Vec<Span<'_>>, word: &mut String) {
    if !word.is_empty() {
        let style = get_word_style(word);
        spans.push(Span::styled(std::mem::take(word), style));
    }
}

fn get_word_style(word: &str) -> Style {
    if word.starts_with(|c: char| c.is_ascii_digit()) {
        Style::default().fg(DEFAULT_THEME.number)
    } else if Keyword::ALL.iter().any(|k| k.lexeme() == word) {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else if BasicType::from_name(word).is_some() {
        Style::default().fg(DEFAULT_THEME.type_name)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current_line: usize,
    is_error: bool,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Keep the current line centred until the user scrolls
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if current_line > 0 && current_line <= total_lines {
        let target_line_idx = current_line - 1;
        scroll_state.offset = target_line_idx.saturating_sub(target_row);

        if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            scroll_state.offset = scroll_state.offset.min(max_scroll);
        } else {
            scroll_state.offset = 0;
        }
    }

    // Highlight from the top so block comments opened above the view carry over
    let mut in_block_comment = false;
    let highlighted: Vec<Line> = lines
        .iter()
        .map(|line| highlight_source_code(line, &mut in_block_comment))
        .collect();

    let visible_lines: Vec<Line> = highlighted
        .into_iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, mut content_line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;
            let line_num_str = format!("{:4} ", line_num);

            let num_style = if is_current && is_error {
                // Error line: red background, all highlighting overridden
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(ratatui::style::Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut content_line.spans {
                    span.style = error_style;
                }
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                let current_style = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(current_style);
                }
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_texts(line: &Line<'_>) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_splits_words_and_comments() {
        let line = highlight_source_code("int x1; // note", &mut false);
        assert_eq!(span_texts(&line), ["int", " ", "x1", ";", " ", "// note"]);
        assert_eq!(line.spans[0].style.fg, Some(DEFAULT_THEME.type_name));
        assert_eq!(line.spans[5].style.fg, Some(DEFAULT_THEME.comment));
    }

    #[test]
    fn test_highlight_keywords_and_numbers() {
        let line = highlight_source_code("true<=42", &mut false);
        assert_eq!(span_texts(&line), ["true", "<", "=", "42"]);
        assert_eq!(line.spans[0].style.fg, Some(DEFAULT_THEME.keyword));
        assert_eq!(line.spans[3].style.fg, Some(DEFAULT_THEME.number));
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let mut in_comment = false;
        let first = highlight_source_code("x /* open", &mut in_comment);
        assert!(in_comment);
        assert_eq!(span_texts(&first), ["x", " ", "/* open"]);

        let middle = highlight_source_code("  still int", &mut in_comment);
        assert!(in_comment);
        assert_eq!(span_texts(&middle), ["  still int"]);
        assert_eq!(middle.spans[0].style.fg, Some(DEFAULT_THEME.comment));

        let last = highlight_source_code("done */ y", &mut in_comment);
        assert!(!in_comment);
        assert_eq!(span_texts(&last), ["done */", " ", "y"]);
        assert_eq!(last.spans[2].style.fg, Some(DEFAULT_THEME.fg));
    }

    #[test]
    fn test_block_comment_closed_on_same_line() {
        let mut in_comment = false;
        let line = highlight_source_code("/*/ x */ 1", &mut in_comment);
        assert!(!in_comment);
        assert_eq!(span_texts(&line), ["/*/ x */", " ", "1"]);
    }
}
