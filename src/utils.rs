use ratatui::text::Line;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Cap a string at `max_len` characters, ellipsizing. Counts chars rather
/// than bytes so multibyte text never splits mid-character.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// One visual row of wrapped text: its rendered content plus the char-index
/// range of the source text it covers.
struct VisualRow {
    rendered: String,
    start: usize,
    end: usize,
}

/// Simulate ratatui's `Wrap { trim: true }` over the text: break at explicit
/// newlines and at `max_width` display columns, trimming trailing spaces.
fn wrap_visual_rows(text: &str, max_width: usize) -> Vec<VisualRow> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    let mut row_start = 0;

    for (char_idx, ch) in text.chars().enumerate() {
        if ch == '\n' {
            rows.push(VisualRow {
                rendered: current.trim_end().to_string(),
                start: row_start,
                end: char_idx,
            });
            current = String::new();
            current_width = 0;
            row_start = char_idx + 1;
            continue;
        }

        let char_width = ch.width().unwrap_or(1);
        if current_width + char_width > max_width && current_width > 0 {
            rows.push(VisualRow {
                rendered: current.trim_end().to_string(),
                start: row_start,
                end: char_idx,
            });
            current = ch.to_string();
            current_width = char_width;
            row_start = char_idx;
        } else {
            current.push(ch);
            current_width += char_width;
        }
    }

    let total = text.chars().count();
    if !current.is_empty() || text.ends_with('\n') || text.is_empty() {
        rows.push(VisualRow {
            rendered: current.trim_end().to_string(),
            start: row_start,
            end: total,
        });
    }

    rows
}

/// Visual (row, column) of a cursor sitting at `cursor` (a char index) once
/// the text is wrapped to `max_width` columns. The column is a display
/// width, so wide characters advance it by two.
pub fn visual_cursor_position(text: &str, cursor: usize, max_width: usize) -> (usize, usize) {
    if text.is_empty() || cursor == 0 {
        return (0, 0);
    }

    let rows = wrap_visual_rows(text, max_width);

    for (row_idx, row) in rows.iter().enumerate() {
        if cursor >= row.start && cursor <= row.end {
            let col: usize = text
                .chars()
                .skip(row.start)
                .take(cursor - row.start)
                .map(|c| c.width().unwrap_or(1))
                .sum();
            return (row_idx, col);
        }
    }

    // Cursor past the end of the text
    let last_idx = rows.len().saturating_sub(1);
    let last_width = rows.last().map(|r| r.rendered.width()).unwrap_or(0);
    (last_idx, last_width)
}

/// Wrapped height of styled lines at the given width, for scroll bounds.
pub fn wrapped_height(lines: &[Line], max_width: usize) -> usize {
    if max_width == 0 {
        return lines.len();
    }
    lines
        .iter()
        .map(|line| {
            let width = line.width();
            if width == 0 {
                1
            } else {
                width.div_ceil(max_width)
            }
        })
        .sum()
}

pub fn max_scroll(content_height: usize, visible_height: usize) -> u16 {
    content_height.saturating_sub(visible_height) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_short_input() {
        assert_eq!(truncate_string("short", 20), "short");
    }

    #[test]
    fn test_truncate_string_long_input() {
        let result = truncate_string("This is a very long string that should be cut", 20);
        assert_eq!(result, "This is a very lo...");
        assert!(result.len() <= 20);
    }

    #[test]
    fn test_truncate_string_cuts_multibyte_on_char_boundary() {
        let message = "Exported to ./记忆与学习笔记整理复习资料汇总-20260829-120000.md";
        let result = truncate_string(message, 40);
        assert!(result.ends_with("..."));
        assert!(result.chars().count() <= 40);

        assert_eq!(truncate_string("记忆与学习", 4), "记...");
        assert_eq!(truncate_string("记忆与学习", 5), "记忆与学习");
    }

    #[test]
    fn test_cursor_at_origin() {
        assert_eq!(visual_cursor_position("", 0, 10), (0, 0));
        assert_eq!(visual_cursor_position("hello", 0, 10), (0, 0));
    }

    #[test]
    fn test_cursor_on_single_row() {
        assert_eq!(visual_cursor_position("hello", 3, 10), (0, 3));
    }

    #[test]
    fn test_cursor_wraps_to_second_row() {
        let text = "This is a long line that should wrap";
        let (row, col) = visual_cursor_position(text, 15, 10);
        assert_eq!(row, 1);
        assert_eq!(col, 5);
    }

    #[test]
    fn test_cursor_after_explicit_newline() {
        let (row, col) = visual_cursor_position("Line 1\nLine 2", 8, 20);
        assert_eq!(row, 1);
        assert_eq!(col, 1);
    }

    #[test]
    fn test_cursor_beyond_text_clamps_to_end() {
        let (row, col) = visual_cursor_position("Hi", 10, 10);
        assert_eq!(row, 0);
        assert_eq!(col, 2);
    }

    #[test]
    fn test_cursor_at_exact_wrap_boundary() {
        let text = "0123456789A";
        assert_eq!(visual_cursor_position(text, 10, 10), (0, 10));
        assert_eq!(visual_cursor_position(text, 11, 10), (1, 1));
    }

    #[test]
    fn test_wide_characters_advance_two_columns() {
        // Each CJK char occupies two display columns
        let (row, col) = visual_cursor_position("记忆", 2, 10);
        assert_eq!(row, 0);
        assert_eq!(col, 4);
    }

    #[test]
    fn test_wrap_rows_split_at_newlines() {
        let rows = wrap_visual_rows("Line 1\nLine 2\nLine 3", 20);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].rendered, "Line 1");
        assert_eq!(rows[2].rendered, "Line 3");
    }

    #[test]
    fn test_wrapped_height_counts_overflow_rows() {
        let lines = vec![Line::from("0123456789012345"), Line::from("short")];
        // 16 cols at width 10 -> 2 rows, plus 1
        assert_eq!(wrapped_height(&lines, 10), 3);
    }

    #[test]
    fn test_wrapped_height_empty_line_is_one_row() {
        let lines = vec![Line::from("")];
        assert_eq!(wrapped_height(&lines, 10), 1);
    }

    #[test]
    fn test_max_scroll() {
        assert_eq!(max_scroll(30, 10), 20);
        assert_eq!(max_scroll(5, 10), 0);
    }
}
