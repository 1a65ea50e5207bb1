use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

use crate::theme::Theme;

/// Transform Markdown block elements into theme-decorated lines.
/// Supports: # / ## / ### headings, - and * lists, numbered lists,
/// **bold**, *italic*, `code`, > blockquotes and --- rules.
pub fn render_markdown(content: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut result: Vec<Line<'static>> = Vec::new();
    let numbered_re = Regex::new(r"^(\d+)\.\s+(.*)$").unwrap();

    for line in content.lines() {
        let trimmed = line.trim();

        if let Some(heading) = trimmed.strip_prefix("### ") {
            result.push(Line::from(vec![
                Span::styled("▎", Style::default().fg(theme.primary)),
                Span::styled(
                    heading.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]));
            continue;
        }
        if let Some(heading) = trimmed.strip_prefix("## ") {
            result.push(Line::from(vec![
                Span::styled(
                    format!("{} ", theme.heading_glyph),
                    Style::default().fg(theme.primary),
                ),
                Span::styled(
                    heading.to_string(),
                    Style::default()
                        .fg(theme.primary)
                        .add_modifier(theme.heading_modifier),
                ),
            ]));
            continue;
        }
        if let Some(heading) = trimmed.strip_prefix("# ") {
            result.push(Line::from(Span::styled(
                heading.to_string(),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(theme.heading_modifier),
            )));
            continue;
        }

        // Horizontal rule
        if trimmed == "---" || trimmed == "***" {
            result.push(Line::from(Span::styled(
                theme.rule_glyph.to_string().repeat(40),
                Style::default().add_modifier(Modifier::DIM),
            )));
            continue;
        }

        // Blockquote with a decorative quote glyph
        if let Some(quoted) = trimmed.strip_prefix("> ") {
            let mut spans = vec![Span::styled(
                "❝ ".to_string(),
                Style::default().fg(theme.primary).add_modifier(Modifier::DIM),
            )];
            spans.extend(restyle(
                parse_inline(quoted, theme),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            ));
            result.push(Line::from(spans));
            continue;
        }

        // Unordered list items get the theme bullet instead of the marker
        if let Some(item) = trimmed.strip_prefix("- ").or(trimmed.strip_prefix("* ")) {
            let mut spans = vec![Span::styled(
                format!("  {} ", theme.bullet_glyph),
                Style::default().fg(theme.primary),
            )];
            spans.extend(parse_inline(item, theme));
            result.push(Line::from(spans));
            continue;
        }

        if let Some(caps) = numbered_re.captures(trimmed) {
            let num = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let item = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let mut spans = vec![Span::styled(
                format!("  {}. ", num),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            spans.extend(parse_inline(item, theme));
            result.push(Line::from(spans));
            continue;
        }

        if trimmed.is_empty() {
            result.push(Line::from(""));
        } else {
            result.push(Line::from(parse_inline(line, theme)));
        }
    }

    result
}

/// Parse inline markdown: **bold**, *italic*, `code`.
pub fn parse_inline(text: &str, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut remaining = text;

    let inline_re = Regex::new(r"(\*\*(.+?)\*\*|\*(.+?)\*|`([^`]+)`)").unwrap();

    let bold_style = if theme.accent_bold {
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    while !remaining.is_empty() {
        if let Some(m) = inline_re.find(remaining) {
            if m.start() > 0 {
                spans.push(Span::from(remaining[..m.start()].to_string()));
            }

            let matched = m.as_str();
            let caps = inline_re.captures(matched).unwrap();

            if let Some(bold) = caps.get(2) {
                spans.push(Span::styled(bold.as_str().to_string(), bold_style));
            } else if let Some(italic) = caps.get(3) {
                spans.push(Span::styled(
                    italic.as_str().to_string(),
                    Style::default().add_modifier(Modifier::ITALIC),
                ));
            } else if let Some(code) = caps.get(4) {
                spans.push(Span::styled(
                    code.as_str().to_string(),
                    Style::default().add_modifier(Modifier::DIM),
                ));
            }

            remaining = &remaining[m.end()..];
        } else {
            spans.push(Span::from(remaining.to_string()));
            break;
        }
    }

    if spans.is_empty() {
        spans.push(Span::from(text.to_string()));
    }

    spans
}

fn restyle(spans: Vec<Span<'static>>, base: Style) -> Vec<Span<'static>> {
    spans
        .into_iter()
        .map(|span| {
            let style = base.patch(span.style);
            Span::styled(span.content, style)
        })
        .collect()
}
