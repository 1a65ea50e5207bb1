use chrono::Datelike;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::models::Document;
use crate::render::markdown::render_markdown;
use crate::theme::{HeaderStyle, LayoutKind, Theme};

const BRAND: &str = "STUDYSHEET";
const RULE_WIDTH: usize = 48;

/// The fully rendered page: a pure function of (Document, Theme). Building
/// it twice from the same inputs yields an identical value.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub layout: LayoutKind,
    pub header: Vec<Line<'static>>,
    /// Quote-styled summary banner above the body. `None` in the Cornell
    /// layout (where the summary lives in the cue pane) and whenever the
    /// summary is empty.
    pub summary_banner: Option<Vec<Line<'static>>>,
    /// Cue pane content, present only in the Cornell layout.
    pub cue_pane: Option<Vec<Line<'static>>>,
    pub body: Vec<Line<'static>>,
    /// Self-check quiz block, present only when the document has quiz items.
    pub quiz: Option<Vec<Line<'static>>>,
}

pub fn build_page(document: &Document, theme: &Theme) -> PageView {
    let cornell = theme.layout == LayoutKind::Cornell;

    let summary_banner = if !cornell && !document.generated_summary.is_empty() {
        Some(build_summary_banner(&document.generated_summary, theme))
    } else {
        None
    };

    let cue_pane = cornell.then(|| build_cue_pane(document, theme));

    let quiz = if document.generated_quiz.is_empty() {
        None
    } else {
        Some(build_quiz_block(document, theme))
    };

    PageView {
        layout: theme.layout,
        header: build_header(document, theme),
        summary_banner,
        cue_pane,
        body: render_markdown(&document.content, theme),
        quiz,
    }
}

fn rule(theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        theme.rule_glyph.to_string().repeat(RULE_WIDTH),
        Style::default().fg(theme.primary),
    ))
}

fn title_or_default(document: &Document) -> String {
    if document.title.trim().is_empty() {
        "Untitled".to_string()
    } else {
        document.title.clone()
    }
}

fn build_header(document: &Document, theme: &Theme) -> Vec<Line<'static>> {
    let title_style = Style::default()
        .fg(theme.primary)
        .add_modifier(theme.heading_modifier);

    match theme.header {
        HeaderStyle::Centered => vec![
            Line::from(Span::styled(
                format!("—  {}  —", BRAND),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "GRADUATE EXAM REVIEW MATERIAL".to_string(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            )),
            rule(theme),
            Line::from(""),
            Line::from(Span::styled(title_or_default(document), title_style)),
            Line::from(""),
        ],
        HeaderStyle::Masthead => {
            // Taken from the document, not the clock, so the page stays a
            // pure function of (Document, Theme)
            let year = chrono::DateTime::from_timestamp_millis(document.last_updated)
                .map(|t| t.year())
                .unwrap_or(1970);
            vec![
                Line::from(Span::styled(title_or_default(document), title_style)),
                Line::from(Span::styled(
                    format!("{} REVIEW NOTES · {}", year, BRAND),
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::BOLD | Modifier::DIM),
                )),
                rule(theme),
                Line::from(""),
            ]
        }
        HeaderStyle::BrandBar => vec![
            Line::from(vec![
                Span::styled(
                    "▍ ".to_string(),
                    Style::default().fg(theme.primary),
                ),
                Span::styled(
                    BRAND.to_string(),
                    Style::default()
                        .fg(theme.primary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "   Date: ______ / ______".to_string(),
                    Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
                ),
            ]),
            Line::from(Span::styled(title_or_default(document), title_style)),
            rule(theme),
            Line::from(""),
        ],
    }
}

fn build_summary_banner(summary: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            "❝ ".to_string(),
            Style::default().fg(theme.primary).add_modifier(Modifier::DIM),
        ),
        Span::styled(
            summary.to_string(),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        ),
    ])];
    lines.push(Line::from(""));
    lines
}

/// The narrow Cornell cue pane: a key-points card, then the summary card
/// when a summary exists.
fn build_cue_pane(document: &Document, theme: &Theme) -> Vec<Line<'static>> {
    let label_style = Style::default()
        .fg(theme.primary)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(Span::styled("KEY POINTS".to_string(), label_style))];

    if document.generated_key_points.is_empty() {
        lines.push(Line::from(Span::styled(
            "No key points yet...".to_string(),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )));
    } else {
        for (i, point) in document.generated_key_points.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}. ", i + 1),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::DIM),
                ),
                Span::from(point.clone()),
            ]));
        }
    }

    if !document.generated_summary.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("SUMMARY".to_string(), label_style)));
        lines.push(Line::from(Span::styled(
            document.generated_summary.clone(),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

/// Self-check card appended after the body. Answers are always visible:
/// the correct option carries a filled indicator, the rest stay outlined.
fn build_quiz_block(document: &Document, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "SELF-CHECK QUIZ".to_string(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, question) in document.generated_quiz.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:02}. ", i + 1),
                Style::default().add_modifier(Modifier::BOLD | Modifier::DIM),
            ),
            Span::styled(
                question.question.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));

        for (j, option) in question.options.iter().enumerate() {
            let letter = (b'A' + (j as u8 % 26)) as char;
            if j == question.correct_answer {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("    ◉ {}) ", letter),
                        Style::default()
                            .fg(theme.primary)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        option.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]));
            } else {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("    ○ {}) ", letter),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::from(option.clone()),
                ]));
            }
        }
        lines.push(Line::from(""));
    }

    lines
}

/// Split lines across `columns` roughly evenly, front-loaded, preserving
/// order. The flow analogue of balanced multi-column layout.
pub fn balance_columns(lines: Vec<Line<'static>>, columns: usize) -> Vec<Vec<Line<'static>>> {
    if columns <= 1 {
        return vec![lines];
    }
    let per_column = lines.len().div_ceil(columns);
    let mut result: Vec<Vec<Line<'static>>> = Vec::with_capacity(columns);
    let mut rest = lines;
    for _ in 0..columns {
        let take = per_column.min(rest.len());
        let tail = rest.split_off(take);
        result.push(rest);
        rest = tail;
    }
    result
}
