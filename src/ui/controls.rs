use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::models::{App, Focus, StatusLine};
use crate::theme::THEMES;
use crate::utils::{truncate_string, visual_cursor_position};

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn draw_controls(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Length(4),
        ])
        .split(area);

    draw_title_field(f, chunks[0], app);
    draw_content_editor(f, chunks[1], app);
    draw_theme_list(f, chunks[2], app);
    draw_status(f, chunks[3], app);
    draw_help(f, chunks[4], app);
}

fn draw_title_field(f: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.focus == Focus::Title;
    let title = Paragraph::new(app.document.title.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title("Title"),
    );
    f.render_widget(title, area);

    if focused {
        let width = area.width.saturating_sub(2) as usize;
        let (_, col) = visual_cursor_position(&app.document.title, app.title_cursor, width.max(1));
        f.set_cursor_position((area.x + 1 + col as u16, area.y + 1));
    }
}

fn draw_content_editor(f: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.focus == Focus::Content;
    let visible_height = area.height.saturating_sub(2) as usize;
    let text_width = (area.width.saturating_sub(2) as usize).max(1);

    let (cursor_row, cursor_col) =
        visual_cursor_position(&app.document.content, app.content_cursor, text_width);

    // Keep the cursor inside the viewport
    let mut scroll = app.content_scroll_y as usize;
    if cursor_row < scroll {
        scroll = cursor_row;
    } else if visible_height > 0 && cursor_row >= scroll + visible_height {
        scroll = cursor_row - visible_height + 1;
    }
    app.content_scroll_y = scroll as u16;

    let placeholder = app.document.content.is_empty();
    let body: &str = if placeholder {
        "[Paste your raw study material here...]"
    } else {
        app.document.content.as_str()
    };

    let editor = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .scroll((app.content_scroll_y, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(focused))
                .title("Content"),
        );
    f.render_widget(editor, area);

    if focused && !placeholder {
        let cursor_x = area.x + 1 + cursor_col as u16;
        let cursor_y = area.y + 1 + (cursor_row as u16).saturating_sub(app.content_scroll_y);
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

fn draw_theme_list(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Themes;
    let items: Vec<ListItem> = THEMES
        .iter()
        .enumerate()
        .map(|(i, theme)| {
            let marker = if i == app.theme_index { "● " } else { "○ " };
            let style = if i == app.theme_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{}{}", marker, theme.name)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title("Theme"),
    );
    f.render_widget(list, area);
}

/// Status block content: the current activity on the first line, plus the
/// missing-credential warning on its own line. The warning never goes away
/// while the key is absent; editing, theming and export still work.
fn status_lines(app: &App, max_len: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(task) = app.processing {
        lines.push(Line::from(Span::styled(
            format!("Working: {}...", task.label()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    } else if let Some(status) = &app.status {
        match status {
            StatusLine::Info(message) => lines.push(Line::from(Span::styled(
                truncate_string(message, max_len),
                Style::default().fg(Color::Green),
            ))),
            StatusLine::Error(message) => lines.push(Line::from(Span::styled(
                truncate_string(message, max_len),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))),
        }
    } else {
        lines.push(Line::from(Span::styled(
            "Ready".to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    if !app.credentials_configured {
        lines.push(Line::from(Span::styled(
            "OPENROUTER_API_KEY not set - AI commands will fail".to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }

    lines
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let max_len = (area.width.saturating_sub(4) as usize).max(8);
    let status = Paragraph::new(status_lines(app, max_len))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, area);
}

fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn draw_help(f: &mut Frame, area: Rect, app: &App) {
    let ai_style = if app.processing.is_some() {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };

    let mut help_text = Vec::new();
    help_text.push(Line::from(vec![
        key_span("^R"),
        Span::styled(" Restructure  ", ai_style),
        key_span("^S"),
        Span::styled(" Summarize  ", ai_style),
        key_span("^K"),
        Span::styled(" Key points  ", ai_style),
        key_span("^G"),
        Span::styled(" Quiz", ai_style),
    ]));
    help_text.push(Line::from(vec![
        key_span("Tab"),
        Span::from(" Focus  "),
        key_span("^E"),
        Span::from(" Export  "),
        key_span("^L"),
        Span::from(" Clear  "),
        key_span("Esc"),
        Span::from(" Quit"),
    ]));

    let help = Paragraph::new(help_text)
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AiOutput, AiResponse, AiTask, Document};
    use crate::workspace::apply_ai_response;
    use crossbeam_channel::unbounded;

    const WARNING: &str = "OPENROUTER_API_KEY not set";

    fn app_with_credentials(configured: bool) -> App {
        let (ai_tx, _request_rx) = unbounded();
        let (_response_tx, ai_rx) = unbounded();
        App::new(Document::new("Title", "Content"), configured, ai_tx, ai_rx)
    }

    fn status_text(app: &App) -> Vec<String> {
        status_lines(app, 60).iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_credential_warning_shown_while_idle() {
        let app = app_with_credentials(false);
        assert!(status_text(&app).iter().any(|t| t.contains(WARNING)));
    }

    #[test]
    fn test_credential_warning_survives_completed_operation() {
        let mut app = app_with_credentials(false);

        apply_ai_response(
            &mut app,
            AiResponse::Completed {
                task: AiTask::Summarize,
                output: AiOutput::Summary("tl;dr".to_string()),
            },
        );

        let text = status_text(&app);
        assert!(text.iter().any(|t| t.contains("Summarize complete")));
        assert!(text.iter().any(|t| t.contains(WARNING)));
    }

    #[test]
    fn test_credential_warning_survives_failure_message() {
        let mut app = app_with_credentials(false);

        apply_ai_response(
            &mut app,
            AiResponse::Failed {
                task: AiTask::GenerateQuiz,
                error: "API key is missing".to_string(),
            },
        );

        let text = status_text(&app);
        assert!(text.iter().any(|t| t.contains("Quiz failed")));
        assert!(text.iter().any(|t| t.contains(WARNING)));
    }

    #[test]
    fn test_no_warning_when_key_is_configured() {
        let app = app_with_credentials(true);
        let text = status_text(&app);
        assert!(!text.iter().any(|t| t.contains(WARNING)));
        assert!(text.iter().any(|t| t.contains("Ready")));
    }
}
