use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::io;
use std::path::Path;

use crate::export::export_document;
use crate::logger;
use crate::models::{AiOutput, AiRequest, AiResponse, AiTask, App, AppState, Focus, StatusLine};
use crate::theme::THEMES;

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Hand one AI task to the worker. Returns false when the invocation is
/// rejected: a task is already in flight, or there is no content to send.
pub fn request_ai(app: &mut App, task: AiTask) -> bool {
    if app.processing.is_some() {
        logger::log(&format!(
            "Rejected {}: another task is in flight",
            task.label()
        ));
        return false;
    }
    if app.document.content.trim().is_empty() {
        return false;
    }

    let request = AiRequest::Process {
        task,
        content: app.document.content.clone(),
    };
    match app.ai_tx.send(request) {
        Ok(()) => {
            app.processing = Some(task);
            app.status = Some(StatusLine::Info(format!(
                "{} in progress...",
                task.label()
            )));
            true
        }
        Err(_) => {
            app.status = Some(StatusLine::Error(
                "AI worker is not available".to_string(),
            ));
            false
        }
    }
}

/// Merge a worker response into the document. Success replaces exactly one
/// field through a fresh snapshot; failure leaves the document untouched
/// and surfaces the reason on the status line.
pub fn apply_ai_response(app: &mut App, response: AiResponse) {
    match response {
        AiResponse::Completed { task, output } => {
            app.document = match output {
                AiOutput::Restructured(text) => {
                    let next = app.document.with_content(text);
                    app.content_cursor = app.content_cursor.min(next.content.chars().count());
                    next
                }
                AiOutput::Summary(summary) => app.document.with_summary(summary),
                AiOutput::KeyPoints(points) => app.document.with_key_points(points),
                AiOutput::Quiz(quiz) => app.document.with_quiz(quiz),
            };
            app.status = Some(StatusLine::Info(format!("{} complete", task.label())));
        }
        AiResponse::Failed { task, error } => {
            logger::log_error(&format!("{} failed: {}", task.label(), error));
            app.status = Some(StatusLine::Error(format!(
                "{} failed: {}",
                task.label(),
                error
            )));
        }
    }
    app.processing = None;
}

pub fn handle_workspace_input(
    app: &mut App,
    key: KeyEvent,
    state: &mut AppState,
) -> io::Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('r') => {
                request_ai(app, AiTask::Restructure);
            }
            KeyCode::Char('s') => {
                request_ai(app, AiTask::Summarize);
            }
            KeyCode::Char('k') => {
                request_ai(app, AiTask::ExtractKeyPoints);
            }
            KeyCode::Char('g') => {
                request_ai(app, AiTask::GenerateQuiz);
            }
            KeyCode::Char('l') => {
                app.document = app.document.with_content("");
                app.content_cursor = 0;
                app.content_scroll_y = 0;
            }
            KeyCode::Char('e') => match export_document(&app.document, Path::new(".")) {
                Ok(path) => {
                    app.status = Some(StatusLine::Info(format!(
                        "Exported to {}",
                        path.display()
                    )));
                }
                Err(e) => {
                    logger::log_error(&format!("Export failed: {}", e));
                    app.status = Some(StatusLine::Error(format!("Export failed: {}", e)));
                }
            },
            _ => {}
        }
        return Ok(());
    }

    match key.code {
        KeyCode::Esc => {
            *state = AppState::QuitConfirm;
        }
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Title => Focus::Content,
                Focus::Content => Focus::Themes,
                Focus::Themes => Focus::Title,
            };
        }
        KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::Title => Focus::Themes,
                Focus::Content => Focus::Title,
                Focus::Themes => Focus::Content,
            };
        }
        KeyCode::PageUp => {
            app.preview_scroll_y = app.preview_scroll_y.saturating_sub(4);
        }
        KeyCode::PageDown => {
            // Upper bound is applied at draw time, where the width is known
            app.preview_scroll_y = app.preview_scroll_y.saturating_add(4);
        }
        _ => match app.focus {
            Focus::Title => handle_title_key(app, key.code),
            Focus::Content => handle_content_key(app, key.code),
            Focus::Themes => handle_theme_key(app, key.code),
        },
    }

    Ok(())
}

fn handle_title_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(c) => {
            let mut title = app.document.title.clone();
            title.insert(byte_index(&title, app.title_cursor), c);
            app.document = app.document.with_title(title);
            app.title_cursor += 1;
        }
        KeyCode::Backspace => {
            if app.title_cursor > 0 {
                let mut title = app.document.title.clone();
                let idx = byte_index(&title, app.title_cursor - 1);
                title.remove(idx);
                app.document = app.document.with_title(title);
                app.title_cursor -= 1;
            }
        }
        KeyCode::Left => {
            app.title_cursor = app.title_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let len = app.document.title.chars().count();
            app.title_cursor = (app.title_cursor + 1).min(len);
        }
        KeyCode::Home => app.title_cursor = 0,
        KeyCode::End => app.title_cursor = app.document.title.chars().count(),
        _ => {}
    }
}

fn handle_content_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(c) => {
            let mut content = app.document.content.clone();
            content.insert(byte_index(&content, app.content_cursor), c);
            app.document = app.document.with_content(content);
            app.content_cursor += 1;
        }
        KeyCode::Enter => {
            let mut content = app.document.content.clone();
            content.insert(byte_index(&content, app.content_cursor), '\n');
            app.document = app.document.with_content(content);
            app.content_cursor += 1;
        }
        KeyCode::Backspace => {
            if app.content_cursor > 0 {
                let mut content = app.document.content.clone();
                let idx = byte_index(&content, app.content_cursor - 1);
                content.remove(idx);
                app.document = app.document.with_content(content);
                app.content_cursor -= 1;
            }
        }
        KeyCode::Left => {
            app.content_cursor = app.content_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let len = app.document.content.chars().count();
            app.content_cursor = (app.content_cursor + 1).min(len);
        }
        KeyCode::Home => app.content_cursor = 0,
        KeyCode::End => app.content_cursor = app.document.content.chars().count(),
        _ => {}
    }
}

fn handle_theme_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up => {
            if app.theme_index > 0 {
                app.select_theme(app.theme_index - 1);
            }
        }
        KeyCode::Down => {
            if app.theme_index < THEMES.len() - 1 {
                app.select_theme(app.theme_index + 1);
            }
        }
        _ => {}
    }
}
