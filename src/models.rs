use chrono::Utc;
use crossbeam_channel::{Receiver, Sender};
use serde::Deserialize;

use crate::theme::{Theme, THEMES};

/// Single-choice quiz item produced by the AI gateway. The gateway
/// guarantees `correct_answer` indexes into `options` before one of these
/// reaches the document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: usize,
}

/// The editable aggregate driving rendering. Mutations never happen in
/// place: every `with_*` constructor returns a fresh snapshot with
/// `last_updated` refreshed, so a render always sees one consistent state.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub content: String,
    pub generated_summary: String,
    pub generated_key_points: Vec<String>,
    pub generated_quiz: Vec<Question>,
    pub last_updated: i64,
}

impl Document {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            generated_summary: String::new(),
            generated_key_points: Vec::new(),
            generated_quiz: Vec::new(),
            last_updated: Utc::now().timestamp_millis(),
        }
    }

    fn touched(mut self) -> Self {
        self.last_updated = Utc::now().timestamp_millis();
        self
    }

    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
        .touched()
    }

    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
        .touched()
    }

    pub fn with_summary(&self, summary: impl Into<String>) -> Self {
        Self {
            generated_summary: summary.into(),
            ..self.clone()
        }
        .touched()
    }

    pub fn with_key_points(&self, points: Vec<String>) -> Self {
        Self {
            generated_key_points: points,
            ..self.clone()
        }
        .touched()
    }

    pub fn with_quiz(&self, quiz: Vec<Question>) -> Self {
        Self {
            generated_quiz: quiz,
            ..self.clone()
        }
        .touched()
    }
}

pub const INITIAL_TITLE: &str = "Study Notes: Memory and Learning";

pub const INITIAL_CONTENT: &str = "Paste your raw study material here...

# How Memory Works

## Encoding and Retrieval

### Encoding
Information enters long-term memory through **elaborative encoding**: \
connecting new material to what you already know. Shallow repetition \
produces weak traces.

### Retrieval practice
Recalling information strengthens it far more than re-reading. Testing \
yourself *is* studying.

## Spaced Repetition

**Spacing** reviews over growing intervals beats massed practice:
- Review within a day of first contact
- Review again after two or three days
- Stretch the interval each time recall succeeds

## Key Terms
1. **Working memory**: the small buffer holding what you are thinking about now.
2. **Consolidation**: the slow stabilization of a memory trace.
3. **Interleaving**: mixing problem types within one session.";

/// One of the four remote AI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTask {
    Restructure,
    Summarize,
    ExtractKeyPoints,
    GenerateQuiz,
}

impl AiTask {
    pub fn label(&self) -> &'static str {
        match self {
            AiTask::Restructure => "Restructure",
            AiTask::Summarize => "Summarize",
            AiTask::ExtractKeyPoints => "Key points",
            AiTask::GenerateQuiz => "Quiz",
        }
    }
}

#[derive(Debug)]
pub enum AiRequest {
    Process { task: AiTask, content: String },
}

/// Typed payload of a completed AI task, one variant per document field it
/// may replace.
#[derive(Debug)]
pub enum AiOutput {
    Restructured(String),
    Summary(String),
    KeyPoints(Vec<String>),
    Quiz(Vec<Question>),
}

#[derive(Debug)]
pub enum AiResponse {
    Completed { task: AiTask, output: AiOutput },
    Failed { task: AiTask, error: String },
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    Workspace,
    QuitConfirm,
}

/// Which control currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    Content,
    Themes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusLine {
    Info(String),
    Error(String),
}

/// Top-level application state. Owns the single document slot and the
/// active theme selection; AI work goes through the worker channels.
#[derive(Debug)]
pub struct App {
    pub document: Document,
    pub theme_index: usize,
    pub focus: Focus,
    pub title_cursor: usize,
    pub content_cursor: usize,
    pub content_scroll_y: u16,
    pub preview_scroll_y: u16,
    /// The in-flight AI task, if any. Doubles as the invocation guard:
    /// no new task may start while this is `Some`.
    pub processing: Option<AiTask>,
    pub status: Option<StatusLine>,
    pub credentials_configured: bool,
    pub ai_tx: Sender<AiRequest>,
    pub ai_rx: Receiver<AiResponse>,
}

impl App {
    pub fn new(
        document: Document,
        credentials_configured: bool,
        ai_tx: Sender<AiRequest>,
        ai_rx: Receiver<AiResponse>,
    ) -> Self {
        Self {
            content_cursor: document.content.chars().count(),
            title_cursor: document.title.chars().count(),
            document,
            theme_index: 0,
            focus: Focus::Content,
            content_scroll_y: 0,
            preview_scroll_y: 0,
            processing: None,
            status: None,
            credentials_configured,
            ai_tx,
            ai_rx,
        }
    }

    pub fn theme(&self) -> &'static Theme {
        &THEMES[self.theme_index]
    }

    pub fn select_theme(&mut self, index: usize) {
        if index < THEMES.len() {
            self.theme_index = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    pub fn test_app() -> App {
        let (ai_tx, _request_rx) = unbounded::<AiRequest>();
        let (_response_tx, ai_rx) = unbounded::<AiResponse>();
        App::new(Document::new("Title", "Content"), true, ai_tx, ai_rx)
    }

    #[test]
    fn test_document_snapshots_are_independent() {
        let original = Document::new("A", "body");
        let updated = original.with_summary("tl;dr");

        assert_eq!(original.generated_summary, "");
        assert_eq!(updated.generated_summary, "tl;dr");
        assert_eq!(updated.content, "body");
    }

    #[test]
    fn test_each_mutation_replaces_one_field() {
        let doc = Document::new("T", "C");

        let with_points = doc.with_key_points(vec!["p1".to_string()]);
        assert_eq!(with_points.title, "T");
        assert_eq!(with_points.content, "C");
        assert!(with_points.generated_quiz.is_empty());

        let quiz = vec![Question {
            question: "Q?".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_answer: 0,
        }];
        let with_quiz = doc.with_quiz(quiz.clone());
        assert_eq!(with_quiz.generated_quiz, quiz);
        assert!(with_quiz.generated_key_points.is_empty());
    }

    #[test]
    fn test_theme_selection_never_touches_document() {
        let mut app = test_app();
        let before = app.document.clone();

        app.select_theme(2);
        assert_eq!(app.theme_index, 2);
        assert_eq!(app.document, before);

        app.select_theme(0);
        assert_eq!(app.document, before);
    }

    #[test]
    fn test_select_theme_out_of_range_is_ignored() {
        let mut app = test_app();
        app.select_theme(99);
        assert_eq!(app.theme_index, 0);
    }

    #[test]
    fn test_question_deserializes_camel_case_index() {
        let json = r#"{"question":"Q?","options":["A","B"],"correctAnswer":1}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_answer, 1);
    }
}
