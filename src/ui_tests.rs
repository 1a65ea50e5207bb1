#[cfg(test)]
mod workspace_integration_tests {
    use crate::ai::{parse_quiz, Credentials};
    use crate::ai_worker::spawn_ai_worker;
    use crate::models::{AiTask, App, Document};
    use crate::render::build_page;
    use crate::theme::THEMES;
    use crate::workspace::{apply_ai_response, request_ai};
    use crossbeam_channel::unbounded;
    use std::time::Duration;

    /// Remote quiz payload all the way to rendered output: parse, merge
    /// into a snapshot, render, check the answer marking.
    #[test]
    fn test_quiz_payload_to_rendered_page() {
        let raw = r#"```json
[
  {"question": "What strengthens a memory trace most?", "options": ["Re-reading", "Retrieval practice", "Highlighting"], "correctAnswer": 1}
]
```"#;
        let quiz = parse_quiz(raw).unwrap();
        let document = Document::new("Review", "# Memory").with_quiz(quiz);

        for theme in THEMES {
            let page = build_page(&document, theme);
            let quiz_text: Vec<String> = page
                .quiz
                .expect("quiz block expected")
                .iter()
                .map(|l| l.to_string())
                .collect();
            let correct = quiz_text
                .iter()
                .find(|t| t.contains("◉"))
                .expect("marked option expected");
            assert!(correct.contains("Retrieval practice"));
        }
    }

    /// With no credential configured the worker answers every request with
    /// a failure and the document survives untouched.
    #[test]
    fn test_missing_credential_roundtrip_leaves_document_unmodified() {
        let (request_tx, request_rx) = unbounded();
        let (response_tx, response_rx) = unbounded();
        let worker = spawn_ai_worker(Credentials::unconfigured(), response_tx, request_rx);

        let mut app = App::new(
            Document::new("Title", "Some study content"),
            false,
            request_tx,
            response_rx,
        );
        let before = app.document.clone();

        assert!(request_ai(&mut app, AiTask::GenerateQuiz));
        let response = app
            .ai_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("worker should answer");
        apply_ai_response(&mut app, response);

        assert_eq!(app.document, before);
        assert!(app.processing.is_none());

        drop(app);
        worker.join().unwrap();
    }

    /// Re-rendering after switching themes back and forth restores the
    /// original output bit for bit.
    #[test]
    fn test_theme_roundtrip_at_app_level() {
        let (request_tx, _request_rx) = unbounded();
        let (_response_tx, response_rx) = unbounded();
        let mut app = App::new(
            Document::new("Notes", "# H\n- a\n- b"),
            true,
            request_tx,
            response_rx,
        );

        let original = build_page(&app.document, app.theme());
        app.select_theme(1);
        let _ = build_page(&app.document, app.theme());
        app.select_theme(0);
        let restored = build_page(&app.document, app.theme());

        assert_eq!(original, restored);
    }
}
