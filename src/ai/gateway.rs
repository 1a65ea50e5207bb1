use async_trait::async_trait;
use thiserror::Error;

use crate::models::Question;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("API key is missing. Set OPENROUTER_API_KEY in the environment.")]
    MissingCredential,

    #[error("AI request failed: {0}")]
    Request(String),

    #[error("invalid AI response: {0}")]
    InvalidResponse(String),
}

/// API credential handed to the gateway at construction. Read from the
/// environment exactly once, in `main`; the gateway itself never touches
/// ambient configuration.
#[derive(Debug, Clone)]
pub struct Credentials {
    api_key: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
        }
    }

    /// A credentials value with no key, for flows that must degrade
    /// gracefully rather than refuse to start.
    pub fn unconfigured() -> Self {
        Self { api_key: None }
    }

    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENROUTER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn api_key(&self) -> Result<&str, GatewayError> {
        self.api_key
            .as_deref()
            .ok_or(GatewayError::MissingCredential)
    }
}

/// One chat round trip against the remote model. Seam between the gateway
/// and the transport so parsing can be exercised with a mock.
#[async_trait]
pub trait Completion {
    async fn complete(&self, instruction: &str, input: &str) -> Result<String, GatewayError>;
}

const RESTRUCTURE_INSTRUCTION: &str = "You are an editor of exam-revision study material. Rewrite the user's text \
as clean, well-structured Markdown study notes.

Rules:
1. Use exactly one level-1 heading (#) as the document title.
2. Use level-2 headings (##) for major sections and level-3 (###) for \
individual points.
3. Mark core concepts and likely exam points in **bold**.
4. Turn enumerations into unordered (-) or ordered (1.) lists.
5. Keep an academic, objective tone and fix unclear phrasing.
6. Output raw Markdown only, with no ```markdown fences.";

const SUMMARIZE_INSTRUCTION: &str = "You are a study assistant. Write a concise TL;DR summary of the user's text.

Rules:
1. At most 100 characters.
2. Distill the core idea; do not enumerate.
3. Plain, objective tone. Output the summary text only.";

const KEY_POINTS_INSTRUCTION: &str = "You are a study assistant. Extract the 3-5 most important exam points or \
core concepts from the user's text.

Respond ONLY with a valid JSON array of strings (no markdown, no extra \
text), each entry as terse as possible.";

const QUIZ_INSTRUCTION: &str = "You are an exam question writer. Based on the user's text, design 3 \
single-choice questions that test understanding of the core concepts.

Respond ONLY with a valid JSON array in this exact shape (no markdown, no \
extra text):
[{\"question\": \"...\", \"options\": [\"...\", \"...\"], \"correctAnswer\": 0}]
\"correctAnswer\" is the zero-based index of the correct option.";

/// Stateless wrapper around the remote generation service. All four
/// operations are single best-effort round trips that report failure as a
/// typed [`GatewayError`]; presentation is the caller's job.
#[derive(Debug)]
pub struct AiGateway<C> {
    client: C,
}

impl AiGateway<super::client::OpenRouterClient> {
    pub fn new(credentials: &Credentials) -> Result<Self, GatewayError> {
        let client = super::client::OpenRouterClient::new(credentials.api_key()?)?;
        Ok(Self { client })
    }
}

impl<C: Completion> AiGateway<C> {
    pub fn with_client(client: C) -> Self {
        Self { client }
    }

    /// Rewrite the text as structured Markdown. Falls back to the original
    /// input when the service answers with no text at all.
    pub async fn restructure(&self, text: &str) -> Result<String, GatewayError> {
        let output = self.client.complete(RESTRUCTURE_INSTRUCTION, text).await?;
        if output.trim().is_empty() {
            Ok(text.to_string())
        } else {
            Ok(output)
        }
    }

    /// Produce a short summary. The ~100 character cap is requested in the
    /// instruction, not enforced here.
    pub async fn summarize(&self, text: &str) -> Result<String, GatewayError> {
        let output = self.client.complete(SUMMARIZE_INSTRUCTION, text).await?;
        Ok(output.trim().to_string())
    }

    pub async fn extract_key_points(&self, text: &str) -> Result<Vec<String>, GatewayError> {
        let output = self.client.complete(KEY_POINTS_INSTRUCTION, text).await?;
        parse_key_points(&output)
    }

    pub async fn generate_quiz(&self, text: &str) -> Result<Vec<Question>, GatewayError> {
        let output = self.client.complete(QUIZ_INSTRUCTION, text).await?;
        parse_quiz(&output)
    }
}

/// Strip markdown fences and surrounding chatter, keeping the outermost
/// JSON array or object.
fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    if let Some(start) = cleaned.find('[')
        && let Some(end) = cleaned.rfind(']')
        && start < end
    {
        cleaned = cleaned[start..=end].to_string();
    } else if let Some(start) = cleaned.find('{')
        && let Some(end) = cleaned.rfind('}')
        && start < end
    {
        cleaned = cleaned[start..=end].to_string();
    }

    cleaned.trim().to_string()
}

pub fn parse_key_points(response: &str) -> Result<Vec<String>, GatewayError> {
    let cleaned = clean_json_response(response);
    let points: Vec<String> = serde_json::from_str(&cleaned).map_err(|e| {
        GatewayError::InvalidResponse(format!("expected a JSON array of strings: {}", e))
    })?;
    Ok(points)
}

pub fn parse_quiz(response: &str) -> Result<Vec<Question>, GatewayError> {
    let cleaned = clean_json_response(response);
    let quiz: Vec<Question> = serde_json::from_str(&cleaned).map_err(|e| {
        GatewayError::InvalidResponse(format!("expected a JSON array of questions: {}", e))
    })?;

    for (i, question) in quiz.iter().enumerate() {
        if question.question.trim().is_empty() {
            return Err(GatewayError::InvalidResponse(format!(
                "question {} has empty text",
                i + 1
            )));
        }
        if question.options.is_empty() {
            return Err(GatewayError::InvalidResponse(format!(
                "question {} has no options",
                i + 1
            )));
        }
        if question.correct_answer >= question.options.len() {
            return Err(GatewayError::InvalidResponse(format!(
                "question {} marks answer {} but has only {} options",
                i + 1,
                question.correct_answer,
                question.options.len()
            )));
        }
    }

    Ok(quiz)
}

#[cfg(test)]
pub(crate) struct MockCompletion {
    pub response: Result<String, String>,
}

#[cfg(test)]
#[async_trait]
impl Completion for MockCompletion {
    async fn complete(&self, _instruction: &str, _input: &str) -> Result<String, GatewayError> {
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(e) => Err(GatewayError::Request(e.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_is_typed() {
        let credentials = Credentials::unconfigured();
        assert!(!credentials.is_configured());
        assert!(matches!(
            credentials.api_key(),
            Err(GatewayError::MissingCredential)
        ));
    }

    #[test]
    fn test_configured_key_is_returned() {
        let credentials = Credentials::new("sk-test");
        assert!(credentials.is_configured());
        assert_eq!(credentials.api_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_clean_json_response_plain_array() {
        let cleaned = clean_json_response(r#"["a","b"]"#);
        assert_eq!(cleaned, r#"["a","b"]"#);
    }

    #[test]
    fn test_clean_json_response_fenced() {
        let raw = "```json\n[\"a\", \"b\"]\n```";
        assert_eq!(clean_json_response(raw), r#"["a", "b"]"#);
    }

    #[test]
    fn test_clean_json_response_with_chatter() {
        let raw = r#"Here are your points: ["a", "b"] hope that helps"#;
        assert_eq!(clean_json_response(raw), r#"["a", "b"]"#);
    }

    #[test]
    fn test_parse_key_points_valid() {
        let points = parse_key_points(r#"["first", "second", "third"]"#).unwrap();
        assert_eq!(points, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_parse_key_points_malformed_is_invalid_response() {
        let result = parse_key_points("this is not json at all");
        assert!(matches!(result, Err(GatewayError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_quiz_valid() {
        let raw = r#"[{"question":"Q1?","options":["A","B","C"],"correctAnswer":1}]"#;
        let quiz = parse_quiz(raw).unwrap();
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz[0].correct_answer, 1);
    }

    #[test]
    fn test_parse_quiz_rejects_out_of_bounds_answer() {
        let raw = r#"[{"question":"Q1?","options":["A","B"],"correctAnswer":5}]"#;
        let result = parse_quiz(raw);
        assert!(matches!(result, Err(GatewayError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_quiz_rejects_empty_options() {
        let raw = r#"[{"question":"Q1?","options":[],"correctAnswer":0}]"#;
        assert!(matches!(
            parse_quiz(raw),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_quiz_rejects_empty_question_text() {
        let raw = r#"[{"question":"  ","options":["A"],"correctAnswer":0}]"#;
        assert!(matches!(
            parse_quiz(raw),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_restructure_falls_back_to_input_on_empty_text() {
        let gateway = AiGateway::with_client(MockCompletion {
            response: Ok("   ".to_string()),
        });
        let result = gateway.restructure("original text").await.unwrap();
        assert_eq!(result, "original text");
    }

    #[tokio::test]
    async fn test_restructure_propagates_transport_failure() {
        let gateway = AiGateway::with_client(MockCompletion {
            response: Err("connection refused".to_string()),
        });
        let result = gateway.restructure("original text").await;
        assert!(matches!(result, Err(GatewayError::Request(_))));
    }

    #[tokio::test]
    async fn test_summarize_trims_output() {
        let gateway = AiGateway::with_client(MockCompletion {
            response: Ok("  a short summary \n".to_string()),
        });
        assert_eq!(gateway.summarize("text").await.unwrap(), "a short summary");
    }

    #[tokio::test]
    async fn test_malformed_quiz_surfaces_as_error_not_panic() {
        let gateway = AiGateway::with_client(MockCompletion {
            response: Ok("not json".to_string()),
        });
        let result = gateway.generate_quiz("text").await;
        assert!(matches!(result, Err(GatewayError::InvalidResponse(_))));
    }
}
