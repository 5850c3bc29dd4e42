//! Cover letter generation — the boundary between the form and the model.
//!
//! Flow: validate_request → build_prompt → GenerationService::write_letter → GenerationResult.
//!
//! Exactly one outbound call per validated request, no retries. Every failure is
//! converted into `GenerationResult::Failure`; nothing escapes this boundary as an error.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::generation::models::{
    CoverLetterForm, FailureKind, FieldViolation, GenerationRequest, GenerationResult,
};
use crate::generation::prompts::{
    COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM_TEMPLATE, NO_LINK, PROJECT_BLOCK_TEMPLATE,
};
use crate::generation::validation::validate_request;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input data.";
pub const TIMEOUT_MESSAGE: &str = "The generation service timed out.";
pub const FALLBACK_MESSAGE: &str = "Failed to generate cover letter.";

// ────────────────────────────────────────────────────────────────────────────
// Service trait
// ────────────────────────────────────────────────────────────────────────────

/// The external text-generation service. Takes a fully rendered prompt and
/// returns the letter text.
///
/// Carried in `AppState` as `Arc<dyn GenerationService>`.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn write_letter(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Deserialize)]
struct LetterOutput {
    cover_letter: String,
}

#[async_trait]
impl GenerationService for LlmClient {
    async fn write_letter(&self, prompt: &str) -> Result<String, LlmError> {
        let system = COVER_LETTER_SYSTEM_TEMPLATE.replace("{json_only}", JSON_ONLY_SYSTEM);
        let output: LetterOutput = self.call_json(prompt, &system).await?;
        Ok(output.cover_letter)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid input: {} violation(s)", .0.len())]
    InvalidInput(Vec<FieldViolation>),

    #[error("generation service failed: {0}")]
    Service(#[from] LlmError),
}

impl GenerationError {
    /// The message shown to the user.
    pub fn reason(&self) -> String {
        match self {
            GenerationError::InvalidInput(_) => INVALID_INPUT_MESSAGE.to_string(),
            GenerationError::Service(LlmError::Api { message, .. })
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            GenerationError::Service(e) if e.is_timeout() => TIMEOUT_MESSAGE.to_string(),
            GenerationError::Service(_) => FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            GenerationError::InvalidInput(_) => FailureKind::InvalidInput,
            GenerationError::Service(_) => FailureKind::Service,
        }
    }
}

impl From<GenerationError> for GenerationResult {
    fn from(err: GenerationError) -> Self {
        GenerationResult::Failure {
            kind: err.kind(),
            reason: err.reason(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Re-validates the form, renders the prompt and asks the service for a letter.
pub async fn generate_cover_letter(
    service: &dyn GenerationService,
    form: CoverLetterForm,
) -> GenerationResult {
    let request_id = Uuid::new_v4();

    let request = match validate_request(form) {
        Ok(request) => request,
        Err(violations) => {
            info!(
                %request_id,
                violations = violations.len(),
                "Rejected cover letter request before generation"
            );
            return GenerationError::InvalidInput(violations).into();
        }
    };

    info!(
        %request_id,
        projects = request.projects.len(),
        "Generating cover letter"
    );

    match write_letter(service, &request).await {
        Ok(cover_letter) => {
            info!(%request_id, chars = cover_letter.chars().count(), "Cover letter generated");
            GenerationResult::Success { cover_letter }
        }
        Err(e) => {
            error!(%request_id, "Cover letter generation failed: {e}");
            e.into()
        }
    }
}

async fn write_letter(
    service: &dyn GenerationService,
    request: &GenerationRequest,
) -> Result<String, GenerationError> {
    let prompt = build_prompt(request);
    let letter = service.write_letter(&prompt).await?;

    if letter.trim().is_empty() {
        return Err(LlmError::EmptyContent.into());
    }
    Ok(letter)
}

/// Fills the cover letter template with the validated request.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let projects: String = request
        .projects
        .iter()
        .map(|project| {
            let skills = project.skills.join(", ");
            fill_template(
                PROJECT_BLOCK_TEMPLATE,
                &[
                    ("name", project.name.as_str()),
                    ("description", project.description.as_str()),
                    ("link", project.link.as_deref().unwrap_or(NO_LINK)),
                    ("skills", skills.as_str()),
                    ("details", project.details.as_str()),
                ],
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("applicant_name", request.applicant_name.as_str()),
            ("job_description", request.job_description.as_str()),
            ("projects", projects.as_str()),
        ],
    )
}

/// Single-pass `{key}` substitution. Inserted values are never re-scanned, so
/// user text containing `{projects}` or similar stays literal.
fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let replaced = after.find('}').and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, end))
        });

        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::generation::models::{PortfolioProject, ProjectInput, SkillsInput};

    const JD: &str = "We are hiring a frontend engineer to build accessible, fast \
        web applications with React and TypeScript.";

    /// Returns a canned outcome and records every prompt it receives.
    struct StubService {
        outcome: fn() -> Result<String, LlmError>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl StubService {
        fn new(outcome: fn() -> Result<String, LlmError>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationService for StubService {
        async fn write_letter(&self, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.outcome)()
        }
    }

    fn form() -> CoverLetterForm {
        CoverLetterForm {
            applicant_name: "Jane Doe".to_string(),
            job_description: JD.to_string(),
            projects: vec![ProjectInput {
                name: "Portfolio Site".to_string(),
                description: "A personal site".to_string(),
                link: "https://example.com".to_string(),
                skills: SkillsInput::Text("React, TypeScript".to_string()),
                details: "Built and deployed a responsive portfolio".to_string(),
            }],
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            applicant_name: "Jane Doe".to_string(),
            job_description: JD.to_string(),
            projects: vec![PortfolioProject {
                name: "Portfolio Site".to_string(),
                description: "A personal site".to_string(),
                link: Some("https://example.com".to_string()),
                skills: vec!["React".to_string(), "TypeScript".to_string()],
                details: "Built and deployed a responsive portfolio".to_string(),
            }],
        }
    }

    #[test]
    fn test_prompt_contains_every_input_verbatim() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("The user's name is Jane Doe."));
        assert!(prompt.contains(JD));
        assert!(prompt.contains("Project Name: Portfolio Site"));
        assert!(prompt.contains("Description: A personal site"));
        assert!(prompt.contains("Link: https://example.com"));
        assert!(prompt.contains("Relevant Skills: React, TypeScript"));
        assert!(prompt.contains("Details: Built and deployed a responsive portfolio"));
        assert!(prompt.contains("call to action"));
        assert!(!prompt.contains("{projects}"));
    }

    #[test]
    fn test_prompt_lists_projects_in_order_and_marks_missing_link() {
        let mut req = request();
        req.projects.push(PortfolioProject {
            name: "CLI Tool".to_string(),
            description: "Terminal helper".to_string(),
            link: None,
            skills: vec![],
            details: "Parses logs".to_string(),
        });

        let prompt = build_prompt(&req);
        let first = prompt.find("Project Name: Portfolio Site").unwrap();
        let second = prompt.find("Project Name: CLI Tool").unwrap();
        assert!(first < second);
        assert!(prompt.contains("Link: (none)"));
    }

    #[test]
    fn test_user_text_with_placeholders_stays_literal() {
        let mut req = request();
        req.applicant_name = "{job_description}".to_string();
        let prompt = build_prompt(&req);
        assert!(prompt.contains("The user's name is {job_description}."));
        assert_eq!(prompt.matches(JD).count(), 1);
    }

    #[test]
    fn test_fill_template_leaves_unknown_braces() {
        let out = fill_template("{a} {b} {", &[("a", "1")]);
        assert_eq!(out, "1 {b} {");
    }

    #[tokio::test]
    async fn test_success_passes_letter_through_unmodified() {
        let stub = StubService::new(|| Ok("  Dear Hiring Manager,\n\nHire me.  ".to_string()));
        let result = generate_cover_letter(&stub, form()).await;
        assert_eq!(
            result,
            GenerationResult::Success {
                cover_letter: "  Dear Hiring Manager,\n\nHire me.  ".to_string()
            }
        );
        assert_eq!(stub.calls(), 1);
        assert!(stub.prompts.lock().unwrap()[0].contains("Jane Doe"));
    }

    #[tokio::test]
    async fn test_invalid_input_never_calls_service() {
        let stub = StubService::new(|| Ok("unused".to_string()));
        let mut input = form();
        input.applicant_name = "J".to_string();

        let result = generate_cover_letter(&stub, input).await;
        assert_eq!(
            result,
            GenerationResult::Failure {
                kind: FailureKind::InvalidInput,
                reason: INVALID_INPUT_MESSAGE.to_string(),
            }
        );
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_message_is_surfaced() {
        let stub = StubService::new(|| {
            Err(LlmError::Api {
                status: 400,
                message: "prompt is too long".to_string(),
            })
        });
        let result = generate_cover_letter(&stub, form()).await;
        assert_eq!(
            result,
            GenerationResult::Failure {
                kind: FailureKind::Service,
                reason: "prompt is too long".to_string(),
            }
        );
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_provider_message_falls_back() {
        let stub = StubService::new(|| {
            Err(LlmError::Api {
                status: 500,
                message: String::new(),
            })
        });
        let result = generate_cover_letter(&stub, form()).await;
        assert!(matches!(
            result,
            GenerationResult::Failure { ref reason, .. } if reason == FALLBACK_MESSAGE
        ));
    }

    #[tokio::test]
    async fn test_blank_letter_is_a_failure() {
        let stub = StubService::new(|| Ok("   \n".to_string()));
        let result = generate_cover_letter(&stub, form()).await;
        assert_eq!(
            result,
            GenerationResult::Failure {
                kind: FailureKind::Service,
                reason: FALLBACK_MESSAGE.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_output_is_a_failure() {
        let stub = StubService::new(|| {
            Err(LlmError::Parse(
                serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
            ))
        });
        let result = generate_cover_letter(&stub, form()).await;
        assert_eq!(
            result,
            GenerationResult::Failure {
                kind: FailureKind::Service,
                reason: FALLBACK_MESSAGE.to_string(),
            }
        );
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_llm_client_timeout_yields_failure() {
        use std::time::Duration;
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({
                        "content": [{ "type": "text", "text": "{\"cover_letter\": \"late\"}" }],
                        "usage": { "input_tokens": 1, "output_tokens": 1 }
                    }))
                    .set_delay(Duration::from_millis(500)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new(
            "test-key".to_string(),
            format!("{}/v1/messages", server.uri()),
            Duration::from_millis(50),
        )
        .unwrap();

        let result = generate_cover_letter(&client, form()).await;
        assert_eq!(
            result,
            GenerationResult::Failure {
                kind: FailureKind::Service,
                reason: TIMEOUT_MESSAGE.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_llm_client_returns_letter_field() {
        use std::time::Duration;
        use wiremock::matchers::{body_string_contains, method};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("Portfolio Site"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{ "type": "text", "text": "{\"cover_letter\": \"Dear team,\\n\\nThanks.\"}" }],
                "usage": { "input_tokens": 1, "output_tokens": 1 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new(
            "test-key".to_string(),
            format!("{}/v1/messages", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap();

        let result = generate_cover_letter(&client, form()).await;
        assert_eq!(
            result,
            GenerationResult::Success {
                cover_letter: "Dear team,\n\nThanks.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_llm_client_proxy_error_page_yields_fallback() {
        use std::time::Duration;
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(502)
                    .set_body_string("<html><body><h1>502 Bad Gateway</h1></body></html>"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new(
            "test-key".to_string(),
            format!("{}/v1/messages", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap();

        let result = generate_cover_letter(&client, form()).await;
        assert_eq!(
            result,
            GenerationResult::Failure {
                kind: FailureKind::Service,
                reason: FALLBACK_MESSAGE.to_string(),
            }
        );
    }
}
