//! Vision API client.
//!
//! One blocking chat-completions request per capture cycle: a fixed
//! instruction plus the capture as a base64 PNG data URL. No retries, no
//! streaming. Failures never escape [`VisionClient::analyze`] — they come back
//! as a tagged [`Analysis::Failure`] so the caller can branch on outcome kind
//! instead of sniffing strings.

use crate::config::Config;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Marker prefixed to every failure message shown in place of an answer.
pub const ERROR_PREFIX: &str = "Error processing image:";

/// Instruction sent with every capture.
const INSTRUCTION: &str = "Please perform the following tasks:\n\
    1. Analyze the provided image to extract all text accurately.\n\
    2. Examine the extracted text to determine if it contains a problem, question, or concept that needs explanation.\n\
    3. Provide a clear, step-by-step solution or explanation based on the extracted text.\n\
    4. Use markdown-like formatting for readability:\n\
    \x20  - Headings: '### '\n\
    \x20  - Subheadings: '## '\n\
    \x20  - Bullet points: '- '\n\
    \x20  - Code blocks: triple backticks (```)\n\
    \x20  - Inline bold: '**bold text**'\n\
    5. Return the final answer in plain text format with these cues.";

const MAX_TOKENS: u32 = 500;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Outcome of one analysis request.
///
/// `Failure` carries display-ready text, already prefixed with
/// [`ERROR_PREFIX`]; it is rendered where the answer would have gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    Answer(String),
    Failure(String),
}

impl Analysis {
    /// The text to display, whichever way the request went.
    pub fn into_text(self) -> String {
        match self {
            Analysis::Answer(text) | Analysis::Failure(text) => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Analysis::Failure(_))
    }
}

pub struct VisionClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl VisionClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            endpoint: endpoint_url(&config.api_base),
            api_key: config.api_key.clone(),
            model: config.model_name.clone(),
        }
    }

    /// Sends the encoded capture for analysis.
    ///
    /// Never panics and never returns an error: any failure (network, HTTP
    /// status, malformed body) is logged and folded into
    /// [`Analysis::Failure`].
    pub fn analyze(&self, base64_png: &str) -> Analysis {
        match self.request(base64_png) {
            Ok(answer) => {
                log::info!("Vision response: {}", answer);
                Analysis::Answer(answer)
            }
            Err(e) => {
                let message = failure_message(&e);
                log::error!("{}", message);
                Analysis::Failure(message)
            }
        }
    }

    fn request(&self, base64_png: &str) -> Result<String> {
        let body = build_request(&self.model, base64_png);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| AppError::vision(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(AppError::vision(format!(
                "API returned status {}: {}",
                status, detail
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| AppError::vision(format!("Malformed response body: {}", e)))?;

        extract_answer(parsed)
    }
}

/// Joins the configured base with the chat-completions path.
fn endpoint_url(api_base: &str) -> String {
    format!("{}/chat/completions", api_base.trim_end_matches('/'))
}

fn build_request<'a>(model: &'a str, base64_png: &str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content: vec![
                ContentPart::Text { text: INSTRUCTION },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:image/png;base64,{}", base64_png),
                    },
                },
            ],
        }],
        max_tokens: MAX_TOKENS,
    }
}

/// First completion choice, trimmed.
fn extract_answer(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .ok_or_else(|| AppError::vision("Response contained no choices"))
}

fn failure_message(error: &AppError) -> String {
    format!("{} {}", ERROR_PREFIX, error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_wire_format() {
        let body = build_request("gpt-4o", "QUJD");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["messages"][0]["role"], "user");

        let content = &json["messages"][0]["content"];
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(
            content[1]["image_url"]["url"],
            "data:image/png;base64,QUJD"
        );
    }

    #[test]
    fn extract_answer_takes_first_choice_trimmed() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [
                {"message": {"content": "  ### Answer\ntext  \n"}},
                {"message": {"content": "ignored"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(extract_answer(response).unwrap(), "### Answer\ntext");
    }

    #[test]
    fn extract_answer_rejects_empty_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(extract_answer(response).is_err());
    }

    #[test]
    fn failure_message_carries_fixed_marker() {
        let message = failure_message(&AppError::vision("boom"));
        assert!(message.starts_with(ERROR_PREFIX));
        assert!(message.contains("boom"));
    }

    #[test]
    fn analysis_tags_distinguish_outcomes() {
        assert!(Analysis::Failure("oops".into()).is_failure());
        assert!(!Analysis::Answer("fine".into()).is_failure());
        assert_eq!(Analysis::Answer("fine".into()).into_text(), "fine");
    }

    #[test]
    fn endpoint_url_tolerates_trailing_slash() {
        assert_eq!(
            endpoint_url("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            endpoint_url("https://api.openai.com/v1"),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
