//! Gemini backend over the Generative Language REST API (v1beta).
//!
//! One `generateContent` call per turn: the system instruction, the full
//! history and the new user turn travel together. No timeout and no retry
//! is applied here; a slow or failing backend is surfaced to the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use potato_core::config::LlmConfig;

use crate::conversation::LanguageModel;
use crate::error::LlmError;
use crate::types::{ChatMessage, Role};

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

/// Gemini client bound to one model and one system instruction.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    system_instruction: String,
}

impl GeminiClient {
    /// Build a client from the `[llm]` configuration section.
    pub fn new(api_key: impl Into<String>, config: &LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            system_instruction: config.system_instruction.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_request(&self, history: &[ChatMessage], turn: &str) -> GenerateContentRequest {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|m| text_content(m.role, &m.content))
            .collect();
        contents.push(text_content(Role::User, turn));

        let system_instruction = if self.system_instruction.trim().is_empty() {
            None
        } else {
            Some(Content {
                role: None,
                parts: vec![Part {
                    text: self.system_instruction.clone(),
                }],
            })
        };

        GenerateContentRequest {
            system_instruction,
            contents,
        }
    }
}

fn text_content(role: Role, text: &str) -> Content {
    Content {
        role: Some(role.as_str().to_string()),
        parts: vec![Part {
            text: text.to_string(),
        }],
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(resp: GenerateContentResponse) -> Result<String, LlmError> {
    if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(LlmError::Blocked(reason));
    }

    let candidate = resp.candidates.into_iter().next().ok_or(LlmError::EmptyResponse)?;
    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_default();
        return match reason.as_str() {
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => {
                Err(LlmError::Blocked(reason.clone()))
            }
            _ => Err(LlmError::EmptyResponse),
        };
    }
    Ok(text)
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, history: &[ChatMessage], turn: &str) -> Result<String, LlmError> {
        let body = self.build_request(history, turn);

        tracing::debug!(
            model = %self.model,
            history = history.len(),
            turn_len = turn.len(),
            "Sending generateContent request"
        );

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
        extract_text(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
