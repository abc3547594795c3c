//! OpenAI-compatible adapter for issue extraction.
//!
//! Supports OpenAI API, Azure OpenAI, and local Ollama instances.
//! Implements `AiPort` with robust JSON parsing and markdown stripping.

use crate::domain::{DomainError, DraftIssue, ImageAttachment};
use crate::ports::AiPort;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// OpenAI-compatible AI adapter.
///
/// Can be configured to work with:
/// - OpenAI API (api.openai.com)
/// - Azure OpenAI
/// - Ollama (localhost)
/// - Any OpenAI-compatible API with vision input
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - Model name (e.g., "gpt-4o", "llama3.2-vision")
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    /// Build the system prompt with JSON schema instructions.
    fn system_prompt() -> &'static str {
        "You extract actionable issues from user input (text + screenshots). \
         Return STRICT JSON only with this schema:\n\
         {\"issues\":[{\"title\":\"<short issue title>\",\"description\":\"<1-3 bullet point summary>\"}]}"
    }

    /// Sanitize JSON response from LLM.
    ///
    /// LLMs sometimes wrap JSON in markdown code blocks. This strips them.
    fn sanitize_json(raw_text: &str) -> String {
        let trimmed = raw_text.trim();

        // Handle markdown code blocks: ```json ... ``` or ``` ... ```
        if trimmed.starts_with("```") {
            let without_prefix = if trimmed.starts_with("```json") {
                trimmed.strip_prefix("```json").unwrap_or(trimmed)
            } else {
                trimmed.strip_prefix("```").unwrap_or(trimmed)
            };

            // Find closing backticks
            if let Some(end_idx) = without_prefix.rfind("```") {
                return without_prefix[..end_idx].trim().to_string();
            }
            return without_prefix.trim().to_string();
        }

        // Handle cases where JSON might be wrapped in other markdown
        if let Some(start) = trimmed.find('{') {
            if let Some(end) = trimmed.rfind('}') {
                if start < end {
                    return trimmed[start..=end].to_string();
                }
            }
        }

        trimmed.to_string()
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

/// A chat message. The user message carries multimodal content parts;
/// the system message is plain text.
#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: MessageBody,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageBody {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

/// Parsed LLM response (matches our JSON schema).
#[derive(Deserialize)]
struct LlmExtraction {
    #[serde(default)]
    issues: Vec<LlmIssue>,
}

#[derive(Deserialize)]
struct LlmIssue {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[async_trait::async_trait]
impl AiPort for OpenAiAdapter {
    async fn extract_issues(
        &self,
        text: &str,
        images: &[ImageAttachment],
    ) -> Result<Vec<DraftIssue>, DomainError> {
        info!(
            text_len = text.len(),
            images = images.len(),
            "sending input to AI for issue extraction"
        );

        let user_text = if text.is_empty() {
            "No text provided.".to_string()
        } else {
            text.to_string()
        };
        let mut parts = vec![ContentPart::Text { text: user_text }];
        for image in images {
            parts.push(ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: image.data_url.clone(),
                },
            });
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: MessageBody::Text(Self::system_prompt().to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: MessageBody::Parts(parts),
                },
            ],
            temperature: 0.3,
            response_format: Some(ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Ai(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "AI API returned error");
            return Err(DomainError::Ai(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Ai(format!("Failed to parse API response: {}", e)))?;

        let raw_content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| DomainError::Ai("No response choices returned".to_string()))?;

        debug!(raw_len = raw_content.len(), "received AI response");

        let clean_json = Self::sanitize_json(&raw_content);
        let extraction: LlmExtraction = serde_json::from_str(&clean_json).map_err(|e| {
            warn!(error = %e, json = %clean_json.chars().take(200).collect::<String>(), "JSON parse failed");
            DomainError::Ai(format!("Failed to parse LLM JSON: {}", e))
        })?;

        let drafts: Vec<DraftIssue> = extraction
            .issues
            .into_iter()
            .map(|i| DraftIssue {
                title: i.title,
                description: i.description,
            })
            .collect();

        info!(drafts = drafts.len(), "issue extraction complete");

        Ok(drafts)
    }
}
