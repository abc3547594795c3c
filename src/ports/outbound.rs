//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, DraftIssue, ImageAttachment};

/// LLM gateway. Turns free-form input into candidate issues.
#[async_trait::async_trait]
pub trait AiPort: Send + Sync {
    /// Extract candidate issues from user text and optional screenshots.
    ///
    /// `text` may be empty when at least one image is attached. Returns the
    /// raw list as the model produced it; normalization (trimming, dropping
    /// untitled entries) happens in the extraction service.
    async fn extract_issues(
        &self,
        text: &str,
        images: &[ImageAttachment],
    ) -> Result<Vec<DraftIssue>, DomainError>;
}
