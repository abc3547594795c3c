//! Mock AI adapter for testing without API calls.
//!
//! Returns hardcoded responses for development and testing purposes.

use crate::domain::{DomainError, DraftIssue, ImageAttachment};
use crate::ports::AiPort;
use std::time::Duration;
use tracing::info;

/// Mock AI adapter for testing.
///
/// Returns predetermined drafts without making API calls.
/// Simulates network latency with configurable delay.
pub struct MockAiAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockAiAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for MockAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AiPort for MockAiAdapter {
    async fn extract_issues(
        &self,
        text: &str,
        images: &[ImageAttachment],
    ) -> Result<Vec<DraftIssue>, DomainError> {
        info!(
            text_len = text.len(),
            images = images.len(),
            "[MOCK] Simulating issue extraction"
        );

        // Simulate network delay
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let mut drafts = vec![DraftIssue {
            title: "[MOCK] Configure real AI API key".to_string(),
            description: "- Set ISSUE_RELAY_AI_API_KEY to use a real model\n\
                          - The mock adapter is for pipeline testing only"
                .to_string(),
        }];

        // One draft per non-empty input line, so the review step has
        // something proportional to work with.
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let title: String = line.chars().take(60).collect();
            drafts.push(DraftIssue {
                title: format!("[MOCK] {}", title),
                description: format!("- Extracted from: {}", line),
            });
        }

        if !images.is_empty() {
            drafts.push(DraftIssue {
                title: format!("[MOCK] Review {} attached screenshot(s)", images.len()),
                description: "- Screenshots are ignored by the mock adapter".to_string(),
            });
        }

        Ok(drafts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_adapter() {
        let adapter = MockAiAdapter::with_delay(10);
        let drafts = adapter
            .extract_issues("login broken\npassword reset 500", &[])
            .await
            .unwrap();

        // One fixed draft plus one per input line
        assert_eq!(drafts.len(), 3);
        assert!(drafts[1].title.contains("login broken"));
    }

    #[tokio::test]
    async fn test_mock_adapter_counts_images() {
        let adapter = MockAiAdapter::with_delay(10);
        let images = vec![ImageAttachment {
            data_url: "data:image/png;base64,xyz".to_string(),
        }];
        let drafts = adapter.extract_issues("", &images).await.unwrap();

        assert!(drafts.iter().any(|d| d.title.contains("1 attached")));
    }
}
