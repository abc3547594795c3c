//! Extraction service. Text and screenshots in, normalized drafts out.
//!
//! - Rejects completely empty input before any API call
//! - Loads screenshots as base64 data URLs
//! - Trims model output and drops untitled entries

use crate::adapters::images;
use crate::domain::{DomainError, DraftIssue};
use crate::ports::AiPort;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Service for LLM-backed issue extraction.
pub struct ExtractionService {
    ai: Arc<dyn AiPort>,
}

impl ExtractionService {
    pub fn new(ai: Arc<dyn AiPort>) -> Self {
        Self { ai }
    }

    /// Extract candidate issues from user text and screenshot paths.
    ///
    /// An empty result is not an error; the UI reports it as "nothing
    /// actionable found".
    pub async fn extract(
        &self,
        text: &str,
        image_paths: &[PathBuf],
    ) -> Result<Vec<DraftIssue>, DomainError> {
        let text = text.trim();
        if text.is_empty() && image_paths.is_empty() {
            return Err(DomainError::Input(
                "Enter a description or attach a screenshot".to_string(),
            ));
        }

        let images = images::load_attachments(image_paths).await?;
        let raw = self.ai.extract_issues(text, &images).await?;
        let drafts = Self::normalize(raw);

        info!(drafts = drafts.len(), "extraction produced drafts");
        Ok(drafts)
    }

    /// Trim titles/descriptions and drop entries without a usable title.
    fn normalize(raw: Vec<DraftIssue>) -> Vec<DraftIssue> {
        raw.into_iter()
            .filter_map(|d| {
                let title = d.title.trim().to_string();
                if title.is_empty() {
                    return None;
                }
                Some(DraftIssue {
                    title,
                    description: d.description.trim().to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageAttachment;

    struct CannedAi {
        drafts: Vec<DraftIssue>,
    }

    #[async_trait::async_trait]
    impl AiPort for CannedAi {
        async fn extract_issues(
            &self,
            _text: &str,
            _images: &[ImageAttachment],
        ) -> Result<Vec<DraftIssue>, DomainError> {
            Ok(self.drafts.clone())
        }
    }

    #[test]
    fn test_normalize_trims_and_filters() {
        let raw = vec![
            DraftIssue {
                title: "  Fix login  ".to_string(),
                description: " broken on Safari \n".to_string(),
            },
            DraftIssue {
                title: "   ".to_string(),
                description: "orphan description".to_string(),
            },
        ];
        let drafts = ExtractionService::normalize(raw);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Fix login");
        assert_eq!(drafts[0].description, "broken on Safari");
    }

    #[tokio::test]
    async fn test_extract_rejects_empty_input() {
        let service = ExtractionService::new(Arc::new(CannedAi { drafts: vec![] }));
        let err = service.extract("   ", &[]).await.unwrap_err();
        assert!(matches!(err, DomainError::Input(_)));
    }

    #[tokio::test]
    async fn test_extract_normalizes_model_output() {
        let service = ExtractionService::new(Arc::new(CannedAi {
            drafts: vec![
                DraftIssue {
                    title: " A ".to_string(),
                    description: String::new(),
                },
                DraftIssue {
                    title: String::new(),
                    description: "dropped".to_string(),
                },
            ],
        }));
        let drafts = service.extract("some notes", &[]).await.unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "A");
    }
}
