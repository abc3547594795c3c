//! Creation service. One mutation per draft, sequential, failures recorded.
//!
//! A failed item never aborts the batch; the report carries both sides.
//! After a batch, a Markdown session report is written for reference.

use crate::domain::{
    CreatedIssue, CreationReport, DomainError, DraftIssue, FailedIssue, IssueAssignment,
};
use crate::ports::TrackerPort;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

/// Per-item outcome passed to the progress callback.
pub enum ItemOutcome<'a> {
    Created(&'a CreatedIssue),
    Failed { title: &'a str, reason: &'a str },
}

/// Service for creating reviewed drafts in the tracker.
pub struct CreationService {
    tracker: Arc<dyn TrackerPort>,
    reports_dir: PathBuf,
}

impl CreationService {
    pub fn new(tracker: Arc<dyn TrackerPort>, reports_dir: PathBuf) -> Self {
        Self {
            tracker,
            reports_dir,
        }
    }

    /// Create all drafts sequentially. `on_item` fires after each attempt so
    /// the UI can advance a progress bar and print the result.
    pub async fn create_all<F>(
        &self,
        drafts: &[DraftIssue],
        assignment: &IssueAssignment,
        mut on_item: F,
    ) -> CreationReport
    where
        F: FnMut(ItemOutcome<'_>),
    {
        let mut report = CreationReport::default();

        for draft in drafts {
            match self.tracker.create_issue(draft, assignment).await {
                Ok(created) => {
                    on_item(ItemOutcome::Created(&created));
                    report.created.push(created);
                }
                Err(e) => {
                    let reason = e.to_string();
                    warn!(title = %draft.title, error = %reason, "issue creation failed");
                    on_item(ItemOutcome::Failed {
                        title: &draft.title,
                        reason: &reason,
                    });
                    report.failed.push(FailedIssue {
                        title: draft.title.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            created = report.created.len(),
            failed = report.failed.len(),
            "creation batch complete"
        );

        report
    }

    /// Write a Markdown session report. Returns the report path.
    pub async fn write_report(&self, report: &CreationReport) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|e| DomainError::Report(format!("Failed to create reports dir: {}", e)))?;

        let now = Utc::now();
        let filename = format!("issues_{}.md", now.format("%Y%m%d_%H%M%S"));
        let path = self.reports_dir.join(&filename);

        let mut md = String::new();
        md.push_str("# Issue Creation Session\n\n");
        md.push_str(&format!(
            "**Created:** {} of {} | **When:** {}\n\n",
            report.created.len(),
            report.attempted(),
            now.format("%Y-%m-%d %H:%M UTC")
        ));
        md.push_str("---\n\n");

        if !report.created.is_empty() {
            md.push_str("## Created\n\n");
            for issue in &report.created {
                md.push_str(&format!("- **{}** {}", issue.identifier, issue.title));
                if let Some(project) = &issue.project_name {
                    md.push_str(&format!(" (Project: {})", project));
                }
                if let Some(url) = &issue.url {
                    md.push_str(&format!(" — {}", url));
                }
                md.push('\n');
            }
            md.push('\n');
        }

        if !report.failed.is_empty() {
            md.push_str("## Failed\n\n");
            for failure in &report.failed {
                md.push_str(&format!("- **{}**: {}\n", failure.title, failure.reason));
            }
            md.push('\n');
        }

        fs::write(&path, md)
            .await
            .map_err(|e| DomainError::Report(format!("Failed to write report: {}", e)))?;

        info!(path = %path.display(), "session report written");

        Ok(path)
    }
}
