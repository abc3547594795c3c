//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI drives the full triage session.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run one interactive session: pick assignment targets, describe the
    /// work, review the extracted drafts, create the kept ones.
    async fn run(&self) -> Result<(), DomainError>;
}
