//! Issue tracker outbound port. Query assignment targets and create issues.

use crate::domain::{
    CreatedIssue, DomainError, DraftIssue, IssueAssignment, Project, ProjectDetails, Team,
    WorkflowState,
};

/// Port for the issue tracker (Linear). One GraphQL endpoint behind it.
///
/// All methods surface tracker-side `errors` payloads as
/// `DomainError::Tracker`, even on HTTP 200.
#[async_trait::async_trait]
pub trait TrackerPort: Send + Sync {
    /// All projects visible to the API key.
    async fn list_projects(&self) -> Result<Vec<Project>, DomainError>;

    /// Teams and milestones attached to one project.
    async fn project_details(&self, project_id: &str) -> Result<ProjectDetails, DomainError>;

    /// All teams the viewer belongs to.
    async fn list_teams(&self) -> Result<Vec<Team>, DomainError>;

    /// Workflow states of a team (used to find "Todo").
    async fn workflow_states(&self, team_id: &str) -> Result<Vec<WorkflowState>, DomainError>;

    /// Create a single issue. Optional assignment fields are omitted from
    /// the mutation input when `None`.
    async fn create_issue(
        &self,
        draft: &DraftIssue,
        assignment: &IssueAssignment,
    ) -> Result<CreatedIssue, DomainError>;
}
