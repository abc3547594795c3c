//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/IO types here — these are mapped from adapters.

use serde::{Deserialize, Serialize};

/// A candidate issue extracted by the LLM, editable by the user before creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftIssue {
    pub title: String,
    pub description: String,
}

/// An issue that was successfully created in the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    /// Human-readable key, e.g. "ENG-142".
    pub identifier: String,
    pub title: String,
    pub url: Option<String>,
    /// Name of the project the issue landed in, when assigned.
    pub project_name: Option<String>,
}

/// A tracker project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// A tracker team. Issues always belong to exactly one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
}

/// A milestone within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub name: String,
}

/// A workflow state of a team (e.g. "Todo", "In Progress").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
}

/// Teams and milestones attached to a specific project.
#[derive(Debug, Clone, Default)]
pub struct ProjectDetails {
    pub teams: Vec<Team>,
    pub milestones: Vec<Milestone>,
}

/// A screenshot prepared for the LLM as a base64 data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    /// "data:image/<fmt>;base64,..." — sent verbatim as an image_url part.
    pub data_url: String,
}

/// Where created issues should land. Only the team is mandatory.
#[derive(Debug, Clone, Default)]
pub struct IssueAssignment {
    pub team_id: String,
    pub project_id: Option<String>,
    pub milestone_id: Option<String>,
    /// Initial workflow state ("Todo" when the team has one).
    pub state_id: Option<String>,
}

/// A draft that could not be created, with the reason.
#[derive(Debug, Clone)]
pub struct FailedIssue {
    pub title: String,
    pub reason: String,
}

/// Outcome of a creation batch. Failures do not abort the batch.
#[derive(Debug, Clone, Default)]
pub struct CreationReport {
    pub created: Vec<CreatedIssue>,
    pub failed: Vec<FailedIssue>,
}

impl CreationReport {
    pub fn attempted(&self) -> usize {
        self.created.len() + self.failed.len()
    }
}
