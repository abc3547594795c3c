//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    CreatedIssue, CreationReport, DraftIssue, FailedIssue, ImageAttachment, IssueAssignment,
    Milestone, Project, ProjectDetails, Team, WorkflowState,
};
pub use errors::DomainError;
