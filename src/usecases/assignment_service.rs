//! Assignment service. Resolves where created issues should land.
//!
//! Wraps tracker lookups and the selection rules from the sidebar flow:
//! single-team projects auto-select, the configured default team wins the
//! fallback prompt, and "Todo" is looked up among the team's states.

use crate::domain::{DomainError, Project, ProjectDetails, Team};
use crate::ports::TrackerPort;
use std::sync::Arc;
use tracing::{info, warn};

/// Workflow state assigned to fresh issues when the team has it.
const INITIAL_STATE_NAME: &str = "Todo";

/// How the team for new issues gets decided, given a project selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamChoice {
    /// Project has exactly one team; no prompt needed.
    Auto(Team),
    /// Project has several teams; user picks among them.
    FromProject(Vec<Team>),
    /// No project team available; user picks from all viewer teams,
    /// with the given index preselected.
    FromViewer { teams: Vec<Team>, default_index: usize },
}

/// Service for resolving project/milestone/team/state assignment.
pub struct AssignmentService {
    tracker: Arc<dyn TrackerPort>,
    default_team_id: Option<String>,
}

impl AssignmentService {
    pub fn new(tracker: Arc<dyn TrackerPort>, default_team_id: Option<String>) -> Self {
        Self {
            tracker,
            default_team_id,
        }
    }

    /// All projects, sorted by name for stable prompts.
    pub async fn projects(&self) -> Result<Vec<Project>, DomainError> {
        let mut projects = self.tracker.list_projects().await?;
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }

    /// Teams and milestones of a project, sorted by name.
    pub async fn project_details(&self, project_id: &str) -> Result<ProjectDetails, DomainError> {
        let mut details = self.tracker.project_details(project_id).await?;
        details.teams.sort_by(|a, b| a.name.cmp(&b.name));
        details.milestones.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(details)
    }

    /// Decide how the team prompt should run for the given project teams.
    /// Falls back to the full viewer team list when the project has none.
    pub async fn team_choice(&self, mut project_teams: Vec<Team>) -> Result<TeamChoice, DomainError> {
        match project_teams.len() {
            1 => {
                let team = project_teams.remove(0);
                info!(team = %team.name, "auto-selected project team");
                Ok(TeamChoice::Auto(team))
            }
            n if n > 1 => Ok(TeamChoice::FromProject(project_teams)),
            _ => {
                let mut teams = self.tracker.list_teams().await?;
                teams.sort_by(|a, b| a.name.cmp(&b.name));
                let default_index = self
                    .default_team_id
                    .as_ref()
                    .and_then(|id| teams.iter().position(|t| &t.id == id))
                    .unwrap_or(0);
                Ok(TeamChoice::FromViewer {
                    teams,
                    default_index,
                })
            }
        }
    }

    /// ID of the team's "Todo" state, or None (with a warning) when the
    /// team has no such state; issues then keep the tracker default.
    pub async fn initial_state_id(&self, team_id: &str) -> Result<Option<String>, DomainError> {
        let states = self.tracker.workflow_states(team_id).await?;
        let state_id = states
            .iter()
            .find(|s| s.name == INITIAL_STATE_NAME)
            .map(|s| s.id.clone());
        if state_id.is_none() {
            warn!(
                team_id,
                "no '{}' state for team; issues get the default status", INITIAL_STATE_NAME
            );
        }
        Ok(state_id)
    }
}
