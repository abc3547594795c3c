//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Flow: assignment targets -> describe work -> AI drafts -> review/edit ->
//! create in Linear with a progress bar and per-item results.

use crate::domain::{DomainError, DraftIssue, IssueAssignment, Milestone, Project, Team};
use crate::ports::InputPort;
use crate::usecases::assignment_service::TeamChoice;
use crate::usecases::creation_service::ItemOutcome;
use crate::usecases::{AssignmentService, CreationService, ExtractionService};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, Select, Text};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const NONE_OPTION: &str = "None";

fn prompt_err(e: inquire::InquireError) -> DomainError {
    DomainError::Input(e.to_string())
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    extraction: Arc<ExtractionService>,
    assignment: Arc<AssignmentService>,
    creation: Arc<CreationService>,
}

impl TuiInputPort {
    pub fn new(
        extraction: Arc<ExtractionService>,
        assignment: Arc<AssignmentService>,
        creation: Arc<CreationService>,
    ) -> Self {
        Self {
            extraction,
            assignment,
            creation,
        }
    }

    /// Project prompt. "None" skips project assignment.
    fn select_project(projects: &[Project]) -> Result<Option<Project>, DomainError> {
        if projects.is_empty() {
            return Ok(None);
        }
        let mut options = vec![NONE_OPTION.to_string()];
        options.extend(projects.iter().map(|p| p.name.clone()));
        let choice = Select::new("Project", options).prompt().map_err(prompt_err)?;
        Ok(projects.iter().find(|p| p.name == choice).cloned())
    }

    /// Milestone prompt. Only offered when a project is selected.
    fn select_milestone(milestones: &[Milestone]) -> Result<Option<Milestone>, DomainError> {
        if milestones.is_empty() {
            return Ok(None);
        }
        let mut options = vec![NONE_OPTION.to_string()];
        options.extend(milestones.iter().map(|m| m.name.clone()));
        let choice = Select::new("Milestone", options)
            .prompt()
            .map_err(prompt_err)?;
        Ok(milestones.iter().find(|m| m.name == choice).cloned())
    }

    fn select_team(
        message: &str,
        teams: &[Team],
        default_index: usize,
    ) -> Result<Team, DomainError> {
        if teams.is_empty() {
            return Err(DomainError::Input(
                "A team is required to create issues, but none are available".to_string(),
            ));
        }
        let options: Vec<String> = teams.iter().map(|t| t.name.clone()).collect();
        let choice = Select::new(message, options)
            .with_starting_cursor(default_index.min(teams.len() - 1))
            .prompt()
            .map_err(prompt_err)?;
        teams
            .iter()
            .find(|t| t.name == choice)
            .cloned()
            .ok_or_else(|| DomainError::Input("Team selection did not resolve".to_string()))
    }

    /// Resolve the full assignment (project, milestone, team, initial state).
    async fn resolve_assignment(&self) -> Result<IssueAssignment, DomainError> {
        let projects = self.assignment.projects().await?;
        let project = Self::select_project(&projects)?;

        let (project_teams, milestones) = match &project {
            Some(p) => {
                let details = self.assignment.project_details(&p.id).await?;
                (details.teams, details.milestones)
            }
            None => (Vec::new(), Vec::new()),
        };

        let milestone = if project.is_some() {
            Self::select_milestone(&milestones)?
        } else {
            None
        };

        let team = match self.assignment.team_choice(project_teams).await? {
            TeamChoice::Auto(team) => {
                println!("Auto-selected team: {}", team.name);
                team
            }
            TeamChoice::FromProject(teams) => Self::select_team("Team (from project)", &teams, 0)?,
            TeamChoice::FromViewer {
                teams,
                default_index,
            } => {
                if project.is_some() {
                    println!("Project has no teams. Select a team below.");
                }
                Self::select_team("Team", &teams, default_index)?
            }
        };

        let state_id = self.assignment.initial_state_id(&team.id).await?;
        if state_id.is_none() {
            println!("No 'Todo' state for this team. Issues get the default status.");
        }

        Ok(IssueAssignment {
            team_id: team.id,
            project_id: project.map(|p| p.id),
            milestone_id: milestone.map(|m| m.id),
            state_id,
        })
    }

    /// Collect free-form description and screenshot paths.
    fn collect_input() -> Result<(String, Vec<PathBuf>), DomainError> {
        println!("\nStep 1: Describe the Work");
        let text = Text::new("Description:")
            .with_help_message("e.g. The login button is broken on Safari. Empty is fine with screenshots.")
            .prompt()
            .map_err(prompt_err)?;

        let mut paths = Vec::new();
        loop {
            let entry = Text::new("Screenshot path (empty to continue):")
                .with_help_message("png/jpg/jpeg")
                .prompt()
                .map_err(prompt_err)?;
            let entry = entry.trim();
            if entry.is_empty() {
                break;
            }
            paths.push(PathBuf::from(entry));
        }

        Ok((text, paths))
    }

    /// Per-draft review: edit title/description, keep or discard.
    fn review_drafts(drafts: Vec<DraftIssue>) -> Result<Vec<DraftIssue>, DomainError> {
        println!("\nStep 2: Review and Edit Issues");
        let mut kept = Vec::new();
        let total = drafts.len();
        for (i, draft) in drafts.into_iter().enumerate() {
            println!("\n--- Issue {}/{} ---", i + 1, total);
            let title = Text::new("Title:")
                .with_initial_value(&draft.title)
                .prompt()
                .map_err(prompt_err)?;
            let description = Text::new("Description:")
                .with_initial_value(&draft.description)
                .prompt()
                .map_err(prompt_err)?;
            let keep = Confirm::new("Keep this issue?")
                .with_default(true)
                .prompt()
                .map_err(prompt_err)?;
            if keep {
                kept.push(DraftIssue { title, description });
            }
        }
        Ok(kept)
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let assignment = self.resolve_assignment().await?;

        let (text, image_paths) = Self::collect_input()?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Analyzing input...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let extraction = self.extraction.extract(&text, &image_paths).await;
        spinner.finish_and_clear();
        let drafts = extraction?;

        if drafts.is_empty() {
            println!("No actionable issues could be extracted from the input.");
            return Ok(());
        }

        let kept = Self::review_drafts(drafts)?;
        if kept.is_empty() {
            println!("No issues were selected for creation.");
            return Ok(());
        }

        let proceed = Confirm::new(&format!("Create {} issue(s) in Linear?", kept.len()))
            .with_default(true)
            .prompt()
            .map_err(prompt_err)?;
        if !proceed {
            println!("Aborted; nothing was created.");
            return Ok(());
        }

        let bar = ProgressBar::new(kept.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        let report = self
            .creation
            .create_all(&kept, &assignment, |outcome| {
                match outcome {
                    ItemOutcome::Created(issue) => {
                        let details = issue
                            .project_name
                            .as_ref()
                            .map(|p| format!(" (Project: {})", p))
                            .unwrap_or_default();
                        bar.println(format!(
                            "Success: {} - {}{}",
                            issue.identifier, issue.title, details
                        ));
                    }
                    ItemOutcome::Failed { title, reason } => {
                        bar.println(format!("Failed to create: {} ({})", title, reason));
                    }
                }
                bar.inc(1);
            })
            .await;
        bar.finish_and_clear();

        println!(
            "Process complete. Created {} of {} issues.",
            report.created.len(),
            report.attempted()
        );

        match self.creation.write_report(&report).await {
            Ok(path) => println!("Session report: {}", path.display()),
            Err(e) => println!("Could not write session report: {}", e),
        }

        Ok(())
    }
}
