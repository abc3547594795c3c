//! Linear adapter. Implements TrackerPort via Linear's GraphQL API.
//!
//! One POST endpoint; queries and the issueCreate mutation go through a
//! shared `graphql` helper that surfaces the `errors` array as
//! `DomainError::Tracker` even on HTTP 200.

use crate::domain::{
    CreatedIssue, DomainError, DraftIssue, IssueAssignment, Milestone, Project, ProjectDetails,
    Team, WorkflowState,
};
use crate::ports::TrackerPort;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Linear caps issue titles at 255 characters.
const MAX_TITLE_LEN: usize = 255;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Linear GraphQL adapter.
///
/// Requires a personal API key (Settings > API in Linear). The endpoint is
/// injectable for tests; production uses https://api.linear.app/graphql.
pub struct LinearAdapter {
    client: Client,
    api_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Value>,
}

#[derive(Deserialize)]
struct NodeList<T> {
    #[serde(default = "Vec::new")]
    nodes: Vec<T>,
}

impl LinearAdapter {
    /// Create a new Linear adapter.
    ///
    /// # Arguments
    /// * `api_url` - GraphQL endpoint (injectable for tests)
    /// * `api_key` - Linear personal API key, sent as the Authorization header
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }

    /// Execute one GraphQL request and return the `data` object.
    async fn graphql(&self, query: &str, variables: Value) -> Result<Value, DomainError> {
        let body = json!({ "query": query, "variables": variables });

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Tracker(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "Linear API returned error");
            return Err(DomainError::Tracker(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let parsed: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Tracker(format!("Failed to parse API response: {}", e)))?;

        if let Some(errors) = parsed.errors {
            warn!(errors = %errors, "Linear API returned GraphQL errors");
            return Err(DomainError::Tracker(format!("GraphQL errors: {}", errors)));
        }

        parsed
            .data
            .ok_or_else(|| DomainError::Tracker("Response contained no data".to_string()))
    }

    /// Pull `field` out of `data` and deserialize the node list inside it.
    fn take_nodes<T: for<'de> Deserialize<'de>>(
        mut data: Value,
        field: &str,
    ) -> Result<Vec<T>, DomainError> {
        let value = data
            .get_mut(field)
            .map(Value::take)
            .ok_or_else(|| DomainError::Tracker(format!("Missing field '{}'", field)))?;
        let list: NodeList<T> = serde_json::from_value(value)
            .map_err(|e| DomainError::Tracker(format!("Failed to decode '{}': {}", field, e)))?;
        Ok(list.nodes)
    }

    /// Truncate a title to Linear's limit on a char boundary.
    fn clamp_title(title: &str) -> String {
        title.chars().take(MAX_TITLE_LEN).collect()
    }
}

#[async_trait::async_trait]
impl TrackerPort for LinearAdapter {
    async fn list_projects(&self) -> Result<Vec<Project>, DomainError> {
        let query = "query { projects(first: 250) { nodes { id name } } }";
        let data = self.graphql(query, json!({})).await?;
        let projects = Self::take_nodes(data, "projects")?;
        debug!(count = projects.len(), "fetched projects");
        Ok(projects)
    }

    async fn project_details(&self, project_id: &str) -> Result<ProjectDetails, DomainError> {
        let query = r#"
        query($id: String!) {
          project(id: $id) {
            teams(first: 50) { nodes { id name } }
            projectMilestones(first: 100) { nodes { id name } }
          }
        }
        "#;
        let mut data = self.graphql(query, json!({ "id": project_id })).await?;
        let project = data
            .get_mut("project")
            .map(Value::take)
            .filter(|v| !v.is_null())
            .ok_or_else(|| DomainError::Tracker(format!("Project {} not found", project_id)))?;

        let teams: Vec<Team> = Self::take_nodes(project.clone(), "teams").unwrap_or_default();
        let milestones: Vec<Milestone> =
            Self::take_nodes(project, "projectMilestones").unwrap_or_default();

        Ok(ProjectDetails { teams, milestones })
    }

    async fn list_teams(&self) -> Result<Vec<Team>, DomainError> {
        let query = "query { viewer { teams(first: 100) { nodes { id name } } } }";
        let mut data = self.graphql(query, json!({})).await?;
        let viewer = data
            .get_mut("viewer")
            .map(Value::take)
            .ok_or_else(|| DomainError::Tracker("Missing field 'viewer'".to_string()))?;
        Self::take_nodes(viewer, "teams")
    }

    async fn workflow_states(&self, team_id: &str) -> Result<Vec<WorkflowState>, DomainError> {
        let query = r#"
        query TeamWorkflowStates($teamId: String!) {
            team(id: $teamId) {
                states(first: 50) {
                    nodes { id name }
                }
            }
        }
        "#;
        let mut data = self.graphql(query, json!({ "teamId": team_id })).await?;
        let team = data
            .get_mut("team")
            .map(Value::take)
            .filter(|v| !v.is_null())
            .ok_or_else(|| DomainError::Tracker(format!("Team {} not found", team_id)))?;
        Self::take_nodes(team, "states")
    }

    async fn create_issue(
        &self,
        draft: &DraftIssue,
        assignment: &IssueAssignment,
    ) -> Result<CreatedIssue, DomainError> {
        let mutation = r#"
        mutation IssueCreate($input: IssueCreateInput!) {
          issueCreate(input: $input) {
            success
            issue { id identifier title url project { name } }
          }
        }
        "#;

        let mut input = json!({
            "teamId": assignment.team_id,
            "title": Self::clamp_title(&draft.title),
        });
        if !draft.description.is_empty() {
            input["description"] = Value::String(draft.description.clone());
        }
        if let Some(project_id) = &assignment.project_id {
            input["projectId"] = Value::String(project_id.clone());
        }
        if let Some(milestone_id) = &assignment.milestone_id {
            input["projectMilestoneId"] = Value::String(milestone_id.clone());
        }
        if let Some(state_id) = &assignment.state_id {
            input["stateId"] = Value::String(state_id.clone());
        }

        let data = self.graphql(mutation, json!({ "input": input })).await?;
        let payload = data
            .get("issueCreate")
            .ok_or_else(|| DomainError::Tracker("Missing issueCreate payload".to_string()))?;

        if !payload
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            return Err(DomainError::Tracker(
                "issueCreate reported success=false".to_string(),
            ));
        }

        let issue = payload
            .get("issue")
            .filter(|v| !v.is_null())
            .ok_or_else(|| DomainError::Tracker("issueCreate returned no issue".to_string()))?;

        let created = CreatedIssue {
            id: issue
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            identifier: issue
                .get("identifier")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            title: issue
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            url: issue
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string),
            project_name: issue
                .pointer("/project/name")
                .and_then(Value::as_str)
                .map(str::to_string),
        };

        info!(
            identifier = %created.identifier,
            title = %created.title,
            "issue created"
        );

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn adapter_for(server: &MockServer) -> LinearAdapter {
        LinearAdapter::new(server.url("/graphql"), "lin_api_test".to_string())
    }

    #[test]
    fn test_clamp_title() {
        let long = "x".repeat(300);
        assert_eq!(LinearAdapter::clamp_title(&long).chars().count(), 255);
        assert_eq!(LinearAdapter::clamp_title("short"), "short");
    }

    #[tokio::test]
    async fn test_list_projects() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/graphql")
                .header("Authorization", "lin_api_test")
                .body_contains("projects(first: 250)");
            then.status(200).json_body(serde_json::json!({
                "data": {"projects": {"nodes": [
                    {"id": "p1", "name": "Mobile App"},
                    {"id": "p2", "name": "Website"}
                ]}}
            }));
        });

        let projects = adapter_for(&server).list_projects().await.unwrap();
        api_mock.assert();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Mobile App");
    }

    #[tokio::test]
    async fn test_project_details() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(serde_json::json!({
                "data": {"project": {
                    "teams": {"nodes": [{"id": "t1", "name": "Engineering"}]},
                    "projectMilestones": {"nodes": [{"id": "m1", "name": "Beta"}]}
                }}
            }));
        });

        let details = adapter_for(&server).project_details("p1").await.unwrap();
        assert_eq!(details.teams.len(), 1);
        assert_eq!(details.milestones[0].name, "Beta");
    }

    #[tokio::test]
    async fn test_graphql_errors_are_tracker_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(serde_json::json!({
                "errors": [{"message": "Authentication required"}]
            }));
        });

        let err = adapter_for(&server).list_teams().await.unwrap_err();
        assert!(matches!(err, DomainError::Tracker(_)));
        assert!(err.to_string().contains("Authentication required"));
    }

    #[tokio::test]
    async fn test_create_issue_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/graphql")
                .body_contains("issueCreate")
                .body_contains("\"teamId\":\"t1\"")
                .body_contains("\"stateId\":\"s1\"");
            then.status(200).json_body(serde_json::json!({
                "data": {"issueCreate": {
                    "success": true,
                    "issue": {
                        "id": "uuid-1",
                        "identifier": "ENG-42",
                        "title": "Fix login",
                        "url": "https://linear.app/acme/issue/ENG-42",
                        "project": {"name": "Mobile App"}
                    }
                }}
            }));
        });

        let draft = DraftIssue {
            title: "Fix login".to_string(),
            description: "- broken on Safari".to_string(),
        };
        let assignment = IssueAssignment {
            team_id: "t1".to_string(),
            project_id: Some("p1".to_string()),
            milestone_id: None,
            state_id: Some("s1".to_string()),
        };
        let created = adapter_for(&server)
            .create_issue(&draft, &assignment)
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(created.identifier, "ENG-42");
        assert_eq!(created.project_name.as_deref(), Some("Mobile App"));
    }

    #[tokio::test]
    async fn test_create_issue_omits_unset_fields() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            // Serialized input must carry exactly teamId and title — optional
            // fields are omitted, not null.
            when.method(POST)
                .path("/graphql")
                .body_contains(r#""input":{"teamId":"t1","title":"t"}"#);
            then.status(200).json_body(serde_json::json!({
                "data": {"issueCreate": {
                    "success": true,
                    "issue": {"id": "u", "identifier": "ENG-1", "title": "t", "url": null, "project": null}
                }}
            }));
        });

        let draft = DraftIssue {
            title: "t".to_string(),
            description: String::new(),
        };
        let assignment = IssueAssignment {
            team_id: "t1".to_string(),
            ..Default::default()
        };
        let created = adapter_for(&server)
            .create_issue(&draft, &assignment)
            .await
            .unwrap();

        api_mock.assert();
        assert!(created.project_name.is_none());
    }

    #[tokio::test]
    async fn test_create_issue_unsuccessful() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(serde_json::json!({
                "data": {"issueCreate": {"success": false, "issue": null}}
            }));
        });

        let draft = DraftIssue {
            title: "t".to_string(),
            description: String::new(),
        };
        let assignment = IssueAssignment {
            team_id: "t1".to_string(),
            ..Default::default()
        };
        let err = adapter_for(&server)
            .create_issue(&draft, &assignment)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Tracker(_)));
    }
}
