//! End-to-end flow against mocked HTTP endpoints: a fixed LLM response must
//! produce exactly one tracker mutation per extracted issue, with matching
//! field values.

use httpmock::prelude::*;
use issue_relay::adapters::ai::OpenAiAdapter;
use issue_relay::adapters::tracker::LinearAdapter;
use issue_relay::domain::IssueAssignment;
use issue_relay::ports::TrackerPort;
use issue_relay::usecases::{AssignmentService, CreationService, ExtractionService};
use std::sync::Arc;
use tempfile::TempDir;

fn llm_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
}

#[tokio::test]
async fn extracted_issues_become_tracker_mutations() {
    let ai_server = MockServer::start();
    let linear_server = MockServer::start();

    // Fixed LLM response with two issues, wrapped in a code fence like real
    // models sometimes do.
    let ai_mock = ai_server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(llm_body(
            "```json\n{\"issues\":[\
             {\"title\":\"  Fix login on Safari \",\"description\":\"- button unresponsive\"},\
             {\"title\":\"500 on password reset\",\"description\":\"- reset endpoint errors\"},\
             {\"title\":\"   \",\"description\":\"untitled, must be dropped\"}\
             ]}\n```",
        ));
    });

    let create_mock = linear_server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("issueCreate")
            .body_contains("\"teamId\":\"team-1\"")
            .body_contains("\"stateId\":\"state-todo\"");
        then.status(200).json_body(serde_json::json!({
            "data": {"issueCreate": {
                "success": true,
                "issue": {
                    "id": "uuid",
                    "identifier": "ENG-1",
                    "title": "created",
                    "url": null,
                    "project": null
                }
            }}
        }));
    });

    let ai = Arc::new(OpenAiAdapter::new(
        ai_server.url("/v1/chat/completions"),
        "test-key".to_string(),
        "gpt-4o".to_string(),
    ));
    let tracker: Arc<dyn TrackerPort> = Arc::new(LinearAdapter::new(
        linear_server.url("/graphql"),
        "lin_api_test".to_string(),
    ));

    let extraction = ExtractionService::new(ai);
    let drafts = extraction
        .extract("login is broken; reset returns 500", &[])
        .await
        .unwrap();

    // The untitled entry is dropped, titles are trimmed.
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].title, "Fix login on Safari");
    ai_mock.assert();

    let reports = TempDir::new().unwrap();
    let creation = CreationService::new(Arc::clone(&tracker), reports.path().to_path_buf());
    let assignment = IssueAssignment {
        team_id: "team-1".to_string(),
        project_id: None,
        milestone_id: None,
        state_id: Some("state-todo".to_string()),
    };

    let report = creation.create_all(&drafts, &assignment, |_| {}).await;

    // One mutation per kept draft.
    create_mock.assert_hits(2);
    assert_eq!(report.created.len(), 2);
    assert!(report.failed.is_empty());
}

#[tokio::test]
async fn todo_state_resolution_feeds_creation() {
    let linear_server = MockServer::start();

    linear_server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("TeamWorkflowStates");
        then.status(200).json_body(serde_json::json!({
            "data": {"team": {"states": {"nodes": [
                {"id": "s-backlog", "name": "Backlog"},
                {"id": "s-todo", "name": "Todo"}
            ]}}}
        }));
    });

    let tracker: Arc<dyn TrackerPort> = Arc::new(LinearAdapter::new(
        linear_server.url("/graphql"),
        "lin_api_test".to_string(),
    ));
    let assignment = AssignmentService::new(tracker, None);

    let state_id = assignment.initial_state_id("team-1").await.unwrap();
    assert_eq!(state_id.as_deref(), Some("s-todo"));
}

#[tokio::test]
async fn partial_failure_is_reported_not_fatal() {
    let ai_server = MockServer::start();
    let linear_server = MockServer::start();

    ai_server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(llm_body(
            "{\"issues\":[{\"title\":\"good\",\"description\":\"\"},{\"title\":\"bad\",\"description\":\"\"}]}",
        ));
    });

    // First title succeeds, second hits a GraphQL error payload.
    linear_server.mock(|when, then| {
        when.method(POST).path("/graphql").body_contains("\"title\":\"good\"");
        then.status(200).json_body(serde_json::json!({
            "data": {"issueCreate": {
                "success": true,
                "issue": {"id": "u", "identifier": "ENG-7", "title": "good", "url": null, "project": null}
            }}
        }));
    });
    linear_server.mock(|when, then| {
        when.method(POST).path("/graphql").body_contains("\"title\":\"bad\"");
        then.status(200).json_body(serde_json::json!({
            "errors": [{"message": "title rejected"}]
        }));
    });

    let ai = Arc::new(OpenAiAdapter::new(
        ai_server.url("/v1/chat/completions"),
        "k".to_string(),
        "gpt-4o".to_string(),
    ));
    let tracker: Arc<dyn TrackerPort> = Arc::new(LinearAdapter::new(
        linear_server.url("/graphql"),
        "lin_api_test".to_string(),
    ));

    let drafts = ExtractionService::new(ai)
        .extract("notes", &[])
        .await
        .unwrap();

    let reports = TempDir::new().unwrap();
    let creation = CreationService::new(tracker, reports.path().to_path_buf());
    let assignment = IssueAssignment {
        team_id: "team-1".to_string(),
        ..Default::default()
    };
    let report = creation.create_all(&drafts, &assignment, |_| {}).await;

    assert_eq!(report.created.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].title, "bad");

    let report_path = creation.write_report(&report).await.unwrap();
    let md = std::fs::read_to_string(report_path).unwrap();
    assert!(md.contains("ENG-7"));
    assert!(md.contains("bad"));
}
