//! End-to-end workflow tests: claim and assign flows, timestamp stamping,
//! the reopen cycle, and the history trail, all over the in-memory store.

mod common;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use common::{admin, build_service, developer, manager, plain_user, submit_project};
use intake_core::error::CoreError;
use intake_core::history;
use intake_core::project::ProjectType;
use intake_core::status::ProjectStatus;
use intake_service::service::{AssignProject, ChangeStatus};

// ---------------------------------------------------------------------------
// Claim flow: submitted -> (claim) -> pending_review -> (confirm) ->
// in_progress -> completed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn data_project_claim_flow_runs_to_completion() {
    let service = build_service();
    let dev = developer();
    let pm = manager();

    let project = submit_project(
        &service,
        &plain_user(),
        "Churn table",
        ProjectType::DataDevelopment,
    )
    .await;
    assert_eq!(project.status, ProjectStatus::Submitted);
    assert!(project.owner_id.is_none());

    // Developer claims: ownership proposed, review requested, work NOT started.
    let claimed = service.claim(&dev, &project.id).await.unwrap();
    assert_eq!(claimed.status, ProjectStatus::PendingReview);
    assert_eq!(claimed.owner_id.as_deref(), Some("dev-1"));
    assert_eq!(claimed.owner_name.as_deref(), Some("Devon Developer"));
    assert!(claimed.actual_start_date.is_none());

    // Manager confirms the claim: work starts now.
    let confirmed = service
        .change_status(
            &pm,
            &project.id,
            ChangeStatus {
                status: ProjectStatus::InProgress,
                start_date: None,
                remarks: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(confirmed.status, ProjectStatus::InProgress);
    assert!(confirmed.actual_start_date.is_some());
    assert!(confirmed.actual_end_date.is_none());

    // The owner completes their own work.
    let completed = service.complete(&dev, &project.id, None).await.unwrap();
    assert_eq!(completed.status, ProjectStatus::Completed);
    assert_eq!(completed.actual_start_date, confirmed.actual_start_date);
    assert!(completed.actual_end_date.is_some());

    // Full trail, oldest first.
    let trail = service.history(&pm, &project.id).await.unwrap();
    let actions: Vec<&str> = trail.iter().map(|h| h.action.as_str()).collect();
    assert_eq!(
        actions,
        vec![
            history::ACTION_CREATED,
            history::ACTION_CLAIMED,
            history::ACTION_STATUS_CHANGED,
            history::ACTION_STATUS_CHANGED,
        ]
    );
}

#[tokio::test]
async fn claim_never_jumps_straight_to_in_progress() {
    let service = build_service();
    let project = submit_project(
        &service,
        &plain_user(),
        "Nightly ingest",
        ProjectType::DataDevelopment,
    )
    .await;

    let claimed = service.claim(&developer(), &project.id).await.unwrap();
    assert_eq!(claimed.status, ProjectStatus::PendingReview);
    assert!(claimed.actual_start_date.is_none());
}

// ---------------------------------------------------------------------------
// Assign flow: manager-driven, self-confirming
// ---------------------------------------------------------------------------

#[tokio::test]
async fn assign_moves_directly_to_in_progress_with_supplied_start_date() {
    let service = build_service();
    let pm = manager();
    let project = submit_project(
        &service,
        &plain_user(),
        "Portal rebuild",
        ProjectType::SystemDevelopment,
    )
    .await;

    let start = Utc.with_ymd_and_hms(2026, 5, 4, 8, 0, 0).unwrap();
    let assigned = service
        .assign(
            &pm,
            &project.id,
            AssignProject {
                owner_id: "dev-1".to_string(),
                owner_name: "Devon Developer".to_string(),
                start_date: Some(start),
                remarks: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(assigned.status, ProjectStatus::InProgress);
    assert_eq!(assigned.owner_id.as_deref(), Some("dev-1"));
    assert_eq!(assigned.actual_start_date, Some(start));
}

#[tokio::test]
async fn assign_overrides_a_pending_claim_but_keeps_the_first_start_date() {
    let service = build_service();
    let pm = manager();
    let project = submit_project(
        &service,
        &plain_user(),
        "Churn table",
        ProjectType::DataDevelopment,
    )
    .await;

    service.claim(&developer(), &project.id).await.unwrap();

    // Manager assigns someone else instead of confirming the claim.
    let assigned = service
        .assign(
            &pm,
            &project.id,
            AssignProject {
                owner_id: "dev-2".to_string(),
                owner_name: "Dana Developer".to_string(),
                start_date: None,
                remarks: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(assigned.owner_id.as_deref(), Some("dev-2"));
    assert_eq!(assigned.status, ProjectStatus::InProgress);
    let first_start = assigned.actual_start_date.expect("start date stamped");

    // Re-assigning later never restamps the start date.
    let reassigned = service
        .assign(
            &pm,
            &project.id,
            AssignProject {
                owner_id: "dev-3".to_string(),
                owner_name: "Drew Developer".to_string(),
                start_date: Some(Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap()),
                remarks: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(reassigned.actual_start_date, Some(first_start));
}

#[tokio::test]
async fn assign_is_refused_on_completed_projects() {
    let service = build_service();
    let pm = manager();
    let project = submit_project(
        &service,
        &plain_user(),
        "Done already",
        ProjectType::SystemDevelopment,
    )
    .await;

    service
        .assign(
            &pm,
            &project.id,
            AssignProject {
                owner_id: "dev-1".to_string(),
                owner_name: "Devon Developer".to_string(),
                start_date: None,
                remarks: None,
            },
        )
        .await
        .unwrap();
    service.complete(&pm, &project.id, None).await.unwrap();

    let result = service
        .assign(
            &pm,
            &project.id,
            AssignProject {
                owner_id: "dev-2".to_string(),
                owner_name: "Dana Developer".to_string(),
                start_date: None,
                remarks: None,
            },
        )
        .await;
    assert_matches!(result, Err(CoreError::Forbidden(_)));
}

// ---------------------------------------------------------------------------
// Reopen cycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reopen_and_recomplete_keeps_start_date_and_refreshes_end_date() {
    let service = build_service();
    let pm = manager();
    let dev = developer();
    let project = submit_project(
        &service,
        &plain_user(),
        "Churn table",
        ProjectType::DataDevelopment,
    )
    .await;

    service.claim(&dev, &project.id).await.unwrap();
    let started = service
        .change_status(
            &pm,
            &project.id,
            ChangeStatus {
                status: ProjectStatus::InProgress,
                start_date: None,
                remarks: None,
            },
        )
        .await
        .unwrap();
    let first_start = started.actual_start_date.unwrap();

    let completed = service.complete(&dev, &project.id, None).await.unwrap();
    let first_end = completed.actual_end_date.unwrap();

    // Reopen: no timestamps move.
    let reopened = service
        .change_status(
            &dev,
            &project.id,
            ChangeStatus {
                status: ProjectStatus::InProgress,
                start_date: None,
                remarks: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(reopened.status, ProjectStatus::InProgress);
    assert_eq!(reopened.actual_start_date, Some(first_start));
    assert_eq!(reopened.actual_end_date, Some(first_end));

    // Completing again keeps the start date and refreshes the end date.
    let recompleted = service.complete(&dev, &project.id, None).await.unwrap();
    assert_eq!(recompleted.actual_start_date, Some(first_start));
    let second_end = recompleted.actual_end_date.unwrap();
    assert!(second_end >= first_end);
}

// ---------------------------------------------------------------------------
// Optimistic concurrency
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stale_status_read_surfaces_as_illegal_transition() {
    let service = build_service();
    let pm = manager();
    let project = submit_project(
        &service,
        &plain_user(),
        "Raced project",
        ProjectType::DataDevelopment,
    )
    .await;

    // Two managers both try to move submitted -> pending_review. The
    // second request is computed against a re-fetched, now-stale-free
    // status and fails cleanly instead of re-applying the move.
    let request = ChangeStatus {
        status: ProjectStatus::PendingReview,
        start_date: None,
        remarks: None,
    };
    service
        .change_status(&pm, &project.id, request.clone())
        .await
        .unwrap();

    let second = service.change_status(&admin(), &project.id, request).await;
    assert_matches!(
        second,
        Err(CoreError::IllegalTransition {
            from: ProjectStatus::PendingReview,
            to: ProjectStatus::PendingReview,
        })
    );
}

// ---------------------------------------------------------------------------
// History trail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn history_survives_project_deletion() {
    let service = build_service();
    let root = admin();
    let project = submit_project(
        &service,
        &plain_user(),
        "Short-lived",
        ProjectType::DataDevelopment,
    )
    .await;

    service.delete(&root, &project.id).await.unwrap();

    assert_matches!(
        service.get(&root, &project.id).await,
        Err(CoreError::NotFound { .. })
    );

    // The trail outlives the record; read it straight from the store.
    use intake_store::store::HistoryStore;
    let trail = service.store().list_for_project(&project.id).await.unwrap();
    let actions: Vec<&str> = trail.iter().map(|h| h.action.as_str()).collect();
    assert_eq!(
        actions,
        vec![history::ACTION_CREATED, history::ACTION_DELETED]
    );
}

#[tokio::test]
async fn status_change_history_records_both_endpoints() {
    let service = build_service();
    let pm = manager();
    let project = submit_project(
        &service,
        &plain_user(),
        "Audited",
        ProjectType::DataDevelopment,
    )
    .await;

    service
        .change_status(
            &pm,
            &project.id,
            ChangeStatus {
                status: ProjectStatus::PendingReview,
                start_date: None,
                remarks: None,
            },
        )
        .await
        .unwrap();

    let trail = service.history(&pm, &project.id).await.unwrap();
    let entry = trail.last().unwrap();
    assert_eq!(entry.action, history::ACTION_STATUS_CHANGED);
    assert_eq!(entry.changes["from"], "submitted");
    assert_eq!(entry.changes["to"], "pending_review");
    assert_eq!(entry.user_id, "pm-1");
}
