#![allow(clippy::unwrap_used)]
// Integration tests for the `GymDesk` facade against a wiremock backend.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gymdesk_api::{AuthContext, GymClient};
use gymdesk_core::{
    Bucket, CalendarDay, CoreError, EntityId, GymDesk, ImportOutcome, MemberDraft, PlanDraft,
    RenewalDraft, ValidationError,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(token: Option<&str>) -> (MockServer, GymDesk) {
    let server = MockServer::start().await;
    let auth = match token {
        Some(t) => AuthContext::with_token(SecretString::from(t.to_owned())),
        None => AuthContext::new(),
    };
    let client = GymClient::with_client(
        reqwest::Client::new(),
        &format!("{}/api", server.uri()),
        Arc::new(auth),
    )
    .unwrap();
    (server, GymDesk::with_client(client))
}

fn day(y: i32, m: u32, d: u32) -> CalendarDay {
    CalendarDay::from_ymd(y, m, d).unwrap()
}

async fn mount_collections(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "A", "phone": "1", "planId": 1,
             "startDate": "2025-10-10", "endDate": "2025-11-10"},
            {"id": 2, "name": "B", "phone": "2", "planId": 1,
             "startDate": "2025-10-09", "endDate": "2025-11-09T00:00:00"},
            {"id": 3, "name": "C", "phone": "3", "planId": 2,
             "startDate": "2025-08-17", "endDate": "2025-11-17"}
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/plans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "planName": "Monthly", "durationInMonths": 1, "price": 800},
            {"id": 2, "planName": "Quarterly", "durationInMonths": 3, "price": 2400}
        ])))
        .mount(server)
        .await;
}

// ── Snapshot ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_builds_dashboard() {
    let (server, desk) = setup(Some("tok")).await;
    mount_collections(&server).await;

    let snapshot = desk.refresh().await.unwrap();
    assert!(snapshot.fetched_at.is_some());

    let today = day(2025, 11, 10);
    let dash = snapshot.dashboard(today, 7);
    assert_eq!(dash.summary.total_members, 3);
    assert_eq!(dash.summary.active_members, 2);
    assert_eq!(dash.summary.expired_members, 1);
    assert_eq!(dash.summary.total_plans, 2);

    let names: Vec<_> = dash.expiring.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["A", "C"]);

    let a = snapshot.resolve_member("1").unwrap();
    assert_eq!(a.status(today).unwrap().bucket, Bucket::Critical);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let (server, desk) = setup(Some("tok")).await;
    mount_collections(&server).await;
    desk.refresh().await.unwrap();

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/members"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/plans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = desk.refresh().await.unwrap_err();
    assert_eq!(err.to_string(), "db down");
    assert_eq!(desk.snapshot().members.len(), 3);
    assert_eq!(desk.snapshot().plans.len(), 2);
}

#[tokio::test]
async fn test_expired_session_surfaces_and_clears_token() {
    let (server, desk) = setup(Some("stale")).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = desk.refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::SessionExpired), "got: {err:?}");
    assert!(!desk.is_logged_in());
}

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_blank_login_is_rejected_locally() {
    let (server, desk) = setup(None).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = desk
        .login("  ", &SecretString::from("pw".to_owned()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::MissingCredentials)
    ));
}

#[tokio::test]
async fn test_logout_drops_token_and_data() {
    let (server, desk) = setup(Some("tok")).await;
    mount_collections(&server).await;
    desk.refresh().await.unwrap();

    assert!(desk.logout());
    assert!(!desk.is_logged_in());
    assert!(desk.snapshot().fetched_at.is_none());
    assert!(!desk.logout());
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_member_suggests_end_date_and_refreshes() {
    let (server, desk) = setup(Some("tok")).await;
    mount_collections(&server).await;
    desk.refresh().await.unwrap();

    Mock::given(method("POST"))
        .and(path("/api/members"))
        .and(body_json(json!({
            "name": "Meera",
            "phone": "99000",
            "email": null,
            "planId": 1,
            "startDate": "2026-01-31",
            "endDate": "2026-02-28"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let draft = MemberDraft {
        name: "Meera".into(),
        phone: "99000".into(),
        email: None,
        plan_id: Some(EntityId::Number(1)),
        start_date: Some(day(2026, 1, 31)),
        end_date: None,
    };
    desk.create_member(&draft, day(2025, 11, 10)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let member_fetches = requests
        .iter()
        .filter(|r| r.method.as_str() == "GET" && r.url.path() == "/api/members")
        .count();
    assert_eq!(member_fetches, 2);
}

#[tokio::test]
async fn test_invalid_member_never_reaches_backend() {
    let (server, desk) = setup(Some("tok")).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let draft = MemberDraft {
        name: "Meera".into(),
        phone: "99000".into(),
        email: None,
        plan_id: Some(EntityId::Number(1)),
        start_date: Some(day(2025, 11, 1)),
        end_date: Some(day(2025, 12, 1)),
    };
    let err = desk.create_member(&draft, day(2025, 11, 10)).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::StartInPast)
    ));
}

#[tokio::test]
async fn test_renew_member() {
    let (server, desk) = setup(Some("tok")).await;
    mount_collections(&server).await;
    let snapshot = desk.refresh().await.unwrap();

    Mock::given(method("PUT"))
        .and(path("/api/members/3/renew"))
        .and(body_json(json!({"planId": 2, "newEndDate": "2026-02-17"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let member = snapshot.resolve_member("3").unwrap();
    let draft = RenewalDraft::for_member(member, None, &snapshot.plans, day(2025, 11, 10));
    desk.renew_member(member, &draft).await.unwrap();
}

#[tokio::test]
async fn test_create_plan_rejects_zero_duration() {
    let (_server, desk) = setup(Some("tok")).await;
    let draft = PlanDraft {
        plan_name: "Trial".into(),
        duration_in_months: 0,
        price: 0.0,
    };
    let err = desk.create_plan(&draft).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::InvalidDuration)
    ));
}

#[tokio::test]
async fn test_delete_plan_missing() {
    let (server, desk) = setup(Some("tok")).await;
    Mock::given(method("DELETE"))
        .and(path("/api/plans/9"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Plan not found"})),
        )
        .mount(&server)
        .await;

    let err = desk.delete_plan(&EntityId::Number(9)).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }), "got: {err:?}");
}

// ── Import ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_import_rejection_is_a_report() {
    let (server, desk) = setup(Some("tok")).await;
    Mock::given(method("POST"))
        .and(path("/api/members/import"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("Row 2: invalid phone\nRow 4: unknown plan"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("roster.csv");
    std::fs::write(&file, "Name,Phone\nA,1\n").unwrap();

    let report = desk.import_members(&file).await.unwrap();
    assert_eq!(report.outcome, ImportOutcome::Rejected);
    assert_eq!(
        report.row_errors(),
        ["Row 2: invalid phone", "Row 4: unknown plan"]
    );
}

#[tokio::test]
async fn test_import_requires_csv_extension() {
    let (_server, desk) = setup(Some("tok")).await;
    let err = desk
        .import_members(std::path::Path::new("roster.xlsx"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::NotCsv { .. })
    ));
}
