#![allow(clippy::unwrap_used)]
// Integration tests for `GymClient` using wiremock.

use std::io::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gymdesk_api::{
    AuthContext, Error, GymClient, MemberPayload, PlanPayload, RenewPayload, ResourceId,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(token: Option<&str>) -> (MockServer, GymClient) {
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
    (server, client)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_token_for_later_calls() {
    let (server, client) = setup(None).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"emailOrPhone": "admin@gym.in", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"accessToken": "tok-1", "adminName": "Asha"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/plans"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let secret = SecretString::from("pw".to_owned());
    let session = client.login("  admin@gym.in ", &secret).await.unwrap();
    assert_eq!(session.token.expose_secret(), "tok-1");
    assert_eq!(session.admin_name.as_deref(), Some("Asha"));
    assert!(client.auth().is_authenticated());

    let plans = client.list_plans().await.unwrap();
    assert!(plans.is_empty());
}

#[tokio::test]
async fn test_login_failure_reports_backend_message() {
    let (server, client) = setup(None).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let secret = SecretString::from("wrong".to_owned());
    let result = client.login("admin", &secret).await;

    match result {
        Err(Error::Authentication { message }) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
    assert!(!client.auth().is_authenticated());
}

#[tokio::test]
async fn test_login_unexpected_shape_is_typed_failure() {
    let (server, client) = setup(None).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session": {"id": 1}})))
        .mount(&server)
        .await;

    let secret = SecretString::from("pw".to_owned());
    let result = client.login("admin", &secret).await;
    assert!(
        matches!(result, Err(Error::InvalidLoginResponse { .. })),
        "got: {result:?}"
    );
    assert!(!client.auth().is_authenticated());
}

#[tokio::test]
async fn test_profile() {
    let (server, client) = setup(Some("tok")).await;

    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "adminName": "Asha",
            "email": "asha@ironhouse.in",
            "gymName": "Iron House",
            "gymContactNumber": "080-555"
        })))
        .mount(&server)
        .await;

    let profile = client.profile().await.unwrap();
    assert_eq!(profile.gym_name.as_deref(), Some("Iron House"));
    assert_eq!(profile.gym_contact_number.as_deref(), Some("080-555"));
    assert!(profile.gym_address.is_none());
}

// ── Auth failures ───────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_clears_token() {
    let (server, client) = setup(Some("stale")).await;

    Mock::given(method("GET"))
        .and(path("/api/members"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_members().await;
    assert!(matches!(result, Err(Error::SessionExpired)), "got: {result:?}");
    assert!(!client.auth().is_authenticated());

    // With the token gone the next call fails locally.
    let result = client.list_members().await;
    assert!(matches!(result, Err(Error::NotAuthenticated)), "got: {result:?}");
}

#[tokio::test]
async fn test_logged_out_client_sends_nothing() {
    let (server, client) = setup(None).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = client.list_plans().await;
    assert!(matches!(result, Err(Error::NotAuthenticated)));
}

// ── Members ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_members() {
    let (server, client) = setup(Some("tok")).await;

    Mock::given(method("GET"))
        .and(path("/api/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "name": "Meera",
                "phone": "99000",
                "email": null,
                "planId": 2,
                "startDate": "2025-10-01",
                "endDate": "2025-11-01"
            },
            {
                "id": 2,
                "name": "Kiran",
                "phone": "99001",
                "startDate": "2025-10-05T00:00:00",
                "plan": {"id": 3, "planName": "Annual", "durationInMonths": 12, "price": 9000}
            }
        ])))
        .mount(&server)
        .await;

    let members = client.list_members().await.unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].plan_id, Some(ResourceId::Number(2)));
    assert_eq!(members[0].end_date.as_deref(), Some("2025-11-01"));
    assert!(members[1].end_date.is_none());
    assert_eq!(
        members[1].plan.as_ref().and_then(|p| p.plan_name.clone()),
        Some("Annual".into())
    );
}

#[tokio::test]
async fn test_null_collection_is_empty() {
    let (server, client) = setup(Some("tok")).await;

    Mock::given(method("GET"))
        .and(path("/api/members"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    assert!(client.list_members().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_member_payload() {
    let (server, client) = setup(Some("tok")).await;

    Mock::given(method("POST"))
        .and(path("/api/members"))
        .and(body_json(json!({
            "name": "Meera",
            "phone": "99000",
            "email": "meera@example.com",
            "planId": 2,
            "startDate": "2025-11-10",
            "endDate": "2026-02-10"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 11})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = MemberPayload {
        name: "Meera".into(),
        phone: "99000".into(),
        email: Some("meera@example.com".into()),
        plan_id: ResourceId::Number(2),
        start_date: day(2025, 11, 10),
        end_date: day(2026, 2, 10),
    };
    client.create_member(&payload).await.unwrap();
}

#[tokio::test]
async fn test_renew_member() {
    let (server, client) = setup(Some("tok")).await;

    Mock::given(method("PUT"))
        .and(path("/api/members/7/renew"))
        .and(body_json(json!({"planId": 3, "newEndDate": "2026-11-10"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let body = RenewPayload {
        plan_id: ResourceId::Number(3),
        new_end_date: day(2026, 11, 10),
    };
    client
        .renew_member(&ResourceId::Number(7), &body)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_member_not_found() {
    let (server, client) = setup(Some("tok")).await;

    Mock::given(method("DELETE"))
        .and(path("/api/members/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Member not found"))
        .mount(&server)
        .await;

    let err = client
        .delete_member(&ResourceId::Number(99))
        .await
        .unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Member not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_import_members_uploads_file() {
    let (server, client) = setup(Some("tok")).await;

    Mock::given(method("POST"))
        .and(path("/api/members/import"))
        .and(header("authorization", "Bearer tok"))
        .and(body_string_contains("filename=\"members.csv\""))
        .and(body_string_contains("Name,Phone"))
        .respond_with(ResponseTemplate::new(200).set_body_string("2 members successfully imported"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("members.csv");
    let mut file = std::fs::File::create(&file_path).unwrap();
    writeln!(file, "Name,Phone,Email,PlanId,StartDate,EndDate").unwrap();
    writeln!(file, "Meera,99000,,2,2025-11-10,2026-02-10").unwrap();
    drop(file);

    let message = client.import_members(&file_path).await.unwrap();
    assert_eq!(message, "2 members successfully imported");
}

// ── Plans ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_plan() {
    let (server, client) = setup(Some("tok")).await;

    Mock::given(method("PUT"))
        .and(path("/api/plans/4"))
        .and(body_json(json!({"planName": "Quarterly", "durationInMonths": 3, "price": 2500.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4})))
        .expect(1)
        .mount(&server)
        .await;

    let body = PlanPayload {
        plan_name: "Quarterly".into(),
        duration_in_months: 3,
        price: 2500.0,
    };
    client
        .update_plan(&ResourceId::Number(4), &body)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_backend_validation_message_surfaces() {
    let (server, client) = setup(Some("tok")).await;

    Mock::given(method("POST"))
        .and(path("/api/plans"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Plan name already exists"})),
        )
        .mount(&server)
        .await;

    let body = PlanPayload {
        plan_name: "Gold".into(),
        duration_in_months: 1,
        price: 0.0,
    };
    let err = client.create_plan(&body).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Backend error (HTTP 400): Plan name already exists"
    );
}
