mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};
use serde_json::{json, Value};

struct Fixture {
    person_id: String,
    occurrence_id: String,
}

async fn seed(app: &TestApp, occurrence_date: &str) -> Fixture {
    let group = parse_body(app.post("/api/v1/groups", json!({"name": "Choir"})).await).await;
    let group_id = group["id"].as_str().unwrap();

    let person = parse_body(app.post("/api/v1/people", json!({
        "nick_name": "Ted", "last_name": "Decker"
    })).await).await;
    let person_id = person["id"].as_str().unwrap().to_string();

    let occurrence = parse_body(app.post("/api/v1/attendance-occurrences", json!({
        "group_id": group_id, "occurrence_date": occurrence_date
    })).await).await;

    Fixture {
        person_id,
        occurrence_id: occurrence["id"].as_str().unwrap().to_string(),
    }
}

async fn assign(app: &TestApp, fixture: &Fixture) -> Value {
    let res = app.post("/api/v1/attendances/assign", json!({
        "occurrence_id": fixture.occurrence_id, "person_id": fixture.person_id
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await
}

#[tokio::test]
async fn assign_is_idempotent() {
    let app = TestApp::new().await;
    let fixture = seed(&app, "2030-06-04").await;

    let first = assign(&app, &fixture).await;
    assert_eq!(first["rsvp"], "UNKNOWN");
    assert!(first["rsvp_datetime"].is_null());

    let second = assign(&app, &fixture).await;
    assert_eq!(first["id"], second["id"]);
}

#[tokio::test]
async fn assign_requires_existing_occurrence_and_person() {
    let app = TestApp::new().await;
    let fixture = seed(&app, "2030-06-04").await;

    let missing_occurrence = app.post("/api/v1/attendances/assign", json!({
        "occurrence_id": "nope", "person_id": fixture.person_id
    })).await;
    assert_eq!(missing_occurrence.status(), StatusCode::NOT_FOUND);

    let missing_person = app.post("/api/v1/attendances/assign", json!({
        "occurrence_id": fixture.occurrence_id, "person_id": "nope"
    })).await;
    assert_eq!(missing_person.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_walk_the_state_machine() {
    let app = TestApp::new().await;
    let fixture = seed(&app, "2030-06-04").await;
    let attendance = assign(&app, &fixture).await;
    let id = attendance["id"].as_str().unwrap();

    let confirmed = parse_body(app.post(&format!("/api/v1/attendances/{}/confirm", id), json!({})).await).await;
    assert_eq!(confirmed["rsvp"], "YES");
    assert!(!confirmed["rsvp_datetime"].is_null());
    assert!(confirmed["decline_reason_id"].is_null());

    let declined = parse_body(app.post(&format!("/api/v1/attendances/{}/decline", id), json!({
        "decline_reason_id": "sick", "note": "flu"
    })).await).await;
    assert_eq!(declined["rsvp"], "NO");
    assert_eq!(declined["decline_reason_id"], "sick");
    assert_eq!(declined["note"], "flu");

    // Re-confirming wipes the decline details.
    let reconfirmed = parse_body(app.post(&format!("/api/v1/attendances/{}/confirm", id), json!({})).await).await;
    assert_eq!(reconfirmed["rsvp"], "YES");
    assert!(reconfirmed["decline_reason_id"].is_null());
    assert!(reconfirmed["note"].is_null());

    let cancelled = parse_body(app.post(&format!("/api/v1/attendances/{}/confirm-cancel", id), json!({})).await).await;
    assert_eq!(cancelled["rsvp"], "UNKNOWN");
    assert!(cancelled["rsvp_datetime"].is_null());
}

#[tokio::test]
async fn decline_without_a_reason_keeps_the_previous_one() {
    let app = TestApp::new().await;
    let fixture = seed(&app, "2030-06-04").await;
    let attendance = assign(&app, &fixture).await;
    let id = attendance["id"].as_str().unwrap();

    app.post(&format!("/api/v1/attendances/{}/decline", id), json!({
        "decline_reason_id": "travel"
    })).await;

    let declined_again = parse_body(app.post(&format!("/api/v1/attendances/{}/decline", id), json!({})).await).await;
    assert_eq!(declined_again["decline_reason_id"], "travel");

    // An empty reason string counts as absent too.
    let declined_empty = parse_body(app.post(&format!("/api/v1/attendances/{}/decline", id), json!({
        "decline_reason_id": ""
    })).await).await;
    assert_eq!(declined_empty["decline_reason_id"], "travel");
}

#[tokio::test]
async fn did_attend_is_orthogonal_to_the_rsvp() {
    let app = TestApp::new().await;
    let fixture = seed(&app, "2030-06-04").await;
    let attendance = assign(&app, &fixture).await;
    let id = attendance["id"].as_str().unwrap();

    app.post(&format!("/api/v1/attendances/{}/confirm", id), json!({})).await;

    let checked_in = parse_body(app.put(&format!("/api/v1/attendances/{}/did-attend", id), json!({
        "did_attend": false
    })).await).await;
    assert_eq!(checked_in["rsvp"], "YES");
    assert_eq!(checked_in["did_attend"], false);
}

#[tokio::test]
async fn pending_and_upcoming_views_track_the_response() {
    let app = TestApp::new().await;
    let date = (Utc::now().date_naive() + Duration::days(7)).format("%Y-%m-%d").to_string();
    let fixture = seed(&app, &date).await;
    let attendance = assign(&app, &fixture).await;
    let id = attendance["id"].as_str().unwrap();

    let pending = parse_body(app.get(&format!("/api/v1/people/{}/pending-confirmations", fixture.person_id)).await).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let upcoming = parse_body(app.get(&format!("/api/v1/people/{}/upcoming-schedules", fixture.person_id)).await).await;
    assert!(upcoming.as_array().unwrap().is_empty());

    app.post(&format!("/api/v1/attendances/{}/confirm", id), json!({})).await;

    let pending = parse_body(app.get(&format!("/api/v1/people/{}/pending-confirmations", fixture.person_id)).await).await;
    assert!(pending.as_array().unwrap().is_empty());

    let upcoming = parse_body(app.get(&format!("/api/v1/people/{}/upcoming-schedules", fixture.person_id)).await).await;
    assert_eq!(upcoming.as_array().unwrap().len(), 1);
}
