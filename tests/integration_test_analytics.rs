mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::{json, Value};

struct Fixture {
    group_id: String,
    people: Vec<String>,
    reason_id: String,
}

/// One occurrence on 2030-06-03 with four assigned people covering the four
/// interesting outcomes: attended, committed no-show, declined, silent absent.
async fn seed(app: &TestApp) -> Fixture {
    let group = parse_body(app.post("/api/v1/groups", json!({"name": "Nursery"})).await).await;
    let group_id = group["id"].as_str().unwrap().to_string();

    let mut people = Vec::new();
    for name in ["Ted", "Cindy", "Noah", "Alex"] {
        let person = parse_body(app.post("/api/v1/people", json!({
            "nick_name": name, "last_name": "Decker"
        })).await).await;
        people.push(person["id"].as_str().unwrap().to_string());
    }

    let occurrence = parse_body(app.post("/api/v1/attendance-occurrences", json!({
        "group_id": group_id, "occurrence_date": "2030-06-03"
    })).await).await;
    let occurrence_id = occurrence["id"].as_str().unwrap().to_string();

    let reason = parse_body(app.post("/api/v1/decline-reasons", json!({"value": "Serving elsewhere"})).await).await;
    let reason_id = reason["id"].as_str().unwrap().to_string();

    let mut attendance_ids = Vec::new();
    for person_id in &people {
        let attendance = parse_body(app.post("/api/v1/attendances/assign", json!({
            "occurrence_id": occurrence_id, "person_id": person_id
        })).await).await;
        attendance_ids.push(attendance["id"].as_str().unwrap().to_string());
    }

    // Ted: accepted and showed up.
    app.post(&format!("/api/v1/attendances/{}/confirm", attendance_ids[0]), json!({})).await;
    app.put(&format!("/api/v1/attendances/{}/did-attend", attendance_ids[0]), json!({"did_attend": true})).await;

    // Cindy: accepted but never arrived.
    app.post(&format!("/api/v1/attendances/{}/confirm", attendance_ids[1]), json!({})).await;
    app.put(&format!("/api/v1/attendances/{}/did-attend", attendance_ids[1]), json!({"did_attend": false})).await;

    // Noah: declined with a reason.
    app.post(&format!("/api/v1/attendances/{}/decline", attendance_ids[2]), json!({
        "decline_reason_id": reason_id
    })).await;

    // Alex: never answered and never arrived.
    app.put(&format!("/api/v1/attendances/{}/did-attend", attendance_ids[3]), json!({"did_attend": false})).await;

    Fixture { group_id, people, reason_id }
}

async fn query(app: &TestApp, params: &str) -> Value {
    let res = app.get(&format!("/api/v1/analytics/scheduler?{}", params)).await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await
}

#[tokio::test]
async fn group_analytics_count_every_outcome() {
    let app = TestApp::new().await;
    let fixture = seed(&app).await;

    let body = query(&app, &format!(
        "group_id={}&start=2030-06-03&end=2030-06-05", fixture.group_id
    )).await;

    // Three-day span buckets by day, zero-filled past the occurrence.
    assert_eq!(body["bucketing"], "day");
    let buckets = body["buckets"].as_array().unwrap();
    assert_eq!(buckets.len(), 3);

    let first = &buckets[0];
    assert_eq!(first["scheduled"], 4);
    assert_eq!(first["no_response"], 1);
    assert_eq!(first["declines"], 1);
    assert_eq!(first["attended"], 1);
    assert_eq!(first["committed_no_show"], 1);
    assert_eq!(first["tentative_no_show"], 1);

    assert_eq!(buckets[1]["scheduled"], 0);
    assert_eq!(buckets[2]["scheduled"], 0);

    let reasons = body["decline_reasons"].as_array().unwrap();
    assert_eq!(reasons.len(), 1);
    assert_eq!(reasons[0]["reason_id"].as_str().unwrap(), fixture.reason_id);
    assert_eq!(reasons[0]["reason"], "Serving elsewhere");
    assert_eq!(reasons[0]["count"], 1);
}

#[tokio::test]
async fn person_analytics_only_see_that_person() {
    let app = TestApp::new().await;
    let fixture = seed(&app).await;

    let body = query(&app, &format!(
        "person_id={}&start=2030-06-03&end=2030-06-03", fixture.people[0]
    )).await;

    let buckets = body["buckets"].as_array().unwrap();
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0]["scheduled"], 1);
    assert_eq!(buckets[0]["attended"], 1);
    assert_eq!(buckets[0]["declines"], 0);
}

#[tokio::test]
async fn explicit_bucketing_overrides_the_span_heuristic() {
    let app = TestApp::new().await;
    let fixture = seed(&app).await;

    let body = query(&app, &format!(
        "group_id={}&start=2030-06-03&end=2030-06-05&bucketing=week", fixture.group_id
    )).await;

    assert_eq!(body["bucketing"], "week");
    let buckets = body["buckets"].as_array().unwrap();
    assert_eq!(buckets.len(), 1);
    // 2030-06-03 is a Monday, so the single week bucket starts on it.
    assert_eq!(buckets[0]["start"], "2030-06-03");
    assert_eq!(buckets[0]["scheduled"], 4);
}

#[tokio::test]
async fn malformed_queries_are_rejected() {
    let app = TestApp::new().await;
    let fixture = seed(&app).await;

    let both_subjects = app.get(&format!(
        "/api/v1/analytics/scheduler?group_id={}&person_id={}&start=2030-06-03&end=2030-06-05",
        fixture.group_id, fixture.people[0]
    )).await;
    assert_eq!(both_subjects.status(), StatusCode::BAD_REQUEST);

    let neither_subject = app.get("/api/v1/analytics/scheduler?start=2030-06-03&end=2030-06-05").await;
    assert_eq!(neither_subject.status(), StatusCode::BAD_REQUEST);

    let inverted_span = app.get(&format!(
        "/api/v1/analytics/scheduler?group_id={}&start=2030-06-05&end=2030-06-03", fixture.group_id
    )).await;
    assert_eq!(inverted_span.status(), StatusCode::BAD_REQUEST);

    let bad_bucketing = app.get(&format!(
        "/api/v1/analytics/scheduler?group_id={}&start=2030-06-03&end=2030-06-05&bucketing=hourly",
        fixture.group_id
    )).await;
    assert_eq!(bad_bucketing.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn kiosk_count_reflects_check_ins_on_the_day() {
    let app = TestApp::new().await;
    let group = parse_body(app.post("/api/v1/groups", json!({"name": "Check-in"})).await).await;
    let location = parse_body(app.post("/api/v1/locations", json!({"name": "Foyer"})).await).await;
    let person = parse_body(app.post("/api/v1/people", json!({
        "nick_name": "Bill", "last_name": "Marble"
    })).await).await;
    let location_id = location["id"].as_str().unwrap();

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let occurrence = parse_body(app.post("/api/v1/attendance-occurrences", json!({
        "group_id": group["id"], "occurrence_date": today, "location_id": location_id
    })).await).await;

    let before = parse_body(app.get(&format!("/api/v1/locations/{}/attendance-count", location_id)).await).await;
    assert_eq!(before["count"], 0);

    let attendance = parse_body(app.post("/api/v1/attendances/assign", json!({
        "occurrence_id": occurrence["id"], "person_id": person["id"]
    })).await).await;
    app.put(&format!("/api/v1/attendances/{}/did-attend", attendance["id"].as_str().unwrap()), json!({
        "did_attend": true
    })).await;

    // The check-in evicted the cached zero, so the recount shows up.
    let after = parse_body(app.get(&format!("/api/v1/locations/{}/attendance-count", location_id)).await).await;
    assert_eq!(after["count"], 1);
}
