use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use event_hub::{
    api::create_app,
    app_state::AppState,
    config::{Config, EventDeletePolicy},
    infrastructure::database::Database,
};

const USER: &str = "1001";

async fn app_with_policy(policy: EventDeletePolicy) -> Router {
    let mut config = Config::in_memory();
    config.events.delete_policy = policy;
    let db = Database::new_in_memory().await.unwrap();
    create_app(AppState::with_database(config, Arc::new(db)))
}

async fn app() -> Router {
    create_app(AppState::in_memory().await.unwrap())
}

async fn send(app: &Router, method: Method, uri: &str, user: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

fn event_body(name: &str, job_category_name: &str) -> Value {
    json!({
        "event": {
            "name": name,
            "description": "Build something",
            "venue": "Main Hall",
            "start_date": "2024-06-01",
            "end_date": "2024-06-02",
            "location": "Berlin",
            "points": 10,
            "maximum_attendee": 50,
            "category": 3
        },
        "job_category_name": job_category_name,
        "event_image": {"image": "events/hack-day.png"},
        "event_agenda": {
            "session_name": "Kickoff",
            "speaker_name": "Ada",
            "start_time": "09:00",
            "end_time": "10:00",
            "venue_name": "Room 1"
        }
    })
}

async fn create_event(app: &Router, name: &str) -> i64 {
    let (status, body) = send(app, Method::POST, "/api/v1/events", Some(USER), Some(event_body(name, "Engineer"))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["delete_policy"], "cascade");
}

#[tokio::test]
async fn test_anonymous_requests_are_unauthorized() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/events", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, _) = send(&app, Method::POST, "/api/v1/events", None, Some(event_body("Hack Day", ""))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_user_header_is_bad_request() {
    let app = app().await;
    let (status, _) = send(&app, Method::GET, "/api/v1/events", Some("not-a-number"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_event_returns_detail() {
    let app = app().await;
    let (status, body) = send(&app, Method::POST, "/api/v1/events", Some(USER), Some(event_body("Hack Day", " Engineer "))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Hack Day");
    assert_eq!(body["scheduled_status"], "yet to scheduled");
    assert_eq!(body["status"], "active");
    assert_eq!(body["category_id"], Value::Null);
    assert_eq!(body["created_user"], 1001);
    assert_eq!(body["job_category"]["name"], "Engineer");
    assert_eq!(body["image"]["image"], "events/hack-day.png");
    assert_eq!(body["agenda"]["session_name"], "Kickoff");

    let id = body["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/events/{}", id), Some(USER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_invalid_create_reports_prefixed_fields() {
    let app = app().await;
    let mut body = event_body("Hack Day", "Engineer");
    body["event"]["name"] = json!("  ");
    body["event_agenda"]["start_time"] = json!("noon");

    let (status, response) = send(&app, Method::POST, "/api/v1/events", Some(USER), Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["status"], 422);
    assert_eq!(response["fields"]["event.name"][0], "This field is required.");
    assert!(response["fields"]["event_agenda.start_time"].is_array());

    let (_, events) = send(&app, Method::GET, "/api/v1/events", Some(USER), None).await;
    assert_eq!(events, json!([]));
    let (_, job_categories) = send(&app, Method::GET, "/api/v1/job-categories", Some(USER), None).await;
    assert_eq!(job_categories, json!([]));
}

#[tokio::test]
async fn test_wrongly_typed_body_is_field_error() {
    let app = app().await;
    let mut body = event_body("Hack Day", "Engineer");
    body["event"]["points"] = json!("ten");

    let (status, response) = send(&app, Method::POST, "/api/v1/events", Some(USER), Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["status"], 422);
    assert_eq!(response["error"], "Validation failed");
    assert!(response["fields"]["event.points"].is_array(), "{}", response);

    let (_, events) = send(&app, Method::GET, "/api/v1/events", Some(USER), None).await;
    assert_eq!(events, json!([]));
}

#[tokio::test]
async fn test_malformed_body_is_json_bad_request() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/user-coins")
        .header("x-user-id", USER)
        .header("content-type", "application/json")
        .body(Body::from(r#"{"user": 7, "gain_type":"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("JSON"), "{}", body);
}

#[tokio::test]
async fn test_status_filter_and_completed_view() {
    let app = app().await;
    let first = create_event(&app, "Hack Day").await;
    create_event(&app, "Meetup").await;

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/events/{}/status", first),
        Some("7"),
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "completed");
    assert_eq!(updated["updated_user"], 7);

    let (_, completed) = send(&app, Method::GET, "/api/v1/events/completed", Some(USER), None).await;
    assert_eq!(completed.as_array().unwrap().len(), 1);
    assert_eq!(completed[0]["id"], first);

    let (_, active) = send(&app, Method::GET, "/api/v1/events?status=active", Some(USER), None).await;
    assert_eq!(active.as_array().unwrap().len(), 1);

    let (status, response) = send(&app, Method::GET, "/api/v1/events?status=finished", Some(USER), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["fields"]["status"].is_array());
}

#[tokio::test]
async fn test_update_event_keeps_job_category_when_blank() {
    let app = app().await;
    let id = create_event(&app, "Hack Day").await;
    let (_, before) = send(&app, Method::GET, &format!("/api/v1/events/{}", id), Some(USER), None).await;

    let mut update = event_body("Hack Day v2", "")["event"].clone();
    update["job_category_name"] = json!("");
    let (status, updated) = send(&app, Method::PUT, &format!("/api/v1/events/{}", id), Some(USER), Some(update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Hack Day v2");
    assert_eq!(updated["job_category_id"], before["job_category_id"]);
    assert_eq!(updated["category_id"], Value::Null);

    let (status, _) = send(&app, Method::PUT, "/api/v1/events/999", Some(USER), Some(event_body("X", "")["event"].clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_events() {
    let app = app().await;
    create_event(&app, "Hack Day").await;
    create_event(&app, "Team Lunch").await;

    let (status, found) = send(&app, Method::POST, "/api/v1/events/search", Some(USER), Some(json!({"search": "hack"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["name"], "Hack Day");

    let (_, none) = send(&app, Method::POST, "/api/v1/events/search", Some(USER), Some(json!({"search": "xyz"}))).await;
    assert_eq!(none, json!([]));

    let (_, blank) = send(&app, Method::POST, "/api/v1/events/search", Some(USER), Some(json!({"search": ""}))).await;
    let (_, missing) = send(&app, Method::POST, "/api/v1/events/search", Some(USER), Some(json!({}))).await;
    assert_eq!(blank.as_array().unwrap().len(), 2);
    assert_eq!(blank, missing);
}

#[tokio::test]
async fn test_event_category_crud_and_search() {
    let app = app().await;
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/event-categories",
        Some(USER),
        Some(json!({"name": "Technology", "code": "TECH", "priority": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (_, found) = send(&app, Method::POST, "/api/v1/event-categories/search", Some(USER), Some(json!({"search": "TECH"}))).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/event-categories/{}", id),
        Some(USER),
        Some(json!({"name": "Tech", "code": "TECH", "status": "disabled"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "disabled");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/event-categories/{}", id), Some(USER), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/api/v1/event-categories/{}", id), Some(USER), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_job_category_is_conflict() {
    let app = app().await;
    let (status, _) = send(&app, Method::POST, "/api/v1/job-categories", Some(USER), Some(json!({"name": "Engineer"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/v1/job-categories", Some(USER), Some(json!({"name": " Engineer "}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
}

#[tokio::test]
async fn test_members_absent_view() {
    let app = app().await;
    let event = create_event(&app, "Hack Day").await;
    for (user, attend_status) in [(1, "absent"), (2, "attending"), (3, "absent")] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/event-members",
            Some(USER),
            Some(json!({"event": event, "user": user, "attend_status": attend_status})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, absent) = send(&app, Method::GET, "/api/v1/event-members/absent", Some(USER), None).await;
    let users: Vec<i64> = absent.as_array().unwrap().iter().map(|m| m["user"].as_i64().unwrap()).collect();
    assert_eq!(users, vec![1, 3]);

    let (_, filtered) = send(&app, Method::GET, "/api/v1/event-members?attend_status=absent", Some(USER), None).await;
    assert_eq!(filtered, absent);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/event-members",
        Some(USER),
        Some(json!({"event": 999, "user": 4, "attend_status": "waiting"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["fields"]["event"].is_array());
}

async fn event_with_member_and_wish(app: &Router) -> i64 {
    let event = create_event(app, "Hack Day").await;
    let (status, _) = send(
        app,
        Method::POST,
        "/api/v1/event-members",
        Some(USER),
        Some(json!({"event": event, "user": 2, "attend_status": "attending"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(app, Method::POST, "/api/v1/event-wishes", Some(USER), Some(json!({"event": event, "user": 3}))).await;
    assert_eq!(status, StatusCode::CREATED);
    event
}

#[tokio::test]
async fn test_delete_event_cascades_by_default() {
    let app = app_with_policy(EventDeletePolicy::Cascade).await;
    let event = event_with_member_and_wish(&app).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/events/{}", event), Some(USER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);

    let (_, members) = send(&app, Method::GET, "/api/v1/event-members", Some(USER), None).await;
    assert_eq!(members, json!([]));
    let (_, wishes) = send(&app, Method::GET, "/api/v1/event-wishes", Some(USER), None).await;
    assert_eq!(wishes, json!([]));
    let (status, _) = send(&app, Method::GET, &format!("/api/v1/events/{}", event), Some(USER), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_event_rejected_under_reject_policy() {
    let app = app_with_policy(EventDeletePolicy::Reject).await;
    let event = event_with_member_and_wish(&app).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/events/{}", event), Some(USER), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/events/{}", event), Some(USER), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, members) = send(&app, Method::GET, "/api/v1/event-members", Some(USER), None).await;
    assert_eq!(members.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_user_coins() {
    let app = app().await;
    for (user, gain_type, gain_coin) in [(5, "attendance", 10), (6, "bonus", 2), (5, "redemption", 4)] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/user-coins",
            Some(USER),
            Some(json!({"user": user, "gain_type": gain_type, "gain_coin": gain_coin})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, all) = send(&app, Method::GET, "/api/v1/user-coins", Some(USER), None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
    let (_, mine) = send(&app, Method::GET, "/api/v1/user-coins?user=5", Some(USER), None).await;
    assert_eq!(mine.as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/user-coins",
        Some(USER),
        Some(json!({"user": 5, "gain_type": "bonus", "gain_coin": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["fields"]["gain_coin"].is_array());
}
