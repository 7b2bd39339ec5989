use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use pomotrack_server::{app, open_database, AppState, Config};

fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_path: String::new(),
        allowed_origins: vec!["http://localhost:5173".to_string()],
        session_ttl_secs: 3600,
        environment: "test".to_string(),
        password_pepper: "test-pepper".to_string(),
    }
}

fn create_test_app() -> (TempDir, Router) {
    create_test_app_with_config(test_config())
}

fn create_test_app_with_config(config: Config) -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let db = open_database(dir.path().join("test.db")).unwrap();
    let router = app(AppState::new(db, config));
    (dir, router)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The session cookie pair (`auth_token=...`) from a Set-Cookie header.
fn session_cookie_of(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should carry a Set-Cookie header")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn register_user(app: &Router, username: &str, password: &str) -> String {
    let response = send(
        app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie_of(&response)
}

async fn submit(app: &Router, cookie: &str, date: &str, time: Value, pomodoro: Option<&str>) {
    let mut body = json!({ "time": time, "date": date });
    if let Some(flag) = pomodoro {
        body["pomodoro"] = json!(flag);
    }
    let response = send(app, "POST", "/sendRecord", Some(cookie), Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

async fn stats_for(app: &Router, cookie: &str, date: &str) -> Value {
    let uri = format!("/main-stats?date={date}");
    let response = send(app, "GET", &uri, Some(cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ===== Health =====

#[tokio::test]
async fn test_health_check() {
    let (_dir, app) = create_test_app();
    let response = send(&app, "GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

// ===== Registration =====

#[tokio::test]
async fn test_register_sets_session_cookie() {
    let (_dir, app) = create_test_app();
    let response = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": "alice", "password": "hunter2hunter2" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("auth_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(!set_cookie.contains("Secure"));

    assert_eq!(body_json(response).await["message"], "User registered.");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let (_dir, app) = create_test_app();
    register_user(&app, "alice", "hunter2hunter2").await;

    let response = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": "alice", "password": "another-password" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Username already taken");
}

#[tokio::test]
async fn test_register_missing_password() {
    let (_dir, app) = create_test_app();
    let response = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": "alice" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Username or password missing."
    );
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let (_dir, app) = create_test_app();
    let response = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": "alice", "password": "short" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_invalid_username() {
    let (_dir, app) = create_test_app();
    for username in ["ab", "has space", "way-too-long-username-padding-it-out-here"] {
        let response = send(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({ "username": username, "password": "hunter2hunter2" })),
        )
        .await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "accepted {username:?}"
        );
    }
}

// ===== Login and logout =====

#[tokio::test]
async fn test_login_returns_working_session() {
    let (_dir, app) = create_test_app();
    register_user(&app, "carol", "hunter2hunter2").await;

    let response = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "carol", "password": "hunter2hunter2" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie_of(&response);
    assert_eq!(body_json(response).await["message"], "User logged in");

    let check = send(&app, "GET", "/checkCookie", Some(&cookie), None).await;
    assert_eq!(check.status(), StatusCode::OK);
    assert_eq!(body_json(check).await["message"], "Cookie set");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (_dir, app) = create_test_app();
    register_user(&app, "carol", "hunter2hunter2").await;

    let response = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "carol", "password": "wrong-password" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid username or password"
    );
}

#[tokio::test]
async fn test_login_unknown_user_same_rejection() {
    let (_dir, app) = create_test_app();

    let response = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "nobody", "password": "hunter2hunter2" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid username or password"
    );
}

#[tokio::test]
async fn test_login_missing_fields() {
    let (_dir, app) = create_test_app();

    let response = send(&app, "POST", "/login", None, Some(json!({}))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Username or password missing."
    );
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let (_dir, app) = create_test_app();
    let cookie = register_user(&app, "carol", "hunter2hunter2").await;

    let response = send(&app, "DELETE", "/logout", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(body_json(response).await["message"], "Session finished.");

    let check = send(&app, "GET", "/checkCookie", Some(&cookie), None).await;
    assert_eq!(check.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_cookie() {
    let (_dir, app) = create_test_app();

    let response = send(&app, "DELETE", "/logout", None, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "No session token provided."
    );
}

#[tokio::test]
async fn test_check_cookie_without_session() {
    let (_dir, app) = create_test_app();
    let response = send(&app, "GET", "/checkCookie", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_zero_ttl_session_is_already_expired() {
    let mut config = test_config();
    config.session_ttl_secs = 0;
    let (_dir, app) = create_test_app_with_config(config);

    let cookie = register_user(&app, "carol", "hunter2hunter2").await;

    let check = send(&app, "GET", "/checkCookie", Some(&cookie), None).await;
    assert_eq!(check.status(), StatusCode::UNAUTHORIZED);
}

// ===== Record submission =====

#[tokio::test]
async fn test_send_record_create_then_update() {
    let (_dir, app) = create_test_app();
    let cookie = register_user(&app, "alice", "hunter2hunter2").await;

    let first = send(
        &app,
        "POST",
        "/sendRecord",
        Some(&cookie),
        Some(json!({ "time": 100, "date": "2024-03-06" })),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await["message"], "New time record created");

    let second = send(
        &app,
        "POST",
        "/sendRecord",
        Some(&cookie),
        Some(json!({ "time": 200, "date": "2024-03-06" })),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await["message"], "Time record updated");

    let stats = stats_for(&app, &cookie, "2024-03-06").await;
    assert_eq!(stats["secToday"], 300);
}

#[tokio::test]
async fn test_send_record_requires_auth() {
    let (_dir, app) = create_test_app();

    let response = send(
        &app,
        "POST",
        "/sendRecord",
        None,
        Some(json!({ "time": 100, "date": "2024-03-06" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let stats = send(&app, "GET", "/main-stats?date=2024-03-06", None, None).await;
    assert_eq!(stats.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_send_record_rejects_bad_dates() {
    let (_dir, app) = create_test_app();
    let cookie = register_user(&app, "alice", "hunter2hunter2").await;

    for date in ["2024-3-6", "06-03-2024", "2024-02-31", "garbage", ""] {
        let response = send(
            &app,
            "POST",
            "/sendRecord",
            Some(&cookie),
            Some(json!({ "time": 100, "date": date })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "accepted {date:?}");
        assert_eq!(body_json(response).await["error"], "Date format error.");
    }
}

#[tokio::test]
async fn test_send_record_rejects_bad_time() {
    let (_dir, app) = create_test_app();
    let cookie = register_user(&app, "alice", "hunter2hunter2").await;

    let response = send(
        &app,
        "POST",
        "/sendRecord",
        Some(&cookie),
        Some(json!({ "time": "abc", "date": "2024-03-06" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid time value");
}

#[tokio::test]
async fn test_send_record_accepts_numeric_strings() {
    let (_dir, app) = create_test_app();
    let cookie = register_user(&app, "alice", "hunter2hunter2").await;

    submit(&app, &cookie, "2024-03-06", json!("300"), None).await;

    let stats = stats_for(&app, &cookie, "2024-03-06").await;
    assert_eq!(stats["secToday"], 300);
}

#[tokio::test]
async fn test_negative_time_applies_as_correction() {
    let (_dir, app) = create_test_app();
    let cookie = register_user(&app, "alice", "hunter2hunter2").await;

    submit(&app, &cookie, "2024-03-06", json!(500), None).await;
    submit(&app, &cookie, "2024-03-06", json!(-200), None).await;

    let stats = stats_for(&app, &cookie, "2024-03-06").await;
    assert_eq!(stats["secToday"], 300);
}

#[tokio::test]
async fn test_pomodoro_counts_only_literal_true() {
    let (_dir, app) = create_test_app();
    let cookie = register_user(&app, "alice", "hunter2hunter2").await;

    submit(&app, &cookie, "2024-03-06", json!(10), Some("true")).await;
    submit(&app, &cookie, "2024-03-06", json!(10), Some("false")).await;
    submit(&app, &cookie, "2024-03-06", json!(10), None).await;

    // A JSON boolean is not the string "true" and does not count.
    let response = send(
        &app,
        "POST",
        "/sendRecord",
        Some(&cookie),
        Some(json!({ "time": 10, "pomodoro": true, "date": "2024-03-06" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stats = stats_for(&app, &cookie, "2024-03-06").await;
    assert_eq!(stats["secToday"], 40);
    assert_eq!(stats["pomoToday"], 1);
}

// ===== Stats =====

#[tokio::test]
async fn test_stats_zero_for_fresh_user() {
    let (_dir, app) = create_test_app();
    let cookie = register_user(&app, "alice", "hunter2hunter2").await;

    let stats = stats_for(&app, &cookie, "2024-03-06").await;

    assert_eq!(stats["username"], "alice");
    for field in ["secToday", "pomoToday", "secWeek", "pomoWeek", "secMonth", "pomoMonth"] {
        assert_eq!(stats[field], 0, "{field} should be zero");
    }
}

#[tokio::test]
async fn test_stats_day_week_month_windows() {
    let (_dir, app) = create_test_app();
    let cookie = register_user(&app, "alice", "hunter2hunter2").await;

    // 2024-03-06 is a Wednesday; its week starts Monday 2024-03-04.
    submit(&app, &cookie, "2024-03-04", json!(500), Some("true")).await;
    submit(&app, &cookie, "2024-03-05", json!(300), None).await;
    submit(&app, &cookie, "2024-03-06", json!(200), Some("true")).await;

    let stats = stats_for(&app, &cookie, "2024-03-06").await;
    assert_eq!(stats["username"], "alice");
    assert_eq!(stats["secToday"], 200);
    assert_eq!(stats["pomoToday"], 1);
    assert_eq!(stats["secWeek"], 1000);
    assert_eq!(stats["pomoWeek"], 2);
    assert_eq!(stats["secMonth"], 1000);
    assert_eq!(stats["pomoMonth"], 2);

    // Friday of the previous week still falls inside the month window.
    submit(&app, &cookie, "2024-03-01", json!(100), None).await;
    let stats = stats_for(&app, &cookie, "2024-03-06").await;
    assert_eq!(stats["secWeek"], 1000);
    assert_eq!(stats["secMonth"], 1100);

    // Days after the reference date never count.
    submit(&app, &cookie, "2024-03-07", json!(999), Some("true")).await;
    let stats = stats_for(&app, &cookie, "2024-03-06").await;
    assert_eq!(stats["secToday"], 200);
    assert_eq!(stats["secWeek"], 1000);
    assert_eq!(stats["secMonth"], 1100);
    assert_eq!(stats["pomoMonth"], 2);
}

#[tokio::test]
async fn test_stats_reads_are_idempotent() {
    let (_dir, app) = create_test_app();
    let cookie = register_user(&app, "alice", "hunter2hunter2").await;

    submit(&app, &cookie, "2024-03-06", json!(200), Some("true")).await;

    let first = stats_for(&app, &cookie, "2024-03-06").await;
    let second = stats_for(&app, &cookie, "2024-03-06").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_stats_requires_date() {
    let (_dir, app) = create_test_app();
    let cookie = register_user(&app, "alice", "hunter2hunter2").await;

    let response = send(&app, "GET", "/main-stats", Some(&cookie), None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Date format error.");
}

#[tokio::test]
async fn test_stats_users_are_isolated() {
    let (_dir, app) = create_test_app();
    let alice = register_user(&app, "alice", "hunter2hunter2").await;
    let bob = register_user(&app, "bob-2", "hunter2hunter2").await;

    submit(&app, &alice, "2024-03-06", json!(200), Some("true")).await;
    submit(&app, &bob, "2024-03-06", json!(900), None).await;

    let stats = stats_for(&app, &alice, "2024-03-06").await;
    assert_eq!(stats["username"], "alice");
    assert_eq!(stats["secToday"], 200);
    assert_eq!(stats["pomoToday"], 1);

    let stats = stats_for(&app, &bob, "2024-03-06").await;
    assert_eq!(stats["username"], "bob-2");
    assert_eq!(stats["secToday"], 900);
    assert_eq!(stats["pomoToday"], 0);
}
