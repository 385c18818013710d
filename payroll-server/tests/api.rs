//! End-to-end API tests over the real router and an in-memory database.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use payroll_server::auth::SessionConfig;
use payroll_server::{Config, ServerState, api};

async fn test_app() -> Router {
    let config = Config {
        work_dir: ".".to_string(),
        http_port: 0,
        environment: "test".to_string(),
        session: SessionConfig {
            secret: "integration-test-secret-integration!".to_string(),
            expiration_minutes: 60,
            issuer: "payroll-server".to_string(),
        },
    };
    let state = ServerState::initialize_in_memory(&config)
        .await
        .expect("in-memory state");
    api::build_app(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, http::HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, headers, value)
}

/// Register a user and log in, returning the session cookie pair
async fn login(app: &Router, username: &str) -> String {
    let creds = json!({"username": username, "password": "correct horse battery"});
    let (status, _, _) = send(app, "POST", "/api/auth/register", None, Some(creds.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, headers, _) = send(app, "POST", "/api/auth/login", None, Some(creds)).await;
    assert_eq!(status, StatusCode::OK);

    let set_cookie = headers
        .get(header::SET_COOKIE)
        .expect("login sets a session cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    set_cookie.split(';').next().unwrap().to_string()
}

fn employee_body(email: &str, salary: &str) -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "position": "Engineer",
        "hire_date": "2023-06-01",
        "base_salary": salary,
    })
}

#[tokio::test]
async fn anonymous_requests_are_rejected_everywhere() {
    let app = test_app().await;

    for (method, uri) in [
        ("GET", "/api/employees"),
        ("POST", "/api/employees"),
        ("GET", "/api/employees/1"),
        ("PUT", "/api/employees/1"),
        ("DELETE", "/api/employees/1"),
        ("GET", "/api/employees/1/payrolls"),
        ("GET", "/api/payrolls"),
        ("POST", "/api/payrolls/generate"),
        ("POST", "/api/auth/logout"),
        ("GET", "/api/auth/me"),
    ] {
        let (status, _, body) = send(&app, method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body["code"], "E3001", "{method} {uri}");
        assert!(body["data"].is_null(), "no data leaks from {method} {uri}");
    }

    // A forged session is rejected too
    let (status, _, body) =
        send(&app, "GET", "/api/employees", Some("session=not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;
    let (status, _, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_login_logout_roundtrip() {
    let app = test_app().await;
    let cookie = login(&app, "ada").await;

    let (status, _, body) = send(&app, "GET", "/api/auth/me", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "ada");

    let (status, headers, _) = send(&app, "POST", "/api/auth/logout", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    let cleared = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn duplicate_username_conflicts_and_login_errors_are_uniform() {
    let app = test_app().await;
    let creds = json!({"username": "ada", "password": "correct horse battery"});
    let (status, _, _) = send(&app, "POST", "/api/auth/register", None, Some(creds.clone())).await;
    assert_eq!(status, StatusCode::OK);

    // Second registration under the same username fails, first is unaffected
    let (status, _, body) = send(&app, "POST", "/api/auth/register", None, Some(creds)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");

    // Wrong password and unknown user yield the same message
    let (s1, _, b1) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "ada", "password": "wrong password!"})),
    )
    .await;
    let (s2, _, b2) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "nobody", "password": "wrong password!"})),
    )
    .await;
    assert_eq!(s1, StatusCode::BAD_REQUEST);
    assert_eq!(s2, StatusCode::BAD_REQUEST);
    assert_eq!(b1["message"], b2["message"]);
}

#[tokio::test]
async fn employee_crud_and_duplicate_email() {
    let app = test_app().await;
    let cookie = login(&app, "ada").await;

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/employees",
        Some(&cookie),
        Some(employee_body("grace@example.com", "3200.00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["base_salary"], "3200.00");

    // Duplicate email is a conflict, nothing extra persisted
    let (status, _, body) = send(
        &app,
        "POST",
        "/api/employees",
        Some(&cookie),
        Some(employee_body("grace@example.com", "1000.00")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");

    let (status, _, body) = send(&app, "GET", "/api/employees", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Full update
    let (status, _, body) = send(
        &app,
        "PUT",
        &format!("/api/employees/{id}"),
        Some(&cookie),
        Some(employee_body("grace@example.com", "3500.00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["base_salary"], "3500.00");

    // Bad hire date is a validation error
    let mut bad = employee_body("new@example.com", "1000.00");
    bad["hire_date"] = json!("01/06/2023");
    let (status, _, body) =
        send(&app, "POST", "/api/employees", Some(&cookie), Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    // Unknown id is 404
    let (status, _, _) = send(&app, "GET", "/api/employees/999", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn payroll_generation_flow() {
    let app = test_app().await;
    let cookie = login(&app, "ada").await;

    let (_, _, body) = send(
        &app,
        "POST",
        "/api/employees",
        Some(&cookie),
        Some(employee_body("grace@example.com", "1600.00")),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    // 1600.00 salary, 80h, 100 bonus, 50 deductions -> 900 gross, 850 net
    let (status, _, body) = send(
        &app,
        "POST",
        "/api/payrolls/generate",
        Some(&cookie),
        Some(json!({
            "employee_id": id,
            "pay_date": "2024-01-31",
            "hours_worked": "80",
            "bonus": "100.00",
            "deductions": "50.00",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["gross_pay"], "900.00");
    assert_eq!(body["data"]["net_pay"], "850.00");
    assert_eq!(body["data"]["base_salary_at_pay"], "1600.00");

    // bonus/deductions default to zero when omitted
    let (status, _, body) = send(
        &app,
        "POST",
        "/api/payrolls/generate",
        Some(&cookie),
        Some(json!({
            "employee_id": id,
            "pay_date": "2024-02-29",
            "hours_worked": "160",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["gross_pay"], "1600.00");

    // Unknown employee writes nothing
    let (status, _, _) = send(
        &app,
        "POST",
        "/api/payrolls/generate",
        Some(&cookie),
        Some(json!({
            "employee_id": 999,
            "pay_date": "2024-01-31",
            "hours_worked": "80",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Negative figures are rejected
    let (status, _, _) = send(
        &app,
        "POST",
        "/api/payrolls/generate",
        Some(&cookie),
        Some(json!({
            "employee_id": id,
            "pay_date": "2024-01-31",
            "hours_worked": "-8",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Ledger lists newest pay date first
    let (status, _, body) = send(&app, "GET", "/api/payrolls", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    let ledger = body["data"].as_array().unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger[0]["pay_date"], "2024-02-29");
    assert_eq!(ledger[1]["pay_date"], "2024-01-31");
}

#[tokio::test]
async fn salary_edits_do_not_rewrite_history_and_delete_orphans_it() {
    let app = test_app().await;
    let cookie = login(&app, "ada").await;

    let (_, _, body) = send(
        &app,
        "POST",
        "/api/employees",
        Some(&cookie),
        Some(employee_body("grace@example.com", "3200.00")),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    send(
        &app,
        "POST",
        "/api/payrolls/generate",
        Some(&cookie),
        Some(json!({
            "employee_id": id,
            "pay_date": "2024-01-31",
            "hours_worked": "160",
        })),
    )
    .await;

    // Raise the salary afterwards
    let (status, _, _) = send(
        &app,
        "PUT",
        &format!("/api/employees/{id}"),
        Some(&cookie),
        Some(employee_body("grace@example.com", "6400.00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = send(
        &app,
        "GET",
        &format!("/api/employees/{id}/payrolls"),
        Some(&cookie),
        None,
    )
    .await;
    let history = body["data"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["base_salary_at_pay"], "3200.00");
    assert_eq!(history[0]["net_pay"], "3200.00");

    // Deleting the employee orphans but keeps the ledger rows
    let (status, _, _) =
        send(&app, "DELETE", &format!("/api/employees/{id}"), Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = send(&app, "GET", "/api/payrolls", Some(&cookie), None).await;
    let ledger = body["data"].as_array().unwrap();
    assert_eq!(ledger.len(), 1);
    assert!(ledger[0]["employee_id"].is_null());
    assert_eq!(ledger[0]["base_salary_at_pay"], "3200.00");
}
