//! End-to-end HTTP tests against an in-memory SQLite pool.

use actix_web::{App, test, web::Data};
use attendance_api::{config::Config, db, routes};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

fn temp_upload_dir() -> String {
    let dir = std::env::temp_dir().join(format!("attendance-uploads-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.to_string_lossy().into_owned()
}

fn test_config(upload_dir: &str) -> Config {
    Config {
        server_addr: "127.0.0.1:0".into(),
        database_url: "sqlite::memory:".into(),
        jwt_secret: "test-secret".into(),
        access_token_ttl: 900,
        otp_ttl_secs: 600,
        allowed_email: "admin@company.com".into(),
        google_maps_api_key: "maps-key-123".into(),
        upload_dir: upload_dir.to_string(),
        rate_otp_request_per_min: 600,
        rate_otp_verify_per_min: 600,
        api_prefix: "/api".into(),
    }
}

// A single connection keeps every query on the same in-memory database
async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::init_tables(&pool).await.unwrap();
    pool
}

macro_rules! test_app {
    ($pool:expr, $config:expr) => {{
        let routes_config = $config.clone();
        test::init_service(
            App::new()
                .app_data(Data::new($pool.clone()))
                .app_data(Data::new($config.clone()))
                .configure(move |cfg| routes::configure(cfg, routes_config)),
        )
        .await
    }};
}

// -------------------------
// Multipart helpers
// -------------------------

const BOUNDARY: &str = "----attendance-test-boundary";

fn push_text_part(body: &mut Vec<u8>, name: &str, value: &str) {
    body.extend_from_slice(
        format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
            .as_bytes(),
    );
}

fn push_file_part(body: &mut Vec<u8>, name: &str, filename: &str, bytes: &[u8]) {
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
}

fn attendance_request(fields: &[(&str, &str)], file: Option<&[u8]>) -> test::TestRequest {
    let mut body = Vec::new();
    for (name, value) in fields {
        push_text_part(&mut body, name, value);
    }
    if let Some(bytes) = file {
        push_file_part(&mut body, "selfie", "selfie.jpg", bytes);
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    test::TestRequest::post()
        .uri("/attendance")
        .insert_header(("host", "localhost:8080"))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

const FULL_FIELDS: &[(&str, &str)] = &[
    ("employee", "Alice Rahman"),
    ("type", "check-in"),
    ("date", "2024-01-01"),
    ("time", "09:02:41"),
    ("latitude", "23.7806"),
    ("longitude", "90.4074"),
    ("location", "Gulshan Avenue, Dhaka"),
    ("office", "Head Office"),
];

async fn seed_employee(pool: &SqlitePool, name: &str) {
    sqlx::query("INSERT INTO employees (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
}

async fn seed_office(pool: &SqlitePool, name: &str, lat: f64, lng: f64) {
    sqlx::query("INSERT INTO offices (name, latitude, longitude) VALUES (?, ?, ?)")
        .bind(name)
        .bind(lat)
        .bind(lng)
        .execute(pool)
        .await
        .unwrap();
}

// -------------------------
// Attendance submission
// -------------------------

#[actix_web::test]
async fn submission_without_file_stores_exact_fields() {
    let pool = test_pool().await;
    let config = test_config(&temp_upload_dir());
    let app = test_app!(pool, config);

    let resp: Value =
        test::call_and_read_body_json(&app, attendance_request(FULL_FIELDS, None).to_request())
            .await;
    assert_eq!(resp["success"], Value::Bool(true));

    let row: (String, String, String, String, f64, f64, String, String, String) = sqlx::query_as(
        "SELECT employee, type, date, time, latitude, longitude, location, selfie_url, office FROM attendance",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(row.0, "Alice Rahman");
    assert_eq!(row.1, "check-in");
    assert_eq!(row.2, "2024-01-01");
    assert_eq!(row.3, "09:02:41");
    assert_eq!(row.4, 23.7806);
    assert_eq!(row.5, 90.4074);
    assert_eq!(row.6, "Gulshan Avenue, Dhaka");
    assert_eq!(row.7, "");
    assert_eq!(row.8, "Head Office");
}

#[actix_web::test]
async fn submission_with_file_stores_public_url_and_bytes() {
    let pool = test_pool().await;
    let upload_dir = temp_upload_dir();
    let config = test_config(&upload_dir);
    let app = test_app!(pool, config);

    let jpeg = b"\xff\xd8\xff\xe0fake-jpeg-bytes";
    let resp: Value = test::call_and_read_body_json(
        &app,
        attendance_request(FULL_FIELDS, Some(jpeg)).to_request(),
    )
    .await;
    assert_eq!(resp["success"], Value::Bool(true));

    let selfie_url: Option<String> = sqlx::query_scalar("SELECT selfie_url FROM attendance")
        .fetch_one(&pool)
        .await
        .unwrap();
    let selfie_url = selfie_url.unwrap();

    assert!(
        selfie_url.starts_with("http://localhost:8080/uploads/"),
        "unexpected url: {selfie_url}"
    );
    assert!(selfie_url.ends_with(".jpg"));

    let filename = selfie_url.rsplit('/').next().unwrap();
    let stored = std::fs::read(std::path::Path::new(&upload_dir).join(filename)).unwrap();
    assert_eq!(stored, jpeg);
}

#[actix_web::test]
async fn non_numeric_latitude_does_not_block_creation() {
    let pool = test_pool().await;
    let config = test_config(&temp_upload_dir());
    let app = test_app!(pool, config);

    let fields = &[
        ("employee", "Alice Rahman"),
        ("type", "check-in"),
        ("date", "2024-01-01"),
        ("time", "09:02:41"),
        ("latitude", "not-a-number"),
        ("longitude", "90.4074"),
        ("location", "somewhere"),
        ("office", "Head Office"),
    ];
    let resp: Value =
        test::call_and_read_body_json(&app, attendance_request(fields, None).to_request()).await;
    assert_eq!(resp["success"], Value::Bool(true));

    // The NaN sentinel lands as NULL in SQLite
    let (lat, lng): (Option<f64>, Option<f64>) =
        sqlx::query_as("SELECT latitude, longitude FROM attendance")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(lat, None);
    assert_eq!(lng, Some(90.4074));
}

#[actix_web::test]
async fn missing_fields_default_to_empty_strings() {
    let pool = test_pool().await;
    let config = test_config(&temp_upload_dir());
    let app = test_app!(pool, config);

    let resp: Value = test::call_and_read_body_json(
        &app,
        attendance_request(&[("employee", "Bob")], None).to_request(),
    )
    .await;
    assert_eq!(resp["success"], Value::Bool(true));

    let (employee, kind, date): (String, String, String) =
        sqlx::query_as("SELECT employee, type, date FROM attendance")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(employee, "Bob");
    assert_eq!(kind, "");
    assert_eq!(date, "");
}

#[actix_web::test]
async fn duplicate_submissions_create_two_rows() {
    let pool = test_pool().await;
    let config = test_config(&temp_upload_dir());
    let app = test_app!(pool, config);

    for _ in 0..2 {
        let resp: Value =
            test::call_and_read_body_json(&app, attendance_request(FULL_FIELDS, None).to_request())
                .await;
        assert_eq!(resp["success"], Value::Bool(true));
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

// -------------------------
// Attendance listing
// -------------------------

async fn seed_attendance(pool: &SqlitePool, employee: &str, date: &str) {
    sqlx::query(
        "INSERT INTO attendance (employee, type, date, time, location, selfie_url, office)
         VALUES (?, 'check-in', ?, '09:00:00', 'office', '', 'Head Office')",
    )
    .bind(employee)
    .bind(date)
    .execute(pool)
    .await
    .unwrap();
}

#[actix_web::test]
async fn attendance_list_filters_exactly() {
    let pool = test_pool().await;
    let config = test_config(&temp_upload_dir());
    let app = test_app!(pool, config);

    seed_attendance(&pool, "Alice", "2024-01-01").await;
    seed_attendance(&pool, "Alice", "2024-01-02").await;
    seed_attendance(&pool, "Bob", "2024-01-01").await;

    // Both filters
    let req = test::TestRequest::get()
        .uri("/attendance?employee=Alice&date=2024-01-01")
        .to_request();
    let rows: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["employee"], "Alice");
    assert_eq!(rows[0]["date"], "2024-01-01");
    assert_eq!(rows[0]["type"], "check-in");

    // Employee only
    let req = test::TestRequest::get()
        .uri("/attendance?employee=Alice")
        .to_request();
    let rows: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rows.len(), 2);

    // Date only
    let req = test::TestRequest::get()
        .uri("/attendance?date=2024-01-01")
        .to_request();
    let rows: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rows.len(), 2);

    // No filter means everything
    let req = test::TestRequest::get().uri("/attendance").to_request();
    let rows: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rows.len(), 3);
}

#[actix_web::test]
async fn attendance_list_defaults_missing_office_and_selfie() {
    let pool = test_pool().await;
    let config = test_config(&temp_upload_dir());
    let app = test_app!(pool, config);

    sqlx::query(
        "INSERT INTO attendance (employee, type, date, time, location, selfie_url, office)
         VALUES ('Alice', 'check-in', '2024-01-01', '09:00:00', 'office', NULL, NULL)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let req = test::TestRequest::get().uri("/attendance").to_request();
    let rows: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rows[0]["office"], "");
    assert_eq!(rows[0]["selfie"], "");
}

// -------------------------
// Directory
// -------------------------

#[actix_web::test]
async fn employees_returns_each_seeded_name_once() {
    let pool = test_pool().await;
    let config = test_config(&temp_upload_dir());
    let app = test_app!(pool, config);

    seed_employee(&pool, "Alice Rahman").await;
    seed_employee(&pool, "Bob Chowdhury").await;

    let req = test::TestRequest::get().uri("/employees").to_request();
    let rows: Vec<Value> = test::call_and_read_body_json(&app, req).await;

    let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Alice Rahman", "Bob Chowdhury"]);
}

#[actix_web::test]
async fn offices_returns_documents_verbatim() {
    let pool = test_pool().await;
    let config = test_config(&temp_upload_dir());
    let app = test_app!(pool, config);

    seed_office(&pool, "Head Office", 23.7806, 90.4074).await;

    let req = test::TestRequest::get().uri("/offices").to_request();
    let rows: Vec<Value> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Head Office");
    assert_eq!(rows[0]["latitude"], 23.7806);
    assert_eq!(rows[0]["longitude"], 90.4074);
}

// -------------------------
// Status + auth
// -------------------------

#[actix_web::test]
async fn index_reports_ok() {
    let pool = test_pool().await;
    let config = test_config(&temp_upload_dir());
    let app = test_app!(pool, config);

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "OK");
}

#[actix_web::test]
async fn otp_request_rejects_unknown_email() {
    let pool = test_pool().await;
    let config = test_config(&temp_upload_dir());
    let app = test_app!(pool, config);

    let req = test::TestRequest::post()
        .uri("/api/auth/request-otp")
        .peer_addr("127.0.0.1:9100".parse().unwrap())
        .set_json(serde_json::json!({"email": "intruder@evil.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn otp_flow_issues_token_that_unlocks_maps_key() {
    let pool = test_pool().await;
    let config = test_config(&temp_upload_dir());
    let app = test_app!(pool, config);

    // No token, no key
    let req = test::TestRequest::get().uri("/google").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);

    // Request a code for the allowed address
    let req = test::TestRequest::post()
        .uri("/api/auth/request-otp")
        .peer_addr("127.0.0.1:9101".parse().unwrap())
        .set_json(serde_json::json!({"email": "admin@company.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    // The code is delivered out of band; read it straight from storage
    let code: Option<String> = sqlx::query_scalar("SELECT otp_code FROM users WHERE email = ?")
        .bind("admin@company.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    let code = code.unwrap();

    // Wrong code stays locked out
    let wrong = if code == "000000" { "111111" } else { "000000" };
    let req = test::TestRequest::post()
        .uri("/api/auth/verify-otp")
        .peer_addr("127.0.0.1:9101".parse().unwrap())
        .set_json(serde_json::json!({"email": "admin@company.com", "code": wrong}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);

    // Correct code yields a bearer token
    let req = test::TestRequest::post()
        .uri("/api/auth/verify-otp")
        .peer_addr("127.0.0.1:9101".parse().unwrap())
        .set_json(serde_json::json!({"email": "admin@company.com", "code": code}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["access_token"].as_str().unwrap().to_string();

    // Codes are single-use
    let remaining: Option<String> = sqlx::query_scalar("SELECT otp_code FROM users WHERE email = ?")
        .bind("admin@company.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, None);

    // Token unlocks the maps key
    let req = test::TestRequest::get()
        .uri("/google")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["key"], "maps-key-123");
}
