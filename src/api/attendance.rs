use crate::config::Config;
use crate::model::attendance::Attendance;
use crate::upload;
use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

/// Multipart submission from the mobile client. Every text field is
/// optional; nothing here is validated beyond type coercion.
#[derive(Debug, MultipartForm)]
pub struct AttendanceForm {
    pub employee: Option<Text<String>>,
    #[multipart(rename = "type")]
    pub kind: Option<Text<String>>,
    pub date: Option<Text<String>>,
    pub time: Option<Text<String>>,
    pub latitude: Option<Text<String>>,
    pub longitude: Option<Text<String>>,
    pub location: Option<Text<String>>,
    pub office: Option<Text<String>>,
    pub selfie: Option<TempFile>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceFilter {
    /// Exact-match filter by employee name
    pub employee: Option<String>,
    /// Exact-match filter by date string (as submitted, e.g. 2024-01-01)
    pub date: Option<String>,
}

/// Row reshaped for the dashboard; absent office/selfie come back as ""
#[derive(Serialize, ToSchema)]
pub struct AttendanceResponse {
    #[schema(example = "Alice Rahman")]
    pub employee: String,
    #[serde(rename = "type")]
    #[schema(example = "check-in")]
    pub kind: String,
    #[schema(example = "2024-01-01")]
    pub date: String,
    #[schema(example = "09:02:41")]
    pub time: String,
    #[schema(example = "Gulshan Avenue, Dhaka")]
    pub location: String,
    #[schema(example = "Head Office")]
    pub office: String,
    #[schema(example = "http://localhost:5000/uploads/1704100961000-48151623.jpg")]
    pub selfie: String,
}

fn text_or_empty(field: &Option<Text<String>>) -> String {
    field.as_ref().map(|t| t.0.clone()).unwrap_or_default()
}

/// Lenient parseFloat-style coercion: anything non-numeric becomes the
/// NaN sentinel rather than a rejected request.
pub(crate) fn coerce_coord(field: &Option<Text<String>>) -> f64 {
    field
        .as_ref()
        .and_then(|t| t.0.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// SQLite has no NaN; the sentinel is stored as NULL
fn db_coord(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

/* =========================
Record attendance
========================= */
#[utoipa::path(
    post,
    path = "/attendance",
    request_body(
        content = Object,
        description = "multipart form: employee, type, date, time, latitude, longitude, location, office, selfie (file, optional)",
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, description = "Attendance recorded", body = Object, example = json!({
            "success": true,
            "message": "Attendance recorded successfully."
        })),
        (status = 500, description = "Storage or file write failure", body = Object, example = json!({
            "success": false,
            "error": "Internal server error"
        }))
    ),
    tag = "Attendance"
)]
pub async fn record_attendance(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    MultipartForm(form): MultipartForm<AttendanceForm>,
) -> impl Responder {
    // Selfie first: the record stores the public URL, or "" when the
    // client sent no file
    let selfie_url = match form.selfie.as_ref() {
        Some(file) => match upload::store_selfie(file, &config.upload_dir) {
            Ok(name) => upload::public_url(&req, &name),
            Err(e) => {
                error!(error = %e, "Failed to store selfie");
                return HttpResponse::InternalServerError().json(json!({
                    "success": false,
                    "error": "Internal server error"
                }));
            }
        },
        None => String::new(),
    };

    let result = sqlx::query(
        r#"
        INSERT INTO attendance
            (employee, type, date, time, latitude, longitude, location, selfie_url, office)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(text_or_empty(&form.employee))
    .bind(text_or_empty(&form.kind))
    .bind(text_or_empty(&form.date))
    .bind(text_or_empty(&form.time))
    .bind(db_coord(coerce_coord(&form.latitude)))
    .bind(db_coord(coerce_coord(&form.longitude)))
    .bind(text_or_empty(&form.location))
    .bind(selfie_url)
    .bind(text_or_empty(&form.office))
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Attendance recorded successfully."
        })),
        Err(e) => {
            error!(error = %e, "Failed to record attendance");
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": "Internal server error"
            }))
        }
    }
}

/* =========================
List attendance (dashboard)
========================= */
#[utoipa::path(
    get,
    path = "/attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Matching attendance records", body = [AttendanceResponse]),
        (status = 500, description = "Storage failure", body = Object, example = json!({
            "error": "Failed to fetch attendance details"
        }))
    ),
    tag = "Attendance"
)]
pub async fn attendance_list(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceFilter>,
) -> impl Responder {
    // -------------------------
    // WHERE clause
    // -------------------------
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<&str> = Vec::new();

    if let Some(employee) = query.employee.as_deref() {
        where_sql.push_str(" AND employee = ?");
        args.push(employee);
    }

    if let Some(date) = query.date.as_deref() {
        where_sql.push_str(" AND date = ?");
        args.push(date);
    }

    // Neither filter supplied means every record, unbounded
    let sql = format!(
        r#"
        SELECT id, employee, type, date, time, latitude, longitude, location, selfie_url, office
        FROM attendance
        {}
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, Attendance>(&sql);
    for arg in args {
        data_q = data_q.bind(arg);
    }

    let records = match data_q.fetch_all(pool.get_ref()).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(error = %e, "Failed to fetch attendance list");
            return HttpResponse::InternalServerError().json(json!({
                "error": "Failed to fetch attendance details"
            }));
        }
    };

    let result: Vec<AttendanceResponse> = records
        .into_iter()
        .map(|r| AttendanceResponse {
            employee: r.employee,
            kind: r.kind,
            date: r.date,
            time: r.time,
            location: r.location,
            office: r.office.unwrap_or_default(),
            selfie: r.selfie_url.unwrap_or_default(),
        })
        .collect();

    HttpResponse::Ok().json(result)
}
