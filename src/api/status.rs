use actix_web::{HttpResponse, Responder};
use serde_json::json;

/// Health probe
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = Object, example = json!({
            "status": "OK",
            "message": "API is running"
        }))
    ),
    tag = "Status"
)]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "message": "API is running"
    }))
}
