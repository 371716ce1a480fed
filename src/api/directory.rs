use crate::model::{employee::Employee, office::Office};
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;

/// Employee names for the dashboard picker
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "All employee names, storage order", body = [Employee]),
        (status = 500, description = "Storage failure", body = Object, example = json!({
            "error": "Failed to fetch employees"
        }))
    ),
    tag = "Directory"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> impl Responder {
    match sqlx::query_as::<_, Employee>("SELECT name FROM employees")
        .fetch_all(pool.get_ref())
        .await
    {
        Ok(employees) => HttpResponse::Ok().json(employees),
        Err(e) => {
            error!(error = %e, "Failed to fetch employees");
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to fetch employees"
            }))
        }
    }
}

/// Office locations, returned verbatim
#[utoipa::path(
    get,
    path = "/offices",
    responses(
        (status = 200, description = "All office documents", body = [Office]),
        (status = 500, description = "Storage failure", body = Object, example = json!({
            "error": "Failed to fetch offices"
        }))
    ),
    tag = "Directory"
)]
pub async fn list_offices(pool: web::Data<SqlitePool>) -> impl Responder {
    match sqlx::query_as::<_, Office>("SELECT id, name, latitude, longitude FROM offices")
        .fetch_all(pool.get_ref())
        .await
    {
        Ok(offices) => HttpResponse::Ok().json(offices),
        Err(e) => {
            error!(error = %e, "Failed to fetch offices");
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to fetch offices"
            }))
        }
    }
}
