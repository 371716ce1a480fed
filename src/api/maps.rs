use crate::config::Config;
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

/// Maps key for the dashboard. The route sits behind the JWT middleware:
/// only a session verified through the OTP flow may read the key.
#[utoipa::path(
    get,
    path = "/google",
    responses(
        (status = 200, description = "Configured Google Maps key", body = Object, example = json!({
            "key": "AIza..."
        })),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Config"
)]
pub async fn maps_key(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "key": config.google_maps_api_key
    }))
}
