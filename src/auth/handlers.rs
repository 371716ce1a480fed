use crate::{
    auth::{jwt::generate_access_token, otp},
    config::Config,
    model::user::User,
    models::{OtpRequestDto, OtpVerifyDto},
};
use actix_web::{HttpResponse, Responder, web};
use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument};

/// OTP request handler. The code is delivered out of band and is never
/// echoed back in the response.
#[utoipa::path(
    post,
    path = "/api/auth/request-otp",
    request_body = OtpRequestDto,
    responses(
        (status = 200, description = "OTP issued", body = Object, example = json!({
            "success": true,
            "message": "OTP sent."
        })),
        (status = 400, description = "Missing email"),
        (status = 403, description = "Email not on the allow list"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_request_otp", skip(pool, config, payload))]
pub async fn request_otp(
    payload: web::Json<OtpRequestDto>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> impl Responder {
    let email = payload.email.trim().to_lowercase();

    if email.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Email is required"
        }));
    }

    // Single-account allow list from configuration
    if !email.eq_ignore_ascii_case(config.allowed_email.trim()) {
        info!("OTP requested for an address outside the allow list");
        return HttpResponse::Forbidden().json(json!({
            "error": "Email is not allowed"
        }));
    }

    let code = otp::generate_code();
    let expires_at = Utc::now() + Duration::seconds(config.otp_ttl_secs);

    // A fresh request replaces any outstanding code
    let result = sqlx::query(
        r#"
        INSERT INTO users (email, otp_code, otp_expires_at)
        VALUES (?, ?, ?)
        ON CONFLICT(email) DO UPDATE SET
            otp_code = excluded.otp_code,
            otp_expires_at = excluded.otp_expires_at
        "#,
    )
    .bind(&email)
    .bind(&code)
    .bind(expires_at)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            info!("OTP issued");
            HttpResponse::Ok().json(json!({
                "success": true,
                "message": "OTP sent."
            }))
        }
        Err(e) => {
            error!(error = %e, "Failed to issue OTP");
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to issue OTP"
            }))
        }
    }
}

/// Exchange a valid OTP code for an access token
#[utoipa::path(
    post,
    path = "/api/auth/verify-otp",
    request_body = OtpVerifyDto,
    responses(
        (status = 200, description = "Verified, token issued", body = Object, example = json!({
            "access_token": "eyJhbGciOi..."
        })),
        (status = 401, description = "Invalid or expired code"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_verify_otp", skip(pool, config, payload))]
pub async fn verify_otp(
    payload: web::Json<OtpVerifyDto>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> impl Responder {
    let email = payload.email.trim().to_lowercase();

    debug!("Fetching user from database");

    let user = match sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, otp_code, otp_expires_at, is_verified, last_login
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(&email)
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            info!("Verification failed: no OTP on file");
            return HttpResponse::Unauthorized().json(json!({
                "error": "Invalid or expired code"
            }));
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching user");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if !otp::code_matches(
        user.otp_code.as_deref(),
        user.otp_expires_at,
        payload.code.trim(),
    ) {
        info!("Verification failed: code mismatch or expired");
        return HttpResponse::Unauthorized().json(json!({
            "error": "Invalid or expired code"
        }));
    }

    debug!("Code accepted, marking user verified");

    // Codes are single-use
    let update = sqlx::query(
        r#"
        UPDATE users
        SET is_verified = 1,
            last_login = ?,
            otp_code = NULL,
            otp_expires_at = NULL
        WHERE id = ?
        "#,
    )
    .bind(Utc::now())
    .bind(user.id)
    .execute(pool.get_ref())
    .await;

    if let Err(e) = update {
        error!(error = %e, "Failed to mark user verified");
        return HttpResponse::InternalServerError().finish();
    }

    let access_token = generate_access_token(&email, &config.jwt_secret, config.access_token_ttl);

    info!("Login successful");

    HttpResponse::Ok().json(json!({
        "access_token": access_token
    }))
}
