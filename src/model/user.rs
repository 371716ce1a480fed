use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard login account. Only the OTP auth subsystem touches this
/// table; attendance routes are deliberately unauthenticated.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub otp_code: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub is_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
}
