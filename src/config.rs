use std::env;
use dotenvy::dotenv;
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,

    /// OTP codes expire this many seconds after issuance
    pub otp_ttl_secs: i64,

    /// The single dashboard account allowed to request OTP codes
    pub allowed_email: String,

    /// Served to verified dashboard sessions via GET /google
    pub google_maps_api_key: String,

    /// Selfie images land here and are served back under /uploads
    pub upload_dir: String,

    // Rate limiting
    pub rate_otp_request_per_min: u32,
    pub rate_otp_verify_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            allowed_email: env::var("ALLOWED_EMAIL").expect("ALLOWED_EMAIL must be set"),
            access_token_ttl: env::var("ACCESS_TOKEN_TTL")
                .unwrap_or_else(|_| "900".to_string()) // default 15 min
                .parse()
                .unwrap(),
            otp_ttl_secs: env::var("OTP_TTL_SECS")
                .unwrap_or_else(|_| "600".to_string()) // default 10 min
                .parse()
                .unwrap(),

            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY").unwrap_or_default(),

            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),

            rate_otp_request_per_min: env::var("RATE_OTP_REQUEST_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_otp_verify_per_min: env::var("RATE_OTP_VERIFY_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }
}
