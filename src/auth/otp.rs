use chrono::{DateTime, Utc};
use rand::Rng;

/// Six-digit zero-padded login code
pub fn generate_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:06}", code)
}

/// A code only counts when one is on file, it matches, and it has not
/// expired yet.
pub fn code_matches(
    stored: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    submitted: &str,
) -> bool {
    match (stored, expires_at) {
        (Some(code), Some(expiry)) => code == submitted && Utc::now() < expiry,
        _ => false,
    }
}
