use serde::{Deserialize, Serialize};

/// One check-in/out event. Rows are immutable once written; no update or
/// delete path exists anywhere in the service.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Attendance {
    pub id: i64,
    pub employee: String,
    /// Check-in/check-out tag, unconstrained free text
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub date: String,
    pub time: String,
    /// NULL when the submitted value failed numeric coercion
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location: String,
    pub selfie_url: Option<String>,
    pub office: Option<String>,
}
