use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "name": "Head Office",
    "latitude": 23.7806,
    "longitude": 90.4074
}))]
pub struct Office {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}
