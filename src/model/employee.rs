use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({ "name": "Alice Rahman" }))]
pub struct Employee {
    #[schema(example = "Alice Rahman")]
    pub name: String,
}
