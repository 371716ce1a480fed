use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct OtpRequestDto {
    #[schema(example = "admin@company.com")]
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct OtpVerifyDto {
    #[schema(example = "admin@company.com")]
    pub email: String,
    #[schema(example = "482913")]
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Verified dashboard email
    pub sub: String,
    pub exp: usize,
    pub jti: String,
}
