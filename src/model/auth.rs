use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ObtainTokenDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshTokenDto {
    #[serde(default)]
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenPairDto {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccessTokenDto {
    pub access: String,
}
