//! HS256 JSON web tokens for bearer authentication.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    model::auth::TokenPairDto,
    server::error::{auth::AuthError, internal::InternalError, AppError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
    pub token_type: TokenType,
    pub jti: Uuid,
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPair {
    pub fn into_dto(self) -> TokenPairDto {
        TokenPairDto {
            access: self.access,
            refresh: self.refresh,
        }
    }
}

/// Signs and verifies access and refresh tokens with a shared secret.
///
/// Cheap to clone; held in `AppState`.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issues a single token of the given type for a user.
    ///
    /// # Returns
    /// - `Ok(String)` - Encoded token
    /// - `Err(AppError::InternalErr(TokenEncode))` - Signing failed
    pub fn issue(&self, user_id: Uuid, token_type: TokenType) -> Result<String, AppError> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            sub: user_id,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            token_type,
            jti: Uuid::new_v4(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| InternalError::TokenEncode(e).into())
    }

    pub fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access: self.issue(user_id, TokenType::Access)?,
            refresh: self.issue(user_id, TokenType::Refresh)?,
        })
    }

    /// Decodes a token and checks signature, expiry and type.
    ///
    /// Expiry is checked without leeway.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Token is valid and of the expected type
    /// - `Err(AuthError::InvalidToken)` - Any validation failure
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .claims;

        if claims.token_type != expected {
            return Err(AuthError::InvalidToken(format!(
                "expected {:?} token, got {:?}",
                expected, claims.token_type
            )));
        }

        Ok(claims)
    }
}
