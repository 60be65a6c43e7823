use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
    models::domain::User,
};

/// Issues and validates stateless session tokens.
///
/// The signing key is handed in once at construction and never changes afterwards.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_hours: i64,
}

impl TokenService {
    pub fn new(secret: &SecretString, expiration_hours: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            expiration_hours,
        }
    }

    pub fn issue(&self, user: &User) -> AppResult<String> {
        let claims = Claims::new(user, self.expiration_hours);
        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create token: {}", e)))
    }

    /// Every failure (bad signature, expiry, malformed payload) maps to the same
    /// `Unauthorized` so callers cannot tell which check rejected the token.
    pub fn validate(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token rejected: {}", e);
                AppError::Unauthorized("Invalid or expired token".to_string())
            })
    }

    /// Validates the token found in an `Authorization: <scheme> <token>` header value.
    /// The scheme is ignored; only the second space-delimited segment is parsed.
    pub fn validate_header(&self, header_value: &str) -> AppResult<Claims> {
        let token = header_value
            .split(' ')
            .nth(1)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Missing token".to_string()))?;

        self.validate(token)
    }
}
