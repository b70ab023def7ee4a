//! Download token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use tempfiles_core::config::auth::AuthConfig;
use tempfiles_core::error::AppError;

use super::claims::DownloadClaims;

/// Verifies HS256 download tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode a token, checking signature and expiry.
    pub fn decode(&self, token: &str) -> Result<DownloadClaims, AppError> {
        let token_data = decode::<DownloadClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::unauthorized("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                _ => AppError::unauthorized(format!("Token validation failed: {e}")),
            })?;

        Ok(token_data.claims)
    }

    /// Decode a token and require that it covers this folder and file.
    pub fn verify_for(
        &self,
        token: &str,
        folder_id: &str,
        filename: &str,
    ) -> Result<DownloadClaims, AppError> {
        let claims = self.decode(token)?;
        if !claims.grants(folder_id, filename) {
            tracing::debug!(
                jti = %claims.jti,
                token_folder = %claims.folder_id,
                folder_id,
                "Token scoped to a different file"
            );
            return Err(AppError::unauthorized("Token does not grant access to this file"));
        }
        Ok(claims)
    }

    /// Decode a token and require that it was issued for this folder.
    pub fn verify_folder(&self, token: &str, folder_id: &str) -> Result<DownloadClaims, AppError> {
        let claims = self.decode(token)?;
        if !claims.covers_folder(folder_id) {
            return Err(AppError::unauthorized("Token does not grant access to this folder"));
        }
        Ok(claims)
    }
}
