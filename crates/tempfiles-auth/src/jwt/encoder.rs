//! Download token creation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use tempfiles_core::config::auth::AuthConfig;
use tempfiles_core::error::AppError;
use tempfiles_core::types::MAX_TTL_MINUTES;

use super::claims::DownloadClaims;

/// Signs HS256 download tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl JwtEncoder {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_minutes: config.download_token_ttl_minutes.clamp(1, MAX_TTL_MINUTES),
        }
    }

    /// Issue a token for one file in one folder.
    pub fn issue(
        &self,
        folder_id: &str,
        filename: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = chrono::Duration::try_minutes(self.ttl_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AppError::internal("Download token expiry is out of range"))?;

        let claims = DownloadClaims {
            folder_id: folder_id.to_string(),
            filename: filename.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode download token: {e}")))?;

        Ok((token, exp))
    }
}
