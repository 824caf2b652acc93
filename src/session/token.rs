use crate::config::ConsoleConfig;
use crate::core::{ConsoleError, Result};
use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, dangerous::insecure_decode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Signing key for tokens minted by the demo server. The console never
/// verifies signatures; only the backend does.
const DEMO_SIGNING_KEY: &[u8] = b"care-console-demo";

/// Bearer/refresh pair as stored by the sign-in flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTokens {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

impl SessionTokens {
    pub fn new(access: Option<String>, refresh: Option<String>) -> Self {
        Self { access, refresh }
    }

    /// Parse a `Cookie:` header value (`a=1; b=2`).
    pub fn from_cookie_header(header: &str) -> Self {
        let mut tokens = Self::default();
        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match name.trim() {
                ACCESS_TOKEN_COOKIE => tokens.access = Some(value.to_string()),
                REFRESH_TOKEN_COOKIE => tokens.refresh = Some(value.to_string()),
                _ => {}
            }
        }
        tokens
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(config.access_token.clone(), config.refresh_token.clone())
    }

    /// The refresh token is present and its `exp` is after `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.refresh
            .as_deref()
            .and_then(|token| token_expiry(token).ok())
            .is_some_and(|exp| exp > now)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    exp: i64,
}

/// Decode the `exp` claim of a JWT without verifying its signature.
pub fn token_expiry(token: &str) -> Result<DateTime<Utc>> {
    let data = insecure_decode::<Claims>(token)
        .map_err(|e| ConsoleError::Auth(format!("token is not a readable JWT: {e}")))?;

    DateTime::from_timestamp(data.claims.exp, 0)
        .ok_or_else(|| ConsoleError::Auth("token exp is out of range".to_string()))
}

/// Mint an HS256 token carrying only `exp`. Used by the demo server and tests.
pub fn demo_token(exp: DateTime<Utc>) -> Result<String> {
    let claims = Claims {
        exp: exp.timestamp(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(DEMO_SIGNING_KEY),
    )
    .map_err(|e| ConsoleError::Auth(format!("failed to sign token: {e}")))
}
