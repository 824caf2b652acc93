use super::token::SessionTokens;
use chrono::{DateTime, Utc};
use tracing::info;

pub const SIGN_IN_PATH: &str = "/signin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(&'static str),
}

/// Route-entry check: protected routes need an unexpired refresh token.
///
/// No refresh protocol exists; an expired token always means signing in
/// again. The check runs before the route issues any data request.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    public_routes: Vec<String>,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            public_routes: vec![SIGN_IN_PATH.to_string()],
        }
    }
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_public_route(mut self, path: &str) -> Self {
        self.public_routes.push(path.to_string());
        self
    }

    pub fn is_public(&self, path: &str) -> bool {
        let path = path.split('?').next().unwrap_or(path);
        self.public_routes.iter().any(|route| route == path)
    }

    pub fn check(&self, path: &str, tokens: &SessionTokens, now: DateTime<Utc>) -> RouteDecision {
        if self.is_public(path) || tokens.is_valid_at(now) {
            return RouteDecision::Allow;
        }
        info!(path = %path, "session missing or expired, redirecting to sign-in");
        RouteDecision::Redirect(SIGN_IN_PATH)
    }
}
