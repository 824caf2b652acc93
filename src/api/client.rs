use super::envelope::{ApiEnvelope, ErrorBody};
use crate::config::ConsoleConfig;
use crate::core::{ConsoleError, Result};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, warn};

/// JSON client for the admin REST API.
///
/// Cheap to clone; all clones share one connection pool and configuration.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    config: Arc<ConsoleConfig>,
}

impl RestClient {
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<ApiEnvelope> {
        let builder = self.request(Method::GET, path).query(query);
        self.send(Method::GET, path, builder).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiEnvelope> {
        let builder = self.request(Method::POST, path).json(body);
        self.send(Method::POST, path, builder).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiEnvelope> {
        let builder = self.request(Method::PUT, path).json(body);
        self.send(Method::PUT, path, builder).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiEnvelope> {
        let builder = self.request(Method::DELETE, path);
        self.send(Method::DELETE, path, builder).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.config.endpoint(path));
        match self.config.access_token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<ApiEnvelope> {
        debug!(%method, path, "api request");

        let response = builder.send().await.map_err(|err| {
            warn!(%method, path, error = %err, "api request failed to complete");
            ConsoleError::from(err)
        })?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let error = serde_json::from_slice::<ErrorBody>(&body).unwrap_or_default();
            warn!(%method, path, status = status.as_u16(), message = %error.message, "api error");
            return Err(ConsoleError::api(status.as_u16(), error.message));
        }

        if body.is_empty() {
            return Ok(ApiEnvelope::new("", JsonValue::Null));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}
