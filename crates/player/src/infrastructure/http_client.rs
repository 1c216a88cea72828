//! HTTP adapter for the Gold Rush backend
//!
//! Desktop talks through `reqwest`, the browser through `gloo-net`. Both share
//! URL building and translation; only the transport differs.

use goldrush_domain::{EntityKey, LogEntry, Snapshot, UserStatus, WorldBounds};
use goldrush_shared::{routes, LogsResponse, StatusResponse, WorldResponse};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::config::ClientConfig;
use super::message_translator::{translate_logs, translate_status, translate_world};
use crate::ports::outbound::{ApiError, GameApiPort};

/// `GameApiPort` over HTTP
#[derive(Clone)]
pub struct HttpGameApi {
    base_url: String,
    bounds: WorldBounds,
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::Client,
}

impl HttpGameApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            bounds: config.bounds(),
            #[cfg(not(target_arch = "wasm32"))]
            client: reqwest::Client::builder()
                .timeout(config.request_timeout())
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    fn status_url(&self, token: &EntityKey) -> Result<String, ApiError> {
        let mut url = url::Url::parse(&self.url(routes::STATUS))
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair(routes::ENTITY_KEY_PARAM, token.as_str());
        Ok(url.into())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpGameApi {
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        credential: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut request = self.client.get(url);
        if let Some(credential) = credential {
            request = request.bearer_auth(credential);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))
    }

    async fn post_empty(&self, url: &str, credential: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(credential)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

// No request timeout in the browser; fetch gives up on its own.
#[cfg(target_arch = "wasm32")]
impl HttpGameApi {
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        credential: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut request = gloo_net::http::Request::get(url);
        if let Some(credential) = credential {
            request = request.header("Authorization", &format!("Bearer {credential}"));
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus {
                status: response.status(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))
    }

    async fn post_empty(&self, url: &str, credential: &str) -> Result<(), ApiError> {
        let response = gloo_net::http::Request::post(url)
            .header("Authorization", &format!("Bearer {credential}"))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus {
                status: response.status(),
                body,
            });
        }
        Ok(())
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl GameApiPort for HttpGameApi {
    async fn fetch_world(&self, credential: &str) -> Result<Snapshot, ApiError> {
        let url = self.url(routes::ADMIN_WORLD);
        debug!(%url, "GET world");
        let world: WorldResponse = self.get_json(&url, Some(credential)).await?;
        Ok(translate_world(world, self.bounds))
    }

    async fn fetch_status(&self, token: &EntityKey) -> Result<UserStatus, ApiError> {
        let url = self.status_url(token)?;
        debug!(entity_key = %token, "GET status");
        let status: StatusResponse = self.get_json(&url, None).await?;
        Ok(translate_status(status))
    }

    async fn fetch_logs(&self, credential: &str) -> Result<Vec<LogEntry>, ApiError> {
        let url = self.url(routes::ADMIN_LOGS);
        debug!(%url, "GET logs");
        let logs: LogsResponse = self.get_json(&url, Some(credential)).await?;
        Ok(translate_logs(logs.into_entries(), self.bounds))
    }

    async fn clear_logs(&self, credential: &str) -> Result<(), ApiError> {
        let url = self.url(routes::ADMIN_LOGS_CLEAR);
        debug!(%url, "POST clear logs");
        self.post_empty(&url, credential).await
    }
}
