//! Zoom REST API HTTP client with full-drain pagination.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::{TokenCache, ZoomConfig, ZoomError, ZoomResult};

/// Error body returned by the Zoom API on failed requests.
#[derive(Debug, Deserialize)]
pub struct ZoomApiErrorBody {
    pub code: Option<i64>,
    pub message: Option<String>,
}

/// Envelope for paginated Zoom list responses.
///
/// The field holding the records varies per endpoint (`users`, `members`),
/// so the body is kept generic and the records field is extracted by name.
#[derive(Debug, Deserialize)]
pub struct PageEnvelope {
    /// Cursor for the next page; absent or empty on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(flatten)]
    pub body: serde_json::Map<String, serde_json::Value>,
}

/// Zoom REST API client.
#[derive(Debug)]
pub struct ZoomClient {
    http_client: reqwest::Client,
    token_cache: Arc<TokenCache>,
    config: ZoomConfig,
}

impl ZoomClient {
    /// Creates a new Zoom client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(token_cache: Arc<TokenCache>, config: ZoomConfig) -> ZoomResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ZoomError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            token_cache,
            config,
        })
    }

    /// Returns the connector configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Builds a full API URL from a path relative to the base URL.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_base_url,
            path.trim_start_matches('/')
        )
    }

    /// Performs a GET request with automatic token injection.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ZoomResult<T> {
        self.request(reqwest::Method::GET, &self.api_url(path), path, None::<&()>)
            .await
    }

    /// Performs a POST request with automatic token injection.
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ZoomResult<T> {
        self.request(reqwest::Method::POST, &self.api_url(path), path, Some(body))
            .await
    }

    /// Performs a DELETE request (no response body expected).
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> ZoomResult<()> {
        let token = self.token_cache.get_token().await?;

        let response = self
            .http_client
            .delete(self.api_url(path))
            .bearer_auth(&token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(Self::api_error(status, path, response).await)
    }

    /// Internal request helper shared by GET and POST.
    async fn request<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        endpoint: &str,
        body: Option<&B>,
    ) -> ZoomResult<T> {
        let token = self.token_cache.get_token().await?;

        let mut request = self.http_client.request(method, url).bearer_auth(&token);

        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return response.json().await.map_err(ZoomError::from);
        }

        Err(Self::api_error(status, endpoint, response).await)
    }

    /// Decodes a failed response into a `ZoomError::Api`.
    async fn api_error(
        status: reqwest::StatusCode,
        endpoint: &str,
        response: reqwest::Response,
    ) -> ZoomError {
        let error_body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ZoomApiErrorBody>(&error_body) {
            Ok(parsed) => parsed.message.unwrap_or(error_body),
            Err(_) => error_body,
        };

        ZoomError::Api {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
            message,
        }
    }

    /// Drains all pages of a paginated list endpoint, handing each page's
    /// records to the callback.
    ///
    /// Issues GET requests with `page_size` and `next_page_token` query
    /// parameters until the response carries no further cursor. A non-success
    /// status on any page fails the whole fetch; no partial result is
    /// surfaced.
    #[instrument(skip(self, callback))]
    pub async fn get_paginated<T, F>(
        &self,
        path: &str,
        records_field: &str,
        mut callback: F,
    ) -> ZoomResult<()>
    where
        T: DeserializeOwned,
        F: FnMut(Vec<T>) -> ZoomResult<()>,
    {
        let mut next_page_token: Option<String> = None;

        loop {
            let mut url = Url::parse(&self.api_url(path))?;
            url.query_pairs_mut()
                .append_pair("page_size", &self.config.page_size.to_string());
            if let Some(ref token) = next_page_token {
                url.query_pairs_mut().append_pair("next_page_token", token);
            }

            debug!(%url, "Fetching page");
            let mut page: PageEnvelope = self
                .request(reqwest::Method::GET, url.as_str(), path, None::<&()>)
                .await?;

            let records: Vec<T> = match page.body.remove(records_field) {
                Some(value) => serde_json::from_value(value)?,
                None => Vec::new(),
            };
            callback(records)?;

            match page.next_page_token.take() {
                Some(token) if !token.is_empty() => next_page_token = Some(token),
                _ => return Ok(()),
            }
        }
    }
}
