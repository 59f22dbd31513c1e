//! REST implementation of [`ExecutorApi`] over `reqwest`.
//!
//! Routes (relative to the base URL, `/v1` by default):
//! - GET    /executors
//! - POST   /executors
//! - GET    /executors/{name}
//! - PUT    /executors/{name}
//! - DELETE /executors/{name}
//! - GET    /executors/{name}/dlq
//! - DELETE /executors/{name}/dlq
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use txc_model::{ConfigRequest, Executor, ExecutorConfig, ExecutorEnvelope, ExecutorList};

use crate::{
    api::ExecutorApi,
    error::{ClientError, ClientResult},
};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/v1";

const EXECUTORS: &str = "executors";
const DLQ: &str = "dlq";

/// HTTP client for the executor manager.
#[derive(Clone, Debug)]
pub struct HttpExecutorApi {
    base: Url,
    http: Client,
}

impl HttpExecutorApi {
    /// Client for `base_url` with a default `reqwest::Client`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> HttpExecutorApiBuilder {
        HttpExecutorApiBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl {
                url: self.base.to_string(),
                reason: "cannot be a base".into(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send once and return the body text of a 2xx response.
    async fn send(&self, op: &'static str, req: RequestBuilder) -> ClientResult<String> {
        let resp = req.send().await.map_err(|e| {
            warn!(op, error = %e, "request failed");
            ClientError::from(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_else(|e| {
                warn!(op, error = %e, "failed to read error body");
                String::new()
            });
            warn!(op, status = status.as_u16(), body = %body, "request rejected");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;

        debug!(op, status = status.as_u16(), bytes = body.len(), "request succeeded");
        Ok(body)
    }

    async fn executor_from(&self, op: &'static str, req: RequestBuilder) -> ClientResult<Executor> {
        let body = self.send(op, req).await?;
        decode::<ExecutorEnvelope>(&body)?
            .executor
            .ok_or(ClientError::MissingExecutor)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Arbitrary JSON; an empty body becomes `null`.
fn decode_value(body: &str) -> ClientResult<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    decode(body)
}

#[async_trait]
impl ExecutorApi for HttpExecutorApi {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_executors(&self) -> ClientResult<Vec<Executor>> {
        let url = self.url(&[EXECUTORS])?;
        let body = self.send("fetch_executors", self.http.get(url)).await?;
        Ok(decode::<ExecutorList>(&body)?.executors)
    }

    #[instrument(level = "debug", skip(self, config), fields(name = %config.name))]
    async fn create_executor(&self, config: &ExecutorConfig) -> ClientResult<Executor> {
        let url = self.url(&[EXECUTORS])?;
        let req = self.http.post(url).json(&ConfigRequest {
            config: config.clone(),
        });
        self.executor_from("create_executor", req).await
    }

    #[instrument(level = "debug", skip(self, config))]
    async fn update_executor(&self, name: &str, config: &ExecutorConfig) -> ClientResult<Executor> {
        let url = self.url(&[EXECUTORS, name])?;
        let req = self.http.put(url).json(&ConfigRequest {
            config: config.clone(),
        });
        self.executor_from("update_executor", req).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_executor(&self, name: &str) -> ClientResult<Executor> {
        let url = self.url(&[EXECUTORS, name])?;
        self.executor_from("get_executor", self.http.get(url)).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_executor(&self, name: &str) -> ClientResult<Value> {
        let url = self.url(&[EXECUTORS, name])?;
        let body = self.send("delete_executor", self.http.delete(url)).await?;
        decode_value(&body)
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_dlq_tasks(&self, name: &str) -> ClientResult<Value> {
        let url = self.url(&[EXECUTORS, name, DLQ])?;
        let body = self.send("get_dlq_tasks", self.http.get(url)).await?;
        decode_value(&body)
    }

    #[instrument(level = "debug", skip(self))]
    async fn clear_dlq(&self, name: &str) -> ClientResult<Value> {
        let url = self.url(&[EXECUTORS, name, DLQ])?;
        let body = self.send("clear_dlq", self.http.delete(url)).await?;
        decode_value(&body)
    }
}

/// Builder for [`HttpExecutorApi`].
#[derive(Default)]
pub struct HttpExecutorApiBuilder {
    base_url: Option<String>,
    http: Option<Client>,
}

impl HttpExecutorApiBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Reuse an existing `reqwest::Client` (proxies, TLS roots, headers).
    pub fn http_client(mut self, client: Client) -> Self {
        self.http = Some(client);
        self
    }

    pub fn build(self) -> ClientResult<HttpExecutorApi> {
        let raw = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base = Url::parse(raw.trim()).map_err(|e| ClientError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: raw,
                reason: "expected an http(s) url".into(),
            });
        }

        Ok(HttpExecutorApi {
            base,
            http: self.http.unwrap_or_default(),
        })
    }
}
