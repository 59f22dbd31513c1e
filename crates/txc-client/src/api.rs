use async_trait::async_trait;
use serde_json::Value;
use txc_model::{Executor, ExecutorConfig};

use crate::error::ClientResult;

/// Executor management operations offered by the backend.
///
/// Every call is a single request: no retries, no timeout, no de-duplication.
/// [`crate::HttpExecutorApi`] is the REST implementation; tests and alternative
/// transports implement the trait directly.
#[async_trait]
pub trait ExecutorApi: Send + Sync {
    /// List every executor. An empty backend yields an empty list.
    async fn fetch_executors(&self) -> ClientResult<Vec<Executor>>;

    /// Create an executor from `config`, returning the stored record.
    async fn create_executor(&self, config: &ExecutorConfig) -> ClientResult<Executor>;

    /// Replace the configuration of the executor called `name`.
    async fn update_executor(&self, name: &str, config: &ExecutorConfig) -> ClientResult<Executor>;

    /// Fetch a single executor by name.
    async fn get_executor(&self, name: &str) -> ClientResult<Executor>;

    /// Remove an executor by name.
    async fn delete_executor(&self, name: &str) -> ClientResult<Value>;

    /// Dump the dead-letter queue of `name` as raw JSON.
    async fn get_dlq_tasks(&self, name: &str) -> ClientResult<Value>;

    /// Drop every task from the dead-letter queue of `name`.
    async fn clear_dlq(&self, name: &str) -> ClientResult<Value>;
}
