use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::{
    error::{ModelError, ModelResult},
    policy::{DlqConfig, RetryPolicy, WriteConcern},
};

/// Executor configuration as exchanged with the backend.
///
/// The three policy sections are optional on decode: the backend may omit
/// them, and callers that need all of them go through [`ExecutorConfig::sections`].
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExecutorConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_concern: Option<WriteConcern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<RetryPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dlq_config: Option<DlqConfig>,
}

impl ExecutorConfig {
    /// Borrow all three policy sections, failing on the first missing one.
    pub fn sections(&self) -> ModelResult<(&RetryPolicy, &DlqConfig, &WriteConcern)> {
        let retry = self
            .retry_policy
            .as_ref()
            .ok_or(ModelError::MissingSection("retryPolicy"))?;
        let dlq = self
            .dlq_config
            .as_ref()
            .ok_or(ModelError::MissingSection("dlqConfig"))?;
        let wc = self
            .write_concern
            .as_ref()
            .ok_or(ModelError::MissingSection("writeConcern"))?;
        Ok((retry, dlq, wc))
    }
}

/// Executor record returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Executor {
    /// Storage identifier. Display only, lookups go by [`Executor::name`].
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ExecutorConfig>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub created_at: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub updated_at: Option<OffsetDateTime>,
}

impl Executor {
    /// `true` when the executor has a DLQ switched on.
    pub fn dlq_enabled(&self) -> bool {
        self.config
            .as_ref()
            .and_then(|c| c.dlq_config.as_ref())
            .is_some_and(|d| d.enabled)
    }
}
