//! Human-editable executor form and its mapping to the wire config.
//!
//! Form fields hold what a person types: lowercase names, milliseconds and
//! free text. [`ExecutorForm::to_config`] and [`ExecutorForm::from_executor`]
//! convert between that and [`ExecutorConfig`].
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    constants::DEFAULT_INTERVAL_MS,
    error::{ModelError, ModelResult},
    executor::{Executor, ExecutorConfig},
    policy::{DlqConfig, RetryKind, RetryPolicy, WriteConcern, WriteConcernLevel, retry_preview},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutorForm {
    /// Snake-case executor name; read-only once the executor exists.
    pub name: String,
    pub enabled: bool,
    /// `constant`, `linear` or `exponential`.
    pub retry_type: String,
    /// Blank means unlimited.
    pub max_attempts: String,
    /// Base retry interval in milliseconds.
    pub interval_ms: String,
    pub dlq_enabled: bool,
    /// Queue receiving exhausted tasks; ignored while the DLQ is off.
    pub dlq_queue_name: String,
    /// `replica_acknowledged`, `majority`, `unacknowledged` or `journaled`.
    pub write_concern: String,
}

impl Default for ExecutorForm {
    fn default() -> Self {
        Self::blank()
    }
}

impl ExecutorForm {
    /// Defaults for a new executor.
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            enabled: true,
            retry_type: RetryKind::Constant.as_str().to_string(),
            max_attempts: String::new(),
            interval_ms: DEFAULT_INTERVAL_MS.to_string(),
            dlq_enabled: false,
            dlq_queue_name: String::new(),
            write_concern: WriteConcernLevel::ReplicaAcknowledged.as_str().to_string(),
        }
    }

    /// Fill the form from a backend record.
    ///
    /// All three config sections must be present.
    pub fn from_executor(executor: &Executor) -> ModelResult<Self> {
        let config = executor
            .config
            .as_ref()
            .ok_or(ModelError::MissingSection("config"))?;
        let (retry, dlq, wc) = config.sections()?;

        // Round up: a sub-millisecond interval must not load as zero.
        let interval_ms = if retry.interval.is_zero() {
            DEFAULT_INTERVAL_MS
        } else {
            u64::try_from(retry.interval.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX)
        };
        let max_attempts = if retry.is_unlimited() {
            String::new()
        } else {
            retry.max_attempts.to_string()
        };

        Ok(Self {
            name: executor.name.clone(),
            enabled: executor.enabled,
            retry_type: retry.kind.as_str().to_string(),
            max_attempts,
            interval_ms: interval_ms.to_string(),
            dlq_enabled: dlq.enabled,
            dlq_queue_name: dlq.queue_name.clone(),
            write_concern: wc.level.as_str().to_string(),
        })
    }

    /// Validate the form and build the wire config.
    pub fn to_config(&self) -> ModelResult<ExecutorConfig> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ModelError::Invalid("executor name is required".into()));
        }

        let retry = RetryPolicy::new(
            self.retry_kind()?,
            self.parsed_max_attempts()?.unwrap_or(0),
            Duration::from_millis(self.parsed_interval_ms()?),
        );

        let dlq = if self.dlq_enabled {
            let queue = self.dlq_queue_name.trim();
            if queue.is_empty() {
                return Err(ModelError::Invalid(
                    "dlq queue name is required when the dlq is enabled".into(),
                ));
            }
            DlqConfig::enabled(queue)
        } else {
            DlqConfig::disabled()
        };

        let level: WriteConcernLevel = self.write_concern.parse()?;

        Ok(ExecutorConfig {
            name: name.to_string(),
            enabled: self.enabled,
            write_concern: Some(WriteConcern::from(level)),
            retry_policy: Some(retry),
            dlq_config: Some(dlq),
        })
    }

    pub fn retry_kind(&self) -> ModelResult<RetryKind> {
        self.retry_type.parse()
    }

    /// `None` when the field is blank or `0` (unlimited).
    pub fn parsed_max_attempts(&self) -> ModelResult<Option<u32>> {
        let raw = self.max_attempts.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let n: u32 = raw.parse().map_err(|_| {
            ModelError::Invalid(format!(
                "max attempts must be a non-negative integer, got {raw:?}"
            ))
        })?;
        Ok((n > 0).then_some(n))
    }

    pub fn parsed_interval_ms(&self) -> ModelResult<u64> {
        let raw = self.interval_ms.trim();
        match raw.parse::<u64>() {
            Ok(ms) if ms > 0 => Ok(ms),
            _ => Err(ModelError::Invalid(format!(
                "interval must be a positive number of milliseconds, got {raw:?}"
            ))),
        }
    }

    /// Live description of the retry settings, tolerant of half-typed input.
    pub fn retry_preview(&self) -> String {
        let kind = self.retry_kind().unwrap_or_default();
        let max = self.parsed_max_attempts().ok().flatten();
        let interval = self.parsed_interval_ms().unwrap_or(DEFAULT_INTERVAL_MS);
        retry_preview(kind, max, interval)
    }
}
