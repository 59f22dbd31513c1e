use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize, Serializer};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::error::{ModelError, ModelResult};

const WIRE_PREFIX: &str = "RETRY_POLICY_";

/// How the delay between retries grows with the attempt number.
///
/// Strategies:
/// - `Constant`: wait `interval` after every failure.
/// - `Linear`: wait `interval × attempt`.
/// - `Exponential`: wait `interval × 2^(attempt - 1)`.
///
/// On the wire the kind travels as the protobuf enum name
/// (`RETRY_POLICY_EXPONENTIAL`); forms use the lowercase short name.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RetryKind {
    #[default]
    Constant,
    Linear,
    Exponential,
}

impl RetryKind {
    /// Lowercase name used by forms and the CLI.
    pub const fn as_str(&self) -> &'static str {
        match self {
            RetryKind::Constant => "constant",
            RetryKind::Linear => "linear",
            RetryKind::Exponential => "exponential",
        }
    }

    /// Protobuf enum name used on the wire.
    pub const fn wire_name(&self) -> &'static str {
        match self {
            RetryKind::Constant => "RETRY_POLICY_CONSTANT",
            RetryKind::Linear => "RETRY_POLICY_LINEAR",
            RetryKind::Exponential => "RETRY_POLICY_EXPONENTIAL",
        }
    }
}

impl FromStr for RetryKind {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        let norm = s.trim().to_ascii_uppercase();
        let short = norm.strip_prefix(WIRE_PREFIX).unwrap_or(&norm);

        match short {
            "CONSTANT" => Ok(RetryKind::Constant),
            "LINEAR" => Ok(RetryKind::Linear),
            "EXPONENTIAL" => Ok(RetryKind::Exponential),
            _ => Err(ModelError::UnknownRetryKind(s.to_string())),
        }
    }
}

impl fmt::Display for RetryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RetryKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for RetryKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Retry rule applied by the backend to failed tasks of an executor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct RetryPolicy {
    #[serde(rename = "type")]
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub kind: RetryKind,
    /// Maximum number of attempts; `0` means retry until success.
    #[serde(default)]
    pub max_attempts: u32,
    /// Base delay between attempts.
    #[serde(default, with = "super::interval")]
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub interval: Duration,
}

impl RetryPolicy {
    pub fn new(kind: RetryKind, max_attempts: u32, interval: Duration) -> Self {
        Self {
            kind,
            max_attempts,
            interval,
        }
    }

    /// `true` when the policy never gives up.
    pub const fn is_unlimited(&self) -> bool {
        self.max_attempts == 0
    }

    /// Whether a task that already failed `retry_count` times may run again.
    pub const fn allows_retry(&self, retry_count: u32) -> bool {
        self.is_unlimited() || retry_count < self.max_attempts
    }

    /// Delay before the given 1-based attempt. Saturates at [`Duration::MAX`].
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        let factor = match self.kind {
            RetryKind::Constant => Some(1),
            RetryKind::Linear => Some(attempt),
            RetryKind::Exponential => 2u32.checked_pow(attempt - 1),
        };

        factor
            .and_then(|k| self.interval.checked_mul(k))
            .unwrap_or(Duration::MAX)
    }

    /// Human-readable description of the policy.
    pub fn preview(&self) -> String {
        let max = (!self.is_unlimited()).then_some(self.max_attempts);
        let interval_ms = u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX);
        retry_preview(self.kind, max, interval_ms)
    }
}

/// Describe a retry configuration the way the settings form shows it.
///
/// `max_attempts == None` means retries continue until the task succeeds.
pub fn retry_preview(kind: RetryKind, max_attempts: Option<u32>, interval_ms: u64) -> String {
    let mut text = match kind {
        RetryKind::Constant => format!("After each failure wait {interval_ms}ms before retrying."),
        RetryKind::Linear => {
            format!("After each failure wait {interval_ms}ms × attempt number before retrying.")
        }
        RetryKind::Exponential => format!(
            "After each failure wait {interval_ms}ms × 2^(attempt number - 1) before retrying."
        ),
    };

    match max_attempts {
        Some(n) if n > 0 => text.push_str(&format!(
            " Up to {n} attempts will be made, then the task is marked as failed."
        )),
        _ => text.push_str(" Retries continue until the task succeeds."),
    }
    text
}
