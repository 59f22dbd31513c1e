use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

/// Dead-letter queue settings of an executor.
///
/// `queue_name` is only meaningful while `enabled` is set.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct DlqConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub queue_name: String,
}

impl DlqConfig {
    pub fn enabled(queue_name: impl Into<String>) -> Self {
        Self {
            enabled: true,
            queue_name: queue_name.into(),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    /// Queue name, if the DLQ is switched on.
    pub fn active_queue(&self) -> Option<&str> {
        self.enabled.then_some(self.queue_name.as_str())
    }
}
