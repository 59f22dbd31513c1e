use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::{
    clock::LoggerTimeZone,
    error::LoggerResult,
    format::LoggerFormat,
    level::LoggerLevel,
};

/// Environment variable overriding [`LoggerConfig::level`].
pub const ENV_LOG_LEVEL: &str = "TXC_LOG_LEVEL";
/// Environment variable overriding [`LoggerConfig::format`].
pub const ENV_LOG_FORMAT: &str = "TXC_LOG_FORMAT";

/// Logger configuration. Missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format: `text`, `json` or `journald`.
    pub format: LoggerFormat,
    /// `EnvFilter` directive (e.g., "warn", "txc_client=debug,info").
    pub level: LoggerLevel,
    /// Timezone of timestamps.
    pub tz: LoggerTimeZone,
    /// Include the event target (module path).
    pub with_targets: bool,
    /// Colour text output; ignored unless stderr is a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::new("warn").unwrap_or_default(),
            tz: LoggerTimeZone::default(),
            with_targets: false,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Apply `TXC_LOG_LEVEL` / `TXC_LOG_FORMAT` when set.
    pub fn apply_env(&mut self) -> LoggerResult<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(&mut self, get: impl Fn(&str) -> Option<String>) -> LoggerResult<()> {
        if let Some(level) = get(ENV_LOG_LEVEL) {
            self.level = level.parse()?;
        }
        if let Some(format) = get(ENV_LOG_FORMAT) {
            self.format = format.parse()?;
        }
        Ok(())
    }

    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stderr().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoggerError;

    #[test]
    fn defaults_keep_console_output_quiet() {
        let cfg = LoggerConfig::default();
        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.level.as_str(), "warn");
        assert_eq!(cfg.tz, LoggerTimeZone::Utc);
        assert!(!cfg.with_targets);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: LoggerConfig = serde_json::from_str(r#"{"format":"json","tz":"local"}"#).unwrap();
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.tz, LoggerTimeZone::Local);
        assert_eq!(cfg.level.as_str(), "warn");
        assert!(cfg.use_color);
    }

    #[test]
    fn env_vars_override_fields() {
        let mut cfg = LoggerConfig::default();
        cfg.apply_vars(|key| match key {
            ENV_LOG_LEVEL => Some("txc_client=debug,info".into()),
            ENV_LOG_FORMAT => Some("json".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(cfg.level.as_str(), "txc_client=debug,info");
        assert_eq!(cfg.format, LoggerFormat::Json);
    }

    #[test]
    fn bad_env_value_is_an_error() {
        let mut cfg = LoggerConfig::default();
        let err = cfg
            .apply_vars(|key| (key == ENV_LOG_FORMAT).then(|| "xml".to_string()))
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidFormat(_)));
    }
}
