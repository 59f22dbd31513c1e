use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use txc_model::Executor;

use crate::error::ConsoleError;

/// Status filter of the executor table.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Enabled,
    Disabled,
}

impl StatusFilter {
    pub fn matches(&self, executor: &Executor) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Enabled => executor.enabled,
            StatusFilter::Disabled => !executor.enabled,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ConsoleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            "enabled" | "on" => Ok(StatusFilter::Enabled),
            "disabled" | "off" => Ok(StatusFilter::Disabled),
            _ => Err(ConsoleError::InvalidFilter(s.to_string())),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusFilter::All => "all",
            StatusFilter::Enabled => "enabled",
            StatusFilter::Disabled => "disabled",
        })
    }
}

/// Executors passing both the status filter and the name search.
///
/// The search is a case-insensitive substring match; an empty query matches everything.
pub fn filter_executors<'a>(
    executors: &'a [Executor],
    status: StatusFilter,
    query: &str,
) -> Vec<&'a Executor> {
    let needle = query.trim().to_lowercase();
    executors
        .iter()
        .filter(|e| status.matches(e))
        .filter(|e| needle.is_empty() || e.name.to_lowercase().contains(&needle))
        .collect()
}
