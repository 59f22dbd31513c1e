//! Well-known values shared by the console and its front ends.

/// Interval shown in the form when the backend reports none.
pub const DEFAULT_INTERVAL_MS: u64 = 1_000;

/// Suffix of a downloaded dead-letter queue dump: `{executor}_dlq.json`.
pub const DLQ_FILE_SUFFIX: &str = "_dlq.json";

/// File name under which the DLQ of `executor` is saved.
pub fn dlq_file_name(executor: &str) -> String {
    format!("{executor}{DLQ_FILE_SUFFIX}")
}
