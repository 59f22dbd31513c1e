mod dlq;
pub use dlq::DlqConfig;

pub mod interval;

mod retry;
pub use retry::{RetryKind, RetryPolicy, retry_preview};

mod write_concern;
pub use write_concern::{WriteConcern, WriteConcernLevel};
