mod constants;
pub use constants::{DEFAULT_INTERVAL_MS, DLQ_FILE_SUFFIX, dlq_file_name};

mod envelope;
pub use envelope::{ConfigRequest, ExecutorEnvelope, ExecutorList};

mod error;
pub use error::{ModelError, ModelResult};

mod executor;
pub use executor::{Executor, ExecutorConfig};

mod form;
pub use form::ExecutorForm;

mod policy;
pub use policy::interval::{format_interval, parse_interval};
pub use policy::{
    DlqConfig, RetryKind, RetryPolicy, WriteConcern, WriteConcernLevel, retry_preview,
};
