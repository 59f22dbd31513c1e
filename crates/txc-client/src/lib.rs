mod api;
pub use api::ExecutorApi;

mod error;
pub use error::{ClientError, ClientResult};

mod http;
pub use http::{DEFAULT_BASE_URL, HttpExecutorApi, HttpExecutorApiBuilder};
