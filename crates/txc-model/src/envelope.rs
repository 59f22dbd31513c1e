//! Request and response bodies of the executor REST surface.
use serde::{Deserialize, Serialize};

use crate::executor::{Executor, ExecutorConfig};

/// `GET /executors`
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
pub struct ExecutorList {
    #[serde(default)]
    pub executors: Vec<Executor>,
}

/// `GET /executors/{name}`, and the body of create/update responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutorEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor: Option<Executor>,
}

/// `POST /executors` and `PUT /executors/{name}` body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigRequest {
    pub config: ExecutorConfig,
}
