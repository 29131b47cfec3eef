// src/client.rs
use async_trait::async_trait;
use reqwest::Client;

use crate::errors::{FukuwaraiError, Result};
use crate::models::{ExecutionRequest, ExecutionResult};

/// Something that can carry an [`ExecutionRequest`] to the execution endpoint.
#[async_trait]
pub trait ExecutionClient: Send + Sync {
    /// `Err` means no usable response arrived at all.
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult>;
}

/// Talks to a running server over HTTP.
pub struct HttpExecutionClient {
    client: Client,
    endpoint: String,
}

impl HttpExecutionClient {
    /// `endpoint` is the full URL, e.g. `http://127.0.0.1:8080/api/run-python`.
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ExecutionClient for HttpExecutionClient {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult> {
        let resp = self.client.post(&self.endpoint).json(request).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        // Error statuses still carry `{ "error": ... }`, so the body decides.
        serde_json::from_str::<ExecutionResult>(&body).map_err(|_| {
            FukuwaraiError::UnexpectedResponse(format!("status {}: {}", status.as_u16(), body))
        })
    }
}
