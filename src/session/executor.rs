//! The executor seam: one run of a serialized workflow against the backend.

use async_trait::async_trait;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::request::WorkflowRequest;

/// Wire body for `/run_workflow`.
#[derive(Debug, Serialize)]
pub struct ExecuteBody<'a> {
    pub workflow: &'a WorkflowRequest,
    pub user_query: &'a str,
}

/// Executor response: a single textual answer plus per-node trace lines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ExecuteResponse {
    pub answer: String,
    #[serde(default)]
    pub logs: Vec<String>,
}

/// Failures crossing the executor boundary.
#[derive(Debug, Error, Diagnostic)]
pub enum ExecutorError {
    /// The backend rejected the run and supplied a human-readable reason.
    #[error("{detail}")]
    #[diagnostic(code(stackweave::executor::api))]
    Api { detail: String },

    /// The request never completed: connection refused, timeout, TLS, etc.
    #[error("executor request failed: {0}")]
    #[diagnostic(
        code(stackweave::executor::transport),
        help("Check that the workflow backend is running and reachable.")
    )]
    Transport(#[from] reqwest::Error),
}

impl ExecutorError {
    /// The user-facing reason for this failure.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            ExecutorError::Api { detail } => detail.clone(),
            ExecutorError::Transport(_) => "Error executing workflow. Check backend.".to_string(),
        }
    }
}

/// One run of a serialized workflow. Implementations must be cancel-safe:
/// the session drops the returned future to abort a run, so no implementation
/// may rely on running to completion.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn run(
        &self,
        workflow: &WorkflowRequest,
        user_query: &str,
    ) -> Result<ExecuteResponse, ExecutorError>;
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: Option<String>,
}

/// Executor backed by the workflow backend's HTTP API.
#[derive(Clone, Debug)]
pub struct HttpExecutor {
    client: reqwest::Client,
    base_url: String,
}

impl HttpExecutor {
    /// `base_url` is the API root, e.g. `http://localhost:8000/api`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    #[instrument(skip(self, workflow), fields(nodes = workflow.nodes.len()))]
    async fn run(
        &self,
        workflow: &WorkflowRequest,
        user_query: &str,
    ) -> Result<ExecuteResponse, ExecutorError> {
        let url = format!("{}/run_workflow", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&ExecuteBody {
                workflow,
                user_query,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| format!("executor returned status {status}"));
            return Err(ExecutorError::Api { detail });
        }

        Ok(response.json::<ExecuteResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_body_wire_shape() {
        let workflow = WorkflowRequest {
            nodes: vec![],
            edges: vec![],
        };
        let body = ExecuteBody {
            workflow: &workflow,
            user_query: "hello",
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["user_query"], "hello");
        assert!(value["workflow"]["nodes"].as_array().unwrap().is_empty());
    }

    #[test]
    fn response_tolerates_missing_logs() {
        let resp: ExecuteResponse = serde_json::from_str(r#"{"answer":"hi"}"#).unwrap();
        assert_eq!(resp.answer, "hi");
        assert!(resp.logs.is_empty());
    }

    #[test]
    fn api_error_detail_passes_through() {
        let err = ExecutorError::Api {
            detail: "No User Query node found.".into(),
        };
        assert_eq!(err.detail(), "No User Query node found.");
    }
}
