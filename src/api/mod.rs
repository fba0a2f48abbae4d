//! HTTP clients for the backend contracts the core consumes: the stack
//! persistence API and the document upload API. (The execution API lives in
//! [`crate::session::executor`], next to the lifecycle that owns it.)
//!
//! The core treats both as opaque remote stores speaking exactly its own
//! node/edge shapes; any divergence is a compatibility break, not something
//! handled defensively here.

pub mod stacks;
pub mod upload;

pub use stacks::{Stack, StackUpdate, StacksClient};
pub use upload::{DocumentClient, UploadReceipt};

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

/// Failures crossing the persistence / upload boundaries.
#[derive(Debug, Error, Diagnostic)]
pub enum ApiError {
    /// The backend answered with a failure status and, usually, a
    /// human-readable `detail`.
    #[error("{detail}")]
    #[diagnostic(code(stackweave::api::status))]
    Status { status: u16, detail: String },

    /// The request never completed.
    #[error("api request failed: {0}")]
    #[diagnostic(
        code(stackweave::api::transport),
        help("Check that the workflow backend is running and reachable.")
    )]
    Transport(#[from] reqwest::Error),

    /// Local validation refused the call before any network traffic.
    #[error("only PDF documents are supported (got {file_name:?})")]
    #[diagnostic(code(stackweave::api::unsupported_file))]
    UnsupportedFile { file_name: String },
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: Option<String>,
}

/// Convert a non-success response into [`ApiError::Status`], preferring the
/// backend's `detail` field over a generic message.
pub(crate) async fn status_error(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let detail = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .unwrap_or_else(|| format!("backend returned status {status}"));
    ApiError::Status {
        status: status.as_u16(),
        detail,
    }
}
