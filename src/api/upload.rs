//! Document upload for knowledge base nodes.

use serde::Deserialize;
use tracing::instrument;

use super::{ApiError, status_error};

/// Backend acknowledgement of an indexed document.
#[derive(Clone, Debug, Deserialize)]
pub struct UploadReceipt {
    pub message: String,
    /// Text chunks extracted and embedded from the document.
    #[serde(default)]
    pub chunks: usize,
}

/// Client for the document upload endpoint.
///
/// The backend only accepts PDFs; the extension check here short-circuits
/// before any network traffic so the caller gets the same error either way.
#[derive(Clone, Debug)]
pub struct DocumentClient {
    client: reqwest::Client,
    base_url: String,
}

impl DocumentClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadReceipt, ApiError> {
        if !file_name.to_ascii_lowercase().ends_with(".pdf") {
            return Err(ApiError::UnsupportedFile {
                file_name: file_name.to_owned(),
            });
        }
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_non_pdf_before_any_request() {
        // Bogus base URL: the guard must fire before a connection attempt.
        let client = DocumentClient::new("http://unreachable.invalid");
        let err = client.upload("notes.txt", b"hello".to_vec()).await.unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedFile { ref file_name } if file_name == "notes.txt"));
    }

    #[tokio::test]
    async fn extension_check_is_case_insensitive() {
        let client = DocumentClient::new("http://127.0.0.1:1");
        // Uppercase extension passes the guard and fails on transport instead.
        let err = client.upload("REPORT.PDF", vec![]).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn receipt_defaults_missing_chunk_count() {
        let receipt: UploadReceipt =
            serde_json::from_str(r#"{"message": "indexed"}"#).unwrap();
        assert_eq!(receipt.chunks, 0);
    }
}
