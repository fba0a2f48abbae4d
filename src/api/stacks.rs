//! Persistence API client: named workflow graphs ("stacks").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{ApiError, status_error};
use crate::graph::{Edge, Node};

/// A persisted workflow definition: graph plus naming metadata.
///
/// The graph store and the persisted copy may diverge freely between
/// explicit saves; there is no autosave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct StackCreateBody<'a> {
    name: &'a str,
    description: Option<&'a str>,
}

/// Partial update: only the supplied fields change on the backend.
#[derive(Clone, Debug, Default, Serialize)]
pub struct StackUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<Node>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<Edge>>,
}

impl StackUpdate {
    /// The update a save action sends: the full current graph.
    #[must_use]
    pub fn graph(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes: Some(nodes),
            edges: Some(edges),
            ..Self::default()
        }
    }
}

/// Client for the stack CRUD endpoints.
#[derive(Clone, Debug)]
pub struct StacksClient {
    client: reqwest::Client,
    base_url: String,
}

impl StacksClient {
    /// `base_url` is the API root, e.g. `http://localhost:8000/api`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// All stacks, most recently updated first (backend ordering).
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Stack>, ApiError> {
        let response = self
            .client
            .get(format!("{}/stacks/", self.base_url))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Create a stack with name and description; the backend decides the
    /// initial graph (empty, or seeded for demo names).
    #[instrument(skip(self))]
    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<Stack, ApiError> {
        let response = self
            .client
            .post(format!("{}/stacks/", self.base_url))
            .json(&StackCreateBody { name, description })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    pub async fn read(&self, id: &str) -> Result<Stack, ApiError> {
        let response = self
            .client
            .get(format!("{}/stacks/{id}", self.base_url))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response.json().await?)
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, id: &str, update: &StackUpdate) -> Result<Stack, ApiError> {
        let response = self
            .client
            .put(format!("{}/stacks/{id}", self.base_url))
            .json(update)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(format!("{}/stacks/{id}", self.base_url))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(())
    }
}
