//! Judge Backend - Boundary to the Remote Judging Service
//!
//! **Responsibility:**
//! Move requests and replies between the workflow and the judge API.
//!
//! **Boundary:**
//! - Backend knows HOW to reach the service (HTTP, status codes, JSON)
//! - Backend does NOT touch playground state or notify the user
//! - A "not ready yet" answer is a normal outcome, not an error
//!
//! Production uses `HttpBackend`; tests swap in scripted fakes.

use async_trait::async_trait;
use codenova_common::api;
use codenova_common::config::ClientConfig;
use codenova_common::types::{JudgeRequest, JudgeResult, ShareSnapshot, TaskResponse};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::error::{Endpoint, PlaygroundError, Result};

/// Answer to one result poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The task is still queued or running
    NotReady,
    Ready(Vec<JudgeResult>),
}

#[async_trait]
pub trait JudgeBackend: Send + Sync {
    /// Submit a batch and return the task id to poll
    async fn submit(&self, request: &JudgeRequest) -> Result<String>;

    async fn fetch_result(&self, task_id: &str) -> Result<PollOutcome>;

    /// Persist a snapshot and return its share id
    async fn share(&self, snapshot: &ShareSnapshot) -> Result<String>;

    async fn load_share(&self, share_id: &str) -> Result<ShareSnapshot>;
}

/// reqwest-backed client for the judge HTTP API
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.api_url.clone(),
        })
    }
}

fn ensure_success(endpoint: Endpoint, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(PlaygroundError::Status { endpoint, status })
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| PlaygroundError::Decode(e.to_string()))
}

fn non_empty_id(endpoint: Endpoint, reply: TaskResponse) -> Result<String> {
    if reply.task_id.trim().is_empty() {
        Err(PlaygroundError::Decode(format!("{} response carried an empty id", endpoint)))
    } else {
        Ok(reply.task_id)
    }
}

#[async_trait]
impl JudgeBackend for HttpBackend {
    async fn submit(&self, request: &JudgeRequest) -> Result<String> {
        let url = api::judge_url(&self.base_url);
        debug!(url = %url, test_cases = request.test_cases.len(), "Submitting to judge");

        let response = self.client.post(&url).json(request).send().await?;
        let response = ensure_success(Endpoint::Judge, response)?;
        non_empty_id(Endpoint::Judge, decode(response).await?)
    }

    async fn fetch_result(&self, task_id: &str) -> Result<PollOutcome> {
        let url = api::result_url(&self.base_url, task_id);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(PollOutcome::NotReady);
        }
        let response = ensure_success(Endpoint::Result, response)?;
        Ok(PollOutcome::Ready(decode(response).await?))
    }

    async fn share(&self, snapshot: &ShareSnapshot) -> Result<String> {
        let url = api::share_url(&self.base_url);
        debug!(url = %url, results = snapshot.results.len(), "Sharing snapshot");

        let response = self.client.post(&url).json(snapshot).send().await?;
        let response = ensure_success(Endpoint::Share, response)?;
        non_empty_id(Endpoint::Share, decode(response).await?)
    }

    async fn load_share(&self, share_id: &str) -> Result<ShareSnapshot> {
        let url = api::share_snapshot_url(&self.base_url, share_id);
        let response = self.client.get(&url).send().await?;
        let response = ensure_success(Endpoint::LoadShare, response)?;
        decode(response).await
    }
}
