//! HTTP adapter for the external task queue service.
//!
//! The queue accepts task envelopes over REST: each envelope names the worker
//! URL, carries a base64-encoded JSON body, and an absolute epoch time at
//! which the task becomes eligible to run.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde::Deserialize;

use crate::dispatch::{DispatchError, HttpTask, TaskQueue};

/// Task queue client posting to the queue service's create-task endpoint
#[derive(Debug, Clone)]
pub struct HttpTaskQueue {
    client: Client,
    queue_url: String,
}

impl HttpTaskQueue {
    pub fn new(queue_url: impl Into<String>) -> Self {
        let queue_url = queue_url.into();
        Self {
            client: Client::new(),
            queue_url: queue_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client with a preconfigured reqwest Client (timeouts, proxies)
    pub fn with_client(queue_url: impl Into<String>, client: Client) -> Self {
        let queue_url = queue_url.into();
        Self {
            client,
            queue_url: queue_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedTask {
    name: String,
}

#[async_trait]
impl TaskQueue for HttpTaskQueue {
    async fn enqueue(&self, task: HttpTask) -> Result<String, DispatchError> {
        let schedule_time = chrono::Utc::now().timestamp() + task.delay_secs as i64;

        let envelope = serde_json::json!({
            "task": {
                "httpRequest": {
                    "httpMethod": "POST",
                    "url": task.url,
                    "headers": { "Content-Type": "application/json" },
                    "body": STANDARD.encode(serde_json::to_vec(&task.body)?),
                },
                "scheduleTime": { "seconds": schedule_time },
            }
        });

        let url = format!("{}/tasks", self.queue_url);
        let response = self.client.post(&url).json(&envelope).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let created: CreatedTask = response.json().await?;

        tracing::debug!("Created task {}", created.name);

        Ok(created.name)
    }
}
