use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use tracing::debug;
use url::Url;

use super::ApiError;
use crate::model::{Config, Envelope, Task, TaskDraft, TaskId, TaskUpdate};

/// The remote task collection.
///
/// One method per endpoint. Implementations return the payload of a
/// successful envelope and turn everything else into an [`ApiError`].
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `GET /tasks`
    async fn list(&self) -> Result<Vec<Task>, ApiError>;
    /// `GET /tasks/{id}`
    async fn get(&self, id: &TaskId) -> Result<Task, ApiError>;
    /// `POST /tasks`
    async fn create(&self, draft: &TaskDraft) -> Result<Task, ApiError>;
    /// `PUT /tasks/{id}`
    async fn update(&self, id: &TaskId, body: &TaskUpdate) -> Result<Task, ApiError>;
    /// `DELETE /tasks/{id}`
    async fn delete(&self, id: &TaskId) -> Result<(), ApiError>;
    /// `GET /health`, returning the server's message
    async fn health(&self) -> Result<String, ApiError>;
}

/// [`TaskApi`] over HTTP+JSON
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpTaskApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: "not a hierarchical url".to_string(),
            });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(HttpTaskApi {
            client: builder.build()?,
            base,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.api_url, config.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.endpoint(segments))
    }

    /// Send a request and decode the envelope, failing on `success: false`.
    ///
    /// Non-2xx statuses are not errors by themselves: the server reports
    /// "not found" and friends as envelopes with a message.
    async fn send(&self, request: RequestBuilder) -> Result<Envelope, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let envelope: Envelope = response.json().await?;
        debug!(%url, %status, success = envelope.success, "api response");

        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("unsuccessful response ({})", status));
            return Err(ApiError::Rejected { message });
        }
        Ok(envelope)
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let envelope = self.send(self.request(Method::GET, &["tasks"])).await?;
        let tasks = envelope.tasks.ok_or(ApiError::MissingPayload("tasks"))?;
        if let Some(count) = envelope.count
            && count != tasks.len()
        {
            debug!(count, received = tasks.len(), "task count disagrees with list");
        }
        Ok(tasks)
    }

    async fn get(&self, id: &TaskId) -> Result<Task, ApiError> {
        let id = id.to_string();
        let envelope = self.send(self.request(Method::GET, &["tasks", &id])).await?;
        envelope.task.ok_or(ApiError::MissingPayload("task"))
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let request = self.request(Method::POST, &["tasks"]).json(draft);
        let envelope = self.send(request).await?;
        envelope.task.ok_or(ApiError::MissingPayload("task"))
    }

    async fn update(&self, id: &TaskId, body: &TaskUpdate) -> Result<Task, ApiError> {
        let id = id.to_string();
        let request = self.request(Method::PUT, &["tasks", &id]).json(body);
        let envelope = self.send(request).await?;
        envelope.task.ok_or(ApiError::MissingPayload("task"))
    }

    async fn delete(&self, id: &TaskId) -> Result<(), ApiError> {
        let id = id.to_string();
        self.send(self.request(Method::DELETE, &["tasks", &id]))
            .await?;
        Ok(())
    }

    async fn health(&self) -> Result<String, ApiError> {
        let envelope = self.send(self.request(Method::GET, &["health"])).await?;
        Ok(envelope.message.unwrap_or_else(|| "ok".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn endpoint_appends_segments() {
        let api = HttpTaskApi::new("http://localhost:5000/api", None).unwrap();
        assert_eq!(
            api.endpoint(&["tasks"]).as_str(),
            "http://localhost:5000/api/tasks"
        );
        assert_eq!(
            api.endpoint(&["tasks", "42"]).as_str(),
            "http://localhost:5000/api/tasks/42"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let api = HttpTaskApi::new("http://localhost:5000/api/", None).unwrap();
        assert_eq!(
            api.endpoint(&["tasks"]).as_str(),
            "http://localhost:5000/api/tasks"
        );
    }

    #[test]
    fn endpoint_encodes_ids() {
        let api = HttpTaskApi::new("http://localhost:5000/api", None).unwrap();
        assert_eq!(
            api.endpoint(&["tasks", "a b/c"]).as_str(),
            "http://localhost:5000/api/tasks/a%20b%2Fc"
        );
    }

    #[test]
    fn rejects_bad_base_urls() {
        assert!(matches!(
            HttpTaskApi::new("not a url", None),
            Err(ApiError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpTaskApi::new("mailto:someone@example.com", None),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
