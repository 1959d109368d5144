// ABOUTME: HTTP client for the task store
// ABOUTME: One method per store operation, returning the status code plus the body where a reply shows it

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use taskbot_core::{Task, TaskUpdateInput};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid task URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Outcome of one store call.
///
/// `body` is only filled when the store answered with the operation's
/// success status; any other status leaves it empty. Calls whose reply
/// only depends on the status carry `()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, body: Option<T>) -> Self {
        Self { status, body }
    }
}

/// Create payload as typed by the user; the store validates `due_date`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub completed: bool,
}

/// The subset of the list envelope the front end reads
#[derive(Debug, Deserialize)]
struct TaskPage {
    results: Vec<Task>,
}

#[async_trait]
pub trait TaskApi: Send + Sync {
    /// First page of tasks
    async fn list_tasks(&self) -> Result<ApiResponse<Vec<Task>>, ClientError>;
    async fn create_task(&self, task: &NewTask) -> Result<ApiResponse<()>, ClientError>;
    async fn get_task(&self, task_id: i64) -> Result<ApiResponse<Task>, ClientError>;
    async fn update_task(
        &self,
        task_id: i64,
        update: &TaskUpdateInput,
    ) -> Result<ApiResponse<()>, ClientError>;
    async fn delete_task(&self, task_id: i64) -> Result<ApiResponse<()>, ClientError>;
}

/// `reqwest` implementation of [`TaskApi`]
#[derive(Debug, Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TaskClient {
    /// `base_url` is the task collection endpoint; items live at `<base_url><id>/`
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn task_url(&self, task_id: i64) -> Result<Url, ClientError> {
        Ok(self.base_url.join(&format!("{}/", task_id))?)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        success: StatusCode,
    ) -> Result<ApiResponse<T>, ClientError> {
        let status = response.status();
        debug!("Task store answered {}", status);

        if status == success {
            Ok(ApiResponse::new(status, Some(response.json::<T>().await?)))
        } else {
            Ok(ApiResponse::new(status, None))
        }
    }

    /// Read only the status; the body is never parsed
    fn status_only(response: reqwest::Response, success: StatusCode) -> ApiResponse<()> {
        let status = response.status();
        debug!("Task store answered {}", status);

        ApiResponse::new(status, (status == success).then_some(()))
    }
}

#[async_trait]
impl TaskApi for TaskClient {
    async fn list_tasks(&self) -> Result<ApiResponse<Vec<Task>>, ClientError> {
        let response = self.http.get(self.base_url.clone()).send().await?;
        let page = Self::decode::<TaskPage>(response, StatusCode::OK).await?;
        Ok(ApiResponse::new(page.status, page.body.map(|p| p.results)))
    }

    async fn create_task(&self, task: &NewTask) -> Result<ApiResponse<()>, ClientError> {
        let response = self
            .http
            .post(self.base_url.clone())
            .json(task)
            .send()
            .await?;
        Ok(Self::status_only(response, StatusCode::CREATED))
    }

    async fn get_task(&self, task_id: i64) -> Result<ApiResponse<Task>, ClientError> {
        let response = self.http.get(self.task_url(task_id)?).send().await?;
        Self::decode(response, StatusCode::OK).await
    }

    async fn update_task(
        &self,
        task_id: i64,
        update: &TaskUpdateInput,
    ) -> Result<ApiResponse<()>, ClientError> {
        let response = self
            .http
            .patch(self.task_url(task_id)?)
            .json(update)
            .send()
            .await?;
        Ok(Self::status_only(response, StatusCode::OK))
    }

    async fn delete_task(&self, task_id: i64) -> Result<ApiResponse<()>, ClientError> {
        let response = self.http.delete(self.task_url(task_id)?).send().await?;
        Ok(Self::status_only(response, StatusCode::NO_CONTENT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let client = TaskClient::new(Url::parse("http://localhost:8000/tasks").unwrap());
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/tasks/");
    }

    #[test]
    fn test_task_url_appends_id_and_slash() {
        let client = TaskClient::new(Url::parse("http://localhost:8000/tasks/").unwrap());
        assert_eq!(
            client.task_url(5).unwrap().as_str(),
            "http://localhost:8000/tasks/5/"
        );
    }
}
