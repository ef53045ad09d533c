//! DataProvider - thin fetch wrapper over the collections API

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::records::{Project, TaskRecord, Team};

/// Resource names understood by the API.
pub const PROJECTS: &str = "projects";
pub const TASKS: &str = "tasks";
pub const TEAM: &str = "team";

/// Errors from a collection fetch.
///
/// All of these are terminal for the single request that produced them: the
/// provider does no retrying. Default caller policy is to set a visible error
/// flag and move on.
#[derive(Debug, Error)]
pub enum DataError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    /// The body was not valid JSON.
    #[error("response from {url} was not valid JSON")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body was JSON but not the expected array of records.
    #[error("response from {url} did not match the expected record shape")]
    Shape {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One HTTP GET per call against `{base_url}/{resource}`, resolving to the
/// JSON array the endpoint serves.
///
/// Deliberately minimal: no retry, no caching, and no cancellation of an
/// in-flight request. A caller that unmounts while a fetch is outstanding
/// must guard its completion path itself (see the dashboard module).
pub struct DataProvider {
    client: reqwest::Client,
    base_url: String,
}

impl DataProvider {
    /// Build a provider for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> eyre::Result<Self> {
        let base_url = base_url.into();
        debug!(%base_url, ?timeout, "DataProvider::new");
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Fetch the raw collection at `/{resource}` as a JSON array.
    pub async fn fetch_collection(&self, resource: &str) -> Result<Vec<Value>, DataError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), resource);
        debug!(%url, "DataProvider::fetch_collection");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| DataError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status { url, status });
        }

        let body: Value = response.json().await.map_err(|source| DataError::Decode {
            url: url.clone(),
            source,
        })?;

        match body {
            Value::Array(records) => Ok(records),
            other => {
                use serde::de::Error;
                Err(DataError::Shape {
                    url,
                    source: serde_json::Error::custom(format!(
                        "expected a JSON array of records, got {}",
                        type_name(&other)
                    )),
                })
            }
        }
    }

    /// Typed fetch of `/projects`.
    pub async fn projects(&self) -> Result<Vec<Project>, DataError> {
        self.typed(PROJECTS).await
    }

    /// Typed fetch of `/tasks`.
    pub async fn tasks(&self) -> Result<Vec<TaskRecord>, DataError> {
        self.typed(TASKS).await
    }

    /// Typed fetch of `/team`.
    pub async fn team(&self) -> Result<Vec<Team>, DataError> {
        self.typed(TEAM).await
    }

    async fn typed<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, DataError> {
        let records = self.fetch_collection(resource).await?;
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), resource);
        serde_json::from_value(Value::Array(records)).map_err(|source| DataError::Shape { url, source })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Minimal canned-response HTTP server; answers every request the same way.
    async fn stub_endpoint(status_line: &'static str, body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut sock, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let _ = sock.read(&mut buf).await;
                    let response = format!(
                        "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = sock.write_all(response.as_bytes()).await;
                });
            }
        });
        format!("http://{addr}")
    }

    fn provider(base_url: &str) -> DataProvider {
        DataProvider::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_collection_resolves_stubbed_array() {
        let base = stub_endpoint("200 OK", r#"[{"id":1,"name":"Mock Project"}]"#).await;
        let records = provider(&base).fetch_collection("projects").await.unwrap();
        assert_eq!(records, vec![json!({"id": 1, "name": "Mock Project"})]);
    }

    #[tokio::test]
    async fn test_typed_fetch_decodes_records() {
        let base = stub_endpoint(
            "200 OK",
            r#"[{"id":1,"projectId":1,"name":"Design Mockups","status":"Completed"}]"#,
        )
        .await;
        let tasks = provider(&base).tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].project_id, 1);
        assert_eq!(tasks[0].status, "Completed");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let base = stub_endpoint("500 Internal Server Error", "[]").await;
        let err = provider(&base).fetch_collection("projects").await.unwrap_err();
        assert!(matches!(err, DataError::Status { status, .. } if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_non_array_body_is_shape_error() {
        let base = stub_endpoint("200 OK", r#"{"not":"an array"}"#).await;
        let err = provider(&base).fetch_collection("projects").await.unwrap_err();
        assert!(matches!(err, DataError::Shape { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_error() {
        // Bind then drop to get an address nothing is listening on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = provider(&format!("http://{addr}"))
            .fetch_collection("projects")
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Request { .. }));
    }
}
