//! Export destination backed by a remote export service.
//!
//! Submission is a single `POST /v1/exports`. The service queues the job and
//! answers with its id; completion and failure are tracked by the service,
//! not here. No polling, no retry.

use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

use super::{encode, ExportError, ExportFormat, ExportRequest, JobHandle, JobState};
use crate::http::{build_client, join_url};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBody<'a> {
    description: &'a str,
    file_format: ExportFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    folder: Option<&'a str>,
    content: String,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Debug, Clone)]
pub struct RemoteExporter {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl RemoteExporter {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ExportError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: join_url(base_url, &["v1", "exports"])?,
            token,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn submit(&self, request: ExportRequest) -> Result<JobHandle, ExportError> {
        let payload = encode(&request.collection, request.format)?;
        let content =
            String::from_utf8(payload).map_err(|e| ExportError::Encode(e.to_string()))?;

        let body = SubmitBody {
            description: &request.description,
            file_format: request.format,
            folder: request.folder.as_deref(),
            content,
        };

        debug!(
            "Submitting export '{}' to {}",
            request.description, self.endpoint
        );

        let mut builder = self.client.post(self.endpoint.clone()).json(&body);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            error!(
                "Export service rejected '{}': {} {}",
                request.description, status, body
            );
            return Err(ExportError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let accepted: SubmitResponse = response.json().await?;
        info!(
            "Export '{}' accepted as job {}",
            request.description, accepted.id
        );

        Ok(JobHandle {
            id: accepted.id,
            description: request.description,
            format: request.format,
            destination: self.endpoint.to_string(),
            state: JobState::Submitted,
            submitted_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Feature, FeatureCollection};
    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};

    type Received = Arc<Mutex<Vec<serde_json::Value>>>;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn accept(
        State(received): State<Received>,
        Json(body): Json<serde_json::Value>,
    ) -> Json<serde_json::Value> {
        received.lock().unwrap().push(body);
        Json(serde_json::json!({ "id": "TASK-1", "state": "READY" }))
    }

    async fn deny() -> (StatusCode, &'static str) {
        (StatusCode::FORBIDDEN, "quota exceeded for project")
    }

    fn request() -> ExportRequest {
        let collection =
            FeatureCollection::new(vec![Feature::new(None).with("ADM2_NAME", "Alpine")]);
        ExportRequest::new(collection, "counties_without_geometry", ExportFormat::Csv).unwrap()
    }

    #[tokio::test]
    async fn test_submit_returns_service_job_id() {
        let received: Received = Arc::default();
        let router = Router::new()
            .route("/v1/exports", post(accept))
            .with_state(received.clone());
        let base = serve(router).await;

        let exporter = RemoteExporter::new(&base, None, Duration::from_secs(5)).unwrap();
        let handle = exporter.submit(request()).await.unwrap();

        assert_eq!(handle.id, "TASK-1");
        assert_eq!(handle.state, JobState::Submitted);

        let bodies = received.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["description"], "counties_without_geometry");
        assert_eq!(bodies[0]["fileFormat"], "CSV");
        assert_eq!(bodies[0]["content"], "ADM2_NAME\nAlpine\n");
        assert!(bodies[0].get("folder").is_none());
    }

    #[tokio::test]
    async fn test_service_error_surfaced_unchanged() {
        let router = Router::new().route("/v1/exports", post(deny));
        let base = serve(router).await;

        let exporter = RemoteExporter::new(&base, None, Duration::from_secs(5)).unwrap();
        let err = exporter.submit(request()).await.unwrap_err();

        match err {
            ExportError::Service { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "quota exceeded for project");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
