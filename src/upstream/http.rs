use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use uuid::Uuid;

use crate::core::config::Settings;
use crate::schemas::exam::{Exam, ExamUpsert};
use crate::schemas::grading::{ResetRequest, ValidatedMark};
use crate::schemas::submission::{Submission, SubmissionReceipt, SubmissionRequest};
use crate::upstream::{ResourceApi, UpstreamError};

/// HTTP implementation of the resource backend. Timeouts come from settings;
/// a timeout surfaces as a transport error, never an automatic retry —
/// neither uploads nor grading batches are safe to replay blindly.
#[derive(Debug, Clone)]
pub struct HttpResourceApi {
    client: Client,
    base_url: String,
}

impl HttpResourceApi {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let upstream = settings.upstream();
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(upstream.connect_timeout_seconds))
            .timeout(Duration::from_secs(upstream.timeout_seconds))
            .build()
            .context("Failed to build resource API HTTP client")?;

        Ok(Self { client, base_url: upstream.base_url.clone() })
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> Result<Response, UpstreamError> {
        let request_id = Uuid::new_v4();
        let response = request
            .header("X-Request-Id", request_id.to_string())
            .send()
            .await
            .map_err(|err| {
                tracing::error!(request_id = %request_id, error = %err, "{context}");
                UpstreamError::Transport { message: err.to_string() }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = failure_detail(response).await;
        tracing::error!(
            request_id = %request_id,
            status = status.as_u16(),
            detail = %message,
            "{context}"
        );
        Err(UpstreamError::Status { status: status.as_u16(), message })
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: Response,
        context: &'static str,
    ) -> Result<T, UpstreamError> {
        response.json::<T>().await.map_err(|err| UpstreamError::Transport {
            message: format!("{context}: invalid response body: {err}"),
        })
    }
}

/// Pull the backend's `detail` field out of an error body when it is JSON,
/// fall back to the raw text otherwise.
async fn failure_detail(response: Response) -> String {
    let raw = response.text().await.unwrap_or_default();
    serde_json::from_str::<Value>(&raw)
        .ok()
        .and_then(|value| value.get("detail").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(raw)
}

#[async_trait]
impl ResourceApi for HttpResourceApi {
    async fn create_or_update_exam(&self, draft: &ExamUpsert) -> Result<Exam, UpstreamError> {
        let request = match &draft.id {
            Some(exam_id) => self
                .client
                .put(format!("{}/courses/{}/exams/{exam_id}", self.base_url, draft.course_id)),
            None => {
                self.client.post(format!("{}/courses/{}/exams", self.base_url, draft.course_id))
            }
        };

        let response =
            self.execute(request.json(draft), "Failed to create or update exam").await?;
        Self::read_json(response, "create_or_update_exam").await
    }

    async fn exams_by_course(&self, course_id: &str) -> Result<Vec<Exam>, UpstreamError> {
        let request = self.client.get(format!("{}/courses/{course_id}/exams", self.base_url));
        let response = self.execute(request, "Failed to list exams").await?;
        Self::read_json(response, "exams_by_course").await
    }

    async fn upload_submission(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionReceipt, UpstreamError> {
        let part = Part::bytes(request.bytes)
            .file_name(request.filename)
            .mime_str(&request.content_type)
            .map_err(|err| UpstreamError::Transport {
                message: format!("invalid content type: {err}"),
            })?;
        let form = Form::new()
            .text("student_id", request.student_id)
            .text("checksum", request.checksum)
            .part("file", part);

        let builder = self
            .client
            .post(format!("{}/exams/{}/submissions", self.base_url, request.exam_id))
            .multipart(form);
        let response = self.execute(builder, "Failed to upload submission").await?;
        Self::read_json(response, "upload_submission").await
    }

    async fn apply_marks_batch(&self, marks: &[ValidatedMark]) -> Result<(), UpstreamError> {
        let builder = self
            .client
            .post(format!("{}/submissions/marks", self.base_url))
            .json(&serde_json::json!({ "marks": marks }));
        self.execute(builder, "Failed to apply marks batch").await?;
        Ok(())
    }

    async fn reset_marks_batch(&self, request: &ResetRequest) -> Result<(), UpstreamError> {
        let builder =
            self.client.post(format!("{}/submissions/marks/reset", self.base_url)).json(request);
        self.execute(builder, "Failed to reset marks batch").await?;
        Ok(())
    }

    async fn submissions_by_exam(&self, exam_id: &str) -> Result<Vec<Submission>, UpstreamError> {
        let request =
            self.client.get(format!("{}/exams/{exam_id}/submissions", self.base_url));
        let response = self.execute(request, "Failed to list submissions").await?;
        Self::read_json(response, "submissions_by_exam").await
    }

    async fn download_file(&self, file_ref: &str) -> Result<Vec<u8>, UpstreamError> {
        let request = self.client.get(format!("{}/files/{file_ref}", self.base_url));
        let response = self.execute(request, "Failed to download file").await?;
        let bytes = response.bytes().await.map_err(|err| UpstreamError::Transport {
            message: format!("download_file: failed to read body: {err}"),
        })?;
        Ok(bytes.to_vec())
    }
}
