pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::schemas::exam::{Exam, ExamUpsert};
use crate::schemas::grading::{ResetRequest, ValidatedMark};
use crate::schemas::submission::{Submission, SubmissionReceipt, SubmissionRequest};

/// Failure of an upstream call, surfaced untranslated. A `Status` error keeps
/// the HTTP code so callers can tell a permission failure from a transient
/// one; a `Transport` error never reached the backend at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("upstream responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("upstream transport failed: {message}")]
    Transport { message: String },
}

impl UpstreamError {
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Transport { .. } => None,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        self.status() == Some(403)
    }
}

/// The remote resource backend the workflows forward to. The core only ever
/// talks to this trait; tests substitute a recording fake.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn create_or_update_exam(&self, draft: &ExamUpsert) -> Result<Exam, UpstreamError>;

    async fn exams_by_course(&self, course_id: &str) -> Result<Vec<Exam>, UpstreamError>;

    async fn upload_submission(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionReceipt, UpstreamError>;

    async fn apply_marks_batch(&self, marks: &[ValidatedMark]) -> Result<(), UpstreamError>;

    async fn reset_marks_batch(&self, request: &ResetRequest) -> Result<(), UpstreamError>;

    async fn submissions_by_exam(&self, exam_id: &str) -> Result<Vec<Submission>, UpstreamError>;

    async fn download_file(&self, file_ref: &str) -> Result<Vec<u8>, UpstreamError>;
}
