use thiserror::Error;
use time::OffsetDateTime;

use crate::access::{Identity, Role};
use crate::core::metrics;
use crate::schemas::exam::Exam;
use crate::schemas::submission::{SubmissionPayload, SubmissionReceipt, SubmissionRequest};
use crate::services::exam_window::{classify, ExamWindow};
use crate::upstream::{ResourceApi, UpstreamError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("only students may hand in submissions")]
    Forbidden,
    #[error("the exam window is not open for submissions")]
    WindowClosed,
    #[error("the submission payload is empty")]
    EmptyPayload,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Hand in an answer sheet for an exam.
///
/// Preconditions are checked in order: caller role, exam window, payload.
/// The upload is forwarded once and never retried here — it carries no dedup
/// key, so replaying after a timeout is the caller's explicit decision.
pub async fn submit(
    api: &dyn ResourceApi,
    identity: &Identity,
    exam: &Exam,
    payload: SubmissionPayload,
    now: OffsetDateTime,
) -> Result<SubmissionReceipt, SubmitError> {
    if identity.role != Role::Student {
        return Err(SubmitError::Forbidden);
    }

    if classify(exam, now) != ExamWindow::Active {
        tracing::warn!(
            exam_id = %exam.id,
            student_id = %identity.user_id,
            "Submission attempted outside the exam window"
        );
        return Err(SubmitError::WindowClosed);
    }

    if payload.is_empty() {
        return Err(SubmitError::EmptyPayload);
    }

    let request = SubmissionRequest {
        exam_id: exam.id.clone(),
        student_id: identity.user_id.clone(),
        checksum: payload.checksum(),
        filename: payload.filename,
        content_type: payload.content_type,
        bytes: payload.bytes,
    };

    let receipt = api.upload_submission(request).await?;
    ::metrics::counter!(metrics::SUBMISSIONS_ACCEPTED).increment(1);
    tracing::info!(
        exam_id = %exam.id,
        student_id = %identity.user_id,
        submission_id = %receipt.submission_id,
        "Submission accepted"
    );

    Ok(receipt)
}
