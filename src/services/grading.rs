use thiserror::Error;

use crate::access::{Identity, Role};
use crate::core::metrics;
use crate::schemas::grading::{MarkBatchOutcome, MarkUpdate, ResetRequest};
use crate::schemas::submission::Submission;
use crate::upstream::{ResourceApi, UpstreamError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GradingError {
    #[error("only instructors may grade submissions")]
    Forbidden,
    #[error("the reset batch is empty")]
    EmptyBatch,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Validate and apply a batch of mark updates.
///
/// Each entry stands on its own: invalid entries land in `skipped` and never
/// reach the backend, valid entries go upstream as one batch. Grading is a
/// per-student action, so one bad entry must not block the rest. A batch with
/// nothing valid in it returns without any upstream call.
pub async fn apply_marks(
    api: &dyn ResourceApi,
    identity: &Identity,
    updates: Vec<MarkUpdate>,
) -> Result<MarkBatchOutcome, GradingError> {
    if identity.role != Role::Instructor {
        return Err(GradingError::Forbidden);
    }

    let mut valid = Vec::new();
    let mut skipped = Vec::new();
    for update in updates {
        match update.validated() {
            Some(mark) => valid.push(mark),
            None => {
                tracing::debug!(
                    submission_id = %update.submission_id,
                    marks = %update.marks,
                    "Skipping invalid mark entry"
                );
                skipped.push(update);
            }
        }
    }

    if !skipped.is_empty() {
        ::metrics::counter!(metrics::MARKS_SKIPPED).increment(skipped.len() as u64);
    }

    if valid.is_empty() {
        return Ok(MarkBatchOutcome { applied: 0, skipped });
    }

    api.apply_marks_batch(&valid).await?;
    ::metrics::counter!(metrics::MARKS_APPLIED).increment(valid.len() as u64);
    tracing::info!(
        grader_id = %identity.user_id,
        applied = valid.len(),
        skipped = skipped.len(),
        "Marks batch applied"
    );

    Ok(MarkBatchOutcome { applied: valid.len(), skipped })
}

/// Reset marks on a batch of submissions, returning them to the ungraded
/// state without deleting anything. Idempotent upstream: resetting an
/// already-unmarked submission is not an error.
pub async fn reset_marks(
    api: &dyn ResourceApi,
    identity: &Identity,
    submission_ids: Vec<String>,
) -> Result<(), GradingError> {
    if identity.role != Role::Instructor {
        return Err(GradingError::Forbidden);
    }

    if submission_ids.is_empty() {
        return Err(GradingError::EmptyBatch);
    }

    let request = ResetRequest { submission_ids };
    api.reset_marks_batch(&request).await?;
    ::metrics::counter!(metrics::MARKS_RESET).increment(request.submission_ids.len() as u64);
    tracing::info!(
        grader_id = %identity.user_id,
        count = request.submission_ids.len(),
        "Marks batch reset"
    );

    Ok(())
}

/// The grading view of an exam: all submissions handed in so far.
pub async fn list_submissions(
    api: &dyn ResourceApi,
    identity: &Identity,
    exam_id: &str,
) -> Result<Vec<Submission>, GradingError> {
    if identity.role != Role::Instructor {
        return Err(GradingError::Forbidden);
    }

    Ok(api.submissions_by_exam(exam_id).await?)
}

/// Fetch a handed-in answer sheet for marking. No window gate: grading may
/// happen any time after submission.
pub async fn download_submission(
    api: &dyn ResourceApi,
    identity: &Identity,
    submission: &Submission,
) -> Result<Vec<u8>, GradingError> {
    if identity.role != Role::Instructor {
        return Err(GradingError::Forbidden);
    }

    Ok(api.download_file(&submission.file_ref).await?)
}
