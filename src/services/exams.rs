use thiserror::Error;
use time::OffsetDateTime;
use validator::Validate;

use crate::access::{Identity, Role};
use crate::schemas::exam::{Exam, ExamUpsert};
use crate::services::exam_window::{classify, ExamWindow};
use crate::upstream::{ResourceApi, UpstreamError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExamError {
    #[error("role is not permitted to perform this exam operation")]
    Forbidden,
    #[error("exam draft is invalid: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("exam window is invalid: start_at must be strictly before end_at")]
    InvalidWindow,
    #[error("the exam window is not open for downloads")]
    WindowClosed,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// The window invariant holds from creation onward, so it is asserted here,
/// at the only place drafts enter the system, never at classification time.
fn ensure_window(draft: &ExamUpsert) -> Result<(), ExamError> {
    if draft.start_at < draft.end_at {
        Ok(())
    } else {
        Err(ExamError::InvalidWindow)
    }
}

/// Create or update an exam. The draft is validated before any upstream call;
/// an inverted or zero-length window never leaves this function.
pub async fn upsert_exam(
    api: &dyn ResourceApi,
    identity: &Identity,
    draft: ExamUpsert,
) -> Result<Exam, ExamError> {
    if identity.role != Role::Instructor {
        return Err(ExamError::Forbidden);
    }

    draft.validate()?;
    ensure_window(&draft)?;

    let exam = api.create_or_update_exam(&draft).await?;
    tracing::info!(
        exam_id = %exam.id,
        course_id = %exam.course_id,
        instructor_id = %identity.user_id,
        "Exam stored"
    );

    Ok(exam)
}

/// List a course's exams. Instructors see them for management, students for
/// their assignments; administrators have no course navigation.
pub async fn exams_by_course(
    api: &dyn ResourceApi,
    identity: &Identity,
    course_id: &str,
) -> Result<Vec<Exam>, ExamError> {
    if identity.role == Role::Admin {
        return Err(ExamError::Forbidden);
    }

    Ok(api.exams_by_course(course_id).await?)
}

/// Fetch the exam paper for a student. Hard window precondition, not a UI
/// affordance: a direct call outside the window fails the same way the
/// disabled button would have prevented it.
pub async fn download_exam_paper(
    api: &dyn ResourceApi,
    identity: &Identity,
    exam: &Exam,
    now: OffsetDateTime,
) -> Result<Vec<u8>, ExamError> {
    if identity.role != Role::Student {
        return Err(ExamError::Forbidden);
    }

    if classify(exam, now) != ExamWindow::Active {
        tracing::warn!(
            exam_id = %exam.id,
            student_id = %identity.user_id,
            "Exam paper download attempted outside the window"
        );
        return Err(ExamError::WindowClosed);
    }

    Ok(api.download_file(&exam.file_ref).await?)
}
