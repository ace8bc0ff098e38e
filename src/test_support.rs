use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use time::{macros::datetime, OffsetDateTime};

use crate::access::{Identity, Role};
use crate::core::config::Settings;
use crate::core::security::Claims;
use crate::schemas::exam::{Exam, ExamUpsert};
use crate::schemas::grading::{ResetRequest, ValidatedMark};
use crate::schemas::submission::{
    Submission, SubmissionPayload, SubmissionReceipt, SubmissionRequest,
};
use crate::upstream::{ResourceApi, UpstreamError};

pub(crate) const TEST_SECRET_KEY: &str = "test-secret";

/// Serialises tests that mutate process environment variables.
pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn set_test_env() {
    std::env::set_var("SECRET_KEY", TEST_SECRET_KEY);
    std::env::set_var("ALGORITHM", "HS256");
}

pub(crate) fn test_settings() -> Settings {
    Settings::with_secret(TEST_SECRET_KEY)
}

pub(crate) fn test_settings_with_secret(secret: &str) -> Settings {
    Settings::with_secret(secret)
}

/// A fixed clock keeps every decision test deterministic.
pub(crate) fn fixed_now() -> OffsetDateTime {
    datetime!(2025-06-30 12:00:00 UTC)
}

pub(crate) fn future_expiry() -> i64 {
    fixed_now().unix_timestamp() + 3600
}

pub(crate) fn mint_token(
    subject: &str,
    user_id: &str,
    authorities: &[&str],
    exp: i64,
    settings: &Settings,
) -> String {
    let claims = Claims {
        sub: subject.to_string(),
        exp,
        authorities: authorities.iter().map(|authority| authority.to_string()).collect(),
        user_id: user_id.to_string(),
        fullname: Some("Test User".to_string()),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.security().secret_key.as_bytes()),
    )
    .expect("token")
}

pub(crate) fn identity(role: Role) -> Identity {
    identity_with_id(role, "user-1")
}

pub(crate) fn identity_with_id(role: Role, user_id: &str) -> Identity {
    Identity {
        user_id: user_id.to_string(),
        subject: "user@example.edu".to_string(),
        full_name: Some("Test User".to_string()),
        role,
    }
}

pub(crate) fn student() -> Identity {
    identity(Role::Student)
}

pub(crate) fn instructor() -> Identity {
    identity(Role::Instructor)
}

pub(crate) fn exam(start_at: OffsetDateTime, end_at: OffsetDateTime) -> Exam {
    Exam {
        id: "exam-1".to_string(),
        course_id: "course-1".to_string(),
        title: "Midterm".to_string(),
        start_at,
        end_at,
        file_ref: "paper-1".to_string(),
    }
}

pub(crate) fn payload(bytes: &[u8]) -> SubmissionPayload {
    SubmissionPayload {
        filename: "answers.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        bytes: bytes.to_vec(),
    }
}

/// Everything the workflows sent upstream, in order. Call-count assertions on
/// this record prove the "no upstream call" properties.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RecordedCall {
    CreateOrUpdateExam { course_id: String },
    ExamsByCourse { course_id: String },
    UploadSubmission { exam_id: String, student_id: String },
    ApplyMarksBatch { marks: Vec<ValidatedMark> },
    ResetMarksBatch { submission_ids: Vec<String> },
    SubmissionsByExam { exam_id: String },
    DownloadFile { file_ref: String },
}

#[derive(Default)]
pub(crate) struct FakeResourceApi {
    calls: Mutex<Vec<RecordedCall>>,
    fail_with: Option<UpstreamError>,
}

impl FakeResourceApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A backend where every call fails after being recorded.
    pub(crate) fn failing(error: UpstreamError) -> Self {
        Self { calls: Mutex::new(Vec::new()), fail_with: Some(error) }
    }

    pub(crate) fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record(&self, call: RecordedCall) -> Result<(), UpstreamError> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(call);
        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ResourceApi for FakeResourceApi {
    async fn create_or_update_exam(&self, draft: &ExamUpsert) -> Result<Exam, UpstreamError> {
        self.record(RecordedCall::CreateOrUpdateExam { course_id: draft.course_id.clone() })?;
        Ok(Exam {
            id: draft.id.clone().unwrap_or_else(|| "exam-1".to_string()),
            course_id: draft.course_id.clone(),
            title: draft.title.clone(),
            start_at: draft.start_at,
            end_at: draft.end_at,
            file_ref: draft.file_ref.clone().unwrap_or_else(|| "paper-1".to_string()),
        })
    }

    async fn exams_by_course(&self, course_id: &str) -> Result<Vec<Exam>, UpstreamError> {
        self.record(RecordedCall::ExamsByCourse { course_id: course_id.to_string() })?;
        Ok(Vec::new())
    }

    async fn upload_submission(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionReceipt, UpstreamError> {
        self.record(RecordedCall::UploadSubmission {
            exam_id: request.exam_id.clone(),
            student_id: request.student_id.clone(),
        })?;
        Ok(SubmissionReceipt { submission_id: "sub-1".to_string(), submitted_at: fixed_now() })
    }

    async fn apply_marks_batch(&self, marks: &[ValidatedMark]) -> Result<(), UpstreamError> {
        self.record(RecordedCall::ApplyMarksBatch { marks: marks.to_vec() })
    }

    async fn reset_marks_batch(&self, request: &ResetRequest) -> Result<(), UpstreamError> {
        self.record(RecordedCall::ResetMarksBatch {
            submission_ids: request.submission_ids.clone(),
        })
    }

    async fn submissions_by_exam(&self, exam_id: &str) -> Result<Vec<Submission>, UpstreamError> {
        self.record(RecordedCall::SubmissionsByExam { exam_id: exam_id.to_string() })?;
        Ok(Vec::new())
    }

    async fn download_file(&self, file_ref: &str) -> Result<Vec<u8>, UpstreamError> {
        self.record(RecordedCall::DownloadFile { file_ref: file_ref.to_string() })?;
        Ok(b"%PDF-1.7 stub".to_vec())
    }
}
