use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use validator::Validate;

/// An exam as the resource backend reports it. The window invariant
/// `start_at < end_at` is guaranteed at creation/update time, so consumers of
/// this type may rely on it without re-checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_at: OffsetDateTime,
    pub file_ref: String,
}

/// Draft for creating or updating an exam. Field checks live here; the
/// window invariant is asserted by the exam service before any upstream
/// call. `id: None` creates, `id: Some` updates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExamUpsert {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "course_id must not be empty"))]
    pub course_id: String,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_at: OffsetDateTime,
    #[serde(default)]
    pub file_ref: Option<String>,
}
