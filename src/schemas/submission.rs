use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

/// A submission as the resource backend reports it. `marks: None` means not
/// yet graded (or reset since).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub exam_id: String,
    pub student_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
    pub file_ref: String,
    #[serde(default)]
    pub marks: Option<i32>,
}

/// The answer-sheet file a student hands in.
#[derive(Debug, Clone)]
pub struct SubmissionPayload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SubmissionPayload {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn checksum(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

/// Fully-constructed upload request: validated before it reaches the
/// transport layer, never assembled ad hoc at the call site.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub exam_id: String,
    pub student_id: String,
    pub filename: String,
    pub content_type: String,
    pub checksum: String,
    pub bytes: Vec<u8>,
}

/// What the backend acknowledges an upload with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub submission_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}
