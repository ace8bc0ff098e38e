use serde::{Deserialize, Serialize};

pub const MAX_MARKS: i32 = 100;

/// A single grade entry as the grading UI sends it. Marks arrive as raw text
/// (free-typed input); validation happens here, not at the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkUpdate {
    pub submission_id: String,
    pub marks: String,
}

impl MarkUpdate {
    /// Parse and range-check the raw marks. `None` means the entry is
    /// skipped: not an integer, or outside `0..=MAX_MARKS`.
    pub(crate) fn validated(&self) -> Option<ValidatedMark> {
        let marks = self.marks.trim().parse::<i32>().ok()?;
        if !(0..=MAX_MARKS).contains(&marks) {
            return None;
        }
        Some(ValidatedMark { submission_id: self.submission_id.clone(), marks })
    }
}

/// A mark entry that passed validation; the only shape that ever goes
/// upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedMark {
    pub submission_id: String,
    pub marks: i32,
}

/// Result of a batch apply: the batch partially succeeds rather than failing
/// atomically. `applied + skipped.len()` always equals the input length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkBatchOutcome {
    pub applied: usize,
    pub skipped: Vec<MarkUpdate>,
}

/// Typed batch-reset request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetRequest {
    pub submission_ids: Vec<String>,
}
