use serde::Serialize;
use time::OffsetDateTime;

use crate::schemas::exam::Exam;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamWindow {
    Pending,
    Active,
    Closed,
}

/// Classify an exam against the supplied clock. The window is closed-open:
/// `start_at` inclusive, `end_at` exclusive, so an exam with
/// `start_at == end_at` is never active.
pub fn classify(exam: &Exam, now: OffsetDateTime) -> ExamWindow {
    if now < exam.start_at {
        ExamWindow::Pending
    } else if now < exam.end_at {
        ExamWindow::Active
    } else {
        ExamWindow::Closed
    }
}

/// Download and upload are permitted only inside the window. Grading is not
/// window-gated at all; it is role-gated by the route matrix.
pub fn is_open_for_submissions(exam: &Exam, now: OffsetDateTime) -> bool {
    classify(exam, now) == ExamWindow::Active
}
