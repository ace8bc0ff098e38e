//! Access gating and exam workflows for a learning management platform.
//!
//! This crate is the decision core that sits between a UI layer and the
//! remote resource backend: it validates bearer credentials, maps roles onto
//! route areas, enforces exam time windows, and runs the submission and
//! grading workflows. Rendering, routing and persistence live with the
//! caller; the backend is consumed through the [`upstream::ResourceApi`]
//! trait.

pub mod access;
pub mod core;
pub mod schemas;
pub mod services;
pub mod upstream;

#[cfg(test)]
mod test_support;

pub use access::{
    authorize, validate, validate_and_authorize, AccessError, AuthError, AuthzError, Identity,
    Role, RouteArea,
};
pub use crate::core::config::{ConfigError, Settings};
pub use schemas::exam::{Exam, ExamUpsert};
pub use schemas::grading::{MarkBatchOutcome, MarkUpdate, ResetRequest, ValidatedMark};
pub use schemas::submission::{
    Submission, SubmissionPayload, SubmissionReceipt, SubmissionRequest,
};
pub use services::exam_window::{classify, ExamWindow};
pub use services::exams::{download_exam_paper, exams_by_course, upsert_exam, ExamError};
pub use services::grading::{apply_marks, list_submissions, reset_marks, GradingError};
pub use services::submissions::{submit, SubmitError};
pub use upstream::http::HttpResourceApi;
pub use upstream::{ResourceApi, UpstreamError};
