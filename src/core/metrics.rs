use metrics::describe_counter;

pub(crate) const SUBMISSIONS_ACCEPTED: &str = "examgate_submissions_accepted_total";
pub(crate) const MARKS_APPLIED: &str = "examgate_marks_applied_total";
pub(crate) const MARKS_SKIPPED: &str = "examgate_marks_skipped_total";
pub(crate) const MARKS_RESET: &str = "examgate_marks_reset_total";
pub(crate) const ACCESS_DENIED: &str = "examgate_access_denied_total";

/// Register metric descriptions with whatever recorder the embedding
/// application installed. Without a recorder every emission is a no-op.
pub fn describe() {
    describe_counter!(SUBMISSIONS_ACCEPTED, "Submissions accepted and forwarded upstream");
    describe_counter!(MARKS_APPLIED, "Mark updates validated and sent upstream");
    describe_counter!(MARKS_SKIPPED, "Mark updates rejected by local validation");
    describe_counter!(MARKS_RESET, "Submissions whose marks were batch-reset");
    describe_counter!(ACCESS_DENIED, "Requests denied by the access guard or route matrix");
}
