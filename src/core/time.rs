use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Wall-clock read for callers. Decision functions never call this themselves;
/// they take `now` as an argument so they stay deterministic under test.
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

pub fn format_offset(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_else(|_| value.to_string())
}

pub fn parse_rfc3339(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(value, &Rfc3339)
}
