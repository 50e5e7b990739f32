/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse a list identifier captured from a URL path segment.
///
/// Only the canonical decimal form the server itself emits is accepted:
/// ASCII digits, no sign, no leading zero. Anything else yields `None`, so
/// callers treat it the same as an id with no matching row.
pub fn parse_db_id(raw: &str) -> Option<DbId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let id = raw.parse::<DbId>().ok().filter(|id| *id > 0)?;
    (id.to_string() == raw).then_some(id)
}
