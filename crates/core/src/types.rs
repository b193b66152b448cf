use crate::error::CoreError;

/// All document ids are UUID v4, serialized as strings.
pub type DocId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh document id.
pub fn new_doc_id() -> DocId {
    uuid::Uuid::new_v4()
}

/// Parse a path segment into a [`DocId`].
///
/// A malformed id is a cast failure, not a missing entity, and is reported as
/// [`CoreError::InvalidId`].
pub fn parse_doc_id(raw: &str) -> Result<DocId, CoreError> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|_| CoreError::InvalidId { field: "_id" })
}
