/// Record identifiers are opaque strings minted by the storage collaborator.
pub type RecordId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
