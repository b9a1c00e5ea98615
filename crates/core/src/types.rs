/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Stable user identity extracted from a verified bearer token.
pub type OwnerId = String;
