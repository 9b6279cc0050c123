/// Record ids in `gallery.json` and `submissions.json` are positive JSON integers.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
