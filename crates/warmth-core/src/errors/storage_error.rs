/// Storage-layer errors. Any of these means the anchor store could not
/// answer, so reads fail rather than return guessed data.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("corrupt row for entity {entity_id}: {details}")]
    CorruptRow { entity_id: String, details: String },
}
