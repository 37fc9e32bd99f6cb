/// Top-level Folio error type.
///
/// All fallible operations in `folio-core` return [`Result<T, FolioError>`](Result).
/// Each variant wraps a domain-specific error enum, allowing callers to
/// match on the error source without losing type information.
#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    /// Error from the project store (lookup, conflicts).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from the slot storage backend (`SQLite`, quota).
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Error from the admin session guard.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// A project record violates a data-model invariant.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error in configuration parsing or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from project store operations.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// No project with the given id exists in the store.
    #[error("Project not found: {0}")]
    NotFound(String),

    /// The list changed since the caller took its snapshot.
    #[error("Revision conflict: expected {expected}, store is at {actual}")]
    Conflict {
        /// Revision the caller based its edit on.
        expected: u64,
        /// Current revision of the store.
        actual: u64,
    },

    /// The persisted envelope could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the string-keyed slot storage.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// Underlying `SQLite` operation failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Writing the slot would exceed the configured byte quota.
    #[error("Quota exceeded writing {key}: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Slot key being written.
        key: String,
        /// Total bytes the store would hold after the write.
        needed: usize,
        /// Configured quota in bytes.
        quota: usize,
    },

    /// Schema migration failed (version mismatch or DDL error).
    #[error("Migration failed: {0}")]
    Migration(String),

    /// The slot could not be read, so it must not be overwritten.
    #[error("Cannot read slot {key}; refusing to overwrite it")]
    Unavailable {
        /// Slot key whose read failed.
        key: String,
    },
}

/// Errors from the admin session guard.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// The identifier/secret pair did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// An admin operation was attempted without a session marker.
    #[error("Not logged in")]
    NotAuthenticated,
}

/// A required project field is missing or empty.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    #[error("Field `{0}` is required")]
    MissingField(&'static str),
}

/// Errors in Folio configuration parsing and validation.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Cannot read config {path}: {source}")]
    Io {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Configuration values are present but semantically invalid.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Configuration file syntax could not be parsed (TOML error).
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenience alias used throughout `folio-core`.
pub type Result<T> = std::result::Result<T, FolioError>;
