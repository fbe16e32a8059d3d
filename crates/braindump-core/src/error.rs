use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BrainDumpError {
    #[error("Invalid category: {reason}")]
    InvalidCategory { reason: String },

    #[error("Entry not found: {id}")]
    EntryNotFound { id: Uuid },

    #[error("Category not found: {name}")]
    CategoryNotFound { name: String },

    // Deliberately carries no entry or owner detail.
    #[error("Entry belongs to another user")]
    NotEntryOwner,

    #[error("Malformed action token: {token}")]
    BadToken { token: String },

    #[error("Store file is corrupt: {path}")]
    CorruptStore { path: PathBuf },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Home directory not found")]
    HomeNotFound,
}

pub type Result<T> = std::result::Result<T, BrainDumpError>;

impl BrainDumpError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidCategory { .. } => 2,
            Self::EntryNotFound { .. } => 3,
            Self::CategoryNotFound { .. } => 3,
            Self::BadToken { .. } => 3,
            Self::NotEntryOwner => 4,
            _ => 1,
        }
    }

    /// Whether the message may be shown to the end user as-is.
    ///
    /// Validation problems are user-correctable and reported verbatim.
    /// Everything else gets a generic message at the boundary so internal
    /// detail never leaks into chat output.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::InvalidCategory { .. })
    }
}
