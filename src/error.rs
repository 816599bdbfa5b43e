//! Error types for realmscript.

use thiserror::Error;

use crate::engine::EntityCategory;

/// Common error type for realmscript.
#[derive(Error, Debug)]
pub enum RealmError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Template table file could not be parsed.
    #[error("template error: {0}")]
    Template(String),

    /// An entity-keyed registration named an id the template store does not know.
    ///
    /// This is fatal: it means the scripts were built against different game data.
    #[error(
        "tried registering event for invalid {category} entry: {id} \
         (did you remember to build your datascripts?)"
    )]
    InvalidEntity {
        /// Category the id was registered under.
        category: EntityCategory,
        /// The rejected id.
        id: u32,
    },

    /// Registration request that does not fit the event kind.
    #[error("registration error: {0}")]
    Registration(String),

    /// Script load or execution error.
    #[error("script error: {0}")]
    Script(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),
}

impl RealmError {
    /// Whether this error must halt startup instead of being logged and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RealmError::InvalidEntity { .. })
    }
}

/// Result type alias for realmscript operations.
pub type Result<T> = std::result::Result<T, RealmError>;

/// Failure raised by a single event handler.
///
/// Handler failures never reach the native hook; the dispatcher logs them and moves on.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Lua raised an error (including sandbox limit violations).
    #[error("lua error: {0}")]
    Lua(#[from] mlua::Error),

    /// A Rust-native handler reported a failure.
    #[error("handler failed: {0}")]
    Failed(String),
}
