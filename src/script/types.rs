//! Script types and data structures.

use chrono::{DateTime, Utc};

use crate::event::ModuleId;

/// Where a module's source came from, as given to the module manager.
#[derive(Debug, Clone, Default)]
pub struct ModuleSource {
    /// Display name.
    pub name: String,
    /// File path relative to the scripts directory, for file-backed modules.
    pub file_path: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

impl ModuleSource {
    /// A module with just a name (inline source, tests, native tooling).
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A loaded module.
#[derive(Debug, Clone)]
pub struct ModuleInfo {
    pub id: ModuleId,
    pub name: String,
    pub file_path: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    /// SHA-256 of the source, for change detection.
    pub file_hash: String,
    pub loaded_at: DateTime<Utc>,
    /// Handlers the module registered while loading.
    pub registrations: usize,
}

/// Script metadata parsed from Lua file comments.
#[derive(Debug, Clone, Default)]
pub struct ScriptMetadata {
    /// Display name (@name).
    pub name: Option<String>,
    /// Description (@description).
    pub description: Option<String>,
    /// Author (@author).
    pub author: Option<String>,
    /// Enabled flag (@enabled).
    pub enabled: Option<bool>,
}

/// Result of syncing scripts from the file system.
#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    /// Number of modules loaded for new files.
    pub added: usize,
    /// Number of modules reloaded because their file changed.
    pub updated: usize,
    /// Number of modules unloaded because their file is gone or disabled.
    pub removed: usize,
    /// Non-fatal errors encountered during sync, by path.
    pub errors: Vec<(String, String)>,
}

impl SyncResult {
    /// Check if any changes were made.
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.updated > 0 || self.removed > 0
    }

    /// Total number of changes.
    pub fn total_changes(&self) -> usize {
        self.added + self.updated + self.removed
    }
}
