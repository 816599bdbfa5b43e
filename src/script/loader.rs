//! Script loader for scanning and syncing Lua modules from the file system.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::module::ModuleManager;
use super::types::{ModuleSource, ScriptMetadata, SyncResult};
use crate::Result;

/// Loader for scanning Lua modules from the file system.
pub struct ScriptLoader {
    /// Base directory for scripts.
    scripts_dir: PathBuf,
}

impl ScriptLoader {
    /// Create a new ScriptLoader with the given scripts directory.
    pub fn new<P: AsRef<Path>>(scripts_dir: P) -> Self {
        Self {
            scripts_dir: scripts_dir.as_ref().to_path_buf(),
        }
    }

    /// Bring the loaded modules in line with the scripts directory.
    ///
    /// This will:
    /// 1. Scan the scripts directory for .lua files
    /// 2. Load new files, reload changed ones, skip unchanged ones
    /// 3. Unload modules whose file is gone or marked `@enabled false`
    ///
    /// Script errors are collected in the result. An invalid entity registration aborts the
    /// sync with an error.
    pub fn sync(&self, modules: &mut ModuleManager) -> Result<SyncResult> {
        let mut result = SyncResult::default();

        let existing_paths: HashSet<String> = modules
            .modules()
            .filter_map(|info| info.file_path.clone())
            .collect();
        let mut found_paths: HashSet<String> = HashSet::new();

        if self.scripts_dir.exists() {
            self.scan_directory(&self.scripts_dir, modules, &mut result, &mut found_paths)?;
        }

        // Unload modules whose file no longer exists or was disabled
        for path in existing_paths.difference(&found_paths) {
            if let Some(id) = modules.find_by_path(path).map(|info| info.id) {
                modules.unload(id);
                result.removed += 1;
            }
        }

        Ok(result)
    }

    /// Scan a directory recursively for .lua files, in name order.
    fn scan_directory(
        &self,
        dir: &Path,
        modules: &mut ModuleManager,
        result: &mut SyncResult,
        found_paths: &mut HashSet<String>,
    ) -> Result<()> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                result
                    .errors
                    .push((dir.display().to_string(), e.to_string()));
                return Ok(());
            }
        };

        let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.scan_directory(&path, modules, result, found_paths)?;
            } else if path.extension().is_some_and(|ext| ext == "lua") {
                if let Err(e) = self.process_script_file(&path, modules, result, found_paths) {
                    if e.is_fatal() {
                        return Err(e);
                    }
                    warn!(target: "realmscript::modules", path = %path.display(), error = %e, "script skipped");
                    result
                        .errors
                        .push((path.display().to_string(), e.to_string()));
                }
            }
        }

        Ok(())
    }

    /// Process a single script file.
    fn process_script_file(
        &self,
        path: &Path,
        modules: &mut ModuleManager,
        result: &mut SyncResult,
        found_paths: &mut HashSet<String>,
    ) -> Result<()> {
        let rel_path = path
            .strip_prefix(&self.scripts_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let content = fs::read_to_string(path)?;
        let metadata = Self::parse_metadata(&content);

        if metadata.enabled == Some(false) {
            debug!(target: "realmscript::modules", path = %rel_path, "script disabled");
            return Ok(());
        }
        found_paths.insert(rel_path.clone());

        let file_hash = ModuleManager::calculate_hash(&content);
        let existing = modules
            .find_by_path(&rel_path)
            .map(|info| (info.id, info.file_hash == file_hash));

        let origin = ModuleSource {
            name: metadata
                .name
                .unwrap_or_else(|| Self::filename_to_name(path)),
            file_path: Some(rel_path),
            description: metadata.description,
            author: metadata.author,
        };

        match existing {
            // Unchanged, skip
            Some((_, true)) => {}
            Some((id, false)) => {
                modules.reload_source(id, origin, &content)?;
                result.updated += 1;
            }
            None => {
                modules.load_source(origin, &content)?;
                result.added += 1;
            }
        }

        Ok(())
    }

    /// Parse metadata from Lua file comments.
    ///
    /// Looks for comments like:
    /// ```lua
    /// -- @name Script Name
    /// -- @description Description text
    /// -- @author Author Name
    /// -- @enabled true
    /// ```
    pub fn parse_metadata(content: &str) -> ScriptMetadata {
        let mut metadata = ScriptMetadata::default();

        for line in content.lines() {
            let line = line.trim();
            if !line.starts_with("--") {
                // Stop at first non-comment line
                if !line.is_empty() {
                    break;
                }
                continue;
            }

            let comment = line.trim_start_matches("--").trim();

            if let Some(value) = comment.strip_prefix("@name ") {
                metadata.name = Some(value.trim().to_string());
            } else if let Some(value) = comment.strip_prefix("@description ") {
                metadata.description = Some(value.trim().to_string());
            } else if let Some(value) = comment.strip_prefix("@author ") {
                metadata.author = Some(value.trim().to_string());
            } else if let Some(value) = comment.strip_prefix("@enabled ") {
                metadata.enabled = value.trim().parse().ok();
            }
        }

        metadata
    }

    /// Convert filename to a display name.
    fn filename_to_name(path: &Path) -> String {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string()
    }

    /// Get the scripts directory path.
    pub fn scripts_dir(&self) -> &Path {
        &self.scripts_dir
    }

    /// Check if the scripts directory exists.
    pub fn scripts_dir_exists(&self) -> bool {
        self.scripts_dir.exists()
    }

    /// Create the scripts directory if it doesn't exist.
    pub fn ensure_scripts_dir(&self) -> Result<()> {
        if !self.scripts_dir.exists() {
            fs::create_dir_all(&self.scripts_dir)?;
        }
        Ok(())
    }
}
