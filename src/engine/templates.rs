//! Authoritative template tables.
//!
//! The engine owns the real tables (spell store, creature templates, ...). The bridge only asks
//! whether an id exists, once, when an entity-keyed bundle is first attached.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use super::category::EntityCategory;
use crate::{RealmError, Result};

/// Read-only lookup into the engine's template tables.
pub trait TemplateStore {
    /// Whether `id` names an existing definition of `category`.
    fn contains(&self, category: EntityCategory, id: u32) -> bool;
}

/// In-memory template id tables, usually loaded from a TOML export of the game data.
///
/// The file maps table keys to id lists:
///
/// ```toml
/// spell = [133, 116, 2136]
/// creature = [299, 6]
/// quest = [7, 33]
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateTables {
    tables: HashMap<EntityCategory, HashSet<u32>>,
}

impl TemplateTables {
    /// Create empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load tables from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse tables from a TOML string.
    ///
    /// Unknown table keys are rejected so a typo cannot silently empty a table.
    pub fn parse(s: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<u32>> =
            toml::from_str(s).map_err(|e| RealmError::Template(format!("parse error: {e}")))?;

        let mut tables = Self::new();
        for (key, ids) in raw {
            let category = EntityCategory::ALL
                .iter()
                .copied()
                .find(|c| c.table_key() == key)
                .ok_or_else(|| RealmError::Template(format!("unknown template table '{key}'")))?;
            tables.extend(category, ids);
        }
        Ok(tables)
    }

    /// Add ids to a category's table.
    pub fn extend<I: IntoIterator<Item = u32>>(&mut self, category: EntityCategory, ids: I) {
        self.tables.entry(category).or_default().extend(ids);
    }

    /// Builder form of [`TemplateTables::extend`].
    pub fn with<I: IntoIterator<Item = u32>>(mut self, category: EntityCategory, ids: I) -> Self {
        self.extend(category, ids);
        self
    }

    /// Number of ids known for a category.
    pub fn count(&self, category: EntityCategory) -> usize {
        self.tables.get(&category).map_or(0, HashSet::len)
    }
}

impl TemplateStore for TemplateTables {
    fn contains(&self, category: EntityCategory, id: u32) -> bool {
        self.tables
            .get(&category)
            .is_some_and(|table| table.contains(&id))
    }
}
