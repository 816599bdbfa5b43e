//! Which registries each module has touched.

use std::collections::{BTreeSet, HashMap};

use super::kind::EventKind;
use super::registry::ModuleId;
use crate::engine::EntityCategory;

/// A registry, or family of keyed registries, a module registered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegistrySlot {
    Global(EventKind),
    Keyed(EntityCategory),
}

/// Per-module record of touched registries, so unloading only visits those.
#[derive(Debug, Default)]
pub struct ModuleLedger {
    slots: HashMap<ModuleId, BTreeSet<RegistrySlot>>,
}

impl ModuleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, module: ModuleId, slot: RegistrySlot) {
        self.slots.entry(module).or_default().insert(slot);
    }

    pub fn slots(&self, module: ModuleId) -> Vec<RegistrySlot> {
        self.slots
            .get(&module)
            .map(|slots| slots.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Forget a module and return what it touched.
    pub fn take(&mut self, module: ModuleId) -> BTreeSet<RegistrySlot> {
        self.slots.remove(&module).unwrap_or_default()
    }

    pub fn is_tracked(&self, module: ModuleId) -> bool {
        self.slots.contains_key(&module)
    }

    pub fn modules(&self) -> Vec<ModuleId> {
        let mut modules: Vec<_> = self.slots.keys().copied().collect();
        modules.sort();
        modules
    }
}
