//! Module lifecycle: load, unload, reload.
//!
//! Each module gets its own sandboxed Lua state. Registrations a module makes while its body runs
//! are buffered and committed to the bridge only after the body finished; a commit that hits an
//! invalid entity id rolls the whole module back.

use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info};

use super::api::EventsApi;
use super::engine::{ResourceLimits, ScriptEngine};
use super::marshal::LuaCallback;
use super::types::{ModuleInfo, ModuleSource};
use crate::bridge::ScriptBridge;
use crate::event::{Handler, ModuleId};
use crate::{RealmError, Result};

struct LoadedModule {
    info: ModuleInfo,
    // Keeps the Lua state alive for as long as the module is loaded.
    _engine: Rc<ScriptEngine>,
}

/// Owns every loaded module.
pub struct ModuleManager {
    bridge: Rc<ScriptBridge>,
    limits: ResourceLimits,
    modules: BTreeMap<ModuleId, LoadedModule>,
    next_id: u32,
}

impl ModuleManager {
    pub fn new(bridge: Rc<ScriptBridge>) -> Self {
        Self::with_limits(bridge, ResourceLimits::default())
    }

    pub fn with_limits(bridge: Rc<ScriptBridge>, limits: ResourceLimits) -> Self {
        Self {
            bridge,
            limits,
            modules: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn bridge(&self) -> &Rc<ScriptBridge> {
        &self.bridge
    }

    /// Load inline source under a display name.
    pub fn load(&mut self, name: &str, source: &str) -> Result<ModuleId> {
        self.load_source(ModuleSource::named(name), source)
    }

    /// Load a module and commit its registrations.
    pub fn load_source(&mut self, origin: ModuleSource, source: &str) -> Result<ModuleId> {
        let id = ModuleId::new(self.next_id);
        self.next_id += 1;
        self.install(id, origin, source)?;
        Ok(id)
    }

    fn install(&mut self, id: ModuleId, origin: ModuleSource, source: &str) -> Result<()> {
        let engine = Rc::new(ScriptEngine::with_limits(self.limits.clone())?);
        let api = EventsApi::new(id, origin.name.clone(), Rc::downgrade(&self.bridge));
        api.register(engine.lua())
            .map_err(|e| RealmError::Script(format!("Failed to register script API: {}", e)))?;

        let executed = engine.execute_named(&origin.name, source);
        api.close();
        let pending = api.take_pending();
        if let Err(e) = executed {
            error!(target: "realmscript::modules", module = %origin.name, error = %e, "module failed to load");
            return Err(e);
        }

        let mut committed = 0;
        for registration in pending {
            let handler: Handler = Rc::new(LuaCallback::new(
                Rc::clone(&engine),
                registration.function,
            ));
            let result = match registration.entity {
                None => self
                    .bridge
                    .insert(registration.kind, registration.id, id, handler),
                Some(entity) => self.bridge.insert_keyed(
                    registration.kind,
                    entity,
                    registration.id,
                    id,
                    handler,
                ),
            };
            if let Err(e) = result {
                let rolled_back = self.bridge.unregister_module(id);
                error!(
                    target: "realmscript::modules",
                    module = %origin.name,
                    error = %e,
                    rolled_back,
                    "module registration rejected"
                );
                return Err(e);
            }
            committed += 1;
        }

        info!(
            target: "realmscript::modules",
            module = %origin.name,
            id = %id,
            handlers = committed,
            "module loaded"
        );

        let info = ModuleInfo {
            id,
            name: origin.name,
            file_path: origin.file_path,
            description: origin.description,
            author: origin.author,
            file_hash: Self::calculate_hash(source),
            loaded_at: Utc::now(),
            registrations: committed,
        };
        self.modules.insert(
            id,
            LoadedModule {
                info,
                _engine: engine,
            },
        );
        Ok(())
    }

    /// Unload a module: its handlers are removed before its Lua state is dropped.
    ///
    /// Returns the number of handlers removed. Unloading an unknown id is a no-op.
    pub fn unload(&mut self, id: ModuleId) -> usize {
        let removed = self.bridge.unregister_module(id);
        match self.modules.remove(&id) {
            Some(module) => {
                info!(
                    target: "realmscript::modules",
                    module = %module.info.name,
                    id = %id,
                    removed,
                    "module unloaded"
                );
            }
            None => debug!(target: "realmscript::modules", id = %id, "unload of unknown module ignored"),
        }
        removed
    }

    /// Replace a module's code, keeping its id.
    ///
    /// The old code is unloaded first. If the new code fails to load the module stays unloaded.
    pub fn reload(&mut self, id: ModuleId, source: &str) -> Result<ModuleId> {
        let origin = match self.modules.get(&id) {
            Some(module) => ModuleSource {
                name: module.info.name.clone(),
                file_path: module.info.file_path.clone(),
                description: module.info.description.clone(),
                author: module.info.author.clone(),
            },
            None => return Err(RealmError::NotFound(format!("module {}", id))),
        };
        self.reload_source(id, origin, source)
    }

    /// Reload with updated metadata.
    pub fn reload_source(&mut self, id: ModuleId, origin: ModuleSource, source: &str) -> Result<ModuleId> {
        if !self.modules.contains_key(&id) {
            return Err(RealmError::NotFound(format!("module {}", id)));
        }
        self.unload(id);
        self.install(id, origin, source)?;
        Ok(id)
    }

    /// Unload every module.
    pub fn unload_all(&mut self) -> usize {
        let ids: Vec<_> = self.modules.keys().copied().collect();
        ids.into_iter().map(|id| self.unload(id)).sum()
    }

    pub fn module(&self, id: ModuleId) -> Option<&ModuleInfo> {
        self.modules.get(&id).map(|m| &m.info)
    }

    pub fn find_by_path(&self, path: &str) -> Option<&ModuleInfo> {
        self.modules
            .values()
            .map(|m| &m.info)
            .find(|info| info.file_path.as_deref() == Some(path))
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleInfo> {
        self.modules.values().map(|m| &m.info)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// SHA-256 of module source, hex encoded.
    pub fn calculate_hash(content: &str) -> String {
        let digest = Sha256::digest(content.as_bytes());
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl Drop for ModuleManager {
    fn drop(&mut self) {
        self.unload_all();
    }
}
