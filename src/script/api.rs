//! Registration API for Lua modules.
//!
//! Provides the `events` global table (handler registration) and the `log` table.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use mlua::{Function, Lua, Result as LuaResult, Table, Value};
use tracing::{debug, error, info, trace, warn};

use crate::bridge::ScriptBridge;
use crate::event::{EventKind, EventScope, ModuleId, RegistrationId};

/// A handler registered while the module body was running, not yet committed.
pub struct PendingRegistration {
    pub id: RegistrationId,
    pub kind: EventKind,
    /// Entity id for keyed kinds.
    pub entity: Option<u32>,
    pub function: Function,
}

/// Registration API builder for one module.
pub struct EventsApi {
    module: ModuleId,
    module_name: String,
    pending: Rc<RefCell<Vec<PendingRegistration>>>,
    open: Rc<Cell<bool>>,
    bridge: Weak<ScriptBridge>,
}

impl EventsApi {
    pub fn new(module: ModuleId, module_name: impl Into<String>, bridge: Weak<ScriptBridge>) -> Self {
        Self {
            module,
            module_name: module_name.into(),
            pending: Rc::new(RefCell::new(Vec::new())),
            open: Rc::new(Cell::new(true)),
            bridge,
        }
    }

    /// Stop accepting registrations. Later `events.on` calls raise a Lua error.
    pub fn close(&self) {
        self.open.set(false);
    }

    /// Drain the registrations collected so far, in call order.
    pub fn take_pending(&self) -> Vec<PendingRegistration> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    /// Register the `events` and `log` tables with the Lua environment.
    pub fn register(&self, lua: &Lua) -> LuaResult<()> {
        let events = lua.create_table()?;
        self.register_event_functions(lua, &events)?;
        lua.globals().set("events", events)?;

        let log = lua.create_table()?;
        self.register_log_functions(lua, &log)?;
        lua.globals().set("log", log)?;

        Ok(())
    }

    fn register_event_functions(&self, lua: &Lua, events: &Table) -> LuaResult<()> {
        // events.on(kind, fn) - global handler, returns registration id
        let pending = Rc::clone(&self.pending);
        let open = Rc::clone(&self.open);
        let bridge = self.bridge.clone();
        let on_fn = lua.create_function(move |_, (name, function): (String, Function)| {
            ensure_open(&open, "events.on")?;
            let kind = lookup_kind(&name)?;
            if kind.scope() != EventScope::Global {
                return Err(mlua::Error::RuntimeError(format!(
                    "events.on: {name} is entity-scoped, use events.on_id"
                )));
            }
            let id = allocate(&bridge)?;
            pending.borrow_mut().push(PendingRegistration {
                id,
                kind,
                entity: None,
                function,
            });
            Ok(id.get())
        })?;
        events.set("on", on_fn)?;

        // events.on_id(kind, entity, fn) - entity-keyed handler
        let pending = Rc::clone(&self.pending);
        let open = Rc::clone(&self.open);
        let bridge = self.bridge.clone();
        let on_id_fn = lua.create_function(
            move |_, (name, entity, function): (String, u32, Function)| {
                ensure_open(&open, "events.on_id")?;
                let kind = lookup_kind(&name)?;
                if kind.scope() == EventScope::Global {
                    return Err(mlua::Error::RuntimeError(format!(
                        "events.on_id: {name} is global, use events.on"
                    )));
                }
                let id = allocate(&bridge)?;
                pending.borrow_mut().push(PendingRegistration {
                    id,
                    kind,
                    entity: Some(entity),
                    function,
                });
                Ok(id.get())
            },
        )?;
        events.set("on_id", on_id_fn)?;

        // events.off(id) - remove one of this module's registrations
        let pending = Rc::clone(&self.pending);
        let bridge = self.bridge.clone();
        let module = self.module;
        let off_fn = lua.create_function(move |_, raw: u64| {
            let id = RegistrationId::from_raw(raw);
            {
                let mut pending = pending.borrow_mut();
                if let Some(index) = pending.iter().position(|p| p.id == id) {
                    pending.remove(index);
                    return Ok(true);
                }
            }
            let Some(bridge) = bridge.upgrade() else {
                return Ok(false);
            };
            if bridge.owner_of(id) != Some(module) {
                return Ok(false);
            }
            Ok(bridge.unregister(id))
        })?;
        events.set("off", off_fn)?;

        // events.exists(kind) - whether the server knows an event kind
        let exists_fn =
            lua.create_function(|_, name: String| Ok(EventKind::from_name(&name).is_some()))?;
        events.set("exists", exists_fn)?;

        Ok(())
    }

    fn register_log_functions(&self, lua: &Lua, log: &Table) -> LuaResult<()> {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let module = self.module_name.clone();
            let log_fn = lua.create_function(move |_, text: Value| {
                script_log(level, &module, &value_to_string(&text));
                Ok(())
            })?;
            log.set(level, log_fn)?;
        }
        Ok(())
    }
}

fn ensure_open(open: &Cell<bool>, function: &str) -> LuaResult<()> {
    if open.get() {
        Ok(())
    } else {
        Err(mlua::Error::RuntimeError(format!(
            "{function}: handlers can only be registered while the module loads"
        )))
    }
}

fn allocate(bridge: &Weak<ScriptBridge>) -> LuaResult<RegistrationId> {
    bridge
        .upgrade()
        .map(|bridge| bridge.next_id())
        .ok_or_else(|| mlua::Error::RuntimeError("script bridge has shut down".to_string()))
}

fn lookup_kind(name: &str) -> LuaResult<EventKind> {
    EventKind::from_name(name)
        .ok_or_else(|| mlua::Error::RuntimeError(format!("unknown event kind '{name}'")))
}

fn script_log(level: &str, module: &str, text: &str) {
    match level {
        "trace" => trace!(target: "realmscript::script", module, "{text}"),
        "debug" => debug!(target: "realmscript::script", module, "{text}"),
        "info" => info!(target: "realmscript::script", module, "{text}"),
        "warn" => warn!(target: "realmscript::script", module, "{text}"),
        _ => error!(target: "realmscript::script", module, "{text}"),
    }
}

/// Convert a Lua Value to a string for output.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.to_str().map(|s| s.to_string()).unwrap_or_default(),
        Value::Table(_) => "[table]".to_string(),
        Value::Function(_) => "[function]".to_string(),
        Value::Thread(_) => "[thread]".to_string(),
        Value::UserData(_) => "[userdata]".to_string(),
        Value::LightUserData(_) => "[lightuserdata]".to_string(),
        Value::Error(e) => format!("[error: {}]", e),
        _ => "[unknown]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TemplateTables;
    use crate::script::ScriptEngine;

    fn test_bridge() -> Rc<ScriptBridge> {
        Rc::new(ScriptBridge::new(Rc::new(TemplateTables::new())))
    }

    fn create_test_engine_with_api(bridge: &Rc<ScriptBridge>) -> (ScriptEngine, EventsApi) {
        let engine = ScriptEngine::new().unwrap();
        let api = EventsApi::new(ModuleId::new(1), "test", Rc::downgrade(bridge));
        api.register(engine.lua()).unwrap();
        (engine, api)
    }

    #[test]
    fn test_events_on_collects_pending() {
        let bridge = test_bridge();
        let (engine, api) = create_test_engine_with_api(&bridge);

        engine
            .execute(
                r#"
                first = events.on("PlayerOnLogin", function(player, first_login) end)
                second = events.on_id("SpellOnCast", 133, function(spell) end)
            "#,
            )
            .unwrap();

        let pending = api.take_pending();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].kind, EventKind::PlayerOnLogin);
        assert_eq!(pending[0].entity, None);
        assert_eq!(pending[1].kind, EventKind::SpellOnCast);
        assert_eq!(pending[1].entity, Some(133));

        let first: u64 = engine.get_global("first").unwrap();
        assert_eq!(first, pending[0].id.get());
        assert!(api.take_pending().is_empty());
    }

    #[test]
    fn test_events_on_unknown_kind() {
        let bridge = test_bridge();
        let (engine, api) = create_test_engine_with_api(&bridge);
        let result = engine.execute(r#"events.on("PlayerOnTeleport", function() end)"#);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("unknown event kind"));
        assert!(api.take_pending().is_empty());
    }

    #[test]
    fn test_events_on_wrong_scope() {
        let bridge = test_bridge();
        let (engine, _api) = create_test_engine_with_api(&bridge);
        assert!(engine
            .execute(r#"events.on("SpellOnCast", function() end)"#)
            .is_err());
        assert!(engine
            .execute(r#"events.on_id("WorldOnUpdate", 1, function() end)"#)
            .is_err());
    }

    #[test]
    fn test_events_closed_after_load() {
        let bridge = test_bridge();
        let (engine, api) = create_test_engine_with_api(&bridge);
        engine
            .execute(r#"function late() events.on("WorldOnUpdate", function() end) end"#)
            .unwrap();
        api.close();

        let result = engine.execute("late()");
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("only be registered while the module loads"));
        assert!(api.take_pending().is_empty());
    }

    #[test]
    fn test_events_off_pending() {
        let bridge = test_bridge();
        let (engine, api) = create_test_engine_with_api(&bridge);
        engine
            .execute(
                r#"
                local id = events.on("WorldOnStartup", function() end)
                removed = events.off(id)
                removed_again = events.off(id)
            "#,
            )
            .unwrap();

        assert!(engine.get_global::<bool>("removed").unwrap());
        assert!(!engine.get_global::<bool>("removed_again").unwrap());
        assert!(api.take_pending().is_empty());
    }

    #[test]
    fn test_events_on_after_bridge_shutdown() {
        let bridge = test_bridge();
        let (engine, api) = create_test_engine_with_api(&bridge);
        drop(bridge);

        let result = engine.execute(r#"events.on("WorldOnStartup", function() end)"#);
        assert!(result.unwrap_err().to_string().contains("shut down"));
        assert!(api.take_pending().is_empty());
    }

    #[test]
    fn test_events_off_only_touches_own_registrations() {
        let bridge = test_bridge();
        let foreign = bridge
            .register(
                EventKind::WorldOnStartup,
                ModuleId::new(9),
                crate::event::native(|_| Ok(())),
            )
            .unwrap();

        let engine = ScriptEngine::new().unwrap();
        let api = EventsApi::new(ModuleId::new(1), "test", Rc::downgrade(&bridge));
        api.register(engine.lua()).unwrap();
        engine.set_global("foreign", foreign.get()).unwrap();
        engine.execute("removed = events.off(foreign)").unwrap();

        assert!(!engine.get_global::<bool>("removed").unwrap());
        assert_eq!(bridge.handler_count(), 1);
    }

    #[test]
    fn test_events_exists() {
        let bridge = test_bridge();
        let (engine, _api) = create_test_engine_with_api(&bridge);
        engine
            .execute(
                r#"
                known = events.exists("GuildOnCreate")
                unknown = events.exists("GuildOnExplode")
            "#,
            )
            .unwrap();
        assert!(engine.get_global::<bool>("known").unwrap());
        assert!(!engine.get_global::<bool>("unknown").unwrap());
    }

    #[test]
    fn test_log_functions() {
        let bridge = test_bridge();
        let (engine, _api) = create_test_engine_with_api(&bridge);
        engine
            .execute(
                r#"
                log.info("hello")
                log.warn(42)
                log.debug(nil)
            "#,
            )
            .unwrap();
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&Value::Nil), "nil");
        assert_eq!(value_to_string(&Value::Integer(7)), "7");
        assert_eq!(value_to_string(&Value::Boolean(true)), "true");
    }
}
