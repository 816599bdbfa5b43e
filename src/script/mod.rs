//! Lua module runtime.
//!
//! Each script file becomes a module with its own sandboxed Lua state. Modules register
//! handlers through the `events` table while they load; the [`ModuleManager`] commits those
//! registrations to the bridge and removes them again on unload.

pub mod api;
pub mod engine;
pub mod loader;
pub mod marshal;
pub mod module;
pub mod types;

pub use api::EventsApi;
pub use engine::{ResourceLimits, ScriptEngine};
pub use loader::ScriptLoader;
pub use marshal::LuaCallback;
pub use module::ModuleManager;
pub use types::{ModuleInfo, ModuleSource, ScriptMetadata, SyncResult};
