//! realmscript - Lua scripting bridge for an MMO world server.
//!
//! The world server calls hook traits; shims turn each call into an event, and the bridge
//! dispatches it to handlers registered by script modules or by native Rust code.

pub mod bridge;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod handle;
pub mod logging;
pub mod script;
pub mod shims;

pub use bridge::ScriptBridge;
pub use config::Config;
pub use engine::{EntityCategory, HookHost, TemplateStore, TemplateTables};
pub use error::{HandlerError, RealmError, Result};
pub use event::{native, EventArgs, EventKind, Handler, ModuleId, RegistrationId};
pub use script::{ModuleManager, ScriptLoader};
