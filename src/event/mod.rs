//! Event registries.
//!
//! Global kinds have one ordered handler list each. Entity-keyed kinds are grouped into a
//! bundle per entity id, stored in one map per [`EntityCategory`](crate::engine::EntityCategory).
//! [`EventHub`] owns all of them and tracks which module registered what.

mod args;
mod handler;
mod hub;
mod keyed;
mod kind;
mod lifecycle;
mod registry;

pub use args::{Arg, ArgType, EventArgs, MutableCell};
pub use handler::{native, Handler, ScriptCallback};
pub use hub::EventHub;
pub use keyed::{EntityEventMap, EventBundle, MAX_DENSE_ID};
pub use kind::{EventKind, EventScope};
pub use lifecycle::{ModuleLedger, RegistrySlot};
pub use registry::{
    DispatchOutcome, EventRegistry, ModuleId, Registration, RegistrationId, RegistrationIds,
};
