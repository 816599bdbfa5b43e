//! Null-safe, non-owning handles over engine objects.
//!
//! A handle wraps `Option<&'a dyn Object>`. Reads on a null handle return the type's empty value
//! and writes are logged no-ops, so a hook that fires with partial engine state never panics
//! inside a script call. The `'a` lifetime ties a handle to the hook invocation that produced it.

/// Declares a handle struct with the shared constructors.
macro_rules! entity_handle {
    ($(#[$meta:meta])* $name:ident => $object:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $name<'a> {
            object: Option<&'a dyn $object>,
        }

        impl<'a> $name<'a> {
            pub fn new(object: &'a dyn $object) -> Self {
                Self { object: Some(object) }
            }

            pub fn from_option(object: Option<&'a dyn $object>) -> Self {
                Self { object }
            }

            pub fn null() -> Self {
                Self { object: None }
            }

            pub fn is_null(&self) -> bool {
                self.object.is_none()
            }

            /// The wrapped engine object, if any.
            pub fn object(&self) -> Option<&'a dyn $object> {
                self.object
            }
        }

        impl std::fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                if self.object.is_some() {
                    write!(f, concat!(stringify!($name), "(..)"))
                } else {
                    write!(f, concat!(stringify!($name), "(null)"))
                }
            }
        }
    };
}

mod social;
mod unit;
mod world;

pub use social::{ChannelHandle, GroupHandle, GuildHandle};
pub use unit::{CreatureHandle, PlayerHandle, UnitHandle};
pub use world::{
    AuctionEntryHandle, AuctionHouseHandle, GameObjectHandle, ItemHandle, LootHandle,
    QuestHandle, SpellHandle,
};

/// Log a write attempted through a null handle.
fn null_write(handle: &'static str, method: &'static str) {
    tracing::debug!(
        target: "realmscript::api",
        "{handle}::{method} called on a null handle; ignored"
    );
}
