//! Ordered handler lists.

use std::cell::Cell;
use std::fmt;

use tracing::{trace, warn};

use super::kind::EventKind;
use crate::error::HandlerError;

/// Identifier of a loaded script module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(u32);

impl ModuleId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module#{}", self.0)
    }
}

/// Identifier of one handler registration, unique within its [`RegistrationIds`] allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(u64);

impl RegistrationId {
    /// Rebuild an id handed out to a script earlier.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocator for registration ids. The event hub owns the one used at runtime.
#[derive(Debug)]
pub struct RegistrationIds {
    next: Cell<u64>,
}

impl Default for RegistrationIds {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationIds {
    pub fn new() -> Self {
        Self { next: Cell::new(1) }
    }

    /// Allocate a fresh id.
    pub fn next(&self) -> RegistrationId {
        let id = self.next.get();
        self.next.set(id + 1);
        RegistrationId(id)
    }
}

/// One handler registered by a module.
#[derive(Debug, Clone)]
pub struct Registration<H> {
    pub id: RegistrationId,
    pub module: ModuleId,
    pub handler: H,
}

/// Counters for one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Handlers that ran to completion.
    pub invoked: usize,
    /// Handlers that returned an error.
    pub failed: usize,
    /// Handlers skipped because their module or their registration was gone.
    pub skipped: usize,
}

impl DispatchOutcome {
    pub fn merge(&mut self, other: DispatchOutcome) {
        self.invoked += other.invoked;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }

    /// Handlers that were called, successfully or not.
    pub fn attempted(&self) -> usize {
        self.invoked + self.failed
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Ordered list of handlers for one event kind.
///
/// Handlers run in registration order. A failing handler is logged and the remaining handlers
/// still run.
#[derive(Debug, Clone)]
pub struct EventRegistry<H> {
    kind: EventKind,
    entries: Vec<Registration<H>>,
}

impl<H> EventRegistry<H> {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Append a handler under a fresh id from `ids`.
    pub fn register(&mut self, ids: &RegistrationIds, module: ModuleId, handler: H) -> RegistrationId {
        let id = ids.next();
        self.insert(id, module, handler);
        id
    }

    /// Append a handler under an id allocated earlier.
    pub fn insert(&mut self, id: RegistrationId, module: ModuleId, handler: H) {
        self.entries.push(Registration {
            id,
            module,
            handler,
        });
    }

    /// Remove one registration. Returns whether it was present.
    pub fn unregister(&mut self, id: RegistrationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Remove every handler owned by `module`, keeping the others in order.
    pub fn unregister_module(&mut self, module: ModuleId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.module != module);
        before - self.entries.len()
    }

    pub fn owner_of(&self, id: RegistrationId) -> Option<ModuleId> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.module)
    }

    pub fn contains(&self, id: RegistrationId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn has_module(&self, module: ModuleId) -> bool {
        self.entries.iter().any(|entry| entry.module == module)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Registration<H>] {
        &self.entries
    }

    /// Invoke every handler in order.
    ///
    /// `is_live` is consulted with the owning module and registration id before each call;
    /// handlers it rejects are skipped. Errors are logged and do not stop the remaining handlers.
    pub fn dispatch<L, F>(&self, is_live: L, mut invoke: F) -> DispatchOutcome
    where
        L: Fn(ModuleId, RegistrationId) -> bool,
        F: FnMut(&H) -> Result<(), HandlerError>,
    {
        let mut outcome = DispatchOutcome::default();
        trace!(
            target: "realmscript::events",
            kind = %self.kind,
            handlers = self.entries.len(),
            "dispatch"
        );

        for entry in &self.entries {
            if !is_live(entry.module, entry.id) {
                outcome.skipped += 1;
                continue;
            }
            match invoke(&entry.handler) {
                Ok(()) => outcome.invoked += 1,
                Err(e) => {
                    outcome.failed += 1;
                    warn!(
                        target: "realmscript::events",
                        kind = %self.kind,
                        module = %entry.module,
                        registration = %entry.id,
                        error = %e,
                        "event handler failed"
                    );
                }
            }
        }

        outcome
    }
}
