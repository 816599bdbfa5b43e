//! Script bridge.
//!
//! The single owner of all registries. Native hook shims call [`ScriptBridge::fire`] and
//! [`ScriptBridge::fire_keyed`]; module loading registers and unregisters through it.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::engine::{EntityCategory, TemplateStore};
use crate::event::{
    DispatchOutcome, EventArgs, EventBundle, EventHub, EventKind, EventRegistry, Handler,
    ModuleId, RegistrationId,
};
use crate::Result;

/// Registries plus the set of modules whose handlers may still run.
pub struct ScriptBridge {
    hub: RefCell<EventHub<Handler>>,
    attached: RefCell<BTreeSet<ModuleId>>,
    templates: Rc<dyn TemplateStore>,
}

impl ScriptBridge {
    /// Create a bridge with every registry initialized and empty.
    pub fn new(templates: Rc<dyn TemplateStore>) -> Self {
        Self {
            hub: RefCell::new(EventHub::new()),
            attached: RefCell::new(BTreeSet::new()),
            templates,
        }
    }

    pub fn templates(&self) -> &dyn TemplateStore {
        self.templates.as_ref()
    }

    /// Whether `module` currently owns live registrations.
    pub fn is_attached(&self, module: ModuleId) -> bool {
        self.attached.borrow().contains(&module)
    }

    fn attach(&self, module: ModuleId) {
        self.attached.borrow_mut().insert(module);
    }

    /// Allocate a registration id without registering anything yet.
    pub fn next_id(&self) -> RegistrationId {
        self.hub.borrow().next_id()
    }

    pub fn register(&self, kind: EventKind, module: ModuleId, handler: Handler) -> Result<RegistrationId> {
        let id = self.next_id();
        self.insert(kind, id, module, handler)?;
        Ok(id)
    }

    /// Register a global handler under an id allocated earlier.
    pub fn insert(
        &self,
        kind: EventKind,
        id: RegistrationId,
        module: ModuleId,
        handler: Handler,
    ) -> Result<()> {
        self.hub.borrow_mut().insert(kind, id, module, handler)?;
        self.attach(module);
        Ok(())
    }

    pub fn register_keyed(
        &self,
        kind: EventKind,
        entity: u32,
        module: ModuleId,
        handler: Handler,
    ) -> Result<RegistrationId> {
        let id = self.next_id();
        self.insert_keyed(kind, entity, id, module, handler)?;
        Ok(id)
    }

    /// Register a keyed handler under an id allocated earlier.
    pub fn insert_keyed(
        &self,
        kind: EventKind,
        entity: u32,
        id: RegistrationId,
        module: ModuleId,
        handler: Handler,
    ) -> Result<()> {
        self.hub
            .borrow_mut()
            .insert_keyed(kind, entity, id, module, handler, self.templates.as_ref())?;
        self.attach(module);
        Ok(())
    }

    /// Attach a prepared bundle to an entity, replacing any bundle already there.
    pub fn add_bundle(
        &self,
        category: EntityCategory,
        entity: u32,
        bundle: EventBundle<Handler>,
    ) -> Result<()> {
        let modules = bundle.modules();
        self.hub
            .borrow_mut()
            .add_bundle(category, entity, bundle, self.templates.as_ref())?;
        for module in modules {
            self.attach(module);
        }
        Ok(())
    }

    pub fn remove_bundle(&self, category: EntityCategory, entity: u32) -> bool {
        self.hub.borrow_mut().remove_bundle(category, entity).is_some()
    }

    pub fn unregister(&self, id: RegistrationId) -> bool {
        self.hub.borrow_mut().unregister(id)
    }

    pub fn owner_of(&self, id: RegistrationId) -> Option<ModuleId> {
        self.hub.borrow().owner_of(id)
    }

    /// Remove every handler owned by `module` and stop dispatching to it.
    pub fn unregister_module(&self, module: ModuleId) -> usize {
        let removed = self.hub.borrow_mut().unregister_module(module);
        self.attached.borrow_mut().remove(&module);
        debug!(
            target: "realmscript::events",
            module = %module,
            removed,
            "unregistered module handlers"
        );
        removed
    }

    /// Dispatch a global event.
    pub fn fire(&self, args: &mut EventArgs<'_>) -> DispatchOutcome {
        let kind = args.kind();
        let snapshot = {
            let hub = self.hub.borrow();
            match hub.global(kind) {
                Some(registry) if !registry.is_empty() => registry.clone(),
                Some(_) => return DispatchOutcome::default(),
                None => {
                    warn!(target: "realmscript::events", kind = %kind, "fire called with an entity-keyed kind");
                    return DispatchOutcome::default();
                }
            }
        };
        self.run(&snapshot, args, |hub| hub.global(kind))
    }

    /// Dispatch a keyed event to the bundle of `entity`.
    ///
    /// Returns `None` when no bundle or no handler list exists for that entity and kind.
    pub fn fire_keyed(&self, entity: u32, args: &mut EventArgs<'_>) -> Option<DispatchOutcome> {
        let kind = args.kind();
        let snapshot = self.hub.borrow().keyed_registry(kind, entity)?.clone();
        Some(self.run(&snapshot, args, |hub| hub.keyed_registry(kind, entity)))
    }

    // Handlers run against a snapshot with no borrow held, so they may unregister or unload.
    // Before each call the entry is looked up again in `current`, the live registry, so a
    // registration removed earlier in the same dispatch is skipped.
    fn run<C>(
        &self,
        registry: &EventRegistry<Handler>,
        args: &mut EventArgs<'_>,
        current: C,
    ) -> DispatchOutcome
    where
        C: Fn(&EventHub<Handler>) -> Option<&EventRegistry<Handler>>,
    {
        registry.dispatch(
            |module, id| {
                self.is_attached(module)
                    && current(&*self.hub.borrow()).is_some_and(|live| live.contains(id))
            },
            |handler| handler.invoke(args),
        )
    }

    /// Handlers currently registered across all registries.
    pub fn handler_count(&self) -> usize {
        self.hub.borrow().handler_count()
    }

    /// Read-only access to the registries.
    pub fn with_hub<R>(&self, f: impl FnOnce(&EventHub<Handler>) -> R) -> R {
        f(&self.hub.borrow())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::engine::TemplateTables;
    use crate::error::HandlerError;
    use crate::event::{native, Arg, MutableCell};
    use crate::RealmError;

    fn bridge() -> Rc<ScriptBridge> {
        let templates = TemplateTables::new().with(EntityCategory::Quest, [7]);
        Rc::new(ScriptBridge::new(Rc::new(templates)))
    }

    #[test]
    fn test_fire_mutates_cell_through_all_handlers() {
        let bridge = bridge();
        let module = ModuleId::new(1);
        bridge
            .register(
                EventKind::PlayerOnMoneyChanged,
                module,
                native(|args| {
                    if let Some(cell) = args.cell_i32(1) {
                        cell.set(cell.get() * 2);
                    }
                    Ok(())
                }),
            )
            .unwrap();
        bridge
            .register(
                EventKind::PlayerOnMoneyChanged,
                module,
                native(|args| {
                    if let Some(cell) = args.cell_i32(1) {
                        cell.set(cell.get() + 1);
                    }
                    Ok(())
                }),
            )
            .unwrap();

        let mut amount = 10;
        let mut args = EventArgs::new(
            EventKind::PlayerOnMoneyChanged,
            vec![
                Arg::Player(crate::handle::PlayerHandle::null()),
                Arg::MutI32(MutableCell::new(&mut amount)),
            ],
        );
        let outcome = bridge.fire(&mut args);
        drop(args);

        assert_eq!(outcome.invoked, 2);
        assert_eq!(amount, 21);
    }

    #[test]
    fn test_failing_handler_is_isolated() {
        let bridge = bridge();
        let calls = Rc::new(Cell::new(0));
        let module = ModuleId::new(1);

        bridge
            .register(
                EventKind::WorldOnStartup,
                module,
                native(|_| Err(HandlerError::Failed("broken".to_string()))),
            )
            .unwrap();
        let counter = Rc::clone(&calls);
        bridge
            .register(
                EventKind::WorldOnStartup,
                module,
                native(move |_| {
                    counter.set(counter.get() + 1);
                    Ok(())
                }),
            )
            .unwrap();

        let outcome = bridge.fire(&mut EventArgs::new(EventKind::WorldOnStartup, vec![]));
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.invoked, 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_fire_keyed_absent_entity() {
        let bridge = bridge();
        let mut args = EventArgs::new(EventKind::GameEventOnStart, vec![Arg::UInt(5)]);
        assert!(bridge.fire_keyed(5, &mut args).is_none());
    }

    #[test]
    fn test_fire_keyed_reaches_only_that_entity() {
        let bridge = bridge();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        bridge
            .register_keyed(
                EventKind::GameEventOnStart,
                5,
                ModuleId::new(1),
                native(move |args| {
                    log.borrow_mut().push(args.int(0).unwrap_or_default());
                    Ok(())
                }),
            )
            .unwrap();

        let mut other = EventArgs::new(EventKind::GameEventOnStart, vec![Arg::UInt(6)]);
        assert!(bridge.fire_keyed(6, &mut other).is_none());

        let mut args = EventArgs::new(EventKind::GameEventOnStart, vec![Arg::UInt(5)]);
        let outcome = bridge.fire_keyed(5, &mut args).unwrap();
        assert_eq!(outcome.invoked, 1);
        assert_eq!(*seen.borrow(), vec![5]);
    }

    #[test]
    fn test_invalid_keyed_registration() {
        let bridge = bridge();
        let module = ModuleId::new(2);
        let result = bridge.register_keyed(EventKind::QuestOnAccept, 8, module, native(|_| Ok(())));
        assert!(matches!(result, Err(RealmError::InvalidEntity { id: 8, .. })));
        assert!(!bridge.is_attached(module));
    }

    #[test]
    fn test_unregister_module_mid_dispatch_skips_remaining_handlers() {
        let bridge = bridge();
        let a = ModuleId::new(1);
        let b = ModuleId::new(2);
        let ran = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&bridge);
        let log = Rc::clone(&ran);
        bridge
            .register(
                EventKind::WorldOnShutdown,
                a,
                native(move |_| {
                    log.borrow_mut().push("a");
                    if let Some(bridge) = weak.upgrade() {
                        bridge.unregister_module(ModuleId::new(2));
                    }
                    Ok(())
                }),
            )
            .unwrap();
        let log = Rc::clone(&ran);
        bridge
            .register(
                EventKind::WorldOnShutdown,
                b,
                native(move |_| {
                    log.borrow_mut().push("b");
                    Ok(())
                }),
            )
            .unwrap();

        let outcome = bridge.fire(&mut EventArgs::new(EventKind::WorldOnShutdown, vec![]));
        assert_eq!(*ran.borrow(), vec!["a"]);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(bridge.handler_count(), 1);
        assert!(!bridge.is_attached(b));
    }

    #[test]
    fn test_unregister_mid_dispatch_skips_that_registration() {
        let bridge = bridge();
        let module = ModuleId::new(1);
        let ran = Rc::new(RefCell::new(Vec::new()));
        let target = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&bridge);
        let log = Rc::clone(&ran);
        let victim = Rc::clone(&target);
        bridge
            .register(
                EventKind::WorldOnStartup,
                module,
                native(move |_| {
                    log.borrow_mut().push("first");
                    if let (Some(bridge), Some(id)) = (weak.upgrade(), victim.get()) {
                        bridge.unregister(id);
                    }
                    Ok(())
                }),
            )
            .unwrap();
        let log = Rc::clone(&ran);
        let second = bridge
            .register(
                EventKind::WorldOnStartup,
                module,
                native(move |_| {
                    log.borrow_mut().push("second");
                    Ok(())
                }),
            )
            .unwrap();
        target.set(Some(second));

        let outcome = bridge.fire(&mut EventArgs::new(EventKind::WorldOnStartup, vec![]));
        assert_eq!(*ran.borrow(), vec!["first"]);
        assert_eq!(outcome.invoked, 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(bridge.handler_count(), 1);
        assert!(bridge.is_attached(module));
    }

    #[test]
    fn test_keyed_unregister_mid_dispatch() {
        let bridge = bridge();
        let module = ModuleId::new(1);
        let ran = Rc::new(Cell::new(0));
        let target = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&bridge);
        let victim = Rc::clone(&target);
        bridge
            .register_keyed(
                EventKind::GameEventOnStart,
                5,
                module,
                native(move |_| {
                    if let (Some(bridge), Some(id)) = (weak.upgrade(), victim.get()) {
                        bridge.unregister(id);
                    }
                    Ok(())
                }),
            )
            .unwrap();
        let counter = Rc::clone(&ran);
        let second = bridge
            .register_keyed(
                EventKind::GameEventOnStart,
                5,
                module,
                native(move |_| {
                    counter.set(counter.get() + 1);
                    Ok(())
                }),
            )
            .unwrap();
        target.set(Some(second));

        let mut args = EventArgs::new(EventKind::GameEventOnStart, vec![Arg::UInt(5)]);
        let outcome = bridge.fire_keyed(5, &mut args).unwrap();
        assert_eq!(ran.get(), 0);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_huge_unchecked_id_registers_and_fires() {
        let bridge = bridge();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        bridge
            .register_keyed(
                EventKind::GameEventOnStart,
                u32::MAX,
                ModuleId::new(1),
                native(move |_| {
                    counter.set(counter.get() + 1);
                    Ok(())
                }),
            )
            .unwrap();

        let raw = u64::from(u32::MAX);
        let mut args = EventArgs::new(EventKind::GameEventOnStart, vec![Arg::UInt(raw)]);
        assert!(bridge.fire_keyed(u32::MAX, &mut args).is_some());
        assert_eq!(calls.get(), 1);
        assert!(bridge.with_hub(|hub| hub
            .keyed(EntityCategory::GameEvent)
            .is_some_and(|map| map.slot_count() == 1)));
    }
}
