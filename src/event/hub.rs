//! The complete set of registries.

use std::collections::BTreeMap;

use super::keyed::{EntityEventMap, EventBundle};
use super::kind::{EventKind, EventScope};
use super::lifecycle::{ModuleLedger, RegistrySlot};
use super::registry::{EventRegistry, ModuleId, RegistrationId, RegistrationIds};
use crate::engine::{EntityCategory, TemplateStore};
use crate::{RealmError, Result};

/// Every global registry and every entity-keyed map, plus the module ledger and the
/// registration id allocator.
#[derive(Debug)]
pub struct EventHub<H> {
    global: BTreeMap<EventKind, EventRegistry<H>>,
    keyed: BTreeMap<EntityCategory, EntityEventMap<H>>,
    ledger: ModuleLedger,
    ids: RegistrationIds,
}

impl<H> Default for EventHub<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> EventHub<H> {
    /// Initialize all registries and maps, empty.
    pub fn new() -> Self {
        let global = EventKind::ALL
            .iter()
            .filter(|kind| kind.is_global())
            .map(|kind| (*kind, EventRegistry::new(*kind)))
            .collect();
        let keyed = EntityCategory::ALL
            .iter()
            .map(|category| (*category, EntityEventMap::new(*category)))
            .collect();

        Self {
            global,
            keyed,
            ledger: ModuleLedger::new(),
            ids: RegistrationIds::new(),
        }
    }

    /// Allocate a registration id for a later [`insert`](Self::insert) or
    /// [`insert_keyed`](Self::insert_keyed).
    pub fn next_id(&self) -> RegistrationId {
        self.ids.next()
    }

    pub fn ids(&self) -> &RegistrationIds {
        &self.ids
    }

    fn global_mut(&mut self, kind: EventKind) -> Result<&mut EventRegistry<H>> {
        self.global.get_mut(&kind).ok_or_else(|| {
            RealmError::Registration(format!("{kind} is entity-scoped; register it with an id"))
        })
    }

    fn keyed_mut(&mut self, kind: EventKind) -> Result<&mut EntityEventMap<H>> {
        match kind.scope() {
            EventScope::Keyed(category) => self
                .keyed
                .get_mut(&category)
                .ok_or_else(|| RealmError::NotFound(format!("{category} event map"))),
            EventScope::Global => Err(RealmError::Registration(format!(
                "{kind} is global; it takes no entity id"
            ))),
        }
    }

    pub fn register(&mut self, kind: EventKind, module: ModuleId, handler: H) -> Result<RegistrationId> {
        let id = self.next_id();
        self.insert(kind, id, module, handler)?;
        Ok(id)
    }

    /// Register a global handler under an id allocated earlier.
    pub fn insert(
        &mut self,
        kind: EventKind,
        id: RegistrationId,
        module: ModuleId,
        handler: H,
    ) -> Result<()> {
        self.global_mut(kind)?.insert(id, module, handler);
        self.ledger.track(module, RegistrySlot::Global(kind));
        Ok(())
    }

    pub fn register_keyed(
        &mut self,
        kind: EventKind,
        entity: u32,
        module: ModuleId,
        handler: H,
        templates: &dyn TemplateStore,
    ) -> Result<RegistrationId> {
        let id = self.next_id();
        self.insert_keyed(kind, entity, id, module, handler, templates)?;
        Ok(id)
    }

    /// Register a keyed handler under an id allocated earlier.
    ///
    /// The entity's bundle is attached on first use, which is when its id is validated.
    pub fn insert_keyed(
        &mut self,
        kind: EventKind,
        entity: u32,
        id: RegistrationId,
        module: ModuleId,
        handler: H,
        templates: &dyn TemplateStore,
    ) -> Result<()> {
        let map = self.keyed_mut(kind)?;
        let category = map.category();
        map.entry(entity, templates)?
            .insert(kind, id, module, handler);
        self.ledger.track(module, RegistrySlot::Keyed(category));
        Ok(())
    }

    /// Attach a prepared bundle to an entity, replacing any existing one.
    pub fn add_bundle(
        &mut self,
        category: EntityCategory,
        entity: u32,
        bundle: EventBundle<H>,
        templates: &dyn TemplateStore,
    ) -> Result<()> {
        let modules = bundle.modules();
        let map = self
            .keyed
            .get_mut(&category)
            .ok_or_else(|| RealmError::NotFound(format!("{category} event map")))?;
        map.add(entity, bundle, templates)?;
        for module in modules {
            self.ledger.track(module, RegistrySlot::Keyed(category));
        }
        Ok(())
    }

    pub fn remove_bundle(&mut self, category: EntityCategory, entity: u32) -> Option<EventBundle<H>> {
        self.keyed.get_mut(&category)?.remove(entity)
    }

    /// Remove a single registration, wherever it lives.
    pub fn unregister(&mut self, id: RegistrationId) -> bool {
        self.global.values_mut().any(|registry| registry.unregister(id))
            || self.keyed.values_mut().any(|map| map.unregister(id))
    }

    pub fn owner_of(&self, id: RegistrationId) -> Option<ModuleId> {
        self.global
            .values()
            .find_map(|registry| registry.owner_of(id))
            .or_else(|| self.keyed.values().find_map(|map| map.owner_of(id)))
    }

    /// Remove every handler owned by `module`. Calling it twice is harmless.
    pub fn unregister_module(&mut self, module: ModuleId) -> usize {
        let mut removed = 0;
        for slot in self.ledger.take(module) {
            removed += match slot {
                RegistrySlot::Global(kind) => self
                    .global
                    .get_mut(&kind)
                    .map_or(0, |registry| registry.unregister_module(module)),
                RegistrySlot::Keyed(category) => self
                    .keyed
                    .get_mut(&category)
                    .map_or(0, |map| map.unregister_module(module)),
            };
        }
        removed
    }

    pub fn global(&self, kind: EventKind) -> Option<&EventRegistry<H>> {
        self.global.get(&kind)
    }

    pub fn keyed(&self, category: EntityCategory) -> Option<&EntityEventMap<H>> {
        self.keyed.get(&category)
    }

    /// Registry for a keyed kind on one entity, if the entity has handlers for it.
    pub fn keyed_registry(&self, kind: EventKind, entity: u32) -> Option<&EventRegistry<H>> {
        self.keyed(kind.category()?)?.get(entity)?.registry(kind)
    }

    pub fn handler_count(&self) -> usize {
        self.global.values().map(EventRegistry::len).sum::<usize>()
            + self.keyed.values().map(EntityEventMap::handler_count).sum::<usize>()
    }

    pub fn ledger(&self) -> &ModuleLedger {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TemplateTables;

    fn templates() -> TemplateTables {
        TemplateTables::new()
            .with(EntityCategory::Spell, [133])
            .with(EntityCategory::Quest, [7])
    }

    #[test]
    fn test_new_initializes_every_registry() {
        let hub: EventHub<()> = EventHub::new();
        for kind in EventKind::ALL.iter().filter(|k| k.is_global()) {
            assert!(hub.global(*kind).is_some_and(EventRegistry::is_empty));
        }
        for category in EntityCategory::ALL {
            assert!(hub.keyed(category).is_some_and(EntityEventMap::is_empty));
        }
        assert_eq!(hub.handler_count(), 0);
    }

    #[test]
    fn test_register_rejects_wrong_scope() {
        let mut hub = EventHub::new();
        let module = ModuleId::new(1);
        assert!(matches!(
            hub.register(EventKind::SpellOnCast, module, ()),
            Err(RealmError::Registration(_))
        ));
        assert!(matches!(
            hub.register_keyed(EventKind::WorldOnUpdate, 1, module, (), &templates()),
            Err(RealmError::Registration(_))
        ));
    }

    #[test]
    fn test_invalid_keyed_registration_is_fatal_and_clean() {
        let mut hub = EventHub::new();
        let err = hub
            .register_keyed(EventKind::SpellOnCast, 99999, ModuleId::new(1), (), &templates())
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(hub.handler_count(), 0);
        assert!(!hub.ledger().is_tracked(ModuleId::new(1)));
    }

    #[test]
    fn test_unregister_module_across_scopes() {
        let mut hub = EventHub::new();
        let a = ModuleId::new(1);
        let b = ModuleId::new(2);
        let t = templates();

        hub.register(EventKind::WorldOnUpdate, a, "a-update").unwrap();
        hub.register(EventKind::WorldOnUpdate, b, "b-update").unwrap();
        hub.register_keyed(EventKind::SpellOnCast, 133, a, "a-cast", &t).unwrap();
        hub.register_keyed(EventKind::QuestOnAccept, 7, b, "b-accept", &t).unwrap();

        assert_eq!(hub.unregister_module(a), 2);
        assert_eq!(hub.handler_count(), 2);
        assert!(hub.keyed_registry(EventKind::SpellOnCast, 133).is_none());
        let left: Vec<_> = hub
            .global(EventKind::WorldOnUpdate)
            .unwrap()
            .entries()
            .iter()
            .map(|e| e.handler)
            .collect();
        assert_eq!(left, vec!["b-update"]);

        assert_eq!(hub.unregister_module(a), 0);
    }

    #[test]
    fn test_unregister_by_id() {
        let mut hub = EventHub::new();
        let module = ModuleId::new(1);
        let global = hub.register(EventKind::PlayerOnLogin, module, ()).unwrap();
        let keyed = hub
            .register_keyed(EventKind::GameEventOnStart, 12, module, (), &templates())
            .unwrap();

        assert_eq!(hub.owner_of(keyed), Some(module));
        assert!(hub.unregister(global));
        assert!(hub.unregister(keyed));
        assert!(!hub.unregister(keyed));
        assert_eq!(hub.handler_count(), 0);
    }

    #[test]
    fn test_add_and_remove_bundle() {
        let mut hub = EventHub::new();
        let mut bundle = EventBundle::new();
        bundle.register(hub.ids(), EventKind::QuestOnReward, ModuleId::new(3), "reward");
        hub.add_bundle(EntityCategory::Quest, 7, bundle, &templates())
            .unwrap();

        assert!(hub.keyed_registry(EventKind::QuestOnReward, 7).is_some());
        assert!(hub.ledger().is_tracked(ModuleId::new(3)));
        assert!(hub.remove_bundle(EntityCategory::Quest, 7).is_some());
        assert!(hub.remove_bundle(EntityCategory::Quest, 7).is_none());
    }

    #[test]
    fn test_ids_are_unique_within_hub() {
        let mut hub = EventHub::new();
        let module = ModuleId::new(1);
        let first = hub.register(EventKind::WorldOnStartup, module, ()).unwrap();
        let reserved = hub.next_id();
        let keyed = hub
            .register_keyed(EventKind::GameEventOnStart, 4, module, (), &templates())
            .unwrap();

        assert_ne!(first, reserved);
        assert_ne!(reserved, keyed);
        assert_ne!(first, keyed);
        assert_eq!(hub.owner_of(reserved), None);
    }

    #[test]
    fn test_huge_unchecked_id_is_stored_sparsely() {
        let mut hub = EventHub::new();
        let module = ModuleId::new(1);
        let id = hub
            .register_keyed(EventKind::GameEventOnStart, u32::MAX, module, (), &templates())
            .unwrap();

        assert!(hub.keyed_registry(EventKind::GameEventOnStart, u32::MAX).is_some());
        let map = hub.keyed(EntityCategory::GameEvent).unwrap();
        assert_eq!(map.slot_count(), 1);
        assert!(hub.unregister(id));
        assert!(hub
            .keyed(EntityCategory::GameEvent)
            .is_some_and(EntityEventMap::is_empty));
    }
}
