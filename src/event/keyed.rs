//! Per-entity event bundles and the id-keyed maps that hold them.

use std::collections::{BTreeMap, BTreeSet};

use tracing::error;

use super::kind::EventKind;
use super::registry::{EventRegistry, ModuleId, RegistrationId, RegistrationIds};
use crate::engine::{EntityCategory, IdValidation, TemplateStore};
use crate::{RealmError, Result};

/// Registries for the keyed kinds of one entity.
#[derive(Debug, Clone)]
pub struct EventBundle<H> {
    registries: Vec<EventRegistry<H>>,
}

impl<H> Default for EventBundle<H> {
    fn default() -> Self {
        Self {
            registries: Vec::new(),
        }
    }
}

impl<H> EventBundle<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        ids: &RegistrationIds,
        kind: EventKind,
        module: ModuleId,
        handler: H,
    ) -> RegistrationId {
        let id = ids.next();
        self.insert(kind, id, module, handler);
        id
    }

    pub fn insert(&mut self, kind: EventKind, id: RegistrationId, module: ModuleId, handler: H) {
        self.registry_mut(kind).insert(id, module, handler);
    }

    fn registry_mut(&mut self, kind: EventKind) -> &mut EventRegistry<H> {
        let index = match self.registries.iter().position(|r| r.kind() == kind) {
            Some(index) => index,
            None => {
                self.registries.push(EventRegistry::new(kind));
                self.registries.len() - 1
            }
        };
        &mut self.registries[index]
    }

    pub fn registry(&self, kind: EventKind) -> Option<&EventRegistry<H>> {
        self.registries.iter().find(|r| r.kind() == kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.registries.iter().map(EventRegistry::kind)
    }

    pub fn unregister(&mut self, id: RegistrationId) -> bool {
        let found = self.registries.iter_mut().any(|r| r.unregister(id));
        self.registries.retain(|r| !r.is_empty());
        found
    }

    pub fn unregister_module(&mut self, module: ModuleId) -> usize {
        let removed = self
            .registries
            .iter_mut()
            .map(|r| r.unregister_module(module))
            .sum();
        self.registries.retain(|r| !r.is_empty());
        removed
    }

    pub fn owner_of(&self, id: RegistrationId) -> Option<ModuleId> {
        self.registries.iter().find_map(|r| r.owner_of(id))
    }

    /// Modules that own at least one handler here.
    pub fn modules(&self) -> BTreeSet<ModuleId> {
        self.registries
            .iter()
            .flat_map(|r| r.entries().iter().map(|e| e.module))
            .collect()
    }

    pub fn handler_count(&self) -> usize {
        self.registries.iter().map(EventRegistry::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.handler_count() == 0
    }
}

/// Highest id stored by direct index in an unchecked category's map.
///
/// Larger ids go to the overflow map, so a script-supplied id never sizes an allocation.
pub const MAX_DENSE_ID: u32 = 0xFFFF;

/// Bundles indexed directly by id, with a sorted overflow above [`MAX_DENSE_ID`].
#[derive(Debug)]
struct DenseSlots<H> {
    slots: Vec<Option<EventBundle<H>>>,
    overflow: BTreeMap<u32, EventBundle<H>>,
}

impl<H> DenseSlots<H> {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            overflow: BTreeMap::new(),
        }
    }

    fn slot_mut(&mut self, id: u32) -> &mut Option<EventBundle<H>> {
        let index = id as usize;
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, || None);
        }
        &mut self.slots[index]
    }

    fn insert(&mut self, id: u32, bundle: EventBundle<H>) -> Option<EventBundle<H>> {
        if id > MAX_DENSE_ID {
            self.overflow.insert(id, bundle)
        } else {
            self.slot_mut(id).replace(bundle)
        }
    }

    fn get_or_insert(&mut self, id: u32) -> &mut EventBundle<H> {
        if id > MAX_DENSE_ID {
            self.overflow.entry(id).or_default()
        } else {
            self.slot_mut(id).get_or_insert_with(EventBundle::new)
        }
    }

    fn remove(&mut self, id: u32) -> Option<EventBundle<H>> {
        if id > MAX_DENSE_ID {
            self.overflow.remove(&id)
        } else {
            self.slots.get_mut(id as usize).and_then(Option::take)
        }
    }

    fn get(&self, id: u32) -> Option<&EventBundle<H>> {
        if id > MAX_DENSE_ID {
            self.overflow.get(&id)
        } else {
            self.slots.get(id as usize).and_then(Option::as_ref)
        }
    }

    fn iter(&self) -> impl Iterator<Item = (u32, &EventBundle<H>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|b| (index as u32, b)))
            .chain(self.overflow.iter().map(|(id, b)| (*id, b)))
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = (u32, &mut EventBundle<H>)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|b| (index as u32, b)))
            .chain(self.overflow.iter_mut().map(|(id, b)| (*id, b)))
    }
}

#[derive(Debug)]
enum Slots<H> {
    /// Template-validated ids; sparse and potentially large.
    Sparse(BTreeMap<u32, EventBundle<H>>),
    /// Bare numeric ids; indexed directly up to [`MAX_DENSE_ID`] and grown on demand.
    Dense(DenseSlots<H>),
}

/// Map from entity id to the bundle of handlers for that entity.
#[derive(Debug)]
pub struct EntityEventMap<H> {
    category: EntityCategory,
    slots: Slots<H>,
}

impl<H> EntityEventMap<H> {
    pub fn new(category: EntityCategory) -> Self {
        let slots = match category.validation() {
            IdValidation::Template => Slots::Sparse(BTreeMap::new()),
            IdValidation::Unchecked => Slots::Dense(DenseSlots::new()),
        };
        Self { category, slots }
    }

    pub fn category(&self) -> EntityCategory {
        self.category
    }

    fn validate(&self, id: u32, templates: &dyn TemplateStore) -> Result<()> {
        if self.category.validation() == IdValidation::Template
            && !templates.contains(self.category, id)
        {
            let err = RealmError::InvalidEntity {
                category: self.category,
                id,
            };
            error!(target: "realmscript::events", "{err}");
            return Err(err);
        }
        Ok(())
    }

    fn check_kinds(&self, bundle: &EventBundle<H>) -> Result<()> {
        match bundle.kinds().find(|kind| kind.category() != Some(self.category)) {
            Some(kind) => Err(RealmError::Registration(format!(
                "{kind} cannot be attached to a {} bundle",
                self.category
            ))),
            None => Ok(()),
        }
    }

    /// Attach `bundle` to `id`, replacing any bundle already there.
    ///
    /// On failure the map is left untouched. Returns the replaced bundle.
    pub fn add(
        &mut self,
        id: u32,
        bundle: EventBundle<H>,
        templates: &dyn TemplateStore,
    ) -> Result<Option<EventBundle<H>>> {
        self.validate(id, templates)?;
        self.check_kinds(&bundle)?;

        Ok(match &mut self.slots {
            Slots::Sparse(map) => map.insert(id, bundle),
            Slots::Dense(dense) => dense.insert(id, bundle),
        })
    }

    /// Bundle for `id`, attaching an empty one first if needed.
    pub fn entry(
        &mut self,
        id: u32,
        templates: &dyn TemplateStore,
    ) -> Result<&mut EventBundle<H>> {
        if !self.contains(id) {
            self.validate(id, templates)?;
        }

        Ok(match &mut self.slots {
            Slots::Sparse(map) => map.entry(id).or_default(),
            Slots::Dense(dense) => dense.get_or_insert(id),
        })
    }

    pub fn remove(&mut self, id: u32) -> Option<EventBundle<H>> {
        match &mut self.slots {
            Slots::Sparse(map) => map.remove(&id),
            Slots::Dense(dense) => dense.remove(id),
        }
    }

    /// Bundle attached to `id`. Ids past the end of dense storage are simply absent.
    pub fn get(&self, id: u32) -> Option<&EventBundle<H>> {
        match &self.slots {
            Slots::Sparse(map) => map.get(&id),
            Slots::Dense(dense) => dense.get(id),
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    /// Number of ids with an attached bundle.
    pub fn len(&self) -> usize {
        match &self.slots {
            Slots::Sparse(map) => map.len(),
            Slots::Dense(dense) => dense.iter().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated storage slots.
    ///
    /// For dense maps this is one past the highest directly indexed id ever attached, plus one
    /// per overflow id.
    pub fn slot_count(&self) -> usize {
        match &self.slots {
            Slots::Sparse(map) => map.len(),
            Slots::Dense(dense) => dense.slots.len() + dense.overflow.len(),
        }
    }

    pub fn ids(&self) -> Vec<u32> {
        match &self.slots {
            Slots::Sparse(map) => map.keys().copied().collect(),
            Slots::Dense(dense) => dense.iter().map(|(id, _)| id).collect(),
        }
    }

    fn bundles_mut(&mut self) -> Box<dyn Iterator<Item = (u32, &mut EventBundle<H>)> + '_> {
        match &mut self.slots {
            Slots::Sparse(map) => Box::new(map.iter_mut().map(|(id, b)| (*id, b))),
            Slots::Dense(dense) => Box::new(dense.iter_mut()),
        }
    }

    pub fn owner_of(&self, id: RegistrationId) -> Option<ModuleId> {
        self.ids()
            .into_iter()
            .find_map(|entity| self.get(entity).and_then(|b| b.owner_of(id)))
    }

    /// Remove one registration; a bundle left empty is detached.
    pub fn unregister(&mut self, id: RegistrationId) -> bool {
        let mut hit = None;
        for (entity, bundle) in self.bundles_mut() {
            if bundle.unregister(id) {
                hit = Some((entity, bundle.is_empty()));
                break;
            }
        }
        match hit {
            Some((entity, emptied)) => {
                if emptied {
                    self.remove(entity);
                }
                true
            }
            None => false,
        }
    }

    /// Remove every handler owned by `module`; bundles left empty are detached.
    pub fn unregister_module(&mut self, module: ModuleId) -> usize {
        let mut removed = 0;
        let mut emptied = Vec::new();
        for (entity, bundle) in self.bundles_mut() {
            let count = bundle.unregister_module(module);
            if count > 0 && bundle.is_empty() {
                emptied.push(entity);
            }
            removed += count;
        }
        for entity in emptied {
            self.remove(entity);
        }
        removed
    }

    pub fn handler_count(&self) -> usize {
        self.ids()
            .into_iter()
            .filter_map(|entity| self.get(entity))
            .map(EventBundle::handler_count)
            .sum()
    }
}
