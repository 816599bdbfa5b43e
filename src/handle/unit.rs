//! Handles for units: players, creatures and generic units.

use super::null_write;
use crate::engine::{CreatureObject, PlayerObject, UnitObject};

entity_handle!(
    /// Handle to a player character.
    PlayerHandle => PlayerObject
);

impl PlayerHandle<'_> {
    pub fn guid(&self) -> u64 {
        self.object.map_or(0, |p| p.guid())
    }

    pub fn account_id(&self) -> u32 {
        self.object.map_or(0, |p| p.account_id())
    }

    pub fn name(&self) -> String {
        self.object.map(|p| p.name()).unwrap_or_default()
    }

    pub fn level(&self) -> u32 {
        self.object.map_or(0, |p| p.level())
    }

    pub fn money(&self) -> u32 {
        self.object.map_or(0, |p| p.money())
    }

    pub fn set_money(&self, amount: u32) {
        match self.object {
            Some(p) => p.set_money(amount),
            None => null_write("PlayerHandle", "set_money"),
        }
    }

    pub fn is_gm(&self) -> bool {
        self.object.is_some_and(|p| p.is_gm())
    }

    pub fn send_system_message(&self, text: &str) {
        match self.object {
            Some(p) => p.send_system_message(text),
            None => null_write("PlayerHandle", "send_system_message"),
        }
    }
}

entity_handle!(
    /// Handle to any unit.
    UnitHandle => UnitObject
);

impl UnitHandle<'_> {
    pub fn guid(&self) -> u64 {
        self.object.map_or(0, |u| u.guid())
    }

    pub fn entry(&self) -> u32 {
        self.object.map_or(0, |u| u.entry())
    }

    pub fn name(&self) -> String {
        self.object.map(|u| u.name()).unwrap_or_default()
    }

    pub fn level(&self) -> u32 {
        self.object.map_or(0, |u| u.level())
    }

    pub fn health(&self) -> u32 {
        self.object.map_or(0, |u| u.health())
    }

    pub fn max_health(&self) -> u32 {
        self.object.map_or(0, |u| u.max_health())
    }

    pub fn is_alive(&self) -> bool {
        self.object.is_some_and(|u| u.is_alive())
    }
}

entity_handle!(
    /// Handle to a spawned creature.
    CreatureHandle => CreatureObject
);

impl CreatureHandle<'_> {
    pub fn guid(&self) -> u64 {
        self.object.map_or(0, |c| c.guid())
    }

    pub fn entry(&self) -> u32 {
        self.object.map_or(0, |c| c.entry())
    }

    pub fn name(&self) -> String {
        self.object.map(|c| c.name()).unwrap_or_default()
    }

    pub fn level(&self) -> u32 {
        self.object.map_or(0, |c| c.level())
    }

    pub fn is_alive(&self) -> bool {
        self.object.is_some_and(|c| c.is_alive())
    }
}
