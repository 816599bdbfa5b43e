//! Entity categories that carry id-keyed event bundles.

use std::fmt;

/// How ids of a category are checked before a bundle is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdValidation {
    /// The id must exist in the engine's template table.
    Template,
    /// Any id is accepted; storage grows on demand.
    Unchecked,
}

/// Entity category of an id-keyed event map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityCategory {
    Spell,
    Creature,
    Quest,
    GameObject,
    Item,
    Map,
    Battleground,
    Instance,
    GameEvent,
    SmartAction,
    Condition,
    Achievement,
    AreaTrigger,
    Packet,
    WorldPacket,
}

impl EntityCategory {
    /// Every category, in map initialization order.
    pub const ALL: [EntityCategory; 15] = [
        EntityCategory::Spell,
        EntityCategory::Creature,
        EntityCategory::Quest,
        EntityCategory::GameObject,
        EntityCategory::Item,
        EntityCategory::Map,
        EntityCategory::Battleground,
        EntityCategory::Instance,
        EntityCategory::GameEvent,
        EntityCategory::SmartAction,
        EntityCategory::Condition,
        EntityCategory::Achievement,
        EntityCategory::AreaTrigger,
        EntityCategory::Packet,
        EntityCategory::WorldPacket,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityCategory::Spell => "Spell",
            EntityCategory::Creature => "Creature",
            EntityCategory::Quest => "Quest",
            EntityCategory::GameObject => "GameObject",
            EntityCategory::Item => "Item",
            EntityCategory::Map => "Map",
            EntityCategory::Battleground => "Battleground",
            EntityCategory::Instance => "Instance",
            EntityCategory::GameEvent => "GameEvent",
            EntityCategory::SmartAction => "SmartAction",
            EntityCategory::Condition => "Condition",
            EntityCategory::Achievement => "Achievement",
            EntityCategory::AreaTrigger => "AreaTrigger",
            EntityCategory::Packet => "Packet",
            EntityCategory::WorldPacket => "WorldPacket",
        }
    }

    /// Validation contract for ids of this category.
    ///
    /// Categories backed by a template table reject unknown ids. The bare numeric categories
    /// (battleground types, instance maps, game events, smart actions, conditions, packet
    /// opcodes) have no authoritative table and accept any id.
    pub fn validation(&self) -> IdValidation {
        match self {
            EntityCategory::Spell
            | EntityCategory::Creature
            | EntityCategory::Quest
            | EntityCategory::GameObject
            | EntityCategory::Item
            | EntityCategory::Map
            | EntityCategory::Achievement
            | EntityCategory::AreaTrigger => IdValidation::Template,
            EntityCategory::Battleground
            | EntityCategory::Instance
            | EntityCategory::GameEvent
            | EntityCategory::SmartAction
            | EntityCategory::Condition
            | EntityCategory::Packet
            | EntityCategory::WorldPacket => IdValidation::Unchecked,
        }
    }

    /// Key used for this category in template table files.
    pub fn table_key(&self) -> &'static str {
        match self {
            EntityCategory::Spell => "spell",
            EntityCategory::Creature => "creature",
            EntityCategory::Quest => "quest",
            EntityCategory::GameObject => "gameobject",
            EntityCategory::Item => "item",
            EntityCategory::Map => "map",
            EntityCategory::Battleground => "battleground",
            EntityCategory::Instance => "instance",
            EntityCategory::GameEvent => "game_event",
            EntityCategory::SmartAction => "smart_action",
            EntityCategory::Condition => "condition",
            EntityCategory::Achievement => "achievement",
            EntityCategory::AreaTrigger => "area_trigger",
            EntityCategory::Packet => "packet",
            EntityCategory::WorldPacket => "world_packet",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
