//! Object model exposed by the host engine.
//!
//! These traits are the capability sets the handle layer forwards to. Methods take `&self`;
//! engine implementations own their mutability. Capabilities that only exist on some engine
//! builds have default bodies returning [`Unsupported`] or `None`.

use std::fmt;

/// Marker returned by an object method the running engine build does not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unsupported;

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not supported by this engine build")
    }
}

impl std::error::Error for Unsupported {}

/// Any unit in the world (players and creatures included).
pub trait UnitObject {
    fn guid(&self) -> u64;
    fn entry(&self) -> u32;
    fn name(&self) -> String;
    fn level(&self) -> u32;
    fn health(&self) -> u32;
    fn max_health(&self) -> u32;
    fn is_alive(&self) -> bool {
        self.health() > 0
    }
}

/// A logged-in player character.
pub trait PlayerObject {
    fn guid(&self) -> u64;
    fn account_id(&self) -> u32;
    fn name(&self) -> String;
    fn level(&self) -> u32;
    fn money(&self) -> u32;
    fn set_money(&self, amount: u32);
    fn is_gm(&self) -> bool;
    fn send_system_message(&self, text: &str);
}

/// A creature spawned from a creature template.
pub trait CreatureObject {
    fn guid(&self) -> u64;
    fn entry(&self) -> u32;
    fn name(&self) -> String;
    fn level(&self) -> u32;
    fn is_alive(&self) -> bool;
}

pub trait GuildObject {
    fn id(&self) -> u32;
    fn name(&self) -> String;
    fn motd(&self) -> String;
    fn member_count(&self) -> u32;
    fn bank_money(&self) -> u64;
}

pub trait GroupObject {
    fn guid(&self) -> u64;
    fn leader_guid(&self) -> u64;
    fn member_count(&self) -> u32;
    fn is_raid(&self) -> bool;
}

/// A chat channel.
pub trait ChannelObject {
    fn id(&self) -> u32;
    /// Name in the server's default locale.
    fn name(&self) -> String;
    /// Name in the given locale.
    fn name_for_locale(&self, _locale: u32) -> Result<String, Unsupported> {
        Err(Unsupported)
    }
    fn is_constant(&self) -> bool;
    fn is_lfg(&self) -> bool;
    fn is_announce(&self) -> bool;
    fn set_announce(&self, _announce: bool) -> Result<(), Unsupported> {
        Err(Unsupported)
    }
    fn set_invisible(&self, _invisible: bool) -> Result<(), Unsupported> {
        Err(Unsupported)
    }
    fn set_dirty(&self) -> Result<(), Unsupported> {
        Err(Unsupported)
    }
    fn password(&self) -> String;
    fn set_password(&self, password: &str);
    /// Engine-side password check.
    fn check_password(&self, _password: &str) -> Result<bool, Unsupported> {
        Err(Unsupported)
    }
    fn num_players(&self) -> u32;
    fn flags(&self) -> u8;
}

/// A quest template.
pub trait QuestObject {
    fn id(&self) -> u32;
    fn level(&self) -> u32;
    fn min_level(&self) -> u32;
    fn flags(&self) -> u32;
    fn quest_type(&self) -> u32;
    fn next_quest_id(&self) -> i32;
    fn prev_quest_id(&self) -> i32;
    fn next_quest_in_chain(&self) -> i32;
    fn is_daily(&self) -> bool;
    fn is_repeatable(&self) -> bool;
}

/// A spell being cast.
pub trait SpellObject {
    fn spell_id(&self) -> u32;
    fn caster_guid(&self) -> u64;
    fn cast_time(&self) -> u32;
}

/// The loot container generated for a creature or game object.
pub trait LootObject {
    fn money(&self) -> u32;
    fn set_money(&self, amount: u32);
    fn item_count(&self) -> u32;
    fn add_item(&self, item_id: u32, count: u32);
    fn clear(&self);
    fn is_looted(&self) -> bool;
    fn loot_type(&self) -> u32;
}

pub trait ItemObject {
    fn guid(&self) -> u64;
    fn entry(&self) -> u32;
    fn count(&self) -> u32;
    fn owner_guid(&self) -> u64;
}

pub trait GameObjectObject {
    fn guid(&self) -> u64;
    fn entry(&self) -> u32;
    fn name(&self) -> String;
}

pub trait AuctionHouseObject {
    fn id(&self) -> u32;
    fn auction_count(&self) -> u32;
}

pub trait AuctionEntryObject {
    fn id(&self) -> u32;
    fn item_entry(&self) -> u32;
    fn owner_guid(&self) -> u64;
    fn bid(&self) -> u32;
    fn buyout(&self) -> u32;
}
