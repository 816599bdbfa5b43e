//! Handles for quests, spells, loot, items, game objects and auctions.

use super::null_write;
use crate::engine::{
    AuctionEntryObject, AuctionHouseObject, GameObjectObject, ItemObject, LootObject,
    QuestObject, SpellObject,
};

entity_handle!(
    /// Handle to a quest template.
    QuestHandle => QuestObject
);

impl QuestHandle<'_> {
    pub fn id(&self) -> u32 {
        self.object.map_or(0, |q| q.id())
    }

    pub fn level(&self) -> u32 {
        self.object.map_or(0, |q| q.level())
    }

    pub fn min_level(&self) -> u32 {
        self.object.map_or(0, |q| q.min_level())
    }

    pub fn flags(&self) -> u32 {
        self.object.map_or(0, |q| q.flags())
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags() & flag != 0
    }

    pub fn quest_type(&self) -> u32 {
        self.object.map_or(0, |q| q.quest_type())
    }

    pub fn next_quest_id(&self) -> i32 {
        self.object.map_or(0, |q| q.next_quest_id())
    }

    pub fn prev_quest_id(&self) -> i32 {
        self.object.map_or(0, |q| q.prev_quest_id())
    }

    pub fn next_quest_in_chain(&self) -> i32 {
        self.object.map_or(0, |q| q.next_quest_in_chain())
    }

    pub fn is_daily(&self) -> bool {
        self.object.is_some_and(|q| q.is_daily())
    }

    pub fn is_repeatable(&self) -> bool {
        self.object.is_some_and(|q| q.is_repeatable())
    }
}

entity_handle!(
    /// Handle to a spell cast in progress.
    SpellHandle => SpellObject
);

impl SpellHandle<'_> {
    pub fn spell_id(&self) -> u32 {
        self.object.map_or(0, |s| s.spell_id())
    }

    pub fn caster_guid(&self) -> u64 {
        self.object.map_or(0, |s| s.caster_guid())
    }

    pub fn cast_time(&self) -> u32 {
        self.object.map_or(0, |s| s.cast_time())
    }
}

entity_handle!(
    /// Handle to a generated loot container.
    LootHandle => LootObject
);

impl LootHandle<'_> {
    pub fn money(&self) -> u32 {
        self.object.map_or(0, |l| l.money())
    }

    pub fn set_money(&self, amount: u32) {
        match self.object {
            Some(l) => l.set_money(amount),
            None => null_write("LootHandle", "set_money"),
        }
    }

    pub fn item_count(&self) -> u32 {
        self.object.map_or(0, |l| l.item_count())
    }

    pub fn add_item(&self, item_id: u32, count: u32) {
        match self.object {
            Some(l) => l.add_item(item_id, count),
            None => null_write("LootHandle", "add_item"),
        }
    }

    pub fn clear(&self) {
        match self.object {
            Some(l) => l.clear(),
            None => null_write("LootHandle", "clear"),
        }
    }

    pub fn is_looted(&self) -> bool {
        self.object.is_some_and(|l| l.is_looted())
    }

    pub fn loot_type(&self) -> u32 {
        self.object.map_or(0, |l| l.loot_type())
    }
}

entity_handle!(
    /// Handle to an item instance.
    ItemHandle => ItemObject
);

impl ItemHandle<'_> {
    pub fn guid(&self) -> u64 {
        self.object.map_or(0, |i| i.guid())
    }

    pub fn entry(&self) -> u32 {
        self.object.map_or(0, |i| i.entry())
    }

    pub fn count(&self) -> u32 {
        self.object.map_or(0, |i| i.count())
    }

    pub fn owner_guid(&self) -> u64 {
        self.object.map_or(0, |i| i.owner_guid())
    }
}

entity_handle!(
    /// Handle to a game object in the world.
    GameObjectHandle => GameObjectObject
);

impl GameObjectHandle<'_> {
    pub fn guid(&self) -> u64 {
        self.object.map_or(0, |g| g.guid())
    }

    pub fn entry(&self) -> u32 {
        self.object.map_or(0, |g| g.entry())
    }

    pub fn name(&self) -> String {
        self.object.map(|g| g.name()).unwrap_or_default()
    }
}

entity_handle!(AuctionHouseHandle => AuctionHouseObject);

impl AuctionHouseHandle<'_> {
    pub fn id(&self) -> u32 {
        self.object.map_or(0, |h| h.id())
    }

    pub fn auction_count(&self) -> u32 {
        self.object.map_or(0, |h| h.auction_count())
    }
}

entity_handle!(AuctionEntryHandle => AuctionEntryObject);

impl AuctionEntryHandle<'_> {
    pub fn id(&self) -> u32 {
        self.object.map_or(0, |e| e.id())
    }

    pub fn item_entry(&self) -> u32 {
        self.object.map_or(0, |e| e.item_entry())
    }

    pub fn owner_guid(&self) -> u64 {
        self.object.map_or(0, |e| e.owner_guid())
    }

    pub fn bid(&self) -> u32 {
        self.object.map_or(0, |e| e.bid())
    }

    pub fn buyout(&self) -> u32 {
        self.object.map_or(0, |e| e.buyout())
    }
}
