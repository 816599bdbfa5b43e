//! Interfaces of the host world server.
//!
//! The bridge never owns engine state. Everything it touches arrives through these traits:
//! the object model (`objects`), the hook families the host calls (`hooks`) and the
//! authoritative template tables used to validate entity-keyed registrations (`templates`).

mod category;
pub mod hooks;
pub mod objects;
pub mod templates;

pub use category::{EntityCategory, IdValidation};
pub use hooks::{
    AccountHooks, AchievementHooks, AreaTriggerHooks, AuctionHouseHooks, BattlegroundHooks,
    ChatRecipient, ConditionHooks, CreatureHooks, GameEventHooks, GameObjectHooks, GroupHooks,
    GuildHooks, HookHost, InstanceHooks, ItemHooks, MapHooks, PacketHooks, PlayerHooks,
    QuestHooks, SmartActionHooks, SpellHooks, UnitHooks, WorldHooks,
};
pub use objects::{
    AuctionEntryObject, AuctionHouseObject, ChannelObject, CreatureObject, GameObjectObject,
    GroupObject, GuildObject, ItemObject, LootObject, PlayerObject, QuestObject, SpellObject,
    UnitObject, Unsupported,
};
pub use templates::{TemplateStore, TemplateTables};
