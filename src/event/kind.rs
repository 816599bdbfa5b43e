//! Event kinds and their fixed handler signatures.

use std::fmt;

use super::args::ArgType;
use crate::engine::EntityCategory as Cat;

/// Where the handlers of an event kind live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventScope {
    /// One registry for the whole server.
    Global,
    /// One registry per entity id of the category.
    Keyed(Cat),
}

use EventScope::{Global, Keyed};

macro_rules! event_kinds {
    ($($variant:ident: $scope:expr => [$($arg:ident),*];)+) => {
        /// A named kind of occurrence in the world, with a fixed argument list.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum EventKind {
            $($variant,)+
        }

        impl EventKind {
            /// Every event kind.
            pub const ALL: &'static [EventKind] = &[$(EventKind::$variant,)+];

            /// Name scripts use to register for this kind.
            pub fn name(&self) -> &'static str {
                match self {
                    $(EventKind::$variant => stringify!($variant),)+
                }
            }

            /// Global or entity-keyed.
            pub fn scope(&self) -> EventScope {
                match self {
                    $(EventKind::$variant => $scope,)+
                }
            }

            /// Ordered argument types handlers receive.
            pub fn signature(&self) -> &'static [ArgType] {
                match self {
                    $(EventKind::$variant => &[$(ArgType::$arg),*],)+
                }
            }
        }
    };
}

event_kinds! {
    WorldOnOpenStateChange: Global => [Bool];
    WorldOnConfigLoad: Global => [Bool];
    WorldOnStartup: Global => [];
    WorldOnShutdown: Global => [];
    WorldOnShutdownCancel: Global => [];
    WorldOnMotdChange: Global => [Str];
    WorldOnShutdownInitiate: Global => [UInt, UInt];
    WorldOnUpdate: Global => [UInt];

    UnitOnCalcHeal: Global => [Unit, Unit, MutU32];

    PlayerOnPvpKill: Global => [Player, Player];
    PlayerOnCreatureKill: Global => [Player, Creature];
    PlayerOnKilledByCreature: Global => [Creature, Player];
    PlayerOnLevelChanged: Global => [Player, UInt];
    PlayerOnFreeTalentPointsChanged: Global => [Player, UInt];
    PlayerOnTalentsReset: Global => [Player, Bool];
    PlayerOnMoneyChanged: Global => [Player, MutI32];
    PlayerOnMoneyLimit: Global => [Player, Int];
    PlayerOnGiveXp: Global => [Player, MutU32, Unit];
    PlayerOnReputationChange: Global => [Player, UInt, MutI32, Bool];
    PlayerOnDuelRequest: Global => [Player, Player];
    PlayerOnDuelStart: Global => [Player, Player];
    PlayerOnDuelEnd: Global => [Player, Player, UInt];
    PlayerOnSay: Global => [Player, MutString, UInt, UInt];
    PlayerOnWhisper: Global => [Player, Player, MutString, UInt, UInt];
    PlayerOnChatGroup: Global => [Player, Group, MutString, UInt, UInt];
    PlayerOnChatGuild: Global => [Player, Guild, MutString, UInt, UInt];
    PlayerOnChat: Global => [Player, Channel, MutString, UInt, UInt];
    PlayerOnGmMessage: Global => [Player, Player, Str, Str];
    PlayerOnTextEmote: Global => [Player, UInt, UInt, UInt];
    PlayerOnSpellCast: Global => [Player, Spell, Bool];
    PlayerOnLogin: Global => [Player, Bool];
    PlayerOnLogout: Global => [Player];
    PlayerOnCreate: Global => [Player];
    PlayerOnDelete: Global => [UInt, UInt];
    PlayerOnFailedDelete: Global => [UInt, UInt];
    PlayerOnSave: Global => [Player];
    PlayerOnUpdateZone: Global => [Player, UInt, UInt];
    PlayerOnMapChanged: Global => [Player];
    PlayerOnQuestObjectiveProgress: Global => [Player, Quest, UInt, UInt];
    PlayerOnQuestStatusChange: Global => [Player, UInt];
    PlayerOnMovieComplete: Global => [Player, UInt];
    PlayerOnRepop: Global => [Player];

    AccountOnLogin: Global => [UInt];
    AccountOnFailedLogin: Global => [UInt];
    AccountOnEmailChange: Global => [UInt];
    AccountOnFailedEmailChange: Global => [UInt];
    AccountOnPasswordChange: Global => [UInt];
    AccountOnFailedPasswordChange: Global => [UInt];

    GuildOnAddMember: Global => [Guild, Player, MutU8];
    GuildOnRemoveMember: Global => [Guild, Player, Bool, Bool];
    GuildOnMotdChanged: Global => [Guild, Str];
    GuildOnInfoChanged: Global => [Guild, Str];
    GuildOnCreate: Global => [Guild, Player, Str];
    GuildOnDisband: Global => [Guild];
    GuildOnMemberWithdrawMoney: Global => [Guild, Player, MutU32, Bool];
    GuildOnMemberDepositMoney: Global => [Guild, Player, MutU32];
    GuildOnEvent: Global => [Guild, UInt, UInt, UInt, UInt];
    GuildOnBankEvent: Global => [Guild, UInt, UInt, UInt, UInt, UInt, UInt];

    GroupOnAddMember: Global => [Group, UInt];
    GroupOnInviteMember: Global => [Group, UInt];
    GroupOnRemoveMember: Global => [Group, UInt, UInt, UInt, Str];
    GroupOnChangeLeader: Global => [Group, UInt, UInt];
    GroupOnDisband: Global => [Group];

    AuctionHouseOnAuctionAdd: Global => [AuctionHouse, AuctionEntry];
    AuctionHouseOnAuctionRemove: Global => [AuctionHouse, AuctionEntry];
    AuctionHouseOnAuctionSuccessful: Global => [AuctionHouse, AuctionEntry];
    AuctionHouseOnAuctionExpire: Global => [AuctionHouse, AuctionEntry];

    SpellOnCast: Keyed(Cat::Spell) => [Spell];
    SpellOnCheckCast: Keyed(Cat::Spell) => [Spell, MutI32];

    CreatureOnDeath: Keyed(Cat::Creature) => [Creature, Unit];
    CreatureOnGenerateLoot: Keyed(Cat::Creature) => [Creature, Loot, Player];

    QuestOnObjectiveProgress: Keyed(Cat::Quest) => [Quest, Player, UInt, UInt];
    QuestOnAccept: Keyed(Cat::Quest) => [Quest, Player, MutBool];
    QuestOnReward: Keyed(Cat::Quest) => [Quest, Player, UInt];

    GameObjectOnUse: Keyed(Cat::GameObject) => [GameObject, Player, MutBool];
    GameObjectOnGenerateLoot: Keyed(Cat::GameObject) => [GameObject, Loot, Player];

    ItemOnUse: Keyed(Cat::Item) => [Item, Player, MutBool];
    ItemOnEquip: Keyed(Cat::Item) => [Item, Player, UInt];

    MapOnPlayerEnter: Keyed(Cat::Map) => [UInt, Player];
    MapOnPlayerLeave: Keyed(Cat::Map) => [UInt, Player];

    BattlegroundOnStart: Keyed(Cat::Battleground) => [UInt, UInt];
    BattlegroundOnEnd: Keyed(Cat::Battleground) => [UInt, UInt, UInt];

    InstanceOnCreate: Keyed(Cat::Instance) => [UInt, UInt];
    InstanceOnPlayerEnter: Keyed(Cat::Instance) => [UInt, UInt, Player];

    GameEventOnStart: Keyed(Cat::GameEvent) => [UInt];
    GameEventOnStop: Keyed(Cat::GameEvent) => [UInt];

    SmartActionOnActivate: Keyed(Cat::SmartAction) => [UInt, Unit, Unit];

    ConditionOnCheck: Keyed(Cat::Condition) => [UInt, Player, MutBool];

    AchievementOnComplete: Keyed(Cat::Achievement) => [UInt, Player];

    AreaTriggerOnTrigger: Keyed(Cat::AreaTrigger) => [UInt, Player, MutBool];

    PacketOnCustom: Keyed(Cat::Packet) => [UInt, UInt, Player];

    WorldPacketOnReceive: Keyed(Cat::WorldPacket) => [UInt, Player, MutBool];
}

impl EventKind {
    /// Look up a kind by the name scripts use.
    pub fn from_name(name: &str) -> Option<EventKind> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Entity category of a keyed kind.
    pub fn category(&self) -> Option<Cat> {
        match self.scope() {
            EventScope::Global => None,
            EventScope::Keyed(category) => Some(category),
        }
    }

    pub fn is_global(&self) -> bool {
        self.scope() == EventScope::Global
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
