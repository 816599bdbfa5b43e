//! Handler arguments.
//!
//! Every argument borrows from the native hook frame that produced it. Mutable values travel as
//! [`MutableCell`]s so handlers can rewrite them in place; the hook reads the final value back
//! once dispatch returns.

use std::fmt;

use super::kind::EventKind;
use crate::handle::{
    AuctionEntryHandle, AuctionHouseHandle, ChannelHandle, CreatureHandle, GameObjectHandle,
    GroupHandle, GuildHandle, ItemHandle, LootHandle, PlayerHandle, QuestHandle, SpellHandle,
    UnitHandle,
};

/// Single-slot writable box over a value owned by a native hook frame.
pub struct MutableCell<'a, T> {
    slot: &'a mut T,
}

impl<'a, T> MutableCell<'a, T> {
    pub fn new(slot: &'a mut T) -> Self {
        Self { slot }
    }

    pub fn get_ref(&self) -> &T {
        self.slot
    }

    /// Overwrite the value; later handlers and the hook see the new one.
    pub fn set(&mut self, value: T) {
        *self.slot = value;
    }

    /// Shorter-lived cell over the same slot.
    pub fn reborrow(&mut self) -> MutableCell<'_, T> {
        MutableCell { slot: self.slot }
    }
}

impl<T: Clone> MutableCell<'_, T> {
    pub fn get(&self) -> T {
        self.slot.clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableCell<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MutableCell").field(&self.slot).finish()
    }
}

/// Type of one argument position in an event signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    Bool,
    Int,
    UInt,
    Str,
    Player,
    Unit,
    Creature,
    Guild,
    Group,
    Channel,
    Quest,
    Spell,
    Loot,
    Item,
    GameObject,
    AuctionHouse,
    AuctionEntry,
    MutI32,
    MutU32,
    MutU8,
    MutBool,
    MutString,
}

/// One argument passed to event handlers.
#[derive(Debug)]
pub enum Arg<'a> {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Str(&'a str),
    Player(PlayerHandle<'a>),
    Unit(UnitHandle<'a>),
    Creature(CreatureHandle<'a>),
    Guild(GuildHandle<'a>),
    Group(GroupHandle<'a>),
    Channel(ChannelHandle<'a>),
    Quest(QuestHandle<'a>),
    Spell(SpellHandle<'a>),
    Loot(LootHandle<'a>),
    Item(ItemHandle<'a>),
    GameObject(GameObjectHandle<'a>),
    AuctionHouse(AuctionHouseHandle<'a>),
    AuctionEntry(AuctionEntryHandle<'a>),
    MutI32(MutableCell<'a, i32>),
    MutU32(MutableCell<'a, u32>),
    MutU8(MutableCell<'a, u8>),
    MutBool(MutableCell<'a, bool>),
    MutString(MutableCell<'a, String>),
}

impl<'a> Arg<'a> {
    pub fn arg_type(&self) -> ArgType {
        match self {
            Arg::Bool(_) => ArgType::Bool,
            Arg::Int(_) => ArgType::Int,
            Arg::UInt(_) => ArgType::UInt,
            Arg::Str(_) => ArgType::Str,
            Arg::Player(_) => ArgType::Player,
            Arg::Unit(_) => ArgType::Unit,
            Arg::Creature(_) => ArgType::Creature,
            Arg::Guild(_) => ArgType::Guild,
            Arg::Group(_) => ArgType::Group,
            Arg::Channel(_) => ArgType::Channel,
            Arg::Quest(_) => ArgType::Quest,
            Arg::Spell(_) => ArgType::Spell,
            Arg::Loot(_) => ArgType::Loot,
            Arg::Item(_) => ArgType::Item,
            Arg::GameObject(_) => ArgType::GameObject,
            Arg::AuctionHouse(_) => ArgType::AuctionHouse,
            Arg::AuctionEntry(_) => ArgType::AuctionEntry,
            Arg::MutI32(_) => ArgType::MutI32,
            Arg::MutU32(_) => ArgType::MutU32,
            Arg::MutU8(_) => ArgType::MutU8,
            Arg::MutBool(_) => ArgType::MutBool,
            Arg::MutString(_) => ArgType::MutString,
        }
    }

    /// Copy of this argument that borrows from `self` for a shorter lifetime.
    ///
    /// Handlers receive reborrowed arguments so cells stay usable by the next handler.
    pub fn reborrow(&mut self) -> Arg<'_> {
        match self {
            Arg::Bool(v) => Arg::Bool(*v),
            Arg::Int(v) => Arg::Int(*v),
            Arg::UInt(v) => Arg::UInt(*v),
            Arg::Str(s) => Arg::Str(*s),
            Arg::Player(h) => Arg::Player(*h),
            Arg::Unit(h) => Arg::Unit(*h),
            Arg::Creature(h) => Arg::Creature(*h),
            Arg::Guild(h) => Arg::Guild(*h),
            Arg::Group(h) => Arg::Group(*h),
            Arg::Channel(h) => Arg::Channel(*h),
            Arg::Quest(h) => Arg::Quest(*h),
            Arg::Spell(h) => Arg::Spell(*h),
            Arg::Loot(h) => Arg::Loot(*h),
            Arg::Item(h) => Arg::Item(*h),
            Arg::GameObject(h) => Arg::GameObject(*h),
            Arg::AuctionHouse(h) => Arg::AuctionHouse(*h),
            Arg::AuctionEntry(h) => Arg::AuctionEntry(*h),
            Arg::MutI32(c) => Arg::MutI32(c.reborrow()),
            Arg::MutU32(c) => Arg::MutU32(c.reborrow()),
            Arg::MutU8(c) => Arg::MutU8(c.reborrow()),
            Arg::MutBool(c) => Arg::MutBool(c.reborrow()),
            Arg::MutString(c) => Arg::MutString(c.reborrow()),
        }
    }
}

macro_rules! handle_accessors {
    ($($method:ident => $variant:ident($handle:ident);)+) => {
        $(
            /// Handle at `index`; null when the position holds something else.
            pub fn $method(&self, index: usize) -> $handle<'a> {
                match self.args.get(index) {
                    Some(Arg::$variant(h)) => *h,
                    _ => $handle::null(),
                }
            }
        )+
    };
}

macro_rules! cell_accessors {
    ($($method:ident => $variant:ident($ty:ty);)+) => {
        $(
            pub fn $method(&mut self, index: usize) -> Option<&mut MutableCell<'a, $ty>> {
                match self.args.get_mut(index) {
                    Some(Arg::$variant(c)) => Some(c),
                    _ => None,
                }
            }
        )+
    };
}

/// Arguments of one event occurrence.
#[derive(Debug)]
pub struct EventArgs<'a> {
    kind: EventKind,
    args: Vec<Arg<'a>>,
}

impl<'a> EventArgs<'a> {
    pub fn new(kind: EventKind, args: Vec<Arg<'a>>) -> Self {
        let event = Self { kind, args };
        debug_assert!(
            event.matches_signature(),
            "arguments do not match the {kind} signature"
        );
        event
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arg<'a>> {
        self.args.get(index)
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Arg<'a>> {
        self.args.iter_mut()
    }

    /// Whether the argument types line up with the kind's signature.
    pub fn matches_signature(&self) -> bool {
        let signature = self.kind.signature();
        signature.len() == self.args.len()
            && signature
                .iter()
                .zip(&self.args)
                .all(|(expected, arg)| *expected == arg.arg_type())
    }

    pub fn bool(&self, index: usize) -> Option<bool> {
        match self.args.get(index) {
            Some(Arg::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Integer at `index`, signed or unsigned.
    pub fn int(&self, index: usize) -> Option<i64> {
        match self.args.get(index) {
            Some(Arg::Int(v)) => Some(*v),
            Some(Arg::UInt(v)) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn str(&self, index: usize) -> Option<&'a str> {
        match self.args.get(index) {
            Some(Arg::Str(s)) => Some(*s),
            _ => None,
        }
    }

    handle_accessors! {
        player => Player(PlayerHandle);
        unit => Unit(UnitHandle);
        creature => Creature(CreatureHandle);
        guild => Guild(GuildHandle);
        group => Group(GroupHandle);
        channel => Channel(ChannelHandle);
        quest => Quest(QuestHandle);
        spell => Spell(SpellHandle);
        loot => Loot(LootHandle);
        item => Item(ItemHandle);
        game_object => GameObject(GameObjectHandle);
        auction_house => AuctionHouse(AuctionHouseHandle);
        auction_entry => AuctionEntry(AuctionEntryHandle);
    }

    cell_accessors! {
        cell_i32 => MutI32(i32);
        cell_u32 => MutU32(u32);
        cell_u8 => MutU8(u8);
        cell_bool => MutBool(bool);
        cell_string => MutString(String);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_set_and_get() {
        let mut money = 100i32;
        {
            let mut cell = MutableCell::new(&mut money);
            assert_eq!(cell.get(), 100);
            cell.set(250);
            assert_eq!(cell.get(), 250);
            assert_eq!(*cell.get_ref(), 250);
        }
        assert_eq!(money, 250);
    }

    #[test]
    fn test_reborrowed_cell_writes_through() {
        let mut gain = 10u32;
        let mut cell = MutableCell::new(&mut gain);
        cell.reborrow().set(15);
        let doubled = cell.get() * 2;
        cell.reborrow().set(doubled);
        assert_eq!(cell.get(), 30);
        drop(cell);
        assert_eq!(gain, 30);
    }

    #[test]
    fn test_event_args_cells_visible_to_later_readers() {
        let mut amount = 7i32;
        let mut args = EventArgs::new(
            EventKind::PlayerOnMoneyChanged,
            vec![Arg::Player(PlayerHandle::null()), Arg::MutI32(MutableCell::new(&mut amount))],
        );

        for arg in args.iter_mut() {
            if let Arg::MutI32(mut cell) = arg.reborrow() {
                cell.set(cell.get() + 1);
            }
        }
        assert_eq!(args.cell_i32(1).map(|c| c.get()), Some(8));
        drop(args);
        assert_eq!(amount, 8);
    }

    #[test]
    fn test_signature_check() {
        let args = EventArgs::new(EventKind::WorldOnUpdate, vec![Arg::UInt(16)]);
        assert!(args.matches_signature());
        assert_eq!(args.int(0), Some(16));
        assert_eq!(args.len(), 1);

        let wrong = EventArgs {
            kind: EventKind::WorldOnUpdate,
            args: vec![Arg::Bool(true)],
        };
        assert!(!wrong.matches_signature());
    }

    #[test]
    fn test_accessors_on_mismatched_position() {
        let args = EventArgs::new(EventKind::WorldOnMotdChange, vec![Arg::Str("hello")]);
        assert_eq!(args.str(0), Some("hello"));
        assert!(args.player(0).is_null());
        assert!(args.player(5).is_null());
        assert_eq!(args.bool(0), None);
        assert_eq!(args.int(0), None);
    }

    #[test]
    fn test_arg_types_follow_variants() {
        let mut flag = false;
        let arg = Arg::MutBool(MutableCell::new(&mut flag));
        assert_eq!(arg.arg_type(), ArgType::MutBool);
        assert_eq!(Arg::Str("x").arg_type(), ArgType::Str);
        assert_eq!(Arg::Quest(QuestHandle::null()).arg_type(), ArgType::Quest);
    }
}
