//! Guild, group and auction house hook shims.

use std::rc::Rc;

use super::fire;
use crate::bridge::ScriptBridge;
use crate::engine::{
    AuctionEntryObject, AuctionHouseHooks, AuctionHouseObject, GroupHooks, GroupObject,
    GuildHooks, GuildObject, PlayerObject,
};
use crate::event::{Arg, EventKind, MutableCell};
use crate::handle::{AuctionEntryHandle, AuctionHouseHandle, GroupHandle, GuildHandle, PlayerHandle};

fn guild(g: &dyn GuildObject) -> Arg<'_> {
    Arg::Guild(GuildHandle::new(g))
}

fn group(g: &dyn GroupObject) -> Arg<'_> {
    Arg::Group(GroupHandle::new(g))
}

pub struct GuildShim {
    bridge: Rc<ScriptBridge>,
}

impl GuildShim {
    pub fn new(bridge: Rc<ScriptBridge>) -> Self {
        Self { bridge }
    }
}

impl GuildHooks for GuildShim {
    fn on_add_member(&self, g: &dyn GuildObject, player: &dyn PlayerObject, rank: &mut u8) {
        fire(
            &self.bridge,
            EventKind::GuildOnAddMember,
            vec![
                guild(g),
                Arg::Player(PlayerHandle::new(player)),
                Arg::MutU8(MutableCell::new(rank)),
            ],
        );
    }

    fn on_remove_member(
        &self,
        g: &dyn GuildObject,
        player: &dyn PlayerObject,
        is_disbanding: bool,
        is_kicked: bool,
    ) {
        fire(
            &self.bridge,
            EventKind::GuildOnRemoveMember,
            vec![
                guild(g),
                Arg::Player(PlayerHandle::new(player)),
                Arg::Bool(is_disbanding),
                Arg::Bool(is_kicked),
            ],
        );
    }

    fn on_motd_changed(&self, g: &dyn GuildObject, motd: &str) {
        fire(
            &self.bridge,
            EventKind::GuildOnMotdChanged,
            vec![guild(g), Arg::Str(motd)],
        );
    }

    fn on_info_changed(&self, g: &dyn GuildObject, info: &str) {
        fire(
            &self.bridge,
            EventKind::GuildOnInfoChanged,
            vec![guild(g), Arg::Str(info)],
        );
    }

    fn on_create(&self, g: &dyn GuildObject, leader: &dyn PlayerObject, name: &str) {
        fire(
            &self.bridge,
            EventKind::GuildOnCreate,
            vec![guild(g), Arg::Player(PlayerHandle::new(leader)), Arg::Str(name)],
        );
    }

    fn on_disband(&self, g: &dyn GuildObject) {
        fire(&self.bridge, EventKind::GuildOnDisband, vec![guild(g)]);
    }

    fn on_member_withdraw_money(
        &self,
        g: &dyn GuildObject,
        player: &dyn PlayerObject,
        amount: &mut u32,
        is_repair: bool,
    ) {
        fire(
            &self.bridge,
            EventKind::GuildOnMemberWithdrawMoney,
            vec![
                guild(g),
                Arg::Player(PlayerHandle::new(player)),
                Arg::MutU32(MutableCell::new(amount)),
                Arg::Bool(is_repair),
            ],
        );
    }

    fn on_member_deposit_money(&self, g: &dyn GuildObject, player: &dyn PlayerObject, amount: &mut u32) {
        fire(
            &self.bridge,
            EventKind::GuildOnMemberDepositMoney,
            vec![
                guild(g),
                Arg::Player(PlayerHandle::new(player)),
                Arg::MutU32(MutableCell::new(amount)),
            ],
        );
    }

    fn on_event(
        &self,
        g: &dyn GuildObject,
        event_type: u8,
        player_guid1: u32,
        player_guid2: u32,
        new_rank: u8,
    ) {
        fire(
            &self.bridge,
            EventKind::GuildOnEvent,
            vec![
                guild(g),
                Arg::UInt(event_type.into()),
                Arg::UInt(player_guid1.into()),
                Arg::UInt(player_guid2.into()),
                Arg::UInt(new_rank.into()),
            ],
        );
    }

    fn on_bank_event(
        &self,
        g: &dyn GuildObject,
        event_type: u8,
        tab_id: u8,
        player_guid: u32,
        item_or_money: u32,
        item_stack_count: u16,
        dest_tab_id: u8,
    ) {
        fire(
            &self.bridge,
            EventKind::GuildOnBankEvent,
            vec![
                guild(g),
                Arg::UInt(event_type.into()),
                Arg::UInt(tab_id.into()),
                Arg::UInt(player_guid.into()),
                Arg::UInt(item_or_money.into()),
                Arg::UInt(item_stack_count.into()),
                Arg::UInt(dest_tab_id.into()),
            ],
        );
    }
}

pub struct GroupShim {
    bridge: Rc<ScriptBridge>,
}

impl GroupShim {
    pub fn new(bridge: Rc<ScriptBridge>) -> Self {
        Self { bridge }
    }
}

impl GroupHooks for GroupShim {
    fn on_add_member(&self, g: &dyn GroupObject, guid: u64) {
        fire(&self.bridge, EventKind::GroupOnAddMember, vec![group(g), Arg::UInt(guid)]);
    }

    fn on_invite_member(&self, g: &dyn GroupObject, guid: u64) {
        fire(&self.bridge, EventKind::GroupOnInviteMember, vec![group(g), Arg::UInt(guid)]);
    }

    fn on_remove_member(&self, g: &dyn GroupObject, guid: u64, method: u32, kicker: u64, reason: &str) {
        fire(
            &self.bridge,
            EventKind::GroupOnRemoveMember,
            vec![
                group(g),
                Arg::UInt(guid),
                Arg::UInt(method.into()),
                Arg::UInt(kicker),
                Arg::Str(reason),
            ],
        );
    }

    fn on_change_leader(&self, g: &dyn GroupObject, new_leader: u64, old_leader: u64) {
        fire(
            &self.bridge,
            EventKind::GroupOnChangeLeader,
            vec![group(g), Arg::UInt(new_leader), Arg::UInt(old_leader)],
        );
    }

    fn on_disband(&self, g: &dyn GroupObject) {
        fire(&self.bridge, EventKind::GroupOnDisband, vec![group(g)]);
    }
}

pub struct AuctionHouseShim {
    bridge: Rc<ScriptBridge>,
}

impl AuctionHouseShim {
    pub fn new(bridge: Rc<ScriptBridge>) -> Self {
        Self { bridge }
    }

    fn auction_event(&self, kind: EventKind, house: &dyn AuctionHouseObject, entry: &dyn AuctionEntryObject) {
        fire(
            &self.bridge,
            kind,
            vec![
                Arg::AuctionHouse(AuctionHouseHandle::new(house)),
                Arg::AuctionEntry(AuctionEntryHandle::new(entry)),
            ],
        );
    }
}

impl AuctionHouseHooks for AuctionHouseShim {
    fn on_auction_add(&self, house: &dyn AuctionHouseObject, entry: &dyn AuctionEntryObject) {
        self.auction_event(EventKind::AuctionHouseOnAuctionAdd, house, entry);
    }

    fn on_auction_remove(&self, house: &dyn AuctionHouseObject, entry: &dyn AuctionEntryObject) {
        self.auction_event(EventKind::AuctionHouseOnAuctionRemove, house, entry);
    }

    fn on_auction_successful(&self, house: &dyn AuctionHouseObject, entry: &dyn AuctionEntryObject) {
        self.auction_event(EventKind::AuctionHouseOnAuctionSuccessful, house, entry);
    }

    fn on_auction_expire(&self, house: &dyn AuctionHouseObject, entry: &dyn AuctionEntryObject) {
        self.auction_event(EventKind::AuctionHouseOnAuctionExpire, house, entry);
    }
}
