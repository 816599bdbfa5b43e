//! Hook families the host engine calls into.
//!
//! Each trait is one callback interface of the engine. Every method has an empty default body so
//! an implementor only overrides what it handles. By-reference arguments (`&mut`) may be changed
//! by the implementor and the engine reads them back after the call returns. Methods returning
//! `bool` are veto hooks: the engine honors the returned value.

use super::objects::{
    AuctionEntryObject, AuctionHouseObject, ChannelObject, CreatureObject, GameObjectObject,
    GroupObject, GuildObject, ItemObject, LootObject, PlayerObject, QuestObject, SpellObject,
    UnitObject,
};

/// Who a chat message is addressed to.
#[derive(Clone, Copy)]
pub enum ChatRecipient<'a> {
    /// Said or yelled to the surroundings.
    None,
    /// Whisper to another player.
    Player(&'a dyn PlayerObject),
    /// Party or raid chat.
    Group(&'a dyn GroupObject),
    /// Guild or officer chat.
    Guild(&'a dyn GuildObject),
    /// Chat channel message.
    Channel(&'a dyn ChannelObject),
}

pub trait WorldHooks {
    fn on_open_state_change(&self, _open: bool) {}
    fn on_config_load(&self, _reload: bool) {}
    fn on_startup(&self) {}
    fn on_shutdown(&self) {}
    fn on_shutdown_cancel(&self) {}
    fn on_motd_change(&self, _motd: &str) {}
    fn on_shutdown_initiate(&self, _code: u32, _mask: u32) {}
    fn on_update(&self, _diff: u32) {}
}

pub trait UnitHooks {
    fn on_heal(
        &self,
        _healer: Option<&dyn UnitObject>,
        _receiver: Option<&dyn UnitObject>,
        _gain: &mut u32,
    ) {
    }
}

pub trait PlayerHooks {
    fn on_pvp_kill(&self, _killer: &dyn PlayerObject, _killed: &dyn PlayerObject) {}
    fn on_creature_kill(&self, _killer: &dyn PlayerObject, _killed: &dyn CreatureObject) {}
    fn on_killed_by_creature(&self, _killer: &dyn CreatureObject, _killed: &dyn PlayerObject) {}
    fn on_level_changed(&self, _player: &dyn PlayerObject, _old_level: u8) {}
    fn on_free_talent_points_changed(&self, _player: &dyn PlayerObject, _points: u32) {}
    fn on_talents_reset(&self, _player: &dyn PlayerObject, _no_cost: bool) {}
    fn on_money_changed(&self, _player: &dyn PlayerObject, _amount: &mut i32) {}
    fn on_money_limit(&self, _player: &dyn PlayerObject, _amount: i32) {}
    fn on_give_xp(
        &self,
        _player: &dyn PlayerObject,
        _amount: &mut u32,
        _victim: Option<&dyn UnitObject>,
    ) {
    }
    fn on_reputation_change(
        &self,
        _player: &dyn PlayerObject,
        _faction_id: u32,
        _standing: &mut i32,
        _incremental: bool,
    ) {
    }
    fn on_duel_request(&self, _target: &dyn PlayerObject, _challenger: &dyn PlayerObject) {}
    fn on_duel_start(&self, _first: &dyn PlayerObject, _second: &dyn PlayerObject) {}
    fn on_duel_end(&self, _winner: &dyn PlayerObject, _loser: &dyn PlayerObject, _kind: u32) {}
    fn on_chat(
        &self,
        _player: &dyn PlayerObject,
        _chat_type: u32,
        _lang: u32,
        _msg: &mut String,
        _recipient: ChatRecipient<'_>,
    ) {
    }
    fn on_text_emote(
        &self,
        _player: &dyn PlayerObject,
        _text_emote: u32,
        _emote_num: u32,
        _target_guid: u64,
    ) {
    }
    fn on_spell_cast(&self, _player: &dyn PlayerObject, _spell: &dyn SpellObject, _skip_check: bool) {
    }
    fn on_login(&self, _player: &dyn PlayerObject, _first_login: bool) {}
    fn on_logout(&self, _player: &dyn PlayerObject) {}
    fn on_create(&self, _player: &dyn PlayerObject) {}
    fn on_delete(&self, _guid: u64, _account_id: u32) {}
    fn on_failed_delete(&self, _guid: u64, _account_id: u32) {}
    fn on_save(&self, _player: &dyn PlayerObject) {}
    fn on_update_zone(&self, _player: &dyn PlayerObject, _new_zone: u32, _new_area: u32) {}
    fn on_map_changed(&self, _player: &dyn PlayerObject) {}
    fn on_quest_objective_progress(
        &self,
        _player: &dyn PlayerObject,
        _quest: &dyn QuestObject,
        _objective_index: u32,
        _progress: u16,
    ) {
    }
    fn on_quest_status_change(&self, _player: &dyn PlayerObject, _quest_id: u32) {}
    fn on_movie_complete(&self, _player: &dyn PlayerObject, _movie_id: u32) {}
    fn on_repop(&self, _player: &dyn PlayerObject) {}
}

pub trait AccountHooks {
    fn on_account_login(&self, _account_id: u32) {}
    fn on_failed_account_login(&self, _account_id: u32) {}
    fn on_email_change(&self, _account_id: u32) {}
    fn on_failed_email_change(&self, _account_id: u32) {}
    fn on_password_change(&self, _account_id: u32) {}
    fn on_failed_password_change(&self, _account_id: u32) {}
}

pub trait GuildHooks {
    fn on_add_member(&self, _guild: &dyn GuildObject, _player: &dyn PlayerObject, _rank: &mut u8) {
    }
    fn on_remove_member(
        &self,
        _guild: &dyn GuildObject,
        _player: &dyn PlayerObject,
        _is_disbanding: bool,
        _is_kicked: bool,
    ) {
    }
    fn on_motd_changed(&self, _guild: &dyn GuildObject, _motd: &str) {}
    fn on_info_changed(&self, _guild: &dyn GuildObject, _info: &str) {}
    fn on_create(&self, _guild: &dyn GuildObject, _leader: &dyn PlayerObject, _name: &str) {}
    fn on_disband(&self, _guild: &dyn GuildObject) {}
    fn on_member_withdraw_money(
        &self,
        _guild: &dyn GuildObject,
        _player: &dyn PlayerObject,
        _amount: &mut u32,
        _is_repair: bool,
    ) {
    }
    fn on_member_deposit_money(
        &self,
        _guild: &dyn GuildObject,
        _player: &dyn PlayerObject,
        _amount: &mut u32,
    ) {
    }
    fn on_event(
        &self,
        _guild: &dyn GuildObject,
        _event_type: u8,
        _player_guid1: u32,
        _player_guid2: u32,
        _new_rank: u8,
    ) {
    }
    #[allow(clippy::too_many_arguments)]
    fn on_bank_event(
        &self,
        _guild: &dyn GuildObject,
        _event_type: u8,
        _tab_id: u8,
        _player_guid: u32,
        _item_or_money: u32,
        _item_stack_count: u16,
        _dest_tab_id: u8,
    ) {
    }
}

pub trait GroupHooks {
    fn on_add_member(&self, _group: &dyn GroupObject, _guid: u64) {}
    fn on_invite_member(&self, _group: &dyn GroupObject, _guid: u64) {}
    fn on_remove_member(
        &self,
        _group: &dyn GroupObject,
        _guid: u64,
        _method: u32,
        _kicker: u64,
        _reason: &str,
    ) {
    }
    fn on_change_leader(&self, _group: &dyn GroupObject, _new_leader: u64, _old_leader: u64) {}
    fn on_disband(&self, _group: &dyn GroupObject) {}
}

pub trait AuctionHouseHooks {
    fn on_auction_add(&self, _house: &dyn AuctionHouseObject, _entry: &dyn AuctionEntryObject) {}
    fn on_auction_remove(&self, _house: &dyn AuctionHouseObject, _entry: &dyn AuctionEntryObject) {
    }
    fn on_auction_successful(
        &self,
        _house: &dyn AuctionHouseObject,
        _entry: &dyn AuctionEntryObject,
    ) {
    }
    fn on_auction_expire(&self, _house: &dyn AuctionHouseObject, _entry: &dyn AuctionEntryObject) {
    }
}

pub trait SpellHooks {
    fn on_cast(&self, _spell: &dyn SpellObject) {}
    /// Returns the cast result code the engine should use (0 = success).
    fn on_check_cast(&self, _spell: &dyn SpellObject, result: i32) -> i32 {
        result
    }
}

pub trait CreatureHooks {
    fn on_death(&self, _creature: &dyn CreatureObject, _killer: Option<&dyn UnitObject>) {}
    fn on_generate_loot(
        &self,
        _creature: &dyn CreatureObject,
        _loot: &dyn LootObject,
        _looter: Option<&dyn PlayerObject>,
    ) {
    }
}

pub trait QuestHooks {
    /// Returns whether the player may accept the quest.
    fn on_accept(&self, _quest: &dyn QuestObject, _player: &dyn PlayerObject) -> bool {
        true
    }
    fn on_reward(&self, _quest: &dyn QuestObject, _player: &dyn PlayerObject, _choice: u32) {}
}

pub trait GameObjectHooks {
    /// Returns true when the use was handled and the engine default must not run.
    fn on_use(&self, _object: &dyn GameObjectObject, _player: &dyn PlayerObject) -> bool {
        false
    }
    fn on_generate_loot(
        &self,
        _object: &dyn GameObjectObject,
        _loot: &dyn LootObject,
        _looter: Option<&dyn PlayerObject>,
    ) {
    }
}

pub trait ItemHooks {
    /// Returns true when the use was handled and the engine default must not run.
    fn on_use(&self, _item: &dyn ItemObject, _player: &dyn PlayerObject) -> bool {
        false
    }
    fn on_equip(&self, _item: &dyn ItemObject, _player: &dyn PlayerObject, _slot: u32) {}
}

pub trait MapHooks {
    fn on_player_enter(&self, _map_id: u32, _player: &dyn PlayerObject) {}
    fn on_player_leave(&self, _map_id: u32, _player: &dyn PlayerObject) {}
}

pub trait BattlegroundHooks {
    fn on_start(&self, _bg_type_id: u32, _instance_id: u32) {}
    fn on_end(&self, _bg_type_id: u32, _instance_id: u32, _winner_team: u32) {}
}

pub trait InstanceHooks {
    fn on_create(&self, _map_id: u32, _instance_id: u32) {}
    fn on_player_enter(&self, _map_id: u32, _instance_id: u32, _player: &dyn PlayerObject) {}
}

pub trait GameEventHooks {
    fn on_start(&self, _event_id: u32) {}
    fn on_stop(&self, _event_id: u32) {}
}

pub trait SmartActionHooks {
    fn on_activate(
        &self,
        _action_id: u32,
        _source: Option<&dyn UnitObject>,
        _target: Option<&dyn UnitObject>,
    ) {
    }
}

pub trait ConditionHooks {
    /// Returns whether the condition holds.
    fn on_check(&self, _condition_type: u32, _player: Option<&dyn PlayerObject>, result: bool) -> bool {
        result
    }
}

pub trait AchievementHooks {
    fn on_complete(&self, _achievement_id: u32, _player: &dyn PlayerObject) {}
}

pub trait AreaTriggerHooks {
    /// Returns true when the trigger was handled and the engine default must not run.
    fn on_trigger(&self, _trigger_id: u32, _player: &dyn PlayerObject) -> bool {
        false
    }
}

pub trait PacketHooks {
    /// Custom addon packet from a client.
    fn on_custom_packet(&self, _opcode: u32, _size: u32, _player: &dyn PlayerObject) {}
    /// Returns true when the world packet must be dropped.
    fn on_world_packet(&self, _opcode: u32, _player: Option<&dyn PlayerObject>) -> bool {
        false
    }
}

/// Registration seam of the host engine: where hook implementations are handed over.
pub trait HookHost {
    fn add_world_hooks(&mut self, hooks: Box<dyn WorldHooks>);
    fn add_unit_hooks(&mut self, hooks: Box<dyn UnitHooks>);
    fn add_player_hooks(&mut self, hooks: Box<dyn PlayerHooks>);
    fn add_account_hooks(&mut self, hooks: Box<dyn AccountHooks>);
    fn add_guild_hooks(&mut self, hooks: Box<dyn GuildHooks>);
    fn add_group_hooks(&mut self, hooks: Box<dyn GroupHooks>);
    fn add_auction_house_hooks(&mut self, hooks: Box<dyn AuctionHouseHooks>);
    fn add_spell_hooks(&mut self, hooks: Box<dyn SpellHooks>);
    fn add_creature_hooks(&mut self, hooks: Box<dyn CreatureHooks>);
    fn add_quest_hooks(&mut self, hooks: Box<dyn QuestHooks>);
    fn add_game_object_hooks(&mut self, hooks: Box<dyn GameObjectHooks>);
    fn add_item_hooks(&mut self, hooks: Box<dyn ItemHooks>);
    fn add_map_hooks(&mut self, hooks: Box<dyn MapHooks>);
    fn add_battleground_hooks(&mut self, hooks: Box<dyn BattlegroundHooks>);
    fn add_instance_hooks(&mut self, hooks: Box<dyn InstanceHooks>);
    fn add_game_event_hooks(&mut self, hooks: Box<dyn GameEventHooks>);
    fn add_smart_action_hooks(&mut self, hooks: Box<dyn SmartActionHooks>);
    fn add_condition_hooks(&mut self, hooks: Box<dyn ConditionHooks>);
    fn add_achievement_hooks(&mut self, hooks: Box<dyn AchievementHooks>);
    fn add_area_trigger_hooks(&mut self, hooks: Box<dyn AreaTriggerHooks>);
    fn add_packet_hooks(&mut self, hooks: Box<dyn PacketHooks>);
}
