//! Player hook shim.

use std::rc::Rc;

use super::chat::GmMessageInterceptor;
use super::{fire, fire_keyed};
use crate::bridge::ScriptBridge;
use crate::engine::{
    ChatRecipient, CreatureObject, PlayerHooks, PlayerObject, QuestObject, SpellObject,
    UnitObject,
};
use crate::event::{Arg, EventKind, MutableCell};
use crate::handle::{
    ChannelHandle, CreatureHandle, GroupHandle, GuildHandle, PlayerHandle, QuestHandle,
    SpellHandle, UnitHandle,
};

pub struct PlayerShim {
    bridge: Rc<ScriptBridge>,
    gm: GmMessageInterceptor,
}

impl PlayerShim {
    pub fn new(bridge: Rc<ScriptBridge>, gm: GmMessageInterceptor) -> Self {
        Self { bridge, gm }
    }
}

fn player(p: &dyn PlayerObject) -> Arg<'_> {
    Arg::Player(PlayerHandle::new(p))
}

impl PlayerHooks for PlayerShim {
    fn on_pvp_kill(&self, killer: &dyn PlayerObject, killed: &dyn PlayerObject) {
        fire(
            &self.bridge,
            EventKind::PlayerOnPvpKill,
            vec![player(killer), player(killed)],
        );
    }

    fn on_creature_kill(&self, killer: &dyn PlayerObject, killed: &dyn CreatureObject) {
        fire(
            &self.bridge,
            EventKind::PlayerOnCreatureKill,
            vec![player(killer), Arg::Creature(CreatureHandle::new(killed))],
        );
    }

    fn on_killed_by_creature(&self, killer: &dyn CreatureObject, killed: &dyn PlayerObject) {
        fire(
            &self.bridge,
            EventKind::PlayerOnKilledByCreature,
            vec![Arg::Creature(CreatureHandle::new(killer)), player(killed)],
        );
    }

    fn on_level_changed(&self, p: &dyn PlayerObject, old_level: u8) {
        fire(
            &self.bridge,
            EventKind::PlayerOnLevelChanged,
            vec![player(p), Arg::UInt(old_level.into())],
        );
    }

    fn on_free_talent_points_changed(&self, p: &dyn PlayerObject, points: u32) {
        fire(
            &self.bridge,
            EventKind::PlayerOnFreeTalentPointsChanged,
            vec![player(p), Arg::UInt(points.into())],
        );
    }

    fn on_talents_reset(&self, p: &dyn PlayerObject, no_cost: bool) {
        fire(
            &self.bridge,
            EventKind::PlayerOnTalentsReset,
            vec![player(p), Arg::Bool(no_cost)],
        );
    }

    fn on_money_changed(&self, p: &dyn PlayerObject, amount: &mut i32) {
        fire(
            &self.bridge,
            EventKind::PlayerOnMoneyChanged,
            vec![player(p), Arg::MutI32(MutableCell::new(amount))],
        );
    }

    fn on_money_limit(&self, p: &dyn PlayerObject, amount: i32) {
        fire(
            &self.bridge,
            EventKind::PlayerOnMoneyLimit,
            vec![player(p), Arg::Int(amount.into())],
        );
    }

    fn on_give_xp(&self, p: &dyn PlayerObject, amount: &mut u32, victim: Option<&dyn UnitObject>) {
        fire(
            &self.bridge,
            EventKind::PlayerOnGiveXp,
            vec![
                player(p),
                Arg::MutU32(MutableCell::new(amount)),
                Arg::Unit(UnitHandle::from_option(victim)),
            ],
        );
    }

    fn on_reputation_change(
        &self,
        p: &dyn PlayerObject,
        faction_id: u32,
        standing: &mut i32,
        incremental: bool,
    ) {
        fire(
            &self.bridge,
            EventKind::PlayerOnReputationChange,
            vec![
                player(p),
                Arg::UInt(faction_id.into()),
                Arg::MutI32(MutableCell::new(standing)),
                Arg::Bool(incremental),
            ],
        );
    }

    fn on_duel_request(&self, target: &dyn PlayerObject, challenger: &dyn PlayerObject) {
        fire(
            &self.bridge,
            EventKind::PlayerOnDuelRequest,
            vec![player(target), player(challenger)],
        );
    }

    fn on_duel_start(&self, first: &dyn PlayerObject, second: &dyn PlayerObject) {
        fire(
            &self.bridge,
            EventKind::PlayerOnDuelStart,
            vec![player(first), player(second)],
        );
    }

    fn on_duel_end(&self, winner: &dyn PlayerObject, loser: &dyn PlayerObject, kind: u32) {
        fire(
            &self.bridge,
            EventKind::PlayerOnDuelEnd,
            vec![player(winner), player(loser), Arg::UInt(kind.into())],
        );
    }

    fn on_chat(
        &self,
        p: &dyn PlayerObject,
        chat_type: u32,
        lang: u32,
        msg: &mut String,
        recipient: ChatRecipient<'_>,
    ) {
        let (kind, target) = match recipient {
            ChatRecipient::None => (EventKind::PlayerOnSay, None),
            ChatRecipient::Player(receiver) => {
                if self.gm.intercept(&self.bridge, p, receiver, msg) {
                    return;
                }
                (EventKind::PlayerOnWhisper, Some(player(receiver)))
            }
            ChatRecipient::Group(group) => (
                EventKind::PlayerOnChatGroup,
                Some(Arg::Group(GroupHandle::new(group))),
            ),
            ChatRecipient::Guild(guild) => (
                EventKind::PlayerOnChatGuild,
                Some(Arg::Guild(GuildHandle::new(guild))),
            ),
            ChatRecipient::Channel(channel) => (
                EventKind::PlayerOnChat,
                Some(Arg::Channel(ChannelHandle::new(channel))),
            ),
        };

        let mut args = vec![player(p)];
        args.extend(target);
        args.push(Arg::MutString(MutableCell::new(msg)));
        args.push(Arg::UInt(chat_type.into()));
        args.push(Arg::UInt(lang.into()));
        fire(&self.bridge, kind, args);
    }

    fn on_text_emote(&self, p: &dyn PlayerObject, text_emote: u32, emote_num: u32, target_guid: u64) {
        fire(
            &self.bridge,
            EventKind::PlayerOnTextEmote,
            vec![
                player(p),
                Arg::UInt(text_emote.into()),
                Arg::UInt(emote_num.into()),
                Arg::UInt(target_guid),
            ],
        );
    }

    fn on_spell_cast(&self, p: &dyn PlayerObject, spell: &dyn SpellObject, skip_check: bool) {
        fire(
            &self.bridge,
            EventKind::PlayerOnSpellCast,
            vec![player(p), Arg::Spell(SpellHandle::new(spell)), Arg::Bool(skip_check)],
        );
    }

    fn on_login(&self, p: &dyn PlayerObject, first_login: bool) {
        fire(
            &self.bridge,
            EventKind::PlayerOnLogin,
            vec![player(p), Arg::Bool(first_login)],
        );
    }

    fn on_logout(&self, p: &dyn PlayerObject) {
        fire(&self.bridge, EventKind::PlayerOnLogout, vec![player(p)]);
    }

    fn on_create(&self, p: &dyn PlayerObject) {
        fire(&self.bridge, EventKind::PlayerOnCreate, vec![player(p)]);
    }

    fn on_delete(&self, guid: u64, account_id: u32) {
        fire(
            &self.bridge,
            EventKind::PlayerOnDelete,
            vec![Arg::UInt(guid), Arg::UInt(account_id.into())],
        );
    }

    fn on_failed_delete(&self, guid: u64, account_id: u32) {
        fire(
            &self.bridge,
            EventKind::PlayerOnFailedDelete,
            vec![Arg::UInt(guid), Arg::UInt(account_id.into())],
        );
    }

    fn on_save(&self, p: &dyn PlayerObject) {
        fire(&self.bridge, EventKind::PlayerOnSave, vec![player(p)]);
    }

    fn on_update_zone(&self, p: &dyn PlayerObject, new_zone: u32, new_area: u32) {
        fire(
            &self.bridge,
            EventKind::PlayerOnUpdateZone,
            vec![player(p), Arg::UInt(new_zone.into()), Arg::UInt(new_area.into())],
        );
    }

    fn on_map_changed(&self, p: &dyn PlayerObject) {
        fire(&self.bridge, EventKind::PlayerOnMapChanged, vec![player(p)]);
    }

    fn on_quest_objective_progress(
        &self,
        p: &dyn PlayerObject,
        quest: &dyn QuestObject,
        objective_index: u32,
        progress: u16,
    ) {
        fire(
            &self.bridge,
            EventKind::PlayerOnQuestObjectiveProgress,
            vec![
                player(p),
                Arg::Quest(QuestHandle::new(quest)),
                Arg::UInt(objective_index.into()),
                Arg::UInt(progress.into()),
            ],
        );
        fire_keyed(
            &self.bridge,
            EventKind::QuestOnObjectiveProgress,
            quest.id(),
            vec![
                Arg::Quest(QuestHandle::new(quest)),
                player(p),
                Arg::UInt(objective_index.into()),
                Arg::UInt(progress.into()),
            ],
        );
    }

    fn on_quest_status_change(&self, p: &dyn PlayerObject, quest_id: u32) {
        fire(
            &self.bridge,
            EventKind::PlayerOnQuestStatusChange,
            vec![player(p), Arg::UInt(quest_id.into())],
        );
    }

    fn on_movie_complete(&self, p: &dyn PlayerObject, movie_id: u32) {
        fire(
            &self.bridge,
            EventKind::PlayerOnMovieComplete,
            vec![player(p), Arg::UInt(movie_id.into())],
        );
    }

    fn on_repop(&self, p: &dyn PlayerObject) {
        fire(&self.bridge, EventKind::PlayerOnRepop, vec![player(p)]);
    }
}
