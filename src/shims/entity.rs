//! Entity-keyed hook shims.
//!
//! These hooks dispatch only to handlers registered for one specific entity id (a spell id, a
//! creature entry, a map id...). Veto hooks hand scripts a cell seeded with the engine's answer
//! and return whatever the cell holds once every handler ran.

use std::rc::Rc;

use super::fire_keyed;
use crate::bridge::ScriptBridge;
use crate::engine::{
    AchievementHooks, AreaTriggerHooks, BattlegroundHooks, ConditionHooks, CreatureHooks,
    CreatureObject, GameEventHooks, GameObjectHooks, GameObjectObject, InstanceHooks, ItemHooks,
    ItemObject, LootObject, MapHooks, PacketHooks, PlayerObject, QuestHooks, QuestObject,
    SmartActionHooks, SpellHooks, SpellObject, UnitObject,
};
use crate::event::{Arg, EventKind, MutableCell};
use crate::handle::{
    CreatureHandle, GameObjectHandle, ItemHandle, LootHandle, PlayerHandle, QuestHandle,
    SpellHandle, UnitHandle,
};

/// Declares a shim struct holding the bridge.
macro_rules! keyed_shim {
    ($($name:ident),* $(,)?) => {
        $(
            pub struct $name {
                bridge: Rc<ScriptBridge>,
            }

            impl $name {
                pub fn new(bridge: Rc<ScriptBridge>) -> Self {
                    Self { bridge }
                }
            }
        )*
    };
}

keyed_shim!(
    SpellShim,
    CreatureShim,
    QuestShim,
    GameObjectShim,
    ItemShim,
    MapShim,
    BattlegroundShim,
    InstanceShim,
    GameEventShim,
    SmartActionShim,
    ConditionShim,
    AchievementShim,
    AreaTriggerShim,
    PacketShim,
);

fn player(p: &dyn PlayerObject) -> Arg<'_> {
    Arg::Player(PlayerHandle::new(p))
}

impl SpellHooks for SpellShim {
    fn on_cast(&self, spell: &dyn SpellObject) {
        fire_keyed(
            &self.bridge,
            EventKind::SpellOnCast,
            spell.spell_id(),
            vec![Arg::Spell(SpellHandle::new(spell))],
        );
    }

    fn on_check_cast(&self, spell: &dyn SpellObject, result: i32) -> i32 {
        let mut result = result;
        fire_keyed(
            &self.bridge,
            EventKind::SpellOnCheckCast,
            spell.spell_id(),
            vec![
                Arg::Spell(SpellHandle::new(spell)),
                Arg::MutI32(MutableCell::new(&mut result)),
            ],
        );
        result
    }
}

impl CreatureHooks for CreatureShim {
    fn on_death(&self, creature: &dyn CreatureObject, killer: Option<&dyn UnitObject>) {
        fire_keyed(
            &self.bridge,
            EventKind::CreatureOnDeath,
            creature.entry(),
            vec![
                Arg::Creature(CreatureHandle::new(creature)),
                Arg::Unit(UnitHandle::from_option(killer)),
            ],
        );
    }

    fn on_generate_loot(
        &self,
        creature: &dyn CreatureObject,
        loot: &dyn LootObject,
        looter: Option<&dyn PlayerObject>,
    ) {
        fire_keyed(
            &self.bridge,
            EventKind::CreatureOnGenerateLoot,
            creature.entry(),
            vec![
                Arg::Creature(CreatureHandle::new(creature)),
                Arg::Loot(LootHandle::new(loot)),
                Arg::Player(PlayerHandle::from_option(looter)),
            ],
        );
    }
}

impl QuestHooks for QuestShim {
    fn on_accept(&self, quest: &dyn QuestObject, p: &dyn PlayerObject) -> bool {
        let mut allowed = true;
        fire_keyed(
            &self.bridge,
            EventKind::QuestOnAccept,
            quest.id(),
            vec![
                Arg::Quest(QuestHandle::new(quest)),
                player(p),
                Arg::MutBool(MutableCell::new(&mut allowed)),
            ],
        );
        allowed
    }

    fn on_reward(&self, quest: &dyn QuestObject, p: &dyn PlayerObject, choice: u32) {
        fire_keyed(
            &self.bridge,
            EventKind::QuestOnReward,
            quest.id(),
            vec![
                Arg::Quest(QuestHandle::new(quest)),
                player(p),
                Arg::UInt(choice.into()),
            ],
        );
    }
}

impl GameObjectHooks for GameObjectShim {
    fn on_use(&self, object: &dyn GameObjectObject, p: &dyn PlayerObject) -> bool {
        let mut handled = false;
        fire_keyed(
            &self.bridge,
            EventKind::GameObjectOnUse,
            object.entry(),
            vec![
                Arg::GameObject(GameObjectHandle::new(object)),
                player(p),
                Arg::MutBool(MutableCell::new(&mut handled)),
            ],
        );
        handled
    }

    fn on_generate_loot(
        &self,
        object: &dyn GameObjectObject,
        loot: &dyn LootObject,
        looter: Option<&dyn PlayerObject>,
    ) {
        fire_keyed(
            &self.bridge,
            EventKind::GameObjectOnGenerateLoot,
            object.entry(),
            vec![
                Arg::GameObject(GameObjectHandle::new(object)),
                Arg::Loot(LootHandle::new(loot)),
                Arg::Player(PlayerHandle::from_option(looter)),
            ],
        );
    }
}

impl ItemHooks for ItemShim {
    fn on_use(&self, item: &dyn ItemObject, p: &dyn PlayerObject) -> bool {
        let mut handled = false;
        fire_keyed(
            &self.bridge,
            EventKind::ItemOnUse,
            item.entry(),
            vec![
                Arg::Item(ItemHandle::new(item)),
                player(p),
                Arg::MutBool(MutableCell::new(&mut handled)),
            ],
        );
        handled
    }

    fn on_equip(&self, item: &dyn ItemObject, p: &dyn PlayerObject, slot: u32) {
        fire_keyed(
            &self.bridge,
            EventKind::ItemOnEquip,
            item.entry(),
            vec![Arg::Item(ItemHandle::new(item)), player(p), Arg::UInt(slot.into())],
        );
    }
}

impl MapHooks for MapShim {
    fn on_player_enter(&self, map_id: u32, p: &dyn PlayerObject) {
        fire_keyed(
            &self.bridge,
            EventKind::MapOnPlayerEnter,
            map_id,
            vec![Arg::UInt(map_id.into()), player(p)],
        );
    }

    fn on_player_leave(&self, map_id: u32, p: &dyn PlayerObject) {
        fire_keyed(
            &self.bridge,
            EventKind::MapOnPlayerLeave,
            map_id,
            vec![Arg::UInt(map_id.into()), player(p)],
        );
    }
}

impl BattlegroundHooks for BattlegroundShim {
    fn on_start(&self, bg_type_id: u32, instance_id: u32) {
        fire_keyed(
            &self.bridge,
            EventKind::BattlegroundOnStart,
            bg_type_id,
            vec![Arg::UInt(bg_type_id.into()), Arg::UInt(instance_id.into())],
        );
    }

    fn on_end(&self, bg_type_id: u32, instance_id: u32, winner_team: u32) {
        fire_keyed(
            &self.bridge,
            EventKind::BattlegroundOnEnd,
            bg_type_id,
            vec![
                Arg::UInt(bg_type_id.into()),
                Arg::UInt(instance_id.into()),
                Arg::UInt(winner_team.into()),
            ],
        );
    }
}

impl InstanceHooks for InstanceShim {
    fn on_create(&self, map_id: u32, instance_id: u32) {
        fire_keyed(
            &self.bridge,
            EventKind::InstanceOnCreate,
            map_id,
            vec![Arg::UInt(map_id.into()), Arg::UInt(instance_id.into())],
        );
    }

    fn on_player_enter(&self, map_id: u32, instance_id: u32, p: &dyn PlayerObject) {
        fire_keyed(
            &self.bridge,
            EventKind::InstanceOnPlayerEnter,
            map_id,
            vec![Arg::UInt(map_id.into()), Arg::UInt(instance_id.into()), player(p)],
        );
    }
}

impl GameEventHooks for GameEventShim {
    fn on_start(&self, event_id: u32) {
        fire_keyed(
            &self.bridge,
            EventKind::GameEventOnStart,
            event_id,
            vec![Arg::UInt(event_id.into())],
        );
    }

    fn on_stop(&self, event_id: u32) {
        fire_keyed(
            &self.bridge,
            EventKind::GameEventOnStop,
            event_id,
            vec![Arg::UInt(event_id.into())],
        );
    }
}

impl SmartActionHooks for SmartActionShim {
    fn on_activate(
        &self,
        action_id: u32,
        source: Option<&dyn UnitObject>,
        target: Option<&dyn UnitObject>,
    ) {
        fire_keyed(
            &self.bridge,
            EventKind::SmartActionOnActivate,
            action_id,
            vec![
                Arg::UInt(action_id.into()),
                Arg::Unit(UnitHandle::from_option(source)),
                Arg::Unit(UnitHandle::from_option(target)),
            ],
        );
    }
}

impl ConditionHooks for ConditionShim {
    fn on_check(&self, condition_type: u32, p: Option<&dyn PlayerObject>, result: bool) -> bool {
        let mut result = result;
        fire_keyed(
            &self.bridge,
            EventKind::ConditionOnCheck,
            condition_type,
            vec![
                Arg::UInt(condition_type.into()),
                Arg::Player(PlayerHandle::from_option(p)),
                Arg::MutBool(MutableCell::new(&mut result)),
            ],
        );
        result
    }
}

impl AchievementHooks for AchievementShim {
    fn on_complete(&self, achievement_id: u32, p: &dyn PlayerObject) {
        fire_keyed(
            &self.bridge,
            EventKind::AchievementOnComplete,
            achievement_id,
            vec![Arg::UInt(achievement_id.into()), player(p)],
        );
    }
}

impl AreaTriggerHooks for AreaTriggerShim {
    fn on_trigger(&self, trigger_id: u32, p: &dyn PlayerObject) -> bool {
        let mut handled = false;
        fire_keyed(
            &self.bridge,
            EventKind::AreaTriggerOnTrigger,
            trigger_id,
            vec![
                Arg::UInt(trigger_id.into()),
                player(p),
                Arg::MutBool(MutableCell::new(&mut handled)),
            ],
        );
        handled
    }
}

impl PacketHooks for PacketShim {
    fn on_custom_packet(&self, opcode: u32, size: u32, p: &dyn PlayerObject) {
        fire_keyed(
            &self.bridge,
            EventKind::PacketOnCustom,
            opcode,
            vec![Arg::UInt(opcode.into()), Arg::UInt(size.into()), player(p)],
        );
    }

    fn on_world_packet(&self, opcode: u32, p: Option<&dyn PlayerObject>) -> bool {
        let mut drop_packet = false;
        fire_keyed(
            &self.bridge,
            EventKind::WorldPacketOnReceive,
            opcode,
            vec![
                Arg::UInt(opcode.into()),
                Arg::Player(PlayerHandle::from_option(p)),
                Arg::MutBool(MutableCell::new(&mut drop_packet)),
            ],
        );
        drop_packet
    }
}
