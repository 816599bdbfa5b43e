//! Native hook shims.
//!
//! One shim per hook family. A shim converts the engine's callback arguments into an
//! [`EventArgs`] list and hands it to the bridge; by-reference arguments travel as cells so
//! scripts can rewrite them before the engine reads them back.

mod chat;
mod entity;
mod player;
mod social;
mod world;

use std::rc::Rc;

use tracing::info;

use crate::bridge::ScriptBridge;
use crate::config::ChatConfig;
use crate::engine::HookHost;
use crate::event::{Arg, DispatchOutcome, EventArgs, EventKind};

pub use chat::{GmMessage, GmMessageInterceptor};
pub use entity::{
    AchievementShim, AreaTriggerShim, BattlegroundShim, ConditionShim, CreatureShim,
    GameEventShim, GameObjectShim, InstanceShim, ItemShim, MapShim, PacketShim, QuestShim,
    SmartActionShim, SpellShim,
};
pub use player::PlayerShim;
pub use social::{AuctionHouseShim, GroupShim, GuildShim};
pub use world::{AccountShim, UnitShim, WorldShim};

fn fire(bridge: &ScriptBridge, kind: EventKind, args: Vec<Arg<'_>>) -> DispatchOutcome {
    bridge.fire(&mut EventArgs::new(kind, args))
}

fn fire_keyed(
    bridge: &ScriptBridge,
    kind: EventKind,
    entity: u32,
    args: Vec<Arg<'_>>,
) -> Option<DispatchOutcome> {
    bridge.fire_keyed(entity, &mut EventArgs::new(kind, args))
}

/// Hand every shim to the host engine.
pub fn install(host: &mut dyn HookHost, bridge: &Rc<ScriptBridge>, chat: &ChatConfig) {
    host.add_world_hooks(Box::new(WorldShim::new(Rc::clone(bridge))));
    host.add_unit_hooks(Box::new(UnitShim::new(Rc::clone(bridge))));
    host.add_player_hooks(Box::new(PlayerShim::new(
        Rc::clone(bridge),
        GmMessageInterceptor::from_config(chat),
    )));
    host.add_account_hooks(Box::new(AccountShim::new(Rc::clone(bridge))));
    host.add_guild_hooks(Box::new(GuildShim::new(Rc::clone(bridge))));
    host.add_group_hooks(Box::new(GroupShim::new(Rc::clone(bridge))));
    host.add_auction_house_hooks(Box::new(AuctionHouseShim::new(Rc::clone(bridge))));
    host.add_spell_hooks(Box::new(SpellShim::new(Rc::clone(bridge))));
    host.add_creature_hooks(Box::new(CreatureShim::new(Rc::clone(bridge))));
    host.add_quest_hooks(Box::new(QuestShim::new(Rc::clone(bridge))));
    host.add_game_object_hooks(Box::new(GameObjectShim::new(Rc::clone(bridge))));
    host.add_item_hooks(Box::new(ItemShim::new(Rc::clone(bridge))));
    host.add_map_hooks(Box::new(MapShim::new(Rc::clone(bridge))));
    host.add_battleground_hooks(Box::new(BattlegroundShim::new(Rc::clone(bridge))));
    host.add_instance_hooks(Box::new(InstanceShim::new(Rc::clone(bridge))));
    host.add_game_event_hooks(Box::new(GameEventShim::new(Rc::clone(bridge))));
    host.add_smart_action_hooks(Box::new(SmartActionShim::new(Rc::clone(bridge))));
    host.add_condition_hooks(Box::new(ConditionShim::new(Rc::clone(bridge))));
    host.add_achievement_hooks(Box::new(AchievementShim::new(Rc::clone(bridge))));
    host.add_area_trigger_hooks(Box::new(AreaTriggerShim::new(Rc::clone(bridge))));
    host.add_packet_hooks(Box::new(PacketShim::new(Rc::clone(bridge))));

    info!(
        gm_intercept = chat.gm_intercept,
        "Installed script hooks for 21 hook families"
    );
}
