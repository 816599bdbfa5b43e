//! Test helpers for integration tests.
//!
//! Provides fake engine objects, a hook host that keeps every installed shim, and bridge
//! constructors backed by small template tables.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use realmscript::config::ChatConfig;
use realmscript::engine::{
    AccountHooks, AchievementHooks, AreaTriggerHooks, AuctionHouseHooks, BattlegroundHooks,
    ChannelObject, ConditionHooks, CreatureHooks, CreatureObject, GameEventHooks,
    GameObjectHooks, GameObjectObject, GroupHooks, GroupObject, GuildHooks, GuildObject,
    HookHost, InstanceHooks, ItemHooks, LootObject, MapHooks, PacketHooks, PlayerHooks,
    PlayerObject, QuestHooks, QuestObject, SmartActionHooks, SpellHooks, SpellObject, UnitHooks,
    UnitObject, WorldHooks,
};
use realmscript::{EntityCategory, ScriptBridge, TemplateTables};

/// Template ids known to the test bridge.
pub const QUEST_ID: u32 = 7;
pub const SPELL_ID: u32 = 133;
pub const CREATURE_ENTRY: u32 = 299;
pub const GAME_OBJECT_ENTRY: u32 = 1731;
pub const ITEM_ENTRY: u32 = 6948;

pub fn templates() -> TemplateTables {
    TemplateTables::new()
        .with(EntityCategory::Quest, [QUEST_ID, 33])
        .with(EntityCategory::Spell, [SPELL_ID, 116])
        .with(EntityCategory::Creature, [CREATURE_ENTRY])
        .with(EntityCategory::GameObject, [GAME_OBJECT_ENTRY])
        .with(EntityCategory::Item, [ITEM_ENTRY])
        .with(EntityCategory::Map, [0, 1, 530])
}

pub fn bridge() -> Rc<ScriptBridge> {
    Rc::new(ScriptBridge::new(Rc::new(templates())))
}

/// A bridge with every shim installed into a [`TestHost`].
pub fn installed() -> (Rc<ScriptBridge>, TestHost) {
    installed_with(&ChatConfig::default())
}

pub fn installed_with(chat: &ChatConfig) -> (Rc<ScriptBridge>, TestHost) {
    let bridge = bridge();
    let mut host = TestHost::default();
    realmscript::shims::install(&mut host, &bridge, chat);
    (bridge, host)
}

pub struct FakePlayer {
    pub guid: u64,
    pub name: String,
    pub level: u32,
    pub gm: bool,
    pub money: Cell<u32>,
    pub messages: RefCell<Vec<String>>,
}

impl FakePlayer {
    pub fn new(name: &str) -> Self {
        Self {
            guid: 1,
            name: name.to_string(),
            level: 80,
            gm: false,
            money: Cell::new(0),
            messages: RefCell::new(Vec::new()),
        }
    }

    pub fn gm(name: &str) -> Self {
        Self {
            gm: true,
            ..Self::new(name)
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl PlayerObject for FakePlayer {
    fn guid(&self) -> u64 {
        self.guid
    }

    fn account_id(&self) -> u32 {
        self.guid as u32
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn money(&self) -> u32 {
        self.money.get()
    }

    fn set_money(&self, amount: u32) {
        self.money.set(amount);
    }

    fn is_gm(&self) -> bool {
        self.gm
    }

    fn send_system_message(&self, text: &str) {
        self.messages.borrow_mut().push(text.to_string());
    }
}

pub struct FakeUnit {
    pub guid: u64,
    pub entry: u32,
}

impl UnitObject for FakeUnit {
    fn guid(&self) -> u64 {
        self.guid
    }

    fn entry(&self) -> u32 {
        self.entry
    }

    fn name(&self) -> String {
        "Wolf".to_string()
    }

    fn level(&self) -> u32 {
        5
    }

    fn health(&self) -> u32 {
        42
    }

    fn max_health(&self) -> u32 {
        100
    }
}

pub struct FakeCreature {
    pub entry: u32,
}

impl CreatureObject for FakeCreature {
    fn guid(&self) -> u64 {
        9000 + u64::from(self.entry)
    }

    fn entry(&self) -> u32 {
        self.entry
    }

    fn name(&self) -> String {
        "Diseased Young Wolf".to_string()
    }

    fn level(&self) -> u32 {
        1
    }

    fn is_alive(&self) -> bool {
        false
    }
}

pub struct FakeQuest {
    pub id: u32,
}

impl QuestObject for FakeQuest {
    fn id(&self) -> u32 {
        self.id
    }

    fn level(&self) -> u32 {
        10
    }

    fn min_level(&self) -> u32 {
        8
    }

    fn flags(&self) -> u32 {
        0x8
    }

    fn quest_type(&self) -> u32 {
        0
    }

    fn next_quest_id(&self) -> i32 {
        0
    }

    fn prev_quest_id(&self) -> i32 {
        0
    }

    fn next_quest_in_chain(&self) -> i32 {
        0
    }

    fn is_daily(&self) -> bool {
        false
    }

    fn is_repeatable(&self) -> bool {
        false
    }
}

pub struct FakeSpell {
    pub id: u32,
}

impl SpellObject for FakeSpell {
    fn spell_id(&self) -> u32 {
        self.id
    }

    fn caster_guid(&self) -> u64 {
        1
    }

    fn cast_time(&self) -> u32 {
        1500
    }
}

#[derive(Default)]
pub struct FakeLoot {
    pub money: Cell<u32>,
    pub items: RefCell<Vec<(u32, u32)>>,
}

impl LootObject for FakeLoot {
    fn money(&self) -> u32 {
        self.money.get()
    }

    fn set_money(&self, amount: u32) {
        self.money.set(amount);
    }

    fn item_count(&self) -> u32 {
        self.items.borrow().len() as u32
    }

    fn add_item(&self, item_id: u32, count: u32) {
        self.items.borrow_mut().push((item_id, count));
    }

    fn clear(&self) {
        self.items.borrow_mut().clear();
        self.money.set(0);
    }

    fn is_looted(&self) -> bool {
        false
    }

    fn loot_type(&self) -> u32 {
        1
    }
}

pub struct FakeGameObject {
    pub entry: u32,
}

impl GameObjectObject for FakeGameObject {
    fn guid(&self) -> u64 {
        7000
    }

    fn entry(&self) -> u32 {
        self.entry
    }

    fn name(&self) -> String {
        "Mailbox".to_string()
    }
}

pub struct FakeGuild;

impl GuildObject for FakeGuild {
    fn id(&self) -> u32 {
        3
    }

    fn name(&self) -> String {
        "Night Watch".to_string()
    }

    fn motd(&self) -> String {
        "raid at 8".to_string()
    }

    fn member_count(&self) -> u32 {
        12
    }

    fn bank_money(&self) -> u64 {
        5000
    }
}

pub struct FakeGroup;

impl GroupObject for FakeGroup {
    fn guid(&self) -> u64 {
        77
    }

    fn leader_guid(&self) -> u64 {
        1
    }

    fn member_count(&self) -> u32 {
        5
    }

    fn is_raid(&self) -> bool {
        false
    }
}

pub struct FakeChannel {
    pub password: RefCell<String>,
}

impl ChannelObject for FakeChannel {
    fn id(&self) -> u32 {
        2
    }

    fn name(&self) -> String {
        "Trade".to_string()
    }

    fn is_constant(&self) -> bool {
        true
    }

    fn is_lfg(&self) -> bool {
        false
    }

    fn is_announce(&self) -> bool {
        false
    }

    fn password(&self) -> String {
        self.password.borrow().clone()
    }

    fn set_password(&self, password: &str) {
        *self.password.borrow_mut() = password.to_string();
    }

    fn num_players(&self) -> u32 {
        150
    }

    fn flags(&self) -> u8 {
        0x1
    }
}

/// Hook host that keeps every shim handed to it.
#[derive(Default)]
pub struct TestHost {
    pub world: Vec<Box<dyn WorldHooks>>,
    pub unit: Vec<Box<dyn UnitHooks>>,
    pub player: Vec<Box<dyn PlayerHooks>>,
    pub account: Vec<Box<dyn AccountHooks>>,
    pub guild: Vec<Box<dyn GuildHooks>>,
    pub group: Vec<Box<dyn GroupHooks>>,
    pub auction_house: Vec<Box<dyn AuctionHouseHooks>>,
    pub spell: Vec<Box<dyn SpellHooks>>,
    pub creature: Vec<Box<dyn CreatureHooks>>,
    pub quest: Vec<Box<dyn QuestHooks>>,
    pub game_object: Vec<Box<dyn GameObjectHooks>>,
    pub item: Vec<Box<dyn ItemHooks>>,
    pub map: Vec<Box<dyn MapHooks>>,
    pub battleground: Vec<Box<dyn BattlegroundHooks>>,
    pub instance: Vec<Box<dyn InstanceHooks>>,
    pub game_event: Vec<Box<dyn GameEventHooks>>,
    pub smart_action: Vec<Box<dyn SmartActionHooks>>,
    pub condition: Vec<Box<dyn ConditionHooks>>,
    pub achievement: Vec<Box<dyn AchievementHooks>>,
    pub area_trigger: Vec<Box<dyn AreaTriggerHooks>>,
    pub packet: Vec<Box<dyn PacketHooks>>,
}

impl TestHost {
    pub fn families(&self) -> usize {
        [
            self.world.len(),
            self.unit.len(),
            self.player.len(),
            self.account.len(),
            self.guild.len(),
            self.group.len(),
            self.auction_house.len(),
            self.spell.len(),
            self.creature.len(),
            self.quest.len(),
            self.game_object.len(),
            self.item.len(),
            self.map.len(),
            self.battleground.len(),
            self.instance.len(),
            self.game_event.len(),
            self.smart_action.len(),
            self.condition.len(),
            self.achievement.len(),
            self.area_trigger.len(),
            self.packet.len(),
        ]
        .iter()
        .filter(|&&n| n > 0)
        .count()
    }

    pub fn player(&self) -> &dyn PlayerHooks {
        self.player[0].as_ref()
    }

    pub fn quest(&self) -> &dyn QuestHooks {
        self.quest[0].as_ref()
    }

    pub fn spell(&self) -> &dyn SpellHooks {
        self.spell[0].as_ref()
    }

    pub fn creature(&self) -> &dyn CreatureHooks {
        self.creature[0].as_ref()
    }

    pub fn game_object(&self) -> &dyn GameObjectHooks {
        self.game_object[0].as_ref()
    }

    pub fn game_event(&self) -> &dyn GameEventHooks {
        self.game_event[0].as_ref()
    }

    pub fn map(&self) -> &dyn MapHooks {
        self.map[0].as_ref()
    }

    pub fn packet(&self) -> &dyn PacketHooks {
        self.packet[0].as_ref()
    }

    pub fn guild(&self) -> &dyn GuildHooks {
        self.guild[0].as_ref()
    }

    pub fn world(&self) -> &dyn WorldHooks {
        self.world[0].as_ref()
    }
}

impl HookHost for TestHost {
    fn add_world_hooks(&mut self, hooks: Box<dyn WorldHooks>) {
        self.world.push(hooks);
    }

    fn add_unit_hooks(&mut self, hooks: Box<dyn UnitHooks>) {
        self.unit.push(hooks);
    }

    fn add_player_hooks(&mut self, hooks: Box<dyn PlayerHooks>) {
        self.player.push(hooks);
    }

    fn add_account_hooks(&mut self, hooks: Box<dyn AccountHooks>) {
        self.account.push(hooks);
    }

    fn add_guild_hooks(&mut self, hooks: Box<dyn GuildHooks>) {
        self.guild.push(hooks);
    }

    fn add_group_hooks(&mut self, hooks: Box<dyn GroupHooks>) {
        self.group.push(hooks);
    }

    fn add_auction_house_hooks(&mut self, hooks: Box<dyn AuctionHouseHooks>) {
        self.auction_house.push(hooks);
    }

    fn add_spell_hooks(&mut self, hooks: Box<dyn SpellHooks>) {
        self.spell.push(hooks);
    }

    fn add_creature_hooks(&mut self, hooks: Box<dyn CreatureHooks>) {
        self.creature.push(hooks);
    }

    fn add_quest_hooks(&mut self, hooks: Box<dyn QuestHooks>) {
        self.quest.push(hooks);
    }

    fn add_game_object_hooks(&mut self, hooks: Box<dyn GameObjectHooks>) {
        self.game_object.push(hooks);
    }

    fn add_item_hooks(&mut self, hooks: Box<dyn ItemHooks>) {
        self.item.push(hooks);
    }

    fn add_map_hooks(&mut self, hooks: Box<dyn MapHooks>) {
        self.map.push(hooks);
    }

    fn add_battleground_hooks(&mut self, hooks: Box<dyn BattlegroundHooks>) {
        self.battleground.push(hooks);
    }

    fn add_instance_hooks(&mut self, hooks: Box<dyn InstanceHooks>) {
        self.instance.push(hooks);
    }

    fn add_game_event_hooks(&mut self, hooks: Box<dyn GameEventHooks>) {
        self.game_event.push(hooks);
    }

    fn add_smart_action_hooks(&mut self, hooks: Box<dyn SmartActionHooks>) {
        self.smart_action.push(hooks);
    }

    fn add_condition_hooks(&mut self, hooks: Box<dyn ConditionHooks>) {
        self.condition.push(hooks);
    }

    fn add_achievement_hooks(&mut self, hooks: Box<dyn AchievementHooks>) {
        self.achievement.push(hooks);
    }

    fn add_area_trigger_hooks(&mut self, hooks: Box<dyn AreaTriggerHooks>) {
        self.area_trigger.push(hooks);
    }

    fn add_packet_hooks(&mut self, hooks: Box<dyn PacketHooks>) {
        self.packet.push(hooks);
    }
}
