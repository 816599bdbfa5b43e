//! Lua views of handles and cells, and the Lua-backed handler.
//!
//! Handles and cells are handed to Lua as scoped userdata: they are valid only for the duration
//! of the handler call. A script that stashes one in a global gets an error when it touches it
//! later.

use std::rc::Rc;

use mlua::{Function, IntoLua, MultiValue, UserData, UserDataMethods, Value};

use super::engine::ScriptEngine;
use crate::error::HandlerError;
use crate::event::{Arg, EventArgs, MutableCell, ScriptCallback};
use crate::handle::{
    AuctionEntryHandle, AuctionHouseHandle, ChannelHandle, CreatureHandle, GameObjectHandle,
    GroupHandle, GuildHandle, ItemHandle, LootHandle, PlayerHandle, QuestHandle, SpellHandle,
    UnitHandle,
};

impl UserData for PlayerHandle<'_> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("IsNull", |_, this, ()| Ok(this.is_null()));
        methods.add_method("GetGUID", |_, this, ()| Ok(this.guid()));
        methods.add_method("GetAccountId", |_, this, ()| Ok(this.account_id()));
        methods.add_method("GetName", |_, this, ()| Ok(this.name()));
        methods.add_method("GetLevel", |_, this, ()| Ok(this.level()));
        methods.add_method("GetMoney", |_, this, ()| Ok(this.money()));
        methods.add_method("SetMoney", |_, this, amount: u32| {
            this.set_money(amount);
            Ok(())
        });
        methods.add_method("IsGM", |_, this, ()| Ok(this.is_gm()));
        methods.add_method("SendSystemMessage", |_, this, text: String| {
            this.send_system_message(&text);
            Ok(())
        });
    }
}

impl UserData for UnitHandle<'_> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("IsNull", |_, this, ()| Ok(this.is_null()));
        methods.add_method("GetGUID", |_, this, ()| Ok(this.guid()));
        methods.add_method("GetEntry", |_, this, ()| Ok(this.entry()));
        methods.add_method("GetName", |_, this, ()| Ok(this.name()));
        methods.add_method("GetLevel", |_, this, ()| Ok(this.level()));
        methods.add_method("GetHealth", |_, this, ()| Ok(this.health()));
        methods.add_method("GetMaxHealth", |_, this, ()| Ok(this.max_health()));
        methods.add_method("IsAlive", |_, this, ()| Ok(this.is_alive()));
    }
}

impl UserData for CreatureHandle<'_> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("IsNull", |_, this, ()| Ok(this.is_null()));
        methods.add_method("GetGUID", |_, this, ()| Ok(this.guid()));
        methods.add_method("GetEntry", |_, this, ()| Ok(this.entry()));
        methods.add_method("GetName", |_, this, ()| Ok(this.name()));
        methods.add_method("GetLevel", |_, this, ()| Ok(this.level()));
        methods.add_method("IsAlive", |_, this, ()| Ok(this.is_alive()));
    }
}

impl UserData for GuildHandle<'_> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("IsNull", |_, this, ()| Ok(this.is_null()));
        methods.add_method("GetId", |_, this, ()| Ok(this.id()));
        methods.add_method("GetName", |_, this, ()| Ok(this.name()));
        methods.add_method("GetMOTD", |_, this, ()| Ok(this.motd()));
        methods.add_method("GetMemberCount", |_, this, ()| Ok(this.member_count()));
        methods.add_method("GetBankMoney", |_, this, ()| Ok(this.bank_money()));
    }
}

impl UserData for GroupHandle<'_> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("IsNull", |_, this, ()| Ok(this.is_null()));
        methods.add_method("GetGUID", |_, this, ()| Ok(this.guid()));
        methods.add_method("GetLeaderGUID", |_, this, ()| Ok(this.leader_guid()));
        methods.add_method("GetMembersCount", |_, this, ()| Ok(this.member_count()));
        methods.add_method("IsRaidGroup", |_, this, ()| Ok(this.is_raid()));
    }
}

impl UserData for ChannelHandle<'_> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("IsNull", |_, this, ()| Ok(this.is_null()));
        methods.add_method("GetId", |_, this, ()| Ok(this.id()));
        methods.add_method("GetName", |_, this, locale: Option<u32>| {
            Ok(match locale {
                Some(locale) => this.name_for_locale(locale),
                None => this.name(),
            })
        });
        methods.add_method("IsConstant", |_, this, ()| Ok(this.is_constant()));
        methods.add_method("IsLFG", |_, this, ()| Ok(this.is_lfg()));
        methods.add_method("IsAnnounce", |_, this, ()| Ok(this.is_announce()));
        methods.add_method("SetAnnounce", |_, this, announce: bool| {
            this.set_announce(announce);
            Ok(())
        });
        methods.add_method("SetInvisible", |_, this, invisible: bool| {
            this.set_invisible(invisible);
            Ok(())
        });
        methods.add_method("SetDirty", |_, this, ()| {
            this.set_dirty();
            Ok(())
        });
        methods.add_method("SetPassword", |_, this, password: String| {
            this.set_password(&password);
            Ok(())
        });
        methods.add_method("CheckPassword", |_, this, password: String| {
            Ok(this.check_password(&password))
        });
        methods.add_method("GetNumPlayers", |_, this, ()| Ok(this.num_players()));
        methods.add_method("GetFlags", |_, this, ()| Ok(this.flags()));
        methods.add_method("HasFlag", |_, this, flag: u8| Ok(this.has_flag(flag)));
    }
}

impl UserData for QuestHandle<'_> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("IsNull", |_, this, ()| Ok(this.is_null()));
        methods.add_method("GetId", |_, this, ()| Ok(this.id()));
        methods.add_method("GetLevel", |_, this, ()| Ok(this.level()));
        methods.add_method("GetMinLevel", |_, this, ()| Ok(this.min_level()));
        methods.add_method("GetFlags", |_, this, ()| Ok(this.flags()));
        methods.add_method("HasFlag", |_, this, flag: u32| Ok(this.has_flag(flag)));
        methods.add_method("GetType", |_, this, ()| Ok(this.quest_type()));
        methods.add_method("GetNextQuestId", |_, this, ()| Ok(this.next_quest_id()));
        methods.add_method("GetPrevQuestId", |_, this, ()| Ok(this.prev_quest_id()));
        methods.add_method("GetNextQuestInChain", |_, this, ()| {
            Ok(this.next_quest_in_chain())
        });
        methods.add_method("IsDaily", |_, this, ()| Ok(this.is_daily()));
        methods.add_method("IsRepeatable", |_, this, ()| Ok(this.is_repeatable()));
    }
}

impl UserData for SpellHandle<'_> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("IsNull", |_, this, ()| Ok(this.is_null()));
        methods.add_method("GetEntry", |_, this, ()| Ok(this.spell_id()));
        methods.add_method("GetCasterGUID", |_, this, ()| Ok(this.caster_guid()));
        methods.add_method("GetCastTime", |_, this, ()| Ok(this.cast_time()));
    }
}

impl UserData for LootHandle<'_> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("IsNull", |_, this, ()| Ok(this.is_null()));
        methods.add_method("GetMoney", |_, this, ()| Ok(this.money()));
        methods.add_method("SetMoney", |_, this, amount: u32| {
            this.set_money(amount);
            Ok(())
        });
        methods.add_method("GetItemCount", |_, this, ()| Ok(this.item_count()));
        methods.add_method("AddItem", |_, this, (item_id, count): (u32, Option<u32>)| {
            this.add_item(item_id, count.unwrap_or(1));
            Ok(())
        });
        methods.add_method("Clear", |_, this, ()| {
            this.clear();
            Ok(())
        });
        methods.add_method("IsLooted", |_, this, ()| Ok(this.is_looted()));
        methods.add_method("GetLootType", |_, this, ()| Ok(this.loot_type()));
    }
}

impl UserData for ItemHandle<'_> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("IsNull", |_, this, ()| Ok(this.is_null()));
        methods.add_method("GetGUID", |_, this, ()| Ok(this.guid()));
        methods.add_method("GetEntry", |_, this, ()| Ok(this.entry()));
        methods.add_method("GetCount", |_, this, ()| Ok(this.count()));
        methods.add_method("GetOwnerGUID", |_, this, ()| Ok(this.owner_guid()));
    }
}

impl UserData for GameObjectHandle<'_> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("IsNull", |_, this, ()| Ok(this.is_null()));
        methods.add_method("GetGUID", |_, this, ()| Ok(this.guid()));
        methods.add_method("GetEntry", |_, this, ()| Ok(this.entry()));
        methods.add_method("GetName", |_, this, ()| Ok(this.name()));
    }
}

impl UserData for AuctionHouseHandle<'_> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("IsNull", |_, this, ()| Ok(this.is_null()));
        methods.add_method("GetId", |_, this, ()| Ok(this.id()));
        methods.add_method("GetAuctionCount", |_, this, ()| Ok(this.auction_count()));
    }
}

impl UserData for AuctionEntryHandle<'_> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("IsNull", |_, this, ()| Ok(this.is_null()));
        methods.add_method("GetId", |_, this, ()| Ok(this.id()));
        methods.add_method("GetItemEntry", |_, this, ()| Ok(this.item_entry()));
        methods.add_method("GetOwnerGUID", |_, this, ()| Ok(this.owner_guid()));
        methods.add_method("GetBid", |_, this, ()| Ok(this.bid()));
        methods.add_method("GetBuyout", |_, this, ()| Ok(this.buyout()));
    }
}

macro_rules! cell_userdata {
    ($($ty:ty),+) => {
        $(
            impl UserData for MutableCell<'_, $ty> {
                fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
                    methods.add_method("get", |_, this, ()| Ok(this.get()));
                    methods.add_method_mut("set", |_, this, value: $ty| {
                        this.set(value);
                        Ok(())
                    });
                }
            }
        )+
    };
}

cell_userdata!(i32, u32, u8, bool, String);

/// Handler backed by a Lua function of a loaded module.
pub struct LuaCallback {
    engine: Rc<ScriptEngine>,
    function: Function,
}

impl LuaCallback {
    pub fn new(engine: Rc<ScriptEngine>, function: Function) -> Self {
        Self { engine, function }
    }
}

impl ScriptCallback for LuaCallback {
    fn invoke(&self, args: &mut EventArgs<'_>) -> Result<(), HandlerError> {
        let lua = self.engine.lua();
        let staged: Vec<Arg<'_>> = args.iter_mut().map(|arg| arg.reborrow()).collect();

        self.engine.guarded(|| {
            lua.scope(|scope| {
                let mut values = Vec::with_capacity(staged.len());
                for arg in staged {
                    values.push(match arg {
                        Arg::Bool(v) => Value::Boolean(v),
                        Arg::Int(v) => Value::Integer(v),
                        Arg::UInt(v) => v.into_lua(lua)?,
                        Arg::Str(s) => Value::String(lua.create_string(s)?),
                        Arg::Player(h) => Value::UserData(scope.create_userdata(h)?),
                        Arg::Unit(h) => Value::UserData(scope.create_userdata(h)?),
                        Arg::Creature(h) => Value::UserData(scope.create_userdata(h)?),
                        Arg::Guild(h) => Value::UserData(scope.create_userdata(h)?),
                        Arg::Group(h) => Value::UserData(scope.create_userdata(h)?),
                        Arg::Channel(h) => Value::UserData(scope.create_userdata(h)?),
                        Arg::Quest(h) => Value::UserData(scope.create_userdata(h)?),
                        Arg::Spell(h) => Value::UserData(scope.create_userdata(h)?),
                        Arg::Loot(h) => Value::UserData(scope.create_userdata(h)?),
                        Arg::Item(h) => Value::UserData(scope.create_userdata(h)?),
                        Arg::GameObject(h) => Value::UserData(scope.create_userdata(h)?),
                        Arg::AuctionHouse(h) => Value::UserData(scope.create_userdata(h)?),
                        Arg::AuctionEntry(h) => Value::UserData(scope.create_userdata(h)?),
                        Arg::MutI32(c) => Value::UserData(scope.create_userdata(c)?),
                        Arg::MutU32(c) => Value::UserData(scope.create_userdata(c)?),
                        Arg::MutU8(c) => Value::UserData(scope.create_userdata(c)?),
                        Arg::MutBool(c) => Value::UserData(scope.create_userdata(c)?),
                        Arg::MutString(c) => Value::UserData(scope.create_userdata(c)?),
                    });
                }
                self.function.call::<()>(MultiValue::from_vec(values))
            })
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::engine::{LootObject, PlayerObject};
    use crate::event::EventKind;

    struct Hero {
        money: Cell<u32>,
    }

    impl PlayerObject for Hero {
        fn guid(&self) -> u64 {
            1
        }
        fn account_id(&self) -> u32 {
            10
        }
        fn name(&self) -> String {
            "Anduin".to_string()
        }
        fn level(&self) -> u32 {
            80
        }
        fn money(&self) -> u32 {
            self.money.get()
        }
        fn set_money(&self, amount: u32) {
            self.money.set(amount);
        }
        fn is_gm(&self) -> bool {
            false
        }
        fn send_system_message(&self, _text: &str) {}
    }

    fn callback(source: &str) -> LuaCallback {
        let engine = Rc::new(ScriptEngine::new().unwrap());
        engine.execute(source).unwrap();
        let function: Function = engine.get_global("handler").unwrap();
        LuaCallback::new(engine, function)
    }

    #[test]
    fn test_handler_rewrites_cell() {
        let cb = callback(
            r#"
            function handler(player, amount)
                amount:set(amount:get() + player:GetLevel())
            end
            "#,
        );
        let hero = Hero {
            money: Cell::new(0),
        };
        let mut amount = 20;
        let mut args = EventArgs::new(
            EventKind::PlayerOnMoneyChanged,
            vec![
                Arg::Player(PlayerHandle::new(&hero)),
                Arg::MutI32(MutableCell::new(&mut amount)),
            ],
        );

        cb.invoke(&mut args).unwrap();
        cb.invoke(&mut args).unwrap();
        drop(args);
        assert_eq!(amount, 180);
    }

    #[test]
    fn test_handler_writes_through_player_handle() {
        let cb = callback(
            r#"
            function handler(player, first_login)
                if first_login then player:SetMoney(player:GetMoney() + 500) end
            end
            "#,
        );
        let hero = Hero {
            money: Cell::new(100),
        };
        let mut args = EventArgs::new(
            EventKind::PlayerOnLogin,
            vec![Arg::Player(PlayerHandle::new(&hero)), Arg::Bool(true)],
        );
        cb.invoke(&mut args).unwrap();
        assert_eq!(hero.money.get(), 600);
    }

    #[test]
    fn test_null_handle_reads_are_empty() {
        let cb = callback(
            r#"
            function handler(player)
                seen_null = player:IsNull()
                seen_name = player:GetName()
                player:SetMoney(5)
            end
            "#,
        );
        let mut args = EventArgs::new(
            EventKind::PlayerOnLogout,
            vec![Arg::Player(PlayerHandle::null())],
        );
        cb.invoke(&mut args).unwrap();

        assert!(cb.engine.get_global::<bool>("seen_null").unwrap());
        assert_eq!(cb.engine.get_global::<String>("seen_name").unwrap(), "");
    }

    #[test]
    fn test_retained_cell_is_invalid_after_call() {
        let cb = callback(
            r#"
            function handler(player, amount)
                saved = amount
            end
            function touch()
                return saved:get()
            end
            "#,
        );
        let mut amount = 1;
        let mut args = EventArgs::new(
            EventKind::PlayerOnMoneyChanged,
            vec![
                Arg::Player(PlayerHandle::null()),
                Arg::MutI32(MutableCell::new(&mut amount)),
            ],
        );
        cb.invoke(&mut args).unwrap();

        let touch: Function = cb.engine.get_global("touch").unwrap();
        assert!(touch.call::<i32>(()).is_err());
    }

    #[test]
    fn test_lua_error_becomes_handler_error() {
        let cb = callback(r#"function handler() error("nope") end"#);
        let mut args = EventArgs::new(EventKind::WorldOnStartup, vec![]);
        let err = cb.invoke(&mut args).unwrap_err();
        assert!(matches!(err, HandlerError::Lua(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_string_cell_and_plain_args() {
        let cb = callback(
            r#"
            function handler(player, msg, chat_type, lang)
                msg:set(string.upper(msg:get()) .. " " .. chat_type .. "/" .. lang)
            end
            "#,
        );
        let mut msg = String::from("hello");
        let mut args = EventArgs::new(
            EventKind::PlayerOnSay,
            vec![
                Arg::Player(PlayerHandle::null()),
                Arg::MutString(MutableCell::new(&mut msg)),
                Arg::UInt(1),
                Arg::UInt(7),
            ],
        );
        cb.invoke(&mut args).unwrap();
        drop(args);
        assert_eq!(msg, "HELLO 1/7");
    }

    struct Chest {
        money: Cell<u32>,
        items: Cell<u32>,
    }

    impl LootObject for Chest {
        fn money(&self) -> u32 {
            self.money.get()
        }
        fn set_money(&self, amount: u32) {
            self.money.set(amount);
        }
        fn item_count(&self) -> u32 {
            self.items.get()
        }
        fn add_item(&self, _item_id: u32, count: u32) {
            self.items.set(self.items.get() + count);
        }
        fn clear(&self) {
            self.items.set(0);
            self.money.set(0);
        }
        fn is_looted(&self) -> bool {
            false
        }
        fn loot_type(&self) -> u32 {
            1
        }
    }

    #[test]
    fn test_loot_handle_methods() {
        let cb = callback(
            r#"
            function handler(creature, loot, player)
                loot:AddItem(4306)
                loot:AddItem(2589, 3)
                loot:SetMoney(loot:GetMoney() * 2)
            end
            "#,
        );
        let chest = Chest {
            money: Cell::new(25),
            items: Cell::new(0),
        };
        let mut args = EventArgs::new(
            EventKind::CreatureOnGenerateLoot,
            vec![
                Arg::Creature(CreatureHandle::null()),
                Arg::Loot(LootHandle::new(&chest)),
                Arg::Player(PlayerHandle::null()),
            ],
        );
        cb.invoke(&mut args).unwrap();
        assert_eq!(chest.items.get(), 4);
        assert_eq!(chest.money.get(), 50);
    }
}
