//! World, unit and account hook shims.

use std::rc::Rc;

use super::fire;
use crate::bridge::ScriptBridge;
use crate::engine::{AccountHooks, UnitHooks, UnitObject, WorldHooks};
use crate::event::{Arg, EventKind, MutableCell};
use crate::handle::UnitHandle;

pub struct WorldShim {
    bridge: Rc<ScriptBridge>,
}

impl WorldShim {
    pub fn new(bridge: Rc<ScriptBridge>) -> Self {
        Self { bridge }
    }
}

impl WorldHooks for WorldShim {
    fn on_open_state_change(&self, open: bool) {
        fire(&self.bridge, EventKind::WorldOnOpenStateChange, vec![Arg::Bool(open)]);
    }

    fn on_config_load(&self, reload: bool) {
        fire(&self.bridge, EventKind::WorldOnConfigLoad, vec![Arg::Bool(reload)]);
    }

    fn on_startup(&self) {
        fire(&self.bridge, EventKind::WorldOnStartup, vec![]);
    }

    fn on_shutdown(&self) {
        fire(&self.bridge, EventKind::WorldOnShutdown, vec![]);
    }

    fn on_shutdown_cancel(&self) {
        fire(&self.bridge, EventKind::WorldOnShutdownCancel, vec![]);
    }

    fn on_motd_change(&self, motd: &str) {
        fire(&self.bridge, EventKind::WorldOnMotdChange, vec![Arg::Str(motd)]);
    }

    fn on_shutdown_initiate(&self, code: u32, mask: u32) {
        fire(
            &self.bridge,
            EventKind::WorldOnShutdownInitiate,
            vec![Arg::UInt(code.into()), Arg::UInt(mask.into())],
        );
    }

    fn on_update(&self, diff: u32) {
        fire(&self.bridge, EventKind::WorldOnUpdate, vec![Arg::UInt(diff.into())]);
    }
}

pub struct UnitShim {
    bridge: Rc<ScriptBridge>,
}

impl UnitShim {
    pub fn new(bridge: Rc<ScriptBridge>) -> Self {
        Self { bridge }
    }
}

impl UnitHooks for UnitShim {
    fn on_heal(
        &self,
        healer: Option<&dyn UnitObject>,
        receiver: Option<&dyn UnitObject>,
        gain: &mut u32,
    ) {
        fire(
            &self.bridge,
            EventKind::UnitOnCalcHeal,
            vec![
                Arg::Unit(UnitHandle::from_option(healer)),
                Arg::Unit(UnitHandle::from_option(receiver)),
                Arg::MutU32(MutableCell::new(gain)),
            ],
        );
    }
}

pub struct AccountShim {
    bridge: Rc<ScriptBridge>,
}

impl AccountShim {
    pub fn new(bridge: Rc<ScriptBridge>) -> Self {
        Self { bridge }
    }

    fn account_event(&self, kind: EventKind, account_id: u32) {
        fire(&self.bridge, kind, vec![Arg::UInt(account_id.into())]);
    }
}

impl AccountHooks for AccountShim {
    fn on_account_login(&self, account_id: u32) {
        self.account_event(EventKind::AccountOnLogin, account_id);
    }

    fn on_failed_account_login(&self, account_id: u32) {
        self.account_event(EventKind::AccountOnFailedLogin, account_id);
    }

    fn on_email_change(&self, account_id: u32) {
        self.account_event(EventKind::AccountOnEmailChange, account_id);
    }

    fn on_failed_email_change(&self, account_id: u32) {
        self.account_event(EventKind::AccountOnFailedEmailChange, account_id);
    }

    fn on_password_change(&self, account_id: u32) {
        self.account_event(EventKind::AccountOnPasswordChange, account_id);
    }

    fn on_failed_password_change(&self, account_id: u32) {
        self.account_event(EventKind::AccountOnFailedPasswordChange, account_id);
    }
}
