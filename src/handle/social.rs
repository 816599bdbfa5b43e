//! Handles for guilds, groups and chat channels.

use tracing::{error, warn};

use super::null_write;
use crate::engine::{ChannelObject, GroupObject, GuildObject};

entity_handle!(
    /// Handle to a guild.
    GuildHandle => GuildObject
);

impl GuildHandle<'_> {
    pub fn id(&self) -> u32 {
        self.object.map_or(0, |g| g.id())
    }

    pub fn name(&self) -> String {
        self.object.map(|g| g.name()).unwrap_or_default()
    }

    pub fn motd(&self) -> String {
        self.object.map(|g| g.motd()).unwrap_or_default()
    }

    pub fn member_count(&self) -> u32 {
        self.object.map_or(0, |g| g.member_count())
    }

    pub fn bank_money(&self) -> u64 {
        self.object.map_or(0, |g| g.bank_money())
    }
}

entity_handle!(
    /// Handle to a party or raid.
    GroupHandle => GroupObject
);

impl GroupHandle<'_> {
    pub fn guid(&self) -> u64 {
        self.object.map_or(0, |g| g.guid())
    }

    pub fn leader_guid(&self) -> u64 {
        self.object.map_or(0, |g| g.leader_guid())
    }

    pub fn member_count(&self) -> u32 {
        self.object.map_or(0, |g| g.member_count())
    }

    pub fn is_raid(&self) -> bool {
        self.object.is_some_and(|g| g.is_raid())
    }
}

entity_handle!(
    /// Handle to a chat channel.
    ///
    /// Some channel capabilities are missing on certain engine builds. Those calls log an
    /// error and fall back to the closest supported behavior.
    ChannelHandle => ChannelObject
);

impl ChannelHandle<'_> {
    pub fn id(&self) -> u32 {
        self.object.map_or(0, |c| c.id())
    }

    pub fn name(&self) -> String {
        self.object.map(|c| c.name()).unwrap_or_default()
    }

    /// Channel name for a locale; locale 0 is the server default.
    pub fn name_for_locale(&self, locale: u32) -> String {
        let Some(channel) = self.object else {
            return String::new();
        };
        if locale == 0 {
            return channel.name();
        }
        channel.name_for_locale(locale).unwrap_or_else(|_| {
            error!(
                target: "realmscript::api",
                locale,
                "ChannelHandle::name_for_locale is not implemented for non-default locales on this engine build"
            );
            channel.name()
        })
    }

    pub fn is_constant(&self) -> bool {
        self.object.is_some_and(|c| c.is_constant())
    }

    pub fn is_lfg(&self) -> bool {
        self.object.is_some_and(|c| c.is_lfg())
    }

    pub fn is_announce(&self) -> bool {
        self.object.is_some_and(|c| c.is_announce())
    }

    pub fn set_announce(&self, announce: bool) {
        let Some(channel) = self.object else {
            return null_write("ChannelHandle", "set_announce");
        };
        if channel.set_announce(announce).is_err() {
            error!(
                target: "realmscript::api",
                "ChannelHandle::set_announce is not implemented on this engine build"
            );
        }
    }

    pub fn set_invisible(&self, invisible: bool) {
        let Some(channel) = self.object else {
            return null_write("ChannelHandle", "set_invisible");
        };
        if channel.set_invisible(invisible).is_err() {
            error!(
                target: "realmscript::api",
                "ChannelHandle::set_invisible is not implemented on this engine build"
            );
        }
    }

    pub fn set_dirty(&self) {
        let Some(channel) = self.object else {
            return null_write("ChannelHandle", "set_dirty");
        };
        if channel.set_dirty().is_err() {
            error!(
                target: "realmscript::api",
                "ChannelHandle::set_dirty is not implemented on this engine build"
            );
        }
    }

    pub fn set_password(&self, password: &str) {
        match self.object {
            Some(c) => c.set_password(password),
            None => null_write("ChannelHandle", "set_password"),
        }
    }

    pub fn check_password(&self, password: &str) -> bool {
        let Some(channel) = self.object else {
            return false;
        };
        channel.check_password(password).unwrap_or_else(|_| {
            warn!(
                target: "realmscript::api",
                "ChannelHandle::check_password falls back to a plain comparison on this engine build"
            );
            channel.password() == password
        })
    }

    pub fn num_players(&self) -> u32 {
        self.object.map_or(0, |c| c.num_players())
    }

    pub fn flags(&self) -> u8 {
        self.object.map_or(0, |c| c.flags())
    }

    pub fn has_flag(&self, flag: u8) -> bool {
        self.flags() & flag != 0
    }
}
