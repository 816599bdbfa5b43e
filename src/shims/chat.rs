//! GM command messages carried over whispers.
//!
//! A whisper whose text starts with the configured prefix and whose sender is a GM is a command
//! addressed to scripts, not chat. It is dispatched as `PlayerOnGmMessage` and never reaches the
//! whisper handlers.

use tracing::debug;

use crate::bridge::ScriptBridge;
use crate::config::ChatConfig;
use crate::engine::PlayerObject;
use crate::event::{Arg, EventArgs, EventKind};
use crate::handle::PlayerHandle;

/// A message split into command and argument text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GmMessage<'m> {
    pub command: &'m str,
    pub args: &'m str,
}

/// Recognizes and dispatches GM command whispers.
#[derive(Debug, Clone)]
pub struct GmMessageInterceptor {
    enabled: bool,
    prefix: String,
}

impl GmMessageInterceptor {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            enabled: true,
            prefix: prefix.into(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            prefix: String::new(),
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        if config.gm_intercept {
            Self::new(config.gm_prefix.clone())
        } else {
            Self::disabled()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Split a prefixed message. The prefix must be followed by whitespace and a command word.
    pub fn parse<'m>(&self, msg: &'m str) -> Option<GmMessage<'m>> {
        if !self.enabled || self.prefix.is_empty() {
            return None;
        }
        let rest = msg.strip_prefix(self.prefix.as_str())?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let rest = rest.trim_start();
        let (command, args) = match rest.split_once(char::is_whitespace) {
            Some((command, args)) => (command, args.trim()),
            None => (rest, ""),
        };
        if command.is_empty() {
            return None;
        }
        Some(GmMessage { command, args })
    }

    /// Dispatch `msg` as a GM command if it is one. Returns whether the message was consumed.
    pub fn intercept(
        &self,
        bridge: &ScriptBridge,
        sender: &dyn PlayerObject,
        receiver: &dyn PlayerObject,
        msg: &str,
    ) -> bool {
        let Some(parsed) = self.parse(msg) else {
            return false;
        };
        if !sender.is_gm() {
            debug!(
                target: "realmscript::events",
                sender = %sender.name(),
                "GM prefix from a non-GM sender; treated as a whisper"
            );
            return false;
        }

        let mut args = EventArgs::new(
            EventKind::PlayerOnGmMessage,
            vec![
                Arg::Player(PlayerHandle::new(sender)),
                Arg::Player(PlayerHandle::new(receiver)),
                Arg::Str(parsed.command),
                Arg::Str(parsed.args),
            ],
        );
        let outcome = bridge.fire(&mut args);
        debug!(
            target: "realmscript::events",
            command = parsed.command,
            handlers = outcome.attempted(),
            "CHAT: handled GM message"
        );
        true
    }
}

impl Default for GmMessageInterceptor {
    fn default() -> Self {
        Self::from_config(&ChatConfig::default())
    }
}
