//! Configuration module for realmscript.

use serde::Deserialize;
use std::path::Path;

use crate::script::ResourceLimits;
use crate::{RealmError, Result};

/// Script loading configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptsConfig {
    /// Path to the scripts directory.
    #[serde(default = "default_scripts_path")]
    pub path: String,
    /// Instruction budget per script call (0 = unlimited).
    #[serde(default = "default_max_instructions")]
    pub max_instructions: u64,
    /// Memory limit per module in megabytes (0 = unlimited).
    #[serde(default = "default_max_memory_mb")]
    pub max_memory_mb: usize,
}

fn default_scripts_path() -> String {
    "scripts".to_string()
}

fn default_max_instructions() -> u64 {
    1_000_000
}

fn default_max_memory_mb() -> usize {
    16
}

impl ScriptsConfig {
    /// Sandbox limits applied to every module.
    pub fn limits(&self) -> ResourceLimits {
        ResourceLimits {
            max_instructions: self.max_instructions,
            max_memory: self.max_memory_mb * 1024 * 1024,
        }
    }
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            path: default_scripts_path(),
            max_instructions: default_max_instructions(),
            max_memory_mb: default_max_memory_mb(),
        }
    }
}

/// Template tables configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    /// Path to the template id tables.
    #[serde(default = "default_templates_path")]
    pub path: String,
}

fn default_templates_path() -> String {
    "data/templates.toml".to_string()
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            path: default_templates_path(),
        }
    }
}

/// Chat interception configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Route prefixed GM whispers to `PlayerOnGmMessage`.
    #[serde(default = "default_gm_intercept")]
    pub gm_intercept: bool,
    /// Prefix marking a GM command whisper.
    #[serde(default = "default_gm_prefix")]
    pub gm_prefix: String,
}

fn default_gm_intercept() -> bool {
    true
}

fn default_gm_prefix() -> String {
    "#gm".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            gm_intercept: default_gm_intercept(),
            gm_prefix: default_gm_prefix(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/realmscript.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Script loading configuration.
    #[serde(default)]
    pub scripts: ScriptsConfig,
    /// Template tables configuration.
    #[serde(default)]
    pub templates: TemplatesConfig,
    /// Chat interception configuration.
    #[serde(default)]
    pub chat: ChatConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(RealmError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| RealmError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `REALMSCRIPT_LOG_LEVEL`: Override the log level
    /// - `REALMSCRIPT_SCRIPTS_PATH`: Override the scripts directory
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("REALMSCRIPT_LOG_LEVEL") {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }
        if let Ok(path) = std::env::var("REALMSCRIPT_SCRIPTS_PATH") {
            if !path.is_empty() {
                self.scripts.path = path;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - GM interception is enabled but the prefix is empty
    /// - the scripts path is empty
    pub fn validate(&self) -> Result<()> {
        if self.chat.gm_intercept && self.chat.gm_prefix.trim().is_empty() {
            return Err(RealmError::Config(
                "chat.gm_intercept is enabled but gm_prefix is empty".to_string(),
            ));
        }
        if self.scripts.path.is_empty() {
            return Err(RealmError::Config("scripts.path must not be empty".to_string()));
        }
        Ok(())
    }
}
