use std::process::ExitCode;
use std::rc::Rc;

use tracing::{error, info, warn};

use realmscript::{Config, ModuleManager, ScriptBridge, ScriptLoader, TemplateTables};

fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    // Initialize logging
    if let Err(e) = realmscript::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        realmscript::logging::init_console_only(&config.logging.level);
    }

    info!("realmscript - Lua scripting bridge");

    let templates = match TemplateTables::load(&config.templates.path) {
        Ok(templates) => templates,
        Err(e) => {
            error!(path = %config.templates.path, "Failed to load template tables: {e}");
            return ExitCode::FAILURE;
        }
    };

    let bridge = Rc::new(ScriptBridge::new(Rc::new(templates)));
    let mut modules = ModuleManager::with_limits(Rc::clone(&bridge), config.scripts.limits());
    let loader = ScriptLoader::new(&config.scripts.path);

    if !loader.scripts_dir_exists() {
        warn!(path = %config.scripts.path, "Scripts directory does not exist");
    }

    match loader.sync(&mut modules) {
        Ok(result) => {
            for (path, e) in &result.errors {
                warn!(path = %path, "Script failed to load: {e}");
            }
            info!(
                loaded = result.added,
                failed = result.errors.len(),
                handlers = bridge.handler_count(),
                "Scripts loaded"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Script loading aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
