//! Lua script engine with sandboxing.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use mlua::{Function, HookTriggers, Lua, Result as LuaResult, Value, VmState};

use crate::{RealmError, Result};

/// Resource limits for script execution.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// Maximum number of instructions per guarded call (0 = unlimited).
    pub max_instructions: u64,
    /// Maximum memory in bytes (0 = unlimited).
    pub max_memory: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_instructions: 1_000_000,
            max_memory: 16 * 1024 * 1024, // 16MB
        }
    }
}

/// Lua state of one module, sandboxed and limited.
pub struct ScriptEngine {
    lua: Lua,
    instruction_count: Arc<AtomicU64>,
    limits: ResourceLimits,
    depth: Cell<u32>,
}

impl ScriptEngine {
    /// Create a new ScriptEngine with default resource limits.
    pub fn new() -> Result<Self> {
        Self::with_limits(ResourceLimits::default())
    }

    /// Create a new ScriptEngine with custom resource limits.
    pub fn with_limits(limits: ResourceLimits) -> Result<Self> {
        let lua = Lua::new();

        Self::apply_sandbox(&lua)?;

        if limits.max_memory > 0 {
            lua.set_memory_limit(limits.max_memory)
                .map_err(|e| RealmError::Script(format!("Failed to set memory limit: {}", e)))?;
        }

        Ok(Self {
            lua,
            instruction_count: Arc::new(AtomicU64::new(0)),
            limits,
            depth: Cell::new(0),
        })
    }

    /// Apply sandbox restrictions to the Lua environment.
    fn apply_sandbox(lua: &Lua) -> Result<()> {
        let globals = lua.globals();

        for name in [
            "os",
            "io",
            "loadfile",
            "dofile",
            "load",
            "require",
            "package",
            "debug",
            "collectgarbage",
        ] {
            globals
                .set(name, Value::Nil)
                .map_err(|e| RealmError::Script(format!("Failed to disable {}: {}", name, e)))?;
        }

        Ok(())
    }

    /// Run `f` under the instruction limit.
    ///
    /// Nested calls share the outermost budget.
    pub fn guarded<R>(&self, f: impl FnOnce() -> LuaResult<R>) -> LuaResult<R> {
        let outermost = self.depth.get() == 0;
        if outermost && self.limits.max_instructions > 0 {
            self.instruction_count.store(0, Ordering::SeqCst);

            let count = Arc::clone(&self.instruction_count);
            let limit = self.limits.max_instructions;

            self.lua.set_hook(
                HookTriggers::new().every_nth_instruction(10000),
                move |_lua, _debug| {
                    let current = count.fetch_add(10000, Ordering::SeqCst) + 10000;
                    if current > limit {
                        Err(mlua::Error::RuntimeError(
                            "Script exceeded instruction limit".to_string(),
                        ))
                    } else {
                        Ok(VmState::Continue)
                    }
                },
            );
        }

        self.depth.set(self.depth.get() + 1);
        let result = f();
        self.depth.set(self.depth.get() - 1);

        if outermost && self.limits.max_instructions > 0 {
            self.lua.remove_hook();
        }

        result
    }

    /// Execute Lua source code.
    pub fn execute(&self, source: &str) -> Result<()> {
        self.execute_named("chunk", source)
    }

    /// Execute Lua source code; `name` shows up in Lua error messages.
    pub fn execute_named(&self, name: &str, source: &str) -> Result<()> {
        self.guarded(|| self.lua.load(source).set_name(name).exec())
            .map_err(|e| RealmError::Script(format!("Script error: {}", e)))
    }

    /// Set a global value in the Lua environment.
    pub fn set_global<V: mlua::IntoLua>(&self, name: &str, value: V) -> Result<()> {
        self.lua
            .globals()
            .set(name, value)
            .map_err(|e| RealmError::Script(format!("Failed to set global '{}': {}", name, e)))
    }

    /// Get a global value from the Lua environment.
    pub fn get_global<V: mlua::FromLua>(&self, name: &str) -> Result<V> {
        self.lua
            .globals()
            .get(name)
            .map_err(|e| RealmError::Script(format!("Failed to get global '{}': {}", name, e)))
    }

    /// Create a Lua function from a Rust closure.
    pub fn create_function<F, A, R>(&self, func: F) -> Result<Function>
    where
        F: Fn(&Lua, A) -> LuaResult<R> + 'static,
        A: mlua::FromLuaMulti,
        R: mlua::IntoLuaMulti,
    {
        self.lua
            .create_function(func)
            .map_err(|e| RealmError::Script(format!("Failed to create function: {}", e)))
    }

    /// Instructions counted during the last outermost guarded call.
    pub fn instruction_count(&self) -> u64 {
        self.instruction_count.load(Ordering::SeqCst)
    }

    /// Get the resource limits.
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    /// Get a reference to the underlying Lua instance.
    pub fn lua(&self) -> &Lua {
        &self.lua
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_execution() {
        let engine = ScriptEngine::new().unwrap();
        engine.execute("x = 1 + 2").unwrap();

        let result: i32 = engine.get_global("x").unwrap();
        assert_eq!(result, 3);
    }

    #[test]
    fn test_string_operations() {
        let engine = ScriptEngine::new().unwrap();
        engine
            .execute(r#"result = string.upper("hello")"#)
            .unwrap();

        let result: String = engine.get_global("result").unwrap();
        assert_eq!(result, "HELLO");
    }

    #[test]
    fn test_sandbox_os_disabled() {
        let engine = ScriptEngine::new().unwrap();
        let result = engine.execute("os.execute('ls')");
        assert!(result.is_err());
    }

    #[test]
    fn test_sandbox_io_disabled() {
        let engine = ScriptEngine::new().unwrap();
        let result = engine.execute("io.open('/etc/passwd', 'r')");
        assert!(result.is_err());
    }

    #[test]
    fn test_sandbox_require_disabled() {
        let engine = ScriptEngine::new().unwrap();
        let result = engine.execute("require('os')");
        assert!(result.is_err());
    }

    #[test]
    fn test_sandbox_debug_disabled() {
        let engine = ScriptEngine::new().unwrap();
        let result = engine.execute("debug.traceback()");
        assert!(result.is_err());
    }

    #[test]
    fn test_instruction_limit() {
        let limits = ResourceLimits {
            max_instructions: 1000,
            max_memory: 0,
        };
        let engine = ScriptEngine::with_limits(limits).unwrap();

        // This infinite loop should be stopped by the instruction limit
        let result = engine.execute("while true do end");
        assert!(result.is_err());

        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("instruction limit"));
    }

    #[test]
    fn test_instruction_limit_applies_to_function_calls() {
        let limits = ResourceLimits {
            max_instructions: 1000,
            max_memory: 0,
        };
        let engine = ScriptEngine::with_limits(limits).unwrap();
        engine.execute("function spin() while true do end end").unwrap();

        let spin: Function = engine.get_global("spin").unwrap();
        let result = engine.guarded(|| spin.call::<()>(()));
        assert!(result.is_err());

        // The budget resets for the next guarded call.
        engine.execute("ok = true").unwrap();
        let ok: bool = engine.get_global("ok").unwrap();
        assert!(ok);
    }

    #[test]
    fn test_memory_limit() {
        let limits = ResourceLimits {
            max_instructions: 0,
            max_memory: 1024 * 100, // 100KB
        };
        let engine = ScriptEngine::with_limits(limits).unwrap();

        let result = engine.execute(
            r#"
            t = {}
            for i = 1, 100000 do
                t[i] = string.rep("x", 1000)
            end
        "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_create_function() {
        let engine = ScriptEngine::new().unwrap();

        let add = engine
            .create_function(|_, (a, b): (i32, i32)| Ok(a + b))
            .unwrap();

        engine.set_global("add", add).unwrap();
        engine.execute("result = add(3, 4)").unwrap();

        let result: i32 = engine.get_global("result").unwrap();
        assert_eq!(result, 7);
    }

    #[test]
    fn test_syntax_error_names_chunk() {
        let engine = ScriptEngine::new().unwrap();
        let result = engine.execute_named("broken.lua", "this is not valid lua");
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("broken.lua"));
    }

    #[test]
    fn test_runtime_error() {
        let engine = ScriptEngine::new().unwrap();
        let result = engine.execute("error('test error')");
        assert!(result.is_err());
    }
}
