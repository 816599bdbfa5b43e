//! Callable handlers.

use std::rc::Rc;

use super::args::EventArgs;
use crate::error::HandlerError;

/// Anything that can receive an event: a Lua function or a native closure.
pub trait ScriptCallback {
    fn invoke(&self, args: &mut EventArgs<'_>) -> Result<(), HandlerError>;
}

/// Shared handler stored in registries.
pub type Handler = Rc<dyn ScriptCallback>;

struct NativeCallback<F>(F);

impl<F> ScriptCallback for NativeCallback<F>
where
    F: Fn(&mut EventArgs<'_>) -> Result<(), HandlerError>,
{
    fn invoke(&self, args: &mut EventArgs<'_>) -> Result<(), HandlerError> {
        (self.0)(args)
    }
}

/// Wrap a Rust closure as a handler.
pub fn native<F>(f: F) -> Handler
where
    F: Fn(&mut EventArgs<'_>) -> Result<(), HandlerError> + 'static,
{
    Rc::new(NativeCallback(f))
}
