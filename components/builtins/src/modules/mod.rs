//! Native capabilities reachable through `require`.
//!
//! Each capability implements [`NativeModule`] and is registered in a
//! [`ModuleRegistry`] under its name. The `require` binding resolves the name
//! through the registry and hands the capability's exports to the script.

mod os;
mod path;

pub use os::OsModule;
pub use path::PathModule;

use crate::exception::throw_host_error;
use async_runtime::{HostError, ModuleRegistry};
use rquickjs::function::{Func, Opt};
use rquickjs::{Ctx, Object, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// A host capability exposed to scripts as a module.
pub trait NativeModule {
    /// Name scripts pass to `require`.
    fn name(&self) -> &'static str;

    /// Builds the object `require` returns.
    fn exports<'js>(&self, ctx: &Ctx<'js>) -> rquickjs::Result<Object<'js>>;
}

/// Registry type the runtime fills with capabilities.
pub type NativeModules = ModuleRegistry<Rc<dyn NativeModule>>;

/// Where a binding parks the typed error behind the exception it threw.
///
/// The runtime takes it back out when that exception escapes evaluation.
pub type HostErrorSlot = Rc<RefCell<Option<HostError>>>;

/// Registry holding the capabilities that ship with the runtime.
pub fn default_modules() -> NativeModules {
    let mut registry = NativeModules::new();
    for module in [
        Rc::new(PathModule) as Rc<dyn NativeModule>,
        Rc::new(OsModule) as Rc<dyn NativeModule>,
    ] {
        registry.register(module.name(), module);
    }
    registry
}

/// Installs the native `require` hook used by the prelude.
pub fn install(
    ctx: &Ctx<'_>,
    registry: Rc<NativeModules>,
    last_error: HostErrorSlot,
) -> rquickjs::Result<()> {
    ctx.globals()
        .set("__host_require", Func::from(require_fn(registry, last_error)))
}

fn require_fn<'js>(
    registry: Rc<NativeModules>,
    last_error: HostErrorSlot,
) -> impl Fn(Ctx<'js>, Opt<Value<'js>>) -> rquickjs::Result<Object<'js>> + 'js {
    move |ctx: Ctx<'js>, name: Opt<Value<'js>>| {
        let resolved = module_name(&name.0).and_then(|name| {
            registry
                .require(name.as_deref())
                .map(Rc::clone)
        });
        match resolved {
            Ok(module) => module.exports(&ctx),
            Err(error) => {
                tracing::debug!(%error, "require failed");
                let thrown = throw_host_error(&ctx, &error);
                *last_error.borrow_mut() = Some(error);
                Err(thrown)
            }
        }
    }
}

fn module_name(argument: &Option<Value<'_>>) -> Result<Option<String>, HostError> {
    let value = match argument {
        Some(value) => value,
        None => return Ok(None),
    };
    match value.as_string().map(|s| s.to_string()) {
        Some(Ok(name)) => Ok(Some(name)),
        _ => Err(HostError::InvalidArgument {
            function: "require".to_string(),
            reason: "module name must be a string".to_string(),
        }),
    }
}
