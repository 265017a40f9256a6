//! Conversion between engine exceptions and host error types.

use async_runtime::HostError;
use core_types::{ErrorKind, JsError};
use rquickjs::{Coerced, Ctx, FromJs, Function, Object, Value};

/// Builds a [`JsError`] from a value caught after evaluation threw.
///
/// Error objects keep their `name`, `message` and `stack`. Anything else
/// that was thrown (strings, numbers, plain objects) becomes a plain
/// [`ErrorKind::Error`] carrying its string conversion.
pub fn js_error_from_caught<'js>(ctx: &Ctx<'js>, caught: Value<'js>) -> JsError {
    if let Some(error) = caught.as_object().and_then(error_fields) {
        return error;
    }

    let message = match Coerced::<String>::from_js(ctx, caught) {
        Ok(text) => text.0,
        Err(err) => format!("(unprintable exception: {})", err),
    };
    JsError::new(ErrorKind::Error, message)
}

fn error_fields(object: &Object<'_>) -> Option<JsError> {
    let name = object.get::<_, Option<String>>("name").ok().flatten();
    let message = object.get::<_, Option<String>>("message").ok().flatten();
    if name.is_none() && message.is_none() {
        return None;
    }

    let kind = name
        .as_deref()
        .map(ErrorKind::from_name)
        .unwrap_or(ErrorKind::Error);
    let stack = object
        .get::<_, Option<String>>("stack")
        .ok()
        .flatten()
        .unwrap_or_default();
    Some(JsError::new(kind, message.unwrap_or_default()).with_stack(stack))
}

/// Reads the `code` property host bindings attach to the errors they throw.
pub fn host_error_code(caught: &Value<'_>) -> Option<String> {
    caught
        .as_object()?
        .get::<_, Option<String>>("code")
        .ok()
        .flatten()
}

/// Throws `error` into the script as an error object with a `code` property.
///
/// Argument problems become a `TypeError`, everything else a plain `Error`.
/// The returned [`rquickjs::Error`] is meant to be handed straight back to
/// the engine from a native function.
pub fn throw_host_error(ctx: &Ctx<'_>, error: &HostError) -> rquickjs::Error {
    match host_error_object(ctx, error) {
        Ok(object) => ctx.throw(object.into_value()),
        Err(err) => err,
    }
}

fn host_error_object<'js>(ctx: &Ctx<'js>, error: &HostError) -> rquickjs::Result<Object<'js>> {
    let constructor = match error {
        HostError::InvalidArgument { .. } => "TypeError",
        HostError::ModuleNotFound { .. } => "Error",
    };
    let constructor: Function<'js> = ctx.globals().get(constructor)?;
    let object: Object<'js> = constructor.call((error.to_string(),))?;
    object.set("code", error.code())?;
    if let HostError::ModuleNotFound { name } = error {
        object.set("moduleName", name.as_str())?;
    }
    Ok(object)
}
