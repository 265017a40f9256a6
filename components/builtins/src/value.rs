//! Snapshots of engine values.

use core_types::Value as HostValue;
use rquickjs::{Ctx, Function, Value};

/// Copies an engine value out of the context.
///
/// Primitives are copied; everything else is rendered by the prelude's
/// inspector so the result can outlive the engine value.
pub fn snapshot<'js>(ctx: &Ctx<'js>, value: Value<'js>) -> rquickjs::Result<HostValue> {
    if value.is_undefined() {
        return Ok(HostValue::Undefined);
    }
    if value.is_null() {
        return Ok(HostValue::Null);
    }
    if let Some(b) = value.as_bool() {
        return Ok(HostValue::Boolean(b));
    }
    if let Some(n) = value.as_int() {
        return Ok(HostValue::Number(f64::from(n)));
    }
    if let Some(n) = value.as_float() {
        return Ok(HostValue::Number(n));
    }
    if let Some(s) = value.as_string() {
        return Ok(HostValue::String(s.to_string()?));
    }
    Ok(HostValue::Object(inspect(ctx, value)?))
}

/// Renders any engine value the way `console.log` would show it nested.
pub fn inspect<'js>(ctx: &Ctx<'js>, value: Value<'js>) -> rquickjs::Result<String> {
    let inspect: Function<'js> = ctx.globals().get("__host_inspect")?;
    inspect.call((value,))
}
