//! Argument helpers for native functions
//!
//! Native functions report failures as plain strings; these helpers produce
//! messages naming the offending argument.

use cinder_math::Vec2;
use std::any::Any;
use std::collections::HashMap;

use crate::userdata::UserData;
use crate::value::Value;

fn arg<'a>(args: &'a [Value], index: usize) -> Result<&'a Value, String> {
    args.get(index)
        .ok_or_else(|| format!("missing argument {}", index + 1))
}

/// Fail unless exactly `count` arguments were passed
pub fn arg_count(args: &[Value], count: usize) -> Result<(), String> {
    if args.len() != count {
        return Err(format!("expected {} arguments, got {}", count, args.len()));
    }
    Ok(())
}

/// Numeric argument as `f32`
pub fn arg_f32(args: &[Value], index: usize) -> Result<f32, String> {
    let value = arg(args, index)?;
    value
        .to_float()
        .map(|f| f as f32)
        .ok_or_else(|| format!("argument {} must be a number, got {}", index + 1, value.type_name()))
}

/// Numeric argument as `f32`, or `default` when absent
pub fn arg_f32_or(args: &[Value], index: usize, default: f32) -> Result<f32, String> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(default),
        Some(_) => arg_f32(args, index),
    }
}

pub fn arg_i64(args: &[Value], index: usize) -> Result<i64, String> {
    let value = arg(args, index)?;
    match value {
        Value::Int(n) => Ok(*n),
        Value::Float(f) if f.fract() == 0.0 => Ok(*f as i64),
        other => Err(format!("argument {} must be an integer, got {}", index + 1, other.type_name())),
    }
}

pub fn arg_bool(args: &[Value], index: usize) -> Result<bool, String> {
    let value = arg(args, index)?;
    value
        .to_bool()
        .ok_or_else(|| format!("argument {} must be a bool, got {}", index + 1, value.type_name()))
}

/// User data argument of the given script type
pub fn arg_userdata<'a>(args: &'a [Value], index: usize, type_name: &str) -> Result<&'a UserData, String> {
    match arg(args, index)? {
        Value::UserData(ud) if ud.type_name() == type_name => Ok(ud),
        Value::UserData(ud) => Err(format!(
            "argument {} must be {}, got {}",
            index + 1,
            type_name,
            ud.type_name()
        )),
        other => Err(format!(
            "argument {} must be {}, got {}",
            index + 1,
            type_name,
            other.type_name()
        )),
    }
}

/// Copy a `T` out of a user data argument
pub fn arg_native<T: Any + Send + Sync + Clone>(args: &[Value], index: usize, type_name: &str) -> Result<T, String> {
    arg_userdata(args, index, type_name)?
        .get::<T>()
        .ok_or_else(|| format!("argument {} is not a native {}", index + 1, type_name))
}

/// Interpret a value as a vector: `[x, y]` or `{x, y}`
pub fn to_vec2(value: &Value) -> Option<Vec2> {
    match value {
        Value::Array(items) if items.len() == 2 => {
            Some(Vec2::new(items[0].to_float()? as f32, items[1].to_float()? as f32))
        }
        Value::Object(fields) => {
            let x = fields.get("x")?.to_float()?;
            let y = fields.get("y")?.to_float()?;
            Some(Vec2::new(x as f32, y as f32))
        }
        _ => None,
    }
}

/// Read `count` vectors starting at `start`, each given either as a vector
/// value or as two numbers.
///
/// `applyForce(f, p)` and `applyForce(fx, fy, px, py)` both yield `[f, p]`.
pub fn vectors(args: &[Value], start: usize, count: usize) -> Result<Vec<Vec2>, String> {
    let mut out = Vec::with_capacity(count);
    let mut index = start;
    for _ in 0..count {
        let value = arg(args, index)?;
        if let Some(v) = to_vec2(value) {
            out.push(v);
            index += 1;
        } else if value.is_number() {
            out.push(Vec2::new(arg_f32(args, index)?, arg_f32(args, index + 1)?));
            index += 2;
        } else {
            return Err(format!(
                "argument {} must be a vector or number, got {}",
                index + 1,
                value.type_name()
            ));
        }
    }
    if index != args.len() {
        return Err(format!("expected {} arguments, got {}", index, args.len()));
    }
    Ok(out)
}

/// Vector as a script value `{x, y}`
pub fn vec2_value(v: Vec2) -> Value {
    Value::Object(HashMap::from([
        ("x".to_string(), Value::from(v.x)),
        ("y".to_string(), Value::from(v.y)),
    ]))
}
