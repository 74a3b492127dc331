//! Values passed between scripts and native code

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::userdata::UserData;

/// Script-visible value
#[derive(Debug, Clone)]
pub enum Value {
    /// Null/unit value
    Null,
    /// Boolean
    Bool(bool),
    /// Integer (64-bit signed)
    Int(i64),
    /// Float (64-bit)
    Float(f64),
    /// String
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object/map
    Object(HashMap<String, Value>),
    /// Native function
    Native(NativeFunction),
    /// Native object exposed through a registered user type
    UserData(UserData),
}

impl Value {
    /// Check if value is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Array(arr) => !arr.is_empty(),
            Self::Object(obj) => !obj.is_empty(),
            Self::Native(_) | Self::UserData(_) => true,
        }
    }

    /// Get type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Native(_) => "native",
            Self::UserData(_) => "userdata",
        }
    }

    /// Try to convert to int
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) => Some(*f as i64),
            Self::Bool(b) => Some(if *b { 1 } else { 0 }),
            _ => None,
        }
    }

    /// Try to convert to float
    pub fn to_float(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to convert to bool
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_userdata(&self) -> Option<&UserData> {
        match self {
            Self::UserData(ud) => Some(ud),
            _ => None,
        }
    }

    /// Render for display
    pub fn to_string_value(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => s.clone(),
            Self::Array(arr) => {
                let items: Vec<String> = arr.iter()
                    .map(|v| v.to_string_value())
                    .collect();
                format!("[{}]", items.join(", "))
            }
            Self::Object(obj) => {
                let mut items: Vec<String> = obj.iter()
                    .map(|(k, v)| format!("{}: {}", k, v.to_string_value()))
                    .collect();
                items.sort();
                format!("{{{}}}", items.join(", "))
            }
            Self::Native(n) => format!("<native {}>", n.name),
            Self::UserData(ud) => format!("<{}>", ud.type_name()),
        }
    }

    /// Check if value is a number (int or float)
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => (a - b).abs() < f64::EPSILON,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => {
                (*a as f64 - b).abs() < f64::EPSILON
            }
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::UserData(a), Self::UserData(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<UserData> for Value {
    fn from(ud: UserData) -> Self {
        Self::UserData(ud)
    }
}

/// Native function type
pub type NativeFn = Arc<dyn Fn(Vec<Value>) -> Result<Value, String> + Send + Sync>;

/// Native/built-in function
#[derive(Clone)]
pub struct NativeFunction {
    /// Function name
    pub name: String,
    /// Expected number of arguments (-1 for variadic)
    pub arity: i32,
    /// The function implementation
    pub func: NativeFn,
}

impl NativeFunction {
    /// Create a new native function
    pub fn new<F>(name: impl Into<String>, arity: i32, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }

    /// Call the native function
    pub fn call(&self, args: Vec<Value>) -> Result<Value, String> {
        if self.arity >= 0 && args.len() != self.arity as usize {
            return Err(format!(
                "Function '{}' expected {} arguments, got {}",
                self.name, self.arity, args.len()
            ));
        }
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(Value::UserData(UserData::new("Thing", 1u32)).is_truthy());
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(Value::Int(5), Value::Float(5.0));
        assert_ne!(Value::Int(5), Value::Int(6));

        let ud = UserData::new("Thing", 1u32);
        assert_eq!(Value::UserData(ud.clone()), Value::UserData(ud));
        assert_ne!(
            Value::UserData(UserData::new("Thing", 1u32)),
            Value::UserData(UserData::new("Thing", 1u32))
        );
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::UserData(UserData::new("Shape", ())).to_string(), "<Shape>");
    }

    #[test]
    fn test_native_function_arity() {
        let func = NativeFunction::new("add", 2, |args| {
            match (&args[0], &args[1]) {
                (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
                _ => Err("Expected integers".to_string()),
            }
        });

        assert_eq!(func.call(vec![Value::Int(2), Value::Int(3)]).unwrap(), Value::Int(5));
        assert!(func.call(vec![Value::Int(2)]).is_err());
    }
}
