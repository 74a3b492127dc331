//! Script-visible native types
//!
//! A [`UserType`] names a native type and lists what scripts may do with it:
//! construct it, call methods on it and read or write its properties. Methods
//! and property accessors receive the [`UserData`] they were invoked on.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::userdata::UserData;
use crate::value::{NativeFunction, Value};

/// Method implementation: receiver plus arguments
pub type MethodFn = Arc<dyn Fn(&UserData, Vec<Value>) -> Result<Value, String> + Send + Sync>;

/// Property getter
pub type GetterFn = Arc<dyn Fn(&UserData) -> Result<Value, String> + Send + Sync>;

/// Property setter
pub type SetterFn = Arc<dyn Fn(&UserData, Value) -> Result<(), String> + Send + Sync>;

/// A readable, optionally writable property
#[derive(Clone)]
pub struct Property {
    pub getter: GetterFn,
    pub setter: Option<SetterFn>,
}

/// Registered native type
#[derive(Clone)]
pub struct UserType {
    name: String,
    constructor: Option<NativeFunction>,
    methods: HashMap<String, MethodFn>,
    properties: HashMap<String, Property>,
}

impl UserType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructor: None,
            methods: HashMap::new(),
            properties: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the constructor (`arity` -1 for variadic)
    pub fn constructor<F>(mut self, arity: i32, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.constructor = Some(NativeFunction::new(self.name.clone(), arity, func));
        self
    }

    /// Add a method working on the raw receiver
    pub fn method<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&UserData, Vec<Value>) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(func));
        self
    }

    /// Add a method that mutably borrows a `T` receiver
    pub fn method_mut<T, F>(self, name: impl Into<String>, func: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&mut T, Vec<Value>) -> Result<Value, String> + Send + Sync + 'static,
    {
        let type_name = self.name.clone();
        self.method(name, move |this, args| {
            this.with_mut(|value: &mut T| func(value, args))
                .unwrap_or_else(|| Err(receiver_mismatch(&type_name, this)))
        })
    }

    /// Add a read-only property
    pub fn property<G>(mut self, name: impl Into<String>, getter: G) -> Self
    where
        G: Fn(&UserData) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.properties.insert(
            name.into(),
            Property {
                getter: Arc::new(getter),
                setter: None,
            },
        );
        self
    }

    /// Add a read-write property
    pub fn property_rw<G, S>(mut self, name: impl Into<String>, getter: G, setter: S) -> Self
    where
        G: Fn(&UserData) -> Result<Value, String> + Send + Sync + 'static,
        S: Fn(&UserData, Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.properties.insert(
            name.into(),
            Property {
                getter: Arc::new(getter),
                setter: Some(Arc::new(setter)),
            },
        );
        self
    }

    /// Add a read-write property over a `T` receiver
    pub fn field<T, G, S>(self, name: impl Into<String>, getter: G, setter: S) -> Self
    where
        T: Any + Send + Sync,
        G: Fn(&T) -> Value + Send + Sync + 'static,
        S: Fn(&mut T, Value) -> Result<(), String> + Send + Sync + 'static,
    {
        let get_name = self.name.clone();
        let set_name = self.name.clone();
        self.property_rw(
            name,
            move |this| {
                this.with(|value: &T| getter(value))
                    .ok_or_else(|| receiver_mismatch(&get_name, this))
            },
            move |this, v| {
                this.with_mut(|value: &mut T| setter(value, v))
                    .unwrap_or_else(|| Err(receiver_mismatch(&set_name, this)))
            },
        )
    }

    pub fn get_constructor(&self) -> Option<&NativeFunction> {
        self.constructor.as_ref()
    }

    pub fn get_method(&self, name: &str) -> Option<&MethodFn> {
        self.methods.get(name)
    }

    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Method names, sorted
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Property names, sorted
    pub fn property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn receiver_mismatch(type_name: &str, this: &UserData) -> String {
    format!("expected {} receiver, got {}", type_name, this.type_name())
}

impl fmt::Debug for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserType")
            .field("name", &self.name)
            .field("constructor", &self.constructor.is_some())
            .field("methods", &self.method_names())
            .field("properties", &self.property_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Door {
        open: bool,
    }

    fn door_type() -> UserType {
        UserType::new("Door")
            .constructor(0, |_| Ok(UserData::new("Door", Door::default()).into()))
            .method_mut("toggle", |door: &mut Door, _| {
                door.open = !door.open;
                Ok(Value::Null)
            })
            .field(
                "open",
                |door: &Door| Value::Bool(door.open),
                |door: &mut Door, v| {
                    door.open = v.to_bool().ok_or("open must be a bool")?;
                    Ok(())
                },
            )
    }

    #[test]
    fn test_method_mutates_receiver() {
        let ty = door_type();
        let door = UserData::new("Door", Door::default());

        (ty.get_method("toggle").unwrap())(&door, vec![]).unwrap();
        assert!(door.with(|d: &Door| d.open).unwrap());
    }

    #[test]
    fn test_field_accessors() {
        let ty = door_type();
        let door = UserData::new("Door", Door::default());
        let prop = ty.get_property("open").unwrap();

        (prop.setter.as_ref().unwrap())(&door, Value::Bool(true)).unwrap();
        assert_eq!((prop.getter)(&door).unwrap(), Value::Bool(true));
        assert!((prop.setter.as_ref().unwrap())(&door, Value::Int(1)).is_err());
    }

    #[test]
    fn test_wrong_receiver() {
        let ty = door_type();
        let not_a_door = UserData::new("Window", 5u8);

        let err = (ty.get_method("toggle").unwrap())(&not_a_door, vec![]).unwrap_err();
        assert!(err.contains("Window"));
    }

    #[test]
    fn test_names_sorted() {
        let ty = door_type().method("close", |_, _| Ok(Value::Null));
        assert_eq!(ty.method_names(), vec!["close", "toggle"]);
        assert_eq!(ty.property_names(), vec!["open"]);
    }
}
