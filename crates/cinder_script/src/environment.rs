//! Script environment
//!
//! Holds the globals and user types a script can reach. Cloning an
//! environment shares its registries, so native functions may capture a
//! handle to the environment they are registered in.

use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;

use crate::error::{ScriptError, ScriptResult};
use crate::usertype::UserType;
use crate::value::{NativeFunction, Value};

/// Named globals
#[derive(Debug, Clone, Default)]
pub struct Scope {
    variables: HashMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or overwrite a variable
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.variables.keys()
    }
}

/// Registry of globals and user types
#[derive(Clone, Default)]
pub struct ScriptEnvironment {
    globals: Arc<RwLock<Scope>>,
    types: Arc<RwLock<HashMap<String, Arc<UserType>>>>,
}

impl ScriptEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Registration ====================

    /// Set a global value
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.globals.write().define(name, value.into());
    }

    /// Register a native function (`arity` -1 for variadic)
    pub fn register_function<F>(&self, name: impl Into<String>, arity: i32, func: F)
    where
        F: Fn(Vec<Value>) -> Result<Value, String> + Send + Sync + 'static,
    {
        let name = name.into();
        log::trace!("Registering script function {}", name);
        let native = NativeFunction::new(name.clone(), arity, func);
        self.globals.write().define(name, Value::Native(native));
    }

    /// Register a user type. Replaces any type of the same name.
    pub fn register_type(&self, user_type: UserType) {
        let name = user_type.name().to_string();
        log::trace!("Registering script type {}", name);
        if self.types.write().insert(name.clone(), Arc::new(user_type)).is_some() {
            log::warn!("Script type {} registered twice, keeping the latest", name);
        }
    }

    // ==================== Lookup ====================

    pub fn get(&self, name: &str) -> Option<Value> {
        self.globals.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.globals.read().contains(name)
    }

    pub fn user_type(&self, name: &str) -> Option<Arc<UserType>> {
        self.types.read().get(name).cloned()
    }

    /// Global names, sorted
    pub fn global_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.globals.read().names().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Type names, sorted
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    // ==================== Invocation ====================

    /// Call a global function, or a type's constructor when `name` is a type
    pub fn call(&self, name: &str, args: Vec<Value>) -> ScriptResult<Value> {
        let global = self.get(name);
        match global {
            Some(Value::Native(native)) => native
                .call(args)
                .map_err(|message| ScriptError::call_failed(name, message)),
            Some(_) => Err(ScriptError::UnknownFunction(name.to_string())),
            None if self.types.read().contains_key(name) => self.construct(name, args),
            None => Err(ScriptError::UnknownFunction(name.to_string())),
        }
    }

    /// Construct an instance of a user type
    pub fn construct(&self, type_name: &str, args: Vec<Value>) -> ScriptResult<Value> {
        let user_type = self
            .user_type(type_name)
            .ok_or_else(|| ScriptError::UnknownType(type_name.to_string()))?;
        let constructor = user_type
            .get_constructor()
            .ok_or_else(|| ScriptError::NoConstructor(type_name.to_string()))?;
        constructor
            .call(args)
            .map_err(|message| ScriptError::call_failed(type_name, message))
    }

    /// Call a method on a user data value
    pub fn call_method(&self, target: &Value, method: &str, args: Vec<Value>) -> ScriptResult<Value> {
        let (this, user_type) = self.receiver(target)?;
        let func = user_type.get_method(method).ok_or_else(|| ScriptError::UnknownMember {
            type_name: user_type.name().to_string(),
            member: method.to_string(),
        })?;
        func(this, args).map_err(|message| {
            ScriptError::call_failed(format!("{}:{}", user_type.name(), method), message)
        })
    }

    /// Read a property of a user data value
    pub fn get_property(&self, target: &Value, property: &str) -> ScriptResult<Value> {
        let (this, user_type) = self.receiver(target)?;
        let prop = user_type.get_property(property).ok_or_else(|| ScriptError::UnknownMember {
            type_name: user_type.name().to_string(),
            member: property.to_string(),
        })?;
        (prop.getter)(this).map_err(|message| {
            ScriptError::call_failed(format!("{}.{}", user_type.name(), property), message)
        })
    }

    /// Write a property of a user data value
    pub fn set_property(&self, target: &Value, property: &str, value: Value) -> ScriptResult<()> {
        let (this, user_type) = self.receiver(target)?;
        let prop = user_type.get_property(property).ok_or_else(|| ScriptError::UnknownMember {
            type_name: user_type.name().to_string(),
            member: property.to_string(),
        })?;
        let setter = prop.setter.as_ref().ok_or_else(|| ScriptError::ReadOnlyProperty {
            type_name: user_type.name().to_string(),
            property: property.to_string(),
        })?;
        setter(this, value).map_err(|message| {
            ScriptError::call_failed(format!("{}.{}", user_type.name(), property), message)
        })
    }

    fn receiver<'a>(&self, target: &'a Value) -> ScriptResult<(&'a crate::UserData, Arc<UserType>)> {
        let this = target
            .as_userdata()
            .ok_or(ScriptError::NotUserData(target.type_name()))?;
        let user_type = self
            .user_type(this.type_name())
            .ok_or_else(|| ScriptError::UnknownType(this.type_name().to_string()))?;
        Ok((this, user_type))
    }
}

impl std::fmt::Debug for ScriptEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptEnvironment")
            .field("globals", &self.globals.read().names().count())
            .field("types", &self.type_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::userdata::UserData;

    #[test]
    fn test_globals_shared_between_clones() {
        let env = ScriptEnvironment::new();
        let other = env.clone();

        other.set("Physics_DynamicBody", Value::Int(2));
        assert_eq!(env.get("Physics_DynamicBody"), Some(Value::Int(2)));
    }

    #[test]
    fn test_call_function() {
        let env = ScriptEnvironment::new();
        env.register_function("double", 1, |args| {
            Ok(Value::Int(args[0].to_int().ok_or("not a number")? * 2))
        });

        assert_eq!(env.call("double", vec![Value::Int(21)]).unwrap(), Value::Int(42));
        assert!(matches!(
            env.call("double", vec![Value::Null]),
            Err(ScriptError::CallFailed { .. })
        ));
        assert!(matches!(env.call("missing", vec![]), Err(ScriptError::UnknownFunction(_))));
    }

    #[test]
    fn test_call_falls_back_to_constructor() {
        let env = ScriptEnvironment::new();
        env.register_type(
            UserType::new("Tag").constructor(0, |_| Ok(UserData::new("Tag", 0u8).into())),
        );

        let tag = env.call("Tag", vec![]).unwrap();
        assert_eq!(tag.as_userdata().unwrap().type_name(), "Tag");
    }

    #[test]
    fn test_member_errors() {
        let env = ScriptEnvironment::new();
        env.register_type(UserType::new("Tag").property("id", |_| Ok(Value::Int(1))));
        let tag = Value::UserData(UserData::new("Tag", 0u8));

        assert_eq!(env.get_property(&tag, "id").unwrap(), Value::Int(1));
        assert!(matches!(
            env.set_property(&tag, "id", Value::Int(2)),
            Err(ScriptError::ReadOnlyProperty { .. })
        ));
        assert!(matches!(
            env.call_method(&tag, "nope", vec![]),
            Err(ScriptError::UnknownMember { .. })
        ));
        assert!(matches!(
            env.get_property(&Value::Int(1), "id"),
            Err(ScriptError::NotUserData("int"))
        ));
        assert!(matches!(env.construct("Tag", vec![]), Err(ScriptError::NoConstructor(_))));
    }
}
