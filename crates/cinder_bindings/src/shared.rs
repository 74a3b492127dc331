//! Shared ownership between the ECS, native systems and scripts

use cinder_script::{UserData, Value};
use hecs::Entity;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

use crate::error::{BindingError, Result};

/// The ECS world as seen by bindings and systems
pub type SharedWorld = Arc<RwLock<hecs::World>>;

/// Wrap a world for sharing
pub fn share_world(world: hecs::World) -> SharedWorld {
    Arc::new(RwLock::new(world))
}

/// A component stored once and reachable from the entity and from scripts.
///
/// Scripts receive the same object the entity holds, so a script writing
/// `get_Transform(e).position` changes the entity's transform.
pub struct Shared<T>(Arc<RwLock<T>>);

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Send + Sync + 'static> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }

    /// Script handle to this component
    pub fn to_userdata(&self, type_name: &str) -> UserData {
        UserData::from_shared(type_name, Arc::clone(&self.0))
    }

    /// Recover the component behind a script handle
    pub fn from_userdata(ud: &UserData) -> Option<Self> {
        ud.shared::<T>().map(Self)
    }

    /// Fetch the component from an entity
    pub fn of(world: &hecs::World, entity: Entity, component: &'static str) -> Result<Self> {
        match world.get::<&Shared<T>>(entity) {
            Ok(shared) => Ok(Shared::clone(&shared)),
            Err(hecs::ComponentError::NoSuchEntity) => Err(BindingError::NoSuchEntity(entity)),
            Err(hecs::ComponentError::MissingComponent(_)) => {
                Err(BindingError::MissingComponent { entity, component })
            }
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Shared").field(&*self.0.read()).finish()
    }
}

/// Entity as a script value
pub fn entity_value(entity: Entity) -> Value {
    Value::Int(entity.to_bits().get() as i64)
}

/// Entity argument
pub fn arg_entity(args: &[Value], index: usize) -> std::result::Result<Entity, String> {
    let bits = cinder_script::args::arg_i64(args, index)?;
    Entity::from_bits(bits as u64).ok_or_else(|| format!("argument {} is not an entity", index + 1))
}

/// Number property value
pub(crate) fn number(v: &Value, name: &str) -> std::result::Result<f32, String> {
    v.to_float()
        .map(|f| f as f32)
        .ok_or_else(|| format!("{} must be a number", name))
}

/// Bool property value
pub(crate) fn flag(v: &Value, name: &str) -> std::result::Result<bool, String> {
    v.to_bool().ok_or_else(|| format!("{} must be a bool", name))
}
