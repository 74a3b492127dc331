//! Binding errors

use cinder_physics::PhysicsError;
use cinder_script::ScriptError;
use thiserror::Error;

/// Errors raised by the binding layer outside of script calls
#[derive(Debug, Error)]
pub enum BindingError {
    #[error(transparent)]
    Physics(#[from] PhysicsError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("No such entity: {0:?}")]
    NoSuchEntity(hecs::Entity),

    #[error("Entity {entity:?} has no {component} component")]
    MissingComponent {
        entity: hecs::Entity,
        component: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, BindingError>;
