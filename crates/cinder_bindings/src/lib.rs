//! # Cinder Bindings
//!
//! Connects ECS components and rigid-body physics to the script registry.
//!
//! Components live in the [`hecs`] world wrapped in [`Shared`], so the
//! entity, native systems and scripts all see one object. Each component
//! registers `assign_`, `has_`, `get_` and `remove_` functions plus a user
//! type describing its properties and methods.
//!
//! ## Frame order
//!
//! ```text
//! scripts ─► StatSystem::update ─► PhysicsSystem::update
//!                                   ├─ drain disposals
//!                                   ├─ fixed substeps
//!                                   └─ RigidBody ─► Transform
//! ```
//!
//! Locks are always taken world first, then component, then space.
//!
//! ## Example
//!
//! ```ignore
//! use cinder_bindings::*;
//! use cinder_physics::{PhysicsConfig, PhysicsSpace};
//!
//! let world = share_world(hecs::World::new());
//! let space = PhysicsSpace::with_rapier(PhysicsConfig::default())?.into_shared();
//! let env = start_scripting(world.clone(), space.clone());
//!
//! let e = entity_value(world.write().spawn(()));
//! let body = env.call("assign_RigidBody", vec![e])?;
//! env.call_method(&body, "applyForceToCentre", vec![Value::Int(0), Value::Int(-10)])?;
//!
//! let mut physics = PhysicsSystem::new(space);
//! physics.update(&world.read(), 1.0 / 60.0);
//! ```

pub mod component;
pub mod error;
pub mod physics_system;
pub mod rigid_body;
pub mod shared;
pub mod startup;
pub mod stats;
pub mod transform;

pub use cinder_script::Value;
pub use component::ComponentBinding;
pub use error::{BindingError, Result};
pub use physics_system::{PhysicsStepReport, PhysicsSystem};
pub use shared::{arg_entity, entity_value, share_world, Shared, SharedWorld};
pub use startup::start_scripting;
pub use stats::{Movement, StatSystem, Stats};
pub use transform::Transform;
