//! Transform component: where an entity is drawn, in world units

use cinder_math::{Transform2D, Vec2};
use cinder_script::args::{arg_f32_or, to_vec2, vec2_value};
use cinder_script::{ScriptEnvironment, UserData, UserType, Value};

use crate::component::ComponentBinding;
use crate::shared::{number, SharedWorld};

/// Position and rotation of an entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vec2,
    /// Radians
    pub rotation: f32,
}

impl Transform {
    pub fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            rotation,
        }
    }

    /// `Transform(x, y, r)` with every argument optional
    fn from_args(args: &[Value]) -> Result<Self, String> {
        Ok(Self::new(
            arg_f32_or(args, 0, 0.0)?,
            arg_f32_or(args, 1, 0.0)?,
            arg_f32_or(args, 2, 0.0)?,
        ))
    }
}

impl From<Transform2D> for Transform {
    fn from(t: Transform2D) -> Self {
        Self {
            position: t.position,
            rotation: t.rotation,
        }
    }
}

impl From<Transform> for Transform2D {
    fn from(t: Transform) -> Self {
        Transform2D::new(t.position, t.rotation)
    }
}

/// Make Transform scriptable
pub fn register_functions(env: &ScriptEnvironment, world: &SharedWorld) {
    ComponentBinding::new("Transform", |args| Transform::from_args(&args)).register(env, world);

    env.register_type(
        UserType::new("Transform")
            .constructor(-1, |args| {
                Ok(UserData::new("Transform", Transform::from_args(&args)?).into())
            })
            .field(
                "position",
                |t: &Transform| vec2_value(t.position),
                |t: &mut Transform, v| {
                    t.position = to_vec2(&v).ok_or("position must be a vector")?;
                    Ok(())
                },
            )
            .field(
                "rotation",
                |t: &Transform| Value::from(t.rotation),
                |t: &mut Transform, v| {
                    t.rotation = number(&v, "rotation")?;
                    Ok(())
                },
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{entity_value, share_world};

    #[test]
    fn test_constructor_defaults() {
        let env = ScriptEnvironment::new();
        register_functions(&env, &share_world(hecs::World::new()));

        let t = env.call("Transform", vec![Value::Int(3)]).unwrap();
        assert_eq!(t.as_userdata().unwrap().get::<Transform>(), Some(Transform::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn test_script_writes_reach_entity() {
        let env = ScriptEnvironment::new();
        let world = share_world(hecs::World::new());
        register_functions(&env, &world);
        let entity = world.write().spawn(());

        env.call("assign_Transform", vec![entity_value(entity), Value::Int(1), Value::Int(2)])
            .unwrap();
        let t = env.call("get_Transform", vec![entity_value(entity)]).unwrap();
        env.set_property(&t, "rotation", Value::Float(0.5)).unwrap();

        let stored = crate::Shared::<Transform>::of(&world.read(), entity, "Transform").unwrap();
        assert_eq!(*stored.read(), Transform::new(1.0, 2.0, 0.5));
    }
}
