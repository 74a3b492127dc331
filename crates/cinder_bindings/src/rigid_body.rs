//! Script bindings for rigid bodies, shapes and body/fixture definitions
//!
//! Scripts work in world units throughout. Definitions are stored in
//! simulation units and converted in their property accessors, so a
//! definition can be handed to the physics space unchanged.

use cinder_physics::{
    BodyDef, BodyState, BodyType, FixtureDef, PhysicsError, RigidBody, ShapeDesc, ShapeFactory, SharedSpace,
    UnitConverter,
};
use cinder_script::args::{arg_count, arg_f32, arg_native, to_vec2, vec2_value, vectors};
use cinder_script::{ScriptEnvironment, UserData, UserType, Value};
use std::sync::Arc;

use crate::component::ComponentBinding;
use crate::shared::{flag, number, SharedWorld};

const SHAPE: &str = "Shape";
const BODY_DEF: &str = "BodyDef";
const FIXTURE_DEF: &str = "FixtureDef";
const RIGID_BODY: &str = "RigidBody";

fn script_err(e: PhysicsError) -> String {
    e.to_string()
}

/// Enable RigidBody components and everything scripts need to build them.
///
/// Resets the space's default body definition to the configured one; every
/// RigidBody built from a script without an explicit definition uses it.
pub fn register_functions(env: &ScriptEnvironment, world: &SharedWorld, space: &SharedSpace) {
    log::debug!("Enabling usage of RigidBody components..");

    let units = {
        let mut space = space.lock();
        let def = space.config().default_body.clone();
        space.set_default_body_def(def);
        *space.units()
    };

    {
        let create_space = Arc::clone(space);
        let remove_space = Arc::clone(space);
        ComponentBinding::new(RIGID_BODY, move |_| spawn(&create_space))
            .on_remove(move |rb: &mut RigidBody| release(rb, &remove_space))
            .register(env, world);
    }

    register_shapes(env, units);

    env.set("Physics_DynamicBody", BodyType::Dynamic.id());
    env.set("Physics_KinematicBody", BodyType::Kinematic.id());
    env.set("Physics_StaticBody", BodyType::Static.id());

    env.register_type(body_def_type(units));
    env.register_type(fixture_def_type(units));
    env.register_type(rigid_body_type(space));
}

/// New RigidBody from the space's default definition
fn spawn(space: &SharedSpace) -> Result<RigidBody, String> {
    RigidBody::spawn(&mut space.lock()).map_err(script_err)
}

/// Dispose a RigidBody leaving its entity, unless the script already did
fn release(rb: &mut RigidBody, space: &SharedSpace) {
    if rb.state() == BodyState::Disposed {
        return;
    }
    if let Err(e) = rb.dispose(&mut space.lock()) {
        log::error!("Failed to dispose removed RigidBody: {}", e);
    }
}

fn register_shapes(env: &ScriptEnvironment, units: UnitConverter) {
    let shapes = ShapeFactory::new(units);

    env.register_function("BoxShape", 2, move |args| {
        let shape = shapes.make_box(arg_f32(&args, 0)?, arg_f32(&args, 1)?);
        Ok(UserData::new(SHAPE, shape).into())
    });
    env.register_function("CircleShape", 3, move |args| {
        let shape = shapes.make_circle(arg_f32(&args, 0)?, arg_f32(&args, 1)?, arg_f32(&args, 2)?);
        Ok(UserData::new(SHAPE, shape).into())
    });
    env.register_function("LineShape", 4, move |args| {
        let shape = shapes.make_segment(
            arg_f32(&args, 0)?,
            arg_f32(&args, 1)?,
            arg_f32(&args, 2)?,
            arg_f32(&args, 3)?,
        );
        Ok(UserData::new(SHAPE, shape).into())
    });

    env.register_type(
        UserType::new(SHAPE).property("kind", |this| {
            this.with(|shape: &ShapeDesc| Value::from(shape.kind()))
                .ok_or_else(|| "not a shape".to_string())
        }),
    );
}

fn body_def_type(units: UnitConverter) -> UserType {
    UserType::new(BODY_DEF)
        .constructor(0, |_| Ok(UserData::new(BODY_DEF, BodyDef::default()).into()))
        .field(
            "type",
            |def: &BodyDef| Value::Int(def.body_type.id()),
            |def: &mut BodyDef, v| {
                let id = v.to_int().ok_or("type must be a body type")?;
                def.body_type = BodyType::from_id(id).ok_or_else(|| format!("unknown body type {}", id))?;
                Ok(())
            },
        )
        .field(
            "position",
            move |def: &BodyDef| vec2_value(units.to_world(def.position)),
            move |def: &mut BodyDef, v| {
                let world = to_vec2(&v).ok_or("position must be a vector")?;
                def.position = units.to_simulation(world);
                Ok(())
            },
        )
        .field(
            "angle",
            |def: &BodyDef| Value::from(def.angle),
            |def: &mut BodyDef, v| {
                def.angle = number(&v, "angle")?;
                Ok(())
            },
        )
        .field(
            "gravityScale",
            |def: &BodyDef| Value::from(def.gravity_scale),
            |def: &mut BodyDef, v| {
                def.gravity_scale = number(&v, "gravityScale")?;
                Ok(())
            },
        )
        .field(
            "fixedRotation",
            |def: &BodyDef| Value::Bool(def.fixed_rotation),
            |def: &mut BodyDef, v| {
                def.fixed_rotation = flag(&v, "fixedRotation")?;
                Ok(())
            },
        )
}

fn fixture_def_type(units: UnitConverter) -> UserType {
    UserType::new(FIXTURE_DEF)
        .constructor(0, |_| Ok(UserData::new(FIXTURE_DEF, FixtureDef::default()).into()))
        .field(
            "shape",
            |def: &FixtureDef| match def.shape {
                Some(shape) => UserData::new(SHAPE, shape).into(),
                None => Value::Null,
            },
            |def: &mut FixtureDef, v| {
                def.shape = match &v {
                    Value::Null => None,
                    Value::UserData(ud) if ud.type_name() == SHAPE => ud.get::<ShapeDesc>(),
                    other => return Err(format!("shape must be a Shape, got {}", other.type_name())),
                };
                Ok(())
            },
        )
        .field(
            "density",
            move |def: &FixtureDef| Value::from(def.density_world(&units)),
            move |def: &mut FixtureDef, v| {
                def.set_density_world(&units, number(&v, "density")?);
                Ok(())
            },
        )
        .field(
            "friction",
            move |def: &FixtureDef| Value::from(def.friction_world(&units)),
            move |def: &mut FixtureDef, v| {
                def.set_friction_world(&units, number(&v, "friction")?);
                Ok(())
            },
        )
        .field(
            "restitution",
            move |def: &FixtureDef| Value::from(def.restitution_world(&units)),
            move |def: &mut FixtureDef, v| {
                def.set_restitution_world(&units, number(&v, "restitution")?);
                Ok(())
            },
        )
        .field(
            "isSensor",
            |def: &FixtureDef| Value::Bool(def.is_sensor),
            |def: &mut FixtureDef, v| {
                def.is_sensor = flag(&v, "isSensor")?;
                Ok(())
            },
        )
}

/// Add a RigidBody method whose body takes the locked space
fn body_method<F>(ty: UserType, name: &'static str, space: &SharedSpace, f: F) -> UserType
where
    F: Fn(&mut RigidBody, &mut cinder_physics::PhysicsSpace, Vec<Value>) -> Result<Value, String>
        + Send
        + Sync
        + 'static,
{
    let space = Arc::clone(space);
    ty.method_mut(name, move |rb: &mut RigidBody, args| f(rb, &mut *space.lock(), args))
}

fn rigid_body_type(space: &SharedSpace) -> UserType {
    let ctor_space = Arc::clone(space);
    let get_space = Arc::clone(space);
    let set_space = Arc::clone(space);

    let ty = UserType::new(RIGID_BODY)
        .constructor(0, move |_| Ok(UserData::new(RIGID_BODY, spawn(&ctor_space)?).into()))
        .property_rw(
            "gravity",
            move |this| {
                this.with(|rb: &RigidBody| rb.gravity_scale(&get_space.lock()))
                    .ok_or("not a RigidBody")?
                    .map(Value::from)
                    .map_err(script_err)
            },
            move |this, v| {
                let scale = number(&v, "gravity")?;
                this.with_mut(|rb: &mut RigidBody| rb.set_gravity_scale(&mut set_space.lock(), scale))
                    .ok_or("not a RigidBody")?
                    .map_err(script_err)
            },
        )
        .method_mut("isOutOfSync", |rb: &mut RigidBody, args| {
            arg_count(&args, 0)?;
            Ok(Value::Bool(rb.is_dirty()))
        });

    let ty = body_method(ty, "instantiate", space, |rb, space, args| {
        arg_count(&args, 1)?;
        let def = arg_native::<BodyDef>(&args, 0, BODY_DEF)?;
        rb.instantiate(space, &def).map_err(script_err)?;
        Ok(Value::Null)
    });
    let ty = body_method(ty, "addFixture", space, |rb, space, args| {
        arg_count(&args, 1)?;
        let def = arg_native::<FixtureDef>(&args, 0, FIXTURE_DEF)?;
        rb.add_fixture(space, &def).map_err(script_err)?;
        Ok(Value::Null)
    });
    let ty = body_method(ty, "dispose", space, |rb, space, args| {
        arg_count(&args, 0)?;
        rb.dispose(space).map_err(script_err)?;
        Ok(Value::Null)
    });
    let ty = body_method(ty, "warpTo", space, |rb, space, args| {
        let v = vectors(&args, 0, 1)?;
        rb.warp_to(space, v[0]).map_err(script_err)?;
        Ok(Value::Null)
    });

    // Forces
    let ty = body_method(ty, "applyForce", space, |rb, space, args| {
        let v = vectors(&args, 0, 2)?;
        rb.apply_force(space, v[0], v[1]).map_err(script_err)?;
        Ok(Value::Null)
    });
    let ty = body_method(ty, "applyForceToCentre", space, |rb, space, args| {
        let v = vectors(&args, 0, 1)?;
        rb.apply_force_to_centre(space, v[0]).map_err(script_err)?;
        Ok(Value::Null)
    });
    let ty = body_method(ty, "applyForceRel", space, |rb, space, args| {
        let v = vectors(&args, 0, 2)?;
        rb.apply_force_rel(space, v[0], v[1]).map_err(script_err)?;
        Ok(Value::Null)
    });

    // Impulses
    let ty = body_method(ty, "applyImpulse", space, |rb, space, args| {
        let v = vectors(&args, 0, 2)?;
        rb.apply_impulse(space, v[0], v[1]).map_err(script_err)?;
        Ok(Value::Null)
    });
    let ty = body_method(ty, "applyImpulseToCentre", space, |rb, space, args| {
        let v = vectors(&args, 0, 1)?;
        rb.apply_impulse_to_centre(space, v[0]).map_err(script_err)?;
        Ok(Value::Null)
    });
    body_method(ty, "applyImpulseRel", space, |rb, space, args| {
        let v = vectors(&args, 0, 2)?;
        rb.apply_impulse_rel(space, v[0], v[1]).map_err(script_err)?;
        Ok(Value::Null)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::share_world;
    use approx::assert_relative_eq;
    use cinder_physics::testing::RecordingBackend;
    use cinder_physics::{PhysicsConfig, PhysicsSpace};

    fn setup(scale: f32) -> (ScriptEnvironment, SharedSpace) {
        let config = PhysicsConfig::default().with_scale(scale);
        let space = PhysicsSpace::new(config, Box::new(RecordingBackend::new()))
            .unwrap()
            .into_shared();
        let env = ScriptEnvironment::new();
        register_functions(&env, &share_world(hecs::World::new()), &space);
        (env, space)
    }

    #[test]
    fn test_shapes_are_converted() {
        let (env, _) = setup(0.5);

        let shape = env.call("BoxShape", vec![Value::Int(4), Value::Int(2)]).unwrap();
        assert_eq!(
            shape.as_userdata().unwrap().get::<ShapeDesc>(),
            Some(ShapeDesc::Box { half_width: 2.0, half_height: 1.0 })
        );
        assert_eq!(env.get_property(&shape, "kind").unwrap(), Value::from("box"));
    }

    #[test]
    fn test_body_type_constants() {
        let (env, _) = setup(1.0);
        let def = env.construct(BODY_DEF, vec![]).unwrap();

        let dynamic = env.get("Physics_DynamicBody").unwrap();
        env.set_property(&def, "type", dynamic.clone()).unwrap();
        assert_eq!(env.get_property(&def, "type").unwrap(), dynamic);
        assert!(env.set_property(&def, "type", Value::Int(17)).is_err());
    }

    #[test]
    fn test_fixture_material_uses_inverse_scale() {
        let (env, _) = setup(0.25);
        let def = env.construct(FIXTURE_DEF, vec![]).unwrap();

        env.set_property(&def, "density", Value::Float(2.0)).unwrap();
        let stored = def.as_userdata().unwrap().get::<FixtureDef>().unwrap();
        assert_relative_eq!(stored.density, 8.0);
        assert_eq!(env.get_property(&def, "density").unwrap(), Value::Float(2.0));
    }

    #[test]
    fn test_body_def_position_in_world_units() {
        let (env, _) = setup(0.5);
        let def = env.construct(BODY_DEF, vec![]).unwrap();

        env.set_property(&def, "position", vec2_value(cinder_math::Vec2::new(10.0, 4.0)))
            .unwrap();
        let stored = def.as_userdata().unwrap().get::<BodyDef>().unwrap();
        assert_eq!(stored.position, cinder_math::Vec2::new(5.0, 2.0));
    }

    #[test]
    fn test_methods_check_argument_count() {
        let (env, space) = setup(1.0);
        let rb = env.call(RIGID_BODY, vec![]).unwrap();
        let def = env.construct(BODY_DEF, vec![]).unwrap();
        let fixture = env.construct(FIXTURE_DEF, vec![]).unwrap();

        assert!(env.call_method(&rb, "instantiate", vec![def.clone(), Value::Int(1)]).is_err());
        assert!(env.call_method(&rb, "instantiate", vec![]).is_err());
        assert!(env.call_method(&rb, "addFixture", vec![fixture, Value::Null]).is_err());
        assert!(env.call_method(&rb, "dispose", vec![Value::Bool(true)]).is_err());
        assert!(env.call_method(&rb, "isOutOfSync", vec![Value::Int(0)]).is_err());

        assert!(space.lock().disposals().is_empty());
        assert_eq!(space.lock().backend().body_count(), 1);
        env.call_method(&rb, "instantiate", vec![def]).unwrap();
        env.call_method(&rb, "dispose", vec![]).unwrap();
    }

    #[test]
    fn test_gravity_property() {
        let (env, _) = setup(1.0);
        let rb = env.call(RIGID_BODY, vec![]).unwrap();

        env.set_property(&rb, "gravity", Value::Float(0.5)).unwrap();
        assert_eq!(env.get_property(&rb, "gravity").unwrap(), Value::Float(0.5));
    }
}
