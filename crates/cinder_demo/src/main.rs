//! Cinder headless demo
//!
//! Builds a small scene entirely through the script registry: a static floor
//! and a crate that gets pushed sideways, then runs the frame loop and logs
//! where the crate ends up.
//!
//! Run with: cargo run -p cinder_demo
//!       or: cargo run --bin cinder-demo -- path/to/physics.json

use cinder_bindings::{entity_value, share_world, start_scripting, PhysicsSystem, StatSystem, Value};
use cinder_physics::{PhysicsConfig, PhysicsSpace};
use cinder_script::args::to_vec2;
use cinder_script::{ScriptEnvironment, ScriptResult};

const FRAMES: u32 = 180;
const FRAME_TIME: f32 = 1.0 / 60.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

fn load_config() -> Result<PhysicsConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading physics config from {}", path);
            let json = std::fs::read_to_string(&path)?;
            Ok(PhysicsConfig::from_json(&json)?)
        }
        None => Ok(PhysicsConfig::default()),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    log::info!("Scale {} sim units per world unit, timestep {:.4}s", config.scale, config.timestep);

    let space = PhysicsSpace::with_rapier(config)?.into_shared();
    let world = share_world(hecs::World::new());
    let env = start_scripting(world.clone(), space.clone());

    if env.call("test_scripting", vec![])? != Value::Bool(true) {
        return Err("scripting did not start".into());
    }

    build_floor(&env, &world)?;
    let (crate_entity, crate_body) = build_crate(&env, &world)?;

    let mut stats = StatSystem::new();
    let mut physics = PhysicsSystem::new(space);

    for frame in 0..FRAMES {
        {
            let world = world.read();
            stats.update(&world, FRAME_TIME);
            physics.update(&world, FRAME_TIME);
        }

        if frame == 30 {
            env.call_method(&crate_body, "applyImpulseToCentre", vec![Value::Float(400.0), Value::Float(0.0)])?;
        }
        if frame % 30 == 0 {
            let transform = env.call("get_Transform", vec![crate_entity.clone()])?;
            let position = env.get_property(&transform, "position")?;
            if let Some(p) = to_vec2(&position) {
                log::info!("frame {:3}: crate at ({:8.2}, {:8.2})", frame, p.x, p.y);
            }
        }
    }

    let report = physics.last_report();
    log::info!(
        "Done: last frame ran {} substeps and synced {} bodies",
        report.substeps,
        report.synced
    );
    Ok(())
}

fn body_def(env: &ScriptEnvironment, kind: &str, x: f64, y: f64) -> ScriptResult<Value> {
    let def = env.construct("BodyDef", vec![])?;
    let body_type = env.get(kind).unwrap_or(Value::Null);
    env.set_property(&def, "type", body_type)?;
    env.set_property(&def, "position", Value::Array(vec![Value::Float(x), Value::Float(y)]))?;
    Ok(def)
}

fn box_fixture(env: &ScriptEnvironment, half_width: i64, half_height: i64, density: f64) -> ScriptResult<Value> {
    let fixture = env.construct("FixtureDef", vec![])?;
    let shape = env.call("BoxShape", vec![Value::Int(half_width), Value::Int(half_height)])?;
    env.set_property(&fixture, "shape", shape)?;
    env.set_property(&fixture, "density", Value::Float(density))?;
    env.set_property(&fixture, "friction", Value::Float(0.4))?;
    Ok(fixture)
}

fn build_floor(env: &ScriptEnvironment, world: &cinder_bindings::SharedWorld) -> ScriptResult<()> {
    let floor = entity_value(world.write().spawn(()));
    env.call("assign_Transform", vec![floor.clone()])?;
    let body = env.call("assign_RigidBody", vec![floor])?;
    env.call_method(&body, "instantiate", vec![body_def(env, "Physics_StaticBody", 0.0, 400.0)?])?;
    env.call_method(&body, "addFixture", vec![box_fixture(env, 800, 16, 1.0)?])?;
    Ok(())
}

fn build_crate(env: &ScriptEnvironment, world: &cinder_bindings::SharedWorld) -> ScriptResult<(Value, Value)> {
    let entity = entity_value(world.write().spawn(()));
    env.call("assign_Transform", vec![entity.clone()])?;
    env.call("assign_Stats", vec![entity.clone(), Value::Float(120.0)])?;
    env.call("assign_Movement", vec![entity.clone()])?;

    let body = env.call("assign_RigidBody", vec![entity.clone()])?;
    env.call_method(&body, "instantiate", vec![body_def(env, "Physics_DynamicBody", 0.0, 0.0)?])?;
    env.call_method(&body, "addFixture", vec![box_fixture(env, 16, 16, 1.0)?])?;
    Ok((entity, body))
}
