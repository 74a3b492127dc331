//! Script environment setup

use cinder_physics::SharedSpace;
use cinder_script::{ScriptEnvironment, Value};

use crate::shared::SharedWorld;
use crate::{rigid_body, stats, transform};

/// Build a script environment with every component binding registered
pub fn start_scripting(world: SharedWorld, space: SharedSpace) -> ScriptEnvironment {
    let env = ScriptEnvironment::new();

    env.register_function("test_scripting", 0, |_| Ok(Value::Bool(true)));

    transform::register_functions(&env, &world);
    stats::register_stat_system(&env, &world);
    rigid_body::register_functions(&env, &world, &space);

    log::info!(
        "Scripting started with {} globals and {} types",
        env.global_names().len(),
        env.type_names().len()
    );
    env
}
