//! Character stats and the system that turns them into movement parameters

use cinder_math::Vec2;
use cinder_script::args::{arg_f32_or, to_vec2, vec2_value};
use cinder_script::{ScriptEnvironment, UserData, UserType, Value};

use crate::component::ComponentBinding;
use crate::shared::{number, Shared, SharedWorld};

/// Base stats of a character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    /// World units per second
    pub move_speed: f32,
    pub speed_multiplier: f32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            move_speed: 0.0,
            speed_multiplier: 1.0,
        }
    }
}

impl Stats {
    /// Move speed after modifiers
    pub fn effective_move_speed(&self) -> f32 {
        self.move_speed * self.speed_multiplier
    }
}

/// What a movement controller reads each frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Movement {
    pub speed: f32,
    pub direction: Vec2,
}

impl Movement {
    /// Velocity along the current direction
    pub fn velocity(&self) -> Vec2 {
        self.direction.normalize() * self.speed
    }
}

/// Copies stats into the components that consume them
#[derive(Debug, Default)]
pub struct StatSystem {
    written: usize,
}

impl StatSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write stats into every entity carrying both Stats and Movement
    pub fn update(&mut self, world: &hecs::World, _dt: f32) {
        self.written = 0;
        let mut query = world.query::<(&Shared<Stats>, &Shared<Movement>)>();
        for (_entity, (stats, movement)) in query.iter() {
            Self::write_movement_stats(&stats.read(), &mut movement.write());
            self.written += 1;
        }
    }

    /// Write the stats a Movement component needs
    pub fn write_movement_stats(stats: &Stats, movement: &mut Movement) {
        movement.speed = stats.effective_move_speed();
    }

    /// Entities written by the last update
    pub fn written(&self) -> usize {
        self.written
    }
}

/// Register Stats and Movement for scripts
pub fn register_stat_system(env: &ScriptEnvironment, world: &SharedWorld) {
    log::debug!("Enabling usage of Stats and Movement components");

    let stats_from_args = |args: &[Value]| -> Result<Stats, String> {
        Ok(Stats {
            move_speed: arg_f32_or(args, 0, 0.0)?,
            speed_multiplier: arg_f32_or(args, 1, 1.0)?,
        })
    };
    ComponentBinding::new("Stats", move |args| stats_from_args(&args[..])).register(env, world);
    env.register_type(
        UserType::new("Stats")
            .constructor(-1, move |args| Ok(UserData::new("Stats", stats_from_args(&args[..])?).into()))
            .field("moveSpeed", |s: &Stats| Value::from(s.move_speed), |s: &mut Stats, v| {
                s.move_speed = number(&v, "moveSpeed")?;
                Ok(())
            })
            .field("speedMultiplier", |s: &Stats| Value::from(s.speed_multiplier), |s: &mut Stats, v| {
                s.speed_multiplier = number(&v, "speedMultiplier")?;
                Ok(())
            }),
    );

    ComponentBinding::new("Movement", |_| Ok(Movement::default())).register(env, world);
    env.register_type(
        UserType::new("Movement")
            .constructor(0, |_| Ok(UserData::new("Movement", Movement::default()).into()))
            .field("speed", |m: &Movement| Value::from(m.speed), |m: &mut Movement, v| {
                m.speed = number(&v, "speed")?;
                Ok(())
            })
            .field("direction", |m: &Movement| vec2_value(m.direction), |m: &mut Movement, v| {
                m.direction = to_vec2(&v).ok_or("direction must be a vector")?;
                Ok(())
            }),
    );
}
