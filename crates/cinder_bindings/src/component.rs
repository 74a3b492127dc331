//! Entity component functions for scripts
//!
//! Registering a component named `Name` gives scripts four functions:
//!
//! | Function               | Result                                      |
//! |------------------------|---------------------------------------------|
//! | `assign_Name(e, ...)`  | builds the component from `...`, returns it |
//! | `has_Name(e)`          | bool                                        |
//! | `get_Name(e)`          | the component, or an error if absent        |
//! | `remove_Name(e)`       | bool, whether a component was removed       |

use cinder_script::{ScriptEnvironment, Value};
use std::sync::Arc;

use crate::shared::{arg_entity, Shared, SharedWorld};

type CreateFn<T> = Arc<dyn Fn(Vec<Value>) -> Result<T, String> + Send + Sync>;
type RemoveFn<T> = Arc<dyn Fn(&mut T) + Send + Sync>;

/// How scripts build and release one component type
pub struct ComponentBinding<T> {
    name: &'static str,
    create: CreateFn<T>,
    on_remove: Option<RemoveFn<T>>,
}

impl<T: Send + Sync + 'static> ComponentBinding<T> {
    /// `create` receives the arguments after the entity
    pub fn new<F>(name: &'static str, create: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<T, String> + Send + Sync + 'static,
    {
        Self {
            name,
            create: Arc::new(create),
            on_remove: None,
        }
    }

    /// Run `f` on a component as it leaves its entity, including when
    /// `assign_` replaces it
    pub fn on_remove<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.on_remove = Some(Arc::new(f));
        self
    }

    /// Register the entity functions
    pub fn register(self, env: &ScriptEnvironment, world: &SharedWorld) {
        let name = self.name;

        {
            let world = Arc::clone(world);
            let create = Arc::clone(&self.create);
            let on_remove = self.on_remove.clone();
            env.register_function(format!("assign_{}", name), -1, move |mut args| {
                let entity = arg_entity(&args, 0)?;
                if !world.read().contains(entity) {
                    return Err(format!("no such entity {:?}", entity));
                }
                let component = Shared::new(create(args.split_off(1))?);

                let replaced = {
                    let mut world = world.write();
                    let replaced = world.remove_one::<Shared<T>>(entity).ok();
                    world
                        .insert_one(entity, component.clone())
                        .map_err(|_| format!("no such entity {:?}", entity))?;
                    replaced
                };
                if let (Some(old), Some(hook)) = (replaced, on_remove.as_ref()) {
                    hook(&mut *old.write());
                }
                Ok(component.to_userdata(name).into())
            });
        }

        {
            let world = Arc::clone(world);
            env.register_function(format!("has_{}", name), 1, move |args| {
                let entity = arg_entity(&args, 0)?;
                let world = world.read();
                let has = world
                    .entity(entity)
                    .map(|e| e.has::<Shared<T>>())
                    .unwrap_or(false);
                Ok(Value::Bool(has))
            });
        }

        {
            let world = Arc::clone(world);
            env.register_function(format!("get_{}", name), 1, move |args| {
                let entity = arg_entity(&args, 0)?;
                let component = Shared::<T>::of(&world.read(), entity, name).map_err(|e| e.to_string())?;
                Ok(component.to_userdata(name).into())
            });
        }

        {
            let world = Arc::clone(world);
            let on_remove = self.on_remove;
            env.register_function(format!("remove_{}", name), 1, move |args| {
                let entity = arg_entity(&args, 0)?;
                let removed = world.write().remove_one::<Shared<T>>(entity).ok();
                match removed {
                    Some(component) => {
                        if let Some(hook) = on_remove.as_ref() {
                            hook(&mut *component.write());
                        }
                        Ok(Value::Bool(true))
                    }
                    None => Ok(Value::Bool(false)),
                }
            });
        }

        log::debug!("Registered {} component functions", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{entity_value, share_world};
    use parking_lot::Mutex;

    fn setup() -> (ScriptEnvironment, SharedWorld, Arc<Mutex<Vec<u32>>>) {
        let env = ScriptEnvironment::new();
        let world = share_world(hecs::World::new());
        let released = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&released);
        ComponentBinding::new("Tag", |args| {
            Ok(cinder_script::args::arg_i64(&args, 0).unwrap_or(0) as u32)
        })
        .on_remove(move |tag: &mut u32| sink.lock().push(*tag))
        .register(&env, &world);
        (env, world, released)
    }

    #[test]
    fn test_assign_get_has_remove() {
        let (env, world, released) = setup();
        let e = entity_value(world.write().spawn(()));

        assert_eq!(env.call("has_Tag", vec![e.clone()]).unwrap(), Value::Bool(false));
        let tag = env.call("assign_Tag", vec![e.clone(), Value::Int(7)]).unwrap();
        assert_eq!(env.call("has_Tag", vec![e.clone()]).unwrap(), Value::Bool(true));

        let fetched = env.call("get_Tag", vec![e.clone()]).unwrap();
        assert_eq!(fetched, tag);
        assert_eq!(fetched.as_userdata().unwrap().get::<u32>(), Some(7));

        assert_eq!(env.call("remove_Tag", vec![e.clone()]).unwrap(), Value::Bool(true));
        assert_eq!(env.call("remove_Tag", vec![e.clone()]).unwrap(), Value::Bool(false));
        assert_eq!(*released.lock(), vec![7]);
        assert!(env.call("get_Tag", vec![e]).is_err());
    }

    #[test]
    fn test_reassign_releases_previous() {
        let (env, world, released) = setup();
        let e = entity_value(world.write().spawn(()));

        env.call("assign_Tag", vec![e.clone(), Value::Int(1)]).unwrap();
        env.call("assign_Tag", vec![e.clone(), Value::Int(2)]).unwrap();

        assert_eq!(*released.lock(), vec![1]);
        let current = env.call("get_Tag", vec![e]).unwrap();
        assert_eq!(current.as_userdata().unwrap().get::<u32>(), Some(2));
    }

    #[test]
    fn test_dead_entity() {
        let (env, world, _) = setup();
        let entity = world.write().spawn(());
        world.write().despawn(entity).unwrap();

        assert!(env.call("assign_Tag", vec![entity_value(entity)]).is_err());
        assert_eq!(env.call("has_Tag", vec![entity_value(entity)]).unwrap(), Value::Bool(false));
    }
}
