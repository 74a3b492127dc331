//! # Cinder Script
//!
//! The registry side of scripting: values, native functions, native types
//! and the environment that names them. The language runtime that evaluates
//! script source sits on top of [`ScriptEnvironment`] and is not part of
//! this crate.
//!
//! ```ignore
//! use cinder_script::*;
//!
//! let env = ScriptEnvironment::new();
//! env.register_function("test_scripting", 0, |_| Ok(Value::Bool(true)));
//! env.register_type(
//!     UserType::new("Counter")
//!         .constructor(0, |_| Ok(UserData::new("Counter", 0i64).into()))
//!         .method_mut("bump", |n: &mut i64, _| { *n += 1; Ok(Value::Int(*n)) }),
//! );
//!
//! let counter = env.call("Counter", vec![])?;
//! env.call_method(&counter, "bump", vec![])?;
//! ```

pub mod args;
pub mod environment;
pub mod error;
pub mod userdata;
pub mod usertype;
pub mod value;

pub use environment::{Scope, ScriptEnvironment};
pub use error::{ScriptError, ScriptResult};
pub use userdata::UserData;
pub use usertype::{MethodFn, Property, UserType};
pub use value::{NativeFn, NativeFunction, Value};
