//! Native objects handed to scripts
//!
//! A [`UserData`] is a reference: cloning it shares the underlying object,
//! the way a script holding a component sees the one stored on the entity.

use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased, shared native object tagged with its script type name
#[derive(Clone)]
pub struct UserData {
    type_name: Arc<str>,
    data: Arc<dyn Any + Send + Sync>,
}

impl UserData {
    /// Wrap a fresh value
    pub fn new<T: Any + Send + Sync>(type_name: impl Into<Arc<str>>, value: T) -> Self {
        Self::from_shared(type_name, Arc::new(RwLock::new(value)))
    }

    /// Wrap a value that native code also holds
    pub fn from_shared<T: Any + Send + Sync>(type_name: impl Into<Arc<str>>, shared: Arc<RwLock<T>>) -> Self {
        Self {
            type_name: type_name.into(),
            data: shared,
        }
    }

    /// Name of the registered user type
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is<T: Any + Send + Sync>(&self) -> bool {
        self.data.is::<RwLock<T>>()
    }

    /// The shared object, if it holds a `T`
    pub fn shared<T: Any + Send + Sync>(&self) -> Option<Arc<RwLock<T>>> {
        self.data.clone().downcast::<RwLock<T>>().ok()
    }

    /// Read the object
    pub fn with<T: Any + Send + Sync, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let lock = self.data.downcast_ref::<RwLock<T>>()?;
        let guard = lock.read();
        Some(f(&*guard))
    }

    /// Mutate the object
    pub fn with_mut<T: Any + Send + Sync, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let lock = self.data.downcast_ref::<RwLock<T>>()?;
        let mut guard = lock.write();
        Some(f(&mut *guard))
    }

    /// Copy the object out
    pub fn get<T: Any + Send + Sync + Clone>(&self) -> Option<T> {
        self.with(|v: &T| v.clone())
    }

    /// Whether both handles refer to the same object
    pub fn ptr_eq(&self, other: &UserData) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for UserData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserData")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
