//! Host objects (custom types)

use std::any::Any;
use std::sync::Arc;

/// Instance of a custom type the value domain has no structural model for.
///
/// The payload is opaque; only the class name is visible to generic code.
pub struct HostObject {
    class_name: String,
    data: Box<dyn Any + Send + Sync>,
}

impl HostObject {
    /// Wrap a host payload under a class name
    pub fn new<T: Any + Send + Sync>(class_name: impl Into<String>, data: T) -> Arc<Self> {
        Arc::new(Self {
            class_name: class_name.into(),
            data: Box::new(data),
        })
    }

    /// Class name of the wrapped instance
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Borrow the payload as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for HostObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HostObject({})", self.class_name)
    }
}
