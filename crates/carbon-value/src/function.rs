//! Opaque callables
//!
//! Functions are never copied structurally; every holder shares the same
//! `Arc<Function>`.

use std::sync::Arc;

use crate::value::Value;

/// Native function handler type
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

/// A named native callable
pub struct Function {
    /// Function name (may be empty for anonymous functions)
    pub name: String,
    func: NativeFn,
}

impl Function {
    /// Wrap a closure as a callable value handle
    pub fn new<F>(name: impl Into<String>, f: F) -> Arc<Self>
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        Arc::new(Self {
            name: name.into(),
            func: Arc::new(f),
        })
    }

    /// Invoke the function
    pub fn call(&self, args: &[Value]) -> Result<Value, String> {
        (self.func)(args)
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Function({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_passes_arguments() {
        let add = Function::new("add", |args| {
            let sum = args.iter().filter_map(Value::as_number).sum::<f64>();
            Ok(Value::number(sum))
        });
        let result = add.call(&[Value::number(2.0), Value::number(3.0)]).unwrap();
        assert_eq!(result.as_number(), Some(5.0));
    }

    #[test]
    fn test_call_propagates_errors() {
        let fail = Function::new("fail", |_| Err("boom".to_string()));
        assert_eq!(fail.call(&[]).unwrap_err(), "boom");
    }
}
