use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{error::RuntimeError, interpreter::value::core::Value};

/// A shared, mutable reference to an environment frame.
///
/// Frames are reference-counted because closures keep their defining frame
/// alive past the call that created it. A recursive top-level closure forms a
/// cycle between its frame and its function value; such frames are only
/// reclaimed when the interpreter instance is dropped.
pub type EnvRef = Rc<RefCell<Environment>>;

/// A single binding: the stored value plus its mutability.
#[derive(Debug, Clone)]
struct Binding {
    value:   Value,
    mutable: bool,
}

/// A lexical environment frame.
///
/// Each frame maps names to bindings and optionally links to the frame it
/// lexically nests in. Lookup and reassignment walk the chain outward;
/// definition always targets the local frame. Function calls create a frame
/// whose outer link is the called function's captured environment, not the
/// caller's.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Binding>,
    outer: Option<EnvRef>,
}

impl Environment {
    /// Creates a fresh root frame with no bindings.
    ///
    /// Builtins are not bound here; identifier resolution falls back to the
    /// builtin table after the chain is exhausted.
    ///
    /// # Example
    /// ```
    /// use simian::interpreter::environment::Environment;
    ///
    /// let env = Environment::root();
    /// assert_eq!(env.borrow().get("x"), None);
    /// ```
    #[must_use]
    pub fn root() -> EnvRef {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Creates a frame nested inside `outer`.
    ///
    /// # Example
    /// ```
    /// use simian::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let outer = Environment::root();
    /// outer.borrow_mut().define("x", Value::Integer(1), true);
    ///
    /// let inner = Environment::enclosed(&outer);
    /// assert_eq!(inner.borrow().get("x"), Some(Value::Integer(1)));
    /// ```
    #[must_use]
    pub fn enclosed(outer: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Self { store: HashMap::new(),
                                    outer: Some(Rc::clone(outer)), }))
    }

    /// Resolves a name, walking outward through enclosing frames.
    ///
    /// # Parameters
    /// - `name`: The name to resolve.
    ///
    /// # Returns
    /// The bound value, or `None` when no frame in the chain holds the name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.store.get(name) {
            return Some(binding.value.clone());
        }

        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    /// Defines a name in this frame.
    ///
    /// An existing local binding of the same name is replaced, whatever its
    /// mutability: a new `let` or `const` shadows rather than reassigns.
    ///
    /// # Parameters
    /// - `name`: The name to bind.
    /// - `value`: The bound value.
    /// - `mutable`: Whether later reassignment is permitted.
    pub fn define(&mut self, name: &str, value: Value, mutable: bool) {
        self.store.insert(name.to_string(), Binding { value, mutable });
    }

    /// Reassigns the nearest binding of `name`, walking outward.
    ///
    /// # Parameters
    /// - `name`: The name to reassign.
    /// - `value`: The new value.
    ///
    /// # Errors
    /// - [`RuntimeError::IdentifierNotFound`]: No frame in the chain holds
    ///   the name.
    /// - [`RuntimeError::CannotReassignConst`]: The nearest holder is a
    ///   `const` binding.
    ///
    /// # Example
    /// ```
    /// use simian::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let env = Environment::root();
    /// env.borrow_mut().define("x", Value::Integer(1), true);
    /// env.borrow_mut().reassign("x", Value::Integer(2)).unwrap();
    ///
    /// assert_eq!(env.borrow().get("x"), Some(Value::Integer(2)));
    /// ```
    pub fn reassign(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        if let Some(binding) = self.store.get_mut(name) {
            if !binding.mutable {
                return Err(RuntimeError::CannotReassignConst { name: name.to_string(), });
            }

            binding.value = value;
            return Ok(());
        }

        match &self.outer {
            Some(outer) => outer.borrow_mut().reassign(name, value),
            None => Err(RuntimeError::IdentifierNotFound { name: name.to_string(), }),
        }
    }
}
