use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::error::{LoxError, Result};
use crate::value::Value;

/// A single lexical scope: bindings plus an optional handle to the enclosing
/// scope.  Closures keep their defining chain alive through the `Rc` handles;
/// the resulting cycles (function -> closure -> binding -> function) are
/// accepted and torn down at interpreter shutdown.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    pub fn define(&mut self, name: &str, value: Value) {
        debug!("Defining '{}' in current scope", name);

        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str, line: usize) -> Result<Value> {
        if let Some(value) = self.values.get(name) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name, line)
        } else {
            Err(LoxError::runtime(
                line,
                format!("Undefined variable '{}'.", name),
            ))
        }
    }

    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> Result<()> {
        if self.values.contains_key(name) {
            self.values.insert(name.to_string(), value);
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value, line)
        } else {
            Err(LoxError::runtime(
                line,
                format!("Undefined variable '{}'.", name),
            ))
        }
    }

    /// Read a binding from exactly `distance` scopes up the chain.  The
    /// resolver guarantees the binding exists at that depth.
    pub fn get_at(
        env: &Rc<RefCell<Environment>>,
        distance: usize,
        name: &str,
        line: usize,
    ) -> Result<Value> {
        match Self::ancestor(env, distance) {
            Some(ancestor) => ancestor.borrow().values.get(name).cloned().ok_or_else(|| {
                LoxError::runtime(line, format!("Undefined variable '{}'.", name))
            }),

            None => Err(LoxError::runtime(
                line,
                format!("Undefined variable '{}'.", name),
            )),
        }
    }

    /// Write a binding at exactly `distance` scopes up the chain.
    pub fn assign_at(
        env: &Rc<RefCell<Environment>>,
        distance: usize,
        name: &str,
        value: Value,
        line: usize,
    ) -> Result<()> {
        match Self::ancestor(env, distance) {
            Some(ancestor) => {
                ancestor.borrow_mut().values.insert(name.to_string(), value);
                Ok(())
            }

            None => Err(LoxError::runtime(
                line,
                format!("Undefined variable '{}'.", name),
            )),
        }
    }

    fn ancestor(
        env: &Rc<RefCell<Environment>>,
        distance: usize,
    ) -> Option<Rc<RefCell<Environment>>> {
        let mut environment: Rc<RefCell<Environment>> = Rc::clone(env);

        for _ in 0..distance {
            let enclosing = environment.borrow().enclosing.clone();

            match enclosing {
                Some(parent) => environment = parent,

                None => return None,
            }
        }

        Some(environment)
    }
}
