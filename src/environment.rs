use crate::error::Error;
use crate::token::Token;
use crate::value::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Environments are multi-owner: a closure keeps its defining environment
/// alive long after the block that created it has finished, and several
/// bound methods may share one.
pub type MutableEnvironment = Rc<RefCell<Environment>>;

/// A single scope frame: bindings from names to values, plus a link to the
/// enclosing scope. The chain ends at the global frame.
pub struct Environment {
    /// Debug label shown in trace logs ("global", "block", "call", ...).
    name: &'static str,
    values: HashMap<String, Object>,
    enclosing: Option<MutableEnvironment>,
}

impl Environment {
    pub fn global() -> MutableEnvironment {
        Rc::new(RefCell::new(Environment {
            name: "global",
            values: HashMap::new(),
            enclosing: None,
        }))
    }

    /// Creates a new scope nested inside the given outer one.
    pub fn nested(enclosing: &MutableEnvironment, name: &'static str) -> MutableEnvironment {
        Rc::new(RefCell::new(Environment {
            name,
            values: HashMap::new(),
            enclosing: Some(Rc::clone(enclosing)),
        }))
    }

    /// A new variable is always declared in the current innermost scope,
    /// overwriting any previous binding with the same name.
    pub fn define(&mut self, name: String, value: Object) {
        log::trace!("define '{name}' in {} env", self.name);
        self.values.insert(name, value);
    }

    /// Reads a binding, walking the chain outward. Used for references the
    /// resolver left unannotated, where the chain is just the global frame.
    pub fn get(&self, name: &Token) -> Result<Object, Error> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }

        match &self.enclosing {
            Some(outer) => outer.borrow().get(name),
            None => Err(undefined(name)),
        }
    }

    /// The key difference between assign and define is that assign is not
    /// allowed to create a new binding.
    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), Error> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        match &self.enclosing {
            Some(outer) => outer.borrow_mut().assign(name, value),
            None => Err(undefined(name)),
        }
    }

    /// Reads a binding exactly `distance` frames up the chain. The resolver
    /// already knows which frame declares the name, so there is no search:
    /// the binding is either in that frame or missing.
    pub fn get_at(&self, distance: usize, name: &str) -> Option<Object> {
        if distance == 0 {
            return self.values.get(name).cloned();
        }
        match &self.enclosing {
            Some(outer) => outer.borrow().get_at(distance - 1, name),
            None => None,
        }
    }

    /// Overwrites an existing binding exactly `distance` frames up the
    /// chain. Returns false if the binding is absent there.
    pub fn assign_at(&mut self, distance: usize, name: &str, value: Object) -> bool {
        if distance == 0 {
            if self.values.contains_key(name) {
                self.values.insert(name.to_string(), value);
                return true;
            }
            return false;
        }
        match &self.enclosing {
            Some(outer) => outer.borrow_mut().assign_at(distance - 1, name, value),
            None => false,
        }
    }
}

pub fn undefined(name: &Token) -> Error {
    Error::Runtime(
        name.clone(),
        format!("Undefined variable '{}'.", name.lexeme),
    )
}
