use crate::error::Error;
use crate::token::Token;
use crate::value::class::Class;
use crate::value::object::Object;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// The runtime representation of an instance of a Lox class.
pub struct Instance {
    pub class: Rc<Class>,
    fields: HashMap<String, Object>,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Self {
        Self {
            class,
            fields: HashMap::new(),
        }
    }

    /// Property access: fields shadow methods. A method hit comes back
    /// bound to `this_object`, the instance the property was accessed on,
    /// so the result is a first-class value that can be stored and called
    /// later.
    ///
    /// We could silently return nil for a missing property, but that
    /// behavior masks bugs more often than it does anything useful, so
    /// it's a runtime error instead.
    pub fn get(&self, name: &Token, this_object: &Object) -> Result<Object, Error> {
        if let Some(value) = self.fields.get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(method) = self.class.find_method(&name.lexeme) {
            return Ok(Object::Function(method.bind(this_object)));
        }

        Err(Error::Runtime(
            name.clone(),
            format!("Undefined property '{}'.", name.lexeme),
        ))
    }

    /// Lox allows freely creating new fields on instances, so there's no
    /// need to check whether the key is already present.
    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

// Hand-written: a field can hold the instance itself, which deriving Debug
// would loop on.
impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<instance {}>", self.class.name)
    }
}
