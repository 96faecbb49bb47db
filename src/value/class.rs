use crate::error::Error;
use crate::interpreter::Interpreter;
use crate::value::callable::Callable;
use crate::value::function::Function;
use crate::value::instance::Instance;
use crate::value::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// The runtime representation of a class declaration. Instances store the
/// state, the class stores the behaviour: methods are owned by the class
/// and reached through instances of it.
#[derive(Debug)]
pub struct Class {
    pub name: String,

    /// Compiled once at declaration, immutable afterwards. Methods of a
    /// subclass share one closure environment where `super` is bound.
    methods: HashMap<String, Function>,

    superclass: Option<Rc<Class>>,
}

impl Class {
    pub fn new(
        name: String,
        methods: HashMap<String, Function>,
        superclass: Option<Rc<Class>>,
    ) -> Self {
        Self {
            name,
            methods,
            superclass,
        }
    }

    /// Method resolution order: this class first, then up the single
    /// inheritance chain.
    pub fn find_method(&self, name: &str) -> Option<Function> {
        if let Some(method) = self.methods.get(name) {
            return Some(method.clone());
        }
        self.superclass
            .as_ref()
            .and_then(|superclass| superclass.find_method(name))
    }

    /// Construction runs `init` only when the called class itself defines
    /// one; an inherited `init` is still reachable as an ordinary method.
    fn initializer(&self) -> Option<Function> {
        self.methods.get("init").cloned()
    }
}

impl Callable for Rc<Class> {
    /// The initializer's arity determines how many arguments a call of the
    /// class itself takes; without one the arity is zero.
    fn arity(&self) -> usize {
        self.initializer().map_or(0, |initializer| initializer.arity())
    }

    /// When we "call" a class, it instantiates a new Instance for the
    /// called class, runs the initializer on it if there is one, and
    /// returns it.
    fn call(&self, interpreter: &mut Interpreter, args: Vec<Object>) -> Result<Object, Error> {
        let instance = Object::Instance(Rc::new(RefCell::new(Instance::new(Rc::clone(self)))));
        if let Some(initializer) = self.initializer() {
            initializer.bind(&instance).call(interpreter, args)?;
        }
        Ok(instance)
    }
}
