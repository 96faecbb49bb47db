use crate::environment::{Environment, MutableEnvironment};
use crate::error::Error;
use crate::interpreter::Interpreter;
use crate::stmt::FunctionDeclaration;
use crate::value::callable::Callable;
use crate::value::object::Object;
use std::fmt;
use std::rc::Rc;

/// The runtime representation of a function statement or method.
#[derive(Clone)]
pub struct Function {
    /// Shared with the Stmt::Function node this value was built from.
    declaration: Rc<FunctionDeclaration>,

    /// The environment that is active when the function is declared, not
    /// when it's called: the lexical scope surrounding the declaration.
    closure: MutableEnvironment,

    /// Whether this function is a class's `init`. The name alone can't
    /// decide this, because user code may define a free function called
    /// "init".
    is_initializer: bool,
}

impl Function {
    pub fn new(
        declaration: Rc<FunctionDeclaration>,
        closure: MutableEnvironment,
        is_initializer: bool,
    ) -> Self {
        Function {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    /// Creates a new function sharing this one's declaration, whose closure
    /// is a fresh environment that binds "this" to the given instance. The
    /// returned function carries around its own little persistent world
    /// where `this` refers to the object the method was accessed from.
    pub fn bind(&self, instance: &Object) -> Function {
        let scope = Environment::nested(&self.closure, "bind");
        scope.borrow_mut().define("this".to_string(), instance.clone());
        Function::new(Rc::clone(&self.declaration), scope, self.is_initializer)
    }

    /// Identity comparison: two function values are the same function only
    /// if they share both declaration and closure.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.declaration, &other.declaration)
            && Rc::ptr_eq(&self.closure, &other.closure)
    }

    fn this_binding(&self) -> Result<Object, Error> {
        self.closure.borrow().get_at(0, "this").ok_or_else(|| {
            Error::Runtime(
                self.declaration.name.clone(),
                "Undefined variable 'this'.".to_string(),
            )
        })
    }
}

impl Callable for Function {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(&self, interpreter: &mut Interpreter, args: Vec<Object>) -> Result<Object, Error> {
        // Each call gets its own environment, created fresh; otherwise
        // recursion would break. Up until now the current environment was
        // the one where the function was being called. Now we teleport from
        // there inside the parameter space created for the function, whose
        // parent is the closure.
        let scope = Environment::nested(&self.closure, "call");
        for (param, arg) in self.declaration.params.iter().zip(args) {
            scope.borrow_mut().define(param.lexeme.clone(), arg);
        }

        match interpreter.execute_block(&self.declaration.body, scope) {
            // A return statement unwinds to exactly here, the call
            // boundary. In an initializer the return value is overridden:
            // the instance comes back no matter what.
            Err(Error::Return(value)) => {
                if self.is_initializer {
                    self.this_binding()
                } else {
                    Ok(value)
                }
            }
            Err(other) => Err(other),
            Ok(()) => {
                if self.is_initializer {
                    self.this_binding()
                } else {
                    // Every Lox function returns something, even without a
                    // return statement. We use nil.
                    Ok(Object::Nil)
                }
            }
        }
    }
}

// Hand-written: deriving Debug would chase the closure chain, which can
// reach back to this very function through a captured binding.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name())
    }
}
