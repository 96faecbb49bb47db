use crate::environment;
use crate::environment::{Environment, MutableEnvironment};
use crate::error;
use crate::error::Error;
use crate::expr::Expr;
use crate::stmt::{FunctionDeclaration, Stmt};
use crate::token::Token;
use crate::token::TokenType::*;
use crate::value::class::Class;
use crate::value::function::Function;
use crate::value::object::Object;
use std::collections::HashMap;
use std::rc::Rc;

/// The interpreter is the last step. It takes in the resolver-annotated AST
/// and recursively traverses it, building up a value which is ultimately
/// returned: a post-order traversal, where each node evaluates its children
/// before doing its own work.
///
/// The two node types are handled in separate methods: Stmt in `execute`,
/// Expr in `evaluate`.
pub struct Interpreter {
    /// A fixed handle on the outermost global environment.
    globals: MutableEnvironment,

    /// The current environment. It changes as execution enters and exits
    /// scopes.
    environment: MutableEnvironment,

    /// The resolver's side table: node id to lexical depth. References that
    /// are absent here are global.
    locals: HashMap<usize, usize>,
}

impl Interpreter {
    pub fn new(locals: HashMap<usize, usize>) -> Interpreter {
        let globals = Environment::global();
        Self {
            environment: Rc::clone(&globals),
            globals,
            locals,
        }
    }

    /// Takes in a list of statements, in other words a program. The first
    /// runtime error aborts execution after printing one diagnostic.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(error) = self.execute(statement) {
                error::runtime_error(&error);
                break;
            }
        }
    }

    /// Runs a list of statements inside the given environment, restoring
    /// the previous environment afterwards, whether the block completed or
    /// a signal escaped.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        scope: MutableEnvironment,
    ) -> Result<(), Error> {
        let previous = std::mem::replace(&mut self.environment, scope);
        let result = statements
            .iter()
            .try_for_each(|statement| self.execute(statement));
        self.environment = previous;
        result
    }

    /// The statement analogue to `evaluate`. Statements produce no values,
    /// so the return type is unit.
    fn execute(&mut self, stmt: &Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::Expression { expression } => {
                self.evaluate(expression)?;
                Ok(())
            }
            Stmt::Print { expression } => {
                let value = self.evaluate(expression)?;
                println!("{value}");
                Ok(())
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expression) => self.evaluate(expression)?,
                    None => Object::Nil,
                };
                self.environment
                    .borrow_mut()
                    .define(name.lexeme.clone(), value);
                Ok(())
            }
            Stmt::Block { statements } => {
                let scope = Environment::nested(&self.environment, "block");
                self.execute_block(statements, scope)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)?;
                }
                Ok(())
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            }
            Stmt::Function { declaration } => {
                // A function declaration is similar to a literal: a
                // compile-time representation converted to its runtime one.
                // The value closes over the environment active right now,
                // the one surrounding the declaration.
                let function = Function::new(
                    Rc::clone(declaration),
                    Rc::clone(&self.environment),
                    false,
                );
                self.environment
                    .borrow_mut()
                    .define(declaration.name.lexeme.clone(), Object::Function(function));
                Ok(())
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expression) => self.evaluate(expression)?,
                    None => Object::Nil,
                };

                // A return can fire from anywhere within a function body,
                // even deeply nested in other statements. The signal
                // unwinds past all of them and is caught where the call
                // began executing the body.
                Err(Error::Return(value))
            }
            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.execute_class(name, superclass.as_ref(), methods),
        }
    }

    fn execute_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDeclaration>],
    ) -> Result<(), Error> {
        let superclass_value = match superclass {
            Some(expression) => match self.evaluate(expression)? {
                Object::Class(class) => Some(class),
                _ => {
                    let blame = match expression {
                        Expr::Variable { name, .. } => name.clone(),
                        _ => name.clone(),
                    };
                    return Err(Error::Runtime(
                        blame,
                        "Superclass must be a class.".to_string(),
                    ));
                }
            },
            None => None,
        };

        // Methods close over the declaration environment, or over a
        // dedicated scope binding "super" when there is a superclass. All
        // methods of one class share that scope.
        let mut closure = Rc::clone(&self.environment);
        if let Some(class) = &superclass_value {
            closure = Environment::nested(&closure, "super");
            closure
                .borrow_mut()
                .define("super".to_string(), Object::Class(Rc::clone(class)));
        }

        let mut method_map = HashMap::new();
        for declaration in methods {
            let is_initializer = declaration.name.lexeme == "init";
            let method = Function::new(Rc::clone(declaration), Rc::clone(&closure), is_initializer);
            method_map.insert(declaration.name.lexeme.clone(), method);
        }

        let class = Class::new(name.lexeme.clone(), method_map, superclass_value);
        self.environment
            .borrow_mut()
            .define(name.lexeme.clone(), Object::Class(Rc::new(class)));
        Ok(())
    }

    /// Evaluates an Expr tree node and produces a value. For each kind of
    /// Expr (literal, operator, etc.) there is a corresponding chunk of
    /// code that knows how to evaluate that tree.
    pub fn evaluate(&mut self, expression: &Expr) -> Result<Object, Error> {
        match expression {
            Expr::Literal { value } => Ok(value.clone()),
            Expr::Grouping { expression } => self.evaluate(expression),
            Expr::Unary { operator, right } => {
                let value = self.evaluate(right)?;
                match (&operator.token_type, value) {
                    (MINUS, Object::Number(n)) => Ok(Object::Number(-n)),
                    (BANG, value) => Ok(Object::Boolean(!value.is_truthy())),
                    _ => Err(Error::Runtime(
                        operator.clone(),
                        "Operand must be a number.".to_string(),
                    )),
                }
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                self.evaluate_binary(operator, left, right)
            }
            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;

                // Look at the left value to see if we can short-circuit; if
                // not, and only then, evaluate the right operand. A logic
                // operator returns a value with the appropriate truthiness
                // rather than a coerced boolean:
                //   print "hi" or 2;    // "hi"
                //   print nil or "yes"; // "yes"
                if operator.token_type == OR {
                    if left.is_truthy() {
                        return Ok(left);
                    }
                } else if !left.is_truthy() {
                    return Ok(left);
                }

                self.evaluate(right)
            }
            Expr::Variable { id, name } => self.look_up_variable(name, *id),
            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;

                // Assignment can be nested inside other expressions, so it
                // needs to produce the assigned value.
                match self.locals.get(id) {
                    Some(&distance) => {
                        if !self.environment.borrow_mut().assign_at(
                            distance,
                            &name.lexeme,
                            value.clone(),
                        ) {
                            return Err(environment::undefined(name));
                        }
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }
                Ok(value)
            }
            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;

                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument)?);
                }

                callee.call(self, args, paren)
            }
            Expr::Get { object, name } => {
                let object = self.evaluate(object)?;
                match &object {
                    Object::Instance(instance) => instance.borrow().get(name, &object),
                    _ => Err(Error::Runtime(
                        name.clone(),
                        "Only instances have properties.".to_string(),
                    )),
                }
            }
            Expr::Set {
                object,
                name,
                value,
            } => match self.evaluate(object)? {
                Object::Instance(instance) => {
                    let value = self.evaluate(value)?;
                    instance.borrow_mut().set(name, value.clone());
                    Ok(value)
                }
                _ => Err(Error::Runtime(
                    name.clone(),
                    "Only instances have fields.".to_string(),
                )),
            },
            Expr::This { id, keyword } => self.look_up_variable(keyword, *id),
            Expr::Super {
                id,
                keyword,
                method,
            } => self.evaluate_super(*id, keyword, method),
        }
    }

    fn evaluate_binary(
        &mut self,
        operator: &Token,
        left: Object,
        right: Object,
    ) -> Result<Object, Error> {
        use Object::{Boolean, Number, String};

        // Operands were evaluated left to right before any type checking;
        // division follows IEEE 754, so dividing by zero produces an
        // infinity or NaN rather than an error.
        match (&operator.token_type, left, right) {
            (STAR, Number(l), Number(r)) => Ok(Number(l * r)),
            (SLASH, Number(l), Number(r)) => Ok(Number(l / r)),
            (MINUS, Number(l), Number(r)) => Ok(Number(l - r)),
            (PLUS, Number(l), Number(r)) => Ok(Number(l + r)),
            (PLUS, String(l), String(r)) => Ok(String(l + r.as_str())),
            (GREATER, Number(l), Number(r)) => Ok(Boolean(l > r)),
            (GREATER_EQUAL, Number(l), Number(r)) => Ok(Boolean(l >= r)),
            (LESS, Number(l), Number(r)) => Ok(Boolean(l < r)),
            (LESS_EQUAL, Number(l), Number(r)) => Ok(Boolean(l <= r)),
            (BANG_EQUAL, l, r) => Ok(Boolean(!l.is_equal(&r))),
            (EQUAL_EQUAL, l, r) => Ok(Boolean(l.is_equal(&r))),
            (PLUS, _, _) => Err(Error::Runtime(
                operator.clone(),
                "Operands must be two numbers or two strings.".to_string(),
            )),
            _ => Err(Error::Runtime(
                operator.clone(),
                "Operands must be numbers.".to_string(),
            )),
        }
    }

    fn evaluate_super(&mut self, id: usize, keyword: &Token, method: &Token) -> Result<Object, Error> {
        let distance = match self.locals.get(&id) {
            Some(&distance) => distance,
            None => return Err(environment::undefined(keyword)),
        };

        let superclass = self
            .environment
            .borrow()
            .get_at(distance, "super")
            .ok_or_else(|| environment::undefined(keyword))?;

        // `this` always lives in the scope just inside the one holding
        // `super`: the receiver the method was bound to.
        let object = self
            .environment
            .borrow()
            .get_at(distance - 1, "this")
            .ok_or_else(|| environment::undefined(keyword))?;

        // `super.m` starts the lookup at the superclass of the class the
        // method was declared in, not at the receiver's own class. That is
        // the whole reason `super` is bound at declaration time.
        match superclass {
            Object::Class(superclass) => match superclass.find_method(&method.lexeme) {
                Some(found) => Ok(Object::Function(found.bind(&object))),
                None => Err(Error::Runtime(
                    method.clone(),
                    format!("Undefined property '{}'.", method.lexeme),
                )),
            },
            _ => Err(Error::Runtime(
                keyword.clone(),
                "Superclass must be a class.".to_string(),
            )),
        }
    }

    /// The payoff of the resolver pass: a local reference walks exactly the
    /// recorded number of parent links, with no search and no drift when an
    /// inner block shadows a name; everything else goes to the globals.
    fn look_up_variable(&self, name: &Token, id: usize) -> Result<Object, Error> {
        match self.locals.get(&id) {
            Some(&distance) => self
                .environment
                .borrow()
                .get_at(distance, &name.lexeme)
                .ok_or_else(|| environment::undefined(name)),
            None => self.globals.borrow().get(name),
        }
    }
}
