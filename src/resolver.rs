use crate::error;
use crate::expr::Expr;
use crate::stmt::{FunctionDeclaration, Stmt};
use crate::token::Token;
use log::trace;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum FunctionKind {
    None,
    Function,
    Method,
    Initializer,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ClassKind {
    None,
    Class,
    Subclass,
}

/// This is kind of step 2.5. After the parser produces the syntax tree, but
/// before the interpreter starts executing it, we do a single walk over the
/// tree to "resolve" all the variables it contains, visiting each node once.
/// This is also where scope misuse is diagnosed statically: reading a local
/// in its own initializer, `return` at the top level, `this` or `super`
/// outside a class, duplicate declarations in a local scope.
///
/// Errors accumulate; resolution keeps going so one pass can surface several
/// of them. The driver must not run a program that failed resolution.
pub struct Resolver {
    /// The stack of scopes currently in scope, innermost last. Each entry
    /// maps a variable name to whether we have finished resolving its
    /// initializer.
    ///
    /// The stack only tracks local block scopes. Variables declared at the
    /// top level are not tracked, since globals are more dynamic in Lox:
    /// when a variable isn't found here, we assume it's global.
    scopes: Vec<HashMap<String, bool>>,

    /// The side table the interpreter reads back: node id to the number of
    /// scope hops between a reference and the scope that declares it.
    locals: HashMap<usize, usize>,

    current_function: FunctionKind,
    current_class: ClassKind,
}

impl Resolver {
    pub fn new() -> Resolver {
        Self {
            scopes: Vec::new(),
            locals: HashMap::new(),
            current_function: FunctionKind::None,
            current_class: ClassKind::None,
        }
    }

    pub fn resolve(mut self, statements: &[Stmt]) -> HashMap<usize, usize> {
        self.resolve_statements(statements);
        self.locals
    }

    fn resolve_statements(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_statement(statement);
        }
    }

    fn resolve_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block { statements } => {
                // Introduces a new scope for the statements it contains.
                self.begin_scope();
                self.resolve_statements(statements);
                self.end_scope();
            }
            Stmt::Var { name, initializer } => {
                // Binding is split into declaring then defining, to handle
                // an initializer that refers to a variable with the same
                // name as the one being declared.
                self.declare(name);
                if let Some(expression) = initializer {
                    self.resolve_expression(expression);
                }
                self.define(name);
            }
            Stmt::Function { declaration } => {
                self.declare(&declaration.name);
                // Defining the name eagerly lets a function recursively
                // refer to itself inside its own body.
                self.define(&declaration.name);
                self.resolve_function(declaration, FunctionKind::Function);
            }
            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.resolve_class(name, superclass.as_ref(), methods),
            Stmt::Expression { expression } => {
                self.resolve_expression(expression);
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                // Resolution is different from interpretation: there is no
                // control flow here. Either branch could be reached at
                // runtime, so we resolve both.
                self.resolve_expression(condition);
                self.resolve_statement(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_statement(else_branch);
                }
            }
            Stmt::Print { expression } => {
                self.resolve_expression(expression);
            }
            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionKind::None {
                    error::token_error(keyword, "Can't return from top-level code.");
                }
                if let Some(expression) = value {
                    if self.current_function == FunctionKind::Initializer {
                        error::token_error(keyword, "Can't return a value from an initializer.");
                    }
                    self.resolve_expression(expression);
                }
            }
            Stmt::While { condition, body } => {
                // As with `if`, condition and body are resolved exactly once.
                self.resolve_expression(condition);
                self.resolve_statement(body);
            }
        }
    }

    fn resolve_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[std::rc::Rc<FunctionDeclaration>],
    ) {
        let enclosing_class = std::mem::replace(&mut self.current_class, ClassKind::Class);

        self.declare(name);
        self.define(name);

        if let Some(superclass) = superclass {
            if let Expr::Variable {
                name: superclass_name,
                ..
            } = superclass
            {
                if superclass_name.lexeme == name.lexeme {
                    error::token_error(superclass_name, "A class can't inherit from itself.");
                }
            }
            self.current_class = ClassKind::Subclass;
            self.resolve_expression(superclass);

            // Methods of a subclass close over a scope where `super` is
            // bound; mirror that scope here so `super` resolves to it.
            self.begin_scope();
            self.define_keyword("super");
        }

        self.begin_scope();
        self.define_keyword("this");

        for method in methods {
            let kind = if method.name.lexeme == "init" {
                FunctionKind::Initializer
            } else {
                FunctionKind::Method
            };
            self.resolve_function(method, kind);
        }

        self.end_scope();
        if superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    fn resolve_expression(&mut self, expression: &Expr) {
        match expression {
            Expr::Variable { id, name } => {
                // It's an error if an initializer mentions the variable
                // being initialized, e.g. var a = a;
                if self.scopes.last().and_then(|scope| scope.get(&name.lexeme)) == Some(&false) {
                    error::token_error(name, "Can't read local variable in its own initializer.");
                }
                self.resolve_local(*id, name);
            }
            Expr::Assign { id, name, value } => {
                self.resolve_expression(value);
                self.resolve_local(*id, name);
            }
            Expr::Binary { left, right, .. } => {
                self.resolve_expression(left);
                self.resolve_expression(right);
            }
            Expr::Call {
                callee, arguments, ..
            } => {
                self.resolve_expression(callee);
                for argument in arguments {
                    self.resolve_expression(argument);
                }
            }
            Expr::Get { object, .. } => {
                // Property names are looked up dynamically; only the object
                // expression has anything to resolve.
                self.resolve_expression(object);
            }
            Expr::Set { object, value, .. } => {
                self.resolve_expression(value);
                self.resolve_expression(object);
            }
            Expr::Grouping { expression } => {
                self.resolve_expression(expression);
            }
            Expr::Literal { .. } => {
                // A literal mentions no variables and contains no
                // subexpressions, so there is no work to do.
            }
            Expr::Logical { left, right, .. } => {
                self.resolve_expression(left);
                self.resolve_expression(right);
            }
            Expr::Unary { right, .. } => {
                self.resolve_expression(right);
            }
            Expr::This { id, keyword } => {
                if self.current_class == ClassKind::None {
                    error::token_error(keyword, "Can't use 'this' outside of a class.");
                    return;
                }
                self.resolve_local(*id, keyword);
            }
            Expr::Super { id, keyword, .. } => match self.current_class {
                ClassKind::None => {
                    error::token_error(keyword, "Can't use 'super' outside of a class.");
                }
                ClassKind::Class => {
                    error::token_error(keyword, "Can't use 'super' in a class with no superclass.");
                }
                ClassKind::Subclass => self.resolve_local(*id, keyword),
            },
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Declaration adds the variable to the innermost scope so that it
    /// shadows any outer one and so that we know the variable exists. It is
    /// marked "not ready yet" by binding its name to false in the scope map.
    fn declare(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.contains_key(&name.lexeme) {
                error::token_error(name, "Already a variable with this name in this scope.");
            }
            scope.insert(name.lexeme.clone(), false);
        }
    }

    /// Sets the variable's value in the scope map to true, marking it fully
    /// initialized and available for use.
    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    /// Introduces an implicit binding (`this` / `super`) in the innermost
    /// scope, already defined.
    fn define_keyword(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), true);
        }
    }

    /// Starts at the innermost scope and works outward, looking in each map
    /// for a matching name. On a hit, the node is annotated with the number
    /// of scopes between the innermost scope and the one where the variable
    /// was found. A miss means the reference is global and stays
    /// unannotated.
    fn resolve_local(&mut self, id: usize, name: &Token) {
        for (distance, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                trace!("'{}' resolved at depth {distance}", name.lexeme);
                self.locals.insert(id, distance);
                return;
            }
        }
    }

    /// Creates a new scope for the body and binds the parameters in it.
    /// Unlike the interpreter, which doesn't touch a function's body until
    /// the function is called, static analysis traverses into the body
    /// right then and there.
    fn resolve_function(&mut self, declaration: &FunctionDeclaration, kind: FunctionKind) {
        let enclosing_function = std::mem::replace(&mut self.current_function, kind);

        self.begin_scope();
        for param in &declaration.params {
            self.declare(param);
            self.define(param);
        }
        // Not resolve_statement on a block: parameters and body share one
        // scope.
        self.resolve_statements(&declaration.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }
}
