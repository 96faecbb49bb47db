use crate::error;
use crate::error::Error;
use crate::expr::Expr;
use crate::stmt::{FunctionDeclaration, Stmt};
use crate::token::TokenType::*;
use crate::token::{Literal, Token, TokenType};
use crate::value::object::Object;
use std::rc::Rc;

/// The parser is the second step. It consumes the flat sequence of tokens
/// produced by the scanner and builds the syntax tree with a recursive
/// descent over the grammar, one method per rule.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,

    /// Counter handing out ids to the expression nodes the resolver
    /// annotates (Variable, Assign, This, Super).
    next_id: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            next_id: 0,
        }
    }

    /// Parses a whole program: a list of declarations until EOF. A parse
    /// error inside one statement does not abort the parse; we synchronize
    /// to the next statement boundary and keep going so one run can report
    /// as many errors as possible.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }
        statements
    }

    fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.match_type(VAR) {
            self.var_declaration()
        } else if self.match_type(CLASS) {
            self.class_declaration()
        } else if self.match_type(FUN) {
            self.function("function")
                .map(|declaration| Stmt::Function { declaration })
        } else {
            self.statement()
        };

        match result {
            Ok(statement) => Some(statement),
            Err(_) => {
                self.synchronize();
                None
            }
        }
    }

    fn var_declaration(&mut self) -> Result<Stmt, Error> {
        let name = self.consume(IDENTIFIER, "Expect variable name.")?;

        let mut initializer = None;
        if self.match_type(EQUAL) {
            initializer = Some(self.expression()?);
        }

        self.consume(SEMICOLON, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var { name, initializer })
    }

    fn class_declaration(&mut self) -> Result<Stmt, Error> {
        let name = self.consume(IDENTIFIER, "Expect class name.")?;

        let mut superclass = None;
        if self.match_type(LESS) {
            let superclass_name = self.consume(IDENTIFIER, "Expect superclass name.")?;
            superclass = Some(Expr::Variable {
                id: self.fresh_id(),
                name: superclass_name,
            });
        }

        self.consume(LEFT_BRACE, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(RIGHT_BRACE) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(RIGHT_BRACE, "Expect '}' after class body.")?;
        Ok(Stmt::Class {
            name,
            superclass,
            methods,
        })
    }

    /// Parses a named function. `kind` distinguishes free functions from
    /// methods in the error messages.
    fn function(&mut self, kind: &str) -> Result<Rc<FunctionDeclaration>, Error> {
        let name = self.consume(IDENTIFIER, &format!("Expect {kind} name."))?;
        self.consume(LEFT_PAREN, &format!("Expect '(' after {kind} name."))?;

        let mut params = Vec::new();
        if !self.check(RIGHT_PAREN) {
            loop {
                if params.len() >= 255 {
                    // Reported, not thrown: the parser is in a fine state.
                    error::token_error(&self.peek(), "Can't have more than 255 parameters.");
                }
                params.push(self.consume(IDENTIFIER, "Expect parameter name.")?);
                if !self.match_type(COMMA) {
                    break;
                }
            }
        }
        self.consume(RIGHT_PAREN, "Expect ')' after parameters.")?;

        self.consume(LEFT_BRACE, &format!("Expect '{{' before {kind} body."))?;
        let body = self.block()?;
        Ok(Rc::new(FunctionDeclaration { name, params, body }))
    }

    fn statement(&mut self) -> Result<Stmt, Error> {
        if self.match_type(FOR) {
            return self.for_statement();
        }
        if self.match_type(IF) {
            return self.if_statement();
        }
        if self.match_type(PRINT) {
            return self.print_statement();
        }
        if self.match_type(RETURN) {
            return self.return_statement();
        }
        if self.match_type(WHILE) {
            return self.while_statement();
        }
        if self.match_type(LEFT_BRACE) {
            return Ok(Stmt::Block {
                statements: self.block()?,
            });
        }
        self.expression_statement()
    }

    /// `for` is syntactic sugar. The loop is lowered to a block holding the
    /// initializer and a while whose body runs the original body followed
    /// by the increment; a missing condition becomes literal `true`.
    fn for_statement(&mut self) -> Result<Stmt, Error> {
        self.consume(LEFT_PAREN, "Expect '(' after 'for'.")?;

        let initializer = if self.match_type(SEMICOLON) {
            None
        } else if self.match_type(VAR) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(SEMICOLON, "Expect ';' after loop condition.")?;

        let increment = if !self.check(RIGHT_PAREN) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(RIGHT_PAREN, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block {
                statements: vec![
                    body,
                    Stmt::Expression {
                        expression: increment,
                    },
                ],
            };
        }

        let condition = condition.unwrap_or(Expr::Literal {
            value: Object::Boolean(true),
        });
        body = Stmt::While {
            condition,
            body: Box::new(body),
        };

        if let Some(initializer) = initializer {
            body = Stmt::Block {
                statements: vec![initializer, body],
            };
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> Result<Stmt, Error> {
        self.consume(LEFT_PAREN, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(RIGHT_PAREN, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let mut else_branch = None;
        if self.match_type(ELSE) {
            else_branch = Some(Box::new(self.statement()?));
        }

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn print_statement(&mut self) -> Result<Stmt, Error> {
        let expression = self.expression()?;
        self.consume(SEMICOLON, "Expect ';' after value.")?;
        Ok(Stmt::Print { expression })
    }

    fn return_statement(&mut self) -> Result<Stmt, Error> {
        let keyword = self.previous();
        let mut value = None;
        if !self.check(SEMICOLON) {
            value = Some(self.expression()?);
        }
        self.consume(SEMICOLON, "Expect ';' after return value.")?;
        Ok(Stmt::Return { keyword, value })
    }

    fn while_statement(&mut self) -> Result<Stmt, Error> {
        self.consume(LEFT_PAREN, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(RIGHT_PAREN, "Expect ')' after condition.")?;
        let body = Box::new(self.statement()?);

        Ok(Stmt::While { condition, body })
    }

    fn expression_statement(&mut self) -> Result<Stmt, Error> {
        let expression = self.expression()?;
        self.consume(SEMICOLON, "Expect ';' after expression.")?;
        Ok(Stmt::Expression { expression })
    }

    fn block(&mut self) -> Result<Vec<Stmt>, Error> {
        let mut statements = Vec::new();
        while !self.check(RIGHT_BRACE) && !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }
        self.consume(RIGHT_BRACE, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn expression(&mut self) -> Result<Expr, Error> {
        self.assignment()
    }

    /// Assignment is right-associative, and the target is validated after
    /// the fact: we parse the left side as an ordinary expression, and only
    /// once we see `=` decide whether it was a valid target.
    fn assignment(&mut self) -> Result<Expr, Error> {
        let expr = self.or()?;

        if self.match_type(EQUAL) {
            let equals = self.previous();
            let value = Box::new(self.assignment()?);

            return match expr {
                Expr::Variable { name, .. } => Ok(Expr::Assign {
                    id: self.fresh_id(),
                    name,
                    value,
                }),
                Expr::Get { object, name } => Ok(Expr::Set {
                    object,
                    name,
                    value,
                }),
                target => {
                    // Reported, not thrown: no need to synchronize.
                    error::token_error(&equals, "Invalid assignment target.");
                    Ok(target)
                }
            };
        }

        Ok(expr)
    }

    fn or(&mut self) -> Result<Expr, Error> {
        let mut expr = self.and()?;

        while self.match_type(OR) {
            let operator = self.previous();
            let right = self.and()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr, Error> {
        let mut expr = self.equality()?;

        while self.match_type(AND) {
            let operator = self.previous();
            let right = self.equality()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, Error> {
        let mut expr = self.comparison()?;

        while self.match_types(&[BANG_EQUAL, EQUAL_EQUAL]) {
            let operator = self.previous();
            let right = self.comparison()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, Error> {
        let mut expr = self.term()?;

        while self.match_types(&[GREATER, GREATER_EQUAL, LESS, LESS_EQUAL]) {
            let operator = self.previous();
            let right = self.term()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, Error> {
        let mut expr = self.factor()?;

        while self.match_types(&[MINUS, PLUS]) {
            let operator = self.previous();
            let right = self.factor()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, Error> {
        let mut expr = self.unary()?;

        while self.match_types(&[SLASH, STAR]) {
            let operator = self.previous();
            let right = self.unary()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, Error> {
        if self.match_types(&[BANG, MINUS]) {
            let operator = self.previous();
            let right = self.unary()?;
            return Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            });
        }

        self.call()
    }

    fn call(&mut self) -> Result<Expr, Error> {
        let mut expr = self.primary()?;

        loop {
            if self.match_type(LEFT_PAREN) {
                expr = self.finish_call(expr)?;
            } else if self.match_type(DOT) {
                let name = self.consume(IDENTIFIER, "Expect property name after '.'.")?;
                expr = Expr::Get {
                    object: Box::new(expr),
                    name,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr, Error> {
        let mut arguments = Vec::new();
        if !self.check(RIGHT_PAREN) {
            loop {
                if arguments.len() >= 255 {
                    error::token_error(&self.peek(), "Can't have more than 255 arguments.");
                }
                arguments.push(self.expression()?);
                if !self.match_type(COMMA) {
                    break;
                }
            }
        }

        let paren = self.consume(RIGHT_PAREN, "Expect ')' after arguments.")?;
        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            arguments,
        })
    }

    fn primary(&mut self) -> Result<Expr, Error> {
        if self.match_type(FALSE) {
            return Ok(Expr::Literal {
                value: Object::Boolean(false),
            });
        }
        if self.match_type(TRUE) {
            return Ok(Expr::Literal {
                value: Object::Boolean(true),
            });
        }
        if self.match_type(NIL) {
            return Ok(Expr::Literal { value: Object::Nil });
        }

        if self.match_type(NUMBER) {
            if let Some(Literal::Num(value)) = self.previous().literal {
                return Ok(Expr::Literal {
                    value: Object::Number(value),
                });
            }
            unreachable!("number token without numeric literal");
        }
        if self.match_type(STRING) {
            if let Some(Literal::Str(value)) = self.previous().literal {
                return Ok(Expr::Literal {
                    value: Object::String(value),
                });
            }
            unreachable!("string token without string literal");
        }

        if self.match_type(SUPER) {
            let keyword = self.previous();
            self.consume(DOT, "Expect '.' after 'super'.")?;
            let method = self.consume(IDENTIFIER, "Expect superclass method name.")?;
            return Ok(Expr::Super {
                id: self.fresh_id(),
                keyword,
                method,
            });
        }

        if self.match_type(THIS) {
            return Ok(Expr::This {
                id: self.fresh_id(),
                keyword: self.previous(),
            });
        }

        if self.match_type(IDENTIFIER) {
            return Ok(Expr::Variable {
                id: self.fresh_id(),
                name: self.previous(),
            });
        }

        if self.match_type(LEFT_PAREN) {
            let expression = self.expression()?;
            self.consume(RIGHT_PAREN, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping {
                expression: Box::new(expression),
            });
        }

        Err(self.error(&self.peek(), "Expect expression."))
    }

    /// Discards tokens until a likely statement boundary: right after a
    /// semicolon, or right before a keyword that starts a statement. This
    /// is how one syntax error avoids producing a cascade of bogus ones.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().token_type == SEMICOLON {
                return;
            }

            match self.peek().token_type {
                CLASS | FUN | VAR | FOR | IF | WHILE | PRINT | RETURN => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> Result<Token, Error> {
        if self.check(token_type) {
            return Ok(self.advance());
        }

        Err(self.error(&self.peek(), message))
    }

    fn match_type(&mut self, token_type: TokenType) -> bool {
        self.match_types(&[token_type])
    }

    fn match_types(&mut self, types: &[TokenType]) -> bool {
        for token_type in types {
            if self.check(*token_type) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, token_type: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek().token_type == token_type
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == EOF
    }

    fn peek(&self) -> Token {
        self.tokens[self.current].clone()
    }

    fn previous(&self) -> Token {
        self.tokens[self.current - 1].clone()
    }

    fn fresh_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn error(&self, token: &Token, message: &str) -> Error {
        error::token_error(token, message);
        Error::Parse
    }
}
