use crate::token::{Token, TokenType};
use crate::value::object::Object;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Everything that can unwind the parser or the evaluator. `Return` is not
/// an error at all: it is the control-flow signal a `return` statement uses
/// to escape arbitrarily deep nesting, caught only at the function-call
/// boundary and never shown to the user.
#[derive(Debug, Error)]
pub enum Error {
    /// The offending token was already reported via `token_error`; the
    /// parser recovers with `synchronize` and keeps going.
    #[error("parse error")]
    Parse,

    /// A runtime precondition was violated. Carries the token to blame so
    /// the diagnostic can name a source line.
    #[error("{message}\n[line {line}]", message = .1, line = .0.line)]
    Runtime(Token, String),

    #[error("return")]
    Return(Object),
}

static HAD_ERROR: AtomicBool = AtomicBool::new(false);
static HAD_RUNTIME_ERROR: AtomicBool = AtomicBool::new(false);

pub fn error(line: usize, message: &str) {
    report(line, "", message);
}

pub fn token_error(token: &Token, message: &str) {
    if token.token_type == TokenType::EOF {
        report(token.line, " at end", message);
    } else {
        report(token.line, &format!(" at '{}'", token.lexeme), message);
    }
}

pub fn runtime_error(error: &Error) {
    eprintln!("{error}");
    HAD_RUNTIME_ERROR.store(true, Ordering::Relaxed);
}

fn report(line: usize, location: &str, message: &str) {
    eprintln!("[line {line}] Error{location}: {message}");
    HAD_ERROR.store(true, Ordering::Relaxed);
}

pub fn had_error() -> bool {
    HAD_ERROR.load(Ordering::Relaxed)
}

pub fn had_runtime_error() -> bool {
    HAD_RUNTIME_ERROR.load(Ordering::Relaxed)
}
