use crate::error;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use log::debug;

/// Runs one program front to back: scan, parse, resolve, interpret. Static
/// errors (lexical, syntax, resolution) are reported as they are found and
/// suppress every later phase; a broken program never starts executing.
pub fn run(source: &str) {
    let scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens();
    debug!("scanned {} tokens", tokens.len());

    let mut parser = Parser::new(tokens);
    let statements = parser.parse();

    // There is little value in resolving code that has a syntax error; it
    // is never going to run.
    if error::had_error() {
        return;
    }
    debug!("parsed {} top-level statements", statements.len());

    let resolver = Resolver::new();
    let locals = resolver.resolve(&statements);

    // Stop if there was a resolution error.
    if error::had_error() {
        return;
    }
    debug!("resolved {} local references", locals.len());

    let mut interpreter = Interpreter::new(locals);
    interpreter.interpret(&statements);
}
