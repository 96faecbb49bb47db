mod environment;
mod error;
mod expr;
mod interpreter;
mod lox;
mod parser;
mod resolver;
mod scanner;
mod stmt;
mod token;
mod value;

use anyhow::Context;
use std::env;
use std::fs;
use std::process::exit;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let path = match args.as_slice() {
        [_, path] => path.clone(),
        _ => {
            eprintln!("Usage: treelox <script>");
            exit(64);
        }
    };

    let source =
        fs::read_to_string(&path).with_context(|| format!("failed to read '{path}'"))?;

    lox::run(&source);

    if error::had_error() {
        exit(65);
    }
    if error::had_runtime_error() {
        exit(70);
    }
    Ok(())
}
