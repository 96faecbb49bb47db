use crate::error;
use crate::token::TokenType::*;
use crate::token::{Literal, Token, TokenType};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static KEYWORDS: Lazy<HashMap<&'static str, TokenType>> = Lazy::new(|| {
    HashMap::from([
        ("and", AND),
        ("class", CLASS),
        ("else", ELSE),
        ("false", FALSE),
        ("for", FOR),
        ("fun", FUN),
        ("if", IF),
        ("nil", NIL),
        ("or", OR),
        ("print", PRINT),
        ("return", RETURN),
        ("super", SUPER),
        ("this", THIS),
        ("true", TRUE),
        ("var", VAR),
        ("while", WHILE),
    ])
});

/// The scanner takes in raw source code as a series of characters and groups
/// it into a series of tokens, the meaningful "words" and "punctuation" that
/// make up the language's grammar.
pub struct Scanner {
    source: Vec<char>,

    /// A list to fill with tokens the scanner is going to generate
    tokens: Vec<Token>,

    /// 'start' points to the first character in the lexeme being scanned,
    /// 'current' at the character currently being considered, and 'line'
    /// tracks what source line 'current' is on.
    start: usize,
    current: usize,
    line: usize,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: vec![],
            start: 0,
            current: 0,
            line: 1,
        }
    }

    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            // We are at the beginning of the next lexeme.
            self.start = self.current;
            self.scan_token();
        }
        self.tokens.push(Token::new(EOF, String::new(), None, self.line));
        self.tokens
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) {
        let ln = self.line;
        let c = self.advance();
        match c {
            // --------Single-character lexemes ----------------------
            '(' => self.add_token(LEFT_PAREN),
            ')' => self.add_token(RIGHT_PAREN),
            '{' => self.add_token(LEFT_BRACE),
            '}' => self.add_token(RIGHT_BRACE),
            ',' => self.add_token(COMMA),
            '.' => self.add_token(DOT),
            '-' => self.add_token(MINUS),
            '+' => self.add_token(PLUS),
            ';' => self.add_token(SEMICOLON),
            '*' => self.add_token(STAR),

            // --------Two-character Operators ----------------------
            // We recognize these lexemes in two stages. e.g. we know the
            // lexeme starts with !. We look at the next character to
            // determine if we're on a != or merely a !.
            '!' => match self.match_next('=') {
                true => self.add_token(BANG_EQUAL),
                false => self.add_token(BANG),
            },
            '=' => match self.match_next('=') {
                true => self.add_token(EQUAL_EQUAL),
                false => self.add_token(EQUAL),
            },
            '<' => match self.match_next('=') {
                true => self.add_token(LESS_EQUAL),
                false => self.add_token(LESS),
            },
            '>' => match self.match_next('=') {
                true => self.add_token(GREATER_EQUAL),
                false => self.add_token(GREATER),
            },

            // --------Newline and Whitespaces ----------------------
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            // --------Longer Lexemes ----------------------------------
            // After we detect the beginning of one, we shunt over to some
            // lexeme-specific code that keeps eating characters until it
            // sees the end.
            '/' => self.comment(),
            '"' => self.string(),
            d if is_digit(d) => self.number(),
            a if is_alpha(a) => self.identifier(),

            // --------Invalid characters -----------------------------
            // We log the error and keep scanning. There may be other errors
            // later in the program; we detect as many as possible in one go.
            _ => {
                error::error(ln, &format!("Unexpected character: {c}"));
            }
        }
    }

    fn comment(&mut self) {
        // A comment goes until the end of the line. Comments are lexemes,
        // but they aren't meaningful, so no token is added.
        if self.match_next('/') {
            while self.peek() != '\n' && !self.is_at_end() {
                self.advance();
            }
        } else {
            self.add_token(SLASH)
        }
    }

    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            // Strings may span lines.
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            error::error(self.line, "Unterminated string.");
            return;
        }

        // The closing ".
        self.advance();

        // Trim the surrounding quotes to produce the actual string value
        // that will be used later by the interpreter.
        let value: String = self.source[self.start + 1..self.current - 1].iter().collect();
        self.add_token_with_literal(STRING, Literal::Str(value));
    }

    fn number(&mut self) {
        while is_digit(self.peek()) {
            self.advance();
        }

        // Look for a fractional part.
        if self.peek() == '.' && is_digit(self.peek_next()) {
            // Consume the "."
            self.advance();

            while is_digit(self.peek()) {
                self.advance();
            }
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        match text.parse::<f64>() {
            Ok(value) => self.add_token_with_literal(NUMBER, Literal::Num(value)),
            Err(_) => error::error(self.line, &format!("Invalid number: {text}")),
        }
    }

    fn identifier(&mut self) {
        while is_alpha_numeric(self.peek()) {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        let token_type = KEYWORDS.get(&*text).copied().unwrap_or(IDENTIFIER);
        self.add_token(token_type);
    }

    /// Consumes the next character in the source and returns it. Only
    /// called after an `is_at_end` check.
    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn add_token(&mut self, token_type: TokenType) {
        let text = self.source[self.start..self.current].iter().collect();
        self.tokens.push(Token::new(token_type, text, None, self.line));
    }

    fn add_token_with_literal(&mut self, token_type: TokenType, literal: Literal) {
        let text = self.source[self.start..self.current].iter().collect();
        self.tokens.push(Token::new(token_type, text, Some(literal), self.line));
    }

    /// Like a conditional advance(). We only consume the current character
    /// if it's what we're looking for.
    fn match_next(&mut self, expected: char) -> bool {
        if self.is_at_end() {
            return false;
        }
        if self.source[self.current] != expected {
            return false;
        }

        self.current += 1;
        true
    }

    /// Like advance(), but doesn't consume the character: one character of
    /// lookahead.
    fn peek(&self) -> char {
        if self.is_at_end() {
            return '\0';
        }
        self.source[self.current]
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            return '\0';
        }
        self.source[self.current + 1]
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alpha_numeric(c: char) -> bool {
    is_alpha(c) || is_digit(c)
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}
