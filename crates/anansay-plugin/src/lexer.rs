// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Python tokenizer for the source scanner.
//!
//! Produces logical lines terminated by [`Tok::Newline`], with
//! [`Tok::Indent`]/[`Tok::Dedent`] markers the way CPython's tokenizer emits
//! them. String and number literals are kept opaque.

use crate::scan::ScanError;

/// CPython refuses deeper block nesting than this.
const MAX_INDENT_LEVELS: usize = 100;

/// Operators, longest first so the first match is the greedy one.
const OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "...", "**", "//", ">>", "<<", "<=", ">=", "==", "!=", "->", ":=",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "@=", "+", "-", "*", "/", "%", "@", "&", "|",
    "^", "~", "<", ">", "=", ".", ",", ":", ";",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tok<'a> {
    Name(&'a str),
    Number,
    Str,
    Op(&'a str),
    Newline,
    Indent,
    Dedent,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Token<'a> {
    pub tok: Tok<'a>,
    pub line: usize,
}

pub(crate) struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    brackets: Vec<(char, usize)>,
    indents: Vec<usize>,
    at_line_start: bool,
    tokens: Vec<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src: src.strip_prefix('\u{feff}').unwrap_or(src),
            pos: 0,
            line: 1,
            brackets: Vec::new(),
            indents: vec![0],
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn push(&mut self, tok: Tok<'a>, line: usize) {
        self.tokens.push(Token { tok, line });
    }

    fn newline(&mut self) {
        let last_is_newline = matches!(
            self.tokens.last(),
            None | Some(Token {
                tok: Tok::Newline,
                ..
            })
        );
        if self.brackets.is_empty() && !last_is_newline {
            self.push(Tok::Newline, self.line);
        }
    }

    /// Consume a line break (`\n`, `\r\n` or a lone `\r`).
    fn line_break(&mut self) {
        if self.bump() == Some('\r') {
            if self.peek() == Some('\n') {
                self.bump();
            } else {
                self.line += 1;
            }
        }
    }

    pub(crate) fn tokenize(mut self) -> Result<Vec<Token<'a>>, ScanError> {
        while self.peek().is_some() {
            if self.at_line_start {
                self.at_line_start = false;
                self.indentation()?;
                continue;
            }
            let Some(c) = self.peek() else { break };
            match c {
                '#' => {
                    while !matches!(self.peek(), None | Some('\n') | Some('\r')) {
                        self.bump();
                    }
                }
                '\n' | '\r' => {
                    self.newline();
                    self.line_break();
                    self.at_line_start = self.brackets.is_empty();
                }
                ' ' | '\t' | '\x0c' => {
                    self.bump();
                }
                '\\' => {
                    let line = self.line;
                    self.bump();
                    if matches!(self.peek(), Some('\n') | Some('\r')) {
                        self.line_break();
                    } else {
                        return Err(ScanError::UnexpectedCharacter { line, ch: '\\' });
                    }
                }
                '\'' | '"' => self.string()?,
                '0'..='9' => self.number(),
                '.' if self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => self.number(),
                '(' | '[' | '{' => {
                    self.brackets.push((c, self.line));
                    self.single(self.line);
                }
                ')' | ']' | '}' => {
                    let line = self.line;
                    match self.brackets.pop() {
                        Some((open, _)) if closes(open, c) => {}
                        _ => return Err(ScanError::UnbalancedBracket { line, ch: c }),
                    }
                    self.single(line);
                }
                c if c == '_' || c.is_alphabetic() => self.name_or_prefixed_string()?,
                other => self.operator(other)?,
            }
        }

        if let Some((open, line)) = self.brackets.last() {
            return Err(ScanError::UnbalancedBracket {
                line: *line,
                ch: *open,
            });
        }
        self.newline();
        while self.indents.len() > 1 {
            self.indents.pop();
            self.push(Tok::Dedent, self.line);
        }
        Ok(self.tokens)
    }

    /// Measure the indentation of a new logical line and emit
    /// INDENT/DEDENT markers. Blank and comment-only lines are ignored.
    fn indentation(&mut self) -> Result<(), ScanError> {
        let mut column = 0;
        loop {
            match self.peek() {
                Some(' ') => column += 1,
                Some('\t') => column = (column / 8 + 1) * 8,
                Some('\x0c') => column = 0,
                _ => break,
            }
            self.bump();
        }
        if matches!(self.peek(), None | Some('\n') | Some('\r') | Some('#')) {
            return Ok(());
        }

        let current = self.indents.last().copied().unwrap_or(0);
        if column > current {
            if self.indents.len() > MAX_INDENT_LEVELS {
                return Err(ScanError::InvalidSyntax {
                    line: self.line,
                    reason: "too many levels of indentation",
                });
            }
            self.indents.push(column);
            self.push(Tok::Indent, self.line);
            return Ok(());
        }
        while column < self.indents.last().copied().unwrap_or(0) {
            self.indents.pop();
            self.push(Tok::Dedent, self.line);
        }
        if column != self.indents.last().copied().unwrap_or(0) {
            return Err(ScanError::InconsistentDedent { line: self.line });
        }
        Ok(())
    }

    fn single(&mut self, line: usize) {
        let src = self.src;
        let start = self.pos;
        self.bump();
        self.push(Tok::Op(&src[start..self.pos]), line);
    }

    fn operator(&mut self, c: char) -> Result<(), ScanError> {
        let rest = &self.src[self.pos..];
        let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) else {
            return Err(ScanError::UnexpectedCharacter {
                line: self.line,
                ch: c,
            });
        };
        let src = self.src;
        let start = self.pos;
        self.pos += op.len();
        self.push(Tok::Op(&src[start..self.pos]), self.line);
        Ok(())
    }

    fn name_or_prefixed_string(&mut self) -> Result<(), ScanError> {
        let src = self.src;
        let start = self.pos;
        while self.peek().is_some_and(|c| c == '_' || c.is_alphanumeric()) {
            self.bump();
        }
        let word = &src[start..self.pos];
        if matches!(self.peek(), Some('\'') | Some('"')) && is_string_prefix(word) {
            return self.string();
        }
        self.push(Tok::Name(word), self.line);
        Ok(())
    }

    fn number(&mut self) {
        let line = self.line;
        let start = self.pos;
        while let Some(c) = self.peek() {
            let literal = &self.src[start..self.pos];
            let exponent_sign = (c == '+' || c == '-')
                && matches!(literal.chars().last(), Some('e') | Some('E'))
                && !literal.starts_with("0x")
                && !literal.starts_with("0X");
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                self.bump();
            } else {
                break;
            }
        }
        self.push(Tok::Number, line);
    }

    /// Consume a string literal starting at the opening quote.
    fn string(&mut self) -> Result<(), ScanError> {
        let line = self.line;
        let Some(quote) = self.bump() else {
            return Ok(());
        };
        let triple = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        if triple {
            self.bump();
            self.bump();
        }

        loop {
            match self.peek() {
                None => return Err(ScanError::UnterminatedString { line }),
                Some('\\') => {
                    // Escapes the next character, including a line break.
                    self.bump();
                    match self.peek() {
                        None => return Err(ScanError::UnterminatedString { line }),
                        Some('\n') | Some('\r') => self.line_break(),
                        Some(_) => {
                            self.bump();
                        }
                    }
                }
                Some('\n') | Some('\r') => {
                    if !triple {
                        return Err(ScanError::UnterminatedString { line });
                    }
                    self.line_break();
                }
                Some(c) if c == quote => {
                    self.bump();
                    if !triple {
                        break;
                    }
                    if self.peek() == Some(quote) && self.peek_at(1) == Some(quote) {
                        self.bump();
                        self.bump();
                        break;
                    }
                }
                Some(_) => {
                    self.bump();
                }
            }
        }

        self.push(Tok::Str, line);
        Ok(())
    }
}

fn closes(open: char, close: char) -> bool {
    matches!((open, close), ('(', ')') | ('[', ']') | ('{', '}'))
}

/// String prefixes accepted by Python 3 (case-insensitive, any order).
fn is_string_prefix(word: &str) -> bool {
    matches!(
        word.to_ascii_lowercase().as_str(),
        "r" | "u" | "b" | "f" | "t" | "br" | "rb" | "fr" | "rf" | "tr" | "rt"
    )
}
