// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A narrow Python source scanner that extracts `from ... import ...`
//! statements.
//!
//! The scanner checks the statement and expression grammar of the whole
//! file (blocks, indentation, operator placement, assignment targets) but
//! keeps no syntax tree. The only output is the list of `from` imports.
//! Anything it cannot accept is a [`ScanError`], so a damaged file never
//! yields imports.

use thiserror::Error;

use crate::lexer::{Lexer, Tok, Token};

/// Bracket and operator nesting accepted before giving up.
const MAX_NESTING: usize = 200;

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in",
    "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
    "yield",
];

const AUGMENTED_ASSIGN: &[&str] = &[
    "+=", "-=", "*=", "/=", "//=", "%=", "@=", "&=", "|=", "^=", ">>=", "<<=", "**=",
];

const BINARY_OPS: &[&str] = &["|", "^", "&", "<<", ">>", "+", "-", "*", "/", "//", "%", "@"];

const COMPARISON_OPS: &[&str] = &["==", "!=", "<", ">", "<=", ">="];

/// Why a source text could not be scanned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },

    #[error("line {line}: unbalanced `{ch}`")]
    UnbalancedBracket { line: usize, ch: char },

    #[error("line {line}: unexpected character {ch:?}")]
    UnexpectedCharacter { line: usize, ch: char },

    #[error("line {line}: unexpected indent")]
    UnexpectedIndent { line: usize },

    #[error("line {line}: expected an indented block")]
    ExpectedIndent { line: usize },

    #[error("line {line}: unindent does not match any outer indentation level")]
    InconsistentDedent { line: usize },

    #[error("line {line}: malformed from-import ({reason})")]
    MalformedImport { line: usize, reason: &'static str },

    #[error("line {line}: invalid syntax ({reason})")]
    InvalidSyntax { line: usize, reason: &'static str },
}

/// A parsed `from <module> import <names>` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFrom {
    /// Number of leading dots (relative import level).
    pub level: usize,
    /// Dotted module path without the leading dots; `None` for `from . import x`.
    pub module: Option<String>,
    /// Imported names in source order. `*` is represented as a single `"*"`.
    pub names: Vec<ImportedName>,
    /// 1-based line the statement starts on.
    pub line: usize,
}

/// One entry of an import list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedName {
    pub name: String,
    pub alias: Option<String>,
}

/// Extract every `from ... import ...` statement in `source`.
///
/// Fails if `source` is not syntactically valid Python.
pub fn parse_import_froms(source: &str) -> Result<Vec<ImportFrom>, ScanError> {
    let tokens = Lexer::new(source).tokenize()?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
        imports: Vec::new(),
    };
    parser.file()?;
    Ok(parser.imports)
}

/// What an expression can be used as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expr {
    /// Bare identifier.
    Name,
    /// Attribute access or subscript.
    Access,
    /// Tuple, list or starred form; `true` if every element is assignable.
    Unpack(bool),
    /// Anything else.
    Value,
}

impl Expr {
    fn assignable(self) -> bool {
        matches!(self, Expr::Name | Expr::Access | Expr::Unpack(true))
    }

    fn single_target(self) -> bool {
        matches!(self, Expr::Name | Expr::Access)
    }
}

type Parsed<T = ()> = Result<T, ScanError>;

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    depth: usize,
    imports: Vec<ImportFrom>,
}

impl<'a> Parser<'_, 'a> {
    // ---- token helpers ----

    fn peek(&self) -> Option<Tok<'a>> {
        self.tokens.get(self.pos).map(|t| t.tok)
    }

    fn peek_at(&self, n: usize) -> Option<Tok<'a>> {
        self.tokens.get(self.pos + n).map(|t| t.tok)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn at(&self, tok: Tok<'_>) -> bool {
        self.peek() == Some(tok)
    }

    fn eat(&mut self, tok: Tok<'_>) -> bool {
        let found = self.at(tok);
        if found {
            self.bump();
        }
        found
    }

    fn at_op(&self, op: &str) -> bool {
        self.at(Tok::Op(op))
    }

    fn eat_op(&mut self, op: &str) -> bool {
        self.eat(Tok::Op(op))
    }

    fn at_kw(&self, kw: &str) -> bool {
        self.at(Tok::Name(kw))
    }

    fn eat_kw(&mut self, kw: &str) -> bool {
        self.eat(Tok::Name(kw))
    }

    fn error(&self, reason: &'static str) -> ScanError {
        ScanError::InvalidSyntax {
            line: self.line(),
            reason,
        }
    }

    fn expect_op(&mut self, op: &str, reason: &'static str) -> Parsed {
        if self.eat_op(op) { Ok(()) } else { Err(self.error(reason)) }
    }

    fn expect_kw(&mut self, kw: &str, reason: &'static str) -> Parsed {
        if self.eat_kw(kw) { Ok(()) } else { Err(self.error(reason)) }
    }

    fn name(&mut self) -> Parsed<&'a str> {
        match self.peek() {
            Some(Tok::Name(name)) if !is_keyword(name) => {
                self.bump();
                Ok(name)
            }
            _ => Err(self.error("expected a name")),
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(self.peek(), None | Some(Tok::Newline) | Some(Tok::Op(";")))
    }

    fn starts_expression(&self) -> bool {
        match self.peek() {
            Some(Tok::Name(name)) => {
                !is_keyword(name)
                    || matches!(name, "True" | "False" | "None" | "not" | "lambda" | "await")
            }
            Some(Tok::Number) | Some(Tok::Str) => true,
            Some(Tok::Op(op)) => matches!(op, "(" | "[" | "{" | "-" | "+" | "~" | "*" | "..."),
            _ => false,
        }
    }

    fn at_comprehension(&self) -> bool {
        self.at_kw("for") || (self.at_kw("async") && self.peek_at(1) == Some(Tok::Name("for")))
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Parsed<T>) -> Parsed<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.error("expression nested too deeply"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ---- statements ----

    fn file(&mut self) -> Parsed {
        while let Some(tok) = self.peek() {
            match tok {
                Tok::Newline => self.bump(),
                Tok::Indent => return Err(ScanError::UnexpectedIndent { line: self.line() }),
                _ => self.statement()?,
            }
        }
        Ok(())
    }

    fn statement(&mut self) -> Parsed {
        match self.peek() {
            Some(Tok::Name("if")) => self.if_statement(),
            Some(Tok::Name("while")) => self.while_statement(),
            Some(Tok::Name("for")) => self.for_statement(),
            Some(Tok::Name("try")) => self.try_statement(),
            Some(Tok::Name("with")) => self.with_statement(),
            Some(Tok::Name("def")) => self.function_def(),
            Some(Tok::Name("class")) => self.class_def(),
            Some(Tok::Name("async")) => {
                self.bump();
                match self.peek() {
                    Some(Tok::Name("def")) => self.function_def(),
                    Some(Tok::Name("for")) => self.for_statement(),
                    Some(Tok::Name("with")) => self.with_statement(),
                    _ => Err(self.error("`async` must precede def, for or with")),
                }
            }
            Some(Tok::Name("match")) if self.at_match_statement() => self.match_statement(),
            Some(Tok::Op("@")) => self.decorated(),
            Some(Tok::Indent) => Err(ScanError::UnexpectedIndent { line: self.line() }),
            Some(Tok::Dedent) | Some(Tok::Newline) | None => Err(self.error("expected a statement")),
            _ => self.simple_statements(),
        }
    }

    /// `NEWLINE INDENT statement+ DEDENT`, or simple statements on the
    /// header's own line.
    fn block(&mut self) -> Parsed {
        if !self.eat(Tok::Newline) {
            return self.simple_statements();
        }
        if !self.eat(Tok::Indent) {
            return Err(ScanError::ExpectedIndent { line: self.line() });
        }
        loop {
            self.statement()?;
            if self.eat(Tok::Dedent) || self.peek().is_none() {
                return Ok(());
            }
        }
    }

    fn suite(&mut self) -> Parsed {
        self.expect_op(":", "expected `:`")?;
        self.block()
    }

    fn if_statement(&mut self) -> Parsed {
        self.bump();
        self.named_expression()?;
        self.suite()?;
        while self.eat_kw("elif") {
            self.named_expression()?;
            self.suite()?;
        }
        if self.eat_kw("else") {
            self.suite()?;
        }
        Ok(())
    }

    fn while_statement(&mut self) -> Parsed {
        self.bump();
        self.named_expression()?;
        self.suite()?;
        if self.eat_kw("else") {
            self.suite()?;
        }
        Ok(())
    }

    fn for_statement(&mut self) -> Parsed {
        self.bump();
        self.targets()?;
        self.expect_kw("in", "expected `in`")?;
        self.star_expressions()?;
        self.suite()?;
        if self.eat_kw("else") {
            self.suite()?;
        }
        Ok(())
    }

    fn try_statement(&mut self) -> Parsed {
        self.bump();
        self.suite()?;

        let mut handlers = 0;
        while self.eat_kw("except") {
            self.eat_op("*");
            if !self.at_op(":") {
                self.expression()?;
                if self.eat_kw("as") {
                    self.name()?;
                }
            }
            self.suite()?;
            handlers += 1;
        }
        if handlers > 0 && self.eat_kw("else") {
            self.suite()?;
        }
        let finally = self.eat_kw("finally");
        if finally {
            self.suite()?;
        }
        if handlers == 0 && !finally {
            return Err(self.error("`try` needs `except` or `finally`"));
        }
        Ok(())
    }

    fn with_statement(&mut self) -> Parsed {
        self.bump();
        if self.at_op("(") {
            let start = self.pos;
            let parenthesized = self.parenthesized_with_items().is_ok() && self.at_op(":");
            if !parenthesized {
                self.pos = start;
                self.with_items()?;
            }
        } else {
            self.with_items()?;
        }
        self.suite()
    }

    fn with_item(&mut self) -> Parsed {
        self.expression()?;
        if self.eat_kw("as") {
            self.target()?;
        }
        Ok(())
    }

    fn with_items(&mut self) -> Parsed {
        loop {
            self.with_item()?;
            if !self.eat_op(",") {
                return Ok(());
            }
        }
    }

    fn parenthesized_with_items(&mut self) -> Parsed {
        self.bump();
        loop {
            self.with_item()?;
            if !self.eat_op(",") || self.at_op(")") {
                break;
            }
        }
        self.expect_op(")", "expected `)`")
    }

    fn function_def(&mut self) -> Parsed {
        self.bump();
        self.name()?;
        if self.at_op("[") {
            self.type_params()?;
        }
        self.expect_op("(", "expected `(`")?;
        self.parameters(true, ")")?;
        self.expect_op(")", "expected `)`")?;
        if self.eat_op("->") {
            self.expression()?;
        }
        self.suite()
    }

    fn class_def(&mut self) -> Parsed {
        self.bump();
        self.name()?;
        if self.at_op("[") {
            self.type_params()?;
        }
        if self.at_op("(") {
            self.call_arguments()?;
        }
        self.suite()
    }

    fn decorated(&mut self) -> Parsed {
        while self.eat_op("@") {
            self.named_expression()?;
            if !self.eat(Tok::Newline) {
                return Err(self.error("expected a newline after decorator"));
            }
        }
        match self.peek() {
            Some(Tok::Name("def")) => self.function_def(),
            Some(Tok::Name("class")) => self.class_def(),
            Some(Tok::Name("async")) if self.peek_at(1) == Some(Tok::Name("def")) => {
                self.bump();
                self.function_def()
            }
            _ => Err(self.error("decorator must precede def or class")),
        }
    }

    /// `match` is a soft keyword: a statement only when the logical line ends
    /// in `:` and opens a block.
    fn at_match_statement(&self) -> bool {
        let Some(offset) = self.tokens[self.pos..]
            .iter()
            .position(|t| t.tok == Tok::Newline)
        else {
            return false;
        };
        let end = self.pos + offset;
        end >= self.pos + 3
            && self.tokens[end - 1].tok == Tok::Op(":")
            && self.tokens.get(end + 1).map(|t| t.tok) == Some(Tok::Indent)
    }

    fn match_statement(&mut self) -> Parsed {
        self.bump();
        self.star_expressions()?;
        self.expect_op(":", "expected `:`")?;
        if !self.eat(Tok::Newline) || !self.eat(Tok::Indent) {
            return Err(ScanError::ExpectedIndent { line: self.line() });
        }
        loop {
            self.expect_kw("case", "expected `case`")?;
            self.case_pattern()?;
            if self.eat_kw("if") {
                self.named_expression()?;
            }
            self.suite()?;
            if self.eat(Tok::Dedent) || self.peek().is_none() {
                return Ok(());
            }
        }
    }

    /// Patterns are only checked for being non-empty; their brackets are
    /// already balanced by the lexer.
    fn case_pattern(&mut self) -> Parsed {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(tok) = self.peek() {
            match tok {
                Tok::Op("(" | "[" | "{") => depth += 1,
                Tok::Op(")" | "]" | "}") => depth = depth.saturating_sub(1),
                Tok::Op(":") | Tok::Name("if") if depth == 0 => break,
                Tok::Newline => break,
                _ => {}
            }
            self.bump();
        }
        if self.pos == start {
            return Err(self.error("expected a pattern"));
        }
        Ok(())
    }

    fn simple_statements(&mut self) -> Parsed {
        self.simple_statement()?;
        while self.eat_op(";") {
            if self.at(Tok::Newline) || self.peek().is_none() {
                break;
            }
            self.simple_statement()?;
        }
        if self.eat(Tok::Newline) || self.peek().is_none() {
            Ok(())
        } else {
            Err(self.error("expected end of statement"))
        }
    }

    fn simple_statement(&mut self) -> Parsed {
        match self.peek() {
            Some(Tok::Name("pass" | "break" | "continue")) => {
                self.bump();
                Ok(())
            }
            Some(Tok::Name("return")) => {
                self.bump();
                if !self.at_statement_end() {
                    self.star_expressions()?;
                }
                Ok(())
            }
            Some(Tok::Name("raise")) => {
                self.bump();
                if !self.at_statement_end() {
                    self.expression()?;
                    if self.eat_kw("from") {
                        self.expression()?;
                    }
                }
                Ok(())
            }
            Some(Tok::Name("global" | "nonlocal")) => {
                self.bump();
                self.name()?;
                while self.eat_op(",") {
                    self.name()?;
                }
                Ok(())
            }
            Some(Tok::Name("del")) => {
                self.bump();
                self.targets()
            }
            Some(Tok::Name("assert")) => {
                self.bump();
                self.expression()?;
                if self.eat_op(",") {
                    self.expression()?;
                }
                Ok(())
            }
            Some(Tok::Name("import")) => self.import_name(),
            Some(Tok::Name("from")) => self.import_from(),
            Some(Tok::Name("type"))
                if matches!(self.peek_at(1), Some(Tok::Name(n)) if !is_keyword(n))
                    && matches!(self.peek_at(2), Some(Tok::Op("=" | "["))) =>
            {
                self.bump();
                self.name()?;
                if self.at_op("[") {
                    self.type_params()?;
                }
                self.expect_op("=", "expected `=`")?;
                self.expression()?;
                Ok(())
            }
            _ => self.expression_statement(),
        }
    }

    fn expression_statement(&mut self) -> Parsed {
        let first = self.assignment_value()?;

        if self.at_op("=") {
            let mut target = first;
            while self.eat_op("=") {
                if !target.assignable() {
                    return Err(self.error("cannot assign to expression"));
                }
                target = self.assignment_value()?;
            }
        } else if matches!(self.peek(), Some(Tok::Op(op)) if AUGMENTED_ASSIGN.contains(&op)) {
            if !first.single_target() {
                return Err(self.error("illegal target for augmented assignment"));
            }
            self.bump();
            self.assignment_value()?;
        } else if self.at_op(":") {
            if !first.single_target() {
                return Err(self.error("illegal target for annotation"));
            }
            self.bump();
            self.expression()?;
            if self.eat_op("=") {
                self.assignment_value()?;
            }
        }
        Ok(())
    }

    fn assignment_value(&mut self) -> Parsed<Expr> {
        if self.at_kw("yield") {
            self.yield_expression()?;
            Ok(Expr::Value)
        } else {
            self.star_expressions()
        }
    }

    fn import_name(&mut self) -> Parsed {
        self.bump();
        loop {
            self.name()?;
            while self.eat_op(".") {
                self.name()?;
            }
            if self.eat_kw("as") {
                self.name()?;
            }
            if !self.eat_op(",") {
                return Ok(());
            }
        }
    }

    fn import_from(&mut self) -> Parsed {
        let line = self.line();
        let malformed = |reason: &'static str| ScanError::MalformedImport { line, reason };
        self.bump();

        let mut level = 0;
        loop {
            if self.eat_op(".") {
                level += 1;
            } else if self.eat_op("...") {
                level += 3;
            } else {
                break;
            }
        }

        let mut segments: Vec<&str> = Vec::new();
        if let Some(Tok::Name(first)) = self.peek() {
            if !is_keyword(first) {
                segments.push(first);
                self.bump();
                while self.eat_op(".") {
                    let segment = self.name().map_err(|_| malformed("bad module path"))?;
                    segments.push(segment);
                }
            }
        }
        if level == 0 && segments.is_empty() {
            return Err(malformed("missing module"));
        }
        if !self.eat_kw("import") {
            return Err(malformed("expected `import`"));
        }

        let names = if self.eat_op("*") {
            vec![ImportedName {
                name: "*".to_string(),
                alias: None,
            }]
        } else if self.eat_op("(") {
            let names = self.import_names(true).ok_or(malformed("bad import list"))?;
            if !self.eat_op(")") {
                return Err(malformed("bad import list"));
            }
            names
        } else {
            self.import_names(false).ok_or(malformed("bad import list"))?
        };
        if !self.at_statement_end() {
            return Err(malformed("unexpected tokens after import list"));
        }

        self.imports.push(ImportFrom {
            level,
            module: (!segments.is_empty()).then(|| segments.join(".")),
            names,
            line,
        });
        Ok(())
    }

    /// `a [as b] (, c [as d])*`, with a trailing comma only inside parentheses.
    fn import_names(&mut self, parenthesized: bool) -> Option<Vec<ImportedName>> {
        let mut names = Vec::new();
        loop {
            let name = self.name().ok()?;
            let alias = if self.eat_kw("as") {
                Some(self.name().ok()?.to_string())
            } else {
                None
            };
            names.push(ImportedName {
                name: name.to_string(),
                alias,
            });
            if !self.eat_op(",") {
                return Some(names);
            }
            if parenthesized && self.at_op(")") {
                return Some(names);
            }
        }
    }

    // ---- parameters and arguments ----

    /// Parameter list up to (not including) `close`.
    fn parameters(&mut self, annotated: bool, close: &str) -> Parsed {
        loop {
            if self.at_op(close) {
                return Ok(());
            }
            if self.eat_op("/") {
                // positional-only marker
            } else if self.eat_op("**") {
                self.parameter(annotated)?;
            } else if self.eat_op("*") {
                if !self.at_op(",") && !self.at_op(close) {
                    self.parameter(annotated)?;
                }
            } else {
                self.parameter(annotated)?;
                if self.eat_op("=") {
                    self.expression()?;
                }
            }
            if !self.eat_op(",") {
                return Ok(());
            }
        }
    }

    fn parameter(&mut self, annotated: bool) -> Parsed {
        self.name()?;
        if annotated && self.eat_op(":") {
            if self.eat_op("*") {
                self.or_expression()?;
            } else {
                self.expression()?;
            }
        }
        Ok(())
    }

    fn type_params(&mut self) -> Parsed {
        self.bump();
        loop {
            if !self.eat_op("**") {
                self.eat_op("*");
            }
            self.name()?;
            if self.eat_op(":") {
                self.expression()?;
            }
            if self.eat_op("=") {
                self.expression()?;
            }
            if !self.eat_op(",") || self.at_op("]") {
                break;
            }
        }
        self.expect_op("]", "expected `]`")
    }

    fn call_arguments(&mut self) -> Parsed {
        self.bump();
        let mut count = 0;
        while !self.at_op(")") {
            if self.eat_op("*") || self.eat_op("**") {
                self.expression()?;
            } else if matches!(self.peek(), Some(Tok::Name(n)) if !is_keyword(n))
                && self.peek_at(1) == Some(Tok::Op("="))
            {
                self.bump();
                self.bump();
                self.expression()?;
            } else {
                self.named_expression()?;
                if self.at_comprehension() {
                    if count > 0 {
                        return Err(self.error("generator argument must be parenthesized"));
                    }
                    self.comprehension()?;
                }
            }
            count += 1;
            if !self.eat_op(",") {
                break;
            }
        }
        self.expect_op(")", "expected `)`")
    }

    // ---- targets ----

    fn target(&mut self) -> Parsed {
        self.eat_op("*");
        if self.or_expression()?.assignable() {
            Ok(())
        } else {
            Err(self.error("cannot assign to expression"))
        }
    }

    /// Comma-separated assignment targets for `for`, `del` and comprehensions.
    fn targets(&mut self) -> Parsed {
        loop {
            self.target()?;
            if !self.eat_op(",") || !self.starts_expression() {
                return Ok(());
            }
        }
    }

    fn comprehension(&mut self) -> Parsed {
        loop {
            self.eat_kw("async");
            self.expect_kw("for", "expected `for`")?;
            self.targets()?;
            self.expect_kw("in", "expected `in`")?;
            self.disjunction()?;
            while self.eat_kw("if") {
                self.disjunction()?;
            }
            if !self.at_comprehension() {
                return Ok(());
            }
        }
    }

    // ---- expressions ----

    fn star_expressions(&mut self) -> Parsed<Expr> {
        let first = self.star_expression()?;
        if !self.at_op(",") {
            return Ok(first);
        }
        let mut assignable = first.assignable();
        while self.eat_op(",") {
            if !self.starts_expression() {
                break;
            }
            assignable &= self.star_expression()?.assignable();
        }
        Ok(Expr::Unpack(assignable))
    }

    fn star_expression(&mut self) -> Parsed<Expr> {
        if self.eat_op("*") {
            let inner = self.or_expression()?;
            return Ok(Expr::Unpack(inner.assignable()));
        }
        self.expression()
    }

    fn star_named_expression(&mut self) -> Parsed<Expr> {
        if self.eat_op("*") {
            let inner = self.or_expression()?;
            return Ok(Expr::Unpack(inner.assignable()));
        }
        self.named_expression()
    }

    fn named_expression(&mut self) -> Parsed<Expr> {
        if matches!(self.peek(), Some(Tok::Name(n)) if !is_keyword(n))
            && self.peek_at(1) == Some(Tok::Op(":="))
        {
            self.bump();
            self.bump();
            self.expression()?;
            return Ok(Expr::Value);
        }
        self.expression()
    }

    fn expression(&mut self) -> Parsed<Expr> {
        if self.eat_kw("lambda") {
            self.parameters(false, ":")?;
            self.expect_op(":", "expected `:`")?;
            self.nested(Self::expression)?;
            return Ok(Expr::Value);
        }
        let value = self.disjunction()?;
        if self.eat_kw("if") {
            self.disjunction()?;
            self.expect_kw("else", "conditional expression needs `else`")?;
            self.nested(Self::expression)?;
            return Ok(Expr::Value);
        }
        Ok(value)
    }

    fn yield_expression(&mut self) -> Parsed {
        self.bump();
        if self.eat_kw("from") {
            self.expression()?;
        } else if self.starts_expression() {
            self.star_expressions()?;
        }
        Ok(())
    }

    fn disjunction(&mut self) -> Parsed<Expr> {
        let mut value = self.conjunction()?;
        while self.eat_kw("or") {
            self.conjunction()?;
            value = Expr::Value;
        }
        Ok(value)
    }

    fn conjunction(&mut self) -> Parsed<Expr> {
        let mut value = self.inversion()?;
        while self.eat_kw("and") {
            self.inversion()?;
            value = Expr::Value;
        }
        Ok(value)
    }

    fn inversion(&mut self) -> Parsed<Expr> {
        if self.eat_kw("not") {
            self.nested(Self::inversion)?;
            return Ok(Expr::Value);
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Parsed<Expr> {
        let mut value = self.or_expression()?;
        loop {
            match self.peek() {
                Some(Tok::Op(op)) if COMPARISON_OPS.contains(&op) => self.bump(),
                Some(Tok::Name("in")) => self.bump(),
                Some(Tok::Name("not")) if self.peek_at(1) == Some(Tok::Name("in")) => {
                    self.bump();
                    self.bump();
                }
                Some(Tok::Name("is")) => {
                    self.bump();
                    self.eat_kw("not");
                }
                _ => return Ok(value),
            }
            self.or_expression()?;
            value = Expr::Value;
        }
    }

    /// Bitwise, shift and arithmetic operators. Precedence does not matter
    /// for validation, so they share one loop.
    fn or_expression(&mut self) -> Parsed<Expr> {
        let mut value = self.unary()?;
        while matches!(self.peek(), Some(Tok::Op(op)) if BINARY_OPS.contains(&op)) {
            self.bump();
            self.unary()?;
            value = Expr::Value;
        }
        Ok(value)
    }

    fn unary(&mut self) -> Parsed<Expr> {
        if matches!(self.peek(), Some(Tok::Op("+" | "-" | "~"))) {
            self.bump();
            self.nested(Self::unary)?;
            return Ok(Expr::Value);
        }
        self.power()
    }

    fn power(&mut self) -> Parsed<Expr> {
        let value = if self.eat_kw("await") {
            self.primary()?;
            Expr::Value
        } else {
            self.primary()?
        };
        if self.eat_op("**") {
            self.nested(Self::unary)?;
            return Ok(Expr::Value);
        }
        Ok(value)
    }

    fn primary(&mut self) -> Parsed<Expr> {
        let mut value = self.atom()?;
        loop {
            if self.eat_op(".") {
                self.name()?;
                value = Expr::Access;
            } else if self.at_op("(") {
                self.nested(Self::call_arguments)?;
                value = Expr::Value;
            } else if self.at_op("[") {
                self.nested(Self::subscript)?;
                value = Expr::Access;
            } else {
                return Ok(value);
            }
        }
    }

    fn atom(&mut self) -> Parsed<Expr> {
        match self.peek() {
            Some(Tok::Name("True" | "False" | "None")) | Some(Tok::Number) | Some(Tok::Op("...")) => {
                self.bump();
                Ok(Expr::Value)
            }
            Some(Tok::Name(name)) if is_keyword(name) => Err(self.error("unexpected keyword")),
            Some(Tok::Name(_)) => {
                self.bump();
                Ok(Expr::Name)
            }
            Some(Tok::Str) => {
                while self.eat(Tok::Str) {}
                Ok(Expr::Value)
            }
            Some(Tok::Op("(")) => self.nested(Self::parenthesized),
            Some(Tok::Op("[")) => self.nested(Self::list),
            Some(Tok::Op("{")) => self.nested(Self::dict_or_set),
            _ => Err(self.error("expected an expression")),
        }
    }

    fn parenthesized(&mut self) -> Parsed<Expr> {
        self.bump();
        if self.eat_op(")") {
            return Ok(Expr::Unpack(true));
        }
        if self.at_kw("yield") {
            self.yield_expression()?;
            self.expect_op(")", "expected `)`")?;
            return Ok(Expr::Value);
        }

        let first = self.star_named_expression()?;
        if self.at_comprehension() {
            self.comprehension()?;
            self.expect_op(")", "expected `)`")?;
            return Ok(Expr::Value);
        }
        if !self.at_op(",") {
            self.expect_op(")", "expected `)`")?;
            return Ok(first);
        }
        let assignable = self.sequence_tail(first)?;
        self.expect_op(")", "expected `)`")?;
        Ok(Expr::Unpack(assignable))
    }

    fn list(&mut self) -> Parsed<Expr> {
        self.bump();
        if self.eat_op("]") {
            return Ok(Expr::Unpack(true));
        }
        let first = self.star_named_expression()?;
        if self.at_comprehension() {
            self.comprehension()?;
            self.expect_op("]", "expected `]`")?;
            return Ok(Expr::Value);
        }
        let assignable = self.sequence_tail(first)?;
        self.expect_op("]", "expected `]`")?;
        Ok(Expr::Unpack(assignable))
    }

    /// Remaining `, element` pairs of a tuple, list or set display.
    fn sequence_tail(&mut self, first: Expr) -> Parsed<bool> {
        let mut assignable = first.assignable();
        while self.eat_op(",") {
            if !self.starts_expression() {
                break;
            }
            assignable &= self.star_named_expression()?.assignable();
        }
        Ok(assignable)
    }

    fn dict_or_set(&mut self) -> Parsed<Expr> {
        self.bump();
        if self.eat_op("}") {
            return Ok(Expr::Value);
        }

        let is_dict = if self.eat_op("**") {
            self.or_expression()?;
            true
        } else {
            self.star_named_expression()?;
            if self.eat_op(":") {
                self.expression()?;
                true
            } else {
                false
            }
        };

        if self.at_comprehension() {
            self.comprehension()?;
        } else if is_dict {
            while self.eat_op(",") {
                if self.at_op("}") {
                    break;
                }
                if self.eat_op("**") {
                    self.or_expression()?;
                } else {
                    self.expression()?;
                    self.expect_op(":", "expected `:`")?;
                    self.expression()?;
                }
            }
        } else {
            self.sequence_tail(Expr::Value)?;
        }
        self.expect_op("}", "expected `}`")?;
        Ok(Expr::Value)
    }

    fn subscript(&mut self) -> Parsed {
        self.bump();
        loop {
            self.slice()?;
            if !self.eat_op(",") || self.at_op("]") {
                break;
            }
        }
        self.expect_op("]", "expected `]`")
    }

    fn slice(&mut self) -> Parsed {
        if self.eat_op("*") {
            self.or_expression()?;
            return Ok(());
        }
        if !self.at_op(":") {
            self.named_expression()?;
        }
        if self.eat_op(":") {
            if !self.at_op(":") && self.starts_expression() {
                self.expression()?;
            }
            if self.eat_op(":") && self.starts_expression() {
                self.expression()?;
            }
        }
        Ok(())
    }
}

fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}
