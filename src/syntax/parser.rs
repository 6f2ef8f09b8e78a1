//! Recursive-descent parser for stylesheet text
//!
//! Accepts both `name(args)` sugar and the `{:name, meta, args}` tuple form,
//! normalising both into [`Call`]s. Nesting is capped at [`MAX_NESTING`].

use std::collections::BTreeMap;

use super::{Call, Expr, ParseError, ParseResult, StyleSheet};

/// Deepest expression nesting accepted before parsing fails.
pub const MAX_NESTING: usize = 128;

/// Parse stylesheet text into a [`StyleSheet`].
///
/// Empty text (or text holding only whitespace and comments) and `%{}` both
/// produce an empty sheet. Any malformed entry fails the whole sheet.
pub fn parse(source: &str) -> ParseResult<StyleSheet> {
    let (sheet, _) = parse_sheet(source, Recovery::Abort)?;
    Ok(sheet)
}

/// Parse stylesheet text, dropping individual styles that fail to parse.
///
/// Returns the surviving sheet together with one error per dropped style.
/// Damage to the top-level map itself is still fatal.
pub fn parse_lenient(source: &str) -> ParseResult<(StyleSheet, Vec<ParseError>)> {
    parse_sheet(source, Recovery::DropStyle)
}

/// Parse a single expression, e.g. one directive or one argument.
pub fn parse_expression(source: &str) -> ParseResult<Expr> {
    let mut parser = Parser::new(source);
    parser.skip_ws();
    let expr = parser.parse_expr()?;
    parser.skip_ws();
    if !parser.eof() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(expr)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recovery {
    Abort,
    DropStyle,
}

fn parse_sheet(source: &str, recovery: Recovery) -> ParseResult<(StyleSheet, Vec<ParseError>)> {
    let mut parser = Parser::new(source);
    let mut styles = BTreeMap::new();
    let mut dropped = Vec::new();

    parser.skip_ws();
    if parser.eof() {
        return Ok((StyleSheet::default(), dropped));
    }
    if !parser.eat_str("%{") {
        return Err(parser.error("stylesheet must be a `%{...}` map literal"));
    }

    loop {
        parser.skip_ws();
        if parser.eat(b'}') {
            break;
        }
        if parser.eof() {
            return Err(parser.error("unterminated stylesheet map"));
        }

        let name = parser.parse_map_key()?;
        parser.skip_ws();
        let value_start = parser.index;
        let parsed = parser
            .parse_expr()
            .and_then(|value| style_calls(source, value_start, &name, value));

        match parsed {
            Ok(calls) => {
                // Last write wins for duplicate names.
                styles.insert(name, calls);
            }
            Err(err) if recovery == Recovery::DropStyle => {
                parser.index = value_start;
                parser.skip_entry()?;
                dropped.push(err);
            }
            Err(err) => return Err(err),
        }

        parser.skip_ws();
        if parser.eat(b',') {
            continue;
        }
        if parser.eat(b'}') {
            break;
        }
        return Err(parser.error("expected `,` or `}` after style entry"));
    }

    parser.skip_ws();
    if !parser.eof() {
        return Err(parser.error("unexpected trailing input after stylesheet"));
    }
    Ok((StyleSheet::new(styles), dropped))
}

fn style_calls(source: &str, offset: usize, name: &str, value: Expr) -> ParseResult<Vec<Call>> {
    let Expr::List(items) = value else {
        return Err(ParseError::at(
            source,
            offset,
            format!(
                "style `{}` must be a list of calls, found {}",
                name,
                value.kind_name()
            ),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Expr::Call(call) => Ok(call),
            other => Err(ParseError::at(
                source,
                offset,
                format!(
                    "entry {} of style `{}` is a {}, expected a call",
                    idx,
                    name,
                    other.kind_name()
                ),
            )),
        })
        .collect()
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    index: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            index: 0,
            depth: 0,
        }
    }

    fn eof(&self) -> bool {
        self.index >= self.bytes.len()
    }

    fn current(&self) -> Option<u8> {
        self.bytes.get(self.index).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.index + ahead).copied()
    }

    fn advance(&mut self) {
        if self.index < self.bytes.len() {
            self.index += 1;
        }
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        if self.bytes[self.index..].starts_with(expected.as_bytes()) {
            self.index += expected.len();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.current() {
            if ch.is_ascii_whitespace() {
                self.advance();
            } else if ch == b'#' {
                while let Some(ch) = self.current() {
                    self.advance();
                    if ch == b'\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn parse_expr(&mut self) -> ParseResult<Expr> {
        if self.depth >= MAX_NESTING {
            return Err(self.error("expression nested too deeply"));
        }
        self.depth += 1;
        let expr = self.parse_nested();
        self.depth -= 1;
        expr
    }

    fn parse_nested(&mut self) -> ParseResult<Expr> {
        self.skip_ws();
        let Some(ch) = self.current() else {
            return Err(self.error("unexpected end of input"));
        };

        let expr = match ch {
            b'%' => self.parse_map()?,
            b'[' => self.parse_list()?,
            b'{' => self.parse_tuple()?,
            b'"' | b'\'' => Expr::String(self.parse_string()?),
            b':' => self.parse_atom()?,
            b'-' | b'0'..=b'9' => self.parse_number()?,
            b'.' => self.parse_implicit_chain()?,
            c if is_ident_start(c) => self.parse_word()?,
            _ => {
                let found = self.src[self.index..].chars().next().unwrap_or('?');
                return Err(self.error(&format!("unexpected character `{}`", found)));
            }
        };

        // `a..b` range sugar; `...` is never a range.
        if self.bytes[self.index..].starts_with(b"..") && self.peek_at(2) != Some(b'.') {
            self.index += 2;
            let upper = self.parse_expr()?;
            return Ok(Expr::Call(Call::new("..", vec![expr, upper])));
        }
        Ok(expr)
    }

    fn parse_map(&mut self) -> ParseResult<Expr> {
        if !self.eat_str("%{") {
            return Err(self.error("expected `%{`"));
        }
        let mut entries = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(b'}') {
                break;
            }
            if self.eof() {
                return Err(self.error("unterminated map literal"));
            }
            let key = self.parse_map_key()?;
            let value = self.parse_expr()?;
            entries.push((key, value));
            self.skip_ws();
            if self.eat(b',') {
                continue;
            }
            if self.eat(b'}') {
                break;
            }
            return Err(self.error("expected `,` or `}` in map literal"));
        }
        Ok(Expr::Map(entries))
    }

    /// Either `key: ` keyword form or `expr =>` arrow form.
    fn parse_map_key(&mut self) -> ParseResult<String> {
        if let Some(key) = self.try_keyword_key() {
            return Ok(key);
        }
        let start = self.index;
        let key = self.parse_expr()?;
        self.skip_ws();
        if !self.eat_str("=>") {
            return Err(self.error("expected `=>` after map key"));
        }
        match key {
            Expr::String(text) | Expr::Atom(text) => Ok(text),
            other => Err(self.error_at(
                start,
                &format!("map keys must be strings or atoms, found {}", other.kind_name()),
            )),
        }
    }

    /// Recognise `name: ` or `"name": ` without consuming anything otherwise.
    fn try_keyword_key(&mut self) -> Option<String> {
        let start = self.index;
        let key = match self.current()? {
            c if is_ident_start(c) => self.ident().to_string(),
            b'"' | b'\'' => match self.parse_string() {
                Ok(text) => text,
                Err(_) => {
                    self.index = start;
                    return None;
                }
            },
            _ => return None,
        };

        let followed_by_space = self
            .peek_at(1)
            .map(|ch| ch.is_ascii_whitespace())
            .unwrap_or(true);
        if self.current() == Some(b':') && followed_by_space {
            self.advance();
            Some(key)
        } else {
            self.index = start;
            None
        }
    }

    fn parse_list(&mut self) -> ParseResult<Expr> {
        self.advance(); // consume '['
        let (items, pairs) = self.parse_items(b']', "list")?;
        if items.is_empty() && !pairs.is_empty() {
            return Ok(Expr::Map(pairs));
        }
        Ok(Expr::List(collapse(items, pairs)))
    }

    fn parse_tuple(&mut self) -> ParseResult<Expr> {
        let start = self.index;
        self.advance(); // consume '{'
        let (items, pairs) = self.parse_items(b'}', "tuple")?;
        let items = collapse(items, pairs);
        self.normalize_tuple(start, items)
    }

    fn parse_call_args(&mut self) -> ParseResult<Vec<Expr>> {
        self.advance(); // consume '('
        let (items, pairs) = self.parse_items(b')', "argument list")?;
        Ok(collapse(items, pairs))
    }

    /// Comma separated items; `key: value` pairs may only trail.
    fn parse_items(
        &mut self,
        close: u8,
        context: &str,
    ) -> ParseResult<(Vec<Expr>, Vec<(String, Expr)>)> {
        let mut items = Vec::new();
        let mut pairs = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(close) {
                break;
            }
            if self.eof() {
                return Err(self.error(&format!("unterminated {}", context)));
            }

            if let Some(key) = self.try_keyword_key() {
                let value = self.parse_expr()?;
                pairs.push((key, value));
            } else {
                if !pairs.is_empty() {
                    return Err(self.error("keyword arguments must come last"));
                }
                items.push(self.parse_expr()?);
            }

            self.skip_ws();
            if self.eat(b',') {
                continue;
            }
            if self.eat(close) {
                break;
            }
            return Err(self.error(&format!(
                "expected `,` or `{}` in {}",
                close as char, context
            )));
        }
        Ok((items, pairs))
    }

    fn normalize_tuple(&self, start: usize, items: Vec<Expr>) -> ParseResult<Expr> {
        if items.len() != 3 {
            return Ok(Expr::Tuple(items));
        }
        let mut parts = items.into_iter();
        let (Some(head), Some(meta), Some(args)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(self.error_at(start, "malformed tuple"));
        };

        let (Some(meta_pairs), Some(call_args)) = (call_meta(&meta), call_args(&args)) else {
            return Ok(Expr::Tuple(vec![head, meta, args]));
        };

        match head {
            Expr::Atom(name) if name == "." => match dot_chain(call_args) {
                Some(chain) => Ok(Expr::Dot(chain)),
                None => Ok(Expr::Tuple(vec![Expr::Atom(name), meta, args])),
            },
            Expr::Atom(name) if name == "__aliases__" => {
                if call_args.iter().all(|arg| matches!(arg, Expr::Atom(_))) {
                    Ok(Expr::Dot(call_args))
                } else {
                    Ok(Expr::Tuple(vec![Expr::Atom(name), meta, args]))
                }
            }
            Expr::Atom(name) => Ok(Expr::Call(Call {
                name,
                meta: meta_pairs,
                args: call_args,
            })),
            Expr::Dot(chain) => match dotted_name(&chain) {
                Some(name) => Ok(Expr::Call(Call {
                    name,
                    meta: meta_pairs,
                    args: call_args,
                })),
                None => Ok(Expr::Tuple(vec![Expr::Dot(chain), meta, args])),
            },
            other => Ok(Expr::Tuple(vec![other, meta, args])),
        }
    }

    fn parse_string(&mut self) -> ParseResult<String> {
        let start = self.index;
        let quote = match self.current() {
            Some(q @ (b'"' | b'\'')) => q as char,
            _ => return Err(self.error("expected string literal")),
        };
        self.advance();

        let mut buf = String::new();
        loop {
            let Some(ch) = self.src[self.index..].chars().next() else {
                return Err(self.error_at(start, "unterminated string literal"));
            };
            self.index += ch.len_utf8();
            match ch {
                c if c == quote => return Ok(buf),
                '\\' => {
                    let Some(escaped) = self.src[self.index..].chars().next() else {
                        return Err(self.error("incomplete escape"));
                    };
                    self.index += escaped.len_utf8();
                    let value = match escaped {
                        '"' => '"',
                        '\'' => '\'',
                        '\\' => '\\',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        '0' => '\0',
                        'u' => self.parse_unicode_escape()?,
                        other => {
                            return Err(self.error(&format!("unknown escape: \\{}", other)));
                        }
                    };
                    buf.push(value);
                }
                c => buf.push(c),
            }
        }
    }

    /// `\u{1F600}` or `é`.
    fn parse_unicode_escape(&mut self) -> ParseResult<char> {
        let braced = self.eat(b'{');
        let start = self.index;
        while self.current().is_some_and(|ch| ch.is_ascii_hexdigit()) {
            self.advance();
        }
        let digits = &self.src[start..self.index];
        if braced && !self.eat(b'}') {
            return Err(self.error("unterminated unicode escape"));
        }
        if digits.is_empty() || (!braced && digits.len() != 4) {
            return Err(self.error("invalid unicode escape"));
        }
        u32::from_str_radix(digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error("invalid unicode scalar value"))
    }

    fn parse_atom(&mut self) -> ParseResult<Expr> {
        self.advance(); // consume ':'
        match self.current() {
            Some(b'"' | b'\'') => Ok(Expr::Atom(self.parse_string()?)),
            Some(ch) if is_ident_start(ch) => Ok(Expr::Atom(self.ident().to_string())),
            Some(ch) if is_operator_char(ch) => {
                let start = self.index;
                while self.current().is_some_and(is_operator_char) {
                    self.advance();
                }
                Ok(Expr::Atom(self.src[start..self.index].to_string()))
            }
            _ => Err(self.error("empty atom")),
        }
    }

    fn parse_number(&mut self) -> ParseResult<Expr> {
        let start = self.index;
        let negative = self.eat(b'-');
        if !self.current().is_some_and(|ch| ch.is_ascii_digit()) {
            return Err(self.error_at(start, "unexpected `-`"));
        }

        if self.current() == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X')) {
            self.index += 2;
            let digits_start = self.index;
            while self
                .current()
                .is_some_and(|ch| ch.is_ascii_hexdigit() || ch == b'_')
            {
                self.advance();
            }
            let digits: String = self.src[digits_start..self.index]
                .chars()
                .filter(|ch| *ch != '_')
                .collect();
            if digits.is_empty() {
                return Err(self.error("expected hex digits after `0x`"));
            }
            let value = i64::from_str_radix(&digits, 16)
                .map_err(|_| self.error_at(start, "hex literal out of range"))?;
            let value = if negative { -value } else { value };
            return self.unit_suffix(Expr::Integer(value));
        }

        self.digits();
        let mut is_float = false;
        if self.current() == Some(b'.') && self.peek_at(1).is_some_and(|ch| ch.is_ascii_digit()) {
            is_float = true;
            self.advance();
            self.digits();
            if matches!(self.current(), Some(b'e' | b'E')) {
                let signed = matches!(self.peek_at(1), Some(b'+' | b'-'));
                let digit_at = if signed { 2 } else { 1 };
                if self.peek_at(digit_at).is_some_and(|ch| ch.is_ascii_digit()) {
                    self.index += digit_at;
                    self.digits();
                }
            }
        }

        let text: String = self.src[start..self.index]
            .chars()
            .filter(|ch| *ch != '_')
            .collect();
        let literal = if is_float {
            text.parse::<f64>()
                .map(Expr::Float)
                .map_err(|_| self.error_at(start, "invalid float literal"))?
        } else {
            text.parse::<i64>()
                .map(Expr::Integer)
                .map_err(|_| self.error_at(start, "integer literal out of range"))?
        };
        self.unit_suffix(literal)
    }

    /// `10.dp` style unit suffix on a numeric literal.
    fn unit_suffix(&mut self, literal: Expr) -> ParseResult<Expr> {
        if self.current() == Some(b'.') && self.peek_at(1).is_some_and(is_ident_start) {
            self.advance();
            let unit = self.ident().to_string();
            return Ok(Expr::Dot(vec![literal, Expr::Atom(unit)]));
        }
        Ok(literal)
    }

    fn digits(&mut self) {
        while self
            .current()
            .is_some_and(|ch| ch.is_ascii_digit() || ch == b'_')
        {
            self.advance();
        }
    }

    fn parse_word(&mut self) -> ParseResult<Expr> {
        let first = self.ident().to_string();
        let continues = self.current() == Some(b'.') && self.peek_at(1).is_some_and(is_ident_start);
        if !continues && self.current() != Some(b'(') {
            return Ok(match first.as_str() {
                "true" => Expr::Boolean(true),
                "false" => Expr::Boolean(false),
                "nil" => Expr::Nil,
                _ => Expr::Atom(first),
            });
        }
        let mut segments = vec![first];
        self.chain_segments(&mut segments);
        self.finish_chain(segments)
    }

    /// `.red` or `.rounded(4)`: a chain with an implicit receiver.
    fn parse_implicit_chain(&mut self) -> ParseResult<Expr> {
        if !self.peek_at(1).is_some_and(is_ident_start) {
            return Err(self.error("expected a name after `.`"));
        }
        self.advance();
        let mut segments = vec![self.ident().to_string()];
        self.chain_segments(&mut segments);
        self.finish_chain(segments)
    }

    fn chain_segments(&mut self, segments: &mut Vec<String>) {
        while self.current() == Some(b'.') && self.peek_at(1).is_some_and(is_ident_start) {
            self.advance();
            segments.push(self.ident().to_string());
        }
    }

    fn finish_chain(&mut self, segments: Vec<String>) -> ParseResult<Expr> {
        if self.current() == Some(b'(') {
            let args = self.parse_call_args()?;
            return Ok(Expr::Call(Call::new(segments.join("."), args)));
        }
        Ok(Expr::Dot(segments.into_iter().map(Expr::Atom).collect()))
    }

    fn ident(&mut self) -> &'a str {
        let src = self.src;
        let start = self.index;
        while self.current().is_some_and(is_ident_char) {
            self.advance();
        }
        if matches!(self.current(), Some(b'?' | b'!')) {
            self.advance();
        }
        &src[start..self.index]
    }

    /// Skip one malformed style value, stopping before the `,` or `}` that ends it.
    fn skip_entry(&mut self) -> ParseResult<()> {
        let start = self.index;
        if self.skip_balanced() {
            return Ok(());
        }
        // Brackets inside the broken value do not balance; look for the next key instead.
        self.index = start;
        self.skip_to_next_key(start)
    }

    fn skip_balanced(&mut self) -> bool {
        let mut depth = 0usize;
        while let Some(ch) = self.current() {
            match ch {
                b'"' | b'\'' => {
                    if self.parse_string().is_err() {
                        return false;
                    }
                    continue;
                }
                b'#' => {
                    self.skip_ws();
                    continue;
                }
                b'[' | b'{' | b'(' => depth += 1,
                b',' | b'}' if depth == 0 => return true,
                b']' | b')' if depth == 0 => return false,
                b']' | b'}' | b')' => depth -= 1,
                _ => {}
            }
            self.advance();
        }
        false
    }

    fn skip_to_next_key(&mut self, start: usize) -> ParseResult<()> {
        while let Some(ch) = self.current() {
            match ch {
                b'"' | b'\'' => {
                    if self.parse_string().is_err() {
                        break;
                    }
                    continue;
                }
                b',' if self.entry_follows(self.index + 1) => return Ok(()),
                _ => {}
            }
            self.advance();
        }
        match self.src[start..].rfind('}') {
            Some(pos) => {
                self.index = start + pos;
                Ok(())
            }
            None => Err(self.error_at(start, "unterminated style entry")),
        }
    }

    /// True when `"name" =>` starts at `offset` (after whitespace).
    fn entry_follows(&self, offset: usize) -> bool {
        let mut lookahead = Parser {
            src: self.src,
            bytes: self.bytes,
            index: offset,
            depth: 0,
        };
        lookahead.skip_ws();
        if !matches!(lookahead.current(), Some(b'"' | b'\'')) || lookahead.parse_string().is_err() {
            return false;
        }
        lookahead.skip_ws();
        lookahead.bytes[lookahead.index..].starts_with(b"=>")
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError::at(self.src, self.index, message)
    }

    fn error_at(&self, offset: usize, message: &str) -> ParseError {
        ParseError::at(self.src, offset, message)
    }
}

/// Trailing keyword pairs become one trailing map element.
fn collapse(mut items: Vec<Expr>, pairs: Vec<(String, Expr)>) -> Vec<Expr> {
    if !pairs.is_empty() {
        items.push(Expr::Map(pairs));
    }
    items
}

fn call_meta(meta: &Expr) -> Option<Vec<(String, Expr)>> {
    match meta {
        Expr::List(items) if items.is_empty() => Some(Vec::new()),
        Expr::Map(pairs) => Some(pairs.clone()),
        Expr::Nil => Some(Vec::new()),
        _ => None,
    }
}

fn call_args(args: &Expr) -> Option<Vec<Expr>> {
    match args {
        Expr::List(items) => Some(items.clone()),
        Expr::Map(pairs) => Some(vec![Expr::Map(pairs.clone())]),
        _ => None,
    }
}

/// `{:., _, [lhs, :member]}` flattened into a chain.
fn dot_chain(mut args: Vec<Expr>) -> Option<Vec<Expr>> {
    if args.len() != 2 {
        return None;
    }
    let member = args.pop()?;
    let receiver = args.pop()?;
    if !matches!(member, Expr::Atom(_)) {
        return None;
    }
    let mut chain = match receiver {
        Expr::Nil => Vec::new(),
        Expr::Dot(chain) => chain,
        other => vec![other],
    };
    chain.push(member);
    Some(chain)
}

fn dotted_name(chain: &[Expr]) -> Option<String> {
    let segments = chain
        .iter()
        .map(|segment| match segment {
            Expr::Atom(name) => Some(name.as_str()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(segments.join("."))
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_ident_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

fn is_operator_char(ch: u8) -> bool {
    matches!(
        ch,
        b'.' | b'+' | b'-' | b'*' | b'/' | b'<' | b'>' | b'=' | b'|' | b'&' | b'!' | b'^' | b'~'
    )
}
