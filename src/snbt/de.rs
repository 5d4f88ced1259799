//! Recursive-descent reader turning SNBT text back into a [`Value`] tree.

use std::fmt::Display;

use crate::{
    error::{Error, Result},
    snbt::{is_bare_byte, parser},
    value::Compound,
    Value,
};

/// Single-pass cursor over the input. Whitespace is insignificant between
/// any two tokens. Every error carries the byte offset it was raised at.
pub(crate) struct SnbtReader<'a> {
    input: &'a str,
    cursor: usize,
    depth_limit: usize,
}

impl<'a> SnbtReader<'a> {
    pub(crate) fn new(input: &'a str, depth_limit: usize) -> Self {
        Self {
            input,
            cursor: 0,
            depth_limit,
        }
    }

    pub(crate) fn read_document(mut self) -> Result<Value> {
        self.skip_whitespace();
        let value = self.read_value(0)?;
        self.skip_whitespace();
        if self.cursor != self.input.len() {
            return Err(self.err("trailing data after value"));
        }
        Ok(value)
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.cursor).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.cursor + offset).copied()
    }

    fn bump(&mut self) {
        self.cursor += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.bump();
        }
    }

    fn err(&self, msg: impl Display) -> Error {
        Error::syntax(msg, self.cursor)
    }

    fn err_at(&self, msg: impl Display, offset: usize) -> Error {
        Error::syntax(msg, offset)
    }

    fn unexpected(&self, expected: &str) -> Error {
        match self.input[self.cursor..].chars().next() {
            Some(c) => self.err(format!("unexpected character '{}', expected {}", c, expected)),
            None => self.err(format!("unexpected end of input, expected {}", expected)),
        }
    }

    fn expect(&mut self, want: u8, expected: &str) -> Result<()> {
        if self.peek() == Some(want) {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn read_value(&mut self, depth: usize) -> Result<Value> {
        match self.peek() {
            Some(b'{') => self.read_compound(depth),
            Some(b'[') => self.read_sequence(depth),
            Some(b'"') | Some(b'\'') => Ok(Value::String(self.read_quoted()?)),
            _ => {
                let token = self.read_bare_token("a value")?;
                Ok(parser::classify(token).unwrap_or_else(|| Value::String(token.to_owned())))
            }
        }
    }

    /// Maximal run of bytes in the bare class `[A-Za-z0-9._+-]`.
    fn read_bare_token(&mut self, expected: &str) -> Result<&'a str> {
        let start = self.cursor;
        while let Some(b) = self.peek() {
            if !is_bare_byte(b) {
                break;
            }
            self.bump();
        }
        if self.cursor == start {
            return Err(self.unexpected(expected));
        }
        Ok(&self.input[start..self.cursor])
    }

    fn read_key(&mut self) -> Result<String> {
        match self.peek() {
            Some(b'"') | Some(b'\'') => self.read_quoted(),
            _ => Ok(self.read_bare_token("a key")?.to_owned()),
        }
    }

    fn read_compound(&mut self, depth: usize) -> Result<Value> {
        if depth >= self.depth_limit {
            return Err(Error::depth_exceeded(self.depth_limit));
        }
        self.bump(); // {
        let mut compound = Compound::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.bump();
            return Ok(Value::Compound(compound));
        }
        loop {
            self.skip_whitespace();
            let key = self.read_key()?;
            self.skip_whitespace();
            self.expect(b':', "':'")?;
            self.skip_whitespace();
            let value = self.read_value(depth + 1)?;
            // Duplicate keys: the last value wins, the first position is
            // kept, so the uniqueness invariant holds.
            compound.insert(key, value);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.bump();
                    self.skip_whitespace();
                    if self.peek() == Some(b'}') {
                        return Err(self.err("trailing comma before '}'"));
                    }
                }
                Some(b'}') => {
                    self.bump();
                    return Ok(Value::Compound(compound));
                }
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }
    }

    fn read_sequence(&mut self, depth: usize) -> Result<Value> {
        if depth >= self.depth_limit {
            return Err(Error::depth_exceeded(self.depth_limit));
        }
        self.bump(); // [
        // The `;` must immediately follow the type letter, otherwise this is
        // a list whose first element happens to start with that letter.
        match (self.peek(), self.peek_at(1)) {
            (Some(b'B'), Some(b';')) => {
                self.bump();
                self.bump();
                self.read_byte_array()
            }
            (Some(b'I'), Some(b';')) => {
                self.bump();
                self.bump();
                self.read_int_array()
            }
            (Some(b'L'), Some(b';')) => Err(self.err("unsupported array type 'L'")),
            _ => self.read_list(depth),
        }
    }

    fn read_list(&mut self, depth: usize) -> Result<Value> {
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.bump();
            return Ok(Value::List(items));
        }
        loop {
            self.skip_whitespace();
            items.push(self.read_value(depth + 1)?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.bump();
                    self.skip_whitespace();
                    if self.peek() == Some(b']') {
                        return Err(self.err("trailing comma before ']'"));
                    }
                }
                Some(b']') => {
                    self.bump();
                    return Ok(Value::List(items));
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }
    }

    fn read_byte_array(&mut self) -> Result<Value> {
        let items = self.read_array_elements("a byte literal", |token| {
            parser::byte_array_element(token)
        })?;
        Ok(Value::ByteArray(items))
    }

    fn read_int_array(&mut self) -> Result<Value> {
        let items = self.read_array_elements("an int literal", |token| {
            parser::int_array_element(token)
        })?;
        Ok(Value::IntArray(items))
    }

    fn read_array_elements<T>(
        &mut self,
        expected: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.bump();
            return Ok(items);
        }
        loop {
            self.skip_whitespace();
            let start = self.cursor;
            let token = self.read_bare_token(expected)?;
            match parse(token) {
                Some(v) => items.push(v),
                None => {
                    return Err(self.err_at(
                        format!("'{}' is not {}", token, expected),
                        start,
                    ))
                }
            }
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.bump();
                    self.skip_whitespace();
                    if self.peek() == Some(b']') {
                        return Err(self.err("trailing comma before ']'"));
                    }
                }
                Some(b']') => {
                    self.bump();
                    return Ok(items);
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }
    }

    fn read_quoted(&mut self) -> Result<String> {
        let open = self.cursor;
        let quote = self.input.as_bytes()[self.cursor];
        self.bump();
        let mut out = String::new();
        loop {
            let c = match self.input[self.cursor..].chars().next() {
                Some(c) => c,
                None => return Err(self.err_at("unterminated quoted string", open)),
            };
            if c == char::from(quote) {
                self.bump();
                return Ok(out);
            }
            if c == '\\' {
                self.bump();
                self.read_escape(&mut out)?;
            } else {
                out.push(c);
                self.cursor += c.len_utf8();
            }
        }
    }

    fn read_escape(&mut self, out: &mut String) -> Result<()> {
        let escape_pos = self.cursor - 1;
        let c = match self.input[self.cursor..].chars().next() {
            Some(c) => c,
            None => return Err(self.err_at("unterminated quoted string", escape_pos)),
        };
        self.cursor += c.len_utf8();
        match c {
            '"' | '\'' | '\\' | '/' => out.push(c),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let hi = self.read_hex4(escape_pos)?;
                let scalar = if (0xd800..=0xdbff).contains(&hi) {
                    if self.peek() != Some(b'\\') || self.peek_at(1) != Some(b'u') {
                        return Err(
                            self.err_at("unpaired surrogate in \\u escape", escape_pos)
                        );
                    }
                    self.bump();
                    self.bump();
                    let lo = self.read_hex4(escape_pos)?;
                    if !(0xdc00..=0xdfff).contains(&lo) {
                        return Err(
                            self.err_at("invalid low surrogate in \\u escape", escape_pos)
                        );
                    }
                    0x10000 + (((hi as u32 - 0xd800) << 10) | (lo as u32 - 0xdc00))
                } else if (0xdc00..=0xdfff).contains(&hi) {
                    return Err(self.err_at("unpaired surrogate in \\u escape", escape_pos));
                } else {
                    hi as u32
                };
                let c = char::from_u32(scalar)
                    .ok_or_else(|| self.err_at("invalid \\u escape", escape_pos))?;
                out.push(c);
            }
            other => {
                return Err(
                    self.err_at(format!("invalid escape character '{}'", other), escape_pos)
                )
            }
        }
        Ok(())
    }

    fn read_hex4(&mut self, escape_pos: usize) -> Result<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let digit = self
                .peek()
                .and_then(|b| char::from(b).to_digit(16))
                .ok_or_else(|| self.err_at("expected four hex digits in \\u escape", escape_pos))?;
            value = (value << 4) | digit as u16;
            self.bump();
        }
        Ok(value)
    }
}
