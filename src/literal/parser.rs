use super::LiteralError;
use serde_json::{Map, Number, Value};

/// Maximum array/object nesting accepted before giving up
pub const MAX_DEPTH: usize = 128;

/// Largest integer a JavaScript number holds exactly (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Parses `src` as exactly one literal, allowing surrounding whitespace and comments
pub fn parse_literal(src: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser::new(src, 0);
    let value = parser.parse_value()?;
    parser.skip_trivia()?;
    if parser.pos < src.len() {
        return Err(LiteralError::TrailingContent { offset: parser.pos });
    }
    Ok(value)
}

/// Parses one literal starting at byte `start` of `src`
///
/// Returns the value and the byte offset just past the literal. Text after
/// the literal is left alone, so the caller decides what may follow it.
/// Error offsets are relative to the start of `src`.
pub fn parse_literal_at(src: &str, start: usize) -> Result<(Value, usize), LiteralError> {
    let mut parser = Parser::new(src, start);
    let value = parser.parse_value()?;
    Ok((value, parser.pos))
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, pos: usize) -> Self {
        Self { src, pos, depth: 0 }
    }

    fn rest(&self) -> &'a str {
        let src = self.src;
        &src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn unexpected(&self) -> LiteralError {
        match self.peek() {
            Some(found) => LiteralError::UnexpectedChar {
                found,
                offset: self.pos,
            },
            None => LiteralError::UnexpectedEnd { offset: self.pos },
        }
    }

    fn skip_trivia(&mut self) -> Result<(), LiteralError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() || c == '\u{feff}' => {
                    self.bump();
                }
                Some('/') => match self.peek_nth(1) {
                    Some('/') => {
                        while let Some(c) = self.bump() {
                            if c == '\n' {
                                break;
                            }
                        }
                    }
                    Some('*') => {
                        let start = self.pos;
                        self.pos += 2;
                        match self.rest().find("*/") {
                            Some(end) => self.pos += end + 2,
                            None => {
                                return Err(LiteralError::UnterminatedComment { offset: start })
                            }
                        }
                    }
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    fn enter(&mut self) -> Result<(), LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(LiteralError::TooDeep {
                limit: MAX_DEPTH,
                offset: self.pos,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        self.skip_trivia()?;
        let offset = self.pos;

        if self.rest().starts_with("...") {
            return Err(LiteralError::NotALiteral {
                text: "...".to_string(),
                offset,
            });
        }

        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd { offset }),
            Some('[') => self.parse_array(),
            Some('{') => self.parse_object(),
            Some(quote @ ('"' | '\'' | '`')) => self.parse_string(quote).map(Value::String),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.parse_number(),
            Some(c) if is_ident_start(c) => self.parse_keyword(),
            Some(found) => Err(LiteralError::UnexpectedChar { found, offset }),
        }
    }

    fn parse_array(&mut self) -> Result<Value, LiteralError> {
        self.enter()?;
        self.bump();

        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(']') => {
                    self.bump();
                    break;
                }
                // Holes (`[1,,2]`) have no JSON counterpart
                Some(',') | None => return Err(self.unexpected()),
                _ => {}
            }

            items.push(self.parse_value()?);

            self.skip_trivia()?;
            if self.eat(',') {
                continue;
            }
            if self.eat(']') {
                break;
            }
            return Err(self.unexpected());
        }

        self.leave();
        Ok(Value::Array(items))
    }

    fn parse_object(&mut self) -> Result<Value, LiteralError> {
        self.enter()?;
        self.bump();

        let mut map = Map::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(',') | None => return Err(self.unexpected()),
                _ => {}
            }

            let key_offset = self.pos;
            let key = self.parse_key()?;

            self.skip_trivia()?;
            if !self.eat(':') {
                // Shorthand properties and methods reference runtime bindings
                return Err(LiteralError::NotALiteral {
                    text: key,
                    offset: key_offset,
                });
            }

            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_trivia()?;
            if self.eat(',') {
                continue;
            }
            if self.eat('}') {
                break;
            }
            return Err(self.unexpected());
        }

        self.leave();
        Ok(Value::Object(map))
    }

    fn parse_key(&mut self) -> Result<String, LiteralError> {
        let offset = self.pos;
        match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_string(quote),
            Some(c) if c.is_ascii_digit() || c == '.' => match self.parse_number()? {
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(LiteralError::UnexpectedChar { found: c, offset }),
            },
            Some(c) if is_ident_start(c) => Ok(self.take_identifier().to_string()),
            Some('[') => Err(LiteralError::NotALiteral {
                text: "[".to_string(),
                offset,
            }),
            _ => Err(self.unexpected()),
        }
    }

    fn take_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.bump();
            } else {
                break;
            }
        }
        let src = self.src;
        &src[start..self.pos]
    }

    fn parse_keyword(&mut self) -> Result<Value, LiteralError> {
        let offset = self.pos;
        match self.take_identifier() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" | "undefined" => Ok(Value::Null),
            other => Err(LiteralError::NotALiteral {
                text: other.to_string(),
                offset,
            }),
        }
    }

    fn parse_string(&mut self, quote: char) -> Result<String, LiteralError> {
        let start = self.pos;
        self.bump();

        let mut out = String::new();
        loop {
            let c = self
                .bump()
                .ok_or(LiteralError::UnterminatedString { offset: start })?;
            match c {
                c if c == quote => return Ok(out),
                '\\' => self.parse_escape(&mut out, start)?,
                '$' if quote == '`' && self.peek() == Some('{') => {
                    return Err(LiteralError::Interpolation {
                        offset: self.pos - 1,
                    })
                }
                '\r' if quote == '`' => {
                    self.eat('\n');
                    out.push('\n');
                }
                '\n' | '\r' if quote != '`' => {
                    return Err(LiteralError::UnterminatedString { offset: start })
                }
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String, start: usize) -> Result<(), LiteralError> {
        let offset = self.pos - 1;
        let c = self
            .bump()
            .ok_or(LiteralError::UnterminatedString { offset: start })?;

        match c {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !self.peek().is_some_and(|c| c.is_ascii_digit()) => out.push('\0'),
            '0'..='9' => return Err(LiteralError::InvalidEscape { offset }),
            'x' => {
                let code = self.read_hex(2, offset)?;
                out.push(char::from_u32(code).ok_or(LiteralError::InvalidEscape { offset })?);
            }
            'u' => out.push(self.read_unicode_escape(offset)?),
            '\r' => {
                self.eat('\n');
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
        Ok(())
    }

    fn read_hex(&mut self, digits: usize, offset: usize) -> Result<u32, LiteralError> {
        let mut code = 0u32;
        for _ in 0..digits {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or(LiteralError::InvalidEscape { offset })?;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn read_unicode_escape(&mut self, offset: usize) -> Result<char, LiteralError> {
        if self.eat('{') {
            let mut code = 0u32;
            let mut digits = 0;
            loop {
                match self.bump() {
                    Some('}') if digits > 0 => break,
                    Some(c) if c.is_ascii_hexdigit() && digits < 6 => {
                        code = code * 16 + c.to_digit(16).unwrap_or(0);
                        digits += 1;
                    }
                    _ => return Err(LiteralError::InvalidEscape { offset }),
                }
            }
            return char::from_u32(code).ok_or(LiteralError::InvalidEscape { offset });
        }

        let high = self.read_hex(4, offset)?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high).ok_or(LiteralError::InvalidEscape { offset });
        }

        // Surrogate pair written as two escapes
        if !self.rest().starts_with("\\u") {
            return Err(LiteralError::InvalidEscape { offset });
        }
        self.pos += 2;
        let low = self.read_hex(4, offset)?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(LiteralError::InvalidEscape { offset });
        }
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(code).ok_or(LiteralError::InvalidEscape { offset })
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let negative = match self.peek() {
            Some('-') => {
                self.bump();
                true
            }
            Some('+') => {
                self.bump();
                false
            }
            _ => false,
        };

        let radix = match (self.peek(), self.peek_nth(1)) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };

        let magnitude = match radix {
            Some(radix) => {
                self.pos += 2;
                let digits_start = self.pos;
                while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
                    self.bump();
                }
                let digits = self.src[digits_start..self.pos].replace('_', "");
                let parsed = u64::from_str_radix(&digits, radix)
                    .map_err(|_| self.invalid_number(start))?;
                parsed as f64
            }
            None => {
                let digits_start = self.pos;
                while let Some(c) = self.peek() {
                    match c {
                        '0'..='9' | '_' | '.' => {
                            self.bump();
                        }
                        'e' | 'E' => {
                            self.bump();
                            if matches!(self.peek(), Some('+' | '-')) {
                                self.bump();
                            }
                        }
                        _ => break,
                    }
                }
                let digits = self.src[digits_start..self.pos].replace('_', "");
                if !digits.bytes().any(|b| b.is_ascii_digit()) {
                    return Err(self.invalid_number(start));
                }
                digits
                    .parse::<f64>()
                    .map_err(|_| self.invalid_number(start))?
            }
        };

        // `10px`, `1n` and friends are not plain numbers
        if self.peek().is_some_and(is_ident_continue) {
            self.take_identifier();
            return Err(self.invalid_number(start));
        }

        let value = if negative { -magnitude } else { magnitude };
        number_value(value).ok_or_else(|| self.invalid_number(start))
    }

    fn invalid_number(&self, start: usize) -> LiteralError {
        LiteralError::InvalidNumber {
            text: self.src[start..self.pos].to_string(),
            offset: start,
        }
    }
}

/// Converts a JavaScript number into its JSON form
///
/// Integral values within the safe integer range become JSON integers, so
/// `1.0` and `1` compare equal the way they do once evaluated.
fn number_value(value: f64) -> Option<Value> {
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        return Some(Value::Number(Number::from(value as i64)));
    }
    Number::from_f64(value).map(Value::Number)
}

fn is_ident_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphanumeric()
}
