//! The nested-table text format used by saved-variables files.
//!
//! A document is a single `Name = { ... }` assignment. Tables hold
//! `["key"] = value,` entries where keys are quoted strings or integers
//! and values are integers, quoted strings, booleans, or nested tables.
//! The writer and the recursive-descent parser live side by side so the
//! generator and both validators agree on the format exactly.

use crate::error::{RaffleError, RaffleResult};
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq)]
pub enum LuaKey {
    Str(String),
    Index(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LuaValue {
    Int(i64),
    Str(String),
    Bool(bool),
    Table(LuaTable),
}

impl LuaValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&LuaTable> {
        match self {
            Self::Table(v) => Some(v),
            _ => None,
        }
    }
}

/// Insertion-ordered table. Entry order is part of the format contract.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LuaTable {
    pub entries: Vec<(LuaKey, LuaValue)>,
}

impl LuaTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str_key(&mut self, key: &str, value: LuaValue) {
        self.entries.push((LuaKey::Str(key.to_string()), value));
    }

    pub fn push_index(&mut self, index: i64, value: LuaValue) {
        self.entries.push((LuaKey::Index(index), value));
    }

    /// First value stored under a string key.
    pub fn get(&self, key: &str) -> Option<&LuaValue> {
        self.entries.iter().find_map(|(k, v)| match k {
            LuaKey::Str(s) if s == key => Some(v),
            _ => None,
        })
    }

    /// Values stored under integer keys, in entry order.
    pub fn indexed_values(&self) -> impl Iterator<Item = &LuaValue> {
        self.entries.iter().filter_map(|(k, v)| match k {
            LuaKey::Index(_) => Some(v),
            _ => None,
        })
    }

    /// String-keyed entries, in entry order.
    pub fn str_entries(&self) -> impl Iterator<Item = (&str, &LuaValue)> {
        self.entries.iter().filter_map(|(k, v)| match k {
            LuaKey::Str(s) => Some((s.as_str(), v)),
            _ => None,
        })
    }
}

// ── Writer ─────────────────────────────────────────────────────────

/// Render a full document: `NAME =` on its own line, then the root table.
pub fn render_document(name: &str, root: &LuaTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{name} =");
    render_table(&mut out, root, 0);
    out.push('\n');
    out
}

fn render_table(out: &mut String, table: &LuaTable, indent: usize) {
    if table.entries.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push('{');
    for (key, value) in &table.entries {
        out.push('\n');
        push_indent(out, indent + 1);
        match key {
            LuaKey::Str(s) => {
                out.push_str("[\"");
                escape_into(out, s);
                out.push_str("\"]");
            }
            LuaKey::Index(i) => {
                let _ = write!(out, "[{i}]");
            }
        }
        out.push_str(" = ");
        render_value(out, value, indent + 1);
        out.push(',');
    }
    out.push('\n');
    push_indent(out, indent);
    out.push('}');
}

fn render_value(out: &mut String, value: &LuaValue, indent: usize) {
    match value {
        LuaValue::Int(v) => {
            let _ = write!(out, "{v}");
        }
        LuaValue::Str(v) => {
            out.push('"');
            escape_into(out, v);
            out.push('"');
        }
        LuaValue::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
        LuaValue::Table(v) => render_table(out, v, indent),
    }
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("    ");
    }
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
}

// ── Parser ─────────────────────────────────────────────────────────

/// Parse a full document, returning the top-level variable name and the
/// root table. Trailing non-whitespace after the root table is an error.
pub fn parse_document(input: &str) -> RaffleResult<(String, LuaTable)> {
    let mut parser = Parser::new(input);
    parser.skip_ws();
    let name = parser.ident()?;
    parser.skip_ws();
    parser.expect('=')?;
    parser.skip_ws();
    let root = parser.table()?;
    parser.skip_ws();
    if parser.peek().is_some() {
        return Err(parser.err("trailing characters after document"));
    }
    Ok((name, root))
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.bump();
        }
    }

    fn err(&self, message: impl Into<String>) -> RaffleError {
        RaffleError::Parse {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn expect(&mut self, wanted: char) -> RaffleResult<()> {
        match self.peek() {
            Some(c) if c == wanted => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.err(format!("expected '{wanted}', found '{c}'"))),
            None => Err(self.err(format!("expected '{wanted}', found end of input"))),
        }
    }

    fn ident(&mut self) -> RaffleResult<String> {
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            Some(c) => return Err(self.err(format!("expected identifier, found '{c}'"))),
            None => return Err(self.err("expected identifier, found end of input")),
        }
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Ok(name)
    }

    fn table(&mut self) -> RaffleResult<LuaTable> {
        self.expect('{')?;
        let mut table = LuaTable::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(table);
                }
                Some('[') => {
                    self.bump();
                    self.skip_ws();
                    let key = match self.peek() {
                        Some('"') => LuaKey::Str(self.string()?),
                        Some(c) if c == '-' || c.is_ascii_digit() => {
                            LuaKey::Index(self.integer()?)
                        }
                        Some(c) => return Err(self.err(format!("expected table key, found '{c}'"))),
                        None => return Err(self.err("unexpected end of input inside table key")),
                    };
                    self.skip_ws();
                    self.expect(']')?;
                    self.skip_ws();
                    self.expect('=')?;
                    self.skip_ws();
                    let value = self.value()?;
                    self.skip_ws();
                    if self.peek() == Some(',') {
                        self.bump();
                    }
                    table.entries.push((key, value));
                }
                Some(c) => {
                    return Err(self.err(format!("expected '[' or '}}', found '{c}'")));
                }
                None => {
                    return Err(self.err("unexpected end of input inside table (missing '}')"));
                }
            }
        }
    }

    fn value(&mut self) -> RaffleResult<LuaValue> {
        match self.peek() {
            Some('"') => Ok(LuaValue::Str(self.string()?)),
            Some('{') => Ok(LuaValue::Table(self.table()?)),
            Some(c) if c == '-' || c.is_ascii_digit() => Ok(LuaValue::Int(self.integer()?)),
            Some(c) if c.is_ascii_alphabetic() => {
                let word = self.ident()?;
                match word.as_str() {
                    "true" => Ok(LuaValue::Bool(true)),
                    "false" => Ok(LuaValue::Bool(false)),
                    other => Err(self.err(format!("unexpected bare word '{other}'"))),
                }
            }
            Some(c) => Err(self.err(format!("expected value, found '{c}'"))),
            None => Err(self.err("expected value, found end of input")),
        }
    }

    fn string(&mut self) -> RaffleResult<String> {
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('\\') => out.push('\\'),
                    Some('"') => out.push('"'),
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some(c) => return Err(self.err(format!("unknown escape '\\{c}'"))),
                    None => return Err(self.err("unterminated string")),
                },
                Some('\n') => return Err(self.err("unescaped newline in string")),
                Some(c) => out.push(c),
                None => return Err(self.err("unterminated string")),
            }
        }
    }

    fn integer(&mut self) -> RaffleResult<i64> {
        let negative = if self.peek() == Some('-') {
            self.bump();
            true
        } else {
            false
        };
        let mut value: i64 = 0;
        let mut digits = 0usize;
        while let Some(c) = self.peek() {
            let Some(digit) = c.to_digit(10) else { break };
            self.bump();
            digits += 1;
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit as i64))
                .ok_or_else(|| self.err("integer literal overflows 64 bits"))?;
        }
        if digits == 0 {
            return Err(self.err("expected digits in integer literal"));
        }
        Ok(if negative { -value } else { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> LuaTable {
        let mut inner = LuaTable::new();
        inner.push_str_key("amount", LuaValue::Int(5000));
        inner.push_str_key("subject", LuaValue::Str("tix \"please\"".into()));
        inner.push_index(1, LuaValue::Bool(true));

        let mut root = LuaTable::new();
        root.push_str_key("child", LuaValue::Table(inner));
        root.push_str_key("count", LuaValue::Int(-3));
        root
    }

    #[test]
    fn render_then_parse_round_trips() {
        let root = sample_table();
        let text = render_document("TestVars", &root);
        let (name, parsed) = parse_document(&text).unwrap();
        assert_eq!(name, "TestVars");
        assert_eq!(parsed, root);
    }

    #[test]
    fn strings_with_special_characters_round_trip() {
        let mut root = LuaTable::new();
        root.push_str_key(
            "body",
            LuaValue::Str("line1\r\nline2\ttab \"quote\" back\\slash".into()),
        );
        let text = render_document("V", &root);
        assert!(
            !text.contains("line1\r"),
            "raw CR must not appear in rendered output"
        );
        let (_, parsed) = parse_document(&text).unwrap();
        assert_eq!(parsed, root);
    }

    #[test]
    fn missing_closing_brace_reports_position() {
        let text = "V =\n{\n    [\"a\"] = 1,\n";
        let err = parse_document(text).unwrap_err();
        match err {
            RaffleError::Parse { line, message, .. } => {
                assert_eq!(line, 4, "EOF is on line 4");
                assert!(message.contains("missing '}'"), "message was: {message}");
            }
            other => panic!("expected Parse error, got {other}"),
        }
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let text = "V = { [\"a\"] = \"oops }";
        assert!(matches!(
            parse_document(text),
            Err(RaffleError::Parse { .. })
        ));
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        let text = "V = {} extra";
        let err = parse_document(text).unwrap_err();
        match err {
            RaffleError::Parse { message, .. } => {
                assert!(message.contains("trailing"), "message was: {message}")
            }
            other => panic!("expected Parse error, got {other}"),
        }
    }

    #[test]
    fn error_location_tracks_lines_and_columns() {
        let text = "V =\n{\n    [\"a\"] = @,\n}\n";
        let err = parse_document(text).unwrap_err();
        match err {
            RaffleError::Parse { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, 13);
            }
            other => panic!("expected Parse error, got {other}"),
        }
    }

    #[test]
    fn empty_table_renders_compact() {
        let root = LuaTable::new();
        assert_eq!(render_document("V", &root), "V =\n{}\n");
        let (_, parsed) = parse_document("V = {}").unwrap();
        assert_eq!(parsed, root);
    }

    #[test]
    fn integer_overflow_is_an_error() {
        let text = "V = { [\"n\"] = 99999999999999999999 }";
        assert!(matches!(
            parse_document(text),
            Err(RaffleError::Parse { .. })
        ));
    }
}
