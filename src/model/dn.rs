//! Distinguished names in their RFC 4514 string form.
//!
//! The parser is deliberately tolerant of the RFC 2253 leftovers still seen
//! on the wire (`;` separators, blanks around `=`, `,` and `+`), but it
//! rejects anything that cannot be split into attribute type / value pairs.

use std::{fmt, str};
use thiserror::Error;

use super::oid;

// -----------------------------------------------------------------------------
// ----- Dn --------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dn {
    upname: String,
    rdns: Vec<Rdn>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rdn {
    pub avas: Vec<Ava>,
}

/// One `type=value` pair; `value` is unescaped. Hex-string values (`#04…`)
/// are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ava {
    pub attr_type: String,
    pub value: String,
}

// -----------------------------------------------------------------------------
// ----- Dn: Static ------------------------------------------------------------

impl Dn {
    /// The zero-length DN (root DSE / "no matched entry").
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parse(input: &str) -> Result<Self, DnError> {
        let mut parser = Parser::new(input.as_bytes());
        let rdns = parser.rdn_sequence()?;

        Ok(Self {
            upname: input.to_string(),
            rdns,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DnError> {
        let input = str::from_utf8(bytes).map_err(DnError::InvalidUtf8)?;
        Self::parse(input)
    }
}

// -----------------------------------------------------------------------------
// ----- Dn: Public ------------------------------------------------------------

impl Dn {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }

    #[inline]
    pub fn rdns(&self) -> &[Rdn] {
        &self.rdns
    }

    /// The DN exactly as it was received.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.upname
    }
}

impl fmt::Display for Dn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.upname)
    }
}

// -----------------------------------------------------------------------------
// ----- Rdn -------------------------------------------------------------------

impl Rdn {
    /// Parse exactly one (possibly multi-valued) RDN.
    pub fn parse(input: &str) -> Result<Self, DnError> {
        let mut parser = Parser::new(input.as_bytes());
        parser.skip_spaces();
        if parser.at_end() {
            return Err(DnError::EmptyRdn);
        }

        let rdn = parser.rdn()?;
        parser.skip_spaces();

        match parser.peek() {
            None => Ok(rdn),
            Some(c) => Err(DnError::UnexpectedChar(c as char, parser.pos)),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Parser ----------------------------------------------------------------

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn rdn_sequence(&mut self) -> Result<Vec<Rdn>, DnError> {
        let mut rdns = Vec::new();

        self.skip_spaces();
        if self.at_end() {
            return Ok(rdns);
        }

        loop {
            rdns.push(self.rdn()?);
            self.skip_spaces();

            match self.peek() {
                None => break,
                Some(b',' | b';') => {
                    self.pos += 1;
                    self.skip_spaces();
                    if self.at_end() {
                        return Err(DnError::EmptyRdn);
                    }
                }
                Some(c) => return Err(DnError::UnexpectedChar(c as char, self.pos)),
            }
        }

        Ok(rdns)
    }

    fn rdn(&mut self) -> Result<Rdn, DnError> {
        let mut avas = vec![self.ava()?];

        loop {
            self.skip_spaces();
            if self.peek() != Some(b'+') {
                break;
            }
            self.pos += 1;
            avas.push(self.ava()?);
        }

        Ok(Rdn { avas })
    }

    fn ava(&mut self) -> Result<Ava, DnError> {
        self.skip_spaces();
        let attr_type = self.attribute_type()?;

        self.skip_spaces();
        if self.peek() != Some(b'=') {
            return Err(DnError::MissingEquals(self.pos));
        }
        self.pos += 1;
        self.skip_spaces();

        let value = match self.peek() {
            Some(b'#') => self.hex_value()?,
            Some(b'"') => self.quoted_value()?,
            _ => self.string_value()?,
        };

        Ok(Ava { attr_type, value })
    }

    fn attribute_type(&mut self) -> Result<String, DnError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'-' || c == b'.' {
                self.pos += 1;
            } else {
                break;
            }
        }

        let raw = &self.input[start..self.pos];
        if raw.is_empty() {
            return Err(DnError::MissingAttributeType(start));
        }

        // ASCII-only by construction
        let mut name = String::from_utf8_lossy(raw).into_owned();
        if name.len() > 4 && name[..4].eq_ignore_ascii_case("oid.") {
            name = name[4..].to_string();
        }

        let valid = if name.as_bytes()[0].is_ascii_digit() {
            oid::is_valid_oid(&name)
        } else {
            name.as_bytes()[0].is_ascii_alphabetic() && !name.contains('.')
        };

        if !valid {
            return Err(DnError::InvalidAttributeType(name));
        }

        Ok(name)
    }

    fn hex_value(&mut self) -> Result<String, DnError> {
        let start = self.pos;
        self.pos += 1; // '#'

        while let Some(c) = self.peek() {
            if c.is_ascii_hexdigit() {
                self.pos += 1;
            } else {
                break;
            }
        }

        let digits = self.pos - start - 1;
        if digits == 0 || digits % 2 != 0 {
            return Err(DnError::InvalidHexValue(start));
        }

        Ok(String::from_utf8_lossy(&self.input[start..self.pos]).into_owned())
    }

    fn quoted_value(&mut self) -> Result<String, DnError> {
        let start = self.pos;
        self.pos += 1; // opening quote

        let mut value = Vec::new();
        loop {
            match self.peek() {
                None => return Err(DnError::UnterminatedQuote(start)),
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => value.push(self.escape()?),
                Some(c) => {
                    value.push(c);
                    self.pos += 1;
                }
            }
        }

        String::from_utf8(value).map_err(|e| DnError::InvalidUtf8(e.utf8_error()))
    }

    fn string_value(&mut self) -> Result<String, DnError> {
        let mut value = Vec::new();
        // bytes up to here survive trailing-space trimming
        let mut keep = 0;

        while let Some(c) = self.peek() {
            match c {
                b',' | b';' | b'+' => break,
                b'\\' => {
                    value.push(self.escape()?);
                    keep = value.len();
                }
                _ => {
                    value.push(c);
                    self.pos += 1;
                    if c != b' ' {
                        keep = value.len();
                    }
                }
            }
        }

        value.truncate(keep);
        String::from_utf8(value).map_err(|e| DnError::InvalidUtf8(e.utf8_error()))
    }

    fn escape(&mut self) -> Result<u8, DnError> {
        let at = self.pos;
        self.pos += 1; // backslash

        let Some(c) = self.peek() else {
            return Err(DnError::InvalidEscape(at));
        };

        if c.is_ascii_hexdigit() {
            let lo = self
                .input
                .get(self.pos + 1)
                .copied()
                .filter(u8::is_ascii_hexdigit)
                .ok_or(DnError::InvalidEscape(at))?;
            self.pos += 2;
            return Ok(hex_nibble(c) << 4 | hex_nibble(lo));
        }

        if matches!(c, b' ' | b'"' | b'#' | b'+' | b',' | b';' | b'<' | b'=' | b'>' | b'\\') {
            self.pos += 1;
            return Ok(c);
        }

        Err(DnError::InvalidEscape(at))
    }
}

fn hex_nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => c - b'A' + 10,
    }
}

// -----------------------------------------------------------------------------
// ----- Errors ----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DnError {
    #[error("empty RDN")]
    EmptyRdn,

    #[error("invalid attribute type '{0}'")]
    InvalidAttributeType(String),

    #[error("invalid escape at {0}")]
    InvalidEscape(usize),

    #[error("invalid hex value at {0}")]
    InvalidHexValue(usize),

    #[error("utf8: {0}")]
    InvalidUtf8(#[from] str::Utf8Error),

    #[error("missing attribute type at {0}")]
    MissingAttributeType(usize),

    #[error("expected '=' at {0}")]
    MissingEquals(usize),

    #[error("unexpected '{0}' at {1}")]
    UnexpectedChar(char, usize),

    #[error("unterminated quote opened at {0}")]
    UnterminatedQuote(usize),
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
