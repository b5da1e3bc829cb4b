//! Search filters (RFC 4511 §4.5.1.7).
//!
//! `Display` renders the RFC 4515 string form, which is what shows up in
//! logs and in the tests.

use std::fmt;

// -----------------------------------------------------------------------------
// ----- Filter ----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
    EqualityMatch(AttributeValueAssertion),
    Substrings(SubstringFilter),
    GreaterOrEqual(AttributeValueAssertion),
    LessOrEqual(AttributeValueAssertion),
    Present(String),
    ApproxMatch(AttributeValueAssertion),
    ExtensibleMatch(ExtensibleMatchFilter),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeValueAssertion {
    pub attribute_desc: String,
    pub assertion_value: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstringFilter {
    pub attribute_type: String,
    pub initial: Option<String>,
    pub any: Vec<String>,
    pub final_: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensibleMatchFilter {
    pub matching_rule: Option<String>,
    pub attribute_type: Option<String>,
    pub match_value: Vec<u8>,
    pub dn_attributes: bool,
}

// -----------------------------------------------------------------------------
// ----- SubstringFilter: Public -----------------------------------------------

impl SubstringFilter {
    /// RFC 4511 requires at least one initial/any/final component.
    pub fn has_components(&self) -> bool {
        self.initial.is_some() || !self.any.is_empty() || self.final_.is_some()
    }
}

// -----------------------------------------------------------------------------
// ----- Display ---------------------------------------------------------------

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::And(children) => write_set(f, '&', children),
            Filter::Or(children) => write_set(f, '|', children),
            Filter::Not(child) => write!(f, "(!{child})"),
            Filter::EqualityMatch(ava) => write_ava(f, ava, "="),
            Filter::GreaterOrEqual(ava) => write_ava(f, ava, ">="),
            Filter::LessOrEqual(ava) => write_ava(f, ava, "<="),
            Filter::ApproxMatch(ava) => write_ava(f, ava, "~="),
            Filter::Present(attr) => write!(f, "({attr}=*)"),
            Filter::Substrings(sub) => {
                write!(f, "({}=", sub.attribute_type)?;
                if let Some(initial) = &sub.initial {
                    write_escaped(f, initial.as_bytes())?;
                }
                f.write_str("*")?;
                for any in &sub.any {
                    write_escaped(f, any.as_bytes())?;
                    f.write_str("*")?;
                }
                if let Some(final_) = &sub.final_ {
                    write_escaped(f, final_.as_bytes())?;
                }
                f.write_str(")")
            }
            Filter::ExtensibleMatch(ext) => {
                f.write_str("(")?;
                if let Some(attr) = &ext.attribute_type {
                    f.write_str(attr)?;
                }
                if ext.dn_attributes {
                    f.write_str(":dn")?;
                }
                if let Some(rule) = &ext.matching_rule {
                    write!(f, ":{rule}")?;
                }
                f.write_str(":=")?;
                write_escaped(f, &ext.match_value)?;
                f.write_str(")")
            }
        }
    }
}

fn write_set(f: &mut fmt::Formatter<'_>, op: char, children: &[Filter]) -> fmt::Result {
    write!(f, "({op}")?;
    for child in children {
        write!(f, "{child}")?;
    }
    f.write_str(")")
}

fn write_ava(f: &mut fmt::Formatter<'_>, ava: &AttributeValueAssertion, op: &str) -> fmt::Result {
    write!(f, "({}{op}", ava.attribute_desc)?;
    write_escaped(f, &ava.assertion_value)?;
    f.write_str(")")
}

/// RFC 4515 value escaping; non-UTF-8 and NUL bytes become `\xx`.
fn write_escaped(f: &mut fmt::Formatter<'_>, value: &[u8]) -> fmt::Result {
    match std::str::from_utf8(value) {
        Ok(text) => {
            for c in text.chars() {
                match c {
                    '*' => f.write_str("\\2a")?,
                    '(' => f.write_str("\\28")?,
                    ')' => f.write_str("\\29")?,
                    '\\' => f.write_str("\\5c")?,
                    '\0' => f.write_str("\\00")?,
                    c => write!(f, "{c}")?,
                }
            }
            Ok(())
        }
        Err(_) => {
            for byte in value {
                write!(f, "\\{byte:02x}")?;
            }
            Ok(())
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
