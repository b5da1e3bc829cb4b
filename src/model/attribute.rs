use std::fmt;

// -----------------------------------------------------------------------------
// ----- AttributeValue --------------------------------------------------------

/// Attribute values are text unless the attribute type is configured as
/// binary (or the bytes are not UTF-8 at all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Text(String),
    Binary(Vec<u8>),
}

impl AttributeValue {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AttributeValue::Text(s) => s.as_bytes(),
            AttributeValue::Binary(b) => b,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, AttributeValue::Binary(_))
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Binary(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Attribute -------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribute {
    pub attr_type: String,
    pub values: Vec<AttributeValue>,
}

impl Attribute {
    pub fn new(attr_type: impl Into<String>) -> Self {
        Self {
            attr_type: attr_type.into(),
            values: Vec::new(),
        }
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
