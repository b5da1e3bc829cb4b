//! Which attribute types carry raw bytes rather than UTF-8 text.

use once_cell::sync::Lazy;
use std::collections::HashSet;

// -----------------------------------------------------------------------------
// ----- Defaults --------------------------------------------------------------

/// Attribute types whose values are binary in the standard schemas.
pub const DEFAULT_BINARY_ATTRIBUTES: &[&str] = &[
    "photo",
    "personalSignature",
    "audio",
    "jpegPhoto",
    "javaSerializedData",
    "thumbnailPhoto",
    "thumbnailLogo",
    "userPassword",
    "userCertificate",
    "cACertificate",
    "authorityRevocationList",
    "certificateRevocationList",
    "crossCertificatePair",
    "x500UniqueIdentifier",
    "krb5Key",
];

static DEFAULT_SET: Lazy<HashSet<String>> = Lazy::new(|| {
    DEFAULT_BINARY_ATTRIBUTES
        .iter()
        .map(|name| name.to_ascii_lowercase())
        .collect()
});

// -----------------------------------------------------------------------------
// ----- BinaryAttributeDetector -----------------------------------------------

pub trait BinaryAttributeDetector: Send + Sync {
    /// `attribute` is an attribute description as found on the wire, options
    /// included (`userCertificate;binary`).
    fn is_binary(&self, attribute: &str) -> bool;
}

// -----------------------------------------------------------------------------
// ----- BinaryAttributes ------------------------------------------------------

/// Case-insensitive set of binary attribute types.
///
/// A description carrying the `binary` option is binary whatever its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryAttributes {
    names: HashSet<String>,
}

impl Default for BinaryAttributes {
    fn default() -> Self {
        Self {
            names: DEFAULT_SET.clone(),
        }
    }
}

impl BinaryAttributes {
    /// An empty set; only `;binary` descriptions are binary.
    pub fn none() -> Self {
        Self {
            names: HashSet::new(),
        }
    }

    /// Only the given names, without the defaults.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::none();
        set.extend(names);
        set
    }

    /// The defaults plus the given names.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        set.extend(names);
        set
    }

    pub fn insert(&mut self, name: &str) {
        self.names.insert(base_type(name).to_ascii_lowercase());
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.insert(name.as_ref());
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl BinaryAttributeDetector for BinaryAttributes {
    fn is_binary(&self, attribute: &str) -> bool {
        let mut parts = attribute.split(';');
        let base = parts.next().unwrap_or_default().trim();

        if parts.any(|opt| opt.trim().eq_ignore_ascii_case("binary")) {
            return true;
        }

        self.names.contains(&base.to_ascii_lowercase())
    }
}

fn base_type(description: &str) -> &str {
    description
        .split(';')
        .next()
        .unwrap_or(description)
        .trim()
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
