//! Single-octet BER identifiers.
//!
//! LDAP only ever uses the low-tag-number form, so an identifier octet with
//! all five tag-number bits set is rejected instead of being followed into
//! the high-tag-number form.

// -----------------------------------------------------------------------------
// ----- Universal Tags --------------------------------------------------------

pub const BOOLEAN: u8 = 0x01;
pub const INTEGER: u8 = 0x02;
pub const OCTET_STRING: u8 = 0x04;
pub const ENUMERATED: u8 = 0x0A;
pub const SEQUENCE: u8 = 0x30;
pub const SET: u8 = 0x31;

// -----------------------------------------------------------------------------
// ----- Bit Masks -------------------------------------------------------------

const CONSTRUCTED_BIT: u8 = 0x20;
const TAG_NUMBER_MASK: u8 = 0x1F;

// -----------------------------------------------------------------------------
// ----- Helpers ---------------------------------------------------------------

/// True when the identifier announces a constructed encoding.
#[inline]
pub fn is_constructed(tag: u8) -> bool {
    tag & CONSTRUCTED_BIT != 0
}

/// True when the identifier escapes into the multi-octet tag form.
#[inline]
pub fn is_high_tag_number(tag: u8) -> bool {
    tag & TAG_NUMBER_MASK == TAG_NUMBER_MASK
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
