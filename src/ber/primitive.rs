//! Content decoders for the universal primitive types LDAP relies on.

use crate::decoder::DecodeError;

// -----------------------------------------------------------------------------
// ----- INTEGER / ENUMERATED --------------------------------------------------

/// Decode a two's-complement INTEGER (or ENUMERATED) into an `i32`.
pub fn parse_integer(content: &[u8]) -> Result<i32, DecodeError> {
    if content.is_empty() {
        return Err(DecodeError::InvalidInteger);
    }

    if content.len() > 4 {
        return Err(DecodeError::IntegerOverflow);
    }

    // sign-extend from the first octet
    let mut value: i32 = if content[0] & 0x80 != 0 { -1 } else { 0 };
    for &octet in content {
        value = (value << 8) | octet as i32;
    }

    Ok(value)
}

// -----------------------------------------------------------------------------
// ----- BOOLEAN ---------------------------------------------------------------

/// BER booleans are a single octet; any non-zero value is TRUE.
pub fn parse_boolean(content: &[u8]) -> Result<bool, DecodeError> {
    match content {
        [octet] => Ok(*octet != 0),
        _ => Err(DecodeError::InvalidBoolean),
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(parse_integer(&[0x00]).unwrap(), 0);
        assert_eq!(parse_integer(&[0x7F]).unwrap(), 127);
        assert_eq!(parse_integer(&[0x00, 0x80]).unwrap(), 128);
        assert_eq!(parse_integer(&[0x27, 0x0F]).unwrap(), 9999);
        assert_eq!(parse_integer(&[0xFF]).unwrap(), -1);
        assert_eq!(parse_integer(&[0x80]).unwrap(), -128);
        assert_eq!(parse_integer(&[0x7F, 0xFF, 0xFF, 0xFF]).unwrap(), i32::MAX);
        assert_eq!(parse_integer(&[0x80, 0x00, 0x00, 0x00]).unwrap(), i32::MIN);
    }

    #[test]
    fn empty_integer_is_not_a_number() {
        assert!(matches!(parse_integer(&[]), Err(DecodeError::InvalidInteger)));
    }

    #[test]
    fn five_octet_integer_overflows() {
        assert!(matches!(
            parse_integer(&[0x00, 0x80, 0x00, 0x00, 0x00]),
            Err(DecodeError::IntegerOverflow)
        ));
    }

    #[test]
    fn booleans() {
        assert!(!parse_boolean(&[0x00]).unwrap());
        assert!(parse_boolean(&[0xFF]).unwrap());
        assert!(parse_boolean(&[0x01]).unwrap());
        assert!(matches!(parse_boolean(&[]), Err(DecodeError::InvalidBoolean)));
        assert!(matches!(parse_boolean(&[0, 0]), Err(DecodeError::InvalidBoolean)));
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
