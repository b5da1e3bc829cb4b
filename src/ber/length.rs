//! Definite-form BER length octets.

use crate::decoder::DecodeError;

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

const LONG_FORM_BIT: u8 = 0x80;
const INDEFINITE: u8 = 0x80;
const RESERVED: u8 = 0xFF;

// -----------------------------------------------------------------------------
// ----- Length ----------------------------------------------------------------

/// A decoded length and the number of octets it occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    pub value: usize,
    pub octets: usize,
}

/// Read the length octets at the front of `buf`.
///
/// `Ok(None)` means the length octets are not all buffered yet; nothing is
/// consumed in that case.
pub fn read_length(buf: &[u8]) -> Result<Option<Length>, DecodeError> {
    let Some(&first) = buf.first() else {
        return Ok(None);
    };

    if first & LONG_FORM_BIT == 0 {
        return Ok(Some(Length {
            value: first as usize,
            octets: 1,
        }));
    }

    match first {
        INDEFINITE => return Err(DecodeError::IndefiniteLength),
        RESERVED => return Err(DecodeError::InvalidLength),
        _ => {}
    }

    let count = (first & !LONG_FORM_BIT) as usize;
    if buf.len() < 1 + count {
        return Ok(None);
    }

    let mut value: usize = 0;
    for &octet in &buf[1..=count] {
        value = value
            .checked_mul(256)
            .and_then(|v| v.checked_add(octet as usize))
            .ok_or(DecodeError::LengthOverflow)?;
    }

    Ok(Some(Length {
        value,
        octets: 1 + count,
    }))
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_form() {
        let len = read_length(&[0x08]).unwrap().unwrap();
        assert_eq!(len, Length { value: 8, octets: 1 });

        let len = read_length(&[0x7F, 0xAA]).unwrap().unwrap();
        assert_eq!(len.value, 127);
    }

    #[test]
    fn long_form() {
        let len = read_length(&[0x82, 0x27, 0x32]).unwrap().unwrap();
        assert_eq!(len, Length { value: 10034, octets: 3 });

        let len = read_length(&[0x81, 0x80]).unwrap().unwrap();
        assert_eq!(len, Length { value: 128, octets: 2 });
    }

    #[test]
    fn partial_long_form_waits() {
        assert_eq!(read_length(&[]).unwrap(), None);
        assert_eq!(read_length(&[0x83, 0x01]).unwrap(), None);
    }

    #[test]
    fn indefinite_and_reserved_rejected() {
        assert!(matches!(read_length(&[0x80]), Err(DecodeError::IndefiniteLength)));
        assert!(matches!(read_length(&[0xFF]), Err(DecodeError::InvalidLength)));
    }

    #[test]
    fn overflowing_length_fails_instead_of_wrapping() {
        let mut buf = vec![0x80 | 9];
        buf.extend_from_slice(&[0xFF; 9]);
        assert!(matches!(read_length(&buf), Err(DecodeError::LengthOverflow)));
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
