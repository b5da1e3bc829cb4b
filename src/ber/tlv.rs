//! Tag-length-value framing over a byte cursor.

use bytes::Bytes;

use super::length::read_length;
use super::tag;
use crate::decoder::DecodeError;

// -----------------------------------------------------------------------------
// ----- Tlv -------------------------------------------------------------------

/// One BER element.
///
/// Primitive elements carry their whole content in `value`, so
/// `length == value.len()`. Constructed elements are surfaced as soon as
/// their header is buffered; their content is decoded as nested elements and
/// `value` stays empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tlv {
    pub tag: u8,
    pub length: usize,
    pub value: Bytes,
}

impl Tlv {
    #[inline]
    pub fn is_constructed(&self) -> bool {
        tag::is_constructed(self.tag)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

// -----------------------------------------------------------------------------
// ----- TlvRead ---------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlvRead {
    /// A complete element and the number of bytes it consumed (header plus
    /// primitive content).
    Tlv(Tlv, usize),
    NeedMoreData,
}

// -----------------------------------------------------------------------------
// ----- Header ----------------------------------------------------------------

/// Tag and length octets of an element, read without its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub tag: u8,
    pub length: usize,
    pub header_len: usize,
}

impl Header {
    /// Bytes the element occupies on the wire. Constructed elements count
    /// their nested content too.
    #[inline]
    pub fn total_len(&self) -> Result<usize, DecodeError> {
        self.header_len
            .checked_add(self.length)
            .ok_or(DecodeError::LengthOverflow)
    }
}

/// Read the tag and length octets at the front of `buf`.
///
/// Lets the caller check an element against its enclosing frame before
/// waiting for a large primitive value to arrive.
pub fn read_header(buf: &[u8]) -> Result<Option<Header>, DecodeError> {
    let Some(&tag) = buf.first() else {
        return Ok(None);
    };

    if tag::is_high_tag_number(tag) {
        return Err(DecodeError::UnsupportedTag(tag));
    }

    let Some(length) = read_length(&buf[1..])? else {
        return Ok(None);
    };

    Ok(Some(Header {
        tag,
        length: length.value,
        header_len: 1 + length.octets,
    }))
}

// -----------------------------------------------------------------------------
// ----- next_tlv --------------------------------------------------------------

/// Read the next element from the front of `buf`.
///
/// A length larger than what is buffered is not an error here: the caller
/// gets `NeedMoreData` and retries once more bytes arrived. Whether the
/// length fits its enclosing element is checked by the container.
pub fn next_tlv(buf: &[u8]) -> Result<TlvRead, DecodeError> {
    let Some(header) = read_header(buf)? else {
        return Ok(TlvRead::NeedMoreData);
    };

    if tag::is_constructed(header.tag) {
        let tlv = Tlv {
            tag: header.tag,
            length: header.length,
            value: Bytes::new(),
        };
        return Ok(TlvRead::Tlv(tlv, header.header_len));
    }

    let available = buf.len() - header.header_len;
    if available < header.length {
        return Ok(TlvRead::NeedMoreData);
    }

    let end = header.total_len()?;
    let tlv = Tlv {
        tag: header.tag,
        length: header.length,
        value: Bytes::copy_from_slice(&buf[header.header_len..end]),
    };

    Ok(TlvRead::Tlv(tlv, end))
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_tlv(buf: &[u8]) -> (Tlv, usize) {
        match next_tlv(buf).unwrap() {
            TlvRead::Tlv(tlv, consumed) => (tlv, consumed),
            TlvRead::NeedMoreData => panic!("expected a complete TLV"),
        }
    }

    #[test]
    fn primitive_octet_string() {
        let (tlv, consumed) = expect_tlv(&[0x04, 0x02, b'c', b'n', 0xFF]);
        assert_eq!(tlv.tag, tag::OCTET_STRING);
        assert_eq!(tlv.length, 2);
        assert_eq!(&tlv.value[..], b"cn");
        assert_eq!(consumed, 4);
    }

    #[test]
    fn constructed_yields_header_only() {
        let (tlv, consumed) = expect_tlv(&[0x30, 0x81, 0x90, 0x02]);
        assert!(tlv.is_constructed());
        assert_eq!(tlv.length, 0x90);
        assert!(tlv.value.is_empty());
        assert_eq!(consumed, 3);
    }

    #[test]
    fn zero_length_primitive() {
        let (tlv, consumed) = expect_tlv(&[0x04, 0x00]);
        assert!(tlv.is_empty());
        assert_eq!(consumed, 2);
    }

    #[test]
    fn partial_header_and_value_need_more_data() {
        assert_eq!(next_tlv(&[]).unwrap(), TlvRead::NeedMoreData);
        assert_eq!(next_tlv(&[0x04]).unwrap(), TlvRead::NeedMoreData);
        assert_eq!(next_tlv(&[0x04, 0x82, 0x01]).unwrap(), TlvRead::NeedMoreData);
        assert_eq!(next_tlv(&[0x04, 0x03, b'a']).unwrap(), TlvRead::NeedMoreData);
    }

    #[test]
    fn header_available_before_value() {
        let header = read_header(&[0x04, 0x84, 0x7F, 0xFF, 0xFF, 0xFF]).unwrap().unwrap();
        assert_eq!(header.tag, tag::OCTET_STRING);
        assert_eq!(header.length, 0x7FFF_FFFF);
        assert_eq!(header.header_len, 6);
        assert_eq!(header.total_len(), Ok(0x7FFF_FFFF + 6));
    }

    #[test]
    fn length_reaching_usize_max_does_not_wrap() {
        let mut bytes = vec![0x30, 0x80 | usize::BITS as u8 / 8];
        bytes.extend(usize::MAX.to_be_bytes());

        let header = read_header(&bytes).unwrap().unwrap();
        assert_eq!(header.length, usize::MAX);
        assert_eq!(header.total_len(), Err(DecodeError::LengthOverflow));
    }

    #[test]
    fn high_tag_number_rejected() {
        assert!(matches!(
            next_tlv(&[0x1F, 0x81, 0x00]),
            Err(DecodeError::UnsupportedTag(0x1F))
        ));
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
