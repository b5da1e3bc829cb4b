//! SearchResultEntry and SearchResultReference.

use super::{decode_dn, decode_url, lossy, require_non_empty};
use crate::container::Container;
use crate::decoder::DecodeError;
use crate::model::{Attribute, AttributeValue, ProtocolOp, SearchResultEntry};

// -----------------------------------------------------------------------------
// ----- SearchResultEntry -----------------------------------------------------

pub(super) fn init_search_result_entry(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "search result entry")?;
    c.set_op(ProtocolOp::SearchResultEntry(SearchResultEntry::default()))
}

pub(super) fn store_entry_name(c: &mut Container) -> Result<(), DecodeError> {
    let name = decode_dn(&c.current_tlv().value)?;
    c.current_search_result_entry()?.object_name = name;
    Ok(())
}

pub(super) fn init_entry_attribute(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "attribute")?;
    c.current_search_result_entry()?
        .attributes
        .push(Attribute::default());
    Ok(())
}

fn current_attribute(c: &mut Container) -> Result<&mut Attribute, DecodeError> {
    c.current_search_result_entry()?
        .attributes
        .last_mut()
        .ok_or(DecodeError::OutOfOrder("attribute"))
}

pub(super) fn store_entry_attribute_type(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "attribute type")?;
    let attr_type = lossy(&c.current_tlv().value);
    current_attribute(c)?.attr_type = attr_type;
    Ok(())
}

/// Entry values are text when they are UTF-8 and bytes otherwise.
pub(super) fn store_entry_attribute_value(c: &mut Container) -> Result<(), DecodeError> {
    let bytes = c.current_tlv().value.to_vec();
    let value = match String::from_utf8(bytes) {
        Ok(text) => AttributeValue::Text(text),
        Err(err) => AttributeValue::Binary(err.into_bytes()),
    };

    current_attribute(c)?.values.push(value);
    c.set_end_allowed(true);
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- SearchResultReference -------------------------------------------------

pub(super) fn init_search_result_reference(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "search result reference")?;
    c.set_op(ProtocolOp::SearchResultReference(Vec::new()))
}

pub(super) fn store_reference(c: &mut Container) -> Result<(), DecodeError> {
    let url = decode_url(&c.current_tlv().value)?;
    c.current_search_result_reference()?.push(url);
    c.set_end_allowed(true);
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
