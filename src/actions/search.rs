use super::{decode_dn, lossy, require_non_empty};
use crate::ber::{parse_boolean, parse_integer};
use crate::container::Container;
use crate::decoder::DecodeError;
use crate::model::{DerefAliases, ProtocolOp, SearchRequest, SearchScope};

pub(super) fn init_search_request(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "search request")?;
    c.set_op(ProtocolOp::SearchRequest(SearchRequest::default()))
}

pub(super) fn store_search_base(c: &mut Container) -> Result<(), DecodeError> {
    let base = decode_dn(&c.current_tlv().value)?;
    c.current_search_request()?.base_object = base;
    Ok(())
}

pub(super) fn store_search_scope(c: &mut Container) -> Result<(), DecodeError> {
    let code = parse_integer(&c.current_tlv().value)?;
    let scope = SearchScope::from_code(code).ok_or(DecodeError::InvalidValue {
        field: "search scope",
        value: code,
    })?;

    c.current_search_request()?.scope = scope;
    Ok(())
}

pub(super) fn store_deref_aliases(c: &mut Container) -> Result<(), DecodeError> {
    let code = parse_integer(&c.current_tlv().value)?;
    let deref = DerefAliases::from_code(code).ok_or(DecodeError::InvalidValue {
        field: "deref aliases",
        value: code,
    })?;

    c.current_search_request()?.deref_aliases = deref;
    Ok(())
}

pub(super) fn store_size_limit(c: &mut Container) -> Result<(), DecodeError> {
    let limit = non_negative(c, "size limit")?;
    c.current_search_request()?.size_limit = limit;
    Ok(())
}

pub(super) fn store_time_limit(c: &mut Container) -> Result<(), DecodeError> {
    let limit = non_negative(c, "time limit")?;
    c.current_search_request()?.time_limit = limit;
    Ok(())
}

fn non_negative(c: &Container, field: &'static str) -> Result<i32, DecodeError> {
    let value = parse_integer(&c.current_tlv().value)?;
    if value < 0 {
        return Err(DecodeError::InvalidValue { field, value });
    }
    Ok(value)
}

pub(super) fn store_types_only(c: &mut Container) -> Result<(), DecodeError> {
    let types_only = parse_boolean(&c.current_tlv().value)?;
    c.current_search_request()?.types_only = types_only;
    Ok(())
}

/// The attribute list follows a filter that has been fully unstacked.
pub(super) fn init_attribute_selection(c: &mut Container) -> Result<(), DecodeError> {
    if !c.current_filter_stack().is_empty() || c.current_search_request()?.filter.is_none() {
        return Err(DecodeError::InvalidFilter(
            "attribute selection before a complete filter",
        ));
    }
    Ok(())
}

/// Zero-length selectors carry nothing and are skipped.
pub(super) fn store_attribute_selector(c: &mut Container) -> Result<(), DecodeError> {
    if c.current_tlv().is_empty() {
        return Ok(());
    }

    let selector = lossy(&c.current_tlv().value);
    c.current_search_request()?.attributes.push(selector);
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
