//! Search filter actions. Every filter element pushes a frame onto the
//! container's filter stack; the container unstacks it once its last byte has
//! been consumed.

use super::{lossy, require_non_empty};
use crate::ber::parse_boolean;
use crate::container::{Container, FilterNode};
use crate::decoder::DecodeError;
use crate::model::{AttributeValueAssertion, ExtensibleMatchFilter, Filter, SubstringFilter};

// -----------------------------------------------------------------------------
// ----- Connectors ------------------------------------------------------------

pub(super) fn init_and_filter(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "and filter")?;
    c.push_filter(FilterNode::And(Vec::new()))
}

pub(super) fn init_or_filter(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "or filter")?;
    c.push_filter(FilterNode::Or(Vec::new()))
}

pub(super) fn init_not_filter(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "not filter")?;
    c.push_filter(FilterNode::Not(None))
}

// -----------------------------------------------------------------------------
// ----- Attribute value assertions --------------------------------------------

fn init_ava(
    c: &mut Container,
    build: fn(AttributeValueAssertion) -> Filter,
) -> Result<(), DecodeError> {
    require_non_empty(c, "attribute value assertion")?;
    c.push_filter(FilterNode::Leaf(build(AttributeValueAssertion::default())))
}

pub(super) fn init_equality_filter(c: &mut Container) -> Result<(), DecodeError> {
    init_ava(c, Filter::EqualityMatch)
}

pub(super) fn init_greater_or_equal_filter(c: &mut Container) -> Result<(), DecodeError> {
    init_ava(c, Filter::GreaterOrEqual)
}

pub(super) fn init_less_or_equal_filter(c: &mut Container) -> Result<(), DecodeError> {
    init_ava(c, Filter::LessOrEqual)
}

pub(super) fn init_approx_filter(c: &mut Container) -> Result<(), DecodeError> {
    init_ava(c, Filter::ApproxMatch)
}

fn terminal_ava(c: &mut Container) -> Result<&mut AttributeValueAssertion, DecodeError> {
    match c.terminal_filter()? {
        FilterNode::Leaf(
            Filter::EqualityMatch(ava)
            | Filter::GreaterOrEqual(ava)
            | Filter::LessOrEqual(ava)
            | Filter::ApproxMatch(ava),
        ) => Ok(ava),
        _ => Err(DecodeError::OutOfOrder("attribute value assertion")),
    }
}

pub(super) fn store_ava_attribute_desc(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "attribute description")?;
    let desc = lossy(&c.current_tlv().value);
    terminal_ava(c)?.attribute_desc = desc;
    Ok(())
}

pub(super) fn store_assertion_value(c: &mut Container) -> Result<(), DecodeError> {
    let value = c.current_tlv().value.to_vec();
    terminal_ava(c)?.assertion_value = value;
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- Substrings ------------------------------------------------------------

pub(super) fn init_substrings_filter(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "substrings filter")?;
    c.push_filter(FilterNode::Leaf(Filter::Substrings(SubstringFilter::default())))
}

fn terminal_substrings(c: &mut Container) -> Result<&mut SubstringFilter, DecodeError> {
    match c.terminal_filter()? {
        FilterNode::Leaf(Filter::Substrings(sub)) => Ok(sub),
        _ => Err(DecodeError::OutOfOrder("substrings filter")),
    }
}

pub(super) fn store_substrings_type(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "substrings type")?;
    let attribute_type = lossy(&c.current_tlv().value);
    terminal_substrings(c)?.attribute_type = attribute_type;
    Ok(())
}

/// `substrings SEQUENCE SIZE (1..MAX)`
pub(super) fn init_substrings(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "substrings")?;
    terminal_substrings(c).map(|_| ())
}

pub(super) fn store_initial_substring(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "initial substring")?;
    let initial = lossy(&c.current_tlv().value);
    terminal_substrings(c)?.initial = Some(initial);
    Ok(())
}

pub(super) fn store_any_substring(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "any substring")?;
    let any = lossy(&c.current_tlv().value);
    terminal_substrings(c)?.any.push(any);
    Ok(())
}

pub(super) fn store_final_substring(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "final substring")?;
    let final_ = lossy(&c.current_tlv().value);
    terminal_substrings(c)?.final_ = Some(final_);
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- Present ---------------------------------------------------------------

/// A primitive filter: pushed and unstacked by the same element.
/// An empty attribute description is kept as an empty string.
pub(super) fn init_present_filter(c: &mut Container) -> Result<(), DecodeError> {
    let attribute = lossy(&c.current_tlv().value);
    c.push_filter(FilterNode::Leaf(Filter::Present(attribute)))
}

// -----------------------------------------------------------------------------
// ----- Extensible match ------------------------------------------------------

pub(super) fn init_extensible_filter(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "extensible match")?;
    c.push_filter(FilterNode::Leaf(Filter::ExtensibleMatch(
        ExtensibleMatchFilter::default(),
    )))
}

fn terminal_extensible(c: &mut Container) -> Result<&mut ExtensibleMatchFilter, DecodeError> {
    match c.terminal_filter()? {
        FilterNode::Leaf(Filter::ExtensibleMatch(ext)) => Ok(ext),
        _ => Err(DecodeError::OutOfOrder("extensible match")),
    }
}

pub(super) fn store_matching_rule(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "matching rule")?;
    let rule = lossy(&c.current_tlv().value);
    terminal_extensible(c)?.matching_rule = Some(rule);
    Ok(())
}

pub(super) fn store_matching_type(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "matching type")?;
    let attribute_type = lossy(&c.current_tlv().value);
    terminal_extensible(c)?.attribute_type = Some(attribute_type);
    Ok(())
}

pub(super) fn store_match_value(c: &mut Container) -> Result<(), DecodeError> {
    let value = c.current_tlv().value.to_vec();
    terminal_extensible(c)?.match_value = value;
    Ok(())
}

pub(super) fn store_dn_attributes(c: &mut Container) -> Result<(), DecodeError> {
    let dn_attributes = parse_boolean(&c.current_tlv().value)?;
    terminal_extensible(c)?.dn_attributes = dn_attributes;
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
