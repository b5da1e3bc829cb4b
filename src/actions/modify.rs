use super::{decode_dn, decode_value, lossy, require_non_empty};
use crate::ber::parse_integer;
use crate::container::Container;
use crate::decoder::DecodeError;
use crate::model::{Modification, ModifyOperation, ModifyRequest, ProtocolOp};

pub(super) fn init_modify_request(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "modify request")?;
    c.set_op(ProtocolOp::ModifyRequest(ModifyRequest::default()))
}

pub(super) fn store_modify_object(c: &mut Container) -> Result<(), DecodeError> {
    let object = decode_dn(&c.current_tlv().value)?;
    c.current_modify_request()?.object = object;
    Ok(())
}

pub(super) fn init_modify_change(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "modification")?;
    c.current_modify_request()?
        .changes
        .push(Modification::default());
    Ok(())
}

fn current_change(c: &mut Container) -> Result<&mut Modification, DecodeError> {
    c.current_modify_request()?
        .changes
        .last_mut()
        .ok_or(DecodeError::OutOfOrder("modification"))
}

pub(super) fn store_modify_operation(c: &mut Container) -> Result<(), DecodeError> {
    let code = parse_integer(&c.current_tlv().value)?;
    let operation = ModifyOperation::from_code(code).ok_or(DecodeError::InvalidValue {
        field: "modify operation",
        value: code,
    })?;

    current_change(c)?.operation = operation;
    Ok(())
}

pub(super) fn store_modify_attribute_type(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "attribute type")?;
    let attr_type = lossy(&c.current_tlv().value);
    current_change(c)?.attribute.attr_type = attr_type;
    Ok(())
}

/// Binary attributes keep their bytes; others are decoded as text.
pub(super) fn store_modify_attribute_value(c: &mut Container) -> Result<(), DecodeError> {
    let bytes = c.current_tlv().value.clone();
    let attr_type = current_change(c)?.attribute.attr_type.clone();

    let value = decode_value(c, &attr_type, &bytes);
    current_change(c)?.attribute.values.push(value);
    c.set_end_allowed(true);
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
