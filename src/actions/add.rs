use super::{decode_dn, decode_value, lossy, require_non_empty};
use crate::container::Container;
use crate::decoder::DecodeError;
use crate::model::{AddRequest, Attribute, ProtocolOp};

pub(super) fn init_add_request(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "add request")?;
    c.set_op(ProtocolOp::AddRequest(AddRequest::default()))
}

pub(super) fn store_add_entry(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "entry")?;
    let entry = decode_dn(&c.current_tlv().value)?;
    c.current_add_request()?.entry = entry;
    Ok(())
}

pub(super) fn init_add_attributes(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "attribute list")
}

pub(super) fn init_add_attribute(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "attribute")?;
    c.current_add_request()?.attributes.push(Attribute::default());
    Ok(())
}

fn current_attribute(c: &mut Container) -> Result<&mut Attribute, DecodeError> {
    c.current_add_request()?
        .attributes
        .last_mut()
        .ok_or(DecodeError::OutOfOrder("attribute"))
}

pub(super) fn store_add_attribute_type(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "attribute type")?;
    let attr_type = lossy(&c.current_tlv().value);
    current_attribute(c)?.attr_type = attr_type;
    Ok(())
}

/// `vals SET SIZE (1..MAX)` for an added attribute.
pub(super) fn init_add_attribute_vals(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "attribute values")
}

pub(super) fn store_add_attribute_value(c: &mut Container) -> Result<(), DecodeError> {
    let bytes = c.current_tlv().value.clone();
    let attr_type = current_attribute(c)?.attr_type.clone();

    let value = decode_value(c, &attr_type, &bytes);
    current_attribute(c)?.values.push(value);
    c.set_end_allowed(true);
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::*;
    use crate::grammar::State;
    use crate::model::AttributeValue;

    fn add_request() -> Container {
        let mut c = container();
        constructed(&mut c, 0x68, 80, State::AddRequest);
        init_add_request(&mut c).unwrap();
        c
    }

    #[test]
    fn empty_entry_and_lists_rejected() {
        let mut c = add_request();
        octets(&mut c, b"", State::AddEntry);
        assert_eq!(store_add_entry(&mut c), Err(DecodeError::EmptyField("entry")));

        constructed(&mut c, 0x30, 0, State::AddAttributes);
        assert_eq!(
            init_add_attributes(&mut c),
            Err(DecodeError::EmptyField("attribute list"))
        );

        constructed(&mut c, 0x31, 0, State::AddAttributeVals);
        assert_eq!(
            init_add_attribute_vals(&mut c),
            Err(DecodeError::EmptyField("attribute values"))
        );
    }

    #[test]
    fn values_follow_the_binary_policy() {
        let mut c = add_request();
        octets(&mut c, b"cn=photo,dc=example,dc=com", State::AddEntry);
        store_add_entry(&mut c).unwrap();

        for (attr, value) in [(&b"jpegPhoto"[..], &b"\xFF\xD8"[..]), (b"cn", b"photo")] {
            constructed(&mut c, 0x30, 10, State::AddAttribute);
            init_add_attribute(&mut c).unwrap();
            octets(&mut c, attr, State::AddAttributeType);
            store_add_attribute_type(&mut c).unwrap();
            octets(&mut c, value, State::AddAttributeValue);
            store_add_attribute_value(&mut c).unwrap();
        }

        let request = c.current_add_request().unwrap();
        assert_eq!(request.attributes.len(), 2);
        assert_eq!(
            request.attributes[0].values,
            vec![AttributeValue::Binary(vec![0xFF, 0xD8])]
        );
        assert_eq!(
            request.attributes[1].values,
            vec![AttributeValue::Text("photo".into())]
        );
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
