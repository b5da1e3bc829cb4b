//! Unbind, Delete, ModifyDN, Compare and Abandon.

use super::{decode_dn, decode_utf8, lossy, require_non_empty};
use crate::ber::{parse_boolean, parse_integer};
use crate::container::Container;
use crate::decoder::DecodeError;
use crate::model::{CompareRequest, ModifyDnRequest, ProtocolOp, Rdn};

// -----------------------------------------------------------------------------
// ----- Unbind / Delete / Abandon ---------------------------------------------

/// `UnbindRequest ::= [APPLICATION 2] NULL`
pub(super) fn init_unbind_request(c: &mut Container) -> Result<(), DecodeError> {
    if !c.current_tlv().is_empty() {
        return Err(DecodeError::InvalidLength);
    }
    c.set_op(ProtocolOp::UnbindRequest)
}

pub(super) fn store_del_request(c: &mut Container) -> Result<(), DecodeError> {
    let entry = decode_dn(&c.current_tlv().value)?;
    c.set_op(ProtocolOp::DelRequest(entry))
}

pub(super) fn store_abandon_request(c: &mut Container) -> Result<(), DecodeError> {
    let id = parse_integer(&c.current_tlv().value)?;
    if id < 0 {
        return Err(DecodeError::InvalidValue {
            field: "abandoned message id",
            value: id,
        });
    }
    c.set_op(ProtocolOp::AbandonRequest(id))
}

// -----------------------------------------------------------------------------
// ----- ModifyDN --------------------------------------------------------------

pub(super) fn init_modify_dn_request(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "modify DN request")?;
    c.set_op(ProtocolOp::ModifyDnRequest(ModifyDnRequest::default()))
}

pub(super) fn store_modify_dn_entry(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "entry")?;
    let entry = decode_dn(&c.current_tlv().value)?;
    c.current_modify_dn_request()?.entry = entry;
    Ok(())
}

pub(super) fn store_modify_dn_new_rdn(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "new RDN")?;
    let bytes = c.current_tlv().value.clone();
    let new_rdn = Rdn::parse(decode_utf8(&bytes)?)?;

    c.current_modify_dn_request()?.new_rdn = new_rdn;
    Ok(())
}

pub(super) fn store_modify_dn_delete_old_rdn(c: &mut Container) -> Result<(), DecodeError> {
    let delete_old_rdn = parse_boolean(&c.current_tlv().value)?;
    c.current_modify_dn_request()?.delete_old_rdn = delete_old_rdn;
    Ok(())
}

pub(super) fn store_modify_dn_new_superior(c: &mut Container) -> Result<(), DecodeError> {
    let new_superior = decode_dn(&c.current_tlv().value)?;
    c.current_modify_dn_request()?.new_superior = Some(new_superior);
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- Compare ---------------------------------------------------------------

pub(super) fn init_compare_request(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "compare request")?;
    c.set_op(ProtocolOp::CompareRequest(CompareRequest::default()))
}

pub(super) fn store_compare_entry(c: &mut Container) -> Result<(), DecodeError> {
    let entry = decode_dn(&c.current_tlv().value)?;
    c.current_compare_request()?.entry = entry;
    Ok(())
}

pub(super) fn init_compare_ava(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "attribute value assertion")
}

pub(super) fn store_compare_attribute_desc(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "attribute description")?;
    let desc = lossy(&c.current_tlv().value);
    c.current_compare_request()?.ava.attribute_desc = desc;
    Ok(())
}

pub(super) fn store_compare_assertion_value(c: &mut Container) -> Result<(), DecodeError> {
    let value = c.current_tlv().value.to_vec();
    c.current_compare_request()?.ava.assertion_value = value;
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::*;
    use crate::grammar::State;

    #[test]
    fn unbind_must_be_null() {
        let mut c = container();
        primitive(&mut c, 0x42, &[], State::UnbindRequest);
        init_unbind_request(&mut c).unwrap();
        assert_eq!(c.op_kind(), Some(crate::model::OpKind::UnbindRequest));

        let mut c = container();
        primitive(&mut c, 0x42, &[0x00], State::UnbindRequest);
        assert_eq!(init_unbind_request(&mut c), Err(DecodeError::InvalidLength));
    }

    #[test]
    fn delete_and_abandon() {
        let mut c = container();
        primitive(&mut c, 0x4A, b"cn=old,dc=example,dc=com", State::DelRequest);
        store_del_request(&mut c).unwrap();
        assert!(matches!(c.current_op(), Ok(ProtocolOp::DelRequest(dn)) if dn.rdns().len() == 3));

        let mut c = container();
        primitive(&mut c, 0x50, &[0x05], State::AbandonRequest);
        store_abandon_request(&mut c).unwrap();
        assert!(matches!(c.current_op(), Ok(ProtocolOp::AbandonRequest(5))));

        let mut c = container();
        primitive(&mut c, 0x50, &[0xFB], State::AbandonRequest);
        assert!(store_abandon_request(&mut c).is_err());
    }

    #[test]
    fn modify_dn() {
        let mut c = container();
        constructed(&mut c, 0x6C, 60, State::ModifyDnRequest);
        init_modify_dn_request(&mut c).unwrap();
        octets(&mut c, b"cn=old,ou=people,dc=example,dc=com", State::ModifyDnEntry);
        store_modify_dn_entry(&mut c).unwrap();
        octets(&mut c, b"cn=new+sn=x", State::ModifyDnNewRdn);
        store_modify_dn_new_rdn(&mut c).unwrap();
        primitive(&mut c, 0x01, &[0xFF], State::ModifyDnDeleteOldRdn);
        store_modify_dn_delete_old_rdn(&mut c).unwrap();
        primitive(&mut c, 0x80, b"ou=staff,dc=example,dc=com", State::ModifyDnNewSuperior);
        store_modify_dn_new_superior(&mut c).unwrap();

        let request = c.current_modify_dn_request().unwrap();
        assert_eq!(request.new_rdn.avas.len(), 2);
        assert!(request.delete_old_rdn);
        assert_eq!(
            request.new_superior.as_ref().map(|dn| dn.as_str()),
            Some("ou=staff,dc=example,dc=com")
        );
    }

    #[test]
    fn new_rdn_must_be_one_rdn() {
        for bad in [&b""[..], b"cn=a,ou=b", b"cn"] {
            let mut c = container();
            constructed(&mut c, 0x6C, 30, State::ModifyDnRequest);
            init_modify_dn_request(&mut c).unwrap();
            octets(&mut c, bad, State::ModifyDnNewRdn);
            assert!(store_modify_dn_new_rdn(&mut c).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn compare() {
        let mut c = container();
        constructed(&mut c, 0x6E, 40, State::CompareRequest);
        init_compare_request(&mut c).unwrap();
        octets(&mut c, b"uid=jdoe,dc=example,dc=com", State::CompareEntry);
        store_compare_entry(&mut c).unwrap();
        constructed(&mut c, 0x30, 0, State::CompareAva);
        assert!(init_compare_ava(&mut c).is_err());

        octets(&mut c, b"", State::CompareAttributeDesc);
        assert_eq!(
            store_compare_attribute_desc(&mut c),
            Err(DecodeError::EmptyField("attribute description"))
        );
        octets(&mut c, b"mail", State::CompareAttributeDesc);
        store_compare_attribute_desc(&mut c).unwrap();
        octets(&mut c, b"jdoe@example.com", State::CompareAssertionValue);
        store_compare_assertion_value(&mut c).unwrap();

        let ava = &c.current_compare_request().unwrap().ava;
        assert_eq!(ava.attribute_desc, "mail");
        assert_eq!(ava.assertion_value, b"jdoe@example.com");
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
