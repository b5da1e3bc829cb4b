//! Extended operations (RFC 4511 §4.12) and intermediate responses (§4.13).

use super::{decode_oid, require_non_empty};
use crate::container::Container;
use crate::decoder::DecodeError;
use crate::model::{ExtendedRequest, ExtendedResponse, IntermediateResponse, ProtocolOp};

// -----------------------------------------------------------------------------
// ----- ExtendedRequest -------------------------------------------------------

pub(super) fn init_extended_request(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "extended request")?;
    c.set_op(ProtocolOp::ExtendedRequest(ExtendedRequest::default()))
}

pub(super) fn store_extended_request_name(c: &mut Container) -> Result<(), DecodeError> {
    let name = decode_oid(&c.current_tlv().value, "request name")?;
    c.current_extended_request()?.request_name = name;
    Ok(())
}

pub(super) fn store_extended_request_value(c: &mut Container) -> Result<(), DecodeError> {
    let value = c.current_tlv().value.to_vec();
    c.current_extended_request()?.request_value = Some(value);
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- ExtendedResponse ------------------------------------------------------

pub(super) fn init_extended_response(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "LDAP result")?;
    c.set_op(ProtocolOp::ExtendedResponse(ExtendedResponse::default()))
}

pub(super) fn store_response_name(c: &mut Container) -> Result<(), DecodeError> {
    let name = decode_oid(&c.current_tlv().value, "response name")?;
    c.current_extended_response()?.response_name = Some(name);
    c.set_end_allowed(true);
    Ok(())
}

/// The opaque payload; zero length is an empty payload.
pub(super) fn store_response_value(c: &mut Container) -> Result<(), DecodeError> {
    let value = c.current_tlv().value.to_vec();
    c.current_extended_response()?.response_value = Some(value);
    c.set_end_allowed(true);
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- IntermediateResponse --------------------------------------------------

pub(super) fn init_intermediate_response(c: &mut Container) -> Result<(), DecodeError> {
    c.set_op(ProtocolOp::IntermediateResponse(IntermediateResponse::default()))
}

pub(super) fn store_intermediate_name(c: &mut Container) -> Result<(), DecodeError> {
    let name = decode_oid(&c.current_tlv().value, "response name")?;
    c.current_intermediate_response()?.response_name = Some(name);
    Ok(())
}

pub(super) fn store_intermediate_value(c: &mut Container) -> Result<(), DecodeError> {
    let value = c.current_tlv().value.to_vec();
    c.current_intermediate_response()?.response_value = Some(value);
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::*;
    use crate::grammar::State;

    const START_TLS: &[u8] = b"1.3.6.1.4.1.1466.20037";

    #[test]
    fn start_tls_request() {
        let mut c = container();
        constructed(&mut c, 0x77, 24, State::ExtendedRequest);
        init_extended_request(&mut c).unwrap();
        primitive(&mut c, 0x80, START_TLS, State::ExtendedRequestName);
        store_extended_request_name(&mut c).unwrap();

        let request = c.current_extended_request().unwrap();
        assert_eq!(request.request_name, "1.3.6.1.4.1.1466.20037");
        assert_eq!(request.request_value, None);
    }

    #[test]
    fn request_name_must_be_an_oid() {
        let mut c = container();
        constructed(&mut c, 0x77, 10, State::ExtendedRequest);
        init_extended_request(&mut c).unwrap();
        primitive(&mut c, 0x80, b"starttls", State::ExtendedRequestName);
        assert!(matches!(
            store_extended_request_name(&mut c),
            Err(DecodeError::InvalidOid(_))
        ));
    }

    #[test]
    fn response_payload() {
        let mut c = container();
        constructed(&mut c, 0x78, 40, State::Response);
        init_extended_response(&mut c).unwrap();
        primitive(&mut c, 0x8A, START_TLS, State::ResponseName);
        store_response_name(&mut c).unwrap();
        c.set_end_allowed(false);
        primitive(&mut c, 0x8B, &[], State::ResponseValue);
        store_response_value(&mut c).unwrap();

        assert!(c.is_end_allowed());
        let response = c.current_extended_response().unwrap();
        assert_eq!(response.response_name.as_deref(), Some("1.3.6.1.4.1.1466.20037"));
        assert_eq!(response.response_value, Some(Vec::new()));
    }

    #[test]
    fn response_value_only_on_extended_response() {
        let mut c = container();
        c.set_op(ProtocolOp::SearchResultDone(Default::default())).unwrap();
        primitive(&mut c, 0x8B, b"x", State::ResponseValue);
        assert_eq!(
            store_response_value(&mut c),
            Err(DecodeError::OutOfOrder("extended response"))
        );
    }

    #[test]
    fn intermediate_response() {
        let mut c = container();
        primitive(&mut c, 0x79, &[], State::IntermediateResponse);
        init_intermediate_response(&mut c).unwrap();
        primitive(&mut c, 0x80, b"1.3.6.1.4.1.4203.1.9.1.4", State::IntermediateName);
        store_intermediate_name(&mut c).unwrap();
        primitive(&mut c, 0x81, &[0xA2, 0x00], State::IntermediateValue);
        store_intermediate_value(&mut c).unwrap();

        let response = c.current_intermediate_response().unwrap();
        assert!(response.response_name.is_some());
        assert_eq!(response.response_value, Some(vec![0xA2, 0x00]));
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
