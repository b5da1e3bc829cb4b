//! The LDAPResult shared by every response, and the operations whose body is
//! nothing else.

use super::{decode_dn, decode_url, lossy, require_non_empty};
use crate::ber::parse_integer;
use crate::container::Container;
use crate::decoder::{DecodeError, DecodeWarning};
use crate::grammar::tags;
use crate::model::{Dn, LdapResult, ProtocolOp, ResultCode};

pub(super) fn init_ldap_response(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "LDAP result")?;

    let result = LdapResult::default();
    let op = match c.current_tlv().tag {
        tags::SEARCH_RESULT_DONE => ProtocolOp::SearchResultDone(result),
        tags::MODIFY_RESPONSE => ProtocolOp::ModifyResponse(result),
        tags::ADD_RESPONSE => ProtocolOp::AddResponse(result),
        tags::DEL_RESPONSE => ProtocolOp::DelResponse(result),
        tags::MODIFY_DN_RESPONSE => ProtocolOp::ModifyDnResponse(result),
        tags::COMPARE_RESPONSE => ProtocolOp::CompareResponse(result),
        tag => {
            return Err(DecodeError::UnexpectedTag {
                state: c.state(),
                tag,
            });
        }
    };

    c.set_op(op)
}

/// Unknown codes are kept as `Other`, never rejected.
pub(super) fn store_result_code(c: &mut Container) -> Result<(), DecodeError> {
    let code = parse_integer(&c.current_tlv().value)?;

    let result_code = match ResultCode::from_code(code) {
        Some(result_code) => result_code,
        None => {
            c.warn(DecodeWarning::UnknownResultCode(code));
            ResultCode::Other
        }
    };

    c.current_ldap_result()?.result_code = result_code;
    Ok(())
}

/// Only the four name-related result codes keep their matched DN; any other
/// code gets an empty one and a warning.
pub(super) fn store_matched_dn(c: &mut Container) -> Result<(), DecodeError> {
    let bytes = c.current_tlv().value.clone();
    let result_code = c.current_ldap_result()?.result_code;

    let matched_dn = if bytes.is_empty() {
        Dn::empty()
    } else if result_code.carries_matched_dn() {
        decode_dn(&bytes)?
    } else {
        c.warn(DecodeWarning::MatchedDnIgnored {
            result_code,
            matched_dn: lossy(&bytes),
        });
        Dn::empty()
    };

    c.current_ldap_result()?.matched_dn = matched_dn;
    Ok(())
}

pub(super) fn store_error_message(c: &mut Container) -> Result<(), DecodeError> {
    let message = lossy(&c.current_tlv().value);
    c.current_ldap_result()?.error_message = message;
    c.set_end_allowed(true);
    Ok(())
}

pub(super) fn init_referrals(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "referrals")?;
    c.current_ldap_result()?.referrals = Some(Vec::new());
    Ok(())
}

pub(super) fn store_referral(c: &mut Container) -> Result<(), DecodeError> {
    let url = decode_url(&c.current_tlv().value)?;

    c.current_ldap_result()?
        .referrals
        .as_mut()
        .ok_or(DecodeError::OutOfOrder("referral"))?
        .push(url);
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
    use crate::model::LdapUrl;

    fn response(tag: u8) -> Container {
        let mut c = container();
        constructed(&mut c, tag, 40, State::Response);
        init_ldap_response(&mut c).unwrap();
        c
    }

    fn result_code(c: &mut Container, code: &[u8]) {
        primitive(c, 0x0A, code, State::ResultCode);
        store_result_code(c).unwrap();
    }

    #[test]
    fn response_kind_from_tag() {
        let mut c = response(tags::COMPARE_RESPONSE);
        assert!(matches!(c.current_op(), Ok(ProtocolOp::CompareResponse(_))));

        let mut c = container();
        constructed(&mut c, tags::BIND_RESPONSE, 7, State::Response);
        assert!(matches!(
            init_ldap_response(&mut c),
            Err(DecodeError::UnexpectedTag { tag: 0x61, .. })
        ));
    }

    #[test]
    fn unknown_result_code_is_other() {
        let mut c = response(tags::SEARCH_RESULT_DONE);
        // 9999
        result_code(&mut c, &[0x27, 0x0F]);

        assert_eq!(c.current_ldap_result().unwrap().result_code, ResultCode::Other);
        assert_eq!(c.warnings(), &[DecodeWarning::UnknownResultCode(9999)]);
    }

    #[test]
    fn non_numeric_result_code_fails() {
        let mut c = response(tags::SEARCH_RESULT_DONE);
        primitive(&mut c, 0x0A, &[], State::ResultCode);
        assert_eq!(store_result_code(&mut c), Err(DecodeError::InvalidInteger));
    }

    #[test]
    fn matched_dn_dropped_for_success() {
        let mut c = response(tags::MODIFY_RESPONSE);
        result_code(&mut c, &[0]);
        octets(&mut c, b"dc=example,dc=com", State::MatchedDn);
        store_matched_dn(&mut c).unwrap();

        assert!(c.current_ldap_result().unwrap().matched_dn.is_empty());
        assert_eq!(
            c.warnings(),
            &[DecodeWarning::MatchedDnIgnored {
                result_code: ResultCode::Success,
                matched_dn: "dc=example,dc=com".into(),
            }]
        );
    }

    #[test]
    fn matched_dn_kept_for_no_such_object() {
        let mut c = response(tags::DEL_RESPONSE);
        result_code(&mut c, &[32]);
        octets(&mut c, b"dc=example,dc=com", State::MatchedDn);
        store_matched_dn(&mut c).unwrap();

        let result = c.current_ldap_result().unwrap();
        assert_eq!(result.matched_dn.as_str(), "dc=example,dc=com");
        assert!(c.warnings().is_empty());
    }

    #[test]
    fn malformed_matched_dn_fails_only_when_kept() {
        let mut c = response(tags::DEL_RESPONSE);
        result_code(&mut c, &[32]);
        octets(&mut c, b"not a dn", State::MatchedDn);
        assert!(matches!(store_matched_dn(&mut c), Err(DecodeError::InvalidDn(_))));

        let mut c = response(tags::DEL_RESPONSE);
        result_code(&mut c, &[50]);
        octets(&mut c, b"not a dn", State::MatchedDn);
        assert!(store_matched_dn(&mut c).is_ok());
    }

    #[test]
    fn error_message_allows_the_end() {
        let mut c = response(tags::ADD_RESPONSE);
        result_code(&mut c, &[0]);
        octets(&mut c, b"", State::MatchedDn);
        store_matched_dn(&mut c).unwrap();
        c.set_end_allowed(false);
        octets(&mut c, &[b'o', b'k', 0xFF], State::ErrorMessage);
        store_error_message(&mut c).unwrap();

        assert!(c.is_end_allowed());
        assert_eq!(c.current_ldap_result().unwrap().error_message, "ok\u{FFFD}");
    }

    #[test]
    fn referrals() {
        let mut c = response(tags::SEARCH_RESULT_DONE);
        constructed(&mut c, 0xA3, 0, State::Referrals);
        assert_eq!(init_referrals(&mut c), Err(DecodeError::EmptyField("referrals")));

        let mut c = response(tags::SEARCH_RESULT_DONE);
        constructed(&mut c, 0xA3, 2, State::Referrals);
        init_referrals(&mut c).unwrap();
        octets(&mut c, b"", State::Referral);
        store_referral(&mut c).unwrap();

        let referrals = c.current_ldap_result().unwrap().referrals.clone().unwrap();
        assert_eq!(referrals, vec![LdapUrl::empty()]);
    }

    #[test]
    fn bad_referral_url_fails() {
        let mut c = response(tags::SEARCH_RESULT_DONE);
        constructed(&mut c, 0xA3, 8, State::Referrals);
        init_referrals(&mut c).unwrap();
        octets(&mut c, b"http://x", State::Referral);
        assert!(matches!(store_referral(&mut c), Err(DecodeError::InvalidUrl(_))));
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
