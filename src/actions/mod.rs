//! Field actions: one handler per grammar rule.
//!
//! A handler reads only the element the transition just consumed
//! (`Container::current_tlv`) and either updates the message under
//! construction or fails the whole message.

mod add;
mod bind;
mod controls;
mod entry;
mod extended;
mod filter;
mod ldap_result;
mod message;
mod misc_requests;
mod modify;
mod search;

use std::str;

use crate::container::Container;
use crate::decoder::{DecodeError, DecodeWarning};
use crate::model::{AttributeValue, Dn, DnError, LdapUrl, oid};

// -----------------------------------------------------------------------------
// ----- Action ----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // ----- Envelope ----------------------------------------------------------
    InitMessage,
    StoreMessageId,

    // ----- Controls ----------------------------------------------------------
    InitControls,
    AddControl,
    StoreControlType,
    StoreControlCriticality,
    StoreControlValue,

    // ----- LDAPResult --------------------------------------------------------
    InitLdapResponse,
    StoreResultCode,
    StoreMatchedDn,
    StoreErrorMessage,
    InitReferrals,
    StoreReferral,

    // ----- Bind --------------------------------------------------------------
    InitBindRequest,
    StoreBindVersion,
    StoreBindName,
    StoreSimpleCredentials,
    InitSaslAuth,
    StoreSaslMechanism,
    StoreSaslCredentials,
    InitBindResponse,
    StoreServerSaslCreds,

    InitUnbindRequest,

    // ----- Search ------------------------------------------------------------
    InitSearchRequest,
    StoreSearchBase,
    StoreSearchScope,
    StoreDerefAliases,
    StoreSizeLimit,
    StoreTimeLimit,
    StoreTypesOnly,
    InitAttributeSelection,
    StoreAttributeSelector,

    // ----- Filter ------------------------------------------------------------
    InitAndFilter,
    InitOrFilter,
    InitNotFilter,
    InitEqualityFilter,
    InitGreaterOrEqualFilter,
    InitLessOrEqualFilter,
    InitApproxFilter,
    StoreAvaAttributeDesc,
    StoreAssertionValue,
    InitSubstringsFilter,
    StoreSubstringsType,
    InitSubstrings,
    StoreInitialSubstring,
    StoreAnySubstring,
    StoreFinalSubstring,
    InitPresentFilter,
    InitExtensibleFilter,
    StoreMatchingRule,
    StoreMatchingType,
    StoreMatchValue,
    StoreDnAttributes,

    // ----- Search results ----------------------------------------------------
    InitSearchResultEntry,
    StoreEntryName,
    InitEntryAttribute,
    StoreEntryAttributeType,
    StoreEntryAttributeValue,
    InitSearchResultReference,
    StoreReference,

    // ----- Modify ------------------------------------------------------------
    InitModifyRequest,
    StoreModifyObject,
    InitModifyChange,
    StoreModifyOperation,
    StoreModifyAttributeType,
    StoreModifyAttributeValue,

    // ----- Add ---------------------------------------------------------------
    InitAddRequest,
    StoreAddEntry,
    InitAddAttributes,
    InitAddAttribute,
    StoreAddAttributeType,
    InitAddAttributeVals,
    StoreAddAttributeValue,

    // ----- Del / ModifyDN / Compare / Abandon --------------------------------
    StoreDelRequest,
    InitModifyDnRequest,
    StoreModifyDnEntry,
    StoreModifyDnNewRdn,
    StoreModifyDnDeleteOldRdn,
    StoreModifyDnNewSuperior,
    InitCompareRequest,
    StoreCompareEntry,
    InitCompareAva,
    StoreCompareAttributeDesc,
    StoreCompareAssertionValue,
    StoreAbandonRequest,

    // ----- Extended / Intermediate -------------------------------------------
    InitExtendedRequest,
    StoreExtendedRequestName,
    StoreExtendedRequestValue,
    InitExtendedResponse,
    StoreResponseName,
    StoreResponseValue,
    InitIntermediateResponse,
    StoreIntermediateName,
    StoreIntermediateValue,
}

// -----------------------------------------------------------------------------
// ----- Dispatch --------------------------------------------------------------

pub fn apply(action: Action, c: &mut Container) -> Result<(), DecodeError> {
    use Action::*;

    match action {
        InitMessage => message::init_message(c),
        StoreMessageId => message::store_message_id(c),

        InitControls => controls::init_controls(c),
        AddControl => controls::add_control(c),
        StoreControlType => controls::store_control_type(c),
        StoreControlCriticality => controls::store_control_criticality(c),
        StoreControlValue => controls::store_control_value(c),

        InitLdapResponse => ldap_result::init_ldap_response(c),
        StoreResultCode => ldap_result::store_result_code(c),
        StoreMatchedDn => ldap_result::store_matched_dn(c),
        StoreErrorMessage => ldap_result::store_error_message(c),
        InitReferrals => ldap_result::init_referrals(c),
        StoreReferral => ldap_result::store_referral(c),

        InitBindRequest => bind::init_bind_request(c),
        StoreBindVersion => bind::store_bind_version(c),
        StoreBindName => bind::store_bind_name(c),
        StoreSimpleCredentials => bind::store_simple_credentials(c),
        InitSaslAuth => bind::init_sasl_auth(c),
        StoreSaslMechanism => bind::store_sasl_mechanism(c),
        StoreSaslCredentials => bind::store_sasl_credentials(c),
        InitBindResponse => bind::init_bind_response(c),
        StoreServerSaslCreds => bind::store_server_sasl_creds(c),

        InitUnbindRequest => misc_requests::init_unbind_request(c),

        InitSearchRequest => search::init_search_request(c),
        StoreSearchBase => search::store_search_base(c),
        StoreSearchScope => search::store_search_scope(c),
        StoreDerefAliases => search::store_deref_aliases(c),
        StoreSizeLimit => search::store_size_limit(c),
        StoreTimeLimit => search::store_time_limit(c),
        StoreTypesOnly => search::store_types_only(c),
        InitAttributeSelection => search::init_attribute_selection(c),
        StoreAttributeSelector => search::store_attribute_selector(c),

        InitAndFilter => filter::init_and_filter(c),
        InitOrFilter => filter::init_or_filter(c),
        InitNotFilter => filter::init_not_filter(c),
        InitEqualityFilter => filter::init_equality_filter(c),
        InitGreaterOrEqualFilter => filter::init_greater_or_equal_filter(c),
        InitLessOrEqualFilter => filter::init_less_or_equal_filter(c),
        InitApproxFilter => filter::init_approx_filter(c),
        StoreAvaAttributeDesc => filter::store_ava_attribute_desc(c),
        StoreAssertionValue => filter::store_assertion_value(c),
        InitSubstringsFilter => filter::init_substrings_filter(c),
        StoreSubstringsType => filter::store_substrings_type(c),
        InitSubstrings => filter::init_substrings(c),
        StoreInitialSubstring => filter::store_initial_substring(c),
        StoreAnySubstring => filter::store_any_substring(c),
        StoreFinalSubstring => filter::store_final_substring(c),
        InitPresentFilter => filter::init_present_filter(c),
        InitExtensibleFilter => filter::init_extensible_filter(c),
        StoreMatchingRule => filter::store_matching_rule(c),
        StoreMatchingType => filter::store_matching_type(c),
        StoreMatchValue => filter::store_match_value(c),
        StoreDnAttributes => filter::store_dn_attributes(c),

        InitSearchResultEntry => entry::init_search_result_entry(c),
        StoreEntryName => entry::store_entry_name(c),
        InitEntryAttribute => entry::init_entry_attribute(c),
        StoreEntryAttributeType => entry::store_entry_attribute_type(c),
        StoreEntryAttributeValue => entry::store_entry_attribute_value(c),
        InitSearchResultReference => entry::init_search_result_reference(c),
        StoreReference => entry::store_reference(c),

        InitModifyRequest => modify::init_modify_request(c),
        StoreModifyObject => modify::store_modify_object(c),
        InitModifyChange => modify::init_modify_change(c),
        StoreModifyOperation => modify::store_modify_operation(c),
        StoreModifyAttributeType => modify::store_modify_attribute_type(c),
        StoreModifyAttributeValue => modify::store_modify_attribute_value(c),

        InitAddRequest => add::init_add_request(c),
        StoreAddEntry => add::store_add_entry(c),
        InitAddAttributes => add::init_add_attributes(c),
        InitAddAttribute => add::init_add_attribute(c),
        StoreAddAttributeType => add::store_add_attribute_type(c),
        InitAddAttributeVals => add::init_add_attribute_vals(c),
        StoreAddAttributeValue => add::store_add_attribute_value(c),

        StoreDelRequest => misc_requests::store_del_request(c),
        InitModifyDnRequest => misc_requests::init_modify_dn_request(c),
        StoreModifyDnEntry => misc_requests::store_modify_dn_entry(c),
        StoreModifyDnNewRdn => misc_requests::store_modify_dn_new_rdn(c),
        StoreModifyDnDeleteOldRdn => misc_requests::store_modify_dn_delete_old_rdn(c),
        StoreModifyDnNewSuperior => misc_requests::store_modify_dn_new_superior(c),
        InitCompareRequest => misc_requests::init_compare_request(c),
        StoreCompareEntry => misc_requests::store_compare_entry(c),
        InitCompareAva => misc_requests::init_compare_ava(c),
        StoreCompareAttributeDesc => misc_requests::store_compare_attribute_desc(c),
        StoreCompareAssertionValue => misc_requests::store_compare_assertion_value(c),
        StoreAbandonRequest => misc_requests::store_abandon_request(c),

        InitExtendedRequest => extended::init_extended_request(c),
        StoreExtendedRequestName => extended::store_extended_request_name(c),
        StoreExtendedRequestValue => extended::store_extended_request_value(c),
        InitExtendedResponse => extended::init_extended_response(c),
        StoreResponseName => extended::store_response_name(c),
        StoreResponseValue => extended::store_response_value(c),
        InitIntermediateResponse => extended::init_intermediate_response(c),
        StoreIntermediateName => extended::store_intermediate_name(c),
        StoreIntermediateValue => extended::store_intermediate_value(c),
    }
}

// -----------------------------------------------------------------------------
// ----- Shared field decoders -------------------------------------------------

/// Descriptive text never fails to decode.
fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn require_non_empty(c: &Container, field: &'static str) -> Result<(), DecodeError> {
    if c.current_tlv().is_empty() {
        return Err(DecodeError::EmptyField(field));
    }
    Ok(())
}

/// A zero-length LDAPDN is the empty DN.
fn decode_dn(bytes: &[u8]) -> Result<Dn, DecodeError> {
    if bytes.is_empty() {
        return Ok(Dn::empty());
    }
    Ok(Dn::from_bytes(bytes)?)
}

fn decode_utf8(bytes: &[u8]) -> Result<&str, DecodeError> {
    Ok(str::from_utf8(bytes).map_err(DnError::from)?)
}

/// A zero-length URL stays in the list as an empty placeholder.
fn decode_url(bytes: &[u8]) -> Result<LdapUrl, DecodeError> {
    if bytes.is_empty() {
        return Ok(LdapUrl::empty());
    }
    Ok(LdapUrl::from_bytes(bytes)?)
}

fn decode_oid(bytes: &[u8], field: &'static str) -> Result<String, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyField(field));
    }

    let text = lossy(bytes);
    if !oid::is_valid_oid(&text) {
        return Err(DecodeError::InvalidOid(text));
    }
    Ok(text)
}

/// Modify and add values: raw bytes for binary attributes, text otherwise.
/// Text that is not UTF-8 is kept as bytes and reported.
fn decode_value(c: &mut Container, attribute: &str, bytes: &[u8]) -> AttributeValue {
    if c.is_binary_attribute(attribute) {
        return AttributeValue::Binary(bytes.to_vec());
    }

    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => AttributeValue::Text(text),
        Err(err) => {
            c.warn(DecodeWarning::NonUtf8Value {
                attribute: attribute.to_string(),
            });
            AttributeValue::Binary(err.into_bytes())
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Test support ----------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
