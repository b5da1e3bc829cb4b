//! The LDAPMessage grammar as a `(State, tag) -> Transition` table.

use super::{State, tags::*};
use crate::actions::Action as A;
use crate::ber::tag::{BOOLEAN, ENUMERATED, INTEGER, OCTET_STRING, SEQUENCE, SET};

// -----------------------------------------------------------------------------
// ----- Transition ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: State,
    pub actions: &'static [A],
    /// Number of constructed elements that must be open when the tag is
    /// read. Tells a sibling apart from a nested element with the same tag.
    pub depth: Option<usize>,
}

impl Transition {
    const fn new(next: State, actions: &'static [A]) -> Self {
        Self {
            next,
            actions,
            depth: None,
        }
    }

    const fn at(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }
}

// -----------------------------------------------------------------------------
// ----- Table -----------------------------------------------------------------

/// Where `tag` leads from `state`, or `None` when it is not allowed there.
pub fn transition(state: State, tag: u8) -> Option<Transition> {
    use State::*;
    type T = Transition;

    let t = match (state, tag) {
        // ----- Envelope ------------------------------------------------------
        (Start, MESSAGE) => T::new(Envelope, &[A::InitMessage]).at(0),
        (Envelope, MESSAGE_ID) => T::new(MessageId, &[A::StoreMessageId]).at(1),

        (MessageId, BIND_REQUEST) => T::new(BindRequest, &[A::InitBindRequest]),
        (MessageId, BIND_RESPONSE) => T::new(Response, &[A::InitBindResponse]),
        (MessageId, UNBIND_REQUEST) => T::new(UnbindRequest, &[A::InitUnbindRequest]),
        (MessageId, SEARCH_REQUEST) => T::new(SearchRequest, &[A::InitSearchRequest]),
        (MessageId, SEARCH_RESULT_ENTRY) => {
            T::new(SearchResultEntry, &[A::InitSearchResultEntry])
        }
        (MessageId, SEARCH_RESULT_DONE) => T::new(Response, &[A::InitLdapResponse]),
        (MessageId, SEARCH_RESULT_REFERENCE) => {
            T::new(SearchResultReference, &[A::InitSearchResultReference])
        }
        (MessageId, MODIFY_REQUEST) => T::new(ModifyRequest, &[A::InitModifyRequest]),
        (MessageId, MODIFY_RESPONSE) => T::new(Response, &[A::InitLdapResponse]),
        (MessageId, ADD_REQUEST) => T::new(AddRequest, &[A::InitAddRequest]),
        (MessageId, ADD_RESPONSE) => T::new(Response, &[A::InitLdapResponse]),
        (MessageId, DEL_REQUEST) => T::new(DelRequest, &[A::StoreDelRequest]),
        (MessageId, DEL_RESPONSE) => T::new(Response, &[A::InitLdapResponse]),
        (MessageId, MODIFY_DN_REQUEST) => T::new(ModifyDnRequest, &[A::InitModifyDnRequest]),
        (MessageId, MODIFY_DN_RESPONSE) => T::new(Response, &[A::InitLdapResponse]),
        (MessageId, COMPARE_REQUEST) => T::new(CompareRequest, &[A::InitCompareRequest]),
        (MessageId, COMPARE_RESPONSE) => T::new(Response, &[A::InitLdapResponse]),
        (MessageId, ABANDON_REQUEST) => T::new(AbandonRequest, &[A::StoreAbandonRequest]),
        (MessageId, EXTENDED_REQUEST) => T::new(ExtendedRequest, &[A::InitExtendedRequest]),
        (MessageId, EXTENDED_RESPONSE) => T::new(Response, &[A::InitExtendedResponse]),
        (MessageId, INTERMEDIATE_RESPONSE) => {
            T::new(IntermediateResponse, &[A::InitIntermediateResponse])
        }

        // ----- LDAPResult ----------------------------------------------------
        (Response, ENUMERATED) => T::new(ResultCode, &[A::StoreResultCode]).at(2),
        (ResultCode, OCTET_STRING) => T::new(MatchedDn, &[A::StoreMatchedDn]),
        (MatchedDn, OCTET_STRING) => T::new(ErrorMessage, &[A::StoreErrorMessage]),

        (ErrorMessage, REFERRAL) => T::new(Referrals, &[A::InitReferrals]).at(2),
        (Referrals | Referral, OCTET_STRING) => T::new(Referral, &[A::StoreReferral]).at(3),

        (ErrorMessage | Referral, SERVER_SASL_CREDS) => {
            T::new(ServerSaslCreds, &[A::StoreServerSaslCreds]).at(2)
        }
        (ErrorMessage | Referral, RESPONSE_NAME) => {
            T::new(ResponseName, &[A::StoreResponseName]).at(2)
        }
        (ErrorMessage | Referral | ResponseName, RESPONSE_VALUE) => {
            T::new(ResponseValue, &[A::StoreResponseValue]).at(2)
        }

        // ----- Bind ----------------------------------------------------------
        (BindRequest, INTEGER) => T::new(BindVersion, &[A::StoreBindVersion]),
        (BindVersion, OCTET_STRING) => T::new(BindName, &[A::StoreBindName]),
        (BindName, AUTH_SIMPLE) => T::new(SimpleAuth, &[A::StoreSimpleCredentials]),
        (BindName, AUTH_SASL) => T::new(SaslAuth, &[A::InitSaslAuth]),
        (SaslAuth, OCTET_STRING) => T::new(SaslMechanism, &[A::StoreSaslMechanism]),
        (SaslMechanism, OCTET_STRING) => T::new(SaslCredentials, &[A::StoreSaslCredentials]).at(3),

        // ----- Search --------------------------------------------------------
        (SearchRequest, OCTET_STRING) => T::new(SearchBase, &[A::StoreSearchBase]),
        (SearchBase, ENUMERATED) => T::new(SearchScope, &[A::StoreSearchScope]),
        (SearchScope, ENUMERATED) => T::new(DerefAliases, &[A::StoreDerefAliases]),
        (DerefAliases, INTEGER) => T::new(SizeLimit, &[A::StoreSizeLimit]),
        (SizeLimit, INTEGER) => T::new(TimeLimit, &[A::StoreTimeLimit]),
        (TimeLimit, BOOLEAN) => T::new(TypesOnly, &[A::StoreTypesOnly]),

        (TypesOnly | FilterConnector, tag) => return filter_start(tag),

        (AvaFilter, OCTET_STRING) => T::new(AvaAttributeDesc, &[A::StoreAvaAttributeDesc]),
        (AvaAttributeDesc, OCTET_STRING) => T::new(FilterEnd, &[A::StoreAssertionValue]),

        (SubstringsFilter, OCTET_STRING) => T::new(SubstringsType, &[A::StoreSubstringsType]),
        (SubstringsType, SEQUENCE) => T::new(SubstringsSeq, &[A::InitSubstrings]),
        (SubstringsSeq, SUBSTRING_INITIAL) => {
            T::new(SubstringInitial, &[A::StoreInitialSubstring])
        }
        (SubstringsSeq | SubstringInitial | SubstringAny, SUBSTRING_ANY) => {
            T::new(SubstringAny, &[A::StoreAnySubstring])
        }
        (SubstringsSeq | SubstringInitial | SubstringAny, SUBSTRING_FINAL) => {
            T::new(SubstringFinal, &[A::StoreFinalSubstring])
        }

        (ExtensibleFilter, MATCHING_RULE) => T::new(MatchingRule, &[A::StoreMatchingRule]),
        (ExtensibleFilter | MatchingRule, MATCHING_TYPE) => {
            T::new(MatchingType, &[A::StoreMatchingType])
        }
        (ExtensibleFilter | MatchingRule | MatchingType, MATCH_VALUE) => {
            T::new(MatchValue, &[A::StoreMatchValue])
        }
        (MatchValue, DN_ATTRIBUTES) => T::new(DnAttributes, &[A::StoreDnAttributes]),

        (s, SEQUENCE) if s.is_filter_complete() => {
            T::new(AttributeSelection, &[A::InitAttributeSelection]).at(2)
        }
        (s, tag) if s.is_filter_complete() => return filter_start(tag),

        (AttributeSelection | AttributeSelector, OCTET_STRING) => {
            T::new(AttributeSelector, &[A::StoreAttributeSelector]).at(3)
        }

        // ----- SearchResultEntry ---------------------------------------------
        (SearchResultEntry, OCTET_STRING) => T::new(EntryName, &[A::StoreEntryName]),
        (EntryName, SEQUENCE) => T::new(EntryAttributes, &[]),
        (EntryAttributes | EntryAttributeVals | EntryAttributeValue, SEQUENCE) => {
            T::new(EntryAttribute, &[A::InitEntryAttribute]).at(3)
        }
        (EntryAttribute, OCTET_STRING) => T::new(EntryAttributeType, &[A::StoreEntryAttributeType]),
        (EntryAttributeType, SET) => T::new(EntryAttributeVals, &[]),
        (EntryAttributeVals | EntryAttributeValue, OCTET_STRING) => {
            T::new(EntryAttributeValue, &[A::StoreEntryAttributeValue]).at(5)
        }

        // ----- SearchResultReference -----------------------------------------
        (SearchResultReference | ReferenceUrl, OCTET_STRING) => {
            T::new(ReferenceUrl, &[A::StoreReference]).at(2)
        }

        // ----- Modify --------------------------------------------------------
        (ModifyRequest, OCTET_STRING) => T::new(ModifyObject, &[A::StoreModifyObject]),
        (ModifyObject, SEQUENCE) => T::new(ModifyChanges, &[]),
        (ModifyChanges | ModifyAttributeVals | ModifyAttributeValue, SEQUENCE) => {
            T::new(ModifyChange, &[A::InitModifyChange]).at(3)
        }
        (ModifyChange, ENUMERATED) => T::new(ModifyOperation, &[A::StoreModifyOperation]),
        (ModifyOperation, SEQUENCE) => T::new(ModifyAttribute, &[]),
        (ModifyAttribute, OCTET_STRING) => {
            T::new(ModifyAttributeType, &[A::StoreModifyAttributeType])
        }
        (ModifyAttributeType, SET) => T::new(ModifyAttributeVals, &[]),
        (ModifyAttributeVals | ModifyAttributeValue, OCTET_STRING) => {
            T::new(ModifyAttributeValue, &[A::StoreModifyAttributeValue]).at(6)
        }

        // ----- Add -----------------------------------------------------------
        (AddRequest, OCTET_STRING) => T::new(AddEntry, &[A::StoreAddEntry]),
        (AddEntry, SEQUENCE) => T::new(AddAttributes, &[A::InitAddAttributes]),
        (AddAttributes | AddAttributeValue, SEQUENCE) => {
            T::new(AddAttribute, &[A::InitAddAttribute]).at(3)
        }
        (AddAttribute, OCTET_STRING) => T::new(AddAttributeType, &[A::StoreAddAttributeType]),
        (AddAttributeType, SET) => T::new(AddAttributeVals, &[A::InitAddAttributeVals]),
        (AddAttributeVals | AddAttributeValue, OCTET_STRING) => {
            T::new(AddAttributeValue, &[A::StoreAddAttributeValue]).at(5)
        }

        // ----- ModifyDN ------------------------------------------------------
        (ModifyDnRequest, OCTET_STRING) => T::new(ModifyDnEntry, &[A::StoreModifyDnEntry]),
        (ModifyDnEntry, OCTET_STRING) => T::new(ModifyDnNewRdn, &[A::StoreModifyDnNewRdn]),
        (ModifyDnNewRdn, BOOLEAN) => {
            T::new(ModifyDnDeleteOldRdn, &[A::StoreModifyDnDeleteOldRdn])
        }
        (ModifyDnDeleteOldRdn, NEW_SUPERIOR) => {
            T::new(ModifyDnNewSuperior, &[A::StoreModifyDnNewSuperior]).at(2)
        }

        // ----- Compare -------------------------------------------------------
        (CompareRequest, OCTET_STRING) => T::new(CompareEntry, &[A::StoreCompareEntry]),
        (CompareEntry, SEQUENCE) => T::new(CompareAva, &[A::InitCompareAva]),
        (CompareAva, OCTET_STRING) => {
            T::new(CompareAttributeDesc, &[A::StoreCompareAttributeDesc])
        }
        (CompareAttributeDesc, OCTET_STRING) => {
            T::new(CompareAssertionValue, &[A::StoreCompareAssertionValue])
        }

        // ----- Extended / Intermediate ---------------------------------------
        (ExtendedRequest, REQUEST_NAME) => {
            T::new(ExtendedRequestName, &[A::StoreExtendedRequestName])
        }
        (ExtendedRequestName, REQUEST_VALUE) => {
            T::new(ExtendedRequestValue, &[A::StoreExtendedRequestValue]).at(2)
        }
        (IntermediateResponse, INTERMEDIATE_NAME) => {
            T::new(IntermediateName, &[A::StoreIntermediateName]).at(2)
        }
        (IntermediateResponse | IntermediateName, INTERMEDIATE_VALUE) => {
            T::new(IntermediateValue, &[A::StoreIntermediateValue]).at(2)
        }

        // ----- Controls ------------------------------------------------------
        (Controls | ControlType | ControlCriticality | ControlValue, SEQUENCE) => {
            T::new(Control, &[A::AddControl]).at(2)
        }
        (Control, OCTET_STRING) => T::new(ControlType, &[A::StoreControlType]).at(3),
        (ControlType, BOOLEAN) => T::new(ControlCriticality, &[A::StoreControlCriticality]).at(3),
        (ControlType | ControlCriticality, OCTET_STRING) => {
            T::new(ControlValue, &[A::StoreControlValue]).at(3)
        }
        (s, CONTROLS) if s.is_end_allowed() && !s.is_control() => {
            T::new(Controls, &[A::InitControls]).at(1)
        }

        _ => return None,
    };

    Some(t)
}

/// First element of a filter, at any nesting level.
fn filter_start(tag: u8) -> Option<Transition> {
    use State::*;
    type T = Transition;

    let t = match tag {
        FILTER_AND => T::new(FilterConnector, &[A::InitAndFilter]),
        FILTER_OR => T::new(FilterConnector, &[A::InitOrFilter]),
        FILTER_NOT => T::new(FilterConnector, &[A::InitNotFilter]),
        FILTER_EQUALITY => T::new(AvaFilter, &[A::InitEqualityFilter]),
        FILTER_GREATER_OR_EQUAL => T::new(AvaFilter, &[A::InitGreaterOrEqualFilter]),
        FILTER_LESS_OR_EQUAL => T::new(AvaFilter, &[A::InitLessOrEqualFilter]),
        FILTER_APPROX => T::new(AvaFilter, &[A::InitApproxFilter]),
        FILTER_SUBSTRINGS => T::new(SubstringsFilter, &[A::InitSubstringsFilter]),
        FILTER_PRESENT => T::new(FilterEnd, &[A::InitPresentFilter]),
        FILTER_EXTENSIBLE => T::new(ExtensibleFilter, &[A::InitExtensibleFilter]),
        _ => return None,
    };

    Some(t)
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
