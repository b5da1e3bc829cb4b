/// Decoder position inside an LDAPMessage, named after the element read last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum State {
    #[default]
    Start,
    Envelope,
    MessageId,

    // ----- LDAPResult (every response) ---------------------------------------
    Response,
    ResultCode,
    MatchedDn,
    ErrorMessage,
    Referrals,
    Referral,
    ServerSaslCreds,
    ResponseName,
    ResponseValue,

    // ----- Bind --------------------------------------------------------------
    BindRequest,
    BindVersion,
    BindName,
    SimpleAuth,
    SaslAuth,
    SaslMechanism,
    SaslCredentials,

    UnbindRequest,

    // ----- Search ------------------------------------------------------------
    SearchRequest,
    SearchBase,
    SearchScope,
    DerefAliases,
    SizeLimit,
    TimeLimit,
    TypesOnly,
    AttributeSelection,
    AttributeSelector,

    // ----- Filter ------------------------------------------------------------
    FilterConnector,
    AvaFilter,
    AvaAttributeDesc,
    SubstringsFilter,
    SubstringsType,
    SubstringsSeq,
    SubstringInitial,
    SubstringAny,
    SubstringFinal,
    ExtensibleFilter,
    MatchingRule,
    MatchingType,
    MatchValue,
    DnAttributes,
    FilterEnd,

    // ----- SearchResultEntry -------------------------------------------------
    SearchResultEntry,
    EntryName,
    EntryAttributes,
    EntryAttribute,
    EntryAttributeType,
    EntryAttributeVals,
    EntryAttributeValue,

    // ----- SearchResultReference ---------------------------------------------
    SearchResultReference,
    ReferenceUrl,

    // ----- Modify ------------------------------------------------------------
    ModifyRequest,
    ModifyObject,
    ModifyChanges,
    ModifyChange,
    ModifyOperation,
    ModifyAttribute,
    ModifyAttributeType,
    ModifyAttributeVals,
    ModifyAttributeValue,

    // ----- Add ---------------------------------------------------------------
    AddRequest,
    AddEntry,
    AddAttributes,
    AddAttribute,
    AddAttributeType,
    AddAttributeVals,
    AddAttributeValue,

    DelRequest,

    // ----- ModifyDN ----------------------------------------------------------
    ModifyDnRequest,
    ModifyDnEntry,
    ModifyDnNewRdn,
    ModifyDnDeleteOldRdn,
    ModifyDnNewSuperior,

    // ----- Compare -----------------------------------------------------------
    CompareRequest,
    CompareEntry,
    CompareAva,
    CompareAttributeDesc,
    CompareAssertionValue,

    AbandonRequest,

    // ----- Extended / Intermediate -------------------------------------------
    ExtendedRequest,
    ExtendedRequestName,
    ExtendedRequestValue,
    IntermediateResponse,
    IntermediateName,
    IntermediateValue,

    // ----- Controls ----------------------------------------------------------
    Controls,
    Control,
    ControlType,
    ControlCriticality,
    ControlValue,
}

impl State {
    /// Whether the message may end right after the element that led here.
    pub fn is_end_allowed(self) -> bool {
        use State::*;
        matches!(
            self,
            ErrorMessage
                | Referral
                | ServerSaslCreds
                | ResponseName
                | ResponseValue
                | SimpleAuth
                | SaslMechanism
                | SaslCredentials
                | UnbindRequest
                | AttributeSelection
                | AttributeSelector
                | EntryAttributes
                | EntryAttributeVals
                | EntryAttributeValue
                | ReferenceUrl
                | ModifyChanges
                | ModifyAttributeVals
                | ModifyAttributeValue
                | AddAttributeValue
                | DelRequest
                | ModifyDnDeleteOldRdn
                | ModifyDnNewSuperior
                | CompareAssertionValue
                | AbandonRequest
                | ExtendedRequestName
                | ExtendedRequestValue
                | IntermediateResponse
                | IntermediateName
                | IntermediateValue
                | ControlType
                | ControlCriticality
                | ControlValue
        )
    }

    /// Inside the controls sequence, where a second `[0]` is not allowed.
    pub fn is_control(self) -> bool {
        matches!(
            self,
            State::Controls
                | State::Control
                | State::ControlType
                | State::ControlCriticality
                | State::ControlValue
        )
    }

    /// A complete filter was just read, so a sibling filter or the attribute
    /// selection may follow.
    pub fn is_filter_complete(self) -> bool {
        use State::*;
        matches!(
            self,
            FilterEnd | SubstringInitial | SubstringAny | SubstringFinal | MatchValue | DnAttributes
        )
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
