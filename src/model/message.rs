//! The decoded LDAPMessage envelope and every RFC 4511 protocol operation.

use std::fmt;

use super::{
    attribute::Attribute,
    control::Control,
    dn::{Dn, Rdn},
    filter::{AttributeValueAssertion, Filter},
    ldap_result::LdapResult,
    ldap_url::LdapUrl,
};

// -----------------------------------------------------------------------------
// ----- LdapMessage -----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LdapMessage {
    pub message_id: i32,
    pub protocol_op: ProtocolOp,
    pub controls: Option<Vec<Control>>,
}

// -----------------------------------------------------------------------------
// ----- ProtocolOp ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolOp {
    BindRequest(BindRequest),
    BindResponse(BindResponse),
    UnbindRequest,
    SearchRequest(SearchRequest),
    SearchResultEntry(SearchResultEntry),
    SearchResultDone(LdapResult),
    SearchResultReference(Vec<LdapUrl>),
    ModifyRequest(ModifyRequest),
    ModifyResponse(LdapResult),
    AddRequest(AddRequest),
    AddResponse(LdapResult),
    DelRequest(Dn),
    DelResponse(LdapResult),
    ModifyDnRequest(ModifyDnRequest),
    ModifyDnResponse(LdapResult),
    CompareRequest(CompareRequest),
    CompareResponse(LdapResult),
    AbandonRequest(i32),
    ExtendedRequest(ExtendedRequest),
    ExtendedResponse(ExtendedResponse),
    IntermediateResponse(IntermediateResponse),
}

impl ProtocolOp {
    pub fn kind(&self) -> OpKind {
        use ProtocolOp::*;
        match self {
            BindRequest(_) => OpKind::BindRequest,
            BindResponse(_) => OpKind::BindResponse,
            UnbindRequest => OpKind::UnbindRequest,
            SearchRequest(_) => OpKind::SearchRequest,
            SearchResultEntry(_) => OpKind::SearchResultEntry,
            SearchResultDone(_) => OpKind::SearchResultDone,
            SearchResultReference(_) => OpKind::SearchResultReference,
            ModifyRequest(_) => OpKind::ModifyRequest,
            ModifyResponse(_) => OpKind::ModifyResponse,
            AddRequest(_) => OpKind::AddRequest,
            AddResponse(_) => OpKind::AddResponse,
            DelRequest(_) => OpKind::DelRequest,
            DelResponse(_) => OpKind::DelResponse,
            ModifyDnRequest(_) => OpKind::ModifyDnRequest,
            ModifyDnResponse(_) => OpKind::ModifyDnResponse,
            CompareRequest(_) => OpKind::CompareRequest,
            CompareResponse(_) => OpKind::CompareResponse,
            AbandonRequest(_) => OpKind::AbandonRequest,
            ExtendedRequest(_) => OpKind::ExtendedRequest,
            ExtendedResponse(_) => OpKind::ExtendedResponse,
            IntermediateResponse(_) => OpKind::IntermediateResponse,
        }
    }

    /// The LDAPResult component, for operations that carry one.
    pub fn ldap_result(&self) -> Option<&LdapResult> {
        use ProtocolOp::*;
        match self {
            BindResponse(r) => Some(&r.result),
            ExtendedResponse(r) => Some(&r.result),
            SearchResultDone(r) | ModifyResponse(r) | AddResponse(r) | DelResponse(r)
            | ModifyDnResponse(r) | CompareResponse(r) => Some(r),
            _ => None,
        }
    }

    pub fn ldap_result_mut(&mut self) -> Option<&mut LdapResult> {
        use ProtocolOp::*;
        match self {
            BindResponse(r) => Some(&mut r.result),
            ExtendedResponse(r) => Some(&mut r.result),
            SearchResultDone(r) | ModifyResponse(r) | AddResponse(r) | DelResponse(r)
            | ModifyDnResponse(r) | CompareResponse(r) => Some(r),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- OpKind ----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    BindRequest,
    BindResponse,
    UnbindRequest,
    SearchRequest,
    SearchResultEntry,
    SearchResultDone,
    SearchResultReference,
    ModifyRequest,
    ModifyResponse,
    AddRequest,
    AddResponse,
    DelRequest,
    DelResponse,
    ModifyDnRequest,
    ModifyDnResponse,
    CompareRequest,
    CompareResponse,
    AbandonRequest,
    ExtendedRequest,
    ExtendedResponse,
    IntermediateResponse,
}

impl OpKind {
    /// The response a server answers this request with. Unbind and abandon
    /// have none, and responses never get one.
    pub fn response(self) -> Option<OpKind> {
        use OpKind::*;
        match self {
            BindRequest => Some(BindResponse),
            SearchRequest => Some(SearchResultDone),
            ModifyRequest => Some(ModifyResponse),
            AddRequest => Some(AddResponse),
            DelRequest => Some(DelResponse),
            ModifyDnRequest => Some(ModifyDnResponse),
            CompareRequest => Some(CompareResponse),
            ExtendedRequest => Some(ExtendedResponse),
            _ => None,
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// -----------------------------------------------------------------------------
// ----- Bind ------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindRequest {
    pub version: i32,
    pub name: Dn,
    pub authentication: BindAuthentication,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindAuthentication {
    Simple(Vec<u8>),
    Sasl(SaslCredentials),
}

impl Default for BindAuthentication {
    /// Anonymous simple bind.
    fn default() -> Self {
        BindAuthentication::Simple(Vec::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaslCredentials {
    pub mechanism: String,
    pub credentials: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindResponse {
    pub result: LdapResult,
    pub server_sasl_creds: Option<Vec<u8>>,
}

// -----------------------------------------------------------------------------
// ----- Search ----------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub base_object: Dn,
    pub scope: SearchScope,
    pub deref_aliases: DerefAliases,
    pub size_limit: i32,
    pub time_limit: i32,
    pub types_only: bool,
    /// Always present once the request decoded successfully.
    pub filter: Option<Filter>,
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
    #[default]
    BaseObject,
    SingleLevel,
    WholeSubtree,
}

impl SearchScope {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(SearchScope::BaseObject),
            1 => Some(SearchScope::SingleLevel),
            2 => Some(SearchScope::WholeSubtree),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DerefAliases {
    #[default]
    NeverDerefAliases,
    DerefInSearching,
    DerefFindingBaseObj,
    DerefAlways,
}

impl DerefAliases {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(DerefAliases::NeverDerefAliases),
            1 => Some(DerefAliases::DerefInSearching),
            2 => Some(DerefAliases::DerefFindingBaseObj),
            3 => Some(DerefAliases::DerefAlways),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResultEntry {
    pub object_name: Dn,
    pub attributes: Vec<Attribute>,
}

// -----------------------------------------------------------------------------
// ----- Modify / Add ----------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifyRequest {
    pub object: Dn,
    pub changes: Vec<Modification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modification {
    pub operation: ModifyOperation,
    pub attribute: Attribute,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModifyOperation {
    #[default]
    Add,
    Delete,
    Replace,
    /// RFC 4525
    Increment,
}

impl ModifyOperation {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ModifyOperation::Add),
            1 => Some(ModifyOperation::Delete),
            2 => Some(ModifyOperation::Replace),
            3 => Some(ModifyOperation::Increment),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddRequest {
    pub entry: Dn,
    pub attributes: Vec<Attribute>,
}

// -----------------------------------------------------------------------------
// ----- ModifyDN / Compare ----------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifyDnRequest {
    pub entry: Dn,
    pub new_rdn: Rdn,
    pub delete_old_rdn: bool,
    pub new_superior: Option<Dn>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareRequest {
    pub entry: Dn,
    pub ava: AttributeValueAssertion,
}

// -----------------------------------------------------------------------------
// ----- Extended / Intermediate -----------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedRequest {
    pub request_name: String,
    pub request_value: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedResponse {
    pub result: LdapResult,
    pub response_name: Option<String>,
    pub response_value: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntermediateResponse {
    pub response_name: Option<String>,
    pub response_value: Option<Vec<u8>>,
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
