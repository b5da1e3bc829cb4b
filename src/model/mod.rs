pub mod attribute;
pub mod control;
pub mod dn;
pub mod filter;
pub mod ldap_result;
pub mod ldap_url;
pub mod message;
pub mod oid;
pub mod result_code;

pub use attribute::{Attribute, AttributeValue};
pub use control::Control;
pub use dn::{Ava, Dn, DnError, Rdn};
pub use filter::{AttributeValueAssertion, ExtensibleMatchFilter, Filter, SubstringFilter};
pub use ldap_result::LdapResult;
pub use ldap_url::{LdapUrl, Scheme, UrlError, UrlExtension, UrlScope};
pub use message::{
    AddRequest, BindAuthentication, BindRequest, BindResponse, CompareRequest, DerefAliases,
    ExtendedRequest, ExtendedResponse, IntermediateResponse, LdapMessage, ModifyDnRequest,
    ModifyOperation, ModifyRequest, Modification, OpKind, ProtocolOp, SaslCredentials,
    SearchRequest, SearchResultEntry, SearchScope,
};
pub use result_code::ResultCode;
