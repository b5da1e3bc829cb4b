use super::{dn::Dn, ldap_url::LdapUrl, result_code::ResultCode};

// -----------------------------------------------------------------------------
// ----- LdapResult ------------------------------------------------------------

/// The result component shared by every response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LdapResult {
    pub result_code: ResultCode,
    pub matched_dn: Dn,
    pub error_message: String,
    pub referrals: Option<Vec<LdapUrl>>,
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
