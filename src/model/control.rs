// -----------------------------------------------------------------------------
// ----- Control ---------------------------------------------------------------

/// A request or response control (RFC 4511 §4.1.11).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Control {
    pub oid: String,
    pub criticality: bool,
    pub value: Option<Vec<u8>>,
}

// -----------------------------------------------------------------------------
// ----- Well-known OIDs -------------------------------------------------------

pub const PAGED_RESULTS_OID: &str = "1.2.840.113556.1.4.319";
pub const MANAGE_DSA_IT_OID: &str = "2.16.840.1.113730.3.4.2";
pub const SUBENTRIES_OID: &str = "1.3.6.1.4.1.4203.1.10.1";
pub const SYNC_REQUEST_OID: &str = "1.3.6.1.4.1.4203.1.9.1.1";
pub const SYNC_STATE_OID: &str = "1.3.6.1.4.1.4203.1.9.1.2";
pub const SYNC_DONE_OID: &str = "1.3.6.1.4.1.4203.1.9.1.3";
pub const SYNC_INFO_OID: &str = "1.3.6.1.4.1.4203.1.9.1.4";

impl Control {
    /// Short name for the controls we recognise, for logging.
    pub fn known_name(&self) -> Option<&'static str> {
        let name = match self.oid.as_str() {
            PAGED_RESULTS_OID => "pagedResults",
            MANAGE_DSA_IT_OID => "manageDsaIT",
            SUBENTRIES_OID => "subentries",
            SYNC_REQUEST_OID => "syncRequest",
            SYNC_STATE_OID => "syncState",
            SYNC_DONE_OID => "syncDone",
            SYNC_INFO_OID => "syncInfo",
            _ => return None,
        };
        Some(name)
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names() {
        let control = Control {
            oid: PAGED_RESULTS_OID.into(),
            ..Default::default()
        };
        assert_eq!(control.known_name(), Some("pagedResults"));

        let control = Control {
            oid: "1.2.3.4".into(),
            ..Default::default()
        };
        assert_eq!(control.known_name(), None);
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
