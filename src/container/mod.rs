//! Mutable decode state for one in-flight LDAPMessage.
//!
//! The container is resumed, never reset, across `NeedMoreData`. All offsets
//! are relative to the first byte of the current message, so the caller may
//! compact its input buffer between calls.

pub mod filter_stack;

pub use filter_stack::{FilterNode, FilterStack};

use smallvec::SmallVec;
use std::sync::Arc;
use tracing::warn;

use crate::ber::{Header, Tlv};
use crate::binary_attributes::BinaryAttributeDetector;
use crate::decoder::{DecodeError, DecodeWarning, DecoderConfig};
use crate::grammar::State;
use crate::model::{
    AddRequest, BindRequest, BindResponse, CompareRequest, Control, ExtendedRequest,
    ExtendedResponse, IntermediateResponse, LdapMessage, LdapResult, ModifyDnRequest,
    ModifyRequest, OpKind, ProtocolOp, SearchRequest, SearchResultEntry,
};

// -----------------------------------------------------------------------------
// ----- Container -------------------------------------------------------------

pub struct Container {
    state: State,
    end_allowed: bool,

    /// Bytes of the current message consumed so far.
    consumed: usize,
    /// End offsets of the open constructed elements, outermost first.
    frames: SmallVec<[usize; 16]>,
    tlv: Tlv,
    tlv_end: usize,
    message_end: Option<usize>,

    message_id: Option<i32>,
    op: Option<ProtocolOp>,
    controls: Option<Vec<Control>>,
    filters: FilterStack,
    warnings: Vec<DecodeWarning>,

    binary_attributes: Arc<dyn BinaryAttributeDetector>,
    max_pdu_size: Option<usize>,
}

macro_rules! op_accessor {
    ($name:ident, $variant:ident, $ty:ty, $what:literal) => {
        pub fn $name(&mut self) -> Result<&mut $ty, DecodeError> {
            match self.op.as_mut() {
                Some(ProtocolOp::$variant(inner)) => Ok(inner),
                _ => Err(DecodeError::OutOfOrder($what)),
            }
        }
    };
}

impl Container {
    pub fn new(config: &DecoderConfig) -> Self {
        Self {
            state: State::Start,
            end_allowed: false,
            consumed: 0,
            frames: SmallVec::new(),
            tlv: Tlv::default(),
            tlv_end: 0,
            message_end: None,
            message_id: None,
            op: None,
            controls: None,
            filters: FilterStack::new(),
            warnings: Vec::new(),
            binary_attributes: Arc::clone(&config.binary_attributes),
            max_pdu_size: config.max_pdu_size,
        }
    }

    /// Drop the in-progress message and start over at the next envelope.
    pub fn reset(&mut self) {
        self.state = State::Start;
        self.end_allowed = false;
        self.consumed = 0;
        self.frames.clear();
        self.tlv = Tlv::default();
        self.tlv_end = 0;
        self.message_end = None;
        self.message_id = None;
        self.op = None;
        self.controls = None;
        self.filters.clear();
        self.warnings.clear();
    }

    // -------------------------------------------------------------------------
    // ----- Framing -----------------------------------------------------------

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Number of open constructed elements.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Whether anything of the current message has been read.
    #[inline]
    pub fn in_progress(&self) -> bool {
        self.consumed > 0
    }

    /// Message-relative end of the envelope, once its header was read.
    #[inline]
    pub fn message_end(&self) -> Option<usize> {
        self.message_end
    }

    #[inline]
    pub fn is_end_allowed(&self) -> bool {
        self.end_allowed
    }

    #[inline]
    pub fn set_end_allowed(&mut self, allowed: bool) {
        self.end_allowed = allowed;
    }

    /// The element the current transition consumed.
    #[inline]
    pub fn current_tlv(&self) -> &Tlv {
        &self.tlv
    }

    /// Message offset right after the current element, nested content
    /// included.
    #[inline]
    pub fn current_end(&self) -> usize {
        self.tlv_end
    }

    #[inline]
    pub fn max_pdu_size(&self) -> Option<usize> {
        self.max_pdu_size
    }

    /// Reject an element that does not fit in the innermost open element.
    pub fn check_frame(&self, header: &Header) -> Result<(), DecodeError> {
        let end = self
            .consumed
            .checked_add(header.total_len()?)
            .ok_or(DecodeError::LengthOverflow)?;

        match self.frames.last() {
            Some(&parent) if end > parent => Err(DecodeError::FrameOverrun {
                length: header.length,
                remaining: parent.saturating_sub(self.consumed + header.header_len),
            }),
            _ => Ok(()),
        }
    }

    /// Account for `tlv`, which took `used` bytes of input, and move to
    /// `next`. The end-allowed flag starts out as the state's own.
    pub fn begin_tlv(&mut self, tlv: Tlv, used: usize, next: State) -> Result<(), DecodeError> {
        self.consumed = self
            .consumed
            .checked_add(used)
            .ok_or(DecodeError::LengthOverflow)?;
        self.tlv_end = if tlv.is_constructed() {
            let end = self
                .consumed
                .checked_add(tlv.length)
                .ok_or(DecodeError::LengthOverflow)?;
            if self.frames.is_empty() {
                self.message_end = Some(end);
            }
            self.frames.push(end);
            end
        } else {
            self.consumed
        };
        self.tlv = tlv;
        self.state = next;
        self.end_allowed = next.is_end_allowed();
        Ok(())
    }

    /// Unstack every element and filter whose last byte was consumed.
    ///
    /// Returns `true` once the envelope itself is complete.
    pub fn close_completed(&mut self) -> Result<bool, DecodeError> {
        while matches!(self.frames.last(), Some(&end) if end <= self.consumed) {
            self.frames.pop();
        }

        if let Some(filter) = self.filters.pop_completed(self.consumed)? {
            let request = self.current_search_request()?;
            if request.filter.is_some() {
                return Err(DecodeError::InvalidFilter("second root filter"));
            }
            request.filter = Some(filter);
        }

        Ok(self.frames.is_empty())
    }

    /// Move the completed message out, together with the warnings recorded
    /// while decoding it, and get ready for the next one.
    pub fn take_message(&mut self) -> Result<(LdapMessage, Vec<DecodeWarning>), DecodeError> {
        if !self.filters.is_empty() {
            return Err(DecodeError::Truncated);
        }

        let message_id = self.message_id.ok_or(DecodeError::Truncated)?;
        let protocol_op = self.op.take().ok_or(DecodeError::Truncated)?;
        let message = LdapMessage {
            message_id,
            protocol_op,
            controls: self.controls.take(),
        };
        let warnings = std::mem::take(&mut self.warnings);

        self.reset();
        Ok((message, warnings))
    }

    // -------------------------------------------------------------------------
    // ----- Message -----------------------------------------------------------

    #[inline]
    pub fn message_id(&self) -> Option<i32> {
        self.message_id
    }

    pub fn set_message_id(&mut self, id: i32) {
        self.message_id = Some(id);
    }

    pub fn op_kind(&self) -> Option<OpKind> {
        self.op.as_ref().map(ProtocolOp::kind)
    }

    pub fn set_op(&mut self, op: ProtocolOp) -> Result<(), DecodeError> {
        if self.op.is_some() {
            return Err(DecodeError::OutOfOrder("second protocol operation"));
        }
        self.op = Some(op);
        Ok(())
    }

    pub fn current_op(&mut self) -> Result<&mut ProtocolOp, DecodeError> {
        self.op
            .as_mut()
            .ok_or(DecodeError::OutOfOrder("protocol operation"))
    }

    op_accessor!(current_bind_request, BindRequest, BindRequest, "bind request");
    op_accessor!(current_bind_response, BindResponse, BindResponse, "bind response");
    op_accessor!(current_search_request, SearchRequest, SearchRequest, "search request");
    op_accessor!(
        current_search_result_entry,
        SearchResultEntry,
        SearchResultEntry,
        "search result entry"
    );
    op_accessor!(
        current_search_result_reference,
        SearchResultReference,
        Vec<crate::model::LdapUrl>,
        "search result reference"
    );
    op_accessor!(current_modify_request, ModifyRequest, ModifyRequest, "modify request");
    op_accessor!(current_add_request, AddRequest, AddRequest, "add request");
    op_accessor!(
        current_modify_dn_request,
        ModifyDnRequest,
        ModifyDnRequest,
        "modify DN request"
    );
    op_accessor!(current_compare_request, CompareRequest, CompareRequest, "compare request");
    op_accessor!(current_extended_request, ExtendedRequest, ExtendedRequest, "extended request");
    op_accessor!(
        current_extended_response,
        ExtendedResponse,
        ExtendedResponse,
        "extended response"
    );
    op_accessor!(
        current_intermediate_response,
        IntermediateResponse,
        IntermediateResponse,
        "intermediate response"
    );

    /// The LDAPResult of whichever response is being decoded.
    pub fn current_ldap_result(&mut self) -> Result<&mut LdapResult, DecodeError> {
        self.op
            .as_mut()
            .and_then(ProtocolOp::ldap_result_mut)
            .ok_or(DecodeError::OutOfOrder("LDAP result"))
    }

    // -------------------------------------------------------------------------
    // ----- Controls ----------------------------------------------------------

    pub fn init_controls(&mut self) {
        self.controls = Some(Vec::new());
    }

    pub fn current_controls(&mut self) -> Result<&mut Vec<Control>, DecodeError> {
        self.controls
            .as_mut()
            .ok_or(DecodeError::OutOfOrder("controls"))
    }

    pub fn current_control(&mut self) -> Result<&mut Control, DecodeError> {
        self.current_controls()?
            .last_mut()
            .ok_or(DecodeError::OutOfOrder("control"))
    }

    // -------------------------------------------------------------------------
    // ----- Filters -----------------------------------------------------------

    pub fn current_filter_stack(&mut self) -> &mut FilterStack {
        &mut self.filters
    }

    /// Open `node` as the new terminal filter; it ends with the current
    /// element.
    pub fn push_filter(&mut self, node: FilterNode) -> Result<(), DecodeError> {
        let has_root = self.current_search_request()?.filter.is_some();
        let end = self.tlv_end;
        self.filters.push(node, end, has_root)
    }

    pub fn terminal_filter(&mut self) -> Result<&mut FilterNode, DecodeError> {
        self.filters
            .terminal()
            .ok_or(DecodeError::OutOfOrder("filter element"))
    }

    // -------------------------------------------------------------------------
    // ----- Policy / warnings -------------------------------------------------

    pub fn is_binary_attribute(&self, name: &str) -> bool {
        self.binary_attributes.is_binary(name)
    }

    /// Record a tolerated anomaly.
    pub fn warn(&mut self, warning: DecodeWarning) {
        warn!(message_id = ?self.message_id, %warning, "tolerated malformed field");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
