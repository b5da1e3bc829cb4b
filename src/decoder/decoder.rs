use bytes::{Buf, BytesMut};
use tracing::{debug, trace};

use super::{DecodeError, DecodeWarning, DecoderConfig, ProtocolFailure};
use crate::container::Container;
use crate::grammar::{Step, step};
use crate::model::LdapMessage;

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

const COMPACT_BUFFER_THRESHOLD: usize = 8 * 1024;
const DEFAULT_CAPACITY: usize = 4 * 1024;

// -----------------------------------------------------------------------------
// ----- LdapDecoder -----------------------------------------------------------

/// Streaming decoder for one connection.
///
/// Bytes go in through [`feed`](Self::feed) in whatever chunks the transport
/// delivers; [`next`](Self::next) hands out complete messages.
pub struct LdapDecoder {
    buffer: BytesMut,
    cursor: usize,
    /// Bytes of the in-flight message already stepped over.
    message_offset: usize,
    /// Bytes of a failed message still to be dropped as they arrive.
    skip: usize,
    container: Container,
    last_warnings: Vec<DecodeWarning>,
}

impl LdapDecoder {
    pub fn new(config: &DecoderConfig) -> Self {
        Self::with_capacity(config, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(config: &DecoderConfig, cap: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(cap),
            cursor: 0,
            message_offset: 0,
            skip: 0,
            container: Container::new(config),
            last_warnings: Vec::new(),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- LdapDecoder: Public Methods -------------------------------------------

impl LdapDecoder {
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Decode as far as the buffered bytes allow.
    ///
    /// `Ok(None)` means more input is needed; the partial message is kept and
    /// resumed on the next call. After a semantic failure decoding resumes at
    /// the next envelope. A framing failure discards everything buffered.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<LdapMessage>, ProtocolFailure> {
        self.drop_skipped();
        self.maybe_compact();

        loop {
            match step(&mut self.container, &self.buffer[self.cursor..]) {
                Ok(Step::NeedMoreData) => return Ok(None),
                Ok(Step::Consumed(used)) => {
                    self.cursor += used;
                    self.message_offset += used;
                }
                Ok(Step::Complete {
                    used,
                    message,
                    warnings,
                }) => {
                    self.cursor += used;
                    self.message_offset = 0;
                    self.last_warnings = warnings;
                    debug!(
                        message_id = message.message_id,
                        op = %message.protocol_op.kind(),
                        controls = message.controls.as_ref().map_or(0, Vec::len),
                        "decoded ldap message"
                    );
                    return Ok(Some(message));
                }
                Err(error) => return Err(self.fail(error)),
            }
        }
    }

    /// Warnings recorded while decoding the last message `next` returned.
    pub fn last_warnings(&self) -> &[DecodeWarning] {
        &self.last_warnings
    }

    /// Bytes received but not decoded yet.
    pub fn buffered(&self) -> usize {
        self.remaining()
    }

    /// No partial message, nothing buffered and nothing left to skip.
    pub fn is_idle(&self) -> bool {
        !self.container.in_progress() && self.remaining() == 0 && self.skip == 0
    }
}

// -----------------------------------------------------------------------------
// ----- LdapDecoder: Utils ----------------------------------------------------

impl LdapDecoder {
    fn maybe_compact(&mut self) {
        if self.cursor > COMPACT_BUFFER_THRESHOLD {
            self.compact();
        }
    }

    fn compact(&mut self) {
        if self.cursor > 0 {
            self.buffer.advance(self.cursor);
            self.cursor = 0;
        }
    }

    fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    fn drop_skipped(&mut self) {
        let n = self.skip.min(self.remaining());
        self.cursor += n;
        self.skip -= n;
    }

    fn fail(&mut self, error: DecodeError) -> ProtocolFailure {
        let resume_at = if error.is_framing() {
            None
        } else {
            self.container.message_end()
        };

        let failure = ProtocolFailure::new(
            error,
            self.container.message_id(),
            self.container.op_kind(),
        );

        match resume_at {
            Some(end) => {
                self.skip = end.saturating_sub(self.message_offset);
                self.drop_skipped();
                trace!(pending = self.skip, "skipping rest of failed message");
            }
            None => {
                trace!(discarded = self.remaining(), "dropping stream after failure");
                self.buffer.clear();
                self.cursor = 0;
                self.skip = 0;
            }
        }

        self.container.reset();
        self.message_offset = 0;
        self.last_warnings.clear();

        failure
    }
}

// -----------------------------------------------------------------------------
// ----- decode ----------------------------------------------------------------

/// Decode exactly one message from `bytes`.
pub fn decode(bytes: &[u8], config: &DecoderConfig) -> Result<LdapMessage, DecodeError> {
    let mut container = Container::new(config);
    let mut pos = 0;

    loop {
        match step(&mut container, &bytes[pos..])? {
            Step::NeedMoreData => return Err(DecodeError::Truncated),
            Step::Consumed(used) => pos += used,
            Step::Complete { used, message, .. } => {
                pos += used;
                if pos < bytes.len() {
                    return Err(DecodeError::TrailingData(bytes.len() - pos));
                }
                return Ok(message);
            }
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OpKind, ProtocolOp};

    // abandon(5), message 7
    const ABANDON: [u8; 8] = [0x30, 0x06, 0x02, 0x01, 0x07, 0x50, 0x01, 0x05];
    // unbind, message 8
    const UNBIND: [u8; 7] = [0x30, 0x05, 0x02, 0x01, 0x08, 0x42, 0x00];

    #[test]
    fn one_shot() {
        let message = decode(&ABANDON, &DecoderConfig::default()).unwrap();
        assert_eq!(message.message_id, 7);
        assert_eq!(message.protocol_op, ProtocolOp::AbandonRequest(5));
    }

    #[test]
    fn one_shot_incomplete_and_trailing() {
        let config = DecoderConfig::default();
        assert_eq!(decode(&ABANDON[..5], &config), Err(DecodeError::Truncated));
        assert_eq!(decode(&[], &config), Err(DecodeError::Truncated));

        let mut bytes = ABANDON.to_vec();
        bytes.push(0x00);
        assert_eq!(decode(&bytes, &config), Err(DecodeError::TrailingData(1)));
    }

    #[test]
    fn several_messages_in_one_feed() {
        let mut decoder = LdapDecoder::new(&DecoderConfig::default());
        decoder.feed(&ABANDON);
        decoder.feed(&UNBIND);

        assert_eq!(decoder.next().unwrap().unwrap().message_id, 7);
        assert_eq!(decoder.next().unwrap().unwrap().message_id, 8);
        assert_eq!(decoder.next().unwrap(), None);
        assert!(decoder.is_idle());
    }

    #[test]
    fn resumes_across_chunks() {
        let mut decoder = LdapDecoder::new(&DecoderConfig::default());
        for &byte in &UNBIND[..UNBIND.len() - 1] {
            decoder.feed(&[byte]);
            assert_eq!(decoder.next().unwrap(), None);
        }
        assert!(!decoder.is_idle());

        decoder.feed(&UNBIND[UNBIND.len() - 1..]);
        let message = decoder.next().unwrap().unwrap();
        assert_eq!(message.protocol_op, ProtocolOp::UnbindRequest);
    }

    #[test]
    fn semantic_failure_resumes_at_next_message() {
        let mut decoder = LdapDecoder::new(&DecoderConfig::default());
        // abandon with a negative id
        decoder.feed(&[0x30, 0x06, 0x02, 0x01, 0x09, 0x50, 0x01, 0xFF]);
        decoder.feed(&UNBIND);

        let failure = decoder.next().unwrap_err();
        assert_eq!(failure.message_id, Some(9));
        assert_eq!(failure.request, None);
        assert_eq!(failure.response_kind(), None);
        assert!(!failure.error.is_framing());
        assert_eq!(decoder.buffered(), UNBIND.len());

        assert_eq!(
            decoder.next().unwrap().unwrap().protocol_op.kind(),
            OpKind::UnbindRequest
        );
        assert!(decoder.is_idle());
    }

    #[test]
    fn rest_of_failed_message_skipped_as_it_arrives() {
        let bind = [
            0x30, 0x0C, 0x02, 0x01, 0x01, 0x60, 0x07, 0x02, 0x01, 0x00, 0x04, 0x00, 0x80, 0x00,
        ];
        let mut decoder = LdapDecoder::new(&DecoderConfig::default());
        decoder.feed(&bind[..10]);

        let failure = decoder.next().unwrap_err();
        assert!(matches!(failure.error, DecodeError::InvalidValue { value: 0, .. }));
        assert!(!decoder.is_idle());

        decoder.feed(&bind[10..]);
        decoder.feed(&UNBIND);
        assert_eq!(decoder.next().unwrap().unwrap().message_id, 8);
        assert!(decoder.is_idle());
    }

    #[test]
    fn framing_failure_drops_the_stream() {
        let mut decoder = LdapDecoder::new(&DecoderConfig::default());
        decoder.feed(&[0x30, 0x05, 0x02, 0x10]);
        decoder.feed(&UNBIND);

        let failure = decoder.next().unwrap_err();
        assert!(failure.error.is_framing());
        assert_eq!(decoder.buffered(), 0);
        assert!(decoder.is_idle());

        decoder.feed(&UNBIND);
        assert_eq!(decoder.next().unwrap().unwrap().message_id, 8);
    }

    #[test]
    fn failure_names_the_request() {
        let mut decoder = LdapDecoder::new(&DecoderConfig::default());
        // bind request with version 0
        decoder.feed(&[
            0x30, 0x0C, 0x02, 0x01, 0x01, 0x60, 0x07, 0x02, 0x01, 0x00, 0x04, 0x00, 0x80, 0x00,
        ]);

        let failure = decoder.next().unwrap_err();
        assert_eq!(failure.request, Some(OpKind::BindRequest));
        assert_eq!(failure.response_kind(), Some(OpKind::BindResponse));
    }

    #[test]
    fn compaction_keeps_partial_message() {
        let mut decoder = LdapDecoder::new(&DecoderConfig::default());
        let count = COMPACT_BUFFER_THRESHOLD / UNBIND.len() + 2;
        for _ in 0..count {
            decoder.feed(&UNBIND);
        }
        decoder.feed(&ABANDON[..4]);

        let mut seen = 0;
        while decoder.next().unwrap().is_some() {
            seen += 1;
        }
        assert_eq!(seen, count);
        assert!(decoder.cursor < COMPACT_BUFFER_THRESHOLD);
        assert_eq!(decoder.buffered(), 2);

        decoder.feed(&ABANDON[4..]);
        let message = decoder.next().unwrap().unwrap();
        assert_eq!(message.protocol_op, ProtocolOp::AbandonRequest(5));
    }

    #[test]
    fn envelope_length_overflow() {
        let mut bytes = vec![0x30, 0x88];
        bytes.extend([0xFF; 8]);

        assert_eq!(
            decode(&bytes, &DecoderConfig::default()),
            Err(DecodeError::LengthOverflow)
        );

        let mut decoder = LdapDecoder::new(&DecoderConfig::default().with_max_pdu_size(1024));
        decoder.feed(&bytes);
        let failure = decoder.next().unwrap_err();
        assert_eq!(failure.error, DecodeError::LengthOverflow);
        assert!(failure.error.is_framing());
    }

    #[test]
    fn pdu_limit() {
        let config = DecoderConfig::default().with_max_pdu_size(7);
        assert!(decode(&UNBIND, &config).is_ok());
        assert_eq!(
            decode(&ABANDON, &config),
            Err(DecodeError::PduTooLarge {
                length: 8,
                limit: 7
            })
        );
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
