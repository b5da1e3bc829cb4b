//! Drives one element at a time through the transition table.

use tracing::trace;

use super::transition::{Transition, transition};
use crate::actions;
use crate::ber::{TlvRead, next_tlv, read_header};
use crate::container::Container;
use crate::decoder::{DecodeError, DecodeWarning};
use crate::model::LdapMessage;

// -----------------------------------------------------------------------------
// ----- Step ------------------------------------------------------------------

#[derive(Debug)]
pub enum Step {
    /// Nothing was consumed; the next element is not fully buffered.
    NeedMoreData,
    /// One element of `usize` bytes was decoded.
    Consumed(usize),
    /// The element of `used` bytes completed a message.
    Complete {
        used: usize,
        message: LdapMessage,
        warnings: Vec<DecodeWarning>,
    },
}

// -----------------------------------------------------------------------------
// ----- step ------------------------------------------------------------------

/// Decode the element at the front of `buf` into `c`.
///
/// The tag and the enclosing frame are checked as soon as the header is
/// buffered, before waiting for the content.
pub fn step(c: &mut Container, buf: &[u8]) -> Result<Step, DecodeError> {
    let Some(header) = read_header(buf)? else {
        return Ok(Step::NeedMoreData);
    };

    let transition = lookup(c, header.tag)?;
    c.check_frame(&header)?;

    let (tlv, used) = match next_tlv(buf)? {
        TlvRead::Tlv(tlv, used) => (tlv, used),
        TlvRead::NeedMoreData => return Ok(Step::NeedMoreData),
    };

    trace!(
        state = ?c.state(),
        next = ?transition.next,
        tag = format_args!("0x{:02X}", tlv.tag),
        length = tlv.length,
        depth = c.depth(),
        "tlv"
    );

    c.begin_tlv(tlv, used, transition.next)?;
    for &action in transition.actions {
        actions::apply(action, c)?;
    }

    if !c.close_completed()? {
        return Ok(Step::Consumed(used));
    }

    if !c.is_end_allowed() {
        return Err(DecodeError::Truncated);
    }

    let (message, warnings) = c.take_message()?;
    Ok(Step::Complete {
        used,
        message,
        warnings,
    })
}

fn lookup(c: &Container, tag: u8) -> Result<Transition, DecodeError> {
    let state = c.state();
    let unexpected = DecodeError::UnexpectedTag { state, tag };

    let transition = transition(state, tag).ok_or_else(|| unexpected.clone())?;
    match transition.depth {
        Some(depth) if depth != c.depth() => Err(unexpected),
        _ => Ok(transition),
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::DecoderConfig;
    use crate::grammar::State;
    use crate::model::ProtocolOp;

    /// Run `step` until the message completes or the input runs out.
    fn run(bytes: &[u8]) -> Result<Option<LdapMessage>, DecodeError> {
        let mut c = Container::new(&DecoderConfig::default());
        let mut pos = 0;
        loop {
            match step(&mut c, &bytes[pos..])? {
                Step::NeedMoreData => return Ok(None),
                Step::Consumed(used) => pos += used,
                Step::Complete { message, .. } => return Ok(Some(message)),
            }
        }
    }

    #[test]
    fn unbind() {
        let message = run(&[0x30, 0x05, 0x02, 0x01, 0x03, 0x42, 0x00]).unwrap().unwrap();
        assert_eq!(message.message_id, 3);
        assert_eq!(message.protocol_op, ProtocolOp::UnbindRequest);
        assert_eq!(message.controls, None);
    }

    #[test]
    fn partial_primitive_waits() {
        assert_eq!(run(&[0x30, 0x05, 0x02, 0x01]).unwrap(), None);
    }

    #[test]
    fn wrong_tag_is_rejected_from_the_header() {
        assert_eq!(
            run(&[0x30, 0x05, 0x04, 0x03]).unwrap_err(),
            DecodeError::UnexpectedTag {
                state: State::Envelope,
                tag: 0x04
            }
        );
    }

    #[test]
    fn overrun_is_rejected_before_the_content_arrives() {
        assert!(matches!(
            run(&[0x30, 0x05, 0x02, 0x10]),
            Err(DecodeError::FrameOverrun { length: 16, .. })
        ));
    }

    #[test]
    fn envelope_ending_early_is_truncated() {
        // SearchResultDone with only a result code.
        let bytes = [0x30, 0x08, 0x02, 0x01, 0x01, 0x65, 0x03, 0x0A, 0x01, 0x00];
        assert_eq!(run(&bytes), Err(DecodeError::Truncated));
    }

    #[test]
    fn depth_guard_rejects_misplaced_controls() {
        // Controls inside the SearchResultDone instead of after it.
        let bytes = [
            0x30, 0x10, 0x02, 0x01, 0x01, 0x65, 0x0B, 0x0A, 0x01, 0x00, 0x04, 0x00, 0x04, 0x00,
            0xA0, 0x02, 0x30, 0x00,
        ];
        assert!(matches!(
            run(&bytes),
            Err(DecodeError::UnexpectedTag { tag: 0xA0, .. })
        ));
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
