use tracing::trace;

use super::require_non_empty;
use crate::ber::parse_integer;
use crate::container::Container;
use crate::decoder::DecodeError;

pub(super) fn init_message(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "message")?;

    let length = c.current_end();
    if let Some(limit) = c.max_pdu_size() {
        if length > limit {
            return Err(DecodeError::PduTooLarge { length, limit });
        }
    }

    trace!(length, "ldap message envelope");
    Ok(())
}

pub(super) fn store_message_id(c: &mut Container) -> Result<(), DecodeError> {
    let id = parse_integer(&c.current_tlv().value)?;
    if id < 0 {
        return Err(DecodeError::InvalidValue {
            field: "message id",
            value: id,
        });
    }

    c.set_message_id(id);
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
