use tracing::trace;

use super::{decode_oid, require_non_empty};
use crate::ber::parse_boolean;
use crate::container::Container;
use crate::decoder::DecodeError;
use crate::model::Control;

/// `controls [0] Controls`: the list exists once its tag is seen.
pub(super) fn init_controls(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "controls")?;
    c.init_controls();
    Ok(())
}

pub(super) fn add_control(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "control")?;
    c.current_controls()?.push(Control::default());
    Ok(())
}

pub(super) fn store_control_type(c: &mut Container) -> Result<(), DecodeError> {
    let oid = decode_oid(&c.current_tlv().value, "control type")?;

    let control = c.current_control()?;
    control.oid = oid;
    trace!(oid = %control.oid, name = ?control.known_name(), "control");
    Ok(())
}

pub(super) fn store_control_criticality(c: &mut Container) -> Result<(), DecodeError> {
    let critical = parse_boolean(&c.current_tlv().value)?;
    c.current_control()?.criticality = critical;
    Ok(())
}

pub(super) fn store_control_value(c: &mut Container) -> Result<(), DecodeError> {
    let value = c.current_tlv().value.to_vec();
    c.current_control()?.value = Some(value);
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
