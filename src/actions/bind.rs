use super::{decode_dn, lossy, require_non_empty};
use crate::ber::parse_integer;
use crate::container::Container;
use crate::decoder::DecodeError;
use crate::model::{
    BindAuthentication, BindRequest, BindResponse, ProtocolOp, SaslCredentials,
};

// -----------------------------------------------------------------------------
// ----- BindRequest -----------------------------------------------------------

pub(super) fn init_bind_request(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "bind request")?;
    c.set_op(ProtocolOp::BindRequest(BindRequest::default()))
}

pub(super) fn store_bind_version(c: &mut Container) -> Result<(), DecodeError> {
    let version = parse_integer(&c.current_tlv().value)?;
    if !(1..=127).contains(&version) {
        return Err(DecodeError::InvalidValue {
            field: "bind version",
            value: version,
        });
    }

    c.current_bind_request()?.version = version;
    Ok(())
}

pub(super) fn store_bind_name(c: &mut Container) -> Result<(), DecodeError> {
    let name = decode_dn(&c.current_tlv().value)?;
    c.current_bind_request()?.name = name;
    Ok(())
}

pub(super) fn store_simple_credentials(c: &mut Container) -> Result<(), DecodeError> {
    let password = c.current_tlv().value.to_vec();
    c.current_bind_request()?.authentication = BindAuthentication::Simple(password);
    c.set_end_allowed(true);
    Ok(())
}

pub(super) fn init_sasl_auth(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "SASL credentials")?;
    c.current_bind_request()?.authentication =
        BindAuthentication::Sasl(SaslCredentials::default());
    Ok(())
}

pub(super) fn store_sasl_mechanism(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "SASL mechanism")?;
    let mechanism = lossy(&c.current_tlv().value);

    sasl(c)?.mechanism = mechanism;
    c.set_end_allowed(true);
    Ok(())
}

pub(super) fn store_sasl_credentials(c: &mut Container) -> Result<(), DecodeError> {
    let credentials = c.current_tlv().value.to_vec();
    sasl(c)?.credentials = Some(credentials);
    Ok(())
}

fn sasl(c: &mut Container) -> Result<&mut SaslCredentials, DecodeError> {
    match &mut c.current_bind_request()?.authentication {
        BindAuthentication::Sasl(sasl) => Ok(sasl),
        BindAuthentication::Simple(_) => Err(DecodeError::OutOfOrder("SASL credentials")),
    }
}

// -----------------------------------------------------------------------------
// ----- BindResponse ----------------------------------------------------------

pub(super) fn init_bind_response(c: &mut Container) -> Result<(), DecodeError> {
    require_non_empty(c, "LDAP result")?;
    c.set_op(ProtocolOp::BindResponse(BindResponse::default()))
}

pub(super) fn store_server_sasl_creds(c: &mut Container) -> Result<(), DecodeError> {
    let creds = c.current_tlv().value.to_vec();
    c.current_bind_response()?.server_sasl_creds = Some(creds);
    c.set_end_allowed(true);
    Ok(())
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
