pub mod config;
pub mod decoder;
pub mod error;
pub mod failure;

pub use config::DecoderConfig;
pub use decoder::{LdapDecoder, decode};
pub use error::DecodeError;
pub use failure::{DecodeWarning, ProtocolFailure};
