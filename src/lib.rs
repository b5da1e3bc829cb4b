pub mod actions;
pub mod ber;
pub mod binary_attributes;
pub mod config;
pub mod container;
pub mod decoder;
pub mod grammar;
pub mod model;

pub use binary_attributes::{BinaryAttributeDetector, BinaryAttributes};
pub use config::Config;
pub use decoder::{
    DecodeError, DecodeWarning, DecoderConfig, LdapDecoder, ProtocolFailure, decode,
};
pub use model::{LdapMessage, OpKind, ProtocolOp, ResultCode};
