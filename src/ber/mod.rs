pub mod length;
pub mod primitive;
pub mod tag;
pub mod tlv;

pub use length::{Length, read_length};
pub use primitive::{parse_boolean, parse_integer};
pub use tlv::{Header, Tlv, TlvRead, next_tlv, read_header};
