//! LDAP tag octets (RFC 4511 §4 and appendix B).
//!
//! Context-specific tags are only meaningful next to the state that reads
//! them, so several share a value.

// ----- Envelope --------------------------------------------------------------

pub const MESSAGE: u8 = 0x30;
pub const MESSAGE_ID: u8 = 0x02;
pub const CONTROLS: u8 = 0xA0;

// ----- Protocol operations ---------------------------------------------------

pub const BIND_REQUEST: u8 = 0x60;
pub const BIND_RESPONSE: u8 = 0x61;
pub const UNBIND_REQUEST: u8 = 0x42;
pub const SEARCH_REQUEST: u8 = 0x63;
pub const SEARCH_RESULT_ENTRY: u8 = 0x64;
pub const SEARCH_RESULT_DONE: u8 = 0x65;
pub const MODIFY_REQUEST: u8 = 0x66;
pub const MODIFY_RESPONSE: u8 = 0x67;
pub const ADD_REQUEST: u8 = 0x68;
pub const ADD_RESPONSE: u8 = 0x69;
pub const DEL_REQUEST: u8 = 0x4A;
pub const DEL_RESPONSE: u8 = 0x6B;
pub const MODIFY_DN_REQUEST: u8 = 0x6C;
pub const MODIFY_DN_RESPONSE: u8 = 0x6D;
pub const COMPARE_REQUEST: u8 = 0x6E;
pub const COMPARE_RESPONSE: u8 = 0x6F;
pub const ABANDON_REQUEST: u8 = 0x50;
pub const SEARCH_RESULT_REFERENCE: u8 = 0x73;
pub const EXTENDED_REQUEST: u8 = 0x77;
pub const EXTENDED_RESPONSE: u8 = 0x78;
pub const INTERMEDIATE_RESPONSE: u8 = 0x79;

// ----- LDAPResult and response extensions ------------------------------------

pub const REFERRAL: u8 = 0xA3;
pub const SERVER_SASL_CREDS: u8 = 0x87;
pub const RESPONSE_NAME: u8 = 0x8A;
pub const RESPONSE_VALUE: u8 = 0x8B;

// ----- Bind ------------------------------------------------------------------

pub const AUTH_SIMPLE: u8 = 0x80;
pub const AUTH_SASL: u8 = 0xA3;

// ----- Filter ----------------------------------------------------------------

pub const FILTER_AND: u8 = 0xA0;
pub const FILTER_OR: u8 = 0xA1;
pub const FILTER_NOT: u8 = 0xA2;
pub const FILTER_EQUALITY: u8 = 0xA3;
pub const FILTER_SUBSTRINGS: u8 = 0xA4;
pub const FILTER_GREATER_OR_EQUAL: u8 = 0xA5;
pub const FILTER_LESS_OR_EQUAL: u8 = 0xA6;
pub const FILTER_PRESENT: u8 = 0x87;
pub const FILTER_APPROX: u8 = 0xA8;
pub const FILTER_EXTENSIBLE: u8 = 0xA9;

pub const SUBSTRING_INITIAL: u8 = 0x80;
pub const SUBSTRING_ANY: u8 = 0x81;
pub const SUBSTRING_FINAL: u8 = 0x82;

pub const MATCHING_RULE: u8 = 0x81;
pub const MATCHING_TYPE: u8 = 0x82;
pub const MATCH_VALUE: u8 = 0x83;
pub const DN_ATTRIBUTES: u8 = 0x84;

// ----- ModifyDN / Extended / Intermediate ------------------------------------

pub const NEW_SUPERIOR: u8 = 0x80;
pub const REQUEST_NAME: u8 = 0x80;
pub const REQUEST_VALUE: u8 = 0x81;
pub const INTERMEDIATE_NAME: u8 = 0x80;
pub const INTERMEDIATE_VALUE: u8 = 0x81;
