//! BER builders for hand-written LDAP messages.
#![allow(dead_code)]

use bytes::{BufMut, BytesMut};

// -----------------------------------------------------------------------------
// ----- Primitives ------------------------------------------------------------

pub fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(content.len() + 6);
    buf.put_u8(tag);
    put_length(&mut buf, content.len());
    buf.put_slice(content);
    buf.to_vec()
}

pub fn seq(tag: u8, parts: &[Vec<u8>]) -> Vec<u8> {
    tlv(tag, &parts.concat())
}

pub fn text(tag: u8, value: &str) -> Vec<u8> {
    tlv(tag, value.as_bytes())
}

/// Minimal two's complement, as BER requires.
pub fn int(tag: u8, value: i32) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < 3 {
        let (head, next) = (bytes[start], bytes[start + 1]);
        let redundant = (head == 0x00 && next & 0x80 == 0) || (head == 0xFF && next & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    tlv(tag, &bytes[start..])
}

pub fn boolean(value: bool) -> Vec<u8> {
    tlv(0x01, &[if value { 0xFF } else { 0x00 }])
}

fn put_length(buf: &mut BytesMut, len: usize) {
    match len {
        0..=0x7F => buf.put_u8(len as u8),
        0x80..=0xFF => {
            buf.put_u8(0x81);
            buf.put_u8(len as u8);
        }
        0x100..=0xFFFF => {
            buf.put_u8(0x82);
            buf.put_u16(len as u16);
        }
        _ => {
            buf.put_u8(0x84);
            buf.put_u32(len as u32);
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Envelope --------------------------------------------------------------

pub fn message(id: i32, op: Vec<u8>) -> Vec<u8> {
    seq(0x30, &[int(0x02, id), op])
}

pub fn message_with_controls(id: i32, op: Vec<u8>, controls: Vec<u8>) -> Vec<u8> {
    seq(0x30, &[int(0x02, id), op, controls])
}

pub fn control(oid: &str, critical: bool, value: Option<&[u8]>) -> Vec<u8> {
    let mut parts = vec![text(0x04, oid)];
    if critical {
        parts.push(boolean(true));
    }
    if let Some(value) = value {
        parts.push(tlv(0x04, value));
    }
    seq(0x30, &parts)
}

/// resultCode, matchedDN, diagnosticMessage, then any trailing elements.
pub fn ldap_result(
    tag: u8,
    code: i32,
    matched: &str,
    diagnostic: &str,
    rest: &[Vec<u8>],
) -> Vec<u8> {
    let mut parts = vec![int(0x0A, code), text(0x04, matched), text(0x04, diagnostic)];
    parts.extend_from_slice(rest);
    seq(tag, &parts)
}

// -----------------------------------------------------------------------------
// ----- Operations ------------------------------------------------------------

pub fn simple_bind(name: &str, password: &str) -> Vec<u8> {
    seq(0x60, &[int(0x02, 3), text(0x04, name), text(0x80, password)])
}

pub fn present(attr: &str) -> Vec<u8> {
    text(0x87, attr)
}

pub fn equality(attr: &str, value: &[u8]) -> Vec<u8> {
    seq(0xA3, &[text(0x04, attr), tlv(0x04, value)])
}

pub fn search(base: &str, filter: Vec<u8>, attrs: &[&str]) -> Vec<u8> {
    let selection: Vec<Vec<u8>> = attrs.iter().map(|a| text(0x04, a)).collect();
    seq(
        0x63,
        &[
            text(0x04, base),
            int(0x0A, 2),
            int(0x0A, 0),
            int(0x02, 0),
            int(0x02, 0),
            boolean(false),
            filter,
            seq(0x30, &selection),
        ],
    )
}

pub fn entry(dn: &str, attrs: &[(&str, &[&[u8]])]) -> Vec<u8> {
    let attributes: Vec<Vec<u8>> = attrs
        .iter()
        .map(|(name, values)| {
            let vals: Vec<Vec<u8>> = values.iter().map(|v| tlv(0x04, v)).collect();
            seq(0x30, &[text(0x04, name), seq(0x31, &vals)])
        })
        .collect();
    seq(0x64, &[text(0x04, dn), seq(0x30, &attributes)])
}

pub fn replace(dn: &str, attr: &str, values: &[&[u8]]) -> Vec<u8> {
    let vals: Vec<Vec<u8>> = values.iter().map(|v| tlv(0x04, v)).collect();
    let change = seq(
        0x30,
        &[int(0x0A, 2), seq(0x30, &[text(0x04, attr), seq(0x31, &vals)])],
    );
    seq(0x66, &[text(0x04, dn), seq(0x30, &[change])])
}

pub fn unbind() -> Vec<u8> {
    tlv(0x42, &[])
}
