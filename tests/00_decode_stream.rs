mod support;

use ldapcrab::model::{AttributeValue, Control, Filter};
use ldapcrab::{DecodeError, DecoderConfig, LdapDecoder, LdapMessage, OpKind, ProtocolOp, decode};
use support::*;

const BASE: &str = "dc=example,dc=com";

/// A client and server exchange written back to back.
fn session() -> Vec<Vec<u8>> {
    let paged = seq(0x30, &[int(0x02, 100), tlv(0x04, b"")]);
    vec![
        message(1, simple_bind("cn=admin,dc=example,dc=com", "secret")),
        message(1, ldap_result(0x61, 0, "", "", &[])),
        message_with_controls(
            2,
            search(BASE, seq(0xA0, &[present("cn"), present("sn")]), &["cn", "mail"]),
            seq(
                0xA0,
                &[control("1.2.840.113556.1.4.319", true, Some(&paged))],
            ),
        ),
        message(
            2,
            entry(
                "cn=alice,dc=example,dc=com",
                &[("cn", &[b"alice"]), ("jpegPhoto", &[&[0xFF, 0xD8, 0xFF]])],
            ),
        ),
        message(2, ldap_result(0x65, 0, "", "", &[])),
        message(3, unbind()),
    ]
}

fn decode_in_chunks(stream: &[u8], chunk_size: usize) -> Vec<LdapMessage> {
    let mut decoder = LdapDecoder::new(&DecoderConfig::default());
    let mut out = Vec::new();

    for chunk in stream.chunks(chunk_size) {
        decoder.feed(chunk);
        while let Some(message) = decoder.next().unwrap() {
            out.push(message);
        }
    }

    assert!(decoder.is_idle());
    out
}

#[test]
fn session_decodes_one_shot() {
    let config = DecoderConfig::default();
    let messages: Vec<LdapMessage> = session()
        .iter()
        .map(|bytes| decode(bytes, &config).unwrap())
        .collect();

    let kinds: Vec<OpKind> = messages.iter().map(|m| m.protocol_op.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            OpKind::BindRequest,
            OpKind::BindResponse,
            OpKind::SearchRequest,
            OpKind::SearchResultEntry,
            OpKind::SearchResultDone,
            OpKind::UnbindRequest,
        ]
    );

    let ProtocolOp::SearchRequest(search) = &messages[2].protocol_op else {
        panic!("expected a search request");
    };
    assert_eq!(search.base_object.as_str(), BASE);
    assert_eq!(search.attributes, vec!["cn".to_string(), "mail".to_string()]);
    assert_eq!(
        search.filter,
        Some(Filter::And(vec![
            Filter::Present("cn".into()),
            Filter::Present("sn".into()),
        ]))
    );

    let controls = messages[2].controls.as_ref().unwrap();
    assert_eq!(controls.len(), 1);
    assert_eq!(
        controls[0],
        Control {
            oid: "1.2.840.113556.1.4.319".into(),
            criticality: true,
            value: Some(seq(0x30, &[int(0x02, 100), tlv(0x04, b"")])),
        }
    );

    let ProtocolOp::SearchResultEntry(entry) = &messages[3].protocol_op else {
        panic!("expected an entry");
    };
    assert_eq!(entry.attributes[0].values, vec![AttributeValue::Text("alice".into())]);
    assert_eq!(
        entry.attributes[1].values,
        vec![AttributeValue::Binary(vec![0xFF, 0xD8, 0xFF])]
    );
}

#[test]
fn any_chunking_matches_one_shot() {
    let config = DecoderConfig::default();
    let messages = session();
    let expected: Vec<LdapMessage> = messages
        .iter()
        .map(|bytes| decode(bytes, &config).unwrap())
        .collect();
    let stream = messages.concat();

    for chunk_size in [1, 2, 3, 5, 8, 13, 64, stream.len()] {
        assert_eq!(
            decode_in_chunks(&stream, chunk_size),
            expected,
            "chunk size {chunk_size}"
        );
    }
}

#[test]
fn decoding_is_deterministic() {
    let config = DecoderConfig::default();
    for bytes in session() {
        assert_eq!(decode(&bytes, &config), decode(&bytes, &config));
    }
}

#[test]
fn stream_recovers_after_a_failure() {
    let mut decoder = LdapDecoder::new(&DecoderConfig::default());

    // Empty controls after a search request.
    let broken = message_with_controls(4, search(BASE, present("cn"), &[]), tlv(0xA0, &[]));
    decoder.feed(&broken);
    let failure = decoder.next().unwrap_err();
    assert_eq!(failure.error, DecodeError::EmptyField("controls"));
    assert_eq!(failure.message_id, Some(4));
    assert_eq!(failure.response_kind(), Some(OpKind::SearchResultDone));
    assert!(decoder.is_idle());

    decoder.feed(&message(5, unbind()));
    assert_eq!(decoder.next().unwrap().unwrap().message_id, 5);
}

#[test]
fn truncated_message_waits() {
    let bytes = message(6, simple_bind("", ""));
    let mut decoder = LdapDecoder::new(&DecoderConfig::default());

    decoder.feed(&bytes[..bytes.len() - 1]);
    assert_eq!(decoder.next().unwrap(), None);
    assert_eq!(
        decode(&bytes[..bytes.len() - 1], &DecoderConfig::default()),
        Err(DecodeError::Truncated)
    );

    decoder.feed(&bytes[bytes.len() - 1..]);
    let message = decoder.next().unwrap().unwrap();
    assert_eq!(Ok(message), decode(&bytes, &DecoderConfig::default()));
}

#[test]
fn captured_search_request() {
    // ldapsearch -b dc=example,dc=com '(objectClass=*)'
    let bytes = hex::decode(concat!(
        "3036020102",
        "6331",
        "041164633d6578616d706c652c64633d636f6d",
        "0a0102",
        "0a0100",
        "020100",
        "020100",
        "010100",
        "870b6f626a656374436c617373",
        "3000",
    ))
    .unwrap();

    let message = decode(&bytes, &DecoderConfig::default()).unwrap();
    assert_eq!(message.message_id, 2);

    let ProtocolOp::SearchRequest(search) = message.protocol_op else {
        panic!("expected a search request");
    };
    assert_eq!(search.base_object.as_str(), BASE);
    assert_eq!(search.filter, Some(Filter::Present("objectClass".into())));
    assert!(search.attributes.is_empty());
    assert!(!search.types_only);
}
