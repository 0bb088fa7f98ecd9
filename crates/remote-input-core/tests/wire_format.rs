//! Integration tests pinning the wire format of the remote-input protocol.
//!
//! The in-module codec tests cover behavior through the public API; these
//! tests pin the actual byte layout so an incompatible change to the header
//! or a payload cannot slip through a matching encode/decode pair. They also
//! exercise the split-header streaming path the server read loop uses.

use remote_input_core::protocol::{
    decode_header, decode_reply, decode_request, decode_request_payload, encode_reply,
    encode_request,
    messages::{
        ButtonEventMessage, ConnectAckMessage, ConnectMessage, ErrorMessage, MessageType,
        MotionDeltaMessage, ScrollMessage, ServiceErrorCode, ServiceReply, ServiceRequest,
        HEADER_SIZE,
    },
    ProtocolError, SequenceCounter,
};

// ── Golden frames ─────────────────────────────────────────────────────────────

#[test]
fn test_connect_frame_byte_layout() {
    let frame = encode_request(
        &ServiceRequest::Connect(ConnectMessage { check: 42 }),
        7,
        12_345_678,
    )
    .unwrap();

    #[rustfmt::skip]
    let expected: &[u8] = &[
        0x01,                   // version
        0x01,                   // type: Connect
        0x00, 0x00,             // reserved
        0x00, 0x00, 0x00, 0x04, // payload length
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07, // sequence number
        0x00, 0x00, 0x00, 0x00, 0x00, 0xBC, 0x61, 0x4E, // timestamp (µs)
        0x00, 0x00, 0x00, 0x2A, // check = 42
    ];
    assert_eq!(frame, expected);
}

#[test]
fn test_motion_delta_frame_byte_layout() {
    let frame = encode_request(
        &ServiceRequest::MotionDelta(MotionDeltaMessage {
            delta_x: -1,
            delta_y: 2,
        }),
        1,
        0,
    )
    .unwrap();

    assert_eq!(frame[1], 0x41, "MotionDelta type byte");
    assert_eq!(&frame[4..8], &[0x00, 0x00, 0x00, 0x08], "payload length");
    assert_eq!(
        &frame[HEADER_SIZE..],
        &[0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x02],
        "two's-complement big-endian deltas"
    );
}

#[test]
fn test_scroll_frame_byte_layout() {
    let frame = encode_request(
        &ServiceRequest::Scroll(ScrollMessage {
            value_x: -3,
            value_y: 120,
        }),
        0,
        0,
    )
    .unwrap();

    assert_eq!(frame[1], 0x40, "Scroll type byte");
    assert_eq!(
        &frame[HEADER_SIZE..],
        &[0xFF, 0xFF, 0xFF, 0xFD, 0x00, 0x00, 0x00, 0x78]
    );
}

#[test]
fn test_button_event_frame_byte_layout() {
    let frame = encode_request(
        &ServiceRequest::ButtonEvent(ButtonEventMessage {
            button: 201,
            pressed: true,
        }),
        0,
        0,
    )
    .unwrap();

    assert_eq!(frame[1], 0x42, "ButtonEvent type byte");
    assert_eq!(
        &frame[HEADER_SIZE..],
        &[0x00, 0xC9, 0x01],
        "button id 201 big-endian + pressed byte"
    );
}

#[test]
fn test_ack_frame_is_header_only() {
    let frame = encode_reply(&ServiceReply::Ack, 9, 0).unwrap();

    assert_eq!(frame.len(), HEADER_SIZE);
    assert_eq!(frame[1], 0x82, "Ack type byte");
    assert_eq!(
        &frame[8..16],
        &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x09],
        "echoed sequence number"
    );
}

#[test]
fn test_connect_ack_frame_byte_layout() {
    let frame = encode_reply(
        &ServiceReply::ConnectAck(ConnectAckMessage { check: -7 }),
        0,
        0,
    )
    .unwrap();

    assert_eq!(frame[1], 0x81, "ConnectAck type byte");
    assert_eq!(&frame[HEADER_SIZE..], &[0xFF, 0xFF, 0xFF, 0xF9]);
}

#[test]
fn test_error_frame_byte_layout() {
    let frame = encode_reply(
        &ServiceReply::Error(ErrorMessage {
            error_code: ServiceErrorCode::EmissionFailed,
            description: "dev".to_string(),
        }),
        0,
        0,
    )
    .unwrap();

    assert_eq!(frame[1], 0x8F, "Error type byte");
    assert_eq!(
        &frame[HEADER_SIZE..],
        &[0x01, 0x00, 0x03, b'd', b'e', b'v'],
        "code byte + length-prefixed description"
    );
}

// ── Streaming reassembly ──────────────────────────────────────────────────────

/// Decodes a frame the way the server read loop does: header first, then the
/// payload slice, after the bytes arrive in two arbitrary chunks.
#[test]
fn test_frame_decodes_identically_across_any_split_point() {
    let req = ServiceRequest::MotionDelta(MotionDeltaMessage {
        delta_x: 1000,
        delta_y: -1000,
    });
    let frame = encode_request(&req, 3, 55).unwrap();

    for split in 1..frame.len() {
        // Simulate two TCP segments arriving separately.
        let (first, second) = frame.split_at(split);
        let mut buffer = first.to_vec();

        // Nothing may parse before the full header has arrived.
        if buffer.len() < HEADER_SIZE {
            assert!(
                matches!(
                    decode_header(&buffer),
                    Err(ProtocolError::InsufficientData { .. })
                ),
                "split at byte {split} must not yield a header yet"
            );
        }

        buffer.extend_from_slice(second);
        let header = decode_header(&buffer[..HEADER_SIZE]).unwrap();
        let payload = &buffer[HEADER_SIZE..HEADER_SIZE + header.payload_length as usize];
        let decoded = decode_request_payload(header.message_type, payload).unwrap();

        assert_eq!(decoded, req, "split at byte {split}");
        assert_eq!(header.sequence_number, 3);
    }
}

#[test]
fn test_pipelined_requests_carry_counter_sequence() {
    // Arrange – a peer numbering a burst of requests from one counter
    let counter = SequenceCounter::new();
    let requests = [
        ServiceRequest::Connect(ConnectMessage { check: 1 }),
        ServiceRequest::MotionDelta(MotionDeltaMessage {
            delta_x: 2,
            delta_y: 2,
        }),
        ServiceRequest::Scroll(ScrollMessage {
            value_x: 0,
            value_y: 1,
        }),
        ServiceRequest::ButtonEvent(ButtonEventMessage {
            button: 1,
            pressed: true,
        }),
    ];

    let mut stream = Vec::new();
    for req in &requests {
        stream.extend_from_slice(&encode_request(req, counter.next(), 0).unwrap());
    }

    // Act – decode the whole pipelined burst back out of one buffer
    let mut offset = 0;
    let mut decoded = Vec::new();
    while offset < stream.len() {
        let (header, req, consumed) = decode_request(&stream[offset..]).unwrap();
        decoded.push((header.sequence_number, req));
        offset += consumed;
    }

    // Assert
    assert_eq!(offset, stream.len(), "no trailing bytes");
    let seqs: Vec<u64> = decoded.iter().map(|(seq, _)| *seq).collect();
    assert_eq!(seqs, vec![0, 1, 2, 3]);
    for ((_, got), want) in decoded.iter().zip(requests.iter()) {
        assert_eq!(got, want);
    }
}

#[test]
fn test_reply_frames_decode_with_request_sequence() {
    // The service answers request seq 41 with an Error reply; the peer must
    // get the same number back in the reply header.
    let reply = ServiceReply::Error(ErrorMessage {
        error_code: ServiceErrorCode::MalformedPayload,
        description: "SendScrollData: truncated payload".to_string(),
    });
    let frame = encode_reply(&reply, 41, 0).unwrap();

    let (header, decoded, consumed) = decode_reply(&frame).unwrap();

    assert_eq!(consumed, frame.len());
    assert_eq!(header.message_type, MessageType::Error);
    assert_eq!(header.sequence_number, 41);
    assert_eq!(decoded, reply);
}
