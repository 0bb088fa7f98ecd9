//! Binary codec for encoding and decoding remote-input protocol frames.
//!
//! Wire format:
//! ```text
//! [version:1][msg_type:1][reserved:2][payload_len:4][seq:8][timestamp_us:8][payload:N]
//! ```
//! Total header size: 24 bytes. All multi-byte integers are big-endian.
//!
//! The codec is direction-aware: [`decode_request`] accepts only the four
//! request types and [`decode_reply`] only the three reply types, because a
//! peer that receives a frame from the wrong half of the code space cannot
//! process it. Streaming callers that read the header and payload separately
//! use [`decode_header`] plus the matching `decode_*_payload` function.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::protocol::messages::{
    ButtonEventMessage, ConnectAckMessage, ConnectMessage, ErrorMessage, FrameHeader, MessageType,
    MotionDeltaMessage, ScrollMessage, ServiceErrorCode, ServiceReply, ServiceRequest, HEADER_SIZE,
    PROTOCOL_VERSION,
};
use thiserror::Error;

/// Errors that can occur during frame encoding or decoding.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The byte slice is shorter than the minimum required length.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The message type byte in the header is not a recognized value.
    #[error("unknown message type: 0x{0:02X}")]
    UnknownMessageType(u8),

    /// The protocol version in the header is not supported.
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(u8),

    /// The payload could not be parsed (wrong length, bad value, UTF-8 error,
    /// or a type from the wrong direction of the code space).
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The encoded payload length field does not match the data available.
    #[error("payload length mismatch: header says {declared}, available is {available}")]
    PayloadLengthMismatch { declared: usize, available: usize },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`ServiceRequest`] into a byte vector including the 24-byte
/// header.
///
/// The sequence number is **not** set by this function – pass a
/// pre-incremented value from a [`crate::protocol::SequenceCounter`].
///
/// # Errors
///
/// Returns [`ProtocolError`] if serialization fails.
///
/// # Examples
///
/// ```rust
/// use remote_input_core::protocol::{decode_request, encode_request};
/// use remote_input_core::protocol::messages::{ConnectMessage, ServiceRequest};
///
/// let req = ServiceRequest::Connect(ConnectMessage { check: 42 });
/// let bytes = encode_request(&req, 0, 0).unwrap();
/// let (header, decoded, consumed) = decode_request(&bytes).unwrap();
/// assert_eq!(decoded, req);
/// assert_eq!(header.sequence_number, 0);
/// assert_eq!(consumed, bytes.len());
/// ```
pub fn encode_request(
    req: &ServiceRequest,
    sequence_number: u64,
    timestamp_us: u64,
) -> Result<Vec<u8>, ProtocolError> {
    let payload = encode_request_payload(req)?;
    Ok(encode_frame(
        req.message_type(),
        sequence_number,
        timestamp_us,
        &payload,
    ))
}

/// Encodes a [`ServiceRequest`] using the current system time as the
/// timestamp.
///
/// # Errors
///
/// Returns [`ProtocolError`] if serialization fails.
pub fn encode_request_now(
    req: &ServiceRequest,
    sequence_number: u64,
) -> Result<Vec<u8>, ProtocolError> {
    encode_request(req, sequence_number, unix_micros_now())
}

/// Encodes a [`ServiceReply`] into a byte vector including the 24-byte
/// header.
///
/// Pass the **request's** sequence number so the peer can correlate the
/// reply.
///
/// # Errors
///
/// Returns [`ProtocolError`] if serialization fails.
pub fn encode_reply(
    reply: &ServiceReply,
    sequence_number: u64,
    timestamp_us: u64,
) -> Result<Vec<u8>, ProtocolError> {
    let payload = encode_reply_payload(reply)?;
    Ok(encode_frame(
        reply.message_type(),
        sequence_number,
        timestamp_us,
        &payload,
    ))
}

/// Encodes a [`ServiceReply`] using the current system time as the timestamp.
///
/// # Errors
///
/// Returns [`ProtocolError`] if serialization fails.
pub fn encode_reply_now(
    reply: &ServiceReply,
    sequence_number: u64,
) -> Result<Vec<u8>, ProtocolError> {
    encode_reply(reply, sequence_number, unix_micros_now())
}

/// Parses and validates the 24-byte frame header at the start of `bytes`.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the slice is too short, the version is not
/// supported, or the type byte is unknown.
pub fn decode_header(bytes: &[u8]) -> Result<FrameHeader, ProtocolError> {
    if bytes.len() < HEADER_SIZE {
        return Err(ProtocolError::InsufficientData {
            needed: HEADER_SIZE,
            available: bytes.len(),
        });
    }

    let version = bytes[0];
    if version != PROTOCOL_VERSION {
        return Err(ProtocolError::UnsupportedVersion(version));
    }

    let msg_type_byte = bytes[1];
    let message_type = MessageType::try_from(msg_type_byte)
        .map_err(|_| ProtocolError::UnknownMessageType(msg_type_byte))?;

    // bytes[2..4] are reserved – ignored on decode

    let payload_length = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let sequence_number = u64::from_be_bytes([
        bytes[8], bytes[9], bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15],
    ]);
    let timestamp_us = u64::from_be_bytes([
        bytes[16], bytes[17], bytes[18], bytes[19], bytes[20], bytes[21], bytes[22], bytes[23],
    ]);

    Ok(FrameHeader {
        version,
        message_type,
        payload_length,
        sequence_number,
        timestamp_us,
    })
}

/// Decodes one complete request frame from the beginning of `bytes`.
///
/// Returns the parsed header, the decoded request, and the total number of
/// bytes consumed (header + payload), so the caller can advance their read
/// cursor.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the bytes are malformed or the frame is not
/// a request.
///
/// # Examples
///
/// ```rust
/// use remote_input_core::protocol::{decode_request, encode_request};
/// use remote_input_core::protocol::messages::{MotionDeltaMessage, ServiceRequest};
///
/// let req = ServiceRequest::MotionDelta(MotionDeltaMessage { delta_x: -4, delta_y: 9 });
/// let bytes = encode_request(&req, 7, 0).unwrap();
/// let (_, decoded, n) = decode_request(&bytes).unwrap();
/// assert_eq!(decoded, req);
/// assert_eq!(n, bytes.len());
/// ```
pub fn decode_request(bytes: &[u8]) -> Result<(FrameHeader, ServiceRequest, usize), ProtocolError> {
    let (header, payload, consumed) = split_frame(bytes)?;
    let req = decode_request_payload(header.message_type, payload)?;
    Ok((header, req, consumed))
}

/// Decodes one complete reply frame from the beginning of `bytes`.
///
/// The counterpart of [`decode_request`] for the peer side of the wire.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the bytes are malformed or the frame is not
/// a reply.
pub fn decode_reply(bytes: &[u8]) -> Result<(FrameHeader, ServiceReply, usize), ProtocolError> {
    let (header, payload, consumed) = split_frame(bytes)?;
    let reply = decode_reply_payload(header.message_type, payload)?;
    Ok((header, reply, consumed))
}

/// Decodes a request payload whose header has already been read.
///
/// # Errors
///
/// Returns [`ProtocolError::MalformedPayload`] if `msg_type` is not a
/// request type or the payload does not parse.
pub fn decode_request_payload(
    msg_type: MessageType,
    payload: &[u8],
) -> Result<ServiceRequest, ProtocolError> {
    match msg_type {
        MessageType::Connect => decode_connect(payload).map(ServiceRequest::Connect),
        MessageType::Scroll => decode_scroll(payload).map(ServiceRequest::Scroll),
        MessageType::MotionDelta => decode_motion_delta(payload).map(ServiceRequest::MotionDelta),
        MessageType::ButtonEvent => decode_button_event(payload).map(ServiceRequest::ButtonEvent),
        other => Err(ProtocolError::MalformedPayload(format!(
            "{other:?} is not a request type"
        ))),
    }
}

/// Decodes a reply payload whose header has already been read.
///
/// # Errors
///
/// Returns [`ProtocolError::MalformedPayload`] if `msg_type` is not a reply
/// type or the payload does not parse.
pub fn decode_reply_payload(
    msg_type: MessageType,
    payload: &[u8],
) -> Result<ServiceReply, ProtocolError> {
    match msg_type {
        MessageType::ConnectAck => decode_connect_ack(payload).map(ServiceReply::ConnectAck),
        MessageType::Ack => Ok(ServiceReply::Ack),
        MessageType::Error => decode_error(payload).map(ServiceReply::Error),
        other => Err(ProtocolError::MalformedPayload(format!(
            "{other:?} is not a reply type"
        ))),
    }
}

// ── Frame assembly ────────────────────────────────────────────────────────────

fn encode_frame(
    msg_type: MessageType,
    sequence_number: u64,
    timestamp_us: u64,
    payload: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());

    // Header: version (1) + msg_type (1) + reserved (2) + payload_len (4) +
    //         seq (8) + timestamp_us (8) = 24 bytes
    buf.push(PROTOCOL_VERSION);
    buf.push(msg_type as u8);
    buf.push(0x00); // reserved
    buf.push(0x00); // reserved
    buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    buf.extend_from_slice(&sequence_number.to_be_bytes());
    buf.extend_from_slice(&timestamp_us.to_be_bytes());

    buf.extend_from_slice(payload);
    buf
}

/// Validates the header and carves the payload slice out of `bytes`.
fn split_frame(bytes: &[u8]) -> Result<(FrameHeader, &[u8], usize), ProtocolError> {
    let header = decode_header(bytes)?;
    let payload_len = header.payload_length as usize;

    let total_needed = HEADER_SIZE + payload_len;
    if bytes.len() < total_needed {
        return Err(ProtocolError::PayloadLengthMismatch {
            declared: payload_len,
            available: bytes.len() - HEADER_SIZE,
        });
    }

    Ok((header, &bytes[HEADER_SIZE..total_needed], total_needed))
}

fn unix_micros_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros() as u64
}

// ── Payload encoding ──────────────────────────────────────────────────────────

fn encode_request_payload(req: &ServiceRequest) -> Result<Vec<u8>, ProtocolError> {
    let mut buf = Vec::new();
    match req {
        ServiceRequest::Connect(m) => buf.extend_from_slice(&m.check.to_be_bytes()),
        ServiceRequest::Scroll(m) => {
            buf.extend_from_slice(&m.value_x.to_be_bytes());
            buf.extend_from_slice(&m.value_y.to_be_bytes());
        }
        ServiceRequest::MotionDelta(m) => {
            buf.extend_from_slice(&m.delta_x.to_be_bytes());
            buf.extend_from_slice(&m.delta_y.to_be_bytes());
        }
        ServiceRequest::ButtonEvent(m) => {
            buf.extend_from_slice(&m.button.to_be_bytes());
            buf.push(if m.pressed { 0x01 } else { 0x00 });
        }
    }
    Ok(buf)
}

fn encode_reply_payload(reply: &ServiceReply) -> Result<Vec<u8>, ProtocolError> {
    let mut buf = Vec::new();
    match reply {
        ServiceReply::ConnectAck(m) => buf.extend_from_slice(&m.check.to_be_bytes()),
        ServiceReply::Ack => {} // empty payload
        ServiceReply::Error(m) => {
            buf.push(m.error_code as u8);
            write_length_prefixed_string(&mut buf, &m.description);
        }
    }
    Ok(buf)
}

// ── Per-message decode helpers ────────────────────────────────────────────────

fn decode_connect(p: &[u8]) -> Result<ConnectMessage, ProtocolError> {
    require_len(p, 4, "Connect")?;
    Ok(ConnectMessage {
        check: read_i32(p, 0)?,
    })
}

fn decode_scroll(p: &[u8]) -> Result<ScrollMessage, ProtocolError> {
    require_len(p, 8, "Scroll")?;
    Ok(ScrollMessage {
        value_x: read_i32(p, 0)?,
        value_y: read_i32(p, 4)?,
    })
}

fn decode_motion_delta(p: &[u8]) -> Result<MotionDeltaMessage, ProtocolError> {
    require_len(p, 8, "MotionDelta")?;
    Ok(MotionDeltaMessage {
        delta_x: read_i32(p, 0)?,
        delta_y: read_i32(p, 4)?,
    })
}

fn decode_button_event(p: &[u8]) -> Result<ButtonEventMessage, ProtocolError> {
    require_len(p, 3, "ButtonEvent")?;
    Ok(ButtonEventMessage {
        button: u16::from_be_bytes([p[0], p[1]]),
        pressed: p[2] != 0,
    })
}

fn decode_connect_ack(p: &[u8]) -> Result<ConnectAckMessage, ProtocolError> {
    require_len(p, 4, "ConnectAck")?;
    Ok(ConnectAckMessage {
        check: read_i32(p, 0)?,
    })
}

fn decode_error(p: &[u8]) -> Result<ErrorMessage, ProtocolError> {
    require_len(p, 3, "Error")?;
    let error_code = ServiceErrorCode::try_from(p[0])
        .map_err(|_| ProtocolError::MalformedPayload(format!("unknown error code: {}", p[0])))?;
    let (description, _) = read_length_prefixed_string(p, 1)?;
    Ok(ErrorMessage {
        error_code,
        description,
    })
}

// ── Utility helpers ───────────────────────────────────────────────────────────

fn require_len(buf: &[u8], needed: usize, context: &str) -> Result<(), ProtocolError> {
    if buf.len() < needed {
        Err(ProtocolError::MalformedPayload(format!(
            "{context}: need {needed} bytes, got {}",
            buf.len()
        )))
    } else {
        Ok(())
    }
}

fn read_i32(buf: &[u8], offset: usize) -> Result<i32, ProtocolError> {
    if buf.len() < offset + 4 {
        return Err(ProtocolError::InsufficientData {
            needed: offset + 4,
            available: buf.len(),
        });
    }
    Ok(i32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ]))
}

/// Writes a 2-byte length prefix followed by the UTF-8 string bytes.
fn write_length_prefixed_string(buf: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    let len = bytes.len().min(u16::MAX as usize) as u16;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(&bytes[..len as usize]);
}

/// Reads a 2-byte length prefix and then that many UTF-8 bytes.
/// Returns the string and the offset of the byte after the string.
fn read_length_prefixed_string(buf: &[u8], offset: usize) -> Result<(String, usize), ProtocolError> {
    if buf.len() < offset + 2 {
        return Err(ProtocolError::MalformedPayload(format!(
            "need 2 bytes for string length at offset {offset}"
        )));
    }
    let len = u16::from_be_bytes([buf[offset], buf[offset + 1]]) as usize;
    let start = offset + 2;
    if buf.len() < start + len {
        return Err(ProtocolError::MalformedPayload(format!(
            "string of length {len} at offset {start} exceeds buffer"
        )));
    }
    let s = std::str::from_utf8(&buf[start..start + len])
        .map_err(|e| ProtocolError::MalformedPayload(format!("invalid UTF-8: {e}")))?
        .to_string();
    Ok((s, start + len))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::*;

    fn round_trip_request(req: &ServiceRequest) -> (FrameHeader, ServiceRequest) {
        let encoded = encode_request(req, 5, 1_000).expect("encode failed");
        let (header, decoded, consumed) = decode_request(&encoded).expect("decode failed");
        assert_eq!(
            consumed,
            encoded.len(),
            "consumed bytes should equal total encoded size"
        );
        (header, decoded)
    }

    fn round_trip_reply(reply: &ServiceReply) -> (FrameHeader, ServiceReply) {
        let encoded = encode_reply(reply, 5, 1_000).expect("encode failed");
        let (header, decoded, consumed) = decode_reply(&encoded).expect("decode failed");
        assert_eq!(consumed, encoded.len());
        (header, decoded)
    }

    // ── Requests ─────────────────────────────────────────────────────────────

    #[test]
    fn test_connect_round_trip() {
        let req = ServiceRequest::Connect(ConnectMessage { check: 42 });
        let (header, decoded) = round_trip_request(&req);
        assert_eq!(decoded, req);
        assert_eq!(header.message_type, MessageType::Connect);
        assert_eq!(header.sequence_number, 5);
        assert_eq!(header.timestamp_us, 1_000);
    }

    #[test]
    fn test_connect_preserves_negative_and_extreme_checks() {
        for check in [0, -1, i32::MIN, i32::MAX] {
            let req = ServiceRequest::Connect(ConnectMessage { check });
            let (_, decoded) = round_trip_request(&req);
            assert_eq!(decoded, req, "check value {check} must survive the wire");
        }
    }

    #[test]
    fn test_scroll_round_trip() {
        let req = ServiceRequest::Scroll(ScrollMessage {
            value_x: -3,
            value_y: 120,
        });
        let (header, decoded) = round_trip_request(&req);
        assert_eq!(decoded, req);
        assert_eq!(header.message_type, MessageType::Scroll);
        assert_eq!(header.payload_length, 8);
    }

    #[test]
    fn test_motion_delta_round_trip() {
        let req = ServiceRequest::MotionDelta(MotionDeltaMessage {
            delta_x: i32::MIN,
            delta_y: i32::MAX,
        });
        let (_, decoded) = round_trip_request(&req);
        assert_eq!(decoded, req);
    }

    #[test]
    fn test_button_event_round_trip() {
        let pressed = ServiceRequest::ButtonEvent(ButtonEventMessage {
            button: 201,
            pressed: true,
        });
        let released = ServiceRequest::ButtonEvent(ButtonEventMessage {
            button: 3,
            pressed: false,
        });
        assert_eq!(round_trip_request(&pressed).1, pressed);
        assert_eq!(round_trip_request(&released).1, released);
    }

    #[test]
    fn test_button_event_nonzero_pressed_byte_decodes_as_pressed() {
        // Arrange – a hand-built payload with a nonstandard truthy byte
        let mut frame = encode_request(
            &ServiceRequest::ButtonEvent(ButtonEventMessage {
                button: 1,
                pressed: false,
            }),
            0,
            0,
        )
        .unwrap();
        *frame.last_mut().unwrap() = 0x02;

        // Act
        let (_, decoded, _) = decode_request(&frame).unwrap();

        // Assert – any nonzero byte counts as pressed
        assert_eq!(
            decoded,
            ServiceRequest::ButtonEvent(ButtonEventMessage {
                button: 1,
                pressed: true,
            })
        );
    }

    #[test]
    fn test_no_request_payload_exceeds_the_declared_maximum() {
        let requests = [
            ServiceRequest::Connect(ConnectMessage { check: i32::MAX }),
            ServiceRequest::Scroll(ScrollMessage {
                value_x: i32::MIN,
                value_y: i32::MAX,
            }),
            ServiceRequest::MotionDelta(MotionDeltaMessage {
                delta_x: i32::MIN,
                delta_y: i32::MAX,
            }),
            ServiceRequest::ButtonEvent(ButtonEventMessage {
                button: u16::MAX,
                pressed: true,
            }),
        ];

        for req in &requests {
            let encoded = encode_request(req, 0, 0).expect("encode failed");
            let (header, _, _) = decode_request(&encoded).expect("decode failed");
            assert!(
                header.payload_length as usize <= MAX_REQUEST_PAYLOAD,
                "{:?} payload of {} bytes breaks the request maximum",
                req.message_type(),
                header.payload_length
            );
        }
    }

    // ── Replies ──────────────────────────────────────────────────────────────

    #[test]
    fn test_connect_ack_round_trip() {
        let reply = ServiceReply::ConnectAck(ConnectAckMessage { check: -7 });
        let (header, decoded) = round_trip_reply(&reply);
        assert_eq!(decoded, reply);
        assert_eq!(header.message_type, MessageType::ConnectAck);
    }

    #[test]
    fn test_ack_round_trip_has_empty_payload() {
        let (header, decoded) = round_trip_reply(&ServiceReply::Ack);
        assert_eq!(decoded, ServiceReply::Ack);
        assert_eq!(header.payload_length, 0);
    }

    #[test]
    fn test_error_round_trip() {
        let reply = ServiceReply::Error(ErrorMessage {
            error_code: ServiceErrorCode::EmissionFailed,
            description: "SendMouseData: device write failed".to_string(),
        });
        assert_eq!(round_trip_reply(&reply).1, reply);
    }

    #[test]
    fn test_error_with_empty_description() {
        let reply = ServiceReply::Error(ErrorMessage {
            error_code: ServiceErrorCode::MalformedPayload,
            description: String::new(),
        });
        assert_eq!(round_trip_reply(&reply).1, reply);
    }

    #[test]
    fn test_reply_echoes_request_sequence_number() {
        // Arrange
        let req = ServiceRequest::Scroll(ScrollMessage {
            value_x: 0,
            value_y: 1,
        });
        let encoded_req = encode_request(&req, 99, 0).unwrap();
        let (req_header, _, _) = decode_request(&encoded_req).unwrap();

        // Act – the service encodes its reply with the request's sequence
        let encoded_reply = encode_reply(&ServiceReply::Ack, req_header.sequence_number, 0).unwrap();
        let (reply_header, _, _) = decode_reply(&encoded_reply).unwrap();

        // Assert
        assert_eq!(reply_header.sequence_number, 99);
    }

    // ── Error conditions ─────────────────────────────────────────────────────

    #[test]
    fn test_decode_empty_buffer_fails_with_insufficient_data() {
        let result = decode_request(&[]);
        assert_eq!(
            result,
            Err(ProtocolError::InsufficientData {
                needed: HEADER_SIZE,
                available: 0,
            })
        );
    }

    #[test]
    fn test_decode_truncated_header_fails() {
        let frame = encode_request(&ServiceRequest::Connect(ConnectMessage { check: 1 }), 0, 0)
            .unwrap();
        let result = decode_request(&frame[..HEADER_SIZE - 1]);
        assert!(matches!(
            result,
            Err(ProtocolError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_decode_unknown_message_type_fails() {
        let mut frame =
            encode_request(&ServiceRequest::Connect(ConnectMessage { check: 1 }), 0, 0).unwrap();
        frame[1] = 0x7E;
        assert_eq!(
            decode_request(&frame),
            Err(ProtocolError::UnknownMessageType(0x7E))
        );
    }

    #[test]
    fn test_decode_unsupported_version_fails() {
        let mut frame =
            encode_request(&ServiceRequest::Connect(ConnectMessage { check: 1 }), 0, 0).unwrap();
        frame[0] = 0x02;
        assert_eq!(
            decode_request(&frame),
            Err(ProtocolError::UnsupportedVersion(0x02))
        );
    }

    #[test]
    fn test_decode_truncated_payload_fails_with_length_mismatch() {
        let frame = encode_request(
            &ServiceRequest::Scroll(ScrollMessage {
                value_x: 1,
                value_y: 2,
            }),
            0,
            0,
        )
        .unwrap();
        let result = decode_request(&frame[..frame.len() - 2]);
        assert_eq!(
            result,
            Err(ProtocolError::PayloadLengthMismatch {
                declared: 8,
                available: 6,
            })
        );
    }

    #[test]
    fn test_decode_request_rejects_reply_frames() {
        let frame = encode_reply(&ServiceReply::Ack, 0, 0).unwrap();
        assert!(matches!(
            decode_request(&frame),
            Err(ProtocolError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_decode_reply_rejects_request_frames() {
        let frame =
            encode_request(&ServiceRequest::Connect(ConnectMessage { check: 9 }), 0, 0).unwrap();
        assert!(matches!(
            decode_reply(&frame),
            Err(ProtocolError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_decode_error_with_unknown_code_fails() {
        let mut frame = encode_reply(
            &ServiceReply::Error(ErrorMessage {
                error_code: ServiceErrorCode::EmissionFailed,
                description: "x".to_string(),
            }),
            0,
            0,
        )
        .unwrap();
        frame[HEADER_SIZE] = 0xEE;
        assert!(matches!(
            decode_reply(&frame),
            Err(ProtocolError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_decode_error_with_invalid_utf8_description_fails() {
        let mut frame = encode_reply(
            &ServiceReply::Error(ErrorMessage {
                error_code: ServiceErrorCode::EmissionFailed,
                description: "ab".to_string(),
            }),
            0,
            0,
        )
        .unwrap();
        let len = frame.len();
        frame[len - 1] = 0xFF;
        frame[len - 2] = 0xFE;
        assert!(matches!(
            decode_reply(&frame),
            Err(ProtocolError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_decode_header_alone_carries_all_fields() {
        // Arrange
        let frame = encode_request(
            &ServiceRequest::ButtonEvent(ButtonEventMessage {
                button: 2,
                pressed: true,
            }),
            1234,
            5678,
        )
        .unwrap();

        // Act – parse only the header slice, as the streaming read loop does
        let header = decode_header(&frame[..HEADER_SIZE]).unwrap();

        // Assert
        assert_eq!(header.version, PROTOCOL_VERSION);
        assert_eq!(header.message_type, MessageType::ButtonEvent);
        assert_eq!(header.payload_length, 3);
        assert_eq!(header.sequence_number, 1234);
        assert_eq!(header.timestamp_us, 5678);
    }

    #[test]
    fn test_two_frames_back_to_back_decode_in_sequence() {
        // Arrange – a buffer holding two concatenated frames, as read off TCP
        let first = ServiceRequest::MotionDelta(MotionDeltaMessage {
            delta_x: 1,
            delta_y: -1,
        });
        let second = ServiceRequest::Scroll(ScrollMessage {
            value_x: 0,
            value_y: 2,
        });
        let mut buffer = encode_request(&first, 0, 0).unwrap();
        buffer.extend_from_slice(&encode_request(&second, 1, 0).unwrap());

        // Act
        let (_, decoded_first, consumed) = decode_request(&buffer).unwrap();
        let (_, decoded_second, _) = decode_request(&buffer[consumed..]).unwrap();

        // Assert
        assert_eq!(decoded_first, first);
        assert_eq!(decoded_second, second);
    }
}
