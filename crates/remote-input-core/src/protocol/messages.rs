//! All remote-input protocol message types.
//!
//! The service is strictly call-and-response: a peer sends one of four
//! request messages and receives exactly one reply per request. Requests and
//! replies share the same frame header (see [`crate::protocol::codec`]) but
//! are kept as separate enums because no message ever travels in both
//! directions.

use serde::{Deserialize, Serialize};

// ── Protocol constants ────────────────────────────────────────────────────────

/// Current protocol version byte.
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Total size of the common frame header in bytes.
pub const HEADER_SIZE: usize = 24;

/// Fixed TCP port the service listens on and advertises.
pub const SERVICE_PORT: u16 = 17863;

/// Largest payload any request message carries on the wire ([`Scroll`] and
/// [`MotionDelta`], two `i32` values each). A frame declaring more than this
/// cannot be a request of this protocol.
///
/// [`Scroll`]: MessageType::Scroll
/// [`MotionDelta`]: MessageType::MotionDelta
pub const MAX_REQUEST_PAYLOAD: usize = 8;

// ── Message type codes ────────────────────────────────────────────────────────

/// All message type codes carried in the frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    // Control requests (0x01–0x3F)
    Connect = 0x01,
    // Input-event requests (0x40–0x7F)
    Scroll = 0x40,
    MotionDelta = 0x41,
    ButtonEvent = 0x42,
    // Replies (0x80–0xFF)
    ConnectAck = 0x81,
    Ack = 0x82,
    Error = 0x8F,
}

impl TryFrom<u8> for MessageType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0x01 => Ok(MessageType::Connect),
            0x40 => Ok(MessageType::Scroll),
            0x41 => Ok(MessageType::MotionDelta),
            0x42 => Ok(MessageType::ButtonEvent),
            0x81 => Ok(MessageType::ConnectAck),
            0x82 => Ok(MessageType::Ack),
            0x8F => Ok(MessageType::Error),
            _ => Err(()),
        }
    }
}

impl MessageType {
    /// Returns `true` for the request half of the code space.
    pub fn is_request(self) -> bool {
        (self as u8) < 0x80
    }
}

// ── Common frame header ───────────────────────────────────────────────────────

/// 24-byte header prepended to every frame on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameHeader {
    /// Protocol version; always [`PROTOCOL_VERSION`].
    pub version: u8,
    /// Identifies the payload type.
    pub message_type: MessageType,
    /// Length of the payload in bytes (not including this header).
    pub payload_length: u32,
    /// Set by the message originator; a reply echoes the sequence number of
    /// the request it answers, so peers can correlate replies that complete
    /// out of order.
    pub sequence_number: u64,
    /// Microseconds since Unix epoch at encode time. Informational only.
    pub timestamp_us: u64,
}

// ── Request payload structs ───────────────────────────────────────────────────

/// CONNECT (0x01): liveness round-trip sent by a peer after connecting.
///
/// The check value is opaque to the service: it is echoed back unchanged and
/// never validated against prior state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectMessage {
    /// Arbitrary peer-chosen value, echoed in the [`ConnectAckMessage`].
    pub check: i32,
}

/// SCROLL (0x40): wheel motion on one or both axes.
///
/// A zero value on an axis means "no scroll on that axis" and produces no
/// device emission for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollMessage {
    /// Horizontal wheel delta (signed; positive = right).
    pub value_x: i32,
    /// Vertical wheel delta (signed; positive = up/away from user).
    pub value_y: i32,
}

/// MOTION_DELTA (0x41): relative pointer motion since the last message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionDeltaMessage {
    /// Horizontal pointer delta (signed; positive = right).
    pub delta_x: i32,
    /// Vertical pointer delta (signed; positive = down).
    pub delta_y: i32,
}

/// BUTTON_EVENT (0x42): a button or key changed state.
///
/// The identifier code space is defined by the remote peer: 1–3 are the
/// mouse buttons, 201–202 the volume keys. Identifiers outside the mapped
/// set are accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonEventMessage {
    /// Peer-side button identifier.
    pub button: u16,
    /// `true` on press, `false` on release.
    pub pressed: bool,
}

// ── Reply payload structs ─────────────────────────────────────────────────────

/// CONNECT_ACK (0x81): answer to a CONNECT, echoing its check value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectAckMessage {
    /// The check value from the request, unchanged.
    pub check: i32,
}

/// Service-level error codes carried in an [`ErrorMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ServiceErrorCode {
    /// Writing to the virtual input device failed for this request.
    EmissionFailed = 0x01,
    /// The frame was a reply type or otherwise not servable as a request.
    UnsupportedMessage = 0x02,
    /// The frame was well-delimited but its payload could not be parsed.
    MalformedPayload = 0x03,
}

impl TryFrom<u8> for ServiceErrorCode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0x01 => Ok(ServiceErrorCode::EmissionFailed),
            0x02 => Ok(ServiceErrorCode::UnsupportedMessage),
            0x03 => Ok(ServiceErrorCode::MalformedPayload),
            _ => Err(()),
        }
    }
}

/// ERROR (0x8F): the request it answers failed; the connection stays open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// What went wrong, coarsely.
    pub error_code: ServiceErrorCode,
    /// Human-readable description for peer-side logging, not display.
    pub description: String,
}

// ── Top-level message enums ───────────────────────────────────────────────────

/// All valid requests, discriminated by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceRequest {
    Connect(ConnectMessage),
    Scroll(ScrollMessage),
    MotionDelta(MotionDeltaMessage),
    ButtonEvent(ButtonEventMessage),
}

impl ServiceRequest {
    /// Returns the [`MessageType`] discriminant for this request.
    pub fn message_type(&self) -> MessageType {
        match self {
            ServiceRequest::Connect(_) => MessageType::Connect,
            ServiceRequest::Scroll(_) => MessageType::Scroll,
            ServiceRequest::MotionDelta(_) => MessageType::MotionDelta,
            ServiceRequest::ButtonEvent(_) => MessageType::ButtonEvent,
        }
    }

    /// Returns the RPC operation name this request maps to, for logging and
    /// error descriptions.
    pub fn operation(&self) -> &'static str {
        match self {
            ServiceRequest::Connect(_) => "SendConnectData",
            ServiceRequest::Scroll(_) => "SendScrollData",
            ServiceRequest::MotionDelta(_) => "SendMouseData",
            ServiceRequest::ButtonEvent(_) => "SendButtonData",
        }
    }
}

/// All valid replies, discriminated by type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceReply {
    ConnectAck(ConnectAckMessage),
    /// Empty acknowledgement for the three input-event requests.
    Ack,
    Error(ErrorMessage),
}

impl ServiceReply {
    /// Returns the [`MessageType`] discriminant for this reply.
    pub fn message_type(&self) -> MessageType {
        match self {
            ServiceReply::ConnectAck(_) => MessageType::ConnectAck,
            ServiceReply::Ack => MessageType::Ack,
            ServiceReply::Error(_) => MessageType::Error,
        }
    }
}
