//! Protocol module containing message types and the binary codec.

pub mod codec;
pub mod messages;
pub mod sequence;

pub use codec::{
    decode_header, decode_reply, decode_reply_payload, decode_request, decode_request_payload,
    encode_reply, encode_reply_now, encode_request, encode_request_now, ProtocolError,
};
pub use messages::*;
pub use sequence::SequenceCounter;
