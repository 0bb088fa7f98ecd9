//! # remote-input-core
//!
//! Shared library for the remote input service containing the network
//! protocol codec and the event-translation rules.
//!
//! This crate is used by the server binary and by anything that speaks the
//! protocol to it (integration tests drive a real client through it). It has
//! zero dependencies on OS APIs, devices, or network sockets.
//!
//! # Architecture overview
//!
//! The remote input service turns a phone on the local network into a
//! trackpad and remote for this machine: the phone app sends pointer deltas,
//! wheel motion, and button presses; the service replays them on a virtual
//! input device so the host behaves as if real hardware produced them.
//!
//! This crate is the shared foundation. It defines:
//!
//! - **`protocol`** – How bytes travel over the network. Requests and
//!   replies are encoded into a compact binary format (24-byte header +
//!   payload) and decoded back into typed Rust structs on the other end.
//!
//! - **`domain`** – Pure logic with no OS dependencies: the event codes the
//!   virtual device is created with, the fixed button lookup table, and the
//!   translator that maps each request to an exact, ordered sequence of
//!   device emissions (including the rule that makes an X/Y motion pair one
//!   atomic input report).

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `remote_input_core::translate` instead of the full path.
pub use domain::emission::{button_code, Emission, EventCode, EventKind, DEVICE_CAPABILITIES};
pub use domain::translate::translate;
pub use protocol::codec::{decode_reply, decode_request, encode_reply, encode_request, ProtocolError};
pub use protocol::messages::{ServiceReply, ServiceRequest, SERVICE_PORT};
