//! remote-input-server library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the service do? (for beginners)
//!
//! This machine's pointer is driven remotely: a peer application (for
//! example on a phone sharing the LAN) sends motion, scroll, and button
//! messages, and the service replays them on a virtual input device so the
//! host treats them exactly like events from a physical mouse.
//!
//! The service:
//!
//! 1. Creates a virtual input device through the Linux uinput facility,
//!    registered with the relative axes and buttons it will ever emit.
//! 2. Binds a TCP listener on the fixed service port, on every interface.
//! 3. Advertises itself over mDNS so peers discover it without any
//!    configuration, under an instance name embedding the hostname.
//! 4. Reads framed requests off each peer connection and feeds them through
//!    a fixed worker pool.
//! 5. Translates each request into low-level input events and writes them to
//!    the virtual device, answering every request with exactly one reply.

/// Application layer: the request dispatch use case.
pub mod application;

/// Service configuration.
pub mod config;

/// Infrastructure layer: uinput device, TCP listener, mDNS, interfaces.
pub mod infrastructure;
