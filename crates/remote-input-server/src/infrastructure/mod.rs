//! Infrastructure layer for the input service.
//!
//! Contains OS-facing adapters: the virtual input device, TCP network I/O,
//! mDNS advertisement, and network interface enumeration.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `remote_input_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`device`** – OS-specific implementations of `VirtualInputDevice`.  The
//!   correct implementation is selected at compile time using
//!   `#[cfg(target_os)]`.  A `RecordingDevice` is also provided for tests.
//!
//! - **`network`** – TCP listener that accepts peer connections, reads framed
//!   requests off each socket, feeds them through a fixed worker pool, and
//!   writes the replies back.
//!
//! - **`discovery`** – mDNS advertisement of the service instance so peers on
//!   the local network can find it without configuration.
//!
//! - **`netif`** – Enumeration of local network interfaces to pick the
//!   private IPv4 address carried in the advertisement.

pub mod device;
pub mod discovery;
pub mod netif;
pub mod network;
