//! Application layer use cases for the input service.
//!
//! # What use cases does the service have?
//!
//! - **`dispatch`** – Takes one decoded `ServiceRequest`, translates it into
//!   device emissions, and drives them through a `VirtualInputDevice`
//!   implementation that is injected at construction time.  Produces the
//!   `ServiceReply` the network layer sends back.

pub mod dispatch;
