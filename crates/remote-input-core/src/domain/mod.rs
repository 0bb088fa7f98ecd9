//! Pure domain logic: event codes, the capability set, and the request →
//! emission translation rules. No OS, socket, or runtime dependencies.

pub mod emission;
pub mod translate;

pub use emission::{button_code, Emission, EventCode, EventKind, DEVICE_CAPABILITIES};
pub use translate::translate;
