//! Recording virtual device for testing.
//!
//! # Why a recording device?
//!
//! The real `UinputDevice` writes through `/dev/uinput`, which:
//!
//! - Requires root or a udev rule granting uinput access.
//! - Actually injects pointer motion and button presses on the test machine.
//! - Cannot be observed directly from Rust test code.
//!
//! The `RecordingDevice` replaces the kernel write with in-memory recording.
//! Every emit call is pushed onto a shared vector so test assertions can
//! inspect exactly what was emitted and in what order.
//!
//! # Usage in tests
//!
//! The dispatcher takes ownership of the boxed device, so keep clones of the
//! shared handles before handing it over:
//!
//! ```ignore
//! let device = RecordingDevice::new();
//! let (emissions, should_fail) = device.handles();
//! let dispatcher = Dispatcher::new(Box::new(device));
//!
//! dispatcher.dispatch(&request).await;
//!
//! let log = emissions.lock().unwrap();
//! assert_eq!(log[0], (EventCode::RelX, 4, false));
//! ```
//!
//! # `should_fail` flag
//!
//! Store `true` into `should_fail` to make every emit call return a write
//! error.  This lets you test error-handling paths without a broken kernel
//! device.  Failing calls are not recorded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use remote_input_core::domain::emission::EventCode;

use crate::application::dispatch::{DeviceError, VirtualInputDevice};

/// Shared record of emit calls as `(code, value, synchronize)` tuples.
pub type EmissionLog = Arc<Mutex<Vec<(EventCode, i32, bool)>>>;

/// A device that records all calls without touching the kernel.
#[derive(Default)]
pub struct RecordingDevice {
    /// Every emit call in order.
    pub emissions: EmissionLog,
    /// When `true`, every emit call fails with a write error.
    pub should_fail: Arc<AtomicBool>,
}

impl RecordingDevice {
    /// Creates a new `RecordingDevice` with an empty record and
    /// `should_fail = false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clones the shared handles so a test keeps access after the device has
    /// been boxed and moved into a dispatcher.
    pub fn handles(&self) -> (EmissionLog, Arc<AtomicBool>) {
        (Arc::clone(&self.emissions), Arc::clone(&self.should_fail))
    }
}

impl VirtualInputDevice for RecordingDevice {
    /// Records the emission, or returns an error if `should_fail` is set.
    fn emit(
        &mut self,
        code: EventCode,
        value: i32,
        synchronize: bool,
    ) -> Result<(), DeviceError> {
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DeviceError::Write(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "mock failure",
            )));
        }
        self.emissions
            .lock()
            .unwrap()
            .push((code, value, synchronize));
        Ok(())
    }
}
