//! Virtual input device implementations.
//!
//! The kernel-backed implementation is selected at compile time via
//! `#[cfg(target_os = ...)]`; the recording mock is always compiled so tests
//! run on any host.

use crate::application::dispatch::{DeviceError, VirtualInputDevice};

pub mod mock;

#[cfg(target_os = "linux")]
pub mod uinput;

/// Opens the platform's virtual input device under the given name.
///
/// # Errors
///
/// Returns [`DeviceError::Creation`] when the device cannot be created:
/// `/dev/uinput` missing or not writable, or a platform without uinput
/// support at all.
pub fn open_default_device(name: &str) -> Result<Box<dyn VirtualInputDevice>, DeviceError> {
    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(uinput::UinputDevice::create(name)?))
    }

    #[cfg(not(target_os = "linux"))]
    {
        let _ = name;
        Err(DeviceError::Creation(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "virtual input devices require Linux uinput",
        )))
    }
}
