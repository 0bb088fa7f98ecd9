//! Linux uinput implementation of `VirtualInputDevice`.
//!
//! Creates a virtual device node through `/dev/uinput` registered with the
//! fixed capability set from `remote_input_core`, then replays incoming
//! emissions as kernel input events.

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, EventType, InputEvent, Key, RelativeAxisType};
use remote_input_core::domain::emission::{EventCode, EventKind, DEVICE_CAPABILITIES};
use tracing::info;

use crate::application::dispatch::{DeviceError, VirtualInputDevice};

/// Virtual device backed by the kernel's uinput facility.
///
/// Unsynchronized emissions are buffered; the next synchronized emission
/// flushes the whole batch in a single device write.  The kernel appends one
/// `SYN_REPORT` per write, so readers of the device see a buffered X/Y motion
/// pair as one atomic input frame.
pub struct UinputDevice {
    device: VirtualDevice,
    pending: Vec<InputEvent>,
}

impl UinputDevice {
    /// Creates the device node, failing fast when `/dev/uinput` is missing or
    /// not writable.
    pub fn create(name: &str) -> Result<Self, DeviceError> {
        let mut keys = AttributeSet::<Key>::new();
        let mut axes = AttributeSet::<RelativeAxisType>::new();
        for code in DEVICE_CAPABILITIES {
            match code.kind() {
                EventKind::Key => keys.insert(Key::new(code.raw())),
                EventKind::Relative => axes.insert(RelativeAxisType(code.raw())),
            }
        }

        let device = VirtualDeviceBuilder::new()
            .map_err(DeviceError::Creation)?
            .name(name)
            .with_keys(&keys)
            .map_err(DeviceError::Creation)?
            .with_relative_axes(&axes)
            .map_err(DeviceError::Creation)?
            .build()
            .map_err(DeviceError::Creation)?;

        info!("virtual uinput device created, name: {name:?}");
        Ok(Self {
            device,
            pending: Vec::with_capacity(2),
        })
    }
}

impl VirtualInputDevice for UinputDevice {
    fn emit(
        &mut self,
        code: EventCode,
        value: i32,
        synchronize: bool,
    ) -> Result<(), DeviceError> {
        let event_type = match code.kind() {
            EventKind::Relative => EventType::RELATIVE,
            EventKind::Key => EventType::KEY,
        };
        self.pending.push(InputEvent::new(event_type, code.raw(), value));

        if synchronize {
            // The buffer is cleared even on failure so a broken write cannot
            // leak stale events into the next frame.
            let result = self.device.emit(&self.pending).map_err(DeviceError::Write);
            self.pending.clear();
            result?;
        }
        Ok(())
    }
}
