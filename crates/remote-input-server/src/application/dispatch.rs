//! Request dispatch use case.
//!
//! One decoded [`ServiceRequest`] goes in, the [`ServiceReply`] to send back
//! comes out.  Translation into device events is pure (see
//! `remote_input_core::domain::translate`); this module owns the side effect
//! of driving those events through the injected [`VirtualInputDevice`].
//!
//! The device sits behind an async mutex that is taken once per request and
//! held across all of that request's emissions.  That is the property that
//! keeps an X/Y motion pair indivisible when several workers dispatch
//! concurrently: no other request's events can land between the unsynchronized
//! X write and the synchronized Y write.

use std::sync::Arc;

use remote_input_core::domain::emission::EventCode;
use remote_input_core::domain::translate::translate;
use remote_input_core::protocol::messages::{
    ConnectAckMessage, ErrorMessage, ServiceErrorCode, ServiceReply, ServiceRequest,
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};

// ── Device seam ───────────────────────────────────────────────────────────────

/// Errors a virtual input device can produce.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device node could not be created (missing kernel support, missing
    /// permissions, unsupported platform).
    #[error("failed to create virtual input device: {0}")]
    Creation(#[source] std::io::Error),

    /// Writing an event to the open device failed.
    #[error("failed to write input event: {0}")]
    Write(#[source] std::io::Error),
}

/// Platform-specific virtual input device.
///
/// Implementations write low-level input events to the host. `synchronize`
/// marks the end of an event frame: events emitted with `synchronize = false`
/// may be batched by the implementation until the next synchronized emission,
/// which must deliver the whole batch to consumers as one report.
///
/// The production implementation writes to a Linux uinput device (see
/// `infrastructure::device::uinput`); tests inject a recording stand-in.
pub trait VirtualInputDevice: Send {
    /// Writes one event, flushing the current frame when `synchronize` is set.
    fn emit(&mut self, code: EventCode, value: i32, synchronize: bool)
        -> Result<(), DeviceError>;
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Use case: answer one request, emitting its input events as a side effect.
///
/// Cloning is cheap and shares the underlying device, so every worker in the
/// pool holds its own `Dispatcher` handle.
#[derive(Clone)]
pub struct Dispatcher {
    device: Arc<Mutex<Box<dyn VirtualInputDevice>>>,
}

impl Dispatcher {
    /// Creates a dispatcher that emits through the given device.
    pub fn new(device: Box<dyn VirtualInputDevice>) -> Self {
        Self {
            device: Arc::new(Mutex::new(device)),
        }
    }

    /// Handles one request and returns the reply to send.
    ///
    /// Never fails at this level: a device write failure is converted into a
    /// [`ServiceReply::Error`] for that one request, and later requests are
    /// dispatched normally.
    pub async fn dispatch(&self, request: &ServiceRequest) -> ServiceReply {
        match request {
            ServiceRequest::Connect(msg) => {
                info!("connect data received, code: {}", msg.check);
                // Liveness round-trip only; nothing reaches the device.
                return ServiceReply::ConnectAck(ConnectAckMessage { check: msg.check });
            }
            ServiceRequest::Scroll(msg) => {
                trace!("scroll data received, x: {}, y: {}", msg.value_x, msg.value_y);
            }
            ServiceRequest::MotionDelta(msg) => {
                trace!("mouse data received, dx: {}, dy: {}", msg.delta_x, msg.delta_y);
            }
            ServiceRequest::ButtonEvent(msg) => {
                info!(
                    "button data received, id: {}, pressed: {}",
                    msg.button, msg.pressed
                );
            }
        }

        let emissions = translate(request);
        if emissions.is_empty() {
            // Zero-magnitude scroll or unmapped button identifier.
            if let ServiceRequest::ButtonEvent(msg) = request {
                debug!("button id {} has no mapping, ignoring", msg.button);
            }
            return ServiceReply::Ack;
        }

        // Held for the whole emission sequence of this request.
        let mut device = self.device.lock().await;
        for emission in &emissions {
            if let Err(e) = device.emit(emission.code, emission.value, emission.synchronize) {
                warn!("{} failed: {e}", request.operation());
                return ServiceReply::Error(ErrorMessage {
                    error_code: ServiceErrorCode::EmissionFailed,
                    description: format!("{}: {e}", request.operation()),
                });
            }
        }
        ServiceReply::Ack
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
