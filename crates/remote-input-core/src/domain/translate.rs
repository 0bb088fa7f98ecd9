//! The event translator: maps one decoded request to the exact sequence of
//! device emissions that realizes it.
//!
//! The mapping is stateless and deterministic. Three rules matter:
//!
//! - Scroll emits per axis only when that axis is nonzero, each emission
//!   synchronized on its own. Zero-magnitude wheel events are never written
//!   because some input stacks interpret them as motion.
//! - MotionDelta always emits X with synchronization suppressed and then Y
//!   synchronized, even when a delta is zero. Consumers must see one
//!   synchronized report carrying both axes; two independently synchronized
//!   events would expose a transient half-motion state.
//! - ButtonEvent goes through the fixed identifier table; unknown
//!   identifiers translate to nothing at all.
//!
//! Connect is handled entirely at the dispatch layer (echo, no emission),
//! so it translates to an empty sequence here.

use crate::domain::emission::{button_code, Emission, EventCode};
use crate::protocol::messages::{
    ButtonEventMessage, MotionDeltaMessage, ScrollMessage, ServiceRequest,
};

/// Translates a request into the ordered emission sequence the device must
/// perform. The order of the returned vector is part of the contract.
pub fn translate(req: &ServiceRequest) -> Vec<Emission> {
    match req {
        ServiceRequest::Connect(_) => Vec::new(),
        ServiceRequest::Scroll(m) => translate_scroll(m),
        ServiceRequest::MotionDelta(m) => translate_motion_delta(m),
        ServiceRequest::ButtonEvent(m) => translate_button_event(m),
    }
}

/// Wheel motion: horizontal first, vertical second, each axis only when
/// nonzero and each synchronized individually.
pub fn translate_scroll(msg: &ScrollMessage) -> Vec<Emission> {
    let mut emissions = Vec::with_capacity(2);
    if msg.value_x != 0 {
        emissions.push(Emission {
            code: EventCode::RelHwheel,
            value: msg.value_x,
            synchronize: true,
        });
    }
    if msg.value_y != 0 {
        emissions.push(Emission {
            code: EventCode::RelWheel,
            value: msg.value_y,
            synchronize: true,
        });
    }
    emissions
}

/// Pointer motion: X buffered, Y synchronized, always both – the pair forms
/// one atomic input report.
pub fn translate_motion_delta(msg: &MotionDeltaMessage) -> Vec<Emission> {
    vec![
        Emission {
            code: EventCode::RelX,
            value: msg.delta_x,
            synchronize: false,
        },
        Emission {
            code: EventCode::RelY,
            value: msg.delta_y,
            synchronize: true,
        },
    ]
}

/// Button state change: one synchronized emission for a mapped identifier,
/// nothing for an unmapped one.
pub fn translate_button_event(msg: &ButtonEventMessage) -> Vec<Emission> {
    match button_code(msg.button) {
        Some(code) => vec![Emission {
            code,
            value: if msg.pressed { 1 } else { 0 },
            synchronize: true,
        }],
        None => Vec::new(),
    }
}
