use sphere_core::{PointerInput, PointerPhase};
use web_sys as web;

/// DOM event names and the phase each one maps to. Leave and cancel release
/// the pointer exactly like up.
pub const POINTER_EVENTS: [(&str, PointerPhase); 5] = [
    ("pointermove", PointerPhase::Move),
    ("pointerdown", PointerPhase::Down),
    ("pointerup", PointerPhase::Up),
    ("pointerleave", PointerPhase::Leave),
    ("pointercancel", PointerPhase::Cancel),
];

/// Mouse, pen and touch all arrive as pointer events; only the primary
/// pointer drives the engine.
#[inline]
pub fn pointer_input(ev: &web::PointerEvent, phase: PointerPhase) -> PointerInput {
    PointerInput {
        phase,
        client_x: ev.client_x() as f32,
        client_y: ev.client_y() as f32,
        multi_touch: !ev.is_primary(),
    }
}
