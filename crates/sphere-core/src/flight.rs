//! Time-boxed camera flight toward a picked marker.

use crate::camera::Camera;
use crate::constants::{FLIGHT_DURATION_MS, FLIGHT_TARGET_SCALE};
use crate::marker::{MarkerField, MarkerVisual};
use glam::Vec3;
use std::time::Duration;

/// How the camera destination is derived from the marker position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlightTarget {
    ScaledPosition(f32),
    Offset(Vec3),
}

impl Default for FlightTarget {
    fn default() -> Self {
        FlightTarget::ScaledPosition(FLIGHT_TARGET_SCALE)
    }
}

impl FlightTarget {
    pub fn resolve(self, marker_position: Vec3) -> Vec3 {
        match self {
            FlightTarget::ScaledPosition(s) => marker_position * s,
            FlightTarget::Offset(o) => marker_position + o,
        }
    }
}

/// `1 - (1 - p)^3` with `p` clamped to `[0, 1]`.
#[inline]
pub fn ease_out_cubic(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightProgress {
    pub linear: f32,
    pub eased: f32,
    pub complete: bool,
}

#[derive(Clone, Debug)]
pub struct FlightState {
    pub marker_index: usize,
    pub marker_id: String,
    pub start: Duration,
    pub duration: Duration,
    pub start_camera: Vec3,
    pub target_camera: Vec3,
    pub base_intensity: f32,
    pub target_intensity: f32,
}

impl FlightState {
    pub fn progress(&self, now: Duration) -> FlightProgress {
        let linear = if self.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_sub(self.start);
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
        };
        FlightProgress {
            linear,
            eased: ease_out_cubic(linear),
            complete: linear >= 1.0,
        }
    }
}

/// Result of advancing an active flight by one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct FlightStep {
    pub progress: FlightProgress,
    /// Marker id, present only on the tick the flight finishes.
    pub completed: Option<String>,
}

/// Holds at most one live flight.
#[derive(Clone, Debug)]
pub struct SelectionFlight {
    active: Option<FlightState>,
    pub duration: Duration,
    pub target: FlightTarget,
}

impl Default for SelectionFlight {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(FLIGHT_DURATION_MS),
            FlightTarget::default(),
        )
    }
}

impl SelectionFlight {
    pub fn new(duration: Duration, target: FlightTarget) -> Self {
        Self {
            active: None,
            duration,
            target,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn state(&self) -> Option<&FlightState> {
        self.active.as_ref()
    }

    /// Begin flying toward marker `index`. A no-op returning `false` while
    /// another flight is live or when the index is out of range.
    pub fn start(
        &mut self,
        now: Duration,
        camera: &Camera,
        markers: &mut MarkerField,
        index: usize,
    ) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(marker) = markers.get_mut(index) else {
            return false;
        };
        marker.set_visual(MarkerVisual::Selected);
        let state = FlightState {
            marker_index: index,
            marker_id: marker.id.clone(),
            start: now,
            duration: self.duration,
            start_camera: camera.eye,
            target_camera: self.target.resolve(marker.base_position),
            base_intensity: marker.base_intensity,
            target_intensity: marker.target_intensity,
        };
        log::info!(
            "[flight] start marker={} from=({:.2},{:.2},{:.2}) to=({:.2},{:.2},{:.2})",
            state.marker_id,
            state.start_camera.x,
            state.start_camera.y,
            state.start_camera.z,
            state.target_camera.x,
            state.target_camera.y,
            state.target_camera.z
        );
        self.active = Some(state);
        true
    }

    /// Move the camera and glow along the eased curve. On the finishing tick
    /// the flight is dropped and its marker id returned once.
    pub fn advance(
        &mut self,
        now: Duration,
        camera: &mut Camera,
        markers: &mut MarkerField,
    ) -> Option<FlightStep> {
        let state = self.active.as_ref()?;
        let progress = state.progress(now);

        camera.eye = state.start_camera.lerp(state.target_camera, progress.eased);
        if let Some(m) = markers.get_mut(state.marker_index) {
            m.intensity = state.base_intensity
                + (state.target_intensity - state.base_intensity) * progress.eased;
        }

        if !progress.complete {
            return Some(FlightStep {
                progress,
                completed: None,
            });
        }

        let done = self.active.take()?;
        if let Some(m) = markers.get_mut(done.marker_index) {
            m.set_visual(MarkerVisual::Base);
        }
        log::info!("[flight] complete marker={}", done.marker_id);
        Some(FlightStep {
            progress,
            completed: Some(done.marker_id),
        })
    }

    /// Drop any live flight without completing it.
    pub fn cancel(&mut self, markers: &mut MarkerField) {
        if let Some(done) = self.active.take() {
            if let Some(m) = markers.get_mut(done.marker_index) {
                m.set_visual(MarkerVisual::Base);
            }
        }
    }
}
