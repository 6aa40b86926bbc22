//! Engine state shared by the input layer and the frame tick.
//!
//! Everything mutable lives in one struct. Hosts call `handle_pointer`,
//! `handle_click`, `resize` and `tick` from a single thread; each call runs
//! to completion before the next, so a tick always sees fully applied input.
//! Hosts using real threads must wrap the engine in a single owner or mutex.

use crate::camera::Camera;
use crate::clock::{ClockMode, NoiseClock};
use crate::constants::*;
use crate::error::EngineError;
use crate::flight::{FlightProgress, FlightTarget, SelectionFlight};
use crate::freezer::{FreezeReport, ProximityFreezer};
use crate::host::Host;
use crate::marker::{default_marker_specs, MarkerField, MarkerSpec};
use crate::mesh::SphereGeometry;
use crate::noise::NoiseField;
use crate::picker::{PickMode, Picker};
use crate::pointer::{PointerInput, PointerTracker, SurfaceRect};
use crate::surface::Surface;
use rand::thread_rng;
use std::time::Duration;

/// Tunables; `Default` takes every value from `constants`.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub clock: ClockMode,
    pub pick_mode: PickMode,
    pub flight_target: FlightTarget,
    pub flight_duration: Duration,
    pub amplitude: f32,
    pub freeze_radius: f32,
    pub idle_spin: f32,
    pub drag_gain: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub markers: Vec<MarkerSpec>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            clock: ClockMode::default(),
            pick_mode: PickMode::default(),
            flight_target: FlightTarget::default(),
            flight_duration: Duration::from_millis(FLIGHT_DURATION_MS),
            amplitude: DISPLACEMENT_AMPLITUDE,
            freeze_radius: FREEZE_RADIUS_NDC,
            idle_spin: IDLE_SPIN_PER_TICK,
            drag_gain: DRAG_ROTATION_GAIN,
            width_segments: SPHERE_WIDTH_SEGMENTS,
            height_segments: SPHERE_HEIGHT_SEGMENTS,
            markers: default_marker_specs(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Running,
    TornDown,
}

/// What one tick did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub time: f64,
    pub hovered: Option<usize>,
    pub flight: Option<FlightProgress>,
    /// Marker id of a flight that finished on this tick.
    pub completed: Option<String>,
}

type SelectCallback = Box<dyn FnMut(&str)>;

pub struct SphereEngine {
    noise: NoiseField,
    surface: Surface,
    camera: Camera,
    pointer: PointerTracker,
    freezer: ProximityFreezer,
    markers: MarkerField,
    picker: Picker,
    flight: SelectionFlight,
    clock: NoiseClock,
    idle_spin: f32,
    drag_gain: f32,
    hovered: Option<usize>,
    on_select: Option<SelectCallback>,
    lifecycle: Lifecycle,
}

impl SphereEngine {
    /// Build with a generated UV sphere. `seed` pins the noise field; without
    /// one the thread RNG is used.
    pub fn new(
        config: EngineConfig,
        seed: Option<u64>,
        width: u32,
        height: u32,
    ) -> Result<Self, EngineError> {
        let noise = match seed {
            Some(s) => NoiseField::from_seed(s),
            None => NoiseField::new(&mut thread_rng()),
        };
        let geometry = SphereGeometry::uv_sphere(
            SPHERE_RADIUS,
            config.width_segments,
            config.height_segments,
        );
        Self::with_parts(config, noise, geometry, width, height)
    }

    /// Build from explicit noise and geometry.
    pub fn with_parts(
        config: EngineConfig,
        noise: NoiseField,
        geometry: SphereGeometry,
        width: u32,
        height: u32,
    ) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::EmptyViewport { width, height });
        }
        if let Some(index) = geometry
            .positions
            .iter()
            .position(|p| !p.is_finite() || p.length_squared() == 0.0)
        {
            return Err(EngineError::DegenerateVertex { index });
        }
        let markers = MarkerField::new(config.markers)?;
        let surface = Surface::new(geometry, config.amplitude);
        log::info!(
            "[engine] vertices={} markers={} viewport={}x{} clock={:?}",
            surface.vertex_count(),
            markers.len(),
            width,
            height,
            config.clock
        );
        Ok(Self {
            noise,
            surface,
            camera: Camera::with_viewport(width, height),
            pointer: PointerTracker::default(),
            freezer: ProximityFreezer::new(config.freeze_radius),
            markers,
            picker: Picker::new(config.pick_mode),
            flight: SelectionFlight::new(config.flight_duration, config.flight_target),
            clock: NoiseClock::new(config.clock),
            idle_spin: config.idle_spin,
            drag_gain: config.drag_gain,
            hovered: None,
            on_select: None,
            lifecycle: Lifecycle::Running,
        })
    }

    /// Register the selection hand-off, called once per finished flight.
    pub fn on_select(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// Feed one pointer event. Moves and downs inside the surface run a full
    /// proximity pass; held moves also rotate the sphere.
    pub fn handle_pointer(
        &mut self,
        input: PointerInput,
        rect: SurfaceRect,
    ) -> Option<FreezeReport> {
        if !self.is_running() {
            return None;
        }
        let update = self.pointer.handle(input, rect)?;
        if let Some(delta) = update.drag_delta {
            self.surface.rotate_by_drag(delta, self.drag_gain);
        }
        if !update.probes_surface() {
            return None;
        }
        let sample = update.sample?;
        Some(
            self.freezer
                .apply(&mut self.surface, &self.camera, &self.noise, sample),
        )
    }

    /// Click: start a flight toward the hovered marker if idle.
    pub fn handle_click(&mut self, now: Duration) -> bool {
        if !self.is_running() || self.flight.is_active() {
            return false;
        }
        let Some(index) = self.hovered else {
            return false;
        };
        self.flight
            .start(now, &self.camera, &mut self.markers, index)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.is_running() {
            return;
        }
        self.camera.set_viewport(width, height);
    }

    /// One animation frame at host time `now`.
    pub fn tick(&mut self, now: Duration) -> TickReport {
        if !self.is_running() {
            return TickReport {
                time: self.clock.time(),
                ..TickReport::default()
            };
        }
        let t = self.clock.advance(now);
        self.surface
            .update(&self.noise, t, self.pointer.is_active(), self.idle_spin);
        self.markers.spin();

        let mut report = TickReport {
            time: t,
            ..TickReport::default()
        };

        if self.flight.is_active() {
            self.hovered = None;
            if let Some(step) = self
                .flight
                .advance(now, &mut self.camera, &mut self.markers)
            {
                report.flight = Some(step.progress);
                if let Some(id) = step.completed {
                    if let Some(cb) = self.on_select.as_mut() {
                        cb(&id);
                    }
                    report.completed = Some(id);
                }
            }
        } else {
            self.hovered = self
                .picker
                .update(&mut self.markers, &self.camera, self.pointer.current());
            report.hovered = self.hovered;
        }
        report
    }

    /// Put the camera back at its starting eye, e.g. after a selection when
    /// the host stays on the same view.
    pub fn reset_view(&mut self) {
        self.camera.eye = Camera::default().eye;
    }

    /// Idempotent shutdown. The first call detaches listeners, cancels the
    /// pending frame and releases GPU buffers, in that order; a failing host
    /// step is logged and skipped. Returns whether this call did the work.
    pub fn teardown<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.lifecycle == Lifecycle::TornDown {
            return false;
        }
        self.lifecycle = Lifecycle::TornDown;
        self.flight.cancel(&mut self.markers);
        self.on_select = None;
        self.hovered = None;

        if let Err(e) = host.detach_listeners() {
            log::warn!("[teardown] detach listeners: {e}");
        }
        if let Err(e) = host.cancel_frame() {
            log::warn!("[teardown] cancel frame: {e}");
        }
        if let Err(e) = host.release_buffers() {
            log::warn!("[teardown] release buffers: {e}");
        }
        log::info!("[teardown] engine stopped");
        true
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn markers(&self) -> &MarkerField {
        &self.markers
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn flight(&self) -> &SelectionFlight {
        &self.flight
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn time(&self) -> f64 {
        self.clock.time()
    }
}
