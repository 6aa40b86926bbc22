use glam::Vec2;

/// Pointer position in normalized device coordinates: origin at the centre,
/// x right, y up, `[-1, 1]` across the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn distance(self, other: PointerSample) -> f32 {
        self.as_vec2().distance(other.as_vec2())
    }

    #[inline]
    pub fn is_inside_surface(self) -> bool {
        (-1.0..=1.0).contains(&self.x) && (-1.0..=1.0).contains(&self.y)
    }
}

/// Pixel rectangle of the rendering surface in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Map client pixels to NDC. `None` when the rect has no area.
    #[inline]
    pub fn to_ndc(&self, client_x: f32, client_y: f32) -> Option<PointerSample> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let x = ((client_x - self.left) / self.width) * 2.0 - 1.0;
        let y = -((client_y - self.top) / self.height) * 2.0 + 1.0;
        Some(PointerSample { x, y })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Move,
    Down,
    Up,
    Cancel,
    Leave,
}

/// One raw input event as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub phase: PointerPhase,
    pub client_x: f32,
    pub client_y: f32,
    /// Set for secondary touch points; only the first touch drives the engine.
    pub multi_touch: bool,
}

impl PointerInput {
    pub fn new(phase: PointerPhase, client_x: f32, client_y: f32) -> Self {
        Self {
            phase,
            client_x,
            client_y,
            multi_touch: false,
        }
    }
}

/// Result of feeding one event into the tracker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerUpdate {
    pub phase: PointerPhase,
    /// Fresh sample for move/down events.
    pub sample: Option<PointerSample>,
    /// NDC travel since the previous sample while held down.
    pub drag_delta: Option<Vec2>,
}

impl PointerUpdate {
    /// Whether this event should run a proximity pass.
    pub fn probes_surface(&self) -> bool {
        matches!(self.phase, PointerPhase::Move | PointerPhase::Down)
            && self.sample.is_some_and(|s| s.is_inside_surface())
    }
}

/// Unifies mouse and touch input into a single NDC sample plus held state.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    current: Option<PointerSample>,
    last: Option<PointerSample>,
    active: bool,
}

impl PointerTracker {
    pub fn handle(&mut self, input: PointerInput, rect: SurfaceRect) -> Option<PointerUpdate> {
        if input.multi_touch {
            return None;
        }
        match input.phase {
            PointerPhase::Move => {
                let sample = rect.to_ndc(input.client_x, input.client_y)?;
                let drag_delta = match (self.active, self.last) {
                    (true, Some(last)) => Some(sample.as_vec2() - last.as_vec2()),
                    _ => None,
                };
                self.current = Some(sample);
                self.last = Some(sample);
                Some(PointerUpdate {
                    phase: input.phase,
                    sample: Some(sample),
                    drag_delta,
                })
            }
            PointerPhase::Down => {
                let sample = rect.to_ndc(input.client_x, input.client_y)?;
                self.active = true;
                self.current = Some(sample);
                self.last = Some(sample);
                Some(PointerUpdate {
                    phase: input.phase,
                    sample: Some(sample),
                    drag_delta: None,
                })
            }
            PointerPhase::Up | PointerPhase::Cancel | PointerPhase::Leave => {
                self.active = false;
                if input.phase == PointerPhase::Leave {
                    // Off the canvas there is nothing under the pointer.
                    self.current = None;
                    self.last = None;
                }
                Some(PointerUpdate {
                    phase: input.phase,
                    sample: None,
                    drag_delta: None,
                })
            }
        }
    }

    /// Last known pointer position. `None` before the first event and after a leave.
    pub fn current(&self) -> Option<PointerSample> {
        self.current
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
