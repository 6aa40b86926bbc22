use crate::camera::{ray_sphere, Camera};
use crate::marker::{MarkerField, MarkerVisual};
use crate::pointer::PointerSample;

/// Where the pick ray starts on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PickMode {
    /// Through the last pointer sample.
    #[default]
    Pointer,
    /// Always through the centre of the screen.
    ScreenCenter,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub index: usize,
    pub distance: f32,
}

/// Ray-casts against marker bounding spheres and owns hover resolution.
#[derive(Clone, Copy, Debug, Default)]
pub struct Picker {
    pub mode: PickMode,
}

impl Picker {
    pub fn new(mode: PickMode) -> Self {
        Self { mode }
    }

    /// Nearest hit along the pick ray. Equal distances keep the lower index
    /// so the result is stable frame to frame.
    pub fn cast(
        &self,
        markers: &MarkerField,
        camera: &Camera,
        pointer: Option<PointerSample>,
    ) -> Option<PickHit> {
        let ndc = match self.mode {
            PickMode::Pointer => pointer?,
            PickMode::ScreenCenter => PointerSample::CENTER,
        };
        let ray = camera.ray_through(ndc);
        let mut best = None::<PickHit>;
        for (index, m) in markers.iter().enumerate() {
            if let Some(t) = ray_sphere(ray, m.base_position, m.radius) {
                match best {
                    Some(b) if t >= b.distance => {}
                    _ => best = Some(PickHit { index, distance: t }),
                }
            }
        }
        best
    }

    /// Recompute hover for every marker from scratch. The hit becomes
    /// `Hovered`, all others drop back to `Base`; a `Selected` marker is left
    /// alone. Returns the hovered index.
    pub fn update(
        &self,
        markers: &mut MarkerField,
        camera: &Camera,
        pointer: Option<PointerSample>,
    ) -> Option<usize> {
        let hit = self
            .cast(markers, camera, pointer)
            .and_then(|h| checked_index(markers, h.index));
        for (i, m) in markers.iter_mut().enumerate() {
            if m.is_selected() {
                continue;
            }
            let want = if Some(i) == hit {
                MarkerVisual::Hovered
            } else {
                MarkerVisual::Base
            };
            m.set_visual(want);
        }
        hit.filter(|i| markers.get(*i).is_some_and(|m| m.is_hovered()))
    }
}

/// Intersection indices outside the collection count as no hit.
#[inline]
pub fn checked_index(markers: &MarkerField, index: usize) -> Option<usize> {
    (index < markers.len()).then_some(index)
}
