use crate::camera::{project_with, Camera};
use crate::noise::NoiseField;
use crate::pointer::PointerSample;
use crate::surface::{snapshot_sample, Surface};

/// Counts from one proximity pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FreezeReport {
    pub newly_frozen: usize,
    pub released: usize,
}

/// Freezes vertices whose projection lands near the pointer.
///
/// Every call is a full O(V) pass: each displaced vertex goes through the
/// model and view-projection transforms and is compared against the pointer
/// in NDC. Inside `radius` a vertex freezes (the snapshot is taken only on
/// the transition); at or beyond it the vertex is released unconditionally.
#[derive(Clone, Copy, Debug)]
pub struct ProximityFreezer {
    pub radius: f32,
}

impl ProximityFreezer {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn apply(
        &self,
        surface: &mut Surface,
        camera: &Camera,
        noise: &NoiseField,
        pointer: PointerSample,
    ) -> FreezeReport {
        let mvp = camera.view_proj() * surface.model_matrix();
        let (rest, displaced, states) = surface.freeze_parts();

        let mut report = FreezeReport::default();
        for (i, p) in displaced.iter().enumerate() {
            let ndc = project_with(&mvp, *p);
            let dist = PointerSample::new(ndc.x, ndc.y).distance(pointer);
            if dist < self.radius {
                if states.freeze_with(i, || snapshot_sample(noise, rest[i])) {
                    report.newly_frozen += 1;
                }
            } else if states.unfreeze(i) {
                report.released += 1;
            }
        }
        report
    }
}
