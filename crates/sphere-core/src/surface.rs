//! Live sphere surface: rest geometry, displaced positions, rotation and the
//! per-vertex freeze table.

use crate::constants::NOISE_FREQUENCY;
use crate::mesh::SphereGeometry;
use crate::noise::NoiseField;
use crate::vertex_state::VertexStateTable;
use glam::{EulerRot, Mat4, Vec2, Vec3};

#[derive(Clone, Debug)]
pub struct Surface {
    rest: Vec<Vec3>,
    rest_dir: Vec<Vec3>,
    displaced: Vec<Vec3>,
    line_indices: Vec<u32>,
    states: VertexStateTable,
    /// Euler angles (x, y) in radians, applied in XYZ order.
    pub rotation: Vec2,
    amplitude: f32,
}

impl Surface {
    /// Geometry must already be validated (`SphereGeometry::from_flat` or a
    /// generated sphere); every rest position must normalize.
    pub fn new(geometry: SphereGeometry, amplitude: f32) -> Self {
        let SphereGeometry {
            positions,
            line_indices,
        } = geometry;
        let rest_dir = positions.iter().map(|p| p.normalize_or_zero()).collect();
        let states = VertexStateTable::new(positions.len());
        Self {
            displaced: positions.clone(),
            rest: positions,
            rest_dir,
            line_indices,
            states,
            rotation: Vec2::ZERO,
            amplitude: amplitude.abs(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.rest.len()
    }

    pub fn rest(&self) -> &[Vec3] {
        &self.rest
    }

    pub fn displaced(&self) -> &[Vec3] {
        &self.displaced
    }

    pub fn line_indices(&self) -> &[u32] {
        &self.line_indices
    }

    pub fn states(&self) -> &VertexStateTable {
        &self.states
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
    }

    /// Displaced vertex `index` in world space.
    pub fn world_position(&self, index: usize) -> Option<Vec3> {
        let model = self.model_matrix();
        self.displaced
            .get(index)
            .map(|p| model.transform_point3(*p))
    }

    /// Rotate from pointer drag: horizontal travel spins about Y, vertical
    /// about X.
    pub fn rotate_by_drag(&mut self, delta: Vec2, gain: f32) {
        self.rotation.y += delta.x * gain;
        self.rotation.x += delta.y * gain;
    }

    /// One animation tick: recompute every displaced position from the noise
    /// field at time `t` (or the frozen snapshot), then apply the idle spin
    /// when the pointer is not held.
    pub fn update(&mut self, noise: &NoiseField, t: f64, held: bool, idle_spin: f32) {
        let amp = self.amplitude;
        for (i, (dir, out)) in self
            .rest_dir
            .iter()
            .zip(self.displaced.iter_mut())
            .enumerate()
        {
            let raw = match self.states.frozen_value(i) {
                Some(v) => v,
                None => {
                    let r = self.rest[i];
                    noise.sample(
                        r.x as f64 * NOISE_FREQUENCY + t,
                        r.y as f64 * NOISE_FREQUENCY + t,
                        r.z as f64 * NOISE_FREQUENCY,
                    ) as f32
                }
            };
            // Noise stays inside [-1, 1]; the clamp only pins the shape bound.
            let offset = raw.clamp(-1.0, 1.0) * amp;
            *out = *dir * (1.0 + offset);
        }

        if !held {
            self.rotation.x += idle_spin;
            self.rotation.y += idle_spin;
        }
    }

    /// Static noise sample used as the freeze snapshot for vertex `index`.
    #[inline]
    pub fn snapshot_sample(&self, noise: &NoiseField, index: usize) -> Option<f32> {
        self.rest.get(index).map(|r| snapshot_sample(noise, *r))
    }

    pub(crate) fn freeze_parts(&mut self) -> (&[Vec3], &[Vec3], &mut VertexStateTable) {
        (&self.rest, &self.displaced, &mut self.states)
    }
}

/// Noise at the rest position with no time term.
#[inline]
pub fn snapshot_sample(noise: &NoiseField, rest: Vec3) -> f32 {
    noise.sample(
        rest.x as f64 * NOISE_FREQUENCY,
        rest.y as f64 * NOISE_FREQUENCY,
        rest.z as f64 * NOISE_FREQUENCY,
    ) as f32
}
