//! Sphere geometry.
//!
//! Generates a UV sphere with duplicated seam and pole vertices, matching the
//! usual `(width + 1) * (height + 1)` grid layout, plus a latitude/longitude
//! line list for wireframe drawing.

use crate::error::EngineError;
use glam::Vec3;
use std::f32::consts::PI;

#[derive(Clone, Debug)]
pub struct SphereGeometry {
    pub positions: Vec<Vec3>,
    /// Pairs of indices into `positions`; empty for caller-supplied buffers.
    pub line_indices: Vec<u32>,
}

impl SphereGeometry {
    /// Generate a UV sphere. Segment counts are clamped to a sane minimum.
    pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);

        let mut positions = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
        for iy in 0..=hs {
            let v = iy as f32 / hs as f32;
            let theta = v * PI;
            for ix in 0..=ws {
                let u = ix as f32 / ws as f32;
                let phi = u * 2.0 * PI;
                positions.push(Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                ));
            }
        }

        let row = ws + 1;
        let mut line_indices = Vec::new();
        for iy in 0..=hs {
            for ix in 0..=ws {
                let a = iy * row + ix;
                // Latitude rings collapse to a point at the poles.
                if ix < ws && iy != 0 && iy != hs {
                    line_indices.extend_from_slice(&[a, a + 1]);
                }
                if iy < hs {
                    line_indices.extend_from_slice(&[a, a + row]);
                }
            }
        }

        Self {
            positions,
            line_indices,
        }
    }

    /// Accept a flat `[x, y, z, x, y, z, ...]` buffer. Fails fast on a
    /// truncated buffer or a vertex that cannot be normalized.
    pub fn from_flat(flat: &[f32]) -> Result<Self, EngineError> {
        if flat.len() % 3 != 0 {
            return Err(EngineError::InvalidGeometry { len: flat.len() });
        }
        let positions = flat
            .chunks_exact(3)
            .enumerate()
            .map(|(index, c)| {
                let p = Vec3::new(c[0], c[1], c[2]);
                if !p.is_finite() || p.length_squared() == 0.0 {
                    Err(EngineError::DegenerateVertex { index })
                } else {
                    Ok(p)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            positions,
            line_indices: Vec::new(),
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}
