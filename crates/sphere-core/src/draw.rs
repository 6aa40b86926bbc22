//! GPU-facing line-list data shared by the web and native renderers.

use crate::constants::SPHERE_COLOR;
use crate::engine::SphereEngine;
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
}

// Frozen vertices are tinted toward white so the held region reads.
const FROZEN_TINT: f32 = 0.6;

#[inline]
fn line(out: &mut Vec<LineVertex>, a: Vec3, b: Vec3, ca: [f32; 4], cb: [f32; 4]) {
    out.push(LineVertex {
        position: a.to_array(),
        color: ca,
    });
    out.push(LineVertex {
        position: b.to_array(),
        color: cb,
    });
}

/// Rebuild the full scene as world-space line segments.
pub fn build_scene_lines(engine: &SphereEngine, out: &mut Vec<LineVertex>) {
    out.clear();

    let surface = engine.surface();
    let model = surface.model_matrix();
    let displaced = surface.displaced();
    let states = surface.states();
    let base = Vec3::from(SPHERE_COLOR);
    let color_of = |i: usize| {
        let c = if states.is_frozen(i) {
            base.lerp(Vec3::ONE, FROZEN_TINT)
        } else {
            base
        };
        c.extend(1.0).to_array()
    };
    for pair in surface.line_indices().chunks_exact(2) {
        let (a, b) = (pair[0] as usize, pair[1] as usize);
        if let (Some(pa), Some(pb)) = (displaced.get(a), displaced.get(b)) {
            line(
                out,
                model.transform_point3(*pa),
                model.transform_point3(*pb),
                color_of(a),
                color_of(b),
            );
        }
    }

    for m in engine.markers().iter() {
        let glow = 1.0 + m.intensity;
        let c = (Vec3::from(m.color_rgb) * glow).extend(1.0).to_array();
        for (a, b) in m.world_edges() {
            line(out, a, b, c, c);
        }
    }
}

pub fn scene_uniforms(engine: &SphereEngine) -> SceneUniforms {
    SceneUniforms {
        view_proj: engine.camera().view_proj().to_cols_array_2d(),
    }
}
