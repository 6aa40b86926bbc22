//! Perspective camera shared by the freezer, the picker and the renderers.
//!
//! The camera looks along a fixed direction; selection flights only move its
//! eye, so the orientation never changes after construction.

use crate::constants::{CAMERA_FOVY_DEGREES, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR};
use crate::pointer::PointerSample;
use glam::{Mat4, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

/// World-space ray with a normalized direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Camera {
    pub fn with_viewport(width: u32, height: u32) -> Self {
        let mut cam = Self::default();
        cam.set_viewport(width, height);
        cam
    }

    /// Update the aspect ratio after a resize. Zero sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.eye + self.forward, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World point -> normalized device coordinates (z in `[0, 1]` inside
    /// the frustum). Points behind the eye project mirrored; callers only
    /// compare x/y distances.
    #[inline]
    pub fn project(&self, world: Vec3) -> Vec3 {
        project_with(&self.view_proj(), world)
    }

    /// Ray from the eye through an NDC point.
    pub fn ray_through(&self, ndc: PointerSample) -> Ray {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let dir = (p1 - self.eye).normalize_or_zero();
        Ray {
            origin: self.eye,
            dir,
        }
    }
}

/// Project with a precomputed view-projection; used in per-vertex loops.
#[inline]
pub fn project_with(view_proj: &Mat4, world: Vec3) -> Vec3 {
    let clip = *view_proj * world.extend(1.0);
    clip.truncate() / clip.w
}

/// Nearest non-negative hit distance of a ray against a sphere.
#[inline]
pub fn ray_sphere(ray: Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t_near = -b - sq;
    if t_near >= 0.0 {
        return Some(t_near);
    }
    // Origin inside the sphere: the far root is the exit point.
    let t_far = -b + sq;
    (t_far >= 0.0).then_some(t_far)
}
