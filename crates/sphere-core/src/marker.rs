//! Fixed set of small wireframe shapes floating around the sphere.
//!
//! Markers are created once and never added or removed. Only their visual
//! state, glow intensity and spin change at runtime.

use crate::constants::{
    MARKER_BASE_INTENSITY, MARKER_HOVER_INTENSITY, MARKER_SELECTED_INTENSITY,
    MARKER_SPIN_X_PER_TICK, MARKER_SPIN_Y_PER_TICK,
};
use crate::error::EngineError;
use glam::{EulerRot, Mat4, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerShape {
    Icosahedron,
    Octahedron,
    Dodecahedron,
}

impl MarkerShape {
    /// Unit-circumradius vertices.
    pub fn vertices(self) -> Vec<Vec3> {
        let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let raw: Vec<Vec3> = match self {
            MarkerShape::Octahedron => vec![
                Vec3::X,
                Vec3::NEG_X,
                Vec3::Y,
                Vec3::NEG_Y,
                Vec3::Z,
                Vec3::NEG_Z,
            ],
            MarkerShape::Icosahedron => {
                let mut v = Vec::with_capacity(12);
                for a in [-1.0, 1.0] {
                    for b in [-phi, phi] {
                        v.push(Vec3::new(a, b, 0.0));
                        v.push(Vec3::new(0.0, a, b));
                        v.push(Vec3::new(b, 0.0, a));
                    }
                }
                v
            }
            MarkerShape::Dodecahedron => {
                let r = 1.0 / phi;
                let mut v = Vec::with_capacity(20);
                for x in [-1.0, 1.0] {
                    for y in [-1.0, 1.0] {
                        for z in [-1.0, 1.0] {
                            v.push(Vec3::new(x, y, z));
                        }
                    }
                }
                for a in [-r, r] {
                    for b in [-phi, phi] {
                        v.push(Vec3::new(0.0, a, b));
                        v.push(Vec3::new(a, b, 0.0));
                        v.push(Vec3::new(b, 0.0, a));
                    }
                }
                v
            }
        };
        raw.into_iter().map(|p| p.normalize()).collect()
    }

    /// Edge list as index pairs: every vertex pair at the minimum distance.
    pub fn edges(self) -> Vec<[u16; 2]> {
        let verts = self.vertices();
        let mut min = f32::MAX;
        for (i, a) in verts.iter().enumerate() {
            for b in &verts[i + 1..] {
                min = min.min(a.distance(*b));
            }
        }
        let mut edges = Vec::new();
        for (i, a) in verts.iter().enumerate() {
            for (j, b) in verts.iter().enumerate().skip(i + 1) {
                if a.distance(*b) <= min * 1.001 {
                    edges.push([i as u16, j as u16]);
                }
            }
        }
        edges
    }
}

/// Visual state driving glow intensity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MarkerVisual {
    #[default]
    Base,
    Hovered,
    Selected,
}

#[derive(Clone, Debug)]
pub struct MarkerSpec {
    pub id: String,
    pub shape: MarkerShape,
    pub radius: f32,
    pub base_position: Vec3,
    pub color_rgb: [f32; 3],
}

#[derive(Clone, Debug)]
pub struct Marker {
    pub id: String,
    pub shape: MarkerShape,
    pub radius: f32,
    pub base_position: Vec3,
    pub color_rgb: [f32; 3],
    pub visual: MarkerVisual,
    /// Current glow; follows `visual` except while a flight animates it.
    pub intensity: f32,
    pub base_intensity: f32,
    pub target_intensity: f32,
    pub rotation: Vec2,
    local_vertices: Vec<Vec3>,
    edges: Vec<[u16; 2]>,
}

impl Marker {
    pub fn from_spec(spec: MarkerSpec) -> Self {
        let local_vertices = spec.shape.vertices();
        let edges = spec.shape.edges();
        Self {
            id: spec.id,
            shape: spec.shape,
            radius: spec.radius,
            base_position: spec.base_position,
            color_rgb: spec.color_rgb,
            visual: MarkerVisual::Base,
            intensity: MARKER_BASE_INTENSITY,
            base_intensity: MARKER_BASE_INTENSITY,
            target_intensity: MARKER_SELECTED_INTENSITY,
            rotation: Vec2::ZERO,
            local_vertices,
            edges,
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.visual == MarkerVisual::Hovered
    }

    pub fn is_selected(&self) -> bool {
        self.visual == MarkerVisual::Selected
    }

    /// Set the visual state; hover and base snap intensity immediately,
    /// selection leaves it to the flight.
    pub fn set_visual(&mut self, visual: MarkerVisual) {
        self.visual = visual;
        match visual {
            MarkerVisual::Base => self.intensity = self.base_intensity,
            MarkerVisual::Hovered => self.intensity = MARKER_HOVER_INTENSITY,
            MarkerVisual::Selected => {}
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.base_position)
            * Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
            * Mat4::from_scale(Vec3::splat(self.radius))
    }

    /// World-space wireframe segments.
    pub fn world_edges(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        let model = self.model_matrix();
        self.edges.iter().map(move |[a, b]| {
            (
                model.transform_point3(self.local_vertices[*a as usize]),
                model.transform_point3(self.local_vertices[*b as usize]),
            )
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[derive(Clone, Debug)]
pub struct MarkerField {
    markers: Vec<Marker>,
}

impl MarkerField {
    pub fn new(specs: Vec<MarkerSpec>) -> Result<Self, EngineError> {
        if specs.is_empty() {
            return Err(EngineError::EmptyMarkerSet);
        }
        Ok(Self {
            markers: specs.into_iter().map(Marker::from_spec).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Marker> {
        self.markers.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Marker> {
        self.markers.iter_mut()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.markers.iter().position(|m| m.id == id)
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.markers.iter().position(|m| m.is_hovered())
    }

    /// Per-tick spin, faster for later markers.
    pub fn spin(&mut self) {
        for (i, m) in self.markers.iter_mut().enumerate() {
            let k = (i + 1) as f32;
            m.rotation.x += MARKER_SPIN_X_PER_TICK * k;
            m.rotation.y += MARKER_SPIN_Y_PER_TICK * k;
        }
    }
}

/// The four project markers shown around the sphere.
pub fn default_marker_specs() -> Vec<MarkerSpec> {
    vec![
        MarkerSpec {
            id: "vr".into(),
            shape: MarkerShape::Icosahedron,
            radius: 0.2,
            base_position: Vec3::new(0.5, 0.3, 0.0),
            color_rgb: [0.0, 1.0, 0.53],
        },
        MarkerSpec {
            id: "mr1".into(),
            shape: MarkerShape::Octahedron,
            radius: 0.15,
            base_position: Vec3::new(-0.4, -0.3, 0.2),
            color_rgb: [1.0, 0.2, 0.4],
        },
        MarkerSpec {
            id: "mr2".into(),
            shape: MarkerShape::Octahedron,
            radius: 0.15,
            base_position: Vec3::new(0.2, -0.4, -0.3),
            color_rgb: [0.2, 0.4, 1.0],
        },
        MarkerSpec {
            id: "game".into(),
            shape: MarkerShape::Dodecahedron,
            radius: 0.18,
            base_position: Vec3::new(-0.2, 0.4, 0.1),
            color_rgb: [1.0, 0.67, 0.0],
        },
    ]
}
