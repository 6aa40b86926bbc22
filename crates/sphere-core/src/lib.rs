pub mod camera;
pub mod clock;
pub mod constants;
pub mod draw;
pub mod engine;
pub mod error;
pub mod flight;
pub mod freezer;
pub mod host;
pub mod marker;
pub mod mesh;
pub mod noise;
pub mod picker;
pub mod pointer;
pub mod surface;
pub mod vertex_state;

pub use camera::*;
pub use clock::*;
pub use constants::*;
pub use draw::*;
pub use engine::*;
pub use error::*;
pub use flight::*;
pub use freezer::*;
pub use host::*;
pub use marker::*;
pub use mesh::*;
pub use noise::*;
pub use picker::*;
pub use pointer::*;
pub use surface::*;
pub use vertex_state::*;

// Shader bundled as a string constant
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
