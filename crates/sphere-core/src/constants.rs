use glam::Vec3;

// Shared tuning constants used by the engine and both frontends.

// Surface displacement
pub const DISPLACEMENT_AMPLITUDE: f32 = 0.3; // max radial offset from the unit sphere
pub const NOISE_FREQUENCY: f64 = 0.5; // rest position -> noise space scale
pub const TIME_STEP_PER_TICK: f64 = 0.01; // fixed clock advance per frame
pub const WALL_CLOCK_TIME_SCALE: f64 = 0.5; // seconds -> noise time when wall-clock driven

// Sphere rotation
pub const IDLE_SPIN_PER_TICK: f32 = 0.002; // radians on X and Y while not held
pub const DRAG_ROTATION_GAIN: f32 = 2.0; // radians per NDC unit of pointer travel

// Freeze interaction
pub const FREEZE_RADIUS_NDC: f32 = 0.2; // pointer distance that freezes a vertex

// Sphere geometry
pub const SPHERE_RADIUS: f32 = 1.0;
pub const SPHERE_WIDTH_SEGMENTS: u32 = 32;
pub const SPHERE_HEIGHT_SEGMENTS: u32 = 32;

// Camera
pub const CAMERA_Z: f32 = 2.0;
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Markers
pub const MARKER_BASE_INTENSITY: f32 = 0.0;
pub const MARKER_HOVER_INTENSITY: f32 = 0.5;
pub const MARKER_SELECTED_INTENSITY: f32 = 2.0;
pub const MARKER_SPIN_X_PER_TICK: f32 = 0.001; // multiplied by (index + 1)
pub const MARKER_SPIN_Y_PER_TICK: f32 = 0.002; // multiplied by (index + 1)

// Selection flight
pub const FLIGHT_DURATION_MS: u64 = 1000;
pub const FLIGHT_TARGET_SCALE: f32 = 2.0; // camera target = marker position * scale
pub const FLIGHT_TARGET_OFFSET: [f32; 3] = [0.0, 0.0, 1.0]; // alternative: marker + offset

// Colors
pub const SPHERE_COLOR: [f32; 3] = [0.55, 0.55, 0.55];
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

#[inline]
pub fn flight_target_offset_vec3() -> Vec3 {
    Vec3::from(FLIGHT_TARGET_OFFSET)
}
