// Host-side tests for per-frame displacement, rotation and the noise clock.

use glam::Vec2;
use sphere_core::*;
use std::time::Duration;

const VIEW: u32 = 640;

fn engine_with(config: EngineConfig) -> SphereEngine {
    SphereEngine::new(config, Some(9), VIEW, VIEW).expect("engine")
}

fn rect() -> SurfaceRect {
    SurfaceRect::from_size(VIEW as f32, VIEW as f32)
}

fn frame(i: u64) -> Duration {
    Duration::from_millis(i * 16)
}

#[test]
fn displaced_radius_stays_within_amplitude_band() {
    let mut engine = engine_with(EngineConfig::default());
    let lo = 1.0 - DISPLACEMENT_AMPLITUDE - 1e-5;
    let hi = 1.0 + DISPLACEMENT_AMPLITUDE + 1e-5;
    for i in 0..400 {
        if i % 7 == 0 {
            let x = (i * 13 % VIEW as u64) as f32;
            engine.handle_pointer(PointerInput::new(PointerPhase::Move, x, 320.0), rect());
        }
        engine.tick(frame(i));
        for p in engine.surface().displaced() {
            let r = p.length();
            assert!(r >= lo && r <= hi, "radius {r} at tick {i}");
        }
    }
}

#[test]
fn ripple_keeps_animating_without_input() {
    let mut engine = engine_with(EngineConfig::default());
    engine.tick(frame(1));
    let before = engine.surface().displaced().to_vec();
    for i in 2..20 {
        engine.tick(frame(i));
    }
    let moved = engine
        .surface()
        .displaced()
        .iter()
        .zip(&before)
        .any(|(a, b)| (*a - *b).length() > 1e-4);
    assert!(moved);
}

#[test]
fn fixed_step_clock_advances_per_tick() {
    let mut engine = engine_with(EngineConfig::default());
    for i in 1..=10 {
        let report = engine.tick(frame(i));
        assert!((report.time - 0.01 * i as f64).abs() < 1e-9);
    }
}

#[test]
fn wall_clock_is_monotonic_even_if_host_time_stalls() {
    let mut clock = NoiseClock::new(ClockMode::wall_clock());
    assert_eq!(clock.advance(Duration::from_secs(2)), 1.0);
    assert_eq!(clock.advance(Duration::from_secs(1)), 1.0);
    assert_eq!(clock.advance(Duration::from_secs(4)), 2.0);
}

#[test]
fn frozen_vertex_holds_its_snapshot_displacement() {
    let mut engine = engine_with(EngineConfig::default());
    let c = VIEW as f32 / 2.0;
    engine.handle_pointer(PointerInput::new(PointerPhase::Move, c, c), rect());
    let idx = (0..engine.surface().vertex_count())
        .find(|i| engine.surface().states().is_frozen(*i))
        .expect("a frozen vertex");
    let snapshot = engine.surface().states().frozen_value(idx).unwrap();

    for i in 1..30 {
        engine.tick(frame(i));
        let r = engine.surface().displaced()[idx].length();
        let expected = 1.0 + snapshot * DISPLACEMENT_AMPLITUDE;
        assert!((r - expected).abs() < 1e-5, "tick {i}: {r} vs {expected}");
    }
}

#[test]
fn unfrozen_vertex_follows_time_varying_noise() {
    let noise = NoiseField::from_seed(4);
    let geometry = SphereGeometry::uv_sphere(1.0, 8, 6);
    let mut surface = Surface::new(geometry, DISPLACEMENT_AMPLITUDE);
    surface.update(&noise, 0.5, false, 0.0);

    let r = surface.rest()[10];
    let raw = noise.sample(
        r.x as f64 * NOISE_FREQUENCY + 0.5,
        r.y as f64 * NOISE_FREQUENCY + 0.5,
        r.z as f64 * NOISE_FREQUENCY,
    ) as f32;
    let expected = r.normalize() * (1.0 + raw * DISPLACEMENT_AMPLITUDE);
    assert!((surface.displaced()[10] - expected).length() < 1e-6);
}

#[test]
fn idle_spin_applies_only_when_not_held() {
    let mut engine = engine_with(EngineConfig::default());
    engine.tick(frame(1));
    let r = engine.surface().rotation;
    assert!((r.x - IDLE_SPIN_PER_TICK).abs() < 1e-7);
    assert!((r.y - IDLE_SPIN_PER_TICK).abs() < 1e-7);

    engine.handle_pointer(PointerInput::new(PointerPhase::Down, 10.0, 10.0), rect());
    engine.tick(frame(2));
    assert_eq!(engine.surface().rotation, r);

    engine.handle_pointer(PointerInput::new(PointerPhase::Up, 10.0, 10.0), rect());
    engine.tick(frame(3));
    assert!(engine.surface().rotation.x > r.x);
}

#[test]
fn held_drag_rotates_by_ndc_delta() {
    let mut engine = engine_with(EngineConfig::default());
    engine.handle_pointer(PointerInput::new(PointerPhase::Down, 320.0, 320.0), rect());
    // +0.25 NDC in x, +0.25 NDC in y (upward on screen).
    engine.handle_pointer(PointerInput::new(PointerPhase::Move, 400.0, 240.0), rect());
    let r = engine.surface().rotation;
    assert!((r.y - 0.25 * DRAG_ROTATION_GAIN).abs() < 1e-5);
    assert!((r.x - 0.25 * DRAG_ROTATION_GAIN).abs() < 1e-5);
}

#[test]
fn hover_move_without_press_does_not_rotate() {
    let mut engine = engine_with(EngineConfig::default());
    engine.handle_pointer(PointerInput::new(PointerPhase::Move, 100.0, 100.0), rect());
    engine.handle_pointer(PointerInput::new(PointerPhase::Move, 300.0, 500.0), rect());
    assert_eq!(engine.surface().rotation, Vec2::ZERO);
}

#[test]
fn generated_sphere_has_grid_layout_and_wire_lines() {
    let g = SphereGeometry::uv_sphere(1.0, 32, 32);
    assert_eq!(g.vertex_count(), 33 * 33);
    assert_eq!(g.line_indices.len() % 2, 0);
    assert!(g.line_indices.iter().all(|i| (*i as usize) < g.vertex_count()));
    for p in &g.positions {
        assert!((p.length() - 1.0).abs() < 1e-5);
    }
}
