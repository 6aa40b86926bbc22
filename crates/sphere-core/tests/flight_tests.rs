// Host-side tests for selection flights and the engine lifecycle.

use glam::Vec3;
use sphere_core::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const VIEW: u32 = 600;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn target_spec() -> MarkerSpec {
    MarkerSpec {
        id: "mr1".into(),
        shape: MarkerShape::Octahedron,
        radius: 0.1,
        base_position: Vec3::new(0.0, 0.0, 0.5),
        color_rgb: [1.0, 0.2, 0.4],
    }
}

fn centered_engine() -> SphereEngine {
    let config = EngineConfig {
        pick_mode: PickMode::ScreenCenter,
        markers: vec![target_spec()],
        ..EngineConfig::default()
    };
    SphereEngine::new(config, Some(3), VIEW, VIEW).expect("engine")
}

#[derive(Default)]
struct MockHost {
    calls: Vec<&'static str>,
    fail_detach: bool,
}

impl Host for MockHost {
    fn detach_listeners(&mut self) -> Result<(), HostError> {
        self.calls.push("detach");
        if self.fail_detach {
            return Err(HostError::Detached("canvas".into()));
        }
        Ok(())
    }

    fn cancel_frame(&mut self) -> Result<(), HostError> {
        self.calls.push("cancel");
        Ok(())
    }

    fn release_buffers(&mut self) -> Result<(), HostError> {
        self.calls.push("release");
        Ok(())
    }
}

#[test]
fn ease_out_cubic_shape() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(0.5), 0.875);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert_eq!(ease_out_cubic(2.0), 1.0);
    assert_eq!(ease_out_cubic(-1.0), 0.0);
    assert!(ease_out_cubic(0.25) > 0.25);
}

#[test]
fn flight_target_resolves_both_policies() {
    let p = Vec3::new(0.5, 0.3, 0.0);
    assert_eq!(FlightTarget::default().resolve(p), p * 2.0);
    assert_eq!(
        FlightTarget::Offset(flight_target_offset_vec3()).resolve(p),
        Vec3::new(0.5, 0.3, 1.0)
    );
}

#[test]
fn flight_interpolates_and_completes_once() {
    let mut markers = MarkerField::new(vec![target_spec()]).unwrap();
    let mut camera = Camera::with_viewport(VIEW, VIEW);
    let mut flight = SelectionFlight::default();
    let t0 = ms(10_000);

    assert!(flight.start(t0, &camera, &mut markers, 0));
    assert!(markers.get(0).unwrap().is_selected());

    let mid = flight.advance(t0 + ms(500), &mut camera, &mut markers).unwrap();
    assert_eq!(mid.progress.linear, 0.5);
    assert_eq!(mid.progress.eased, 0.875);
    assert!(mid.completed.is_none());
    // (0,0,2) toward (0,0,1) at 0.875.
    assert!((camera.eye - Vec3::new(0.0, 0.0, 1.125)).length() < 1e-5);
    let glow = markers.get(0).unwrap().intensity;
    assert!((glow - 0.875 * MARKER_SELECTED_INTENSITY).abs() < 1e-5);

    let end = flight.advance(t0 + ms(1200), &mut camera, &mut markers).unwrap();
    assert_eq!(end.progress.linear, 1.0);
    assert!(end.progress.complete);
    assert_eq!(end.completed.as_deref(), Some("mr1"));
    assert!((camera.eye - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    assert!(!flight.is_active());
    assert_eq!(markers.get(0).unwrap().visual, MarkerVisual::Base);

    assert!(flight
        .advance(t0 + ms(1300), &mut camera, &mut markers)
        .is_none());
}

#[test]
fn second_start_during_flight_is_a_no_op() {
    let mut markers = MarkerField::new(default_marker_specs()).unwrap();
    let camera = Camera::default();
    let mut flight = SelectionFlight::default();

    assert!(flight.start(ms(0), &camera, &mut markers, 0));
    assert!(!flight.start(ms(10), &camera, &mut markers, 1));
    assert_eq!(flight.state().unwrap().marker_index, 0);
    assert_eq!(markers.get(1).unwrap().visual, MarkerVisual::Base);
}

#[test]
fn start_with_bad_index_does_nothing() {
    let mut markers = MarkerField::new(default_marker_specs()).unwrap();
    let mut flight = SelectionFlight::default();
    assert!(!flight.start(ms(0), &Camera::default(), &mut markers, 99));
    assert!(!flight.is_active());
}

#[test]
fn engine_click_flies_and_fires_selection_once() {
    let mut engine = centered_engine();
    let selected = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&selected);
    engine.on_select(move |id| sink.borrow_mut().push(id.to_string()));

    let report = engine.tick(ms(0));
    assert_eq!(report.hovered, Some(0));
    assert!(engine.handle_click(ms(0)));
    assert!(!engine.handle_click(ms(100)));

    let mid = engine.tick(ms(500));
    assert_eq!(mid.flight.map(|p| p.eased), Some(0.875));
    assert!(mid.completed.is_none());
    assert!(selected.borrow().is_empty());

    let done = engine.tick(ms(1200));
    assert_eq!(done.completed.as_deref(), Some("mr1"));
    assert_eq!(*selected.borrow(), vec!["mr1".to_string()]);

    for i in 0..5 {
        let r = engine.tick(ms(1300 + i * 16));
        assert!(r.completed.is_none());
    }
    assert_eq!(selected.borrow().len(), 1);
}

#[test]
fn click_without_hover_does_nothing() {
    let config = EngineConfig {
        pick_mode: PickMode::Pointer,
        ..EngineConfig::default()
    };
    let mut engine = SphereEngine::new(config, Some(1), VIEW, VIEW).unwrap();
    engine.tick(ms(0));
    assert_eq!(engine.hovered(), None);
    assert!(!engine.handle_click(ms(0)));
}

#[test]
fn reset_view_restores_the_starting_eye() {
    let mut engine = centered_engine();
    engine.tick(ms(0));
    engine.handle_click(ms(0));
    engine.tick(ms(2000));
    assert!((engine.camera().eye.z - 1.0).abs() < 1e-5);
    engine.reset_view();
    assert_eq!(engine.camera().eye, Vec3::new(0.0, 0.0, CAMERA_Z));
}

#[test]
fn teardown_releases_in_order_and_is_idempotent() {
    let mut engine = centered_engine();
    let mut host = MockHost::default();

    assert!(engine.teardown(&mut host));
    assert_eq!(host.calls, vec!["detach", "cancel", "release"]);
    assert!(!engine.is_running());

    assert!(!engine.teardown(&mut host));
    assert_eq!(host.calls.len(), 3);
}

#[test]
fn teardown_continues_past_a_failing_step() {
    let mut engine = centered_engine();
    let mut host = MockHost {
        fail_detach: true,
        ..MockHost::default()
    };
    assert!(engine.teardown(&mut host));
    assert_eq!(host.calls, vec!["detach", "cancel", "release"]);
}

#[test]
fn teardown_mid_flight_drops_the_flight_silently() {
    let mut engine = centered_engine();
    let fired = Rc::new(RefCell::new(0));
    let count = Rc::clone(&fired);
    engine.on_select(move |_| *count.borrow_mut() += 1);

    engine.tick(ms(0));
    assert!(engine.handle_click(ms(0)));
    engine.teardown(&mut MockHost::default());
    assert!(!engine.flight().is_active());

    engine.tick(ms(2000));
    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn input_after_teardown_is_ignored() {
    let mut engine = centered_engine();
    engine.teardown(&mut MockHost::default());

    let time = engine.time();
    let report = engine.tick(ms(1000));
    assert_eq!(report.time, time);
    assert!(!engine.handle_click(ms(1000)));
    let rect = SurfaceRect::from_size(VIEW as f32, VIEW as f32);
    let c = VIEW as f32 / 2.0;
    assert!(engine
        .handle_pointer(PointerInput::new(PointerPhase::Move, c, c), rect)
        .is_none());
    assert_eq!(engine.surface().states().frozen_count(), 0);
}

#[test]
fn construction_rejects_bad_inputs() {
    assert_eq!(
        SphereGeometry::from_flat(&[1.0, 2.0]).unwrap_err(),
        EngineError::InvalidGeometry { len: 2 }
    );
    assert_eq!(
        SphereGeometry::from_flat(&[0.0, 0.0, 1.0, 0.0, 0.0, 0.0]).unwrap_err(),
        EngineError::DegenerateVertex { index: 1 }
    );
    assert_eq!(
        SphereEngine::new(EngineConfig::default(), Some(1), 0, 480)
            .err()
            .unwrap(),
        EngineError::EmptyViewport {
            width: 0,
            height: 480
        }
    );
    let empty = EngineConfig {
        markers: Vec::new(),
        ..EngineConfig::default()
    };
    assert_eq!(
        SphereEngine::new(empty, Some(1), 10, 10).err().unwrap(),
        EngineError::EmptyMarkerSet
    );
}

#[test]
fn scene_lines_cover_sphere_and_markers() {
    let engine = centered_engine();
    let mut out = Vec::new();
    build_scene_lines(&engine, &mut out);
    let sphere_segments = engine.surface().line_indices().len() / 2;
    let marker_segments: usize = engine.markers().iter().map(|m| m.edge_count()).sum();
    assert_eq!(out.len(), 2 * (sphere_segments + marker_segments));
    assert!(out.iter().all(|v| v.position.iter().all(|c| c.is_finite())));
}

#[test]
fn hover_clears_when_the_pointer_leaves() {
    let config = EngineConfig {
        markers: vec![target_spec()],
        ..EngineConfig::default()
    };
    let mut engine = SphereEngine::new(config, Some(3), VIEW, VIEW).unwrap();
    let rect = SurfaceRect::from_size(VIEW as f32, VIEW as f32);
    let c = VIEW as f32 / 2.0;

    engine.handle_pointer(PointerInput::new(PointerPhase::Move, c, c), rect);
    assert_eq!(engine.tick(ms(0)).hovered, Some(0));

    engine.handle_pointer(PointerInput::new(PointerPhase::Leave, c, c), rect);
    assert_eq!(engine.tick(ms(16)).hovered, None);
    assert_eq!(engine.markers().get(0).unwrap().visual, MarkerVisual::Base);
    assert!(!engine.handle_click(ms(20)));
}
