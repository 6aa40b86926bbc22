// Host-side tests for ray picking and hover resolution.

use glam::Vec3;
use sphere_core::*;

fn spec(id: &str, pos: Vec3, radius: f32) -> MarkerSpec {
    MarkerSpec {
        id: id.into(),
        shape: MarkerShape::Octahedron,
        radius,
        base_position: pos,
        color_rgb: [1.0, 1.0, 1.0],
    }
}

fn camera() -> Camera {
    Camera::with_viewport(800, 800)
}

#[test]
fn ray_sphere_intersection_basic() {
    let ray = Ray {
        origin: Vec3::ZERO,
        dir: Vec3::Z,
    };
    let t = ray_sphere(ray, Vec3::new(0.0, 0.0, 5.0), 2.0).unwrap();
    assert!((t - 3.0).abs() < 1e-5);
}

#[test]
fn ray_sphere_intersection_miss() {
    let ray = Ray {
        origin: Vec3::ZERO,
        dir: Vec3::X,
    };
    assert!(ray_sphere(ray, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
}

#[test]
fn ray_sphere_behind_origin_is_ignored() {
    let ray = Ray {
        origin: Vec3::ZERO,
        dir: Vec3::Z,
    };
    assert!(ray_sphere(ray, Vec3::new(0.0, 0.0, -5.0), 1.0).is_none());
}

#[test]
fn ray_sphere_from_inside_hits_exit_point() {
    let ray = Ray {
        origin: Vec3::new(0.0, 0.0, 5.0),
        dir: Vec3::X,
    };
    let t = ray_sphere(ray, Vec3::new(0.0, 0.0, 5.0), 3.0).unwrap();
    assert!((t - 3.0).abs() < 1e-5);
}

#[test]
fn center_ray_points_down_the_view_axis() {
    let ray = camera().ray_through(PointerSample::CENTER);
    assert_eq!(ray.origin, Vec3::new(0.0, 0.0, CAMERA_Z));
    assert!((ray.dir - Vec3::NEG_Z).length() < 1e-4);
}

#[test]
fn nearest_marker_wins() {
    let markers = MarkerField::new(vec![
        spec("far", Vec3::new(0.0, 0.0, -0.5), 0.1),
        spec("near", Vec3::new(0.0, 0.0, 0.5), 0.1),
    ])
    .unwrap();
    let picker = Picker::new(PickMode::ScreenCenter);
    let hit = picker.cast(&markers, &camera(), None).unwrap();
    assert_eq!(hit.index, 1);
}

#[test]
fn equal_distance_keeps_lower_index() {
    let markers = MarkerField::new(vec![
        spec("a", Vec3::ZERO, 0.2),
        spec("b", Vec3::ZERO, 0.2),
    ])
    .unwrap();
    let picker = Picker::new(PickMode::ScreenCenter);
    for _ in 0..5 {
        assert_eq!(picker.cast(&markers, &camera(), None).unwrap().index, 0);
    }
}

#[test]
fn pointer_mode_needs_a_sample() {
    let markers = MarkerField::new(vec![spec("a", Vec3::ZERO, 0.2)]).unwrap();
    let picker = Picker::new(PickMode::Pointer);
    assert!(picker.cast(&markers, &camera(), None).is_none());
    assert!(picker
        .cast(&markers, &camera(), Some(PointerSample::CENTER))
        .is_some());
    assert!(picker
        .cast(&markers, &camera(), Some(PointerSample::new(0.9, 0.9)))
        .is_none());
}

#[test]
fn update_sets_exactly_one_hovered_marker() {
    let mut markers = MarkerField::new(vec![
        spec("left", Vec3::new(-0.5, 0.0, 0.0), 0.15),
        spec("mid", Vec3::ZERO, 0.15),
    ])
    .unwrap();
    let picker = Picker::new(PickMode::Pointer);
    let cam = camera();

    let hovered = picker.update(&mut markers, &cam, Some(PointerSample::CENTER));
    assert_eq!(hovered, Some(1));
    assert_eq!(markers.hovered_index(), Some(1));
    assert_eq!(markers.get(1).unwrap().intensity, MARKER_HOVER_INTENSITY);
    assert_eq!(markers.get(0).unwrap().visual, MarkerVisual::Base);

    // Pointer onto empty space: everything reverts.
    let hovered = picker.update(&mut markers, &cam, Some(PointerSample::new(0.0, 0.9)));
    assert_eq!(hovered, None);
    assert!(markers.iter().all(|m| m.visual == MarkerVisual::Base));
    assert!(markers
        .iter()
        .all(|m| m.intensity == MARKER_BASE_INTENSITY));
}

#[test]
fn out_of_range_index_is_no_hit() {
    let markers = MarkerField::new(vec![spec("a", Vec3::ZERO, 0.2)]).unwrap();
    assert_eq!(checked_index(&markers, 0), Some(0));
    assert_eq!(checked_index(&markers, 1), None);
    assert_eq!(checked_index(&markers, usize::MAX), None);
}

#[test]
fn default_markers_have_distinct_ids_and_closed_wireframes() {
    let markers = MarkerField::new(default_marker_specs()).unwrap();
    assert_eq!(markers.len(), 4);
    for (i, m) in markers.iter().enumerate() {
        assert_eq!(markers.index_of(&m.id), Some(i));
    }
    let edges: Vec<usize> = markers.iter().map(|m| m.edge_count()).collect();
    assert_eq!(edges, vec![30, 12, 12, 30]);
}

#[test]
fn empty_marker_set_is_rejected() {
    assert_eq!(
        MarkerField::new(Vec::new()).unwrap_err(),
        EngineError::EmptyMarkerSet
    );
}
