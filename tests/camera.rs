use axiscope::camera::{OrbitCamera, OrbitSettings};
use bevy_math::Vec3;

#[test]
fn drag_settles_at_the_full_rotation() {
    let mut cam = OrbitCamera::default();
    let start_yaw = cam.yaw;
    let radius = cam.radius;

    cam.rotate(100.0, 0.0);
    let mut frames = 0;
    while cam.update() {
        frames += 1;
        assert!(frames < 10_000, "damping never settled");
    }

    let expected = start_yaw - 100.0 * cam.settings.rotate_speed;
    assert!((cam.yaw - expected).abs() < 1e-3);
    assert_eq!(cam.radius, radius);
    assert!(frames > 1);
}

#[test]
fn zoom_respects_minimum_distance() {
    let mut cam = OrbitCamera::new(Vec3::new(0.0, 0.0, 1.0), OrbitSettings::default());
    for _ in 0..500 {
        cam.zoom(1.0);
    }
    assert!((cam.radius - cam.settings.min_distance).abs() < 1e-6);

    cam.zoom(-10.0);
    assert!(cam.radius > cam.settings.min_distance);
}

#[test]
fn reset_faces_the_xy_plane() {
    let mut cam = OrbitCamera::default();
    cam.rotate(40.0, -25.0);
    cam.pan(10.0, 10.0);
    cam.update();

    cam.reset_to(Vec3::new(0.0, 0.0, 15.0), Vec3::ZERO);
    assert!(!cam.update());
    assert!((cam.position() - Vec3::new(0.0, 0.0, 15.0)).length() < 1e-3);
    let forward = cam.rotation() * Vec3::NEG_Z;
    assert!((forward - Vec3::NEG_Z).length() < 1e-3);
}

#[test]
fn undamped_motion_applies_at_once() {
    let settings = OrbitSettings {
        damping: 0.0,
        ..OrbitSettings::default()
    };
    let mut cam = OrbitCamera::new(Vec3::new(0.0, 0.0, 10.0), settings);
    cam.rotate(-200.0, 0.0);
    assert!(cam.update());
    assert!(!cam.update());
    assert!((cam.yaw - 200.0 * settings.rotate_speed).abs() < 1e-5);
}
