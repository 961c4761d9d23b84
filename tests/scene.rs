use axiscope::config::SceneConfig;
use axiscope::core::{Axis, AxesGroup, DisplayMode, Orientation};
use axiscope::scene::{INVALID_FUNCTION, SceneState};
use glam::DVec3;

#[test]
fn toggling_twice_restores_the_scene() {
    let mut state = SceneState::default();
    state.frame(26.0);
    let (grid, labels) = (state.grid().clone(), state.labels().clone());
    assert_eq!(state.mode(), DisplayMode::ThreeD);

    let to_2d = state.toggle_mode();
    assert_eq!(to_2d.mode, DisplayMode::TwoD);
    assert!(!to_2d.z_axis_visible);
    assert!(!state.z_axis_visible());
    assert_eq!(state.grid().count(Orientation::XZ), 0);
    assert_eq!(state.grid().count(Orientation::YZ), 0);
    assert_eq!(state.labels().on_axis(Axis::Z).count(), 0);

    let to_3d = state.toggle_mode();
    assert_eq!(to_3d.mode, DisplayMode::ThreeD);
    assert!(to_3d.camera_reset.is_none());
    assert!(state.z_axis_visible());
    assert_eq!(state.grid(), &grid);
    assert_eq!(state.labels(), &labels);
    assert_eq!(state.revisions().mode, 2);
}

#[test]
fn entering_2d_resets_the_camera_and_caption() {
    let mut state = SceneState::default();
    assert_eq!(state.toggle_caption(), "Switch to 2D");

    let transition = state.toggle_mode();
    let reset = transition.camera_reset.expect("2D faces the XY plane");
    assert_eq!(reset.position, DVec3::new(0.0, 0.0, 15.0));
    assert_eq!(reset.target, DVec3::ZERO);
    assert_eq!(transition.toggle_caption, "Switch to 3D");
    assert_eq!(state.toggle_caption(), "Switch to 3D");
}

#[test]
fn z_axis_follows_mode() {
    assert!(AxesGroup::is_visible(Axis::X, DisplayMode::TwoD));
    assert!(AxesGroup::is_visible(Axis::Y, DisplayMode::TwoD));
    assert!(!AxesGroup::is_visible(Axis::Z, DisplayMode::TwoD));
    assert!(AxesGroup::is_visible(Axis::Z, DisplayMode::ThreeD));
}

#[test]
fn startup_function_is_plotted() {
    let config = SceneConfig {
        initial_function: "x^2".into(),
        initial_mode: DisplayMode::TwoD,
        ..SceneConfig::default()
    };
    let state = SceneState::new(&config);
    assert_eq!(state.mode(), DisplayMode::TwoD);
    assert_eq!(state.input(), "x^2");
    assert_eq!(state.curve().map(|c| c.len()), Some(100_001));
    assert!(state.notice().is_none());
}

#[test]
fn bad_function_shows_notice_and_drops_curve() {
    let mut state = SceneState::default();
    state.submit_function("x^3");
    assert!(state.curve().is_some());

    state.set_input("x^^3");
    assert!(state.submit_input().is_rejected());
    assert!(state.curve().is_none());
    let notice = state.notice().expect("notice raised");
    assert_eq!(notice.message, INVALID_FUNCTION);
    assert!(!notice.detail.is_empty());

    state.dismiss_notice();
    assert!(state.notice().is_none());
}

#[test]
fn zooming_out_rebuilds_grid_and_labels() {
    let mut state = SceneState::default();
    state.frame(26.0);
    let revisions = state.revisions();

    let update = state.frame(2_500.0);
    let change = update.scale_change.expect("decade changed");
    assert_eq!(change.previous, 10.0);
    assert_eq!(change.current, 1000.0);
    assert_eq!(state.scale(), 1000.0);
    assert_eq!(state.grid().content_scale(), 1000.0);
    assert_eq!(state.labels().scale, 1000.0);
    assert_eq!(state.revisions().grid, revisions.grid + 1);
    assert_eq!(state.revisions().labels, revisions.labels + 1);
    assert_eq!(state.revisions().curve, revisions.curve);
}
