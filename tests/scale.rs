use axiscope::scale::{ScaleTracker, select};

#[test]
fn same_decade_same_scale() {
    for k in 0..12 {
        let lo = 10f64.powi(k);
        for d in [lo, lo * 1.5, lo * 3.0, lo * 7.77, lo * 9.999] {
            assert_eq!(select(d), lo, "distance {d}");
        }
    }
}

#[test]
fn scale_is_monotonic_in_distance() {
    let mut last = select(0.5);
    let mut d = 0.5;
    while d < 1e9 {
        let s = select(d);
        assert!(s >= last);
        last = s;
        d *= 1.37;
    }
}

#[test]
fn initial_camera_distance_maps_to_ten() {
    // (15, 15, 15) is about 25.98 from the origin
    let distance = (3.0f64 * 15.0 * 15.0).sqrt();
    assert_eq!(select(distance), 10.0);

    let mut tracker = ScaleTracker::default();
    let change = tracker.update(distance).expect("leaves the unit decade");
    assert_eq!((change.previous, change.current), (1.0, 10.0));
}
