//! Order-of-magnitude scale derived from the camera's distance to the origin.

/// `max(1, 10^floor(log10(distance)))`; non-positive or non-finite distances map to 1.
pub fn select(distance: f64) -> f64 {
    if !distance.is_finite() || distance <= 0.0 {
        return 1.0;
    }

    let exponent = distance.log10().floor() as i32;
    let mut scale = 10f64.powi(exponent);
    // log10 may land a hair off at exact powers of ten
    if scale * 10.0 <= distance {
        scale *= 10.0;
    } else if scale > distance {
        scale /= 10.0;
    }
    scale.max(1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleChange {
    pub previous: f64,
    pub current: f64,
}

/// Holds the active scale between frames and reports when it moves to another decade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTracker {
    current: f64,
}

impl Default for ScaleTracker {
    fn default() -> Self {
        Self { current: 1.0 }
    }
}

impl ScaleTracker {
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn update(&mut self, distance: f64) -> Option<ScaleChange> {
        let next = select(distance);
        if next == self.current {
            return None;
        }
        let change = ScaleChange {
            previous: self.current,
            current: next,
        };
        self.current = next;
        tracing::debug!(
            previous = change.previous,
            current = change.current,
            distance,
            "scale changed"
        );
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_powers_of_ten_start_their_decade() {
        for k in 0..15 {
            let d = 10f64.powi(k);
            assert_eq!(select(d), d, "distance {d}");
            assert_eq!(select(d * 9.99), d, "distance {}", d * 9.99);
        }
    }

    #[test]
    fn near_distances_clamp_to_one() {
        assert_eq!(select(0.1), 1.0);
        assert_eq!(select(9.9), 1.0);
        assert_eq!(select(0.0), 1.0);
        assert_eq!(select(-5.0), 1.0);
        assert_eq!(select(f64::NAN), 1.0);
        assert_eq!(select(f64::INFINITY), 1.0);
    }

    #[test]
    fn tracker_only_signals_decade_changes() {
        let mut tracker = ScaleTracker::default();
        assert_eq!(tracker.update(5.0), None);
        let change = tracker.update(25.98).expect("decade change");
        assert_eq!(change.previous, 1.0);
        assert_eq!(change.current, 10.0);
        assert_eq!(tracker.update(99.0), None);
        assert_eq!(tracker.current(), 10.0);
    }
}
