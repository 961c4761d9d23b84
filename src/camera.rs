//! Damped orbit camera: rotate and pan around a target, zoom by radius.

use bevy_math::{Mat3, Quat, Vec3};

use crate::config::OrbitConfig;

/// Keeps the camera off the poles, where yaw degenerates.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 1e-3;
/// Pending motion below this is treated as settled.
const SETTLED: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSettings {
    pub damping: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl From<&OrbitConfig> for OrbitSettings {
    fn from(c: &OrbitConfig) -> Self {
        Self {
            damping: c.damping as f32,
            rotate_speed: c.rotate_speed as f32,
            pan_speed: c.pan_speed as f32,
            zoom_step: c.zoom_step as f32,
            min_distance: c.min_distance as f32,
            max_distance: c.max_distance.map_or(f32::INFINITY, |d| d as f32),
        }
    }
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self::from(&OrbitConfig::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub settings: OrbitSettings,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_pan: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::splat(15.0), OrbitSettings::default())
    }
}

impl OrbitCamera {
    pub fn new(position: Vec3, settings: OrbitSettings) -> Self {
        let mut camera = Self {
            target: Vec3::ZERO,
            radius: 1.0,
            yaw: 0.0,
            pitch: 0.0,
            settings,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_pan: Vec3::ZERO,
        };
        camera.look_from(position, Vec3::ZERO);
        camera
    }

    /// Place the camera at `position`, orbiting `target`. Pending motion is kept.
    pub fn look_from(&mut self, position: Vec3, target: Vec3) {
        let offset = position - target;
        let length = offset.length();
        self.target = target;
        self.radius = self.clamp_radius(length);
        if length > f32::EPSILON {
            self.yaw = offset.x.atan2(offset.z);
            self.pitch = (offset.y / length).clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
    }

    /// Like [`look_from`](Self::look_from), and stops any drift still in flight.
    pub fn reset_to(&mut self, position: Vec3, target: Vec3) {
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_pan = Vec3::ZERO;
        self.look_from(position, target);
    }

    /// With inverted bounds the minimum wins.
    fn clamp_radius(&self, radius: f32) -> f32 {
        radius.min(self.settings.max_distance).max(self.settings.min_distance)
    }

    fn direction(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp)
    }

    pub fn position(&self) -> Vec3 {
        self.target + self.direction() * self.radius
    }

    /// Orientation looking from [`position`](Self::position) at the target, +Y up.
    pub fn rotation(&self) -> Quat {
        let back = self.direction();
        let right = Vec3::Y.cross(back).try_normalize().unwrap_or(Vec3::X);
        let up = back.cross(right);
        Quat::from_mat3(&Mat3::from_cols(right, up, back))
    }

    /// Queue a drag of `delta` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.pending_yaw -= dx * self.settings.rotate_speed;
        self.pending_pitch += dy * self.settings.rotate_speed;
    }

    /// Queue a pan of `delta` pixels in the view plane, proportional to the radius.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let rotation = self.rotation();
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        self.pending_pan += (-right * dx + up * dy) * self.settings.pan_speed * self.radius;
    }

    /// Zoom by `lines` wheel notches, positive moves closer. Applied at once.
    pub fn zoom(&mut self, lines: f32) {
        self.radius = self.clamp_radius(self.radius * self.settings.zoom_step.powf(lines));
    }

    /// Advance the damped motion by one frame. Returns whether the camera moved.
    pub fn update(&mut self) -> bool {
        let d = self.settings.damping;
        // zero damping means undamped, apply everything this frame
        let (apply, keep) = if d > 0.0 { (d, 1.0 - d) } else { (1.0, 0.0) };

        let moving = self.pending_yaw.abs() > SETTLED
            || self.pending_pitch.abs() > SETTLED
            || self.pending_pan.length_squared() > SETTLED * SETTLED;
        if !moving {
            self.pending_yaw = 0.0;
            self.pending_pitch = 0.0;
            self.pending_pan = Vec3::ZERO;
            return false;
        }

        self.yaw += self.pending_yaw * apply;
        self.pitch = (self.pitch + self.pending_pitch * apply).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.target += self.pending_pan * apply;

        self.pending_yaw *= keep;
        self.pending_pitch *= keep;
        self.pending_pan *= keep;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn starts_where_placed() {
        let cam = OrbitCamera::default();
        assert!(close(cam.position(), Vec3::splat(15.0)));
        assert!((cam.radius - 15.0 * 3f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn rotation_faces_target() {
        let cam = OrbitCamera::default();
        let forward = cam.rotation() * Vec3::NEG_Z;
        assert!(close(forward, (cam.target - cam.position()).normalize()));
    }

    #[test]
    fn drag_keeps_drifting_then_settles() {
        let mut cam = OrbitCamera::default();
        let yaw0 = cam.yaw;
        cam.rotate(-100.0, 0.0);
        assert!(cam.update());
        let first = cam.yaw - yaw0;
        assert!(cam.update());
        assert!(cam.yaw - yaw0 > first);

        for _ in 0..2000 {
            cam.update();
        }
        assert!(!cam.update());
        // geometric series: total converges to the full drag
        assert!((cam.yaw - yaw0 - 0.5).abs() < 1e-3);
    }

    #[test]
    fn zoom_respects_min_distance() {
        let mut cam = OrbitCamera::default();
        cam.zoom(10_000.0);
        assert_eq!(cam.radius, 0.1);
        cam.zoom(-100.0);
        assert!(cam.radius > 0.1);
    }

    #[test]
    fn inverted_distance_bounds_do_not_panic() {
        let settings = OrbitSettings {
            min_distance: 0.1,
            max_distance: 0.05,
            ..OrbitSettings::default()
        };
        let mut cam = OrbitCamera::new(Vec3::splat(15.0), settings);
        cam.zoom(3.0);
        assert_eq!(cam.radius, 0.1);
    }

    #[test]
    fn reset_clears_pending_motion() {
        let mut cam = OrbitCamera::default();
        cam.rotate(50.0, 50.0);
        cam.reset_to(Vec3::new(0.0, 0.0, 15.0), Vec3::ZERO);
        assert!(!cam.update());
        assert!(close(cam.position(), Vec3::new(0.0, 0.0, 15.0)));
    }
}
