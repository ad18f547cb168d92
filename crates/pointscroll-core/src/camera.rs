//! Camera path tracking.
//!
//! The camera lives on a fixed spline in a normalised space. A section only
//! names a scalar `path_t` along that spline plus yaw/pitch offsets and a
//! distance factor; the tracker eases the live pose toward the requested one
//! every frame and resolves it to a world-space eye position.

use crate::constants::{
    CAMERA_EASE_RATE, CAMERA_FOVY_DEG, CAMERA_HEIGHT_COMPRESSION, CAMERA_ZFAR, CAMERA_ZNEAR,
    PITCH_LIMIT_DEG, YAW_LIMIT_DEG,
};
use crate::easing::approach_factor;
use glam::{Mat4, Quat, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Where on the path the camera sits and how it is turned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub path_t: f32,
    pub yaw_deg: f32,
    pub pitch_deg: f32,
    /// Multiplier on the displayed model's bounding radius.
    pub distance: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            path_t: 0.0,
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            distance: 2.5,
        }
    }
}

impl CameraPose {
    /// Clamp into the legal ranges (yaw ±360°, pitch ±60°, path 0..1).
    pub fn clamped(self) -> Self {
        Self {
            path_t: self.path_t.clamp(0.0, 1.0),
            yaw_deg: self.yaw_deg.clamp(-YAW_LIMIT_DEG, YAW_LIMIT_DEG),
            pitch_deg: self.pitch_deg.clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG),
            distance: self.distance.max(0.01),
        }
    }

    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        CameraPose {
            path_t: mix(self.path_t, other.path_t),
            yaw_deg: mix(self.yaw_deg, other.yaw_deg),
            pitch_deg: mix(self.pitch_deg, other.pitch_deg),
            distance: mix(self.distance, other.distance),
        }
    }

    /// Largest per-component difference, used to decide when easing is done.
    pub fn max_abs_diff(&self, other: &CameraPose) -> f32 {
        (self.path_t - other.path_t)
            .abs()
            .max((self.yaw_deg - other.yaw_deg).abs() / 360.0)
            .max((self.pitch_deg - other.pitch_deg).abs() / 360.0)
            .max((self.distance - other.distance).abs())
    }
}

// Control points in normalised units: a slow arc from front-high around the
// right side to the back and over to the left.
const PATH_POINTS: [[f32; 3]; 6] = [
    [0.0, 0.45, 1.0],
    [0.75, 0.3, 0.7],
    [1.0, 0.1, 0.0],
    [0.7, -0.05, -0.75],
    [0.0, 0.05, -1.0],
    [-0.8, 0.25, -0.6],
];

/// Open Catmull-Rom spline through fixed control points.
#[derive(Clone, Debug)]
pub struct CameraPath {
    points: Vec<Vec3>,
    height_compression: f32,
}

impl Default for CameraPath {
    fn default() -> Self {
        Self::new(PATH_POINTS.iter().map(|p| Vec3::from(*p)).collect())
    }
}

impl CameraPath {
    /// A path needs at least two control points; fewer are padded with a
    /// point one unit in front of the target.
    pub fn new(mut points: Vec<Vec3>) -> Self {
        while points.len() < 2 {
            points.push(Vec3::Z);
        }
        Self {
            points,
            height_compression: CAMERA_HEIGHT_COMPRESSION,
        }
    }

    /// Point on the spline at `t` in 0..1 (clamped).
    pub fn evaluate(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        let segments = (n - 1) as f32;
        let s = t.clamp(0.0, 1.0) * segments;
        let i = (s.floor() as usize).min(n - 2);
        let u = s - i as f32;
        let p0 = self.points[i.saturating_sub(1)];
        let p1 = self.points[i];
        let p2 = self.points[i + 1];
        let p3 = self.points[(i + 2).min(n - 1)];
        catmull_rom(p0, p1, p2, p3, u)
    }

    /// World-space eye position for `pose`: spline point, height compression,
    /// yaw about +Y, pitch about the horizontal cross axis, scale, then offset
    /// from `look_at`.
    pub fn resolve_position(&self, pose: &CameraPose, scale: f32, look_at: Vec3) -> Vec3 {
        let pose = pose.clamped();
        let mut p = self.evaluate(pose.path_t);
        p.y *= self.height_compression;
        p = Quat::from_rotation_y(pose.yaw_deg.to_radians()) * p;
        let horizontal = Vec3::new(p.x, 0.0, p.z);
        let axis = horizontal.cross(Vec3::Y).normalize_or_zero();
        if axis != Vec3::ZERO {
            p = Quat::from_axis_angle(axis, pose.pitch_deg.to_radians()) * p;
        }
        look_at + p * scale
    }
}

#[inline]
fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, u: f32) -> Vec3 {
    let u2 = u * u;
    let u3 = u2 * u;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * u
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * u3)
}

/// Eases the live camera pose toward a target pose and resolves it to a
/// world-space camera.
#[derive(Clone, Debug)]
pub struct CameraTracker {
    path: CameraPath,
    current: CameraPose,
    target: CameraPose,
    rate: f32,
    model_radius: f32,
    radius_target: f32,
    pub look_at: Vec3,
}

impl Default for CameraTracker {
    fn default() -> Self {
        Self::new(CameraPath::default(), CAMERA_EASE_RATE)
    }
}

impl CameraTracker {
    pub fn new(path: CameraPath, rate: f32) -> Self {
        Self {
            path,
            current: CameraPose::default(),
            target: CameraPose::default(),
            rate: rate.max(0.0),
            model_radius: 1.0,
            radius_target: 1.0,
            look_at: Vec3::ZERO,
        }
    }

    /// Request a pose. Only `immediate` requests jump; everything else is
    /// reached through `tick`.
    pub fn set_target_pose(&mut self, pose: CameraPose, immediate: bool) {
        self.target = pose.clamped();
        if immediate {
            self.current = self.target;
        }
    }

    /// Exponential approach: `current += (target - current) * min(1, rate * dt)`.
    pub fn tick(&mut self, dt_sec: f32) {
        let k = approach_factor(self.rate, dt_sec);
        if k >= 1.0 {
            self.current = self.target;
            self.model_radius = self.radius_target;
        } else {
            self.current = self.current.lerp(&self.target, k);
            self.model_radius += (self.radius_target - self.model_radius) * k;
        }
    }

    #[inline]
    pub fn current(&self) -> CameraPose {
        self.current
    }

    #[inline]
    pub fn target(&self) -> CameraPose {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current.max_abs_diff(&self.target) < 1e-4
    }

    /// Bounding radius of the displayed model; scales path units to world.
    /// Eased like the pose so a new model does not pop the camera.
    pub fn set_model_radius(&mut self, radius: f32) {
        self.radius_target = radius.max(1e-3);
    }

    pub fn snap_model_radius(&mut self) {
        self.model_radius = self.radius_target;
    }

    #[inline]
    pub fn model_radius(&self) -> f32 {
        self.model_radius
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.model_radius * self.current.distance
    }

    pub fn eye(&self) -> Vec3 {
        self.path
            .resolve_position(&self.current, self.scale(), self.look_at)
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.look_at,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spline_passes_through_endpoints() {
        let path = CameraPath::default();
        assert!((path.evaluate(0.0) - Vec3::from(PATH_POINTS[0])).length() < 1e-5);
        assert!((path.evaluate(1.0) - Vec3::from(PATH_POINTS[5])).length() < 1e-5);
        assert!((path.evaluate(0.4) - Vec3::from(PATH_POINTS[2])).length() < 1e-5);
    }

    #[test]
    fn pose_clamps_yaw_and_pitch() {
        let p = CameraPose {
            path_t: 1.5,
            yaw_deg: 720.0,
            pitch_deg: -90.0,
            distance: 2.0,
        }
        .clamped();
        assert_eq!(p.path_t, 1.0);
        assert_eq!(p.yaw_deg, 360.0);
        assert_eq!(p.pitch_deg, -60.0);
    }

    #[test]
    fn positive_pitch_raises_the_eye() {
        let path = CameraPath::new(vec![Vec3::Z, Vec3::Z]);
        let level = path.resolve_position(&CameraPose::default(), 1.0, Vec3::ZERO);
        let raised = path.resolve_position(
            &CameraPose {
                pitch_deg: 30.0,
                ..CameraPose::default()
            },
            1.0,
            Vec3::ZERO,
        );
        assert!(raised.y > level.y + 0.4);
        assert!((raised.length() - level.length()).abs() < 1e-5);
    }

    #[test]
    fn tracker_eases_and_clamps_large_dt() {
        let mut t = CameraTracker::default();
        let goal = CameraPose {
            path_t: 1.0,
            ..CameraPose::default()
        };
        t.set_target_pose(goal, false);
        t.tick(0.1);
        assert!(t.current().path_t > 0.0 && t.current().path_t < 1.0);
        t.tick(100.0);
        assert_eq!(t.current(), goal);
        assert!(t.is_settled());
    }

    #[test]
    fn model_radius_eases_unless_snapped() {
        let mut t = CameraTracker::default();
        t.set_model_radius(3.0);
        assert_eq!(t.model_radius(), 1.0);
        t.tick(0.1);
        assert!(t.model_radius() > 1.0 && t.model_radius() < 3.0);
        t.set_model_radius(5.0);
        t.snap_model_radius();
        assert_eq!(t.model_radius(), 5.0);
    }
}
