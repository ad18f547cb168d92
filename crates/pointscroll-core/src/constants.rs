use glam::Vec3;

// Shared tuning defaults for the transition engine. Every value here can be
// overridden from the `timing` block of the show configuration.

// Scroll thresholds (raw delta units)
pub const WHEEL_THRESHOLD: f32 = 120.0; // one notch on most mice
pub const WHEEL_PROGRESS_SCALE: f32 = 900.0; // wheel delta for a full phase
pub const TOUCH_THRESHOLD: f32 = 40.0; // touch moves report smaller deltas
pub const TOUCH_PROGRESS_SCALE: f32 = 300.0;

// Transition look
pub const SPIN_TURNS: f32 = 1.0; // full turns per transition
pub const SCATTER_PEAK: f32 = 1.0; // "max entropy" amplitude
pub const SCATTER_REST: f32 = 0.0;
pub const SPIN_DURATION_SEC: f32 = 1.2; // auto-advance time per phase

// Completion tolerance for progress reaching 1
pub const PROGRESS_EPSILON: f32 = 1e-4;

// Camera
pub const CAMERA_EASE_RATE: f32 = 4.0; // per second
pub const YAW_LIMIT_DEG: f32 = 360.0;
pub const PITCH_LIMIT_DEG: f32 = 60.0;
pub const CAMERA_HEIGHT_COMPRESSION: f32 = 0.6;
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.05;
pub const CAMERA_ZFAR: f32 = 200.0;

// Density
pub const DENSITY_RATIO: f32 = 0.5;
pub const DENSITY_MIN: f32 = 0.01;
pub const IDENTITY_RATIO: f32 = 0.999; // at or above this the cloud is kept whole
pub const MAX_POINTS: usize = 200_000;

// Scatter noise
pub const SCATTER_SEED: u64 = 0x5CA7_7E12;
pub const SCATTER_WOBBLE_HZ: f32 = 0.35;
pub const SCATTER_WOBBLE_DEPTH: f32 = 0.35; // 0 = static offsets

// Point sprites
pub const POINT_SIZE_FACTOR: f32 = 0.012; // world size as a fraction of model radius

// Default palette and point tint
pub const DEFAULT_BACKGROUND: [[f32; 3]; 3] = [
    [0.02, 0.03, 0.07], // top
    [0.05, 0.07, 0.14], // mid
    [0.01, 0.01, 0.03], // bottom
];
pub const DEFAULT_POINT_COLOR: [f32; 3] = [0.85, 0.9, 1.0];
pub const DEFAULT_HIGHLIGHT: [f32; 3] = [1.0, 0.85, 0.55];

#[inline]
pub fn default_point_color() -> Vec3 {
    Vec3::from(DEFAULT_POINT_COLOR)
}
