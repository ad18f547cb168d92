pub mod assets;
pub mod blend;
pub mod camera;
pub mod constants;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod morph;
pub mod output;
pub mod resample;
pub mod scatter;
pub mod scroll;
pub mod section;
pub mod transition;

pub use assets::{fraction_key, AssetCache, LoadRequest, LoadTicket};
pub use blend::{palette_css, Crossfade};
pub use camera::{Camera, CameraPath, CameraPose, CameraTracker};
pub use easing::Ease;
pub use error::{ColorError, ConfigError, CoreResult, LoadError};
pub use geometry::{bounding_radius, PointCloud, SectionTransform, SlotSet};
pub use morph::MorphBuffer;
pub use output::{FrameUniforms, Presentation, RenderFrame};
pub use resample::{
    compute_sample_fractions, keep_count_for, resample_positions_and_colors,
    resample_target_by_fractions,
};
pub use scatter::ScatterField;
pub use scroll::{Direction, InputKind, ScrollAccumulator, ScrollTrigger, ScrollTuning};
pub use section::{
    normalize_color, parse_color, GlowMode, Look, Palette, Section, SectionText, Show, ShowConfig,
    Timing, TimingConfig, TransitionOverrides,
};
pub use transition::{Director, Phase, VisualState};

pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
