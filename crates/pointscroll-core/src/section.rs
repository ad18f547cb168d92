//! Static section descriptors and the show configuration document.
//!
//! Everything here is immutable after load. Colour strings are normalised at
//! this boundary: an unparsable value logs a warning and falls back to the
//! previous value instead of failing the whole show.

use crate::camera::CameraPose;
use crate::constants::*;
use crate::easing::Ease;
use crate::error::{ColorError, ConfigError, CoreResult};
use crate::geometry::SectionTransform;
use crate::scroll::{InputKind, ScrollTuning};
use fnv::FnvHashSet;
use glam::Vec3;
use serde::Deserialize;

/// Background gradient stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub top: Vec3,
    pub mid: Vec3,
    pub bottom: Vec3,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            top: Vec3::from(DEFAULT_BACKGROUND[0]),
            mid: Vec3::from(DEFAULT_BACKGROUND[1]),
            bottom: Vec3::from(DEFAULT_BACKGROUND[2]),
        }
    }
}

impl Palette {
    pub fn lerp(&self, other: &Palette, t: f32) -> Palette {
        let t = t.clamp(0.0, 1.0);
        Palette {
            top: self.top.lerp(other.top, t),
            mid: self.mid.lerp(other.mid, t),
            bottom: self.bottom.lerp(other.bottom, t),
        }
    }
}

/// Point glow style. The renderer only ever sees the numeric code from
/// [`GlowMode::uniform_code`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlowMode {
    Off,
    #[default]
    Soft,
    Halo,
    Pulse,
}

// Shader-side encoding, indexed by `GlowMode as usize`.
const GLOW_UNIFORM_CODES: [f32; 4] = [0.0, 1.0, 2.0, 3.0];

impl GlowMode {
    #[inline]
    pub fn uniform_code(self) -> f32 {
        GLOW_UNIFORM_CODES[self as usize]
    }
}

/// Per-section look: point styling and post-processing intensities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Look {
    pub glow: GlowMode,
    pub highlight: Vec3,
    pub point_color: Vec3,
    pub bloom: f32,
    pub vignette: f32,
}

impl Default for Look {
    fn default() -> Self {
        Self {
            glow: GlowMode::default(),
            highlight: Vec3::from(DEFAULT_HIGHLIGHT),
            point_color: default_point_color(),
            bloom: 0.8,
            vignette: 0.35,
        }
    }
}

impl Look {
    /// Scalars and colours blend linearly; the glow mode switches halfway.
    pub fn lerp(&self, other: &Look, t: f32) -> Look {
        let t = t.clamp(0.0, 1.0);
        Look {
            glow: if t < 0.5 { self.glow } else { other.glow },
            highlight: self.highlight.lerp(other.highlight, t),
            point_color: self.point_color.lerp(other.point_color, t),
            bloom: self.bloom + (other.bloom - self.bloom) * t,
            vignette: self.vignette + (other.vignette - self.vignette) * t,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionText {
    pub title: String,
    pub body: String,
}

/// Optional per-section replacements for the global transition timing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransitionOverrides {
    pub spin_turns: Option<f32>,
    pub scatter_peak: Option<f32>,
    pub scatter_rest: Option<f32>,
    pub spin_duration: Option<f32>,
}

/// One step of the narrative.
#[derive(Clone, Debug)]
pub struct Section {
    pub id: String,
    pub order: usize,
    pub model: String,
    pub camera: CameraPose,
    pub text: SectionText,
    pub palette: Palette,
    pub transform: SectionTransform,
    pub overrides: TransitionOverrides,
    pub look: Look,
}

/// Global transition timing, resolved from configuration.
#[derive(Clone, Debug)]
pub struct Timing {
    pub wheel: ScrollTuning,
    pub touch: ScrollTuning,
    pub spin_turns: f32,
    pub scatter_peak: f32,
    pub scatter_rest: f32,
    pub spin_duration: f32,
    pub camera_ease_rate: f32,
    pub density: f32,
    pub max_points: usize,
    pub ease: Ease,
    pub seed: u64,
}

impl Default for Timing {
    fn default() -> Self {
        TimingConfig::default().resolve()
    }
}

impl Timing {
    #[inline]
    pub fn tuning(&self, kind: InputKind) -> &ScrollTuning {
        match kind {
            InputKind::Wheel => &self.wheel,
            InputKind::Touch => &self.touch,
        }
    }

    pub fn spin_turns(&self, s: &Section) -> f32 {
        s.overrides.spin_turns.unwrap_or(self.spin_turns)
    }

    pub fn scatter_peak(&self, s: &Section) -> f32 {
        s.overrides.scatter_peak.unwrap_or(self.scatter_peak).max(0.0)
    }

    pub fn scatter_rest(&self, s: &Section) -> f32 {
        s.overrides.scatter_rest.unwrap_or(self.scatter_rest).max(0.0)
    }

    pub fn spin_duration(&self, s: &Section) -> f32 {
        s.overrides
            .spin_duration
            .unwrap_or(self.spin_duration)
            .max(0.05)
    }
}

/// Ordered sections plus timing; the static input of a `Director`.
#[derive(Clone, Debug)]
pub struct Show {
    pub timing: Timing,
    pub sections: Vec<Section>,
}

impl Show {
    /// Parse and normalise a `sections.json` document.
    pub fn from_json(json: &str) -> CoreResult<Show> {
        let doc: ShowConfig = serde_json::from_str(json)?;
        doc.resolve()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// ---------------- Colour normalisation ----------------

/// Parse `#rgb`, `#rrggbb` or `rgb(r, g, b)` (0..255) into 0..1 RGB.
pub fn parse_color(raw: &str) -> Result<Vec3, ColorError> {
    let s = raw.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return Err(ColorError::Syntax(raw.to_string()));
        }
        let digits = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => return Err(ColorError::Syntax(raw.to_string())),
        };
        let byte = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::Syntax(raw.to_string()))
        };
        return Ok(Vec3::new(byte(0)? as f32, byte(2)? as f32, byte(4)? as f32) / 255.0);
    }
    let inner = s
        .strip_prefix("rgb(")
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| ColorError::Syntax(raw.to_string()))?;
    let parts = inner
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ColorError::Syntax(raw.to_string()))?;
    if parts.len() != 3 {
        return Err(ColorError::Syntax(raw.to_string()));
    }
    if parts.iter().any(|c| !(0.0..=255.0).contains(c)) {
        return Err(ColorError::Range(raw.to_string()));
    }
    Ok(Vec3::new(parts[0], parts[1], parts[2]) / 255.0)
}

/// Parse `raw` if present, keeping `fallback` on absence or error.
pub fn normalize_color(raw: Option<&str>, fallback: Vec3) -> Vec3 {
    match raw.map(parse_color) {
        None => fallback,
        Some(Ok(c)) => c,
        Some(Err(e)) => {
            log::warn!("[config] {}; keeping previous colour", e);
            fallback
        }
    }
}

// ---------------- Configuration document ----------------

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub wheel_threshold: f32,
    pub wheel_progress_scale: f32,
    pub touch_threshold: f32,
    pub touch_progress_scale: f32,
    pub spin_turns: f32,
    pub scatter_peak: f32,
    pub scatter_rest: f32,
    pub spin_duration: f32,
    pub camera_ease_rate: f32,
    pub density: f32,
    pub max_points: usize,
    pub ease: Ease,
    pub seed: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            wheel_threshold: WHEEL_THRESHOLD,
            wheel_progress_scale: WHEEL_PROGRESS_SCALE,
            touch_threshold: TOUCH_THRESHOLD,
            touch_progress_scale: TOUCH_PROGRESS_SCALE,
            spin_turns: SPIN_TURNS,
            scatter_peak: SCATTER_PEAK,
            scatter_rest: SCATTER_REST,
            spin_duration: SPIN_DURATION_SEC,
            camera_ease_rate: CAMERA_EASE_RATE,
            density: DENSITY_RATIO,
            max_points: MAX_POINTS,
            ease: Ease::default(),
            seed: SCATTER_SEED,
        }
    }
}

impl TimingConfig {
    pub fn resolve(&self) -> Timing {
        Timing {
            wheel: ScrollTuning {
                threshold: self.wheel_threshold.max(1.0),
                progress_scale: self.wheel_progress_scale.max(1.0),
            },
            touch: ScrollTuning {
                threshold: self.touch_threshold.max(1.0),
                progress_scale: self.touch_progress_scale.max(1.0),
            },
            spin_turns: self.spin_turns,
            scatter_peak: self.scatter_peak.max(0.0),
            scatter_rest: self.scatter_rest.max(0.0),
            spin_duration: self.spin_duration.max(0.05),
            camera_ease_rate: self.camera_ease_rate.max(0.0),
            density: self.density.clamp(DENSITY_MIN, 1.0),
            max_points: self.max_points.max(1),
            ease: self.ease,
            seed: self.seed,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub path_t: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let p = CameraPose::default();
        Self {
            path_t: p.path_t,
            yaw: p.yaw_deg,
            pitch: p.pitch_deg,
            distance: p.distance,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub top: Option<String>,
    pub mid: Option<String>,
    pub bottom: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub rotation: [f32; 3],
    pub scale: f32,
    pub offset: [f32; 3],
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            rotation: [0.0; 3],
            scale: 1.0,
            offset: [0.0; 3],
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    pub glow: GlowMode,
    pub highlight: Option<String>,
    pub point_color: Option<String>,
    pub bloom: Option<f32>,
    pub vignette: Option<f32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    pub id: String,
    pub model: String,
    pub camera: CameraConfig,
    pub title: String,
    pub body: String,
    pub background: PaletteConfig,
    pub transform: TransformConfig,
    pub transition: TransitionOverrides,
    pub look: LookConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    pub timing: TimingConfig,
    pub sections: Vec<SectionConfig>,
}

impl ShowConfig {
    /// Validate and normalise into runtime descriptors. Colours fall back to
    /// the previous section's value (or the built-in default for the first).
    pub fn resolve(&self) -> CoreResult<Show> {
        if self.sections.is_empty() {
            return Err(ConfigError::NoSections);
        }
        let mut seen = FnvHashSet::default();
        let mut sections = Vec::with_capacity(self.sections.len());
        let mut prev_palette = Palette::default();
        let mut prev_look = Look::default();
        for (order, cfg) in self.sections.iter().enumerate() {
            let id = if cfg.id.trim().is_empty() {
                format!("section-{order}")
            } else {
                cfg.id.trim().to_string()
            };
            if !seen.insert(id.clone()) {
                return Err(ConfigError::DuplicateId(id));
            }
            let palette = Palette {
                top: normalize_color(cfg.background.top.as_deref(), prev_palette.top),
                mid: normalize_color(cfg.background.mid.as_deref(), prev_palette.mid),
                bottom: normalize_color(cfg.background.bottom.as_deref(), prev_palette.bottom),
            };
            let look = Look {
                glow: cfg.look.glow,
                highlight: normalize_color(cfg.look.highlight.as_deref(), prev_look.highlight),
                point_color: normalize_color(
                    cfg.look.point_color.as_deref(),
                    prev_look.point_color,
                ),
                bloom: cfg.look.bloom.unwrap_or(prev_look.bloom).max(0.0),
                vignette: cfg.look.vignette.unwrap_or(prev_look.vignette).clamp(0.0, 1.0),
            };
            if cfg.model.trim().is_empty() {
                log::warn!("[config] section {} has no model path", id);
            }
            sections.push(Section {
                id,
                order,
                model: cfg.model.clone(),
                camera: CameraPose {
                    path_t: cfg.camera.path_t,
                    yaw_deg: cfg.camera.yaw,
                    pitch_deg: cfg.camera.pitch,
                    distance: cfg.camera.distance,
                }
                .clamped(),
                text: SectionText {
                    title: cfg.title.clone(),
                    body: cfg.body.clone(),
                },
                palette,
                transform: SectionTransform {
                    rotation_deg: Vec3::from(cfg.transform.rotation),
                    scale: if cfg.transform.scale > 0.0 {
                        cfg.transform.scale
                    } else {
                        1.0
                    },
                    offset: Vec3::from(cfg.transform.offset),
                },
                overrides: cfg.transition,
                look,
            });
            prev_palette = palette;
            prev_look = look;
        }
        log::info!("[config] loaded {} sections", sections.len());
        Ok(Show {
            timing: self.timing.resolve(),
            sections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_rgb_forms() {
        assert_eq!(parse_color("#fff").unwrap(), Vec3::ONE);
        assert_eq!(parse_color(" #000000 ").unwrap(), Vec3::ZERO);
        let c = parse_color("rgb(255, 0, 51)").unwrap();
        assert!((c - Vec3::new(1.0, 0.0, 0.2)).length() < 1e-6);
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(matches!(parse_color("#12"), Err(ColorError::Syntax(_))));
        assert!(matches!(parse_color("#gggggg"), Err(ColorError::Syntax(_))));
        assert!(matches!(parse_color("rgb(1,2)"), Err(ColorError::Syntax(_))));
        assert!(matches!(parse_color("rgb(300,0,0)"), Err(ColorError::Range(_))));
        assert!(matches!(parse_color("teal"), Err(ColorError::Syntax(_))));
    }

    #[test]
    fn invalid_color_keeps_fallback() {
        assert_eq!(normalize_color(Some("nope"), Vec3::X), Vec3::X);
        assert_eq!(normalize_color(None, Vec3::Y), Vec3::Y);
    }

    #[test]
    fn glow_codes_are_distinct() {
        let codes = [GlowMode::Off, GlowMode::Soft, GlowMode::Halo, GlowMode::Pulse]
            .map(GlowMode::uniform_code);
        assert_eq!(codes, [0.0, 1.0, 2.0, 3.0]);
    }
}
