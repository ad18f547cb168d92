//! Background gradient and section text crossfades.
//!
//! Both follow the same eased phase progress as the point cloud: fading out
//! takes the background halfway to the next palette and hides the text;
//! fading in finishes the palette and reveals the next section's text.

use crate::section::{Look, Palette, Section};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossfade {
    /// 0 = current section's palette, 1 = next section's palette.
    pub background_mix: f32,
    pub text_opacity: f32,
    /// Whether the visible text belongs to the next section.
    pub next_text: bool,
}

impl Crossfade {
    pub const REST: Crossfade = Crossfade {
        background_mix: 0.0,
        text_opacity: 1.0,
        next_text: false,
    };

    /// Loading holds the halfway point with the text hidden.
    pub const HELD: Crossfade = Crossfade {
        background_mix: 0.5,
        text_opacity: 0.0,
        next_text: false,
    };

    #[inline]
    pub fn fade_out(eased: f32) -> Crossfade {
        let e = eased.clamp(0.0, 1.0);
        Crossfade {
            background_mix: 0.5 * e,
            text_opacity: 1.0 - e,
            next_text: false,
        }
    }

    #[inline]
    pub fn fade_in(eased: f32) -> Crossfade {
        let e = eased.clamp(0.0, 1.0);
        Crossfade {
            background_mix: 0.5 + 0.5 * e,
            text_opacity: e,
            next_text: true,
        }
    }

    /// Blended palette between `from` and `to`.
    pub fn palette(&self, from: &Section, to: &Section) -> Palette {
        from.palette.lerp(&to.palette, self.background_mix)
    }

    /// Blended look (highlight, bloom, vignette) between `from` and `to`.
    pub fn look(&self, from: &Section, to: &Section) -> Look {
        from.look.lerp(&to.look, self.background_mix)
    }
}

/// CSS `linear-gradient` for a palette, top to bottom.
pub fn palette_css(p: &Palette) -> String {
    let css = |c: glam::Vec3| {
        format!(
            "rgb({}, {}, {})",
            (c.x.clamp(0.0, 1.0) * 255.0).round() as u8,
            (c.y.clamp(0.0, 1.0) * 255.0).round() as u8,
            (c.z.clamp(0.0, 1.0) * 255.0).round() as u8
        )
    };
    format!(
        "linear-gradient(180deg, {} 0%, {} 50%, {} 100%)",
        css(p.top),
        css(p.mid),
        css(p.bottom)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn phases_meet_at_halfway() {
        assert_eq!(Crossfade::fade_out(1.0).background_mix, 0.5);
        assert_eq!(Crossfade::fade_in(0.0).background_mix, 0.5);
        assert_eq!(Crossfade::fade_out(1.0).text_opacity, 0.0);
        assert_eq!(Crossfade::fade_in(0.0).text_opacity, 0.0);
        assert_eq!(Crossfade::fade_in(1.0).background_mix, 1.0);
    }

    #[test]
    fn css_gradient_lists_three_stops() {
        let p = Palette {
            top: Vec3::ONE,
            mid: Vec3::new(0.0, 0.5, 0.0),
            bottom: Vec3::ZERO,
        };
        assert_eq!(
            palette_css(&p),
            "linear-gradient(180deg, rgb(255, 255, 255) 0%, rgb(0, 128, 0) 50%, rgb(0, 0, 0) 100%)"
        );
    }
}
