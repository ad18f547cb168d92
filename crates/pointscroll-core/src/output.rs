//! Data handed to the sinks each frame: the renderer's buffers and uniforms,
//! and the presentation state mirrored into the DOM.

use crate::section::{Look, Palette};
use crate::transition::Phase;
use glam::{Mat4, Vec3};

/// Renderer uniforms. The only place where enums become numbers.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// rgb highlight, w = glow mode code
    pub highlight: [f32; 4],
    /// x = time (s), y = scatter amplitude, z = position blend, w = colour blend
    pub params: [f32; 4],
    /// x = bloom, y = vignette, z = point size (world), w = aspect ratio
    pub post: [f32; 4],
}

impl FrameUniforms {
    pub fn new(view_proj: Mat4, model: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            ..Default::default()
        }
    }
}

/// Reusable per-frame buffers for the point renderer.
#[derive(Clone, Debug, Default)]
pub struct RenderFrame {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub uniforms: FrameUniforms,
}

impl RenderFrame {
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// State the DOM layer mirrors after every update.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation<'a> {
    pub phase: Phase,
    pub section: usize,
    pub next: Option<usize>,
    pub progress: f32,
    pub title: &'a str,
    pub body: &'a str,
    pub text_opacity: f32,
    pub palette: Palette,
    pub look: Look,
}
