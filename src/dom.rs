use crate::constants::{BACKDROP_ID, BODY_ID, PROGRESS_ID, TEXT_ID, TITLE_ID};
use pointscroll_core::{palette_css, Presentation};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn viewport_height() -> f64 {
    web::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn html_element(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn set_style(document: &web::Document, id: &str, property: &str, value: &str) {
    if let Some(el) = html_element(document, id) {
        _ = el.style().set_property(property, value);
    }
}

/// Mirrors `Presentation` into the page, touching the DOM only when a value
/// actually changed.
#[derive(Default)]
pub struct Presenter {
    title: String,
    body: String,
    background: String,
    opacity: String,
    progress: String,
}

impl Presenter {
    pub fn apply(&mut self, document: &web::Document, p: &Presentation<'_>) {
        if self.title != p.title {
            self.title = p.title.to_string();
            set_text(document, TITLE_ID, p.title);
        }
        if self.body != p.body {
            self.body = p.body.to_string();
            set_text(document, BODY_ID, p.body);
        }
        let background = palette_css(&p.palette);
        if self.background != background {
            set_style(document, BACKDROP_ID, "background", &background);
            self.background = background;
        }
        let opacity = format!("{:.3}", p.text_opacity.clamp(0.0, 1.0));
        if self.opacity != opacity {
            set_style(document, TEXT_ID, "opacity", &opacity);
            self.opacity = opacity;
        }
        let progress = format!("{:.1}%", p.progress.clamp(0.0, 1.0) * 100.0);
        if self.progress != progress {
            set_style(document, PROGRESS_ID, "width", &progress);
            self.progress = progress;
        }
    }
}
