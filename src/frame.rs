use crate::constants::MAX_FRAME_DT_SEC;
use crate::dom::{self, Presenter};
use crate::loader;
use crate::overlay;
use crate::render;
use instant::Instant;
use pointscroll_core::{Director, LoadRequest, Phase, RenderFrame};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub struct FrameContext<'a> {
    pub director: Rc<RefCell<Director>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub gpu: Option<render::GpuState<'a>>,
    pub presenter: Presenter,
    pub render_frame: RenderFrame,
    pub last_instant: Instant,
    pub last_phase: Option<Phase>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32().min(MAX_FRAME_DT_SEC);

        let requests = {
            let mut d = self.director.borrow_mut();
            d.tick(dt_sec);
            d.take_load_requests()
        };
        for request in requests {
            spawn_load(self.director.clone(), request);
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
        }
        let aspect = self.gpu.as_ref().map_or(1.0, |g| g.aspect());
        {
            let d = self.director.borrow();
            let phase = d.phase();
            if self.last_phase != Some(phase) {
                log::debug!("[transition] phase {:?}", phase);
                overlay::set_visible(&self.document, phase == Phase::Boot);
                self.last_phase = Some(phase);
            }
            if let Some(p) = d.presentation() {
                self.presenter.apply(&self.document, &p);
            }
            d.render_frame(aspect, &mut self.render_frame);
        }

        if let Some(g) = &mut self.gpu {
            if let Err(e) = g.render(&self.render_frame) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

/// Fetch one section's geometry and hand the result back to the director.
fn spawn_load(director: Rc<RefCell<Director>>, request: LoadRequest) {
    spawn_local(async move {
        let result = loader::fetch_point_cloud(&request.path).await;
        if let Err(e) = &result {
            log::error!("[assets] {}", e);
        }
        director
            .borrow_mut()
            .on_geometry_loaded(request.ticket, result);
    });
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            if let Some(doc) = dom::window_document() {
                overlay::show_error(&doc, "WebGPU is not available in this browser.");
            }
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
