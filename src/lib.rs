#![cfg(target_arch = "wasm32")]
use instant::Instant;
use pointscroll_core::{Direction, Director, RenderFrame};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod overlay;
mod render;

thread_local! {
    static DIRECTOR: RefCell<Option<Rc<RefCell<Director>>>> = const { RefCell::new(None) };
}

fn with_director(f: impl FnOnce(&mut Director)) {
    DIRECTOR.with(|slot| match slot.borrow().as_ref() {
        Some(d) => f(&mut d.borrow_mut()),
        None => log::warn!("[ui] control used before the show loaded"),
    });
}

/// Page controls: highlight colour (`#rgb`, `#rrggbb`, `rgb(..)`).
#[wasm_bindgen(js_name = setHighlight)]
pub fn set_highlight(color: &str) {
    with_director(|d| d.set_highlight(color));
}

/// Page controls: scatter amplitude until the next phase update.
#[wasm_bindgen(js_name = setScatter)]
pub fn set_scatter(amount: f32) {
    with_director(|d| d.set_scatter(amount));
}

/// Page controls: downsample ratio in (0, 1].
#[wasm_bindgen(js_name = setDensity)]
pub fn set_density(ratio: f32) {
    with_director(|d| d.set_density(ratio));
}

/// Page controls: jump to a section by index.
#[wasm_bindgen(js_name = goToSection)]
pub fn go_to_section(index: usize) {
    with_director(|d| {
        let direction = if index >= d.current_section() {
            Direction::Forward
        } else {
            Direction::Backward
        };
        d.on_section_advance_request(index, direction);
    });
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pointscroll starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(doc) = dom::window_document() {
                overlay::show_error(&doc, &format!("{}", e));
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Keep the canvas backing store at CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);
    overlay::show(&document);

    let show = loader::fetch_show(constants::SHOW_CONFIG_URL).await?;
    let director = Rc::new(RefCell::new(Director::new(show)));
    DIRECTOR.with(|slot| *slot.borrow_mut() = Some(director.clone()));

    events::wire_wheel(&window, director.clone());
    events::wire_touch(&window, director.clone());
    events::wire_keydown(director.clone());

    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        director,
        canvas,
        document,
        gpu,
        presenter: dom::Presenter::default(),
        render_frame: RenderFrame::default(),
        last_instant: Instant::now(),
        last_phase: None,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
