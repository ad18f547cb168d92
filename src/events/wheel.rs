use crate::dom;
use crate::input;
use pointscroll_core::{Director, InputKind};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_wheel(window: &web::Window, director: Rc<RefCell<Director>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        let delta =
            input::normalize_wheel_delta(ev.delta_y(), ev.delta_mode(), dom::viewport_height());
        if delta != 0.0 {
            director.borrow_mut().on_scroll(delta, InputKind::Wheel);
        }
    }) as Box<dyn FnMut(web::WheelEvent)>);
    super::add_active_listener(window.as_ref(), "wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
