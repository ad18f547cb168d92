use crate::input::TouchTracker;
use pointscroll_core::{Director, InputKind};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn first_touch_y(ev: &web::TouchEvent) -> Option<f32> {
    ev.touches().get(0).map(|t| t.client_y() as f32)
}

pub fn wire_touch(window: &web::Window, director: Rc<RefCell<Director>>) {
    let tracker = Rc::new(RefCell::new(TouchTracker::default()));

    let start_tracker = tracker.clone();
    let start = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        // Multi-touch gestures (pinch) are left to the browser
        if ev.touches().length() != 1 {
            start_tracker.borrow_mut().end();
            return;
        }
        if let Some(y) = first_touch_y(&ev) {
            start_tracker.borrow_mut().start(y);
        }
    }) as Box<dyn FnMut(web::TouchEvent)>);
    super::add_active_listener(window.as_ref(), "touchstart", start.as_ref().unchecked_ref());
    start.forget();

    let move_tracker = tracker.clone();
    let moved = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        if !move_tracker.borrow().is_active() {
            return;
        }
        ev.prevent_default();
        if let Some(y) = first_touch_y(&ev) {
            let delta = move_tracker.borrow_mut().move_to(y);
            if delta != 0.0 {
                director.borrow_mut().on_scroll(delta, InputKind::Touch);
            }
        }
    }) as Box<dyn FnMut(web::TouchEvent)>);
    super::add_active_listener(window.as_ref(), "touchmove", moved.as_ref().unchecked_ref());
    moved.forget();

    for kind in ["touchend", "touchcancel"] {
        let end_tracker = tracker.clone();
        let end = Closure::wrap(Box::new(move |_ev: web::TouchEvent| {
            end_tracker.borrow_mut().end();
        }) as Box<dyn FnMut(web::TouchEvent)>);
        super::add_active_listener(window.as_ref(), kind, end.as_ref().unchecked_ref());
        end.forget();
    }
}
