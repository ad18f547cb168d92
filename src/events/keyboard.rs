use crate::input::{self, KeyAction};
use pointscroll_core::{Direction, Director};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_keydown(ev: &web::KeyboardEvent, director: &Rc<RefCell<Director>>) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(action) = input::key_action(&ev.key()) else {
        return;
    };
    ev.prevent_default();
    let mut d = director.borrow_mut();
    match action {
        KeyAction::DenseUp | KeyAction::DenseDown => {
            let ratio = input::step_density(d.density(), action == KeyAction::DenseUp);
            log::info!("[input] density {:.2}", ratio);
            d.set_density(ratio);
        }
        _ => {
            if let Some((index, forward)) =
                input::navigation_target(action, d.current_section(), d.show().len())
            {
                let direction = if forward {
                    Direction::Forward
                } else {
                    Direction::Backward
                };
                d.on_section_advance_request(index, direction);
            }
        }
    }
}

pub fn wire_keydown(director: Rc<RefCell<Director>>) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_keydown(&ev, &director);
        }) as Box<dyn FnMut(web::KeyboardEvent)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
