pub mod keyboard;
pub mod touch;
pub mod wheel;

pub use keyboard::wire_keydown;
pub use touch::wire_touch;
pub use wheel::wire_wheel;

use web_sys as web;

/// Register a non-passive listener so handlers may call `prevent_default`.
pub(crate) fn add_active_listener(
    target: &web::EventTarget,
    kind: &str,
    callback: &js_sys::Function,
) {
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    if let Err(e) = target
        .add_event_listener_with_callback_and_add_event_listener_options(kind, callback, &opts)
    {
        log::warn!("[input] could not listen for {}: {:?}", kind, e);
    }
}
