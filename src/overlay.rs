use crate::constants::{OVERLAY_ID, OVERLAY_MESSAGE_ID};
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(OVERLAY_ID)
        .and_then(|el| el.get_attribute("style"))
        .map(|s| s.contains("display:none"))
        .unwrap_or(false)
}

/// Show or hide the overlay, skipping redundant attribute writes.
#[inline]
pub fn set_visible(document: &web::Document, visible: bool) {
    if visible == is_hidden(document) {
        if visible {
            show(document);
        } else {
            hide(document);
        }
    }
}

/// Replace the overlay text with an error and keep it up.
pub fn show_error(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(OVERLAY_MESSAGE_ID) {
        el.set_text_content(Some(message));
    }
    show(document);
}
