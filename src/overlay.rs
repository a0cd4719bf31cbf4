use crate::constants::{LOADER_ID, LOADER_REMOVE_DELAY_MS, STATUS_ID};
use particles_core::InteractionMode;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Show which interaction mode the last processed video frame put us in.
pub fn update_status(document: &web::Document, mode: InteractionMode) {
    if let Some(el) = document
        .get_element_by_id(STATUS_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        el.set_inner_text(mode.status_text());
        _ = el.style().set_property("color", mode.status_color());
    }
}

/// Fade the loading screen out, then drop it from the page.
pub fn dismiss_loader(document: &web::Document) {
    let Some(el) = document.get_element_by_id(LOADER_ID) else {
        return;
    };
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        _ = html.style().set_property("opacity", "0");
    }
    let remove = Closure::once_into_js(move || el.remove());
    if let Some(w) = web::window() {
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            remove.unchecked_ref(),
            LOADER_REMOVE_DELAY_MS,
        );
    }
}

#[inline]
pub fn toggle_panel(document: &web::Document, panel_id: &str) {
    if let Some(el) = document.get_element_by_id(panel_id) {
        _ = el.class_list().toggle("hidden");
    }
}
