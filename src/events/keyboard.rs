use crate::constants::{PANEL_ID, VIDEO_ID};
use crate::input::{self, KeyCommand};
use crate::ui::SettingsPanel;
use crate::{dom, overlay};
use particles_core::{Shape, Visualizer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Whether the key press belongs to a form control in the settings panel.
fn typing_into_control(ev: &web::KeyboardEvent) -> bool {
    ev.target().is_some_and(|t| {
        t.dyn_ref::<web::HtmlInputElement>().is_some()
            || t.dyn_ref::<web::HtmlSelectElement>().is_some()
    })
}

fn step_shape(app: &Rc<RefCell<Visualizer>>, offset: isize) {
    let mut app = app.borrow_mut();
    let current = Shape::ALL
        .iter()
        .position(|s| *s == app.params.shape)
        .unwrap_or(0);
    let next = Shape::ALL[input::cycle_index(current, Shape::ALL.len(), offset)];
    let effect = app.params.set_shape(next);
    app.apply_effect(effect);
    log::info!("[keys] shape={}", next);
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    document: &web::Document,
    app: &Rc<RefCell<Visualizer>>,
    panel: Option<&SettingsPanel>,
) {
    if typing_into_control(ev) {
        return;
    }
    let Some(command) = input::key_command(&ev.key()) else {
        return;
    };
    match command {
        KeyCommand::ToggleFullscreen => dom::toggle_fullscreen(document),
        KeyCommand::TogglePanel => overlay::toggle_panel(document, PANEL_ID),
        KeyCommand::ToggleVideo => {
            let show = {
                let mut app = app.borrow_mut();
                let show = !app.params.show_video;
                let effect = app.params.set_show_video(show);
                app.apply_effect(effect);
                show
            };
            dom::set_display(document, VIDEO_ID, show);
        }
        KeyCommand::NextShape => step_shape(app, 1),
        KeyCommand::PreviousShape => step_shape(app, -1),
    }
    if let Some(panel) = panel {
        panel.sync_from(&app.borrow().params);
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(
    document: web::Document,
    app: Rc<RefCell<Visualizer>>,
    panel: Option<Rc<SettingsPanel>>,
) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &document, &app, panel.as_deref());
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
