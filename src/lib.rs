#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use instant::Instant;
use particles_core::{Camera, OrbitCamera, Params, Visualizer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod hands;
mod input;
mod overlay;
mod render;
mod ui;

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

fn wire_fullscreen_button(document: &web::Document) {
    let doc = document.clone();
    dom::add_click_listener(document, FULLSCREEN_BUTTON_ID, move || {
        dom::toggle_fullscreen(&doc);
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gesture-particles starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
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
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);
    wire_fullscreen_button(&document);

    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let app = Rc::new(RefCell::new(Visualizer::new(Params::default(), seed)));

    let panel = match ui::SettingsPanel::build(&document, app.clone()) {
        Ok(p) => Some(Rc::new(p)),
        Err(e) => {
            log::error!("settings panel unavailable: {:?}", e);
            None
        }
    };

    let orbit = Rc::new(RefCell::new(OrbitCamera::default()));
    events::wire_global_keydown(document.clone(), app.clone(), panel.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        orbit: orbit.clone(),
        drag_state: Rc::new(RefCell::new(input::DragState::default())),
    });

    let gpu = frame::init_gpu(&canvas).await;

    // The tracker finishes on its own; until then the model auto-rotates.
    let tracker = Rc::new(RefCell::new(hands::HandTracker::default()));
    hands::HandTracker::spawn_start(tracker.clone(), document.clone(), app.clone());

    let camera = Camera {
        fovy_radians: CAMERA_FOV_DEG.to_radians(),
        znear: CAMERA_NEAR,
        zfar: CAMERA_FAR,
        ..Camera::default()
    };
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        tracker,
        orbit,
        panel,
        canvas,
        document: document.clone(),
        gpu,
        camera,
        started: Instant::now(),
    }));
    overlay::dismiss_loader(&document);
    frame::start_loop(frame_ctx);

    Ok(())
}
