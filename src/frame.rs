use crate::hands::HandTracker;
use crate::overlay;
use crate::render;
use crate::ui::SettingsPanel;
use instant::Instant;
use particles_core::{Camera, OrbitCamera, Visualizer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub app: Rc<RefCell<Visualizer>>,
    pub tracker: Rc<RefCell<HandTracker>>,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub panel: Option<Rc<SettingsPanel>>,

    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,

    pub gpu: Option<render::GpuState<'a>>,
    pub camera: Camera,
    pub started: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let elapsed = self.started.elapsed();

        // At most one detection per decoded video frame.
        let detection = self
            .tracker
            .borrow_mut()
            .poll(elapsed.as_secs_f64() * 1000.0);
        if let Some(hand) = detection {
            self.app.borrow_mut().observe_hand(hand.as_ref());
        }

        let report = self.app.borrow_mut().advance(elapsed.as_secs_f32());
        if report.mode_changed {
            overlay::update_status(&self.document, report.mode);
        }
        if report.params_changed {
            if let Some(panel) = &self.panel {
                panel.sync_from(&self.app.borrow().params);
            }
        }

        {
            let mut orbit = self.orbit.borrow_mut();
            orbit.update();
            self.camera.follow(&orbit);
        }

        if let Some(g) = self.gpu.as_mut() {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            self.camera.aspect = g.aspect();
            let app = self.app.borrow();
            let particles = app.particles();
            g.upload(particles.set(), particles.generation(), report.colors_dirty);
            match g.render(&self.camera, particles.rotation(), app.params.particle_size) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
