use crate::constants::*;
use crate::dom;
use js_sys::{Array, Object, Reflect};
use particles_core::{FrameGate, Hand, Landmark, TrackerState, Visualizer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

// MediaPipe Tasks Vision classes, exposed as globals by the host page.
#[wasm_bindgen]
extern "C" {
    type FilesetResolver;

    #[wasm_bindgen(catch, static_method_of = FilesetResolver, js_name = forVisionTasks)]
    fn for_vision_tasks(base_path: &str) -> Result<js_sys::Promise, JsValue>;

    pub type HandLandmarker;

    #[wasm_bindgen(catch, static_method_of = HandLandmarker, js_name = createFromOptions)]
    fn create_from_options(vision: &JsValue, options: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, method, js_name = detectForVideo)]
    fn detect_for_video(
        this: &HandLandmarker,
        video: &web::HtmlVideoElement,
        timestamp_ms: f64,
    ) -> Result<JsValue, JsValue>;
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

fn set(target: &Object, key: &str, value: &JsValue) -> anyhow::Result<()> {
    Reflect::set(target, &JsValue::from_str(key), value).map_err(js_err)?;
    Ok(())
}

fn landmarker_options() -> anyhow::Result<JsValue> {
    let base = Object::new();
    set(&base, "modelAssetPath", &JsValue::from_str(HAND_MODEL_PATH))?;
    set(&base, "delegate", &JsValue::from_str(HAND_DELEGATE))?;
    let options = Object::new();
    set(&options, "baseOptions", &base)?;
    set(&options, "runningMode", &JsValue::from_str(HAND_RUNNING_MODE))?;
    set(&options, "numHands", &JsValue::from(MAX_HANDS))?;
    Ok(options.into())
}

async fn load_landmarker() -> anyhow::Result<HandLandmarker> {
    let vision = JsFuture::from(for_vision_tasks(VISION_WASM_PATH).map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let landmarker = JsFuture::from(
        create_from_options(&vision, &landmarker_options()?).map_err(js_err)?,
    )
    .await
    .map_err(js_err)?;
    Ok(landmarker.unchecked_into())
}

async fn open_camera(document: &web::Document) -> anyhow::Result<web::HtmlVideoElement> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let video: web::HtmlVideoElement = document
        .get_element_by_id(VIDEO_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", VIDEO_ID))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    let stream = JsFuture::from(
        window
            .navigator()
            .media_devices()
            .map_err(js_err)?
            .get_user_media_with_constraints(&constraints)
            .map_err(js_err)?,
    )
    .await
    .map_err(js_err)?;
    video.set_src_object(Some(stream.unchecked_ref::<web::MediaStream>()));
    JsFuture::from(video.play().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(video)
}

/// Landmarks of the first detected hand in a `detectForVideo` result.
fn first_hand(result: &JsValue) -> Option<Hand> {
    let hands: Array = Reflect::get(result, &JsValue::from_str("landmarks"))
        .ok()?
        .dyn_into()
        .ok()?;
    let points: Array = hands.get(0).dyn_into().ok()?;
    let coord = |p: &JsValue, k: &str| {
        Reflect::get(p, &JsValue::from_str(k))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32
    };
    let landmarks: Vec<Landmark> = points
        .iter()
        .map(|p| Landmark::new(coord(&p, "x"), coord(&p, "y"), coord(&p, "z")))
        .collect();
    match Hand::from_slice(&landmarks) {
        Ok(hand) => Some(hand),
        Err(e) => {
            log::warn!("[hands] dropping malformed detection: {}", e);
            None
        }
    }
}

/// Camera + landmark model, two-phase: `Uninitialized` until the async start
/// resolves, then `Ready` or `Failed`.
#[derive(Default)]
pub struct HandTracker {
    state: TrackerState,
    landmarker: Option<HandLandmarker>,
    video: Option<web::HtmlVideoElement>,
    gate: FrameGate,
    // Only the first detection error is logged.
    detect_failed: bool,
}

impl HandTracker {
    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Start the model and camera in the background; failures leave the tracker `Failed`.
    pub fn spawn_start(
        tracker: Rc<RefCell<HandTracker>>,
        document: web::Document,
        app: Rc<RefCell<Visualizer>>,
    ) {
        wasm_bindgen_futures::spawn_local(async move {
            let started = async {
                let landmarker = load_landmarker().await?;
                let video = open_camera(&document).await?;
                anyhow::Ok((landmarker, video))
            }
            .await;
            let mut t = tracker.borrow_mut();
            match started {
                Ok((landmarker, video)) => {
                    // The preview may have been toggled while the camera was starting.
                    let show_video = app.borrow().params.show_video;
                    dom::set_display(&document, VIDEO_ID, show_video);
                    t.landmarker = Some(landmarker);
                    t.video = Some(video);
                    t.state = TrackerState::Ready;
                    log::info!("[hands] hand tracking ready");
                }
                Err(e) => t.state.fail(format!("{:#}", e)),
            }
        });
    }

    /// Run detection if the camera has produced a new frame.
    ///
    /// Returns `None` when there is nothing new to interpret, `Some(None)` for a
    /// fresh frame without a hand, and `Some(Some(hand))` otherwise.
    pub fn poll(&mut self, now_ms: f64) -> Option<Option<Hand>> {
        if !self.state.is_ready() {
            return None;
        }
        let (Some(landmarker), Some(video)) = (&self.landmarker, &self.video) else {
            return None;
        };
        if video.paused() || !self.gate.accept(video.current_time()) {
            return None;
        }
        match landmarker.detect_for_video(video, now_ms) {
            Ok(result) => Some(first_hand(&result)),
            Err(e) => {
                if !self.detect_failed {
                    self.detect_failed = true;
                    log::error!("[hands] detection failed: {:?}", e);
                }
                None
            }
        }
    }
}
