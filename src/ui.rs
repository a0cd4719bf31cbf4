use crate::constants::{PANEL_ID, VIDEO_ID};
use crate::dom;
use particles_core::{Action, ColorMode, ParamKey, Params, Rgb, Shape, Visualizer};
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy)]
enum Control {
    Slider(ParamKey),
    ShapeSelect,
    ColorModeSelect,
    ColorPicker,
    ShowVideo,
    Reset(&'static str, Action),
}

const FOLDERS: [(&str, &[Control]); 4] = [
    (
        "Model & appearance",
        &[
            Control::ShapeSelect,
            Control::Slider(ParamKey::ParticleCount),
            Control::Slider(ParamKey::ParticleSize),
            Control::Reset("Reset model", Action::ResetModel),
        ],
    ),
    (
        "Colour",
        &[
            Control::ColorModeSelect,
            Control::ColorPicker,
            Control::Slider(ParamKey::GradientSpeed),
        ],
    ),
    (
        "Auto rotation",
        &[
            Control::Slider(ParamKey::AutoRotSpeed),
            Control::Slider(ParamKey::AutoRotX),
            Control::Slider(ParamKey::AutoRotY),
            Control::Slider(ParamKey::AutoRotZ),
            Control::Reset("Reset auto rotation", Action::ResetAutoRotation),
        ],
    ),
    (
        "Gestures",
        &[
            Control::Slider(ParamKey::RotateSpeed),
            Control::Slider(ParamKey::ExpansionSensitivity),
            Control::Slider(ParamKey::ResponseSpeed),
            Control::ShowVideo,
            Control::Reset("Reset gestures", Action::ResetGestures),
        ],
    ),
];

fn create<T: JsCast>(document: &web::Document, tag: &str) -> anyhow::Result<T> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

fn append(parent: &web::Node, child: &web::Node) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

fn format_value(key: ParamKey, value: f32) -> String {
    match key {
        ParamKey::ParticleCount => format!("{:.0}", value),
        _ => format!("{:.2}", value),
    }
}

struct Slider {
    key: ParamKey,
    input: web::HtmlInputElement,
    readout: web::HtmlElement,
}

/// DOM settings panel bound to the shared [`Visualizer`].
///
/// Controls write into `Params` and queue follow-up actions; `sync_from` pushes
/// values back after resets or keyboard shortcuts changed them.
pub struct SettingsPanel {
    sliders: Vec<Slider>,
    shape: Option<web::HtmlSelectElement>,
    color_mode: Option<web::HtmlSelectElement>,
    color: Option<web::HtmlInputElement>,
    show_video: Option<web::HtmlInputElement>,
}

impl SettingsPanel {
    pub fn build(document: &web::Document, app: Rc<RefCell<Visualizer>>) -> anyhow::Result<Self> {
        let root = document
            .get_element_by_id(PANEL_ID)
            .ok_or_else(|| anyhow::anyhow!("missing #{}", PANEL_ID))?;
        let mut panel = SettingsPanel {
            sliders: Vec::new(),
            shape: None,
            color_mode: None,
            color: None,
            show_video: None,
        };
        for (title, controls) in FOLDERS {
            let folder: web::HtmlElement = create(document, "details")?;
            _ = folder.set_attribute("open", "");
            let summary: web::HtmlElement = create(document, "summary")?;
            summary.set_inner_text(title);
            append(&folder, &summary)?;
            for control in controls {
                panel.add_control(document, &folder, *control, &app)?;
            }
            append(&root, &folder)?;
        }
        panel.sync_from(&app.borrow().params);
        Ok(panel)
    }

    fn add_control(
        &mut self,
        document: &web::Document,
        folder: &web::HtmlElement,
        control: Control,
        app: &Rc<RefCell<Visualizer>>,
    ) -> anyhow::Result<()> {
        let row: web::HtmlElement = create(document, "div")?;
        row.set_class_name("row");
        match control {
            Control::Slider(key) => {
                let spec = key.spec();
                let label: web::HtmlElement = create(document, "span")?;
                label.set_inner_text(spec.label);
                let input: web::HtmlInputElement = create(document, "input")?;
                input.set_type("range");
                input.set_min(&spec.min.to_string());
                input.set_max(&spec.max.to_string());
                input.set_step(&spec.step.map_or_else(|| "any".to_string(), |s| s.to_string()));
                let readout: web::HtmlElement = create(document, "span")?;
                readout.set_class_name("value");
                append(&row, &label)?;
                append(&row, &input)?;
                append(&row, &readout)?;

                let (input_c, readout_c) = (input.clone(), readout.clone());
                dom::listen(&input, "input", move |_: web::Event| {
                    if let Ok(v) = input_c.value().parse::<f32>() {
                        readout_c.set_inner_text(&format_value(key, v));
                    }
                });
                // A count change rebuilds every buffer, so wait for the release.
                let event = match key {
                    ParamKey::ParticleCount => "change",
                    _ => "input",
                };
                let (app, input_c, readout_c) = (app.clone(), input.clone(), readout.clone());
                dom::listen(&input, event, move |_: web::Event| {
                    let Ok(value) = input_c.value().parse::<f32>() else {
                        return;
                    };
                    let mut app = app.borrow_mut();
                    let effect = app.params.set(key, value);
                    app.apply_effect(effect);
                    readout_c.set_inner_text(&format_value(key, app.params.get(key)));
                });
                self.sliders.push(Slider {
                    key,
                    input,
                    readout,
                });
            }
            Control::ShapeSelect => {
                let select = labelled_select(document, &row, "Shape")?;
                for shape in Shape::ALL {
                    add_option(&select, shape.label(), shape.name())?;
                }
                let (app, select_c) = (app.clone(), select.clone());
                dom::listen(&select, "change", move |_: web::Event| {
                    match Shape::from_str(&select_c.value()) {
                        Ok(shape) => {
                            let mut app = app.borrow_mut();
                            let effect = app.params.set_shape(shape);
                            app.apply_effect(effect);
                        }
                        Err(e) => log::warn!("[ui] {}", e),
                    }
                });
                self.shape = Some(select);
            }
            Control::ColorModeSelect => {
                let select = labelled_select(document, &row, "Colour mode")?;
                for mode in ColorMode::ALL {
                    add_option(&select, mode.label(), mode.name())?;
                }
                let (app, select_c) = (app.clone(), select.clone());
                dom::listen(&select, "change", move |_: web::Event| {
                    match ColorMode::from_str(&select_c.value()) {
                        Ok(mode) => {
                            let mut app = app.borrow_mut();
                            let effect = app.params.set_color_mode(mode);
                            app.apply_effect(effect);
                        }
                        Err(e) => log::warn!("[ui] {}", e),
                    }
                });
                self.color_mode = Some(select);
            }
            Control::ColorPicker => {
                let input = labelled_input(document, &row, "Colour", "color")?;
                let (app, input_c) = (app.clone(), input.clone());
                dom::listen(&input, "input", move |_: web::Event| {
                    match Rgb::from_hex(&input_c.value()) {
                        Ok(color) => {
                            let mut app = app.borrow_mut();
                            let effect = app.params.set_color(color);
                            app.apply_effect(effect);
                        }
                        Err(e) => log::warn!("[ui] {}", e),
                    }
                });
                self.color = Some(input);
            }
            Control::ShowVideo => {
                let input = labelled_input(document, &row, "Show camera", "checkbox")?;
                let (app, input_c, doc) = (app.clone(), input.clone(), document.clone());
                dom::listen(&input, "change", move |_: web::Event| {
                    let show = input_c.checked();
                    let mut app = app.borrow_mut();
                    let effect = app.params.set_show_video(show);
                    app.apply_effect(effect);
                    dom::set_display(&doc, VIDEO_ID, show);
                });
                self.show_video = Some(input);
            }
            Control::Reset(label, action) => {
                let button: web::HtmlElement = create(document, "button")?;
                button.set_inner_text(label);
                append(&row, &button)?;
                let app = app.clone();
                dom::listen(&button, "click", move |_: web::Event| {
                    app.borrow_mut().queue(action);
                });
            }
        }
        append(folder, &row)
    }

    /// Re-read every control value from `params`.
    pub fn sync_from(&self, params: &Params) {
        for s in &self.sliders {
            let v = params.get(s.key);
            s.input.set_value(&v.to_string());
            s.readout.set_inner_text(&format_value(s.key, v));
        }
        if let Some(select) = &self.shape {
            select.set_value(params.shape.name());
        }
        if let Some(select) = &self.color_mode {
            select.set_value(params.color_mode.name());
        }
        if let Some(input) = &self.color {
            input.set_value(&params.color.to_hex());
        }
        if let Some(input) = &self.show_video {
            input.set_checked(params.show_video);
        }
    }
}

fn labelled_select(
    document: &web::Document,
    row: &web::HtmlElement,
    text: &str,
) -> anyhow::Result<web::HtmlSelectElement> {
    let label: web::HtmlElement = create(document, "span")?;
    label.set_inner_text(text);
    let select: web::HtmlSelectElement = create(document, "select")?;
    append(row, &label)?;
    append(row, &select)?;
    Ok(select)
}

fn labelled_input(
    document: &web::Document,
    row: &web::HtmlElement,
    text: &str,
    kind: &str,
) -> anyhow::Result<web::HtmlInputElement> {
    let label: web::HtmlElement = create(document, "span")?;
    label.set_inner_text(text);
    let input: web::HtmlInputElement = create(document, "input")?;
    input.set_type(kind);
    append(row, &label)?;
    append(row, &input)?;
    Ok(input)
}

fn add_option(select: &web::HtmlSelectElement, text: &str, value: &str) -> anyhow::Result<()> {
    let option = web::HtmlOptionElement::new_with_text_and_value(text, value)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    select
        .add_with_html_option_element(&option)
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}
