use std::rc::Rc;
use orrery_engine::{Control, InputEvent, Overlay, Tooltip};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};
use crate::listener::Listener;

/// Where DOM handlers deliver the input they produce.
pub type InputSink = Rc<dyn Fn(InputEvent)>;

const PANEL_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("top", "16px"),
    ("left", "16px"),
    ("padding", "16px"),
    ("border-radius", "8px"),
    ("background", "rgba(0, 0, 0, 0.7)"),
    ("color", "#ffffff"),
    ("font-family", "sans-serif"),
    ("font-size", "14px"),
    ("user-select", "none"),
];

const TOOLTIP_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("display", "none"),
    ("padding", "8px"),
    ("border-radius", "4px"),
    ("background", "rgba(0, 0, 0, 0.8)"),
    ("color", "#ffffff"),
    ("font-family", "sans-serif"),
    ("font-size", "14px"),
    ("pointer-events", "none"),
];

/// True when both lists hold the same kinds of controls with the same ids,
/// in the same order, so existing DOM can be updated in place.
pub fn same_layout(a: &[Control], b: &[Control]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            x.id() == y.id() && std::mem::discriminant(x) == std::mem::discriminant(y)
        })
}

/// Custom event a slider emits for a raw `<input type=range>` value.
/// Unparseable text becomes NaN and is left for the game to reject.
pub fn slider_event(id: u32, raw: &str) -> InputEvent {
    let value = raw.trim().parse::<f32>().unwrap_or(f32::NAN);
    InputEvent::Custom { kind: id, a: value, b: 0.0, c: 0.0 }
}

pub fn button_event(id: u32) -> InputEvent {
    InputEvent::Custom { kind: id, a: 0.0, b: 0.0, c: 0.0 }
}

/// Tooltip anchor in page pixels: offset right of and above the pointer.
pub fn tooltip_position(tooltip: &Tooltip) -> (String, String) {
    (format!("{}px", tooltip.x), format!("{}px", tooltip.y))
}

enum ControlView {
    Button {
        element: HtmlButtonElement,
    },
    Slider {
        row: HtmlElement,
        caption: HtmlElement,
        input: HtmlInputElement,
    },
}

/// DOM rendition of an `Overlay`: a control panel plus a floating tooltip.
///
/// `sync` is called after every tick with the game's current overlay and
/// only touches the DOM where something changed.
pub struct OverlayView {
    document: Document,
    panel: HtmlElement,
    heading: HtmlElement,
    tooltip: HtmlElement,
    tooltip_title: HtmlElement,
    tooltip_body: HtmlElement,
    controls: Vec<ControlView>,
    listeners: Vec<Listener>,
    shown: Overlay,
    sink: InputSink,
}

impl OverlayView {
    pub fn attach(document: &Document, parent: &Element, sink: InputSink) -> Result<Self, JsValue> {
        let panel = html(document, "div")?;
        apply_style(&panel, PANEL_STYLE)?;
        let heading = html(document, "h2")?;
        heading.style().set_property("margin", "0 0 8px 0")?;
        panel.append_child(&heading)?;

        let tooltip = html(document, "div")?;
        apply_style(&tooltip, TOOLTIP_STYLE)?;
        let tooltip_title = html(document, "strong")?;
        let tooltip_body = html(document, "p")?;
        tooltip_body.style().set_property("margin", "4px 0 0 0")?;
        tooltip.append_child(&tooltip_title)?;
        tooltip.append_child(&tooltip_body)?;

        parent.append_child(&panel)?;
        parent.append_child(&tooltip)?;

        Ok(Self {
            document: document.clone(),
            panel,
            heading,
            tooltip,
            tooltip_title,
            tooltip_body,
            controls: Vec::new(),
            listeners: Vec::new(),
            shown: Overlay::default(),
            sink,
        })
    }

    pub fn sync(&mut self, overlay: &Overlay) -> Result<(), JsValue> {
        if overlay == &self.shown {
            return Ok(());
        }
        if overlay.title != self.shown.title {
            self.heading.set_text_content(Some(&overlay.title));
        }
        if !same_layout(&overlay.controls, &self.shown.controls) {
            self.rebuild_controls(&overlay.controls)?;
        } else {
            self.update_controls(&overlay.controls);
        }
        if overlay.tooltip != self.shown.tooltip {
            self.show_tooltip(overlay.tooltip.as_ref())?;
        }
        self.shown = overlay.clone();
        Ok(())
    }

    fn rebuild_controls(&mut self, controls: &[Control]) -> Result<(), JsValue> {
        self.listeners.clear();
        for view in self.controls.drain(..) {
            match view {
                ControlView::Button { element } => element.remove(),
                ControlView::Slider { row, .. } => row.remove(),
            }
        }

        for control in controls {
            let view = match control {
                Control::Button { id, label } => {
                    let element: HtmlButtonElement = self.document.create_element("button")?.dyn_into()?;
                    element.set_text_content(Some(label));
                    apply_style(&element, &[("display", "block"), ("margin-top", "8px"), ("padding", "4px 8px")])?;
                    let sink = self.sink.clone();
                    let id = *id;
                    self.listeners.push(Listener::new(&element, "click", move |_| sink(button_event(id)))?);
                    self.panel.append_child(&element)?;
                    ControlView::Button { element }
                }
                Control::Slider { id, label, min, max, step, value } => {
                    let row = html(&self.document, "div")?;
                    row.style().set_property("margin-top", "8px")?;
                    let caption = html(&self.document, "span")?;
                    caption.set_text_content(Some(label));
                    let input: HtmlInputElement = self.document.create_element("input")?.dyn_into()?;
                    input.set_type("range");
                    input.set_min(&min.to_string());
                    input.set_max(&max.to_string());
                    input.set_step(&step.to_string());
                    input.set_value(&value.to_string());
                    input.style().set_property("display", "block")?;

                    let sink = self.sink.clone();
                    let id = *id;
                    let source = input.clone();
                    self.listeners.push(Listener::new(&input, "input", move |_| {
                        sink(slider_event(id, &source.value()))
                    })?);

                    row.append_child(&caption)?;
                    row.append_child(&input)?;
                    self.panel.append_child(&row)?;
                    ControlView::Slider { row, caption, input }
                }
            };
            self.controls.push(view);
        }
        Ok(())
    }

    fn update_controls(&mut self, controls: &[Control]) {
        for ((view, control), old) in self.controls.iter().zip(controls).zip(&self.shown.controls) {
            if control == old {
                continue;
            }
            match (view, control) {
                (ControlView::Button { element }, Control::Button { label, .. }) => {
                    element.set_text_content(Some(label));
                }
                (ControlView::Slider { caption, input, .. }, Control::Slider { label, value, .. }) => {
                    caption.set_text_content(Some(label));
                    let text = value.to_string();
                    if input.value() != text {
                        input.set_value(&text);
                    }
                }
                _ => {}
            }
        }
    }

    fn show_tooltip(&self, tooltip: Option<&Tooltip>) -> Result<(), JsValue> {
        let style = self.tooltip.style();
        match tooltip {
            Some(t) => {
                let (left, top) = tooltip_position(t);
                style.set_property("left", &left)?;
                style.set_property("top", &top)?;
                self.tooltip_title.set_text_content(Some(&t.title));
                self.tooltip_body.set_text_content(Some(&t.body));
                style.set_property("display", "block")?;
            }
            None => style.set_property("display", "none")?,
        }
        Ok(())
    }

    /// Remove the panel and tooltip and drop every control listener.
    pub fn detach(&mut self) {
        self.listeners.clear();
        self.controls.clear();
        self.panel.remove();
        self.tooltip.remove();
    }
}

impl Drop for OverlayView {
    fn drop(&mut self) {
        self.detach();
    }
}

fn html(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(document.create_element(tag)?.dyn_into()?)
}

fn apply_style(element: &HtmlElement, rules: &[(&str, &str)]) -> Result<(), JsValue> {
    let style = element.style();
    for (name, value) in rules {
        style.set_property(name, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider(id: u32, value: f32) -> Control {
        Control::Slider { id, label: format!("s{id}"), min: 0.0, max: 10.0, step: 0.1, value }
    }

    #[test]
    fn value_changes_keep_the_layout() {
        let a = vec![Control::Button { id: 1, label: "Pause".into() }, slider(100, 1.0)];
        let b = vec![Control::Button { id: 1, label: "Play".into() }, slider(100, 4.5)];
        assert!(same_layout(&a, &b));
    }

    #[test]
    fn new_or_reordered_controls_change_the_layout() {
        let a = vec![slider(100, 1.0), slider(101, 1.0)];
        let b = vec![slider(101, 1.0), slider(100, 1.0)];
        assert!(!same_layout(&a, &b));
        assert!(!same_layout(&a, &a[..1]));
        assert!(!same_layout(&[Control::Button { id: 100, label: String::new() }], &a[..1]));
    }

    #[test]
    fn slider_text_is_parsed() {
        assert_eq!(slider_event(103, "2.5"), InputEvent::Custom { kind: 103, a: 2.5, b: 0.0, c: 0.0 });
        match slider_event(103, "fast") {
            InputEvent::Custom { a, .. } => assert!(a.is_nan()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn tooltip_is_placed_at_its_anchor() {
        let t = Tooltip { x: 110.0, y: 40.0, title: "Earth".into(), body: "Our home planet".into() };
        assert_eq!(tooltip_position(&t), ("110px".to_string(), "40px".to_string()));
    }
}
