//! Declarative overlay model.
//!
//! Games describe their HUD as plain data each frame; the web bridge turns it
//! into DOM and routes control input back as `InputEvent::Custom { kind: id, .. }`.

/// One interactive control. `id` becomes the `kind` of the custom event it emits.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Emits `Custom { kind: id, a: 0.0, .. }` when pressed.
    Button { id: u32, label: String },
    /// Emits `Custom { kind: id, a: value, .. }` on every input.
    Slider {
        id: u32,
        label: String,
        min: f32,
        max: f32,
        step: f32,
        value: f32,
    },
}

impl Control {
    pub fn id(&self) -> u32 {
        match self {
            Control::Button { id, .. } | Control::Slider { id, .. } => *id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Control::Button { label, .. } | Control::Slider { label, .. } => label,
        }
    }
}

/// Floating info box anchored at page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub x: f32,
    pub y: f32,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub title: String,
    pub controls: Vec<Control>,
    pub tooltip: Option<Tooltip>,
}

impl Overlay {
    pub fn control(&self, id: u32) -> Option<&Control> {
        self.controls.iter().find(|c| c.id() == id)
    }
}
