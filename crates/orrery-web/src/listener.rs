use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

/// A DOM event listener that stays registered for as long as it lives.
///
/// Dropping it removes the listener and frees the closure, so a session can
/// tear down every handler it installed by dropping its `Vec<Listener>`.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    /// Listen for an event whose concrete type is `E` (e.g. `PointerEvent`).
    /// Events of any other type are ignored.
    pub fn typed<E, F>(target: &EventTarget, event: &'static str, mut handler: F) -> Result<Self, JsValue>
    where
        E: JsCast,
        F: FnMut(E) + 'static,
    {
        Self::new(target, event, move |e: Event| {
            if let Ok(e) = e.dyn_into::<E>() {
                handler(e);
            }
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let removed = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        if removed.is_err() {
            log::warn!("failed to remove '{}' listener", self.event);
        }
    }
}
