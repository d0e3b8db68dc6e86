use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Repeating `requestAnimationFrame` task with a single owner.
///
/// Each callback runs to completion and then requests the next frame.
/// `cancel` (or drop) revokes the pending request and releases the closure,
/// after which the callback never runs again.
pub struct FrameLoop {
    window: web_sys::Window,
    handle: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameLoop {
    /// Start calling `on_frame(timestamp_ms)` once per display refresh.
    pub fn start<F>(mut on_frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) + 'static,
    {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let next_window = window.clone();
        let next_handle = handle.clone();
        // The closure needs a handle to itself to schedule the next frame.
        let weak_callback = Rc::downgrade(&callback);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            next_handle.set(None);
            on_frame(timestamp);

            let Some(this) = weak_callback.upgrade() else {
                return;
            };
            let this = this.borrow();
            let Some(cb) = this.as_ref() else {
                // Cancelled from inside on_frame.
                return;
            };
            match next_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => next_handle.set(Some(id)),
                Err(err) => log::warn!("requestAnimationFrame failed: {:?}", err),
            }
        }) as Box<dyn FnMut(f64)>));

        let first = {
            let cb = callback.borrow();
            match cb.as_ref() {
                Some(cb) => window.request_animation_frame(cb.as_ref().unchecked_ref())?,
                None => return Err(JsValue::from_str("frame callback missing")),
            }
        };
        handle.set(Some(first));

        Ok(Self {
            window,
            handle,
            callback,
        })
    }

    /// Stop the loop. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", err);
            }
        }
        // The closure may be running right now (cancel from inside a frame);
        // in that case it is released once the borrow ends.
        if let Ok(mut cb) = self.callback.try_borrow_mut() {
            cb.take();
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
