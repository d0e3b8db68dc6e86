use std::cell::RefCell;
use std::rc::Rc;
use orrery_engine::{Game, GameConfig, InputEvent, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, PointerEvent, WheelEvent, Window};
use crate::frame_loop::FrameLoop;
use crate::listener::Listener;
use crate::overlay::{InputSink, OverlayView};
use crate::runner::GameRunner;
use crate::surface::Surface;

/// A fresh seed per mount, so every page load gets its own sky.
pub fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo | 1
}

/// Put `next` into `slot`, handing the previous occupant to `retire`.
///
/// `None` (nothing was mounted) leaves the current occupant running.
/// `retire` runs with the slot unborrowed. Returns true when `next` was installed.
pub fn replace_session<T>(slot: &RefCell<Option<T>>, next: Option<T>, retire: impl FnOnce(T)) -> bool {
    let Some(next) = next else {
        return false;
    };
    let previous = slot.borrow_mut().take();
    if let Some(previous) = previous {
        retire(previous);
    }
    *slot.borrow_mut() = Some(next);
    true
}

fn window_viewport(window: &Window) -> Viewport {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
    Viewport::new(width as f32, height as f32)
}

/// One mounted game: runner, canvas, overlay, DOM listeners and the
/// animation-frame loop. `unmount` (or drop) tears all of it down.
pub struct WebSession<G: Game + 'static> {
    runner: Rc<RefCell<GameRunner<G>>>,
    root: HtmlElement,
    surface: Rc<RefCell<Surface>>,
    overlay: Rc<RefCell<OverlayView>>,
    listeners: Vec<Listener>,
    frame_loop: Option<FrameLoop>,
}

impl<G: Game + 'static> WebSession<G> {
    /// Mount `game` inside the element with id `element_id`.
    ///
    /// Returns `Ok(None)` when no such element exists; DOM failures while
    /// building the page are returned as errors.
    pub fn mount(element_id: &str, game: G, config: GameConfig) -> Result<Option<Self>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let Some(host) = document.get_element_by_id(element_id) else {
            log::warn!("mount element #{} not found, nothing mounted", element_id);
            return Ok(None);
        };

        let root: HtmlElement = document.create_element("div")?.dyn_into()?;
        let style = root.style();
        style.set_property("position", "relative")?;
        style.set_property("overflow", "hidden")?;
        host.append_child(&root)?;

        let viewport = window_viewport(&window);
        let surface = Rc::new(RefCell::new(Surface::attach(&document, &root, viewport)?));

        let mut runner = GameRunner::new(game, config, viewport);
        runner.init();
        let runner = Rc::new(RefCell::new(runner));

        let sink: InputSink = {
            let runner = runner.clone();
            Rc::new(move |event: InputEvent| match runner.try_borrow_mut() {
                Ok(mut r) => r.push_input(event),
                Err(_) => log::warn!("input dropped while a frame was running: {:?}", event),
            })
        };

        let overlay = Rc::new(RefCell::new(OverlayView::attach(&document, &root, sink.clone())?));
        {
            let r = runner.borrow();
            surface.borrow().paint(r.draw_list())?;
            overlay.borrow_mut().sync(&r.overlay())?;
        }

        let listeners = Self::listen(&window, &surface, &sink)?;

        let frame_loop = {
            let runner = runner.clone();
            let surface = surface.clone();
            let overlay = overlay.clone();
            FrameLoop::start(move |timestamp| {
                let mut r = runner.borrow_mut();
                if !r.tick(timestamp) {
                    return;
                }
                if let Err(err) = surface.borrow().paint(r.draw_list()) {
                    log::warn!("paint failed: {:?}", err);
                }
                if let Err(err) = overlay.borrow_mut().sync(&r.overlay()) {
                    log::warn!("overlay update failed: {:?}", err);
                }
            })?
        };

        log::info!(
            "session mounted on #{} ({}x{})",
            element_id,
            viewport.width,
            viewport.height
        );

        Ok(Some(Self {
            runner,
            root,
            surface,
            overlay,
            listeners,
            frame_loop: Some(frame_loop),
        }))
    }

    fn listen(window: &Window, surface: &Rc<RefCell<Surface>>, sink: &InputSink) -> Result<Vec<Listener>, JsValue> {
        let canvas = surface.borrow().canvas().clone();
        let mut listeners = Vec::new();

        {
            let (surface, sink) = (surface.clone(), sink.clone());
            listeners.push(Listener::typed(&canvas, "pointerdown", move |e: PointerEvent| {
                if let Some(target) = e.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
                    let _ = target.set_pointer_capture(e.pointer_id());
                }
                let p = surface.borrow().to_local(e.client_x() as f32, e.client_y() as f32);
                sink(InputEvent::PointerDown { x: p.x, y: p.y });
            })?);
        }
        {
            let (surface, sink) = (surface.clone(), sink.clone());
            listeners.push(Listener::typed(&canvas, "pointermove", move |e: PointerEvent| {
                let (cx, cy) = (e.client_x() as f32, e.client_y() as f32);
                let p = surface.borrow().to_local(cx, cy);
                sink(InputEvent::PointerMove { x: p.x, y: p.y, screen_x: cx, screen_y: cy });
            })?);
        }
        for event in ["pointerup", "pointercancel"] {
            let (surface, sink) = (surface.clone(), sink.clone());
            listeners.push(Listener::typed(&canvas, event, move |e: PointerEvent| {
                let p = surface.borrow().to_local(e.client_x() as f32, e.client_y() as f32);
                sink(InputEvent::PointerUp { x: p.x, y: p.y });
            })?);
        }
        {
            let sink = sink.clone();
            listeners.push(Listener::typed(&canvas, "wheel", move |e: WheelEvent| {
                e.prevent_default();
                sink(InputEvent::Wheel { delta_y: e.delta_y() as f32 });
            })?);
        }
        {
            let (surface, sink) = (surface.clone(), sink.clone());
            let source = window.clone();
            listeners.push(Listener::new(window, "resize", move |_| {
                let viewport = window_viewport(&source);
                surface.borrow_mut().resize(viewport);
                sink(InputEvent::Resize { width: viewport.width, height: viewport.height });
            })?);
        }

        Ok(listeners)
    }

    pub fn is_mounted(&self) -> bool {
        self.runner.borrow().is_mounted()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.runner.borrow().game_events_ptr()
    }

    pub fn game_events_len(&self) -> u32 {
        self.runner.borrow().game_events_len()
    }

    /// Cancel the frame loop, remove every listener and detach the page.
    /// Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(mut frame_loop) = self.frame_loop.take() {
            frame_loop.cancel();
        }
        self.listeners.clear();
        if let Ok(mut runner) = self.runner.try_borrow_mut() {
            runner.unmount();
        }
        if let Ok(mut overlay) = self.overlay.try_borrow_mut() {
            overlay.detach();
        }
        if let Ok(surface) = self.surface.try_borrow() {
            surface.detach();
        }
        self.root.remove();
    }
}

impl<G: Game + 'static> Drop for WebSession<G> {
    fn drop(&mut self) {
        self.unmount();
    }
}
