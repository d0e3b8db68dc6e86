/// Input event types the engine understands.
/// Generic, no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began at surface-local pixel coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A press ended at surface-local pixel coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// The pointer moved. `x`/`y` are surface-local pixels;
    /// `screen_x`/`screen_y` are page client coordinates, kept for overlay placement.
    PointerMove { x: f32, y: f32, screen_x: f32, screen_y: f32 },
    /// Scroll wheel; positive `delta_y` scrolls away from the user (zoom out).
    Wheel { delta_y: f32 },
    /// The render surface changed size, in CSS pixels.
    Resize { width: f32, height: f32 },
    /// A custom event from the overlay (buttons, sliders, etc.).
    /// `kind` identifies the control; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// DOM handlers push between ticks; the runner drains once per tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Wheel { delta_y: -100.0 });
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], InputEvent::Wheel { delta_y: -100.0 });
        assert!(q.is_empty());
    }

    #[test]
    fn iter_does_not_consume() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 7, a: 1.5, b: 0.0, c: 0.0 });
        assert_eq!(q.iter().count(), 1);
        assert_eq!(q.len(), 1);
    }
}
