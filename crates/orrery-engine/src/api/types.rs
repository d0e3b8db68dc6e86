use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A game event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// View a slice of events as the flat float layout the host reads.
pub fn events_as_floats(events: &[GameEvent]) -> &[f32] {
    bytemuck::cast_slice(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }

    #[test]
    fn events_flatten_in_order() {
        let events = [
            GameEvent::new(1.0, 2.0, 3.0, 4.0),
            GameEvent::new(5.0, 6.0, 7.0, 8.0),
        ];
        let flat = events_as_floats(&events);
        assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }
}
