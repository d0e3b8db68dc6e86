pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, CameraConfig, EngineContext, MAX_EVENTS_LIMIT};
pub use api::types::{EntityId, GameEvent, events_as_floats};
pub use api::ui::{Control, Overlay, Tooltip};
pub use components::entity::Entity;
pub use components::layer::RenderLayer;
pub use components::mesh::{Color, Geometry, Material, MeshComponent, Shading};
pub use components::points::PointsComponent;
pub use core::scene::Scene;
pub use core::time::FrameClock;
pub use renderer::camera::{PerspectiveCamera, Projection, Viewport};
pub use renderer::controls::{ControlsConfig, OrbitControls};
pub use renderer::draw::{build_draw_list, DrawCommand, DrawItem, DrawList, ScreenPoint};
pub use input::queue::{InputEvent, InputQueue};
pub use systems::lighting::{PointLight, LightState};
pub use systems::raycast::{Intersection, Ray, Raycaster};
pub use systems::rng::Rng;
