pub mod camera;
pub mod controls;
pub mod draw;

pub use camera::{PerspectiveCamera, Projection, Viewport};
pub use controls::{ControlsConfig, OrbitControls};
pub use draw::{build_draw_list, DrawCommand, DrawItem, DrawList, ScreenPoint};
