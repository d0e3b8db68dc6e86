use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use crate::api::types::{EntityId, GameEvent};
use crate::api::ui::Overlay;
use crate::components::mesh::Color;
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::renderer::camera::{PerspectiveCamera, Viewport};
use crate::renderer::controls::{ControlsConfig, OrbitControls};
use crate::systems::lighting::LightState;
use crate::systems::rng::Rng;

/// Initial camera placement and lens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
        }
    }
}

/// Ceiling on `GameConfig::max_events`; larger values are capped.
pub const MAX_EVENTS_LIMIT: usize = 1024;

/// Configuration for the engine, provided by the game and optionally
/// patched by the host page at mount time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Background as `0xRRGGBB`.
    pub clear_color: u32,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    /// Cap on a single frame's elapsed time, in seconds.
    pub max_frame_dt: f32,
    /// Maximum number of game events kept per frame.
    pub max_events: usize,
    /// Seed for the context RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            clear_color: 0x000000,
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
            max_frame_dt: 0.25,
            max_events: 32,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Check that the config can drive a frame loop, capping `max_events`
    /// at `MAX_EVENTS_LIMIT`. Returns the first problem found.
    pub fn validated(mut self) -> Result<Self, String> {
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(format!("max_frame_dt must be positive, got {}", self.max_frame_dt));
        }
        let controls = &self.controls;
        if !(controls.min_distance >= 0.0 && controls.min_distance <= controls.max_distance) {
            return Err(format!(
                "controls distance range {}..{} is empty",
                controls.min_distance, controls.max_distance
            ));
        }
        let cam = &self.camera;
        if !(cam.near > 0.0 && cam.far > cam.near && cam.fov_deg > 0.0 && cam.fov_deg < 180.0) {
            return Err(format!(
                "camera lens fov {} near {} far {} is degenerate",
                cam.fov_deg, cam.near, cam.far
            ));
        }
        if self.max_events > MAX_EVENTS_LIMIT {
            log::warn!("max_events {} capped at {}", self.max_events, MAX_EVENTS_LIMIT);
            self.max_events = MAX_EVENTS_LIMIT;
        }
        Ok(self)
    }

    /// Overlay a partial JSON object on top of this config.
    /// Nested objects merge field by field; anything else replaces.
    pub fn merge_json(&self, json: &str) -> Result<Self, serde_json::Error> {
        let mut base = serde_json::to_value(self)?;
        let patch: serde_json::Value = serde_json::from_str(json)?;
        merge_values(&mut base, patch);
        serde_json::from_value(base)
    }
}

fn merge_values(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the scene: spawn entities, place lights, aim the camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One display-refresh tick. `dt` is the elapsed time in seconds since
    /// the previous tick; `input` holds everything that arrived in between.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);

    /// HUD description, read after every tick.
    fn overlay(&self) -> Overlay {
        Overlay::default()
    }
}

/// Mutable access to engine state, passed to `Game::init` and `Game::update`.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub lights: LightState,
    pub rng: Rng,
    pub viewport: Viewport,
    pub events: Vec<GameEvent>,
    max_events: usize,
    next_id: u32,
}

impl EngineContext {
    pub fn new(config: &GameConfig, viewport: Viewport) -> Self {
        let mut scene = Scene::new();
        scene.background = Color::from_hex(config.clear_color);

        let cam = &config.camera;
        let mut camera = PerspectiveCamera::new(cam.fov_deg, viewport.aspect(), cam.near, cam.far);
        camera.position = cam.position;
        camera.look_at(cam.target);

        let mut controls = OrbitControls::new(config.controls.clone());
        controls.target = cam.target;
        let max_events = config.max_events.min(MAX_EVENTS_LIMIT);

        Self {
            scene,
            camera,
            controls,
            lights: LightState::new(),
            rng: Rng::new(config.seed),
            viewport,
            events: Vec::with_capacity(max_events),
            max_events,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event for the host page. Events past `max_events` in a
    /// frame are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        } else {
            log::debug!("game event dropped, {} already queued this frame", self.max_events);
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Apply a new surface size to the viewport and camera.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.resize(viewport);
    }

    /// Surface-local pixels to normalized device coordinates.
    pub fn ndc(&self, x: f32, y: f32) -> Vec2 {
        self.viewport.to_ndc(x, y)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default(), Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::default();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert!(b > a);
    }

    #[test]
    fn events_are_capped_per_frame() {
        let config = GameConfig { max_events: 2, ..GameConfig::default() };
        let mut ctx = EngineContext::new(&config, Viewport::default());
        for i in 0..5 {
            ctx.emit_event(GameEvent::new(i as f32, 0.0, 0.0, 0.0));
        }
        assert_eq!(ctx.events.len(), 2);
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn context_follows_camera_config() {
        let config = GameConfig {
            camera: CameraConfig { position: Vec3::new(0.0, 30.0, 60.0), ..CameraConfig::default() },
            clear_color: 0x000011,
            ..GameConfig::default()
        };
        let ctx = EngineContext::new(&config, Viewport::new(1000.0, 500.0));
        assert_eq!(ctx.camera.position, Vec3::new(0.0, 30.0, 60.0));
        assert!((ctx.camera.aspect - 2.0).abs() < 1e-6);
        assert_eq!(ctx.scene.background.to_hex(), 0x000011);
    }

    #[test]
    fn merge_json_patches_nested_fields_only() {
        let base = GameConfig { seed: 7, ..GameConfig::default() };
        let merged = base
            .merge_json(r#"{ "controls": { "damping_factor": 0.2 }, "camera": { "fov_deg": 60 } }"#)
            .unwrap();
        assert!((merged.controls.damping_factor - 0.2).abs() < 1e-6);
        assert!(merged.controls.enabled);
        assert!((merged.camera.fov_deg - 60.0).abs() < 1e-6);
        assert!((merged.camera.far - 1000.0).abs() < 1e-3);
        assert_eq!(merged.seed, 7);
    }

    #[test]
    fn merge_json_rejects_malformed_input() {
        assert!(GameConfig::default().merge_json("{ not json").is_err());
        assert!(GameConfig::default().merge_json(r#"{ "seed": "many" }"#).is_err());
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(GameConfig::default().validated().is_ok());
    }

    #[test]
    fn validation_rejects_configs_that_cannot_run() {
        let bad_dt = GameConfig { max_frame_dt: -0.5, ..GameConfig::default() };
        assert!(bad_dt.validated().is_err());
        let nan_dt = GameConfig { max_frame_dt: f32::NAN, ..GameConfig::default() };
        assert!(nan_dt.validated().is_err());

        let mut inverted = GameConfig::default();
        inverted.controls.min_distance = 50.0;
        inverted.controls.max_distance = 10.0;
        assert!(inverted.validated().is_err());

        let mut flat_lens = GameConfig::default();
        flat_lens.camera.far = flat_lens.camera.near;
        assert!(flat_lens.validated().is_err());
    }

    #[test]
    fn oversized_event_budget_is_capped() {
        let config = GameConfig { max_events: usize::MAX, ..GameConfig::default() };
        assert_eq!(config.clone().validated().map(|c| c.max_events), Ok(MAX_EVENTS_LIMIT));

        let mut ctx = EngineContext::new(&config, Viewport::default());
        for _ in 0..MAX_EVENTS_LIMIT + 5 {
            ctx.emit_event(GameEvent::default());
        }
        assert_eq!(ctx.events.len(), MAX_EVENTS_LIMIT);
    }
}
