//! Pointer picking, tooltip placement and overlay control decoding.

use glam::Vec2;
use orrery_engine::{EngineContext, Raycaster, Tooltip};

use crate::bodies::{PlanetDescriptor, PLANET_COUNT};
use crate::builder::SolarScene;

/// Tooltip offset from the pointer, in page pixels.
pub const TOOLTIP_OFFSET: Vec2 = Vec2::new(10.0, -10.0);

// ── Overlay control ids (arrive as InputEvent::Custom kinds) ────────

pub const CONTROL_TOGGLE_PLAY: u32 = 1;
/// Slider for planet `i` has id `CONTROL_SPEED_BASE + i`.
pub const CONTROL_SPEED_BASE: u32 = 100;

/// What an overlay control asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePlay,
    SetSpeed { index: usize, value: f32 },
}

impl Command {
    /// Decode a custom event. Unknown kinds yield `None`.
    pub fn from_custom(kind: u32, a: f32) -> Option<Self> {
        match kind {
            CONTROL_TOGGLE_PLAY => Some(Command::TogglePlay),
            k if (CONTROL_SPEED_BASE..CONTROL_SPEED_BASE + PLANET_COUNT as u32).contains(&k) => {
                Some(Command::SetSpeed {
                    index: (k - CONTROL_SPEED_BASE) as usize,
                    value: a,
                })
            }
            _ => None,
        }
    }
}

/// Which planet, if any, is under the pointer, and where the pointer is.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoverState {
    planet: Option<usize>,
    screen: Vec2,
}

impl HoverState {
    pub fn planet(&self) -> Option<usize> {
        self.planet
    }

    /// Last pointer position in page (client) coordinates.
    pub fn screen(&self) -> Vec2 {
        self.screen
    }

    /// Record a pointer sample. Returns true when the hovered planet changed.
    /// Indices outside the planet table are treated as no hover.
    pub fn update(&mut self, planet: Option<usize>, screen: Vec2) -> bool {
        let planet = planet.filter(|&i| i < PLANET_COUNT);
        let changed = planet != self.planet;
        self.planet = planet;
        self.screen = screen;
        changed
    }

    /// Tooltip for the hovered planet: its name and description, offset
    /// from the pointer.
    pub fn tooltip(&self, planets: &[PlanetDescriptor]) -> Option<Tooltip> {
        let planet = planets.get(self.planet?)?;
        let at = self.screen + TOOLTIP_OFFSET;
        Some(Tooltip {
            x: at.x,
            y: at.y,
            title: planet.name.to_string(),
            body: planet.info.to_string(),
        })
    }
}

/// Planet whose mesh is nearest along the camera ray through surface pixel
/// (`x`, `y`). Only planet meshes are candidates: the sun, rings and stars
/// never block or produce a hit.
pub fn pick_planet(ctx: &EngineContext, solar: &SolarScene, x: f32, y: f32) -> Option<usize> {
    let ndc = ctx.ndc(x, y);
    let caster = Raycaster::from_camera(&ctx.camera, ndc);
    let hit = caster.nearest(&ctx.scene, &solar.planet_meshes())?;
    solar.planet_of_mesh(hit.entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_engine::Viewport;
    use crate::bodies::PLANETS;
    use crate::builder::{build_scene, scene_config};

    /// Scene with planets fanned out at fixed angles so none overlap on screen.
    fn fanned() -> (EngineContext, SolarScene) {
        let mut ctx = EngineContext::new(&scene_config(), Viewport::new(800.0, 600.0));
        let mut solar = build_scene(&mut ctx, &PLANETS);
        for i in 0..PLANET_COUNT {
            solar.place(&mut ctx.scene, i, i as f32 * std::f32::consts::FRAC_PI_4);
        }
        (ctx, solar)
    }

    fn screen_of(ctx: &EngineContext, solar: &SolarScene, index: usize) -> Vec2 {
        let world = ctx.scene.world_matrix(solar.planets[index].mesh).unwrap();
        let center = world.transform_point3(Vec3::ZERO);
        ctx.camera.project(center, ctx.viewport).unwrap().pos
    }

    #[test]
    fn pointer_on_a_planet_picks_it() {
        let (ctx, solar) = fanned();
        for i in [0, 2, 4, 5] {
            let p = screen_of(&ctx, &solar, i);
            assert_eq!(pick_planet(&ctx, &solar, p.x, p.y), Some(i), "planet {i}");
        }
    }

    #[test]
    fn empty_space_picks_nothing() {
        let (ctx, solar) = fanned();
        assert_eq!(pick_planet(&ctx, &solar, 2.0, 2.0), None);
    }

    #[test]
    fn sun_is_not_pickable() {
        let (ctx, solar) = fanned();
        let sun = ctx.camera.project(Vec3::ZERO, ctx.viewport).unwrap().pos;
        assert_eq!(pick_planet(&ctx, &solar, sun.x, sun.y), None);
    }

    #[test]
    fn tooltip_shows_the_description_beside_the_pointer() {
        let mut hover = HoverState::default();
        assert!(hover.update(Some(2), Vec2::new(300.0, 200.0)));
        let tip = hover.tooltip(&PLANETS).unwrap();
        assert_eq!(tip.title, "Earth");
        assert_eq!(tip.body, PLANETS[2].info);
        assert_eq!((tip.x, tip.y), (310.0, 190.0));
    }

    #[test]
    fn hover_reports_only_changes() {
        let mut hover = HoverState::default();
        assert!(!hover.update(None, Vec2::new(1.0, 1.0)));
        assert!(hover.update(Some(5), Vec2::new(2.0, 2.0)));
        assert!(!hover.update(Some(5), Vec2::new(3.0, 3.0)));
        assert_eq!(hover.screen(), Vec2::new(3.0, 3.0));
        assert!(hover.update(None, Vec2::ZERO));
        assert!(hover.tooltip(&PLANETS).is_none());
    }

    #[test]
    fn out_of_table_hover_is_rejected() {
        let mut hover = HoverState::default();
        hover.update(Some(PLANET_COUNT), Vec2::ZERO);
        assert_eq!(hover.planet(), None);
    }

    #[test]
    fn custom_events_decode() {
        assert_eq!(Command::from_custom(1, 0.0), Some(Command::TogglePlay));
        assert_eq!(
            Command::from_custom(103, 6.5),
            Some(Command::SetSpeed { index: 3, value: 6.5 })
        );
        assert_eq!(Command::from_custom(100 + PLANET_COUNT as u32, 1.0), None);
        assert_eq!(Command::from_custom(42, 1.0), None);
    }
}
