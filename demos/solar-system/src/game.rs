/// Solar System: interactive 3D orrery with per-planet speed sliders,
/// hover tooltips and play/pause.
///
/// Thin controller: scene construction lives in `builder`, per-frame motion
/// in `stepper`, picking and control decoding in `interaction`.

use glam::Vec2;
use orrery_engine::*;

use crate::bodies::{self, PLANETS};
use crate::builder::{self, SolarScene};
use crate::interaction::{self, Command, HoverState, CONTROL_SPEED_BASE, CONTROL_TOGGLE_PLAY};
use crate::orbit::{self, SpeedTable};
use crate::stepper;

// ── Game event kinds to the host page ────────────────────────────────

/// a = planet index or -1, b/c = pointer page coordinates.
pub const EVENT_HOVER: f32 = 1.0;
/// a = 1 playing, 0 paused.
pub const EVENT_PLAY_STATE: f32 = 2.0;

const OVERLAY_TITLE: &str = "Solar System Controls";

pub struct SolarSystem {
    scene: Option<SolarScene>,
    speeds: SpeedTable,
    playing: bool,
    hover: HoverState,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            scene: None,
            speeds: SpeedTable::from_planets(&PLANETS),
            playing: true,
            hover: HoverState::default(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speeds(&self) -> &SpeedTable {
        &self.speeds
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn solar_scene(&self) -> Option<&SolarScene> {
        self.scene.as_ref()
    }

    fn apply(&mut self, ctx: &mut EngineContext, command: Command) {
        match command {
            Command::TogglePlay => {
                self.playing = !self.playing;
                log::debug!("playing: {}", self.playing);
                ctx.emit_event(GameEvent::new(
                    EVENT_PLAY_STATE,
                    if self.playing { 1.0 } else { 0.0 },
                    0.0,
                    0.0,
                ));
            }
            Command::SetSpeed { index, value } => {
                if self.speeds.set(index, value) {
                    log::debug!("{} speed -> {:.1}", PLANETS[index].name, value);
                } else {
                    log::debug!("rejected speed {} for planet {}", value, index);
                }
            }
        }
    }

    fn pointer_moved(&mut self, ctx: &mut EngineContext, local: Vec2, screen: Vec2) {
        let picked = self
            .scene
            .as_ref()
            .and_then(|solar| interaction::pick_planet(ctx, solar, local.x, local.y));
        if self.hover.update(picked, screen) {
            log::debug!("hover: {:?}", picked.map(|i| PLANETS[i].name));
            ctx.emit_event(GameEvent::new(
                EVENT_HOVER,
                picked.map_or(-1.0, |i| i as f32),
                screen.x,
                screen.y,
            ));
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        builder::scene_config()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.scene = Some(builder::build_scene(ctx, &PLANETS));
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        // ── Handle input ─────────────────────────────────────────────
        for event in input.iter() {
            match *event {
                InputEvent::PointerMove { x, y, screen_x, screen_y } => {
                    self.pointer_moved(ctx, Vec2::new(x, y), Vec2::new(screen_x, screen_y));
                }
                InputEvent::Custom { kind, a, .. } => {
                    if let Some(command) = Command::from_custom(kind, a) {
                        self.apply(ctx, command);
                    }
                }
                _ => {}
            }
        }

        // ── Advance motion ───────────────────────────────────────────
        if let Some(solar) = self.scene.as_mut() {
            stepper::step(&mut ctx.scene, solar, &self.speeds, self.playing, dt);
        }
    }

    fn overlay(&self) -> Overlay {
        let mut controls = Vec::with_capacity(1 + PLANETS.len());
        controls.push(Control::Button {
            id: CONTROL_TOGGLE_PLAY,
            label: if self.playing { "Pause" } else { "Play" }.to_string(),
        });
        for (i, (planet, speed)) in PLANETS.iter().zip(self.speeds.iter()).enumerate() {
            controls.push(Control::Slider {
                id: CONTROL_SPEED_BASE + i as u32,
                label: format!("{} ({:.1}x)", planet.name, speed),
                min: orbit::MIN_SPEED,
                max: orbit::MAX_SPEED,
                step: orbit::SPEED_STEP,
                value: speed,
            });
        }
        Overlay {
            title: OVERLAY_TITLE.to_string(),
            controls,
            tooltip: self.hover.tooltip(&bodies::PLANETS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_web::GameRunner;

    fn started() -> (SolarSystem, EngineContext) {
        let mut game = SolarSystem::new();
        let mut ctx = EngineContext::new(&game.config(), Viewport::new(800.0, 600.0));
        game.init(&mut ctx);
        (game, ctx)
    }

    fn frame(game: &mut SolarSystem, ctx: &mut EngineContext, events: &[InputEvent], dt: f32) {
        let mut input = InputQueue::new();
        for e in events {
            input.push(*e);
        }
        ctx.clear_frame_data();
        game.update(ctx, &input, dt);
    }

    fn angles(game: &SolarSystem) -> Vec<f32> {
        game.solar_scene().unwrap().planets.iter().map(|p| p.angle).collect()
    }

    fn custom(kind: u32, a: f32) -> InputEvent {
        InputEvent::Custom { kind, a, b: 0.0, c: 0.0 }
    }

    #[test]
    fn starts_playing_with_base_speeds() {
        let (game, _) = started();
        assert!(game.is_playing());
        assert_eq!(game.speeds(), &SpeedTable::default());
        assert_eq!(game.hover().planet(), None);
    }

    #[test]
    fn frames_accumulate_orbit_angles() {
        let (mut game, mut ctx) = started();
        let start = angles(&game);
        for _ in 0..60 {
            frame(&mut game, &mut ctx, &[], 1.0 / 60.0);
        }
        for (i, angle) in angles(&game).iter().enumerate() {
            let expected = start[i] + PLANETS[i].speed * 1.0 * 0.1;
            assert!((angle - expected).abs() < 1e-4, "planet {i}");
        }
    }

    #[test]
    fn toggle_pauses_and_resumes() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, &[custom(CONTROL_TOGGLE_PLAY, 0.0)], 0.0);
        assert!(!game.is_playing());
        assert_eq!(ctx.events, vec![GameEvent::new(EVENT_PLAY_STATE, 0.0, 0.0, 0.0)]);

        let frozen = angles(&game);
        let sun = game.solar_scene().unwrap().sun;
        let sun_before = ctx.scene.get(sun).unwrap().rotation.y;
        frame(&mut game, &mut ctx, &[], 0.5);
        assert_eq!(angles(&game), frozen);
        assert!(ctx.scene.get(sun).unwrap().rotation.y > sun_before);

        frame(&mut game, &mut ctx, &[custom(CONTROL_TOGGLE_PLAY, 0.0)], 0.5);
        assert!(game.is_playing());
        assert!(angles(&game)[0] > frozen[0]);
    }

    #[test]
    fn slider_changes_one_speed() {
        let (mut game, mut ctx) = started();
        let before = game.speeds().clone();
        frame(&mut game, &mut ctx, &[custom(CONTROL_SPEED_BASE + 5, 9.3)], 0.0);
        for i in 0..bodies::PLANET_COUNT {
            let now = game.speeds().get(i).unwrap();
            if i == 5 {
                assert_eq!(now, 9.3);
            } else {
                assert_eq!(now.to_bits(), before.get(i).unwrap().to_bits());
            }
        }
    }

    #[test]
    fn bad_slider_values_are_ignored() {
        let (mut game, mut ctx) = started();
        let before = game.speeds().clone();
        frame(&mut game, &mut ctx, &[custom(CONTROL_SPEED_BASE, f32::NAN)], 0.0);
        assert_eq!(game.speeds(), &before);
        frame(&mut game, &mut ctx, &[custom(CONTROL_SPEED_BASE, 99.0)], 0.0);
        assert_eq!(game.speeds().get(0), Some(orbit::MAX_SPEED));
    }

    #[test]
    fn hovering_a_planet_shows_its_tooltip() {
        let (mut game, mut ctx) = started();
        let earth = game.solar_scene().unwrap().planets[2].mesh;
        let center = ctx.scene.world_matrix(earth).unwrap().transform_point3(Vec3::ZERO);
        let p = ctx.camera.project(center, ctx.viewport).unwrap().pos;

        let moved = InputEvent::PointerMove { x: p.x, y: p.y, screen_x: p.x + 5.0, screen_y: p.y + 7.0 };
        frame(&mut game, &mut ctx, &[moved], 0.0);

        // A nearer planet could sit on the same ray at a random layout;
        // whichever is hit, the tooltip must describe it.
        let hovered = game.hover().planet().unwrap();
        let tip = game.overlay().tooltip.unwrap();
        assert_eq!(tip.title, PLANETS[hovered].name);
        assert_eq!(tip.body, PLANETS[hovered].info);
        assert!((tip.x - (p.x + 15.0)).abs() < 1e-3);
        assert!((tip.y - (p.y - 3.0)).abs() < 1e-3);
        assert_eq!(
            ctx.events,
            vec![GameEvent::new(EVENT_HOVER, hovered as f32, p.x + 5.0, p.y + 7.0)]
        );

        let away = InputEvent::PointerMove { x: 2.0, y: 2.0, screen_x: 2.0, screen_y: 2.0 };
        frame(&mut game, &mut ctx, &[away], 0.0);
        assert_eq!(game.hover().planet(), None);
        assert!(game.overlay().tooltip.is_none());
        assert_eq!(ctx.events, vec![GameEvent::new(EVENT_HOVER, -1.0, 2.0, 2.0)]);
    }

    #[test]
    fn overlay_reflects_state() {
        let (mut game, mut ctx) = started();
        let overlay = game.overlay();
        assert_eq!(overlay.title, "Solar System Controls");
        assert_eq!(overlay.controls.len(), 1 + PLANETS.len());
        assert_eq!(overlay.control(CONTROL_TOGGLE_PLAY).map(|c| c.label()), Some("Pause"));
        assert_eq!(overlay.control(CONTROL_SPEED_BASE).map(|c| c.label()), Some("Mercury (4.7x)"));
        assert_eq!(overlay.control(CONTROL_SPEED_BASE + 1).map(|c| c.label()), Some("Venus (3.5x)"));

        frame(
            &mut game,
            &mut ctx,
            &[custom(CONTROL_TOGGLE_PLAY, 0.0), custom(CONTROL_SPEED_BASE + 2, 0.25)],
            0.0,
        );
        let overlay = game.overlay();
        assert_eq!(overlay.control(CONTROL_TOGGLE_PLAY).map(|c| c.label()), Some("Play"));
        match overlay.control(CONTROL_SPEED_BASE + 2) {
            Some(Control::Slider { min, max, step, value, .. }) => {
                assert_eq!((*min, *max), (0.0, 10.0));
                assert!((step - 0.1).abs() < 1e-6);
                assert_eq!(*value, 0.25);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unmount_stops_the_simulation() {
        let mut runner = GameRunner::new(SolarSystem::new(), builder::scene_config(), Viewport::new(800.0, 600.0));
        runner.init();
        runner.tick(0.0);
        runner.tick(100.0);
        assert!(!runner.draw_list().is_empty());
        let frozen = angles(runner.game());

        runner.unmount();
        assert!(!runner.tick(200.0));
        assert!(!runner.tick(300.0));
        assert_eq!(angles(runner.game()), frozen);
        assert!(runner.draw_list().is_empty());
    }
}
