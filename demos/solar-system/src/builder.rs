//! Scene construction: runs once on mount.

use glam::Vec3;
use orrery_engine::*;

use crate::bodies::{self, PlanetDescriptor};

/// Runtime handles for one planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetBody {
    /// Invisible group at the sun; rotating it about Y moves the planet along its orbit.
    pub pivot: EntityId,
    /// The planet sphere, a child of `pivot`.
    pub mesh: EntityId,
    pub ring: EntityId,
    /// Current orbital angle in radians. Unbounded.
    pub angle: f32,
}

/// Everything the stepper and the interaction layer need after the build.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarScene {
    pub sun: EntityId,
    pub stars: EntityId,
    pub planets: Vec<PlanetBody>,
}

impl SolarScene {
    /// Mesh ids of every planet, index-aligned with the planet table.
    pub fn planet_meshes(&self) -> Vec<EntityId> {
        self.planets.iter().map(|p| p.mesh).collect()
    }

    /// Planet index owning mesh `id`.
    pub fn planet_of_mesh(&self, id: EntityId) -> Option<usize> {
        self.planets.iter().position(|p| p.mesh == id)
    }

    /// Set planet `index` to `angle` and turn its pivot to match.
    pub fn place(&mut self, scene: &mut Scene, index: usize, angle: f32) {
        let Some(body) = self.planets.get_mut(index) else {
            return;
        };
        body.angle = angle;
        if let Some(pivot) = scene.get_mut(body.pivot) {
            pivot.rotation.y = angle;
        }
    }
}

/// Engine configuration for the solar system view: background, lens and
/// camera placement, damped controls.
pub fn scene_config() -> GameConfig {
    let mut config = GameConfig {
        clear_color: bodies::BACKGROUND,
        camera: CameraConfig {
            fov_deg: bodies::CAMERA_FOV_DEG,
            near: bodies::CAMERA_NEAR,
            far: bodies::CAMERA_FAR,
            position: bodies::CAMERA_POSITION,
            target: Vec3::ZERO,
        },
        ..GameConfig::default()
    };
    config.controls.damping_factor = bodies::CAMERA_DAMPING;
    config
}

/// Populate `ctx` with lights, starfield, sun, planets and orbit rings.
pub fn build_scene(ctx: &mut EngineContext, planets: &[PlanetDescriptor]) -> SolarScene {
    // ── Lights ───────────────────────────────────────────────────────
    ctx.lights.set_ambient(Color::WHITE, bodies::AMBIENT_INTENSITY);
    ctx.lights.add(PointLight::new(
        Vec3::ZERO,
        Color::WHITE,
        bodies::SUN_LIGHT_INTENSITY,
        bodies::SUN_LIGHT_RANGE,
    ));

    // ── Starfield ────────────────────────────────────────────────────
    let half = bodies::STAR_SPREAD * 0.5;
    let positions: Vec<Vec3> = (0..bodies::STAR_COUNT)
        .map(|_| {
            Vec3::new(
                ctx.rng.range(-half, half),
                ctx.rng.range(-half, half),
                ctx.rng.range(-half, half),
            )
        })
        .collect();
    let stars = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(stars)
            .with_tag("stars")
            .with_layer(RenderLayer::Background)
            .with_points(PointsComponent::new(
                positions,
                Color::from_hex(bodies::STAR_COLOR),
                bodies::STAR_SIZE,
            )),
    );

    // ── Sun ──────────────────────────────────────────────────────────
    let sun = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(sun).with_tag("Sun").with_mesh(MeshComponent::new(
            Geometry::sphere(bodies::SUN_RADIUS),
            Material::basic(Color::from_hex(bodies::SUN_COLOR)),
        )),
    );

    // ── Planets ──────────────────────────────────────────────────────
    let mut bodies_out = Vec::with_capacity(planets.len());
    for planet in planets {
        let angle = ctx.rng.range(0.0, std::f32::consts::TAU);

        let pivot = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(pivot)
                .with_tag(format!("{} orbit", planet.name))
                .with_rotation(Vec3::new(0.0, angle, 0.0)),
        );

        let mesh = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(mesh)
                .with_tag(planet.name)
                .with_parent(pivot)
                .with_position(Vec3::new(planet.distance, 0.0, 0.0))
                .with_mesh(MeshComponent::new(
                    Geometry::sphere(planet.size),
                    Material::lambert(Color::from_hex(planet.color)),
                )),
        );

        let ring = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(ring)
                .with_tag(format!("{} ring", planet.name))
                .with_layer(RenderLayer::Guides)
                .with_rotation(Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0))
                .with_mesh(MeshComponent::new(
                    Geometry::ring(
                        planet.distance - bodies::RING_HALF_WIDTH,
                        planet.distance + bodies::RING_HALF_WIDTH,
                        bodies::RING_SEGMENTS,
                    ),
                    Material::basic(Color::from_hex(bodies::RING_COLOR)).with_double_sided(true),
                )),
        );

        bodies_out.push(PlanetBody { pivot, mesh, ring, angle });
    }

    log::info!(
        "solar system built: {} planets, {} stars, {} entities",
        bodies_out.len(),
        bodies::STAR_COUNT,
        ctx.scene.len()
    );

    SolarScene {
        sun,
        stars,
        planets: bodies_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::PLANETS;

    fn built() -> (EngineContext, SolarScene) {
        let mut ctx = EngineContext::new(&scene_config(), Viewport::new(800.0, 600.0));
        let solar = build_scene(&mut ctx, &PLANETS);
        (ctx, solar)
    }

    #[test]
    fn one_body_per_planet() {
        let (ctx, solar) = built();
        assert_eq!(solar.planets.len(), PLANETS.len());
        // stars + sun + (pivot, mesh, ring) per planet
        assert_eq!(ctx.scene.len(), 2 + 3 * PLANETS.len());
    }

    #[test]
    fn camera_and_background_match_the_view() {
        let (ctx, _) = built();
        assert_eq!(ctx.scene.background.to_hex(), 0x000011);
        assert_eq!(ctx.camera.position, Vec3::new(0.0, 30.0, 60.0));
        assert!((ctx.camera.fov_deg - 75.0).abs() < 1e-6);
        assert!((ctx.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((ctx.controls.config.damping_factor - 0.05).abs() < 1e-6);
    }

    #[test]
    fn stars_fill_the_cube() {
        let (ctx, solar) = built();
        let stars = ctx.scene.get(solar.stars).and_then(|e| e.points.as_ref()).unwrap();
        assert_eq!(stars.len(), 5000);
        assert!(stars
            .positions
            .iter()
            .all(|p| p.abs().max_element() <= 200.0));
        assert_eq!(ctx.scene.get(solar.stars).unwrap().layer, RenderLayer::Background);
    }

    #[test]
    fn planets_sit_on_their_orbits() {
        let (ctx, solar) = built();
        for (body, planet) in solar.planets.iter().zip(PLANETS.iter()) {
            assert!(body.angle >= 0.0 && body.angle < std::f32::consts::TAU);
            let world = ctx.scene.world_matrix(body.mesh).unwrap();
            let center = world.transform_point3(Vec3::ZERO);
            assert!((center.length() - planet.distance).abs() < 1e-3);
            assert!(center.y.abs() < 1e-4);

            let mesh = ctx.scene.get(body.mesh).unwrap();
            assert_eq!(mesh.tag, planet.name);
            let material = mesh.mesh.unwrap().material;
            assert_eq!(material.shading, Shading::Lambert);
            assert_eq!(material.color.to_hex(), planet.color);
        }
    }

    #[test]
    fn rings_lie_flat_around_the_sun() {
        let (ctx, solar) = built();
        let earth = &solar.planets[2];
        let ring = ctx.scene.get(earth.ring).unwrap();
        match ring.mesh.unwrap().geometry {
            Geometry::Ring { inner_radius, outer_radius, segments } => {
                assert!((inner_radius - 15.95).abs() < 1e-5);
                assert!((outer_radius - 16.05).abs() < 1e-5);
                assert_eq!(segments, 64);
            }
            other => panic!("unexpected {:?}", other),
        }
        // Local +Y (in-plane) maps into the XZ plane.
        let world = ctx.scene.world_matrix(earth.ring).unwrap();
        let p = world.transform_point3(Vec3::new(0.0, 16.0, 0.0));
        assert!(p.y.abs() < 1e-4);
        assert!(ring.mesh.unwrap().material.double_sided);
    }

    #[test]
    fn sun_is_unlit_and_lights_are_placed() {
        let (ctx, solar) = built();
        let sun = ctx.scene.get(solar.sun).unwrap().mesh.unwrap();
        assert_eq!(sun.material.shading, Shading::Unlit);
        assert_eq!(sun.material.color.to_hex(), 0xffff00);
        assert_eq!(ctx.lights.count(), 1);
        let (_, ambient) = ctx.lights.ambient();
        assert!((ambient - 0.3).abs() < 1e-6);
    }

    #[test]
    fn place_turns_the_pivot() {
        let (mut ctx, mut solar) = built();
        solar.place(&mut ctx.scene, 0, 1.25);
        assert_eq!(solar.planets[0].angle, 1.25);
        assert_eq!(ctx.scene.get(solar.planets[0].pivot).unwrap().rotation.y, 1.25);
    }
}
