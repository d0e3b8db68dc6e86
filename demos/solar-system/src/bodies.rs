/// Planet table and scene constants.
///
/// Sizes and distances are scene units, not astronomical ones: the layout is
/// spread out evenly so every orbit is readable at the default camera.

use glam::Vec3;

/// Static description of one planet. Never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetDescriptor {
    pub name: &'static str,
    /// Display color as `0xRRGGBB`.
    pub color: u32,
    /// Sphere radius.
    pub size: f32,
    /// Orbit radius around the sun.
    pub distance: f32,
    /// Base angular speed multiplier (the slider's starting value).
    pub speed: f32,
    pub info: &'static str,
}

pub const PLANET_COUNT: usize = 8;

pub const PLANETS: [PlanetDescriptor; PLANET_COUNT] = [
    PlanetDescriptor { name: "Mercury", color: 0x8c7853, size: 0.4, distance: 8.0,  speed: 4.74, info: "Closest planet to the Sun" },
    PlanetDescriptor { name: "Venus",   color: 0xffc649, size: 0.6, distance: 12.0, speed: 3.5,  info: "Hottest planet in our solar system" },
    PlanetDescriptor { name: "Earth",   color: 0x6b93d6, size: 0.6, distance: 16.0, speed: 2.98, info: "Our home planet" },
    PlanetDescriptor { name: "Mars",    color: 0xc1440e, size: 0.5, distance: 20.0, speed: 2.41, info: "The Red Planet" },
    PlanetDescriptor { name: "Jupiter", color: 0xd8ca9d, size: 2.0, distance: 28.0, speed: 1.31, info: "Largest planet in our solar system" },
    PlanetDescriptor { name: "Saturn",  color: 0xfad5a5, size: 1.8, distance: 36.0, speed: 0.97, info: "Famous for its ring system" },
    PlanetDescriptor { name: "Uranus",  color: 0x4fd0e7, size: 1.2, distance: 44.0, speed: 0.68, info: "Ice giant tilted on its side" },
    PlanetDescriptor { name: "Neptune", color: 0x4b70dd, size: 1.1, distance: 52.0, speed: 0.54, info: "Windiest planet in our solar system" },
];

/// Index of the planet called `name`, if any.
pub fn index_of(name: &str) -> Option<usize> {
    PLANETS.iter().position(|p| p.name == name)
}

// ── Scene ────────────────────────────────────────────────────────────

pub const BACKGROUND: u32 = 0x000011;

// ── Camera ───────────────────────────────────────────────────────────

pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 30.0, 60.0);
pub const CAMERA_DAMPING: f32 = 0.05;

// ── Lights ───────────────────────────────────────────────────────────

pub const AMBIENT_INTENSITY: f32 = 0.3;
pub const SUN_LIGHT_INTENSITY: f32 = 2.0;
pub const SUN_LIGHT_RANGE: f32 = 200.0;

// ── Starfield ────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 5000;
/// Edge length of the cube the stars are scattered in, centered on the sun.
pub const STAR_SPREAD: f32 = 400.0;
pub const STAR_SIZE: f32 = 0.5;
pub const STAR_COLOR: u32 = 0xffffff;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 3.0;
pub const SUN_COLOR: u32 = 0xffff00;

// ── Orbit rings ──────────────────────────────────────────────────────

pub const RING_HALF_WIDTH: f32 = 0.05;
pub const RING_SEGMENTS: u32 = 64;
pub const RING_COLOR: u32 = 0x444444;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_indexable() {
        for (i, planet) in PLANETS.iter().enumerate() {
            assert_eq!(index_of(planet.name), Some(i));
        }
        assert_eq!(index_of("Pluto"), None);
    }

    #[test]
    fn orbits_are_ordered_and_clear_the_sun() {
        assert!(PLANETS[0].distance - PLANETS[0].size > SUN_RADIUS);
        for pair in PLANETS.windows(2) {
            assert!(pair[1].distance > pair[0].distance);
        }
    }

    #[test]
    fn base_speeds_fit_the_slider_range() {
        assert!(PLANETS.iter().all(|p| p.speed > 0.0 && p.speed <= 10.0));
    }
}
