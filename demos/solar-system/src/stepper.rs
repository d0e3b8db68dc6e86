//! Per-frame motion of the sun and planets.

use orrery_engine::Scene;

use crate::builder::SolarScene;
use crate::orbit::{self, SpeedTable};

/// Advance the solar system by `dt` seconds.
///
/// Orbits only move while `playing`; the sun and every planet keep turning
/// about their own axes either way.
pub fn step(scene: &mut Scene, solar: &mut SolarScene, speeds: &SpeedTable, playing: bool, dt: f32) {
    if let Some(sun) = scene.get_mut(solar.sun) {
        sun.rotation.y += dt * orbit::SUN_SPIN_RATE;
    }

    for i in 0..solar.planets.len() {
        if playing {
            let speed = speeds.get(i).unwrap_or(0.0);
            let angle = orbit::advance_angle(solar.planets[i].angle, speed, dt);
            solar.place(scene, i, angle);
        }
        if let Some(mesh) = scene.get_mut(solar.planets[i].mesh) {
            mesh.rotation.y += dt * orbit::SPIN_RATE;
        }
    }
}
