/// Orbital motion: per-planet speed multipliers and the rates that turn
/// elapsed time into angles. Pure math, no engine dependencies.

use crate::bodies::{PlanetDescriptor, PLANET_COUNT};

/// Radians of orbit per second at speed multiplier 1.
pub const ORBIT_SCALE: f32 = 0.1;
/// Planet self-rotation, radians per second.
pub const SPIN_RATE: f32 = 2.0;
/// Sun self-rotation, radians per second.
pub const SUN_SPIN_RATE: f32 = 0.5;

pub const MIN_SPEED: f32 = 0.0;
pub const MAX_SPEED: f32 = 10.0;
pub const SPEED_STEP: f32 = 0.1;

/// Orbital angle after `dt` seconds at `speed`.
pub fn advance_angle(angle: f32, speed: f32, dt: f32) -> f32 {
    angle + speed * dt * ORBIT_SCALE
}

/// Per-planet speed multipliers, index-aligned with the planet table.
///
/// Backed by a fixed-size array so the length always matches the table.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTable {
    speeds: [f32; PLANET_COUNT],
}

impl SpeedTable {
    /// Start every planet at its base speed.
    pub fn from_planets(planets: &[PlanetDescriptor; PLANET_COUNT]) -> Self {
        Self {
            speeds: planets.map(|p| p.speed),
        }
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.speeds.get(index).copied()
    }

    /// Replace one planet's multiplier. Non-finite values and unknown
    /// indices are rejected; anything else is clamped to the slider range.
    /// Returns true when the table changed.
    pub fn set(&mut self, index: usize, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        let Some(slot) = self.speeds.get_mut(index) else {
            return false;
        };
        *slot = value.clamp(MIN_SPEED, MAX_SPEED);
        true
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.speeds
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.speeds.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self::from_planets(&crate::bodies::PLANETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::PLANETS;

    #[test]
    fn starts_at_base_speeds() {
        let table = SpeedTable::default();
        assert_eq!(table.len(), PLANETS.len());
        for (speed, planet) in table.iter().zip(PLANETS.iter()) {
            assert_eq!(speed, planet.speed);
        }
    }

    #[test]
    fn set_changes_only_one_entry() {
        let mut table = SpeedTable::default();
        let before = table.clone();
        assert!(table.set(3, 7.5));
        for i in 0..PLANET_COUNT {
            if i == 3 {
                assert_eq!(table.get(i), Some(7.5));
            } else {
                assert_eq!(table.get(i).map(f32::to_bits), before.get(i).map(f32::to_bits));
            }
        }
    }

    #[test]
    fn set_clamps_and_rejects() {
        let mut table = SpeedTable::default();
        assert!(table.set(0, 42.0));
        assert_eq!(table.get(0), Some(MAX_SPEED));
        assert!(table.set(0, -1.0));
        assert_eq!(table.get(0), Some(MIN_SPEED));

        let before = table.clone();
        assert!(!table.set(1, f32::NAN));
        assert!(!table.set(1, f32::INFINITY));
        assert!(!table.set(PLANET_COUNT, 1.0));
        assert_eq!(table, before);
    }

    #[test]
    fn angle_advances_linearly() {
        let a = advance_angle(1.0, 2.98, 0.5);
        assert!((a - (1.0 + 2.98 * 0.5 * 0.1)).abs() < 1e-6);
        assert_eq!(advance_angle(1.0, 0.0, 0.5), 1.0);
        assert_eq!(advance_angle(1.0, 3.0, 0.0), 1.0);
    }
}
