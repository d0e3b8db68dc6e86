//! Seedable xorshift64 generator for scene layout (star positions, start angles).

/// Deterministic for a given seed, so a scene can be rebuilt identically.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// A zero seed would lock xorshift at zero; it is bumped to 1.
    pub fn new(seed: u64) -> Self {
        Rng {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill an f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [min, max).
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }
}
