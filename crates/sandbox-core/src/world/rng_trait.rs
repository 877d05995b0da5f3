//! RNG trait abstraction for the simulation
//!
//! Material rules only see this trait, so ticks can run on the seeded
//! `Xoshiro256StarStar` owned by [`crate::Simulation`] or on a scripted RNG
//! in tests.

/// Random number generator trait for the simulation
pub trait SimRng {
    /// Generate random boolean with 50% probability
    fn gen_bool(&mut self) -> bool;

    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Generate a random integer in [0, bound); `bound` must be non-zero
    fn gen_below(&mut self, bound: u32) -> u32;

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }

    /// Random step in {-1, 0, 1}
    fn gen_step(&mut self) -> i32 {
        self.gen_below(3) as i32 - 1
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> SimRng for T {
    fn gen_bool(&mut self) -> bool {
        rand::Rng::r#gen(self)
    }

    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_below(&mut self, bound: u32) -> u32 {
        rand::Rng::gen_range(self, 0..bound)
    }
}

#[cfg(test)]
pub(crate) mod test_rng {
    use super::SimRng;

    /// Scripted RNG for deterministic branch selection in tests
    pub struct TestRng {
        pub bool_value: bool,
        pub f32_value: f32,
        pub below_value: u32,
    }

    impl TestRng {
        pub fn new(bool_value: bool) -> Self {
            Self {
                bool_value,
                f32_value: 0.5,
                below_value: 0,
            }
        }

        pub fn with_f32(mut self, value: f32) -> Self {
            self.f32_value = value;
            self
        }

        pub fn with_below(mut self, value: u32) -> Self {
            self.below_value = value;
            self
        }
    }

    impl SimRng for TestRng {
        fn gen_bool(&mut self) -> bool {
            self.bool_value
        }

        fn gen_f32(&mut self) -> f32 {
            self.f32_value
        }

        fn gen_below(&mut self, bound: u32) -> u32 {
            self.below_value.min(bound - 1)
        }
    }
}
