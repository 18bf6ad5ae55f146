use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MULTIPLIER_A: i64 = 1103515245;
const INCREMENT_C: i64 = 12345;
const DEFAULT_SEED: i64 = 3819201;

/// Source of randomness for move selection, expansion order and rollouts.
pub trait RandomGenerator {
    fn next(&mut self) -> i32;

    /// Returns a number in `from..to`. `to` must be greater than `from`.
    fn next_range(&mut self, from: i32, to: i32) -> i32;

    /// Picks a uniformly random element, or `None` for an empty slice.
    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_range(0, items.len() as i32) as usize)
    }
}

impl<R: RandomGenerator + ?Sized> RandomGenerator for &mut R {
    fn next(&mut self) -> i32 {
        (**self).next()
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        (**self).next_range(from, to)
    }
}

/// Generator backed by `rand`'s standard RNG.
pub struct StandardRandomGenerator {
    rng: StdRng,
}

impl Default for StandardRandomGenerator {
    /// Seeds from the operating system.
    fn default() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl StandardRandomGenerator {
    /// A reproducible generator for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomGenerator for StandardRandomGenerator {
    fn next(&mut self) -> i32 {
        self.rng.random()
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        self.rng.random_range(from..to)
    }
}

/// Linear congruential generator with a sequence that is identical on every
/// platform and `rand` version. Used where exact replays matter.
pub struct CustomNumberGenerator {
    seed: i64,
}

impl Default for CustomNumberGenerator {
    fn default() -> Self {
        CustomNumberGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for CustomNumberGenerator {
    fn next(&mut self) -> i32 {
        self.seed = (self.seed * MULTIPLIER_A + INCREMENT_C) % (i32::MAX as i64);
        self.seed as i32
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        (self.next() % (to - from)).abs() + from
    }
}

impl CustomNumberGenerator {
    pub const fn new(seed: i64) -> Self {
        Self { seed }
    }
}

#[cfg(test)]
mod tests {
    use crate::random::{CustomNumberGenerator, RandomGenerator, StandardRandomGenerator};

    #[test]
    fn outputs_same_numbers() {
        let mut crg = CustomNumberGenerator::new(42);
        assert_eq!(crg.next_range(0, 10), 8);
        assert_eq!(crg.next_range(0, 10), 4);
        assert_eq!(crg.next_range(0, 10), 1);
        assert_eq!(crg.next_range(0, 10), 2);
        assert_eq!(crg.next_range(0, 10), 4);
    }

    #[test]
    fn choose_should_be_same() {
        let items = [432, 6542, 534, 6, 13, 645, 88, 2352, 345, 2667, 8287];
        let mut crg = CustomNumberGenerator::default();
        assert_eq!(crg.choose(&items), Some(&6));
        assert_eq!(crg.choose(&items), Some(&2667));
        assert_eq!(crg.choose(&items), Some(&534));
        assert_eq!(crg.choose(&items), Some(&8287));
        assert_eq!(crg.choose(&items), Some(&6));
    }

    #[test]
    fn choose_from_empty() {
        let mut crg = CustomNumberGenerator::default();
        let empty: [u8; 0] = [];
        assert_eq!(crg.choose(&empty), None);
    }

    #[test]
    fn seeded_standard_generator_repeats() {
        let mut a = StandardRandomGenerator::seeded(7);
        let mut b = StandardRandomGenerator::seeded(7);
        for _ in 0..16 {
            let value = a.next_range(3, 9);
            assert!((3..9).contains(&value));
            assert_eq!(value, b.next_range(3, 9));
        }
    }

    fn draw<R: RandomGenerator>(mut random: R) -> i32 {
        random.next_range(0, 10)
    }

    #[test]
    fn borrowed_generator_advances_owner() {
        let mut owner = CustomNumberGenerator::new(42);
        assert_eq!(draw(&mut owner), 8);
        assert_eq!(owner.next_range(0, 10), 4);
    }
}
