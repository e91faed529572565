//! Die sources.
//!
//! The state machine never touches an RNG directly; it asks a [`Die`] for one
//! value per turn. Closures are dice, so tests can script exact rolls.

use super::types::DIE_FACES;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Source of die rolls.
pub trait Die {
    /// Rolls the die once. Fair dice return a value in `1..=6`.
    fn roll(&mut self) -> u8;
}

impl<F> Die for F
where
    F: FnMut() -> u8,
{
    fn roll(&mut self) -> u8 {
        self()
    }
}

/// Fair six-sided die backed by a standard RNG.
#[derive(Debug, Clone)]
pub struct RandomDie {
    rng: StdRng,
}

impl RandomDie {
    /// Creates a die seeded from the operating system.
    #[instrument]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a die that replays the same sequence for the same seed.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        debug!(seed, "Creating seeded die");
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a seeded die when a seed is given, otherwise an OS-seeded one.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for RandomDie {
    fn default() -> Self {
        Self::new()
    }
}

impl Die for RandomDie {
    fn roll(&mut self) -> u8 {
        self.rng.random_range(DIE_FACES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_die_stays_on_its_faces() {
        let mut die = RandomDie::seeded(7);
        for _ in 0..1_000 {
            assert!(DIE_FACES.contains(&die.roll()));
        }
    }

    #[test]
    fn seeded_dice_agree() {
        let mut a = RandomDie::seeded(42);
        let mut b = RandomDie::seeded(42);
        let left: Vec<_> = (0..20).map(|_| a.roll()).collect();
        let right: Vec<_> = (0..20).map(|_| b.roll()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn every_face_shows_up() {
        let mut die = RandomDie::seeded(1);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[usize::from(die.roll() - 1)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn closures_are_dice() {
        let mut rolls = vec![2, 5].into_iter();
        let mut die = move || rolls.next().unwrap_or(1);
        assert_eq!(die.roll(), 2);
        assert_eq!(die.roll(), 5);
        assert_eq!(die.roll(), 1);
    }
}
