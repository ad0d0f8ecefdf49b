//! Dice rolls for claim challenges.
//!
//! Every probabilistic decision in the engine is a uniform draw in
//! `[1, 100]`. The source is injectable so tests and replays can control
//! the outcome exactly.

use std::collections::VecDeque;

/// Source of uniform random draws in `[1, 100]`.
pub trait DiceRoller {
    /// Draw the next value, uniform in `1..=100`.
    fn roll(&mut self) -> u8;
}

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
pub struct XorShiftDice {
    state: u64,
}

impl XorShiftDice {
    /// Create a new roller with the given seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Create a roller seeded from the system clock.
    #[must_use]
    pub fn from_entropy() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos() & u128::from(u64::MAX)).unwrap_or(42))
            .unwrap_or(42);
        Self::new(seed)
    }

    /// Generate next random u64.
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl DiceRoller for XorShiftDice {
    #[allow(clippy::cast_possible_truncation)]
    fn roll(&mut self) -> u8 {
        (self.next_u64() % 100) as u8 + 1
    }
}

/// Roller that replays a fixed sequence of values.
///
/// Once the sequence is exhausted it keeps returning the last value (or 1
/// if constructed empty). Intended for deterministic tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u8>,
    last: u8,
}

impl ScriptedDice {
    /// Create a roller that yields `rolls` in order.
    ///
    /// Values are clamped into `[1, 100]`.
    #[must_use]
    pub fn new(rolls: &[u8]) -> Self {
        Self {
            rolls: rolls.iter().map(|&r| r.clamp(1, 100)).collect(),
            last: 1,
        }
    }

    /// Number of scripted values not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl DiceRoller for ScriptedDice {
    fn roll(&mut self) -> u8 {
        if let Some(next) = self.rolls.pop_front() {
            self.last = next;
        }
        self.last.clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xorshift_range() {
        let mut dice = XorShiftDice::new(12345);
        for _ in 0..10_000 {
            let roll = dice.roll();
            assert!((1..=100).contains(&roll));
        }
    }

    #[test]
    fn test_xorshift_deterministic() {
        let mut a = XorShiftDice::new(99);
        let mut b = XorShiftDice::new(99);
        for _ in 0..100 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn test_xorshift_zero_seed_is_usable() {
        let mut dice = XorShiftDice::new(0);
        let roll = dice.roll();
        assert!((1..=100).contains(&roll));
    }

    #[test]
    fn test_scripted_sequence_then_repeats_last() {
        let mut dice = ScriptedDice::new(&[5, 50, 100]);
        assert_eq!(dice.roll(), 5);
        assert_eq!(dice.roll(), 50);
        assert_eq!(dice.roll(), 100);
        assert_eq!(dice.roll(), 100);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn test_scripted_clamps_out_of_range() {
        let mut dice = ScriptedDice::new(&[0, 255]);
        assert_eq!(dice.roll(), 1);
        assert_eq!(dice.roll(), 100);
    }

    #[test]
    fn test_scripted_empty_yields_one() {
        let mut dice = ScriptedDice::new(&[]);
        assert_eq!(dice.roll(), 1);
    }
}
