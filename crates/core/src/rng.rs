//! RNG module - 7-bag random piece generation
//!
//! Each bag contains one of each piece (I, J, L, O, S, T, Z). Pieces are drawn one at
//! a time in shuffled order; a fresh shuffled bag is generated only once the current
//! one is exhausted. Over any completed bag every kind appears exactly once.
//!
//! A small LCG drives the shuffle so that a seed fully determines the sequence.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, PIECE_KIND_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift keeps the high bits, which are the well-mixed ones in an LCG.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Undrawn kinds, in draw order
    bag: ArrayVec<PieceKind, PIECE_KIND_COUNT>,
    /// Index of the next kind to draw
    bag_index: usize,
    rng: SimpleRng,
}

impl PieceBag {
    /// Create an empty bag; the first draw fills it
    pub fn new(seed: u32) -> Self {
        Self {
            bag: ArrayVec::new(),
            bag_index: 0,
            rng: SimpleRng::new(seed),
        }
    }

    /// Generate a new shuffled bag
    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece, refilling first if the bag is exhausted
    pub fn draw(&mut self) -> PieceKind {
        if self.is_empty() {
            self.refill();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Discard any undrawn kinds; the next draw starts a fresh bag
    pub fn reset(&mut self) {
        self.bag.clear();
        self.bag_index = 0;
    }

    /// Kinds left before the next refill
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }

    pub fn is_empty(&self) -> bool {
        self.bag_index >= self.bag.len()
    }

    /// RNG state (feeding it back into `new` continues the same stream)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=7 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_bag_starts_empty() {
        let bag = PieceBag::new(1);
        assert!(bag.is_empty());
        assert!(bag.remaining().is_empty());
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = PieceBag::new(1);

        let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.draw()).collect();
        drawn.sort();
        assert_eq!(drawn, PieceKind::ALL.to_vec());
        assert!(bag.is_empty());
    }

    #[test]
    fn test_bag_auto_refill() {
        let mut bag = PieceBag::new(1);
        for _ in 0..7 {
            bag.draw();
        }
        bag.draw();
        assert_eq!(bag.remaining().len(), 6);
    }

    #[test]
    fn test_bag_reset_discards_remainder() {
        let mut bag = PieceBag::new(99);
        bag.draw();
        bag.draw();
        bag.reset();
        assert!(bag.is_empty());

        let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.draw()).collect();
        drawn.sort();
        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }
}
