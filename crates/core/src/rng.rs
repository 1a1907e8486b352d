//! RNG module - 7-bag piece type generation
//!
//! Each bag contains one of each piece type (I, J, L, O, S, T, Z), shuffled.
//! Draws from the bag until empty, then generates a new bag.
//!
//! Also provides a simple LCG so piece sequences are reproducible from a seed.

use crate::types::PieceType;

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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

const BAG_SIZE: usize = PieceType::ALL.len();

/// 7-bag piece type generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    bag: [PieceType; BAG_SIZE],
    bag_index: usize,
    rng: SimpleRng,
    seed: u32,
}

impl PieceBag {
    /// Create a new bag with the given seed
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: PieceType::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
            seed,
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.bag = PieceType::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Peek at the next piece type without drawing it
    pub fn peek(&self) -> PieceType {
        if self.bag_index < BAG_SIZE {
            return self.bag[self.bag_index];
        }

        // The next bag is shuffled from the current RNG state, so a cloned RNG
        // previews exactly what `draw` will produce.
        let mut preview_rng = self.rng.clone();
        let mut next_bag = PieceType::ALL;
        preview_rng.shuffle(&mut next_bag);
        next_bag[0]
    }

    /// Draw the next piece type
    pub fn draw(&mut self) -> PieceType {
        if self.bag_index >= BAG_SIZE {
            self.refill();
        }

        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }

    /// Seed the bag was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    #[cfg(test)]
    fn remaining(&self) -> &[PieceType] {
        &self.bag[self.bag_index..]
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}
