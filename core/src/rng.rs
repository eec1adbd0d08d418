//! 48-bit Linear Congruential Generator
//!
//! Every maze is a pure function of its seed, so the generator and the order
//! in which values are drawn from it are part of the maze format. Changing
//! either changes every maze generated from an existing seed.
//!
//! Constants (same family as POSIX `drand48`):
//! - Multiplier (a): 0x5DEECE66D
//! - Increment (c): 0xB
//! - Modulus (m): 2^48
//!
//! Reference: https://en.wikipedia.org/wiki/Linear_congruential_generator

use crate::grid::{Cell, PriorityMap};

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const INCREMENT: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// 48-bit linear congruential generator
///
/// Same seed always produces the same sequence.
#[derive(Debug, Clone)]
pub struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    /// Create a new generator from a 64-bit seed
    ///
    /// The seed is scrambled with the multiplier so that small seeds do not
    /// start from a near-zero state.
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ MULTIPLIER) & MASK,
        }
    }

    /// Advance the state and return its top `bits` bits (1..=32)
    fn next_bits(&mut self, bits: u32) -> i32 {
        debug_assert!(bits >= 1 && bits <= 32);
        self.state = (self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT)) & MASK;
        (self.state >> (48 - bits)) as i32
    }

    /// Uniform integer in `[0, bound)`
    ///
    /// Powers of two take the high bits directly; other bounds use a rejection
    /// loop so that the result carries no modulo bias.
    pub fn next_int(&mut self, bound: u32) -> u32 {
        assert!(bound > 0 && bound <= i32::MAX as u32, "bound out of range");
        let bound = bound as i32;

        let mut r = self.next_bits(31);
        let m = bound - 1;
        if bound & m == 0 {
            return ((bound as i64 * r as i64) >> 31) as u32;
        }

        let mut u = r;
        loop {
            r = u % bound;
            // A negative (wrapped) value means `u` fell in the final partial
            // block of the 31-bit range.
            if u.wrapping_sub(r).wrapping_add(m) >= 0 {
                return r as u32;
            }
            u = self.next_bits(31);
        }
    }

    /// Uniform float in `[0, 1)` with 24 bits of precision
    pub fn next_float(&mut self) -> f32 {
        self.next_bits(24) as f32 / (1u32 << 24) as f32
    }
}

/// The values every build draws before anything else
pub struct SequenceDraw {
    /// Starting cell, always on row 0
    pub start: Cell,
    /// One priority per cell
    pub priorities: PriorityMap,
    /// Generator positioned after the fixed draws
    pub rng: Lcg48,
}

/// Draw the starting cell and the priority map for a `size_x × size_y` grid.
///
/// Draw order is fixed: the start column first, then one float per cell in
/// row-major order (all columns of row 0, then row 1, ...). Anything that needs
/// more randomness must draw from the returned generator afterwards, never in
/// between.
pub fn draw_sequence(seed: u64, size_x: usize, size_y: usize) -> SequenceDraw {
    let mut rng = Lcg48::new(seed);

    let start = Cell::new(rng.next_int(size_x as u32) as usize, 0);

    let mut values = Vec::with_capacity(size_x * size_y);
    for _row in 0..size_y {
        for _col in 0..size_x {
            values.push(rng.next_float());
        }
    }

    SequenceDraw {
        start,
        priorities: PriorityMap::from_row_major(size_x, size_y, values),
        rng,
    }
}
