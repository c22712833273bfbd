//! Seeded random stream shared by every stage of a generation run.
//!
//! Every decision the generator makes is drawn from one `DungeonRng`, passed
//! explicitly by `&mut`. Two streams created from the same seed yield the same
//! values for the same call sequence on every platform.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Clone, Debug)]
pub struct DungeonRng {
    inner: ChaCha8Rng,
}

impl DungeonRng {
    pub fn new(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Reset the stream to the start of `seed`'s sequence.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform `f64` in `[0, 1)` built from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }

    /// Uniform integer in `[lo, hi]`. Swapped bounds are reordered.
    pub fn int_range(&mut self, lo: i32, hi: i32) -> i32 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let span = (i64::from(hi) - i64::from(lo) + 1) as u64;
        let offset = self.below(span);
        (i64::from(lo) + offset as i64) as i32
    }

    /// Uniform float in `[lo, hi)`; returns `lo` when the range is empty.
    pub fn float_range(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        let value = lo + self.next_f64() * (hi - lo);
        if value >= hi { lo } else { value }
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.below(len as u64) as usize
    }

    /// `true` with probability `p`; `p <= 0` is never, `p >= 1` is always.
    pub fn weighted_bool(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    pub fn bool(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }

    fn below(&mut self, range: u64) -> u64 {
        if range.is_power_of_two() {
            return self.next_u64() & (range - 1);
        }
        // Reject the low sliver that would bias the modulo.
        let threshold = range.wrapping_neg() % range;
        loop {
            let value = self.next_u64();
            if value >= threshold {
                return value % range;
            }
        }
    }
}
