//! 64-bit Mersenne Twister (MT19937-64).
//!
//! Produces the same sequence as `std::mt19937_64` for the same `u64` seed,
//! which makes test data generated against that engine reproducible here.

use rand_core::{impls, Error, RngCore, SeedableRng};

const N: usize = 312;
const M: usize = 156;
const MATRIX_A: u64 = 0xB502_6F5A_A966_19E9;
const UPPER_MASK: u64 = 0xFFFF_FFFF_8000_0000;
const LOWER_MASK: u64 = 0x7FFF_FFFF;
const INIT_MULTIPLIER: u64 = 6364136223846793005;

/// MT19937-64 bit generator.
///
/// # Examples
///
/// ```rust
/// use judgegen_sampling::rng::Mt19937_64;
/// use rand_core::RngCore;
///
/// let mut mt = Mt19937_64::new(5489);
/// assert_eq!(mt.next_u64(), 14514284786278117030);
/// ```
#[derive(Clone)]
pub struct Mt19937_64 {
    state: [u64; N],
    index: usize,
}

impl Mt19937_64 {
    /// Creates an engine initialised with `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: [0; N],
            index: N,
        };
        rng.reseed(seed);
        rng
    }

    /// Creates an engine from a raw state; the next draw regenerates it.
    pub fn from_state(state: [u64; N]) -> Self {
        Self { state, index: N }
    }

    /// Re-initialises the state from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.state[0] = seed;
        for i in 1..N {
            let prev = self.state[i - 1];
            self.state[i] = INIT_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 62))
                .wrapping_add(i as u64);
        }
        self.index = N;
    }

    /// Advances the engine by `count` outputs.
    pub fn discard(&mut self, count: u64) {
        for _ in 0..count {
            self.next_u64();
        }
    }

    fn twist(&mut self) {
        for i in 0..N {
            let x = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            let mut xa = x >> 1;
            if x & 1 != 0 {
                xa ^= MATRIX_A;
            }
            self.state[i] = self.state[(i + M) % N] ^ xa;
        }
        self.index = 0;
    }
}

impl Default for Mt19937_64 {
    fn default() -> Self {
        Self::new(super::DEFAULT_SEED)
    }
}

impl std::fmt::Debug for Mt19937_64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt19937_64")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl RngCore for Mt19937_64 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        if self.index >= N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= (y >> 29) & 0x5555_5555_5555_5555;
        y ^= (y << 17) & 0x71D6_7FFF_EDA6_0000;
        y ^= (y << 37) & 0xFFF7_EEE0_0000_0000;
        y ^ (y >> 43)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mt19937_64 {
    type Seed = [u8; 8];

    /// Interprets the bytes as one little-endian seed word.
    fn from_seed(seed: [u8; 8]) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(seed: u64) -> Self {
        Self::new(seed)
    }
}
