//! xoshiro256** engine.
//!
//! Output function and state transition follow Blackman and Vigna's
//! reference. Seeding XORs one 64-bit value into every word of a fixed
//! default state and then jumps 2^128 steps, so nearby seeds land on
//! unrelated subsequences.

use rand_core::{impls, Error, RngCore, SeedableRng};

/// Hexadecimal digits of π, the state before any seed is applied.
const DEFAULT_STATE: [u64; 4] = [
    0x3243F6A8885A308D,
    0x313198A2E0370734,
    0x4A4093822299F31D,
    0x0082EFA98EC4E6C8,
];

/// Jump polynomial equivalent to 2^128 calls of `next_u64`.
const JUMP: [u64; 4] = [
    0x180EC6D33CFD0ABA,
    0xD5A61266F0C9392C,
    0xA9582618E03FC9AA,
    0x39ABDC4529B1661C,
];

/// xoshiro256** bit generator with 256 bits of state.
///
/// Not suitable for cryptographic use.
///
/// # Examples
///
/// ```rust
/// use judgegen_sampling::rng::Xoshiro256StarStar;
/// use rand_core::{RngCore, SeedableRng};
///
/// let mut a = Xoshiro256StarStar::seed_from_u64(7);
/// let mut b = Xoshiro256StarStar::seed_from_u64(7);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Xoshiro256StarStar {
    state: [u64; 4],
}

impl Xoshiro256StarStar {
    /// Creates an engine from a raw state, without seeding or jumping.
    ///
    /// An all-zero state is a fixed point of the transition and is replaced
    /// by the default state.
    #[inline]
    pub fn from_state(state: [u64; 4]) -> Self {
        if state == [0; 4] {
            Self {
                state: DEFAULT_STATE,
            }
        } else {
            Self { state }
        }
    }

    /// Returns the current raw state.
    #[inline]
    pub fn state(&self) -> [u64; 4] {
        self.state
    }

    /// Resets the state to the default state mixed with `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.state = DEFAULT_STATE.map(|word| word ^ seed);
        self.jump();
    }

    /// Advances the state by 2^128 steps.
    pub fn jump(&mut self) {
        let mut acc = [0u64; 4];
        for word in JUMP {
            for bit in 0..64 {
                if word & (1u64 << bit) != 0 {
                    for (a, s) in acc.iter_mut().zip(self.state.iter()) {
                        *a ^= *s;
                    }
                }
                self.step();
            }
        }
        self.state = acc;
    }

    #[inline]
    fn step(&mut self) -> u64 {
        let s = &mut self.state;
        let result = s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = s[1] << 17;
        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];
        s[2] ^= t;
        s[3] = s[3].rotate_left(45);
        result
    }
}

impl Default for Xoshiro256StarStar {
    fn default() -> Self {
        Self::seed_from_u64(super::DEFAULT_SEED)
    }
}

impl RngCore for Xoshiro256StarStar {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xoshiro256StarStar {
    type Seed = [u8; 32];

    /// Interprets the bytes as four little-endian state words.
    fn from_seed(seed: [u8; 32]) -> Self {
        let mut state = [0u64; 4];
        for (word, chunk) in state.iter_mut().zip(seed.chunks_exact(8)) {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            *word = u64::from_le_bytes(bytes);
        }
        Self::from_state(state)
    }

    fn seed_from_u64(seed: u64) -> Self {
        let mut rng = Self {
            state: DEFAULT_STATE,
        };
        rng.reseed(seed);
        rng
    }
}
