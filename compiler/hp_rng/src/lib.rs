//! Linear congruential generators.
//!
//! A [`RandomGenerator`] produces two views of the same state sequence:
//! signed 64-bit integers ([`RandomSource::next_integer`]) and uniform
//! arbitrary-precision floats in `[0, 1)` ([`RandomSource::next_uniform`]).
//! Every draw advances the state, so interleaving the two views on two
//! identically constructed generators yields identical streams.
//!
//! # Variants
//!
//! | Speed | Modulus | Integer step | Uniform draw |
//! |-------|---------|--------------|--------------|
//! | Fast | 2^63 | `m·s + a`, bit 63 cleared | one step, `s · 2^-63` |
//! | Intense | 2^63 | same | `⌈p / used_bits⌉` steps, top `used_bits` bits each |
//! | Fast | explicit `M` | `(m·s + a) mod M` | one step, `s / M` |
//! | Intense | explicit `M` | same | `p / bits(M) + 1` steps of `(r + s) / M` |
//!
//! The standard configuration uses [`STANDARD_MULTIPLIER`] and
//! [`STANDARD_ADDER`] with modulus 2^63 and has full period 2^63.

use astro_float::{BigFloat, RoundingMode};
use thiserror::Error;

/// Multiplier of the standard generator.
pub const STANDARD_MULTIPLIER: u64 = 1_571_204_578_482_947_281;

/// Adder of the standard generator.
pub const STANDARD_ADDER: u64 = 12_345_678_901_234_567;

/// The power-of-two modulus shared by the standard and `mod2p63` generators.
pub const MODULUS_2P63: u64 = 1 << 63;

const MASK_63: u64 = MODULUS_2P63 - 1;

const ROUNDING: RoundingMode = RoundingMode::ToEven;

/// Errors raised while constructing a generator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RngError {
    #[error("modulus of a linear congruential generator must be positive")]
    ZeroModulus,
}

/// A source of reproducible random draws.
pub trait RandomSource {
    /// Advance the state once and return it as a signed integer.
    fn next_integer(&mut self) -> i64;

    /// Draw a uniform value in `[0, 1)` with `precision` bits.
    fn next_uniform(&mut self, precision: usize) -> BigFloat;
}

/// How many state steps a uniform draw consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Speed {
    Fast,
    /// Accumulates `used_bits` fresh bits per step until the precision is filled.
    Intense { used_bits: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Modulus {
    /// 2^63, computed by wrapping arithmetic.
    Pow63,
    Explicit(u64),
}

/// A linear congruential generator: `s ← (multiplier · s + adder) mod modulus`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RandomGenerator {
    speed: Speed,
    modulus: Modulus,
    multiplier: u64,
    adder: u64,
    initial_seed: u64,
    state: u64,
}

impl RandomGenerator {
    /// The standard fast generator.
    pub fn standard_fast(seed: u64) -> Self {
        Self::mod2p63_fast(STANDARD_MULTIPLIER, STANDARD_ADDER, seed)
    }

    /// The standard intense generator.
    ///
    /// `used_bits` outside `[1, 63]` is clamped with a warning.
    pub fn standard_intense(seed: u64, used_bits: i64) -> Self {
        Self::mod2p63_intense(STANDARD_MULTIPLIER, STANDARD_ADDER, seed, used_bits)
    }

    pub fn mod2p63_fast(multiplier: u64, adder: u64, seed: u64) -> Self {
        RandomGenerator {
            speed: Speed::Fast,
            modulus: Modulus::Pow63,
            multiplier,
            adder,
            initial_seed: seed,
            state: seed,
        }
    }

    pub fn mod2p63_intense(multiplier: u64, adder: u64, seed: u64, used_bits: i64) -> Self {
        RandomGenerator {
            speed: Speed::Intense {
                used_bits: clamp_used_bits(used_bits),
            },
            ..Self::mod2p63_fast(multiplier, adder, seed)
        }
    }

    /// A fast generator with a caller-chosen modulus.
    ///
    /// Moduli above 2^63 are capped to 2^63; multiplier, adder and seed are
    /// reduced modulo the (capped) modulus.
    pub fn explicit_fast(
        multiplier: u64,
        adder: u64,
        modulus: u64,
        seed: u64,
    ) -> Result<Self, RngError> {
        let modulus = checked_modulus(modulus)?;
        Ok(RandomGenerator {
            speed: Speed::Fast,
            modulus: Modulus::Explicit(modulus),
            multiplier: multiplier % modulus,
            adder: adder % modulus,
            initial_seed: seed,
            state: seed % modulus,
        })
    }

    /// An intense generator with a caller-chosen modulus.
    ///
    /// Each uniform draw takes `bit_length(modulus) - 1` bits per step,
    /// clamped to `[1, 63]`.
    pub fn explicit_intense(
        multiplier: u64,
        adder: u64,
        modulus: u64,
        seed: u64,
    ) -> Result<Self, RngError> {
        let fast = Self::explicit_fast(multiplier, adder, modulus, seed)?;
        let bits = (u64::BITS - fast.modulus_value().leading_zeros()).saturating_sub(1);
        Ok(RandomGenerator {
            speed: Speed::Intense {
                used_bits: bits.clamp(1, 63),
            },
            ..fast
        })
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    pub fn adder(&self) -> u64 {
        self.adder
    }

    pub fn modulus_value(&self) -> u64 {
        match self.modulus {
            Modulus::Pow63 => MODULUS_2P63,
            Modulus::Explicit(m) => m,
        }
    }

    /// The seed the generator was constructed with.
    pub fn seed(&self) -> u64 {
        self.initial_seed
    }

    /// The current state, i.e. the value of the last integer draw.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Display name used in output file names and reports.
    pub fn name(&self) -> String {
        let prefix = match self.speed {
            Speed::Fast => "F",
            Speed::Intense { .. } => "I",
        };
        let family = match self.modulus {
            Modulus::Pow63 => "LCRNG_2P63",
            Modulus::Explicit(_) => "LCRNG",
        };
        format!("{prefix}{family}_Seed{:04}", self.initial_seed)
    }

    /// Skip `steps` integer draws in `O(log steps)`.
    ///
    /// The affine map `s ↦ m·s + a` is raised to the `steps`-th power by
    /// repeated squaring.
    pub fn advance(&mut self, mut steps: u64) {
        let modulus = u128::from(self.modulus_value());
        let mut base = (
            u128::from(self.multiplier) % modulus,
            u128::from(self.adder) % modulus,
        );
        let mut acc = (1 % modulus, 0_u128);
        while steps > 0 {
            if steps & 1 == 1 {
                acc = ((base.0 * acc.0) % modulus, (base.0 * acc.1 + base.1) % modulus);
            }
            base = ((base.0 * base.0) % modulus, (base.0 * base.1 + base.1) % modulus);
            steps >>= 1;
        }
        self.state = ((acc.0 * u128::from(self.state) + acc.1) % modulus) as u64;
    }

    fn step(&mut self) -> u64 {
        self.state = match self.modulus {
            Modulus::Pow63 => self
                .multiplier
                .wrapping_mul(self.state)
                .wrapping_add(self.adder)
                & MASK_63,
            Modulus::Explicit(m) => {
                let next = u128::from(self.multiplier) * u128::from(self.state)
                    + u128::from(self.adder);
                (next % u128::from(m)) as u64
            }
        };
        self.state
    }
}

impl RandomSource for RandomGenerator {
    #[inline]
    fn next_integer(&mut self) -> i64 {
        self.step() as i64
    }

    fn next_uniform(&mut self, precision: usize) -> BigFloat {
        let p = precision.max(64);
        let drawn = match (self.speed, self.modulus) {
            (Speed::Fast, Modulus::Pow63) => {
                let s = self.step();
                BigFloat::from_u64(s, p).mul(&power_of_two(-63, p), p, ROUNDING)
            }
            (Speed::Fast, Modulus::Explicit(m)) => {
                let s = self.step();
                BigFloat::from_u64(s, p).div(&BigFloat::from_u64(m, p), p, ROUNDING)
            }
            (Speed::Intense { used_bits }, Modulus::Pow63) => {
                let scale = power_of_two(-(used_bits as i32), p);
                let mut result = BigFloat::from_u64(0, p);
                let mut remaining = precision as i64;
                while remaining > 0 {
                    let part = self.step() >> (63 - used_bits);
                    result = result
                        .add(&BigFloat::from_u64(part, p), p, ROUNDING)
                        .mul(&scale, p, ROUNDING);
                    remaining -= i64::from(used_bits);
                }
                result
            }
            (Speed::Intense { used_bits }, Modulus::Explicit(m)) => {
                let divisor = BigFloat::from_u64(m, p);
                let mut result = BigFloat::from_u64(0, p);
                for _ in 0..=precision / used_bits as usize {
                    let s = self.step();
                    result = result
                        .add(&BigFloat::from_u64(s, p), p, ROUNDING)
                        .div(&divisor, p, ROUNDING);
                }
                result
            }
        };
        drawn.add(&BigFloat::new(precision), precision, ROUNDING)
    }
}

/// `2^exp` as an exact float. Valid for the shifts used by the generators.
fn power_of_two(exp: i32, precision: usize) -> BigFloat {
    BigFloat::from_f64(2f64.powi(exp), precision)
}

fn clamp_used_bits(used_bits: i64) -> u32 {
    if used_bits < 1 {
        tracing::warn!(used_bits, "accepted bits of intense generator reset to 1");
        1
    } else if used_bits > 63 {
        tracing::warn!(used_bits, "accepted bits of intense generator reset to 63");
        63
    } else {
        used_bits as u32
    }
}

fn checked_modulus(modulus: u64) -> Result<u64, RngError> {
    if modulus == 0 {
        return Err(RngError::ZeroModulus);
    }
    if modulus > MODULUS_2P63 {
        tracing::warn!(modulus, "modulus too large, reset to 2^63");
        return Ok(MODULUS_2P63);
    }
    Ok(modulus)
}
