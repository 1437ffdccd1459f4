//! Random generator descriptions.
//!
//! Every failure is a soft `NoMatch` with the cursor back at the start, so a
//! generator can be probed without committing.

use hp_rng::RandomGenerator;

use crate::{Expected, ExpectedSet, ParseOutcome, Parser};

impl Parser<'_> {
    /// `linearCongruenceRNG <seed> <kind>` or a bare seed.
    pub(crate) fn parse_random_generator(&mut self) -> ParseOutcome<RandomGenerator> {
        let start = self.snapshot();
        match self.random_generator() {
            Some(rng) => {
                tracing::trace!(name = %rng.name(), "random generator");
                ParseOutcome::matched(rng)
            }
            None => {
                self.restore(start);
                ParseOutcome::no_match(
                    ExpectedSet::single(Expected::RandomGenerator),
                    start.position(),
                )
            }
        }
    }

    fn random_generator(&mut self) -> Option<RandomGenerator> {
        if !self.cursor.eat("linearCongruenceRNG") {
            let seed = self.take_number()?;
            return Some(RandomGenerator::standard_fast(seed));
        }
        let seed: u64 = self.take_number()?;
        if self.cursor.eat("standard") {
            return match self.speed()? {
                Speed::Fast => Some(RandomGenerator::standard_fast(seed)),
                Speed::Intense => {
                    let used_bits: i32 = self.take_number()?;
                    Some(RandomGenerator::standard_intense(seed, i64::from(used_bits)))
                }
            };
        }
        if self.cursor.eat("mod2p63") {
            let multiplier = self.take_number()?;
            let adder = self.take_number()?;
            return match self.speed()? {
                Speed::Fast => Some(RandomGenerator::mod2p63_fast(multiplier, adder, seed)),
                Speed::Intense => {
                    let used_bits: i32 = self.take_number()?;
                    Some(RandomGenerator::mod2p63_intense(
                        multiplier,
                        adder,
                        seed,
                        i64::from(used_bits),
                    ))
                }
            };
        }
        if self.cursor.eat("specific") {
            let multiplier = self.take_number()?;
            let adder = self.take_number()?;
            let modulus = self.take_number()?;
            let built = match self.speed()? {
                Speed::Fast => RandomGenerator::explicit_fast(multiplier, adder, modulus, seed),
                Speed::Intense => {
                    RandomGenerator::explicit_intense(multiplier, adder, modulus, seed)
                }
            };
            return built.ok();
        }
        None
    }

    fn speed(&mut self) -> Option<Speed> {
        if self.cursor.eat("fast") {
            Some(Speed::Fast)
        } else if self.cursor.eat("intense") {
            Some(Speed::Intense)
        } else {
            None
        }
    }
}

enum Speed {
    Fast,
    Intense,
}
