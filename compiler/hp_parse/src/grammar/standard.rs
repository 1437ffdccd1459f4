//! `standard <name>`: the benchmark function catalogue.
//!
//! Names are matched case-insensitively. Parameters follow the name and are
//! mandatory once the name is recognized.

use hp_ir::{DirectionMode, Float, Function, StandardFunction, DEFAULT_SCALE_MAX};

use crate::{
    chain, require, ErrorContext, Expected, ExpectedSet, ParseError, ParseOutcome, Parser,
};

impl Parser<'_> {
    pub(crate) fn standard_function(&mut self) -> ParseOutcome<Function> {
        chain!(self.keyword("standard", Expected::Function));
        let name_position = self.position();
        let Some(name) = self.cursor.advance() else {
            let error = self
                .expected_error(ExpectedSet::single(Expected::StandardFunctionName), name_position)
                .with_context(ErrorContext::StandardFunction);
            return ParseOutcome::malformed(error);
        };
        let context = ErrorContext::StandardFunction;
        let standard = match name.to_lowercase().as_str() {
            "sphere" | "norm2" => StandardFunction::Norm2PowerK(1),
            "norm4" => StandardFunction::Norm2PowerK(2),
            "norm8" => StandardFunction::Norm2PowerK(3),
            "norm2pk" => StandardFunction::Norm2PowerK(require!(self, self.parse_i32(), context)),
            "norm1" => StandardFunction::Norm1,
            "normoo" => StandardFunction::NormInfinity,
            "norm1pl2pmk" => {
                StandardFunction::Norm1Plus2PowerMinusK(require!(self, self.parse_i32(), context))
            }
            "rosenbrock" => StandardFunction::Rosenbrock,
            "movedrosenbrock" => StandardFunction::MovedRosenbrock,
            "rastrigin" => StandardFunction::Rastrigin,
            "schwefel" => StandardFunction::Schwefel,
            "schwefel2" => StandardFunction::Schwefel2,
            "diagonal" => {
                StandardFunction::Diagonal(Float::new(require!(self, self.parse_f64(), context)))
            }
            "sphereplus" => StandardFunction::SpherePlus,
            "inclinedplane" => StandardFunction::InclinedPlane,
            "inclinedplaneasym" => StandardFunction::InclinedPlaneAsym,
            "twocupsfunction" => StandardFunction::TwoCups,
            "sortfunction" => StandardFunction::Sorting,
            "testing" => StandardFunction::Testing,
            "monosphere" => StandardFunction::MonoSphere,
            "scaledsphere" => StandardFunction::ScaledSphere(Float::new(DEFAULT_SCALE_MAX)),
            "scaledsphere2" => {
                StandardFunction::ScaledSphere(Float::new(require!(self, self.parse_f64(), context)))
            }
            "scaledandhadamardrotatedshpere" => {
                StandardFunction::HadamardRotatedSphere(Float::new(DEFAULT_SCALE_MAX))
            }
            "scaledandhadamardrotatedshpere2" => StandardFunction::HadamardRotatedSphere(
                Float::new(require!(self, self.parse_f64(), context)),
            ),
            "randomposdef" => StandardFunction::RandomPositiveDefinite(require!(
                self,
                self.parse_random_generator(),
                context
            )),
            "scaledsphererand" => StandardFunction::ScaledSphereRandom(require!(
                self,
                self.parse_random_generator(),
                context
            )),
            "singledifferentdirection" => {
                let single_exponent = require!(self, self.parse_f64(), context);
                let remaining_exponent = require!(self, self.parse_f64(), context);
                let direction = require!(self, self.parse_direction_mode(), context);
                StandardFunction::SingleDifferentDirection {
                    single_exponent: Float::new(single_exponent),
                    remaining_exponent: Float::new(remaining_exponent),
                    direction,
                }
            }
            _ => {
                return ParseOutcome::malformed(
                    ParseError::unknown_standard_function(name, name_position)
                        .with_context(context),
                );
            }
        };
        tracing::trace!(function = %standard, "standard function");
        ParseOutcome::matched(Function::Standard(standard))
    }

    /// `firstDimension | diagonalDirection | randomDirection <RandomGenerator>`
    fn parse_direction_mode(&mut self) -> ParseOutcome<DirectionMode> {
        let position = self.position();
        if self.cursor.eat("firstDimension") {
            return ParseOutcome::matched(DirectionMode::FirstDimension);
        }
        if self.cursor.eat("diagonalDirection") {
            return ParseOutcome::matched(DirectionMode::Diagonal);
        }
        if self.cursor.eat("randomDirection") {
            let rng = require!(
                self,
                self.parse_random_generator(),
                ErrorContext::StandardFunction
            );
            return ParseOutcome::matched(DirectionMode::Random(rng));
        }
        ParseOutcome::no_match(ExpectedSet::single(Expected::DirectionMode), position)
    }
}
