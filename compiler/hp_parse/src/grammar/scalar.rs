//! Numbers, operations, pair operations and constants.

use std::str::FromStr;

use hp_ir::{ConstantEvaluation, Float, Operation, PairOp};

use crate::{require, ErrorContext, Expected, ExpectedSet, ParseOutcome, Parser};

impl Parser<'_> {
    /// Consume the current token if it parses as a `T`.
    pub(crate) fn take_number<T: FromStr>(&mut self) -> Option<T> {
        let value = self.cursor.current()?.parse().ok()?;
        self.cursor.advance();
        Some(value)
    }

    /// A finite or infinite double; `NaN` is rejected.
    pub(crate) fn parse_f64(&mut self) -> ParseOutcome<f64> {
        let position = self.position();
        match self.take_number::<f64>() {
            Some(value) if !value.is_nan() => ParseOutcome::matched(value),
            Some(_) => {
                self.cursor.set_position(position);
                ParseOutcome::no_match(ExpectedSet::single(Expected::Number), position)
            }
            None => ParseOutcome::no_match(ExpectedSet::single(Expected::Number), position),
        }
    }

    pub(crate) fn parse_i32(&mut self) -> ParseOutcome<i32> {
        let position = self.position();
        match self.take_number() {
            Some(value) => ParseOutcome::matched(value),
            None => ParseOutcome::no_match(ExpectedSet::single(Expected::Integer), position),
        }
    }

    /// `sqrt | log2 | log2dbl | abs | exp | sin | cos | tan | arcsin |
    /// arccos | arctan | logE | pow <f64>`
    pub(crate) fn parse_operation(&mut self) -> ParseOutcome<Operation> {
        let position = self.position();
        if self.cursor.eat("pow") {
            let exponent = require!(self, self.parse_f64(), ErrorContext::Operation);
            tracing::trace!(exponent, "operation pow");
            return ParseOutcome::matched(Operation::Pow(Float::new(exponent)));
        }
        match self.cursor.current().and_then(Operation::from_keyword) {
            Some(operation) => {
                self.cursor.advance();
                tracing::trace!(%operation, "operation");
                ParseOutcome::matched(operation)
            }
            None => ParseOutcome::no_match(ExpectedSet::single(Expected::Operation), position),
        }
    }

    /// `+ | - | * | / | min | max`
    pub(crate) fn parse_pair_operation(&mut self) -> ParseOutcome<PairOp> {
        let position = self.position();
        match self.cursor.current().and_then(PairOp::from_keyword) {
            Some(op) => {
                self.cursor.advance();
                ParseOutcome::matched(op)
            }
            None => ParseOutcome::no_match(ExpectedSet::single(Expected::PairOperation), position),
        }
    }

    /// `E | Pi | plusInfinity | minusInfinity | <f64>`
    pub(crate) fn parse_constant(&mut self) -> ParseOutcome<ConstantEvaluation> {
        let position = self.position();
        if let Some(constant) = self.cursor.current().and_then(ConstantEvaluation::from_keyword) {
            self.cursor.advance();
            return ParseOutcome::matched(constant);
        }
        match self.parse_f64() {
            ParseOutcome::Ok { value } => {
                ParseOutcome::matched(ConstantEvaluation::Number(Float::new(value)))
            }
            _ => ParseOutcome::no_match(ExpectedSet::single(Expected::Constant), position),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::{tokenize, ParseErrorKind};
    use pretty_assertions::assert_eq;

    fn operation(command: &str) -> (ParseOutcome<Operation>, usize) {
        let tokens = tokenize(command);
        let mut parser = Parser::new(&tokens);
        let outcome = parser.parse_operation();
        (outcome, parser.position())
    }

    #[test]
    fn test_operations() {
        let (outcome, consumed) = operation("logE identity");
        assert_eq!(outcome.ok().unwrap(), Operation::LogE);
        assert_eq!(consumed, 1);

        let (outcome, consumed) = operation("pow 2.5");
        assert_eq!(outcome.ok().unwrap(), Operation::Pow(Float::new(2.5)));
        assert_eq!(consumed, 2);

        let (outcome, consumed) = operation("log2dbl standard sphere");
        assert_eq!(outcome.ok().unwrap(), Operation::Log2Double);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_unknown_operation_is_no_match() {
        let (outcome, consumed) = operation("standard sphere");
        assert!(outcome.is_no_match());
        assert_eq!(consumed, 0);

        let (outcome, _) = operation("");
        assert!(outcome.is_no_match());
    }

    #[test]
    fn test_pow_without_exponent_is_malformed() {
        for command in ["pow", "pow two", "pow NaN"] {
            let (outcome, _) = operation(command);
            let ParseOutcome::Malformed { error } = outcome else {
                panic!("`{command}` should be malformed");
            };
            assert!(matches!(
                error.kind,
                ParseErrorKind::UnexpectedEnd | ParseErrorKind::UnexpectedToken
            ));
            assert_eq!(error.position, 1);
        }
    }

    #[test]
    fn test_constants() {
        let cases = [
            ("E", ConstantEvaluation::E),
            ("Pi", ConstantEvaluation::Pi),
            ("plusInfinity", ConstantEvaluation::PlusInfinity),
            ("minusInfinity", ConstantEvaluation::MinusInfinity),
            ("-1.5e3", ConstantEvaluation::Number(Float::new(-1500.0))),
        ];
        for (command, expected) in cases {
            let tokens = tokenize(command);
            let mut parser = Parser::new(&tokens);
            assert_eq!(parser.parse_constant().ok().unwrap(), expected);
        }
        let tokens = tokenize("pi");
        assert!(Parser::new(&tokens).parse_constant().is_no_match());
    }

    #[test]
    fn test_pair_operations() {
        let tokens = tokenize("max");
        assert_eq!(Parser::new(&tokens).parse_pair_operation().ok().unwrap(), PairOp::Max);
        let tokens = tokenize("plus");
        assert!(Parser::new(&tokens).parse_pair_operation().is_no_match());
    }
}
