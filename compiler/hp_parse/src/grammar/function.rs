//! Specific functions, functions and vector merge operations.

use hp_ir::{Function, SpecificFunction, VectorMergeOperation};
use hp_stack::ensure_sufficient_stack;

use crate::{
    chain, one_of, require, ErrorContext, Expected, ExpectedSet, ParseError, ParseOutcome, Parser,
};

/// Tokens a function may not contain anywhere in its subtree.
const FORBIDDEN_IN_FUNCTION: &[&str] = &["log2dbl"];

impl Parser<'_> {
    /// `<Operation> <SpecificFunction> | combine <Pair> <SpecificFunction>
    /// <SpecificFunction> | identity | constant <Constant>`
    pub(crate) fn parse_specific_function(&mut self) -> ParseOutcome<SpecificFunction> {
        ensure_sufficient_stack(|| {
            one_of!(
                self,
                self.operated_specific_function(),
                self.combined_specific_function(),
                self.direct_specific_function(),
            )
        })
    }

    fn operated_specific_function(&mut self) -> ParseOutcome<SpecificFunction> {
        let operation = chain!(self.parse_operation());
        let inner = require!(
            self,
            self.parse_specific_function(),
            ErrorContext::SpecificFunction
        );
        ParseOutcome::matched(SpecificFunction::Operated(operation, Box::new(inner)))
    }

    fn combined_specific_function(&mut self) -> ParseOutcome<SpecificFunction> {
        chain!(self.keyword("combine", Expected::SpecificFunction));
        let op = require!(
            self,
            self.parse_pair_operation(),
            ErrorContext::SpecificFunction
        );
        let left = require!(
            self,
            self.parse_specific_function(),
            ErrorContext::SpecificFunction
        );
        let right = require!(
            self,
            self.parse_specific_function(),
            ErrorContext::SpecificFunction
        );
        ParseOutcome::matched(SpecificFunction::Combine(op, Box::new(left), Box::new(right)))
    }

    fn direct_specific_function(&mut self) -> ParseOutcome<SpecificFunction> {
        let position = self.position();
        if self.cursor.eat("identity") {
            return ParseOutcome::matched(SpecificFunction::Identity);
        }
        if self.cursor.eat("constant") {
            let constant = require!(self, self.parse_constant(), ErrorContext::SpecificFunction);
            return ParseOutcome::matched(SpecificFunction::Constant(constant));
        }
        ParseOutcome::no_match(ExpectedSet::single(Expected::SpecificFunction), position)
    }

    /// A function tree.
    ///
    /// A successful parse whose tokens include a forbidden token (`log2dbl`)
    /// is turned into `Malformed`.
    pub(crate) fn parse_function(&mut self) -> ParseOutcome<Function> {
        let start = self.position();
        let outcome = ensure_sufficient_stack(|| {
            one_of!(
                self,
                self.operated_function(),
                self.standard_function(),
                self.combined_function(),
                self.merged_function(),
                self.constant_function(),
            )
        });
        if outcome.is_ok() {
            let consumed = self.cursor.consumed_since(start);
            if let Some((offset, token)) = consumed
                .iter()
                .enumerate()
                .find(|(_, token)| FORBIDDEN_IN_FUNCTION.contains(&token.as_str()))
            {
                tracing::debug!(token = %token, "forbidden token in function");
                return ParseOutcome::malformed(ParseError::forbidden_in_function(
                    token,
                    start + offset,
                ));
            }
        }
        outcome
    }

    fn operated_function(&mut self) -> ParseOutcome<Function> {
        let operation = chain!(self.parse_operation());
        let inner = require!(self, self.parse_function(), ErrorContext::Function);
        ParseOutcome::matched(Function::Operated(operation, Box::new(inner)))
    }

    fn combined_function(&mut self) -> ParseOutcome<Function> {
        chain!(self.keyword("combine", Expected::Function));
        let op = require!(self, self.parse_pair_operation(), ErrorContext::Function);
        let left = require!(self, self.parse_function(), ErrorContext::Function);
        let right = require!(self, self.parse_function(), ErrorContext::Function);
        ParseOutcome::matched(Function::Combine(op, Box::new(left), Box::new(right)))
    }

    fn merged_function(&mut self) -> ParseOutcome<Function> {
        chain!(self.keyword("merge", Expected::Function));
        let merge = require!(
            self,
            self.parse_vector_merge_operation(),
            ErrorContext::Function
        );
        let specific = require!(self, self.parse_specific_function(), ErrorContext::Function);
        ParseOutcome::matched(Function::Merge(merge, specific))
    }

    fn constant_function(&mut self) -> ParseOutcome<Function> {
        chain!(self.keyword("constant", Expected::Function));
        let constant = require!(self, self.parse_constant(), ErrorContext::Function);
        ParseOutcome::matched(Function::Constant(constant))
    }

    /// A reduction of a vector to one value.
    pub(crate) fn parse_vector_merge_operation(&mut self) -> ParseOutcome<VectorMergeOperation> {
        let position = self.position();
        if self.cursor.eat("specific") {
            let index = require!(self, self.parse_i32(), ErrorContext::MergeOperation);
            return ParseOutcome::matched(VectorMergeOperation::Specific(index));
        }
        if self.cursor.eat("increasingOrderNthObject") {
            let index = require!(self, self.parse_i32(), ErrorContext::MergeOperation);
            return ParseOutcome::matched(VectorMergeOperation::IncreasingOrderNth(index));
        }
        if self.cursor.eat("functionEvaluation") {
            let function = require!(self, self.parse_function(), ErrorContext::MergeOperation);
            return ParseOutcome::matched(VectorMergeOperation::FunctionEvaluation(Box::new(
                function,
            )));
        }
        match self.cursor.current().and_then(VectorMergeOperation::from_keyword) {
            Some(merge) => {
                self.cursor.advance();
                ParseOutcome::matched(merge)
            }
            None => ParseOutcome::no_match(ExpectedSet::single(Expected::MergeOperation), position),
        }
    }
}
