//! Specific statistics and statistics.

use hp_ir::{Float, MergeAxis, SpecificStatistic, Statistic};
use hp_stack::ensure_sufficient_stack;

use crate::{chain, one_of, require, ErrorContext, Expected, ExpectedSet, ParseOutcome, Parser};

impl Parser<'_> {
    /// A statistic over the whole swarm.
    pub(crate) fn parse_statistic(&mut self) -> ParseOutcome<Statistic> {
        ensure_sufficient_stack(|| {
            one_of!(
                self,
                self.combined_statistic(),
                self.operated_statistic(),
                self.merged_statistic(),
                self.direct_statistic(),
            )
        })
    }

    fn combined_statistic(&mut self) -> ParseOutcome<Statistic> {
        chain!(self.keyword("combine", Expected::Statistic));
        let op = require!(self, self.parse_pair_operation(), ErrorContext::Statistic);
        let left = require!(self, self.parse_statistic(), ErrorContext::Statistic);
        let right = require!(self, self.parse_statistic(), ErrorContext::Statistic);
        ParseOutcome::matched(Statistic::Combine(op, Box::new(left), Box::new(right)))
    }

    fn operated_statistic(&mut self) -> ParseOutcome<Statistic> {
        let operation = chain!(self.parse_operation());
        let inner = require!(self, self.parse_statistic(), ErrorContext::Statistic);
        ParseOutcome::matched(Statistic::Operated(operation, Box::new(inner)))
    }

    fn merged_statistic(&mut self) -> ParseOutcome<Statistic> {
        chain!(self.keyword("merge", Expected::Statistic));
        let axis = require!(self, self.parse_merge_axis(), ErrorContext::Statistic);
        let operation = require!(
            self,
            self.parse_vector_merge_operation(),
            ErrorContext::Statistic
        );
        let source = require!(self, self.parse_specific_statistic(), ErrorContext::Statistic);
        ParseOutcome::matched(Statistic::Merge {
            axis,
            operation,
            source,
        })
    }

    fn parse_merge_axis(&mut self) -> ParseOutcome<MergeAxis> {
        let position = self.position();
        if self.cursor.eat("particle") {
            ParseOutcome::matched(MergeAxis::Particle)
        } else if self.cursor.eat("dimension") {
            ParseOutcome::matched(MergeAxis::Dimension)
        } else {
            ParseOutcome::no_match(ExpectedSet::single(Expected::MergeAxis), position)
        }
    }

    fn direct_statistic(&mut self) -> ParseOutcome<Statistic> {
        let position = self.position();
        if self.cursor.eat("constant") {
            let dimensions = require!(self, self.parse_i32(), ErrorContext::Statistic);
            let value = require!(self, self.parse_constant(), ErrorContext::Statistic);
            return ParseOutcome::matched(Statistic::Constant { dimensions, value });
        }
        match self.cursor.current().and_then(Statistic::from_keyword) {
            Some(statistic) => {
                self.cursor.advance();
                ParseOutcome::matched(statistic)
            }
            None => ParseOutcome::no_match(ExpectedSet::single(Expected::Statistic), position),
        }
    }

    /// A statistic with one value per particle and dimension.
    pub(crate) fn parse_specific_statistic(&mut self) -> ParseOutcome<SpecificStatistic> {
        ensure_sufficient_stack(|| {
            one_of!(
                self,
                self.combined_specific_statistic(),
                self.operated_specific_statistic(),
                self.direct_specific_statistic(),
            )
        })
    }

    fn combined_specific_statistic(&mut self) -> ParseOutcome<SpecificStatistic> {
        chain!(self.keyword("combine", Expected::SpecificStatistic));
        let context = ErrorContext::SpecificStatistic;
        let op = require!(self, self.parse_pair_operation(), context);
        let left = require!(self, self.parse_specific_statistic(), context);
        let right = require!(self, self.parse_specific_statistic(), context);
        ParseOutcome::matched(SpecificStatistic::Combine(op, Box::new(left), Box::new(right)))
    }

    fn operated_specific_statistic(&mut self) -> ParseOutcome<SpecificStatistic> {
        let operation = chain!(self.parse_operation());
        let inner = require!(
            self,
            self.parse_specific_statistic(),
            ErrorContext::SpecificStatistic
        );
        ParseOutcome::matched(SpecificStatistic::Operated(operation, Box::new(inner)))
    }

    fn direct_specific_statistic(&mut self) -> ParseOutcome<SpecificStatistic> {
        let position = self.position();
        let context = ErrorContext::SpecificStatistic;
        if self.cursor.eat("absVelocityPlusDistToGlobalAttractor") {
            let scale = require!(self, self.parse_f64(), context);
            return ParseOutcome::matched(SpecificStatistic::AbsVelocityPlusDistToGlobalAttractor(
                Float::new(scale),
            ));
        }
        if self.cursor.eat("sqrtAbsVelocityPlusSqrtDistToGlobalAttractor") {
            let scale = require!(self, self.parse_f64(), context);
            return ParseOutcome::matched(
                SpecificStatistic::SqrtAbsVelocityPlusSqrtDistToGlobalAttractor(Float::new(scale)),
            );
        }
        if self.cursor.eat("constant") {
            let constant = require!(self, self.parse_constant(), context);
            return ParseOutcome::matched(SpecificStatistic::Constant(constant));
        }
        match self.cursor.current().and_then(SpecificStatistic::from_keyword) {
            Some(specific) => {
                self.cursor.advance();
                ParseOutcome::matched(specific)
            }
            None => {
                ParseOutcome::no_match(ExpectedSet::single(Expected::SpecificStatistic), position)
            }
        }
    }
}
