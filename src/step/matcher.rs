// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Resolution of raw step texts against [`StepCandidate`]s.

use tracing::trace;

use crate::{
    error::StartingWordNotFound,
    keywords::{Keywords, StepType},
};

use super::candidate::StepCandidate;

/// Outcome of resolving a raw step text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution<'c> {
    /// Text matches the [`StepCandidate`].
    Matched(&'c StepCandidate),

    /// Text matches no [`StepCandidate`], but starts with an ignorable word.
    Ignorable,

    /// Text matches no [`StepCandidate`]: nothing implements it yet.
    Pending,

    /// Text matches no [`StepCandidate`] and starts with no known word at
    /// all.
    ///
    /// Such steps are dropped from the description altogether.
    Unclassifiable(StartingWordNotFound),
}

/// State carried across the steps of a single step list.
///
/// A fresh one must be used for every step list (a scenario body, every
/// example row, every composite step expansion).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MatchContext {
    previous_non_and: Option<StepType>,
}

impl MatchContext {
    /// Returns the [`StepType`] of the last matched non-[`StepType::And`]
    /// step, which [`StepType::And`] steps resolve against.
    #[must_use]
    pub fn previous_non_and(&self) -> Option<StepType> {
        self.previous_non_and
    }
}

/// Resolves raw step texts against [`StepCandidate`]s in their registration
/// order: the first matching one wins.
#[derive(Clone, Copy, Debug)]
pub struct StepMatcher<'c> {
    candidates: &'c [StepCandidate],
    keywords: &'c Keywords,
}

impl<'c> StepMatcher<'c> {
    /// Creates a new [`StepMatcher`] over the given `candidates`.
    #[must_use]
    pub fn new(candidates: &'c [StepCandidate], keywords: &'c Keywords) -> Self {
        Self {
            candidates,
            keywords,
        }
    }

    /// Returns the first [`StepCandidate`] matching the `step` text, if any.
    ///
    /// Matching a non-[`StepType::And`] candidate remembers its type in the
    /// `ctx`, for the following [`StepType::And`] steps to resolve against.
    pub fn find_match(
        &self,
        step: &str,
        ctx: &mut MatchContext,
    ) -> Option<&'c StepCandidate> {
        let found = self
            .candidates
            .iter()
            .find(|c| c.matches(step, ctx.previous_non_and, self.keywords))?;
        if found.step_type() != StepType::And {
            ctx.previous_non_and = Some(found.step_type());
        }
        Some(found)
    }

    /// Resolves the `step` text into a [`Resolution`].
    pub fn resolve(&self, step: &str, ctx: &mut MatchContext) -> Resolution<'c> {
        let resolution = if let Some(found) = self.find_match(step, ctx) {
            Resolution::Matched(found)
        } else {
            match self.keywords.step_type_for(step) {
                Ok(StepType::Ignorable) => Resolution::Ignorable,
                Ok(_) => Resolution::Pending,
                Err(e) => Resolution::Unclassifiable(e),
            }
        };
        trace!(step, ?resolution, "resolved step");
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<StepCandidate> {
        vec![
            StepCandidate::given("a").unwrap(),
            StepCandidate::given("b").unwrap(),
            StepCandidate::when("c").unwrap(),
            StepCandidate::when("b").unwrap(),
            StepCandidate::then("$anything").unwrap(),
            StepCandidate::then("specific").unwrap(),
        ]
    }

    #[test]
    fn and_resolves_against_previous_non_and() {
        let (cands, kw) = (candidates(), Keywords::default());
        let matcher = StepMatcher::new(&cands, &kw);
        let mut ctx = MatchContext::default();

        let a = matcher.find_match("Given a", &mut ctx).unwrap();
        assert_eq!(a, &cands[0]);
        let b = matcher.find_match("And b", &mut ctx).unwrap();
        assert_eq!(b, &cands[1]);
        assert_eq!(b.step_type(), StepType::Given);
        assert_eq!(ctx.previous_non_and(), Some(StepType::Given));

        _ = matcher.find_match("When c", &mut ctx).unwrap();
        let b = matcher.find_match("And b", &mut ctx).unwrap();
        assert_eq!(b, &cands[3]);
    }

    #[test]
    fn first_match_wins() {
        let (cands, kw) = (candidates(), Keywords::default());
        let matcher = StepMatcher::new(&cands, &kw);

        let found = matcher
            .find_match("Then specific", &mut MatchContext::default())
            .unwrap();

        assert_eq!(found, &cands[4]);
    }

    #[test]
    fn leading_and_matches_nothing() {
        let (cands, kw) = (candidates(), Keywords::default());
        let matcher = StepMatcher::new(&cands, &kw);

        assert_eq!(
            matcher.resolve("And a", &mut MatchContext::default()),
            Resolution::Pending,
        );
    }

    #[test]
    fn unmatched_steps_are_classified() {
        let (cands, kw) = (candidates(), Keywords::default());
        let matcher = StepMatcher::new(&cands, &kw);
        let mut ctx = MatchContext::default();

        assert_eq!(matcher.resolve("Given z", &mut ctx), Resolution::Pending);
        assert_eq!(matcher.resolve("!-- z", &mut ctx), Resolution::Ignorable);
        assert_eq!(
            matcher.resolve("Whatever z", &mut ctx),
            Resolution::Unclassifiable(StartingWordNotFound {
                step: "Whatever z".into(),
            }),
        );
        assert_eq!(ctx, MatchContext::default());
    }
}
