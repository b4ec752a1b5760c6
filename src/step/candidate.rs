// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`StepCandidate`]s step texts are resolved to.

use crate::{
    error::PatternError,
    keywords::{Keywords, StepType},
};

use super::{location::Location, pattern::StepPattern};

/// Known step definition, possibly composed of other steps.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StepCandidate {
    /// [`StepType`] this candidate is registered for.
    ty: StepType,

    /// [`StepPattern`] of the step text (without starting word).
    pattern: StepPattern,

    /// Raw texts of the composed steps, if this candidate is composite.
    composed: Option<Vec<String>>,

    /// Where this candidate was registered.
    location: Option<Location>,
}

impl StepCandidate {
    /// Creates a new [`StepCandidate`] out of an already built
    /// [`StepPattern`].
    #[must_use]
    pub fn new(ty: StepType, pattern: StepPattern) -> Self {
        Self {
            ty,
            pattern,
            composed: None,
            location: None,
        }
    }

    /// Creates a new [`StepCandidate`] parsing the `template` with
    /// [`StepPattern::parse()`], located at the caller.
    ///
    /// # Errors
    ///
    /// See [`StepPattern::parse()`].
    #[track_caller]
    pub fn of(ty: StepType, template: &str) -> Result<Self, PatternError> {
        let location = Location::caller();
        Ok(Self::new(ty, StepPattern::parse(template)?).at(location))
    }

    /// Shortcut for [`StepCandidate::of`]`(`[`StepType::Given`]`, ..)`.
    ///
    /// # Errors
    ///
    /// See [`StepPattern::parse()`].
    #[track_caller]
    pub fn given(template: &str) -> Result<Self, PatternError> {
        Self::of(StepType::Given, template)
    }

    /// Shortcut for [`StepCandidate::of`]`(`[`StepType::When`]`, ..)`.
    ///
    /// # Errors
    ///
    /// See [`StepPattern::parse()`].
    #[track_caller]
    pub fn when(template: &str) -> Result<Self, PatternError> {
        Self::of(StepType::When, template)
    }

    /// Shortcut for [`StepCandidate::of`]`(`[`StepType::Then`]`, ..)`.
    ///
    /// # Errors
    ///
    /// See [`StepPattern::parse()`].
    #[track_caller]
    pub fn then(template: &str) -> Result<Self, PatternError> {
        Self::of(StepType::Then, template)
    }

    /// Makes this [`StepCandidate`] composite, expanding into the given raw
    /// step texts.
    #[must_use]
    pub fn composed_of<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.composed = Some(steps.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the [`Location`] of this [`StepCandidate`].
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns the [`StepType`] of this [`StepCandidate`].
    #[must_use]
    pub fn step_type(&self) -> StepType {
        self.ty
    }

    /// Returns the [`StepPattern`] of this [`StepCandidate`].
    #[must_use]
    pub fn pattern(&self) -> &StepPattern {
        &self.pattern
    }

    /// Returns the [`Location`] of this [`StepCandidate`], if known.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Indicates whether this [`StepCandidate`] expands into other steps.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.composed.is_some()
    }

    /// Returns the raw texts of the composed steps (empty if this
    /// [`StepCandidate`] is not composite).
    #[must_use]
    pub fn composed_steps(&self) -> &[String] {
        self.composed.as_deref().unwrap_or_default()
    }

    /// Returns the canonical starting word of this [`StepCandidate`].
    #[must_use]
    pub fn starting_word<'k>(&self, keywords: &'k Keywords) -> &'k str {
        keywords.starting_word(self.ty)
    }

    /// Indicates whether the given `step` text matches this
    /// [`StepCandidate`].
    ///
    /// A [`StepType::And`] text matches only when the `previous_non_and` step
    /// type is this candidate's one. Any other text has to start with this
    /// candidate's starting word. In both cases, the text remaining after the
    /// starting word has to match the [`StepPattern`].
    #[must_use]
    pub fn matches(
        &self,
        step: &str,
        previous_non_and: Option<StepType>,
        keywords: &Keywords,
    ) -> bool {
        let rest = match keywords.strip_starting_word(step, StepType::And) {
            Some(rest) if self.ty != StepType::And => {
                if previous_non_and != Some(self.ty) {
                    return false;
                }
                rest
            }
            _ => match keywords.strip_starting_word(step, self.ty) {
                Some(rest) => rest,
                None => return false,
            },
        };
        self.pattern.is_match(rest)
    }
}
