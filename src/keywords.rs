// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Starting [`Keywords`] of steps and classification of step texts by them.

use derive_more::with_trait::Display;
use smart_default::SmartDefault;

use crate::error::StartingWordNotFound;

/// Type of a step, as determined by its starting word.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum StepType {
    /// Sets up preconditions.
    Given,

    /// Performs an action.
    When,

    /// Asserts an outcome.
    Then,

    /// Continues the previous non-[`StepType::And`] step.
    And,

    /// Commented out step, described but never run.
    Ignorable,
}

impl StepType {
    /// All the [`StepType`]s, in the order step texts are classified with.
    pub const ALL: [Self; 5] =
        [Self::Given, Self::When, Self::Then, Self::And, Self::Ignorable];
}

/// Starting words of every [`StepType`].
///
/// Each type may have several synonyms; the first one is canonical.
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct Keywords {
    #[default(_code = "vec![\"Given\".into()]")]
    given: Vec<String>,

    #[default(_code = "vec![\"When\".into()]")]
    when: Vec<String>,

    #[default(_code = "vec![\"Then\".into()]")]
    then: Vec<String>,

    #[default(_code = "vec![\"And\".into()]")]
    and: Vec<String>,

    #[default(_code = "vec![\"!--\".into()]")]
    ignorable: Vec<String>,
}

impl Keywords {
    /// Replaces the starting words of the given [`StepType`].
    ///
    /// Empty `words` leave the current ones in place, so a type never ends
    /// up without a canonical word.
    #[must_use]
    pub fn with_words<I, S>(mut self, ty: StepType, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words.into_iter().map(Into::into).collect::<Vec<_>>();
        if !words.is_empty() {
            *self.words_mut(ty) = words;
        }
        self
    }

    /// Returns all the starting words of the given [`StepType`].
    #[must_use]
    pub fn words(&self, ty: StepType) -> &[String] {
        match ty {
            StepType::Given => &self.given,
            StepType::When => &self.when,
            StepType::Then => &self.then,
            StepType::And => &self.and,
            StepType::Ignorable => &self.ignorable,
        }
    }

    fn words_mut(&mut self, ty: StepType) -> &mut Vec<String> {
        match ty {
            StepType::Given => &mut self.given,
            StepType::When => &mut self.when,
            StepType::Then => &mut self.then,
            StepType::And => &mut self.and,
            StepType::Ignorable => &mut self.ignorable,
        }
    }

    /// Returns the canonical starting word of the given [`StepType`].
    #[must_use]
    pub fn starting_word(&self, ty: StepType) -> &str {
        self.words(ty).first().map_or("", String::as_str)
    }

    /// Classifies the given `step` text by its starting word.
    ///
    /// # Errors
    ///
    /// If the `step` starts with none of these [`Keywords`].
    pub fn step_type_for(
        &self,
        step: &str,
    ) -> Result<StepType, StartingWordNotFound> {
        StepType::ALL
            .into_iter()
            .find(|ty| self.strip_starting_word(step, *ty).is_some())
            .ok_or_else(|| StartingWordNotFound { step: step.to_owned() })
    }

    /// Strips a starting word of the given [`StepType`] off the `step` text,
    /// returning the remainder without leading whitespace.
    ///
    /// Words must be followed by whitespace or end the text, except
    /// [`StepType::Ignorable`] ones, which are plain prefixes.
    #[must_use]
    pub fn strip_starting_word<'s>(
        &self,
        step: &'s str,
        ty: StepType,
    ) -> Option<&'s str> {
        let step = step.trim_start();
        self.words(ty).iter().find_map(|word| {
            let rest = step.strip_prefix(word.as_str())?;
            (ty == StepType::Ignorable
                || rest.is_empty()
                || rest.starts_with(char::is_whitespace))
            .then(|| rest.trim_start())
        })
    }
}
