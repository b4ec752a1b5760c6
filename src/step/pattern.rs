// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`StepPattern`]s step texts are matched against.

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use derive_more::with_trait::{Debug, Display};
use lazy_regex::regex;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PatternError;

/// Pattern of a [`StepCandidate`], compiled into a [`Regex`].
///
/// Implements [`Eq`], [`Ord`] and [`Hash`] by its compiled [`Regex`] source.
///
/// [`StepCandidate`]: super::StepCandidate
#[derive(Clone, Debug, Display)]
#[display("{template}")]
pub struct StepPattern {
    /// Pattern as it was given.
    template: String,

    /// Compiled form of the `template`.
    #[debug(skip)]
    regex: Regex,
}

impl StepPattern {
    /// Parses a pattern with `$name` placeholders, like
    /// `a variable x with value $value`.
    ///
    /// Each placeholder matches any text (line breaks included), the rest of
    /// the template matches literally, and the whole step text must match.
    ///
    /// # Errors
    ///
    /// If the resulting [`Regex`] exceeds the size limits.
    pub fn parse(template: impl Into<String>) -> Result<Self, PatternError> {
        /// [`Regex`] matching `$name` placeholders.
        static PLACEHOLDER: &Lazy<Regex> = regex!(r"\$\w+");

        let template = template.into();
        let mut source = String::from("(?s)^");
        let mut last = 0;
        for m in PLACEHOLDER.find_iter(&template) {
            source.push_str(&regex::escape(&template[last..m.start()]));
            source.push_str("(.*)");
            last = m.end();
        }
        source.push_str(&regex::escape(&template[last..]));
        source.push('$');

        Self::compile(template, &source)
    }

    /// Uses the given `pattern` as a [`Regex`] as is.
    ///
    /// # Errors
    ///
    /// If the `pattern` is not a valid [`Regex`].
    pub fn regex(pattern: impl Into<String>) -> Result<Self, PatternError> {
        let pattern = pattern.into();
        let source = pattern.clone();
        Self::compile(pattern, &source)
    }

    fn compile(template: String, source: &str) -> Result<Self, PatternError> {
        match Regex::new(source) {
            Ok(regex) => Ok(Self { template, regex }),
            Err(source) => Err(PatternError {
                pattern: template,
                source,
            }),
        }
    }

    /// Returns the pattern as it was given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Returns the compiled [`Regex`].
    #[must_use]
    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    /// Indicates whether the given step `text` (without its starting word)
    /// matches this [`StepPattern`].
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl Hash for StepPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.regex.as_str().hash(state);
    }
}

impl PartialEq for StepPattern {
    fn eq(&self, other: &Self) -> bool {
        self.regex.as_str() == other.regex.as_str()
    }
}

impl Eq for StepPattern {}

impl PartialOrd for StepPattern {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StepPattern {
    fn cmp(&self, other: &Self) -> Ordering {
        self.regex.as_str().cmp(other.regex.as_str())
    }
}
