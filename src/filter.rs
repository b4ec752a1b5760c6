// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`MetaFilter`]s deciding which stories and scenarios are described.

use std::{fmt, str::FromStr};

use gherkin::tagexpr::TagOperation;
use itertools::Itertools as _;
use regex::Regex;

use crate::{
    config::StoryControls,
    error::MetaFilterError,
    meta::{self, Meta},
    story::{Scenario, Story},
};

/// Predicate over effective [`Meta`] tags.
pub trait MetaFilter {
    /// Indicates whether the given `meta` is allowed.
    fn allow(&self, meta: &Meta) -> bool;
}

impl<F: Fn(&Meta) -> bool> MetaFilter for F {
    fn allow(&self, meta: &Meta) -> bool {
        self(meta)
    }
}

/// [`MetaFilter`] allowing everything.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AllowAll;

impl MetaFilter for AllowAll {
    fn allow(&self, _: &Meta) -> bool {
        true
    }
}

/// Any of the [`MetaFilter`]s configurable from the command line.
#[derive(Clone, Debug, Default)]
pub enum Filter {
    /// [`AllowAll`].
    #[default]
    All,

    /// [`MetaExpression`].
    Meta(MetaExpression),

    /// [`gherkin`] tag expression.
    Tags(TagOperation),
}

impl MetaFilter for Filter {
    fn allow(&self, meta: &Meta) -> bool {
        match self {
            Self::All => AllowAll.allow(meta),
            Self::Meta(expr) => expr.allow(meta),
            Self::Tags(op) => op.allow(meta),
        }
    }
}

/// Single `+name value` or `-name value` clause of a [`MetaExpression`].
#[derive(Clone, Debug)]
struct Clause {
    name: String,
    value: Option<String>,

    /// Compiled form of a `value` containing `*` wildcards.
    wildcard: Option<Regex>,
}

impl Clause {
    fn new(name: String, words: &[&str]) -> Self {
        let value = (!words.is_empty()).then(|| words.join(" "));
        let wildcard = value.as_deref().filter(|v| v.contains('*')).and_then(|v| {
            let source = v.split('*').map(regex::escape).join(".*");
            Regex::new(&format!("^{source}$")).ok()
        });
        Self {
            name,
            value,
            wildcard,
        }
    }

    fn matches(&self, meta: &Meta) -> bool {
        if !meta.contains_key(&self.name) {
            return false;
        }
        let actual = meta.value(&self.name).unwrap_or_default();
        match (&self.value, &self.wildcard) {
            (None, _) => true,
            (Some(_), Some(re)) => re.is_match(actual),
            (Some(expected), None) => expected == actual,
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(value) = &self.value {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}

/// [`MetaFilter`] written as whitespace separated `+name [value]` (include)
/// and `-name [value]` (exclude) clauses, e.g. `+theme smoke -skip`.
///
/// A clause without a value matches any [`Meta`] having the name. A value
/// may contain `*` wildcards. With only includes, any of them has to match;
/// with only excludes, none of them may match; with both, both conditions
/// apply. No clauses at all allow everything.
#[derive(Clone, Debug, Default)]
pub struct MetaExpression {
    include: Vec<Clause>,
    exclude: Vec<Clause>,
}

impl MetaExpression {
    /// Indicates whether this [`MetaExpression`] has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

impl MetaFilter for MetaExpression {
    fn allow(&self, meta: &Meta) -> bool {
        let included = || self.include.iter().any(|c| c.matches(meta));
        let excluded = || self.exclude.iter().any(|c| c.matches(meta));
        match (self.include.is_empty(), self.exclude.is_empty()) {
            (true, true) => true,
            (false, true) => included(),
            (true, false) => !excluded(),
            (false, false) => included() && !excluded(),
        }
    }
}

impl FromStr for MetaExpression {
    type Err = MetaFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut expr = Self::default();
        let mut words = s.split_whitespace().peekable();
        while let Some(word) = words.next() {
            let (include, name) = if let Some(name) = word.strip_prefix('+') {
                (true, name)
            } else if let Some(name) = word.strip_prefix('-') {
                (false, name)
            } else {
                return Err(MetaFilterError::DanglingValue {
                    token: word.to_owned(),
                });
            };
            if name.is_empty() {
                return Err(MetaFilterError::MissingName {
                    clause: word.to_owned(),
                });
            }
            let mut value = Vec::new();
            while let Some(w) =
                words.next_if(|w| !w.starts_with('+') && !w.starts_with('-'))
            {
                value.push(w);
            }
            let clause = Clause::new(name.to_owned(), &value);
            if include {
                expr.include.push(clause);
            } else {
                expr.exclude.push(clause);
            }
        }
        Ok(expr)
    }
}

impl fmt::Display for MetaExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let include = self.include.iter().map(|c| format!("+{c}"));
        let exclude = self.exclude.iter().map(|c| format!("-{c}"));
        write!(f, "{}", include.chain(exclude).join(" "))
    }
}

/// Indicates whether the `filter` allows the effective [`Meta`] of the
/// `story` itself.
#[must_use]
pub fn story_allowed<F: MetaFilter + ?Sized>(
    filter: &F,
    story: &Story,
    controls: &StoryControls,
) -> bool {
    filter.allow(&meta::story_meta(story, controls))
}

/// Indicates whether the `filter` allows the effective [`Meta`] of the
/// `scenario`, given the already computed effective `story_meta`.
#[must_use]
pub fn scenario_allowed<F: MetaFilter + ?Sized>(
    filter: &F,
    story_meta: &Meta,
    scenario: &Scenario,
    controls: &StoryControls,
) -> bool {
    filter.allow(&meta::scenario_meta(story_meta, scenario, controls))
}

/// Indicates whether the `filter` allows at least one [`Scenario`] of the
/// `story`.
#[must_use]
pub fn story_has_allowed_scenario<F: MetaFilter + ?Sized>(
    filter: &F,
    story: &Story,
    controls: &StoryControls,
) -> bool {
    let story_meta = meta::story_meta(story, controls);
    story
        .scenarios
        .iter()
        .any(|sc| scenario_allowed(filter, &story_meta, sc, controls))
}
