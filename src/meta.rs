// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Meta`] tag sets and their story to scenario inheritance.

use std::collections::{btree_map, BTreeMap};

use derive_more::with_trait::{AsRef, Deref, From};

use crate::{
    config::StoryControls,
    story::{Scenario, Story},
};

/// Set of meta tags: names mapped to optional values.
///
/// Written as `@name value` in stories, e.g. `@author Alice @skip`.
#[derive(AsRef, Clone, Debug, Default, Deref, Eq, From, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Meta(BTreeMap<String, Option<String>>);

impl Meta {
    /// Creates an empty [`Meta`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `@name value` notation.
    ///
    /// Everything following a name up to the next `@` is its value, with
    /// whitespace collapsed. A name without any words after it has no value.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        input
            .split('@')
            .filter_map(|chunk| {
                let mut words = chunk.split_whitespace();
                let name = words.next()?;
                let value = words.collect::<Vec<_>>().join(" ");
                Some((name.to_owned(), (!value.is_empty()).then_some(value)))
            })
            .collect()
    }

    /// Adds a tag with the given `name` and optional `value`.
    #[must_use]
    pub fn with<V: Into<String>>(
        mut self,
        name: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a tag, replacing a previous one with the same `name`.
    pub fn insert<V: Into<String>>(
        &mut self,
        name: impl Into<String>,
        value: Option<V>,
    ) {
        _ = self.0.insert(name.into(), value.map(Into::into));
    }

    /// Returns the value of the tag `name`, if it's present and has one.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Option::as_deref)
    }

    /// Iterates over the tag names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> + Clone {
        self.0.keys().map(String::as_str)
    }

    /// Overlays these tags over the `parent` ones.
    ///
    /// A name present in both keeps the value of `self`.
    #[must_use]
    pub fn inherit_from(&self, parent: &Self) -> Self {
        let mut merged = parent.0.clone();
        merged.extend(self.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(merged)
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for Meta
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        )
    }
}

impl<'m> IntoIterator for &'m Meta {
    type Item = (&'m String, &'m Option<String>);
    type IntoIter = btree_map::Iter<'m, String, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Effective [`Meta`] of a [`Story`]: its own tags overlaid on its
/// self-view under `controls.story_meta_prefix`.
#[must_use]
pub fn story_meta(story: &Story, controls: &StoryControls) -> Meta {
    story
        .meta
        .inherit_from(&story.as_meta(&controls.story_meta_prefix))
}

/// Effective [`Meta`] of a [`Scenario`], given the already computed
/// [`story_meta()`] of its [`Story`].
///
/// Own tags win over the scenario self-view (under
/// `controls.scenario_meta_prefix`), which wins over `story_meta`.
#[must_use]
pub fn scenario_meta(
    story_meta: &Meta,
    scenario: &Scenario,
    controls: &StoryControls,
) -> Meta {
    scenario.meta.inherit_from(
        &scenario
            .as_meta(&controls.scenario_meta_prefix)
            .inherit_from(story_meta),
    )
}

/// Shortcut computing [`scenario_meta()`] straight from the [`Story`].
#[must_use]
pub fn effective_meta(
    story: &Story,
    scenario: &Scenario,
    controls: &StoryControls,
) -> Meta {
    scenario_meta(&story_meta(story, controls), scenario, controls)
}
