// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Configuration`] of description tree building.

use smart_default::SmartDefault;

use crate::{keywords::Keywords, label::LabelPolicy};

/// Prefixes under which [`Story`] and [`Scenario`] self-views are exposed as
/// [`Meta`] tags.
///
/// [`Meta`]: crate::Meta
/// [`Scenario`]: crate::Scenario
/// [`Story`]: crate::Story
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StoryControls {
    /// Prefix of [`Story::as_meta()`] tags.
    ///
    /// [`Story::as_meta()`]: crate::Story::as_meta
    pub story_meta_prefix: String,

    /// Prefix of [`Scenario::as_meta()`] tags.
    ///
    /// [`Scenario::as_meta()`]: crate::Scenario::as_meta
    pub scenario_meta_prefix: String,
}

impl StoryControls {
    /// Sets the [`StoryControls::story_meta_prefix`].
    #[must_use]
    pub fn with_story_meta_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.story_meta_prefix = prefix.into();
        self
    }

    /// Sets the [`StoryControls::scenario_meta_prefix`].
    #[must_use]
    pub fn with_scenario_meta_prefix(
        mut self,
        prefix: impl Into<String>,
    ) -> Self {
        self.scenario_meta_prefix = prefix.into();
        self
    }
}

/// Everything a [`DescriptionGenerator`] reads besides the stories, step
/// candidates and the meta filter.
///
/// [`DescriptionGenerator`]: crate::DescriptionGenerator
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct Configuration {
    /// Starting words used to classify steps.
    pub keywords: Keywords,

    /// Meta prefixes.
    pub story_controls: StoryControls,

    /// Label sanitizing rules.
    pub labels: LabelPolicy,

    /// Label of the root suite of a multi-story plan.
    #[default = "Stories"]
    pub root_label: String,

    /// Label of the leaf preceding all stories of a plan.
    #[default = "BeforeStories"]
    pub before_stories_label: String,

    /// Label of the leaf following all stories of a plan.
    #[default = "AfterStories"]
    pub after_stories_label: String,
}

impl Configuration {
    /// Sets the [`Keywords`].
    #[must_use]
    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = keywords;
        self
    }

    /// Sets the [`StoryControls`].
    #[must_use]
    pub fn with_story_controls(mut self, controls: StoryControls) -> Self {
        self.story_controls = controls;
        self
    }

    /// Sets the [`LabelPolicy`].
    #[must_use]
    pub fn with_labels(mut self, labels: LabelPolicy) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the [`Configuration::root_label`].
    #[must_use]
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }
}
