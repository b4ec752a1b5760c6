// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`FilteredStory`] definitions.

use crate::{
    config::StoryControls,
    filter::{self, MetaFilter},
    meta,
    story::Story,
};

/// Filtering verdicts of a [`Story`] and each of its scenarios, computed once.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilteredStory {
    story_allowed: bool,
    scenarios_allowed: Vec<bool>,
}

impl FilteredStory {
    /// Applies the `filter` to the `story` and each of its scenarios.
    #[must_use]
    pub fn new<F: MetaFilter + ?Sized>(
        filter: &F,
        story: &Story,
        controls: &StoryControls,
    ) -> Self {
        let story_meta = meta::story_meta(story, controls);
        let scenarios_allowed = story
            .scenarios
            .iter()
            .map(|sc| filter::scenario_allowed(filter, &story_meta, sc, controls))
            .collect();
        Self {
            story_allowed: filter.allow(&story_meta),
            scenarios_allowed,
        }
    }

    /// Indicates whether the story's own effective [`Meta`] is allowed.
    ///
    /// [`Meta`]: crate::Meta
    #[must_use]
    pub fn allowed(&self) -> bool {
        self.story_allowed
    }

    /// Indicates whether the scenario at the `index` is allowed.
    ///
    /// Out-of-range indices are never allowed.
    #[must_use]
    pub fn scenario_allowed(&self, index: usize) -> bool {
        self.scenarios_allowed.get(index).copied().unwrap_or(false)
    }

    /// Indicates whether at least one scenario is allowed.
    #[must_use]
    pub fn has_allowed_scenario(&self) -> bool {
        self.scenarios_allowed.iter().any(|a| *a)
    }

    /// Indicates whether the story takes part in a run: either it's allowed
    /// itself or any of its scenarios is.
    #[must_use]
    pub fn included(&self) -> bool {
        self.allowed() || self.has_allowed_scenario()
    }
}
