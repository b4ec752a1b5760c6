// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Suite`] of [`Story`] descriptions, as a whole run reports them.

use tracing::debug;

use crate::{
    description::Description,
    filter::MetaFilter,
    filtered::FilteredStory,
    generator::DescriptionGenerator,
    story::Story,
};

/// Description of a whole run over many [`Story`]s.
///
/// The root suite holds a `BeforeStories` test, the description of each
/// included [`Story`] and an `AfterStories` test, in this order. Labels are
/// unique across the whole tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Suite {
    /// Root of the description tree.
    pub description: Description,

    /// Number of test nodes in the tree, `BeforeStories` and `AfterStories`
    /// included.
    pub leaf_count: usize,

    /// Raw texts of steps dropped from the tree.
    pub dropped: Vec<String>,

    /// Names of the stories left out of the tree by filtering.
    pub skipped: Vec<String>,
}

impl Suite {
    /// Returns the descriptions of the included stories.
    pub fn stories(&self) -> impl Iterator<Item = &Description> {
        let children = self.description.children();
        children
            .get(1..children.len().saturating_sub(1))
            .unwrap_or_default()
            .iter()
    }
}

impl<F: MetaFilter + ?Sized> DescriptionGenerator<'_, F> {
    /// Builds the [`Suite`] of the given `stories`.
    ///
    /// A [`Story`] is included when either its own effective meta or any of
    /// its scenarios is allowed by the filter.
    #[must_use]
    pub fn build_all<'s, I>(&self, stories: I) -> Suite
    where
        I: IntoIterator<Item = &'s Story>,
    {
        let config = self.config();
        let mut ctx = self.context();
        let mut root = Description::suite(ctx.unique(config.root_label.clone()));
        let mut skipped = Vec::new();

        let before = ctx.unique(config.before_stories_label.clone());
        ctx.push_test(&mut root, Description::test(before, None));
        for story in stories {
            let filtered =
                FilteredStory::new(self.filter(), story, &config.story_controls);
            if filtered.included() {
                root.push(self.describe_story(story, &mut ctx));
            } else {
                debug!(story = %story.name, "story skipped by filter");
                skipped.push(story.name.clone());
            }
        }
        let after = ctx.unique(config.after_stories_label.clone());
        ctx.push_test(&mut root, Description::test(after, None));

        let build = ctx.finish(root);
        debug!(
            stories = build.description.children().len() - 2,
            leaf_count = build.leaf_count,
            "built suite description",
        );
        Suite {
            description: build.description,
            leaf_count: build.leaf_count,
            dropped: build.dropped,
            skipped,
        }
    }
}
