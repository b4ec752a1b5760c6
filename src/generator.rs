// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`DescriptionGenerator`] turning [`Story`]s into [`Description`] trees.

use tracing::{debug, warn};

use crate::{
    config::Configuration,
    description::Description,
    filter::{self, MetaFilter},
    label::{self, Uniquifier},
    meta,
    step::{MatchContext, Resolution, StepCandidate, StepMatcher},
    story::{self, Scenario, Story},
};

/// Prefix of [`Scenario`] suite labels.
pub const SCENARIO_PREFIX: &str = "Scenario: ";

/// Prefix of example row suite labels.
pub const EXAMPLE_PREFIX: &str = "Example: ";

/// Prefix of labels of steps nothing implements yet.
pub const PENDING_PREFIX: &str = "[PENDING] ";

/// Mutable state of a single tree build.
///
/// Must not be shared between builds running concurrently: every build
/// (a single story, or a whole [`Suite`] of them) owns its own.
///
/// [`Suite`]: crate::Suite
#[derive(Clone, Debug, Default)]
pub struct BuildContext {
    uniquifier: Uniquifier,
    leaf_count: usize,
    dropped: Vec<String>,
}

impl BuildContext {
    /// Creates a fresh [`BuildContext`] with the given [`Uniquifier`].
    #[must_use]
    pub fn new(uniquifier: Uniquifier) -> Self {
        Self {
            uniquifier,
            ..Self::default()
        }
    }

    /// Number of test nodes created so far.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Raw texts of steps dropped so far, as they start with no known word.
    #[must_use]
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Makes the `label` unique within this build.
    pub fn unique(&mut self, label: impl Into<String>) -> String {
        self.uniquifier.unique(label)
    }

    /// Appends a new test to the `parent`, counting it.
    pub(crate) fn push_test(&mut self, parent: &mut Description, test: Description) {
        debug_assert!(test.is_test(), "only tests are counted");
        self.leaf_count += 1;
        parent.push(test);
    }

    /// Consumes this [`BuildContext`], producing a [`Build`] of the given
    /// `description`.
    #[must_use]
    pub fn finish(self, description: Description) -> Build {
        Build {
            description,
            leaf_count: self.leaf_count,
            dropped: self.dropped,
        }
    }
}

/// Result of building a [`Description`] tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Build {
    /// Root of the built tree.
    pub description: Description,

    /// Number of test nodes in the tree.
    pub leaf_count: usize,

    /// Raw texts of steps dropped from the tree, as they start with no known
    /// word.
    pub dropped: Vec<String>,
}

/// Builds [`Description`] trees out of [`Story`]s, resolving their steps
/// against [`StepCandidate`]s and filtering their scenarios with a
/// [`MetaFilter`].
///
/// Holds no mutable state: all of it lives in a [`BuildContext`], so the
/// same generator may be used for any number of builds.
#[derive(Debug)]
pub struct DescriptionGenerator<'a, F: ?Sized> {
    candidates: &'a [StepCandidate],
    config: &'a Configuration,
    filter: &'a F,
}

impl<F: ?Sized> Clone for DescriptionGenerator<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

// Implemented manually to omit redundant `F: Copy` trait bound, imposed by
// `#[derive(Copy)]`.
impl<F: ?Sized> Copy for DescriptionGenerator<'_, F> {}

impl<'a, F: MetaFilter + ?Sized> DescriptionGenerator<'a, F> {
    /// Creates a new [`DescriptionGenerator`].
    ///
    /// `candidates` are matched in the given order: the first matching one
    /// wins.
    #[must_use]
    pub fn new(
        candidates: &'a [StepCandidate],
        config: &'a Configuration,
        filter: &'a F,
    ) -> Self {
        Self {
            candidates,
            config,
            filter,
        }
    }

    /// Returns the [`Configuration`] of this [`DescriptionGenerator`].
    #[must_use]
    pub fn config(&self) -> &'a Configuration {
        self.config
    }

    /// Returns the [`MetaFilter`] of this [`DescriptionGenerator`].
    #[must_use]
    pub fn filter(&self) -> &'a F {
        self.filter
    }

    /// Creates a fresh [`BuildContext`] suitable for this generator.
    #[must_use]
    pub fn context(&self) -> BuildContext {
        BuildContext::new(self.config.labels.uniquifier())
    }

    /// Builds the [`Description`] tree of the `story` in a fresh
    /// [`BuildContext`].
    #[must_use]
    pub fn build(&self, story: &Story) -> Build {
        let mut ctx = self.context();
        let description = self.describe_story(story, &mut ctx);
        debug!(
            story = %story.name,
            leaf_count = ctx.leaf_count(),
            "built story description",
        );
        ctx.finish(description)
    }

    /// Describes the `story`, with only its allowed [`Scenario`]s as
    /// children.
    pub fn describe_story(
        &self,
        story: &Story,
        ctx: &mut BuildContext,
    ) -> Description {
        let controls = &self.config.story_controls;
        let mut description = Description::suite(self.label(&story.name, ctx));

        let story_meta = meta::story_meta(story, controls);
        for scenario in &story.scenarios {
            if filter::scenario_allowed(self.filter, &story_meta, scenario, controls)
            {
                description.push(self.describe_scenario(scenario, ctx));
            } else {
                debug!(
                    story = %story.name,
                    scenario = %scenario.title,
                    "scenario filtered out",
                );
            }
        }
        description
    }

    /// Describes the `scenario` regardless of any filtering.
    pub fn describe_scenario(
        &self,
        scenario: &Scenario,
        ctx: &mut BuildContext,
    ) -> Description {
        let mut description = Description::suite(self.label(
            &format!("{SCENARIO_PREFIX}{}", scenario.title),
            ctx,
        ));

        for path in &scenario.given_stories.paths {
            let test = Description::test(
                self.label(story::given_story_name(path), ctx),
                None,
            );
            ctx.push_test(&mut description, test);
        }

        match scenario.examples.as_ref().filter(|_| scenario.expands_examples()) {
            Some(examples) => {
                for row in &examples.rows {
                    let mut example = Description::suite(self.label(
                        &format!("{EXAMPLE_PREFIX}{}", story::row_literal(row)),
                        ctx,
                    ));
                    self.add_steps(&mut example, &scenario.steps, ctx);
                    description.push(example);
                }
            }
            None => self.add_steps(&mut description, &scenario.steps, ctx),
        }
        description
    }

    /// Appends the descriptions of the given step list to the `parent`.
    fn add_steps(
        &self,
        parent: &mut Description,
        steps: &[String],
        ctx: &mut BuildContext,
    ) {
        self.add_steps_nested(parent, steps, ctx, &mut Vec::new());
    }

    /// Appends the descriptions of the given step list to the `parent`,
    /// tracking the composite [`StepCandidate`]s being expanded.
    ///
    /// A composite step recurring inside its own expansion is described as a
    /// plain test instead of being expanded again.
    fn add_steps_nested(
        &self,
        parent: &mut Description,
        steps: &[String],
        ctx: &mut BuildContext,
        expanding: &mut Vec<&'a StepCandidate>,
    ) {
        let matcher = StepMatcher::new(self.candidates, &self.config.keywords);
        let mut match_ctx = MatchContext::default();

        for step in steps {
            let line = label::first_line(step);
            match matcher.resolve(step, &mut match_ctx) {
                Resolution::Matched(found)
                    if found.is_composite()
                        && !expanding.iter().any(|c| std::ptr::eq(*c, found)) =>
                {
                    let mut composite = Description::suite(self.label(line, ctx));
                    expanding.push(found);
                    self.add_steps_nested(
                        &mut composite,
                        found.composed_steps(),
                        ctx,
                        expanding,
                    );
                    _ = expanding.pop();
                    parent.push(composite);
                }
                Resolution::Matched(found) => {
                    if found.is_composite() {
                        warn!(step, "composite step recurs in its own expansion");
                    }
                    let test = Description::test(
                        self.label(line, ctx),
                        found.location(),
                    );
                    ctx.push_test(parent, test);
                }
                Resolution::Ignorable => {
                    let test = Description::test(self.label(line, ctx), None);
                    ctx.push_test(parent, test);
                }
                Resolution::Pending => {
                    let test = Description::test(
                        self.label(&format!("{PENDING_PREFIX}{line}"), ctx),
                        None,
                    );
                    ctx.push_test(parent, test);
                }
                Resolution::Unclassifiable(e) => {
                    warn!(step, error = %e, "dropping step");
                    ctx.dropped.push(e.step);
                }
            }
        }
    }

    /// Sanitizes and uniquifies the `text` into a label.
    fn label(&self, text: &str, ctx: &mut BuildContext) -> String {
        ctx.unique(self.config.labels.sanitize(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        filter::AllowAll,
        keywords::StepType,
        meta::Meta,
        step::Location,
        story::{ExamplesTable, GivenStories},
    };

    fn candidates() -> Vec<StepCandidate> {
        vec![
            StepCandidate::given("a variable x with value $value")
                .unwrap()
                .at(Location::new("steps.rs", 1, 1)),
            StepCandidate::when("I multiply x by $value").unwrap(),
            StepCandidate::then("x should equal $value").unwrap(),
            StepCandidate::given("x is prepared")
                .unwrap()
                .composed_of([
                    "Given a variable x with value 1",
                    "When I multiply x by 2",
                ]),
        ]
    }

    fn labels(d: &Description) -> Vec<&str> {
        d.children().iter().map(Description::label).collect()
    }

    #[test]
    fn describes_plain_scenario() {
        let (cands, config) = (candidates(), Configuration::default());
        let generator = DescriptionGenerator::new(&cands, &config, &AllowAll);
        let story = Story::new("Multiplication").with_scenario(
            Scenario::new("2 by 3").with_steps([
                "Given a variable x with value 2",
                "When I multiply x by 3",
                "Then x should equal 6",
            ]),
        );

        let build = generator.build(&story);

        assert_eq!(build.description.label(), "Multiplication");
        let scenario = &build.description.children()[0];
        assert_eq!(scenario.label(), "Scenario: 2 by 3");
        assert_eq!(labels(scenario), [
            "Given a variable x with value 2",
            "When I multiply x by 3",
            "Then x should equal 6",
        ]);
        assert_eq!(
            scenario.children()[0].location(),
            Some(Location::new("steps.rs", 1, 1)),
        );
        assert_eq!(build.leaf_count, 3);
        assert_eq!(build.description.leaf_count(), 3);
    }

    #[test]
    fn marks_pending_and_ignorable_steps() {
        let (cands, config) = (candidates(), Configuration::default());
        let generator = DescriptionGenerator::new(&cands, &config, &AllowAll);
        let story = Story::new("s").with_scenario(
            Scenario::new("t").with_steps(["Given unknown (yet)", "!-- Then later"]),
        );

        let build = generator.build(&story);

        let scenario = &build.description.children()[0];
        assert_eq!(labels(scenario), ["[PENDING] Given unknown |yet|", "!-- Then later"]);
        assert!(scenario.children().iter().all(Description::is_test));
        assert_eq!(build.leaf_count, 2);
    }

    #[test]
    fn drops_unclassifiable_steps() {
        let (cands, config) = (candidates(), Configuration::default());
        let generator = DescriptionGenerator::new(&cands, &config, &AllowAll);
        let story = Story::new("s").with_scenario(
            Scenario::new("t")
                .with_steps(["Given a variable x with value 1", "Whatever happens"]),
        );

        let build = generator.build(&story);

        assert_eq!(build.description.children()[0].children().len(), 1);
        assert_eq!(build.leaf_count, 1);
        assert_eq!(build.dropped, ["Whatever happens"]);
    }

    #[test]
    fn expands_composite_steps() {
        let (cands, config) = (candidates(), Configuration::default());
        let generator = DescriptionGenerator::new(&cands, &config, &AllowAll);
        let story = Story::new("s").with_scenario(
            Scenario::new("t")
                .with_steps(["Given x is prepared", "Then x should equal 2"]),
        );

        let build = generator.build(&story);

        let scenario = &build.description.children()[0];
        let composite = &scenario.children()[0];
        assert!(composite.is_suite());
        assert_eq!(composite.label(), "Given x is prepared");
        assert_eq!(labels(composite), [
            "Given a variable x with value 1",
            "When I multiply x by 2",
        ]);
        assert_eq!(build.leaf_count, 3);
    }

    #[test]
    fn composite_expansion_keeps_outer_context() {
        let mut cands = candidates();
        cands.push(
            StepCandidate::when("it is composed")
                .unwrap()
                .composed_of(["Given a variable x with value 1"]),
        );
        let config = Configuration::default();
        let generator = DescriptionGenerator::new(&cands, &config, &AllowAll);
        let story = Story::new("s").with_scenario(Scenario::new("t").with_steps([
            "When it is composed",
            "And I multiply x by 3",
        ]));

        let build = generator.build(&story);

        let scenario = &build.description.children()[0];
        assert_eq!(labels(scenario), ["When it is composed", "And I multiply x by 3"]);
        assert_eq!(build.leaf_count, 2);
    }

    #[test]
    fn recursive_composite_is_not_expanded_again() {
        let cands = vec![StepCandidate::given("loop")
            .unwrap()
            .composed_of(["Given loop"])];
        let config = Configuration::default();
        let generator = DescriptionGenerator::new(&cands, &config, &AllowAll);
        let story =
            Story::new("s").with_scenario(Scenario::new("t").with_steps(["Given loop"]));

        let build = generator.build(&story);

        let composite = &build.description.children()[0].children()[0];
        assert!(composite.is_suite());
        assert_eq!(labels(composite), ["Given loop [2]"]);
        assert_eq!(build.leaf_count, 1);
    }

    #[test]
    fn describes_example_rows() {
        let (cands, config) = (candidates(), Configuration::default());
        let generator = DescriptionGenerator::new(&cands, &config, &AllowAll);
        let story = Story::new("s").with_scenario(
            Scenario::new("t")
                .with_steps(["Given a variable x with value <v>", "Then x should equal <v>"])
                .with_examples(ExamplesTable::new(["v"], [["1"], ["2"]])),
        );

        let build = generator.build(&story);

        let scenario = &build.description.children()[0];
        assert_eq!(labels(scenario), ["Example: {v=1}", "Example: {v=2}"]);
        assert_eq!(labels(&scenario.children()[0]), [
            "Given a variable x with value <v>",
            "Then x should equal <v>",
        ]);
        assert_eq!(labels(&scenario.children()[1]), [
            "Given a variable x with value <v> [2]",
            "Then x should equal <v> [2]",
        ]);
        assert_eq!(build.leaf_count, 4);
    }

    #[test]
    fn example_row_labels_have_no_reserved_characters() {
        let (cands, config) = (candidates(), Configuration::default());
        let generator = DescriptionGenerator::new(&cands, &config, &AllowAll);
        let story = Story::new("s").with_scenario(
            Scenario::new("t")
                .with_steps(["Then x should equal <v>"])
                .with_examples(ExamplesTable::new(["v"], [["f(1)"]])),
        );

        let build = generator.build(&story);

        assert_eq!(labels(&build.description.children()[0]), ["Example: {v=f|1|}"]);
    }

    #[test]
    fn describes_given_stories_as_single_tests() {
        let (cands, config) = (candidates(), Configuration::default());
        let generator = DescriptionGenerator::new(&cands, &config, &AllowAll);
        let story = Story::new("s").with_scenario(
            Scenario::new("t")
                .with_given_stories(GivenStories::new([
                    "stories/pre.story#{0}",
                    "other.story",
                ]))
                .with_examples(ExamplesTable::new(["v"], [["1"], ["2"]]))
                .with_steps(["Then x should equal 2"]),
        );

        let build = generator.build(&story);

        let scenario = &build.description.children()[0];
        assert_eq!(labels(scenario), ["pre.story", "other.story", "Then x should equal 2"]);
        assert_eq!(build.leaf_count, 3);
    }

    #[test]
    fn filters_scenarios_by_effective_meta() {
        let (cands, config) = (candidates(), Configuration::default());
        let filter = |m: &Meta| m.contains_key("smoke");
        let generator = DescriptionGenerator::new(&cands, &config, &filter);
        let story = Story::new("s")
            .with_scenario(Scenario::new("a").with_steps(["Then x should equal 1"]))
            .with_scenario(
                Scenario::new("b")
                    .with_meta(Meta::parse("@smoke"))
                    .with_steps(["Then x should equal 1"]),
            );

        let build = generator.build(&story);

        assert_eq!(labels(&build.description), ["Scenario: b"]);
        assert_eq!(build.leaf_count, 1);
    }

    #[test]
    fn sibling_duplicates_are_uniquified() {
        let (cands, config) = (candidates(), Configuration::default());
        let generator = DescriptionGenerator::new(&cands, &config, &AllowAll);
        let story = Story::new("s").with_scenario(Scenario::new("t").with_steps([
            "Then x should equal 1",
            "Then x should equal 1",
        ]));

        let build = generator.build(&story);

        assert_eq!(
            labels(&build.description.children()[0]),
            ["Then x should equal 1", "Then x should equal 1 [2]"],
        );
    }

    #[test]
    fn multi_line_steps_are_labeled_by_first_line() {
        let cands = vec![StepCandidate::given("a table:$table").unwrap()];
        let config = Configuration::default();
        let generator = DescriptionGenerator::new(&cands, &config, &AllowAll);
        let story = Story::new("s").with_scenario(
            Scenario::new("t").with_steps(["Given a table:\n|a|b|\n|1|2|"]),
        );

        let build = generator.build(&story);

        let step = &build.description.children()[0].children()[0];
        assert_eq!(step.label(), "Given a table:");
        assert!(step.location().is_some());
    }

    #[test]
    fn and_steps_resolve_to_previous_type() {
        let cands = vec![
            StepCandidate::given("a").unwrap(),
            StepCandidate::given("b").unwrap(),
            StepCandidate::when("c").unwrap(),
        ];
        let config = Configuration::default();
        let generator = DescriptionGenerator::new(&cands, &config, &AllowAll);
        let story = Story::new("s").with_scenario(
            Scenario::new("t").with_steps(["Given a", "And b", "When c", "And b"]),
        );

        let build = generator.build(&story);

        let scenario = &build.description.children()[0];
        assert_eq!(labels(scenario), ["Given a", "And b", "When c", "[PENDING] And b"]);
        assert_eq!(cands[1].step_type(), StepType::Given);
    }
}
