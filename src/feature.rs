// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`gherkin::Feature`] extension.

use sealed::sealed;

use crate::{
    meta::Meta,
    story::{ExamplesTable, Scenario, Story},
};

/// Helper methods to describe [`gherkin::Feature`]s as [`Story`]s.
#[sealed]
pub trait Ext {
    /// Converts this [`gherkin::Feature`] into a [`Story`].
    ///
    /// - `Background` steps are prepended to the steps of every scenario
    ///   they apply to.
    /// - Scenarios of `Rule`s follow the top-level ones, inheriting the
    ///   `Rule`'s tags.
    /// - Each step becomes a text `<keyword> <value>`, followed by lines of
    ///   its docstring or table, if any.
    /// - Tags become [`Meta`]: `@name` has no value, while `@name=value` and
    ///   `@name:value` have one.
    /// - All `Examples` tables of a scenario are concatenated.
    #[must_use]
    fn to_story(&self) -> Story;
}

#[sealed]
impl Ext for gherkin::Feature {
    fn to_story(&self) -> Story {
        let feature_background = background_steps(self.background.as_ref());

        let mut story = Story::new(self.name.trim())
            .with_description(self.description.as_deref().unwrap_or_default().trim())
            .with_meta(tags_meta(&self.tags));
        if let Some(path) = &self.path {
            story = story.with_path(path.display().to_string());
        }

        for sc in &self.scenarios {
            story = story.with_scenario(scenario(sc, &feature_background, &Meta::new()));
        }
        for rule in &self.rules {
            let rule_meta = tags_meta(&rule.tags);
            let background = feature_background
                .iter()
                .cloned()
                .chain(background_steps(rule.background.as_ref()))
                .collect::<Vec<_>>();
            for sc in &rule.scenarios {
                story = story.with_scenario(scenario(sc, &background, &rule_meta));
            }
        }
        story
    }
}

/// Converts a [`gherkin::Scenario`] into a [`Scenario`].
fn scenario(
    scenario: &gherkin::Scenario,
    background: &[String],
    parent_meta: &Meta,
) -> Scenario {
    let steps = background
        .iter()
        .cloned()
        .chain(scenario.steps.iter().map(step_text))
        .collect::<Vec<_>>();

    let tables = scenario
        .examples
        .iter()
        .filter_map(|ex| ex.table.as_ref()?.rows.split_first());
    let mut examples: Option<ExamplesTable> = None;
    for (header, values) in tables {
        let table = ExamplesTable::new(header, values);
        match &mut examples {
            Some(ex) => ex.rows.extend(table.rows),
            None => examples = Some(table),
        }
    }

    let mut out = Scenario::new(scenario.name.trim())
        .with_steps(steps)
        .with_meta(tags_meta(&scenario.tags).inherit_from(parent_meta));
    if let Some(ex) = examples {
        out = out.with_examples(ex);
    }
    out
}

/// Returns the step texts of the given [`gherkin::Background`], if any.
fn background_steps(background: Option<&gherkin::Background>) -> Vec<String> {
    background
        .map(|bg| bg.steps.iter().map(step_text).collect())
        .unwrap_or_default()
}

/// Renders the [`gherkin::Step`] as a (possibly multi-line) step text.
fn step_text(step: &gherkin::Step) -> String {
    let mut text = format!("{} {}", step.keyword.trim(), step.value);
    if let Some(doc) = &step.docstring {
        for line in doc.trim_start_matches(['\r', '\n']).lines() {
            text.push('\n');
            text.push_str(line);
        }
    }
    if let Some(table) = &step.table {
        for row in &table.rows {
            text.push_str("\n|");
            for cell in row {
                text.push_str(cell);
                text.push('|');
            }
        }
    }
    text
}

/// Converts [`gherkin`] tags into [`Meta`].
fn tags_meta(tags: &[String]) -> Meta {
    tags.iter()
        .map(|tag| {
            let tag = tag.trim_start_matches('@');
            match tag.split_once(['=', ':']) {
                Some((name, value)) => (name.to_owned(), Some(value.to_owned())),
                None => (tag.to_owned(), None),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> gherkin::Feature {
        gherkin::Feature::parse(input, gherkin::GherkinEnv::default()).unwrap()
    }

    #[test]
    fn converts_tags_into_meta() {
        let meta = tags_meta(&[
            "smoke".to_owned(),
            "@owner=team".to_owned(),
            "theme:ui".to_owned(),
        ]);

        assert_eq!(meta.value("owner"), Some("team"));
        assert_eq!(meta.value("theme"), Some("ui"));
        assert!(meta.contains_key("smoke"));
        assert_eq!(meta.value("smoke"), None);
    }

    #[test]
    fn prepends_background_steps() {
        let story = parse(
            "Feature: Cart\n\
             \n  Background:\n    Given an empty cart\n\
             \n  Scenario: add\n    When I add an apple\n    Then I have 1 item\n",
        )
        .to_story();

        assert_eq!(story.name, "Cart");
        assert_eq!(story.scenarios[0].title, "add");
        assert_eq!(story.scenarios[0].steps, [
            "Given an empty cart",
            "When I add an apple",
            "Then I have 1 item",
        ]);
    }

    #[test]
    fn flattens_rules_with_their_tags() {
        let story = parse(
            "@billing\nFeature: Invoices\n\
             \n  Scenario: top\n    Given a\n\
             \n  @slow\n  Rule: totals\n\
             \n    @fast\n    Scenario: nested\n      Given b\n",
        )
        .to_story();

        assert!(story.meta.contains_key("billing"));
        let titles = story.scenarios.iter().map(|s| s.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, ["top", "nested"]);
        assert!(story.scenarios[0].meta.is_empty());
        assert!(story.scenarios[1].meta.contains_key("slow"));
        assert!(story.scenarios[1].meta.contains_key("fast"));
    }

    #[test]
    fn renders_docstrings_without_leading_blank_line() {
        let story = parse(
            "Feature: Receipt\n\
             \n  Scenario: print\n    Then the receipt shows:\n      \"\"\"\n      apple 0.9\n      pear 1.2\n      \"\"\"\n",
        )
        .to_story();

        assert_eq!(story.scenarios[0].steps, [
            "Then the receipt shows:\napple 0.9\npear 1.2",
        ]);
    }

    #[test]
    fn renders_tables_and_examples() {
        let story = parse(
            "Feature: Outline\n\
             \n  Scenario Outline: eating\n    Given <start> cucumbers\n      | a | b |\n      | 1 | 2 |\n\
             \n    Examples:\n      | start |\n      | 12    |\n      | 20    |\n",
        )
        .to_story();

        let scenario = &story.scenarios[0];
        assert_eq!(scenario.steps, ["Given <start> cucumbers\n|a|b|\n|1|2|"]);
        let examples = scenario.examples.as_ref().unwrap();
        assert_eq!(examples.row_count(), 2);
        assert_eq!(examples.rows[1]["start"], "20");
        assert!(scenario.expands_examples());
    }
}
