// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Behavior [`Story`] model the description tree is built from.
//!
//! Parsing story files is left to dedicated parsers (see
//! [`feature::Ext`] for the [`gherkin`] one); these types only hold the
//! parsed result.
//!
//! [`feature::Ext`]: crate::feature::Ext

use itertools::Itertools as _;
use linked_hash_map::LinkedHashMap;

use crate::meta::Meta;

/// Single row of an [`ExamplesTable`]: column names mapped to values, in
/// column order.
pub type Row = LinkedHashMap<String, String>;

/// Top-level specification unit containing [`Scenario`]s.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Story {
    /// Path the story was loaded from.
    pub path: String,

    /// Name of the story.
    pub name: String,

    /// Free-form description of the story.
    pub description: String,

    /// Own [`Meta`] tags of the story.
    pub meta: Meta,

    /// [`Scenario`]s in their declaration order.
    pub scenarios: Vec<Scenario>,
}

impl Story {
    /// Creates an empty [`Story`] with the given `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the path of this [`Story`].
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the description of this [`Story`].
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets own [`Meta`] tags of this [`Story`].
    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Appends a [`Scenario`].
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    /// Exposes this [`Story`] identity as [`Meta`] tags, named with the given
    /// `prefix`: `{prefix}path`, `{prefix}name` and `{prefix}description`.
    #[must_use]
    pub fn as_meta(&self, prefix: &str) -> Meta {
        [
            ("path", &self.path),
            ("name", &self.name),
            ("description", &self.description),
        ]
        .into_iter()
        .map(|(name, value)| (format!("{prefix}{name}"), Some(value.clone())))
        .collect()
    }
}

/// Single behavior example of a [`Story`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Scenario {
    /// Title of the scenario.
    pub title: String,

    /// Raw step texts, including their starting words (`Given x`).
    pub steps: Vec<String>,

    /// Table parameterizing this scenario, if any.
    pub examples: Option<ExamplesTable>,

    /// Stories referenced as preconditions.
    pub given_stories: GivenStories,

    /// Own [`Meta`] tags of the scenario.
    pub meta: Meta,
}

impl Scenario {
    /// Creates an empty [`Scenario`] with the given `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Appends the given raw step texts.
    #[must_use]
    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.extend(steps.into_iter().map(Into::into));
        self
    }

    /// Sets the [`ExamplesTable`] of this [`Scenario`].
    #[must_use]
    pub fn with_examples(mut self, examples: ExamplesTable) -> Self {
        self.examples = Some(examples);
        self
    }

    /// Sets the [`GivenStories`] of this [`Scenario`].
    #[must_use]
    pub fn with_given_stories(mut self, given_stories: GivenStories) -> Self {
        self.given_stories = given_stories;
        self
    }

    /// Sets own [`Meta`] tags of this [`Scenario`].
    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Indicates whether this [`Scenario`] has a non-empty
    /// [`ExamplesTable`].
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        self.examples.as_ref().is_some_and(|ex| !ex.is_empty())
    }

    /// Indicates whether this [`Scenario`] should be described once per
    /// [`ExamplesTable`] row.
    ///
    /// Rows are consumed by the [`GivenStories`] instead, once those require
    /// parameters.
    #[must_use]
    pub fn expands_examples(&self) -> bool {
        self.is_parameterized() && !self.given_stories.require_parameters
    }

    /// Exposes this [`Scenario`] as [`Meta`] tags, named with the given
    /// `prefix`: `{prefix}title`, `{prefix}givenStories` and
    /// `{prefix}examplesTable`.
    #[must_use]
    pub fn as_meta(&self, prefix: &str) -> Meta {
        let examples = self
            .examples
            .as_ref()
            .map(ExamplesTable::to_string)
            .unwrap_or_default();
        [
            ("title", self.title.clone()),
            ("givenStories", self.given_stories.paths.join(",")),
            ("examplesTable", examples),
        ]
        .into_iter()
        .map(|(name, value)| (format!("{prefix}{name}"), Some(value)))
        .collect()
    }
}

/// Ordered rows parameterizing a [`Scenario`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExamplesTable {
    /// Rows in their declaration order.
    pub rows: Vec<Row>,
}

impl ExamplesTable {
    /// Creates an [`ExamplesTable`] out of a `header` and value rows.
    ///
    /// Missing trailing values are left empty, extra ones are ignored.
    #[must_use]
    pub fn new<H, R, V>(header: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let header = header.into_iter().map(Into::into).collect::<Vec<_>>();
        let rows = rows
            .into_iter()
            .map(|values| {
                let mut values = values.into_iter().map(Into::into);
                header
                    .iter()
                    .map(|column| {
                        (column.clone(), values.next().unwrap_or_default())
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Indicates whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl std::fmt::Display for ExamplesTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rows.iter().map(row_literal).join("\n"))
    }
}

/// Renders a [`Row`] as a mapping literal: `{column=value, other=value}`.
#[must_use]
pub fn row_literal(row: &Row) -> String {
    format!(
        "{{{}}}",
        row.iter().map(|(k, v)| format!("{k}={v}")).join(", "),
    )
}

/// Stories referenced by a [`Scenario`] as its preconditions.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GivenStories {
    /// Referenced story paths, possibly with a `#` anchor.
    pub paths: Vec<String>,

    /// Whether the referenced stories take the [`ExamplesTable`] rows as
    /// their parameters.
    pub require_parameters: bool,
}

impl GivenStories {
    /// Creates [`GivenStories`] out of the given `paths`.
    ///
    /// Parameters are required once any path carries a `#{...}` anchor.
    #[must_use]
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths = paths.into_iter().map(Into::into).collect::<Vec<String>>();
        let require_parameters = paths
            .iter()
            .any(|p| p.split_once('#').is_some_and(|(_, a)| a.starts_with('{')));
        Self {
            paths,
            require_parameters,
        }
    }

    /// Parses a comma separated list of paths.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self::new(input.split(',').map(str::trim).filter(|p| !p.is_empty()))
    }

    /// Overrides whether parameters are required.
    #[must_use]
    pub fn with_require_parameters(mut self, require: bool) -> Self {
        self.require_parameters = require;
        self
    }

    /// Indicates whether no stories are referenced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Extracts the file name of a given story `path`, without its `#` anchor.
///
/// Degrades to the whole `path` when it has no `/` separator.
#[must_use]
pub fn given_story_name(path: &str) -> &str {
    let name = path.rsplit_once('/').map_or(path, |(_, name)| name);
    name.split_once('#').map_or(name, |(name, _)| name)
}
