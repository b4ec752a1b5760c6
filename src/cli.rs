// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI (command line interface) options of a [`DescriptionGenerator`].
//!
//! [`Opts`] are meant to be flattened into the CLI of whatever runs the
//! stories:
//!
//! ```rust
//! use clap::Parser as _;
//! use story_tree::{cli, Configuration};
//!
//! #[derive(clap::Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     stories: cli::Opts,
//! }
//!
//! let cli = Cli::parse_from(["runner", "--meta-filter", "+smoke -skip"]);
//! let config = cli.stories.configuration(Configuration::default());
//! let filter = cli.stories.filter();
//! # _ = (config, filter);
//! ```
//!
//! [`DescriptionGenerator`]: crate::DescriptionGenerator

use gherkin::tagexpr::TagOperation;

use crate::{
    config::Configuration,
    filter::{Filter, MetaExpression},
};

pub use clap::{Args, Parser};

/// CLI options tweaking which stories and scenarios get described, and how.
#[derive(Args, Clone, Debug, Default)]
pub struct Opts {
    /// Meta filter to select stories and scenarios by, e.g. `+smoke -skip`.
    ///
    /// Scenarios inherit meta tags of their story.
    #[arg(
        id = "meta-filter",
        long = "meta-filter",
        short = 'm',
        value_name = "expr",
        conflicts_with = "tags"
    )]
    pub meta_filter: Option<MetaExpression>,

    /// Tag expression to select stories and scenarios by.
    #[arg(id = "tags", long = "tags", short = 't', value_name = "tagexpr")]
    pub tags_filter: Option<TagOperation>,

    /// Prefix of the meta tags describing a story itself.
    #[arg(long, value_name = "prefix")]
    pub story_meta_prefix: Option<String>,

    /// Prefix of the meta tags describing a scenario itself.
    #[arg(long, value_name = "prefix")]
    pub scenario_meta_prefix: Option<String>,

    /// Label of the root suite.
    #[arg(long, value_name = "label")]
    pub root_label: Option<String>,
}

impl Opts {
    /// Overrides the given `base` [`Configuration`] with the specified
    /// options.
    #[must_use]
    pub fn configuration(&self, mut base: Configuration) -> Configuration {
        let controls = &mut base.story_controls;
        if let Some(prefix) = &self.story_meta_prefix {
            controls.story_meta_prefix.clone_from(prefix);
        }
        if let Some(prefix) = &self.scenario_meta_prefix {
            controls.scenario_meta_prefix.clone_from(prefix);
        }
        if let Some(label) = &self.root_label {
            base.root_label.clone_from(label);
        }
        base
    }

    /// Returns the [`Filter`] specified by these [`Opts`].
    #[must_use]
    pub fn filter(&self) -> Filter {
        match (&self.meta_filter, &self.tags_filter) {
            (Some(expr), _) => Filter::Meta(expr.clone()),
            (None, Some(op)) => Filter::Tags(op.clone()),
            (None, None) => Filter::All,
        }
    }
}
