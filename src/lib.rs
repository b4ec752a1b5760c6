// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::unwrap_used,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_results
)]

pub mod cli;
pub mod config;
pub mod description;
pub mod error;
pub mod feature;
pub mod filter;
pub mod filtered;
pub mod generator;
pub mod keywords;
pub mod label;
pub mod meta;
pub mod step;
pub mod story;
pub mod suite;
pub mod tag;

#[doc(no_inline)]
pub use gherkin;

#[doc(inline)]
pub use self::{
    config::{Configuration, StoryControls},
    description::{Description, Kind},
    error::{Error, Result},
    filter::{AllowAll, Filter, MetaExpression, MetaFilter},
    filtered::FilteredStory,
    generator::{Build, BuildContext, DescriptionGenerator},
    keywords::{Keywords, StepType},
    label::{LabelPolicy, UniqueSuffix, Uniquifier},
    meta::Meta,
    step::{Location, StepCandidate, StepMatcher, StepPattern},
    story::{ExamplesTable, GivenStories, Scenario, Story},
    suite::Suite,
};
