// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Description`] tree handed over to the reporting API.

use std::fmt;

use crate::step::Location;

/// Kind of a [`Description`] node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Kind {
    /// Groups other nodes.
    Suite,

    /// Single reported case.
    Test,
}

/// Node of a description tree: either a suite with ordered children, or a
/// childless test.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Description {
    label: String,
    kind: Kind,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    location: Option<Location>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    children: Vec<Description>,
}

impl Description {
    /// Creates an empty suite [`Description`].
    #[must_use]
    pub fn suite(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: Kind::Suite,
            location: None,
            children: Vec::new(),
        }
    }

    /// Creates a test [`Description`], optionally pointing to the
    /// [`Location`] of its definition.
    #[must_use]
    pub fn test(label: impl Into<String>, location: Option<Location>) -> Self {
        Self {
            label: label.into(),
            kind: Kind::Test,
            location,
            children: Vec::new(),
        }
    }

    /// Appends a `child` to this suite.
    ///
    /// # Panics
    ///
    /// In debug builds, if this [`Description`] is a test.
    pub fn push(&mut self, child: Self) {
        debug_assert!(self.is_suite(), "tests have no children");
        self.children.push(child);
    }

    /// Returns the label of this [`Description`].
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the [`Kind`] of this [`Description`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the [`Location`] of the definition this test was built from.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Returns the children, in their discovery order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Indicates whether this [`Description`] is a test.
    #[must_use]
    pub fn is_test(&self) -> bool {
        self.kind == Kind::Test
    }

    /// Indicates whether this [`Description`] is a suite.
    #[must_use]
    pub fn is_suite(&self) -> bool {
        self.kind == Kind::Suite
    }

    /// Iterates over this [`Description`] and all its descendants, depth
    /// first, parents before their children.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Counts the tests in this tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|d| d.is_test()).count()
    }

    /// Finds the first node in this tree with the given `label`.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&Self> {
        self.iter().find(|d| d.label == label)
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{:indent$}{}", "", self.label, indent = depth * 2)?;
        self.children
            .iter()
            .try_for_each(|c| c.fmt_indented(f, depth + 1))
    }
}

/// Renders an outline, one label per line, indented by depth.
impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

impl<'d> IntoIterator for &'d Description {
    type Item = &'d Description;
    type IntoIter = Iter<'d>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first [`Iterator`] over a [`Description`] tree.
#[derive(Clone, Debug)]
pub struct Iter<'d> {
    stack: Vec<&'d Description>,
}

impl<'d> Iterator for Iter<'d> {
    type Item = &'d Description;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
