// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sanitizing and uniquifying of [`Description`] labels.
//!
//! Labels are used verbatim as identifiers in the flat namespace of the
//! reporting API, so they have to be single-line, must not contain the
//! delimiters it reserves for source location metadata, and must never
//! collide.
//!
//! [`Description`]: crate::Description

use std::collections::{HashMap, HashSet};

use smart_default::SmartDefault;

/// Way a [`Uniquifier`] distinguishes repeated labels.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UniqueSuffix {
    /// Appends ` [n]`, where `n` counts the occurrences, starting at `2`.
    #[default]
    Counter,

    /// Appends `n - 1` zero-width spaces (U+200B), leaving the label
    /// visually unchanged.
    ZeroWidthSpace,
}

impl UniqueSuffix {
    /// Applies this suffix for the `n`th occurrence of the `label`.
    #[must_use]
    pub fn apply(self, label: &str, n: usize) -> String {
        match self {
            Self::Counter => format!("{label} [{n}]"),
            Self::ZeroWidthSpace => {
                format!("{label}{}", "\u{200B}".repeat(n.saturating_sub(1)))
            }
        }
    }
}

/// Rules turning arbitrary text into a single-line label.
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct LabelPolicy {
    /// Characters reserved by the reporting API.
    #[default(_code = "vec!['(', ')']")]
    pub reserved: Vec<char>,

    /// Character substituted for the `reserved` ones.
    #[default('|')]
    pub replacement: char,

    /// Separator substituted for line breaks.
    #[default = ", "]
    pub line_separator: String,

    /// Suffix distinguishing repeated labels.
    pub suffix: UniqueSuffix,
}

impl LabelPolicy {
    /// Joins the lines of the `text` with the `line_separator`, collapsing
    /// runs of line breaks.
    #[must_use]
    pub fn one_line(&self, text: &str) -> String {
        text.split(['\r', '\n'])
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(&self.line_separator)
    }

    /// Makes the `text` a single line free of the `reserved` characters.
    #[must_use]
    pub fn sanitize(&self, text: &str) -> String {
        self.one_line(text)
            .chars()
            .map(|c| {
                if self.reserved.contains(&c) {
                    self.replacement
                } else {
                    c
                }
            })
            .collect()
    }

    /// Creates a fresh [`Uniquifier`] using this policy's `suffix`.
    #[must_use]
    pub fn uniquifier(&self) -> Uniquifier {
        Uniquifier::new(self.suffix)
    }
}

/// Returns the `text` up to its first line break.
#[must_use]
pub fn first_line(text: &str) -> &str {
    text.split(['\r', '\n']).next().unwrap_or_default()
}

/// Hands out labels never handed out before.
///
/// Meant to live as long as a single tree build: labels only need to be
/// unique within one namespace.
#[derive(Clone, Debug, Default)]
pub struct Uniquifier {
    suffix: UniqueSuffix,

    /// Occurrences seen per base label.
    seen: HashMap<String, usize>,

    /// Every label handed out so far.
    issued: HashSet<String>,
}

impl Uniquifier {
    /// Creates an empty [`Uniquifier`] with the given [`UniqueSuffix`].
    #[must_use]
    pub fn new(suffix: UniqueSuffix) -> Self {
        Self {
            suffix,
            ..Self::default()
        }
    }

    /// Returns the `label` unchanged if it wasn't handed out yet, otherwise
    /// suffixes it until it's distinct from anything handed out.
    pub fn unique(&mut self, label: impl Into<String>) -> String {
        let label = label.into();
        let n = self.seen.entry(label.clone()).or_insert(0);
        *n += 1;
        if *n == 1 && self.issued.insert(label.clone()) {
            return label;
        }
        loop {
            *n = (*n).max(2);
            let candidate = self.suffix.apply(&label, *n);
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
            *n += 1;
        }
    }

    /// Number of labels handed out so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    /// Indicates whether no labels were handed out yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}
