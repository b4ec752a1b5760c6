// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Source [`Location`] of a step definition.

use std::panic;

use derive_more::with_trait::Display;

/// Location where a [`StepCandidate`] was registered.
///
/// Carried by the test nodes of a [`Description`] tree, so downstream
/// tooling may jump from a reported step to its definition.
///
/// [`Description`]: crate::Description
/// [`StepCandidate`]: super::StepCandidate
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[display("{path}:{line}:{column}")]
pub struct Location {
    /// Path to the file.
    pub path: &'static str,

    /// Line in the file.
    pub line: u32,

    /// Column in the file.
    pub column: u32,
}

impl Location {
    /// Creates a new [`Location`].
    #[must_use]
    pub const fn new(path: &'static str, line: u32, column: u32) -> Self {
        Self { path, line, column }
    }

    /// Returns the [`Location`] of the caller.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let loc = panic::Location::caller();
        Self::new(loc.file(), loc.line(), loc.column())
    }

    /// Returns the last component of the [`Location::path`].
    #[must_use]
    pub fn filename(&self) -> &'static str {
        self.path.rsplit(['/', '\\']).next().unwrap_or(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_path_line_column() {
        let loc = Location::new("src/steps.rs", 42, 10);

        assert_eq!(loc.to_string(), "src/steps.rs:42:10");
    }

    #[test]
    fn filename_handles_both_separators() {
        assert_eq!(Location::new("a/b/c.rs", 1, 1).filename(), "c.rs");
        assert_eq!(Location::new("a\\b\\c.rs", 1, 1).filename(), "c.rs");
        assert_eq!(Location::new("c.rs", 1, 1).filename(), "c.rs");
    }

    #[test]
    fn caller_points_here() {
        let loc = Location::caller();

        assert!(loc.path.ends_with("location.rs"));
        assert_eq!(loc.line, line!() - 3);
    }
}
