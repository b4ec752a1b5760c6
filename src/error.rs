// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types of this crate.
//!
//! Building a [`Description`] tree never fails: problems surface only as
//! [PENDING] labels or dropped steps. Errors below are raised while
//! assembling the inputs (step patterns, meta filters) instead.
//!
//! [`Description`]: crate::Description

use derive_more::with_trait::{Display, From};

/// Top-level error type of this crate.
#[derive(Debug, Display, derive_more::Error, From)]
pub enum Error {
    /// Step pattern failed to compile.
    #[display("Invalid step pattern: {_0}")]
    Pattern(PatternError),

    /// Meta filter expression failed to parse.
    #[display("Invalid meta filter: {_0}")]
    MetaFilter(MetaFilterError),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Error of a step pattern not compiling into a [`Regex`].
///
/// [`Regex`]: regex::Regex
#[derive(Clone, Debug, Display, derive_more::Error)]
#[display("`{pattern}` is not a valid step pattern: {source}")]
pub struct PatternError {
    /// Pattern as it was given.
    #[error(not(source))]
    pub pattern: String,

    /// Underlying [`regex`] error.
    pub source: regex::Error,
}

/// Error of a meta filter expression not being parsable.
#[derive(Clone, Debug, Display, derive_more::Error, Eq, PartialEq)]
pub enum MetaFilterError {
    /// `+` or `-` is not followed by a meta name.
    #[display("`{clause}` clause has no meta name")]
    MissingName {
        /// The offending clause.
        #[error(not(source))]
        clause: String,
    },

    /// Value does not start with `+` or `-`.
    #[display("`{token}` must be preceded by a `+name` or `-name` clause")]
    DanglingValue {
        /// The offending token.
        #[error(not(source))]
        token: String,
    },
}

/// Error of a step text starting with none of the configured
/// [`Keywords`].
///
/// [`Keywords`]: crate::Keywords
#[derive(Clone, Debug, Display, derive_more::Error, Eq, PartialEq)]
#[display("No starting word found for step `{step}`")]
pub struct StartingWordNotFound {
    /// Step text that couldn't be classified.
    #[error(not(source))]
    pub step: String,
}
