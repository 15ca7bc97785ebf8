// Copyright 2024 sqljson Contributors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// Errors raised by the SQL/JSON functions.
///
/// The first group of variants describes user-data conditions. They are
/// captured during path evaluation and only surface to the caller when the
/// active `ON EMPTY` / `ON ERROR` behavior is `ERROR`; any other behavior
/// absorbs them into the configured fallback value.
///
/// `IllegalEmptyBehavior` and `IllegalErrorBehavior` are configuration
/// errors. They indicate caller misuse (an empty/error behavior that is
/// not representable in the declared return type) and always propagate,
/// regardless of the behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input text is not valid JSON.
    InvalidJson(String),
    /// The path expression was rejected by the path engine.
    InvalidJsonPath(String),
    /// A strict-mode path selected no value.
    StrictModeValueRequired,
    /// `JSON_VALUE` in strict mode selected a non-scalar value.
    ScalarValueRequired(String),
    /// `JSON_QUERY` in strict mode produced a scalar value.
    ArrayOrObjectValueRequired(String),
    /// `JSON_QUERY` with `ARRAY` return type produced a non-array value.
    ArrayValueRequired(String),
    /// An empty result with `ERROR ON EMPTY` configured.
    EmptyResultNotAllowed(&'static str),
    /// The empty behavior cannot be represented in the declared return type.
    IllegalEmptyBehavior {
        function: &'static str,
        behavior: String,
    },
    /// The error behavior cannot be represented in the declared return type.
    IllegalErrorBehavior {
        function: &'static str,
        behavior: String,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidJson(msg) => write!(f, "invalid JSON text: {msg}"),
            Error::InvalidJsonPath(msg) => write!(f, "invalid JSON path expression: {msg}"),
            Error::StrictModeValueRequired => {
                write!(f, "strict jsonpath mode requires a non-empty returned value")
            }
            Error::ScalarValueRequired(value) => write!(
                f,
                "strict jsonpath mode requires a scalar value, and the actual value is: {value}"
            ),
            Error::ArrayOrObjectValueRequired(value) => write!(
                f,
                "strict jsonpath mode requires an array or object value, and the actual value is: {value}"
            ),
            Error::ArrayValueRequired(value) => write!(
                f,
                "ARRAY return type requires an array value, and the actual value is: {value}"
            ),
            Error::EmptyResultNotAllowed(function) => {
                write!(f, "empty result of {function} function is not allowed")
            }
            Error::IllegalEmptyBehavior { function, behavior } => {
                write!(
                    f,
                    "illegal empty behavior '{behavior}' specified in {function} function"
                )
            }
            Error::IllegalErrorBehavior { function, behavior } => {
                write!(
                    f,
                    "illegal error behavior '{behavior}' specified in {function} function"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
