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

// Behavior configuration for the SQL/JSON functions. Each enum is a closed
// variant set matched exhaustively at the dispatch points, so an unhandled
// behavior is a compile error rather than a runtime fallback.

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// `ON ERROR` behavior of `JSON_EXISTS`.
///
/// The SQL standard defines no `ON EMPTY` clause for `JSON_EXISTS`; an
/// empty path result simply reports `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistsOnError {
    /// `TRUE ON ERROR`.
    True,
    /// `FALSE ON ERROR` (the SQL default).
    #[default]
    False,
    /// `ERROR ON ERROR`, re-raises the captured error.
    Error,
    /// `UNKNOWN ON ERROR`, reports SQL NULL.
    Unknown,
}

/// `ON EMPTY` / `ON ERROR` behavior of `JSON_VALUE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOnEmptyOrError {
    /// `ERROR ON EMPTY` / `ERROR ON ERROR`.
    Error,
    /// `NULL ON EMPTY` / `NULL ON ERROR`.
    Null,
    /// `DEFAULT <value> ON EMPTY` / `DEFAULT <value> ON ERROR`.
    Default,
}

/// `ON EMPTY` / `ON ERROR` behavior of `JSON_QUERY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOnEmptyOrError {
    /// `ERROR ON EMPTY` / `ERROR ON ERROR`.
    Error,
    /// `NULL ON EMPTY` / `NULL ON ERROR`.
    Null,
    /// `EMPTY ARRAY ON EMPTY` / `EMPTY ARRAY ON ERROR`.
    EmptyArray,
    /// `EMPTY OBJECT ON EMPTY` / `EMPTY OBJECT ON ERROR`.
    ///
    /// Only representable when the return type is [`QueryReturnType::String`];
    /// combining it with an `ARRAY` return type is a configuration error.
    EmptyObject,
}

/// Wrapper behavior of `JSON_QUERY`, controlling whether the selected value
/// is wrapped in a single-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryWrapper {
    /// `WITHOUT ARRAY WRAPPER`, the value is kept as-is.
    WithoutArray,
    /// `WITH UNCONDITIONAL ARRAY WRAPPER`, the value is always wrapped.
    UnconditionalArray,
    /// `WITH CONDITIONAL ARRAY WRAPPER`, the value is wrapped unless it
    /// already is an array.
    ConditionalArray,
}

/// Declared return representation of `JSON_QUERY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryReturnType {
    /// The result is one JSON text.
    String,
    /// The result is an array of element texts (SQL NULL elements allowed).
    Array,
}

impl Display for ExistsOnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let token = match self {
            ExistsOnError::True => "TRUE",
            ExistsOnError::False => "FALSE",
            ExistsOnError::Error => "ERROR",
            ExistsOnError::Unknown => "UNKNOWN",
        };
        write!(f, "{token}")
    }
}

impl Display for ValueOnEmptyOrError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let token = match self {
            ValueOnEmptyOrError::Error => "ERROR",
            ValueOnEmptyOrError::Null => "NULL",
            ValueOnEmptyOrError::Default => "DEFAULT",
        };
        write!(f, "{token}")
    }
}

impl Display for QueryOnEmptyOrError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let token = match self {
            QueryOnEmptyOrError::Error => "ERROR",
            QueryOnEmptyOrError::Null => "NULL",
            QueryOnEmptyOrError::EmptyArray => "EMPTY_ARRAY",
            QueryOnEmptyOrError::EmptyObject => "EMPTY_OBJECT",
        };
        write!(f, "{token}")
    }
}

impl Display for QueryWrapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let token = match self {
            QueryWrapper::WithoutArray => "WITHOUT_ARRAY",
            QueryWrapper::UnconditionalArray => "UNCONDITIONAL_ARRAY",
            QueryWrapper::ConditionalArray => "CONDITIONAL_ARRAY",
        };
        write!(f, "{token}")
    }
}

impl Display for QueryReturnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let token = match self {
            QueryReturnType::String => "STRING",
            QueryReturnType::Array => "ARRAY",
        };
        write!(f, "{token}")
    }
}
