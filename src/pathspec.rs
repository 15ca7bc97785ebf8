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

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use serde_json_path::JsonPath;
use serde_json_path::NodeList;

use crate::error::Error;

// Grammar of the mode prefix: an optional leading `strict` or `lax` token,
// case-insensitive, separated from the expression by whitespace. The
// expression itself may span multiple lines.
static PATH_MODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^\s*(strict|lax)\s+(.+)$").unwrap());

/// Evaluation mode of a path spec.
///
/// Strict mode fails loudly on any lookup problem or shape mismatch, lax
/// mode suppresses them and degrades to an absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    /// Lookup and shape failures degrade to an absent value.
    Lax,
    /// Lookup and shape failures are reported as errors.
    Strict,
}

/// Splits a path spec into its mode and the path expression.
///
/// A path spec without a mode prefix is a strict-mode spec, and the entire
/// string is the expression.
///
/// ```
/// use sqljson::{parse_path_spec, PathMode};
///
/// assert_eq!(parse_path_spec("lax $.a"), (PathMode::Lax, "$.a"));
/// assert_eq!(parse_path_spec("STRICT $.a"), (PathMode::Strict, "$.a"));
/// assert_eq!(parse_path_spec("$.a"), (PathMode::Strict, "$.a"));
/// ```
pub fn parse_path_spec(path_spec: &str) -> (PathMode, &str) {
    match PATH_MODE_PATTERN.captures(path_spec) {
        Some(caps) => {
            let token = caps.get(1).map_or("", |m| m.as_str());
            let expr = caps.get(2).map_or(path_spec, |m| m.as_str());
            let mode = if token.eq_ignore_ascii_case("lax") {
                PathMode::Lax
            } else {
                PathMode::Strict
            };
            (mode, expr.trim())
        }
        None => (PathMode::Strict, path_spec.trim()),
    }
}

/// A compiled path spec: the evaluation mode plus the path expression
/// compiled by the path engine.
#[derive(Debug)]
pub struct PathSpec {
    mode: PathMode,
    path: JsonPath,
}

impl PathSpec {
    /// Compiles a path spec string.
    pub fn compile(path_spec: &str) -> Result<PathSpec, Error> {
        let (mode, expr) = parse_path_spec(path_spec);
        let path = JsonPath::parse(expr).map_err(|err| Error::InvalidJsonPath(err.to_string()))?;
        Ok(PathSpec { mode, path })
    }

    /// The evaluation mode of this spec.
    pub fn mode(&self) -> PathMode {
        self.mode
    }

    /// Runs the compiled expression against a document, producing the list
    /// of selected nodes.
    pub(crate) fn query<'a>(&self, doc: &'a Value) -> NodeList<'a> {
        self.path.query(doc)
    }
}
