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

//! `sqljson` implements the SQL:2016 SQL/JSON query functions — `JSON_EXISTS`,
//! `JSON_VALUE`, `JSON_QUERY`, the `JSON(value)` constructor and the `IS JSON`
//! predicates — layered on top of an external JSON path engine.
//!
//! ## Features
//!
//! - Full `lax`/`strict` path-mode semantics: strict mode fails loudly on
//!   lookup problems and shape mismatches, lax mode degrades them to an
//!   absent value.
//! - The complete `ON EMPTY` / `ON ERROR` behavior matrix of the standard,
//!   including defaults, wrapper behaviors and the `STRING`/`ARRAY` return
//!   shapes of `JSON_QUERY`.
//! - Errors are values: user-data conditions are captured during evaluation
//!   and only surface when the configured behavior is `ERROR`, while
//!   configuration misuse always propagates.
//! - Deterministic output: serialization emits object keys in sorted order,
//!   so structurally equal input produces byte-identical text.
//! - An optional [`Engine`] holding a thread-safe memoizing cache of
//!   compiled path specs for read-heavy call sites.
//!
//! ## Example
//!
//! ```
//! use sqljson::{json_query, QueryOnEmptyOrError, QueryResult, QueryReturnType, QueryWrapper};
//!
//! let result = json_query(
//!     r#"{"a": [1, 2]}"#,
//!     "strict $.a",
//!     QueryReturnType::Array,
//!     QueryWrapper::WithoutArray,
//!     QueryOnEmptyOrError::Error,
//!     QueryOnEmptyOrError::Error,
//! )
//! .unwrap();
//! assert_eq!(
//!     result,
//!     Some(QueryResult::Array(vec![
//!         Some("1".to_string()),
//!         Some("2".to_string()),
//!     ]))
//! );
//! ```

mod behavior;
mod cache;
mod document;
mod error;
mod eval;
mod functions;
mod pathspec;

pub use behavior::ExistsOnError;
pub use behavior::QueryOnEmptyOrError;
pub use behavior::QueryReturnType;
pub use behavior::QueryWrapper;
pub use behavior::ValueOnEmptyOrError;
pub use cache::PathCache;
pub use error::Error;
pub use functions::*;
pub use pathspec::parse_path_spec;
pub use pathspec::PathMode;
pub use pathspec::PathSpec;
