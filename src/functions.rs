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

// The SQL-visible function surface: JSON_EXISTS, JSON_VALUE, JSON_QUERY,
// the JSON(value) constructor and the IS JSON predicates. Each path
// function consumes the adapter's EvalOutcome and dispatches on its
// behavior configuration; the free functions compile path specs per call,
// the Engine methods reuse a compiled-path cache.

use serde_json::Value;

use crate::behavior::ExistsOnError;
use crate::behavior::QueryOnEmptyOrError;
use crate::behavior::QueryReturnType;
use crate::behavior::QueryWrapper;
use crate::behavior::ValueOnEmptyOrError;
use crate::cache::PathCache;
use crate::document;
use crate::error::Error;
use crate::eval::eval_path_spec;
use crate::eval::EvalOutcome;
use crate::pathspec::PathMode;

const JSON_VALUE_FUNCTION_NAME: &str = "JSON_VALUE";
const JSON_QUERY_FUNCTION_NAME: &str = "JSON_QUERY";

/// A non-null `JSON_QUERY` result, shaped by the declared
/// [`QueryReturnType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    /// The result serialized as one JSON text.
    String(String),
    /// The result as element texts; `None` entries are SQL NULL elements.
    Array(Vec<Option<String>>),
}

/// `JSON_EXISTS(input, path_spec ... ON ERROR)`.
///
/// Reports whether the path selects a value. `Ok(None)` stands for SQL
/// UNKNOWN and is only produced by [`ExistsOnError::Unknown`].
///
/// ```
/// use sqljson::{json_exists, ExistsOnError};
///
/// let input = r#"{"a": {"b": 1}}"#;
/// assert_eq!(json_exists(input, "strict $.a.b", ExistsOnError::False), Ok(Some(true)));
/// assert_eq!(json_exists(input, "strict $.a.c", ExistsOnError::False), Ok(Some(false)));
/// ```
pub fn json_exists(
    input: &str,
    path_spec: &str,
    on_error: ExistsOnError,
) -> Result<Option<bool>, Error> {
    exists_result(eval(input, path_spec, None), on_error)
}

/// `JSON_VALUE(input, path_spec ... ON EMPTY ... ON ERROR)`.
///
/// Extracts a scalar from the document. The result is the selected scalar,
/// the configured default, or `None` for SQL NULL.
///
/// ```
/// use serde_json::json;
/// use sqljson::{json_value, ValueOnEmptyOrError};
///
/// let result = json_value(
///     r#"{"a": "x"}"#,
///     "lax $.a",
///     ValueOnEmptyOrError::Null,
///     None,
///     ValueOnEmptyOrError::Null,
///     None,
/// );
/// assert_eq!(result, Ok(Some(json!("x"))));
/// ```
pub fn json_value(
    input: &str,
    path_spec: &str,
    on_empty: ValueOnEmptyOrError,
    default_on_empty: Option<Value>,
    on_error: ValueOnEmptyOrError,
    default_on_error: Option<Value>,
) -> Result<Option<Value>, Error> {
    value_result(
        eval(input, path_spec, None),
        on_empty,
        default_on_empty,
        on_error,
        default_on_error,
    )
}

/// `JSON_QUERY(input, path_spec ... WRAPPER ... ON EMPTY ... ON ERROR)`.
///
/// Extracts an array or object from the document and coerces it to the
/// declared return representation; `None` is SQL NULL.
///
/// ```
/// use sqljson::{
///     json_query, QueryOnEmptyOrError, QueryResult, QueryReturnType, QueryWrapper,
/// };
///
/// let result = json_query(
///     r#"{"a": [1, 2]}"#,
///     "strict $.a",
///     QueryReturnType::String,
///     QueryWrapper::WithoutArray,
///     QueryOnEmptyOrError::Error,
///     QueryOnEmptyOrError::Error,
/// );
/// assert_eq!(result, Ok(Some(QueryResult::String("[1,2]".to_string()))));
/// ```
pub fn json_query(
    input: &str,
    path_spec: &str,
    return_type: QueryReturnType,
    wrapper: QueryWrapper,
    on_empty: QueryOnEmptyOrError,
    on_error: QueryOnEmptyOrError,
) -> Result<Option<QueryResult>, Error> {
    query_result(
        eval(input, path_spec, None),
        return_type,
        wrapper,
        on_empty,
        on_error,
    )
}

/// `JSON(input)`: validates the input and round-trips it to canonical form
/// with sorted object keys. Blank input is SQL NULL.
///
/// Canonicalization is a fixed point: `json(&json(x)?)` equals `json(x)`.
///
/// ```
/// use sqljson::json;
///
/// assert_eq!(json(" {\"b\":1,\"a\":2} "), Ok(Some("{\"a\":2,\"b\":1}".to_string())));
/// assert_eq!(json("  "), Ok(None));
/// assert!(json("{oops").is_err());
/// ```
pub fn json(input: &str) -> Result<Option<String>, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value = document::parse(trimmed)?;
    Ok(Some(document::serialize(&value)))
}

/// `input IS JSON VALUE`: whether the input parses as JSON at all.
pub fn is_json_value(input: &str) -> bool {
    document::parse(input).is_ok()
}

/// `input IS JSON OBJECT`.
pub fn is_json_object(input: &str) -> bool {
    matches!(document::parse(input), Ok(Value::Object(_)))
}

/// `input IS JSON ARRAY`.
pub fn is_json_array(input: &str) -> bool {
    matches!(document::parse(input), Ok(Value::Array(_)))
}

/// `input IS JSON SCALAR`: valid JSON that is neither an object nor an
/// array.
pub fn is_json_scalar(input: &str) -> bool {
    match document::parse(input) {
        Ok(value) => document::is_scalar(&value),
        Err(_) => false,
    }
}

/// An evaluation environment owning a [`PathCache`].
///
/// The free functions compile their path spec on every call; an `Engine`
/// memoizes compiled specs instead, which is what a query runtime wants
/// when the same call site runs over many rows. Engines are cheap to share
/// behind an `Arc` and safe to use from many threads.
///
/// ```
/// use sqljson::{Engine, ExistsOnError};
///
/// let engine = Engine::new();
/// for row in [r#"{"a":1}"#, r#"{"b":2}"#] {
///     let _ = engine.json_exists(row, "lax $.a", ExistsOnError::False);
/// }
/// assert_eq!(engine.cache().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    cache: PathCache,
}

impl Engine {
    /// Creates an engine with an empty path cache.
    pub fn new() -> Engine {
        Engine {
            cache: PathCache::new(),
        }
    }

    /// The compiled-path cache backing this engine.
    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    /// Cached variant of [`json_exists`].
    pub fn json_exists(
        &self,
        input: &str,
        path_spec: &str,
        on_error: ExistsOnError,
    ) -> Result<Option<bool>, Error> {
        exists_result(eval(input, path_spec, Some(&self.cache)), on_error)
    }

    /// Cached variant of [`json_value`].
    pub fn json_value(
        &self,
        input: &str,
        path_spec: &str,
        on_empty: ValueOnEmptyOrError,
        default_on_empty: Option<Value>,
        on_error: ValueOnEmptyOrError,
        default_on_error: Option<Value>,
    ) -> Result<Option<Value>, Error> {
        value_result(
            eval(input, path_spec, Some(&self.cache)),
            on_empty,
            default_on_empty,
            on_error,
            default_on_error,
        )
    }

    /// Cached variant of [`json_query`].
    pub fn json_query(
        &self,
        input: &str,
        path_spec: &str,
        return_type: QueryReturnType,
        wrapper: QueryWrapper,
        on_empty: QueryOnEmptyOrError,
        on_error: QueryOnEmptyOrError,
    ) -> Result<Option<QueryResult>, Error> {
        query_result(
            eval(input, path_spec, Some(&self.cache)),
            return_type,
            wrapper,
            on_empty,
            on_error,
        )
    }
}

fn eval(input: &str, path_spec: &str, cache: Option<&PathCache>) -> EvalOutcome {
    let doc = document::parse(input);
    eval_path_spec(&doc, path_spec, cache)
}

fn exists_result(outcome: EvalOutcome, on_error: ExistsOnError) -> Result<Option<bool>, Error> {
    match outcome {
        EvalOutcome::Failed(error) => match on_error {
            ExistsOnError::True => Ok(Some(true)),
            ExistsOnError::False => Ok(Some(false)),
            ExistsOnError::Error => Err(error),
            ExistsOnError::Unknown => Ok(None),
        },
        EvalOutcome::Resolved { value, .. } => Ok(Some(value.is_some())),
    }
}

fn value_result(
    outcome: EvalOutcome,
    on_empty: ValueOnEmptyOrError,
    default_on_empty: Option<Value>,
    on_error: ValueOnEmptyOrError,
    default_on_error: Option<Value>,
) -> Result<Option<Value>, Error> {
    let error = match outcome {
        // a strict path that selects nothing is an empty result here, not
        // an evaluation failure
        EvalOutcome::Failed(Error::StrictModeValueRequired) => {
            return value_on_empty(on_empty, default_on_empty)
        }
        EvalOutcome::Failed(error) => error,
        EvalOutcome::Resolved { mode, value } => match value {
            // an absent value dispatches on ON EMPTY, and a lax-mode
            // non-scalar counts as absent too
            None => return value_on_empty(on_empty, default_on_empty),
            Some(value) if mode == PathMode::Lax && !document::is_scalar(&value) => {
                return value_on_empty(on_empty, default_on_empty)
            }
            Some(value) if mode == PathMode::Strict && !document::is_scalar(&value) => {
                Error::ScalarValueRequired(document::serialize(&value))
            }
            Some(value) => return Ok(Some(value)),
        },
    };
    match on_error {
        ValueOnEmptyOrError::Error => Err(error),
        ValueOnEmptyOrError::Null => Ok(None),
        ValueOnEmptyOrError::Default => Ok(default_on_error),
    }
}

fn value_on_empty(
    on_empty: ValueOnEmptyOrError,
    default_on_empty: Option<Value>,
) -> Result<Option<Value>, Error> {
    match on_empty {
        ValueOnEmptyOrError::Error => Err(Error::EmptyResultNotAllowed(JSON_VALUE_FUNCTION_NAME)),
        ValueOnEmptyOrError::Null => Ok(None),
        ValueOnEmptyOrError::Default => Ok(default_on_empty),
    }
}

fn query_result(
    outcome: EvalOutcome,
    return_type: QueryReturnType,
    wrapper: QueryWrapper,
    on_empty: QueryOnEmptyOrError,
    on_error: QueryOnEmptyOrError,
) -> Result<Option<QueryResult>, Error> {
    let error = match outcome {
        // a strict path that selects nothing is an empty result here, not
        // an evaluation failure
        EvalOutcome::Failed(Error::StrictModeValueRequired) => {
            return query_on_empty(on_empty, return_type)
        }
        EvalOutcome::Failed(error) => error,
        EvalOutcome::Resolved { mode, value } => {
            // an absent value short-circuits to the empty dispatch, the
            // wrapper only applies to a present one
            let wrapped = value.map(|value| wrap_query_value(value, wrapper));
            match wrapped {
                None => return query_on_empty(on_empty, return_type),
                Some(value) if mode == PathMode::Lax && document::is_scalar(&value) => {
                    return query_on_empty(on_empty, return_type)
                }
                Some(value) if mode == PathMode::Strict && document::is_scalar(&value) => {
                    Error::ArrayOrObjectValueRequired(document::serialize(&value))
                }
                Some(value) => match coerce_query_value(value, return_type) {
                    Ok(result) => return Ok(Some(result)),
                    Err(error) => error,
                },
            }
        }
    };
    query_on_error(on_error, return_type, error)
}

fn wrap_query_value(value: Value, wrapper: QueryWrapper) -> Value {
    match wrapper {
        QueryWrapper::WithoutArray => value,
        QueryWrapper::UnconditionalArray => Value::Array(vec![value]),
        QueryWrapper::ConditionalArray => {
            if value.is_array() {
                value
            } else {
                Value::Array(vec![value])
            }
        }
    }
}

fn coerce_query_value(value: Value, return_type: QueryReturnType) -> Result<QueryResult, Error> {
    match return_type {
        QueryReturnType::String => Ok(QueryResult::String(document::serialize(&value))),
        QueryReturnType::Array => match value {
            Value::Array(items) => {
                let mut elements = Vec::with_capacity(items.len());
                for item in items {
                    let element = match item {
                        Value::Null => None,
                        item if document::is_scalar(&item) => Some(document::scalar_text(&item)),
                        item => Some(document::serialize(&item)),
                    };
                    elements.push(element);
                }
                Ok(QueryResult::Array(elements))
            }
            value => Err(Error::ArrayValueRequired(document::serialize(&value))),
        },
    }
}

fn query_on_empty(
    on_empty: QueryOnEmptyOrError,
    return_type: QueryReturnType,
) -> Result<Option<QueryResult>, Error> {
    match on_empty {
        QueryOnEmptyOrError::Error => Err(Error::EmptyResultNotAllowed(JSON_QUERY_FUNCTION_NAME)),
        QueryOnEmptyOrError::Null => Ok(None),
        QueryOnEmptyOrError::EmptyArray => Ok(Some(empty_array_result(return_type))),
        QueryOnEmptyOrError::EmptyObject => match return_type {
            QueryReturnType::String => Ok(Some(QueryResult::String("{}".to_string()))),
            QueryReturnType::Array => Err(Error::IllegalEmptyBehavior {
                function: JSON_QUERY_FUNCTION_NAME,
                behavior: on_empty.to_string(),
            }),
        },
    }
}

fn query_on_error(
    on_error: QueryOnEmptyOrError,
    return_type: QueryReturnType,
    error: Error,
) -> Result<Option<QueryResult>, Error> {
    match on_error {
        QueryOnEmptyOrError::Error => Err(error),
        QueryOnEmptyOrError::Null => Ok(None),
        QueryOnEmptyOrError::EmptyArray => Ok(Some(empty_array_result(return_type))),
        QueryOnEmptyOrError::EmptyObject => match return_type {
            QueryReturnType::String => Ok(Some(QueryResult::String("{}".to_string()))),
            QueryReturnType::Array => Err(Error::IllegalErrorBehavior {
                function: JSON_QUERY_FUNCTION_NAME,
                behavior: on_error.to_string(),
            }),
        },
    }
}

fn empty_array_result(return_type: QueryReturnType) -> QueryResult {
    match return_type {
        QueryReturnType::Array => QueryResult::Array(Vec::new()),
        QueryReturnType::String => QueryResult::String("[]".to_string()),
    }
}
