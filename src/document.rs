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

// The JSON document gateway. All parsing and serialization of document text
// goes through here so the rest of the crate never touches serde_json
// directly. Object maps are BTreeMap backed (the `preserve_order` feature
// stays off), which makes serialized key order sorted and the output
// byte-identical for structurally equal input.

use serde_json::Value;

use crate::error::Error;

/// Parses JSON text into a document value.
pub(crate) fn parse(input: &str) -> Result<Value, Error> {
    serde_json::from_str(input).map_err(|err| Error::InvalidJson(err.to_string()))
}

/// Serializes a document value to canonical JSON text with sorted object keys.
pub(crate) fn serialize(value: &Value) -> String {
    // Writing a Value to an in-memory buffer cannot fail.
    serde_json::to_string(value).expect("serializing an in-memory document value")
}

/// Whether the value is a scalar, i.e. neither an array nor an object.
pub(crate) fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Plain (unquoted) text form of a scalar value, used when coercing
/// `JSON_QUERY` array elements. Strings keep their contents verbatim,
/// numbers go through itoa/ryu, composites fall back to canonical JSON.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                itoa::Buffer::new().format(v).to_string()
            } else if let Some(v) = n.as_u64() {
                itoa::Buffer::new().format(v).to_string()
            } else if let Some(v) = n.as_f64() {
                ryu::Buffer::new().format(v).to_string()
            } else {
                n.to_string()
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => serialize(value),
    }
}
