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

// The path evaluation adapter. It drives the external path engine against
// a parsed document and folds every possible failure into an
// `EvalOutcome`, applying the mode discipline: strict mode reports
// document-parse failures, rejected path expressions and empty results as
// errors, lax mode suppresses all of them and degrades to an absent value.

use std::sync::Arc;

use serde_json::Value;

use crate::cache::PathCache;
use crate::error::Error;
use crate::pathspec::parse_path_spec;
use crate::pathspec::PathMode;
use crate::pathspec::PathSpec;

/// Outcome of evaluating a path spec against a document: either a resolved
/// value (possibly absent) or a captured failure.
///
/// Invariant: `Resolved { mode: Strict, value: None }` is never built.
/// A strict-mode evaluation that selects nothing is expressed as
/// `Failed(StrictModeValueRequired)`; `JSON_VALUE` and `JSON_QUERY` treat
/// that failure as their empty case, `JSON_EXISTS` dispatches it like any
/// other failure.
#[derive(Debug)]
pub(crate) enum EvalOutcome {
    Resolved {
        mode: PathMode,
        value: Option<Value>,
    },
    Failed(Error),
}

impl EvalOutcome {
    fn resolved(mode: PathMode, value: Option<Value>) -> EvalOutcome {
        match (mode, value) {
            (PathMode::Strict, None) => EvalOutcome::Failed(Error::StrictModeValueRequired),
            (mode, value) => EvalOutcome::Resolved { mode, value },
        }
    }

    fn failed(mode: PathMode, error: Error) -> EvalOutcome {
        match mode {
            // lax mode suppresses, degrading to "no value"
            PathMode::Lax => EvalOutcome::Resolved {
                mode: PathMode::Lax,
                value: None,
            },
            PathMode::Strict => EvalOutcome::Failed(error),
        }
    }
}

/// Evaluates `path_spec` against an already-parsed document (or an upstream
/// parse failure), compiling the spec through `cache` when one is supplied.
pub(crate) fn eval_path_spec(
    doc: &Result<Value, Error>,
    path_spec: &str,
    cache: Option<&PathCache>,
) -> EvalOutcome {
    let (mode, _) = parse_path_spec(path_spec);
    let doc = match doc {
        Ok(doc) => doc,
        Err(error) => return EvalOutcome::failed(mode, error.clone()),
    };
    let spec = match compile(path_spec, cache) {
        Ok(spec) => spec,
        Err(error) => return EvalOutcome::failed(mode, error),
    };
    let nodes = spec.query(doc).all();
    let value = match nodes.len() {
        0 => None,
        // a definite path selects a single node, which is the value itself
        1 => Some(nodes[0].clone()),
        // an indefinite path selects several nodes, reported as one array
        _ => Some(Value::Array(nodes.into_iter().cloned().collect())),
    };
    EvalOutcome::resolved(mode, value)
}

fn compile(path_spec: &str, cache: Option<&PathCache>) -> Result<Arc<PathSpec>, Error> {
    match cache {
        Some(cache) => cache.get_or_compile(path_spec),
        None => PathSpec::compile(path_spec).map(Arc::new),
    }
}
