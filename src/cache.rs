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

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::Error;
use crate::pathspec::PathSpec;

/// A thread-safe memoizing cache of compiled path specs, keyed by the raw
/// path-spec text.
///
/// Path specs are constant per call site, so entries are append-only and
/// never invalidated within the lifetime of the cache. Concurrent
/// `get_or_compile` calls for the same key are safe; at most one compiled
/// spec is retained. Only successful compilations are cached, a rejected
/// spec is recompiled (and rejected again) on every call.
#[derive(Debug, Default)]
pub struct PathCache {
    paths: DashMap<String, Arc<PathSpec>>,
}

impl PathCache {
    /// Creates an empty cache.
    pub fn new() -> PathCache {
        PathCache {
            paths: DashMap::new(),
        }
    }

    /// Returns the compiled form of `path_spec`, compiling and memoizing it
    /// on first use.
    pub fn get_or_compile(&self, path_spec: &str) -> Result<Arc<PathSpec>, Error> {
        if let Some(spec) = self.paths.get(path_spec) {
            return Ok(spec.value().clone());
        }
        let compiled = Arc::new(PathSpec::compile(path_spec)?);
        let entry = self.paths.entry(path_spec.to_string()).or_insert(compiled);
        Ok(entry.value().clone())
    }

    /// Number of cached path specs.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
