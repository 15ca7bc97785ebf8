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

use serde_json::json;

use sqljson::is_json_array;
use sqljson::is_json_object;
use sqljson::is_json_scalar;
use sqljson::is_json_value;
use sqljson::json_exists;
use sqljson::json_query;
use sqljson::json_value;
use sqljson::Engine;
use sqljson::Error;
use sqljson::ExistsOnError;
use sqljson::QueryOnEmptyOrError;
use sqljson::QueryResult;
use sqljson::QueryReturnType;
use sqljson::QueryWrapper;
use sqljson::ValueOnEmptyOrError;

#[test]
fn test_json_exists() {
    let input = r#"{"a": {"b": 1}, "arr": [1, 2]}"#;

    let sources = vec![
        ("strict $.a.b", Some(true)),
        ("lax $.a.b", Some(true)),
        ("strict $.arr[1]", Some(true)),
        ("lax $.a.c", Some(false)),
        ("lax $.missing", Some(false)),
        // no mode prefix defaults to strict
        ("$.a.b", Some(true)),
    ];
    for (path_spec, expected) in sources {
        assert_eq!(
            json_exists(input, path_spec, ExistsOnError::False),
            Ok(expected),
            "path spec: {path_spec}"
        );
    }
}

#[test]
fn test_json_exists_on_error() {
    // strict mode reports the missing member through the error behavior
    assert_eq!(
        json_exists(r#"{"a":1}"#, "strict $.b", ExistsOnError::False),
        Ok(Some(false))
    );
    assert_eq!(
        json_exists(r#"{"a":1}"#, "strict $.b", ExistsOnError::True),
        Ok(Some(true))
    );
    assert_eq!(
        json_exists(r#"{"a":1}"#, "strict $.b", ExistsOnError::Unknown),
        Ok(None)
    );
    assert!(json_exists(r#"{"a":1}"#, "strict $.b", ExistsOnError::Error).is_err());

    // an invalid document is an error under strict mode
    assert_eq!(
        json_exists("not json", "strict $.a", ExistsOnError::Unknown),
        Ok(None)
    );
    assert!(matches!(
        json_exists("not json", "strict $.a", ExistsOnError::Error),
        Err(Error::InvalidJson(_))
    ));
}

#[test]
fn test_json_exists_lax_never_errors() {
    // lax failures never escalate, the error behavior is irrelevant
    let behaviors = [
        ExistsOnError::True,
        ExistsOnError::False,
        ExistsOnError::Error,
        ExistsOnError::Unknown,
    ];
    for on_error in behaviors {
        assert_eq!(
            json_exists(r#"{"a":1}"#, "lax $.missing", on_error),
            Ok(Some(false))
        );
        assert_eq!(
            json_exists("not json", "lax $.a", on_error),
            Ok(Some(false))
        );
    }
}

#[test]
fn test_json_value_scalar() {
    let input = r#"{"str": "x", "int": 42, "float": 2.5, "bool": true, "null": null}"#;

    let result = json_value(
        input,
        "strict $.str",
        ValueOnEmptyOrError::Null,
        None,
        ValueOnEmptyOrError::Null,
        None,
    );
    assert_eq!(result, Ok(Some(json!("x"))));

    let result = json_value(
        input,
        "lax $.int",
        ValueOnEmptyOrError::Null,
        None,
        ValueOnEmptyOrError::Null,
        None,
    );
    assert_eq!(result, Ok(Some(json!(42))));

    let result = json_value(
        input,
        "strict $.bool",
        ValueOnEmptyOrError::Error,
        None,
        ValueOnEmptyOrError::Error,
        None,
    );
    assert_eq!(result, Ok(Some(json!(true))));

    // a selected JSON null is a present scalar value
    let result = json_value(
        input,
        "strict $.null",
        ValueOnEmptyOrError::Error,
        None,
        ValueOnEmptyOrError::Error,
        None,
    );
    assert_eq!(result, Ok(Some(json!(null))));
}

#[test]
fn test_json_value_on_empty() {
    let input = r#"{"a": 1}"#;

    let result = json_value(
        input,
        "lax $.missing",
        ValueOnEmptyOrError::Null,
        None,
        ValueOnEmptyOrError::Error,
        None,
    );
    assert_eq!(result, Ok(None));

    let result = json_value(
        input,
        "lax $.missing",
        ValueOnEmptyOrError::Default,
        Some(json!("fallback")),
        ValueOnEmptyOrError::Error,
        None,
    );
    assert_eq!(result, Ok(Some(json!("fallback"))));

    let result = json_value(
        input,
        "lax $.missing",
        ValueOnEmptyOrError::Error,
        None,
        ValueOnEmptyOrError::Null,
        None,
    );
    assert_eq!(result, Err(Error::EmptyResultNotAllowed("JSON_VALUE")));

    // the empty dispatch also covers a strict path that selects nothing
    let result = json_value(
        input,
        "strict $.missing",
        ValueOnEmptyOrError::Default,
        Some(json!(0)),
        ValueOnEmptyOrError::Error,
        None,
    );
    assert_eq!(result, Ok(Some(json!(0))));
}

#[test]
fn test_json_value_non_scalar() {
    let input = r#"{"a": {"b": 1}}"#;

    // strict mode requires a scalar
    let result = json_value(
        input,
        "strict $.a",
        ValueOnEmptyOrError::Error,
        None,
        ValueOnEmptyOrError::Error,
        None,
    );
    assert_eq!(
        result,
        Err(Error::ScalarValueRequired(r#"{"b":1}"#.to_string()))
    );

    // lax mode treats a non-scalar as an empty result
    let result = json_value(
        input,
        "lax $.a",
        ValueOnEmptyOrError::Default,
        Some(json!("empty")),
        ValueOnEmptyOrError::Error,
        None,
    );
    assert_eq!(result, Ok(Some(json!("empty"))));
}

#[test]
fn test_json_value_on_error() {
    // invalid document under strict mode takes the error path
    let result = json_value(
        "not json",
        "strict $.a",
        ValueOnEmptyOrError::Error,
        None,
        ValueOnEmptyOrError::Default,
        Some(json!(-1)),
    );
    assert_eq!(result, Ok(Some(json!(-1))));

    let result = json_value(
        "not json",
        "strict $.a",
        ValueOnEmptyOrError::Error,
        None,
        ValueOnEmptyOrError::Null,
        None,
    );
    assert_eq!(result, Ok(None));

    assert!(json_value(
        "not json",
        "strict $.a",
        ValueOnEmptyOrError::Error,
        None,
        ValueOnEmptyOrError::Error,
        None,
    )
    .is_err());
}

#[test]
fn test_json_value_null_behaviors_never_error() {
    let sources = vec![
        (r#"{"a":1}"#, "strict $.a"),
        (r#"{"a":1}"#, "strict $.missing"),
        (r#"{"a":{"b":1}}"#, "strict $.a"),
        (r#"{"a":[1]}"#, "lax $.a"),
        ("not json", "strict $.a"),
        ("not json", "lax $.a"),
        (r#"{"a":1}"#, "strict $(["),
    ];
    for (input, path_spec) in sources {
        let result = json_value(
            input,
            path_spec,
            ValueOnEmptyOrError::Null,
            None,
            ValueOnEmptyOrError::Null,
            None,
        );
        assert!(result.is_ok(), "input: {input}, path spec: {path_spec}");
    }
}

#[test]
fn test_json_query_string() {
    let input = r#"{"a": [1, 2], "o": {"c": 3, "b": 2}}"#;

    let result = json_query(
        input,
        "strict $.a",
        QueryReturnType::String,
        QueryWrapper::WithoutArray,
        QueryOnEmptyOrError::Error,
        QueryOnEmptyOrError::Error,
    );
    assert_eq!(result, Ok(Some(QueryResult::String("[1,2]".to_string()))));

    // keys come out sorted
    let result = json_query(
        input,
        "strict $.o",
        QueryReturnType::String,
        QueryWrapper::WithoutArray,
        QueryOnEmptyOrError::Error,
        QueryOnEmptyOrError::Error,
    );
    assert_eq!(
        result,
        Ok(Some(QueryResult::String(r#"{"b":2,"c":3}"#.to_string())))
    );
}

#[test]
fn test_json_query_array() {
    let result = json_query(
        r#"{"a": [1, 2]}"#,
        "strict $.a",
        QueryReturnType::Array,
        QueryWrapper::WithoutArray,
        QueryOnEmptyOrError::Error,
        QueryOnEmptyOrError::Error,
    );
    assert_eq!(
        result,
        Ok(Some(QueryResult::Array(vec![
            Some("1".to_string()),
            Some("2".to_string()),
        ])))
    );

    // scalar elements convert to plain text, composites serialize, and
    // null elements stay SQL NULL
    let result = json_query(
        r#"{"a": [1, null, "x", {"b": 2}, [3]]}"#,
        "strict $.a",
        QueryReturnType::Array,
        QueryWrapper::WithoutArray,
        QueryOnEmptyOrError::Error,
        QueryOnEmptyOrError::Error,
    );
    assert_eq!(
        result,
        Ok(Some(QueryResult::Array(vec![
            Some("1".to_string()),
            None,
            Some("x".to_string()),
            Some(r#"{"b":2}"#.to_string()),
            Some("[3]".to_string()),
        ])))
    );
}

#[test]
fn test_json_query_wrapper() {
    let input = r#"{"a": 1, "arr": [1, 2]}"#;
    let query = |path_spec: &str, wrapper| {
        json_query(
            input,
            path_spec,
            QueryReturnType::String,
            wrapper,
            QueryOnEmptyOrError::Null,
            QueryOnEmptyOrError::Error,
        )
    };

    // unconditional: always wrapped
    assert_eq!(
        query("lax $.a", QueryWrapper::UnconditionalArray),
        Ok(Some(QueryResult::String("[1]".to_string())))
    );
    assert_eq!(
        query("lax $.arr", QueryWrapper::UnconditionalArray),
        Ok(Some(QueryResult::String("[[1,2]]".to_string())))
    );

    // conditional: wrapped only when not already an array
    assert_eq!(
        query("lax $.a", QueryWrapper::ConditionalArray),
        Ok(Some(QueryResult::String("[1]".to_string())))
    );
    assert_eq!(
        query("lax $.arr", QueryWrapper::ConditionalArray),
        Ok(Some(QueryResult::String("[1,2]".to_string())))
    );

    // without: a lax scalar falls through to the empty dispatch
    assert_eq!(query("lax $.a", QueryWrapper::WithoutArray), Ok(None));
}

#[test]
fn test_json_query_strict_scalar_is_error() {
    let result = json_query(
        r#"{"a": 1}"#,
        "strict $.a",
        QueryReturnType::String,
        QueryWrapper::WithoutArray,
        QueryOnEmptyOrError::Null,
        QueryOnEmptyOrError::Error,
    );
    assert_eq!(result, Err(Error::ArrayOrObjectValueRequired("1".to_string())));

    let result = json_query(
        r#"{"a": 1}"#,
        "strict $.a",
        QueryReturnType::String,
        QueryWrapper::WithoutArray,
        QueryOnEmptyOrError::Error,
        QueryOnEmptyOrError::Null,
    );
    assert_eq!(result, Ok(None));
}

#[test]
fn test_json_query_on_empty() {
    let input = r#"{"a": 1}"#;
    let query = |on_empty, return_type| {
        json_query(
            input,
            "strict $.b",
            return_type,
            QueryWrapper::WithoutArray,
            on_empty,
            QueryOnEmptyOrError::Error,
        )
    };

    // empty path result dispatches on ON EMPTY
    assert_eq!(query(QueryOnEmptyOrError::Null, QueryReturnType::String), Ok(None));
    assert_eq!(
        query(QueryOnEmptyOrError::EmptyArray, QueryReturnType::String),
        Ok(Some(QueryResult::String("[]".to_string())))
    );
    assert_eq!(
        query(QueryOnEmptyOrError::EmptyArray, QueryReturnType::Array),
        Ok(Some(QueryResult::Array(Vec::new())))
    );
    assert_eq!(
        query(QueryOnEmptyOrError::EmptyObject, QueryReturnType::String),
        Ok(Some(QueryResult::String("{}".to_string())))
    );
    assert_eq!(
        query(QueryOnEmptyOrError::Error, QueryReturnType::String),
        Err(Error::EmptyResultNotAllowed("JSON_QUERY"))
    );

    // EMPTY_OBJECT cannot be represented in an ARRAY return type
    assert_eq!(
        query(QueryOnEmptyOrError::EmptyObject, QueryReturnType::Array),
        Err(Error::IllegalEmptyBehavior {
            function: "JSON_QUERY",
            behavior: "EMPTY_OBJECT".to_string(),
        })
    );
}

#[test]
fn test_json_query_on_error() {
    let query = |on_error, return_type| {
        json_query(
            "not json",
            "strict $.a",
            return_type,
            QueryWrapper::WithoutArray,
            QueryOnEmptyOrError::Error,
            on_error,
        )
    };

    assert_eq!(query(QueryOnEmptyOrError::Null, QueryReturnType::String), Ok(None));
    assert_eq!(
        query(QueryOnEmptyOrError::EmptyArray, QueryReturnType::String),
        Ok(Some(QueryResult::String("[]".to_string())))
    );
    assert_eq!(
        query(QueryOnEmptyOrError::EmptyObject, QueryReturnType::String),
        Ok(Some(QueryResult::String("{}".to_string())))
    );
    assert!(matches!(
        query(QueryOnEmptyOrError::Error, QueryReturnType::String),
        Err(Error::InvalidJson(_))
    ));
    assert_eq!(
        query(QueryOnEmptyOrError::EmptyObject, QueryReturnType::Array),
        Err(Error::IllegalErrorBehavior {
            function: "JSON_QUERY",
            behavior: "EMPTY_OBJECT".to_string(),
        })
    );
}

#[test]
fn test_json_query_indefinite_path() {
    // several selected nodes are reported as one synthesized array
    let result = json_query(
        r#"{"a": {"c": 1}, "b": {"c": 2}}"#,
        "lax $.*.c",
        QueryReturnType::String,
        QueryWrapper::WithoutArray,
        QueryOnEmptyOrError::Error,
        QueryOnEmptyOrError::Error,
    );
    assert_eq!(result, Ok(Some(QueryResult::String("[1,2]".to_string()))));
}

#[test]
fn test_json_constructor() {
    assert_eq!(
        sqljson::json(" {\"b\":1,\"a\":2} "),
        Ok(Some(r#"{"a":2,"b":1}"#.to_string()))
    );
    assert_eq!(sqljson::json("[1, 2,  3]"), Ok(Some("[1,2,3]".to_string())));
    assert_eq!(sqljson::json("\"x\""), Ok(Some("\"x\"".to_string())));
    assert_eq!(sqljson::json(""), Ok(None));
    assert_eq!(sqljson::json("   "), Ok(None));
    assert!(matches!(sqljson::json("{oops"), Err(Error::InvalidJson(_))));

    // canonicalization is a fixed point
    let sources = vec![
        r#" {"z": {"b": 1, "a": [3, 2]}, "y": null} "#,
        r#"[{"k":"v"}, 1.5, true]"#,
        r#""plain""#,
    ];
    for source in sources {
        let once = sqljson::json(source).unwrap().unwrap();
        let twice = sqljson::json(&once).unwrap().unwrap();
        assert_eq!(once, twice, "source: {source}");
    }
}

#[test]
fn test_is_json_predicates() {
    assert!(is_json_object("{}"));
    assert!(is_json_object(r#"{"a": 1}"#));
    assert!(!is_json_object("[]"));

    assert!(is_json_array("[]"));
    assert!(is_json_array("[1, 2]"));
    assert!(!is_json_array("{}"));

    assert!(is_json_scalar("\"x\""));
    assert!(is_json_scalar("1"));
    assert!(is_json_scalar("null"));
    assert!(!is_json_scalar("{}"));
    assert!(!is_json_scalar("[1]"));

    assert!(is_json_value("{}"));
    assert!(is_json_value("[]"));
    assert!(is_json_value("1"));
    assert!(!is_json_value("not json"));
    assert!(!is_json_value(""));
}

#[test]
fn test_engine_matches_free_functions() {
    let engine = Engine::new();
    let input = r#"{"a": {"b": 1}, "arr": [1, null]}"#;

    assert_eq!(
        engine.json_exists(input, "strict $.a.b", ExistsOnError::False),
        json_exists(input, "strict $.a.b", ExistsOnError::False)
    );
    assert_eq!(
        engine.json_value(
            input,
            "lax $.a.b",
            ValueOnEmptyOrError::Null,
            None,
            ValueOnEmptyOrError::Null,
            None,
        ),
        json_value(
            input,
            "lax $.a.b",
            ValueOnEmptyOrError::Null,
            None,
            ValueOnEmptyOrError::Null,
            None,
        )
    );
    assert_eq!(
        engine.json_query(
            input,
            "strict $.arr",
            QueryReturnType::Array,
            QueryWrapper::WithoutArray,
            QueryOnEmptyOrError::Error,
            QueryOnEmptyOrError::Error,
        ),
        json_query(
            input,
            "strict $.arr",
            QueryReturnType::Array,
            QueryWrapper::WithoutArray,
            QueryOnEmptyOrError::Error,
            QueryOnEmptyOrError::Error,
        )
    );
    assert_eq!(engine.cache().len(), 3);
}
