//! Proptest strategies for URLs, headers and JSON bodies.

use proptest::prelude::*;

/// Strategy for URL schemes accepted as absolute.
pub fn scheme() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("http".to_string()),
        Just("https".to_string()),
        "[a-z][a-z0-9]{0,7}",
    ]
}

/// Strategy for absolute base URLs without a trailing slash.
pub fn base_url() -> impl Strategy<Value = String> {
    (
        scheme(),
        "[a-z][a-z0-9-]{0,15}",
        prop::option::of(1u16..),
        prop::collection::vec("[a-z0-9]{1,8}", 0..3),
    )
        .prop_map(|(scheme, host, port, prefix)| {
            let mut url = format!("{}://{}", scheme, host);
            if let Some(port) = port {
                url.push_str(&format!(":{}", port));
            }
            for segment in prefix {
                url.push('/');
                url.push_str(&segment);
            }
            url
        })
}

/// Strategy for relative request targets starting with `/`.
pub fn relative_path() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-z0-9_-]{1,12}", 1..5),
        prop::option::of("[a-z]{1,6}=[a-z0-9]{1,6}"),
    )
        .prop_map(|(segments, query)| {
            let mut path = format!("/{}", segments.join("/"));
            if let Some(query) = query {
                path.push('?');
                path.push_str(&query);
            }
            path
        })
}

/// Strategy for header names in arbitrary case.
pub fn header_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,10}(-[A-Za-z0-9]{1,10}){0,2}"
}

/// Strategy for printable header values.
pub fn header_value() -> impl Strategy<Value = String> {
    "[ -~]{0,40}"
}

/// Strategy for header sets keyed by name.
pub fn header_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((header_name(), header_value()), 0..8)
}

/// Strategy for generating valid identifiers
pub fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

/// Strategy for flat JSON objects
pub fn json_object() -> impl Strategy<Value = serde_json::Value> {
    prop::collection::btree_map(
        identifier(),
        prop_oneof![
            any::<bool>().prop_map(serde_json::Value::Bool),
            any::<i64>().prop_map(|n| serde_json::Value::Number(n.into())),
            "[a-z ]{0,20}".prop_map(serde_json::Value::String),
            Just(serde_json::Value::Null),
        ],
        0..6,
    )
    .prop_map(|map| serde_json::Value::Object(map.into_iter().collect()))
}
