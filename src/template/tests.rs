use std::sync::Arc;

use super::*;

/// Build an expected chain from `(value, field, composite)` triples.
fn chain(nodes: &[(&str, Option<&str>, bool)]) -> Segment {
    let mut iter = nodes.iter().rev().map(|(value, field, composite)| {
        Segment::new(*value, field.map(Arc::from), *composite)
    });
    let mut head = iter.next().expect("at least one node");
    for mut node in iter {
        node.set_next(head);
        head = node;
    }
    head
}

fn compile(template: &str) -> Path {
    Path::compile(template).unwrap_or_else(|e| panic!("{template}: {e}"))
}

fn values(pairs: &[(&str, &str)]) -> Values {
    pairs.iter().copied().collect()
}

#[test]
fn test_compile_root() {
    assert_eq!(compile("").head(), &Segment::root());
    assert_eq!(compile("/").head(), &Segment::root());
    assert_eq!(compile("").len(), 1);
}

#[test]
fn test_compile_literals() {
    assert_eq!(compile("/v1").head(), &chain(&[("v1", None, false)]));
    assert_eq!(
        compile("/v1/articles").head(),
        &chain(&[("v1", None, false), ("articles", None, false)])
    );
}

#[test]
fn test_compile_field() {
    assert_eq!(
        compile("/v1/articles/{value}").head(),
        &chain(&[
            ("v1", None, false),
            ("articles", None, false),
            ("*", Some("value"), false),
        ])
    );
    assert_eq!(
        compile("/v1/articles/{value}/data").head(),
        &chain(&[
            ("v1", None, false),
            ("articles", None, false),
            ("*", Some("value"), false),
            ("data", None, false),
        ])
    );
}

#[test]
fn test_compile_field_value() {
    assert_eq!(
        compile("/v1/articles/{value=data/*}").head(),
        &chain(&[
            ("v1", None, false),
            ("articles", None, false),
            ("data", Some("value"), false),
            ("*", Some("value"), true),
        ])
    );
    assert_eq!(
        compile("/v1/books/articles/{value=data/items/*}/symbol/{number}").head(),
        &chain(&[
            ("v1", None, false),
            ("books", None, false),
            ("articles", None, false),
            ("data", Some("value"), false),
            ("items", Some("value"), true),
            ("*", Some("value"), true),
            ("symbol", None, false),
            ("*", Some("number"), false),
        ])
    );
}

#[test]
fn test_compile_wildcards() {
    assert_eq!(
        compile("/v1/tables/*").head(),
        &chain(&[("v1", None, false), ("tables", None, false), ("*", None, false)])
    );
    assert_eq!(
        compile("/v1/tables/**").head(),
        &chain(&[("v1", None, false), ("tables", None, false), ("**", None, false)])
    );
}

#[test]
fn test_compile_normalizes_case_and_slashes() {
    assert_eq!(compile("/V1/Articles/{Value}/"), compile("v1/articles/{value}"));
    assert_eq!(compile("/v1/articles  "), compile("/v1/articles"));
    assert_eq!(compile("/V1/{Name}").to_string(), "/v1/{name}");
}

#[test]
fn test_compile_is_deterministic() {
    let template = "/v1/books/articles/{value=data/items/*}/symbol/{number}";
    assert_eq!(compile(template), compile(template));
}

#[test]
fn test_compile_accepts_verb_suffix() {
    let path = compile("/v1/books:batchGet");
    assert_eq!(path.head().next().map(Segment::value), Some("books:batchget"));
    assert!(path.matches("/v1/books:batchGet").is_some());
    assert!(path.matches("/v1/books").is_none());
}

#[test]
fn test_compile_rejects_whitespace_segment() {
    for template in ["/ /", "/v1/a b", "/v1/ /articles"] {
        match Path::compile(template) {
            Err(TemplateError::InvalidSegmentFormat { template: t, .. }) => {
                assert_eq!(t, template)
            }
            other => panic!("{template:?}: unexpected {other:?}"),
        }
    }
}

#[test]
fn test_compile_trims_surrounding_whitespace() {
    assert_eq!(
        compile(" /v1/articles").head(),
        &chain(&[("v1", None, false), ("articles", None, false)])
    );
    assert_eq!(
        compile("\n/v1/articles/{id}\t").head(),
        &chain(&[
            ("v1", None, false),
            ("articles", None, false),
            ("*", Some("id"), false),
        ])
    );
    assert_eq!(compile(" /").head(), &Segment::root());
}

#[test]
fn test_compile_rejects_malformed_braces() {
    for template in [
        "/v1/{}",
        "/v1/{value",
        "/v1/value}",
        "/v1/a{b}",
        "/v1/{a{b}/c}",
    ] {
        assert!(
            matches!(
                Path::compile(template),
                Err(TemplateError::InvalidSegmentFormat { .. })
            ),
            "{template}"
        );
    }
}

#[test]
fn test_compile_rejects_empty_field_value() {
    let err = Path::compile("/v1/articles/{value=/}").unwrap_err();
    assert_eq!(
        err,
        TemplateError::InvalidFieldValueFormat {
            template: "/v1/articles/{value=/}".to_string(),
            value: "/".to_string(),
        }
    );
    assert!(err.to_string().contains("/v1/articles/{value=/}"));
}

#[test]
fn test_compile_rejects_segments_after_multi_wildcard() {
    let err = Path::compile("/v1/**/tail").unwrap_err();
    assert!(matches!(err, TemplateError::MultiWildcardNotLast { .. }));
    assert_eq!(err.template(), "/v1/**/tail");

    let err = Path::compile("/v1/{rest=a/**}/tail").unwrap_err();
    assert!(matches!(err, TemplateError::MultiWildcardNotLast { .. }));
}

#[test]
fn test_display_round_trips_normalized_template() {
    for template in [
        "/",
        "/v1/articles",
        "/v1/articles/{value}",
        "/v1/articles/{value=data/*}",
        "/v1/articles/{value=data2/symbol/**}",
        "/v1/books/articles/{value=data/items/*}/symbol/{number}",
        "/v1/tables/**",
    ] {
        let path = compile(template);
        assert_eq!(path.to_string(), template);
        assert_eq!(compile(&path.to_string()), path);
    }
}

#[test]
fn test_from_str() {
    let path: Path = "/v1/{name}".parse().unwrap();
    assert_eq!(path, compile("/v1/{name}"));
    assert!("/ /".parse::<Path>().is_err());
}

#[test]
fn test_segments_iterator() {
    let path = compile("/v1/articles/{value=data/*}");
    let collected: Vec<&str> = path.segments().map(Segment::value).collect();
    assert_eq!(collected, vec!["v1", "articles", "data", "*"]);
    assert_eq!(path.len(), 4);
    assert!(path.segments().last().is_some_and(Segment::is_last));
}

#[test]
fn test_split_request_path() {
    assert_eq!(split_request_path("/").as_slice(), &[""]);
    assert_eq!(split_request_path("").as_slice(), &[""]);
    assert_eq!(split_request_path("/v1/articles/").as_slice(), &["v1", "articles"]);
    assert_eq!(split_request_path("v1//x").as_slice(), &["v1", "", "x"]);
}

/// First template (in order) that matches the path, with its captures.
fn first_match(paths: &[Path], request: &str) -> Option<(usize, Values)> {
    let components = split_request_path(request);
    paths.iter().enumerate().find_map(|(i, p)| {
        let mut values = Values::new();
        p.matches_segments(&components, &mut values)
            .then_some((i, values))
    })
}

#[test]
fn test_match_table() {
    let templates = [
        "",                                                         // 0
        "/",                                                        // 1
        "/v1",                                                      // 2
        "/v1/articles",                                             // 3
        "/v1/articles/{value}",                                     // 4
        "/v1/articles/{value}/data",                                // 5
        "/v1/articles/{value=data/*}",                              // 6
        "/v1/articles/{value=data1/*/*/*}",                         // 7
        "/v1/articles/{value=data2/symbol/**}",                     // 8
        "/v1/books/articles/{value=data/items/*}",                  // 9
        "/v1/books/articles/{value=data/items/*}/symbol/{number}", // 10
        "/v1/tables/*",                                             // 11
        "/v1/tables/**",                                            // 12
    ];
    let paths: Vec<Path> = templates.iter().map(|t| compile(t)).collect();

    let cases: &[(&str, Option<usize>, &[(&str, &str)])] = &[
        ("/", Some(0), &[]),
        ("/v1", Some(2), &[]),
        ("/v1/articles", Some(3), &[]),
        ("/v1/articles/12345", Some(4), &[("value", "12345")]),
        ("/v1/articles/12345/data", Some(5), &[("value", "12345")]),
        ("/v1/articles/data/12345", Some(6), &[("value", "data/12345")]),
        ("/v1/articles/data1/12345", Some(7), &[("value", "data1/12345")]),
        (
            "/v1/articles/data2/symbol/some_data/12345",
            Some(8),
            &[("value", "data2/symbol/some_data/12345")],
        ),
        ("/v1/articles/data2/symbol", Some(8), &[("value", "data2/symbol")]),
        (
            "/v1/articles/data2/symbol/12345",
            Some(8),
            &[("value", "data2/symbol/12345")],
        ),
        (
            "/v1/books/articles/data/items/7",
            Some(9),
            &[("value", "data/items/7")],
        ),
        (
            "/v1/books/articles/data/items/7/symbol/42",
            Some(10),
            &[("value", "data/items/7"), ("number", "42")],
        ),
        ("/v1/tables/orders", Some(11), &[]),
        ("/v1/tables/orders/2024/q1", Some(12), &[]),
        ("/v2", None, &[]),
        ("/v1/articles/data/1/2/3/4", None, &[]),
    ];

    for (request, want, want_values) in cases {
        let got = first_match(&paths, request);
        assert_eq!(got.as_ref().map(|(i, _)| *i), *want, "index for {request}");
        if let Some((_, got_values)) = got {
            assert_eq!(got_values, values(want_values), "values for {request}");
        }
    }
}

#[test]
fn test_match_is_case_insensitive_and_keeps_request_case() {
    let path = compile("/V1/Articles/{Value}");
    let got = path.matches("/v1/ARTICLES/AbC").unwrap();
    assert_eq!(got.get("value"), Some("AbC"));
}

#[test]
fn test_root_matches_only_empty_path() {
    let path = compile("/");
    assert_eq!(path.matches("/"), Some(Values::new()));
    assert_eq!(path.matches(""), Some(Values::new()));
    assert!(path.matches("/v1").is_none());
}

#[test]
fn test_terminal_single_wildcard() {
    let path = compile("/v1/tables/{table}");
    assert_eq!(path.matches("/v1/tables/t1"), Some(values(&[("table", "t1")])));
    // zero remaining components still match, with nothing captured
    assert_eq!(path.matches("/v1/tables"), Some(Values::new()));
    assert!(path.matches("/v1/tables/t1/extra").is_none());
}

#[test]
fn test_non_terminal_single_wildcard_is_optional_when_path_runs_out() {
    let path = compile("/v1/{a}/{b}");
    assert_eq!(
        path.matches("/v1/x/y"),
        Some(values(&[("a", "x"), ("b", "y")]))
    );
    assert_eq!(path.matches("/v1/x"), Some(values(&[("a", "x")])));
    assert_eq!(path.matches("/v1"), Some(Values::new()));

    // a trailing literal still needs its component
    let path = compile("/v1/{a}/data");
    assert!(path.matches("/v1").is_none());
}

#[test]
fn test_multi_wildcard_without_field() {
    let path = compile("/static/**");
    assert_eq!(path.matches("/static"), Some(Values::new()));
    assert_eq!(path.matches("/static/css/site.css"), Some(Values::new()));
    assert!(path.matches("/assets/css").is_none());
}

#[test]
fn test_multi_wildcard_field() {
    let path = compile("/files/{path=**}");
    assert_eq!(path.matches("/files"), Some(Values::new()));
    assert_eq!(path.matches("/files/a"), Some(values(&[("path", "a")])));
    assert_eq!(
        path.matches("/files/a/b/c.txt"),
        Some(values(&[("path", "a/b/c.txt")]))
    );
}

#[test]
fn test_matching_does_not_mutate_path() {
    let path = compile("/v1/articles/{value=data/*}");
    let before = path.clone();
    let first = path.matches("/v1/articles/data/1");
    let second = path.matches("/v1/articles/data/1");
    assert_eq!(first, second);
    assert_eq!(path, before);
}

#[test]
fn test_values_record() {
    let key: Arc<str> = Arc::from("key1");

    let mut vv = Values::new();
    vv.record(&key, "value1", false);
    assert_eq!(vv, values(&[("key1", "value1")]));

    vv.record(&key, "value2", false);
    assert_eq!(vv, values(&[("key1", "value2")]));

    vv.record(&key, "value3", true);
    assert_eq!(vv, values(&[("key1", "value2/value3")]));
    assert_eq!(vv.len(), 1);
}

#[test]
fn test_values_composite_without_existing_entry() {
    let key: Arc<str> = Arc::from("key1");
    let mut vv = Values::new();
    vv.record(&key, "value1", true);
    assert_eq!(vv.get("key1"), Some("value1"));
}

#[test]
fn test_values_equality_ignores_order() {
    assert_eq!(values(&[("a", "1"), ("b", "2")]), values(&[("b", "2"), ("a", "1")]));
    assert_ne!(values(&[("a", "1")]), values(&[("a", "1"), ("b", "2")]));
    assert_ne!(values(&[("a", "1")]), values(&[("a", "2")]));
}

#[test]
fn test_values_into_map_and_serialize() {
    let vv = values(&[("name", "shelves/1"), ("id", "7")]);
    assert!(vv.contains("id"));

    let json = serde_json::to_value(&vv).unwrap();
    assert_eq!(json, serde_json::json!({"name": "shelves/1", "id": "7"}));

    let map = vv.into_map();
    assert_eq!(map.get("name").map(String::as_str), Some("shelves/1"));
    assert_eq!(map.len(), 2);
}
