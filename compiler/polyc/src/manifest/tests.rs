use super::*;
use pretty_assertions::assert_eq;

#[test]
fn empty_manifest_loads() {
    let loaded = from_str("{}").unwrap();
    assert!(loaded.catalog.is_empty());
    assert!(loaded.queries.is_empty());
}

#[test]
fn type_descriptors_use_tagged_json() {
    let query: Query = serde_json::from_str(
        r#"{ "generic": "Box", "args": [{ "pointer_to": { "array": { "elem": { "var": "T" }, "len": 3 } } }] }"#,
    )
    .unwrap();

    assert_eq!(
        query.input,
        QueryInput::Args(vec![TypeDesc::pointer_to(TypeDesc::array(TypeDesc::var("T"), 3))])
    );
    assert_eq!(query.expect, None);
}

#[test]
fn raw_values_and_expectations() {
    let query: Query = serde_json::from_str(
        r#"{
            "generic": "Holder",
            "values": [{ "reference": { "callable": "(int) -> int" } }],
            "expect": { "fails": "too_many_values" }
        }"#,
    )
    .unwrap();

    assert_eq!(
        query.input,
        QueryInput::Values(vec![RawType::reference(RawType::callable("(int) -> int"))])
    );
    assert_eq!(query.expect, Some(Expectation::Fails(FailureKind::TooManyValues)));
}

#[test]
fn explicit_params_are_declared() {
    let loaded = from_str(
        r#"{ "generics": [{
            "name": "View",
            "params": [
                { "name": "T", "passing": "by_reference" },
                { "name": "A", "default": { "leaf": "heap" } }
            ]
        }] }"#,
    )
    .unwrap();

    let decl = loaded.catalog.declaration("View").unwrap();
    assert_eq!(
        decl.params,
        vec![
            ParamDecl::by_reference("T"),
            ParamDecl::by_value("A").with_default(TypeDesc::leaf("heap")),
        ]
    );
}

#[test]
fn capabilities_are_built_from_predicates() {
    let loaded = from_str(
        r#"{ "generics": [{
            "name": "Stack",
            "candidates": [{
                "label": "stack",
                "pattern": [{ "var": "T" }],
                "operations": ["push"],
                "capabilities": [{
                    "name": "print",
                    "when": { "any": [
                        { "var_matches": { "var": "T", "accepted": [{ "leaf": "int" }] } },
                        { "var_matches": { "var": "T", "accepted": [{ "pointer_to": { "var": "X" } }] } }
                    ] }
                }]
            }]
        }] }"#,
    )
    .unwrap();

    let candidates = loaded.catalog.candidates_for("Stack").unwrap();
    let implementation = &candidates[0].implementation;
    assert!(implementation.supports_operation("push"));
    assert!(implementation.gate("print").is_some());
}

#[test]
fn duplicate_candidates_are_reported() {
    let err = from_str(
        r#"{ "generics": [{
            "name": "Pair",
            "candidates": [
                { "label": "a", "pattern": [{ "var": "T" }, { "var": "T" }] },
                { "label": "b", "pattern": [{ "var": "X" }, { "var": "X" }] }
            ]
        }] }"#,
    )
    .unwrap_err();

    let ManifestError::Registration { generic, label, source } = err else {
        panic!("expected a registration error, got {err}");
    };
    assert_eq!(generic.as_str(), "Pair");
    assert_eq!(label.as_str(), "b");
    assert!(matches!(source, RegistrationError::DuplicatePattern { .. }));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = from_str(r#"{ "generics": [], "extra": 1 }"#).unwrap_err();
    assert!(matches!(err, ManifestError::Json(_)));
}

#[test]
fn misspelled_query_keys_are_rejected() {
    let err = from_str(
        r#"{ "queries": [
            { "generic": "Box", "args": [{ "leaf": "int" }], "expects": { "selects": "primary" } }
        ] }"#,
    )
    .unwrap_err();

    let ManifestError::Json(err) = err else {
        panic!("expected a JSON error, got {err}");
    };
    assert!(err.to_string().contains("expects"), "{err}");
}

#[test]
fn query_takes_exactly_one_input() {
    let both = serde_json::from_str::<Query>(
        r#"{ "generic": "Box", "args": [], "values": [] }"#,
    )
    .unwrap_err();
    assert!(both.to_string().contains("not both"), "{both}");

    let neither = serde_json::from_str::<Query>(r#"{ "generic": "Box" }"#).unwrap_err();
    assert!(neither.to_string().contains("needs `args` or `values`"), "{neither}");
}

#[test]
fn guides_are_kept_per_generic() {
    let loaded = from_str(
        r#"{ "generics": [{
            "name": "Holder",
            "candidates": [{ "label": "primary", "pattern": [{ "var": "T" }] }],
            "guides": [{ "label": "any", "shapes": ["any"], "forced": [{ "leaf": "int" }] }]
        }] }"#,
    )
    .unwrap();

    assert_eq!(loaded.guides_for("Holder").len(), 1);
    assert!(loaded.guides_for("Other").is_empty());
}
