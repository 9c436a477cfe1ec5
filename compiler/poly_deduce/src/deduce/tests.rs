use super::*;
use crate::RawShape;
use poly_catalog::{GenericDecl, Implementation, ParamDecl};
use poly_ir::Pattern;
use pretty_assertions::assert_eq;

fn leaf(name: &str) -> TypeDesc {
    TypeDesc::leaf(name)
}

fn var(name: &str) -> TypeDesc {
    TypeDesc::var(name)
}

/// `Holder<T>` with a primary, a pointer partial, and full specializations
/// for `string` and `int`.
fn holder(passing: Passing) -> Catalog {
    let catalog = Catalog::new();
    let param = match passing {
        Passing::ByValue => ParamDecl::by_value("T"),
        Passing::ByReference => ParamDecl::by_reference("T"),
    };
    catalog
        .declare(GenericDecl::new("Holder", vec![param]))
        .unwrap();
    for (pattern, label) in [
        (Pattern::new([var("T")]), "primary"),
        (Pattern::new([TypeDesc::pointer_to(var("T"))]), "pointer"),
        (Pattern::new([leaf("string")]), "string"),
        (Pattern::new([TypeDesc::array(leaf("char"), 6)]), "six-chars"),
    ] {
        catalog
            .register("Holder", pattern, Implementation::new(label))
            .unwrap();
    }
    catalog
}

fn string_guide() -> DeductionGuide {
    DeductionGuide::new(
        "string-literal",
        vec![RawShape::qualified(RawShape::array(RawShape::named("char"), None))],
        vec![leaf("string")],
    )
}

fn label(bound: &BoundImplementation) -> &str {
    bound.candidate().label().as_str()
}

// === Decay ===

#[test]
fn by_value_sequences_of_any_length_resolve_alike() {
    let catalog = holder(Passing::ByValue);

    let six = deduce(&catalog, "Holder", &[RawType::string_literal(6)], &[]).unwrap();
    let ten = deduce(&catalog, "Holder", &[RawType::string_literal(10)], &[]).unwrap();
    assert_eq!(six.args, vec![TypeDesc::pointer_to(leaf("char"))]);
    assert_eq!(six.args, ten.args);
    assert_eq!(six.origin, DeductionOrigin::Parameters(vec![SlotSource::Decayed]));

    let six = deduce_and_resolve(&catalog, "Holder", &[RawType::string_literal(6)], &[]).unwrap();
    let ten = deduce_and_resolve(&catalog, "Holder", &[RawType::string_literal(10)], &[]).unwrap();
    assert_eq!(label(&six), "pointer");
    assert_eq!(six, ten);
}

#[test]
fn by_reference_sequences_keep_their_length() {
    let catalog = holder(Passing::ByReference);

    let six = deduce(&catalog, "Holder", &[RawType::string_literal(6)], &[]).unwrap();
    let ten = deduce(&catalog, "Holder", &[RawType::string_literal(10)], &[]).unwrap();
    assert_eq!(six.args, vec![TypeDesc::array(leaf("char"), 6)]);
    assert_ne!(six.args, ten.args);
    assert_eq!(ten.origin, DeductionOrigin::Parameters(vec![SlotSource::Natural]));

    let six = deduce_and_resolve(&catalog, "Holder", &[RawType::string_literal(6)], &[]).unwrap();
    let ten = deduce_and_resolve(&catalog, "Holder", &[RawType::string_literal(10)], &[]).unwrap();
    assert_eq!(label(&six), "six-chars");
    assert_eq!(label(&ten), "primary");
}

// === Guides ===

#[test]
fn guide_overrides_decay() {
    let catalog = holder(Passing::ByValue);
    let guides = [string_guide()];

    let deduction = deduce(&catalog, "Holder", &[RawType::string_literal(6)], &guides).unwrap();
    assert_eq!(deduction.args, vec![leaf("string")]);
    assert_eq!(
        deduction.origin,
        DeductionOrigin::Guide {
            index: 0,
            label: Symbol::new("string-literal"),
        }
    );

    let bound = deduce_and_resolve(&catalog, "Holder", &[RawType::string_literal(6)], &guides).unwrap();
    assert_eq!(label(&bound), "string");
}

#[test]
fn non_matching_guide_falls_back_to_decay() {
    let catalog = holder(Passing::ByValue);
    let guides = [string_guide()];

    let bound = deduce_and_resolve(
        &catalog,
        "Holder",
        &[RawType::pointer(RawType::named("int"))],
        &guides,
    )
    .unwrap();
    assert_eq!(label(&bound), "pointer");
}

#[test]
fn first_matching_guide_wins() {
    let catalog = holder(Passing::ByValue);
    let guides = [
        DeductionGuide::new("any", vec![RawShape::Any], vec![leaf("int")]),
        string_guide(),
    ];

    let deduction = deduce(&catalog, "Holder", &[RawType::string_literal(6)], &guides).unwrap();
    assert_eq!(deduction.args, vec![leaf("int")]);
    assert!(matches!(deduction.origin, DeductionOrigin::Guide { index: 0, .. }));
}

#[test]
fn guide_with_variables_is_rejected() {
    let catalog = holder(Passing::ByValue);
    let guides = [DeductionGuide::new("bad", vec![RawShape::Any], vec![var("X")])];

    let err = deduce(&catalog, "Holder", &[RawType::named("int")], &guides).unwrap_err();
    assert!(matches!(err, ResolutionError::NonConcreteArgument { index: 0, .. }));
}

// === Parameters ===

fn map_catalog() -> Catalog {
    let catalog = Catalog::new();
    catalog
        .declare(GenericDecl::new(
            "Map",
            vec![
                ParamDecl::by_value("K"),
                ParamDecl::by_reference("V"),
                ParamDecl::by_value("Hash").with_default(leaf("default-hash")),
            ],
        ))
        .unwrap();
    catalog
        .register("Map", Pattern::primary(3), Implementation::new("map"))
        .unwrap();
    catalog
}

#[test]
fn defaults_fill_missing_trailing_values() {
    let catalog = map_catalog();
    let deduction = deduce(
        &catalog,
        "Map",
        &[
            RawType::reference(RawType::named("text")),
            RawType::array(RawType::named("int"), 4),
        ],
        &[],
    )
    .unwrap();

    assert_eq!(
        deduction,
        Deduction {
            args: vec![
                leaf("text"),
                TypeDesc::array(leaf("int"), 4),
                leaf("default-hash"),
            ],
            origin: DeductionOrigin::Parameters(vec![
                SlotSource::Decayed,
                SlotSource::Natural,
                SlotSource::Default,
            ]),
        }
    );
}

#[test]
fn missing_value_without_default_is_undeduced() {
    let catalog = map_catalog();
    let err = deduce(&catalog, "Map", &[RawType::named("text")], &[]).unwrap_err();

    assert_eq!(
        err,
        ResolutionError::UndeducedParameter {
            generic: Symbol::new("Map"),
            param: Symbol::new("V"),
            index: 1,
        }
    );
}

#[test]
fn too_many_values() {
    let catalog = holder(Passing::ByValue);
    let err = deduce(
        &catalog,
        "Holder",
        &[RawType::named("int"), RawType::named("int")],
        &[],
    )
    .unwrap_err();

    assert_eq!(
        err,
        ResolutionError::TooManyValues {
            generic: Symbol::new("Holder"),
            expected: 1,
            found: 2,
        }
    );
}

#[test]
fn unknown_generic() {
    let catalog = Catalog::new();
    let err = deduce(&catalog, "Nope", &[], &[]).unwrap_err();
    assert_eq!(
        err,
        ResolutionError::UnknownGeneric {
            generic: Symbol::new("Nope"),
        }
    );
}
