use super::*;
use crate::{ParamDecl, Passing};
use poly_ir::TypeDesc;
use pretty_assertions::assert_eq;

fn leaf(name: &str) -> TypeDesc {
    TypeDesc::leaf(name)
}

fn var(name: &str) -> TypeDesc {
    TypeDesc::var(name)
}

fn imp(label: &str) -> Implementation {
    Implementation::new(label)
}

fn labels(candidates: &[Candidate]) -> Vec<String> {
    candidates.iter().map(|c| c.label().to_string()).collect()
}

#[test]
fn register_assigns_declared_order() {
    let catalog = Catalog::new();

    assert_eq!(catalog.register("Box", Pattern::new([var("T")]), imp("primary")), Ok(0));
    assert_eq!(
        catalog.register("Box", Pattern::new([TypeDesc::pointer_to(var("T"))]), imp("pointer")),
        Ok(1)
    );
    assert_eq!(catalog.register("Box", Pattern::new([leaf("text")]), imp("text")), Ok(2));

    let candidates = catalog.candidates_for("Box").unwrap();
    assert_eq!(labels(&candidates), vec!["primary", "pointer", "text"]);
    assert_eq!(candidates[1].declared_order, 1);
    assert_eq!(candidates[1].kind(), PatternKind::Partial);
    assert_eq!(candidates[2].kind(), PatternKind::Full);
}

#[test]
fn first_registration_declares_implicitly() {
    let catalog = Catalog::new();
    catalog
        .register("Pair", Pattern::new([var("A"), var("B")]), imp("primary"))
        .unwrap();

    let decl = catalog.declaration("Pair").unwrap();
    assert_eq!(decl.arity(), 2);
    assert!(decl.params.iter().all(|p| p.passing == Passing::ByValue));
    assert!(decl.params.iter().all(|p| p.default.is_none()));
}

#[test]
fn duplicate_pattern_is_rejected_up_to_renaming() {
    let catalog = Catalog::new();
    catalog
        .register("Pair", Pattern::new([var("T"), var("T")]), imp("same"))
        .unwrap();

    let err = catalog
        .register("Pair", Pattern::new([var("U"), var("U")]), imp("again"))
        .unwrap_err();

    assert_eq!(
        err,
        RegistrationError::DuplicatePattern {
            generic: Symbol::new("Pair"),
            pattern: Pattern::new([var("U"), var("U")]),
            existing: 0,
        }
    );
    assert_eq!(catalog.candidates_for("Pair").unwrap().len(), 1);
}

#[test]
fn same_pattern_under_different_names_is_fine() {
    let catalog = Catalog::new();
    catalog.register("A", Pattern::new([var("T")]), imp("a")).unwrap();
    catalog.register("B", Pattern::new([var("T")]), imp("b")).unwrap();

    assert_eq!(catalog.generics(), vec![Symbol::new("A"), Symbol::new("B")]);
    assert_eq!(catalog.len(), 2);
}

#[test]
fn arity_must_match_declaration() {
    let catalog = Catalog::new();
    catalog.register("Box", Pattern::new([var("T")]), imp("primary")).unwrap();

    let err = catalog
        .register("Box", Pattern::new([var("T"), var("U")]), imp("wide"))
        .unwrap_err();

    assert!(matches!(
        err,
        RegistrationError::ArityMismatch {
            expected: 1,
            found: 2,
            ..
        }
    ));
}

#[test]
fn registration_after_seal_fails_and_leaves_candidates_unchanged() {
    let catalog = Catalog::new();
    catalog.register("Box", Pattern::new([var("T")]), imp("primary")).unwrap();

    catalog.seal("Box").unwrap();
    catalog.seal("Box").unwrap();
    assert!(catalog.is_sealed("Box"));

    let err = catalog
        .register("Box", Pattern::new([leaf("text")]), imp("text"))
        .unwrap_err();
    assert_eq!(
        err,
        RegistrationError::CatalogSealed {
            generic: Symbol::new("Box"),
        }
    );
    assert_eq!(labels(&catalog.candidates_for("Box").unwrap()), vec!["primary"]);
}

#[test]
fn sealing_one_generic_leaves_others_open() {
    let catalog = Catalog::new();
    catalog.register("A", Pattern::new([var("T")]), imp("a")).unwrap();
    catalog.register("B", Pattern::new([var("T")]), imp("b")).unwrap();

    let snapshot = catalog.sealed_candidates("A").unwrap();
    assert_eq!(snapshot.len(), 1);

    assert!(catalog.is_sealed("A"));
    assert!(!catalog.is_sealed("B"));
    assert!(catalog.register("B", Pattern::new([leaf("int")]), imp("b-int")).is_ok());
}

#[test]
fn sealed_snapshot_is_shared() {
    let catalog = Catalog::new();
    catalog.register("A", Pattern::new([var("T")]), imp("a")).unwrap();

    let first = catalog.sealed_candidates("A").unwrap();
    let second = catalog.sealed_candidates("A").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn unknown_generic_lookups_fail() {
    let catalog = Catalog::new();

    let expected = UnknownGeneric {
        generic: Symbol::new("Missing"),
    };
    assert_eq!(catalog.candidates_for("Missing").unwrap_err(), expected);
    assert_eq!(catalog.seal("Missing").unwrap_err(), expected);
    assert_eq!(catalog.declaration("Missing").unwrap_err(), expected);
    assert!(!catalog.is_sealed("Missing"));
    assert!(!catalog.contains("Missing"));
}

#[test]
fn explicit_declaration() {
    let catalog = Catalog::new();
    catalog
        .declare(GenericDecl::new(
            "Stack",
            vec![
                ParamDecl::by_reference("T"),
                ParamDecl::by_value("Alloc").with_default(leaf("heap")),
            ],
        ))
        .unwrap();

    assert!(catalog.contains("Stack"));
    assert!(catalog.candidates_for("Stack").unwrap().is_empty());

    let err = catalog
        .declare(GenericDecl::new("Stack", vec![ParamDecl::by_value("T")]))
        .unwrap_err();
    assert!(matches!(err, RegistrationError::AlreadyDeclared { .. }));

    let err = catalog
        .register("Stack", Pattern::new([var("T")]), imp("narrow"))
        .unwrap_err();
    assert!(matches!(err, RegistrationError::ArityMismatch { expected: 2, .. }));
}

#[test]
fn non_concrete_default_is_rejected() {
    let catalog = Catalog::new();
    let err = catalog
        .declare(GenericDecl::new(
            "Stack",
            vec![ParamDecl::by_value("T").with_default(var("U"))],
        ))
        .unwrap_err();

    assert_eq!(
        err,
        RegistrationError::NonConcreteDefault {
            generic: Symbol::new("Stack"),
            param: Symbol::new("T"),
            default: var("U"),
        }
    );
    assert!(catalog.is_empty());
}

#[test]
fn concurrent_registration_loses_nothing() {
    let catalog = Catalog::new();
    catalog
        .declare(GenericDecl::new("Box", vec![ParamDecl::by_value("T")]))
        .unwrap();

    std::thread::scope(|scope| {
        for t in 0..4 {
            let catalog = &catalog;
            scope.spawn(move || {
                for i in 0..25 {
                    let name = format!("leaf_{t}_{i}");
                    catalog
                        .register("Box", Pattern::new([leaf(&name)]), imp(&name))
                        .unwrap();
                }
            });
        }
    });

    let candidates = catalog.candidates_for("Box").unwrap();
    assert_eq!(candidates.len(), 100);
    for (i, candidate) in candidates.iter().enumerate() {
        assert_eq!(candidate.declared_order, i);
    }
}

#[test]
fn registration_racing_seal_lands_or_fails() {
    let catalog = Catalog::new();
    catalog.register("Box", Pattern::new([var("T")]), imp("primary")).unwrap();

    let accepted = std::thread::scope(|scope| {
        let writer = scope.spawn(|| {
            (0..50)
                .filter(|i| {
                    catalog
                        .register("Box", Pattern::new([leaf(&format!("l{i}"))]), imp("leaf"))
                        .is_ok()
                })
                .count()
        });
        let snapshot = catalog.sealed_candidates("Box").unwrap();
        let accepted = writer.join().unwrap();
        (snapshot.len(), accepted)
    });

    // Every accepted registration is in the snapshot, on top of the primary.
    assert_eq!(accepted.0, accepted.1 + 1);
}
