//! Integration test: load a descriptor from disk, check it, and extract the
//! rule map; then throw randomly generated (often cyclic) catalogs at the
//! extractor.

use std::path::PathBuf;

use proptest::prelude::*;
use rulepath_schema::{check, extract, FieldDef, RuleSchema, TypeDef, TypeSchema};

const TAG: &str = "validate";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn rules_at<'a>(schema: &'a RuleSchema, path: &str) -> Vec<&'a str> {
    schema
        .get(path)
        .unwrap_or_else(|| panic!("no rules at {path}"))
        .iter()
        .map(|t| t.as_str())
        .collect()
}

#[test]
fn catalog_fixture_compiles() {
    let types = TypeSchema::load(&fixture("catalog.yaml")).expect("fixture loads");
    let schema = RuleSchema::build(&types, TAG).expect("fixture is consistent");

    let paths: Vec<_> = schema.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(
        paths,
        [
            "name",
            "parent",
            "products",
            "products.*",
            "products.*.labels",
            "products.*.labels.*",
            "products.*.skuCode",
        ]
    );

    assert_eq!(rules_at(&schema, "name"), ["required", "min:2"]);
    assert_eq!(rules_at(&schema, "parent"), ["optional"]);
    assert_eq!(rules_at(&schema, "products.*"), ["required"]);
    assert_eq!(rules_at(&schema, "products.*.skuCode"), ["required", "len:8"]);
    assert_eq!(rules_at(&schema, "products.*.labels.*"), ["alphaunicode"]);
}

#[test]
fn excluded_subtree_never_appears() {
    let types = TypeSchema::load(&fixture("catalog.yaml")).unwrap();
    let map = extract(&types, TAG);
    assert!(map.keys().all(|p| !p.as_str().starts_with("audit")));
}

#[test]
fn json_and_yaml_descriptors_agree() {
    let yaml = TypeSchema::load(&fixture("catalog.yaml")).unwrap();
    let json = serde_json::to_string(&yaml).unwrap();
    let from_json = TypeSchema::from_json_str(&json).unwrap();
    assert_eq!(extract(&yaml, TAG), extract(&from_json, TAG));
}

/// Field kinds used to build random catalogs.
#[derive(Debug, Clone, Copy)]
enum Shape {
    Scalar,
    Named,
    Pointer,
    Slice,
}

fn shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        Just(Shape::Scalar),
        Just(Shape::Named),
        Just(Shape::Pointer),
        Just(Shape::Slice),
    ]
}

/// Up to four named types, each with up to four fields pointing anywhere in
/// the catalog (itself included).
fn catalog() -> impl Strategy<Value = TypeSchema> {
    (1usize..5)
        .prop_flat_map(|n| {
            let field = (shape(), 0..n, any::<bool>());
            (Just(n), prop::collection::vec(prop::collection::vec(field, 0..4), n))
        })
        .prop_map(|(_, defs)| {
            let mut schema = TypeSchema::named("T0");
            for (i, fields) in defs.into_iter().enumerate() {
                let fields = fields.into_iter().enumerate().map(|(j, (shape, target, tagged))| {
                    let target = TypeDef::named(format!("T{target}"));
                    let ty = match shape {
                        Shape::Scalar => TypeDef::scalar(),
                        Shape::Named => target,
                        Shape::Pointer => TypeDef::pointer(target),
                        Shape::Slice => TypeDef::slice(target),
                    };
                    let field = FieldDef::new(format!("F{j}"), ty);
                    if tagged {
                        field.tag(TAG, "required")
                    } else {
                        field
                    }
                });
                schema.insert(format!("T{i}"), TypeDef::structure(fields));
            }
            schema
        })
}

proptest! {
    /// Extraction terminates on arbitrary cyclic catalogs and is
    /// deterministic.
    #[test]
    fn extraction_terminates_and_is_stable(schema in catalog()) {
        prop_assert!(check(&schema, TAG).is_ok());
        let first = extract(&schema, TAG);
        let second = extract(&schema, TAG);
        prop_assert_eq!(first, second);
    }

    /// No branch visits more named types than the catalog holds, so no path
    /// is deeper than two segments per type plus the field itself.
    #[test]
    fn paths_are_bounded_by_catalog_size(schema in catalog()) {
        let limit = 2 * schema.types.len() + 1;
        for path in extract(&schema, TAG).keys() {
            prop_assert!(path.depth() <= limit, "{} deeper than {}", path, limit);
        }
    }
}
