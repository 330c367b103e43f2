use std::sync::Arc;

use insta::{assert_json_snapshot, assert_snapshot};
use serial_test::serial;
use trellis_options::{OptionValues, Value};
use trellis_style::{
    conflict_resolver, merge_attributes, reset_conflict_resolver, set_conflict_resolver,
    stimulus_action, stimulus_controller, styles, Attributes, DedupResolver, StyleMap,
    StyleRegistry, StyleResolver, StyleRule, UtilityClassResolver,
};

fn values(entries: &[(&str, Value)]) -> OptionValues {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn utility(registry: &StyleRegistry) -> StyleResolver<'_> {
    StyleResolver::with_resolver(registry, Arc::new(UtilityClassResolver::new()))
}

fn tokens(classes: &str) -> Vec<&str> {
    classes.split_whitespace().collect()
}

// =============================================================================
// Style resolution
// =============================================================================

#[test]
fn test_variant_selection() {
    let mut registry = StyleRegistry::new();
    registry.define(styles! {
        base: "btn",
        variant: {
            solid: "bg-blue-500 text-white",
            outline: "border border-blue-500 text-blue-500",
        },
    });

    let classes =
        utility(&registry).resolve("default", &values(&[("variant", Value::sym("solid"))]));
    let t = tokens(&classes);
    assert!(t.contains(&"btn"));
    assert!(t.contains(&"bg-blue-500"));
    assert!(t.contains(&"text-white"));
    assert!(!t.contains(&"border"));
}

#[test]
fn test_variant_overrides_base_utilities() {
    let mut registry = StyleRegistry::new();
    registry.define(styles! {
        base: "p-4 bg-blue-500",
        variant: { danger: "p-6 bg-red-500" },
    });

    let classes =
        utility(&registry).resolve("default", &values(&[("variant", Value::sym("danger"))]));
    assert_snapshot!(classes, @"p-6 bg-red-500");
}

#[test]
fn test_boolean_style_key() {
    let mut registry = StyleRegistry::new();
    registry.define(styles! {
        disabled: {
            true: "opacity-50 cursor-not-allowed",
            false: "cursor-pointer",
        },
    });
    let resolver = utility(&registry);

    let on = resolver.resolve("default", &values(&[("disabled", Value::Bool(true))]));
    assert!(tokens(&on).contains(&"opacity-50"));
    assert!(!tokens(&on).contains(&"cursor-pointer"));

    let off = resolver.resolve("default", &values(&[("disabled", Value::Bool(false))]));
    assert!(tokens(&off).contains(&"cursor-pointer"));
    assert!(!tokens(&off).contains(&"opacity-50"));
}

#[test]
fn test_omitted_key_is_not_applied() {
    let mut registry = StyleRegistry::new();
    registry.define(styles! {
        base: "card",
        size: { sm: "p-2", lg: "p-8" },
    });

    assert_snapshot!(utility(&registry).resolve("default", &OptionValues::new()), @"card");
}

#[test]
fn test_inherited_registry_resolution() {
    let mut parent = StyleRegistry::new();
    parent.define(styles! {
        base: "btn rounded px-4",
        variant: { primary: "bg-blue-600 text-white", secondary: "bg-gray-100" },
    });

    let mut child = StyleRegistry::new();
    child.define(styles! {
        base: "btn rounded-full px-2",
        variant: { primary: "bg-indigo-600 text-white" },
    });

    let effective = StyleRegistry::effective([&parent, &child]);
    let resolver = utility(&effective);

    assert_snapshot!(
        resolver.resolve("default", &values(&[("variant", Value::sym("primary"))])),
        @"btn rounded-full px-2 bg-indigo-600 text-white"
    );
    assert_snapshot!(
        resolver.resolve("default", &values(&[("variant", Value::sym("secondary"))])),
        @"btn rounded-full px-2 bg-gray-100"
    );
}

#[test]
fn test_yaml_and_code_definitions_accumulate() {
    let mut registry = StyleRegistry::new();
    registry
        .define_from_yaml(
            r#"
default:
  base: "alert flex"
  tone:
    info: "bg-blue-50 text-blue-800"
icon:
  base: "h-5 w-5"
"#,
        )
        .unwrap();
    registry.define(StyleMap::new().with(
        "tone",
        StyleRule::nested([("warn", "bg-amber-50 text-amber-800")]),
    ));

    let resolver = utility(&registry);
    assert_snapshot!(
        resolver.resolve("default", &values(&[("tone", Value::sym("warn"))])),
        @"alert flex bg-amber-50 text-amber-800"
    );
    assert_snapshot!(resolver.resolve("icon", &OptionValues::new()), @"h-5 w-5");
}

#[test]
fn test_dynamic_rule_with_modifiers() {
    let mut registry = StyleRegistry::new();
    registry.define(styles! {
        base: "grid gap-4",
        columns: (StyleRule::dynamic(|v: &OptionValues| {
            let n = v.get("columns").and_then(Value::as_int).unwrap_or(1);
            format!("grid-cols-1 md:grid-cols-{}", n)
        })),
        gap: { tight: "gap-1" },
    });

    let classes = utility(&registry).resolve(
        "default",
        &values(&[("columns", Value::Int(3)), ("gap", Value::sym("tight"))]),
    );
    assert_snapshot!(classes, @"grid grid-cols-1 md:grid-cols-3 gap-1");
}

// =============================================================================
// Attribute merging
// =============================================================================

#[test]
fn test_class_attribute_conflicts() {
    let a = Attributes::new().with("class", "text-left text-blue-500");
    let b = Attributes::new().with("class", "text-right text-red-500");

    let merger =
        trellis_style::AttributeMerger::with_resolver(Arc::new(UtilityClassResolver::new()));
    let merged = merger.merge(&[&a, &b]);
    assert_eq!(
        merged.get("class"),
        Some(&Value::from("text-right text-red-500"))
    );
}

#[test]
fn test_data_attributes_accumulate() {
    let a = Attributes::new().with(
        "data",
        Value::map([("controller", "modal"), ("action", "click->modal#open")]),
    );
    let b = Attributes::new().with(
        "data",
        Value::map([("controller", "tooltip"), ("action", "hover->tooltip#show")]),
    );

    let merged = merge_attributes(&[&a, &b]);
    assert_eq!(merged.data("controller"), Some(&Value::from("modal tooltip")));
    assert_eq!(
        merged.data("action"),
        Some(&Value::from("click->modal#open hover->tooltip#show"))
    );
}

#[test]
fn test_stimulus_fragments_merge() {
    let controllers = Attributes::with_data(stimulus_controller(["Dropdown"]).unwrap());
    let open = Attributes::with_data(stimulus_action("dropdown", "toggle", Some("click")).unwrap());
    let close =
        Attributes::with_data(stimulus_action("dropdown", "hide", Some("click@window")).unwrap());

    let merged = merge_attributes(&[&controllers, &open, &close]);
    assert_json_snapshot!(merged, @r#"
    {
      "data": {
        "controller": "dropdown",
        "action": "click->dropdown#toggle click@window->dropdown#hide"
      }
    }
    "#);
}

// =============================================================================
// Process-wide conflict resolver
// =============================================================================

#[test]
#[serial]
fn test_custom_resolver_used_by_default_constructors() {
    set_conflict_resolver(Arc::new(DedupResolver));

    let mut registry = StyleRegistry::new();
    registry.define(styles! { base: "p-4 p-6" });
    assert_eq!(StyleResolver::new(&registry).resolve("default", &OptionValues::new()), "p-4 p-6");

    let merged = merge_attributes(&[
        &Attributes::new().with("class", "p-4"),
        &Attributes::new().with("class", "p-6"),
    ]);
    assert_eq!(merged.get("class"), Some(&Value::from("p-4 p-6")));

    reset_conflict_resolver();
    assert_eq!(conflict_resolver().merge("p-4 p-6"), "p-6");
}

#[test]
#[serial]
fn test_default_resolver_after_reset() {
    reset_conflict_resolver();
    let mut registry = StyleRegistry::new();
    registry.define(styles! { base: "p-4 p-6" });
    assert_eq!(StyleResolver::new(&registry).resolve("default", &OptionValues::new()), "p-6");
}
