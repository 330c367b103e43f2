use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use trellis_options::{OptionValues, Value};
use trellis_style::{
    ClassConflictResolver, StyleMap, StyleRegistry, StyleResolver, StyleRule,
    UtilityClassResolver,
};

fn utility_class() -> impl Strategy<Value = String> {
    let prefix = prop_oneof![
        Just("p"),
        Just("px"),
        Just("m"),
        Just("mt"),
        Just("text"),
        Just("bg"),
        Just("border"),
        Just("rounded"),
        Just("w"),
        Just("gap"),
    ];
    let value = prop_oneof![
        Just("2".to_string()),
        Just("4".to_string()),
        Just("lg".to_string()),
        Just("left".to_string()),
        Just("red-500".to_string()),
        Just("blue-500".to_string()),
    ];
    let modifier = prop_oneof![Just(""), Just("hover:"), Just("md:")];
    (modifier, prefix, value).prop_map(|(m, p, v)| format!("{}{}-{}", m, p, v))
}

fn class_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop_oneof![utility_class(), "[a-z]{2,6}"], 0..12)
}

proptest! {
    #[test]
    fn test_resolver_output_is_ordered_subset(classes in class_list()) {
        let input = classes.join(" ");
        let output = UtilityClassResolver::new().merge(&input);

        let mut remaining = classes.iter().map(String::as_str);
        for token in output.split_whitespace() {
            prop_assert!(remaining.any(|c| c == token), "{} out of order in {}", token, output);
        }
    }

    #[test]
    fn test_resolver_has_no_duplicates(classes in class_list()) {
        let output = UtilityClassResolver::new().merge(&classes.join(" "));
        let tokens: Vec<&str> = output.split_whitespace().collect();
        let unique: HashSet<&str> = tokens.iter().copied().collect();
        prop_assert_eq!(tokens.len(), unique.len());
    }

    #[test]
    fn test_resolver_is_idempotent(classes in class_list()) {
        let resolver = UtilityClassResolver::new();
        let once = resolver.merge(&classes.join(" "));
        prop_assert_eq!(resolver.merge(&once), once.clone());
    }

    #[test]
    fn test_last_class_always_survives(classes in prop::collection::vec(utility_class(), 1..10)) {
        let output = UtilityClassResolver::new().merge(&classes.join(" "));
        let last = classes.last().map(String::as_str).unwrap_or_default();
        prop_assert!(output.split_whitespace().any(|t| t == last));
    }

    #[test]
    fn test_resolution_is_deterministic(
        variant in prop_oneof![Just("solid"), Just("outline"), Just("ghost")],
        disabled in any::<bool>(),
    ) {
        let mut registry = StyleRegistry::new();
        registry.define(
            StyleMap::new()
                .with("base", "btn px-4")
                .with(
                    "variant",
                    StyleRule::nested([("solid", "bg-blue-500 px-6"), ("outline", "border")]),
                )
                .with(
                    "disabled",
                    StyleRule::nested([(true, "opacity-50"), (false, "cursor-pointer")]),
                ),
        );
        let resolver =
            StyleResolver::with_resolver(&registry, Arc::new(UtilityClassResolver::new()));

        let mut values = OptionValues::new();
        values.insert("variant".into(), Value::sym(variant));
        values.insert("disabled".into(), Value::Bool(disabled));

        let first = resolver.resolve("default", &values);
        let second = resolver.resolve("default", &values);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.starts_with("btn"));
    }
}
