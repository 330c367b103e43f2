use proptest::prelude::*;
use trellis::{styles, Component, ComponentType, Error, OptionError, OptionSpec, Value};

const SIZES: [&str; 3] = ["sm", "md", "lg"];

fn size_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SIZES.to_vec())
}

proptest! {
    #[test]
    fn test_child_redeclaration_leaves_parent_default(
        parent_default in size_strategy(),
        child_default in size_strategy(),
    ) {
        let parent = ComponentType::builder("base")
            .option("size", OptionSpec::new().values(SIZES).default(parent_default))
            .build();
        let child = ComponentType::extend(&parent, "derived")
            .option("size", OptionSpec::new().values(SIZES).default(child_default))
            .build();

        prop_assert_eq!(parent.default_for("size"), Some(Value::sym(parent_default)));
        prop_assert_eq!(child.default_for("size"), Some(Value::sym(child_default)));
    }

    #[test]
    fn test_enum_inputs_validated(size in "[a-z]{1,4}") {
        let ty = ComponentType::builder("chip")
            .option("size", OptionSpec::new().values(SIZES))
            .build();

        let result = Component::new(&ty, [("size", Value::from(size.as_str()))]);
        if SIZES.contains(&size.as_str()) {
            let c = result.unwrap();
            prop_assert_eq!(c.get("size"), Value::sym(size.as_str()));
        } else {
            let is_invalid = matches!(
                result,
                Err(Error::Option(OptionError::InvalidEnumValue { .. }))
            );
            prop_assert!(is_invalid);
        }
    }

    #[test]
    fn test_classes_are_deterministic(size in size_strategy(), disabled in any::<bool>()) {
        let ty = ComponentType::builder("button")
            .option("size", OptionSpec::new().values(SIZES).default("md"))
            .option("disabled", OptionSpec::new().default(false))
            .default_styles(styles! {
                base: "btn px-4",
                size: { sm: "px-2 text-sm", md: "text-base", lg: "px-6 text-lg" },
                disabled: { true: "opacity-50", false: "cursor-pointer" },
            })
            .build();

        let c = Component::new(
            &ty,
            [("size", Value::from(size)), ("disabled", Value::Bool(disabled))],
        )
        .unwrap();
        prop_assert_eq!(c.classes("default"), c.classes("default"));
    }
}
