//! Declarative style map macro.
//!
//! [`styles!`] builds a [`StyleMap`](crate::StyleMap) with a literal syntax
//! that mirrors the YAML form.
//!
//! ```rust
//! use trellis_style::{styles, StyleRule};
//! use trellis_options::{OptionValues, Value};
//!
//! let map = styles! {
//!     base: "btn inline-flex",
//!     variant: {
//!         solid: "bg-blue-500 text-white",
//!         outline: "border border-blue-500",
//!     },
//!     disabled: {
//!         true: "opacity-50",
//!         false: "cursor-pointer",
//!     },
//!     columns: (StyleRule::dynamic(|v: &OptionValues| {
//!         format!("grid-cols-{}", v.get("columns").and_then(Value::as_int).unwrap_or(1))
//!     })),
//! };
//!
//! assert_eq!(map.len(), 4);
//! ```

/// Builds a [`StyleMap`](crate::StyleMap).
///
/// # Syntax
///
/// ```text
/// styles! {
///     key: "classes",                  // literal rule
///     key: { sub: "classes", ... },    // nested rule
///     key: { true: "..", false: ".." },// boolean variants
///     "hyphen-key": "classes",         // quoted key
///     key: (expr),                     // anything Into<StyleRule>
/// }
/// ```
///
/// Bare `true`/`false` sub-keys are boolean variants; `"true"` is a named
/// variant.
#[macro_export]
macro_rules! styles {
    { $($tokens:tt)* } => {{
        let mut __map = $crate::StyleMap::new();
        $crate::styles_internal!(__map; $($tokens)*);
        __map
    }};
}

/// Inserts `key: rule` entries into a style map.
#[macro_export]
#[doc(hidden)]
macro_rules! styles_internal {
    ($map:ident;) => {};

    ($map:ident; $key:tt : $rule:tt $(, $($rest:tt)*)?) => {
        $map.insert(
            $crate::VariantKey::from_token(stringify!($key)).to_string(),
            $crate::style_rule!($rule),
        );
        $( $crate::styles_internal!($map; $($rest)*); )?
    };
}

/// Converts one rule token into a [`StyleRule`](crate::StyleRule).
#[macro_export]
#[doc(hidden)]
macro_rules! style_rule {
    ({ $($inner:tt)* }) => {{
        let mut __variants: ::std::vec::Vec<($crate::VariantKey, $crate::StyleRule)> =
            ::std::vec::Vec::new();
        $crate::style_variants!(__variants; $($inner)*);
        $crate::StyleRule::nested(__variants)
    }};

    (( $rule:expr )) => {
        $crate::StyleRule::from($rule)
    };

    ($classes:literal) => {
        $crate::StyleRule::from($classes)
    };
}

/// Collects `sub: rule` entries of a nested rule.
#[macro_export]
#[doc(hidden)]
macro_rules! style_variants {
    ($variants:ident;) => {};

    ($variants:ident; $key:tt : $rule:tt $(, $($rest:tt)*)?) => {
        $variants.push((
            $crate::VariantKey::from_token(stringify!($key)),
            $crate::style_rule!($rule),
        ));
        $( $crate::style_variants!($variants; $($rest)*); )?
    };
}
