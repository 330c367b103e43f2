//! Utility class conflict resolution.
//!
//! Resolved class strings are handed to a [`ClassConflictResolver`], which
//! removes tokens superseded by later tokens for the same CSS property:
//! `"p-4 bg-blue-500 p-6"` becomes `"bg-blue-500 p-6"`.
//!
//! The conflict taxonomy is pluggable. [`UtilityClassResolver`] (the
//! default) knows the common utility families; [`DedupResolver`] only drops
//! exact duplicates; any `Fn(&str) -> String` works too.
//!
//! # Process-wide Resolver
//!
//! Style resolution and attribute merging use the resolver installed with
//! [`set_conflict_resolver`] unless given one explicitly. Install it once at
//! startup; [`reset_conflict_resolver`] restores the default for tests.
//!
//! ```rust
//! use std::sync::Arc;
//! use trellis_style::{
//!     conflict_resolver, reset_conflict_resolver, set_conflict_resolver, DedupResolver,
//! };
//!
//! set_conflict_resolver(Arc::new(DedupResolver));
//! assert_eq!(conflict_resolver().merge("p-4 p-6 p-4"), "p-6 p-4");
//! reset_conflict_resolver();
//! ```

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;
use regex::Regex;

/// Merges a space-separated class list, resolving conflicting utilities.
///
/// Implementations keep the last token of each conflicting group and
/// preserve the relative order of the surviving tokens.
pub trait ClassConflictResolver: Send + Sync {
    /// Returns the conflict-resolved class list.
    fn merge(&self, classes: &str) -> String;
}

impl<F> ClassConflictResolver for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn merge(&self, classes: &str) -> String {
        self(classes)
    }
}

static RESOLVER: Lazy<RwLock<Arc<dyn ClassConflictResolver>>> =
    Lazy::new(|| RwLock::new(default_resolver()));

fn default_resolver() -> Arc<dyn ClassConflictResolver> {
    Arc::new(UtilityClassResolver::new())
}

/// Installs the process-wide conflict resolver.
pub fn set_conflict_resolver(resolver: Arc<dyn ClassConflictResolver>) {
    let mut guard = RESOLVER.write().unwrap_or_else(PoisonError::into_inner);
    *guard = resolver;
}

/// Returns the process-wide conflict resolver.
pub fn conflict_resolver() -> Arc<dyn ClassConflictResolver> {
    RESOLVER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Restores the default [`UtilityClassResolver`].
pub fn reset_conflict_resolver() {
    set_conflict_resolver(default_resolver());
}

/// Resolver that only removes exact duplicates, keeping the last occurrence.
#[derive(Debug, Clone, Copy, Default)]
pub struct DedupResolver;

impl ClassConflictResolver for DedupResolver {
    fn merge(&self, classes: &str) -> String {
        keep_last(classes, |_| None)
    }
}

/// Default resolver for utility-first class names.
///
/// Each token is split into variant modifiers (`md:hover:`), an important
/// marker (`!`), an optional negative sign, and the utility itself. The
/// utility is mapped to a conflict group; walking the list from the end, a
/// token is dropped when a later token already claimed its group under the
/// same modifiers. Shorthand groups also claim their per-side groups, so
/// `px-2 p-4` resolves to `p-4` while `p-4 px-2` keeps both.
///
/// Tokens the resolver does not recognize are kept, minus exact duplicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtilityClassResolver;

impl UtilityClassResolver {
    /// Creates the resolver.
    pub fn new() -> Self {
        Self
    }
}

impl ClassConflictResolver for UtilityClassResolver {
    fn merge(&self, classes: &str) -> String {
        keep_last(classes, |token| {
            let parsed = ParsedClass::parse(token);
            let group = class_group(parsed.utility)?;
            Some((parsed.scope(), group))
        })
    }
}

/// Walks tokens backwards, keeping the last token per claimed key.
fn keep_last<F>(classes: &str, classify: F) -> String
where
    F: Fn(&str) -> Option<(String, String)>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut claimed: HashSet<String> = HashSet::new();
    let mut kept: Vec<&str> = Vec::new();

    for token in classes.split_whitespace().rev() {
        if !seen.insert(token) {
            continue;
        }
        if let Some((scope, group)) = classify(token) {
            let key = format!("{}{}", scope, group);
            if claimed.contains(&key) {
                continue;
            }
            for shadowed in conflicting_groups(&group) {
                claimed.insert(format!("{}{}", scope, shadowed));
            }
            claimed.insert(key);
        }
        kept.push(token);
    }

    kept.reverse();
    kept.join(" ")
}

/// A class token split into its parts.
#[derive(Debug, PartialEq)]
struct ParsedClass<'a> {
    modifiers: Vec<&'a str>,
    important: bool,
    utility: &'a str,
}

impl<'a> ParsedClass<'a> {
    fn parse(token: &'a str) -> Self {
        // Split on ':' outside of arbitrary-value brackets.
        let mut modifiers = Vec::new();
        let mut depth = 0usize;
        let mut start = 0usize;
        for (i, c) in token.char_indices() {
            match c {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                ':' if depth == 0 => {
                    modifiers.push(&token[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
        let mut utility = &token[start..];

        let important = if let Some(rest) = utility.strip_prefix('!') {
            utility = rest;
            true
        } else if let Some(rest) = utility.strip_suffix('!') {
            utility = rest;
            true
        } else {
            false
        };
        if let Some(rest) = utility.strip_prefix('-') {
            utility = rest;
        }

        modifiers.sort_unstable();
        Self {
            modifiers,
            important,
            utility,
        }
    }

    /// Modifier and importance prefix that scopes a conflict group.
    fn scope(&self) -> String {
        let mut scope = self.modifiers.join(":");
        if !scope.is_empty() {
            scope.push(':');
        }
        if self.important {
            scope.push('!');
        }
        scope
    }
}

static LENGTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(px|0|\d+(\.\d+)?(px|rem|em|%|vh|vw|ch)?|\d+/\d+|full|screen|auto)$")
        .unwrap_or_else(|e| panic!("invalid length pattern: {e}"))
});

static ARBITRARY_LENGTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(length:)?(-?\d+(\.\d+)?(px|rem|em|%|vh|vw|ch)?|calc\(.*\))\]$")
        .unwrap_or_else(|e| panic!("invalid arbitrary length pattern: {e}"))
});

fn is_length(value: &str) -> bool {
    LENGTH.is_match(value) || ARBITRARY_LENGTH.is_match(value)
}

const TEXT_SIZES: &[&str] = &[
    "xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl", "8xl", "9xl",
];
const TEXT_ALIGN: &[&str] = &["left", "center", "right", "justify", "start", "end"];
const FONT_WEIGHTS: &[&str] = &[
    "thin",
    "extralight",
    "light",
    "normal",
    "medium",
    "semibold",
    "bold",
    "extrabold",
    "black",
];
const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted", "double", "hidden", "none"];
const SIDES: &[&str] = &["x", "y", "t", "r", "b", "l", "s", "e"];
const CORNERS: &[&str] = &[
    "t", "r", "b", "l", "s", "e", "tl", "tr", "br", "bl", "ss", "se", "es", "ee",
];

/// Standalone utilities that are their own group.
fn keyword_group(utility: &str) -> Option<&'static str> {
    let group = match utility {
        "block" | "inline-block" | "inline" | "flex" | "inline-flex" | "grid" | "inline-grid"
        | "table" | "table-row" | "table-cell" | "contents" | "hidden" | "flow-root"
        | "list-item" => "display",
        "static" | "fixed" | "absolute" | "relative" | "sticky" => "position",
        "visible" | "invisible" | "collapse" => "visibility",
        "italic" | "not-italic" => "font-style",
        "underline" | "overline" | "line-through" | "no-underline" => "text-decoration",
        "uppercase" | "lowercase" | "capitalize" | "normal-case" => "text-transform",
        "truncate" => "text-overflow",
        "border" => "border-w",
        "rounded" => "rounded",
        "shadow" => "shadow",
        "ring" => "ring-w",
        "outline" => "outline-style",
        "transition" => "transition",
        "grow" => "grow",
        "shrink" => "shrink",
        "container" => "container",
        _ => return None,
    };
    Some(group)
}

/// Maps a utility (without modifiers) to its conflict group.
fn class_group(utility: &str) -> Option<String> {
    if let Some(group) = keyword_group(utility) {
        return Some(group.to_string());
    }

    // Arbitrary property: [mask-type:luminance]
    if let Some(inner) = utility.strip_prefix('[').and_then(|u| u.strip_suffix(']')) {
        let property = inner.split(':').next()?;
        return Some(format!("arbitrary-{}", property));
    }

    let (head, rest) = utility.split_once('-')?;
    let group = match head {
        "p" | "px" | "py" | "pt" | "pr" | "pb" | "pl" | "ps" | "pe" | "m" | "mx" | "my" | "mt"
        | "mr" | "mb" | "ml" | "ms" | "me" | "w" | "h" | "z" | "order" | "basis" | "aspect"
        | "opacity" | "cursor" | "leading" | "tracking" | "duration" | "delay" | "ease"
        | "top" | "right" | "bottom" | "left" | "start" | "end" | "columns" | "whitespace"
        | "select" | "align" | "object" | "animate" | "indent" | "fill" | "stroke" => {
            head.to_string()
        }
        "size" => "size".to_string(),
        "inset" => match rest.split_once('-') {
            Some(("x", _)) => "inset-x".to_string(),
            Some(("y", _)) => "inset-y".to_string(),
            _ => "inset".to_string(),
        },
        "gap" => match rest.split_once('-') {
            Some(("x", _)) => "gap-x".to_string(),
            Some(("y", _)) => "gap-y".to_string(),
            _ => "gap".to_string(),
        },
        "space" => match rest.split_once('-') {
            Some(("x", _)) => "space-x".to_string(),
            Some(("y", _)) => "space-y".to_string(),
            _ => return None,
        },
        "min" | "max" => match rest.split_once('-') {
            Some((axis @ ("w" | "h"), _)) => format!("{}-{}", head, axis),
            _ => return None,
        },
        "overflow" => match rest.split_once('-') {
            Some((axis @ ("x" | "y"), _)) => format!("overflow-{}", axis),
            _ => "overflow".to_string(),
        },
        "text" => text_group(rest).to_string(),
        "font" => {
            let arbitrary_weight = rest
                .strip_prefix('[')
                .is_some_and(|r| r.starts_with(|c: char| c.is_ascii_digit()));
            if FONT_WEIGHTS.contains(&rest) || arbitrary_weight {
                "font-weight".to_string()
            } else {
                "font-family".to_string()
            }
        }
        "bg" => bg_group(rest).to_string(),
        "border" => border_group(rest),
        "rounded" => match rest.split_once('-') {
            Some((corner, _)) if CORNERS.contains(&corner) => format!("rounded-{}", corner),
            None if CORNERS.contains(&rest) => format!("rounded-{}", rest),
            _ => "rounded".to_string(),
        },
        "shadow" => "shadow".to_string(),
        "ring" => {
            if is_length(rest) {
                "ring-w".to_string()
            } else if rest.starts_with("offset") {
                "ring-offset".to_string()
            } else {
                "ring-color".to_string()
            }
        }
        "outline" => {
            if BORDER_STYLES.contains(&rest) {
                "outline-style".to_string()
            } else if is_length(rest) {
                "outline-w".to_string()
            } else if rest.starts_with("offset") {
                "outline-offset".to_string()
            } else {
                "outline-color".to_string()
            }
        }
        "flex" => match rest {
            "row" | "row-reverse" | "col" | "col-reverse" => "flex-direction".to_string(),
            "wrap" | "wrap-reverse" | "nowrap" => "flex-wrap".to_string(),
            _ => "flex".to_string(),
        },
        "grow" | "shrink" => head.to_string(),
        "justify" => match rest.split_once('-') {
            Some(("items", _)) => "justify-items".to_string(),
            Some(("self", _)) => "justify-self".to_string(),
            _ => "justify-content".to_string(),
        },
        "items" => "align-items".to_string(),
        "self" => "align-self".to_string(),
        "content" => "align-content".to_string(),
        "place" => match rest.split_once('-') {
            Some((kind @ ("content" | "items" | "self"), _)) => format!("place-{}", kind),
            _ => return None,
        },
        "grid" => match rest.split_once('-') {
            Some(("cols", _)) => "grid-cols".to_string(),
            Some(("rows", _)) => "grid-rows".to_string(),
            Some(("flow", _)) => "grid-flow".to_string(),
            _ => return None,
        },
        "col" | "row" => match rest.split_once('-') {
            Some(("span", _)) => format!("{}-span", head),
            Some(("start", _)) => format!("{}-start", head),
            Some(("end", _)) => format!("{}-end", head),
            _ => return None,
        },
        "decoration" => {
            if is_length(rest) {
                "decoration-w".to_string()
            } else {
                "decoration-color".to_string()
            }
        }
        "transition" => "transition".to_string(),
        "pointer" => "pointer-events".to_string(),
        "list" => "list-style".to_string(),
        "line" => "line-clamp".to_string(),
        _ => return None,
    };
    Some(group)
}

fn text_group(rest: &str) -> &'static str {
    if TEXT_ALIGN.contains(&rest) {
        "text-align"
    } else if TEXT_SIZES.contains(&rest) || ARBITRARY_LENGTH.is_match(rest) {
        "font-size"
    } else if matches!(rest, "wrap" | "nowrap" | "balance" | "pretty") {
        "text-wrap"
    } else if matches!(rest, "ellipsis" | "clip") {
        "text-overflow"
    } else {
        "text-color"
    }
}

fn bg_group(rest: &str) -> &'static str {
    match rest {
        "fixed" | "local" | "scroll" => "bg-attachment",
        "auto" | "cover" | "contain" => "bg-size",
        "repeat" | "no-repeat" | "repeat-x" | "repeat-y" | "repeat-round" | "repeat-space" => {
            "bg-repeat"
        }
        "bottom" | "center" | "left" | "left-bottom" | "left-top" | "right" | "right-bottom"
        | "right-top" | "top" => "bg-position",
        "none" => "bg-image",
        _ if rest.starts_with("gradient-") => "bg-image",
        _ => "bg-color",
    }
}

fn border_group(rest: &str) -> String {
    if BORDER_STYLES.contains(&rest) {
        return "border-style".to_string();
    }
    if matches!(rest, "collapse" | "separate") {
        return "border-collapse".to_string();
    }
    if SIDES.contains(&rest) {
        return format!("border-w-{}", rest);
    }
    if let Some((side, value)) = rest.split_once('-') {
        if SIDES.contains(&side) {
            return if is_length(value) {
                format!("border-w-{}", side)
            } else {
                format!("border-color-{}", side)
            };
        }
    }
    if is_length(rest) {
        "border-w".to_string()
    } else {
        "border-color".to_string()
    }
}

/// Groups a shorthand group overrides when it appears later.
fn conflicting_groups(group: &str) -> &'static [&'static str] {
    match group {
        "p" => &["px", "py", "pt", "pr", "pb", "pl", "ps", "pe"],
        "px" => &["pr", "pl", "ps", "pe"],
        "py" => &["pt", "pb"],
        "m" => &["mx", "my", "mt", "mr", "mb", "ml", "ms", "me"],
        "mx" => &["mr", "ml", "ms", "me"],
        "my" => &["mt", "mb"],
        "size" => &["w", "h"],
        "inset" => &[
            "inset-x", "inset-y", "top", "right", "bottom", "left", "start", "end",
        ],
        "inset-x" => &["right", "left"],
        "inset-y" => &["top", "bottom"],
        "gap" => &["gap-x", "gap-y"],
        "overflow" => &["overflow-x", "overflow-y"],
        "rounded" => &[
            "rounded-t",
            "rounded-r",
            "rounded-b",
            "rounded-l",
            "rounded-s",
            "rounded-e",
            "rounded-tl",
            "rounded-tr",
            "rounded-br",
            "rounded-bl",
            "rounded-ss",
            "rounded-se",
            "rounded-es",
            "rounded-ee",
        ],
        "rounded-t" => &["rounded-tl", "rounded-tr"],
        "rounded-r" => &["rounded-tr", "rounded-br"],
        "rounded-b" => &["rounded-br", "rounded-bl"],
        "rounded-l" => &["rounded-tl", "rounded-bl"],
        "border-w" => &[
            "border-w-x",
            "border-w-y",
            "border-w-t",
            "border-w-r",
            "border-w-b",
            "border-w-l",
            "border-w-s",
            "border-w-e",
        ],
        "border-w-x" => &["border-w-r", "border-w-l"],
        "border-w-y" => &["border-w-t", "border-w-b"],
        "border-color" => &[
            "border-color-x",
            "border-color-y",
            "border-color-t",
            "border-color-r",
            "border-color-b",
            "border-color-l",
            "border-color-s",
            "border-color-e",
        ],
        "border-color-x" => &["border-color-r", "border-color-l"],
        "border-color-y" => &["border-color-t", "border-color-b"],
        _ => &[],
    }
}
