//! Component lookup by helper name.
//!
//! Templates refer to components through helper names such as `ui_button`.
//! A [`ComponentRegistry`] maps type names to frozen [`ComponentType`]s and
//! resolves helper names by stripping one configured prefix:
//!
//! ```text
//! prefixes = ["ui"]
//!
//! "ui_button"       -> "button"
//! "ui_icon_button"  -> "icon_button"
//! "button"          -> "button"      (unprefixed names are looked up as-is)
//! "app_button"      -> UndefinedComponentType, unless "app_button" is registered
//! ```
//!
//! # Configuration
//!
//! Prefixes are process-wide. Configure them once at startup; tests restore
//! the default with [`reset_lookup_config`].
//!
//! ```rust
//! use trellis::{configure_lookup, lookup_config, reset_lookup_config, LookupConfig};
//!
//! configure_lookup(LookupConfig::new(["ui", "admin"]));
//! assert_eq!(lookup_config().prefixes, vec!["ui", "admin"]);
//! reset_lookup_config();
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::component::ComponentType;
use crate::error::LookupError;

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "ui";

/// Process-wide lookup settings.
///
/// Loadable from application config; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Helper name prefixes, tried in order.
    pub prefixes: Vec<String>,
}

impl LookupConfig {
    /// Creates a config with the given prefixes.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self::new([DEFAULT_PREFIX])
    }
}

static LOOKUP_CONFIG: Lazy<RwLock<LookupConfig>> =
    Lazy::new(|| RwLock::new(LookupConfig::default()));

/// Replaces the process-wide lookup configuration.
pub fn configure_lookup(config: LookupConfig) {
    tracing::debug!(prefixes = ?config.prefixes, "configured component lookup");
    let mut guard = LOOKUP_CONFIG
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = config;
}

/// Returns a copy of the process-wide lookup configuration.
pub fn lookup_config() -> LookupConfig {
    LOOKUP_CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Restores the default lookup configuration.
pub fn reset_lookup_config() {
    configure_lookup(LookupConfig::default());
}

/// Name to component type map, populated at startup.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    types: IndexMap<String, Arc<ComponentType>>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type under its own name, replacing any previous entry.
    pub fn register(&mut self, ty: Arc<ComponentType>) -> &mut Self {
        let name = ty.name().to_string();
        tracing::debug!(component = %name, "registered component type");
        self.types.insert(name, ty);
        self
    }

    /// Returns the type registered as `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<ComponentType>> {
        self.types.get(name)
    }

    /// Iterates over registered type names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolves a helper name using the process-wide configuration.
    pub fn resolve_helper(&self, helper: &str) -> Result<Arc<ComponentType>, LookupError> {
        self.resolve_helper_with(&lookup_config(), helper)
    }

    /// Resolves a helper name with an explicit configuration.
    ///
    /// Each configured prefix is tried in order; the bare name is tried last.
    pub fn resolve_helper_with(
        &self,
        config: &LookupConfig,
        helper: &str,
    ) -> Result<Arc<ComponentType>, LookupError> {
        let stripped = config.prefixes.iter().filter_map(|prefix| {
            helper
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
        });

        for name in stripped.chain(std::iter::once(helper)) {
            if let Some(ty) = self.types.get(name) {
                tracing::trace!(helper, component = %name, "resolved component helper");
                return Ok(Arc::clone(ty));
            }
        }

        tracing::debug!(helper, "no component type for helper");
        Err(LookupError::UndefinedComponentType {
            name: helper.to_string(),
        })
    }
}
