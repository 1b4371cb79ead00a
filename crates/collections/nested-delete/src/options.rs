//! Options controlling key matching, pruning, classification and overrides.
//!
//! The data half of the options ([`OptionsConfig`]) is plain serde data and
//! can be parsed from JSON or TOML text. The hooks are closures and only exist
//! on [`DeleteOptions`].

use std::rc::Rc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classify::{ClassLists, ContainerKind};
use crate::dispatch::default_delete;
use crate::empty::default_is_empty;
use crate::error::{DeleteError, OptionsError};
use crate::value::Value;

/// Replacement for the delete dispatcher.
///
/// Called with the container, the key, the options and a fallback that runs
/// the default dispatcher. Its boolean result is informational only.
pub type DeleteHook = dyn Fn(&Value, &Value, &DeleteOptions, &dyn Fn() -> Result<bool, DeleteError>) -> Result<bool, DeleteError>;

/// Replacement for the emptiness check used while pruning.
///
/// Called with the container, the options and a fallback that runs the
/// default check.
pub type EmptinessHook = dyn Fn(&Value, &DeleteOptions, &dyn Fn() -> bool) -> bool;

/// Serializable part of the options.
///
/// All fields use `#[serde(default)]` so partial documents work. The override
/// lists sit at the top level next to the flags:
///
/// ```
/// use nested_delete::OptionsConfig;
///
/// let cfg: OptionsConfig =
///     serde_json::from_str(r#"{"recursive": true, "weakMaps": ["Cache"]}"#).unwrap();
/// assert!(cfg.recursive);
/// assert_eq!(cfg.classes.weak_maps, vec!["Cache".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OptionsConfig {
    /// Match keys by deep structural equality instead of identity.
    pub loose: bool,

    /// After deleting, remove ancestors that became empty.
    pub recursive: bool,

    /// Class-name override lists.
    #[serde(flatten)]
    pub classes: ClassLists,
}

/// Options for [`delete`](crate::delete) and friends.
#[derive(Clone, Default)]
pub struct DeleteOptions {
    /// Match keys by deep structural equality instead of identity.
    pub loose: bool,

    /// After deleting, remove ancestors that became empty.
    pub recursive: bool,

    /// Class-name override lists used for classification.
    pub classes: ClassLists,

    delete_hook: Option<Rc<DeleteHook>>,
    empty_hook: Option<Rc<EmptinessHook>>,
}

impl std::fmt::Debug for DeleteOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteOptions")
            .field("loose", &self.loose)
            .field("recursive", &self.recursive)
            .field("classes", &self.classes)
            .field("delete_hook", &self.delete_hook.is_some())
            .field("empty_hook", &self.empty_hook.is_some())
            .finish()
    }
}

impl DeleteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_loose(mut self, loose: bool) -> Self {
        self.loose = loose;
        self
    }

    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    #[must_use]
    pub fn with_classes(mut self, classes: ClassLists) -> Self {
        self.classes = classes;
        self
    }

    /// Replace the delete dispatcher.
    #[must_use]
    pub fn with_delete_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value, &Value, &Self, &dyn Fn() -> Result<bool, DeleteError>) -> Result<bool, DeleteError>
            + 'static,
    {
        self.delete_hook = Some(Rc::new(hook));
        self
    }

    /// Replace the emptiness check.
    #[must_use]
    pub fn with_empty_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value, &Self, &dyn Fn() -> bool) -> bool + 'static,
    {
        self.empty_hook = Some(Rc::new(hook));
        self
    }

    pub fn has_delete_hook(&self) -> bool {
        self.delete_hook.is_some()
    }

    pub fn has_empty_hook(&self) -> bool {
        self.empty_hook.is_some()
    }

    /// Classify a value using the configured override lists.
    pub fn classify(&self, value: &Value) -> Option<ContainerKind> {
        self.classes.classify(value)
    }

    /// Build options from parsed configuration. Hooks start unset.
    pub fn from_config(cfg: OptionsConfig) -> Self {
        Self {
            loose: cfg.loose,
            recursive: cfg.recursive,
            classes: cfg.classes,
            ..Self::default()
        }
    }

    /// The serializable part of these options.
    pub fn to_config(&self) -> OptionsConfig {
        OptionsConfig {
            loose: self.loose,
            recursive: self.recursive,
            classes: self.classes.clone(),
        }
    }

    /// Parse options from a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, OptionsError> {
        let mut de = serde_json::Deserializer::from_str(raw);
        let cfg: OptionsConfig =
            serde_path_to_error::deserialize(&mut de).map_err(|e| OptionsError::Json {
                path: e.path().to_string(),
                source: e.into_inner(),
            })?;
        de.end().map_err(|source| OptionsError::Json {
            path: ".".to_string(),
            source,
        })?;
        Ok(Self::from_config(cfg))
    }

    /// Parse options from a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, OptionsError> {
        let de = toml::Deserializer::new(raw);
        let cfg: OptionsConfig =
            serde_path_to_error::deserialize(de).map_err(|e| OptionsError::Toml {
                path: e.path().to_string(),
                source: e.into_inner(),
            })?;
        Ok(Self::from_config(cfg))
    }

    /// Delete `key` from `container` through the hook, if any.
    pub(crate) fn delete_key(&self, container: &Value, key: &Value) -> Result<bool, DeleteError> {
        let fallback = || default_delete(container, key, self);
        match &self.delete_hook {
            Some(hook) => hook(container, key, self, &fallback),
            None => fallback(),
        }
    }

    /// Emptiness check through the hook, if any.
    pub(crate) fn check_empty(&self, container: &Value) -> bool {
        let fallback = || default_is_empty(container, self);
        match &self.empty_hook {
            Some(hook) => hook(container, self, &fallback),
            None => fallback(),
        }
    }
}

impl From<OptionsConfig> for DeleteOptions {
    fn from(cfg: OptionsConfig) -> Self {
        Self::from_config(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict_and_shallow() {
        let opts = DeleteOptions::new();
        assert!(!opts.loose);
        assert!(!opts.recursive);
        assert!(opts.classes.is_empty());
        assert!(!opts.has_delete_hook());
        assert!(!opts.has_empty_hook());
    }

    #[test]
    fn test_from_json_reads_flags_and_lists() {
        let opts = DeleteOptions::from_json_str(
            r#"{"loose": true, "arrays": ["Tuple"], "weakSets": ["Seen"]}"#,
        )
        .unwrap();
        assert!(opts.loose);
        assert!(!opts.recursive);
        assert_eq!(opts.classes.arrays, vec!["Tuple".to_string()]);
        assert_eq!(opts.classes.weak_sets, vec!["Seen".to_string()]);
    }

    #[test]
    fn test_from_json_reports_field_path() {
        let err = DeleteOptions::from_json_str(r#"{"loose": "yes"}"#).unwrap_err();
        assert_eq!(err.path(), "loose");
        assert!(err.to_string().contains("invalid JSON options"));
    }

    #[test]
    fn test_from_json_rejects_trailing_data() {
        assert!(DeleteOptions::from_json_str(r#"{"loose": true} extra"#).is_err());
    }

    #[test]
    fn test_from_toml_reads_flags_and_lists() {
        let opts = DeleteOptions::from_toml_str(
            r#"
            recursive = true
            weakMaps = ["Cache"]
            "#,
        )
        .unwrap();
        assert!(opts.recursive);
        assert_eq!(opts.classes.weak_maps, vec!["Cache".to_string()]);
    }

    #[test]
    fn test_from_toml_reports_field_path() {
        let err = DeleteOptions::from_toml_str("recursive = 3").unwrap_err();
        assert_eq!(err.path(), "recursive");
        assert!(err.to_string().contains("invalid TOML options"));
    }

    #[test]
    fn test_clone_keeps_hooks() {
        let opts = DeleteOptions::new().with_empty_hook(|_, _, _| true);
        let cloned = opts.clone();
        assert!(cloned.has_empty_hook());
        assert!(format!("{cloned:?}").contains("empty_hook: true"));
    }
}
