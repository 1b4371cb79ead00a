//! Advisory validation for [`OptionsConfig`].
//!
//! Validation is advisory: it produces warnings but never rejects options.
//! Callers can log or display them.

use std::collections::BTreeMap;

use crate::classify::ContainerKind;
use crate::options::OptionsConfig;

/// An advisory warning about an options document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryWarning {
    /// Machine-readable warning code.
    pub code: &'static str,

    /// Human-readable warning message.
    pub message: String,

    /// Path to the problematic field.
    pub path: String,
}

impl std::fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

/// Validate options and return advisory warnings.
pub fn validate(cfg: &OptionsConfig) -> Vec<AdvisoryWarning> {
    let mut warnings = vec![];
    let mut seen: BTreeMap<&str, &'static str> = BTreeMap::new();

    for (kind, names) in cfg.classes.lists() {
        let field = field_name(kind);
        for (i, name) in names.iter().enumerate() {
            let path = format!("{field}[{i}]");
            if name.trim().is_empty() {
                warnings.push(AdvisoryWarning {
                    code: "classes.blank",
                    message: "class name is blank and never matches".to_string(),
                    path,
                });
                continue;
            }
            match seen.get(name.as_str()) {
                Some(&first) if first == field => warnings.push(AdvisoryWarning {
                    code: "classes.repeated",
                    message: format!("class '{name}' is listed more than once"),
                    path,
                }),
                Some(&first) => warnings.push(AdvisoryWarning {
                    code: "classes.conflict",
                    message: format!("class '{name}' is also listed in {first}, which takes precedence"),
                    path,
                }),
                None => {
                    seen.insert(name, field);
                }
            }
        }
    }

    for warning in &warnings {
        tracing::debug!(code = warning.code, path = %warning.path, "{}", warning.message);
    }
    warnings
}

const fn field_name(kind: ContainerKind) -> &'static str {
    match kind {
        ContainerKind::Sequence => "arrays",
        ContainerKind::Map => "maps",
        ContainerKind::WeakMap => "weakMaps",
        ContainerKind::Set => "sets",
        ContainerKind::WeakSet => "weakSets",
        ContainerKind::Record => "records",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassLists;

    fn cfg(classes: ClassLists) -> OptionsConfig {
        OptionsConfig {
            classes,
            ..OptionsConfig::default()
        }
    }

    #[test]
    fn test_default_has_no_warnings() {
        assert!(validate(&OptionsConfig::default()).is_empty());
    }

    #[test]
    fn test_blank_class_name() {
        let warnings = validate(&cfg(ClassLists {
            sets: vec!["  ".into()],
            ..ClassLists::default()
        }));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "classes.blank");
        assert_eq!(warnings[0].path, "sets[0]");
    }

    #[test]
    fn test_conflict_points_at_losing_list() {
        let warnings = validate(&cfg(ClassLists {
            maps: vec!["Registry".into()],
            weak_maps: vec!["Registry".into()],
            ..ClassLists::default()
        }));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "classes.conflict");
        assert_eq!(warnings[0].path, "maps[0]");
        assert!(warnings[0].message.contains("weakMaps"));
    }

    #[test]
    fn test_repeated_in_same_list() {
        let warnings = validate(&cfg(ClassLists {
            arrays: vec!["Tuple".into(), "Tuple".into()],
            ..ClassLists::default()
        }));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "classes.repeated");
        assert_eq!(warnings[0].path, "arrays[1]");
    }

    #[test]
    fn test_display_format() {
        let warning = AdvisoryWarning {
            code: "classes.blank",
            message: "class name is blank and never matches".into(),
            path: "sets[0]".into(),
        };
        assert_eq!(
            warning.to_string(),
            "[classes.blank] sets[0]: class name is blank and never matches"
        );
    }
}
