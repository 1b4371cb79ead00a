//! Container classification.
//!
//! Every container has a native kind given by its variant. The override lists
//! reclassify containers by class name, e.g. a map whose class is listed in
//! `weak_maps` is treated as a weak map and is never pruned.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The kinds of container the delete dispatcher knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Sequence,
    Map,
    WeakMap,
    Set,
    WeakSet,
    Record,
}

impl ContainerKind {
    /// Weak kinds cannot report their size and are never considered empty.
    pub const fn is_weak(self) -> bool {
        matches!(self, Self::WeakMap | Self::WeakSet)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Map => "map",
            Self::WeakMap => "weak map",
            Self::Set => "set",
            Self::WeakSet => "weak set",
            Self::Record => "record",
        }
    }
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Class-name override lists.
///
/// When a class appears in several lists the weak lists win, then
/// `arrays`, `maps` and `sets` in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassLists {
    /// Classes treated as ordered sequences.
    pub arrays: Vec<String>,

    /// Classes treated as keyed maps.
    pub maps: Vec<String>,

    /// Classes treated as keyed sets.
    pub sets: Vec<String>,

    /// Classes treated as weak maps.
    pub weak_maps: Vec<String>,

    /// Classes treated as weak sets.
    pub weak_sets: Vec<String>,
}

impl ClassLists {
    pub fn is_empty(&self) -> bool {
        self.lists().iter().all(|(_, names)| names.is_empty())
    }

    /// Kind a class name is explicitly listed under.
    pub fn kind_for_class(&self, class: &str) -> Option<ContainerKind> {
        self.lists()
            .into_iter()
            .find(|(_, names)| names.iter().any(|name| name == class))
            .map(|(kind, _)| kind)
    }

    /// Classify a value: overrides first, then the native kind.
    ///
    /// Returns `None` for primitives.
    pub fn classify(&self, value: &Value) -> Option<ContainerKind> {
        let native = value.native_kind()?;
        if self.is_empty() {
            return Some(native);
        }
        Some(
            value
                .class()
                .and_then(|class| self.kind_for_class(&class))
                .unwrap_or(native),
        )
    }

    /// The lists paired with their kind, in precedence order.
    pub(crate) fn lists(&self) -> [(ContainerKind, &[String]); 5] {
        [
            (ContainerKind::WeakMap, self.weak_maps.as_slice()),
            (ContainerKind::WeakSet, self.weak_sets.as_slice()),
            (ContainerKind::Sequence, self.arrays.as_slice()),
            (ContainerKind::Map, self.maps.as_slice()),
            (ContainerKind::Set, self.sets.as_slice()),
        ]
    }
}
