//! Emptiness check driving recursive pruning.

use crate::options::DeleteOptions;
use crate::value::Value;

/// Whether a container holds no elements.
///
/// Weak kinds are never empty since their size cannot be observed, and
/// primitives are never empty since they cannot be pruned.
pub fn default_is_empty(container: &Value, options: &DeleteOptions) -> bool {
    match options.classify(container) {
        Some(kind) if !kind.is_weak() => container.container_len() == Some(0),
        _ => false,
    }
}
