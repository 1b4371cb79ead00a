//! Per-kind delete dispatcher.

use crate::classify::ContainerKind;
use crate::error::DeleteError;
use crate::options::DeleteOptions;
use crate::value::Value;

/// Remove a single key from a single container.
///
/// | Kind | Key | Effect |
/// |---|---|---|
/// | sequence | position | remove and shift later items down |
/// | map, weak map | key (strict, or deep when `loose`) | remove the entry with the stored key |
/// | set, weak set | position in iteration order | rebuild the set without that element |
/// | record | attribute name | remove the field if it is deletable |
///
/// Returns `Ok(false)` when nothing matched.
///
/// # Errors
/// [`DeleteError::NotAnObject`] for primitives, and
/// [`DeleteError::KindMismatch`] when a class override assigns a kind the
/// container's storage cannot serve.
pub fn default_delete(
    container: &Value,
    key: &Value,
    options: &DeleteOptions,
) -> Result<bool, DeleteError> {
    let kind = options.classify(container).ok_or(DeleteError::NotAnObject {
        found: container.type_name(),
    })?;

    let removed = match kind {
        ContainerKind::Sequence => {
            let list = container.as_list().ok_or_else(|| mismatch(kind, container))?;
            key.as_index()
                .is_some_and(|index| list.borrow_mut().remove(index).is_some())
        }
        ContainerKind::Map | ContainerKind::WeakMap => {
            let map = container.as_keyed().ok_or_else(|| mismatch(kind, container))?;
            let stored = map
                .borrow()
                .stored_key(key, options.loose)
                .unwrap_or_else(|| key.clone());
            map.borrow_mut().remove(&stored).is_some()
        }
        ContainerKind::Set | ContainerKind::WeakSet => {
            let set = container.as_set().ok_or_else(|| mismatch(kind, container))?;
            key.as_index()
                .is_some_and(|index| set.borrow_mut().remove_nth(index))
        }
        ContainerKind::Record => {
            let record = container
                .as_record()
                .ok_or_else(|| mismatch(kind, container))?;
            key.property_name()
                .is_some_and(|name| record.borrow_mut().remove(&name).is_some())
        }
    };

    tracing::trace!(%kind, removed, "dispatched delete");
    Ok(removed)
}

pub(crate) fn mismatch(kind: ContainerKind, container: &Value) -> DeleteError {
    DeleteError::KindMismatch {
        kind,
        found: container.type_name(),
    }
}
