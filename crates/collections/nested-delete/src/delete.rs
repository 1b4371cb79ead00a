//! Top-level delete operations.

use tracing::{debug, trace};

use crate::error::DeleteError;
use crate::options::DeleteOptions;
use crate::resolve::{KeyChain, Resolution, resolve};
use crate::value::Value;

/// Delete the value at the end of `chain`.
///
/// Returns whether the target existed. With `recursive` set, every ancestor
/// left empty by the deletion is removed as well, stopping at the first
/// non-empty one. When the chain does not fully resolve nothing is deleted
/// from the deepest container reached, but if that container is empty and
/// `recursive` is set its ancestors are still pruned.
///
/// ```
/// use nested_delete::{DeleteOptions, Value, delete, keys};
/// use serde_json::json;
///
/// let root = Value::from_json(&json!({"a": {"b": [1]}, "c": 2}));
/// let opts = DeleteOptions::new().with_recursive(true);
/// assert!(delete(&root, keys!["a", "b", 0], &opts).unwrap());
/// assert_eq!(root.to_json(), json!({"c": 2}));
/// ```
///
/// # Errors
/// [`DeleteError::NotAnObject`] if `root` is not a container, or if a delete
/// is attempted on a primitive; [`DeleteError::KindMismatch`] if a container
/// on the path is classified as a kind its storage cannot serve;
/// [`DeleteError::EmptyKeyChain`] for a chain without keys.
pub fn delete(
    root: &Value,
    chain: impl Into<KeyChain>,
    options: &DeleteOptions,
) -> Result<bool, DeleteError> {
    let chain: KeyChain = chain.into();
    delete_chain(root, &chain, options)
}

/// Delete several key chains independently, in order.
///
/// The result has one entry per chain. A missing key in one chain does not
/// affect the others; the first error aborts the batch.
pub fn delete_all<I>(root: &Value, chains: I, options: &DeleteOptions) -> Result<Vec<bool>, DeleteError>
where
    I: IntoIterator,
    I::Item: Into<KeyChain>,
{
    chains
        .into_iter()
        .map(|chain| delete(root, chain, options))
        .collect()
}

fn delete_chain(root: &Value, chain: &KeyChain, options: &DeleteOptions) -> Result<bool, DeleteError> {
    if chain.is_empty() {
        return Err(DeleteError::EmptyKeyChain);
    }
    if options.classify(root).is_none() {
        return Err(DeleteError::NotAnObject {
            found: root.type_name(),
        });
    }

    let Resolution { path, found } = resolve(root, chain, options)?;
    let mut pruned = 0usize;

    for (depth, step) in path.iter().enumerate() {
        if depth > 0 || found {
            let removed = options.delete_key(&step.container, &step.key)?;
            trace!(depth, removed, kind = step.container.type_name(), "deleted key");
            if depth > 0 {
                pruned += 1;
            }
        }
        if !options.recursive || !options.check_empty(&step.container) {
            break;
        }
    }

    debug!(
        keys = chain.len(),
        found,
        pruned,
        recursive = options.recursive,
        "processed key chain"
    );
    Ok(found)
}
