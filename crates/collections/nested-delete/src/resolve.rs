//! Key chains and the read-only resolver.

use crate::classify::ContainerKind;
use crate::dispatch::mismatch;
use crate::error::DeleteError;
use crate::options::DeleteOptions;
use crate::value::Value;

/// Ordered keys leading from a root container to a target.
///
/// A single key converts into a one-element chain:
///
/// ```
/// use nested_delete::{KeyChain, Value, keys};
///
/// assert_eq!(KeyChain::from("name").len(), 1);
/// assert_eq!(keys!["map", "obj", 0].len(), 3);
/// assert_eq!(KeyChain::from(vec![Value::from("a"), Value::Int(1)]).len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyChain(Vec<Value>);

impl KeyChain {
    pub fn new(keys: Vec<Value>) -> Self {
        Self(keys)
    }

    pub fn keys(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Value>> for KeyChain {
    fn from(keys: Vec<Value>) -> Self {
        Self(keys)
    }
}

impl<const N: usize> From<[Value; N]> for KeyChain {
    fn from(keys: [Value; N]) -> Self {
        Self(keys.into())
    }
}

impl From<Value> for KeyChain {
    fn from(key: Value) -> Self {
        Self(vec![key])
    }
}

impl From<&str> for KeyChain {
    fn from(key: &str) -> Self {
        Self(vec![key.into()])
    }
}

impl From<String> for KeyChain {
    fn from(key: String) -> Self {
        Self(vec![key.into()])
    }
}

impl From<i64> for KeyChain {
    fn from(key: i64) -> Self {
        Self(vec![key.into()])
    }
}

impl From<i32> for KeyChain {
    fn from(key: i32) -> Self {
        Self(vec![key.into()])
    }
}

impl From<usize> for KeyChain {
    fn from(key: usize) -> Self {
        Self(vec![key.into()])
    }
}

impl FromIterator<Value> for KeyChain {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One `(container, key)` pair on a resolved path.
#[derive(Debug, Clone)]
pub struct Step {
    pub container: Value,
    pub key: Value,
}

/// Outcome of walking a key chain.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Pairs ordered target-first, root-last.
    pub path: Vec<Step>,

    /// Whether the final key exists.
    pub found: bool,
}

/// Walk `chain` from `root`, recording every `(container, key)` pair visited.
///
/// Stops at the first key that cannot be looked up and reports
/// `found = false` with the partial path. Does not mutate anything.
///
/// # Errors
/// [`DeleteError::KindMismatch`] when a container on the path is classified
/// as a kind its storage cannot serve.
pub fn resolve(
    root: &Value,
    chain: &KeyChain,
    options: &DeleteOptions,
) -> Result<Resolution, DeleteError> {
    let mut path = Vec::with_capacity(chain.len());
    let mut current = root.clone();
    let mut found = true;

    for key in chain.keys() {
        path.push(Step {
            container: current.clone(),
            key: key.clone(),
        });
        match lookup(&current, key, options)? {
            Some(next) => current = next,
            None => {
                found = false;
                break;
            }
        }
    }

    path.reverse();
    Ok(Resolution { path, found })
}

/// Value at the end of `chain`, or `None` if any key is missing.
///
/// An empty chain yields the root itself.
pub fn get(
    root: &Value,
    chain: impl Into<KeyChain>,
    options: &DeleteOptions,
) -> Result<Option<Value>, DeleteError> {
    let chain: KeyChain = chain.into();
    let mut current = root.clone();
    for key in chain.keys() {
        match lookup(&current, key, options)? {
            Some(next) => current = next,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Look up one key in one container.
///
/// Primitives never match. A container whose classified kind does not fit
/// its storage is an error rather than a miss.
pub fn lookup(
    container: &Value,
    key: &Value,
    options: &DeleteOptions,
) -> Result<Option<Value>, DeleteError> {
    let Some(kind) = options.classify(container) else {
        return Ok(None);
    };

    let hit = match kind {
        ContainerKind::Sequence => {
            let list = container.as_list().ok_or_else(|| mismatch(kind, container))?;
            key.as_index()
                .and_then(|index| list.borrow().get(index).cloned())
        }
        ContainerKind::Map | ContainerKind::WeakMap => {
            let map = container.as_keyed().ok_or_else(|| mismatch(kind, container))?;
            map.borrow()
                .find(key, options.loose)
                .map(|(_, value)| value.clone())
        }
        ContainerKind::Set | ContainerKind::WeakSet => {
            let set = container.as_set().ok_or_else(|| mismatch(kind, container))?;
            key.as_index()
                .and_then(|index| set.borrow().nth(index).cloned())
        }
        ContainerKind::Record => {
            let record = container
                .as_record()
                .ok_or_else(|| mismatch(kind, container))?;
            key.property_name()
                .and_then(|name| record.borrow().get(&name).cloned())
        }
    };
    Ok(hit)
}
