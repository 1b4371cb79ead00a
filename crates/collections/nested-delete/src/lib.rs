//! Delete values at the end of a key chain through nested containers.
//!
//! This crate provides:
//! - [`Value`]: a tree of lists, maps, sets, records and their weak variants
//! - [`delete`] / [`delete_all`]: remove the target of one or many key chains,
//!   optionally pruning ancestors left empty
//! - [`resolve`] / [`get`]: read-only key-chain traversal
//! - [`DeleteOptions`]: loose key matching, recursive pruning, class overrides
//!   and delete / emptiness hooks, parseable from JSON or TOML
//!
//! # Example
//! ```
//! use nested_delete::{DeleteOptions, Value, delete, keys};
//!
//! let root = Value::map([(
//!     "map".into(),
//!     Value::record([("obj", Value::list(["value".into()]))]),
//! )]);
//!
//! assert!(delete(&root, keys!["map", "obj", 0], &DeleteOptions::new()).unwrap());
//! assert!(!delete(&root, keys!["map", "obj", 0], &DeleteOptions::new()).unwrap());
//! ```
//!
//! # Key matching
//! Map keys match strictly by default: primitives by value and containers by
//! identity. With `loose` set, a structurally equal key finds the stored one.

pub mod classify;
pub mod delete;
pub mod dispatch;
pub mod empty;
pub mod equality;
pub mod error;
pub mod options;
pub mod resolve;
pub mod schema;
pub mod validation;
pub mod value;

pub use classify::{ClassLists, ContainerKind};
pub use delete::{delete, delete_all};
pub use dispatch::default_delete;
pub use empty::default_is_empty;
pub use error::{DeleteError, OptionsError};
pub use options::{DeleteHook, DeleteOptions, EmptinessHook, OptionsConfig};
pub use resolve::{KeyChain, Resolution, Step, get, lookup, resolve};
pub use validation::{AdvisoryWarning, validate};
pub use value::{KeyedMap, List, Record, Shared, UniqueSet, Value};

/// Build a [`KeyChain`] from heterogeneous keys.
///
/// Each key goes through `Value::from`, so strings and integers mix freely.
#[macro_export]
macro_rules! keys {
    ($($key:expr),* $(,)?) => {
        $crate::KeyChain::new(vec![$($crate::Value::from($key)),*])
    };
}
