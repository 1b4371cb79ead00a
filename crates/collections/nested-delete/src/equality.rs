//! Key comparison.
//!
//! Strict matching is same-value-zero: primitives compare by value (`NaN`
//! equals itself, `0` equals `-0`, integers equal integral floats) and
//! containers compare by identity. Loose matching is deep structural equality
//! and is only used to locate keys; removal always goes through the stored key.

use crate::value::{KeyedMap, Record, UniqueSet, Value};

/// Compare two keys, strictly or by deep equality.
pub fn keys_match(stored: &Value, key: &Value, loose: bool) -> bool {
    if loose {
        deep_equal(stored, key)
    } else {
        same_value_zero(stored, key)
    }
}

/// Same-value-zero comparison with container identity.
pub fn same_value_zero(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => floats_equal(*x, *y),
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => {
            floats_equal(*x as f64, *y)
        }
        _ => match (a.identity(), b.identity()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

/// Deep structural equality.
///
/// Lists compare in order; maps, sets and records ignore insertion order.
/// Containers must agree on variant and class. Cycles are handled by treating
/// a pair already under comparison as equal.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    DeepEq::default().eq(a, b)
}

#[expect(clippy::float_cmp, reason = "same-value-zero is an exact comparison")]
fn floats_equal(x: f64, y: f64) -> bool {
    x == y || (x.is_nan() && y.is_nan())
}

#[derive(Default)]
struct DeepEq {
    active: Vec<(*const (), *const ())>,
}

impl DeepEq {
    fn eq(&mut self, a: &Value, b: &Value) -> bool {
        if same_value_zero(a, b) {
            return true;
        }
        let (Some(pa), Some(pb)) = (a.identity(), b.identity()) else {
            return false;
        };
        if self.active.contains(&(pa, pb)) {
            return true;
        }
        if a.class() != b.class() {
            return false;
        }

        self.active.push((pa, pb));
        let equal = match (a, b) {
            (Value::List(x), Value::List(y)) => {
                let (x, y) = (x.borrow(), y.borrow());
                x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| self.eq(l, r))
            }
            (Value::Map(x), Value::Map(y)) | (Value::WeakMap(x), Value::WeakMap(y)) => {
                self.maps_eq(&x.borrow(), &y.borrow())
            }
            (Value::Set(x), Value::Set(y)) | (Value::WeakSet(x), Value::WeakSet(y)) => {
                self.sets_eq(&x.borrow(), &y.borrow())
            }
            (Value::Record(x), Value::Record(y)) => self.records_eq(&x.borrow(), &y.borrow()),
            _ => false,
        };
        self.active.pop();
        equal
    }

    fn maps_eq(&mut self, x: &KeyedMap, y: &KeyedMap) -> bool {
        x.len() == y.len()
            && x.iter().all(|(xk, xv)| {
                y.iter()
                    .any(|(yk, yv)| self.eq(xk, yk) && self.eq(xv, yv))
            })
    }

    fn sets_eq(&mut self, x: &UniqueSet, y: &UniqueSet) -> bool {
        x.len() == y.len() && x.iter().all(|xv| y.iter().any(|yv| self.eq(xv, yv)))
    }

    fn records_eq(&mut self, x: &Record, y: &Record) -> bool {
        x.len() == y.len()
            && x.iter()
                .all(|(name, xv)| y.get(name).is_some_and(|yv| self.eq(xv, yv)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_same_value_zero_primitives() {
        assert!(same_value_zero(&Value::Float(f64::NAN), &Value::Float(f64::NAN)));
        assert!(same_value_zero(&Value::Float(0.0), &Value::Float(-0.0)));
        assert!(same_value_zero(&Value::Int(1), &Value::Float(1.0)));
        assert!(!same_value_zero(&Value::Int(1), &Value::from("1")));
        assert!(same_value_zero(&Value::Null, &Value::Null));
    }

    #[test]
    fn test_same_value_zero_uses_identity_for_containers() {
        let a = Value::list([Value::Int(1)]);
        let b = Value::list([Value::Int(1)]);
        assert!(same_value_zero(&a, &a.clone()));
        assert!(!same_value_zero(&a, &b));
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn test_deep_equal_ignores_record_order() {
        let a = Value::record([("x", Value::Int(1)), ("y", Value::Int(2))]);
        let b = Value::record([("y", Value::Int(2)), ("x", Value::Int(1))]);
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn test_deep_equal_respects_list_order_and_class() {
        let a = Value::from_json(&json!([1, 2]));
        let b = Value::from_json(&json!([2, 1]));
        assert!(!deep_equal(&a, &b));

        let plain = Value::record([("k", Value::Int(1))]);
        let classed = Value::from(Record::from_fields([("k", Value::Int(1))]).with_class("Point"));
        assert!(!deep_equal(&plain, &classed));
    }

    #[test]
    fn test_deep_equal_distinguishes_weak_from_strong() {
        let map = Value::map([("k".into(), 1.into())]);
        let weak = Value::map([("k".into(), 1.into())]).weak();
        assert!(!deep_equal(&map, &weak));
    }

    #[test]
    fn test_deep_equal_handles_cycles() {
        let a = Value::from(KeyedMap::new());
        let b = Value::from(KeyedMap::new());
        if let (Some(x), Some(y)) = (a.as_keyed(), b.as_keyed()) {
            x.borrow_mut().insert("self".into(), a.clone());
            y.borrow_mut().insert("self".into(), b.clone());
        }
        assert!(deep_equal(&a, &b));
    }
}
