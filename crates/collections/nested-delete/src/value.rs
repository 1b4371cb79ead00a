//! Dynamic value tree walked by the delete operation.
//!
//! Containers are shared handles, so every container has an identity: the
//! same record can sit under two parents or serve as a map key, and strict
//! key matching compares those handles instead of their contents.
//!
//! Each container storage carries an optional class name. A `None` class is a
//! built-in/plain container; named classes are what the override lists in
//! [`ClassLists`](crate::classify::ClassLists) refer to.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use serde_json::Value as Json;

use crate::classify::ContainerKind;
use crate::equality::{keys_match, same_value_zero};

/// Shared, interior-mutable container handle.
pub type Shared<T> = Rc<RefCell<T>>;

fn shared<T>(inner: T) -> Shared<T> {
    Rc::new(RefCell::new(inner))
}

/// A value in a nested container tree.
///
/// Cloning a container variant clones the handle, not the contents.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Ordered sequence addressed by position.
    List(Shared<List>),
    /// Insertion-ordered map with arbitrary keys.
    Map(Shared<KeyedMap>),
    /// Map whose size is treated as unknowable.
    WeakMap(Shared<KeyedMap>),
    /// Insertion-ordered set of unique values.
    Set(Shared<UniqueSet>),
    /// Set whose size is treated as unknowable.
    WeakSet(Shared<UniqueSet>),
    /// Plain attribute record with string-named fields.
    Record(Shared<Record>),
}

impl Value {
    /// Build a list from items.
    pub fn list<I: IntoIterator<Item = Self>>(items: I) -> Self {
        Self::from(List::new(items))
    }

    /// Build a map from `(key, value)` entries. Later duplicates win.
    pub fn map<I: IntoIterator<Item = (Self, Self)>>(entries: I) -> Self {
        Self::from(KeyedMap::from_entries(entries))
    }

    /// Build a set from values, dropping duplicates.
    pub fn set<I: IntoIterator<Item = Self>>(values: I) -> Self {
        Self::from(UniqueSet::from_values(values))
    }

    /// Build a plain record from named fields.
    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::from(Record::from_fields(fields))
    }

    /// Turn a map into a weak map and a set into a weak set.
    ///
    /// The handle is shared with `self`; other values are returned unchanged.
    #[must_use]
    pub fn weak(self) -> Self {
        match self {
            Self::Map(map) => Self::WeakMap(map),
            Self::Set(set) => Self::WeakSet(set),
            other => other,
        }
    }

    /// Short name of the variant, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::WeakMap(_) => "weak map",
            Self::Set(_) => "set",
            Self::WeakSet(_) => "weak set",
            Self::Record(_) => "record",
        }
    }

    pub const fn is_container(&self) -> bool {
        matches!(
            self,
            Self::List(_)
                | Self::Map(_)
                | Self::WeakMap(_)
                | Self::Set(_)
                | Self::WeakSet(_)
                | Self::Record(_)
        )
    }

    /// Container kind implied by the variant alone, ignoring class overrides.
    pub const fn native_kind(&self) -> Option<ContainerKind> {
        match self {
            Self::List(_) => Some(ContainerKind::Sequence),
            Self::Map(_) => Some(ContainerKind::Map),
            Self::WeakMap(_) => Some(ContainerKind::WeakMap),
            Self::Set(_) => Some(ContainerKind::Set),
            Self::WeakSet(_) => Some(ContainerKind::WeakSet),
            Self::Record(_) => Some(ContainerKind::Record),
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_) => None,
        }
    }

    /// Class name of a container, if it has one.
    pub fn class(&self) -> Option<String> {
        match self {
            Self::List(list) => list.borrow().class().map(str::to_owned),
            Self::Map(map) | Self::WeakMap(map) => map.borrow().class().map(str::to_owned),
            Self::Set(set) | Self::WeakSet(set) => set.borrow().class().map(str::to_owned),
            Self::Record(record) => record.borrow().class().map(str::to_owned),
            _ => None,
        }
    }

    /// Address of the shared container, used for identity comparison.
    pub fn identity(&self) -> Option<*const ()> {
        match self {
            Self::List(list) => Some(Rc::as_ptr(list).cast()),
            Self::Map(map) | Self::WeakMap(map) => Some(Rc::as_ptr(map).cast()),
            Self::Set(set) | Self::WeakSet(set) => Some(Rc::as_ptr(set).cast()),
            Self::Record(record) => Some(Rc::as_ptr(record).cast()),
            _ => None,
        }
    }

    /// Number of elements held by a container.
    pub fn container_len(&self) -> Option<usize> {
        match self {
            Self::List(list) => Some(list.borrow().len()),
            Self::Map(map) | Self::WeakMap(map) => Some(map.borrow().len()),
            Self::Set(set) | Self::WeakSet(set) => Some(set.borrow().len()),
            Self::Record(record) => Some(record.borrow().len()),
            _ => None,
        }
    }

    pub const fn as_list(&self) -> Option<&Shared<List>> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Keyed storage of either a map or a weak map.
    pub const fn as_keyed(&self) -> Option<&Shared<KeyedMap>> {
        match self {
            Self::Map(map) | Self::WeakMap(map) => Some(map),
            _ => None,
        }
    }

    /// Set storage of either a set or a weak set.
    pub const fn as_set(&self) -> Option<&Shared<UniqueSet>> {
        match self {
            Self::Set(set) | Self::WeakSet(set) => Some(set),
            _ => None,
        }
    }

    pub const fn as_record(&self) -> Option<&Shared<Record>> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret a key as a position.
    ///
    /// Accepts non-negative integers, integral floats and canonical decimal
    /// strings (`"3"`, not `"03"`).
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Int(n) => usize::try_from(*n).ok(),
            Self::Float(f) if f.is_finite() && *f >= 0.0 && f.fract() == 0.0 => {
                Some(*f as usize)
            }
            Self::String(s) => s
                .parse::<usize>()
                .ok()
                .filter(|index| index.to_string() == *s),
            _ => None,
        }
    }

    /// Attribute name a key refers to when used on a record.
    ///
    /// Containers never name an attribute.
    pub fn property_name(&self) -> Option<String> {
        match self {
            Self::Null => Some("null".to_owned()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(n) => Some(n.to_string()),
            Self::Float(f) => Some(format_float(*f)),
            Self::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Convert a JSON document into a fresh tree of lists and records.
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(*b),
            Json::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int),
            Json::String(s) => Self::String(s.clone()),
            Json::Array(items) => Self::list(items.iter().map(Self::from_json)),
            Json::Object(fields) => Self::record(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), Self::from_json(value))),
            ),
        }
    }

    /// Snapshot the tree as JSON.
    ///
    /// Sets become arrays. Maps become objects when every key names an
    /// attribute, otherwise arrays of `[key, value]` pairs. Non-finite floats
    /// become `null`. Cyclic trees are not supported.
    pub fn to_json(&self) -> Json {
        match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Int(n) => Json::from(*n),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Json::Null, Json::Number),
            Self::String(s) => Json::String(s.clone()),
            Self::List(list) => Json::Array(list.borrow().iter().map(Self::to_json).collect()),
            Self::Set(set) | Self::WeakSet(set) => {
                Json::Array(set.borrow().iter().map(Self::to_json).collect())
            }
            Self::Record(record) => Json::Object(
                record
                    .borrow()
                    .iter()
                    .map(|(name, value)| (name.to_owned(), value.to_json()))
                    .collect(),
            ),
            Self::Map(map) | Self::WeakMap(map) => map_to_json(&map.borrow()),
        }
    }
}

fn map_to_json(map: &KeyedMap) -> Json {
    let named: Option<serde_json::Map<String, Json>> = map
        .iter()
        .map(|(key, value)| key.property_name().map(|name| (name, value.to_json())))
        .collect();
    named.map_or_else(
        || {
            Json::Array(
                map.iter()
                    .map(|(key, value)| Json::Array(vec![key.to_json(), value.to_json()]))
                    .collect(),
            )
        },
        Json::Object,
    )
}

fn format_float(f: f64) -> String {
    if f == 0.0 {
        "0".to_owned()
    } else if f.is_infinite() && f.is_sign_positive() {
        "Infinity".to_owned()
    } else if f.is_infinite() {
        "-Infinity".to_owned()
    } else {
        f.to_string()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Self::Float(n as f64), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Self::List(shared(list))
    }
}

impl From<KeyedMap> for Value {
    fn from(map: KeyedMap) -> Self {
        Self::Map(shared(map))
    }
}

impl From<UniqueSet> for Value {
    fn from(set: UniqueSet) -> Self {
        Self::Set(shared(set))
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(shared(record))
    }
}

// ============================================================================
// Storage
// ============================================================================

/// Storage behind [`Value::List`].
#[derive(Debug, Clone, Default)]
pub struct List {
    class: Option<String>,
    items: Vec<Value>,
}

impl List {
    pub fn new<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self {
            class: None,
            items: items.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Remove the item at `index`, shifting later items down.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }
}

/// Storage behind [`Value::Map`] and [`Value::WeakMap`].
///
/// Keys are compared strictly: primitives by value, containers by identity.
#[derive(Debug, Clone, Default)]
pub struct KeyedMap {
    class: Option<String>,
    entries: Vec<(Value, Value)>,
}

impl KeyedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I: IntoIterator<Item = (Value, Value)>>(entries: I) -> Self {
        let mut map = Self::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace, returning the previous value for the key.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        match self.position(&key, false) {
            Some(pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.position(key, false).map(|pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.position(key, false).is_some()
    }

    /// Find the entry whose key matches, strictly or by deep equality.
    pub fn find(&self, key: &Value, loose: bool) -> Option<(&Value, &Value)> {
        self.position(key, loose)
            .map(|pos| (&self.entries[pos].0, &self.entries[pos].1))
    }

    /// The key actually stored in the map that `key` matches.
    pub fn stored_key(&self, key: &Value, loose: bool) -> Option<Value> {
        self.find(key, loose).map(|(stored, _)| stored.clone())
    }

    /// Remove the entry whose key strictly matches `key`.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.position(key, false)
            .map(|pos| self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(key, _)| key)
    }

    fn position(&self, key: &Value, loose: bool) -> Option<usize> {
        self.entries
            .iter()
            .position(|(stored, _)| keys_match(stored, key, loose))
    }
}

/// Storage behind [`Value::Set`] and [`Value::WeakSet`].
#[derive(Debug, Clone, Default)]
pub struct UniqueSet {
    class: Option<String>,
    values: Vec<Value>,
}

impl UniqueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values<I: IntoIterator<Item = Value>>(values: I) -> Self {
        let mut set = Self::new();
        for value in values {
            set.insert(value);
        }
        set
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Add a value unless a strictly equal one is present.
    pub fn insert(&mut self, value: Value) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.values.push(value);
        true
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.values.iter().any(|v| same_value_zero(v, value))
    }

    /// Element at `index` in iteration order.
    pub fn nth(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Remove the element at `index` in iteration order.
    ///
    /// The set is drained and rebuilt from the survivors, which keeps their
    /// relative order.
    pub fn remove_nth(&mut self, index: usize) -> bool {
        if index >= self.values.len() {
            return false;
        }
        let mut survivors = std::mem::take(&mut self.values);
        survivors.remove(index);
        self.clear();
        for value in survivors {
            self.insert(value);
        }
        true
    }
}

/// Storage behind [`Value::Record`].
///
/// Fields keep insertion order. A fixed field cannot be deleted, and a sealed
/// record refuses every deletion.
#[derive(Debug, Clone, Default)]
pub struct Record {
    class: Option<String>,
    fields: Vec<(String, Value)>,
    fixed: BTreeSet<String>,
    sealed: bool,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in fields {
            record.insert(name, value);
        }
        record
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Mark a field as non-deletable.
    #[must_use]
    pub fn with_fixed(mut self, name: impl Into<String>) -> Self {
        self.fix(name);
        self
    }

    #[must_use]
    pub fn sealed(mut self) -> Self {
        self.seal();
        self
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn fix(&mut self, name: impl Into<String>) {
        self.fixed.insert(name.into());
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Whether `name` is an own field that may be removed.
    pub fn can_delete(&self, name: &str) -> bool {
        !self.sealed && !self.fixed.contains(name) && self.contains(name)
    }

    /// Remove a deletable field, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        if !self.can_delete(name) {
            return None;
        }
        let pos = self.fields.iter().position(|(existing, _)| existing == name)?;
        Some(self.fields.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_round_trip_keeps_structure() {
        let doc = json!({"a": [1, 2.5, "x"], "b": {"c": null, "d": true}});
        assert_eq!(Value::from_json(&doc).to_json(), doc);
    }

    #[test]
    fn test_as_index_accepts_canonical_forms_only() {
        assert_eq!(Value::Int(3).as_index(), Some(3));
        assert_eq!(Value::Float(2.0).as_index(), Some(2));
        assert_eq!(Value::from("7").as_index(), Some(7));
        assert_eq!(Value::from("07").as_index(), None);
        assert_eq!(Value::Int(-1).as_index(), None);
        assert_eq!(Value::Float(1.5).as_index(), None);
        assert_eq!(Value::Null.as_index(), None);
    }

    #[test]
    fn test_property_name_formats_scalars() {
        assert_eq!(Value::Int(0).property_name().as_deref(), Some("0"));
        assert_eq!(Value::Float(2.0).property_name().as_deref(), Some("2"));
        assert_eq!(Value::Float(-0.0).property_name().as_deref(), Some("0"));
        assert_eq!(Value::Bool(true).property_name().as_deref(), Some("true"));
        assert!(Value::list(Vec::new()).property_name().is_none());
    }

    #[test]
    fn test_map_insert_replaces_strictly_equal_key() {
        let mut map = KeyedMap::new();
        assert!(map.insert("k".into(), 1.into()).is_none());
        assert!(map.insert("k".into(), 2.into()).is_some());
        assert_eq!(map.len(), 1);
        assert!(matches!(map.get(&"k".into()), Some(Value::Int(2))));
    }

    #[test]
    fn test_map_keys_use_container_identity() {
        let k1 = Value::record([("key", Value::Bool(true))]);
        let k2 = Value::record([("key", Value::Bool(true))]);
        let map = KeyedMap::from_entries([(k1.clone(), 1.into())]);
        assert!(map.contains_key(&k1));
        assert!(!map.contains_key(&k2));
        assert!(map.find(&k2, true).is_some());
    }

    #[test]
    fn test_set_drops_duplicates_and_rebuilds_in_order() {
        let mut set = UniqueSet::from_values(["a".into(), "b".into(), "a".into(), "c".into()]);
        assert_eq!(set.len(), 3);
        assert!(set.remove_nth(1));
        let names: Vec<_> = set.iter().filter_map(Value::as_str).collect();
        assert_eq!(names, ["a", "c"]);
        assert!(!set.remove_nth(2));
    }

    #[test]
    fn test_record_respects_fixed_and_sealed() {
        let mut record = Record::from_fields([("a", Value::Int(1)), ("b", Value::Int(2))])
            .with_fixed("a");
        assert!(record.remove("a").is_none());
        assert!(record.remove("b").is_some());
        assert!(record.remove("missing").is_none());

        let mut sealed = Record::from_fields([("c", Value::Int(3))]).sealed();
        assert!(!sealed.can_delete("c"));
        assert!(sealed.remove("c").is_none());
        assert_eq!(sealed.len(), 1);
    }

    #[test]
    fn test_weak_shares_handle() {
        let map = Value::map([("k".into(), 1.into())]);
        let weak = map.clone().weak();
        assert!(matches!(weak, Value::WeakMap(_)));
        assert_eq!(map.identity(), weak.identity());
    }

    #[test]
    fn test_map_to_json_falls_back_to_pairs() {
        let key = Value::list([Value::Int(1)]);
        let map = Value::map([(key, "v".into())]);
        assert_eq!(map.to_json(), json!([[[1], "v"]]));

        let named = Value::map([("k".into(), 1.into()), (Value::Int(2), 3.into())]);
        assert_eq!(named.to_json(), json!({"k": 1, "2": 3}));
    }
}
