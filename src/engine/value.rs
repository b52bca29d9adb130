/// Dynamic values flowing through resolution.
///
/// Templates reference data whose types the engine does not know in advance.
/// Plain data is represented directly; anything else is a [`HostObject`]
/// reached through its own member table.
use crate::error::ResolveError;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// Data objects owned by the host application.
pub trait HostObject: fmt::Debug + Send + Sync {
    /// Fully qualified type identity, e.g. `shop::model::Item`.
    fn type_name(&self) -> &str;

    /// Every supertype of the runtime type, nearest first.
    ///
    /// Generated accessors consult this for runtime types that were not in
    /// the type index at build time.
    fn supertypes(&self) -> &[&str] {
        &[]
    }

    /// Reads a public field.
    fn read_field(&self, name: &str) -> Option<Value>;

    /// Invokes a method with already evaluated arguments.
    fn invoke(&self, method: &str, args: Vec<Value>) -> Invocation;
}

/// Outcome of invoking a host member.
pub enum Invocation {
    /// The member returned synchronously (or failed synchronously).
    Ready(Result<Value, ResolveError>),
    /// The member returned an asynchronous result.
    Pending(BoxFuture<'static, Result<Value, ResolveError>>),
    /// The host does not expose a member with this name and arity.
    Missing,
}

impl Invocation {
    pub fn ready(value: impl Into<Value>) -> Self {
        Self::Ready(Ok(value.into()))
    }

    pub fn failed(error: ResolveError) -> Self {
        Self::Ready(Err(error))
    }

    pub fn pending<F>(future: F) -> Self
    where
        F: std::future::Future<Output = Result<Value, ResolveError>> + Send + 'static,
    {
        Self::Pending(Box::pin(future))
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
            Self::Missing => f.write_str("Missing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub key: Value,
    pub value: Value,
}

/// Insertion ordered map with value-equality key lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap {
    entries: Vec<MapEntry>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.value = value,
            None => self.entries.push(MapEntry { key, value }),
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|e| &e.key == key).map(|e| &e.value)
    }

    /// Looks up a string key without allocating a [`Value`].
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| matches!(&e.key, Value::Str(k) if k == key))
            .map(|e| &e.value)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|e| &e.key)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|e| &e.value)
    }

    pub fn entries(&self) -> impl Iterator<Item = &MapEntry> {
        self.entries.iter()
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Str(String),
    List(Vec<Value>),
    Map(ValueMap),
    Entry(Box<MapEntry>),
    Object(Arc<dyn HostObject>),
}

impl Value {
    pub fn object<T: HostObject + 'static>(object: T) -> Self {
        Self::Object(Arc::new(object))
    }

    pub fn entry(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self::Entry(Box::new(MapEntry {
            key: key.into(),
            value: value.into(),
        }))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Arc<dyn HostObject>> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Entry(a), Self::Entry(b)) => a == b,
            // Host objects compare by identity.
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Long(l) => write!(f, "{l}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, entry) in map.entries().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", entry.key, entry.value)?;
                }
                f.write_str("}")
            }
            Self::Entry(entry) => write!(f, "{}={}", entry.key, entry.value),
            Self::Object(o) => write!(f, "{o:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<i64> for Value {
    fn from(l: i64) -> Self {
        Self::Long(l)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i32::try_from(n)
            .map(Self::Int)
            .unwrap_or(Self::Long(n as i64))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Result of a resolution attempt.
///
/// `NotFound` means "no binding here" and is distinct from a found `Null`.
/// It flows through any depth of chaining without turning into either.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Resolved {
    Found(Value),
    #[default]
    NotFound,
}

impl Resolved {
    pub fn found(value: impl Into<Value>) -> Self {
        Self::Found(value.into())
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// `NotFound` or a found `Null`.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::NotFound | Self::Found(Value::Null))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Found(v) => Some(v),
            Self::NotFound => None,
        }
    }

    /// Flattens into a plain value for host members, which cannot receive
    /// the sentinel.
    pub fn into_value(self) -> Value {
        match self {
            Self::Found(v) => v,
            Self::NotFound => Value::Null,
        }
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(v) => write!(f, "{v}"),
            Self::NotFound => f.write_str("NOT_FOUND"),
        }
    }
}
