//! Value types for the key-value store

use bytes::Bytes;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Represents the different kinds of values that can be stored
#[derive(Clone)]
pub enum Value {
    /// Text value (byte inputs are normalized to text)
    Text(String),

    /// Mapping of text fields to text values
    Map(HashMap<String, String>),

    /// Any other payload, stored as-is
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Create a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Create a map value
    pub fn map(m: HashMap<String, String>) -> Self {
        Value::Map(m)
    }

    /// Wrap an arbitrary payload
    pub fn opaque<T: Any + Send + Sync>(payload: T) -> Self {
        Value::Opaque(Arc::new(payload))
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Map(_) => "map",
            Value::Opaque(_) => "opaque",
        }
    }

    /// Check if value is text
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Try to get as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as map reference
    pub fn as_map(&self) -> Option<&HashMap<String, String>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Try to view an opaque payload as a concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Opaque(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Calculate approximate memory usage in bytes
    ///
    /// Opaque payloads only count their handle; the pointee size is unknown.
    pub fn memory_usage(&self) -> usize {
        match self {
            Value::Text(s) => s.len(),
            Value::Map(m) => {
                let items_size: usize = m.iter().map(|(k, v)| k.len() + v.len()).sum();
                items_size + std::mem::size_of::<HashMap<String, String>>()
            }
            Value::Opaque(_) => std::mem::size_of::<Arc<dyn Any + Send + Sync>>(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // No structural equality for untyped payloads: same allocation only
            (Value::Opaque(a), Value::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Value::Map(m) => f.debug_tuple("Map").field(m).finish(),
            Value::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(s) => Value::Text(s),
            Err(e) => Value::Text(String::from_utf8_lossy(e.as_bytes()).into_owned()),
        }
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Text(String::from_utf8_lossy(bytes).into_owned())
    }
}

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Value::from(bytes.as_ref())
    }
}

impl From<HashMap<String, String>> for Value {
    fn from(m: HashMap<String, String>) -> Self {
        Value::Map(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_normalize_to_text() {
        assert_eq!(Value::from(b"bar".to_vec()), Value::text("bar"));
        assert_eq!(Value::from(&b"bar"[..]), Value::text("bar"));
        assert_eq!(Value::from(Bytes::from_static(b"bar")), Value::text("bar"));
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let value = Value::from(vec![b'a', 0xff, b'b']);
        assert_eq!(value.as_text(), Some("a\u{fffd}b"));
    }

    #[test]
    fn test_map_accessors() {
        let mut m = HashMap::new();
        m.insert("name".to_string(), "jinx".to_string());
        let value = Value::from(m.clone());

        assert_eq!(value.type_name(), "map");
        assert_eq!(value.as_map(), Some(&m));
        assert!(value.as_text().is_none());
    }

    #[test]
    fn test_opaque_downcast() {
        let value = Value::opaque(42u32);

        assert_eq!(value.downcast_ref::<u32>(), Some(&42));
        assert!(value.downcast_ref::<i64>().is_none());
        assert!(!value.is_text());
    }

    #[test]
    fn test_opaque_equality_is_identity() {
        let a = Value::opaque(7i32);
        let b = Value::opaque(7i32);

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_text_is_a_value() {
        let value = Value::text("");
        assert_eq!(value.as_text(), Some(""));
        assert_eq!(value.memory_usage(), 0);
    }
}
