//! Request fields and the collections that hold them.
//!
//! A request's query parameters and headers are both described the same way:
//! an ordered list of [`Field`]s, each with a wire key, a value, and a flag
//! saying whether the value may be left empty. Flattening a collection with
//! [`FieldCollection::to_map`] validates the required fields and produces a
//! [`FieldMap`] with the empty optional fields dropped.
//!
//! ```rust
//! use rest_sketch::{FieldCollection, Params};
//!
//! let params = Params::new()
//!     .required("page", "2")
//!     .optional("filter");
//!
//! let map = params.to_map().unwrap();
//! assert_eq!(map.get("page"), Some("2"));
//! assert!(map.get("filter").is_none());
//! ```

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::SchemaError;

/// Which part of a request a collection describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Query string parameter
    Param,
    /// Request header
    Header,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Param => write!(f, "Param"),
            FieldKind::Header => write!(f, "Header"),
        }
    }
}

/// A named, optionally-required string value
///
/// An empty `value` means "unset".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Field {
    /// Name of the field on the wire
    pub key: String,
    /// Whether the field may be left unset
    pub optional: bool,
    /// Value of the field
    pub value: String,
}

/// A query parameter
pub type Param = Field;

/// A request header
pub type Header = Field;

impl Field {
    /// Create a new field
    pub fn new(key: impl Into<String>, optional: bool, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            optional,
            value: value.into(),
        }
    }

    /// Create a required field with a value
    pub fn required(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, false, value)
    }

    /// Create an optional field that is not set yet
    pub fn optional(key: impl Into<String>) -> Self {
        Self::new(key, true, "")
    }

    /// Replace the value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Check if the field carries a value
    pub fn is_set(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Insertion-ordered key/value mapping produced by flattening a collection
///
/// Inserting a key that is already present replaces its value and keeps its
/// original position.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for this key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Get the value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check if a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `k=v&k=v`, without percent-encoding
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Debug for FieldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A set of fields forming all params or all headers of a request
///
/// Implementors list their fields explicitly and in declaration order; the
/// provided [`to_map`](FieldCollection::to_map) does the validation.
pub trait FieldCollection {
    /// What the fields describe, used in error messages
    fn kind(&self) -> FieldKind;

    /// The declared fields, in order
    fn fields(&self) -> Vec<Field>;

    /// Validate and flatten the fields into a key/value map
    ///
    /// Optional fields without a value are left out. A required field without
    /// a value fails the whole collection.
    fn to_map(&self) -> Result<FieldMap, SchemaError> {
        let kind = self.kind();
        let mut map = FieldMap::new();
        for (position, field) in self.fields().into_iter().enumerate() {
            if field.key.is_empty() {
                return Err(SchemaError::EmptyKey { kind, position });
            }
            if !field.is_set() {
                if !field.optional {
                    return Err(SchemaError::missing_required(kind, field.key));
                }
                continue;
            }
            map.insert(field.key, field.value);
        }
        Ok(map)
    }
}

macro_rules! field_container {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name {
            fields: Vec<Field>,
        }

        impl $name {
            /// Create an empty collection
            pub fn new() -> Self {
                Self::default()
            }

            /// Copy the fields of any other collection
            pub fn from_collection<C: FieldCollection + ?Sized>(collection: &C) -> Self {
                Self {
                    fields: collection.fields(),
                }
            }

            /// Declare a field
            pub fn field(mut self, field: Field) -> Self {
                self.fields.push(field);
                self
            }

            /// Declare a required field with a value
            pub fn required(self, key: impl Into<String>, value: impl Into<String>) -> Self {
                self.field(Field::required(key, value))
            }

            /// Declare an optional field that is not set yet
            pub fn optional(self, key: impl Into<String>) -> Self {
                self.field(Field::optional(key))
            }

            /// Declare an optional field with a value
            pub fn optional_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
                self.field(Field::new(key, true, value))
            }

            /// Set the value of every declared field with this key
            ///
            /// Returns `false` when no field with this key is declared.
            pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
                let value = value.into();
                let mut found = false;
                for field in self.fields.iter_mut().filter(|f| f.key == key) {
                    field.value = value.clone();
                    found = true;
                }
                found
            }

            /// Number of declared fields
            pub fn len(&self) -> usize {
                self.fields.len()
            }

            /// Check if no field is declared
            pub fn is_empty(&self) -> bool {
                self.fields.is_empty()
            }
        }

        impl FieldCollection for $name {
            fn kind(&self) -> FieldKind {
                $kind
            }

            fn fields(&self) -> Vec<Field> {
                self.fields.clone()
            }
        }

        impl FromIterator<Field> for $name {
            fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
                Self {
                    fields: iter.into_iter().collect(),
                }
            }
        }
    };
}

field_container!(
    /// Query parameters of a request
    Params,
    FieldKind::Param
);

field_container!(
    /// Headers of a request
    Headers,
    FieldKind::Header
);
