use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::cupi::entitydescriptor::{EntityDescriptor, FieldKind};
use crate::cupi::error::FieldError;
use crate::cupi::parse::coerce_value;

/// Wire format CUPI uses for date-time values.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Represents a CUPI field value.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Value {
    /// Signed 64-bit integer.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
    /// Boolean value.
    Boolean(bool),
    /// Date-time, UTC without offset.
    DateTime(NaiveDateTime),
    /// Numeric value of an enumerated field.
    Enum(i64),
    /// Null value.
    Null,
}

impl Value {
    /// JSON form sent to the server. CUPI takes every scalar as a string.
    pub fn to_wire(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            other => serde_json::Value::String(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) | Value::Enum(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
            Value::Null => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

/// Field name.
pub type Attribute = &'static str;

/// Fields modified by the caller since the last fetch or save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingChanges {
    changes: BTreeMap<Attribute, Value>,
}

impl PendingChanges {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.changes.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Attribute, &Value)> {
        self.changes.iter()
    }

    /// JSON object holding only the changed fields.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .changes
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_wire()))
            .collect::<serde_json::Map<String, serde_json::Value>>();
        serde_json::Value::Object(map)
    }

    fn insert(&mut self, name: Attribute, value: Value) {
        self.changes.insert(name, value);
    }

    fn clear(&mut self) {
        self.changes.clear();
    }
}

/// A Unity Connection object: typed field values plus the caller's pending changes.
#[derive(Debug, Clone)]
pub struct Record {
    descriptor: &'static EntityDescriptor,
    parent: Option<String>,
    values: BTreeMap<Attribute, Value>,
    changes: PendingChanges,
}

impl Record {
    /// Create an empty record, used to build a new resource.
    pub fn new(descriptor: &'static EntityDescriptor) -> Self {
        Record {
            descriptor,
            parent: None,
            values: BTreeMap::new(),
            changes: PendingChanges::default(),
        }
    }

    /// Scope a nested record (e.g. a notification device) to its owning object.
    pub fn with_parent(mut self, parent_object_id: &str) -> Self {
        self.parent = Some(parent_object_id.to_string());
        self
    }

    pub fn descriptor(&self) -> &'static EntityDescriptor {
        self.descriptor
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Server-assigned identifier, once the record has been fetched.
    pub fn object_id(&self) -> Option<&str> {
        match self.values.get(self.descriptor.id_field) {
            Some(Value::String(id)) if !id.trim().is_empty() => Some(id),
            _ => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(Value::Int(i)) | Some(Value::Enum(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(Value::Float(v)) => Some(*v),
            Some(Value::Int(i)) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(Value::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn get_datetime(&self, name: &str) -> Option<NaiveDateTime> {
        match self.values.get(name) {
            Some(Value::DateTime(dt)) => Some(*dt),
            _ => None,
        }
    }

    /// Variant name of an enumerated field.
    pub fn get_enum_name(&self, name: &str) -> Option<&'static str> {
        let field = self.descriptor.field(name)?;
        let FieldKind::Enum(descriptor) = field.kind else {
            return None;
        };
        descriptor.name_of(self.get_int(name)?)
    }

    /// Change a field, recording it as pending.
    ///
    /// The value is coerced to the field's kind the same way payload values are, so
    /// `set("ListInDirectory", "true")` and `set("ListInDirectory", true)` are equivalent.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), FieldError> {
        let field = self
            .descriptor
            .field(name)
            .ok_or_else(|| FieldError::UnknownField {
                type_name: self.descriptor.type_name,
                field: name.to_string(),
            })?;

        if field.read_only && (field.name != self.descriptor.id_field || self.object_id().is_some())
        {
            return Err(FieldError::ReadOnly {
                type_name: self.descriptor.type_name,
                field: field.name,
            });
        }

        let value = value.into();
        let wire = match &value {
            Value::Null => serde_json::Value::Null,
            Value::Int(i) | Value::Enum(i) => serde_json::Value::from(*i),
            Value::Float(v) => serde_json::Value::from(*v),
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            other => serde_json::Value::String(other.to_string()),
        };

        let coerced = coerce_value(field.kind, &wire).ok_or_else(|| FieldError::InvalidValue {
            field: field.name,
            expected: field.kind.label(),
            value: value.to_string(),
        })?;

        self.changes.insert(field.name, coerced);
        Ok(())
    }

    pub fn pending_changes(&self) -> &PendingChanges {
        &self.changes
    }

    /// Patch body for a save: only the fields changed since the last fetch/save.
    pub fn patch_document(&self) -> serde_json::Value {
        self.changes.to_json()
    }

    pub fn clear_pending_changes(&mut self) {
        self.changes.clear();
    }

    /// Fold pending changes into the field values after a successful save.
    pub(crate) fn commit_pending_changes(&mut self) {
        let changes = std::mem::take(&mut self.changes);
        for (name, value) in changes.changes {
            self.values.insert(name, value);
        }
    }

    pub(crate) fn insert_value(&mut self, name: Attribute, value: Value) {
        self.values.insert(name, value);
    }

    /// Every populated field as `name: value` lines, sorted by name.
    pub fn dump_all_props(&self) -> String {
        self.values
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Populated field names.
    pub fn field_names(&self) -> impl Iterator<Item = &Attribute> {
        self.values.keys()
    }

    /// Field values only; pending changes and parent scope are ignored.
    pub fn same_values(&self, other: &Record) -> bool {
        std::ptr::eq(self.descriptor, other.descriptor) && self.values == other.values
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self
            .descriptor
            .lookup_field
            .and_then(|field| self.get_str(field))
            .unwrap_or("");
        write!(
            f,
            "{} {} [{}]",
            self.descriptor.type_name,
            label,
            self.object_id().unwrap_or("")
        )
    }
}
