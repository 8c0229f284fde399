/// Named integer values of an enumerated CUPI field.
#[derive(Debug)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub variants: &'static [(i64, &'static str)],
}

impl EnumDescriptor {
    pub fn name_of(&self, value: i64) -> Option<&'static str> {
        self.variants
            .iter()
            .find(|(candidate, _)| *candidate == value)
            .map(|(_, name)| *name)
    }

    /// Case-insensitive lookup of a variant name.
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.variants
            .iter()
            .find(|(_, candidate)| candidate.eq_ignore_ascii_case(name.trim()))
            .map(|(value, _)| *value)
    }
}

/// Wire type of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    Int,
    Float,
    Boolean,
    DateTime,
    Enum(&'static EnumDescriptor),
}

impl FieldKind {
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::DateTime => "date-time",
            FieldKind::Enum(descriptor) => descriptor.name,
        }
    }
}

/// One recognised field of an entity type.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Server-maintained; never sent in a patch.
    pub read_only: bool,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            read_only: false,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub const fn int(name: &'static str) -> Self {
        Self::new(name, FieldKind::Int)
    }

    pub const fn float(name: &'static str) -> Self {
        Self::new(name, FieldKind::Float)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub const fn datetime(name: &'static str) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    pub const fn enumeration(name: &'static str, descriptor: &'static EnumDescriptor) -> Self {
        Self::new(name, FieldKind::Enum(descriptor))
    }

    pub const fn read_only(self) -> Self {
        Self {
            read_only: true,
            ..self
        }
    }
}

/// Declarative description of one Unity Connection object type.
///
/// The generic mapper and the connection server operations are driven entirely by this table
/// entry, so adding an object type means adding a descriptor, not new control flow.
#[derive(Debug)]
pub struct EntityDescriptor {
    /// Type name used in diagnostics, e.g. `User`.
    pub type_name: &'static str,
    /// Path below `/vmrest/`. Nested resources carry a `{parent}` placeholder.
    pub resource_path: &'static str,
    /// Key holding the record(s) inside a collection payload.
    pub list_key: &'static str,
    /// Identifier field, `ObjectId` for every CUPI type.
    pub id_field: &'static str,
    /// Field used to resolve a record by name when binding.
    pub lookup_field: Option<&'static str>,
    pub fields: &'static [FieldDescriptor],
}

impl EntityDescriptor {
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn is_nested(&self) -> bool {
        self.resource_path.contains("{parent}")
    }

    /// Resource path with the parent id filled in.
    pub fn path(&self, parent: Option<&str>) -> Result<String, String> {
        if !self.is_nested() {
            return Ok(self.resource_path.to_string());
        }

        match parent.map(str::trim) {
            Some(parent) if !parent.is_empty() => {
                Ok(self.resource_path.replace("{parent}", parent))
            }
            _ => Err(format!(
                "Empty parent object id passed for {}",
                self.type_name
            )),
        }
    }
}
