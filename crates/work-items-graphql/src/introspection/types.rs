use serde::{Deserialize, Serialize};

/// The `__TypeKind` of an introspected type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    /// Leaf kinds can be selected without a sub-selection
    pub fn is_leaf(self) -> bool {
        matches!(self, TypeKind::Scalar | TypeKind::Enum)
    }

    /// Composite kinds need a sub-selection to be queried
    pub fn is_composite(self) -> bool {
        matches!(self, TypeKind::Object | TypeKind::Interface | TypeKind::Union)
    }

    fn is_wrapper(self) -> bool {
        matches!(self, TypeKind::List | TypeKind::NonNull)
    }
}

/// A reference to a type, possibly wrapped in lists and non-null markers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeRef {
    pub name: Option<String>,
    pub kind: TypeKind,
    #[serde(rename = "ofType", default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    pub fn named(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: Some(name.into()),
            kind,
            of_type: None,
        }
    }

    pub fn non_null(inner: TypeRef) -> Self {
        Self::wrapping(TypeKind::NonNull, inner)
    }

    pub fn list(inner: TypeRef) -> Self {
        Self::wrapping(TypeKind::List, inner)
    }

    fn wrapping(kind: TypeKind, inner: TypeRef) -> Self {
        Self {
            name: None,
            kind,
            of_type: Some(Box::new(inner)),
        }
    }

    /// The kind of the innermost named type.
    ///
    /// The introspection query only descends two levels, so deeply wrapped
    /// types can come back truncated. Those resolve to `None`.
    pub fn named_kind(&self) -> Option<TypeKind> {
        let mut current = self;
        while current.kind.is_wrapper() {
            current = current.of_type.as_deref()?;
        }
        current.name.as_ref().map(|_| current.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: TypeRef,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeDescriptor {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub fields: Option<Vec<FieldDescriptor>>,
    #[serde(rename = "enumValues", default)]
    pub enum_values: Option<Vec<EnumValue>>,
}

impl TypeDescriptor {
    pub fn object(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Object,
            fields: Some(fields),
            enum_values: None,
        }
    }

    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: TypeKind::Enum,
            fields: None,
            enum_values: Some(
                values
                    .into_iter()
                    .map(|value| EnumValue {
                        name: value.into(),
                        description: None,
                    })
                    .collect(),
            ),
        }
    }
}

/// `data` of the introspection query
#[derive(Debug, Deserialize)]
pub(crate) struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub(crate) schema: IntrospectedSchema,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IntrospectedSchema {
    pub(crate) types: Vec<TypeDescriptor>,
}
