/// Structural type metadata consumed by the accessor generator.
///
/// An index describes host types the way a compiler front end would:
/// declared fields and methods with their modifiers, the superclass and the
/// implemented interfaces. It is produced once per build (usually from JSON
/// or YAML files, see [`loader`]) and queried read-only afterwards.
pub mod loader;

use crate::generator::config::AccessorConfig;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

pub const CONSTRUCTOR_NAME: &str = "<init>";
pub const STATIC_INITIALIZER_NAME: &str = "<clinit>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Nesting {
    #[default]
    TopLevel,
    Inner {
        enclosing: String,
    },
    Local,
    Anonymous,
}

impl Nesting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLevel => "top_level",
            Self::Inner { .. } => "inner",
            Self::Local => "local",
            Self::Anonymous => "anonymous",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub public: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub synthetic: bool,
}

impl Modifiers {
    pub fn public() -> Self {
        Self {
            public: true,
            ..Self::default()
        }
    }

    pub fn public_static() -> Self {
        Self {
            public: true,
            is_static: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum TypeRef {
    Void,
    Primitive(String),
    Array(Box<TypeRef>),
    TypeVariable(String),
    Wildcard,
    Named(String),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive(name.into())
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// The type name when this reference points at an indexable type.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, ty: TypeRef, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    #[default]
    Method,
    Constructor,
    StaticInitializer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    pub name: String,
    #[serde(default)]
    pub kind: MethodKind,
    #[serde(default)]
    pub params: Vec<TypeRef>,
    pub return_type: TypeRef,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl MethodInfo {
    pub fn new(
        name: impl Into<String>,
        params: Vec<TypeRef>,
        return_type: TypeRef,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            name: name.into(),
            kind: MethodKind::Method,
            params,
            return_type,
            modifiers,
        }
    }

    pub fn constructor(params: Vec<TypeRef>) -> Self {
        Self {
            name: CONSTRUCTOR_NAME.to_string(),
            kind: MethodKind::Constructor,
            params,
            return_type: TypeRef::Void,
            modifiers: Modifiers::public(),
        }
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn is_initializer(&self) -> bool {
        self.kind != MethodKind::Method
            || self.name == CONSTRUCTOR_NAME
            || self.name == STATIC_INITIALIZER_NAME
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub nesting: Nesting,
    #[serde(default)]
    pub superclass: Option<String>,
    /// Superclasses above the direct one, nearest first. Lets the ancestor
    /// walk step over a superclass that is missing from the index.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldInfo>,
    #[serde(default)]
    pub methods: Vec<MethodInfo>,
    /// Accessor configuration declared on this type.
    #[serde(default)]
    pub accessor_configs: Vec<AccessorConfig>,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            nesting: Nesting::TopLevel,
            superclass: None,
            ancestors: Vec::new(),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            accessor_configs: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Interface,
            ..Self::new(name)
        }
    }

    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn with_ancestor(mut self, ancestor: impl Into<String>) -> Self {
        self.ancestors.push(ancestor.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_nesting(mut self, nesting: Nesting) -> Self {
        self.nesting = nesting;
        self
    }

    pub fn with_field(mut self, field: FieldInfo) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_config(mut self, config: AccessorConfig) -> Self {
        self.accessor_configs.push(config);
        self
    }

    /// The superclass chain as recorded on this type, nearest first.
    pub fn superclasses(&self) -> impl Iterator<Item = &str> {
        self.superclass
            .iter()
            .chain(self.ancestors.iter())
            .map(String::as_str)
    }

    /// Declared supertypes: the superclass chain followed by the interfaces.
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.superclasses()
            .chain(self.interfaces.iter().map(String::as_str))
    }
}

/// Queryable view over type metadata, keyed by fully qualified type name.
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    types: BTreeMap<String, TypeInfo>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type, returning the previous entry with the same name.
    pub fn insert(&mut self, info: TypeInfo) -> Option<TypeInfo> {
        self.types.insert(info.name.clone(), info)
    }

    pub fn with_type(mut self, info: TypeInfo) -> Self {
        self.insert(info);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeInfo> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeInfo> {
        self.types.values()
    }

    /// Whether `sub` is `sup` or reaches it through superclasses and
    /// interfaces known to the index.
    pub fn is_assignable(&self, sub: &str, sup: &str) -> bool {
        self.has_in_closure(sub, sup)
    }

    /// `type_name` and every indexed type assignable to it, sorted.
    pub fn subtypes_of(&self, type_name: &str) -> Vec<String> {
        let mut subtypes: Vec<String> = self
            .types
            .keys()
            .filter(|name| self.is_assignable(name, type_name))
            .cloned()
            .collect();
        if !self.contains(type_name) {
            subtypes.push(type_name.to_string());
            subtypes.sort();
        }
        subtypes
    }

    /// Whether `marker` appears in the supertype closure of `type_name`.
    ///
    /// Types missing from the index cannot be analyzed and answer false,
    /// unless they are the marker itself.
    pub fn has_in_closure(&self, type_name: &str, marker: &str) -> bool {
        let mut seen = HashSet::new();
        let mut pending = vec![type_name];
        while let Some(current) = pending.pop() {
            if current == marker {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(info) = self.get(current) {
                pending.extend(info.supertypes());
            }
        }
        false
    }
}

impl FromIterator<TypeInfo> for TypeIndex {
    fn from_iter<I: IntoIterator<Item = TypeInfo>>(iter: I) -> Self {
        let mut index = TypeIndex::new();
        for info in iter {
            index.insert(info);
        }
        index
    }
}
