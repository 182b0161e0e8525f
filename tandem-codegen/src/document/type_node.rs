//! Type and enum declaration nodes.

use indexmap::IndexMap;

use crate::{
    document::members::{AttributeNode, ConstructorNode, MethodNode, Modifiers, PropertyNode},
    error::{Error, Result},
    reference::TypeReference,
};

/// Kind of a declared type node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Class,
    Interface,
    Struct,
    Record,
    Enum,
}

impl NodeKind {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Class => "class",
            NodeKind::Interface => "interface",
            NodeKind::Struct => "struct",
            NodeKind::Record => "record",
            NodeKind::Enum => "enum",
        }
    }
}

/// A declared type with name-keyed member collections.
///
/// Builder methods are idempotent upserts: calling them twice with the same
/// name returns the existing node, merging flags rather than overwriting.
#[derive(Debug, Clone)]
pub struct TypeNode {
    pub name: String,
    pub kind: NodeKind,
    pub modifiers: Modifiers,
    generic_params: Vec<String>,
    bases: Vec<TypeReference>,
    pub attributes: IndexMap<String, AttributeNode>,
    pub constructors: IndexMap<String, ConstructorNode>,
    pub nested: IndexMap<String, TypeNode>,
    pub properties: IndexMap<String, PropertyNode>,
    pub methods: IndexMap<String, MethodNode>,
}

impl TypeNode {
    pub(crate) fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Modifiers::NONE,
            generic_params: Vec::new(),
            bases: Vec::new(),
            attributes: IndexMap::new(),
            constructors: IndexMap::new(),
            nested: IndexMap::new(),
            properties: IndexMap::new(),
            methods: IndexMap::new(),
        }
    }

    /// Merge in modifier flags.
    pub fn modifiers(&mut self, modifiers: Modifiers) -> &mut Self {
        self.modifiers.merge(modifiers);
        self
    }

    /// Add an open generic parameter, deduplicated, in declaration order.
    pub fn generic_param(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if !self.generic_params.contains(&name) {
            self.generic_params.push(name);
        }
        self
    }

    /// Open generic parameters in declaration order.
    pub fn generic_params(&self) -> &[String] {
        &self.generic_params
    }

    /// Add an inherited base type or implemented interface, deduplicated.
    pub fn inherit(&mut self, reference: TypeReference) -> &mut Self {
        if !self.bases.contains(&reference) {
            self.bases.push(reference);
        }
        self
    }

    /// Inherited/implemented type references in insertion order.
    pub fn bases(&self) -> &[TypeReference] {
        &self.bases
    }

    /// Get or create an attribute by name.
    pub fn attribute(&mut self, name: &str) -> &mut AttributeNode {
        self.attributes
            .entry(name.to_string())
            .or_insert_with(|| AttributeNode::new(name))
    }

    /// Get or create a constructor by overload key (usually empty).
    pub fn constructor(&mut self, key: &str) -> &mut ConstructorNode {
        self.constructors
            .entry(key.to_string())
            .or_insert_with(|| ConstructorNode::new(key))
    }

    /// Get or create a nested type. Re-declaring with a different kind is a
    /// configuration error, not a silent override.
    pub fn nested(&mut self, name: &str, kind: NodeKind) -> Result<&mut TypeNode> {
        if let Some(existing) = self.nested.get(name)
            && existing.kind != kind
        {
            return Err(Error::conflicting(
                name,
                existing.kind.as_str(),
                kind.as_str(),
            ));
        }
        Ok(self
            .nested
            .entry(name.to_string())
            .or_insert_with(|| TypeNode::new(name, kind)))
    }

    /// Get or create a property by name. The type of the first declaration
    /// wins; later calls merge flags only.
    pub fn property(&mut self, name: &str, ty: TypeReference) -> &mut PropertyNode {
        self.properties
            .entry(name.to_string())
            .or_insert_with(|| PropertyNode::new(name, ty))
    }

    /// Get or create a method by name.
    pub fn method(&mut self, name: &str, return_type: TypeReference) -> &mut MethodNode {
        self.methods
            .entry(name.to_string())
            .or_insert_with(|| MethodNode::new(name, return_type))
    }
}

/// A declared enumeration.
#[derive(Debug, Clone)]
pub struct EnumNode {
    pub name: String,
    pub modifiers: Modifiers,
    pub attributes: IndexMap<String, AttributeNode>,
    pub members: IndexMap<String, Option<i64>>,
}

impl EnumNode {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::NONE,
            attributes: IndexMap::new(),
            members: IndexMap::new(),
        }
    }

    /// Merge in modifier flags.
    pub fn modifiers(&mut self, modifiers: Modifiers) -> &mut Self {
        self.modifiers.merge(modifiers);
        self
    }

    /// Get or create an attribute by name.
    pub fn attribute(&mut self, name: &str) -> &mut AttributeNode {
        self.attributes
            .entry(name.to_string())
            .or_insert_with(|| AttributeNode::new(name))
    }

    /// Upsert a member. An explicit value fills in a previously valueless
    /// declaration but never overwrites an existing one.
    pub fn member(&mut self, name: &str, value: Option<i64>) -> &mut Self {
        let entry = self.members.entry(name.to_string()).or_insert(None);
        if entry.is_none() {
            *entry = value;
        }
        self
    }
}
