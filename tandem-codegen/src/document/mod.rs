//! Intermediate document tree.
//!
//! Mutated by generator modules during the contribution phase, then walked
//! exactly once by the render pass. Every collection preserves insertion
//! order; every builder method is an idempotent upsert so independent modules
//! can layer contributions without coordinating.

mod members;
mod type_node;

pub use members::{
    ArgumentNode, AttributeNode, ConstructorNode, MethodNode, Modifiers, PropertyNode,
};
pub use type_node::{EnumNode, NodeKind, TypeNode};

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// A named grouping of declarations inside a file.
#[derive(Debug, Clone)]
pub struct NamespaceNode {
    pub name: String,
    pub types: IndexMap<String, TypeNode>,
    pub enums: IndexMap<String, EnumNode>,
}

impl NamespaceNode {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: IndexMap::new(),
            enums: IndexMap::new(),
        }
    }

    /// Get or create a type by name. Re-declaring with a different kind is a
    /// [`Error::ConflictingDeclaration`], raised at the second declaration.
    pub fn ty(&mut self, name: &str, kind: NodeKind) -> Result<&mut TypeNode> {
        if let Some(existing) = self.types.get(name)
            && existing.kind != kind
        {
            return Err(Error::conflicting(
                name,
                existing.kind.as_str(),
                kind.as_str(),
            ));
        }
        if self.enums.contains_key(name) {
            return Err(Error::conflicting(name, "enum", kind.as_str()));
        }
        Ok(self
            .types
            .entry(name.to_string())
            .or_insert_with(|| TypeNode::new(name, kind)))
    }

    /// Get or create an enumeration by name.
    pub fn enumeration(&mut self, name: &str) -> Result<&mut EnumNode> {
        if let Some(existing) = self.types.get(name) {
            return Err(Error::conflicting(name, existing.kind.as_str(), "enum"));
        }
        Ok(self
            .enums
            .entry(name.to_string())
            .or_insert_with(|| EnumNode::new(name)))
    }

    /// Whether the namespace holds no declarations.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.enums.is_empty()
    }
}

/// One logical output file's accumulated declarations.
#[derive(Debug, Clone)]
pub struct FileDocument {
    /// Output path, including the target extension.
    pub path: String,
    pub namespaces: IndexMap<String, NamespaceNode>,
}

impl FileDocument {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespaces: IndexMap::new(),
        }
    }

    /// Get or create a namespace by name. The empty name is the file's
    /// top level; targets without namespace syntax render it flat.
    pub fn namespace(&mut self, name: &str) -> &mut NamespaceNode {
        self.namespaces
            .entry(name.to_string())
            .or_insert_with(|| NamespaceNode::new(name))
    }
}

/// The set of files being generated in one run, keyed by output path.
///
/// Files are created on first reference; several modules may write into the
/// same document across a run.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    files: IndexMap<String, FileDocument>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a file by output path.
    pub fn file(&mut self, path: &str) -> &mut FileDocument {
        self.files
            .entry(path.to_string())
            .or_insert_with(|| FileDocument::new(path))
    }

    /// Look up an existing file.
    pub fn get(&self, path: &str) -> Option<&FileDocument> {
        self.files.get(path)
    }

    /// Iterate files in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &FileDocument> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_get_or_create() {
        let mut set = DocumentSet::new();
        set.file("models/order.ts").namespace("");
        set.file("models/order.ts").namespace("");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_type_upsert_is_idempotent() {
        let mut set = DocumentSet::new();
        let ns = set.file("a.ts").namespace("Shop");
        ns.ty("Order", NodeKind::Record).unwrap();
        ns.ty("Order", NodeKind::Record).unwrap();
        assert_eq!(ns.types.len(), 1);
    }

    #[test]
    fn test_kind_conflict_rejected() {
        let mut set = DocumentSet::new();
        let ns = set.file("a.ts").namespace("Shop");
        ns.ty("Order", NodeKind::Record).unwrap();
        let err = ns.ty("Order", NodeKind::Interface).unwrap_err();
        assert!(matches!(*err, Error::ConflictingDeclaration { .. }));
    }

    #[test]
    fn test_type_enum_name_collision_rejected() {
        let mut set = DocumentSet::new();
        let ns = set.file("a.ts").namespace("Shop");
        ns.ty("Status", NodeKind::Class).unwrap();
        assert!(ns.enumeration("Status").is_err());

        let ns2 = set.file("b.ts").namespace("Shop");
        ns2.enumeration("Level").unwrap();
        assert!(ns2.ty("Level", NodeKind::Class).is_err());
    }

    #[test]
    fn test_independent_modules_layer_onto_same_node() {
        let mut set = DocumentSet::new();

        // Module one adds a property.
        set.file("a.ts")
            .namespace("Shop")
            .ty("Order", NodeKind::Record)
            .unwrap()
            .property("id", crate::reference::TypeReference::raw("string"));

        // Module two adds a method to the same node.
        set.file("a.ts")
            .namespace("Shop")
            .ty("Order", NodeKind::Record)
            .unwrap()
            .method("total", crate::reference::TypeReference::raw("number"));

        let node = &set.get("a.ts").unwrap().namespaces["Shop"].types["Order"];
        assert_eq!(node.properties.len(), 1);
        assert_eq!(node.methods.len(), 1);
    }
}
