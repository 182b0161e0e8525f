//! The complete type model handed to the generator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{TypeDescriptor, types::TypeId};

/// Logical output file a type is assigned to.
///
/// The `stem` is an extension-free, `/`-separated path relative to the output
/// root; each target language appends its own extension. The `namespace`
/// groups declarations inside the file and may be empty for flat targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTarget {
    pub stem: String,
    #[serde(default)]
    pub namespace: String,
}

impl FileTarget {
    pub fn new(stem: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            namespace: String::new(),
        }
    }

    /// Set the namespace declarations in this file belong to.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

/// The full set of modeled types plus output placement.
///
/// Built once before generation; the core treats it as read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeModel {
    pub descriptors: Vec<TypeDescriptor>,
    /// Which logical file each type belongs to. Kept as a list so that a
    /// model carrying the same identity twice is representable; the file
    /// index rejects such models instead of silently picking one.
    pub assignments: Vec<(TypeId, FileTarget)>,
    /// Emitted-name overrides, keyed by type identity.
    #[serde(default)]
    pub name_overrides: IndexMap<TypeId, String>,
}

impl TypeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor with its file assignment.
    pub fn declare(mut self, descriptor: TypeDescriptor, target: FileTarget) -> Self {
        self.assignments.push((descriptor.id.clone(), target));
        self.descriptors.push(descriptor);
        self
    }

    /// Add a descriptor without a file assignment (external or nested types).
    pub fn declare_unassigned(mut self, descriptor: TypeDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Override the emitted name for a type.
    pub fn rename(mut self, id: impl Into<TypeId>, name: impl Into<String>) -> Self {
        self.name_overrides.insert(id.into(), name.into());
        self
    }

    /// Find a descriptor by identity.
    pub fn descriptor(&self, id: &TypeId) -> Option<&TypeDescriptor> {
        self.descriptors.iter().find(|d| &d.id == id)
    }

    /// File assignment for a type, if any (first match).
    pub fn assignment(&self, id: &TypeId) -> Option<&FileTarget> {
        self.assignments
            .iter()
            .find(|(assigned, _)| assigned == id)
            .map(|(_, target)| target)
    }

    /// The name a type renders as: the override if present, else the short
    /// segment of its qualified identity.
    pub fn emitted_name<'a>(&'a self, id: &'a TypeId) -> &'a str {
        self.name_overrides
            .get(id)
            .map(String::as_str)
            .unwrap_or_else(|| id.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeKind;

    #[test]
    fn test_declare_and_lookup() {
        let model = TypeModel::new().declare(
            TypeDescriptor::new("Shop.OrderDto", TypeKind::Record),
            FileTarget::new("models/order").namespace("Shop"),
        );

        let id = TypeId::new("Shop.OrderDto");
        assert!(model.descriptor(&id).is_some());
        assert_eq!(model.assignment(&id).unwrap().stem, "models/order");
    }

    #[test]
    fn test_emitted_name_override() {
        let model = TypeModel::new()
            .declare(
                TypeDescriptor::new("Shop.OrderDto", TypeKind::Record),
                FileTarget::new("models/order"),
            )
            .rename("Shop.OrderDto", "Order");

        let id = TypeId::new("Shop.OrderDto");
        assert_eq!(model.emitted_name(&id), "Order");

        let other = TypeId::new("Shop.LineItem");
        assert_eq!(model.emitted_name(&other), "LineItem");
    }
}
