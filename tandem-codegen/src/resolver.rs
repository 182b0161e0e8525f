//! Dependency closure and defining-file index.
//!
//! Both are computed once, up front, before any tree mutation: the
//! [`FileIndex`] in a single pass over the model's file assignments, the
//! [`DependencyClosure`] as a pure visited-set walk from the requested roots.

use indexmap::{IndexMap, IndexSet};
use tandem_model::{ModelType, TypeId, TypeModel};

use crate::error::{Error, Result};

/// Base types that terminate inheritance recursion everywhere.
const UNIVERSAL_BASES: [&str; 3] = ["object", "Object", "System.Object"];

/// Whether a base type is one of the universal roots every type implicitly
/// inherits from. These never enter the closure and never render as an
/// explicit inheritance clause.
pub(crate) fn is_universal_base(id: &TypeId) -> bool {
    UNIVERSAL_BASES.contains(&id.as_str())
}

/// Where a type identity is defined: which file, namespace, and under which
/// emitted name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefiningSite {
    pub file: String,
    pub namespace: String,
    pub name: String,
}

/// Read-only map from type identity to its defining site.
///
/// Built once per run; a type identity assigned to more than one file is an
/// [`Error::AmbiguousSymbol`] at build time, not at first use.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    entries: IndexMap<TypeId, DefiningSite>,
}

impl FileIndex {
    /// Build the index from the model's file assignments. `extension` is the
    /// target language's file extension, without the dot.
    pub fn build(model: &TypeModel, extension: &str) -> Result<Self> {
        let mut entries: IndexMap<TypeId, DefiningSite> = IndexMap::new();
        for (id, target) in &model.assignments {
            let site = DefiningSite {
                file: format!("{}.{}", target.stem, extension),
                namespace: target.namespace.clone(),
                name: model.emitted_name(id).to_string(),
            };
            if let Some(existing) = entries.get(id) {
                return Err(Error::ambiguous(
                    id.as_str(),
                    existing.file.clone(),
                    site.file,
                ));
            }
            entries.insert(id.clone(), site);
        }
        Ok(Self { entries })
    }

    /// Look up the defining site of a type identity.
    pub fn get(&self, id: &TypeId) -> Option<&DefiningSite> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The transitive set of types reachable from a set of roots.
#[derive(Debug, Clone, Default)]
pub struct DependencyClosure {
    members: IndexSet<TypeId>,
}

impl DependencyClosure {
    /// Compute the closure of the given roots over the model.
    ///
    /// Reachability goes through property types, method parameter and return
    /// types, base types (universal roots excluded), and implemented
    /// interfaces. Wrapper shapes are unwrapped to their element types; open
    /// generic parameters stop recursion. The result is a pure function of
    /// the model and the roots, and recomputing it yields the same set.
    pub fn compute(model: &TypeModel, roots: &[TypeId]) -> Self {
        let mut members = IndexSet::new();
        for root in roots {
            visit(model, root, &mut members);
        }
        Self { members }
    }

    pub fn contains(&self, id: &TypeId) -> bool {
        self.members.contains(id)
    }

    /// Members in discovery order (deterministic for a given model + roots).
    pub fn iter(&self) -> impl Iterator<Item = &TypeId> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

fn visit(model: &TypeModel, id: &TypeId, members: &mut IndexSet<TypeId>) {
    // Identities without a descriptor are external; they render raw or via
    // the profile's external table and are never closure members.
    let Some(descriptor) = model.descriptor(id) else {
        return;
    };
    if !members.insert(id.clone()) {
        return;
    }

    let mut referenced: Vec<&TypeId> = Vec::new();
    for property in &descriptor.properties {
        unwrap_generic(&property.ty, &mut referenced);
    }
    for method in &descriptor.methods {
        for param in &method.params {
            unwrap_generic(&param.ty, &mut referenced);
        }
        if let Some(ret) = &method.return_type {
            unwrap_generic(ret, &mut referenced);
        }
    }
    if let Some(base) = &descriptor.base
        && !is_universal_base(base)
    {
        referenced.push(base);
    }
    referenced.extend(descriptor.interfaces.iter());

    for reference in referenced {
        visit(model, reference, members);
    }
}

/// Unwrap the closed set of generic wrapper shapes down to referenced type
/// identities. Wrappers yield their element slot(s); anything else passes
/// through unchanged, and open generic parameters yield nothing.
fn unwrap_generic<'a>(ty: &'a ModelType, out: &mut Vec<&'a TypeId>) {
    match ty {
        ModelType::Primitive(_) | ModelType::GenericParam(_) => {}
        ModelType::Named { id, .. } => out.push(id),
        ModelType::List(inner) | ModelType::Optional(inner) | ModelType::Deferred(inner) => {
            unwrap_generic(inner, out)
        }
        ModelType::Map(key, value) => {
            unwrap_generic(key, out);
            unwrap_generic(value, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use tandem_model::{
        FileTarget, MethodDescriptor, PropertyDescriptor, TypeDescriptor, TypeKind,
    };

    use super::*;

    fn order_model() -> TypeModel {
        TypeModel::new()
            .declare(
                TypeDescriptor::new("OrderDto", TypeKind::Record).property(
                    PropertyDescriptor::new("items", ModelType::list(ModelType::named("LineItem"))),
                ),
                FileTarget::new("models/order"),
            )
            .declare(
                TypeDescriptor::new("LineItem", TypeKind::Record)
                    .property(PropertyDescriptor::new("tax", ModelType::float())),
                FileTarget::new("models/line_item"),
            )
    }

    #[test]
    fn test_closure_unwraps_list_wrapper() {
        let model = order_model();
        let closure = DependencyClosure::compute(&model, &[TypeId::new("OrderDto")]);

        assert_eq!(closure.len(), 2);
        assert!(closure.contains(&TypeId::new("OrderDto")));
        assert!(closure.contains(&TypeId::new("LineItem")));
    }

    #[test]
    fn test_closure_terminates_on_cycle() {
        let model = TypeModel::new()
            .declare(
                TypeDescriptor::new("A", TypeKind::Record)
                    .property(PropertyDescriptor::new("b", ModelType::named("B"))),
                FileTarget::new("a"),
            )
            .declare(
                TypeDescriptor::new("B", TypeKind::Record)
                    .property(PropertyDescriptor::new("a", ModelType::named("A"))),
                FileTarget::new("b"),
            );

        let closure = DependencyClosure::compute(&model, &[TypeId::new("A")]);
        assert_eq!(closure.len(), 2);
    }

    #[test]
    fn test_closure_is_stable_under_recomputation() {
        let model = order_model();
        let roots = [TypeId::new("OrderDto")];
        let first: Vec<_> = DependencyClosure::compute(&model, &roots)
            .iter()
            .cloned()
            .collect();
        let second: Vec<_> = DependencyClosure::compute(&model, &roots)
            .iter()
            .cloned()
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_closure_follows_base_and_interfaces_but_not_object() {
        let model = TypeModel::new()
            .declare(
                TypeDescriptor::new("Derived", TypeKind::Class)
                    .base("BaseDto")
                    .interface("IAuditable"),
                FileTarget::new("derived"),
            )
            .declare(
                TypeDescriptor::new("BaseDto", TypeKind::Class).base("object"),
                FileTarget::new("base"),
            )
            .declare(
                TypeDescriptor::new("IAuditable", TypeKind::Interface),
                FileTarget::new("auditable"),
            );

        let closure = DependencyClosure::compute(&model, &[TypeId::new("Derived")]);
        assert_eq!(closure.len(), 3);
    }

    #[test]
    fn test_open_generic_params_stop_recursion() {
        let model = TypeModel::new().declare(
            TypeDescriptor::new("Wrapper", TypeKind::Class)
                .generic_param("T")
                .property(PropertyDescriptor::new(
                    "value",
                    ModelType::GenericParam("T".into()),
                ))
                .method(
                    MethodDescriptor::new("get").returns(ModelType::GenericParam("T".into())),
                ),
            FileTarget::new("wrapper"),
        );

        let closure = DependencyClosure::compute(&model, &[TypeId::new("Wrapper")]);
        assert_eq!(closure.len(), 1);
    }

    #[test]
    fn test_index_build_and_lookup() {
        let model = order_model();
        let index = FileIndex::build(&model, "ts").unwrap();

        let site = index.get(&TypeId::new("LineItem")).unwrap();
        assert_eq!(site.file, "models/line_item.ts");
        assert_eq!(site.name, "LineItem");
    }

    #[test]
    fn test_duplicate_identity_is_ambiguous() {
        let model = TypeModel::new()
            .declare(
                TypeDescriptor::new("User", TypeKind::Record),
                FileTarget::new("models/user"),
            )
            .declare(
                TypeDescriptor::new("User", TypeKind::Record),
                FileTarget::new("auth/user"),
            );

        let err = FileIndex::build(&model, "ts").unwrap_err();
        match *err {
            Error::AmbiguousSymbol {
                ref symbol,
                ref first,
                ref second,
            } => {
                assert_eq!(symbol, "User");
                assert_eq!(first, "models/user.ts");
                assert_eq!(second, "auth/user.ts");
            }
            _ => panic!("expected AmbiguousSymbol"),
        }
    }

    #[test]
    fn test_map_wrapper_unwraps_both_slots() {
        let model = TypeModel::new()
            .declare(
                TypeDescriptor::new("Lookup", TypeKind::Record).property(PropertyDescriptor::new(
                    "entries",
                    ModelType::map(ModelType::named("Key"), ModelType::named("Value")),
                )),
                FileTarget::new("lookup"),
            )
            .declare(
                TypeDescriptor::new("Key", TypeKind::Record),
                FileTarget::new("key"),
            )
            .declare(
                TypeDescriptor::new("Value", TypeKind::Record),
                FileTarget::new("value"),
            );

        let closure = DependencyClosure::compute(&model, &[TypeId::new("Lookup")]);
        assert_eq!(closure.len(), 3);
    }
}
