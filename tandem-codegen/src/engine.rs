//! The phased generation pipeline.
//!
//! A run is strictly ordered: build the defining-file index, compute the
//! dependency closure from the requested roots, seed the document tree with
//! one defining node per closure member, let every generator module layer its
//! contributions on, then render each file exactly once. Modules see a
//! read-only [`ModuleContext`] and a mutable tree; nothing is rendered until
//! every module has run.

use indexmap::IndexMap;
use tandem_model::{ModelType, TypeDescriptor, TypeId, TypeKind, TypeModel};
use tracing::debug;

use crate::{
    document::{DocumentSet, Modifiers, NodeKind},
    error::Result,
    reference::{RenderContext, TypeReference},
    render::render_document,
    resolver::{self, DefiningSite, DependencyClosure, FileIndex},
    target::TargetProfile,
};

/// Read-only inputs handed to each generator module.
pub struct ModuleContext<'a> {
    pub model: &'a TypeModel,
    pub index: &'a FileIndex,
    pub closure: &'a DependencyClosure,
}

/// One unit of generation logic.
///
/// Modules run in registration order, but every tree mutation is an upsert,
/// so well-behaved modules produce the same tree in any order.
pub trait GeneratorModule {
    fn name(&self) -> &'static str;

    /// Layer this module's contributions onto the document tree.
    fn contribute(&self, cx: &ModuleContext<'_>, tree: &mut DocumentSet) -> Result<()>;
}

/// Rendered file texts, keyed by output path.
#[derive(Debug, Clone, Default)]
pub struct RenderedOutput {
    files: IndexMap<String, String>,
}

impl RenderedOutput {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, t)| (p.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<(String, String)> for RenderedOutput {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// Drives one generation run for one target profile.
pub struct Engine<'a> {
    model: &'a TypeModel,
    profile: &'a dyn TargetProfile,
    strict: bool,
}

impl<'a> Engine<'a> {
    pub fn new(model: &'a TypeModel, profile: &'a dyn TargetProfile) -> Self {
        Self {
            model,
            profile,
            strict: false,
        }
    }

    /// Treat unresolved references as errors instead of warnings.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Run the full pipeline from the given roots.
    pub fn run(
        &self,
        roots: &[TypeId],
        modules: &[&dyn GeneratorModule],
    ) -> Result<RenderedOutput> {
        let index = FileIndex::build(self.model, self.profile.extension())?;
        let closure = DependencyClosure::compute(self.model, roots);
        debug!(
            target = self.profile.name(),
            roots = roots.len(),
            types = closure.len(),
            "dependency closure computed"
        );

        let mut tree = DocumentSet::new();
        for id in closure.iter() {
            // Closure members are guaranteed to have descriptors; members
            // without a file assignment (nested types) are seeded by the
            // module that owns their outer type.
            let Some(site) = index.get(id) else {
                continue;
            };
            let Some(descriptor) = self.model.descriptor(id) else {
                continue;
            };
            seed_defining_node(&mut tree, site, descriptor)?;
        }

        let cx = ModuleContext {
            model: self.model,
            index: &index,
            closure: &closure,
        };
        for module in modules {
            debug!(module = module.name(), "running generator module");
            module.contribute(&cx, &mut tree)?;
        }

        let mut files = IndexMap::new();
        for doc in tree.iter() {
            let namespace = doc
                .namespaces
                .values()
                .map(|ns| ns.name.as_str())
                .find(|name| !name.is_empty())
                .unwrap_or("");
            let ctx = RenderContext {
                file: &doc.path,
                namespace,
                model: self.model,
                index: &index,
                profile: self.profile,
                strict: self.strict,
            };
            files.insert(doc.path.clone(), render_document(doc, &ctx)?);
        }
        debug!(files = files.len(), "render pass complete");
        Ok(RenderedOutput { files })
    }
}

/// Seed the declaration a closure member's descriptor dictates: kind, generic
/// parameters, inheritance, properties, method signatures, enum members.
/// Everything is an upsert, so modules may freely extend the seeded node.
fn seed_defining_node(
    tree: &mut DocumentSet,
    site: &DefiningSite,
    descriptor: &TypeDescriptor,
) -> Result<()> {
    let namespace = tree.file(&site.file).namespace(&site.namespace);
    if descriptor.kind == TypeKind::Enum {
        let node = namespace.enumeration(&site.name)?;
        node.modifiers(Modifiers::PUBLIC);
        for member in &descriptor.enum_members {
            node.member(&member.name, member.value);
        }
        return Ok(());
    }

    let node = namespace.ty(&site.name, node_kind(descriptor.kind))?;
    node.modifiers(Modifiers::PUBLIC);
    for param in &descriptor.generic_params {
        node.generic_param(param);
    }
    if let Some(base) = &descriptor.base
        && !resolver::is_universal_base(base)
    {
        node.inherit(TypeReference::model(ModelType::named(base.clone())));
    }
    for interface in &descriptor.interfaces {
        node.inherit(TypeReference::model(ModelType::named(interface.clone())));
    }
    for property in &descriptor.properties {
        let seeded = node.property(&property.name, TypeReference::model(property.ty.clone()));
        seeded.modifiers(Modifiers::PUBLIC);
        if property.nullable {
            seeded.optional();
        }
    }
    for method in &descriptor.methods {
        let return_type = match &method.return_type {
            Some(ty) => TypeReference::model(ty.clone()),
            None => TypeReference::Anonymous,
        };
        let seeded = node.method(&method.name, return_type);
        seeded.modifiers(Modifiers::PUBLIC);
        for param in &method.params {
            seeded.arg(&param.name, TypeReference::model(param.ty.clone()));
        }
    }
    Ok(())
}

fn node_kind(kind: TypeKind) -> NodeKind {
    match kind {
        TypeKind::Record => NodeKind::Record,
        TypeKind::Class => NodeKind::Class,
        TypeKind::Struct => NodeKind::Struct,
        TypeKind::Interface => NodeKind::Interface,
        TypeKind::Enum => NodeKind::Enum,
    }
}
