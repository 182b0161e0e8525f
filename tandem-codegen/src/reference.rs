//! Deferred type references and their resolution.
//!
//! A [`TypeReference`] is a closed variant set; `resolve` matches it
//! exhaustively, so adding a kind is a compile-time exercise. Nodes hold
//! references by value and resolution receives an explicit [`RenderContext`];
//! no node owns a path back to the generator.

use tandem_model::{ModelType, TypeId, TypeModel};
use tracing::warn;

use crate::{
    error::{Error, Result},
    imports::{ImportSource, SymbolImport},
    resolver::FileIndex,
    target::TargetProfile,
};

/// Everything needed to resolve a reference at the moment of rendering.
pub struct RenderContext<'a> {
    /// Path of the file being rendered, including extension.
    pub file: &'a str,
    /// Namespace the rendering file's declarations live in.
    pub namespace: &'a str,
    pub model: &'a TypeModel,
    pub index: &'a FileIndex,
    pub profile: &'a dyn TargetProfile,
    /// Promote unresolved references from warnings to fatal errors.
    pub strict: bool,
}

/// The outcome of resolving a reference: rendered text (absent for
/// anonymous references) and any imports the text requires.
#[derive(Debug, Clone, Default)]
pub struct ResolvedType {
    pub text: Option<String>,
    pub imports: Vec<SymbolImport>,
}

impl ResolvedType {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            imports: Vec::new(),
        }
    }
}

/// A deferred description of "what type goes here".
#[derive(Debug, Clone, PartialEq)]
pub enum TypeReference {
    /// Literal rendered text; never produces an import.
    Raw(String),
    /// Resolved against the defining-file index through the model's shape
    /// grammar; may produce imports.
    Model(ModelType),
    /// Renders the inner reference inside the target's deferred/awaitable
    /// wrapper syntax.
    Deferred(Box<TypeReference>),
    /// Intentionally renders no type annotation.
    Anonymous,
}

impl TypeReference {
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    pub fn model(ty: ModelType) -> Self {
        Self::Model(ty)
    }

    /// Shorthand for a reference to a named model type.
    pub fn named(id: impl Into<TypeId>) -> Self {
        Self::Model(ModelType::named(id))
    }

    pub fn deferred(inner: TypeReference) -> Self {
        Self::Deferred(Box::new(inner))
    }

    /// Resolve to rendered text plus required imports.
    pub fn resolve(&self, ctx: &RenderContext<'_>) -> Result<ResolvedType> {
        match self {
            TypeReference::Raw(text) => Ok(ResolvedType::plain(text.clone())),
            TypeReference::Anonymous => Ok(ResolvedType::default()),
            TypeReference::Deferred(inner) => {
                let inner = inner.resolve(ctx)?;
                Ok(ResolvedType {
                    text: Some(ctx.profile.deferred(inner.text.as_deref().unwrap_or_default())),
                    imports: inner.imports,
                })
            }
            TypeReference::Model(shape) => resolve_shape(shape, ctx),
        }
    }
}

fn resolve_shape(shape: &ModelType, ctx: &RenderContext<'_>) -> Result<ResolvedType> {
    match shape {
        ModelType::Primitive(p) => Ok(ResolvedType::plain(ctx.profile.primitive(*p))),
        ModelType::GenericParam(name) => Ok(ResolvedType::plain(name.clone())),
        ModelType::List(inner) => {
            let inner = resolve_shape(inner, ctx)?;
            Ok(ResolvedType {
                text: Some(ctx.profile.list(inner.text.as_deref().unwrap_or_default())),
                imports: inner.imports,
            })
        }
        ModelType::Optional(inner) => {
            let inner = resolve_shape(inner, ctx)?;
            Ok(ResolvedType {
                text: Some(ctx.profile.optional(inner.text.as_deref().unwrap_or_default())),
                imports: inner.imports,
            })
        }
        ModelType::Deferred(inner) => {
            let inner = resolve_shape(inner, ctx)?;
            Ok(ResolvedType {
                text: Some(ctx.profile.deferred(inner.text.as_deref().unwrap_or_default())),
                imports: inner.imports,
            })
        }
        ModelType::Map(key, value) => {
            let key = resolve_shape(key, ctx)?;
            let value = resolve_shape(value, ctx)?;
            let mut imports = key.imports;
            imports.extend(value.imports);
            Ok(ResolvedType {
                text: Some(ctx.profile.map(
                    key.text.as_deref().unwrap_or_default(),
                    value.text.as_deref().unwrap_or_default(),
                )),
                imports,
            })
        }
        ModelType::Named { id, args } => resolve_named(id, args, ctx),
    }
}

fn resolve_named(id: &TypeId, args: &[ModelType], ctx: &RenderContext<'_>) -> Result<ResolvedType> {
    let mut imports = Vec::new();
    let mut arg_texts = Vec::with_capacity(args.len());
    for arg in args {
        let resolved = resolve_shape(arg, ctx)?;
        arg_texts.push(resolved.text.unwrap_or_default());
        imports.extend(resolved.imports);
    }

    if let Some(site) = ctx.index.get(id) {
        let name = ctx.model.emitted_name(id);
        if site.file != ctx.file {
            imports.push(SymbolImport {
                symbol: name.to_string(),
                source: ImportSource::File {
                    path: site.file.clone(),
                    namespace: site.namespace.clone(),
                },
            });
        }
        return Ok(ResolvedType {
            text: Some(ctx.profile.generic(name, &arg_texts)),
            imports,
        });
    }

    if let Some(external) = ctx.profile.external(id.short_name()) {
        if let Some(package) = external.package {
            imports.push(SymbolImport {
                symbol: external.text.clone(),
                source: ImportSource::Package(package),
            });
        }
        return Ok(ResolvedType {
            text: Some(ctx.profile.generic(&external.text, &arg_texts)),
            imports,
        });
    }

    if ctx.strict {
        return Err(Error::unresolved(id.as_str()));
    }
    warn!(symbol = %id, file = ctx.file, "unresolved reference rendered as raw identifier");
    Ok(ResolvedType {
        text: Some(ctx.profile.generic(id.short_name(), &arg_texts)),
        imports,
    })
}
