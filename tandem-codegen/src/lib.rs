//! Language-neutral source generation core.
//!
//! A run flows through fixed phases: a [`resolver::FileIndex`] maps every
//! modeled type to its defining file, a [`resolver::DependencyClosure`] picks
//! the types actually reachable from the requested roots, generator modules
//! layer declarations onto the [`document`] tree, and the render pass turns
//! each file into text through a [`target::TargetProfile`]. The
//! [`materializer::Materializer`] then writes only what changed.
//!
//! Determinism is the load-bearing guarantee: every collection is
//! insertion-ordered or explicitly sorted, so the same model renders to
//! byte-identical output on every run.

pub mod document;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod imports;
pub mod materializer;
pub mod reference;
pub mod render;
pub mod resolver;
pub mod target;

#[cfg(test)]
mod testutil;

pub use document::{
    ArgumentNode, AttributeNode, ConstructorNode, DocumentSet, EnumNode, FileDocument, MethodNode,
    Modifiers, NamespaceNode, NodeKind, PropertyNode, TypeNode,
};
pub use emitter::{BraceStyle, EmitStyle, Emitter, Indent, LineEnding};
pub use engine::{Engine, GeneratorModule, ModuleContext, RenderedOutput};
pub use error::{Error, Result};
pub use imports::{ImportCollector, ImportGroup, ImportSource, ImportStyle, SymbolImport};
pub use materializer::{MANIFEST_FILE, MaterializeStats, Materializer};
pub use reference::{RenderContext, ResolvedType, TypeReference};
pub use resolver::{DefiningSite, DependencyClosure, FileIndex};
pub use target::{ExternalSymbol, RenderedArg, TargetProfile};
