//! The seam between the language-neutral core and a target language.
//!
//! A [`TargetProfile`] owns everything syntactic: type-text shaping for the
//! model's wrapper grammar, the import statement form, and the declaration
//! renderers the document walk calls into. The core hands profiles
//! pre-resolved type text, so profiles never touch the model or the index.

use tandem_model::PrimitiveKind;

use crate::{
    document::{AttributeNode, ConstructorNode, EnumNode, MethodNode, PropertyNode, TypeNode},
    emitter::{EmitStyle, Emitter},
    error::Result,
    imports::{ImportGroup, ImportStyle},
};

/// A well-known type provided by the target's ecosystem rather than by the
/// generated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalSymbol {
    /// Text the reference renders as.
    pub text: String,
    /// Package or namespace to import from, if the target needs one.
    pub package: Option<String>,
}

impl ExternalSymbol {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            package: None,
        }
    }

    pub fn from_package(text: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            package: Some(package.into()),
        }
    }
}

/// An argument with its type already resolved to target text.
#[derive(Debug, Clone)]
pub struct RenderedArg {
    pub name: String,
    pub ty: Option<String>,
}

/// Target-language syntax provider.
pub trait TargetProfile {
    fn name(&self) -> &'static str;

    /// Output file extension, without the dot.
    fn extension(&self) -> &'static str;

    fn style(&self) -> EmitStyle;

    fn import_style(&self) -> ImportStyle;

    fn primitive(&self, kind: PrimitiveKind) -> &'static str;

    /// Wrap type text in the target's "may be absent" syntax.
    fn optional(&self, inner: &str) -> String;

    /// Wrap type text in the target's sequence syntax.
    fn list(&self, inner: &str) -> String;

    /// Wrap key/value type text in the target's dictionary syntax.
    fn map(&self, key: &str, value: &str) -> String;

    /// Wrap type text in the target's deferred/awaitable syntax.
    fn deferred(&self, inner: &str) -> String;

    /// Apply generic arguments to a base type name.
    fn generic(&self, base: &str, args: &[String]) -> String {
        if args.is_empty() {
            base.to_string()
        } else {
            format!("{}<{}>", base, args.join(", "))
        }
    }

    /// Look up a well-known ecosystem type by short name.
    fn external(&self, name: &str) -> Option<ExternalSymbol> {
        let _ = name;
        None
    }

    /// Render the file's import block, one statement per group.
    fn render_imports(&self, e: &mut Emitter, groups: &[ImportGroup]) -> Result<()>;

    /// Open a namespace scope. Returns whether a block was opened, so the
    /// close call knows whether to emit a closing brace; targets without
    /// namespace syntax return `false` and render contents flat.
    fn open_namespace(&self, e: &mut Emitter, name: &str) -> Result<bool>;

    fn close_namespace(&self, e: &mut Emitter, opened: bool) -> Result<()> {
        if opened {
            e.close_block()?;
        }
        Ok(())
    }

    fn render_attribute(&self, e: &mut Emitter, attr: &AttributeNode) -> Result<()>;

    /// Open a type declaration: modifiers, keyword, name, inheritance clause,
    /// opening brace. `bases` is pre-resolved inheritance text.
    fn open_type(&self, e: &mut Emitter, node: &TypeNode, bases: &[String]) -> Result<()>;

    fn close_type(&self, e: &mut Emitter, node: &TypeNode) -> Result<()> {
        let _ = node;
        e.close_block()?;
        Ok(())
    }

    /// Render a whole enumeration, attributes excluded.
    fn render_enum(&self, e: &mut Emitter, node: &EnumNode) -> Result<()>;

    fn render_property(
        &self,
        e: &mut Emitter,
        owner: &TypeNode,
        property: &PropertyNode,
        ty: Option<&str>,
    ) -> Result<()>;

    fn render_constructor(
        &self,
        e: &mut Emitter,
        owner: &TypeNode,
        constructor: &ConstructorNode,
        args: &[RenderedArg],
    ) -> Result<()>;

    fn render_method(
        &self,
        e: &mut Emitter,
        owner: &TypeNode,
        method: &MethodNode,
        return_type: Option<&str>,
        args: &[RenderedArg],
    ) -> Result<()>;
}
