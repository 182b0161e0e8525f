//! Shared test fixtures: a minimal TypeScript-flavored profile.

use tandem_model::PrimitiveKind;

use crate::{
    document::{AttributeNode, ConstructorNode, EnumNode, MethodNode, PropertyNode, TypeNode},
    emitter::{EmitStyle, Emitter},
    error::Result,
    imports::{ImportGroup, ImportStyle},
    target::{RenderedArg, TargetProfile},
};

pub(crate) struct StubProfile;

impl TargetProfile for StubProfile {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn style(&self) -> EmitStyle {
        EmitStyle::typescript()
    }

    fn import_style(&self) -> ImportStyle {
        ImportStyle::RelativePath
    }

    fn primitive(&self, kind: PrimitiveKind) -> &'static str {
        match kind {
            PrimitiveKind::String => "string",
            PrimitiveKind::Int | PrimitiveKind::Float => "number",
            PrimitiveKind::Bool => "boolean",
        }
    }

    fn optional(&self, inner: &str) -> String {
        format!("{inner} | null")
    }

    fn list(&self, inner: &str) -> String {
        format!("{inner}[]")
    }

    fn map(&self, key: &str, value: &str) -> String {
        format!("Map<{key}, {value}>")
    }

    fn deferred(&self, inner: &str) -> String {
        format!("Promise<{inner}>")
    }

    fn render_imports(&self, e: &mut Emitter, groups: &[ImportGroup]) -> Result<()> {
        for group in groups {
            e.word("import")
                .word(&format!("{{ {} }}", group.symbols.join(", ")))
                .word("from")
                .word(&format!("\"{}\";", group.module))
                .end_line();
        }
        Ok(())
    }

    fn open_namespace(&self, _e: &mut Emitter, _name: &str) -> Result<bool> {
        Ok(false)
    }

    fn render_attribute(&self, e: &mut Emitter, attr: &AttributeNode) -> Result<()> {
        e.word(&format!("@{}()", attr.name)).end_line();
        Ok(())
    }

    fn open_type(&self, e: &mut Emitter, node: &TypeNode, bases: &[String]) -> Result<()> {
        e.word("export").word(node.kind.as_str()).word(&node.name);
        if !node.generic_params().is_empty() {
            e.glue(&format!("<{}>", node.generic_params().join(", ")));
        }
        if let Some(first) = bases.first() {
            e.word("extends").word(first);
        }
        e.open_block();
        Ok(())
    }

    fn render_enum(&self, e: &mut Emitter, node: &EnumNode) -> Result<()> {
        e.word("export").word("enum").word(&node.name).open_block();
        for (name, value) in &node.members {
            match value {
                Some(v) => e.word(&format!("{name} = {v},")),
                None => e.word(&format!("{name},")),
            };
            e.end_line();
        }
        e.close_block()?;
        Ok(())
    }

    fn render_property(
        &self,
        e: &mut Emitter,
        _owner: &TypeNode,
        property: &PropertyNode,
        ty: Option<&str>,
    ) -> Result<()> {
        e.word(&property.name);
        if property.optional {
            e.glue("?");
        }
        if let Some(ty) = ty {
            e.glue(": ").glue(ty);
        }
        e.glue(";").end_line();
        Ok(())
    }

    fn render_constructor(
        &self,
        e: &mut Emitter,
        _owner: &TypeNode,
        _constructor: &ConstructorNode,
        args: &[RenderedArg],
    ) -> Result<()> {
        e.word("constructor").open_paren();
        for arg in args {
            e.word(&arg.name);
            e.separator();
        }
        e.close_paren()?.open_block();
        e.close_block()?;
        Ok(())
    }

    fn render_method(
        &self,
        e: &mut Emitter,
        _owner: &TypeNode,
        method: &MethodNode,
        return_type: Option<&str>,
        _args: &[RenderedArg],
    ) -> Result<()> {
        e.word(&method.name).glue("()");
        if let Some(ret) = return_type {
            e.glue(": ").glue(ret);
        }
        e.open_block();
        if let Some(body) = method.body() {
            e.raw_lines(body);
        }
        e.close_block()?;
        Ok(())
    }
}
