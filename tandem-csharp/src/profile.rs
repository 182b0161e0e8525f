//! C# syntax provider.

use tandem_codegen::{
    AttributeNode, ConstructorNode, EmitStyle, Emitter, EnumNode, ExternalSymbol, ImportGroup,
    ImportStyle, MethodNode, Modifiers, NodeKind, PropertyNode, RenderedArg, Result, TargetProfile,
    TypeNode,
};
use tandem_model::PrimitiveKind;

/// C# target profile.
pub struct CSharpProfile;

impl CSharpProfile {
    fn member_modifiers(&self, e: &mut Emitter, modifiers: Modifiers) {
        if modifiers.contains(Modifiers::PUBLIC) {
            e.word("public");
        }
        if modifiers.contains(Modifiers::STATIC) {
            e.word("static");
        }
        if modifiers.contains(Modifiers::ABSTRACT) {
            e.word("abstract");
        }
        if modifiers.contains(Modifiers::OVERRIDE) {
            e.word("override");
        }
        if modifiers.contains(Modifiers::ASYNC) {
            e.word("async");
        }
    }

    fn args(&self, e: &mut Emitter, args: &[RenderedArg]) -> Result<()> {
        e.open_paren();
        for arg in args {
            if let Some(ty) = &arg.ty {
                e.word(ty);
            }
            e.word(&arg.name);
            e.separator();
        }
        e.close_paren()?;
        Ok(())
    }
}

impl TargetProfile for CSharpProfile {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn extension(&self) -> &'static str {
        "cs"
    }

    fn style(&self) -> EmitStyle {
        EmitStyle::csharp()
    }

    fn import_style(&self) -> ImportStyle {
        ImportStyle::Namespace
    }

    fn primitive(&self, kind: PrimitiveKind) -> &'static str {
        match kind {
            PrimitiveKind::String => "string",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Float => "double",
            PrimitiveKind::Bool => "bool",
        }
    }

    fn optional(&self, inner: &str) -> String {
        format!("{inner}?")
    }

    fn list(&self, inner: &str) -> String {
        format!("List<{inner}>")
    }

    fn map(&self, key: &str, value: &str) -> String {
        format!("Dictionary<{key}, {value}>")
    }

    fn deferred(&self, inner: &str) -> String {
        format!("Task<{inner}>")
    }

    fn external(&self, name: &str) -> Option<ExternalSymbol> {
        match name {
            "Guid" | "DateTime" | "DateTimeOffset" | "TimeSpan" => {
                Some(ExternalSymbol::from_package(name, "System"))
            }
            _ => None,
        }
    }

    fn render_imports(&self, e: &mut Emitter, groups: &[ImportGroup]) -> Result<()> {
        for group in groups {
            e.word("using").word(&format!("{};", group.module)).end_line();
        }
        Ok(())
    }

    fn open_namespace(&self, e: &mut Emitter, name: &str) -> Result<bool> {
        if name.is_empty() {
            return Ok(false);
        }
        e.word("namespace").word(name).open_block();
        Ok(true)
    }

    fn render_attribute(&self, e: &mut Emitter, attr: &AttributeNode) -> Result<()> {
        if attr.args().is_empty() {
            e.word(&format!("[{}]", attr.name)).end_line();
            return Ok(());
        }
        e.word(&format!("[{}", attr.name)).open_paren();
        for arg in attr.args() {
            e.word(arg);
            e.separator();
        }
        e.close_paren()?.glue("]").end_line();
        Ok(())
    }

    fn open_type(&self, e: &mut Emitter, node: &TypeNode, bases: &[String]) -> Result<()> {
        if node.modifiers.contains(Modifiers::PUBLIC) {
            e.word("public");
        }
        if node.modifiers.contains(Modifiers::STATIC) {
            e.word("static");
        }
        if node.modifiers.contains(Modifiers::ABSTRACT) {
            e.word("abstract");
        }
        if node.modifiers.contains(Modifiers::PARTIAL) {
            e.word("partial");
        }
        let keyword = match node.kind {
            NodeKind::Class => "class",
            NodeKind::Record => "record",
            NodeKind::Struct => "struct",
            NodeKind::Interface => "interface",
            NodeKind::Enum => "enum",
        };
        e.word(keyword).word(&node.name);
        if !node.generic_params().is_empty() {
            e.glue(&format!("<{}>", node.generic_params().join(", ")));
        }
        if !bases.is_empty() {
            e.word(":").word(&bases.join(", "));
        }
        e.open_block();
        Ok(())
    }

    fn render_enum(&self, e: &mut Emitter, node: &EnumNode) -> Result<()> {
        if node.modifiers.contains(Modifiers::PUBLIC) {
            e.word("public");
        }
        e.word("enum").word(&node.name).open_block();
        for (name, value) in &node.members {
            match value {
                Some(value) => e.word(name).word("=").word(&format!("{value},")),
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
        owner: &TypeNode,
        property: &PropertyNode,
        ty: Option<&str>,
    ) -> Result<()> {
        if owner.kind != NodeKind::Interface {
            self.member_modifiers(e, property.modifiers);
        }
        if let Some(ty) = ty {
            if property.optional && !ty.ends_with('?') {
                e.word(&format!("{ty}?"));
            } else {
                e.word(ty);
            }
        }
        e.word(&property.name).word("{ get; set; }").end_line();
        Ok(())
    }

    fn render_constructor(
        &self,
        e: &mut Emitter,
        owner: &TypeNode,
        constructor: &ConstructorNode,
        args: &[RenderedArg],
    ) -> Result<()> {
        self.member_modifiers(e, constructor.modifiers);
        e.word(&owner.name);
        self.args(e, args)?;
        e.open_block();
        if let Some(body) = constructor.body() {
            e.raw_lines(body);
        }
        e.close_block()?;
        Ok(())
    }

    fn render_method(
        &self,
        e: &mut Emitter,
        owner: &TypeNode,
        method: &MethodNode,
        return_type: Option<&str>,
        args: &[RenderedArg],
    ) -> Result<()> {
        let signature_only =
            owner.kind == NodeKind::Interface || method.modifiers.contains(Modifiers::ABSTRACT);
        if owner.kind != NodeKind::Interface {
            self.member_modifiers(e, method.modifiers);
        }
        e.word(return_type.unwrap_or("void")).word(&method.name);
        self.args(e, args)?;
        if signature_only {
            e.glue(";").end_line();
            return Ok(());
        }
        e.open_block();
        if let Some(body) = method.body() {
            e.raw_lines(body);
        }
        e.close_block()?;
        Ok(())
    }
}
