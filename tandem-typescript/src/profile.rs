//! TypeScript syntax provider.

use tandem_codegen::{
    AttributeNode, ConstructorNode, EmitStyle, Emitter, EnumNode, ExternalSymbol, ImportGroup,
    ImportStyle, MethodNode, Modifiers, NodeKind, PropertyNode, RenderedArg, Result, TargetProfile,
    TypeNode,
};
use tandem_model::PrimitiveKind;

/// TypeScript target profile.
pub struct TypeScriptProfile;

impl TypeScriptProfile {
    fn member_modifiers(&self, e: &mut Emitter, modifiers: Modifiers) {
        if modifiers.contains(Modifiers::STATIC) {
            e.word("static");
        }
        if modifiers.contains(Modifiers::READONLY) {
            e.word("readonly");
        }
        if modifiers.contains(Modifiers::ASYNC) {
            e.word("async");
        }
    }

    fn args(&self, e: &mut Emitter, args: &[RenderedArg]) -> Result<()> {
        e.open_paren();
        for arg in args {
            e.word(&arg.name);
            if let Some(ty) = &arg.ty {
                e.glue(": ").glue(ty);
            }
            e.separator();
        }
        e.close_paren()?;
        Ok(())
    }
}

impl TargetProfile for TypeScriptProfile {
    fn name(&self) -> &'static str {
        "typescript"
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
        // Union element types need grouping: `(string | null)[]`.
        if inner.contains(' ') {
            format!("({inner})[]")
        } else {
            format!("{inner}[]")
        }
    }

    fn map(&self, key: &str, value: &str) -> String {
        format!("Map<{key}, {value}>")
    }

    fn deferred(&self, inner: &str) -> String {
        format!("Promise<{inner}>")
    }

    fn external(&self, name: &str) -> Option<ExternalSymbol> {
        // Well-known scalar identities that map onto the ecosystem rather
        // than onto generated files.
        match name {
            "Guid" | "Uuid" => Some(ExternalSymbol::new("string")),
            "DateTime" | "DateTimeOffset" => Some(ExternalSymbol::new("Date")),
            "TimeSpan" => Some(ExternalSymbol::new("number")),
            _ => None,
        }
    }

    fn render_imports(&self, e: &mut Emitter, groups: &[ImportGroup]) -> Result<()> {
        for group in groups {
            // The lazy separator is only dropped at close_paren, so a brace
            // list is joined up front instead of comma-per-symbol.
            e.word("import")
                .word(&format!("{{ {} }}", group.symbols.join(", ")))
                .word("from")
                .word(&format!("\"{}\";", group.module))
                .end_line();
        }
        Ok(())
    }

    fn open_namespace(&self, e: &mut Emitter, name: &str) -> Result<bool> {
        if name.is_empty() {
            return Ok(false);
        }
        e.word("export").word("namespace").word(name).open_block();
        Ok(true)
    }

    fn render_attribute(&self, e: &mut Emitter, attr: &AttributeNode) -> Result<()> {
        e.word(&format!("@{}", attr.name)).open_paren();
        for arg in attr.args() {
            e.word(arg);
            e.separator();
        }
        e.close_paren()?.end_line();
        Ok(())
    }

    fn open_type(&self, e: &mut Emitter, node: &TypeNode, bases: &[String]) -> Result<()> {
        e.word("export");
        if node.modifiers.contains(Modifiers::ABSTRACT) {
            e.word("abstract");
        }
        let keyword = match node.kind {
            NodeKind::Class => "class",
            // Data-only kinds all render as structural interfaces.
            NodeKind::Record | NodeKind::Struct | NodeKind::Interface => "interface",
            NodeKind::Enum => "enum",
        };
        e.word(keyword).word(&node.name);
        if !node.generic_params().is_empty() {
            e.glue(&format!("<{}>", node.generic_params().join(", ")));
        }
        if !bases.is_empty() {
            if node.kind == NodeKind::Class {
                // First base is the superclass, the rest are implemented
                // contracts; interfaces extend everything.
                e.word("extends").word(&bases[0]);
                if bases.len() > 1 {
                    e.word("implements").word(&bases[1..].join(", "));
                }
            } else {
                e.word("extends").word(&bases.join(", "));
            }
        }
        e.open_block();
        Ok(())
    }

    fn render_enum(&self, e: &mut Emitter, node: &EnumNode) -> Result<()> {
        e.word("export").word("enum").word(&node.name).open_block();
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
        _owner: &TypeNode,
        property: &PropertyNode,
        ty: Option<&str>,
    ) -> Result<()> {
        self.member_modifiers(e, property.modifiers);
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
        constructor: &ConstructorNode,
        args: &[RenderedArg],
    ) -> Result<()> {
        e.word("constructor");
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
        let signature_only = owner.kind != NodeKind::Class;
        if !signature_only {
            self.member_modifiers(e, method.modifiers);
        }
        e.word(&method.name);
        self.args(e, args)?;
        e.glue(": ")
            .glue(return_type.unwrap_or("void"));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_mapping() {
        let profile = TypeScriptProfile;
        assert_eq!(profile.primitive(PrimitiveKind::String), "string");
        assert_eq!(profile.primitive(PrimitiveKind::Int), "number");
        assert_eq!(profile.primitive(PrimitiveKind::Float), "number");
        assert_eq!(profile.primitive(PrimitiveKind::Bool), "boolean");
    }

    #[test]
    fn test_wrapper_shapes() {
        let profile = TypeScriptProfile;
        assert_eq!(profile.list("LineItem"), "LineItem[]");
        assert_eq!(profile.list("string | null"), "(string | null)[]");
        assert_eq!(profile.optional("string"), "string | null");
        assert_eq!(profile.map("string", "number"), "Map<string, number>");
        assert_eq!(profile.deferred("OrderDto"), "Promise<OrderDto>");
    }

    #[test]
    fn test_import_statement_shape() {
        let profile = TypeScriptProfile;
        let mut e = Emitter::new(profile.style());
        profile
            .render_imports(
                &mut e,
                &[ImportGroup {
                    module: "./line_item".into(),
                    symbols: vec!["discount".into(), "LineItem".into()],
                }],
            )
            .unwrap();
        assert_eq!(
            e.finish().unwrap(),
            "import { discount, LineItem } from \"./line_item\";\n"
        );
    }

    #[test]
    fn test_well_known_externals() {
        let profile = TypeScriptProfile;
        assert_eq!(profile.external("Guid"), Some(ExternalSymbol::new("string")));
        assert_eq!(
            profile.external("DateTime"),
            Some(ExternalSymbol::new("Date"))
        );
        assert_eq!(profile.external("OrderDto"), None);
    }
}
