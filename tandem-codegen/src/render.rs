//! The document-to-text render pass.
//!
//! Each file is walked exactly once, body first: resolving the body's type
//! references feeds the import collector, and only then is the import block
//! rendered and prepended. Members render in a fixed order regardless of
//! contribution order, so layered modules cannot perturb the output.

use indexmap::IndexMap;

use crate::{
    document::{ArgumentNode, AttributeNode, EnumNode, FileDocument, TypeNode},
    emitter::Emitter,
    error::Result,
    imports::ImportCollector,
    reference::{RenderContext, TypeReference},
    target::RenderedArg,
};

/// Render one file document to its final text.
pub fn render_document(doc: &FileDocument, ctx: &RenderContext<'_>) -> Result<String> {
    let mut collector = ImportCollector::new();
    let mut body = Emitter::new(ctx.profile.style());

    let mut first_namespace = true;
    for namespace in doc.namespaces.values() {
        if namespace.is_empty() {
            continue;
        }
        if !first_namespace {
            body.blank();
        }
        first_namespace = false;

        let opened = ctx.profile.open_namespace(&mut body, &namespace.name)?;
        let mut first_declaration = true;
        for node in namespace.types.values() {
            if !first_declaration {
                body.blank();
            }
            first_declaration = false;
            render_type(&mut body, node, ctx, &mut collector)?;
        }
        for node in namespace.enums.values() {
            if !first_declaration {
                body.blank();
            }
            first_declaration = false;
            render_enum(&mut body, node, ctx, &mut collector)?;
        }
        ctx.profile.close_namespace(&mut body, opened)?;
    }
    let body_text = body.finish()?;

    let groups = collector.groups(&doc.path, ctx.namespace, ctx.profile.import_style());
    if groups.is_empty() {
        return Ok(body_text);
    }
    let mut head = Emitter::new(ctx.profile.style());
    ctx.profile.render_imports(&mut head, &groups)?;
    if !body_text.is_empty() {
        head.blank();
    }
    let mut out = head.finish()?;
    out.push_str(&body_text);
    Ok(out)
}

fn render_type(
    e: &mut Emitter,
    node: &TypeNode,
    ctx: &RenderContext<'_>,
    collector: &mut ImportCollector,
) -> Result<()> {
    render_attributes(e, &node.attributes, ctx)?;

    let mut bases = Vec::new();
    for reference in node.bases() {
        if let Some(text) = resolve_text(reference, ctx, collector)? {
            bases.push(text);
        }
    }
    ctx.profile.open_type(e, node, &bases)?;

    let mut previous_group = false;

    if !node.constructors.is_empty() {
        for (i, constructor) in node.constructors.values().enumerate() {
            if i > 0 {
                e.blank();
            }
            let args = rendered_args(&constructor.args, ctx, collector)?;
            ctx.profile.render_constructor(e, node, constructor, &args)?;
        }
        previous_group = true;
    }

    if !node.nested.is_empty() {
        for nested in node.nested.values() {
            if previous_group {
                e.blank();
            }
            previous_group = true;
            render_type(e, nested, ctx, collector)?;
        }
    }

    if !node.properties.is_empty() {
        if previous_group {
            e.blank();
        }
        for property in node.properties.values() {
            let ty = resolve_text(&property.ty, ctx, collector)?;
            ctx.profile
                .render_property(e, node, property, ty.as_deref())?;
        }
        previous_group = true;
    }

    if !node.methods.is_empty() {
        for method in node.methods.values() {
            if previous_group {
                e.blank();
            }
            previous_group = true;
            let ret = resolve_text(&method.return_type, ctx, collector)?;
            let args = rendered_args(&method.args, ctx, collector)?;
            ctx.profile
                .render_method(e, node, method, ret.as_deref(), &args)?;
        }
    }

    ctx.profile.close_type(e, node)
}

fn render_enum(
    e: &mut Emitter,
    node: &EnumNode,
    ctx: &RenderContext<'_>,
    collector: &mut ImportCollector,
) -> Result<()> {
    let _ = collector;
    render_attributes(e, &node.attributes, ctx)?;
    ctx.profile.render_enum(e, node)
}

/// Attributes render sorted by name so that merged contributions from
/// independent modules come out in a stable order.
fn render_attributes(
    e: &mut Emitter,
    attributes: &IndexMap<String, AttributeNode>,
    ctx: &RenderContext<'_>,
) -> Result<()> {
    let mut sorted: Vec<&AttributeNode> = attributes.values().collect();
    sorted.sort_by_key(|a| (a.name.to_lowercase(), a.name.clone()));
    for attribute in sorted {
        ctx.profile.render_attribute(e, attribute)?;
    }
    Ok(())
}

fn resolve_text(
    reference: &TypeReference,
    ctx: &RenderContext<'_>,
    collector: &mut ImportCollector,
) -> Result<Option<String>> {
    let resolved = reference.resolve(ctx)?;
    collector.extend(resolved.imports);
    Ok(resolved.text)
}

fn rendered_args(
    args: &IndexMap<String, ArgumentNode>,
    ctx: &RenderContext<'_>,
    collector: &mut ImportCollector,
) -> Result<Vec<RenderedArg>> {
    let mut out = Vec::with_capacity(args.len());
    for arg in args.values() {
        out.push(RenderedArg {
            name: arg.name.clone(),
            ty: resolve_text(&arg.ty, ctx, collector)?,
        });
    }
    Ok(out)
}
