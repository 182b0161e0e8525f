//! Member nodes of the document tree.
//!
//! All members are name-keyed and created with get-or-create semantics so
//! that independent generator modules can layer contributions onto the same
//! node. Re-declaring a member merges modifier flags instead of overwriting.

use indexmap::IndexMap;

use crate::reference::TypeReference;

/// Bit set of declaration modifiers.
///
/// Merging is a bitwise or, which makes repeated declaration commutative:
/// whichever module runs first, the union wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers(u16);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const PUBLIC: Self = Self(1);
    pub const STATIC: Self = Self(1 << 1);
    pub const ABSTRACT: Self = Self(1 << 2);
    pub const PARTIAL: Self = Self(1 << 3);
    pub const OVERRIDE: Self = Self(1 << 4);
    pub const READONLY: Self = Self(1 << 5);
    pub const ASYNC: Self = Self(1 << 6);

    /// Check whether every flag in `other` is set.
    pub fn contains(&self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union in another flag set.
    pub fn merge(&mut self, other: Modifiers) {
        self.0 |= other.0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

/// A declared property.
#[derive(Debug, Clone)]
pub struct PropertyNode {
    pub name: String,
    pub ty: TypeReference,
    pub modifiers: Modifiers,
    /// Rendered with the target's "may be absent" marker.
    pub optional: bool,
}

impl PropertyNode {
    pub(crate) fn new(name: impl Into<String>, ty: TypeReference) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: Modifiers::NONE,
            optional: false,
        }
    }

    /// Merge in modifier flags.
    pub fn modifiers(&mut self, modifiers: Modifiers) -> &mut Self {
        self.modifiers.merge(modifiers);
        self
    }

    /// Mark the property optional.
    pub fn optional(&mut self) -> &mut Self {
        self.optional = true;
        self
    }
}

/// An argument of a method or constructor.
#[derive(Debug, Clone)]
pub struct ArgumentNode {
    pub name: String,
    pub ty: TypeReference,
}

impl ArgumentNode {
    pub(crate) fn new(name: impl Into<String>, ty: TypeReference) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A declared method with an optional pre-rendered body.
#[derive(Debug, Clone)]
pub struct MethodNode {
    pub name: String,
    pub return_type: TypeReference,
    pub modifiers: Modifiers,
    pub args: IndexMap<String, ArgumentNode>,
    body: String,
}

impl MethodNode {
    pub(crate) fn new(name: impl Into<String>, return_type: TypeReference) -> Self {
        Self {
            name: name.into(),
            return_type,
            modifiers: Modifiers::NONE,
            args: IndexMap::new(),
            body: String::new(),
        }
    }

    /// Merge in modifier flags.
    pub fn modifiers(&mut self, modifiers: Modifiers) -> &mut Self {
        self.modifiers.merge(modifiers);
        self
    }

    /// Get or create an argument by name.
    pub fn arg(&mut self, name: &str, ty: TypeReference) -> &mut ArgumentNode {
        self.args
            .entry(name.to_string())
            .or_insert_with(|| ArgumentNode::new(name, ty))
    }

    /// Append a line of pre-rendered body text. The body is emitted verbatim
    /// at render time, re-indented to the surrounding block.
    pub fn body_line(&mut self, line: &str) -> &mut Self {
        self.body.push_str(line);
        self.body.push('\n');
        self
    }

    /// The buffered body, if any was written.
    pub fn body(&self) -> Option<&str> {
        (!self.body.is_empty()).then_some(self.body.as_str())
    }
}

/// A declared constructor.
///
/// Keyed by a caller-chosen overload key (usually empty); re-declaring the
/// same key merges into the existing node.
#[derive(Debug, Clone)]
pub struct ConstructorNode {
    pub key: String,
    pub modifiers: Modifiers,
    pub args: IndexMap<String, ArgumentNode>,
    body: String,
}

impl ConstructorNode {
    pub(crate) fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::NONE,
            args: IndexMap::new(),
            body: String::new(),
        }
    }

    /// Merge in modifier flags.
    pub fn modifiers(&mut self, modifiers: Modifiers) -> &mut Self {
        self.modifiers.merge(modifiers);
        self
    }

    /// Get or create an argument by name.
    pub fn arg(&mut self, name: &str, ty: TypeReference) -> &mut ArgumentNode {
        self.args
            .entry(name.to_string())
            .or_insert_with(|| ArgumentNode::new(name, ty))
    }

    /// Append a line of pre-rendered body text.
    pub fn body_line(&mut self, line: &str) -> &mut Self {
        self.body.push_str(line);
        self.body.push('\n');
        self
    }

    /// The buffered body, if any was written.
    pub fn body(&self) -> Option<&str> {
        (!self.body.is_empty()).then_some(self.body.as_str())
    }
}

/// A declared attribute/decorator.
///
/// Arguments are deduplicated; the render pass sorts attribute lists so that
/// merged contributions come out in a stable order.
#[derive(Debug, Clone)]
pub struct AttributeNode {
    pub name: String,
    args: Vec<String>,
}

impl AttributeNode {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument, ignoring exact duplicates.
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        let arg = arg.into();
        if !self.args.contains(&arg) {
            self.args.push(arg);
        }
        self
    }

    /// Arguments in insertion order.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}
