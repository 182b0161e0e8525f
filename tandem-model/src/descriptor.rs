//! Immutable descriptions of modeled types.

use serde::{Deserialize, Serialize};

use crate::types::{ModelType, TypeId, TypeKind};

/// A declared property on a modeled type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub ty: ModelType,
    /// Whether the property may be absent/null in the source model.
    #[serde(default)]
    pub nullable: bool,
    /// Free-form tags attached by the external parser.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, ty: ModelType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            tags: Vec::new(),
        }
    }

    /// Mark the property as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Attach a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A parameter of a modeled method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,
    pub ty: ModelType,
}

impl ParamDescriptor {
    pub fn new(name: impl Into<String>, ty: ModelType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A declared method on a modeled type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub params: Vec<ParamDescriptor>,
    /// `None` means the method returns nothing.
    #[serde(default)]
    pub return_type: Option<ModelType>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type: None,
            tags: Vec::new(),
        }
    }

    /// Add a parameter.
    pub fn param(mut self, name: impl Into<String>, ty: ModelType) -> Self {
        self.params.push(ParamDescriptor::new(name, ty));
        self
    }

    /// Set the return type.
    pub fn returns(mut self, ty: ModelType) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Attach a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A member of a modeled enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMemberDescriptor {
    pub name: String,
    /// Explicit numeric value, if the source model fixed one.
    #[serde(default)]
    pub value: Option<i64>,
}

impl EnumMemberDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Fix an explicit numeric value.
    pub fn value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }
}

/// Immutable description of one modeled type.
///
/// Created once by the external parser; the generator core never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub id: TypeId,
    pub kind: TypeKind,
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    /// Base type, if any. Universal roots (`object` and friends) are ignored
    /// by the dependency resolver.
    #[serde(default)]
    pub base: Option<TypeId>,
    #[serde(default)]
    pub interfaces: Vec<TypeId>,
    /// Open generic parameter names (`T`, `TKey`, ...).
    #[serde(default)]
    pub generic_params: Vec<String>,
    /// Members, for `TypeKind::Enum` descriptors.
    #[serde(default)]
    pub enum_members: Vec<EnumMemberDescriptor>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TypeDescriptor {
    pub fn new(id: impl Into<TypeId>, kind: TypeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            properties: Vec::new(),
            methods: Vec::new(),
            base: None,
            interfaces: Vec::new(),
            generic_params: Vec::new(),
            enum_members: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Add a property.
    pub fn property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// Add a method.
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Set the base type.
    pub fn base(mut self, base: impl Into<TypeId>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Add an implemented interface.
    pub fn interface(mut self, id: impl Into<TypeId>) -> Self {
        self.interfaces.push(id.into());
        self
    }

    /// Add an open generic parameter.
    pub fn generic_param(mut self, name: impl Into<String>) -> Self {
        self.generic_params.push(name.into());
        self
    }

    /// Add an enum member.
    pub fn enum_member(mut self, member: EnumMemberDescriptor) -> Self {
        self.enum_members.push(member);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let descriptor = TypeDescriptor::new("Shop.OrderDto", TypeKind::Record)
            .property(PropertyDescriptor::new(
                "items",
                ModelType::list(ModelType::named("Shop.LineItem")),
            ))
            .method(
                MethodDescriptor::new("total")
                    .param("currency", ModelType::string())
                    .returns(ModelType::float()),
            )
            .interface("Shop.IAuditable");

        assert_eq!(descriptor.id.short_name(), "OrderDto");
        assert_eq!(descriptor.properties.len(), 1);
        assert_eq!(descriptor.methods[0].params.len(), 1);
        assert_eq!(descriptor.interfaces, vec![TypeId::new("Shop.IAuditable")]);
    }

    #[test]
    fn test_enum_member_value() {
        let member = EnumMemberDescriptor::new("Shipped").value(3);
        assert_eq!(member.value, Some(3));
    }
}
