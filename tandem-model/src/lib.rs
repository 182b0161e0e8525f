//! Type model consumed by the tandem source generator.
//!
//! This crate defines the immutable input contract: a [`TypeModel`] holding
//! [`TypeDescriptor`] records, file assignments, and naming overrides. It is
//! produced once by an external parser and never mutated by the generator.

mod descriptor;
mod model;
mod types;

pub use descriptor::{
    EnumMemberDescriptor, MethodDescriptor, ParamDescriptor, PropertyDescriptor, TypeDescriptor,
};
pub use model::{FileTarget, TypeModel};
pub use types::{ModelType, PrimitiveKind, TypeId, TypeKind};
