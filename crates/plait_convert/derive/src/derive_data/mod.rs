//! Parsing of the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod convertible_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use convertible_struct::{ConvertibleStruct, FieldRole, StructField};
