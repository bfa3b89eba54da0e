#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Derive output names `plait_convert` explicitly. Inside the crate itself that
// path must still resolve, so alias `crate` to it.
extern crate self as plait_convert;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod object;
mod plain;

pub mod codec;
pub mod decode;
pub mod encode;
pub mod node;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use plait_convert_derive as derive;
pub use plait_convert_derive::Convertible;

pub use decode::{Arguments, ConstructError, DecodeError, Decoder};
pub use encode::{EncodeError, Encoder};
pub use node::{Convert, Node};
pub use object::{Convertible, FieldInfo, FieldSet, FieldSource, Object};
pub use plain::{Plain, PlainMap, Scalar, plain_kind};
pub use registry::{Registry, global, global_mut};
