//! Classification of values into plain-convertible shapes.
//!
//! Every value taking part in a conversion implements [`Convert`], which
//! describes the value as a [`Node`]. The encoder only ever sees nodes, so
//! adding support for a new type means picking the node that fits it.

mod impls;

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::cell::Ref;

use crate::{Object, Scalar};

// -----------------------------------------------------------------------------
// Convert

/// A value that can be classified for conversion to plain data.
///
/// Implemented for the scalar types, text, sequences, string-keyed maps,
/// smart pointers and `RefCell`. Record types implement it through
/// `#[derive(Convertible)]`.
///
/// Implement it by hand for a type that should be rejected by the encoder,
/// returning [`Node::Opaque`]:
///
/// ```
/// use plait_convert::{Convert, Node};
///
/// struct Socket;
///
/// impl Convert for Socket {
///     fn classify(&self) -> Node<'_> {
///         Node::Opaque
///     }
/// }
/// ```
pub trait Convert: Any {
    /// Describes the shape of this value.
    fn classify(&self) -> Node<'_>;

    /// The name of the concrete type, used in error messages.
    #[inline]
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Returns the [`TypeId`] of the concrete type behind `value`.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use plait_convert::node::concrete_type_id;
///
/// let value: Box<dyn plait_convert::Convert> = Box::new(5_u8);
/// assert_eq!(concrete_type_id(&*value), TypeId::of::<u8>());
/// ```
#[inline]
pub fn concrete_type_id(value: &dyn Convert) -> TypeId {
    let any: &dyn Any = value;
    any.type_id()
}

/// Casts `value` to its concrete type.
#[inline]
pub fn downcast_ref<T: Convert>(value: &dyn Convert) -> Option<&T> {
    let any: &dyn Any = value;
    any.downcast_ref()
}

// -----------------------------------------------------------------------------
// Node

/// The shape of a value.
///
/// Handles such as `Box`, `Rc`, `Arc` and `Option::Some` have no node of their
/// own: they return the node of the value they point to. Only values reached
/// through a `RefCell` can form reference cycles, and those are reported as
/// [`Node::Cell`] so the encoder can look at the value inside the cell.
pub enum Node<'a> {
    /// A leaf value.
    Scalar(Scalar<'a>),
    /// An ordered collection.
    Sequence(Box<dyn Iterator<Item = &'a dyn Convert> + 'a>),
    /// A collection keyed by strings.
    Mapping(Box<dyn Iterator<Item = (&'a str, &'a dyn Convert)> + 'a>),
    /// A record whose fields are described by a registered schema.
    Object(&'a dyn Object),
    /// A shared borrow of the value inside a `RefCell`.
    Cell(Ref<'a, dyn Convert>),
    /// A `RefCell` that is currently mutably borrowed.
    Locked,
    /// A value with no plain form.
    Opaque,
}

impl<'a> Node<'a> {
    /// Builds a [`Node::Sequence`] from any iterator of items.
    #[inline]
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn Convert>,
        I::IntoIter: 'a,
    {
        Node::Sequence(Box::new(items.into_iter()))
    }

    /// Builds a [`Node::Mapping`] from any iterator of entries.
    #[inline]
    pub fn mapping<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a dyn Convert)>,
        I::IntoIter: 'a,
    {
        Node::Mapping(Box::new(entries.into_iter()))
    }

    /// Returns the name of this node's kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Node::Scalar(_) => "scalar",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
            Node::Object(_) => "object",
            Node::Cell(_) => "cell",
            Node::Locked => "locked cell",
            Node::Opaque => "opaque",
        }
    }

    /// Returns `true` for nodes that may contain other values.
    #[inline]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Node::Sequence(_) | Node::Mapping(_) | Node::Object(_))
    }
}

impl core::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Node::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
            Node::Object(object) => f.debug_tuple("Object").field(&object.type_name()).finish(),
            Node::Cell(inner) => f.debug_tuple("Cell").field(&inner.type_name()).finish(),
            other => f.write_str(other.kind()),
        }
    }
}
