use core::any::TypeId;
use core::ops::{Deref, DerefMut};

use plait_utils::hash::HashSet;

use crate::Convert;
use crate::node::concrete_type_id;

// -----------------------------------------------------------------------------
// Identity

/// The identity of a value: its address together with its concrete type.
///
/// A record and its first field can share an address, so the type is part
/// of the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    addr: usize,
    type_id: TypeId,
}

impl Identity {
    /// Returns the identity of `value`.
    #[inline]
    pub fn of(value: &dyn Convert) -> Self {
        Self {
            addr: core::ptr::from_ref(value).cast::<()>() as usize,
            type_id: concrete_type_id(value),
        }
    }

    #[inline]
    pub const fn addr(&self) -> usize {
        self.addr
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }
}

// -----------------------------------------------------------------------------
// Visited

/// The composite values on the current encoding path.
///
/// A value is only in the set while its own children are being encoded.
/// Siblings that alias the same value are therefore encoded twice instead
/// of being reported as a cycle.
///
/// # Examples
///
/// ```
/// use plait_convert::encode::{Identity, Visited};
///
/// let items = vec![1, 2, 3];
/// let id = Identity::of(&items);
///
/// let mut visited = Visited::new();
/// {
///     let mut scope = visited.enter(id).unwrap();
///     assert!(scope.contains(&id));
///     assert!(scope.enter(id).is_none());
/// }
/// assert!(!visited.contains(&id));
/// ```
#[derive(Debug, Default)]
pub struct Visited {
    active: HashSet<Identity>,
}

impl Visited {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, id: &Identity) -> bool {
        self.active.contains(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Marks `id` as being encoded until the returned scope is dropped.
    ///
    /// Returns `None` if `id` is already on the path, which means the value
    /// contains itself.
    #[must_use]
    pub fn enter(&mut self, id: Identity) -> Option<Scope<'_>> {
        if self.active.insert(id) {
            Some(Scope { visited: self, id })
        } else {
            None
        }
    }
}

/// Keeps an identity in a [`Visited`] set while alive.
///
/// Dereferences to the set, so nested values can be entered through it.
pub struct Scope<'a> {
    visited: &'a mut Visited,
    id: Identity,
}

impl Deref for Scope<'_> {
    type Target = Visited;

    #[inline]
    fn deref(&self) -> &Visited {
        &*self.visited
    }
}

impl DerefMut for Scope<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Visited {
        &mut *self.visited
    }
}

impl Drop for Scope<'_> {
    #[inline]
    fn drop(&mut self) {
        self.visited.active.remove(&self.id);
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C)]
    struct Outer {
        first: u64,
    }

    impl Convert for Outer {
        fn classify(&self) -> crate::Node<'_> {
            crate::Node::Opaque
        }
    }

    #[test]
    fn identity_includes_type() {
        let outer = Outer { first: 1 };
        let a = Identity::of(&outer);
        let b = Identity::of(&outer.first);
        assert_eq!(a.addr(), b.addr());
        assert_ne!(a, b);
    }

    #[test]
    fn scopes_nest_and_unwind() {
        let (x, y) = (1_u8, 2_u8);
        let mut visited = Visited::new();
        {
            let mut outer = visited.enter(Identity::of(&x)).unwrap();
            {
                let inner = outer.enter(Identity::of(&y)).unwrap();
                assert_eq!(inner.len(), 2);
            }
            assert_eq!(outer.len(), 1);
            assert!(outer.enter(Identity::of(&x)).is_none());
        }
        assert!(visited.is_empty());
    }
}
