use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell};
use std::collections::HashMap;

use crate::{Convert, Node, Plain, PlainMap, Scalar};

#[inline(always)]
fn erase<T: Convert>(value: &T) -> &dyn Convert {
    value
}

// -----------------------------------------------------------------------------
// Scalars

macro_rules! impl_scalar {
    ($variant:ident as $target:ty => $($ty:ty),* $(,)?) => {
        $(
            impl Convert for $ty {
                #[inline]
                fn classify(&self) -> Node<'_> {
                    Node::Scalar(Scalar::$variant(*self as $target))
                }
            }
        )*
    };
}

impl_scalar!(Int as i64 => i8, i16, i32, i64, isize);
impl_scalar!(UInt as u64 => u8, u16, u32, u64, usize);
impl_scalar!(Float as f64 => f32, f64);

impl Convert for bool {
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::Scalar(Scalar::Bool(*self))
    }
}

impl Convert for () {
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::Scalar(Scalar::Null)
    }
}

impl Convert for char {
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::Scalar(Scalar::Text(Cow::Owned(self.to_string())))
    }
}

// -----------------------------------------------------------------------------
// Text

impl Convert for str {
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::Scalar(Scalar::Text(Cow::Borrowed(self)))
    }
}

impl Convert for &'static str {
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::Scalar(Scalar::Text(Cow::Borrowed(self)))
    }
}

impl Convert for String {
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::Scalar(Scalar::Text(Cow::Borrowed(self.as_str())))
    }
}

impl Convert for Cow<'static, str> {
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::Scalar(Scalar::Text(Cow::Borrowed(self.as_ref())))
    }
}

// -----------------------------------------------------------------------------
// Handles

impl<T: Convert> Convert for Option<T> {
    #[inline]
    fn classify(&self) -> Node<'_> {
        match self {
            Some(value) => value.classify(),
            None => Node::Scalar(Scalar::Null),
        }
    }
}

macro_rules! impl_handle {
    ($($handle:ident),*) => {
        $(
            impl<T: Convert + ?Sized> Convert for $handle<T> {
                #[inline]
                fn classify(&self) -> Node<'_> {
                    (**self).classify()
                }

                #[inline]
                fn type_name(&self) -> &'static str {
                    (**self).type_name()
                }
            }
        )*
    };
}

impl_handle!(Box, Rc, Arc);

impl<T: Convert> Convert for RefCell<T> {
    fn classify(&self) -> Node<'_> {
        match self.try_borrow() {
            Ok(guard) => Node::Cell(Ref::map(guard, erase::<T>)),
            Err(_) => Node::Locked,
        }
    }
}

// -----------------------------------------------------------------------------
// Sequences

impl<T: Convert> Convert for [T] {
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::sequence(self.iter().map(erase))
    }
}

impl<T: Convert, const N: usize> Convert for [T; N] {
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::sequence(self.iter().map(erase))
    }
}

impl<T: Convert> Convert for Vec<T> {
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::sequence(self.iter().map(erase))
    }
}

impl<T: Convert> Convert for VecDeque<T> {
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::sequence(self.iter().map(erase))
    }
}

// -----------------------------------------------------------------------------
// Mappings

impl<K, V> Convert for BTreeMap<K, V>
where
    K: AsRef<str> + 'static,
    V: Convert,
{
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::mapping(self.iter().map(|(key, value)| (key.as_ref(), erase(value))))
    }
}

impl<K, V, S> Convert for HashMap<K, V, S>
where
    K: AsRef<str> + 'static,
    V: Convert,
    S: 'static,
{
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::mapping(self.iter().map(|(key, value)| (key.as_ref(), erase(value))))
    }
}

// -----------------------------------------------------------------------------
// Plain values

impl Convert for Plain {
    fn classify(&self) -> Node<'_> {
        match self {
            Plain::Null => Node::Scalar(Scalar::Null),
            Plain::Bool(value) => Node::Scalar(Scalar::Bool(*value)),
            Plain::Number(number) => Node::Scalar(if let Some(value) = number.as_i64() {
                Scalar::Int(value)
            } else if let Some(value) = number.as_u64() {
                Scalar::UInt(value)
            } else {
                number.as_f64().map_or(Scalar::Null, Scalar::Float)
            }),
            Plain::String(value) => Node::Scalar(Scalar::Text(Cow::Borrowed(value.as_str()))),
            Plain::Array(items) => Node::sequence(items.iter().map(erase)),
            Plain::Object(entries) => entries.classify(),
        }
    }
}

impl Convert for PlainMap {
    #[inline]
    fn classify(&self) -> Node<'_> {
        Node::mapping(self.iter().map(|(key, value)| (key.as_str(), erase(value))))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use crate::{Convert, Node, Plain, Scalar};

    fn scalar(value: &dyn Convert) -> Scalar<'_> {
        match value.classify() {
            Node::Scalar(scalar) => scalar,
            other => panic!("expected a scalar, found {other:?}"),
        }
    }

    #[test]
    fn numbers_widen() {
        assert_eq!(scalar(&-7_i8), Scalar::Int(-7));
        assert_eq!(scalar(&7_u16), Scalar::UInt(7));
        assert_eq!(scalar(&0.5_f32), Scalar::Float(0.5));
        assert_eq!(scalar(&'x'), Scalar::Text("x".into()));
    }

    #[test]
    fn handles_are_transparent() {
        let boxed: Box<dyn Convert> = Box::new(3_i32);
        assert_eq!(scalar(&boxed), Scalar::Int(3));
        assert_eq!(scalar(&Rc::new(true)), Scalar::Bool(true));
        assert_eq!(scalar(&Some(1_u8)), Scalar::UInt(1));
        assert_eq!(scalar(&None::<u8>), Scalar::Null);
    }

    #[test]
    fn ref_cell_reports_borrow_state() {
        let cell = RefCell::new(vec![1_i32, 2]);
        assert!(matches!(cell.classify(), Node::Cell(_)));

        let guard = cell.borrow_mut();
        assert!(matches!(cell.classify(), Node::Locked));
        drop(guard);
    }

    #[test]
    fn plain_numbers_keep_their_kind() {
        assert_eq!(scalar(&Plain::from(-1)), Scalar::Int(-1));
        assert_eq!(scalar(&Plain::from(u64::MAX)), Scalar::UInt(u64::MAX));
        assert_eq!(scalar(&Plain::from(2.5)), Scalar::Float(2.5));
    }

    #[test]
    fn collections_classify() {
        assert!(matches!(vec![1_u8].classify(), Node::Sequence(_)));
        assert!(matches!([1_u8; 3].classify(), Node::Sequence(_)));

        let mut map = BTreeMap::new();
        map.insert("a", 1_i32);
        let Node::Mapping(entries) = map.classify() else {
            panic!("expected a mapping");
        };
        let keys: Vec<&str> = entries.map(|(key, _)| key).collect();
        assert_eq!(keys, ["a"]);
    }
}
