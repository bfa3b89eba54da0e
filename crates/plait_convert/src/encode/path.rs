use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// Escapes a reference token: `~` becomes `~0` and `/` becomes `~1`.
fn escape_component(component: &str) -> Cow<'_, str> {
    if component.contains(['~', '/']) {
        Cow::Owned(component.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(component)
    }
}

/// The location of the value being encoded, as a JSON Pointer.
///
/// The root is the empty pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerPath {
    segments: Vec<String>,
}

impl PointerPath {
    #[inline]
    pub const fn new() -> Self {
        Self { segments: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, key: &str) {
        self.segments.push(key.into());
    }

    #[inline]
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(index.to_string());
    }

    #[inline]
    pub fn pop(&mut self) {
        self.segments.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for PointerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", escape_component(segment))?;
        }
        Ok(())
    }
}
