//! Hash containers with a reproducible default hasher.
//!
//! Re-exports *hashbrown* and *foldhash*.

// -----------------------------------------------------------------------------
// Exports

/// [`foldhash`] state with a fixed seed, so iteration order is the same
/// from one run to the next.
pub use foldhash::fast::FixedState as FixedHashState;

/// A [`hashbrown::HashMap`] hashed with [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] hashed with [`FixedHashState`] by default.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{HashMap, HashSet};

    #[test]
    fn fixed_state_is_reproducible() {
        let mut a: HashSet<u32> = HashSet::default();
        let mut b: HashSet<u32> = HashSet::default();
        for i in 0..64_u32 {
            a.insert(i);
            b.insert(i);
        }
        assert!(a.iter().eq(b.iter()));
    }

    #[test]
    fn map_with_str_keys() {
        let mut map: HashMap<&str, u32> = HashMap::default();
        map.insert("x", 1);
        map.insert("y", 2);
        assert_eq!(map.get("x"), Some(&1));
        assert_eq!(map.len(), 2);
    }
}
