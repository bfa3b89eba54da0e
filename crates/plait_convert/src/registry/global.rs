use alloc::sync::Arc;
use std::sync::{LazyLock, PoisonError, RwLock};

use super::Registry;

static GLOBAL: LazyLock<RwLock<Arc<Registry>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Registry::new())));

/// Returns a snapshot of the global registry.
///
/// The global registry starts out holding every automatically registered
/// type. Changes made through [`global_mut`] after the snapshot was taken
/// are not visible through it.
pub fn global() -> Arc<Registry> {
    GLOBAL.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Modifies the global registry.
///
/// Snapshots held elsewhere keep the registry as it was; the modification
/// is applied to a copy if any exist.
///
/// # Examples
///
/// ```
/// use plait_convert::{Convertible, global, global_mut};
///
/// #[derive(Convertible)]
/// struct Marker {}
///
/// let before = global();
/// global_mut(|registry| registry.register::<Marker>());
///
/// assert!(global().contains::<Marker>());
/// assert!(!before.contains::<Marker>());
/// ```
pub fn global_mut<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    let mut guard = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    f(Arc::make_mut(&mut guard))
}
