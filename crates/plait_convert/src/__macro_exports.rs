//! Items used by the code `#[derive(Convertible)]` generates.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::Convertible;
    use crate::registry::Registry;

    pub struct __AutoRegisterFunc(pub fn(&mut Registry));

    inventory::collect!(__AutoRegisterFunc);

    pub trait __RegisterType {
        fn __register(registry: &mut Registry);
    }

    impl<T: Convertible> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut Registry) {
            registry.register::<T>();
        }
    }

    // Its presence after collection shows that collection works on this target.
    #[derive(Convertible)]
    #[convertible(auto_register)]
    pub struct __AvailFlag {}

    pub fn __register_types(registry: &mut Registry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
