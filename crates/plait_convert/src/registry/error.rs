use alloc::string::String;

use thiserror::Error;

/// An error returned when attaching a field hook.
///
/// A failed registration leaves the registry unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    /// The target type has not been registered.
    #[error("cannot attach a {hook} to `{type_name}.{field}`: the type is not registered")]
    NotConvertible {
        type_name: &'static str,
        field: String,
        hook: &'static str,
    },
    /// The target type has no listed field of that name.
    #[error("cannot attach a {hook} to `{type_name}.{field}`: no such field")]
    UnknownField {
        type_name: &'static str,
        field: String,
        hook: &'static str,
    },
    /// The hook works on a different type than the field holds.
    #[error(
        "cannot attach a {hook} to `{type_name}.{field}`: the field holds `{expected}`, \
         the {hook} works on `{found}`"
    )]
    HookType {
        type_name: &'static str,
        field: String,
        hook: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}
