//! See [`Reflect`](derive_reflect).

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements `Typed` and `Reflect`, plus `Bean` for
/// structs with named fields.
///
/// | input                        | kind     |
/// |------------------------------|----------|
/// | `struct T { .. }`            | `Bean`   |
/// | `struct T;`                  | `Opaque` |
/// | `enum T { A, B }` (unit only)| `Opaque`, parsed from variant names |
///
/// Tuple structs and enums with data are rejected.
///
/// ## Properties
///
/// Each named field becomes a readable, writable property under its own name.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(rename_all = "camelCase")]
/// struct Person {
///     first_name: String,          // property `firstName`
///     #[reflect(rename = "years")]
///     age: u32,                    // property `years`
///     #[reflect(read_only)]
///     id: u64,                     // getter only
///     #[reflect(field)]
///     cache: Vec<u8>,              // plain field, not a property
///     #[reflect(skip)]
///     secret: String,              // invisible
/// }
/// ```
///
/// ## Accessor Properties
///
/// Properties backed by methods are declared on the type:
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(accessor(name = "touchy", ty = String, get = touchy, try_set = set_touchy))]
/// #[reflect(accessor(name = "size", ty = usize, get_owned = size))]
/// struct Bean { /* ... */ }
/// ```
///
/// Available keys:
///
/// - `name = "..."`: property name, required.
/// - `ty = T`: getter type.
/// - `set_ty = T`: setter type, defaults to `ty`.
/// - `get = m`: `fn m(&self) -> &T`.
/// - `get_owned = m`: `fn m(&self) -> T`.
/// - `try_get = m`: `fn m(&self) -> Result<&T, E>` where `E: Display`.
/// - `get_mut = m`: `fn m(&mut self) -> &mut T`, enables nested writes.
/// - `set = m`: `fn m(&mut self, value: T)`.
/// - `try_set = m`: `fn m(&mut self, value: T) -> Result<(), E>` where `E: Display`.
///
/// A single identifier names an inherent method, a longer path is called as a
/// free function taking the bean first.
///
/// ## Flags
///
/// The macro cannot see which standard traits a type implements. Declare them
/// so the generated code can use them:
///
/// - `default`: the type info can construct a default instance.
/// - `clone`: `reflect_clone` returns a copy instead of `None`.
/// - `partial_eq`: `reflect_partial_eq` compares.
/// - `debug`: `reflect_debug` uses `Debug` instead of listing properties.
///
/// Unit enums always support cloning, comparing and formatting by variant.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflect_impls(ast)
}
