//! Static type information.
//!
//! - [`TypeInfo`]: identity, names, [`TypeKind`], optional default constructor and
//!   string parser of one type. Built once per type and cached for the rest of the
//!   process.
//! - [`TypeKind`]: the kind-specific part:
//!     - [`BeanInfo`]: ordered [`PropertyInfo`]s (accessor pairs) and [`FieldInfo`]s
//!       (plain fields reachable only by name).
//!     - [`MapInfo`]: value type of a string-keyed map.
//!     - [`ListInfo`]: item type and growability of a list.
//!     - [`WrapperInfo`]: inner type of `Option<T>` and `Box<T>`, plus how to wrap it.
//! - [`Typed`]: static access to a type's [`TypeInfo`].
//!
//! Declared types are stored as `fn() -> &'static TypeInfo` so that
//! self-referential beans (`spouse: Option<Box<Person>>`) resolve lazily.

// -----------------------------------------------------------------------------
// Modules

mod bean_info;
mod container_info;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use bean_info::{BeanInfo, FieldInfo, PropertyInfo};
pub use container_info::{ListInfo, MapInfo, WrapperInfo};
pub use type_info::{DefaultFn, ParseFn, TypeInfo, TypeKind, short_type_name};
pub use typed::Typed;
