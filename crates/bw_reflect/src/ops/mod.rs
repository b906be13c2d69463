//! Capability views of reflected values.
//!
//! - [`Bean`]: named properties backed by accessor pairs, plus plain fields.
//! - [`Map`]: string-keyed associative containers.
//! - [`List`]: indexed containers, growable or fixed-length.
//! - [`Optional`]: a value that may be absent.
//!
//! [`ReflectRef`] and [`ReflectMut`] select the view of a value; opaque values
//! have no view and are handled as a whole.

// -----------------------------------------------------------------------------
// Modules

mod bean_ops;
mod kind;
mod list_ops;
mod map_ops;
mod optional_ops;

// -----------------------------------------------------------------------------
// Exports

pub use bean_ops::{AccessorError, Bean, WriteError};
pub(crate) use bean_ops::bean_debug;
pub use kind::{ReflectKind, ReflectMut, ReflectRef};
pub use list_ops::List;
pub use map_ops::Map;
pub use optional_ops::Optional;
