//! Reflection for standard types, and helpers for implementing it.
//!
//! - opaque leaves: `bool`, `char`, every integer and float type, `String`,
//!   `&'static str`. All of them except `&'static str` parse from text.
//! - `Option<T>`: [`Optional`](crate::ops::Optional).
//! - `Box<T>`: transparent, reflects as `T`.
//! - `Vec<T>` (growable) and `[T; N]` (fixed): [`List`](crate::ops::List).
//! - `HashMap<String, V, S>` and `BTreeMap<String, V>`: [`Map`](crate::ops::Map).
//!
//! [`NonGenericTypeInfoCell`] and [`GenericTypeInfoCell`] store type info for
//! [`Typed`](crate::info::Typed) implementations.

// -----------------------------------------------------------------------------
// Modules

mod boxed;
mod cell;
mod list;
mod map;
mod option;
mod primitives;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use primitives::parse_bool;

// -----------------------------------------------------------------------------
// Internal API

use core::fmt;

use crate::info::TypeInfo;
use crate::ops::{self, ReflectRef};

/// Formats a value through its capability view.
pub(crate) fn kind_debug(
    view: ReflectRef<'_>,
    info: &TypeInfo,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match view {
        ReflectRef::Bean(bean) => ops::bean_debug(bean, f),
        ReflectRef::Map(map) => {
            let mut out = f.debug_map();
            for (key, value) in map.iter() {
                out.entry(&key, &value);
            }
            out.finish()
        }
        ReflectRef::List(list) => {
            let mut out = f.debug_list();
            for item in (0..list.len()).filter_map(|index| list.get(index)) {
                out.entry(&item);
            }
            out.finish()
        }
        ReflectRef::Optional(optional) => match optional.value() {
            Some(value) => f.debug_tuple("Some").field(&value).finish(),
            None => f.write_str("None"),
        },
        ReflectRef::Opaque(_) => write!(f, "{}(..)", info.type_name()),
    }
}
