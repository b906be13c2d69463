#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod batch;
mod convert;
mod error;
mod handle;
mod matches;
mod navigate;
mod path;
mod wrapper;

#[cfg(test)]
mod test_beans;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use batch::{BatchOptions, PropertyBatchUpdateBuilder, PropertyValue, PropertyValues};
pub use convert::ConversionService;
pub use error::{BeansError, PropertyAccessError, PropertyBatchUpdateError, PropertyErrorKind};
pub use matches::{MAX_DISTANCE, MIN_CONTAINED_LEN, PropertyMatches};
pub use path::{PathError, PathSegment, PathToken, PropertyPath};
pub use wrapper::{AccessorConfig, BeanWrapper, DEFAULT_AUTO_GROW_COLLECTION_LIMIT};

// -----------------------------------------------------------------------------
// Macros

/// Declares a converter that [`ConversionService::auto_register`] installs.
///
/// The shared service installs every declared converter when it is created.
/// Without the `auto_register` feature the declaration is ignored.
///
/// ```
/// use bw_beans::{ConversionService, submit_converter};
/// use bw_reflect::info::Typed;
///
/// submit_converter!(bool => u8, |flag: &bool| Some(u8::from(*flag)));
///
/// fn main() {
///     let service = ConversionService::shared();
///     let value = service.coerce(Box::new(true), u8::type_info()).unwrap();
///     assert_eq!(value.downcast_ref::<u8>(), Some(&1));
/// }
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! submit_converter {
    ($source:ty => $target:ty, $convert:expr $(,)?) => {
        const _: () = {
            fn __register(service: &mut $crate::ConversionService) {
                service.register::<$source, $target>($convert);
            }

            $crate::__macro_exports::inventory::submit! {
                $crate::__macro_exports::ConverterRegistration(__register)
            }
        };
    };
}

/// Declares a converter that [`ConversionService::auto_register`] installs.
///
/// The `auto_register` feature is disabled, so the declaration is ignored.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! submit_converter {
    ($source:ty => $target:ty, $convert:expr $(,)?) => {};
}
