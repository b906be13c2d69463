//! Items used by code generated from this crate's macros.

#[cfg(feature = "auto_register")]
pub use crate::convert::ConverterRegistration;
#[cfg(feature = "auto_register")]
pub use inventory;
