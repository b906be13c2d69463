// -----------------------------------------------------------------------------
// Modules

mod reflect;
mod value_ref;

// -----------------------------------------------------------------------------
// Exports

pub use reflect::Reflect;
pub use value_ref::ValueRef;
