//! Hash containers built on *hashbrown* and *foldhash*.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

/// A [`hashbrown::HashMap`] hashed with [`FixedHashState`] unless told otherwise.
///
/// # Examples
///
/// ```
/// use bw_utils::hash::HashMap;
///
/// let mut ages: HashMap<&str, u32> = HashMap::default();
/// ages.insert("tony", 27);
/// assert_eq!(ages.get("tony"), Some(&27));
/// ```
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] hashed with [`FixedHashState`] unless told otherwise.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
