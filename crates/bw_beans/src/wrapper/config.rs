/// Default for [`AccessorConfig::auto_grow_collection_limit`].
pub const DEFAULT_AUTO_GROW_COLLECTION_LIMIT: usize = 256;

/// Behaviour switches of a [`BeanWrapper`](crate::BeanWrapper).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorConfig {
    /// Fill absent intermediates with default values when writing.
    pub auto_grow_nested_paths: bool,
    /// Lists are never grown to this many items or more.
    pub auto_grow_collection_limit: usize,
    /// Read the current value before each write so failures can report it.
    pub extract_old_value_for_editor: bool,
}

impl Default for AccessorConfig {
    fn default() -> Self {
        Self {
            auto_grow_nested_paths: false,
            auto_grow_collection_limit: DEFAULT_AUTO_GROW_COLLECTION_LIMIT,
            extract_old_value_for_editor: false,
        }
    }
}
