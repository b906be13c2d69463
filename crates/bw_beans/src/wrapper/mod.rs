//! [`BeanWrapper`]: property access on one borrowed object graph.

mod config;

#[cfg(test)]
mod tests;

pub use config::{AccessorConfig, DEFAULT_AUTO_GROW_COLLECTION_LIMIT};

use core::fmt;
use std::sync::Arc;

use bw_reflect::info::{TypeInfo, Typed};
use bw_reflect::{Reflect, ValueRef};

use crate::batch::{BatchOptions, PropertyBatchUpdateBuilder, PropertyValue};
use crate::handle::{Access, PropertyHandle, denied, mismatch};
use crate::navigate::Navigator;
use crate::path::{PathError, PropertyPath};
use crate::{ConversionService, PropertyAccessError, PropertyBatchUpdateError, PropertyErrorKind};

// -----------------------------------------------------------------------------
// BeanWrapper

/// Reads and writes properties of a borrowed object by path.
///
/// Paths name properties separated by `.`, with `[index]` for lists and
/// `[key]` for maps: `spouse.friends[0].someMap['a.b']`. Written values are
/// converted to the declared type of the target property through the
/// [`ConversionService`].
///
/// The wrapper never owns its target. Nothing is cached between calls.
///
/// # Examples
///
/// ```
/// use bw_beans::BeanWrapper;
/// use bw_reflect::derive::Reflect;
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Person {
///     name: String,
///     age: u32,
///     spouse: Option<Box<Person>>,
/// }
///
/// let mut person = Person::default();
/// let mut wrapper = BeanWrapper::new(&mut person);
///
/// wrapper.set_property_value("age", String::from("32")).unwrap();
/// assert!(wrapper.set_property_value("spouse.name", "kerry").is_err());
///
/// wrapper.set_auto_grow_nested_paths(true);
/// wrapper.set_property_value("spouse.name", "kerry").unwrap();
///
/// let name = wrapper.get_property_value_as::<String>("spouse.name").unwrap();
/// assert_eq!(name.as_deref(), Some("kerry"));
/// assert_eq!(person.age, 32);
/// ```
pub struct BeanWrapper<'t> {
    target: &'t mut dyn Reflect,
    config: AccessorConfig,
    conversions: Arc<ConversionService>,
}

impl<'t> BeanWrapper<'t> {
    /// Wraps `target` with the default configuration and the shared
    /// conversion service.
    #[inline]
    pub fn new(target: &'t mut dyn Reflect) -> Self {
        Self::with_config(target, AccessorConfig::default())
    }

    pub fn with_config(target: &'t mut dyn Reflect, config: AccessorConfig) -> Self {
        Self {
            target,
            config,
            conversions: ConversionService::shared(),
        }
    }

    // -------------------------------------------------------------------------
    // Configuration

    #[inline]
    pub fn config(&self) -> &AccessorConfig {
        &self.config
    }

    #[inline]
    pub fn set_auto_grow_nested_paths(&mut self, enabled: bool) {
        self.config.auto_grow_nested_paths = enabled;
    }

    #[inline]
    pub fn is_auto_grow_nested_paths(&self) -> bool {
        self.config.auto_grow_nested_paths
    }

    #[inline]
    pub fn set_auto_grow_collection_limit(&mut self, limit: usize) {
        self.config.auto_grow_collection_limit = limit;
    }

    #[inline]
    pub fn auto_grow_collection_limit(&self) -> usize {
        self.config.auto_grow_collection_limit
    }

    #[inline]
    pub fn set_extract_old_value_for_editor(&mut self, enabled: bool) {
        self.config.extract_old_value_for_editor = enabled;
    }

    #[inline]
    pub fn is_extract_old_value_for_editor(&self) -> bool {
        self.config.extract_old_value_for_editor
    }

    #[inline]
    pub fn set_conversion_service(&mut self, conversions: Arc<ConversionService>) {
        self.conversions = conversions;
    }

    #[inline]
    pub fn conversion_service(&self) -> &Arc<ConversionService> {
        &self.conversions
    }

    // -------------------------------------------------------------------------
    // Target

    #[inline]
    pub fn wrapped_instance(&self) -> &dyn Reflect {
        &*self.target
    }

    #[inline]
    pub fn wrapped_instance_mut(&mut self) -> &mut dyn Reflect {
        &mut *self.target
    }

    /// Type name of the wrapped object, as reported in errors.
    #[inline]
    pub fn bean_type(&self) -> &'static str {
        self.target.reflect_type_name()
    }

    /// Names of the properties and fields of the wrapped object, in
    /// declaration order.
    pub fn property_names(&self) -> Vec<&'static str> {
        match self.target.reflect_type_info().as_bean() {
            Some(bean) => bean.names().collect(),
            None => Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Introspection

    /// Returns `true` if `path` names a property with a getter.
    ///
    /// Absent intermediates and malformed paths count as not readable.
    pub fn is_readable_property(&self, path: &str) -> bool {
        self.locate(path, Access::Read)
            .is_some_and(|handle| handle.is_readable())
    }

    /// Returns `true` if `path` names a property with a setter.
    ///
    /// Absent intermediates and malformed paths count as not writable.
    pub fn is_writable_property(&self, path: &str) -> bool {
        self.locate(path, Access::Write)
            .is_some_and(|handle| handle.is_writable())
    }

    /// Declared type of the property at `path`: the getter type, or the
    /// setter type for write-only properties.
    pub fn property_type(&self, path: &str) -> Option<&'static TypeInfo> {
        self.locate(path, Access::Read)?.property_type()
    }

    fn locate<'p>(&self, path: &'p str, access: Access) -> Option<PropertyHandle<'p>> {
        let parsed = PropertyPath::parse(path).ok()?;
        self.navigator().locate(&*self.target, &parsed, access).ok()
    }

    // -------------------------------------------------------------------------
    // Read

    /// Reads the value at `path`.
    ///
    /// Optional values are looked through: `Ok(None)` means the value, or the
    /// map entry, is absent.
    pub fn get_property_value(&self, path: &str) -> Result<Option<ValueRef<'_>>, PropertyAccessError> {
        let parsed = PropertyPath::parse(path).map_err(|err| self.malformed(path, err))?;
        self.navigator()
            .read(&*self.target, &parsed)
            .map_err(|kind| PropertyAccessError::new(path, self.bean_type(), kind))
    }

    /// Reads the value at `path` and converts a copy of it to `T`.
    pub fn get_property_value_as<T: Typed>(&self, path: &str) -> Result<Option<T>, PropertyAccessError> {
        let Some(value) = self.get_property_value(path)? else {
            return Ok(None);
        };
        let Some(value) = value.into_owned() else {
            let kind = denied(Access::Read, path, "value cannot be copied");
            return Err(PropertyAccessError::new(path, self.bean_type(), kind));
        };

        let required = T::type_info();
        let converted = self.conversions.coerce(value, required).and_then(|value| value.take::<T>());
        match converted {
            Ok(value) => Ok(Some(value)),
            Err(value) => {
                let kind = mismatch(&*value, required);
                Err(PropertyAccessError::new(path, self.bean_type(), kind).with_value(Some(value)))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Write

    /// Writes `value` at `path`, converting it to the declared type.
    ///
    /// On failure the property is left unchanged and the error carries the
    /// value as given.
    #[inline]
    pub fn set_property_value(&mut self, path: &str, value: impl Reflect) -> Result<(), PropertyAccessError> {
        self.set_property_value_boxed(path, Box::new(value))
    }

    pub fn set_property_value_boxed(
        &mut self,
        path: &str,
        value: Box<dyn Reflect>,
    ) -> Result<(), PropertyAccessError> {
        let parsed = match PropertyPath::parse(path) {
            Ok(parsed) => parsed,
            Err(err) => return Err(self.malformed(path, err).with_value(Some(value))),
        };
        let old_value = self.extract_old_value(&parsed);
        let bean_type = self.bean_type();

        let mut slot = Some(value);
        let navigator = Navigator {
            config: &self.config,
            conversions: &self.conversions,
        };
        navigator
            .write(&mut *self.target, &parsed, &mut slot)
            .map_err(|kind| {
                PropertyAccessError::new(path, bean_type, kind)
                    .with_value(slot.take())
                    .with_old_value(old_value)
            })
    }

    /// Writes every value in order, collecting failures.
    ///
    /// A failure does not stop the batch and applied values are kept.
    #[inline]
    pub fn set_property_values(
        &mut self,
        values: impl IntoIterator<Item = PropertyValue>,
    ) -> Result<(), PropertyBatchUpdateError> {
        self.set_property_values_with(values, BatchOptions::default())
    }

    /// [`set_property_values`](Self::set_property_values), skipping the
    /// failures selected by `options`.
    pub fn set_property_values_with(
        &mut self,
        values: impl IntoIterator<Item = PropertyValue>,
        options: BatchOptions,
    ) -> Result<(), PropertyBatchUpdateError> {
        let mut failures = PropertyBatchUpdateBuilder::new();
        for property_value in values {
            let (path, value) = property_value.into_parts();
            match self.set_property_value_boxed(&path, value) {
                Ok(()) => {}
                Err(err) if options.ignores(&err) => log::trace!("ignored failure: {err}"),
                Err(err) => failures.push(err),
            }
        }
        failures.build()
    }

    // -------------------------------------------------------------------------
    // Internals

    fn navigator(&self) -> Navigator<'_> {
        Navigator {
            config: &self.config,
            conversions: &self.conversions,
        }
    }

    fn malformed(&self, path: &str, err: PathError) -> PropertyAccessError {
        let kind = PropertyErrorKind::MalformedPath {
            offset: err.offset,
            reason: err.reason,
        };
        PropertyAccessError::new(path, self.bean_type(), kind)
    }

    fn extract_old_value(&self, path: &PropertyPath<'_>) -> Option<Box<dyn Reflect>> {
        if !self.config.extract_old_value_for_editor {
            return None;
        }
        match self.navigator().read(&*self.target, path) {
            Ok(value) => value.and_then(ValueRef::into_owned),
            Err(err) => {
                log::debug!("could not read the old value of '{path}': {err}");
                None
            }
        }
    }
}

impl fmt::Debug for BeanWrapper<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanWrapper")
            .field("bean_type", &self.bean_type())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
