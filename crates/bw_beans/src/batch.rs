//! Batch updates: several paths written in one call.

use bw_reflect::Reflect;

use crate::{PropertyAccessError, PropertyBatchUpdateError};

// -----------------------------------------------------------------------------
// PropertyValue

/// One path and the value to write there.
#[derive(Debug)]
pub struct PropertyValue {
    name: String,
    value: Box<dyn Reflect>,
}

impl PropertyValue {
    #[inline]
    pub fn new(name: impl Into<String>, value: impl Reflect) -> Self {
        Self::from_boxed(name, Box::new(value))
    }

    #[inline]
    pub fn from_boxed(name: impl Into<String>, value: Box<dyn Reflect>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The property path.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &dyn Reflect {
        &*self.value
    }

    #[inline]
    pub fn into_parts(self) -> (String, Box<dyn Reflect>) {
        (self.name, self.value)
    }
}

// -----------------------------------------------------------------------------
// PropertyValues

/// An ordered set of [`PropertyValue`]s, one per path.
///
/// Adding a path that is already present replaces its value in place, so the
/// path keeps its original position.
///
/// ```
/// use bw_beans::PropertyValues;
///
/// let values = PropertyValues::new()
///     .with("name", String::from("tony"))
///     .with("age", 32_i32)
///     .with("name", String::from("kerry"));
///
/// let names: Vec<_> = values.iter().map(|pv| pv.name()).collect();
/// assert_eq!(names, ["name", "age"]);
///
/// let name = values.get("name").unwrap().value();
/// assert_eq!(name.downcast_ref::<String>().map(String::as_str), Some("kerry"));
/// ```
#[derive(Debug, Default)]
pub struct PropertyValues {
    values: Vec<PropertyValue>,
}

impl PropertyValues {
    #[inline]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Adds a value, replacing the one stored under the same path.
    pub fn add(&mut self, value: PropertyValue) -> &mut Self {
        match self.values.iter_mut().find(|pv| pv.name == value.name) {
            Some(slot) => *slot = value,
            None => self.values.push(value),
        }
        self
    }

    /// Builder form of [`add`](Self::add).
    #[inline]
    pub fn with(mut self, name: impl Into<String>, value: impl Reflect) -> Self {
        self.add(PropertyValue::new(name, value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.iter().find(|pv| pv.name == name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        let index = self.values.iter().position(|pv| pv.name == name)?;
        Some(self.values.remove(index))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, PropertyValue> {
        self.values.iter()
    }
}

impl IntoIterator for PropertyValues {
    type Item = PropertyValue;
    type IntoIter = std::vec::IntoIter<PropertyValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertyValues {
    type Item = &'a PropertyValue;
    type IntoIter = core::slice::Iter<'a, PropertyValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl FromIterator<PropertyValue> for PropertyValues {
    fn from_iter<I: IntoIterator<Item = PropertyValue>>(iter: I) -> Self {
        let mut values = Self::new();
        for value in iter {
            values.add(value);
        }
        values
    }
}

// -----------------------------------------------------------------------------
// BatchOptions

/// Which failures a batch update skips instead of reporting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Skip paths naming properties that do not exist or lack the needed accessor.
    pub ignore_unknown: bool,
    /// Skip malformed paths, out-of-bounds indices and absent intermediates.
    pub ignore_invalid: bool,
}

impl BatchOptions {
    pub(crate) fn ignores(&self, error: &PropertyAccessError) -> bool {
        let kind = error.kind();
        (self.ignore_unknown && kind.is_unknown_property())
            || (self.ignore_invalid && kind.is_invalid_path())
    }
}

// -----------------------------------------------------------------------------
// PropertyBatchUpdateBuilder

/// Collects the failures of a batch update.
///
/// [`build`](Self::build) seals them into one [`PropertyBatchUpdateError`],
/// or succeeds when nothing failed.
///
/// ```
/// use bw_beans::{PropertyAccessError, PropertyBatchUpdateBuilder, PropertyErrorKind};
///
/// let mut builder = PropertyBatchUpdateBuilder::new();
/// assert!(builder.is_empty());
///
/// builder.push(PropertyAccessError::new(
///     "age",
///     "TestBean",
///     PropertyErrorKind::Bounds { index: 3, len: 1 },
/// ));
/// let err = builder.build().unwrap_err();
/// assert_eq!(err.failure_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PropertyBatchUpdateBuilder {
    failures: Vec<PropertyAccessError>,
}

impl PropertyBatchUpdateBuilder {
    #[inline]
    pub const fn new() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, failure: PropertyAccessError) {
        self.failures.push(failure);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn build(self) -> Result<(), PropertyBatchUpdateError> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(PropertyBatchUpdateError::new(self.failures))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BatchOptions, PropertyValue, PropertyValues};
    use crate::{PropertyAccessError, PropertyErrorKind};

    #[test]
    fn values_keep_first_position() {
        let mut values = PropertyValues::new();
        values
            .add(PropertyValue::new("a", 1_i32))
            .add(PropertyValue::new("b", 2_i32))
            .add(PropertyValue::new("a", 3_i32));

        assert_eq!(values.len(), 2);
        let (name, value) = values.remove("a").unwrap().into_parts();
        assert_eq!(name, "a");
        assert_eq!(value.take::<i32>().ok(), Some(3));
        assert!(!values.contains("a"));
        assert!(values.contains("b"));
    }

    #[test]
    fn options_select_kinds() {
        let unknown = PropertyAccessError::new(
            "nope",
            "TestBean",
            PropertyErrorKind::NotWritable {
                property: "nope".into(),
                possible_matches: Vec::new(),
                reason: None,
            },
        );
        let absent = PropertyAccessError::new(
            "spouse.name",
            "TestBean",
            PropertyErrorKind::NullIntermediateValue {
                nested_path: "spouse".into(),
            },
        );
        let mismatch = PropertyAccessError::new(
            "age",
            "TestBean",
            PropertyErrorKind::TypeMismatch {
                value_type: "String".into(),
                required_type: "i32".into(),
            },
        );

        let options = BatchOptions {
            ignore_unknown: true,
            ignore_invalid: false,
        };
        assert!(options.ignores(&unknown));
        assert!(!options.ignores(&absent));

        let options = BatchOptions {
            ignore_unknown: true,
            ignore_invalid: true,
        };
        assert!(options.ignores(&absent));
        assert!(!options.ignores(&mismatch));
        assert!(!BatchOptions::default().ignores(&unknown));
    }
}
