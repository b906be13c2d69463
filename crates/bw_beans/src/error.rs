use core::fmt;

use bw_reflect::Reflect;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Kinds

/// Why a single property access failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PropertyErrorKind {
    #[error("malformed property path at byte {offset}: {reason}")]
    MalformedPath { offset: usize, reason: &'static str },

    #[error(
        "Bean property '{property}' is not readable or has an invalid getter{}{}",
        Note(.reason),
        DidYouMean(.possible_matches)
    )]
    NotReadable {
        property: String,
        possible_matches: Vec<String>,
        reason: Option<String>,
    },

    #[error(
        "Bean property '{property}' is not writable or has an invalid setter{}{}",
        Note(.reason),
        DidYouMean(.possible_matches)
    )]
    NotWritable {
        property: String,
        possible_matches: Vec<String>,
        reason: Option<String>,
    },

    #[error("index {index} is out of bounds for length {len}")]
    Bounds { index: usize, len: usize },

    #[error("value of nested property '{nested_path}' is absent")]
    NullIntermediateValue { nested_path: String },

    /// The attempted value itself is kept on the [`PropertyAccessError`].
    #[error("failed to convert value of type '{value_type}' to required type '{required_type}'")]
    TypeMismatch {
        value_type: String,
        required_type: String,
    },

    #[error("accessor failed: {reason}")]
    AccessorFailed { reason: String },
}

impl PropertyErrorKind {
    /// Suggested property names, empty for kinds that carry none.
    pub fn possible_matches(&self) -> &[String] {
        match self {
            Self::NotReadable {
                possible_matches, ..
            }
            | Self::NotWritable {
                possible_matches, ..
            } => possible_matches,
            _ => &[],
        }
    }

    /// The property does not exist or lacks the needed accessor.
    #[inline]
    pub fn is_unknown_property(&self) -> bool {
        matches!(self, Self::NotReadable { .. } | Self::NotWritable { .. })
    }

    /// The path cannot be followed on the current graph.
    #[inline]
    pub fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            Self::MalformedPath { .. } | Self::Bounds { .. } | Self::NullIntermediateValue { .. }
        )
    }
}

struct Note<'a>(&'a Option<String>);

impl fmt::Display for Note<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(reason) => write!(f, " ({reason})"),
            None => Ok(()),
        }
    }
}

struct DidYouMean<'a>(&'a [String]);

impl fmt::Display for DidYouMean<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => Ok(()),
            [only] => write!(f, ". Did you mean '{only}'?"),
            [first, rest @ ..] => {
                write!(f, ". Did you mean one of '{first}'")?;
                for name in rest {
                    write!(f, ", '{name}'")?;
                }
                f.write_str("?")
            }
        }
    }
}

// -----------------------------------------------------------------------------
// PropertyAccessError

/// A failed read or write of one property path.
///
/// Besides the [kind](PropertyErrorKind), the error keeps the value the caller
/// tried to write, exactly as given, and the value the property held before
/// (when old-value extraction is enabled).
#[derive(Debug, Error)]
#[error("Invalid property '{path}' of bean type [{bean_type}]: {kind}")]
pub struct PropertyAccessError {
    path: String,
    bean_type: &'static str,
    kind: PropertyErrorKind,
    value: Option<Box<dyn Reflect>>,
    old_value: Option<Box<dyn Reflect>>,
}

impl PropertyAccessError {
    pub fn new(path: impl Into<String>, bean_type: &'static str, kind: PropertyErrorKind) -> Self {
        Self {
            path: path.into(),
            bean_type,
            kind,
            value: None,
            old_value: None,
        }
    }

    #[inline]
    pub fn with_value(mut self, value: Option<Box<dyn Reflect>>) -> Self {
        self.value = value;
        self
    }

    #[inline]
    pub fn with_old_value(mut self, old_value: Option<Box<dyn Reflect>>) -> Self {
        self.old_value = old_value;
        self
    }

    /// The full path as passed by the caller.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Type name of the wrapped root object.
    #[inline]
    pub fn bean_type(&self) -> &'static str {
        self.bean_type
    }

    #[inline]
    pub fn kind(&self) -> &PropertyErrorKind {
        &self.kind
    }

    #[inline]
    pub fn possible_matches(&self) -> &[String] {
        self.kind.possible_matches()
    }

    /// The attempted value, unconverted.
    #[inline]
    pub fn value(&self) -> Option<&dyn Reflect> {
        self.value.as_deref()
    }

    #[inline]
    pub fn old_value(&self) -> Option<&dyn Reflect> {
        self.old_value.as_deref()
    }

    /// Gives the attempted value back to the caller.
    #[inline]
    pub fn into_value(self) -> Option<Box<dyn Reflect>> {
        self.value
    }
}

// -----------------------------------------------------------------------------
// PropertyBatchUpdateError

/// Every failure of a batch update, in input order.
///
/// Updates that succeeded stay applied.
#[derive(Debug, Error)]
#[error("Failed properties: {}", Summary(.failures))]
pub struct PropertyBatchUpdateError {
    failures: Vec<PropertyAccessError>,
}

struct Summary<'a>(&'a [PropertyAccessError]);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, failure) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl PropertyBatchUpdateError {
    /// Only the batch builder creates this error, and never with an empty list.
    #[inline]
    pub(crate) fn new(failures: Vec<PropertyAccessError>) -> Self {
        debug_assert!(!failures.is_empty());
        Self { failures }
    }

    #[inline]
    pub fn failures(&self) -> &[PropertyAccessError] {
        &self.failures
    }

    #[inline]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// The first failure recorded for `path`.
    pub fn failure_for(&self, path: &str) -> Option<&PropertyAccessError> {
        self.failures.iter().find(|failure| failure.path() == path)
    }

    #[inline]
    pub fn into_failures(self) -> Vec<PropertyAccessError> {
        self.failures
    }
}

// -----------------------------------------------------------------------------
// BeansError

/// Any error of this crate, for callers that mix single and batch operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BeansError {
    #[error(transparent)]
    Property(#[from] PropertyAccessError),

    #[error(transparent)]
    BatchUpdate(#[from] PropertyBatchUpdateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_writable_message_lists_matches() {
        let kind = PropertyErrorKind::NotWritable {
            property: "mystring".into(),
            possible_matches: vec!["myString".into(), "myStriNg".into()],
            reason: None,
        };
        let err = PropertyAccessError::new("mystring", "IntelliBean", kind);
        assert_eq!(
            err.to_string(),
            "Invalid property 'mystring' of bean type [IntelliBean]: Bean property 'mystring' \
             is not writable or has an invalid setter. Did you mean one of 'myString', 'myStriNg'?"
        );
        assert_eq!(err.possible_matches().len(), 2);
    }

    #[test]
    fn batch_error_joins_failures() {
        let first = PropertyAccessError::new(
            "age",
            "TestBean",
            PropertyErrorKind::TypeMismatch {
                value_type: "String".into(),
                required_type: "i32".into(),
            },
        )
        .with_value(Some(Box::new(String::from("foobar"))));
        let second = PropertyAccessError::new(
            "spouse.name",
            "TestBean",
            PropertyErrorKind::NullIntermediateValue {
                nested_path: "spouse".into(),
            },
        );

        let err = PropertyBatchUpdateError::new(vec![first, second]);
        assert_eq!(err.failure_count(), 2);
        assert!(err.failure_for("spouse.name").is_some());
        assert!(err.failure_for("name").is_none());

        let value = err.failure_for("age").and_then(PropertyAccessError::value).unwrap();
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("foobar"));
        assert!(err.to_string().contains("; Invalid property 'spouse.name'"));

        let err = BeansError::from(err);
        assert!(matches!(err, BeansError::BatchUpdate(_)));
    }
}
