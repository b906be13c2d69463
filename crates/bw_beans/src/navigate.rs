//! Walking a parsed path through an object graph.

use bw_reflect::info::TypeInfo;
use bw_reflect::ops::{ReflectKind, ReflectMut, ReflectRef};
use bw_reflect::{Reflect, ValueRef};

use crate::handle::{Access, GrowPolicy, PropertyHandle, denied, mismatch};
use crate::path::PropertyPath;
use crate::{AccessorConfig, ConversionService, PropertyErrorKind};

// -----------------------------------------------------------------------------
// Optional unwrapping

/// Looks through `Some(..)`, `None` for an absent value.
fn present(value: &dyn Reflect) -> Option<&dyn Reflect> {
    match value.reflect_ref() {
        ReflectRef::Optional(optional) => optional.value().and_then(present),
        _ => Some(value),
    }
}

fn present_mut(value: &mut dyn Reflect) -> Option<&mut dyn Reflect> {
    if value.reflect_kind() != ReflectKind::Optional {
        return Some(value);
    }
    match value.reflect_mut() {
        ReflectMut::Optional(optional) => optional.value_mut().and_then(present_mut),
        _ => None,
    }
}

fn present_owned(mut value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>> {
    if value.reflect_kind() != ReflectKind::Optional {
        return Some(value);
    }
    let inner = match value.reflect_mut() {
        ReflectMut::Optional(optional) => optional.take_value(),
        _ => None,
    };
    inner.and_then(present_owned)
}

/// Exposes the inner value of an optional, `None` when it is absent.
fn expose(value: ValueRef<'_>) -> Option<ValueRef<'_>> {
    match value {
        ValueRef::Borrowed(value) => present(value).map(ValueRef::Borrowed),
        ValueRef::Owned(value) => present_owned(value).map(ValueRef::Owned),
    }
}

/// The value an absent slot of type `info` is grown with.
///
/// Optional types grow into their present inner default.
fn grown_default(info: &TypeInfo) -> Option<Box<dyn Reflect>> {
    match info.as_wrapper() {
        Some(wrapper) if info.is_optional() => grown_default(wrapper.inner_info()),
        _ => info.construct_default(),
    }
}

// -----------------------------------------------------------------------------
// Navigator

/// Resolves, reads and writes one path at a time.
///
/// Nothing is cached between calls: every access resolves each segment again
/// against the value it currently reaches.
pub(crate) struct Navigator<'s> {
    pub config: &'s AccessorConfig,
    pub conversions: &'s ConversionService,
}

impl Navigator<'_> {
    fn grow_policy(&self) -> GrowPolicy {
        GrowPolicy {
            enabled: self.config.auto_grow_nested_paths,
            limit: self.config.auto_grow_collection_limit,
        }
    }

    // -------------------------------------------------------------------------
    // Read

    /// Reads the value at `path`.
    ///
    /// A final optional value is looked through; `Ok(None)` means it is
    /// absent, like a missing map entry. Never grows: absent intermediates fail with `NullIntermediateValue`.
    pub fn read<'a>(
        &self,
        root: &'a dyn Reflect,
        path: &PropertyPath<'_>,
    ) -> Result<Option<ValueRef<'a>>, PropertyErrorKind> {
        self.read_at(root, path, 0)
    }

    fn read_at<'a>(
        &self,
        target: &'a dyn Reflect,
        path: &PropertyPath<'_>,
        depth: usize,
    ) -> Result<Option<ValueRef<'a>>, PropertyErrorKind> {
        let segment = &path.segments()[depth];
        let handle = PropertyHandle::resolve(target.reflect_type_info(), segment.token(), Access::Read)?;
        log::trace!("read `{}` on `{}`", segment.token(), target.reflect_type_name());

        let value = handle.read(target)?;
        if depth + 1 == path.len() {
            return Ok(value.and_then(expose));
        }

        let absent = || PropertyErrorKind::NullIntermediateValue {
            nested_path: path.prefix(depth + 1),
        };
        match value.ok_or_else(absent)? {
            ValueRef::Borrowed(value) => {
                let inner = present(value).ok_or_else(absent)?;
                self.read_at(inner, path, depth + 1)
            }
            ValueRef::Owned(value) => {
                let inner = present(&*value).ok_or_else(absent)?;
                let Some(result) = self.read_at(inner, path, depth + 1)? else {
                    return Ok(None);
                };
                // The computed parent is dropped here, so the result must own its value.
                match result.into_owned() {
                    Some(result) => Ok(Some(ValueRef::Owned(result))),
                    None => Err(denied(
                        Access::Read,
                        &path.to_string(),
                        "value of a computed parent cannot be copied",
                    )),
                }
            }
        }
    }

    /// Resolves the last segment of `path` after reading through the others.
    pub fn locate<'p>(
        &self,
        target: &dyn Reflect,
        path: &PropertyPath<'p>,
        access: Access,
    ) -> Result<PropertyHandle<'p>, PropertyErrorKind> {
        self.locate_at(target, path, 0, access)
    }

    fn locate_at<'p>(
        &self,
        target: &dyn Reflect,
        path: &PropertyPath<'p>,
        depth: usize,
        access: Access,
    ) -> Result<PropertyHandle<'p>, PropertyErrorKind> {
        let token = path.segments()[depth].token();
        if depth + 1 == path.len() {
            return PropertyHandle::resolve(target.reflect_type_info(), token, access);
        }

        let handle = PropertyHandle::resolve(target.reflect_type_info(), token, Access::Read)?;
        let absent = || PropertyErrorKind::NullIntermediateValue {
            nested_path: path.prefix(depth + 1),
        };
        match handle.read(target)?.ok_or_else(absent)? {
            ValueRef::Borrowed(value) => {
                self.locate_at(present(value).ok_or_else(absent)?, path, depth + 1, access)
            }
            ValueRef::Owned(value) => {
                self.locate_at(present(&*value).ok_or_else(absent)?, path, depth + 1, access)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Write

    /// Writes the value in `slot` at `path`.
    ///
    /// The value is converted to the declared write type of the final slot.
    /// On failure `slot` holds the attempted value in its original form when
    /// it is still available.
    pub fn write(
        &self,
        root: &mut dyn Reflect,
        path: &PropertyPath<'_>,
        slot: &mut Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyErrorKind> {
        self.write_at(root, path, 0, slot)
    }

    fn write_at(
        &self,
        target: &mut dyn Reflect,
        path: &PropertyPath<'_>,
        depth: usize,
        slot: &mut Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyErrorKind> {
        let segment = &path.segments()[depth];
        let info = target.reflect_type_info();
        log::trace!("write through `{}` on `{}`", segment.token(), info.type_name());

        if depth + 1 == path.len() {
            let handle = PropertyHandle::resolve(info, segment.token(), Access::Write)?;
            return self.write_final(target, &handle, slot);
        }

        let handle = PropertyHandle::resolve(info, segment.token(), Access::Read)?;
        self.ensure_present(target, &handle, path, depth)?;

        match handle.read_mut(target)? {
            Some(child) => {
                let child = present_mut(child).ok_or_else(|| PropertyErrorKind::NullIntermediateValue {
                    nested_path: path.prefix(depth + 1),
                })?;
                self.write_at(child, path, depth + 1, slot)
            }
            None => self.write_through_copy(target, &handle, path, depth, slot),
        }
    }

    fn write_final(
        &self,
        target: &mut dyn Reflect,
        handle: &PropertyHandle<'_>,
        slot: &mut Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyErrorKind> {
        let Some(required) = handle.write_type() else {
            return Err(denied(Access::Write, &handle.name(), "property has no setter"));
        };
        let Some(value) = slot.take() else {
            return Err(denied(Access::Write, &handle.name(), "no value to write"));
        };

        // Conversion consumes the value; keep the caller's form for reporting.
        let original = if value.ty_id() == required.type_id() {
            None
        } else {
            value.reflect_clone()
        };
        let converted = match self.conversions.coerce(value, required) {
            Ok(converted) => converted,
            Err(value) => {
                let kind = mismatch(&*value, required);
                *slot = Some(value);
                return Err(kind);
            }
        };

        handle
            .write(target, converted, self.grow_policy())
            .map_err(|(kind, returned)| {
                *slot = original.or(returned);
                kind
            })
    }

    /// Grows the slot of an intermediate segment if it is absent and growing
    /// is enabled.
    fn ensure_present(
        &self,
        target: &mut dyn Reflect,
        handle: &PropertyHandle<'_>,
        path: &PropertyPath<'_>,
        depth: usize,
    ) -> Result<(), PropertyErrorKind> {
        let absent = match handle.read(target) {
            Ok(Some(value)) => present(&*value).is_none(),
            Ok(None) => true,
            Err(PropertyErrorKind::Bounds { .. })
                if matches!(handle, PropertyHandle::IndexedContainer { .. }) =>
            {
                true
            }
            Err(kind) => return Err(kind),
        };
        if !absent {
            return Ok(());
        }

        let nested_path = path.prefix(depth + 1);
        if !self.config.auto_grow_nested_paths {
            return Err(PropertyErrorKind::NullIntermediateValue { nested_path });
        }
        let Some(write_type) = handle.write_type() else {
            return Err(denied(Access::Write, &handle.name(), "absent value cannot be grown without a setter"));
        };
        let Some(value) = grown_default(write_type) else {
            log::debug!("cannot grow '{nested_path}': `{}` has no default", write_type.type_name());
            return Err(PropertyErrorKind::NullIntermediateValue { nested_path });
        };

        let value = self
            .conversions
            .coerce(value, write_type)
            .map_err(|value| mismatch(&*value, write_type))?;
        handle
            .write(target, value, self.grow_policy())
            .map_err(|(kind, _)| kind)?;
        log::debug!("grew '{nested_path}' with a default `{}`", write_type.type_name());
        Ok(())
    }

    /// Writes below a property without in-place access: copies its value,
    /// writes into the copy and stores the copy back through the setter.
    fn write_through_copy(
        &self,
        target: &mut dyn Reflect,
        handle: &PropertyHandle<'_>,
        path: &PropertyPath<'_>,
        depth: usize,
        slot: &mut Option<Box<dyn Reflect>>,
    ) -> Result<(), PropertyErrorKind> {
        let Some(write_type) = handle.write_type() else {
            return Err(denied(Access::Write, &handle.name(), "property has no setter"));
        };
        let Some(mut copy) = handle.read(target)?.and_then(ValueRef::into_owned) else {
            return Err(denied(Access::Write, &handle.name(), "value cannot be copied"));
        };

        let child = present_mut(&mut *copy).ok_or_else(|| PropertyErrorKind::NullIntermediateValue {
            nested_path: path.prefix(depth + 1),
        })?;
        self.write_at(child, path, depth + 1, slot)?;

        let copy = self
            .conversions
            .coerce(copy, write_type)
            .map_err(|copy| mismatch(&*copy, write_type))?;
        handle
            .write(target, copy, self.grow_policy())
            .map_err(|(kind, _)| kind)
    }
}
