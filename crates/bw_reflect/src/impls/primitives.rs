use core::fmt;
use core::str::FromStr;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{TypeInfo, Typed};
use crate::ops::{ReflectKind, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Parsers

fn parse_trimmed<T: FromStr + Reflect>(text: &str) -> Option<Box<dyn Reflect>> {
    text.trim()
        .parse::<T>()
        .ok()
        .map(|value| Box::new(value) as Box<dyn Reflect>)
}

/// Parses the usual spellings of a boolean, ignoring case and surrounding
/// whitespace: `true`/`false`, `on`/`off`, `yes`/`no`, `1`/`0`.
///
/// ```
/// use bw_reflect::impls::parse_bool;
///
/// assert_eq!(parse_bool(" Yes "), Some(true));
/// assert_eq!(parse_bool("off"), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
pub fn parse_bool(text: &str) -> Option<bool> {
    const TRUE: [&str; 4] = ["true", "on", "yes", "1"];
    const FALSE: [&str; 4] = ["false", "off", "no", "0"];

    let text = text.trim();
    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        Some(true)
    } else if FALSE.iter().any(|f| f.eq_ignore_ascii_case(text)) {
        Some(false)
    } else {
        None
    }
}

fn parse_bool_value(text: &str) -> Option<Box<dyn Reflect>> {
    parse_bool(text).map(|value| Box::new(value) as Box<dyn Reflect>)
}

// A single character; surrounding whitespace is kept.
fn parse_char(text: &str) -> Option<Box<dyn Reflect>> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(Box::new(c) as Box<dyn Reflect>),
        _ => None,
    }
}

fn parse_string(text: &str) -> Option<Box<dyn Reflect>> {
    Some(Box::new(String::from(text)) as Box<dyn Reflect>)
}

// -----------------------------------------------------------------------------
// Opaque leaves

macro_rules! impl_reflect_opaque {
    ($($ty:ty $(=> $parse:expr)?),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::opaque::<Self>()
                        .with_default::<Self>()
                        $(.with_parser($parse))?
                })
            }
        }

        impl Reflect for $ty {
            #[inline]
            fn reflect_type_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> ReflectKind {
                ReflectKind::Opaque
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Opaque(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Opaque(self)
            }

            #[inline]
            fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
                Some(Box::new(self.clone()))
            }

            fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
                Some(other.downcast_ref::<Self>().is_some_and(|other| other == self))
            }

            fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    )*};
}

impl_reflect_opaque! {
    bool => parse_bool_value,
    char => parse_char,
    u8 => parse_trimmed::<u8>,
    u16 => parse_trimmed::<u16>,
    u32 => parse_trimmed::<u32>,
    u64 => parse_trimmed::<u64>,
    u128 => parse_trimmed::<u128>,
    usize => parse_trimmed::<usize>,
    i8 => parse_trimmed::<i8>,
    i16 => parse_trimmed::<i16>,
    i32 => parse_trimmed::<i32>,
    i64 => parse_trimmed::<i64>,
    i128 => parse_trimmed::<i128>,
    isize => parse_trimmed::<isize>,
    f32 => parse_trimmed::<f32>,
    f64 => parse_trimmed::<f64>,
    String => parse_string,
    &'static str,
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;

    #[test]
    fn parse_numbers_and_text() {
        let value = <u16 as Typed>::type_info().parse("\t80 ").unwrap();
        assert_eq!(value.downcast_ref::<u16>(), Some(&80));
        assert!(<u8 as Typed>::type_info().parse("300").is_none());
        assert!(<f64 as Typed>::type_info().parse("1.5").unwrap().is::<f64>());

        let text = <String as Typed>::type_info().parse(" keep ").unwrap();
        assert_eq!(text.downcast_ref::<String>().map(String::as_str), Some(" keep "));

        assert!(<char as Typed>::type_info().parse("ab").is_none());
        assert!(!<&'static str as Typed>::type_info().has_parser());
    }

    #[test]
    fn defaults_and_equality() {
        let zero = <i32 as Typed>::type_info().construct_default().unwrap();
        assert_eq!(zero.reflect_partial_eq(&0_i32), Some(true));
        assert_eq!(zero.reflect_partial_eq(&0_i64), Some(false));
        assert_eq!(format!("{:?}", 7_u8.as_reflect()), "7");
    }
}
