//! Conversions between the primitive number types.
//!
//! Integers convert when the value fits the target. Floats convert to integers
//! only when they hold a whole number in range, and integers convert to floats
//! only when the float represents them exactly.

use core::any::TypeId;

use bw_reflect::Reflect;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i128),
    Float(f64),
}

fn as_number(value: &dyn Reflect) -> Option<Number> {
    macro_rules! read {
        ($($int:ty),*; $($float:ty),*) => {
            $(if let Some(v) = value.downcast_ref::<$int>() {
                return i128::try_from(*v).ok().map(Number::Int);
            })*
            $(if let Some(v) = value.downcast_ref::<$float>() {
                return Some(Number::Float(f64::from(*v)));
            })*
        };
    }

    read!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize; f32, f64);
    None
}

fn float_to_int(value: f64) -> Option<i128> {
    // `as` saturates, so a round trip detects both fractions and overflow.
    let int = value as i128;
    (value.is_finite() && int as f64 == value).then_some(int)
}

fn make(number: Number, target: TypeId) -> Option<Box<dyn Reflect>> {
    macro_rules! build {
        ($($int:ty),*) => {
            $(if target == TypeId::of::<$int>() {
                let int = match number {
                    Number::Int(int) => int,
                    Number::Float(float) => float_to_int(float)?,
                };
                return <$int>::try_from(int).ok().map(|v| Box::new(v) as Box<dyn Reflect>);
            })*
        };
    }

    build!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

    if target == TypeId::of::<f64>() {
        let float = match number {
            Number::Int(int) => {
                let float = int as f64;
                (float as i128 == int).then_some(float)?
            }
            Number::Float(float) => float,
        };
        return Some(Box::new(float) as Box<dyn Reflect>);
    }
    if target == TypeId::of::<f32>() {
        let float = match number {
            Number::Int(int) => {
                let float = int as f32;
                (float as i128 == int).then_some(float)?
            }
            Number::Float(float) if float.is_finite() && float.abs() > f64::from(f32::MAX) => {
                return None;
            }
            Number::Float(float) => float as f32,
        };
        return Some(Box::new(float) as Box<dyn Reflect>);
    }
    None
}

/// Converts `value` to the number type `target`, `None` if either side is not
/// a number or the value does not fit.
pub(super) fn convert(value: &dyn Reflect, target: TypeId) -> Option<Box<dyn Reflect>> {
    make(as_number(value)?, target)
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::convert;

    fn to<T: 'static + Copy>(value: &dyn bw_reflect::Reflect) -> Option<T> {
        convert(value, TypeId::of::<T>()).and_then(|v| v.downcast_ref::<T>().copied())
    }

    #[test]
    fn integers() {
        assert_eq!(to::<i64>(&42_i32), Some(42));
        assert_eq!(to::<u8>(&255_i64), Some(255));
        assert_eq!(to::<u8>(&256_i64), None);
        assert_eq!(to::<u32>(&-1_i32), None);
        assert_eq!(to::<i128>(&u64::MAX), Some(i128::from(u64::MAX)));
        assert_eq!(to::<i64>(&u128::MAX), None);
    }

    #[test]
    fn floats() {
        assert_eq!(to::<i32>(&3.0_f64), Some(3));
        assert_eq!(to::<i32>(&3.5_f64), None);
        assert_eq!(to::<i32>(&f64::NAN), None);
        assert_eq!(to::<f64>(&7_u16), Some(7.0));
        assert_eq!(to::<f32>(&1.5_f64), Some(1.5));
        assert_eq!(to::<f32>(&1e300_f64), None);
        assert_eq!(to::<f32>(&16_777_217_i32), None);
    }

    #[test]
    fn non_numbers() {
        assert!(convert(&true, TypeId::of::<i32>()).is_none());
        assert!(convert(&1_i32, TypeId::of::<bool>()).is_none());
    }
}
