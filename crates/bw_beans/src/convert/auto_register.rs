//! Converters declared across the program with
//! [`submit_converter!`](crate::submit_converter).

use super::ConversionService;

/// An installer collected by `inventory`.
#[doc(hidden)]
pub struct ConverterRegistration(pub fn(&mut ConversionService));

inventory::collect!(ConverterRegistration);

pub(super) fn register_all(service: &mut ConversionService) {
    let mut count = 0_usize;
    for registration in inventory::iter::<ConverterRegistration> {
        (registration.0)(service);
        count += 1;
    }
    log::trace!("installed {count} submitted converters");
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use bw_reflect::info::Typed;

    use crate::ConversionService;

    crate::submit_converter!(char => u32, |c: &char| Some(u32::from(*c)));

    #[test]
    fn submitted_converters_are_installed() {
        let mut service = ConversionService::empty();
        assert!(!service.has_converter(TypeId::of::<char>(), TypeId::of::<u32>()));

        assert!(service.auto_register());
        assert!(service.has_converter(TypeId::of::<char>(), TypeId::of::<u32>()));

        let value = service.coerce(Box::new('a'), u32::type_info()).unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&97));
    }
}
