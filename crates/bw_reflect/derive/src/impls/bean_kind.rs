use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::Path;

use super::trait_reflect::flag_tokens;
use super::trait_typed::default_tokens;
use super::{ReflectBody, impl_trait_reflect, impl_trait_typed};
use crate::derive_data::{BeanProperty, Getter, MutAccess, ReflectBean, Setter};
use crate::path;

/// Generates `Typed`, `Reflect` and `Bean` for a struct with named fields.
pub(crate) fn impl_bean(info: &ReflectBean) -> TokenStream {
    let meta = &info.meta;
    let typed_impl = impl_trait_typed(meta, type_info_tokens(info));

    let (clone, partial_eq, debug) = flag_tokens(meta);
    let reflect_impl = impl_trait_reflect(
        meta,
        ReflectBody {
            kind: quote!(Bean),
            clone,
            partial_eq,
            debug,
        },
    );

    let bean_impl = impl_trait_bean(info);

    quote! {
        #typed_impl

        #reflect_impl

        #bean_impl
    }
}

// -----------------------------------------------------------------------------
// Type Info

fn type_info_tokens(info: &ReflectBean) -> TokenStream {
    let bw_reflect_path = &info.meta.bw_reflect_path;
    let type_info_ = path::type_info_(bw_reflect_path);
    let type_kind_ = path::type_kind_(bw_reflect_path);
    let bean_info_ = path::bean_info_(bw_reflect_path);
    let property_info_ = path::property_info_(bw_reflect_path);
    let field_info_ = path::field_info_(bw_reflect_path);

    let properties = info.properties.iter().map(|property| {
        let name = &property.name;
        let getter = property.read_ty.as_ref().map(|ty| quote!(.with_getter::<#ty>()));
        let setter = property.write_ty.as_ref().map(|ty| quote!(.with_setter::<#ty>()));
        let in_place = property.getter_mut.as_ref().map(|_| quote!(.with_in_place_access()));
        let fallible_getter = matches!(property.getter, Some(Getter::Fallible(_)))
            .then(|| quote!(.with_fallible_getter()));
        let fallible_setter = matches!(property.setter, Some(Setter::Fallible(_)))
            .then(|| quote!(.with_fallible_setter()));
        quote! {
            #property_info_::new(#name)
                #getter
                #setter
                #in_place
                #fallible_getter
                #fallible_setter
        }
    });

    let fields = info.fields.iter().map(|field| {
        let name = &field.name;
        let ty = &field.ty;
        quote!(#field_info_::new::<#ty>(#name))
    });

    let with_default = default_tokens(&info.meta);

    quote! {
        #type_info_::new::<Self>(#type_kind_::Bean(#bean_info_::new(
            ::std::vec![#(#properties),*],
            ::std::vec![#(#fields),*],
        )))
        #with_default
    }
}

// -----------------------------------------------------------------------------
// Bean

/// `Self::method(self, ..)` for a bare method name, `path(self, ..)` otherwise.
fn call(method: &Path, args: TokenStream) -> TokenStream {
    match method.get_ident() {
        Some(ident) => quote!(Self::#ident(self, #args)),
        None => quote!(#method(self, #args)),
    }
}

fn read_arm(property: &BeanProperty, paths: &BeanPaths) -> Option<TokenStream> {
    let BeanPaths {
        value_ref_,
        accessor_error_,
        ..
    } = paths;
    let name = &property.name;
    let body = match property.getter.as_ref()? {
        Getter::Field(member) => quote! {
            ::core::result::Result::Ok(#value_ref_::Borrowed(&self.#member))
        },
        Getter::Borrowed(method) => {
            let call = call(method, TokenStream::new());
            quote!(::core::result::Result::Ok(#value_ref_::Borrowed(#call)))
        }
        Getter::Owned(method) => {
            let call = call(method, TokenStream::new());
            quote!(::core::result::Result::Ok(#value_ref_::Owned(::std::boxed::Box::new(#call))))
        }
        Getter::Fallible(method) => {
            let call = call(method, TokenStream::new());
            quote! {
                match #call {
                    ::core::result::Result::Ok(value) => {
                        ::core::result::Result::Ok(#value_ref_::Borrowed(value))
                    }
                    ::core::result::Result::Err(err) => ::core::result::Result::Err(
                        #accessor_error_::new(::std::string::ToString::to_string(&err)),
                    ),
                }
            }
        }
    };
    Some(quote!(#name => ::core::option::Option::Some(#body),))
}

fn property_mut_arm(property: &BeanProperty, paths: &BeanPaths) -> Option<TokenStream> {
    let reflect_ = &paths.reflect_;
    let name = &property.name;
    let body = match property.getter_mut.as_ref()? {
        MutAccess::Field(member) => quote!(&mut self.#member),
        MutAccess::Method(method) => call(method, TokenStream::new()),
    };
    Some(quote!(#name => ::core::option::Option::Some(#body as &mut dyn #reflect_),))
}

fn write_arm(property: &BeanProperty, paths: &BeanPaths) -> Option<TokenStream> {
    let BeanPaths {
        write_error_,
        accessor_error_,
        ..
    } = paths;
    let name = &property.name;
    let setter = property.setter.as_ref()?;
    let ty = property.write_ty.as_ref()?;

    let take = quote! {
        let value = value.take::<#ty>().map_err(#write_error_::Rejected)?;
    };
    let body = match setter {
        Setter::Field(member) => quote! {
            #take
            self.#member = value;
            ::core::result::Result::Ok(())
        },
        Setter::Plain(method) => {
            let call = call(method, quote!(value));
            quote! {
                #take
                #call;
                ::core::result::Result::Ok(())
            }
        }
        Setter::Fallible(method) => {
            let call = call(method, quote!(value));
            quote! {
                #take
                #call.map_err(|err| {
                    #write_error_::Failed(#accessor_error_::new(::std::string::ToString::to_string(&err)))
                })
            }
        }
    };
    Some(quote!(#name => { #body }))
}

struct BeanPaths {
    reflect_: TokenStream,
    value_ref_: TokenStream,
    accessor_error_: TokenStream,
    write_error_: TokenStream,
}

fn impl_trait_bean(info: &ReflectBean) -> TokenStream {
    let meta = &info.meta;
    let bw_reflect_path = &meta.bw_reflect_path;
    let paths = BeanPaths {
        reflect_: path::reflect_(bw_reflect_path),
        value_ref_: path::value_ref_(bw_reflect_path),
        accessor_error_: path::accessor_error_(bw_reflect_path),
        write_error_: path::write_error_(bw_reflect_path),
    };
    let bean_ = path::bean_(bw_reflect_path);
    let BeanPaths {
        reflect_,
        value_ref_,
        accessor_error_,
        write_error_,
    } = &paths;

    let read_arms = info.properties.iter().filter_map(|p| read_arm(p, &paths));
    let mut_arms = info.properties.iter().filter_map(|p| property_mut_arm(p, &paths));
    let write_arms = info.properties.iter().filter_map(|p| write_arm(p, &paths));

    let field_names = info.fields.iter().map(|field| &field.name).collect::<Vec<_>>();
    let field_members = info
        .fields
        .iter()
        .map(|field| field.member.to_token_stream())
        .collect::<Vec<_>>();

    let ident = meta.ident;
    let (impl_generics, ty_generics, where_clause) = meta.impl_generics();

    quote! {
        impl #impl_generics #bean_ for #ident #ty_generics #where_clause {
            fn read_property(
                &self,
                name: &str,
            ) -> ::core::option::Option<::core::result::Result<#value_ref_<'_>, #accessor_error_>> {
                match name {
                    #(#read_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn property_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn #reflect_> {
                match name {
                    #(#mut_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn write_property(
                &mut self,
                name: &str,
                value: ::std::boxed::Box<dyn #reflect_>,
            ) -> ::core::result::Result<(), #write_error_> {
                match name {
                    #(#write_arms)*
                    _ => ::core::result::Result::Err(#write_error_::Rejected(value)),
                }
            }

            fn field(&self, name: &str) -> ::core::option::Option<&dyn #reflect_> {
                match name {
                    #(#field_names => ::core::option::Option::Some(&self.#field_members as &dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn #reflect_> {
                match name {
                    #(#field_names => ::core::option::Option::Some(&mut self.#field_members as &mut dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
