use crate::args::MacroArgs;
use crate::utils::apply_derives;
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, parse_macro_input};

/// #[entity_id] 宏实现
/// 仅支持单字段 tuple struct，并为包装类型：
/// - 合并/追加派生：Debug, Clone, (Copy 可控), Default, PartialEq, Eq, PartialOrd, Ord, Hash,
///   Serialize, Deserialize，序列化透明（`ProdutoId(7)` <-> `7`）
/// - 提供 new(value)、get()、Display、FromStr、From 等便捷实现
/// - 参数：`#[entity_id(copy = true|false)]`，默认 true
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = parse_macro_input!(attr as MacroArgs);
    let copy = match args.take_bool("copy") {
        Ok(v) => v.unwrap_or(true),
        Err(err) => return err.to_compile_error().into(),
    };
    if let Err(err) = args.finish("'copy'") {
        return err.to_compile_error().into();
    }

    let input = parse_macro_input!(item as Item);
    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity_id] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let inner_ty = match &st.fields {
        syn::Fields::Unnamed(f) if f.unnamed.len() == 1 => f.unnamed[0].ty.clone(),
        syn::Fields::Unnamed(f) => {
            return syn::Error::new(
                f.span(),
                "#[entity_id] requires a tuple struct with exactly one field",
            )
            .to_compile_error()
            .into();
        }
        _ => {
            return syn::Error::new(
                st.span(),
                "#[entity_id] supports only tuple struct, e.g., struct X(i64);",
            )
            .to_compile_error()
            .into();
        }
    };

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Debug),
        syn::parse_quote!(Clone),
        syn::parse_quote!(Default),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
        syn::parse_quote!(PartialOrd),
        syn::parse_quote!(Ord),
        syn::parse_quote!(Hash),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if copy {
        required.insert(2, syn::parse_quote!(Copy));
    }
    apply_derives(&mut st.attrs, required);
    st.attrs.push(syn::parse_quote!(#[serde(transparent)]));

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let getter = if copy {
        quote! { pub const fn get(&self) -> #inner_ty { self.0 } }
    } else {
        quote! { pub fn get(&self) -> &#inner_ty { &self.0 } }
    };

    let out = quote! {
        #st

        impl #impl_generics #ident #ty_generics #where_clause {
            pub const fn new(value: #inner_ty) -> Self { Self(value) }

            #getter
        }

        impl #impl_generics ::std::str::FromStr for #ident #ty_generics #where_clause
        where #inner_ty: ::std::str::FromStr
        {
            type Err = <#inner_ty as ::std::str::FromStr>::Err;
            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let inner: #inner_ty = s.trim().parse()?;
                ::std::result::Result::Ok(Self(inner))
            }
        }

        impl #impl_generics ::std::fmt::Display for #ident #ty_generics #where_clause
        where #inner_ty: ::std::fmt::Display
        {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl #impl_generics ::core::convert::From<#inner_ty> for #ident #ty_generics #where_clause {
            fn from(value: #inner_ty) -> Self { Self(value) }
        }

        impl #impl_generics ::core::convert::From<#ident #ty_generics> for #inner_ty #where_clause {
            fn from(value: #ident #ty_generics) -> Self { value.0 }
        }
    };

    TokenStream::from(out)
}
