use crate::args::MacroArgs;
use crate::utils::apply_derives;
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, parse_macro_input};

/// #[value_object] 宏实现
/// - 支持结构体（具名或 tuple）与枚举
/// - 合并/追加派生：Clone, (Debug 可控), (Default 可控), Serialize, Deserialize, PartialEq, Eq
/// - 参数：`#[value_object(debug = bool, default = bool)]`，均默认 true
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = parse_macro_input!(attr as MacroArgs);
    let mut input = parse_macro_input!(item as Item);

    let (derive_debug, derive_default) = match (args.take_bool("debug"), args.take_bool("default"))
    {
        (Ok(debug), Ok(default)) => (debug.unwrap_or(true), default.unwrap_or(true)),
        (Err(err), _) | (_, Err(err)) => return err.to_compile_error().into(),
    };
    if let Err(err) = args.finish("'debug' | 'default'") {
        return err.to_compile_error().into();
    }

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
    ];
    if derive_default {
        required.insert(0, syn::parse_quote!(Default));
    }
    if derive_debug {
        required.insert(0, syn::parse_quote!(Debug));
    }

    match &mut input {
        Item::Struct(st) => {
            apply_derives(&mut st.attrs, required);
            TokenStream::from(quote! { #st })
        }
        Item::Enum(en) => {
            apply_derives(&mut en.attrs, required);
            TokenStream::from(quote! { #en })
        }
        other => syn::Error::new(other.span(), "#[value_object] only supports struct or enum")
            .to_compile_error()
            .into(),
    }
}
