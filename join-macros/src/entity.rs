use crate::args::MacroArgs;
use crate::utils::{apply_derives, ensure_leading_field, is_named};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, ItemStruct, parse_macro_input};

/// #[entity] 宏实现
/// - 若缺失则追加字段 `id: IdType` 并置于字段最前
/// - 自动实现 `::join_domain::entity::Entity`
/// - `new = Ident` 时生成同形的未持久化变体：`id` 为 `NullId`（序列化为 null），
///   并实现 `::join_domain::entity::NewEntity`。其余字段需实现 `Default`。
/// - `debug = false` 时不派生 Debug
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = parse_macro_input!(attr as MacroArgs);
    let input = parse_macro_input!(item as Item);

    let cfg = match EntityConfig::from_args(&mut args) {
        Ok(cfg) => cfg,
        Err(err) => return err.to_compile_error().into(),
    };
    if let Err(err) = args.finish("'id' | 'new' | 'debug'") {
        return err.to_compile_error().into();
    }

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let id_type = cfg
        .id_ty
        .unwrap_or_else(|| syn::parse_quote! { ::core::primitive::i64 });

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };
    ensure_leading_field(fields_named, "id", &id_type);

    // 在合并 derive 之前取出，新建变体有自己的派生集合
    let new_variant = cfg.new_ident.map(|ident| new_variant(&st, ident, cfg.derive_debug));

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.derive_debug {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let out_struct = st;
    let ident = &out_struct.ident;
    let (impl_generics, ty_generics, where_clause) = out_struct.generics.split_for_impl();

    let expanded = quote! {
        #out_struct

        impl #impl_generics ::join_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            fn id(&self) -> &Self::Id { &self.id }
        }

        #new_variant
    };

    TokenStream::from(expanded)
}

fn new_variant(
    persisted: &ItemStruct,
    new_ident: syn::Ident,
    derive_debug: bool,
) -> proc_macro2::TokenStream {
    let persisted_ident = &persisted.ident;
    let vis = &persisted.vis;

    let business: Vec<&syn::Field> = persisted
        .fields
        .iter()
        .filter(|f| !is_named(f, "id"))
        .collect();
    let names: Vec<&syn::Ident> = business.iter().filter_map(|f| f.ident.as_ref()).collect();

    // 文档注释属于持久化实体，只保留 serde 等其余属性
    let mut attrs: Vec<syn::Attribute> = persisted
        .attrs
        .iter()
        .filter(|a| !a.path().is_ident("doc"))
        .cloned()
        .collect();
    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(Default),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if derive_debug {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut attrs, required);

    let doc = format!(" 尚未持久化的 [`{persisted_ident}`]，`id` 恒为 null。");

    quote! {
        #[doc = #doc]
        #(#attrs)*
        #vis struct #new_ident {
            #[serde(default)]
            pub id: ::join_domain::entity::NullId,
            #( #business, )*
        }

        impl ::join_domain::entity::NewEntity for #new_ident {
            type Persisted = #persisted_ident;

            fn with_id(
                self,
                id: <Self::Persisted as ::join_domain::entity::Entity>::Id,
            ) -> Self::Persisted {
                #persisted_ident { id, #( #names: self.#names, )* }
            }

            fn from_persisted(entity: Self::Persisted) -> Self {
                Self { id: ::join_domain::entity::NullId, #( #names: entity.#names, )* }
            }
        }
    }
}

struct EntityConfig {
    id_ty: Option<syn::Type>,
    new_ident: Option<syn::Ident>,
    derive_debug: bool,
}

impl EntityConfig {
    fn from_args(args: &mut MacroArgs) -> syn::Result<Self> {
        Ok(Self {
            id_ty: args.take_type("id")?,
            new_ident: args.take_ident("new")?,
            derive_debug: args.take_bool("debug")?.unwrap_or(true),
        })
    }
}
