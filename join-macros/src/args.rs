use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, Ident, MetaNameValue, Result, Token, Type, parse::Parse, parse::ParseStream};

/// 宏参数：`key = value` 列表，按键逐个取出，最后由 `finish` 拒绝未知键
pub(crate) struct MacroArgs {
    pairs: Vec<(Ident, Expr)>,
}

impl Parse for MacroArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut pairs: Vec<(Ident, Expr)> = Vec::new();
        if input.is_empty() {
            return Ok(Self { pairs });
        }

        let list: Punctuated<MetaNameValue, Token![,]> = Punctuated::parse_terminated(input)?;
        for nv in list {
            let Some(key) = nv.path.get_ident().cloned() else {
                return Err(syn::Error::new(nv.path.span(), "invalid attribute key"));
            };
            if pairs.iter().any(|(k, _)| *k == key) {
                return Err(syn::Error::new(
                    key.span(),
                    format!("duplicate key '{key}' in attribute"),
                ));
            }
            pairs.push((key, nv.value));
        }

        Ok(Self { pairs })
    }
}

impl MacroArgs {
    fn take(&mut self, key: &str) -> Option<Expr> {
        let pos = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(pos).1)
    }

    pub(crate) fn take_type(&mut self, key: &str) -> Result<Option<Type>> {
        match self.take(key) {
            Some(expr) => Ok(Some(syn::parse2(expr.to_token_stream())?)),
            None => Ok(None),
        }
    }

    pub(crate) fn take_ident(&mut self, key: &str) -> Result<Option<Ident>> {
        match self.take(key) {
            Some(Expr::Path(p)) if p.path.get_ident().is_some() => Ok(p.path.get_ident().cloned()),
            Some(other) => Err(syn::Error::new(
                other.span(),
                format!("expected identifier for '{key}'"),
            )),
            None => Ok(None),
        }
    }

    pub(crate) fn take_bool(&mut self, key: &str) -> Result<Option<bool>> {
        match self.take(key) {
            Some(Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Bool(b),
                ..
            })) => Ok(Some(b.value())),
            Some(other) => Err(syn::Error::new(
                other.span(),
                format!("expected boolean literal for '{key}'"),
            )),
            None => Ok(None),
        }
    }

    /// 剩余未识别的键报错，`expected` 用于提示
    pub(crate) fn finish(self, expected: &str) -> Result<()> {
        match self.pairs.into_iter().next() {
            Some((key, _)) => Err(syn::Error::new(
                key.span(),
                format!("unknown key in attribute; expected {expected}"),
            )),
            None => Ok(()),
        }
    }
}
