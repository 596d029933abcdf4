//! join 领域模型的属性宏
//!
//! - `#[entity]`：持久化实体，保证 `id` 字段位于最前并实现 `Entity`，可选生成“新建”变体；
//! - `#[entity_id]`：单字段 tuple struct 形式的标识类型；
//! - `#[value_object]`：以值相等为准的投影/值对象。
//!
use proc_macro::TokenStream;

mod args;
mod entity;
mod entity_id;
mod utils;
mod value_object;

/// 实体宏
/// - 若缺失则追加 `id: IdType` 字段并置于最前；
/// - 自动实现 `::join_domain::entity::Entity`；
/// - 参数：`#[entity(id = IdType, new = NewIdent, debug = true|false)]`，
///   `new` 存在时额外生成 `id` 恒为 null 的未持久化变体。
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 实体 ID 宏
/// 用于 `struct ProdutoId(i64);` 这类单字段 tuple struct，生成派生、`Display`、`FromStr` 与互转。
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 值对象宏
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
