//! join 领域层（join-domain）
//!
//! 管理后台所操作的两个实体及其最小必要抽象：
//! - 实体（`entity`）：已持久化实体与“新建”变体（`id` 恒为 null）
//! - 模型（`model`）：`Produto`、`Categoria` 及关联投影 `CategoriaRef`
//! - 关联实体（`related`）：按标识比较与“缺失则追加”的选项列表合并
//! - 样例数据（`samples`，需开启 `samples` feature 或在测试中）
//!
//! 本 crate 不涉及传输与界面，仅定义数据形状与纯函数，
//! 表单、服务与路由由 `join-application` 提供。
//!
pub mod entity;
pub mod error;
pub mod model;
pub mod related;

#[cfg(any(test, feature = "samples"))]
pub mod samples;

pub use model::{Categoria, CategoriaId, CategoriaRef, NewCategoria, NewProduto, Produto, ProdutoId};

// 允许在本 crate 内部通过 ::join_domain 进行自引用，
// 以便过程宏生成的路径在本 crate 中也能解析。
extern crate self as join_domain;
