//! 领域模型
//!
//! 字段命名与后端 DTO 保持一致（`id`、`nome`、`quantidade`、`categoria`），
//! 业务字段均为可空：表单提取的原始值可能尚未填写，必填校验由表单层负责。
//!
mod categoria;
mod produto;

pub use categoria::{Categoria, CategoriaId, CategoriaRef, NewCategoria};
pub use produto::{NewProduto, Produto, ProdutoId};
