use crate::model::CategoriaRef;
use crate::related::Identified;
use join_macros::{entity, entity_id};
use validator::Validate;

#[entity_id]
pub struct ProdutoId(i64);

/// 产品
///
/// `nome`、`quantidade` 与后端约束一致为必填；`categoria` 在后端可空。
#[entity(id = ProdutoId, new = NewProduto)]
#[derive(Validate)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    #[validate(required)]
    pub nome: Option<String>,
    #[validate(required)]
    pub quantidade: Option<i32>,
    /// 所属分类，仅保留 `{id, nome}` 投影
    pub categoria: Option<CategoriaRef>,
}

impl Identified for Produto {
    type Key = ProdutoId;

    fn identifier(&self) -> &Self::Key {
        &self.id
    }
}
