use crate::related::Identified;
use join_macros::{entity, entity_id, value_object};
use validator::Validate;

#[entity_id]
pub struct CategoriaId(i64);

/// 分类
#[entity(id = CategoriaId, new = NewCategoria)]
#[derive(Validate)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    #[validate(required)]
    pub nome: Option<String>,
}

/// 关联到分类的最小投影（外键 + 显示名）
#[value_object(default = false)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaRef {
    pub id: CategoriaId,
    #[serde(default)]
    pub nome: Option<String>,
}

impl From<&Categoria> for CategoriaRef {
    fn from(categoria: &Categoria) -> Self {
        Self {
            id: categoria.id,
            nome: categoria.nome.clone(),
        }
    }
}

impl From<Categoria> for CategoriaRef {
    fn from(categoria: Categoria) -> Self {
        Self {
            id: categoria.id,
            nome: categoria.nome,
        }
    }
}

impl From<CategoriaRef> for Categoria {
    fn from(reference: CategoriaRef) -> Self {
        Self {
            id: reference.id,
            nome: reference.nome,
        }
    }
}

impl Identified for Categoria {
    type Key = CategoriaId;

    fn identifier(&self) -> &Self::Key {
        &self.id
    }
}

impl Identified for CategoriaRef {
    type Key = CategoriaId;

    fn identifier(&self) -> &Self::Key {
        &self.id
    }
}
