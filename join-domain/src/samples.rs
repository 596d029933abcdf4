//! 测试样例数据
//!
//! 与后台生成器产出的样例保持一致，供表单、服务与流程测试复用。
//!
use crate::entity::NullId;
use crate::model::{Categoria, CategoriaId, NewCategoria, NewProduto, Produto, ProdutoId};

pub mod produto {
    use super::*;

    pub fn sample_with_required_data() -> Produto {
        Produto {
            id: ProdutoId::new(79836),
            nome: Some("Extended end-to-end Aço".into()),
            quantidade: Some(6106),
            categoria: None,
        }
    }

    pub fn sample_with_partial_data() -> Produto {
        Produto {
            id: ProdutoId::new(87796),
            nome: Some("SMTP Loan".into()),
            quantidade: Some(8772),
            categoria: None,
        }
    }

    pub fn sample_with_full_data() -> Produto {
        Produto {
            id: ProdutoId::new(86117),
            nome: Some("Borders".into()),
            quantidade: Some(26810),
            categoria: None,
        }
    }

    pub fn sample_with_new_data() -> NewProduto {
        NewProduto {
            id: NullId,
            nome: Some("Rústico Licenciado".into()),
            quantidade: Some(35096),
            categoria: None,
        }
    }
}

pub mod categoria {
    use super::*;

    pub fn sample_with_required_data() -> Categoria {
        Categoria {
            id: CategoriaId::new(34642),
            nome: Some("deposit".into()),
        }
    }

    pub fn sample_with_partial_data() -> Categoria {
        Categoria {
            id: CategoriaId::new(13342),
            nome: Some("web".into()),
        }
    }

    pub fn sample_with_full_data() -> Categoria {
        Categoria {
            id: CategoriaId::new(23485),
            nome: Some("embrace jade".into()),
        }
    }

    pub fn sample_with_new_data() -> NewCategoria {
        NewCategoria {
            id: NullId,
            nome: Some("Account".into()),
        }
    }
}
