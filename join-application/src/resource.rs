use join_domain::entity::{Entity, NewEntity};
use join_domain::{Categoria, NewCategoria, NewProduto, Produto};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use validator::Validate;

/// 后端 REST 资源
///
/// 将实体与其在后端的资源路径绑定，服务实现据此拼接 URL 与日志。
/// - `NAME`：实体的稳定名称，用于日志与错误信息（如 `"produto"`）；
/// - `PATH`：`/api/` 之后的资源段（如 `"produtos"`）。
pub trait Resource:
    Entity + Validate + Serialize + DeserializeOwned + Clone + Debug + 'static
{
    const NAME: &'static str;
    const PATH: &'static str;

    /// 该资源的未持久化变体
    type New: NewEntity<Persisted = Self>
        + Validate
        + Serialize
        + DeserializeOwned
        + Clone
        + Debug
        + 'static;
}

impl Resource for Produto {
    const NAME: &'static str = "produto";
    const PATH: &'static str = "produtos";
    type New = NewProduto;
}

impl Resource for Categoria {
    const NAME: &'static str = "categoria";
    const PATH: &'static str = "categorias";
    type New = NewCategoria;
}
