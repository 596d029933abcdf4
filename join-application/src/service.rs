use crate::{context::AppContext, error::AppError, resource::Resource};
use async_trait::async_trait;
use join_domain::entity::Entity;

/// 实体服务：后端 REST 契约
///
/// - `create` 只接收新建变体，后端分配标识；
/// - `update`/`partial_update` 只接收已持久化实体；
/// - 实现可基于 HTTP 或内存，均以 `Arc<dyn EntityService<R>>` 注入使用。
#[async_trait]
pub trait EntityService<R: Resource>: Send + Sync {
    async fn create(&self, ctx: &AppContext, entity: R::New) -> Result<R, AppError>;

    async fn update(&self, ctx: &AppContext, entity: R) -> Result<R, AppError>;

    /// 仅更新非空字段（merge-patch）
    async fn partial_update(&self, ctx: &AppContext, entity: R) -> Result<R, AppError>;

    async fn find(&self, ctx: &AppContext, id: &<R as Entity>::Id) -> Result<Option<R>, AppError>;

    async fn query(&self, ctx: &AppContext, page: &PageRequest) -> Result<Vec<R>, AppError>;

    async fn delete(&self, ctx: &AppContext, id: &<R as Entity>::Id) -> Result<(), AppError>;
}

/// 分页与排序参数，对应 `?page=&size=&sort=`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    /// 形如 `"id,asc"`
    pub sort: Vec<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: vec!["id,asc".into()],
        }
    }
}

impl PageRequest {
    pub fn of_size(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        pairs.extend(self.sort.iter().map(|s| ("sort", s.clone())));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_repeat_sort() {
        let page = PageRequest {
            page: 2,
            size: 10,
            sort: vec!["nome,asc".into(), "id,desc".into()],
        };
        assert_eq!(
            page.query_pairs(),
            vec![
                ("page", "2".to_string()),
                ("size", "10".to_string()),
                ("sort", "nome,asc".to_string()),
                ("sort", "id,desc".to_string()),
            ]
        );
    }
}
