use crate::service::{EntityService, PageRequest};
use crate::{context::AppContext, error::AppError, resource::Resource};
use async_trait::async_trait;
use dashmap::DashMap;
use join_domain::entity::{Entity, NewEntity};
use join_domain::error::DomainError;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use validator::Validate;

/// 基于内存的实体服务
/// - 通过 DashMap 按标识保存实体，标识由自增序列分配
/// - 与后端一致：保存前校验必填字段，更新不存在的实体返回 NotFound
/// - 可注入失败（`fail_next_saves`/`fail_queries`），便于测试错误分支
pub struct InMemoryEntityService<R: Resource> {
    store: DashMap<<R as Entity>::Id, R>,
    next_id: AtomicI64,
    failing_saves: AtomicUsize,
    failing_queries: AtomicBool,
    calls: DashMap<&'static str, usize>,
}

impl<R: Resource> Default for InMemoryEntityService<R> {
    fn default() -> Self {
        Self {
            store: DashMap::new(),
            next_id: AtomicI64::new(1),
            failing_saves: AtomicUsize::new(0),
            failing_queries: AtomicBool::new(false),
            calls: DashMap::new(),
        }
    }
}

impl<R> InMemoryEntityService<R>
where
    R: Resource,
    <R as Entity>::Id: From<i64> + Into<i64> + Ord,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已有实体预置存储，序列从最大标识之后继续
    pub fn with_entities<I: IntoIterator<Item = R>>(entities: I) -> Self {
        let service = Self::default();
        for entity in entities {
            let raw: i64 = entity.id().clone().into();
            service
                .next_id
                .fetch_max(raw.saturating_add(1), Ordering::SeqCst);
            service.store.insert(entity.id().clone(), entity);
        }
        service
    }

    /// 之后的 `n` 次保存（create/update/partial_update）返回 500
    pub fn fail_next_saves(&self, n: usize) {
        self.failing_saves.store(n, Ordering::SeqCst);
    }

    /// 查询是否返回 500
    pub fn fail_queries(&self, failing: bool) {
        self.failing_queries.store(failing, Ordering::SeqCst);
    }

    /// 某操作被调用的次数（`"create"`、`"update"`、`"query"` 等）
    pub fn calls(&self, op: &str) -> usize {
        self.calls.get(op).map(|c| *c).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn get(&self, id: &<R as Entity>::Id) -> Option<R> {
        self.store.get(id).map(|e| e.value().clone())
    }

    fn record(&self, op: &'static str) {
        *self.calls.entry(op).or_insert(0) += 1;
    }

    fn injected_save_failure(&self) -> Result<(), AppError> {
        let took = self
            .failing_saves
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if took {
            return Err(AppError::Http {
                status: 500,
                body: format!("injected failure saving {}", R::NAME),
            });
        }
        Ok(())
    }

    fn ensure_exists(&self, id: &<R as Entity>::Id) -> Result<(), AppError> {
        if self.store.contains_key(id) {
            return Ok(());
        }
        Err(Self::not_found(id))
    }

    fn not_found(id: &<R as Entity>::Id) -> AppError {
        DomainError::NotFound {
            entity: R::NAME,
            id: id.to_string(),
        }
        .into()
    }
}

#[async_trait]
impl<R> EntityService<R> for InMemoryEntityService<R>
where
    R: Resource,
    <R as Entity>::Id: From<i64> + Into<i64> + Ord,
{
    async fn create(&self, _ctx: &AppContext, entity: R::New) -> Result<R, AppError> {
        self.record("create");
        self.injected_save_failure()?;
        entity.validate()?;

        let id = <R as Entity>::Id::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        let saved = entity.with_id(id.clone());
        self.store.insert(id, saved.clone());
        tracing::debug!(resource = R::NAME, id = %saved.id(), "created");
        Ok(saved)
    }

    async fn update(&self, _ctx: &AppContext, entity: R) -> Result<R, AppError> {
        self.record("update");
        self.injected_save_failure()?;
        entity.validate()?;
        self.ensure_exists(entity.id())?;

        self.store.insert(entity.id().clone(), entity.clone());
        tracing::debug!(resource = R::NAME, id = %entity.id(), "updated");
        Ok(entity)
    }

    async fn partial_update(&self, _ctx: &AppContext, entity: R) -> Result<R, AppError> {
        self.record("partial_update");
        self.injected_save_failure()?;

        // merge-patch：以 JSON 合并非空字段
        let mut current = match self.store.get(entity.id()) {
            Some(existing) => serde_json::to_value(existing.value())?,
            None => return Err(Self::not_found(entity.id())),
        };
        let patch = serde_json::to_value(&entity)?;
        if let (Some(target), Some(fields)) = (current.as_object_mut(), patch.as_object()) {
            for (key, value) in fields.iter().filter(|(_, v)| !v.is_null()) {
                target.insert(key.clone(), value.clone());
            }
        }
        let merged: R = serde_json::from_value(current)?;
        self.store.insert(merged.id().clone(), merged.clone());
        Ok(merged)
    }

    async fn find(&self, _ctx: &AppContext, id: &<R as Entity>::Id) -> Result<Option<R>, AppError> {
        self.record("find");
        Ok(self.get(id))
    }

    async fn query(&self, _ctx: &AppContext, page: &PageRequest) -> Result<Vec<R>, AppError> {
        self.record("query");
        if self.failing_queries.load(Ordering::SeqCst) {
            return Err(AppError::Http {
                status: 500,
                body: format!("injected failure querying {}", R::NAME),
            });
        }

        let mut all: Vec<R> = self.store.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        let skip = page.page as usize * page.size as usize;
        Ok(all.into_iter().skip(skip).take(page.size as usize).collect())
    }

    async fn delete(&self, _ctx: &AppContext, id: &<R as Entity>::Id) -> Result<(), AppError> {
        self.record("delete");
        self.store.remove(id);
        Ok(())
    }
}
