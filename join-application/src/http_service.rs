//! 基于 HTTP 的实体服务
//!
//! 使用 [`reqwest`] 访问后端的资源端点：
//! `POST /api/{path}`、`PUT|PATCH|GET|DELETE /api/{path}/{id}`、`GET /api/{path}?page&size&sort`。

use crate::config::ClientConfig;
use crate::service::{EntityService, PageRequest};
use crate::{context::AppContext, error::AppError, resource::Resource};
use async_trait::async_trait;
use join_domain::entity::Entity;
use reqwest::{Method, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

const CORRELATION_HEADER: &str = "X-Correlation-Id";
const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// 单个资源的 HTTP 客户端
pub struct HttpEntityService<R> {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> HttpEntityService<R> {
    /// 按配置创建独立的客户端
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    /// 复用已有 [`reqwest::Client`]（多个资源共享连接池）
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            _resource: PhantomData,
        }
    }

    pub fn resource_url(&self) -> String {
        format!("{}/api/{}", self.base_url, R::PATH)
    }

    fn entity_url(&self, id: &<R as Entity>::Id) -> String {
        format!("{}/{}", self.resource_url(), id)
    }

    fn request(&self, ctx: &AppContext, method: Method, url: String) -> RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(correlation_id) = ctx.correlation_id() {
            builder = builder.header(CORRELATION_HEADER, correlation_id);
        }
        builder
    }

    // ---- private helpers ----

    /// 非 2xx 时读取响应体，转换为 [`AppError::Http`]
    async fn ensure_success(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        tracing::warn!(resource = R::NAME, status = status.as_u16(), %body, "REST request failed");
        Err(AppError::Http {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl<R: Resource> EntityService<R> for HttpEntityService<R> {
    async fn create(&self, ctx: &AppContext, entity: R::New) -> Result<R, AppError> {
        tracing::debug!(resource = R::NAME, ?entity, "REST request to save");
        let response = self
            .request(ctx, Method::POST, self.resource_url())
            .json(&entity)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update(&self, ctx: &AppContext, entity: R) -> Result<R, AppError> {
        tracing::debug!(resource = R::NAME, id = %entity.id(), "REST request to update");
        let response = self
            .request(ctx, Method::PUT, self.entity_url(entity.id()))
            .json(&entity)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn partial_update(&self, ctx: &AppContext, entity: R) -> Result<R, AppError> {
        tracing::debug!(resource = R::NAME, id = %entity.id(), "REST request to partial update");
        let body = serde_json::to_vec(&entity)?;
        let response = self
            .request(ctx, Method::PATCH, self.entity_url(entity.id()))
            .header(header::CONTENT_TYPE, MERGE_PATCH_JSON)
            .body(body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn find(&self, ctx: &AppContext, id: &<R as Entity>::Id) -> Result<Option<R>, AppError> {
        tracing::debug!(resource = R::NAME, %id, "REST request to get");
        let response = self
            .request(ctx, Method::GET, self.entity_url(id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::parse_response(response).await.map(Some)
    }

    async fn query(&self, ctx: &AppContext, page: &PageRequest) -> Result<Vec<R>, AppError> {
        tracing::debug!(
            resource = R::NAME,
            page = page.page,
            size = page.size,
            "REST request to get a page"
        );
        let response = self
            .request(ctx, Method::GET, self.resource_url())
            .query(&page.query_pairs())
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete(&self, ctx: &AppContext, id: &<R as Entity>::Id) -> Result<(), AppError> {
        tracing::debug!(resource = R::NAME, %id, "REST request to delete");
        let response = self
            .request(ctx, Method::DELETE, self.entity_url(id))
            .send()
            .await?;
        Self::ensure_success(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use join_domain::{Categoria, Produto};

    #[test]
    fn urls_follow_resource_layout() {
        let config = ClientConfig {
            base_url: "http://api.local/".into(),
            ..ClientConfig::default()
        };
        let produtos = HttpEntityService::<Produto>::new(&config).unwrap();
        assert_eq!(produtos.resource_url(), "http://api.local/api/produtos");
        assert_eq!(
            produtos.entity_url(&join_domain::ProdutoId::new(7)),
            "http://api.local/api/produtos/7"
        );

        let categorias = HttpEntityService::<Categoria>::new(&config).unwrap();
        assert_eq!(categorias.resource_url(), "http://api.local/api/categorias");
    }
}
